use crate::error::AppError;
use crate::stripes::BackgroundShape;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{Arg, ArgMatches, Command};
use config::{Config, File};
use serde_derive::Deserialize;
use tracing::Level;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub shape: BackgroundShape,
    pub log_level: Level,
    pub progress: bool,
}

#[derive(Debug, Deserialize)]
struct SerializedSettings {
    output_dir: String,
    shape: String,
    log_level: String,
    progress: String,
}

fn user_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from(""))
        .join(".config/radial-stripes/config.toml")
}

/// Layers built-in defaults, the user file (when present) and an explicit
/// `--config` file, in rising priority.
fn load_config(
    user_config: &Path,
    config_path: Option<&str>,
) -> Result<SerializedSettings, config::ConfigError> {
    let user_file = user_config
        .exists()
        .then(|| File::from(user_config).required(false));
    let explicit_file = config_path.map(|path| File::with_name(path).required(true));

    Config::builder()
        .set_default("output_dir", ".")?
        .set_default("shape", "full")?
        .set_default("log_level", "warn")?
        .set_default("progress", "true")?
        .add_source(user_file.into_iter().chain(explicit_file).collect::<Vec<_>>())
        .build()?
        .try_deserialize()
}

fn command() -> Command<'static> {
    Command::new("Radial Stripes")
        .version(VERSION)
        .about("Puts a radial striped background behind a square transparent image")
        .after_help("Colors, stripe width and file names are asked for interactively.\n\nConfig is a TOML file with any of: output_dir (directory the output is written to), shape ('full' fills the whole canvas, 'circle' only the inscribed circle), log_level (error, warn, info, debug or trace) and progress (true or false). ~/.config/radial-stripes/config.toml is read when present.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("/path/to/config.toml")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .arg(
            Arg::new("Output Dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Directory the output image is written to (defaults to the current directory)")
                .takes_value(true),
        )
        .arg(
            Arg::new("circle")
                .long("circle")
                .help("Only paint the circle inscribed in the image"),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .help("Hides the progress bar"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Logs debug output to stderr"),
        )
}

pub fn init() -> Result<Settings, AppError> {
    init_from(std::env::args_os())
}

pub fn init_from<I, T>(args: I) -> Result<Settings, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().get_matches_from(args);
    resolve(&matches, &user_config_path())
}

fn resolve(matches: &ArgMatches, user_config: &Path) -> Result<Settings, AppError> {
    let config = load_config(user_config, matches.value_of("config"))?;

    let output_dir = matches
        .value_of("Output Dir")
        .unwrap_or(&config.output_dir);

    let shape = if matches.is_present("circle") {
        BackgroundShape::Circle
    } else {
        parse_shape(&config.shape)?
    };

    let log_level = if matches.is_present("verbose") {
        Level::DEBUG
    } else {
        config
            .log_level
            .parse()
            .map_err(|_| AppError::InvalidSetting {
                key: "log_level",
                value: config.log_level.clone(),
            })?
    };

    let progress = !matches.is_present("no-progress") && parse_bool("progress", &config.progress)?;

    Ok(Settings {
        output_dir: PathBuf::from(output_dir),
        shape,
        log_level,
        progress,
    })
}

fn parse_shape(value: &str) -> Result<BackgroundShape, AppError> {
    match value.trim().to_lowercase().as_str() {
        "full" => Ok(BackgroundShape::Full),
        "circle" => Ok(BackgroundShape::Circle),
        _ => Err(AppError::InvalidSetting {
            key: "shape",
            value: value.to_string(),
        }),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, AppError> {
    value.trim().parse().map_err(|_| AppError::InvalidSetting {
        key,
        value: value.to_string(),
    })
}
