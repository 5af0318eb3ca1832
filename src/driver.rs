//! Console prompts that gather the stripe parameters.
//!
//! Every prompt repeats until its answer validates. The parsing lives in
//! small pure functions so it can be used without a console.

use crate::background::add_radial_stripes_background;
use crate::color::{format_hex, parse_color, Color};
use crate::error::AppError;
use crate::stripes::{BackgroundShape, StripeConfig, StripeMode, FULL_TURN};

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

const COLOR_HELP: &str =
    "Invalid input. Please enter a color in hexadecimal (e.g., #FF5733) or RGB format (e.g., 255,87,51).";

#[derive(Debug)]
pub enum Outcome {
    Saved(PathBuf),
    Cancelled,
    Failed(AppError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    InvalidChoice,
    NotAnInteger,
    TooFewColors,
    NotANumber,
    DistanceOutOfRange,
    EmptyName,
}

impl InputError {
    fn message(&self) -> &'static str {
        match self {
            InputError::InvalidChoice => "Invalid choice. Please enter 1 or 2.",
            InputError::NotAnInteger => "Invalid input. Please enter an integer.",
            InputError::TooFewColors => "The number of colors must be at least 1.",
            InputError::NotANumber => "Invalid input. Please enter a number.",
            InputError::DistanceOutOfRange => "Distance must be a number between 0 and 360.",
            InputError::EmptyName => "Please enter a name for the output image.",
        }
    }
}

pub fn parse_stripe_mode(input: &str) -> Result<StripeMode, InputError> {
    match input.trim() {
        "1" => Ok(StripeMode::Multicolor),
        "2" => Ok(StripeMode::Zebra),
        _ => Err(InputError::InvalidChoice),
    }
}

pub fn parse_color_count(input: &str) -> Result<usize, InputError> {
    let count: i64 = input.trim().parse().map_err(|_| InputError::NotAnInteger)?;
    if count < 1 {
        return Err(InputError::TooFewColors);
    }
    usize::try_from(count).map_err(|_| InputError::NotAnInteger)
}

pub fn parse_distance(input: &str) -> Result<f64, InputError> {
    let distance: f64 = input.trim().parse().map_err(|_| InputError::NotANumber)?;
    if distance > 0.0 && distance <= FULL_TURN {
        Ok(distance)
    } else {
        Err(InputError::DistanceOutOfRange)
    }
}

/// Appends `.png` unless the name already ends with it, ignoring case.
pub fn normalize_output_name(input: &str) -> Result<String, InputError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(InputError::EmptyName);
    }
    if name.to_lowercase().ends_with(".png") {
        Ok(name.to_string())
    } else {
        Ok(format!("{}.png", name))
    }
}

pub fn parse_confirmation(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

pub struct Driver<R, W> {
    input: R,
    output: W,
    output_dir: PathBuf,
    shape: BackgroundShape,
    show_progress: bool,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    pub fn new(input: R, output: W, output_dir: impl Into<PathBuf>) -> Self {
        Driver {
            input,
            output,
            output_dir: output_dir.into(),
            shape: BackgroundShape::Full,
            show_progress: false,
        }
    }

    pub fn with_shape(mut self, shape: BackgroundShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn run(&mut self) -> Result<Outcome, AppError> {
        writeln!(self.output, "=== Radial Stripes Background Generator ===")?;

        let input_path =
            PathBuf::from(self.ask("Enter the path to your square transparent PNG image: ")?);
        if !input_path.is_file() {
            writeln!(self.output, "The specified file does not exist.")?;
            return Ok(Outcome::Failed(AppError::InputNotFound(input_path)));
        }

        let output_name = self.ask_until(
            "Enter the name for the output image (e.g., final_image.png): ",
            normalize_output_name,
        )?;

        writeln!(self.output, "\nChoose the type of stripes:")?;
        writeln!(self.output, "1. {}", StripeMode::Multicolor.label())?;
        writeln!(self.output, "2. {}", StripeMode::Zebra.label())?;
        let mode = self.ask_until("Enter 1 or 2: ", parse_stripe_mode)?;

        let colors = match mode {
            StripeMode::Multicolor => {
                let count =
                    self.ask_until("Enter the number of colors (minimum 1): ", parse_color_count)?;
                let mut colors = Vec::new();
                for i in 1..=count {
                    colors.push(self.ask_color(&format!(
                        "Enter color {} in hexadecimal (e.g., #FF5733) or RGB (e.g., 255,87,51): ",
                        i
                    ))?);
                }
                colors
            }
            StripeMode::Zebra => {
                writeln!(self.output, "\n=== Zebra Stripes Configuration ===")?;
                vec![
                    self.ask_color("Enter the first color in hexadecimal (e.g., #FF5733) or RGB (e.g., 255,87,51): ")?,
                    self.ask_color("Enter the second color in hexadecimal (e.g., #33C1FF) or RGB (e.g., 51,193,255): ")?,
                ]
            }
        };

        let distance = self.ask_until(
            "Enter the distance between stripes in degrees (e.g., 10): ",
            parse_distance,
        )?;

        let config = StripeConfig::new(colors, distance)?;
        let output_path = self.output_dir.join(&output_name);

        self.print_summary(&input_path, &output_name, mode, &config)?;

        let answer = self.ask("Do you want to proceed? (y/n): ")?;
        if !parse_confirmation(&answer) {
            writeln!(self.output, "Operation cancelled.")?;
            return Ok(Outcome::Cancelled);
        }

        let pb = self.progress_bar();
        match add_radial_stripes_background(&input_path, &output_path, &config, self.shape, &pb) {
            Ok(saved) => {
                writeln!(self.output, "Image saved to {}.", saved.display())?;
                Ok(Outcome::Saved(saved))
            }
            Err(e) => {
                pb.abandon();
                warn!(error = ?e, "failed to apply background");
                match &e {
                    AppError::CannotOpen { path, .. } => {
                        writeln!(self.output, "Cannot open image {}.", path.display())?
                    }
                    AppError::NotSquare { .. } => writeln!(self.output, "The image must be square.")?,
                    other => writeln!(self.output, "{}", other)?,
                }
                Ok(Outcome::Failed(e))
            }
        }
    }

    fn print_summary(
        &mut self,
        input_path: &Path,
        output_name: &str,
        mode: StripeMode,
        config: &StripeConfig,
    ) -> Result<(), AppError> {
        let colors: Vec<String> = config.colors().iter().copied().map(format_hex).collect();

        writeln!(self.output, "\n=== Summary of Parameters ===")?;
        writeln!(self.output, "Input Image: {}", input_path.display())?;
        writeln!(self.output, "Output Image: {}", output_name)?;
        writeln!(self.output, "Stripe Type: {}", mode.label())?;
        writeln!(self.output, "Colors: {}", colors.join(", "))?;
        writeln!(self.output, "Distance between stripes: {} degrees", config.distance())?;
        Ok(())
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(0);
        match ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% ({eta}) {msg}")
        {
            Ok(style) => pb.set_style(style.progress_chars("#>-")),
            Err(e) => debug!(error = %e, "falling back to the default progress style"),
        }
        pb
    }

    fn ask(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::UnexpectedEof);
        }
        Ok(line.trim().to_string())
    }

    fn ask_until<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> Result<T, AppError> {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "{}", e.message())?,
            }
        }
    }

    fn ask_color(&mut self, prompt: &str) -> Result<Color, AppError> {
        loop {
            let answer = self.ask(prompt)?;
            match parse_color(&answer) {
                Ok(color) => return Ok(color),
                Err(e) => {
                    debug!(input = %answer, error = %e, "rejected color");
                    writeln!(self.output, "{}", COLOR_HELP)?;
                }
            }
        }
    }
}
