use crate::composite::alpha_composite;
use crate::error::AppError;
use crate::stripes::{render_stripes, BackgroundShape, StripeConfig};

use std::path::{Path, PathBuf};

use image::ImageFormat;
use indicatif::ProgressBar;
use tracing::{debug, info};

/// Renders stripes behind the image at `input_path` and saves the result as
/// PNG at `output_path`. Nothing is written unless every step succeeds.
pub fn add_radial_stripes_background(
    input_path: &Path,
    output_path: &Path,
    config: &StripeConfig,
    shape: BackgroundShape,
    pb: &ProgressBar,
) -> Result<PathBuf, AppError> {
    let img = image::open(input_path)
        .map_err(|source| AppError::CannotOpen {
            path: input_path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    let (width, height) = img.dimensions();
    debug!(path = %input_path.display(), width, height, "opened source image");
    if width != height {
        return Err(AppError::NotSquare { width, height });
    }

    pb.set_message("Rendering radial stripes");
    let stripes = render_stripes(width, height, config, shape, pb);

    pb.set_message("Compositing");
    let final_output = alpha_composite(&stripes, &img)?;

    final_output.save_with_format(output_path, ImageFormat::Png)?;
    pb.finish_with_message("Background applied");
    info!(path = %output_path.display(), "saved image");

    Ok(output_path.to_path_buf())
}
