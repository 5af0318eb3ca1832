use crate::error::AppError;

use image::{Rgba, RgbaImage};

/// Porter-Duff "over" for straight (non-premultiplied) RGBA8 pixels.
pub fn over(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    match foreground[3] {
        u8::MAX => return foreground,
        0 => return background,
        _ => {}
    }

    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;
    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);
    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let fg = foreground[i] as f32 / 255.0;
        let bg = background[i] as f32 / 255.0;
        let premultiplied = fg * fg_alpha + bg * bg_alpha * (1.0 - fg_alpha);
        to_u8(premultiplied / out_alpha)
    };

    Rgba([channel(0), channel(1), channel(2), to_u8(out_alpha)])
}

fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Composites `foreground` over `background`; both must share dimensions.
pub fn alpha_composite(
    background: &RgbaImage,
    foreground: &RgbaImage,
) -> Result<RgbaImage, AppError> {
    if background.dimensions() != foreground.dimensions() {
        return Err(AppError::DimensionMismatch(
            background.dimensions(),
            foreground.dimensions(),
        ));
    }

    let (width, height) = foreground.dimensions();
    let mut output = RgbaImage::new(width, height);
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        *pixel = over(*background.get_pixel(x, y), *foreground.get_pixel(x, y));
    }

    Ok(output)
}
