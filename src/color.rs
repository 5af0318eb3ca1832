use image::Rgba;
use palette::Srgb;
use thiserror::Error;

/// An opaque 8-bit sRGB color.
pub type Color = Srgb<u8>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected six hexadecimal digits after '#'")]
    InvalidHex,

    #[error("expected 3 comma-separated components, found {0}")]
    ComponentCount(usize),

    #[error("'{0}' is not an integer")]
    InvalidComponent(String),

    #[error("component {0} is outside 0-255")]
    OutOfRange(i64),
}

/// Parses `#RRGGBB` or `R,G,B` into a color.
///
/// Surrounding whitespace is ignored, as is whitespace around each decimal
/// component.
pub fn parse_color(input: &str) -> Result<Color, ColorParseError> {
    let input = input.trim();
    if input.starts_with('#') {
        hex_to_rgb(input)
    } else {
        decimal_to_rgb(input)
    }
}

fn hex_to_rgb(hex: &str) -> Result<Color, ColorParseError> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidHex);
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError::InvalidHex)
    };

    Ok(Srgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn decimal_to_rgb(input: &str) -> Result<Color, ColorParseError> {
    let parts: Vec<&str> = input.split(',').collect();
    if parts.len() != 3 {
        return Err(ColorParseError::ComponentCount(parts.len()));
    }

    let mut channels = [0u8; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        let part = part.trim();
        let value: i64 = part
            .parse()
            .map_err(|_| ColorParseError::InvalidComponent(part.to_string()))?;
        *slot = u8::try_from(value).map_err(|_| ColorParseError::OutOfRange(value))?;
    }

    let [red, green, blue] = channels;
    Ok(Srgb::new(red, green, blue))
}

/// Formats a color as uppercase `#RRGGBB`.
pub fn format_hex(color: Color) -> String {
    format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

pub fn to_rgba(color: Color) -> Rgba<u8> {
    Rgba([color.red, color.green, color.blue, u8::MAX])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_in_either_case() {
        assert_eq!(parse_color("#FF5733"), Ok(Srgb::new(255, 87, 51)));
        assert_eq!(parse_color("#ff5733"), Ok(Srgb::new(255, 87, 51)));
        assert_eq!(parse_color("  #000000 "), Ok(Srgb::new(0, 0, 0)));
    }

    #[test]
    fn repeated_leading_hashes_are_stripped() {
        assert_eq!(parse_color("##33C1FF"), Ok(Srgb::new(51, 193, 255)));
    }

    #[test]
    fn parses_decimal_with_whitespace() {
        assert_eq!(parse_color("255,87,51"), Ok(Srgb::new(255, 87, 51)));
        assert_eq!(parse_color(" 51 , 193,  255 "), Ok(Srgb::new(51, 193, 255)));
        assert_eq!(parse_color("0,0,0"), Ok(Srgb::new(0, 0, 0)));
    }

    #[test]
    fn hex_and_decimal_agree() {
        for (hex, dec) in [
            ("#FF0000", "255,0,0"),
            ("#0000FF", "0,0,255"),
            ("#7F7F7F", "127,127,127"),
            ("#010203", "1,2,3"),
        ] {
            assert_eq!(parse_color(hex), parse_color(dec), "{hex} vs {dec}");
        }
    }

    #[test]
    fn rejects_bad_hex() {
        for input in ["#FFF", "#FF57331", "#GG0000", "#", "#+F0000", "# FF000"] {
            assert_eq!(parse_color(input), Err(ColorParseError::InvalidHex), "{input}");
        }
    }

    #[test]
    fn rejects_wrong_component_count() {
        assert_eq!(parse_color("1,2"), Err(ColorParseError::ComponentCount(2)));
        assert_eq!(parse_color("1,2,3,4"), Err(ColorParseError::ComponentCount(4)));
        assert_eq!(parse_color(""), Err(ColorParseError::ComponentCount(1)));
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert_eq!(parse_color("256,0,0"), Err(ColorParseError::OutOfRange(256)));
        assert_eq!(parse_color("0,-1,0"), Err(ColorParseError::OutOfRange(-1)));
        assert_eq!(
            parse_color("red,0,0"),
            Err(ColorParseError::InvalidComponent("red".to_string()))
        );
        assert_eq!(
            parse_color("1.5,0,0"),
            Err(ColorParseError::InvalidComponent("1.5".to_string()))
        );
    }

    #[test]
    fn formats_uppercase_hex() {
        assert_eq!(format_hex(Srgb::new(255, 87, 51)), "#FF5733");
        assert_eq!(format_hex(Srgb::new(0, 10, 171)), "#000AAB");
    }

    #[test]
    fn rgba_is_opaque() {
        assert_eq!(to_rgba(Srgb::new(1, 2, 3)), Rgba([1, 2, 3, 255]));
    }
}
