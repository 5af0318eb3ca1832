//! Radial stripe rasterization.
//!
//! Angles follow the usual pie-slice convention: 0° points at 3 o'clock and
//! angles grow clockwise on screen (image y grows downward). A pixel belongs
//! to the sector containing the angle from the canvas midpoint to the pixel
//! center.

use crate::color::{to_rgba, Color};

use image::{Rgba, RgbaImage};
use indicatif::ProgressBar;
use thiserror::Error;
use tracing::debug;

pub const FULL_TURN: f64 = 360.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StripeConfigError {
    #[error("at least one color is required")]
    NoColors,

    #[error("distance must be a number between 0 and 360, got {0}")]
    DistanceOutOfRange(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeMode {
    Multicolor,
    Zebra,
}

impl StripeMode {
    pub fn label(self) -> &'static str {
        match self {
            StripeMode::Multicolor => "Multicolor Stripes",
            StripeMode::Zebra => "Zebra Stripes (2 colors)",
        }
    }
}

/// Which part of the canvas the sectors cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundShape {
    /// Every pixel of the canvas.
    #[default]
    Full,
    /// Only the circle inscribed in the canvas; the corners stay transparent.
    Circle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StripeConfig {
    colors: Vec<Color>,
    distance: f64,
    sector_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: Color,
}

impl StripeConfig {
    pub fn new(colors: Vec<Color>, distance: f64) -> Result<Self, StripeConfigError> {
        if colors.is_empty() {
            return Err(StripeConfigError::NoColors);
        }
        if !(distance > 0.0 && distance <= FULL_TURN) {
            return Err(StripeConfigError::DistanceOutOfRange(distance));
        }
        Ok(Self {
            colors,
            distance,
            sector_count: count_sectors(distance),
        })
    }

    pub fn zebra(first: Color, second: Color, distance: f64) -> Result<Self, StripeConfigError> {
        Self::new(vec![first, second], distance)
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Number of sectors needed to cover a full turn, the last one clipped.
    pub fn sector_count(&self) -> usize {
        self.sector_count
    }

    pub fn sectors(&self) -> impl Iterator<Item = Sector> + '_ {
        (0..self.sector_count()).map(move |index| Sector {
            index,
            start_angle: index as f64 * self.distance,
            end_angle: ((index + 1) as f64 * self.distance).min(FULL_TURN),
            color: self.colors[index % self.colors.len()],
        })
    }

    /// Sector index for an angle in `[0, 360)`. Boundary angles go to the
    /// later sector.
    pub fn sector_at(&self, angle: f64) -> usize {
        let index = (angle / self.distance).floor().max(0.0) as usize;
        index.min(self.sector_count - 1)
    }
}

fn count_sectors(distance: f64) -> usize {
    let mut count = (FULL_TURN / distance).ceil() as usize;
    // ceil can pick up float noise, e.g. 360 / 0.1
    while count > 1 && (count - 1) as f64 * distance >= FULL_TURN {
        count -= 1;
    }
    count
}

/// Clockwise angle in degrees from the +x axis, in `[0, 360)`.
pub fn pixel_angle(x: u32, y: u32, width: u32, height: u32) -> f64 {
    let dx = x as f64 + 0.5 - width as f64 / 2.0;
    let dy = y as f64 + 0.5 - height as f64 / 2.0;
    let angle = dy.atan2(dx).to_degrees();
    if angle < 0.0 {
        (angle + FULL_TURN) % FULL_TURN
    } else {
        angle
    }
}

fn inside_inscribed_circle(x: u32, y: u32, width: u32, height: u32) -> bool {
    let rx = width as f64 / 2.0;
    let ry = height as f64 / 2.0;
    let nx = (x as f64 + 0.5 - rx) / rx;
    let ny = (y as f64 + 0.5 - ry) / ry;
    nx * nx + ny * ny <= 1.0
}

pub fn render_stripes(
    width: u32,
    height: u32,
    config: &StripeConfig,
    shape: BackgroundShape,
    pb: &ProgressBar,
) -> RgbaImage {
    debug!(
        width,
        height,
        sectors = config.sector_count(),
        distance = config.distance,
        ?shape,
        "rendering radial stripes"
    );

    let palette: Vec<Rgba<u8>> = config.colors.iter().copied().map(to_rgba).collect();
    let mut stripes = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));

    pb.set_length(u64::from(height));
    for y in 0..height {
        for x in 0..width {
            if shape == BackgroundShape::Circle && !inside_inscribed_circle(x, y, width, height) {
                continue;
            }
            let sector = config.sector_at(pixel_angle(x, y, width, height));
            stripes.put_pixel(x, y, palette[sector % palette.len()]);
        }
        pb.inc(1);
    }

    stripes
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::Srgb;

    const RED: Color = Srgb::new(255, 0, 0);
    const BLUE: Color = Srgb::new(0, 0, 255);
    const GREEN: Color = Srgb::new(0, 255, 0);

    #[test]
    fn rejects_invalid_configs() {
        assert_eq!(StripeConfig::new(vec![], 10.0), Err(StripeConfigError::NoColors));
        for distance in [0.0, -5.0, 360.5, f64::NAN, f64::INFINITY] {
            assert!(StripeConfig::new(vec![RED], distance).is_err(), "{distance}");
        }
        assert!(StripeConfig::new(vec![RED], 360.0).is_ok());
    }

    #[test]
    fn zebra_sector_count_and_colors() {
        for distance in [1.0, 7.0, 10.0, 45.0, 90.0, 100.0, 200.0, 359.0, 360.0] {
            let config = StripeConfig::zebra(RED, BLUE, distance).unwrap();
            let sectors: Vec<Sector> = config.sectors().collect();
            assert_eq!(sectors.len(), (360.0_f64 / distance).ceil() as usize, "{distance}");
            for sector in &sectors {
                let expected = if sector.index % 2 == 0 { RED } else { BLUE };
                assert_eq!(sector.color, expected);
            }
        }
    }

    #[test]
    fn last_sector_is_clipped() {
        let config = StripeConfig::new(vec![RED, GREEN, BLUE], 100.0).unwrap();
        let sectors: Vec<Sector> = config.sectors().collect();
        assert_eq!(sectors.len(), 4);
        assert_eq!(sectors[3].start_angle, 300.0);
        assert_eq!(sectors[3].end_angle, 360.0);
        assert_eq!(sectors[3].color, RED);
    }

    #[test]
    fn tiny_distance_does_not_add_empty_sector() {
        let config = StripeConfig::new(vec![RED], 0.1).unwrap();
        let last = config.sectors().last().unwrap();
        assert!(last.start_angle < 360.0);
        assert!(last.end_angle <= 360.0);
    }

    #[test]
    fn boundary_angle_goes_to_later_sector() {
        let config = StripeConfig::zebra(RED, BLUE, 90.0).unwrap();
        assert_eq!(config.sector_at(0.0), 0);
        assert_eq!(config.sector_at(89.999), 0);
        assert_eq!(config.sector_at(90.0), 1);
        assert_eq!(config.sector_at(359.999), 3);
    }

    #[test]
    fn pixel_angles_turn_clockwise_from_three_o_clock() {
        // right, bottom, left, top of the center
        assert!(pixel_angle(99, 50, 100, 100) < 1.0);
        assert!((pixel_angle(50, 99, 100, 100) - 90.0).abs() < 1.0);
        assert!((pixel_angle(0, 50, 100, 100) - 180.0).abs() < 1.0);
        assert!((pixel_angle(50, 0, 100, 100) - 270.0).abs() < 1.0);
    }

    #[test]
    fn single_color_full_turn_fills_canvas() {
        let config = StripeConfig::new(vec![GREEN], 360.0).unwrap();
        let img = render_stripes(31, 31, &config, BackgroundShape::Full, &ProgressBar::hidden());
        assert!(img.pixels().all(|p| *p == Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn quadrants_alternate() {
        let config = StripeConfig::zebra(RED, BLUE, 90.0).unwrap();
        let img = render_stripes(40, 40, &config, BackgroundShape::Full, &ProgressBar::hidden());
        assert_eq!(*img.get_pixel(30, 30), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(10, 30), Rgba([0, 0, 255, 255]));
        assert_eq!(*img.get_pixel(10, 10), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(30, 10), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn circle_shape_leaves_corners_transparent() {
        let config = StripeConfig::new(vec![RED], 360.0).unwrap();
        let img = render_stripes(50, 50, &config, BackgroundShape::Circle, &ProgressBar::hidden());
        for (x, y) in [(0, 0), (49, 0), (0, 49), (49, 49)] {
            assert_eq!(img.get_pixel(x, y)[3], 0);
        }
        assert_eq!(*img.get_pixel(25, 25), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(25, 0), Rgba([255, 0, 0, 255]));
    }
}
