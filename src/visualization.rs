//! Overlay drawing for detection results.

use crate::config::DisplayConfig;
use crate::constants::{
    BOX_COLOR, BOX_THICKNESS, FONT_SCALE, FPS_ORIGIN, LABEL_OFFSET_Y, LANDMARK_COLORS, LANDMARK_RADIUS,
    NUM_LANDMARKS, TEXT_COLOR,
};
use crate::detection::Detection;
use crate::Result;
use opencv::{
    core::{Mat, Point, Scalar},
    imgproc::{self, FILLED, FONT_HERSHEY_DUPLEX, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
};

/// Colors used when drawing detections
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    /// Bounding box color
    pub box_color: Scalar,
    /// Confidence label and FPS color
    pub text_color: Scalar,
    /// One color per landmark, in detector order
    pub landmark_colors: [Scalar; NUM_LANDMARKS],
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            box_color: bgr(BOX_COLOR),
            text_color: bgr(TEXT_COLOR),
            landmark_colors: LANDMARK_COLORS.map(bgr),
        }
    }
}

impl From<&DisplayConfig> for OverlayStyle {
    fn from(display: &DisplayConfig) -> Self {
        Self {
            box_color: bgr(display.box_color),
            text_color: bgr(display.text_color),
            ..Self::default()
        }
    }
}

/// Build an `OpenCV` color from BGR components
#[must_use]
pub fn bgr(color: [u8; 3]) -> Scalar {
    Scalar::new(f64::from(color[0]), f64::from(color[1]), f64::from(color[2]), 0.0)
}

/// Draw detections and an optional FPS readout onto a copy of `image`.
///
/// The input frame is left untouched. With no detections and no FPS the
/// returned frame is pixel-identical to the input.
///
/// # Errors
///
/// Returns `OpenCV` if the frame cannot be copied or drawn on
pub fn visualize(
    image: &Mat,
    detections: &[Detection],
    style: &OverlayStyle,
    fps: Option<f64>,
) -> Result<Mat> {
    let mut output = image.try_clone()?;

    if let Some(fps) = fps {
        imgproc::put_text(
            &mut output,
            &format!("FPS: {fps:.2}"),
            Point::new(FPS_ORIGIN.0, FPS_ORIGIN.1),
            FONT_HERSHEY_SIMPLEX,
            FONT_SCALE,
            style.text_color,
            1,
            LINE_8,
            false,
        )?;
    }

    for detection in detections {
        draw_detection(&mut output, detection, style)?;
    }

    Ok(output)
}

fn draw_detection(frame: &mut Mat, detection: &Detection, style: &OverlayStyle) -> Result<()> {
    let bbox = detection.pixel_box();
    imgproc::rectangle_points(
        frame,
        Point::new(bbox.x, bbox.y),
        Point::new(bbox.x + bbox.width, bbox.y + bbox.height),
        style.box_color,
        BOX_THICKNESS,
        LINE_8,
        0,
    )?;

    imgproc::put_text(
        frame,
        &format!("{:.4}", detection.score),
        Point::new(bbox.x, bbox.y + LABEL_OFFSET_Y),
        FONT_HERSHEY_DUPLEX,
        FONT_SCALE,
        style.text_color,
        1,
        LINE_8,
        false,
    )?;

    for (point, color) in detection.pixel_landmarks().iter().zip(style.landmark_colors.iter()) {
        imgproc::circle(frame, *point, LANDMARK_RADIUS, *color, FILLED, LINE_8, 0)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bgr() {
        assert_eq!(bgr([1, 2, 3]), Scalar::new(1.0, 2.0, 3.0, 0.0));
    }

    #[test]
    fn test_default_style() {
        let style = OverlayStyle::default();
        assert_eq!(style.box_color, Scalar::new(0.0, 255.0, 0.0, 0.0));
        assert_eq!(style.text_color, Scalar::new(0.0, 0.0, 255.0, 0.0));
        assert_eq!(style.landmark_colors[0], Scalar::new(255.0, 0.0, 0.0, 0.0));
        assert_eq!(style.landmark_colors[4], Scalar::new(0.0, 255.0, 255.0, 0.0));
    }

    #[test]
    fn test_style_from_display_config() {
        let display = DisplayConfig {
            box_color: [10, 20, 30],
            text_color: [40, 50, 60],
            ..DisplayConfig::default()
        };
        let style = OverlayStyle::from(&display);
        assert_eq!(style.box_color, bgr([10, 20, 30]));
        assert_eq!(style.text_color, bgr([40, 50, 60]));
        assert_eq!(style.landmark_colors, OverlayStyle::default().landmark_colors);
    }
}
