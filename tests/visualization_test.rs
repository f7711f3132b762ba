//! Pixel-level tests for the detection overlay


use test_helpers::{create_test_image, detection, is_all_black, pixel};
use yunet_stream::{
    constants::{BOX_COLOR, LANDMARK_COLORS, TEXT_COLOR},
    detection::Detection,
    visualization::{visualize, OverlayStyle},
    Result,
};
use opencv::prelude::*;

const LANDMARKS: [(f32, f32); 5] = [
    (100.0, 120.0),
    (200.0, 120.0),
    (150.0, 170.0),
    (110.0, 220.0),
    (190.0, 220.0),
];

fn sample_face() -> Detection {
    detection((50.0, 50.0, 200.0, 200.0), LANDMARKS, 0.93)
}

#[test]
fn test_no_detections_no_fps_is_identical() -> Result<()> {
    let image = test_helpers::solid_frame(120, 160, 37)?;

    let output = visualize(&image, &[], &OverlayStyle::default(), None)?;

    assert_eq!(output.size()?, image.size()?);
    assert_eq!(output.data_bytes()?, image.data_bytes()?);
    Ok(())
}

#[test]
fn test_output_is_a_distinct_copy() -> Result<()> {
    let image = create_test_image(400, 400)?;

    let output = visualize(&image, &[sample_face()], &OverlayStyle::default(), Some(30.0))?;

    assert!(is_all_black(&image)?, "input frame must not be drawn on");
    assert!(!is_all_black(&output)?);
    Ok(())
}

#[test]
fn test_fps_only_touches_the_top_line() -> Result<()> {
    let image = create_test_image(200, 200)?;

    let output = visualize(&image, &[], &OverlayStyle::default(), Some(25.0))?;

    let mut text_pixels = 0;
    for y in 0..output.rows() {
        for x in 0..output.cols() {
            let px = pixel(&output, x, y)?;
            if px != [0, 0, 0] {
                assert!(y < 20, "FPS text leaked to row {y}");
                assert_eq!(px, TEXT_COLOR);
                text_pixels += 1;
            }
        }
    }
    assert!(text_pixels > 0);
    Ok(())
}

#[test]
fn test_box_edges_are_drawn() -> Result<()> {
    let image = create_test_image(400, 400)?;

    let output = visualize(&image, &[sample_face()], &OverlayStyle::default(), None)?;

    // Left, right, top and bottom edges of (50,50)-(250,250)
    assert_eq!(pixel(&output, 50, 150)?, BOX_COLOR);
    assert_eq!(pixel(&output, 250, 150)?, BOX_COLOR);
    assert_eq!(pixel(&output, 150, 50)?, BOX_COLOR);
    assert_eq!(pixel(&output, 150, 250)?, BOX_COLOR);

    // Inside and outside the box stay untouched
    assert_eq!(pixel(&output, 150, 100)?, [0, 0, 0]);
    assert_eq!(pixel(&output, 20, 20)?, [0, 0, 0]);
    assert_eq!(pixel(&output, 300, 300)?, [0, 0, 0]);
    Ok(())
}

#[test]
fn test_landmarks_drawn_at_their_coordinates() -> Result<()> {
    let image = create_test_image(400, 400)?;

    let output = visualize(&image, &[sample_face()], &OverlayStyle::default(), None)?;

    for ((x, y), color) in LANDMARKS.iter().zip(LANDMARK_COLORS.iter()) {
        assert_eq!(pixel(&output, *x as i32, *y as i32)?, *color);
        // Radius 1: two pixels away is untouched
        assert_eq!(pixel(&output, *x as i32 + 3, *y as i32)?, [0, 0, 0]);
    }
    Ok(())
}

#[test]
fn test_confidence_label_below_top_edge() -> Result<()> {
    let image = create_test_image(400, 400)?;

    let output = visualize(&image, &[sample_face()], &OverlayStyle::default(), None)?;

    let mut label_pixels = 0;
    for y in 52..64 {
        for x in 52..140 {
            if pixel(&output, x, y)? == TEXT_COLOR {
                label_pixels += 1;
            }
        }
    }
    assert!(label_pixels > 0, "confidence label missing");
    Ok(())
}

#[test]
fn test_fractional_coordinates_truncate() -> Result<()> {
    let image = create_test_image(100, 100)?;
    let face = detection(
        (10.9, 10.9, 60.2, 60.2),
        [(30.7, 40.9), (50.2, 40.1), (40.5, 50.5), (32.9, 60.9), (48.1, 60.1)],
        0.5,
    );

    let output = visualize(&image, &[face], &OverlayStyle::default(), None)?;

    // Box corner truncates to (10, 10)
    assert_eq!(pixel(&output, 10, 40)?, BOX_COLOR);
    // Nose tip truncates to (40, 50)
    assert_eq!(pixel(&output, 40, 50)?, LANDMARK_COLORS[2]);
    Ok(())
}

#[test]
fn test_multiple_faces() -> Result<()> {
    let image = create_test_image(300, 600)?;
    let left = sample_face();
    let right = detection(
        (350.0, 50.0, 200.0, 200.0),
        LANDMARKS.map(|(x, y)| (x + 300.0, y)),
        0.81,
    );

    let output = visualize(&image, &[left, right], &OverlayStyle::default(), None)?;

    assert_eq!(pixel(&output, 50, 150)?, BOX_COLOR);
    assert_eq!(pixel(&output, 350, 150)?, BOX_COLOR);
    assert_eq!(pixel(&output, 400, 120)?, LANDMARK_COLORS[0]);
    Ok(())
}

#[test]
fn test_custom_style_colors() -> Result<()> {
    let image = create_test_image(400, 400)?;
    let style = OverlayStyle {
        box_color: yunet_stream::visualization::bgr([200, 100, 50]),
        ..OverlayStyle::default()
    };

    let output = visualize(&image, &[sample_face()], &style, None)?;

    assert_eq!(pixel(&output, 50, 150)?, [200, 100, 50]);
    Ok(())
}
