//! Utility functions shared by the detector adapter and the capture loop.

pub mod safe_cast;

use crate::{Error, Result};
use opencv::core::{Mat, Size};
use opencv::prelude::*;

/// Size of a decoded frame as `width x height`
///
/// # Errors
///
/// Returns `InvalidInput` for an empty Mat, which has no meaningful size
pub fn frame_size(frame: &Mat) -> Result<Size> {
    if frame.empty() {
        return Err(Error::InvalidInput("Frame is empty".to_string()));
    }
    Ok(Size::new(frame.cols(), frame.rows()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC3};

    #[test]
    fn test_frame_size() {
        let frame = Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(0.0)).unwrap();
        assert_eq!(frame_size(&frame).unwrap(), Size::new(640, 480));
    }

    #[test]
    fn test_frame_size_empty() {
        let frame = Mat::default();
        assert!(matches!(frame_size(&frame), Err(Error::InvalidInput(_))));
    }
}
