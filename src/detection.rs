//! Detection records produced by the YuNet face detector.
//!
//! `FaceDetectorYN::detect` writes one `CV_32F` row per face with the layout
//! `[x, y, w, h, rx, ry, lx, ly, nx, ny, rmx, rmy, lmx, lmy, score]`.

use crate::constants::{DETECTION_ROW_LEN, LANDMARK_OFFSET, NUM_LANDMARKS, SCORE_OFFSET};
use crate::utils::safe_cast::f32_to_pixel;
use crate::{Error, Result};
use opencv::core::{Mat, Point, Point2f, Rect, Rect2f, CV_32F};
use opencv::prelude::*;

/// Facial keypoints in detector output order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landmark {
    /// Right eye (from the subject's point of view)
    RightEye,
    /// Left eye
    LeftEye,
    /// Tip of the nose
    NoseTip,
    /// Right corner of the mouth
    RightMouthCorner,
    /// Left corner of the mouth
    LeftMouthCorner,
}

impl Landmark {
    /// All landmarks in the order the detector emits them
    pub const ALL: [Self; NUM_LANDMARKS] = [
        Self::RightEye,
        Self::LeftEye,
        Self::NoseTip,
        Self::RightMouthCorner,
        Self::LeftMouthCorner,
    ];

    /// Position of this landmark within a detection record
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human readable name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RightEye => "right eye",
            Self::LeftEye => "left eye",
            Self::NoseTip => "nose tip",
            Self::RightMouthCorner => "right mouth corner",
            Self::LeftMouthCorner => "left mouth corner",
        }
    }
}

/// A single detected face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Bounding box as `x, y, width, height` in frame pixels
    pub bbox: Rect2f,
    /// Five facial landmarks, indexed by [`Landmark::index`]
    pub landmarks: [Point2f; NUM_LANDMARKS],
    /// Detector confidence
    pub score: f32,
}

impl Detection {
    /// Parse one detector output row.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the row holds fewer than 15 values.
    pub fn from_row(row: &[f32]) -> Result<Self> {
        if row.len() < DETECTION_ROW_LEN {
            return Err(Error::InvalidInput(format!(
                "Detection row has {} values, expected {}",
                row.len(),
                DETECTION_ROW_LEN
            )));
        }

        let bbox = Rect2f::new(row[0], row[1], row[2], row[3]);
        let mut landmarks = [Point2f::default(); NUM_LANDMARKS];
        for (i, landmark) in landmarks.iter_mut().enumerate() {
            let base = LANDMARK_OFFSET + i * 2;
            *landmark = Point2f::new(row[base], row[base + 1]);
        }

        Ok(Self {
            bbox,
            landmarks,
            score: row[SCORE_OFFSET],
        })
    }

    /// Flatten back into the detector's row layout
    #[must_use]
    pub fn to_row(&self) -> [f32; DETECTION_ROW_LEN] {
        let mut row = [0.0; DETECTION_ROW_LEN];
        row[0] = self.bbox.x;
        row[1] = self.bbox.y;
        row[2] = self.bbox.width;
        row[3] = self.bbox.height;
        for (i, landmark) in self.landmarks.iter().enumerate() {
            row[LANDMARK_OFFSET + i * 2] = landmark.x;
            row[LANDMARK_OFFSET + i * 2 + 1] = landmark.y;
        }
        row[SCORE_OFFSET] = self.score;
        row
    }

    /// Coordinates of a single landmark
    #[must_use]
    pub fn landmark(&self, landmark: Landmark) -> Point2f {
        self.landmarks[landmark.index()]
    }

    /// Bounding box truncated to integer pixels
    #[must_use]
    pub fn pixel_box(&self) -> Rect {
        Rect::new(
            f32_to_pixel(self.bbox.x),
            f32_to_pixel(self.bbox.y),
            f32_to_pixel(self.bbox.width),
            f32_to_pixel(self.bbox.height),
        )
    }

    /// Landmarks truncated to integer pixels
    #[must_use]
    pub fn pixel_landmarks(&self) -> [Point; NUM_LANDMARKS] {
        self.landmarks
            .map(|p| Point::new(f32_to_pixel(p.x), f32_to_pixel(p.y)))
    }
}

/// Convert the raw `faces` Mat written by the detector into detection records.
///
/// An empty Mat means no faces were found and yields an empty list.
///
/// # Errors
///
/// Returns `InvalidInput` if the Mat is not a `CV_32F` matrix with at least
/// 15 columns, or `OpenCV` if a row cannot be accessed.
pub fn detections_from_mat(faces: &Mat) -> Result<Vec<Detection>> {
    if faces.empty() {
        return Ok(Vec::new());
    }

    if faces.typ() != CV_32F {
        return Err(Error::InvalidInput(format!(
            "Detector output has type {}, expected CV_32F",
            faces.typ()
        )));
    }
    let expected_cols = i32::try_from(DETECTION_ROW_LEN).unwrap_or(i32::MAX);
    if faces.cols() < expected_cols {
        return Err(Error::InvalidInput(format!(
            "Detector output has {} columns, expected {}",
            faces.cols(),
            DETECTION_ROW_LEN
        )));
    }

    (0..faces.rows())
        .map(|i| Detection::from_row(faces.at_row::<f32>(i)?))
        .collect()
}
