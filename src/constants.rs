//! Constants used throughout the application

/// Values per detector output row: 4 box + 10 landmark coordinates + 1 score
pub const DETECTION_ROW_LEN: usize = 15;

/// Number of facial landmarks returned per face
pub const NUM_LANDMARKS: usize = 5;

/// Offset of the first landmark coordinate in a detector output row
pub const LANDMARK_OFFSET: usize = 4;

/// Offset of the confidence score in a detector output row
pub const SCORE_OFFSET: usize = 14;

/// Default detector parameters
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.6;
pub const DEFAULT_NMS_THRESHOLD: f32 = 0.3;
pub const DEFAULT_TOP_K: i32 = 5000;

/// Default capture loop parameters
pub const DEFAULT_BUFFER_SIZE: usize = 5;
pub const DEFAULT_DROP_RATE: usize = 2;

/// Camera index used when no source is configured
pub const DEFAULT_SOURCE: &str = "0";

/// Display window title
pub const DEFAULT_WINDOW_NAME: &str = "YuNet Demo";

/// Milliseconds to wait for a key press each iteration
pub const KEY_WAIT_MS: i32 = 1;

/// Overlay geometry
pub const BOX_THICKNESS: i32 = 2;
pub const LANDMARK_RADIUS: i32 = 1;
pub const LABEL_OFFSET_Y: i32 = 12;
pub const FPS_ORIGIN: (i32, i32) = (0, 15);
pub const FONT_SCALE: f64 = 0.5;

/// Overlay colors in BGR order
pub const BOX_COLOR: [u8; 3] = [0, 255, 0];
pub const TEXT_COLOR: [u8; 3] = [0, 0, 255];
pub const LANDMARK_COLORS: [[u8; 3]; NUM_LANDMARKS] = [
    [255, 0, 0],   // right eye
    [0, 0, 255],   // left eye
    [0, 255, 0],   // nose tip
    [255, 0, 255], // right mouth corner
    [0, 255, 255], // left mouth corner
];
