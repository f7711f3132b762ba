//! Capture loop: read, sample, buffer, detect, draw, show.

use crate::{
    config::Config,
    error::Result,
    face_detection::FaceInference,
    frame_buffer::{FrameBuffer, FrameSampler},
    utils::frame_size,
    video_source::FrameSource,
    visualization::{visualize, OverlayStyle},
};
use log::{debug, info, warn};
use opencv::{
    core::Mat,
    highgui::{self, WINDOW_AUTOSIZE},
};
use std::time::{Duration, Instant};

/// Where annotated frames go
pub trait FrameDisplay {
    /// Present an annotated frame
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be shown
    fn show(&mut self, frame: &Mat) -> Result<()>;

    /// Poll for user input; true once the user asked to stop
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be polled
    fn exit_requested(&mut self) -> Result<bool>;

    /// Tear down any windows
    ///
    /// # Errors
    ///
    /// Returns an error if windows cannot be destroyed
    fn close(&mut self) -> Result<()>;
}

/// `HighGUI` window; any key press stops the loop
pub struct HighGuiDisplay {
    window_name: String,
    key_wait_ms: i32,
}

impl HighGuiDisplay {
    /// Create the named window
    pub fn new(window_name: &str, key_wait_ms: i32) -> Result<Self> {
        highgui::named_window(window_name, WINDOW_AUTOSIZE)?;
        Ok(Self {
            window_name: window_name.to_string(),
            key_wait_ms,
        })
    }
}

impl FrameDisplay for HighGuiDisplay {
    fn show(&mut self, frame: &Mat) -> Result<()> {
        highgui::imshow(&self.window_name, frame)?;
        Ok(())
    }

    fn exit_requested(&mut self) -> Result<bool> {
        let key = highgui::wait_key(self.key_wait_ms)?;
        if key >= 0 {
            info!("Exit requested by user (key {})", key);
        }
        Ok(key >= 0)
    }

    fn close(&mut self) -> Result<()> {
        highgui::destroy_all_windows()?;
        Ok(())
    }
}

/// Display that only logs; used with `--headless`
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    frames_shown: u64,
}

impl HeadlessDisplay {
    /// Frames that would have been shown
    #[must_use]
    pub fn frames_shown(&self) -> u64 {
        self.frames_shown
    }
}

impl FrameDisplay for HeadlessDisplay {
    fn show(&mut self, _frame: &Mat) -> Result<()> {
        self.frames_shown += 1;
        Ok(())
    }

    fn exit_requested(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A frame could not be grabbed
    SourceExhausted,
    /// The user pressed a key
    UserExit,
}

/// Counters collected over one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames successfully read from the source
    pub frames_read: u64,
    /// Frames discarded by the sampler
    pub frames_dropped: u64,
    /// Frames passed through the detector
    pub frames_processed: u64,
    /// Faces found across all processed frames
    pub faces_detected: u64,
    /// Why the loop ended
    pub stop_reason: StopReason,
}

/// The face detection stream application
pub struct StreamApp<S, D, V> {
    source: S,
    detector: D,
    display: V,
    sampler: FrameSampler,
    buffer: FrameBuffer<Mat>,
    style: OverlayStyle,
    show_fps: bool,
}

impl<S, D, V> StreamApp<S, D, V>
where
    S: FrameSource,
    D: FaceInference,
    V: FrameDisplay,
{
    /// Wire a source, detector and display together using `config`
    pub fn new(source: S, detector: D, display: V, config: &Config) -> Result<Self> {
        let sampler = FrameSampler::new(config.capture.drop_rate)?;
        let buffer = FrameBuffer::new(config.capture.buffer_size)?;
        info!(
            "Keeping 1 of every {} frames, buffering {} frames",
            sampler.drop_rate(),
            buffer.capacity()
        );

        Ok(Self {
            source,
            detector,
            display,
            sampler,
            buffer,
            style: OverlayStyle::from(&config.display),
            show_fps: config.display.show_fps,
        })
    }

    /// Run until a frame read fails or the user presses a key.
    ///
    /// The display is closed on every exit path. Errors from the detector or
    /// the display end the loop and are returned unchanged.
    pub fn run(&mut self) -> Result<RunSummary> {
        info!("Entering main loop");
        let result = self.run_loop();
        let closed = self.display.close();

        let summary = result?;
        closed?;
        info!(
            "Loop finished ({:?}): read={} dropped={} processed={} faces={}",
            summary.stop_reason,
            summary.frames_read,
            summary.frames_dropped,
            summary.frames_processed,
            summary.faces_detected
        );
        Ok(summary)
    }

    fn run_loop(&mut self) -> Result<RunSummary> {
        let mut frames_read = 0;
        let mut frames_dropped = 0;
        let mut frames_processed = 0;
        let mut faces_detected = 0;

        let stop_reason = loop {
            if self.display.exit_requested()? {
                break StopReason::UserExit;
            }

            let Some(frame) = self.source.read_frame()? else {
                warn!("No frames grabbed!");
                break StopReason::SourceExhausted;
            };
            frames_read += 1;

            if !self.sampler.keep() {
                frames_dropped += 1;
                continue;
            }

            if let Some(oldest) = self.buffer.push(frame) {
                let faces = self.process(&oldest)?;
                frames_processed += 1;
                faces_detected += faces as u64;
            }
        };

        Ok(RunSummary {
            frames_read,
            frames_dropped,
            frames_processed,
            faces_detected,
            stop_reason,
        })
    }

    /// Detect, draw and show a single frame; returns the number of faces
    fn process(&mut self, frame: &Mat) -> Result<usize> {
        let size = frame_size(frame)?;
        if self.detector.input_size() != size {
            self.detector.set_input_size(size)?;
        }

        let start = Instant::now();
        let detections = self.detector.infer(frame)?;
        let fps = fps_from_elapsed(start.elapsed());
        debug!("Detected {} faces ({:.2} fps)", detections.len(), fps);

        let annotated = visualize(frame, &detections, &self.style, self.show_fps.then_some(fps))?;
        self.display.show(&annotated)?;

        Ok(detections.len())
    }

    /// Detector in use
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Mutable access to the detector, e.g. to switch backends between runs
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Display in use
    pub fn display(&self) -> &V {
        &self.display
    }

    /// Frames currently waiting in the buffer
    pub fn buffered_frames(&self) -> usize {
        self.buffer.len()
    }
}

/// Inference rate for a single call; 0 when the call was too fast to time
#[must_use]
pub fn fps_from_elapsed(elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        1.0 / secs
    } else {
        0.0
    }
}
