//! Frame sampling and buffering for the capture loop.
//!
//! The sampler thins the incoming stream to reduce inference load, and the
//! buffer delays processing until a fixed number of sampled frames is queued.
//! Frames are processed oldest first, so latency grows with the buffer size.

use crate::{Error, Result};
use std::collections::VecDeque;

/// Keeps one of every `drop_rate` frames
#[derive(Debug, Clone)]
pub struct FrameSampler {
    drop_rate: usize,
    frame_count: u64,
}

impl FrameSampler {
    /// Create a sampler keeping every `drop_rate`-th frame
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `drop_rate` is zero
    pub fn new(drop_rate: usize) -> Result<Self> {
        if drop_rate == 0 {
            return Err(Error::InvalidInput("Drop rate must be at least 1".to_string()));
        }
        Ok(Self {
            drop_rate,
            frame_count: 0,
        })
    }

    /// Count a new frame and report whether it should be kept.
    ///
    /// The n-th frame (1-based) is kept when `n % drop_rate == 0`.
    pub fn keep(&mut self) -> bool {
        self.frame_count += 1;
        self.frame_count % self.drop_rate as u64 == 0
    }

    /// Frames seen so far
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Configured drop rate
    #[must_use]
    pub fn drop_rate(&self) -> usize {
        self.drop_rate
    }

    /// Restart counting from zero
    pub fn reset(&mut self) {
        self.frame_count = 0;
    }
}

/// Bounded FIFO that hands back its oldest entry once full
#[derive(Debug, Clone)]
pub struct FrameBuffer<T> {
    capacity: usize,
    frames: VecDeque<T>,
}

impl<T> FrameBuffer<T> {
    /// Create an empty buffer holding at most `capacity` entries
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidInput("Buffer capacity must be at least 1".to_string()));
        }
        Ok(Self {
            capacity,
            frames: VecDeque::with_capacity(capacity),
        })
    }

    /// Append a frame. If that fills the buffer, the oldest frame is removed
    /// and returned for processing.
    pub fn push(&mut self, frame: T) -> Option<T> {
        self.frames.push_back(frame);
        if self.frames.len() >= self.capacity {
            self.frames.pop_front()
        } else {
            None
        }
    }

    /// Number of queued frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when no frames are queued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Maximum number of queued frames
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every queued frame
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
