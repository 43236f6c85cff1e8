//! The video source **abstraction**.
//!
//! A [`Camera`] hands out a [`VideoStream`] which the capture loop owns
//! exclusively until it calls [`VideoStream::stop`]. Concrete sources live in
//! submodules; the loop never depends on them directly.

use medscan_common::error::CameraError;

mod sequence;

pub use sequence::ImageSequenceCamera;

/// One RGBA8 frame, row-major, `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// How much the stream has buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Not enough data for a full frame yet.
    HaveNothing,
    /// A full frame can be read.
    HaveEnoughData,
    /// The source is exhausted or its tracks were stopped.
    Ended,
}

/// Which way the requested camera should face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// The rear camera, pointing away from the user.
    Environment,
    User,
}

pub trait VideoStream: Send {
    fn ready_state(&self) -> ReadyState;

    /// Reads the current frame. Only meaningful after
    /// [`ReadyState::HaveEnoughData`] was reported.
    fn read_frame(&mut self) -> Option<Frame>;

    /// Stops all tracks. Must be idempotent.
    fn stop(&mut self);
}

pub trait Camera: Send + Sync {
    /// Requests a live stream from the device.
    fn acquire(&self, facing: Facing) -> Result<Box<dyn VideoStream>, CameraError>;
}
