//! # Scan Session
//!
//! A [`ScanSession`] walks through
//! `Idle → RequestingAccess → Active → Decoded | Stopped | AccessDenied`.
//!
//! While `Active` it owns the [`VideoStream`] exclusively. The stream is
//! released on every way out of `Active`: a decode, an explicit stop, the
//! source running dry, or the session being dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use medscan_common::config::Config;
use medscan_common::error::CameraError;

use crate::camera::{Camera, Facing, ReadyState, VideoStream};
use crate::decoder::QrDecoder;
use crate::error::CaptureError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    RequestingAccess,
    Active,
    /// Holds the raw QR payload.
    Decoded(String),
    Stopped,
    AccessDenied(CameraError),
}

impl CaptureState {
    pub fn is_active(&self) -> bool {
        matches!(self, CaptureState::Active)
    }

    fn can_start(&self) -> bool {
        !matches!(self, CaptureState::RequestingAccess | CaptureState::Active)
    }
}

/// What a single frame tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// The session is not active; nothing was sampled.
    Inactive,
    /// The source had no full frame buffered, or the frame was unreadable.
    Skipped,
    /// A frame was sampled but held no QR code.
    Sampled,
    /// The source ran out; the session is now stopped.
    Ended,
    Decoded(String),
}

/// How a [`ScanSession::run`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanExit {
    Decoded(String),
    Stopped,
}

/// Asks the frame loop to wind down.
pub trait StopSignal: Sync {
    fn stop_requested(&self) -> bool;
}

impl StopSignal for AtomicBool {
    fn stop_requested(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    pub frame_interval: Duration,
    pub max_frames: Option<u64>,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for LoopOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            frame_interval: cfg.frame_interval(),
            max_frames: cfg.max_frames,
        }
    }
}

pub struct ScanSession {
    state: CaptureState,
    stream: Option<Box<dyn VideoStream>>,
    frames_sampled: u64,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSession {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
            stream: None,
            frames_sampled: 0,
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn frames_sampled(&self) -> u64 {
        self.frames_sampled
    }

    /// Acquires the rear camera and activates the session.
    ///
    /// Allowed from `Idle` and from any finished state, which is how a
    /// rescan starts.
    pub fn start(&mut self, camera: &dyn Camera) -> Result<(), CaptureError> {
        if !self.state.can_start() {
            return Err(CaptureError::AlreadyActive);
        }

        self.state = CaptureState::RequestingAccess;
        match camera.acquire(Facing::Environment) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.frames_sampled = 0;
                self.state = CaptureState::Active;
                info!("Camera started");
                Ok(())
            }
            Err(err) => {
                error!("Camera error: {err}");
                self.state = CaptureState::AccessDenied(err.clone());
                Err(err.into())
            }
        }
    }

    /// Stops sampling and releases the stream.
    pub fn stop(&mut self) {
        if self.state.is_active() {
            self.state = CaptureState::Stopped;
        }
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            info!("Camera stopped");
        }
    }

    /// Runs one frame of the loop.
    pub fn tick(&mut self, decoder: &dyn QrDecoder) -> Tick {
        if !self.state.is_active() {
            return Tick::Inactive;
        }

        let ready: ReadyState = match self.stream.as_ref() {
            Some(stream) => stream.ready_state(),
            None => return Tick::Inactive,
        };

        match ready {
            ReadyState::HaveNothing => return Tick::Skipped,
            ReadyState::Ended => {
                debug!("video source ended");
                self.stop();
                return Tick::Ended;
            }
            ReadyState::HaveEnoughData => {}
        }

        let Some(frame) = self.stream.as_mut().and_then(|s| s.read_frame()) else {
            return Tick::Skipped;
        };
        self.frames_sampled += 1;

        match decoder
            .decode(&frame.rgba, frame.width, frame.height)
            .filter(|payload| !payload.is_empty())
        {
            Some(payload) => {
                info!("QR code detected: {payload}");
                self.state = CaptureState::Decoded(payload.clone());
                self.release();
                Tick::Decoded(payload)
            }
            None => Tick::Sampled,
        }
    }

    /// Samples frames every `frame_interval` until a code decodes, the
    /// source ends, `max_frames` is reached or `stop` fires.
    pub async fn run(
        &mut self,
        decoder: &dyn QrDecoder,
        stop: &dyn StopSignal,
        options: LoopOptions,
    ) -> ScanExit {
        let mut ticker = tokio::time::interval(options.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            if stop.stop_requested() {
                info!("Scan stopped by user");
                self.stop();
                return ScanExit::Stopped;
            }

            match self.tick(decoder) {
                Tick::Decoded(payload) => return ScanExit::Decoded(payload),
                Tick::Inactive | Tick::Ended => return ScanExit::Stopped,
                Tick::Sampled | Tick::Skipped => {}
            }

            if options
                .max_frames
                .is_some_and(|max| self.frames_sampled >= max)
            {
                warn!("No QR code found in {} frames", self.frames_sampled);
                self.stop();
                return ScanExit::Stopped;
            }
        }
    }
}

impl Drop for ScanSession {
    fn drop(&mut self) {
        self.release();
    }
}
