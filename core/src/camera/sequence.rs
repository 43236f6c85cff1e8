//! A camera backed by still images.
//!
//! Points at either a single image or a directory of frames. Directory frames
//! are played back in file name order, one per tick. Useful for recorded
//! footage, test fixtures and machines without a webcam.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use medscan_common::error::CameraError;

use super::{Camera, Facing, Frame, ReadyState, VideoStream};

const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

pub struct ImageSequenceCamera {
    source: PathBuf,
}

impl ImageSequenceCamera {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl Camera for ImageSequenceCamera {
    fn acquire(&self, facing: Facing) -> Result<Box<dyn VideoStream>, CameraError> {
        debug!(?facing, source = %self.source.display(), "requesting video source");

        let frames: Vec<PathBuf> = collect_frames(&self.source)?;
        if frames.is_empty() {
            return Err(CameraError::Unavailable(format!(
                "no image frames in {}",
                self.source.display()
            )));
        }

        debug!(frames = frames.len(), "video source ready");
        Ok(Box::new(ImageSequenceStream {
            frames: frames.into(),
            stopped: false,
        }))
    }
}

struct ImageSequenceStream {
    frames: VecDeque<PathBuf>,
    stopped: bool,
}

impl VideoStream for ImageSequenceStream {
    fn ready_state(&self) -> ReadyState {
        if self.stopped || self.frames.is_empty() {
            ReadyState::Ended
        } else {
            ReadyState::HaveEnoughData
        }
    }

    fn read_frame(&mut self) -> Option<Frame> {
        if self.stopped {
            return None;
        }
        let path: PathBuf = self.frames.pop_front()?;

        match image::open(&path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                Some(Frame {
                    width: rgba.width(),
                    height: rgba.height(),
                    rgba: rgba.into_raw(),
                })
            }
            Err(err) => {
                warn!("Skipping unreadable frame {}: {err}", path.display());
                None
            }
        }
    }

    fn stop(&mut self) {
        self.stopped = true;
        self.frames.clear();
    }
}

fn collect_frames(source: &Path) -> Result<Vec<PathBuf>, CameraError> {
    let metadata = fs::metadata(source).map_err(|err| access_error(source, err))?;
    if metadata.is_file() {
        return Ok(vec![source.to_path_buf()]);
    }

    let mut frames: Vec<PathBuf> = fs::read_dir(source)
        .map_err(|err| access_error(source, err))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_frame_extension(path))
        .collect();

    frames.sort();
    Ok(frames)
}

fn has_frame_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn access_error(path: &Path, err: io::Error) -> CameraError {
    let detail = format!("{}: {err}", path.display());
    match err.kind() {
        io::ErrorKind::PermissionDenied => CameraError::PermissionDenied(detail),
        _ => CameraError::Unavailable(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_frame(dir: &Path, name: &str, shade: u8) {
        let img = image::RgbaImage::from_pixel(4, 3, image::Rgba([shade, shade, shade, 255]));
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_missing_source_is_unavailable() {
        let camera = ImageSequenceCamera::new("/definitely/not/here");
        let err = camera.acquire(Facing::Environment).err().unwrap();
        assert!(matches!(err, CameraError::Unavailable(_)));
    }

    #[test]
    fn test_empty_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

        let camera = ImageSequenceCamera::new(dir.path());
        assert!(camera.acquire(Facing::Environment).is_err());
    }

    #[test]
    fn test_frames_play_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "002.png", 20);
        write_frame(dir.path(), "001.png", 10);

        let mut stream = ImageSequenceCamera::new(dir.path())
            .acquire(Facing::Environment)
            .unwrap();

        assert_eq!(stream.ready_state(), ReadyState::HaveEnoughData);
        let first = stream.read_frame().unwrap();
        assert_eq!((first.width, first.height), (4, 3));
        assert_eq!(first.rgba.len(), 4 * 3 * 4);
        assert_eq!(first.rgba[0], 10);

        let second = stream.read_frame().unwrap();
        assert_eq!(second.rgba[0], 20);
        assert_eq!(stream.ready_state(), ReadyState::Ended);
    }

    #[test]
    fn test_unreadable_frame_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("000.png"), b"not really a png").unwrap();
        write_frame(dir.path(), "001.png", 10);

        let mut stream = ImageSequenceCamera::new(dir.path())
            .acquire(Facing::Environment)
            .unwrap();

        assert!(stream.read_frame().is_none());
        assert!(stream.read_frame().is_some());
    }

    #[test]
    fn test_stop_ends_stream() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "frame.png", 0);

        let mut stream = ImageSequenceCamera::new(dir.path().join("frame.png"))
            .acquire(Facing::Environment)
            .unwrap();

        stream.stop();
        stream.stop();
        assert_eq!(stream.ready_state(), ReadyState::Ended);
        assert!(stream.read_frame().is_none());
    }
}
