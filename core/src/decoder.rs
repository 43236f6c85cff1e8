//! The QR decode boundary.

use tracing::trace;

/// Turns a frame into the text of the first readable QR code in it.
pub trait QrDecoder: Send + Sync {
    /// `rgba` is row-major RGBA8 of `width * height` pixels.
    fn decode(&self, rgba: &[u8], width: u32, height: u32) -> Option<String>;
}

/// [`QrDecoder`] backed by `rqrr`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrDecoder;

impl QrDecoder for RqrrDecoder {
    fn decode(&self, rgba: &[u8], width: u32, height: u32) -> Option<String> {
        let (w, h) = (width as usize, height as usize);
        if w == 0 || h == 0 || rgba.len() < w * h * 4 {
            trace!(width, height, len = rgba.len(), "frame too small to decode");
            return None;
        }

        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(w, h, |x, y| {
            let offset: usize = (y * w + x) * 4;
            luma(rgba[offset], rgba[offset + 1], rgba[offset + 2])
        });

        prepared
            .detect_grids()
            .into_iter()
            .find_map(|grid| match grid.decode() {
                Ok((_, content)) => Some(content),
                Err(err) => {
                    trace!(?err, "found a grid that does not decode");
                    None
                }
            })
    }
}

/// ITU-R BT.601 luma.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000) as u8
}
