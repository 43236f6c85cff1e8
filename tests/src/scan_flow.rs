#![cfg(test)]
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use image::{Rgba, RgbaImage};

use medscan_common::config::MockOutcome;
use medscan_common::record::VerificationOutcome;
use medscan_common::view::{ErrorOrigin, Panel, ViewState, render};
use medscan_core::camera::ImageSequenceCamera;
use medscan_core::capture::{CaptureState, LoopOptions, ScanSession};
use medscan_core::decoder::{QrDecoder, RqrrDecoder};
use medscan_core::scanner::MedicineScanner;
use medscan_core::verifier::MockVerifier;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Stands in for a real QR code: any frame whose first pixel is white
/// "contains" `payload`.
struct MarkerDecoder(&'static str);

impl QrDecoder for MarkerDecoder {
    fn decode(&self, rgba: &[u8], _width: u32, _height: u32) -> Option<String> {
        (rgba.first() == Some(&255)).then(|| self.0.to_string())
    }
}

fn write_frame(dir: &Path, name: &str, color: Rgba<u8>) {
    RgbaImage::from_pixel(8, 8, color)
        .save(dir.join(name))
        .unwrap();
}

fn options(max_frames: Option<u64>) -> LoopOptions {
    LoopOptions {
        frame_interval: Duration::from_millis(16),
        max_frames,
    }
}

fn scanner(source: &Path, decoder: Box<dyn QrDecoder>, outcome: MockOutcome, max_frames: Option<u64>) -> MedicineScanner {
    MedicineScanner::new(
        Box::new(ImageSequenceCamera::new(source)),
        decoder,
        Box::new(MockVerifier::new(outcome).with_delay(Duration::from_millis(50))),
        options(max_frames),
    )
}

#[tokio::test(start_paused = true)]
async fn scan_frames_to_authentic() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), "000.png", BLACK);
    write_frame(dir.path(), "001.png", BLACK);
    write_frame(dir.path(), "002.png", WHITE);

    let scanner = scanner(
        dir.path(),
        Box::new(MarkerDecoder("https://verify.example/m?id=0xFEED&lang=en")),
        MockOutcome::Authentic,
        None,
    );
    let mut session = ScanSession::new();
    let stop = AtomicBool::new(false);
    let mut seen: Vec<Panel> = Vec::new();

    let last = scanner
        .scan(&mut session, &stop, &mut |state| seen.push(render(state).panel()))
        .await
        .unwrap();

    assert_eq!(seen, [Panel::Scanner, Panel::Loading, Panel::Authentic]);
    assert_eq!(session.frames_sampled(), 3);
    assert!(matches!(session.state(), CaptureState::Decoded(_)));

    let Some(ViewState::Outcome(VerificationOutcome::Authentic(record))) = last else {
        panic!("expected an authentic outcome, got {last:?}");
    };
    assert_eq!(record.identifier, "0xFEED");
    assert_eq!(record.name, "Paracetamol");
}

#[tokio::test(start_paused = true)]
async fn scan_frames_to_fake() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), "only.png", WHITE);

    let scanner = scanner(dir.path(), Box::new(MarkerDecoder("0xBAD")), MockOutcome::Fake, None);
    let mut session = ScanSession::new();
    let stop = AtomicBool::new(false);
    let mut seen: Vec<Panel> = Vec::new();

    let last = scanner
        .scan(&mut session, &stop, &mut |state| seen.push(render(state).panel()))
        .await
        .unwrap();

    assert_eq!(seen, [Panel::Scanner, Panel::Loading, Panel::Fake]);
    assert_eq!(last, Some(ViewState::Outcome(VerificationOutcome::NotFound)));
}

#[tokio::test(start_paused = true)]
async fn scan_without_code_stops_at_end_of_source() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), "a.png", WHITE);
    write_frame(dir.path(), "b.png", BLACK);

    let scanner = scanner(dir.path(), Box::new(RqrrDecoder), MockOutcome::Authentic, None);
    let mut session = ScanSession::new();
    let stop = AtomicBool::new(false);

    let last = scanner.scan(&mut session, &stop, &mut |_| {}).await.unwrap();

    assert_eq!(last, Some(ViewState::Scanner));
    assert_eq!(session.state(), &CaptureState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn scan_gives_up_after_max_frames() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..5 {
        write_frame(dir.path(), &format!("{i:03}.png"), BLACK);
    }

    let scanner = scanner(dir.path(), Box::new(MarkerDecoder("0x1")), MockOutcome::Authentic, Some(2));
    let mut session = ScanSession::new();
    let stop = AtomicBool::new(false);

    let last = scanner.scan(&mut session, &stop, &mut |_| {}).await.unwrap();

    assert_eq!(last, Some(ViewState::Scanner));
    assert_eq!(session.frames_sampled(), 2);
    assert!(!session.is_active());
}

#[tokio::test(start_paused = true)]
async fn scan_stopped_by_user() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), "000.png", WHITE);

    let scanner = scanner(dir.path(), Box::new(MarkerDecoder("0x1")), MockOutcome::Authentic, None);
    let mut session = ScanSession::new();
    let stop = AtomicBool::new(true);
    let mut seen: Vec<Panel> = Vec::new();

    let last = scanner
        .scan(&mut session, &stop, &mut |state| seen.push(render(state).panel()))
        .await
        .unwrap();

    assert_eq!(last, Some(ViewState::Scanner));
    assert_eq!(seen, [Panel::Scanner]);
    assert_eq!(session.frames_sampled(), 0);
}

#[tokio::test(start_paused = true)]
async fn scan_missing_source_shows_camera_error() {
    let dir = tempfile::tempdir().unwrap();

    let scanner = scanner(
        &dir.path().join("no-such-dir"),
        Box::new(MarkerDecoder("0x1")),
        MockOutcome::Authentic,
        None,
    );
    let mut session = ScanSession::new();
    let stop = AtomicBool::new(false);
    let mut seen: Vec<Panel> = Vec::new();

    let last = scanner
        .scan(&mut session, &stop, &mut |state| seen.push(render(state).panel()))
        .await
        .unwrap();

    assert_eq!(last, Some(ViewState::Error(ErrorOrigin::CameraAccess)));
    assert_eq!(seen, [Panel::Scanner, Panel::Error]);
    assert!(matches!(session.state(), CaptureState::AccessDenied(_)));
}

/// Saves `payload` as a black-on-white QR code PNG, 4 px per module.
fn write_qr_frame(dir: &Path, name: &str, payload: &str) {
    let code = qrcode::QrCode::new(payload.as_bytes()).unwrap();
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let (scale, quiet) = (4, 4);
    let side = (modules + 2 * quiet) * scale;

    let img = RgbaImage::from_fn(side, side, |x, y| {
        let (mx, my) = ((x / scale).wrapping_sub(quiet), (y / scale).wrapping_sub(quiet));
        if mx < modules && my < modules && colors[(my * modules + mx) as usize] == qrcode::Color::Dark {
            BLACK
        } else {
            WHITE
        }
    });
    img.save(dir.join(name)).unwrap();
}

#[tokio::test(start_paused = true)]
async fn scan_decodes_real_code_from_frames() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), "000.png", WHITE);
    write_qr_frame(dir.path(), "001.png", "https://verify.example/m?id=0xC0FFEE");

    let scanner = scanner(dir.path(), Box::new(RqrrDecoder), MockOutcome::Authentic, None);
    let mut session = ScanSession::new();
    let stop = AtomicBool::new(false);

    let last = scanner.scan(&mut session, &stop, &mut |_| {}).await.unwrap();

    assert_eq!(
        session.state(),
        &CaptureState::Decoded("https://verify.example/m?id=0xC0FFEE".to_string())
    );
    let Some(ViewState::Outcome(VerificationOutcome::Authentic(record))) = last else {
        panic!("expected an authentic outcome, got {last:?}");
    };
    assert_eq!(record.identifier, "0xC0FFEE");
}
