use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn active() -> MutexGuard<'static, Option<ProgressBar>> {
    ACTIVE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shows a spinner until [`stop`] is called. Replaces any running one.
pub fn start(msg: String) {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));

    if let Some(previous) = active().replace(pb) {
        previous.finish_and_clear();
    }
}

pub fn stop() {
    if let Some(pb) = active().take() {
        pb.finish_and_clear();
    }
}

/// Log writer that keeps output above a running spinner.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        let msg = msg.trim_end_matches('\n');

        if let Some(pb) = active().as_ref() {
            pb.println(msg);
            return Ok(buf.len());
        }

        // Raw mode (while listening for 'q') does not return the carriage.
        let line_end: &str = match crossterm::terminal::is_raw_mode_enabled() {
            Ok(true) => "\r\n",
            _ => "\n",
        };
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "{}{}", msg.replace('\n', line_end), line_end)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()
    }
}
