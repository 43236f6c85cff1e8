use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use medscan_core::capture::StopSignal;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Where key presses come from. Owns the terminal mode while watched.
trait KeySource: Send + 'static {
    fn enter(&mut self) -> io::Result<()>;
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;
    fn leave(&mut self);
}

struct RawTerminal;

impl KeySource for RawTerminal {
    fn enter(&mut self) -> io::Result<()> {
        enable_raw_mode()
    }

    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key_event) => Ok(Some(key_event)),
            _ => Ok(None),
        }
    }

    fn leave(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Watches for 'q' or Ctrl-C while a scan runs.
///
/// Dropping the handle waits for the key watcher to restore the terminal, so
/// the next handle never races it.
pub struct InputHandle {
    stop: Arc<AtomicBool>,
    closed: Arc<AtomicBool>,
    watcher: Option<thread::JoinHandle<()>>,
    ctrl_c: Option<JoinHandle<()>>,
}

impl InputHandle {
    /// Must be called from within a tokio runtime.
    pub fn start() -> Self {
        if std::io::stdin().is_terminal() {
            Self::with_keys(Some(RawTerminal))
        } else {
            debug!("stdin is not a terminal, only Ctrl-C stops the scan");
            Self::with_keys(None::<RawTerminal>)
        }
    }

    fn with_keys<K: KeySource>(keys: Option<K>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let closed = Arc::new(AtomicBool::new(false));

        let ctrl_c = {
            let stop = Arc::clone(&stop);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    stop.store(true, Ordering::Relaxed);
                }
            })
        };

        let watcher = keys.map(|keys| {
            let (stop, closed) = (Arc::clone(&stop), Arc::clone(&closed));
            thread::spawn(move || watch_keys(keys, &stop, &closed))
        });

        Self {
            stop,
            closed,
            watcher,
            ctrl_c: Some(ctrl_c),
        }
    }

    pub fn should_interrupt(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

fn watch_keys<K: KeySource>(mut keys: K, stop: &AtomicBool, closed: &AtomicBool) {
    if let Err(err) = keys.enter() {
        warn!("Cannot read key presses: {err}");
        return;
    }

    while !closed.load(Ordering::Relaxed) {
        let key_event: KeyEvent = match keys.poll_key(POLL_INTERVAL) {
            Ok(Some(key_event)) => key_event,
            Ok(None) => continue,
            Err(_) => break,
        };

        if is_stop_key(&key_event) {
            stop.store(true, Ordering::Relaxed);
            break;
        }
    }
    keys.leave();
}

fn is_stop_key(key_event: &KeyEvent) -> bool {
    let is_q = key_event.code == KeyCode::Char('q');
    let is_ctrl_c = key_event.code == KeyCode::Char('c')
        && key_event.modifiers.contains(KeyModifiers::CONTROL);

    (is_q || is_ctrl_c) && key_event.kind == KeyEventKind::Press
}

impl StopSignal for InputHandle {
    fn stop_requested(&self) -> bool {
        self.should_interrupt()
    }
}

impl Drop for InputHandle {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::Relaxed);
        if let Some(watcher) = self.watcher.take() {
            let _ = watcher.join();
        }
        if let Some(task) = self.ctrl_c.take() {
            task.abort();
        }
    }
}
