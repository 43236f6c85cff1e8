use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_FPS: u32 = 60;

/// Selects which verification strategy answers a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Query the verification service over HTTP.
    Live,
    /// Answer locally after a fixed delay, without touching the network.
    #[default]
    Mock,
}

/// What the mock strategy answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockOutcome {
    #[default]
    Authentic,
    Fake,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the verification service.
    ///
    /// `/api/verify/{identifier}` is appended to it for every lookup.
    pub api_url: String,
    pub mode: Mode,
    pub mock_outcome: MockOutcome,
    /// Frames sampled per second while a scan session is active.
    pub fps: u32,
    /// Gives up the scan after this many frames were sampled without a decode.
    pub max_frames: Option<u64>,
    pub quiet: u8,
}

impl Config {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            mode: Mode::default(),
            mock_outcome: MockOutcome::default(),
            fps: DEFAULT_FPS,
            max_frames: None,
            quiet: 0,
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "live" => Ok(Mode::Live),
            "mock" => Ok(Mode::Mock),
            _ => Err(format!("invalid mode: {s} (expected 'live' or 'mock')")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Live => write!(f, "live"),
            Mode::Mock => write!(f, "mock"),
        }
    }
}

impl FromStr for MockOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "authentic" => Ok(MockOutcome::Authentic),
            "fake" => Ok(MockOutcome::Fake),
            _ => Err(format!(
                "invalid mock outcome: {s} (expected 'authentic' or 'fake')"
            )),
        }
    }
}

impl fmt::Display for MockOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MockOutcome::Authentic => write!(f, "authentic"),
            MockOutcome::Fake => write!(f, "fake"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!(Mode::from_str("live"), Ok(Mode::Live));
        assert_eq!(Mode::from_str("MOCK"), Ok(Mode::Mock));
        assert!(Mode::from_str("offline").is_err());
    }

    #[test]
    fn test_mock_outcome_from_str() {
        assert_eq!(MockOutcome::from_str("Fake"), Ok(MockOutcome::Fake));
        assert!(MockOutcome::from_str("maybe").is_err());
    }

    #[test]
    fn test_frame_interval() {
        let cfg = Config::default();
        assert_eq!(cfg.frame_interval(), Duration::from_secs_f64(1.0 / 60.0));

        let cfg = Config { fps: 0, ..Config::default() };
        assert_eq!(cfg.frame_interval(), Duration::from_secs(1));
    }
}
