pub mod info;
pub mod scan;
pub mod verify;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use medscan_common::config::{Config, DEFAULT_API_URL, DEFAULT_FPS, MockOutcome, Mode};

#[derive(Parser)]
#[command(name = "medscan")]
#[command(about = "Scan a medicine's QR code and check that it is genuine.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the verification service
    #[arg(long, global = true, env = "MEDSCAN_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// 'live' queries the verification service, 'mock' answers locally
    #[arg(long, global = true, env = "MEDSCAN_MODE", default_value = "mock")]
    pub mode: Mode,

    /// What mock mode answers with: 'authentic' or 'fake'
    #[arg(long, global = true, default_value = "authentic")]
    pub mock_outcome: MockOutcome,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less output
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the active configuration
    #[command(alias = "i")]
    Info,
    /// Scan a QR code from a video source (an image or a directory of frames)
    #[command(alias = "s")]
    Scan {
        source: PathBuf,
        /// Frames sampled per second
        #[arg(long, default_value_t = DEFAULT_FPS)]
        fps: u32,
        /// Give up after this many frames without a QR code
        #[arg(long)]
        max_frames: Option<u64>,
        /// Go back to the scanner after every result
        #[arg(long)]
        again: bool,
    },
    /// Verify an identifier typed in by hand
    #[command(alias = "v")]
    Verify { identifier: String },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        let mut cfg = Config {
            api_url: self.api_url.clone(),
            mode: self.mode,
            mock_outcome: self.mock_outcome,
            quiet: self.quiet,
            ..Config::default()
        };

        if let Commands::Scan { fps, max_frames, .. } = &self.command {
            cfg.fps = *fps;
            cfg.max_frames = *max_frames;
        }

        cfg
    }
}
