use std::path::PathBuf;

use clap::Parser;

use crate::game::input::HoldMode;

/// Play tennis against the computer in your terminal
#[derive(Parser, Debug)]
#[command(name = "tui-tennis")]
#[command(about = "Player-vs-CPU tennis in the terminal. First to 10 wins.", long_about = None)]
pub struct Cli {
    /// Seed for serve directions and angles (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Ticks a key stays held after a press on terminals that never report releases
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(1..))]
    pub hold_ticks: u32,

    /// Latch keys even if the terminal can report releases
    #[arg(long)]
    pub latched_keys: bool,

    /// Log file (defaults to tui-tennis.log in the temp directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "tui_tennis=trace". RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("tui-tennis.log"))
    }

    /// Pick a hold mode given whether the terminal reports key releases.
    pub fn hold_mode(&self, releases_reported: bool) -> HoldMode {
        if releases_reported && !self.latched_keys {
            HoldMode::Released
        } else {
            HoldMode::Latched {
                ticks: self.hold_ticks,
            }
        }
    }
}
