use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;
use lottery_core::DEFAULT_COUNTDOWN_SECONDS;

use super::logging::LogDestination;

const FALLBACK_DATA_DIR: &str = "lottery-data";

#[derive(Parser, Debug)]
#[command(name = "lottery")]
#[command(about = "Multi-round name drawing with main and backup winners", long_about = None)]
pub struct Cli {
    /// Directory holding the saved draw list and session
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Seconds counted down before each draw (0 draws immediately)
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_COUNTDOWN_SECONDS)]
    countdown: u8,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Continue the last saved session instead of starting at the first draw
    #[arg(long)]
    resume: bool,

    /// Erase the saved draw list and session before starting
    #[arg(long)]
    reset: bool,

    /// Seed for reproducible draws (rehearsals)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub countdown: u8,
    pub log: LogDestination,
    pub verbose: bool,
    pub resume: bool,
    pub reset: bool,
    pub seed: Option<u64>,
}

impl Cli {
    pub fn into_settings(self) -> Settings {
        Settings {
            data_dir: self.data_dir.unwrap_or_else(default_data_dir),
            countdown: self.countdown,
            log: self.log,
            verbose: self.verbose,
            resume: self.resume,
            reset: self.reset,
            seed: self.seed,
        }
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "LotteryApp")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let settings = Cli::parse_from(["lottery"]).into_settings();
        assert_eq!(settings.countdown, DEFAULT_COUNTDOWN_SECONDS);
        assert!(matches!(settings.log, LogDestination::File));
        assert!(!settings.resume);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn flags_are_parsed() {
        let settings = Cli::parse_from([
            "lottery",
            "--data-dir",
            "/tmp/draws",
            "--countdown",
            "0",
            "--log",
            "both",
            "--resume",
            "--seed",
            "42",
        ])
        .into_settings();
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/draws"));
        assert_eq!(settings.countdown, 0);
        assert!(matches!(settings.log, LogDestination::Both));
        assert!(settings.resume);
        assert_eq!(settings.seed, Some(42));
    }
}
