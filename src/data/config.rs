use std::path::PathBuf;

use clap::Parser;

#[cfg(not(feature = "terminal"))]
use log::warn;

use crate::modes::Mode;

pub const DEFAULT_SIZE_WIN: (u32, u32) = (600, 600);
pub const DEFAULT_FPS: u32 = 60;

/// Largest accepted window side, in pixels.
pub const MAX_WINDOW_SIDE: u32 = 8192;

/// Generative Mondrian-style artwork with rising bubbles.
///
/// Click the button (or press R / Space) to paint a new composition.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// Render in the terminal instead of a window (needs the `terminal` feature)
    #[arg(long)]
    pub terminal: bool,

    /// Write a single artwork to PATH as a QOI image and exit
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Initial window size
    #[arg(long, value_name = "WxH", value_parser = parse_size, default_value = "600x600")]
    pub size: (u32, u32),

    /// Frames per second
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Seed for the random source (defaults to the clock)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print nothing
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print debug information
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WxH, got \"{s}\""))?;

    let parse = |v: &str| {
        v.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid dimension \"{v}\": {e}"))
    };

    let size = (parse(w)?, parse(h)?);

    let side = 1..=MAX_WINDOW_SIDE;
    if !side.contains(&size.0) || !side.contains(&size.1) {
        return Err(format!(
            "each side must be between 1 and {MAX_WINDOW_SIDE}, got {}x{}",
            size.0, size.1
        ));
    }

    Ok(size)
}

impl Config {
    pub fn mode(&self) -> Mode {
        if let Some(path) = &self.snapshot {
            return Mode::Snapshot(path.clone());
        }

        #[cfg(feature = "terminal")]
        if self.terminal {
            return Mode::ConBlock;
        }

        #[cfg(not(feature = "terminal"))]
        if self.terminal {
            warn!("Built without terminal support, opening a window instead.");
        }

        Mode::Win
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terminal: false,
            snapshot: None,
            size: DEFAULT_SIZE_WIN,
            fps: DEFAULT_FPS,
            seed: None,
            quiet: false,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_parse_of_nothing() {
        let parsed = Config::parse_from(["mondrian"]);
        let default = Config::default();

        assert_eq!(parsed.size, default.size);
        assert_eq!(parsed.fps, default.fps);
        assert_eq!(parsed.seed, None);
        assert_eq!(parsed.mode(), Mode::Win);
    }

    #[test]
    fn size_and_seed() {
        let c = Config::parse_from(["mondrian", "--size", "800x700", "--seed", "12"]);
        assert_eq!(c.size, (800, 700));
        assert_eq!(c.seed, Some(12));
    }

    #[test]
    fn bad_sizes_are_rejected() {
        assert!(parse_size("800").is_err());
        assert!(parse_size("0x600").is_err());
        assert!(parse_size("axb").is_err());
        assert!(Config::try_parse_from(["mondrian", "--size", "10by10"]).is_err());
    }

    #[test]
    fn oversized_windows_are_rejected() {
        assert!(parse_size("4294967295x4294967295").is_err());
        assert!(parse_size("100000x600").is_err());
        assert!(parse_size("600x8193").is_err());
        assert!(Config::try_parse_from(["mondrian", "--size", "100000x100000"]).is_err());

        assert_eq!(parse_size("8192x8192"), Ok((8192, 8192)));
    }

    #[test]
    fn fps_must_be_in_range() {
        assert!(Config::try_parse_from(["mondrian", "--fps", "0"]).is_err());
        assert!(Config::try_parse_from(["mondrian", "--fps", "500"]).is_err());
        assert_eq!(Config::parse_from(["mondrian", "--fps", "30"]).fps, 30);
    }

    #[test]
    fn snapshot_wins() {
        let c = Config::parse_from(["mondrian", "--snapshot", "out.qoi"]);
        assert_eq!(c.mode(), Mode::Snapshot(PathBuf::from("out.qoi")));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Config::try_parse_from(["mondrian", "-q", "-v"]).is_err());
    }
}
