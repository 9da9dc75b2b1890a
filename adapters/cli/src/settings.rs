//! Command-line arguments and the optional TOML settings file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tilemerge_core::GameConfig;

/// Command-line arguments accepted by the `tilemerge` binary.
#[derive(Debug, Parser)]
#[command(name = "tilemerge")]
#[command(author, version, about = "Slide and merge tiles on an emulated LED matrix")]
pub(crate) struct Args {
    /// TOML settings file with `[game]` and `[display]` tables
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Random seed for reproducible games; drawn from entropy when absent
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Number of board columns
    #[arg(long)]
    pub(crate) width: Option<u32>,

    /// Number of board rows
    #[arg(long)]
    pub(crate) height: Option<u32>,

    /// Number of moves that can be taken back (0 disables undo)
    #[arg(long)]
    pub(crate) undo_depth: Option<usize>,

    /// Print tile values instead of LED blocks
    #[arg(long)]
    pub(crate) plain: bool,
}

/// Settings resolved from the settings file and command-line overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// Engine configuration.
    pub(crate) game: GameConfig,
    /// Emulated LED matrix.
    pub(crate) display: DisplaySettings,
}

/// Size of the emulated LED matrix in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DisplaySettings {
    /// Pixels per row.
    pub(crate) width: u32,
    /// Pixels per column.
    pub(crate) height: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
        }
    }
}

impl Settings {
    /// Loads the settings file named by `args`, applies the argument
    /// overrides and validates the resulting game configuration.
    pub(crate) fn resolve(args: &Args) -> Result<Self> {
        let mut settings = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(width) = args.width {
            settings.game.board_width = width;
        }
        if let Some(height) = args.height {
            settings.game.board_height = height;
        }
        if let Some(depth) = args.undo_depth {
            settings.game.max_undo_depth = depth;
        }

        settings
            .game
            .validate()
            .context("invalid game configuration")?;
        Ok(settings)
    }

    fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to load settings from {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse settings toml contents")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilemerge_core::{SpawnWeight, ValueDistribution};

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("tilemerge").chain(extra.iter().copied()))
    }

    #[test]
    fn empty_file_yields_defaults() {
        let settings = Settings::parse("").expect("empty settings are valid");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.display, DisplaySettings { width: 8, height: 8 });
    }

    #[test]
    fn parses_game_and_display_tables() {
        let settings = Settings::parse(
            r#"
            [game]
            board_width = 5
            board_height = 3
            max_undo_depth = 10
            value_distribution = [
                { value = 2, weight = 3 },
                { value = 8, weight = 1 },
            ]

            [display]
            width = 10
            height = 6
            "#,
        )
        .expect("valid settings");

        assert_eq!(settings.game.board_width, 5);
        assert_eq!(settings.game.board_height, 3);
        assert_eq!(settings.game.max_undo_depth, 10);
        assert_eq!(settings.game.initial_tiles, 2);
        assert_eq!(
            settings.game.value_distribution,
            ValueDistribution::new(vec![SpawnWeight::new(2, 3), SpawnWeight::new(8, 1)])
        );
        assert_eq!(settings.display, DisplaySettings { width: 10, height: 6 });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::parse("[game]\nboard_size = 4\n").is_err());
        assert!(Settings::parse("[sound]\nvolume = 3\n").is_err());
    }

    #[test]
    fn arguments_override_defaults() {
        let settings =
            Settings::resolve(&args(&["--width", "6", "--height", "2", "--undo-depth", "0"]))
                .expect("valid overrides");

        assert_eq!(settings.game.board_width, 6);
        assert_eq!(settings.game.board_height, 2);
        assert_eq!(settings.game.max_undo_depth, 0);
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let error = Settings::resolve(&args(&["--width", "0"])).expect_err("zero width");
        assert!(format!("{error:#}").contains("board width must be positive"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = Settings::resolve(&args(&["--config", "does/not/exist.toml"]))
            .expect_err("missing file");
        assert!(error.to_string().contains("does/not/exist.toml"));
    }
}
