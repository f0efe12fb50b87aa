use clap::Parser;
use gilrs::Button;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{ButtonMap, Config, GridSize, RepeatPolicy};
use crate::controller::parse_button;

/// Thumbnail grid video kiosk driven by a handheld controller.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Grid rows (max 10). Only used together with COLS.
    rows: Option<usize>,

    /// Grid columns (max 10). Only used together with ROWS.
    cols: Option<usize>,

    #[arg(long, default_value = "./videos")]
    videos_dir: PathBuf,

    #[arg(long, default_value = "./thumbnails")]
    thumbnails_dir: PathBuf,

    #[arg(long, default_value = "Reimagining Breath")]
    title: String,

    /// Width used for thumbnail sizing and the first playback resolution.
    #[arg(long, default_value_t = 1920)]
    screen_width: u32,

    #[arg(long, default_value_t = 1080)]
    screen_height: u32,

    #[arg(long, default_value_t = 16)]
    poll_interval_ms: u64,

    #[arg(long, default_value_t = 16)]
    frame_interval_ms: u64,

    /// Part of the gamepad name to bind to.
    #[arg(long, default_value = "Joy-Con (R)")]
    controller: String,

    /// Run with keyboard input only.
    #[arg(long)]
    no_controller: bool,

    /// Fire held buttons once per press instead of on every poll.
    #[arg(long)]
    edge_trigger: bool,

    #[arg(long, default_value = "West", value_parser = button_arg)]
    previous_button: Button,

    #[arg(long, default_value = "East", value_parser = button_arg)]
    next_button: Button,

    #[arg(long, default_value = "South", value_parser = button_arg)]
    exit_button: Button,

    #[arg(long)]
    windowed: bool,
}

fn button_arg(name: &str) -> Result<Button, String> {
    parse_button(name).ok_or_else(|| format!("unknown gamepad button '{name}'"))
}

impl Cli {
    /// Rows and columns are honoured only as a pair.
    pub fn grid(&self) -> GridSize {
        match (self.rows, self.cols) {
            (Some(rows), Some(cols)) => GridSize::clamped(rows, cols),
            _ => GridSize::default(),
        }
    }

    pub fn into_config(self) -> Config {
        let grid = self.grid();
        Config {
            grid,
            videos_dir: self.videos_dir,
            thumbnails_dir: self.thumbnails_dir,
            title: self.title,
            screen_width: self.screen_width.max(1),
            screen_height: self.screen_height.max(1),
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
            frame_interval: Duration::from_millis(self.frame_interval_ms.max(1)),
            controller: (!self.no_controller).then_some(self.controller),
            buttons: ButtonMap {
                previous: self.previous_button,
                next: self.next_button,
                exit: self.exit_button,
            },
            repeat: if self.edge_trigger {
                RepeatPolicy::Edge
            } else {
                RepeatPolicy::EveryTick
            },
            fullscreen: !self.windowed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["kiosk-reel"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().into_config()
    }

    #[test]
    fn test_no_args_uses_defaults() {
        let config = parse(&[]);
        assert_eq!(config.grid, GridSize { rows: 3, cols: 3 });
        assert_eq!(config.videos_dir, PathBuf::from("./videos"));
        assert_eq!(config.controller.as_deref(), Some("Joy-Con (R)"));
        assert_eq!(config.repeat, RepeatPolicy::EveryTick);
        assert!(config.fullscreen);
    }

    #[test]
    fn test_rows_and_cols_are_clamped() {
        let config = parse(&["4", "25"]);
        assert_eq!(config.grid, GridSize { rows: 4, cols: 10 });
    }

    #[test]
    fn test_single_dimension_is_ignored() {
        let config = parse(&["5"]);
        assert_eq!(config.grid, GridSize::default());
    }

    #[test]
    fn test_non_numeric_grid_is_rejected() {
        assert!(Cli::try_parse_from(["kiosk-reel", "three", "3"]).is_err());
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "--no-controller",
            "--edge-trigger",
            "--windowed",
            "--exit-button",
            "Start",
            "--poll-interval-ms",
            "0",
        ]);
        assert_eq!(config.controller, None);
        assert_eq!(config.repeat, RepeatPolicy::Edge);
        assert!(!config.fullscreen);
        assert_eq!(config.buttons.exit, Button::Start);
        assert_eq!(config.poll_interval, Duration::from_millis(1));
    }

    #[test]
    fn test_unknown_button_is_rejected() {
        assert!(Cli::try_parse_from(["kiosk-reel", "--next-button", "Turbo"]).is_err());
    }
}
