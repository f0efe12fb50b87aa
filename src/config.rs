use gilrs::Button;
use std::path::PathBuf;
use std::time::Duration;

pub const MAX_ROWS: usize = 10;
pub const MAX_COLS: usize = 10;

/// Dimensions of one page of thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    /// Build a grid, clamping each side to `1..=10`.
    pub fn clamped(rows: usize, cols: usize) -> Self {
        GridSize {
            rows: rows.clamp(1, MAX_ROWS),
            cols: cols.clamp(1, MAX_COLS),
        }
    }

    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

impl Default for GridSize {
    fn default() -> Self {
        GridSize { rows: 3, cols: 3 }
    }
}

/// How a held controller button behaves across poll ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatPolicy {
    /// A held button fires on every tick.
    #[default]
    EveryTick,
    /// Only the transition from released to pressed fires.
    Edge,
}

/// Which physical buttons act as the three logical kiosk buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonMap {
    pub previous: Button,
    pub next: Button,
    pub exit: Button,
}

impl Default for ButtonMap {
    fn default() -> Self {
        ButtonMap {
            previous: Button::West,
            next: Button::East,
            exit: Button::South,
        }
    }
}

/// Runtime configuration assembled from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub grid: GridSize,
    pub videos_dir: PathBuf,
    pub thumbnails_dir: PathBuf,
    pub title: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub poll_interval: Duration,
    pub frame_interval: Duration,
    /// Substring of the gamepad name to bind to. `None` runs keyboard-only.
    pub controller: Option<String>,
    pub buttons: ButtonMap,
    pub repeat: RepeatPolicy,
    pub fullscreen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid: GridSize::default(),
            videos_dir: PathBuf::from("./videos"),
            thumbnails_dir: PathBuf::from("./thumbnails"),
            title: "Reimagining Breath".to_string(),
            screen_width: 1920,
            screen_height: 1080,
            poll_interval: Duration::from_millis(16),
            frame_interval: Duration::from_millis(16),
            controller: Some("Joy-Con (R)".to_string()),
            buttons: ButtonMap::default(),
            repeat: RepeatPolicy::EveryTick,
            fullscreen: true,
        }
    }
}
