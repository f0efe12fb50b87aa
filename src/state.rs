use crate::catalog::Catalog;
use crate::config::Config;
use crate::controller::{ButtonLatch, InputSource};
use crate::pager::Pager;
use crate::playback::{Playback, StreamOpener};
use crate::ticker::Ticker;
use crate::watchdog::Watchdog;

/// Which of the two screens is visible. Never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Selection,
    Playback,
}

/// Application state for the kiosk.
pub struct Kiosk {
    pub title: String,
    pub catalog: Catalog,
    pub pager: Pager,
    pub poller: Ticker,
    pub frame_pump: Ticker,
    /// `None` when running keyboard-only.
    pub input: Option<Box<dyn InputSource>>,
    pub latch: ButtonLatch,
    pub opener: Box<dyn StreamOpener>,
    pub playback: Option<Playback>,
    /// Exit control is drawn as hovered while a video plays.
    pub exit_focused: bool,
    pub screen_size: (u32, u32),
    pub watchdog: Option<Watchdog>,
}

impl Kiosk {
    /// Build the kiosk with page 1 shown and the input poller running.
    pub fn new(
        config: &Config,
        catalog: Catalog,
        input: Option<Box<dyn InputSource>>,
        opener: Box<dyn StreamOpener>,
    ) -> Self {
        let mut pager = Pager::new(catalog.filenames().map(str::to_string), config.grid);
        if pager.page_count() == 0 {
            log::warn!("No videos found in {}", config.videos_dir.display());
        }
        pager.load_page(1);

        let mut poller = Ticker::new(config.poll_interval);
        poller.start();

        Kiosk {
            title: config.title.clone(),
            catalog,
            pager,
            poller,
            frame_pump: Ticker::new(config.frame_interval),
            input,
            latch: ButtonLatch::new(config.repeat),
            opener,
            playback: None,
            exit_focused: false,
            screen_size: (config.screen_width, config.screen_height),
            watchdog: None,
        }
    }

    pub fn with_watchdog(mut self, watchdog: Watchdog) -> Self {
        self.watchdog = Some(watchdog);
        self
    }

    pub fn screen(&self) -> Screen {
        if self.playback.is_some() {
            Screen::Playback
        } else {
            Screen::Selection
        }
    }
}
