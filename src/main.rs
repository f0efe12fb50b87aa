mod app;
mod catalog;
mod cli;
mod config;
mod controller;
mod gst_logger;
mod message;
mod pager;
mod playback;
mod state;
mod stream;
mod ticker;
mod ui;
mod watchdog;

use anyhow::{Context, Result};
use clap::Parser;
use iced::Task;
use std::cell::Cell;

use catalog::Catalog;
use cli::Cli;
use controller::{GamepadController, InputSource};
use state::Kiosk;
use stream::GstOpener;
use watchdog::Watchdog;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config();
    log::info!(
        "Starting with a {}x{} grid from {}",
        config.grid.rows,
        config.grid.cols,
        config.videos_dir.display()
    );

    gstreamer::init().context("Failed to initialise GStreamer")?;

    let catalog = Catalog::load(
        &config.videos_dir,
        &config.thumbnails_dir,
        config.screen_width,
        config.grid.cols,
    )?;

    let input: Option<Box<dyn InputSource>> = match &config.controller {
        Some(name) => Some(Box::new(GamepadController::connect(name, config.buttons)?)),
        None => {
            log::info!("No controller requested, keyboard input only");
            None
        }
    };
    let watchdog = Watchdog::spawn().context("Failed to spawn watchdog thread")?;

    // Boot must be `Fn`; the controller and watchdog move into the first kiosk.
    let input = Cell::new(input);
    let watchdog = Cell::new(Some(watchdog));
    let fullscreen = config.fullscreen;
    let title = config.title.clone();

    iced::application(
        move || {
            let mut kiosk =
                Kiosk::new(&config, catalog.clone(), input.take(), Box::new(GstOpener));
            if let Some(watchdog) = watchdog.take() {
                kiosk = kiosk.with_watchdog(watchdog);
            }
            let task = if fullscreen {
                Kiosk::enter_fullscreen()
            } else {
                Task::none()
            };
            (kiosk, task)
        },
        Kiosk::update,
        Kiosk::view,
    )
    .title(move |_: &Kiosk| title.clone())
    .subscription(Kiosk::subscription)
    .run()
    .context("Kiosk window failed")
}
