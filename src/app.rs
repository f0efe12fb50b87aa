use iced::keyboard::key::Named;
use iced::{Element, Subscription, Task, event, keyboard, window};

use crate::message::Message;
use crate::playback::{Playback, Step, StopReason};
use crate::state::Kiosk;
use crate::ui;

impl Kiosk {
    /// Task that switches the main window to fullscreen.
    pub fn enter_fullscreen() -> Task<Message> {
        window::oldest().and_then(|id| window::set_mode(id, window::Mode::Fullscreen))
    }

    /// Handle UI messages and state updates.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PollTick(_) => {
                self.heartbeat();
                self.poll_input()
            }
            Message::FrameTick(_) => {
                self.heartbeat();
                self.pump_frame()
            }
            Message::NextPage => {
                if self.playback.is_none() {
                    self.pager.next_page();
                }
                Task::none()
            }
            Message::PreviousPage => {
                if self.playback.is_none() {
                    self.pager.previous_page();
                }
                Task::none()
            }
            Message::Play(filename) => self.start_playback(&filename),
            Message::ExitPlayback => {
                self.stop_playback(StopReason::ExitPressed);
                Task::none()
            }
            Message::EventOccurred(event) => match event {
                iced::Event::Window(window::Event::Resized(size)) => {
                    self.screen_size = (size.width.max(1.0) as u32, size.height.max(1.0) as u32);
                    log::debug!("Window resized to {:?}", self.screen_size);
                    Task::none()
                }
                iced::Event::Keyboard(keyboard::Event::KeyPressed {
                    key: keyboard::Key::Named(key),
                    ..
                }) => match key {
                    Named::ArrowRight => self.update(Message::NextPage),
                    Named::ArrowLeft => self.update(Message::PreviousPage),
                    Named::Escape => self.update(Message::ExitPlayback),
                    _ => Task::none(),
                },
                _ => Task::none(),
            },
        }
    }

    /// Sample the controller once and act on whatever fired.
    fn poll_input(&mut self) -> Task<Message> {
        let Some(input) = self.input.as_mut() else {
            return Task::none();
        };
        let pressed = self.latch.triggers(input.read());

        if self.playback.is_some() {
            if pressed.exit {
                log::debug!("Exit pressed during playback");
                self.stop_playback(StopReason::ExitPressed);
            }
        } else if pressed.next {
            self.pager.next_page();
        } else if pressed.previous {
            self.pager.previous_page();
        }
        Task::none()
    }

    fn start_playback(&mut self, filename: &str) -> Task<Message> {
        if let Some(current) = &self.playback {
            log::warn!(
                "Ignoring {} while {} is playing",
                filename,
                current.filename()
            );
            return Task::none();
        }

        let path = self.catalog.video_path(filename);
        let (width, height) = self.screen_size;
        match self.opener.open(&path, width, height) {
            Ok(source) => {
                self.pager.hide();
                self.playback = Some(Playback::start(filename, source));
                // Exit is the only control on the playback screen.
                self.exit_focused = true;
                self.frame_pump.start();
                Task::none()
            }
            Err(e) => {
                log::error!("Failed to open {}: {:#}", path.display(), e);
                iced::exit()
            }
        }
    }

    fn pump_frame(&mut self) -> Task<Message> {
        let Some(playback) = self.playback.as_mut() else {
            self.frame_pump.stop();
            return Task::none();
        };

        match playback.advance() {
            Ok(Step::Rendered) | Ok(Step::Waiting) => Task::none(),
            Ok(Step::Finished) => {
                self.stop_playback(StopReason::EndOfStream);
                Task::none()
            }
            Err(e) => {
                log::error!("Playback of {} failed: {:#}", playback.filename(), e);
                self.stop_playback(StopReason::EndOfStream);
                iced::exit()
            }
        }
    }

    /// Release the stream and bring back the page shown before playback.
    fn stop_playback(&mut self, reason: StopReason) {
        let Some(playback) = self.playback.take() else {
            return;
        };
        self.frame_pump.stop();
        self.exit_focused = false;

        let summary = playback.finish(reason);
        log::info!(
            "Playback stopped: {} ({:?}, {} frames)",
            summary.filename,
            summary.reason,
            summary.frames
        );

        self.pager.load_page(self.pager.current());
    }

    fn heartbeat(&self) {
        if let Some(watchdog) = &self.watchdog {
            watchdog.heartbeat();
        }
    }

    /// Subscribe to events.
    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            event::listen().map(Message::EventOccurred),
            self.poller.subscription(Message::PollTick),
            self.frame_pump.subscription(Message::FrameTick),
        ])
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        ui::render_main_view(self)
    }
}
