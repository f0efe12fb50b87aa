//! Handheld controller input.

use anyhow::{Result, anyhow};
use gilrs::{Button, EventType, GamepadId, Gilrs};

use crate::config::{ButtonMap, RepeatPolicy};

/// Pressed state of the three logical kiosk buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonStates {
    pub previous: bool,
    pub next: bool,
    pub exit: bool,
}

/// Anything that can be sampled once per poll tick.
pub trait InputSource {
    fn read(&mut self) -> ButtonStates;
}

/// Turns raw button samples into triggers according to a `RepeatPolicy`.
#[derive(Debug, Default)]
pub struct ButtonLatch {
    policy: RepeatPolicy,
    last: ButtonStates,
}

impl ButtonLatch {
    pub fn new(policy: RepeatPolicy) -> Self {
        ButtonLatch {
            policy,
            last: ButtonStates::default(),
        }
    }

    /// Buttons that should act on this tick.
    pub fn triggers(&mut self, now: ButtonStates) -> ButtonStates {
        let last = std::mem::replace(&mut self.last, now);
        match self.policy {
            RepeatPolicy::EveryTick => now,
            RepeatPolicy::Edge => ButtonStates {
                previous: now.previous && !last.previous,
                next: now.next && !last.next,
                exit: now.exit && !last.exit,
            },
        }
    }
}

/// A gilrs gamepad bound by name.
pub struct GamepadController {
    gilrs: Gilrs,
    gamepad_id: GamepadId,
    buttons: ButtonMap,
}

impl GamepadController {
    /// Bind the first connected gamepad whose name contains `name`.
    pub fn connect(name: &str, buttons: ButtonMap) -> Result<Self> {
        let gilrs =
            Gilrs::new().map_err(|e| anyhow!("failed to initialise gamepad backend: {e}"))?;

        let found = gilrs
            .gamepads()
            .find(|(_, pad)| pad.is_connected() && pad.name().contains(name))
            .map(|(id, pad)| (id, pad.name().to_string()));

        match found {
            Some((gamepad_id, pad_name)) => {
                log::info!("Controller connected: {} ({:?})", pad_name, gamepad_id);
                Ok(GamepadController {
                    gilrs,
                    gamepad_id,
                    buttons,
                })
            }
            None => {
                let available: Vec<String> =
                    gilrs.gamepads().map(|(_, p)| p.name().to_string()).collect();
                Err(anyhow!(
                    "no controller matching '{}' (connected: {:?})",
                    name,
                    available
                ))
            }
        }
    }
}

impl InputSource for GamepadController {
    fn read(&mut self) -> ButtonStates {
        // Drain pending events so gilrs updates its cached button state.
        while let Some(event) = self.gilrs.next_event() {
            if event.id != self.gamepad_id {
                continue;
            }
            match event.event {
                EventType::Disconnected => log::warn!("Controller disconnected"),
                EventType::Connected => log::info!("Controller reconnected"),
                _ => {}
            }
        }

        match self.gilrs.connected_gamepad(self.gamepad_id) {
            Some(pad) => ButtonStates {
                previous: pad.is_pressed(self.buttons.previous),
                next: pad.is_pressed(self.buttons.next),
                exit: pad.is_pressed(self.buttons.exit),
            },
            None => ButtonStates::default(),
        }
    }
}

/// Look up a gilrs button by its variant name.
pub fn parse_button(name: &str) -> Option<Button> {
    let button = match name {
        "South" => Button::South,
        "East" => Button::East,
        "North" => Button::North,
        "West" => Button::West,
        "C" => Button::C,
        "Z" => Button::Z,
        "LeftTrigger" => Button::LeftTrigger,
        "LeftTrigger2" => Button::LeftTrigger2,
        "RightTrigger" => Button::RightTrigger,
        "RightTrigger2" => Button::RightTrigger2,
        "Select" => Button::Select,
        "Start" => Button::Start,
        "Mode" => Button::Mode,
        "LeftThumb" => Button::LeftThumb,
        "RightThumb" => Button::RightThumb,
        "DPadUp" => Button::DPadUp,
        "DPadDown" => Button::DPadDown,
        "DPadLeft" => Button::DPadLeft,
        "DPadRight" => Button::DPadRight,
        _ => return None,
    };
    Some(button)
}
