//! GPIO button input with per-tick edge detection.
//!
//! Four physical buttons (active-low with internal pull-up):
//!   - UP     - navigate up
//!   - DOWN   - navigate down
//!   - SELECT - enter submenu / run action
//!   - BACK   - parent menu / cancel workflow
//!
//! The badge runs one cooperative tick loop, so instead of per-button
//! tasks the pins are level-sampled once per tick by `update()` and a
//! press edge is reported for the tick where a stable low level first
//! appears. The tick period ([`crate::config::TICK_MS`]) together with
//! [`crate::config::BUTTON_DEBOUNCE_MS`] worth of stable samples does the
//! debouncing.

use embassy_nrf::gpio::{AnyPin, Input, Pull};

use crate::config::{BUTTON_DEBOUNCE_MS, TICK_MS};
use crate::ui::InputPort;

/// Ticks a level must hold before it is accepted.
const DEBOUNCE_TICKS: u8 = (BUTTON_DEBOUNCE_MS / TICK_MS) as u8;

struct Debounced {
    pin: Input<'static>,
    stable: bool,
    candidate: bool,
    held_ticks: u8,
    edge: bool,
}

impl Debounced {
    fn new(pin: AnyPin) -> Self {
        Debounced {
            pin: Input::new(pin, Pull::Up),
            stable: false,
            candidate: false,
            held_ticks: 0,
            edge: false,
        }
    }

    fn sample(&mut self) {
        self.edge = false;
        let level = self.pin.is_low();

        if level != self.candidate {
            self.candidate = level;
            self.held_ticks = 0;
            return;
        }

        if self.held_ticks < DEBOUNCE_TICKS {
            self.held_ticks += 1;
            return;
        }

        if level != self.stable {
            self.stable = level;
            self.edge = level; // press edge only
        }
    }
}

/// The badge's four buttons behind the [`InputPort`] contract.
pub struct Buttons {
    up: Debounced,
    down: Debounced,
    select: Debounced,
    back: Debounced,
}

impl Buttons {
    pub fn new(up: AnyPin, down: AnyPin, select: AnyPin, back: AnyPin) -> Self {
        Buttons {
            up: Debounced::new(up),
            down: Debounced::new(down),
            select: Debounced::new(select),
            back: Debounced::new(back),
        }
    }
}

impl InputPort for Buttons {
    fn update(&mut self) {
        self.up.sample();
        self.down.sample();
        self.select.sample();
        self.back.sample();
    }

    fn up_pressed(&self) -> bool {
        self.up.edge
    }

    fn down_pressed(&self) -> bool {
        self.down.edge
    }

    fn select_pressed(&self) -> bool {
        self.select.edge
    }

    fn back_pressed(&self) -> bool {
        self.back.edge
    }
}
