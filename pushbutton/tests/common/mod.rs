#![allow(dead_code)]

use std::cell::Cell;
use std::convert::Infallible;
use std::ops::Range;
use std::rc::Rc;

use embassy_futures::yield_now;
use embedded_hal::digital::{ErrorType, InputPin};
use embedded_hal_async::delay::DelayNs;
use pushbutton::{ActiveLevel, Button, ButtonConfig, ButtonState, Clock};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// The standard timing used across the tests: 20ms debounce, 500ms long press, 300ms retention
pub fn test_config(active_level: ActiveLevel) -> ButtonConfig {
    ButtonConfig::new(active_level)
        .with_debounce_ms(20)
        .with_long_press_ms(500)
        .with_timeout_ms(300)
}

/// Simulated millisecond counter shared with the test body
#[derive(Clone)]
pub struct SimClock(pub Rc<Cell<u32>>);

impl Clock for SimClock {
    fn now_ms(&mut self) -> u32 {
        self.0.get()
    }
}

/// Pin wired with the given polarity, pressed and released from the test body
#[derive(Clone)]
pub struct SimPin {
    pressed: Rc<Cell<bool>>,
    active_level: ActiveLevel,
}

impl SimPin {
    fn is_physically_high(&self) -> bool {
        match self.active_level {
            ActiveLevel::High => self.pressed.get(),
            ActiveLevel::Low => !self.pressed.get(),
        }
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.is_physically_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_physically_high())
    }
}

/// A button on a simulated pin and clock.
///
/// Times passed to the bench are relative to `origin`, so a test can be replayed
/// across the `u32` rollover of the clock.
pub struct Bench {
    pub button: Button<SimPin, SimClock>,
    pressed: Rc<Cell<bool>>,
    time: Rc<Cell<u32>>,
    origin: u32,
}

impl Bench {
    pub fn new(config: ButtonConfig) -> Self {
        Self::with_origin(config, 0)
    }

    pub fn with_origin(config: ButtonConfig, origin: u32) -> Self {
        let pressed = Rc::new(Cell::new(false));
        let time = Rc::new(Cell::new(origin));
        let pin = SimPin {
            pressed: pressed.clone(),
            active_level: config.active_level,
        };
        Self {
            button: Button::new(pin, SimClock(time.clone()), config),
            pressed,
            time,
            origin,
        }
    }

    pub fn press(&self) {
        self.pressed.set(true);
    }

    pub fn release(&self) {
        self.pressed.set(false);
    }

    /// Poll once at `t`ms and check that the held flag matches the state
    pub fn poll_at(&mut self, t: u32) -> ButtonState {
        self.time.set(self.origin.wrapping_add(t));
        let state = self.button.poll();
        assert_eq!(
            self.button.is_held(),
            matches!(state, ButtonState::ShortHeld | ButtonState::LongHeld),
            "held flag out of sync at {}ms",
            t
        );
        state
    }

    /// Poll every millisecond of `range`
    pub fn poll_range(&mut self, range: Range<u32>) {
        for t in range {
            self.poll_at(t);
        }
    }
}

/// Active low pin which is pressed during the given time windows
pub struct ScriptedPin {
    time: Rc<Cell<u32>>,
    presses: Vec<Range<u32>>,
}

impl ScriptedPin {
    pub fn new(time: Rc<Cell<u32>>, presses: Vec<Range<u32>>) -> Self {
        Self { time, presses }
    }

    fn pressed(&self) -> bool {
        let now = self.time.get();
        self.presses.iter().any(|p| p.contains(&now))
    }
}

impl ErrorType for ScriptedPin {
    type Error = Infallible;
}

impl InputPin for ScriptedPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pressed())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pressed())
    }
}

/// Delay which advances the simulated clock instead of waiting, then yields once
pub struct SimDelay {
    time: Rc<Cell<u32>>,
}

impl SimDelay {
    pub fn new(time: Rc<Cell<u32>>) -> Self {
        Self { time }
    }
}

impl DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.time.set(self.time.get().wrapping_add(ns / 1_000_000));
        yield_now().await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.time.set(self.time.get().wrapping_add(ms));
        yield_now().await;
    }
}
