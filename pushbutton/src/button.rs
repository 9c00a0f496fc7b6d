//! Debounce and short/long classification of a single push-button.

use embedded_hal::digital::InputPin;

use crate::clock::{Clock, elapsed_ms};
use crate::config::{ActiveLevel, ButtonConfig};
use crate::event::Press;

/// State of the button automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Not pressed
    #[default]
    Idle,
    /// Pin is active but the press isn't confirmed yet
    Debouncing,
    /// Confirmed press, shorter than the long press threshold so far
    ShortHeld,
    /// Confirmed press which reached the long press threshold
    LongHeld,
}

impl ButtonState {
    /// Whether the button counts as held down in this state.
    pub fn is_held(&self) -> bool {
        matches!(self, ButtonState::ShortHeld | ButtonState::LongHeld)
    }
}

/// A debounced push-button.
///
/// `Button` is driven by calling [`Button::poll`] periodically, faster than the
/// debounce time (every 1-10ms is typical). Each completed press is latched as a
/// [`Press`] on release and can be consumed once with [`Button::read_short`],
/// [`Button::read_long`] or [`Button::take_press`]. Unread results are dropped
/// [`ButtonConfig::timeout_ms`] after the release.
pub struct Button<P: InputPin, C: Clock> {
    pin: P,
    clock: C,
    config: ButtonConfig,
    state: ButtonState,
    /// Clock value sampled at the start of the latest poll
    now: u32,
    /// When the pin was first seen active for the current press
    debounce_start: u32,
    /// When the pending result was latched
    release_latch_start: u32,
    /// Latched result, waiting to be read
    pending: Option<Press>,
}

impl<P: InputPin, C: Clock> Button<P, C> {
    /// Create a button. Neither the pin nor the clock is read here.
    pub fn new(pin: P, clock: C, config: ButtonConfig) -> Self {
        if !config.is_sane() {
            warn!(
                "Button config looks wrong: debounce {}ms, long press {}ms, timeout {}ms",
                config.debounce_ms,
                config.long_press_ms,
                config.timeout_ms
            );
        }
        Button {
            pin,
            clock,
            config,
            state: ButtonState::Idle,
            now: 0,
            debounce_start: 0,
            release_latch_start: 0,
            pending: None,
        }
    }

    /// Advance the button by one tick.
    ///
    /// Samples the clock once, drops an expired result, then runs the state
    /// machine on a single pin read. Returns the state after the tick.
    pub fn poll(&mut self) -> ButtonState {
        self.now = self.clock.now_ms();
        self.expire();

        let active = self.is_active();
        trace!("Button poll at {}ms, pin active: {}", self.now, active);
        // A press may pass through several states in one tick, e.g. with a zero
        // debounce time. Every step below uses the same `now` and pin level.
        loop {
            let next = self.transition(active);
            if next == self.state {
                break;
            }
            debug!("Button state {:?} -> {:?} at {}ms", self.state, next, self.now);
            self.state = next;
        }
        self.state
    }

    fn transition(&mut self, active: bool) -> ButtonState {
        match (self.state, active) {
            (ButtonState::Idle, true) => {
                self.debounce_start = self.now;
                ButtonState::Debouncing
            }
            (ButtonState::Idle, false) => ButtonState::Idle,
            (ButtonState::Debouncing, true) => {
                if elapsed_ms(self.now, self.debounce_start) >= self.config.debounce_ms {
                    ButtonState::ShortHeld
                } else {
                    ButtonState::Debouncing
                }
            }
            // Bounce, the press never got confirmed
            (ButtonState::Debouncing, false) => ButtonState::Idle,
            (ButtonState::ShortHeld, true) => {
                if elapsed_ms(self.now, self.debounce_start) >= self.config.long_press_ms {
                    self.latch(Press::Long);
                    ButtonState::LongHeld
                } else {
                    ButtonState::ShortHeld
                }
            }
            (ButtonState::ShortHeld, false) => {
                self.latch(Press::Short);
                ButtonState::Idle
            }
            (ButtonState::LongHeld, true) => ButtonState::LongHeld,
            (ButtonState::LongHeld, false) => {
                self.latch(Press::Long);
                ButtonState::Idle
            }
        }
    }

    /// Latch `press` and restart the retention window.
    fn latch(&mut self, press: Press) {
        if self.pending != Some(press) {
            info!("Button {:?} press latched at {}ms", press, self.now);
            self.pending = Some(press);
        }
        self.release_latch_start = self.now;
    }

    /// Drop the latched result if it has been pending for at least `timeout_ms`.
    ///
    /// Uses the clock value of the latest [`Button::poll`], it doesn't sample the clock.
    /// `poll` already calls this on every tick.
    pub fn expire(&mut self) {
        if let Some(press) = self.pending
            && elapsed_ms(self.now, self.release_latch_start) >= self.config.timeout_ms
        {
            debug!("Button {:?} press expired unread", press);
            self.pending = None;
        }
    }

    /// Whether the button is held down right now, after debouncing.
    pub fn is_held(&self) -> bool {
        self.state.is_held()
    }

    /// Consume a latched short press.
    ///
    /// Returns `true` once per short press. Returns `false` without touching the
    /// latch while the pin is active, because the press may still be running.
    pub fn read_short(&mut self) -> bool {
        self.consume(Press::Short)
    }

    /// Consume a latched long press. Same rules as [`Button::read_short`].
    pub fn read_long(&mut self) -> bool {
        self.consume(Press::Long)
    }

    /// Consume whichever press is latched, if the pin is released.
    pub fn take_press(&mut self) -> Option<Press> {
        if self.is_active() {
            return None;
        }
        self.pending.take()
    }

    /// Latched press which hasn't been read or expired yet, without consuming it.
    pub fn pending(&self) -> Option<Press> {
        self.pending
    }

    fn consume(&mut self, press: Press) -> bool {
        if self.is_active() {
            return false;
        }
        if self.pending == Some(press) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Current state of the automaton.
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Timing and polarity this button was built with.
    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Go back to idle and drop any latched result.
    pub fn reset(&mut self) {
        debug!("Button reset from {:?}", self.state);
        self.state = ButtonState::Idle;
        self.pending = None;
    }

    /// Give the pin and the clock back.
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }

    /// Read the pin, a failed read counts as released.
    fn is_active(&mut self) -> bool {
        let level = match self.config.active_level {
            ActiveLevel::High => self.pin.is_high(),
            ActiveLevel::Low => self.pin.is_low(),
        };
        level.unwrap_or_else(|_| {
            warn!("Failed to read button pin");
            false
        })
    }
}
