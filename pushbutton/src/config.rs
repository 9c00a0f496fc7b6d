use embedded_hal::digital::PinState;

/// Physical level on the input pin that means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pressed when the pin reads high, e.g. button to VCC with a pull-down.
    High,
    /// Pressed when the pin reads low, e.g. button to GND with a pull-up.
    Low,
}

impl From<PinState> for ActiveLevel {
    fn from(state: PinState) -> Self {
        match state {
            PinState::High => ActiveLevel::High,
            PinState::Low => ActiveLevel::Low,
        }
    }
}

impl From<bool> for ActiveLevel {
    /// `true` means active high.
    fn from(high_active: bool) -> Self {
        if high_active { ActiveLevel::High } else { ActiveLevel::Low }
    }
}

impl From<ActiveLevel> for PinState {
    fn from(level: ActiveLevel) -> Self {
        match level {
            ActiveLevel::High => PinState::High,
            ActiveLevel::Low => PinState::Low,
        }
    }
}

/// Timing and polarity configuration of a single button.
///
/// All durations are milliseconds of the clock the button is polled with.
/// The values are not validated: a long press threshold below the debounce time
/// promotes every confirmed press to a long press immediately, and a zero timeout
/// discards results on the next poll after release. See [`ButtonConfig::is_sane`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Pin level which means the button is pressed
    pub active_level: ActiveLevel,
    /// How long the pin must stay active before a press is trusted
    pub debounce_ms: u32,
    /// Press duration, counted from the first active sample, at which a press becomes a long press
    pub long_press_ms: u32,
    /// How long a short/long result is kept for reading after release
    pub timeout_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            active_level: ActiveLevel::Low,
            debounce_ms: 20,
            long_press_ms: 500,
            timeout_ms: 300,
        }
    }
}

impl ButtonConfig {
    /// Create a config with default timings for the given polarity.
    pub fn new(active_level: impl Into<ActiveLevel>) -> Self {
        Self {
            active_level: active_level.into(),
            ..Default::default()
        }
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn with_long_press_ms(mut self, long_press_ms: u32) -> Self {
        self.long_press_ms = long_press_ms;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Whether the timings describe a usable button.
    ///
    /// Advisory only, a button built from an insane config still runs.
    pub fn is_sane(&self) -> bool {
        self.long_press_ms >= self.debounce_ms && self.timeout_ms > 0
    }
}
