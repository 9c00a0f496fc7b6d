//! Debounced push-button driver for polling control loops.
//!
//! A [`Button`] owns one input pin and one millisecond clock. Call [`Button::poll`]
//! once per tick; it debounces the pin, tracks whether the button is held, and
//! latches a [`Press::Short`] or [`Press::Long`] result when the button is released.
//! The latched result stays readable for [`ButtonConfig::timeout_ms`] after release.
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod button;
pub mod clock;
pub mod config;
pub mod event;
pub mod poller;

pub use button::{Button, ButtonState};
pub use clock::{Clock, EmbassyClock};
pub use config::{ActiveLevel, ButtonConfig};
pub use embassy_sync::channel;
pub use event::Press;
pub use poller::ButtonPoller;

/// Default raw mutex for channels carrying [`Press`] results.
pub type RawMutex = embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
