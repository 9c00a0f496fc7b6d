//! Async driver which polls a [`Button`] at a fixed interval.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;
use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

use crate::button::Button;
use crate::clock::Clock;
use crate::event::Press;

/// Polls a button every `interval_ms` and hands out completed presses.
///
/// Use it in an embassy task when the button doesn't live in a superloop:
///
/// ```ignore
/// let button = Button::new(pin, EmbassyClock, ButtonConfig::default());
/// let mut poller = ButtonPoller::new(button, embassy_time::Delay, 5);
/// poller.run(PRESS_CHANNEL.sender()).await;
/// ```
pub struct ButtonPoller<P: InputPin, C: Clock, D: DelayNs> {
    button: Button<P, C>,
    delay: D,
    interval_ms: u32,
}

impl<P: InputPin, C: Clock, D: DelayNs> ButtonPoller<P, C, D> {
    pub fn new(button: Button<P, C>, delay: D, interval_ms: u32) -> Self {
        Self {
            button,
            delay,
            interval_ms,
        }
    }

    /// Wait for the next completed press.
    ///
    /// A press is returned as soon as it's latched and the button is released.
    pub async fn next_press(&mut self) -> Press {
        loop {
            self.button.poll();
            if let Some(press) = self.button.take_press() {
                return press;
            }
            self.delay.delay_ms(self.interval_ms).await;
        }
    }

    /// Run forever, sending every completed press to `sender`.
    pub async fn run<M: RawMutex, const N: usize>(&mut self, sender: Sender<'_, M, Press, N>) {
        loop {
            let press = self.next_press().await;
            debug!("Sending {:?} press", press);
            sender.send(press).await;
        }
    }

    pub fn button(&self) -> &Button<P, C> {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut Button<P, C> {
        &mut self.button
    }

    /// Stop polling and give the button back.
    pub fn into_inner(self) -> (Button<P, C>, D) {
        (self.button, self.delay)
    }
}
