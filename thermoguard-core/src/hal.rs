//! `embedded-hal` adapters
//!
//! Boards built on an `embedded-hal` 1.0 HAL can hand their GPIO straight to
//! the control core through these wrappers instead of writing a capability
//! impl by hand.

use embedded_hal::digital::OutputPin;

use crate::traits::DigitalOutput;

/// LED on any `embedded-hal` output pin
///
/// The level last requested is cached, so `read` needs no
/// `StatefulOutputPin`. With `active_low` (LED wired to VCC, as on most
/// "Blue Pill" boards) a logical `true` drives the pin low.
pub struct HalLed<P> {
    pin: P,
    active_low: bool,
    on: bool,
}

impl<P: OutputPin> HalLed<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
            on: false,
        }
    }

    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
            on: false,
        }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> DigitalOutput for HalLed<P> {
    fn write(&mut self, on: bool) {
        let result = if on != self.active_low {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };

        match result {
            Ok(()) => self.on = on,
            Err(_) => warn!("LED pin write failed"),
        }
    }

    fn read(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct Pin {
        high: bool,
    }

    impl ErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn active_high_follows_level() {
        let mut led = HalLed::new(Pin::default());
        led.write(true);
        assert!(led.read());
        assert!(led.into_inner().high);
    }

    #[test]
    fn active_low_inverts_pin() {
        let mut led = HalLed::active_low(Pin::default());
        led.write(true);
        assert!(led.read());
        let pin = led.into_inner();
        assert!(!pin.high);
    }

    #[test]
    fn toggle_through_adapter() {
        let mut led = HalLed::new(Pin::default());
        led.toggle();
        led.toggle();
        assert!(!led.read());
    }
}
