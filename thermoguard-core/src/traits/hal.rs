//! Device Capability Interfaces
//!
//! The control core never touches registers. Every peripheral it needs is
//! reached through one of the narrow traits below, and a board support crate
//! provides the implementations.
//!
//! ## Contracts
//!
//! | Capability | Guarantee expected from the implementation |
//! |------------|--------------------------------------------|
//! | [`DigitalOutput`] | `read` reflects the level last driven |
//! | [`InterruptInput`] | edge callback fires asynchronously while the pin and port interrupts are enabled |
//! | [`PeriodicTimer`] | callback fires every period while running, `restart` resets the phase |
//! | [`Watchdog`] | device resets unless `reset` is called within the timeout while enabled |
//! | [`NonVolatileStore`] | bytes survive power loss |
//! | [`AnalogInput`] | `voltage = raw / max_raw * supply_voltage` |
//! | [`SerialOutput`] | best effort, no backpressure |
//!
//! All methods are infallible. Peripheral faults that the hardware cannot
//! report are outside what this layer can recover from; the watchdog covers
//! the case where such a fault stalls the firmware.
//!
//! Construction (pin direction, timer period, which callback an interrupt
//! invokes) is a board concern and is deliberately absent from these traits.

/// Push-pull digital output, used for the LED.
pub trait DigitalOutput {
    /// Drive the pin high (`true`) or low (`false`).
    fn write(&mut self, high: bool);

    /// Current output level.
    fn read(&self) -> bool;

    /// Invert the current output level.
    fn toggle(&mut self) {
        let level = self.read();
        self.write(!level);
    }
}

/// Digital input with pull-up and edge interrupt, used for the button.
pub trait InterruptInput {
    /// Current electrical level of the pin.
    fn read(&self) -> bool;

    /// Enable or disable the interrupt for this pin only.
    fn enable_interrupt(&mut self, enable: bool);

    /// Enable or disable pin-change interrupts for the whole I/O port.
    ///
    /// This is what the debounce logic toggles: while the port is masked no
    /// edge on any of its pins reaches the controller.
    fn enable_interrupt_on_port(&mut self, enable: bool);
}

/// Periodic hardware timer.
pub trait PeriodicTimer {
    /// Start counting. No effect when already running.
    fn start(&mut self);

    /// Stop counting. No effect when already stopped.
    fn stop(&mut self);

    /// Reset the phase and start counting from zero.
    fn restart(&mut self);
}

/// Hardware watchdog timer.
pub trait Watchdog {
    fn set_enabled(&mut self, enable: bool);

    /// Acknowledge the watchdog ("kick"), postponing the reset.
    fn reset(&mut self);
}

/// Byte-addressable non-volatile memory (EEPROM or emulated flash).
pub trait NonVolatileStore {
    fn read(&self, address: u16) -> u8;

    fn write(&mut self, address: u16, value: u8);
}

/// Analog-to-digital converter.
pub trait AnalogInput {
    fn set_enabled(&mut self, enable: bool);

    /// Raw conversion result for `pin`, in `0..=max_raw()`.
    fn read_raw(&mut self, pin: u8) -> u16;

    /// Full-scale raw value (1023 for a 10-bit converter).
    fn max_raw(&self) -> u16;

    /// Reference voltage corresponding to `max_raw()`.
    fn supply_voltage(&self) -> f64;

    /// Fraction of full scale, in `[0.0, 1.0]`.
    fn duty_cycle(&mut self, pin: u8) -> f64 {
        let max = self.max_raw();
        if max == 0 {
            return 0.0;
        }
        let raw = self.read_raw(pin).min(max);
        f64::from(raw) / f64::from(max)
    }

    /// Input voltage on `pin`, in `[0.0, supply_voltage()]`.
    fn input_voltage(&mut self, pin: u8) -> f64 {
        self.duty_cycle(pin) * self.supply_voltage()
    }
}

/// Text output stream (UART).
///
/// Formatting goes through [`core::fmt::Write`], so `write!`/`writeln!` work
/// directly on any implementation.
pub trait SerialOutput: core::fmt::Write {
    fn set_enabled(&mut self, enable: bool);
}

/// Bundle of capability types provided by one board.
///
/// Naming the types once here keeps the control core down to two type
/// parameters instead of one per peripheral.
pub trait Board {
    type Led: DigitalOutput;
    type Button: InterruptInput;
    type Timer: PeriodicTimer;
    type Watchdog: Watchdog;
    type Store: NonVolatileStore;
    type Adc: AnalogInput;
    type Serial: SerialOutput;
}
