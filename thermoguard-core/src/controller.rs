//! Interrupt binding
//!
//! Interrupt handlers need to reach the live [`System`], but a `static mut`
//! pointer to it would be both `unsafe` and a hidden global. Instead the
//! system is moved into a [`Controller`], which guards it with a
//! `critical_section::Mutex`, and each interrupt gets a callback that
//! captures a reference to that controller.
//!
//! On a single-core MCU a critical section masks interrupts, so a handler
//! runs to completion before the next one can borrow the system, and the
//! supervisory loop only holds the lock for one watchdog kick at a time.
//!
//! A typical board places the controller in a `StaticCell` so callbacks can
//! be `'static`:
//!
//! ```text
//! let controller = CONTROLLER.init(Controller::new(system));
//! timer_debounce.on_expiry(controller.callback(Event::DebounceElapsed));
//! button.on_edge(controller.callback(Event::ButtonEdge));
//! controller.run()
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

use crate::system::{Event, System};
use crate::traits::{Board, Predictor};

/// Owner of the running [`System`], shared between interrupt context and
/// the supervisory loop
pub struct Controller<'a, B: Board, P: Predictor> {
    system: Mutex<RefCell<System<'a, B, P>>>,
}

impl<'a, B: Board, P: Predictor> Controller<'a, B, P> {
    pub fn new(system: System<'a, B, P>) -> Self {
        Self {
            system: Mutex::new(RefCell::new(system)),
        }
    }

    /// Deliver one event to the system
    pub fn dispatch(&self, event: Event) {
        critical_section::with(|cs| self.system.borrow_ref_mut(cs).handle(event));
    }

    /// Callback bound to this controller for one interrupt source
    pub fn callback(&self, event: Event) -> impl Fn() + '_ + use<'_, 'a, B, P> {
        move || self.dispatch(event)
    }

    pub fn service_watchdog(&self) {
        critical_section::with(|cs| self.system.borrow_ref_mut(cs).service_watchdog());
    }

    /// Supervisory loop. Never returns.
    ///
    /// Each iteration takes the lock only for the duration of one watchdog
    /// kick, leaving interrupts serviceable in between.
    pub fn run(&self) -> ! {
        loop {
            self.service_watchdog();
        }
    }

    /// Run `f` with exclusive access to the system
    pub fn with<R>(&self, f: impl FnOnce(&mut System<'a, B, P>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.system.borrow_ref_mut(cs)))
    }

    /// Take the system back, for an orderly shutdown
    pub fn into_inner(self) -> System<'a, B, P> {
        self.system.into_inner().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SystemConfig;
    use crate::mock::{FixedPredictor, MockPeripherals};
    use crate::system::DebounceState;

    #[test]
    fn callbacks_reach_the_bound_system() {
        let config = SystemConfig::default();
        let mut peripherals = MockPeripherals::new(&config);
        let probe = peripherals.clone();
        let model = FixedPredictor::new(1.0, 0.0);

        let system = System::new(peripherals.devices(), &model, config).unwrap();
        let controller = Controller::new(system);

        let on_edge = controller.callback(Event::ButtonEdge);
        let on_debounce = controller.callback(Event::DebounceElapsed);

        probe.button.set_level(true);
        on_edge();
        assert_eq!(
            controller.with(|s| s.debounce_state()),
            DebounceState::Debouncing
        );
        assert!(probe.toggle_timer.running());

        on_debounce();
        assert_eq!(controller.with(|s| s.debounce_state()), DebounceState::Armed);
    }

    #[test]
    fn callbacks_fill_a_handler_table() {
        let config = SystemConfig::default();
        let mut peripherals = MockPeripherals::new(&config);
        let probe = peripherals.clone();
        let model = FixedPredictor::new(100.0, -50.0);

        let controller = Controller::new(System::new(peripherals.devices(), &model, config).unwrap());

        let on_edge = controller.callback(Event::ButtonEdge);
        let on_debounce = controller.callback(Event::DebounceElapsed);
        let on_predict = controller.callback(Event::PredictElapsed);
        let on_toggle = controller.callback(Event::ToggleElapsed);
        let table: [&dyn Fn(); 4] = [&on_edge, &on_toggle, &on_debounce, &on_predict];

        probe.button.set_level(true);
        for handler in table {
            handler();
        }

        assert!(probe.led.level());
        assert!(probe.button.port_interrupt_enabled());
        assert_eq!(probe.eeprom.writes(), 1);
        assert_eq!(
            probe.serial.lines(),
            vec!["Button pressed!", "The temperature is: -50", "The temperature is: -50"]
        );
    }

    #[test]
    fn watchdog_serviced_through_controller() {
        let config = SystemConfig::default();
        let mut peripherals = MockPeripherals::new(&config);
        let probe = peripherals.clone();
        let model = FixedPredictor::new(1.0, 0.0);

        let controller = Controller::new(System::new(peripherals.devices(), &model, config).unwrap());
        controller.service_watchdog();
        controller.service_watchdog();
        assert_eq!(probe.watchdog.kicks(), 2);

        drop(controller.into_inner());
        assert!(!probe.watchdog.enabled());
    }
}
