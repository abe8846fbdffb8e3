//! Callback registry. Each event kind has at most one handler; attaching a
//! new one replaces the previous handler.

use alloc::boxed::Box;

use crate::property::Property;
use crate::protocol::Telegram;

type PropertyChanged = Box<dyn FnMut(Property, i8)>;
type Notify = Box<dyn FnMut()>;
type Log = Box<dyn FnMut(&str)>;
type TelegramReceived = Box<dyn FnMut(&Telegram) -> bool>;
type ChecksumFailure = Box<dyn FnMut(&Telegram)>;
type UnexpectedByte = Box<dyn FnMut(u8)>;
type SuspendResume = Box<dyn FnMut(bool)>;

#[derive(Default)]
pub struct Callbacks {
    property_changed: Option<PropertyChanged>,
    start_sending: Option<Notify>,
    stop_sending: Option<Notify>,
    log: Option<Log>,
    telegram_received: Option<TelegramReceived>,
    checksum_failure: Option<ChecksumFailure>,
    unexpected_byte: Option<UnexpectedByte>,
    suspend_resume: Option<SuspendResume>,
}

impl Callbacks {
    pub fn attach_property_changed(&mut self, f: impl FnMut(Property, i8) + 'static) {
        self.property_changed = Some(Box::new(f));
    }

    pub fn detach_property_changed(&mut self) {
        self.property_changed = None;
    }

    /// Handlers run right before and right after a telegram is written, e.g.
    /// to switch the direction of an RS-485 transceiver.
    pub fn attach_sending(
        &mut self,
        start: impl FnMut() + 'static,
        stop: impl FnMut() + 'static,
    ) {
        self.start_sending = Some(Box::new(start));
        self.stop_sending = Some(Box::new(stop));
    }

    pub fn detach_sending(&mut self) {
        self.start_sending = None;
        self.stop_sending = None;
    }

    pub fn attach_log(&mut self, f: impl FnMut(&str) + 'static) {
        self.log = Some(Box::new(f));
    }

    pub fn detach_log(&mut self) {
        self.log = None;
    }

    /// The handler sees every valid telegram before it is routed. Returning
    /// false drops the telegram.
    pub fn attach_telegram_received(&mut self, f: impl FnMut(&Telegram) -> bool + 'static) {
        self.telegram_received = Some(Box::new(f));
    }

    pub fn detach_telegram_received(&mut self) {
        self.telegram_received = None;
    }

    /// The telegram passed to the handler carries the checksum as received.
    pub fn attach_checksum_failure(&mut self, f: impl FnMut(&Telegram) + 'static) {
        self.checksum_failure = Some(Box::new(f));
    }

    pub fn detach_checksum_failure(&mut self) {
        self.checksum_failure = None;
    }

    pub fn attach_unexpected_byte(&mut self, f: impl FnMut(u8) + 'static) {
        self.unexpected_byte = Some(Box::new(f));
    }

    pub fn detach_unexpected_byte(&mut self) {
        self.unexpected_byte = None;
    }

    pub fn attach_suspend_resume(&mut self, f: impl FnMut(bool) + 'static) {
        self.suspend_resume = Some(Box::new(f));
    }

    pub fn detach_suspend_resume(&mut self) {
        self.suspend_resume = None;
    }

    pub(crate) fn property_changed(&mut self, property: Property, value: i8) {
        if let Some(f) = self.property_changed.as_mut() {
            f(property, value);
        }
    }

    pub(crate) fn start_sending(&mut self) {
        if let Some(f) = self.start_sending.as_mut() {
            f();
        }
    }

    pub(crate) fn stop_sending(&mut self) {
        if let Some(f) = self.stop_sending.as_mut() {
            f();
        }
    }

    pub(crate) fn log(&mut self, message: &str) {
        if let Some(f) = self.log.as_mut() {
            f(message);
        }
    }

    /// Defaults to accepting when no handler is attached.
    pub(crate) fn telegram_received(&mut self, telegram: &Telegram) -> bool {
        match self.telegram_received.as_mut() {
            Some(f) => f(telegram),
            None => true,
        }
    }

    pub(crate) fn checksum_failure(&mut self, telegram: &Telegram) {
        if let Some(f) = self.checksum_failure.as_mut() {
            f(telegram);
        }
    }

    pub(crate) fn unexpected_byte(&mut self, byte: u8) {
        if let Some(f) = self.unexpected_byte.as_mut() {
            f(byte);
        }
    }

    pub(crate) fn suspend_resume(&mut self, suspended: bool) {
        if let Some(f) = self.suspend_resume.as_mut() {
            f(suspended);
        }
    }
}

impl core::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Callbacks")
            .field("property_changed", &self.property_changed.is_some())
            .field("sending", &self.start_sending.is_some())
            .field("log", &self.log.is_some())
            .field("telegram_received", &self.telegram_received.is_some())
            .field("checksum_failure", &self.checksum_failure.is_some())
            .field("unexpected_byte", &self.unexpected_byte.is_some())
            .field("suspend_resume", &self.suspend_resume.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[test]
    fn reattach_replaces_handler() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut callbacks = Callbacks::default();

        let first = seen.clone();
        callbacks.attach_property_changed(move |p, v| first.borrow_mut().push((1, p, v)));
        let second = seen.clone();
        callbacks.attach_property_changed(move |p, v| second.borrow_mut().push((2, p, v)));

        callbacks.property_changed(Property::FanSpeed, 3);
        assert_eq!(*seen.borrow(), [(2, Property::FanSpeed, 3)]);

        callbacks.detach_property_changed();
        callbacks.property_changed(Property::FanSpeed, 4);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn telegram_filter_defaults_to_accept() {
        let mut callbacks = Callbacks::default();
        let telegram = Telegram::new(0x11, 0x21, 0x29, 0x07);
        assert!(callbacks.telegram_received(&telegram));

        callbacks.attach_telegram_received(|t| t.sender != 0x11);
        assert!(!callbacks.telegram_received(&telegram));

        callbacks.detach_telegram_received();
        assert!(callbacks.telegram_received(&telegram));
    }

    #[test]
    fn sending_brackets() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut callbacks = Callbacks::default();
        let (start, stop) = (seen.clone(), seen.clone());
        callbacks.attach_sending(
            move || start.borrow_mut().push("start"),
            move || stop.borrow_mut().push("stop"),
        );

        callbacks.start_sending();
        callbacks.stop_sending();
        assert_eq!(*seen.borrow(), ["start", "stop"]);

        callbacks.detach_sending();
        callbacks.start_sending();
        assert_eq!(seen.borrow().len(), 2);
    }
}
