use alloc::format;

use log::{debug, info, trace, warn};

use crate::config::{Config, Profile};
use crate::error::{Error, Result};
use crate::events::Callbacks;
use crate::interface::Transport;
use crate::property::{Property, PropertyStore, Readings};
use crate::protocol::encoding::OneByteEncodable;
use crate::protocol::types::{Celsius, FanSpeed};
use crate::protocol::{
    decode, Telegram, TelegramError, Variable, ADDRESS_MASTER, ADDRESS_PANELS, DOMAIN,
    TELEGRAM_LENGTH,
};

/// What one call to [`ValloxDevice::receive`] did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Reception {
    /// No complete telegram could be read. Nothing is consumed when fewer
    /// than six bytes are buffered; if the transport runs dry after reporting
    /// six, the partial frame it did deliver is lost.
    Pending,
    /// A byte other than the domain byte was skipped.
    UnexpectedByte(u8),
    /// Six bytes were consumed but the checksum did not match.
    ChecksumMismatch(Telegram),
    /// The telegram-received handler rejected the telegram.
    Filtered(Telegram),
    /// Addressed to neither us nor the panel we listen to.
    Unrouted(Telegram),
    /// Decoded and applied.
    Handled(Telegram),
    /// Addressed to us but no decoder is registered for its variable.
    Unhandled(Telegram),
}

impl Reception {
    /// True for telegrams that were accepted, including the ones meant for
    /// other devices.
    pub fn is_received(&self) -> bool {
        matches!(self, Reception::Handled(_) | Reception::Unrouted(_))
    }

    pub fn telegram(&self) -> Option<&Telegram> {
        match self {
            Reception::Pending | Reception::UnexpectedByte(_) => None,
            Reception::ChecksumMismatch(t)
            | Reception::Filtered(t)
            | Reception::Unrouted(t)
            | Reception::Handled(t)
            | Reception::Unhandled(t) => Some(t),
        }
    }
}

/// Outcome of an outbound request.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Transmission {
    Sent,
    /// Dropped because the bus is suspended.
    Suppressed,
}

/// A listener and sender on the ventilation unit's bus.
///
/// Call [`receive`](Self::receive) from the main loop to keep the property
/// cache current, and [`calculate_results`](Self::calculate_results) whenever
/// the efficiencies should be refreshed.
pub struct ValloxDevice<T>
where
    T: Transport,
{
    transport: T,
    config: Config,
    properties: PropertyStore,
    suspended: bool,
    callbacks: Callbacks,
}

impl<T> ValloxDevice<T>
where
    T: Transport,
{
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, Config::default())
    }

    pub fn with_config(transport: T, config: Config) -> Self {
        ValloxDevice {
            transport,
            config,
            properties: PropertyStore::new(),
            suspended: false,
            callbacks: Callbacks::default(),
        }
    }

    pub fn release(self) -> T {
        self.transport
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn profile(&self) -> Profile {
        self.config.profile
    }

    pub fn set_sender_id(&mut self, sender_id: u8) {
        self.config.sender_id = sender_id;
    }

    pub fn set_receiver_id(&mut self, receiver_id: u8) {
        self.config.receiver_id = receiver_id;
    }

    pub fn callbacks(&mut self) -> &mut Callbacks {
        &mut self.callbacks
    }

    /// Last known value of `property`, `None` if it has not been seen yet.
    pub fn value(&self, property: Property) -> Option<i8> {
        self.properties.get(property)
    }

    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    /// Whether a CO2 sensor currently owns the bus.
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Processes at most one buffered telegram. Never waits.
    pub fn receive(&mut self) -> Reception {
        if self.transport.available() < TELEGRAM_LENGTH {
            return Reception::Pending;
        }

        let mut buf = [0u8; TELEGRAM_LENGTH];
        match self.transport.read_byte() {
            Some(DOMAIN) => buf[0] = DOMAIN,
            Some(byte) => {
                warn!("unexpected byte {:#04x}", byte);
                self.callbacks.unexpected_byte(byte);
                return Reception::UnexpectedByte(byte);
            }
            None => return Reception::Pending,
        }
        for slot in &mut buf[1..] {
            match self.transport.read_byte() {
                Some(byte) => *slot = byte,
                // the transport reported bytes it could not deliver
                None => return Reception::Pending,
            }
        }

        match Telegram::parse(&buf) {
            Ok((telegram, _)) => self.deliver(telegram),
            Err(TelegramError::ChecksumMismatch { telegram, expected }) => {
                warn!(
                    "checksum mismatch in [{}], expected {:#04x}",
                    telegram, expected
                );
                self.callbacks.checksum_failure(&telegram);
                Reception::ChecksumMismatch(telegram)
            }
            Err(TelegramError::UnexpectedByte(byte)) => {
                self.callbacks.unexpected_byte(byte);
                Reception::UnexpectedByte(byte)
            }
            Err(TelegramError::Incomplete) => Reception::Pending,
        }
    }

    fn deliver(&mut self, telegram: Telegram) -> Reception {
        trace!("rx [{}]", telegram);

        if !self.callbacks.telegram_received(&telegram) {
            return Reception::Filtered(telegram);
        }

        if !self.is_routed(&telegram) {
            return Reception::Unrouted(telegram);
        }

        if self.dispatch(&telegram) {
            Reception::Handled(telegram)
        } else {
            let message = format!("unknown command {:#04x} received", telegram.command);
            info!("{}", message);
            self.callbacks.log(&message);
            Reception::Unhandled(telegram)
        }
    }

    fn is_routed(&self, telegram: &Telegram) -> bool {
        telegram.receiver == self.config.receiver_id
            || telegram.receiver == self.config.sender_id
            || telegram.receiver == ADDRESS_PANELS
    }

    fn dispatch(&mut self, telegram: &Telegram) -> bool {
        let Some(variable) = telegram.variable() else {
            return false;
        };
        if !self.config.profile.decodes(variable) {
            return false;
        }

        match variable {
            Variable::Suspend => {
                self.set_suspended(true);
                true
            }
            Variable::Resume => {
                self.set_suspended(false);
                true
            }
            _ => match decode::readings(variable, telegram.argument) {
                Some(readings) => {
                    self.update(&readings);
                    true
                }
                None => false,
            },
        }
    }

    fn update(&mut self, readings: &Readings) {
        for (property, value) in self.properties.apply(readings) {
            self.callbacks.property_changed(property, value);
        }
    }

    fn set_suspended(&mut self, suspended: bool) {
        if self.suspended != suspended {
            debug!("{}", if suspended { "suspended" } else { "resumed" });
            self.suspended = suspended;
            self.callbacks.suspend_resume(suspended);
        }
    }

    /// Refreshes the in, out and average efficiencies from the cached
    /// temperatures and notifies the ones that changed.
    pub fn calculate_results(&mut self) {
        for (property, value) in self.properties.update_efficiencies() {
            self.callbacks.property_changed(property, value);
        }
    }

    /// Asks the master for the current value of `property`. The answer shows
    /// up in a later [`receive`](Self::receive).
    pub fn poll(&mut self, property: Property) -> Result<Transmission, T::Error> {
        match property.variable() {
            Some(variable) if self.config.profile.decodes(variable) => {
                self.send(Variable::Poll, variable.code())
            }
            _ => Err(Error::NotPollable(property)),
        }
    }

    pub fn set_fan_speed(&mut self, speed: u8) -> Result<Transmission, T::Error> {
        self.send_fan_speed(Variable::FanSpeed, speed)
    }

    pub fn set_fan_speed_max(&mut self, speed: u8) -> Result<Transmission, T::Error> {
        self.send_fan_speed(Variable::FanSpeedMax, speed)
    }

    pub fn set_fan_speed_min(&mut self, speed: u8) -> Result<Transmission, T::Error> {
        self.send_fan_speed(Variable::FanSpeedMin, speed)
    }

    /// Input fan adjustment in percent.
    pub fn set_dc_fan_input_adjustment(&mut self, percent: u8) -> Result<Transmission, T::Error> {
        self.send_adjustment(Variable::DcFanInputAdjustment, percent)
    }

    /// Output fan adjustment in percent.
    pub fn set_dc_fan_output_adjustment(
        &mut self,
        percent: u8,
    ) -> Result<Transmission, T::Error> {
        self.send_adjustment(Variable::DcFanOutputAdjustment, percent)
    }

    pub fn set_hrc_bypass_threshold(&mut self, celsius: i8) -> Result<Transmission, T::Error> {
        self.send_temperature(Variable::HrcBypass, celsius)
    }

    pub fn set_input_fan_stop_threshold(
        &mut self,
        celsius: i8,
    ) -> Result<Transmission, T::Error> {
        self.send_temperature(Variable::InputFanStop, celsius)
    }

    pub fn set_heating_set_point(&mut self, celsius: i8) -> Result<Transmission, T::Error> {
        self.send_temperature(Variable::HeatingSetPoint, celsius)
    }

    pub fn set_pre_heating_set_point(&mut self, celsius: i8) -> Result<Transmission, T::Error> {
        self.send_temperature(Variable::PreHeatingSetPoint, celsius)
    }

    /// Defrosting has a hysteresis of 4 degrees above this threshold.
    pub fn set_cell_defrosting_threshold(
        &mut self,
        celsius: i8,
    ) -> Result<Transmission, T::Error> {
        self.send_temperature(Variable::CellDefrosting, celsius)
    }

    fn send_fan_speed(&mut self, variable: Variable, speed: u8) -> Result<Transmission, T::Error> {
        let speed = FanSpeed::new(speed).ok_or(Error::InvalidFanSpeed(speed))?;
        self.send(variable, speed.encoded_as_byte())
    }

    fn send_adjustment(&mut self, variable: Variable, percent: u8) -> Result<Transmission, T::Error> {
        if percent > 100 {
            return Err(Error::InvalidAdjustment(percent));
        }
        self.send(variable, percent)
    }

    fn send_temperature(&mut self, variable: Variable, celsius: i8) -> Result<Transmission, T::Error> {
        self.send(variable, Celsius(celsius).encoded_as_byte())
    }

    fn send(&mut self, variable: Variable, value: u8) -> Result<Transmission, T::Error> {
        if self.suspended {
            debug!("bus suspended, dropped {:?} = {:#04x}", variable, value);
            return Ok(Transmission::Suppressed);
        }

        let telegram = Telegram::new(self.config.sender_id, ADDRESS_MASTER, variable.code(), value);
        trace!("tx [{}]", telegram);

        self.callbacks.start_sending();
        let written = self
            .transport
            .write(&telegram.to_bytes())
            .and_then(|()| self.transport.flush());
        self.callbacks.stop_sending();

        written.map_err(Error::Transport)?;
        Ok(Transmission::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::mock::MockBus;
    use crate::protocol::ADDRESS_PANEL1;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::convert::Infallible;

    /// Refuses every write.
    struct BrokenBus;

    impl Transport for BrokenBus {
        type Error = &'static str;

        fn available(&mut self) -> usize {
            0
        }

        fn read_byte(&mut self) -> Option<u8> {
            None
        }

        fn write(&mut self, _bytes: &[u8]) -> core::result::Result<(), &'static str> {
            Err("down")
        }

        fn flush(&mut self) -> core::result::Result<(), &'static str> {
            Ok(())
        }
    }

    /// Claims a full telegram is buffered no matter what it holds.
    struct Overstating(MockBus);

    impl Transport for Overstating {
        type Error = Infallible;

        fn available(&mut self) -> usize {
            TELEGRAM_LENGTH
        }

        fn read_byte(&mut self) -> Option<u8> {
            self.0.read_byte()
        }

        fn write(&mut self, bytes: &[u8]) -> core::result::Result<(), Infallible> {
            self.0.write(bytes)
        }

        fn flush(&mut self) -> core::result::Result<(), Infallible> {
            self.0.flush()
        }
    }

    fn init_logger() {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::max())
            .try_init();
    }

    /// Master to panel 1, the conversation we listen to by default.
    fn from_master(variable: Variable, value: u8) -> [u8; TELEGRAM_LENGTH] {
        Telegram::new(ADDRESS_MASTER, ADDRESS_PANEL1, variable.code(), value).to_bytes()
    }

    fn device_with(frames: &[&[u8]]) -> ValloxDevice<MockBus> {
        init_logger();
        let bytes: Vec<u8> = frames.iter().flat_map(|f| f.iter().copied()).collect();
        ValloxDevice::new(MockBus::with_rx(&bytes))
    }

    fn record_changes(device: &mut ValloxDevice<MockBus>) -> Rc<RefCell<Vec<(Property, i8)>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        device
            .callbacks()
            .attach_property_changed(move |p, v| sink.borrow_mut().push((p, v)));
        seen
    }

    #[test]
    fn pending_until_a_full_telegram_is_buffered() {
        let mut device = device_with(&[&[0x01, 0x11, 0x21, 0x29, 0x07]]);
        assert_eq!(device.receive(), Reception::Pending);
        // nothing was consumed
        assert_eq!(device.transport().rx.len(), 5);
    }

    #[test]
    fn short_delivery_drops_the_partial_frame() {
        init_logger();
        let bus = Overstating(MockBus::with_rx(&[0x01, 0x11, 0x21]));
        let mut device = ValloxDevice::new(bus);

        let reception = device.receive();
        assert_eq!(reception, Reception::Pending);
        assert_eq!(reception.telegram(), None);
        assert!(device.transport().0.rx.is_empty());

        assert_eq!(device.receive(), Reception::Pending);
        assert_eq!(device.value(Property::FanSpeed), Some(1));
    }

    #[test]
    fn fan_speed_is_notified_once() {
        let mut device = device_with(&[
            &[0x01, 0x11, 0x21, 0x29, 0x07, 0x63],
            &[0x01, 0x11, 0x21, 0x29, 0x07, 0x63],
        ]);
        let seen = record_changes(&mut device);

        let reception = device.receive();
        assert!(matches!(reception, Reception::Handled(_)));
        assert!(reception.is_received());
        assert_eq!(
            reception.telegram(),
            Some(&Telegram::new(0x11, 0x21, 0x29, 0x07))
        );
        assert_eq!(device.value(Property::FanSpeed), Some(3));

        // same value again
        assert!(matches!(device.receive(), Reception::Handled(_)));
        assert_eq!(*seen.borrow(), [(Property::FanSpeed, 3)]);
    }

    #[test]
    fn select_status_notifies_every_flag() {
        let mut device = device_with(&[&from_master(Variable::Select, 0b0100_1001)]);
        let seen = record_changes(&mut device);

        assert!(matches!(device.receive(), Reception::Handled(_)));
        assert_eq!(seen.borrow().len(), 8);
        assert_eq!(device.value(Property::PowerState), Some(1));
        assert_eq!(device.value(Property::HeatingState), Some(1));
        assert_eq!(device.value(Property::FaultIndicator), Some(1));
        assert_eq!(device.value(Property::FilterGuardIndicator), Some(0));
    }

    #[test]
    fn unexpected_byte_consumes_one_byte() {
        let mut device = device_with(&[&[0x02], &[0x01, 0x11, 0x21, 0x29, 0x07, 0x63]]);
        let bytes = Rc::new(RefCell::new(Vec::new()));
        let sink = bytes.clone();
        device
            .callbacks()
            .attach_unexpected_byte(move |b| sink.borrow_mut().push(b));

        assert_eq!(device.receive(), Reception::UnexpectedByte(0x02));
        assert_eq!(device.transport().rx.len(), 6);
        assert!(matches!(device.receive(), Reception::Handled(_)));
        assert_eq!(*bytes.borrow(), [0x02]);
        assert_eq!(device.value(Property::FanSpeed), Some(3));
    }

    #[test]
    fn checksum_mismatch_drops_the_frame() {
        let mut device = device_with(&[
            &[0x01, 0x11, 0x21, 0x29, 0x07, 0x64],
            &[0x01, 0x11, 0x21, 0x29, 0x0f, 0x6b],
        ]);
        let seen = record_changes(&mut device);
        let failures = Rc::new(RefCell::new(Vec::new()));
        let sink = failures.clone();
        device
            .callbacks()
            .attach_checksum_failure(move |t| sink.borrow_mut().push(t.checksum()));

        let reception = device.receive();
        assert!(matches!(reception, Reception::ChecksumMismatch(_)));
        assert!(!reception.is_received());
        assert_eq!(*failures.borrow(), [0x64]);
        assert!(seen.borrow().is_empty());
        assert_eq!(device.transport().rx.len(), 6);

        assert!(matches!(device.receive(), Reception::Handled(_)));
        assert_eq!(device.value(Property::FanSpeed), Some(4));
    }

    #[test]
    fn unrouted_telegrams_are_ignored() {
        let frame: &[u8] = &[0x01, 0x21, 0x11, 0x29, 0x07, 0x63];
        let mut device = device_with(&[frame, frame]);
        let seen = record_changes(&mut device);

        let reception = device.receive();
        assert!(matches!(reception, Reception::Unrouted(_)));
        assert!(reception.is_received());
        assert!(seen.borrow().is_empty());
        assert_eq!(device.value(Property::FanSpeed), Some(1));

        device.set_receiver_id(ADDRESS_MASTER);
        assert!(matches!(device.receive(), Reception::Handled(_)));
        assert_eq!(*seen.borrow(), [(Property::FanSpeed, 3)]);
    }

    #[test]
    fn telegrams_to_our_sender_id_and_all_panels_are_routed() {
        let mut device = device_with(&[
            &Telegram::new(ADDRESS_MASTER, 0x29, Variable::FanSpeed.code(), 0x07).to_bytes(),
            &Telegram::new(ADDRESS_MASTER, ADDRESS_PANELS, Variable::FanSpeed.code(), 0x0f)
                .to_bytes(),
        ]);

        assert!(matches!(device.receive(), Reception::Handled(_)));
        assert_eq!(device.value(Property::FanSpeed), Some(3));
        assert!(matches!(device.receive(), Reception::Handled(_)));
        assert_eq!(device.value(Property::FanSpeed), Some(4));
    }

    #[test]
    fn filter_can_veto() {
        let mut device = device_with(&[&[0x01, 0x11, 0x21, 0x29, 0x07, 0x63]]);
        let seen = record_changes(&mut device);
        device.callbacks().attach_telegram_received(|t| {
            assert_eq!((t.sender, t.receiver, t.command, t.argument), (0x11, 0x21, 0x29, 0x07));
            false
        });

        let reception = device.receive();
        assert!(matches!(reception, Reception::Filtered(_)));
        assert!(!reception.is_received());
        assert!(seen.borrow().is_empty());
        assert_eq!(device.value(Property::FanSpeed), Some(1));
    }

    #[test]
    fn unknown_variable_is_logged() {
        let frame = Telegram::new(ADDRESS_MASTER, ADDRESS_PANEL1, 0x40, 0x12).to_bytes();
        let mut device = device_with(&[&frame]);
        let messages = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = messages.clone();
        device
            .callbacks()
            .attach_log(move |m| sink.borrow_mut().push(m.into()));

        let reception = device.receive();
        assert!(matches!(reception, Reception::Unhandled(_)));
        assert!(!reception.is_received());
        assert_eq!(*messages.borrow(), ["unknown command 0x40 received"]);
    }

    #[test]
    fn acknowledged_variables_change_nothing() {
        let mut device = device_with(&[&from_master(Variable::Flags6, 0x00)]);
        let seen = record_changes(&mut device);
        assert!(matches!(device.receive(), Reception::Handled(_)));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn minimal_profile_skips_extra_channels() {
        init_logger();
        let bytes: Vec<u8> = [
            from_master(Variable::Humidity, 0x80),
            from_master(Variable::TempInside, 0xa0),
            from_master(Variable::Flags6, 0x00),
        ]
        .concat();
        let config = Config::default().with_profile(Profile::Minimal);
        let mut device = ValloxDevice::with_config(MockBus::with_rx(&bytes), config);
        let messages = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = messages.clone();
        device
            .callbacks()
            .attach_log(move |m| sink.borrow_mut().push(m.into()));

        assert!(matches!(device.receive(), Reception::Unhandled(_)));
        assert_eq!(device.value(Property::Humidity), None);
        assert!(matches!(device.receive(), Reception::Handled(_)));
        assert_eq!(device.value(Property::TempInside), Some(20));
        // acknowledged without readings
        assert!(matches!(device.receive(), Reception::Handled(_)));
        assert_eq!(*messages.borrow(), ["unknown command 0x2a received"]);

        assert_eq!(
            device.poll(Property::Humidity),
            Err(Error::NotPollable(Property::Humidity))
        );
        assert_eq!(device.poll(Property::TempInside), Ok(Transmission::Sent));
    }

    #[test]
    fn efficiencies_from_received_temperatures() {
        let mut device = device_with(&[
            &from_master(Variable::TempInside, 0xa0),
            &from_master(Variable::TempOutside, 0x64),
            &from_master(Variable::TempExhaust, 0x92),
            &from_master(Variable::TempIncoming, 0x83),
        ]);

        // three temperatures known
        for _ in 0..3 {
            assert!(matches!(device.receive(), Reception::Handled(_)));
        }
        device.calculate_results();
        assert_eq!(device.value(Property::InEfficiency), None);

        assert!(matches!(device.receive(), Reception::Handled(_)));
        let seen = record_changes(&mut device);
        device.calculate_results();
        assert_eq!(
            *seen.borrow(),
            [
                (Property::InEfficiency, 50),
                (Property::OutEfficiency, 25),
                (Property::AverageEfficiency, 37),
            ]
        );

        device.calculate_results();
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn suspend_gates_transmissions() {
        let mut device = device_with(&[
            &[0x01, 0x11, 0x20, 0x91, 0x00, 0xc3],
            &[0x01, 0x11, 0x20, 0x91, 0x00, 0xc3],
            &[0x01, 0x11, 0x20, 0x8f, 0x00, 0xc1],
        ]);
        let transitions = Rc::new(RefCell::new(Vec::new()));
        let sink = transitions.clone();
        device
            .callbacks()
            .attach_suspend_resume(move |s| sink.borrow_mut().push(s));

        assert!(matches!(device.receive(), Reception::Handled(_)));
        assert!(device.is_suspended());
        assert_eq!(device.set_fan_speed(3), Ok(Transmission::Suppressed));
        assert_eq!(device.poll(Property::FanSpeed), Ok(Transmission::Suppressed));
        assert!(device.transport().tx.is_empty());
        assert_eq!(device.transport().flushes, 0);

        // second broadcast is not a transition
        assert!(matches!(device.receive(), Reception::Handled(_)));
        assert!(matches!(device.receive(), Reception::Handled(_)));
        assert!(!device.is_suspended());
        assert_eq!(*transitions.borrow(), [true, false]);

        assert_eq!(device.set_fan_speed(3), Ok(Transmission::Sent));
        assert_eq!(device.transport().tx, [0x01, 0x29, 0x11, 0x29, 0x07, 0x6b]);
    }

    #[test]
    fn setters_encode_values() {
        let mut device = device_with(&[]);

        device.set_fan_speed(3).unwrap();
        device.set_fan_speed_max(8).unwrap();
        device.set_dc_fan_input_adjustment(100).unwrap();
        device.set_heating_set_point(20).unwrap();
        device.poll(Property::SelectStatus).unwrap();

        let expected: Vec<u8> = [
            Telegram::new(0x29, 0x11, 0x29, 0x07).to_bytes(),
            Telegram::new(0x29, 0x11, 0xa5, 0xff).to_bytes(),
            Telegram::new(0x29, 0x11, 0xb0, 100).to_bytes(),
            Telegram::new(0x29, 0x11, 0xa4, 0xa0).to_bytes(),
            [0x01, 0x29, 0x11, 0x00, 0xa3, 0xde],
        ]
        .concat();
        let bus = device.release();
        assert_eq!(bus.tx, expected);
        assert_eq!(bus.flushes, 5);
    }

    #[test]
    fn setters_reject_out_of_range_values() {
        let mut device = device_with(&[]);

        assert_eq!(device.set_fan_speed(0), Err(Error::InvalidFanSpeed(0)));
        assert_eq!(device.set_fan_speed_min(9), Err(Error::InvalidFanSpeed(9)));
        assert_eq!(
            device.set_dc_fan_output_adjustment(101),
            Err(Error::InvalidAdjustment(101))
        );
        assert_eq!(
            device.poll(Property::AverageEfficiency),
            Err(Error::NotPollable(Property::AverageEfficiency))
        );
        assert!(device.transport().tx.is_empty());
    }

    #[test]
    fn transport_errors_still_close_the_bracket() {
        init_logger();
        let mut device = ValloxDevice::new(BrokenBus);
        let events = Rc::new(RefCell::new(Vec::new()));
        let (start, stop) = (events.clone(), events.clone());
        device.callbacks().attach_sending(
            move || start.borrow_mut().push("start"),
            move || stop.borrow_mut().push("stop"),
        );

        assert_eq!(device.set_fan_speed(3), Err(Error::Transport("down")));
        assert_eq!(*events.borrow(), ["start", "stop"]);
    }

    #[test]
    fn sending_is_bracketed() {
        let mut device = device_with(&[]);
        device.set_sender_id(0x27);
        let events = Rc::new(RefCell::new(Vec::new()));
        let (start, stop) = (events.clone(), events.clone());
        device.callbacks().attach_sending(
            move || start.borrow_mut().push("start"),
            move || stop.borrow_mut().push("stop"),
        );

        device.set_cell_defrosting_threshold(5).unwrap();
        assert_eq!(*events.borrow(), ["start", "stop"]);
        assert_eq!(device.transport().tx[1], 0x27);
        assert_eq!(device.transport().tx[2], ADDRESS_MASTER);
    }
}
