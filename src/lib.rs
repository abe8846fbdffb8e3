#![no_std]

//! vallox_serial
//!
//! Listener and controller for the RS-485 bus of Vallox ventilation units
//! (the "digit" protocol spoken between the mainboard and its control panels).
//!
//! The bus runs at 9600 baud, 8N1. Every message is a six byte telegram
//! addressed from one device to another; the mainboard is the master at 0x11
//! and the panels sit at 0x21 to 0x29. This crate joins the bus as one more
//! panel: it caches every value the master reports to the panel it listens
//! to, and sends its own set and poll telegrams to the master.
//!
//! It is intended for use on embedded hardware, and as such is `no_std` (it
//! does need an allocator for the callbacks).
//!
//! ## General Usage
//!
//! Decode a telegram by hand:
//!
//! ```
//! use vallox_serial::protocol::{Telegram, Variable};
//!
//! let buf: &[u8] = &[0x01, 0x11, 0x21, 0x29, 0x07, 0x63];
//! let (telegram, rest) = Telegram::parse(buf).unwrap();
//!
//! assert!(rest.is_empty());
//! assert_eq!(telegram.variable(), Some(Variable::FanSpeed));
//! assert_eq!(telegram.argument, 0x07);
//! ```
//!
//! Or let a [`ValloxDevice`] keep track of the whole conversation. Anything
//! with a byte count, a reader and a writer can be a [`Transport`];
//! [`SerialTransport`] wraps an `embedded-hal` serial port.
//!
//! ```
//! use std::collections::VecDeque;
//! use std::convert::Infallible;
//!
//! use vallox_serial::{Property, Reception, Transport, ValloxDevice};
//!
//! #[derive(Default)]
//! struct Loopback {
//!     rx: VecDeque<u8>,
//!     tx: Vec<u8>,
//! }
//!
//! impl Transport for Loopback {
//!     type Error = Infallible;
//!
//!     fn available(&mut self) -> usize {
//!         self.rx.len()
//!     }
//!
//!     fn read_byte(&mut self) -> Option<u8> {
//!         self.rx.pop_front()
//!     }
//!
//!     fn write(&mut self, bytes: &[u8]) -> Result<(), Infallible> {
//!         self.tx.extend_from_slice(bytes);
//!         Ok(())
//!     }
//!
//!     fn flush(&mut self) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//! }
//!
//! let mut bus = Loopback::default();
//! // the master tells panel 1 that the fan runs at speed 3
//! bus.rx.extend([0x01, 0x11, 0x21, 0x29, 0x07, 0x63]);
//!
//! let mut device = ValloxDevice::new(bus);
//! device
//!     .callbacks()
//!     .attach_property_changed(|property, value| println!("{:?} = {}", property, value));
//!
//! assert!(matches!(device.receive(), Reception::Handled(_)));
//! assert_eq!(device.value(Property::FanSpeed), Some(3));
//!
//! // ask the master to switch to speed 5
//! device.set_fan_speed(5).unwrap();
//! assert_eq!(device.release().tx, [0x01, 0x29, 0x11, 0x29, 0x1f, 0x83]);
//! ```

extern crate alloc;

pub mod config;
pub mod device;
pub mod error;
pub mod events;
pub mod interface;
pub mod property;
pub mod protocol;

pub use config::{Config, Profile};
pub use device::{Reception, Transmission, ValloxDevice};
pub use error::{Error, Result};
pub use events::Callbacks;
pub use interface::{SerialTransport, Transport};
pub use property::{Property, PropertyStore};
