//! Telegram framing and value conversions for the Vallox RS-485 bus.
//!
//! Mainboards answer on 0x11 (the master is always 0x11), control panels use
//! 0x21 to 0x29 with the LON gateway on 0x28. 0x10 and 0x20 address all
//! mainboards and all panels respectively.

pub mod decode;
#[macro_use]
pub mod encoding;
mod telegram;
pub mod types;
mod variable;

pub use encoding::{Encodable, EncodingError};
pub use telegram::{checksum, Telegram, TelegramError};
pub use variable::Variable;

/// Line speed of the bus, 8N1.
///
/// ```
/// use vallox_serial::protocol::{BAUD_RATE, TELEGRAM_LENGTH};
///
/// // ten bit times per byte, so a telegram takes just over 6 ms on the wire
/// let bits = TELEGRAM_LENGTH as u32 * 10;
/// assert_eq!(bits * 1000 / BAUD_RATE, 6);
/// ```
pub const BAUD_RATE: u32 = 9600;

pub const TELEGRAM_LENGTH: usize = 6;
pub const DOMAIN: u8 = 0x01;

pub const ADDRESS_MAINBOARDS: u8 = 0x10;
pub const ADDRESS_MASTER: u8 = ADDRESS_MAINBOARDS + 1;

pub const ADDRESS_PANELS: u8 = 0x20;
pub const ADDRESS_PANEL1: u8 = ADDRESS_PANELS + 1;
pub const ADDRESS_PANEL2: u8 = ADDRESS_PANELS + 2;
pub const ADDRESS_PANEL3: u8 = ADDRESS_PANELS + 3;
pub const ADDRESS_PANEL4: u8 = ADDRESS_PANELS + 4;
pub const ADDRESS_PANEL5: u8 = ADDRESS_PANELS + 5;
pub const ADDRESS_PANEL6: u8 = ADDRESS_PANELS + 6;
pub const ADDRESS_PANEL7: u8 = ADDRESS_PANELS + 7;
pub const ADDRESS_LON: u8 = ADDRESS_PANELS + 8;
pub const ADDRESS_PANEL8: u8 = ADDRESS_PANELS + 9;
