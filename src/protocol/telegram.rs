use core::fmt;

use nom::bytes::complete::tag;
use nom::number::complete::u8 as byte;
use nom::sequence::tuple;
use nom::IResult;
use thiserror::Error;

use super::encoding::{Encodable, EncodingError};
use super::variable::Variable;
use super::{DOMAIN, TELEGRAM_LENGTH};

const DOMAIN_TAG: &[u8] = &[DOMAIN];

/// One six byte bus message.
///
/// ```text
/// 01 21 11 00 A3 D6
/// |  |  |  |  |  |
/// |  |  |  |  |  checksum: sum of the first five bytes, mod 256
/// |  |  |  |  argument: polled variable, or the value
/// |  |  |  command: 0 = poll, anything else is a variable
/// |  |  receiver
/// |  sender
/// domain, always 1
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Telegram {
    pub sender: u8,
    pub receiver: u8,
    pub command: u8,
    pub argument: u8,
    checksum: u8,
}

#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum TelegramError {
    #[error("fewer than 6 bytes buffered")]
    Incomplete,

    /// The first byte is not the domain byte. Only that byte is consumed.
    #[error("unexpected byte {0:#04x} where the domain byte was expected")]
    UnexpectedByte(u8),

    /// The whole frame is consumed; `telegram` carries the received checksum.
    #[error("checksum mismatch in [{telegram}], expected {expected:#04x}")]
    ChecksumMismatch { telegram: Telegram, expected: u8 },
}

impl TelegramError {
    /// Number of input bytes the failed parse used up.
    pub fn consumed(&self) -> usize {
        match self {
            TelegramError::Incomplete => 0,
            TelegramError::UnexpectedByte(_) => 1,
            TelegramError::ChecksumMismatch { .. } => TELEGRAM_LENGTH,
        }
    }
}

/// Sum of domain, sender, receiver, command and argument, mod 256.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .take(TELEGRAM_LENGTH - 1)
        .fold(0u8, |acc, b| acc.wrapping_add(*b))
}

fn fields(input: &[u8]) -> IResult<&[u8], (u8, u8, u8, u8, u8)> {
    let (input, _) = tag(DOMAIN_TAG)(input)?;
    tuple((byte, byte, byte, byte, byte))(input)
}

impl Telegram {
    pub fn new(sender: u8, receiver: u8, command: u8, argument: u8) -> Self {
        let checksum = checksum(&[DOMAIN, sender, receiver, command, argument]);
        Self {
            sender,
            receiver,
            command,
            argument,
            checksum,
        }
    }

    /// A request asking `receiver` to answer with the current value of `variable`.
    pub fn poll(sender: u8, receiver: u8, variable: Variable) -> Self {
        Self::new(sender, receiver, Variable::Poll.code(), variable.code())
    }

    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// The variable named by the command byte, if it is one we know.
    pub fn variable(&self) -> Option<Variable> {
        Variable::from_code(self.command)
    }

    pub fn is_poll(&self) -> bool {
        self.command == Variable::Poll.code()
    }

    fn expected_checksum(&self) -> u8 {
        checksum(&[DOMAIN, self.sender, self.receiver, self.command, self.argument])
    }

    pub fn validate_checksum(&self) -> bool {
        self.expected_checksum() == self.checksum
    }

    pub fn to_bytes(&self) -> [u8; TELEGRAM_LENGTH] {
        [
            DOMAIN,
            self.sender,
            self.receiver,
            self.command,
            self.argument,
            self.checksum,
        ]
    }

    /// Parses one telegram from the start of `data`.
    ///
    /// Needs at least six bytes. On an unexpected first byte the caller should
    /// skip exactly one byte and try again; see [`TelegramError::consumed`].
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8]), TelegramError> {
        if data.len() < TELEGRAM_LENGTH {
            return Err(TelegramError::Incomplete);
        }

        let (remaining, (sender, receiver, command, argument, checksum)) =
            fields(data).map_err(|_| TelegramError::UnexpectedByte(data[0]))?;

        let telegram = Self {
            sender,
            receiver,
            command,
            argument,
            checksum,
        };

        if telegram.validate_checksum() {
            Ok((telegram, remaining))
        } else {
            Err(TelegramError::ChecksumMismatch {
                expected: telegram.expected_checksum(),
                telegram,
            })
        }
    }
}

impl Encodable for Telegram {
    fn encode<'a>(&self, into: &'a mut [u8]) -> Result<&'a [u8], EncodingError> {
        if into.len() != TELEGRAM_LENGTH {
            return Err(EncodingError {
                expected: TELEGRAM_LENGTH,
                actual: into.len(),
            });
        }
        into.copy_from_slice(&self.to_bytes());
        Ok(into)
    }
}

impl fmt::Display for Telegram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [domain, sender, receiver, command, argument, checksum] = self.to_bytes();
        write!(
            f,
            "{domain:02X} {sender:02X} {receiver:02X} {command:02X} {argument:02X} {checksum:02X}"
        )
    }
}
