use thiserror::Error;

use crate::property::Property;

/// Errors from outbound operations.
///
/// `E` is the error type of the [`Transport`](crate::interface::Transport).
/// Malformed input never shows up here; the receive path reports it through
/// [`Reception`](crate::device::Reception) and the diagnostic callbacks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error<E> {
    #[error("fan speed {0} is outside 1..=8")]
    InvalidFanSpeed(u8),

    #[error("fan adjustment {0}% is outside 0..=100")]
    InvalidAdjustment(u8),

    /// Derived properties, and properties outside the active profile.
    #[error("{0:?} cannot be polled")]
    NotPollable(Property),

    #[error("transport error: {0:?}")]
    Transport(E),
}

pub type Result<T, E> = core::result::Result<T, Error<E>>;
