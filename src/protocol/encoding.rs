use thiserror::Error;

/// The destination buffer does not have the size the value encodes to.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("buffer of {actual} bytes cannot hold {expected} encoded bytes")]
pub struct EncodingError {
    pub expected: usize,
    pub actual: usize,
}

pub trait Encodable {
    fn encode<'a>(&self, into: &'a mut [u8]) -> Result<&'a [u8], EncodingError>;
}

/// Values that travel in the single argument byte of a telegram.
pub trait OneByteEncodable {
    fn encoded_as_byte(&self) -> u8;
}

#[macro_export]
macro_rules! one_byte_encodable {
    ( $( $ty:ty ),* ) => {
        $(
            impl $crate::protocol::encoding::Encodable for $ty {
                fn encode<'a>(
                    &self,
                    into: &'a mut [u8],
                ) -> Result<&'a [u8], $crate::protocol::encoding::EncodingError> {
                    if into.len() != 1 {
                        return Err($crate::protocol::encoding::EncodingError {
                            expected: 1,
                            actual: into.len(),
                        });
                    }
                    into[0] = $crate::protocol::encoding::OneByteEncodable::encoded_as_byte(self);
                    Ok(into)
                }
            }
        )*
    }
}
