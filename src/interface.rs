use embedded_hal::serial;
use heapless::spsc::Queue;
use log::warn;

/// Byte stream the device reads telegrams from and writes them to.
pub trait Transport {
    type Error;

    /// Number of bytes that can be read without waiting.
    fn available(&mut self) -> usize;

    /// Takes the next buffered byte.
    fn read_byte(&mut self) -> Option<u8>;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Receive buffer for [`SerialTransport`]; holds `N - 1` bytes.
pub type RxBuffer<const N: usize> = Queue<u8, N>;

/// [`Transport`] over an `embedded-hal` serial port.
///
/// The port is drained into a ring buffer whenever [`Transport::available`]
/// is called. Bytes that arrive while the buffer is full are dropped, so it
/// should hold a few telegrams more than the bus produces between two calls.
pub struct SerialTransport<S, const N: usize = 32>
where
    S: serial::Read<u8> + serial::Write<u8>,
{
    serial: S,
    rx_buffer: RxBuffer<N>,
}

impl<S, const N: usize> SerialTransport<S, N>
where
    S: serial::Read<u8> + serial::Write<u8>,
{
    pub fn new(serial: S) -> Self {
        SerialTransport {
            serial,
            rx_buffer: Queue::new(),
        }
    }

    pub fn release(self) -> S {
        self.serial
    }

    fn drain(&mut self) {
        loop {
            match self.serial.read() {
                Ok(byte) => {
                    if self.rx_buffer.enqueue(byte).is_err() {
                        warn!("receive buffer full, dropped {:#04x}", byte);
                    }
                }
                Err(nb::Error::WouldBlock) => break,
                // framing, parity and overrun errors lose the byte; the
                // telegram decoder resynchronises on the next domain byte
                Err(nb::Error::Other(_)) => warn!("serial read error"),
            }
        }
    }
}

impl<S, const N: usize> Transport for SerialTransport<S, N>
where
    S: serial::Read<u8> + serial::Write<u8>,
{
    type Error = <S as serial::Write<u8>>::Error;

    fn available(&mut self) -> usize {
        self.drain();
        self.rx_buffer.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        if self.rx_buffer.is_empty() {
            self.drain();
        }
        self.rx_buffer.dequeue()
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            nb::block!(self.serial.write(byte))?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        nb::block!(self.serial.flush())
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::Transport;
    use alloc::collections::VecDeque;
    use alloc::vec::Vec;
    use core::convert::Infallible;

    /// In-memory bus: `rx` is what the device will read, `tx` what it wrote.
    #[derive(Debug, Default)]
    pub struct MockBus {
        pub rx: VecDeque<u8>,
        pub tx: Vec<u8>,
        pub flushes: usize,
    }

    impl MockBus {
        pub fn with_rx(bytes: &[u8]) -> Self {
            MockBus {
                rx: bytes.iter().copied().collect(),
                ..Default::default()
            }
        }
    }

    impl Transport for MockBus {
        type Error = Infallible;

        fn available(&mut self) -> usize {
            self.rx.len()
        }

        fn read_byte(&mut self) -> Option<u8> {
            self.rx.pop_front()
        }

        fn write(&mut self, bytes: &[u8]) -> Result<(), Infallible> {
            self.tx.extend_from_slice(bytes);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            self.flushes += 1;
            Ok(())
        }
    }
}
