//! Common error types for serial port drivers

/// A common error type for serial port drivers.
///
/// Drivers are free to use their own error type through
/// [`SerialPort::Error`](super::SerialPort::Error); this one covers the usual
/// UART failure modes and is simple and portable for `no_std` environments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A read was attempted while no byte was waiting.
    NotReady,
    /// The receiver overwrote a byte before it was read.
    Overrun,
    /// A framing or parity error was detected on the line.
    Framing,
    /// The transmitter rejected a byte.
    WriteError,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::NotReady => defmt::write!(f, "NotReady"),
            Error::Overrun => defmt::write!(f, "Overrun"),
            Error::Framing => defmt::write!(f, "Framing"),
            Error::WriteError => defmt::write!(f, "WriteError"),
        }
    }
}
