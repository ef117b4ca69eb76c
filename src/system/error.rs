//! Error types for the command shell

/// Everything that can go wrong between a keystroke and a command handler.
///
/// None of these are fatal. The shell turns each one into a diagnostic line
/// on the serial port (see [`message`](Self::message)) and goes back to
/// waiting for the next line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The line buffer is full; the keystroke was dropped.
    BufferOverflow,
    /// No command table entry matches the command token.
    Unrecognized,
    /// More parameters than the command accepts.
    ParamCountInvalid,
    /// A parameter that should be a number contains something else.
    MalformedNumericParameter,
    /// A handler needed a parameter that was not supplied.
    MissingParameter,
    /// A numeric parameter parsed but is outside the accepted range.
    OutOfRange,
}

impl Error {
    /// The diagnostic text printed for this error.
    pub fn message(&self) -> &'static str {
        match self {
            Error::BufferOverflow => "Line too long",
            Error::Unrecognized => "Unrecognized command",
            Error::ParamCountInvalid => "Invalid parameter count",
            Error::MalformedNumericParameter => "Malformed numeric parameter",
            Error::MissingParameter => "Missing parameter",
            Error::OutOfRange => "Parameter out of range",
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
            Error::Unrecognized => defmt::write!(f, "Unrecognized"),
            Error::ParamCountInvalid => defmt::write!(f, "ParamCountInvalid"),
            Error::MalformedNumericParameter => defmt::write!(f, "MalformedNumericParameter"),
            Error::MissingParameter => defmt::write!(f, "MissingParameter"),
            Error::OutOfRange => defmt::write!(f, "OutOfRange"),
        }
    }
}
