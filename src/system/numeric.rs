//! Numeric parameter parsing for command handlers.

use super::error::Error;

/// Parse an unsigned decimal number.
///
/// Returns [`Error::MalformedNumericParameter`] for an empty token or any
/// non-digit, and [`Error::OutOfRange`] when the value does not fit a `u32`.
///
/// ```rust
/// use diagshell::system::error::Error;
/// use diagshell::system::numeric::parse_decimal;
///
/// assert_eq!(parse_decimal(b"42"), Ok(42));
/// assert_eq!(parse_decimal(b"4x2"), Err(Error::MalformedNumericParameter));
/// ```
pub fn parse_decimal(token: &[u8]) -> Result<u32, Error> {
    if token.is_empty() {
        return Err(Error::MalformedNumericParameter);
    }

    token.iter().try_fold(0u32, |value, &byte| {
        if !byte.is_ascii_digit() {
            return Err(Error::MalformedNumericParameter);
        }
        value
            .checked_mul(10)
            .and_then(|value| value.checked_add(u32::from(byte - b'0')))
            .ok_or(Error::OutOfRange)
    })
}

/// Parse an unsigned hexadecimal number, with or without a `0x` prefix.
///
/// Digits are case-insensitive. Errors as for [`parse_decimal`].
pub fn parse_hex(token: &[u8]) -> Result<u32, Error> {
    let digits = match token {
        [b'0', b'x' | b'X', rest @ ..] => rest,
        _ => token,
    };
    if digits.is_empty() {
        return Err(Error::MalformedNumericParameter);
    }

    digits.iter().try_fold(0u32, |value, &byte| {
        let nibble = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'f' => byte - b'a' + 10,
            b'A'..=b'F' => byte - b'A' + 10,
            _ => return Err(Error::MalformedNumericParameter),
        };
        value
            .checked_mul(16)
            .map(|value| value | u32::from(nibble))
            .ok_or(Error::OutOfRange)
    })
}
