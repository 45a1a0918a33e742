use core::fmt::{self, Display};

use crate::alloc::string::String;

/// Crate-wide error type.
///
/// Every fallible codec operation returns one of these discriminants; none
/// of them carry partially-applied state back to the caller (a failed
/// write leaves the destination's observable size unchanged, a failed read
/// leaves both cursors where they were).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OscError {
    /// A write would exceed a fixed capacity (message argument count,
    /// argument payload size, bundle element size, packet size, or a SLIP
    /// encode/decode destination).
    Capacity,
    /// Input bytes ended before a required field (an OSC-string's
    /// terminating null, an argument's payload, a bundle element's
    /// contents) could be read in full.
    Truncated,
    /// A size was not a multiple of 4: the overall input, or a bundle
    /// element's length prefix.
    Misaligned,
    /// An address pattern was empty or did not start with `/`.
    InvalidAddress(String),
    /// Top-level or nested packet contents were neither a message (`/`)
    /// nor a bundle (`#`).
    InvalidContents,
    /// A SLIP `ESC` byte was followed by a byte other than `ESC_END` or
    /// `ESC_ESC`.
    InvalidEscape,
    /// An argument reader was asked for a type that does not match the
    /// current type-tag character.
    UnexpectedType { expected: char, found: char },
    /// A bundle element size, or a blob's declared length, was negative.
    NegativeSize,
    /// Packet processing or SLIP decoding was invoked without a handler
    /// registered to receive the result.
    NoHandler,
}

impl Display for OscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscError::Capacity => write!(f, "operation would exceed a fixed capacity"),
            OscError::Truncated => write!(f, "input ended before a required field was complete"),
            OscError::Misaligned => write!(f, "size is not a multiple of 4 bytes"),
            OscError::InvalidAddress(reason) => write!(f, "invalid OSC address: {reason}"),
            OscError::InvalidContents => {
                write!(f, "packet contents are neither a message nor a bundle")
            }
            OscError::InvalidEscape => write!(f, "invalid SLIP escape sequence"),
            OscError::UnexpectedType { expected, found } => write!(
                f,
                "expected argument type tag '{expected}', found '{found}'"
            ),
            OscError::NegativeSize => write!(f, "a declared size was negative"),
            OscError::NoHandler => write!(f, "no handler registered to receive the result"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OscError {}

pub type Result<T> = core::result::Result<T, OscError>;

/// Lets `OscError` stand in directly as `nom`'s error type, so the decoder's
/// parser combinators return `IResult<&[u8], T, OscError>` without an extra
/// wrapper type. `nom`'s own error-kind detail is discarded; every
/// combinator failure is normalized to [`OscError::Truncated`], and the call
/// sites that need a more specific variant (`Misaligned`, `NegativeSize`,
/// `InvalidContents`, ...) produce it explicitly rather than relying on this
/// impl.
impl<I> nom::error::ParseError<I> for OscError {
    fn from_error_kind(_input: I, _kind: nom::error::ErrorKind) -> Self {
        OscError::Truncated
    }

    fn append(_input: I, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}
