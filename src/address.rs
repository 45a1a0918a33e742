//! Address pattern validation.
//!
//! Pattern matching against an address space (wildcards, character classes,
//! `{a,b}` alternatives) is OSC 1.1 territory and out of scope here. This
//! module only checks the two rules the wire format itself requires: an
//! address pattern is a non-empty string starting with `/`.

use crate::errors::OscError;
use crate::limits::MAX_OSC_ADDRESS_PATTERN_LENGTH;

use crate::alloc::string::{String, ToString};

/// Verify that `pattern` is a well-formed OSC address pattern: non-empty,
/// starting with `/`, and within [`MAX_OSC_ADDRESS_PATTERN_LENGTH`].
///
/// # Examples
///
/// ```
/// use oscodec::address::verify_address_pattern;
///
/// verify_address_pattern("/oscillator/1/frequency").unwrap();
/// assert!(verify_address_pattern("").is_err());
/// assert!(verify_address_pattern("oscillator").is_err());
/// ```
pub fn verify_address_pattern(pattern: &str) -> Result<(), OscError> {
    if pattern.is_empty() {
        return Err(OscError::InvalidAddress(
            "address pattern must not be empty".to_string(),
        ));
    }
    if !pattern.starts_with('/') {
        return Err(OscError::InvalidAddress(
            "address pattern must start with '/'".to_string(),
        ));
    }
    if pattern.len() > MAX_OSC_ADDRESS_PATTERN_LENGTH {
        return Err(OscError::Capacity);
    }
    Ok(())
}

/// Append `part` to an address pattern being built up incrementally,
/// mirroring the original `OscMessageAppendAddressPattern` semantics: the
/// combined length is capacity-checked but the result is not otherwise
/// validated until the message is finalized.
///
/// # Examples
///
/// ```
/// use oscodec::address::append_address_pattern;
///
/// let mut addr = String::new();
/// append_address_pattern(&mut addr, "/example").unwrap();
/// append_address_pattern(&mut addr, "/address").unwrap();
/// assert_eq!(addr, "/example/address");
/// ```
pub fn append_address_pattern(pattern: &mut String, part: &str) -> Result<(), OscError> {
    if pattern.len() + part.len() > MAX_OSC_ADDRESS_PATTERN_LENGTH {
        return Err(OscError::Capacity);
    }
    pattern.push_str(part);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_address() {
        verify_address_pattern("/tempo").unwrap();
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            verify_address_pattern(""),
            Err(OscError::InvalidAddress(
                "address pattern must not be empty".to_string()
            ))
        );
    }

    #[test]
    fn rejects_missing_leading_slash() {
        assert!(verify_address_pattern("tempo").is_err());
    }

    #[test]
    fn append_builds_incrementally() {
        let mut addr = String::new();
        append_address_pattern(&mut addr, "/oscillator").unwrap();
        append_address_pattern(&mut addr, "/1").unwrap();
        append_address_pattern(&mut addr, "/frequency").unwrap();
        assert_eq!(addr, "/oscillator/1/frequency");
    }

    #[test]
    fn append_rejects_over_capacity() {
        let mut addr = "/".to_string();
        addr.push_str(&"a".repeat(MAX_OSC_ADDRESS_PATTERN_LENGTH));
        let err = append_address_pattern(&mut addr, "/more");
        assert_eq!(err, Err(OscError::Capacity));
    }
}
