//! Helpers for building and measuring [`OscBundle`]s with the capacity
//! accounting the original C `OscBundle` struct performs as messages are
//! added, rather than only discovering an oversized bundle at serialize
//! time.

use crate::errors::OscError;
use crate::limits::{MAX_OSC_BUNDLE_ELEMENTS_SIZE, MAX_OSC_BUNDLE_SIZE, MIN_OSC_BUNDLE_SIZE};
use crate::types::{OscBundle, OscPacket, OscTime};

use crate::alloc::vec::Vec;

/// Size, in bytes, a serialized [`OscPacket`] element will occupy within a
/// bundle, including its 4-byte length prefix.
fn element_size(packet: &OscPacket) -> usize {
    4 + match packet {
        OscPacket::Message(m) => crate::message::size(m),
        OscPacket::Bundle(b) => size(b),
    }
}

/// Total size, in bytes, of `bundle`'s element region (the part counted
/// against [`MAX_OSC_BUNDLE_ELEMENTS_SIZE`]).
fn elements_size(bundle: &OscBundle) -> usize {
    bundle.content.iter().map(element_size).sum()
}

/// Computes the exact size, in bytes, that serializing `bundle` will
/// produce: the `#bundle\0` header, the time tag, and every element.
pub fn size(bundle: &OscBundle) -> usize {
    MIN_OSC_BUNDLE_SIZE + elements_size(bundle)
}

/// Remaining room, in bytes, for more elements before
/// [`MAX_OSC_BUNDLE_ELEMENTS_SIZE`] is reached.
pub fn remaining_capacity(bundle: &OscBundle) -> usize {
    MAX_OSC_BUNDLE_ELEMENTS_SIZE.saturating_sub(elements_size(bundle))
}

/// Whether `bundle` contains no elements. Its time tag is unaffected.
pub fn is_empty(bundle: &OscBundle) -> bool {
    bundle.content.is_empty()
}

/// Discards all of `bundle`'s elements, leaving its time tag untouched.
pub fn empty(bundle: &mut OscBundle) {
    bundle.content.clear();
}

/// Appends a message or nested bundle to `bundle`, rejecting the addition
/// with [`OscError::Capacity`] if it would not fit in the remaining space.
pub fn append_contents(bundle: &mut OscBundle, contents: OscPacket) -> Result<(), OscError> {
    let added = element_size(&contents);
    if added > remaining_capacity(bundle) {
        return Err(OscError::Capacity);
    }
    bundle.content.push(contents);
    Ok(())
}

/// Creates a new, empty bundle with the given time tag.
pub fn new(timetag: OscTime) -> OscBundle {
    OscBundle {
        timetag,
        content: Vec::new(),
    }
}

/// Serializes `bundle`, enforcing [`MIN_OSC_BUNDLE_SIZE`] and
/// [`MAX_OSC_BUNDLE_SIZE`].
pub fn serialize(bundle: &OscBundle) -> Result<Vec<u8>, OscError> {
    let expected = size(bundle);
    if expected < MIN_OSC_BUNDLE_SIZE {
        return Err(OscError::Truncated);
    }
    if expected > MAX_OSC_BUNDLE_SIZE {
        return Err(OscError::Capacity);
    }
    let mut bytes = Vec::with_capacity(expected);
    crate::encoder::encode_bundle(bundle, &mut bytes).expect("Vec<u8> output is infallible");
    Ok(bytes)
}
