//! Fixed capacity constants enforced by the codec.
//!
//! These mirror the `#define`d capacities of the original C implementation
//! this crate is modeled on: the codec never grows a buffer past these
//! bounds, and every builder/parser operation that would exceed one returns
//! [`crate::OscError::Capacity`] instead. Unlike the C original, the
//! underlying storage (`String`/`Vec`) is heap-allocated and grows on
//! demand, and these constants are checked explicitly rather than being the
//! size of a fixed array.

/// Maximum length, in bytes, of an OSC address pattern (not counting the
/// null terminator).
pub const MAX_OSC_ADDRESS_PATTERN_LENGTH: usize = 255;

/// Maximum number of positional arguments a single message may carry
/// (excluding the leading comma of the type-tag string).
pub const MAX_NUMBER_OF_ARGUMENTS: usize = 64;

/// Maximum combined size, in bytes, of a message's argument payload region
/// (after type-tag-string decoding, before any bundle/packet framing).
pub const MAX_ARGUMENTS_SIZE: usize = 4096;

/// Maximum combined size, in bytes, of a bundle's element region (the
/// concatenation of `{size, contents}` pairs, not counting the bundle's own
/// header and time tag).
pub const MAX_OSC_BUNDLE_ELEMENTS_SIZE: usize = 8192;

/// Maximum size, in bytes, of a single top-level OSC packet.
pub const MAX_OSC_PACKET_SIZE: usize = 8192 + 16;

/// Maximum size, in bytes, of a serialized message (address + type tags +
/// arguments).
pub const MAX_OSC_MESSAGE_SIZE: usize = MAX_OSC_ADDRESS_PATTERN_LENGTH + 4 + MAX_ARGUMENTS_SIZE;

/// Maximum size, in bytes, of a serialized bundle (header + time tag +
/// elements).
pub const MAX_OSC_BUNDLE_SIZE: usize = 16 + MAX_OSC_BUNDLE_ELEMENTS_SIZE;

/// Smallest possible valid serialized message: a one-byte address pattern
/// (`/`, padded to 4) followed by an empty type-tag string (`,`, padded to
/// 4).
pub const MIN_OSC_MESSAGE_SIZE: usize = 8;

/// Smallest possible valid serialized bundle: header + time tag, no
/// elements.
pub const MIN_OSC_BUNDLE_SIZE: usize = 16;

/// Receive buffer size for the SLIP byte-at-a-time decoder. A frame longer
/// than this has its accumulated bytes discarded and surfaces
/// [`crate::OscError::Capacity`] instead of a truncated frame (see
/// [`crate::slip::SlipDecoder`]).
pub const OSC_SLIP_DECODER_BUFFER_SIZE: usize = MAX_OSC_PACKET_SIZE * 2;
