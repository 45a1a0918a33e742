//! **oscodec** is an implementation of the [OSC 1.0](http://opensoundcontrol.org/spec-1_0)
//! protocol in pure Rust: argument encoding, messages, bundles, a depth-first
//! packet visitor, and SLIP transport framing.
//!

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as core;
#[cfg(feature = "std")]
#[macro_use]
extern crate std as alloc;

extern crate byteorder;
extern crate nom;

/// Crate specific error types.
mod errors;
/// Fixed capacity constants enforced by the codec.
mod limits;
/// OSC data types, see [OSC 1.0 specification](https://opensoundcontrol.stanford.edu/spec-1_0.html) for details.
mod types;

pub use crate::errors::*;
pub use crate::limits::*;
pub use crate::types::*;

/// Address pattern validation.
pub mod address;
/// Builds and measures OSC bundles.
pub mod bundle;
/// Provides a decoding method for OSC packets.
pub mod decoder;
/// Encodes an `OscPacket` to a byte vector.
pub mod encoder;
/// Builds OSC messages and reads their arguments back out.
pub mod message;
/// Serializes/parses top-level packets and visits the messages within.
pub mod packet;
/// SLIP transport framing.
pub mod slip;
