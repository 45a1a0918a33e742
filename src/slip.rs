//! SLIP (RFC 1055) byte-stuffing framing for OSC packets over a serial or
//! otherwise stream-oriented transport. SLIP framing carries no length
//! prefix: a receiver delimits packets purely by the `END` byte, and
//! tolerates (silently skips) a leading empty frame.

use crate::errors::OscError;
use crate::limits::OSC_SLIP_DECODER_BUFFER_SIZE;

use crate::alloc::vec::Vec;

const END: u8 = 0xC0;
const ESC: u8 = 0xDB;
const ESC_END: u8 = 0xDC;
const ESC_ESC: u8 = 0xDD;

/// Encodes `packet` as a SLIP frame: every literal `END`/`ESC` byte is
/// escaped, and a trailing `END` delimiter is appended.
///
/// # Examples
///
/// ```
/// use oscodec::slip::encode;
///
/// assert_eq!(encode(&[0x01, 0xC0, 0x02]), vec![0x01, 0xDB, 0xDC, 0x02, 0xC0]);
/// ```
pub fn encode(packet: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(packet.len() + 2);
    for &byte in packet {
        match byte {
            END => out.extend_from_slice(&[ESC, ESC_END]),
            ESC => out.extend_from_slice(&[ESC, ESC_ESC]),
            b => out.push(b),
        }
    }
    out.push(END);
    out
}

/// A stateful, byte-at-a-time SLIP frame decoder, for reassembling packets
/// off a serial stream one byte as it arrives.
///
/// The receive buffer is bounded by [`OSC_SLIP_DECODER_BUFFER_SIZE`]. A
/// frame that grows past this bound has its accumulated bytes discarded
/// (not wrapped in place, as the original microcontroller implementation's
/// fixed-size ring buffer does, since this port's buffer is a `Vec` rather
/// than a literal ring) and [`Self::process_byte`] surfaces
/// [`OscError::Capacity`] once the frame's terminating `END` byte is seen,
/// rather than silently handing the caller a truncated frame.
pub struct SlipDecoder<'h> {
    buffer: Vec<u8>,
    overflowed: bool,
    handler: Option<crate::alloc::boxed::Box<dyn FnMut(&[u8]) + 'h>>,
}

impl<'h> SlipDecoder<'h> {
    /// Creates a decoder with no handler registered. [`Self::process_byte`]
    /// returns [`OscError::NoHandler`] on frame completion until
    /// [`Self::set_handler`] is called.
    pub fn new() -> Self {
        SlipDecoder {
            buffer: Vec::new(),
            overflowed: false,
            handler: None,
        }
    }

    /// Registers the closure called with each decoded frame's bytes.
    pub fn set_handler(&mut self, handler: impl FnMut(&[u8]) + 'h) {
        self.handler = Some(crate::alloc::boxed::Box::new(handler));
    }

    /// Feeds one byte received from the stream. Returns `Ok(())` for every
    /// byte that is not a frame terminator, and for a terminator that
    /// completed a valid frame (the registered handler, if any, has already
    /// been called with the frame's bytes by the time this returns).
    pub fn process_byte(&mut self, byte: u8) -> Result<(), OscError> {
        if byte != END {
            if self.buffer.len() >= OSC_SLIP_DECODER_BUFFER_SIZE {
                self.buffer.clear();
                self.overflowed = true;
            }
            self.buffer.push(byte);
            return Ok(());
        }

        let overflowed = self.overflowed;
        let raw = core::mem::take(&mut self.buffer);
        self.overflowed = false;

        if overflowed {
            return Err(OscError::Capacity);
        }
        if raw.is_empty() {
            // Tolerate a leading (or repeated) empty frame.
            return Ok(());
        }

        let frame = unstuff(&raw)?;
        match &mut self.handler {
            Some(handler) => {
                handler(&frame);
                Ok(())
            }
            None => Err(OscError::NoHandler),
        }
    }
}

impl<'h> Default for SlipDecoder<'h> {
    fn default() -> Self {
        Self::new()
    }
}

fn unstuff(raw: &[u8]) -> Result<Vec<u8>, OscError> {
    let mut out = Vec::with_capacity(raw.len());
    let mut bytes = raw.iter().copied();
    while let Some(b) = bytes.next() {
        if b == ESC {
            match bytes.next() {
                Some(ESC_END) => out.push(END),
                Some(ESC_ESC) => out.push(ESC),
                _ => return Err(OscError::InvalidEscape),
            }
        } else {
            out.push(b);
        }
    }
    Ok(out)
}
