//! A builder for constructing [`OscMessage`]s incrementally with the same
//! capacity checks the wire format ultimately requires, plus a cursor-based
//! reader for pulling typed arguments back out.

use crate::address;
use crate::errors::OscError;
use crate::limits::{MAX_ARGUMENTS_SIZE, MAX_NUMBER_OF_ARGUMENTS, MAX_OSC_MESSAGE_SIZE, MIN_OSC_MESSAGE_SIZE};
use crate::types::{OscArray, OscColor, OscMessage, OscMidiMessage, OscTime, OscType};

use crate::alloc::{string::String, vec::Vec};

/// Builds an [`OscMessage`] one argument at a time, enforcing
/// [`MAX_NUMBER_OF_ARGUMENTS`] and [`MAX_ARGUMENTS_SIZE`] as arguments are
/// added (mirroring `OscMessageAdd*`), rather than only discovering an
/// oversized message at serialize time.
#[derive(Clone, Debug, PartialEq)]
pub struct OscMessageBuilder {
    addr: String,
    args: Vec<OscType>,
    stack: Vec<Vec<OscType>>,
    tag_chars: usize,
    payload_bytes: usize,
}

impl OscMessageBuilder {
    /// Starts a new builder with the given address pattern.
    pub fn new(addr: &str) -> Result<Self, OscError> {
        address::verify_address_pattern(addr)?;
        Ok(OscMessageBuilder {
            addr: String::from(addr),
            args: Vec::new(),
            stack: Vec::new(),
            tag_chars: 0,
            payload_bytes: 0,
        })
    }

    /// Appends a further part to the address pattern, e.g. building
    /// `/oscillator/1/frequency` out of three calls.
    pub fn append_address(&mut self, part: &str) -> Result<(), OscError> {
        address::append_address_pattern(&mut self.addr, part)
    }

    /// Adds an argument, enforcing the message's capacity limits. While a
    /// [`Self::begin_array`] is open, the argument is added to the array's
    /// content instead of the message's top-level argument list.
    pub fn add_arg<T: Into<OscType>>(&mut self, arg: T) -> Result<(), OscError> {
        let arg = arg.into();
        let tag_chars = self.tag_chars + arg.tag_char_count();
        let payload_bytes = self.payload_bytes + arg.payload_wire_size();
        if tag_chars > MAX_NUMBER_OF_ARGUMENTS {
            return Err(OscError::Capacity);
        }
        if payload_bytes > MAX_ARGUMENTS_SIZE {
            return Err(OscError::Capacity);
        }
        self.tag_chars = tag_chars;
        self.payload_bytes = payload_bytes;
        self.args.push(arg);
        Ok(())
    }

    /// Opens a nested array; subsequent [`Self::add_arg`] calls append to
    /// the array until a matching [`Self::end_array`].
    pub fn begin_array(&mut self) -> Result<(), OscError> {
        if self.tag_chars + 1 > MAX_NUMBER_OF_ARGUMENTS {
            return Err(OscError::Capacity);
        }
        self.tag_chars += 1;
        self.stack.push(core::mem::take(&mut self.args));
        Ok(())
    }

    /// Closes the innermost open array, folding it into an [`OscType::Array`]
    /// argument of the enclosing frame.
    pub fn end_array(&mut self) -> Result<(), OscError> {
        if self.tag_chars + 1 > MAX_NUMBER_OF_ARGUMENTS {
            return Err(OscError::Capacity);
        }
        self.tag_chars += 1;
        let content = core::mem::replace(&mut self.args, Vec::new());
        match self.stack.pop() {
            Some(mut parent) => {
                parent.push(OscType::Array(OscArray { content }));
                self.args = parent;
                Ok(())
            }
            None => Err(OscError::InvalidContents),
        }
    }

    /// Finishes the message. Returns [`OscError::InvalidContents`] if an
    /// array was left open.
    pub fn build(self) -> Result<OscMessage, OscError> {
        if !self.stack.is_empty() {
            return Err(OscError::InvalidContents);
        }
        Ok(OscMessage {
            addr: self.addr,
            args: self.args,
        })
    }
}

/// Computes the exact size, in bytes, that serializing `msg` will produce.
pub fn size(msg: &OscMessage) -> usize {
    let addr_len = crate::encoder::pad(msg.addr.len() as u64 + 1) as usize;
    let tags: usize = msg.args.iter().map(OscType::tag_char_count).sum();
    let tag_string_len = crate::encoder::pad(tags as u64 + 2) as usize; // leading ','
    let payload: usize = msg.args.iter().map(OscType::payload_wire_size).sum();
    addr_len + tag_string_len + payload
}

/// Serializes `msg`, enforcing [`MIN_OSC_MESSAGE_SIZE`] and
/// [`MAX_OSC_MESSAGE_SIZE`].
pub fn serialize(msg: &OscMessage) -> Result<Vec<u8>, OscError> {
    let expected = size(msg);
    if expected < MIN_OSC_MESSAGE_SIZE {
        return Err(OscError::Truncated);
    }
    if expected > MAX_OSC_MESSAGE_SIZE {
        return Err(OscError::Capacity);
    }
    let mut bytes = Vec::with_capacity(expected);
    crate::encoder::encode_message(msg, &mut bytes).expect("Vec<u8> output is infallible");
    Ok(bytes)
}

/// A cursor over an [`OscMessage`]'s arguments, offering type-checked,
/// positional reads. Each `get_*` method checks the argument at the current
/// position against the requested kind; on a mismatch it returns
/// [`OscError::UnexpectedType`] and leaves the cursor untouched, so the
/// caller can retry with [`Self::current_tag`] to decide what to do next.
#[derive(Clone, Copy, Debug)]
pub struct ArgReader<'a> {
    args: &'a [OscType],
    pos: usize,
}

impl<'a> ArgReader<'a> {
    pub fn new(args: &'a [OscType]) -> Self {
        ArgReader { args, pos: 0 }
    }

    /// Whether another argument remains to be read.
    pub fn argument_available(&self) -> bool {
        self.pos < self.args.len()
    }

    /// The type-tag character of the argument at the current position,
    /// without consuming it.
    pub fn current_tag(&self) -> Option<char> {
        self.args.get(self.pos).map(OscType::leading_tag)
    }

    /// Advances past the current argument without inspecting its value.
    pub fn skip_argument(&mut self) -> Result<(), OscError> {
        if !self.argument_available() {
            return Err(OscError::Truncated);
        }
        self.pos += 1;
        Ok(())
    }

    fn expect<T>(&mut self, tag: char, extract: impl FnOnce(&'a OscType) -> Option<T>) -> Result<T, OscError> {
        let arg = self.args.get(self.pos).ok_or(OscError::Truncated)?;
        match extract(arg) {
            Some(v) => {
                self.pos += 1;
                Ok(v)
            }
            None => Err(OscError::UnexpectedType {
                expected: tag,
                found: arg.leading_tag(),
            }),
        }
    }

    pub fn get_int(&mut self) -> Result<i32, OscError> {
        self.expect('i', |a| match a {
            OscType::Int(v) => Some(*v),
            _ => None,
        })
    }

    pub fn get_float(&mut self) -> Result<f32, OscError> {
        self.expect('f', |a| match a {
            OscType::Float(v) => Some(*v),
            _ => None,
        })
    }

    pub fn get_string(&mut self) -> Result<&'a str, OscError> {
        self.expect('s', |a| match a {
            OscType::String(v) => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn get_string_alt(&mut self) -> Result<&'a str, OscError> {
        self.expect('S', |a| match a {
            OscType::StringAlt(v) => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn get_blob(&mut self) -> Result<&'a [u8], OscError> {
        self.expect('b', |a| match a {
            OscType::Blob(v) => Some(v.as_slice()),
            _ => None,
        })
    }

    pub fn get_long(&mut self) -> Result<i64, OscError> {
        self.expect('h', |a| match a {
            OscType::Long(v) => Some(*v),
            _ => None,
        })
    }

    pub fn get_time(&mut self) -> Result<OscTime, OscError> {
        self.expect('t', |a| match a {
            OscType::Time(v) => Some(*v),
            _ => None,
        })
    }

    pub fn get_double(&mut self) -> Result<f64, OscError> {
        self.expect('d', |a| match a {
            OscType::Double(v) => Some(*v),
            _ => None,
        })
    }

    pub fn get_char(&mut self) -> Result<char, OscError> {
        self.expect('c', |a| match a {
            OscType::Char(v) => Some(*v),
            _ => None,
        })
    }

    pub fn get_color(&mut self) -> Result<OscColor, OscError> {
        self.expect('r', |a| match a {
            OscType::Color(v) => Some(v.clone()),
            _ => None,
        })
    }

    pub fn get_midi(&mut self) -> Result<OscMidiMessage, OscError> {
        self.expect('m', |a| match a {
            OscType::Midi(v) => Some(v.clone()),
            _ => None,
        })
    }

    pub fn get_bool(&mut self) -> Result<bool, OscError> {
        let arg = self.args.get(self.pos).ok_or(OscError::Truncated)?;
        match arg {
            OscType::Bool(v) => {
                self.pos += 1;
                Ok(*v)
            }
            _ => Err(OscError::UnexpectedType {
                expected: 'T',
                found: arg.leading_tag(),
            }),
        }
    }

    pub fn get_nil(&mut self) -> Result<(), OscError> {
        self.expect('N', |a| match a {
            OscType::Nil => Some(()),
            _ => None,
        })
    }

    pub fn get_inf(&mut self) -> Result<(), OscError> {
        self.expect('I', |a| match a {
            OscType::Inf => Some(()),
            _ => None,
        })
    }

    /// Returns a reader over a nested array's content, consuming the array
    /// argument at the current position.
    pub fn get_array(&mut self) -> Result<ArgReader<'a>, OscError> {
        self.expect('[', |a| match a {
            OscType::Array(v) => Some(ArgReader::new(&v.content)),
            _ => None,
        })
    }
}
