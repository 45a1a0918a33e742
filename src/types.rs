use crate::errors;
#[cfg(feature = "std")]
use core::fmt::{self, Display};
use core::{iter::FromIterator, result};

#[cfg(feature = "std")]
use std::{
    convert::{TryFrom, TryInto},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

#[cfg(feature = "std")]
use time::{format_description::well_known::Iso8601, OffsetDateTime};

use crate::alloc::{
    string::{String, ToString},
    vec::Vec,
};

/// A time tag in an OSC message consists of two 32-bit integers where the
/// first denotes the number of seconds since 1900-01-01 and the second the
/// fractional seconds. See <http://opensoundcontrol.org/node/3/#timetags>.
///
/// The reserved value `(0, 1)` means "immediately"; `(0, 0)` means
/// "unspecified". The codec treats the value as opaque 8 bytes, no clock
/// arithmetic is performed beyond the `std`-gated conversions below.
///
/// # Examples
///
/// ```
/// #[cfg(feature = "std")]
/// {
///     use oscodec::OscTime;
///     use std::{convert::TryFrom, time::UNIX_EPOCH};
///
///     assert_eq!(
///         OscTime::try_from(UNIX_EPOCH).unwrap(),
///         OscTime::from((2_208_988_800, 0))
///     );
/// }
/// ```
///
/// # Conversions with `(u32, u32)`
///
/// Use [`.into()`](Into::into) to convert between `(u32, u32)` and `OscTime`
/// in either direction.
///
/// # Conversions with [`std::time::SystemTime`]
///
/// An `OscTime` can be converted into a `SystemTime` with
/// [`From`](std::convert::From)/[`Into`](std::convert::Into). A `SystemTime`
/// can be converted into an `OscTime` with
/// [`TryFrom`](std::convert::TryFrom)/[`TryInto`](std::convert::TryInto),
/// fallible because not every `SystemTime` is representable. These
/// conversions are lossy but accurate to within a few nanoseconds round
/// trip, and only support times at or after the Unix epoch (so the math
/// works on 32-bit targets too).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OscTime {
    pub seconds: u32,
    pub fractional: u32,
}

/// Reserved time tag value meaning "invoke immediately".
pub const OSC_TIME_TAG_IMMEDIATE: OscTime = OscTime {
    seconds: 0,
    fractional: 1,
};

/// Sentinel time tag value meaning "unspecified".
pub const OSC_TIME_TAG_ZERO: OscTime = OscTime {
    seconds: 0,
    fractional: 0,
};

#[cfg(feature = "std")]
impl OscTime {
    const UNIX_OFFSET: u64 = 2_208_988_800; // From RFC 5905
    const TWO_POW_32: f64 = (u32::MAX as f64) + 1.0;
    const ONE_OVER_TWO_POW_32: f64 = 1.0 / OscTime::TWO_POW_32;
    const NANOS_PER_SECOND: f64 = 1.0e9;
    const SECONDS_PER_NANO: f64 = 1.0 / OscTime::NANOS_PER_SECOND;
}

#[cfg(feature = "std")]
impl TryFrom<SystemTime> for OscTime {
    type Error = OscTimeError;

    fn try_from(time: SystemTime) -> core::result::Result<OscTime, OscTimeError> {
        let duration_since_epoch = time
            .duration_since(UNIX_EPOCH)
            .map_err(|_| OscTimeError(OscTimeErrorKind::BeforeEpoch))?
            + Duration::new(OscTime::UNIX_OFFSET, 0);
        let seconds = u32::try_from(duration_since_epoch.as_secs())
            .map_err(|_| OscTimeError(OscTimeErrorKind::Overflow))?;
        let nanos = duration_since_epoch.subsec_nanos() as f64;
        let fractional = (nanos * OscTime::SECONDS_PER_NANO * OscTime::TWO_POW_32).round() as u32;
        Ok(OscTime {
            seconds,
            fractional,
        })
    }
}

#[cfg(feature = "std")]
impl From<OscTime> for SystemTime {
    fn from(time: OscTime) -> SystemTime {
        let nanos =
            (time.fractional as f64) * OscTime::ONE_OVER_TWO_POW_32 * OscTime::NANOS_PER_SECOND;
        let duration_since_osc_epoch = Duration::new(time.seconds as u64, nanos.round() as u32);
        let duration_since_unix_epoch =
            duration_since_osc_epoch - Duration::new(OscTime::UNIX_OFFSET, 0);
        UNIX_EPOCH + duration_since_unix_epoch
    }
}

#[cfg(feature = "std")]
impl Display for OscTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time: OffsetDateTime = SystemTime::from(*self).into();
        let formatted = time.format(&Iso8601::DEFAULT).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl From<(u32, u32)> for OscTime {
    fn from(time: (u32, u32)) -> OscTime {
        let (seconds, fractional) = time;
        OscTime {
            seconds,
            fractional,
        }
    }
}

impl From<OscTime> for (u32, u32) {
    fn from(time: OscTime) -> (u32, u32) {
        (time.seconds, time.fractional)
    }
}

#[cfg(feature = "std")]
/// An error returned by conversions involving [`OscTime`].
#[derive(Debug)]
pub struct OscTimeError(OscTimeErrorKind);

#[cfg(feature = "std")]
#[derive(Debug)]
enum OscTimeErrorKind {
    BeforeEpoch,
    Overflow,
}

#[cfg(feature = "std")]
impl Display for OscTimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            OscTimeErrorKind::BeforeEpoch => {
                write!(f, "time is before the unix epoch and cannot be stored")
            }
            OscTimeErrorKind::Overflow => {
                write!(f, "time overflows what OSC time can store")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OscTimeError {}

/// A tagged OSC argument value. See the [OSC 1.0 spec](http://opensoundcontrol.org/spec-1_0)
/// Type Tag String section for the full list of kinds and their wire
/// encoding (padding: zero bytes to a multiple of 4).
#[derive(Clone, Debug, PartialEq)]
pub enum OscType {
    Int(i32),
    Float(f32),
    String(String),
    /// The `S` ("alternate string", a.k.a. "Symbol") type tag. Carries the
    /// exact same wire payload as [`OscType::String`] but a distinct tag
    /// character, so it round-trips as its own variant rather than being
    /// silently merged into `String`.
    StringAlt(String),
    Blob(Vec<u8>),
    // use struct for time tag to avoid destructuring
    Time(OscTime),
    Long(i64),
    Double(f64),
    Char(char),
    Color(OscColor),
    Midi(OscMidiMessage),
    Bool(bool),
    Array(OscArray),
    Nil,
    Inf,
}

macro_rules! value_impl {
    ($(($name:ident, $variant:ident, $ty:ty)),*) => {
        $(
        impl OscType {
            #[allow(dead_code)]
            pub fn $name(self) -> Option<$ty> {
                match self {
                    OscType::$variant(v) => Some(v),
                    _ => None
                }
            }
        }
        impl From<$ty> for OscType {
            fn from(v: $ty) -> Self {
                OscType::$variant(v)
            }
        }
        )*
    }
}
value_impl! {
    (int, Int, i32),
    (float, Float, f32),
    (string, String, String),
    (blob, Blob, Vec<u8>),
    (array, Array, OscArray),
    (long, Long, i64),
    (double, Double, f64),
    (char, Char, char),
    (color, Color, OscColor),
    (midi, Midi, OscMidiMessage),
    (bool, Bool, bool)
}
impl From<(u32, u32)> for OscType {
    fn from(time: (u32, u32)) -> Self {
        OscType::Time(time.into())
    }
}

impl OscType {
    pub fn time(self) -> Option<OscTime> {
        match self {
            OscType::Time(time) => Some(time),
            _ => None,
        }
    }

    /// Build an alternate-string (`S`) argument.
    pub fn string_alt<S: Into<String>>(s: S) -> Self {
        OscType::StringAlt(s.into())
    }

    /// The leading type-tag character for this argument, as it would
    /// appear in a message's type-tag string. For [`OscType::Array`] this
    /// is the begin-array marker `[`; the matching `]` and the tags of the
    /// array's elements are not included (see [`OscType::type_tag_string`]
    /// for the full expansion).
    pub fn leading_tag(&self) -> char {
        match self {
            OscType::Int(_) => 'i',
            OscType::Float(_) => 'f',
            OscType::String(_) => 's',
            OscType::StringAlt(_) => 'S',
            OscType::Blob(_) => 'b',
            OscType::Long(_) => 'h',
            OscType::Time(_) => 't',
            OscType::Double(_) => 'd',
            OscType::Char(_) => 'c',
            OscType::Color(_) => 'r',
            OscType::Midi(_) => 'm',
            OscType::Bool(true) => 'T',
            OscType::Bool(false) => 'F',
            OscType::Array(_) => '[',
            OscType::Nil => 'N',
            OscType::Inf => 'I',
        }
    }

    /// The full sequence of type-tag characters this argument contributes,
    /// including the closing `]` (and any nested tags) for arrays.
    pub fn type_tag_string(&self) -> String {
        match self {
            OscType::Array(arr) => {
                let mut s = String::from("[");
                for item in &arr.content {
                    s.push_str(&item.type_tag_string());
                }
                s.push(']');
                s
            }
            other => other.leading_tag().to_string(),
        }
    }

    /// Number of type-tag characters this argument contributes (counting
    /// the brackets of a nested array), i.e. how much it consumes of
    /// [`crate::limits::MAX_NUMBER_OF_ARGUMENTS`].
    pub fn tag_char_count(&self) -> usize {
        match self {
            OscType::Array(arr) => {
                2 + arr
                    .content
                    .iter()
                    .map(OscType::tag_char_count)
                    .sum::<usize>()
            }
            _ => 1,
        }
    }

    /// Number of payload bytes this argument contributes on the wire,
    /// after 4-byte padding, not counting its type-tag character(s). This
    /// is what is checked against [`crate::limits::MAX_ARGUMENTS_SIZE`].
    pub fn payload_wire_size(&self) -> usize {
        match self {
            OscType::Int(_)
            | OscType::Float(_)
            | OscType::Char(_)
            | OscType::Color(_)
            | OscType::Midi(_) => 4,
            OscType::Long(_) | OscType::Time(_) | OscType::Double(_) => 8,
            OscType::String(s) | OscType::StringAlt(s) => crate::encoder::pad(s.len() as u64 + 1) as usize,
            OscType::Blob(b) => 4 + crate::encoder::pad(b.len() as u64) as usize,
            OscType::Bool(_) | OscType::Nil | OscType::Inf => 0,
            OscType::Array(arr) => arr
                .content
                .iter()
                .map(OscType::payload_wire_size)
                .sum::<usize>(),
        }
    }
}

#[cfg(feature = "std")]
impl Display for OscType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscType::Int(v) => write!(f, "(i) {v}"),
            OscType::Float(v) => write!(f, "(f) {v}"),
            OscType::String(v) => write!(f, "(s) {v}"),
            OscType::StringAlt(v) => write!(f, "(S) {v}"),
            OscType::Blob(v) => {
                f.write_str("(b)")?;
                if v.is_empty() {
                    return Ok(());
                }

                f.write_str(" 0x")?;
                write_hex(f, v)
            }
            OscType::Time(v) => write!(f, "(t) {v}"),
            OscType::Long(v) => write!(f, "(h) {v}"),
            OscType::Double(v) => write!(f, "(d) {v}"),
            OscType::Char(v) => write!(f, "(c) {v}"),
            OscType::Color(v) => write!(f, "(r) {v}"),
            OscType::Midi(v) => write!(f, "(m) {v}"),
            OscType::Bool(v) => f.write_str(if *v { "(T)" } else { "(F)" }),
            OscType::Array(v) => write!(f, "{v}"),
            OscType::Nil => f.write_str("(N)"),
            OscType::Inf => f.write_str("(I)"),
        }
    }
}

#[cfg(feature = "std")]
fn write_hex(f: &mut dyn fmt::Write, v: &Vec<u8>) -> fmt::Result {
    for octet in v {
        write!(f, "{:02X}", octet)?;
    }
    Ok(())
}

#[cfg(feature = "std")]
impl TryFrom<SystemTime> for OscType {
    type Error = OscTimeError;

    fn try_from(time: SystemTime) -> std::result::Result<OscType, OscTimeError> {
        time.try_into().map(OscType::Time)
    }
}

impl<'a> From<&'a str> for OscType {
    fn from(string: &'a str) -> Self {
        OscType::String(string.to_string())
    }
}

/// Represents the parts of a MIDI message. Mainly used for tunneling MIDI
/// over a network using the OSC protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OscMidiMessage {
    pub port: u8,
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
}

#[cfg(feature = "std")]
impl Display for OscMidiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{port:{}, status:0x{:02X}, data:0x{:02X}{:02X}}}",
            self.port, self.status, self.data1, self.data2,
        )
    }
}

/// An *OSC packet* contains either an *OSC message* or a bundle of nested
/// packets, called an *OSC bundle*.
#[derive(Clone, Debug, PartialEq)]
pub enum OscPacket {
    Message(OscMessage),
    Bundle(OscBundle),
}

#[cfg(feature = "std")]
impl Display for OscPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscPacket::Message(m) => m.fmt(f),
            OscPacket::Bundle(b) => b.fmt(f),
        }
    }
}

/// An OSC message consists of an address and zero or more arguments. The
/// address should specify an element of the thing being controlled, and
/// the arguments set properties of that element.
#[derive(Clone, Debug, PartialEq)]
pub struct OscMessage {
    pub addr: String,
    pub args: Vec<OscType>,
}

#[cfg(feature = "std")]
impl Display for OscMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self
            .args
            .iter()
            .map(OscType::to_string)
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "{}, {}", self.addr, args)
    }
}

/// An OSC bundle contains zero or more OSC packets and a time tag. The
/// contained packets *should* be applied at the given time tag.
#[derive(Clone, Debug, PartialEq)]
pub struct OscBundle {
    pub timetag: OscTime,
    pub content: Vec<OscPacket>,
}

#[cfg(feature = "std")]
impl Display for OscBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let content = self
            .content
            .iter()
            .map(OscPacket::to_string)
            .collect::<Vec<String>>()
            .join("; ");
        write!(f, "#bundle {} {{ {} }}", self.timetag, content)
    }
}

/// An RGBA color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OscColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

#[cfg(feature = "std")]
impl Display for OscColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{r},{g},{b},{a}}}",
            r = self.red,
            g = self.green,
            b = self.blue,
            a = self.alpha
        )
    }
}

/// A (possibly nested) array of OSC arguments, delimited on the wire by
/// `[` and `]` type tags.
#[derive(Clone, Debug, PartialEq)]
pub struct OscArray {
    pub content: Vec<OscType>,
}

impl<T: Into<OscType>> FromIterator<T> for OscArray {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> OscArray {
        OscArray {
            content: iter.into_iter().map(T::into).collect(),
        }
    }
}

#[cfg(feature = "std")]
impl Display for OscArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = self
            .content
            .iter()
            .map(OscType::to_string)
            .collect::<Vec<String>>()
            .join(",");
        write!(f, "[{items}]")
    }
}

pub type Result<T> = result::Result<T, errors::OscError>;

impl From<String> for OscMessage {
    fn from(s: String) -> OscMessage {
        OscMessage {
            addr: s,
            args: vec![],
        }
    }
}
impl<'a> From<&'a str> for OscMessage {
    fn from(s: &str) -> OscMessage {
        OscMessage {
            addr: s.to_string(),
            args: vec![],
        }
    }
}
