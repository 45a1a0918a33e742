//! Decodes a byte slice into an [`OscPacket`].

use crate::address;
use crate::errors::OscError;
use crate::limits::{MAX_NUMBER_OF_ARGUMENTS, MIN_OSC_BUNDLE_SIZE, MIN_OSC_MESSAGE_SIZE};
use crate::types::{OscArray, OscBundle, OscColor, OscMessage, OscMidiMessage, OscPacket, OscTime, OscType};

use crate::alloc::{
    string::{String, ToString},
    vec::Vec,
};

use nom::bytes::complete::{take, take_till};
use nom::combinator::{map, map_res};
use nom::multi::many0;
use nom::number::complete::{be_f32, be_f64, be_i32, be_i64, be_u32};
use nom::sequence::{terminated, tuple};
use nom::{IResult, Offset};

type DResult<'a, T> = IResult<&'a [u8], T, OscError>;

/// Decodes a byte slice into an [`OscPacket`].
///
/// The top-level input must be at least [`MIN_OSC_MESSAGE_SIZE`] bytes and
/// its length must be a multiple of 4 ([`OscError::Misaligned`]), matching
/// the wire requirement that every OSC-string/argument region is
/// 4-byte-aligned.
///
/// # Examples
///
/// ```
/// use oscodec::decoder::decode;
/// use oscodec::{OscMessage, OscPacket};
///
/// let bytes = hex::decode("2f6900002c690000000003e8").unwrap();
/// let packet = decode(&bytes).unwrap();
/// assert_eq!(
///     packet,
///     OscPacket::Message(OscMessage { addr: "/i".to_string(), args: vec![oscodec::OscType::Int(1000)] })
/// );
/// ```
pub fn decode(msg: &[u8]) -> crate::types::Result<OscPacket> {
    if msg.len() % 4 != 0 {
        return Err(OscError::Misaligned);
    }
    if msg.len() < MIN_OSC_MESSAGE_SIZE {
        return Err(OscError::Truncated);
    }
    decode_packet(msg, msg)
        .map(|(_, packet)| packet)
        .map_err(|e| match e {
            nom::Err::Incomplete(_) => OscError::Truncated,
            nom::Err::Error(e) | nom::Err::Failure(e) => e,
        })
}

fn decode_packet<'a>(input: &'a [u8], original_input: &'a [u8]) -> DResult<'a, OscPacket> {
    if input.is_empty() {
        return Err(nom::Err::Error(OscError::Truncated));
    }

    match input[0] {
        b'/' => decode_message(input, original_input),
        b'#' => decode_bundle(input, original_input),
        _ => Err(nom::Err::Error(OscError::InvalidContents)),
    }
}

fn decode_message<'a>(input: &'a [u8], original_input: &'a [u8]) -> DResult<'a, OscPacket> {
    let (input, addr) = read_osc_string(input, original_input)?;
    address::verify_address_pattern(&addr).map_err(nom::Err::Error)?;

    let (input, type_tags) = read_osc_string(input, original_input)?;
    if !type_tags.is_empty() && !type_tags.starts_with(',') {
        return Err(nom::Err::Error(OscError::InvalidContents));
    }

    if type_tags.len() > 1 {
        let (input, args) = read_osc_args(input, original_input, type_tags)?;
        Ok((input, OscPacket::Message(OscMessage { addr, args })))
    } else {
        Ok((input, OscPacket::Message(OscMessage { addr, args: vec![] })))
    }
}

fn decode_bundle<'a>(input: &'a [u8], original_input: &'a [u8]) -> DResult<'a, OscPacket> {
    if input.len() < MIN_OSC_BUNDLE_SIZE {
        return Err(nom::Err::Error(OscError::Truncated));
    }

    let (input, bundle_tag) = read_osc_string(input, original_input)?;
    if bundle_tag != "#bundle" {
        return Err(nom::Err::Error(OscError::InvalidContents));
    }

    let (input, (timetag, content)) = tuple((
        read_time_tag,
        many0(|input| read_bundle_element(input, original_input)),
    ))(input)?;

    Ok((input, OscPacket::Bundle(OscBundle { timetag, content })))
}

fn read_bundle_element<'a>(input: &'a [u8], original_input: &'a [u8]) -> DResult<'a, OscPacket> {
    let (input, elem_size) = be_u32(input)?;
    let elem_size = elem_size as i32;
    if elem_size < 0 {
        return Err(nom::Err::Error(OscError::NegativeSize));
    }
    if elem_size % 4 != 0 {
        return Err(nom::Err::Error(OscError::Misaligned));
    }

    let (input, elem_bytes) = take(elem_size as u32)(input)
        .map_err(|_: nom::Err<OscError>| nom::Err::Error(OscError::Truncated))?;
    let (_, packet) = decode_packet(elem_bytes, original_input)?;
    Ok((input, packet))
}

fn read_osc_string<'a>(input: &'a [u8], original_input: &'a [u8]) -> DResult<'a, String> {
    map_res(
        terminated(take_till(|c| c == 0), |input| {
            pad_to_4_byte_boundary(input, original_input)
        }),
        |str_buf: &[u8]| {
            core::str::from_utf8(str_buf)
                .map(str::to_string)
                .map_err(|_| OscError::InvalidContents)
        },
    )(input)
}

fn read_osc_args<'a>(
    mut input: &'a [u8],
    original_input: &'a [u8],
    raw_type_tags: String,
) -> DResult<'a, Vec<OscType>> {
    let type_tags: Vec<char> = raw_type_tags.chars().skip(1).collect();
    if type_tags.iter().filter(|&&c| c != '[' && c != ']').count() > MAX_NUMBER_OF_ARGUMENTS {
        return Err(nom::Err::Error(OscError::Capacity));
    }

    let mut args: Vec<OscType> = Vec::with_capacity(type_tags.len());
    let mut stack: Vec<Vec<OscType>> = Vec::new();
    for tag in type_tags {
        if tag == '[' {
            // array start: save current frame and start a new frame for the
            // array's content
            stack.push(args);
            args = Vec::new();
        } else if tag == ']' {
            let array = OscType::Array(OscArray { content: args });
            match stack.pop() {
                Some(stashed) => args = stashed,
                None => return Err(nom::Err::Error(OscError::InvalidContents)),
            }
            args.push(array);
        } else {
            let (rest, arg) = read_osc_arg(input, original_input, tag)?;
            input = rest;
            args.push(arg);
        }
    }
    if !stack.is_empty() {
        return Err(nom::Err::Error(OscError::Truncated));
    }
    Ok((input, args))
}

fn read_osc_arg<'a>(input: &'a [u8], original_input: &'a [u8], tag: char) -> DResult<'a, OscType> {
    match tag {
        'f' => map(be_f32, OscType::Float)(input),
        'd' => map(be_f64, OscType::Double)(input),
        'i' => map(be_i32, OscType::Int)(input),
        'h' => map(be_i64, OscType::Long)(input),
        's' => read_osc_string(input, original_input)
            .map(|(remainder, string)| (remainder, OscType::String(string))),
        'S' => read_osc_string(input, original_input)
            .map(|(remainder, string)| (remainder, OscType::StringAlt(string))),
        't' => read_time_tag(input).map(|(remainder, time)| (remainder, OscType::Time(time))),
        'b' => read_blob(input, original_input),
        'r' => read_osc_color(input),
        'T' => Ok((input, true.into())),
        'F' => Ok((input, false.into())),
        'N' => Ok((input, OscType::Nil)),
        'I' => Ok((input, OscType::Inf)),
        'c' => read_char(input),
        'm' => read_midi_message(input),
        _ => Err(nom::Err::Error(OscError::InvalidContents)),
    }
}

fn read_char(input: &[u8]) -> DResult<'_, OscType> {
    map_res(be_u32, |b| {
        char::from_u32(b)
            .map(OscType::Char)
            .ok_or(OscError::InvalidContents)
    })(input)
}

fn read_blob<'a>(input: &'a [u8], original_input: &'a [u8]) -> DResult<'a, OscType> {
    let (input, size) = be_u32(input)?;
    let signed_size = size as i32;
    if signed_size < 0 {
        return Err(nom::Err::Error(OscError::NegativeSize));
    }

    map(
        terminated(take(size), |input| {
            pad_blob_to_4_byte_boundary(input, original_input)
        }),
        |blob: &[u8]| OscType::Blob(blob.into()),
    )(input)
}

fn read_time_tag(input: &[u8]) -> DResult<'_, OscTime> {
    map(tuple((be_u32, be_u32)), |(seconds, fractional)| OscTime {
        seconds,
        fractional,
    })(input)
}

fn read_midi_message(input: &[u8]) -> DResult<'_, OscType> {
    map(take(4usize), |buf: &[u8]| {
        OscType::Midi(OscMidiMessage {
            port: buf[0],
            status: buf[1],
            data1: buf[2],
            data2: buf[3],
        })
    })(input)
}

fn read_osc_color(input: &[u8]) -> DResult<'_, OscType> {
    map(take(4usize), |buf: &[u8]| {
        OscType::Color(OscColor {
            red: buf[0],
            green: buf[1],
            blue: buf[2],
            alpha: buf[3],
        })
    })(input)
}

/// Skips the OSC-string's null terminator and padding. `input` points at the
/// first byte after the string's text (i.e. at the mandatory null byte);
/// `original_input` is the top-level buffer, used to recover the absolute
/// offset of `input` so the padding can be computed without re-threading a
/// separate "bytes consumed so far" counter through every parser (matching
/// how `encode_string_into` computes padding from `s.len() + 1`, just from
/// the decode side).
fn pad_to_4_byte_boundary<'a>(input: &'a [u8], original_input: &'a [u8]) -> DResult<'a, ()> {
    let offset = original_input.offset(input);
    let padded = crate::encoder::pad(offset as u64 + 1) as usize;
    let skip = padded - offset;
    let (input, _) = take(skip)(input)?;
    Ok((input, ()))
}

/// Skips a blob's padding. Unlike an OSC-string, a blob carries no null
/// terminator, so its padding is `pad(offset) - offset`, not
/// `pad(offset + 1) - offset` (matching `encoder::encode_arg_data`'s
/// `pad(x.len())` and `OscType::payload_wire_size`'s `4 + pad(b.len())`,
/// neither of which adds 1).
fn pad_blob_to_4_byte_boundary<'a>(input: &'a [u8], original_input: &'a [u8]) -> DResult<'a, ()> {
    let offset = original_input.offset(input);
    let padded = crate::encoder::pad(offset as u64) as usize;
    let skip = padded - offset;
    let (input, _) = take(skip)(input)?;
    Ok((input, ()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_message_with_no_arguments() {
        let bytes = hex::decode("2f00000000000000").unwrap();
        let packet = decode(&bytes).unwrap();
        assert_eq!(
            packet,
            OscPacket::Message(OscMessage {
                addr: "/".to_string(),
                args: vec![],
            })
        );
    }

    #[test]
    fn decodes_message_with_int_argument() {
        // addr "/i" (padded), type tags ",i" (padded), argument 1000
        let bytes = hex::decode("2f6900002c690000000003e8").unwrap();
        let packet = decode(&bytes).unwrap();
        assert_eq!(
            packet,
            OscPacket::Message(OscMessage {
                addr: "/i".to_string(),
                args: vec![OscType::Int(1000)],
            })
        );
    }

    #[test]
    fn rejects_misaligned_input() {
        let bytes = hex::decode("2f0000000000").unwrap();
        assert_eq!(decode(&bytes), Err(OscError::Misaligned));
    }

    #[test]
    fn rejects_unknown_first_byte() {
        let mut bytes = vec![0u8; MIN_OSC_MESSAGE_SIZE];
        bytes[0] = b'x';
        assert_eq!(decode(&bytes), Err(OscError::InvalidContents));
    }

    #[test]
    fn rejects_negative_blob_size() {
        // "/b", ",b", size = -1 (0xFFFFFFFF)
        let mut msg = Vec::new();
        msg.extend_from_slice(b"/b\0\0");
        msg.extend_from_slice(b",b\0\0");
        msg.extend_from_slice(&(-1i32).to_be_bytes());
        assert_eq!(decode(&msg), Err(OscError::NegativeSize));
    }
}
