//! Serializing/parsing a top-level [`OscPacket`] and visiting every message
//! it contains.

use crate::errors::OscError;
use crate::limits::MAX_OSC_PACKET_SIZE;
use crate::types::{OscMessage, OscPacket, OscTime};

use crate::alloc::vec::Vec;

/// Serializes `packet` (message or bundle), enforcing [`MAX_OSC_PACKET_SIZE`]
/// on the result.
///
/// The original C `OscPacketInitialiseFromContents` always returned an error
/// after a successful serialize, a known bug in the source this is modeled
/// on. This corrected version propagates success.
pub fn serialize(packet: &OscPacket) -> Result<Vec<u8>, OscError> {
    let bytes = match packet {
        OscPacket::Message(m) => crate::message::serialize(m)?,
        OscPacket::Bundle(b) => crate::bundle::serialize(b)?,
    };
    if bytes.len() > MAX_OSC_PACKET_SIZE {
        return Err(OscError::Capacity);
    }
    Ok(bytes)
}

/// Parses `bytes` into a top-level [`OscPacket`], enforcing
/// [`MAX_OSC_PACKET_SIZE`] on the input before attempting to decode it.
pub fn parse(bytes: &[u8]) -> Result<OscPacket, OscError> {
    if bytes.len() > MAX_OSC_PACKET_SIZE {
        return Err(OscError::Capacity);
    }
    crate::decoder::decode(bytes)
}

/// Visits every message contained in `packet`, depth-first, calling
/// `handler` with the time tag of the innermost enclosing bundle (`None` if
/// the message is not inside any bundle) and the message itself.
///
/// Uses an explicit work-stack rather than native recursion so that
/// pathologically deep bundle nesting cannot overflow the call stack.
/// Processing stops at the first error, whether from `handler` or from a
/// malformed nested bundle.
///
/// # Examples
///
/// ```
/// use oscodec::packet::process_messages;
/// use oscodec::{OscBundle, OscMessage, OscPacket, OSC_TIME_TAG_IMMEDIATE};
///
/// let packet = OscPacket::Bundle(OscBundle {
///     timetag: OSC_TIME_TAG_IMMEDIATE,
///     content: vec![OscPacket::Message(OscMessage { addr: "/a".to_string(), args: vec![] })],
/// });
///
/// let mut seen = vec![];
/// process_messages(&packet, |time, msg| {
///     seen.push((time, msg.addr.clone()));
///     Ok(())
/// }).unwrap();
/// assert_eq!(seen, vec![(Some(OSC_TIME_TAG_IMMEDIATE), "/a".to_string())]);
/// ```
pub fn process_messages<F>(packet: &OscPacket, mut handler: F) -> Result<(), OscError>
where
    F: FnMut(Option<OscTime>, &OscMessage) -> Result<(), OscError>,
{
    let mut stack: Vec<(Option<OscTime>, &OscPacket)> = Vec::from([(None, packet)]);
    while let Some((enclosing, current)) = stack.pop() {
        match current {
            OscPacket::Message(m) => handler(enclosing, m)?,
            OscPacket::Bundle(b) => {
                for child in b.content.iter().rev() {
                    stack.push((Some(b.timetag), child));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::string::ToString;
    use crate::types::{OscBundle, OSC_TIME_TAG_IMMEDIATE};

    fn message(addr: &str) -> OscPacket {
        OscPacket::Message(OscMessage {
            addr: addr.to_string(),
            args: vec![],
        })
    }

    #[test]
    fn visits_top_level_message_with_no_enclosing_time() {
        let packet = message("/solo");
        let mut seen = vec![];
        process_messages(&packet, |time, msg| {
            seen.push((time, msg.addr.clone()));
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![(None, "/solo".to_string())]);
    }

    #[test]
    fn visits_nested_bundles_depth_first_in_order() {
        let inner = OscPacket::Bundle(OscBundle {
            timetag: OscTime::from((2, 0)),
            content: vec![message("/inner/a"), message("/inner/b")],
        });
        let outer = OscPacket::Bundle(OscBundle {
            timetag: OscTime::from((1, 0)),
            content: vec![message("/outer/a"), inner, message("/outer/b")],
        });

        let mut seen = vec![];
        process_messages(&outer, |time, msg| {
            seen.push((time, msg.addr.clone()));
            Ok(())
        })
        .unwrap();

        assert_eq!(
            seen,
            vec![
                (Some(OscTime::from((1, 0))), "/outer/a".to_string()),
                (Some(OscTime::from((2, 0))), "/inner/a".to_string()),
                (Some(OscTime::from((2, 0))), "/inner/b".to_string()),
                (Some(OscTime::from((1, 0))), "/outer/b".to_string()),
            ]
        );
    }

    #[test]
    fn stops_at_first_handler_error() {
        let packet = OscPacket::Bundle(OscBundle {
            timetag: OSC_TIME_TAG_IMMEDIATE,
            content: vec![message("/a"), message("/b")],
        });
        let mut seen = vec![];
        let result = process_messages(&packet, |_, msg| {
            seen.push(msg.addr.clone());
            Err(OscError::NoHandler)
        });
        assert_eq!(result, Err(OscError::NoHandler));
        assert_eq!(seen, vec!["/a".to_string()]);
    }

    #[test]
    fn round_trips_through_serialize_and_parse() {
        let packet = message("/round/trip");
        let bytes = serialize(&packet).unwrap();
        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed, packet);
    }
}
