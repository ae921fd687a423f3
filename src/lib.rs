/*
Copyright 2021 Timo Saarinen

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! A decoder/encoder for AIS (Automatic Identification System) maritime radio messages carried
//! over the NMEA 0183 sentence envelope (`!AIVDM`/`!AIVDO`/`!ARVDM` and related talkers).
//!
//! The pipeline, decode direction: [`sentence::parse`] splits one NMEA line into its envelope
//! fields and verifies the checksum; [`assembler::FragmentAssembler`] joins multi-sentence
//! transmissions keyed by channel and sequence id; [`armor`] turns the joined payload text into
//! a bit sequence; [`ais::decode`] reads the 27-way message schema off that bit sequence into a
//! typed [`ais::AisMessage`]. [`stream`] and [`tcp`] wire the first three stages into pull
//! iterators over a byte source. [`json`] projects a decoded message plus its envelope into the
//! crate's serde-based wire format.

pub mod ais;
pub mod armor;
pub mod assembler;
pub mod bitbuffer;
pub mod error;
pub mod json;
pub mod sentence;
pub mod stream;
pub mod tcp;

pub use ais::{decode as decode_message, encode as encode_message, AisMessage};
pub use assembler::{AssembledMessage, FragmentAssembler};
pub use bitbuffer::BitBuffer;
pub use error::ParseError;
pub use sentence::{parse as parse_sentence, NmeaSentence, SentenceKind};

/// Decodes one already-assembled [`AssembledMessage`] into a typed [`AisMessage`].
///
/// This is the last step of the decode pipeline; callers driving their own stream should prefer
/// [`stream::StreamDecoder`], which performs all four stages.
pub fn decode_assembled(msg: &AssembledMessage) -> Result<AisMessage, ParseError> {
    ais::decode(&BitBuffer::from_bits(msg.bits.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ais::AisMessage;

    fn assemble_one(line: &str) -> AssembledMessage {
        let s = parse_sentence(line).unwrap();
        let mut a = FragmentAssembler::new();
        a.push(&s).unwrap().expect("single fragment assembles immediately")
    }

    fn assemble_all(lines: &[&str]) -> AssembledMessage {
        let mut a = FragmentAssembler::new();
        let mut last = None;
        for line in lines {
            let s = parse_sentence(line).unwrap();
            last = a.push(&s).unwrap();
        }
        last.expect("group should complete on its last fragment")
    }

    /// End-to-end scenario 1 from the design notes: a single-fragment class A position report.
    #[test]
    fn scenario_one_class_a_position_report() {
        let msg = assemble_one("!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C");
        match decode_assembled(&msg).unwrap() {
            AisMessage::Type1(r) => {
                assert_eq!(r.mmsi_str(), "366053209");
                assert!((r.lon - (-122.341618)).abs() < 1e-5);
                assert!((r.lat - 37.802118).abs() < 1e-5);
                assert_eq!(r.course, Some(219.3));
                assert_eq!(r.heading, Some(1));
                assert_eq!(r.second, 59);
            }
            other => panic!("expected Type1, got {:?}", other),
        }
    }

    /// Scenario 2: a two-fragment static and voyage data message.
    #[test]
    fn scenario_two_static_and_voyage_data() {
        let msg = assemble_all(&[
            "!AIVDM,2,1,1,A,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1C",
            "!AIVDM,2,2,1,A,88888888880,2*25",
        ]);
        match decode_assembled(&msg).unwrap() {
            AisMessage::Type5(r) => {
                assert_eq!(r.callsign, "3FOF8");
                assert_eq!(r.shipname, "EVER DIADEM");
                assert_eq!(r.destination, "NEW YORK");
            }
            other => panic!("expected Type5, got {:?}", other),
        }
    }

    /// Scenario 3: the second fragment of a two-fragment group arrives first.
    #[test]
    fn scenario_three_out_of_order_assembly() {
        let msg = assemble_all(&[
            "!AIVDM,2,2,4,A,000000000000000,2*20",
            "!AIVDM,2,1,4,A,55O0W7`00001L@gCWGA2uItLth@DqtL5@F22220j1h742t0Ht0000000,0*08",
        ]);
        match decode_assembled(&msg).unwrap() {
            AisMessage::Type5(r) => assert_eq!(r.mmsi_str(), "368060190"),
            other => panic!("expected Type5, got {:?}", other),
        }
    }

    /// Scenario 4: channel management in its broadcast (geographic region) form.
    #[test]
    fn scenario_four_channel_management_broadcast() {
        let msg = assemble_one("!AIVDM,1,1,,B,F030p:j2N2P5aJR0r;6f3rj10000,0*11");
        match decode_assembled(&msg).unwrap() {
            AisMessage::Type22(r) => {
                assert_eq!(r.channel_a, 2087);
                assert_eq!(r.channel_b, 2088);
                assert!(!r.addressed);
            }
            other => panic!("expected Type22, got {:?}", other),
        }
    }

    /// Scenario 5: channel management in its addressed (destination MMSI pair) form.
    #[test]
    fn scenario_five_channel_management_addressed() {
        let msg = assemble_one("!AIVDM,1,1,,A,F@@W>gOP00PH=JrN9l000?wB2HH;,0*44");
        match decode_assembled(&msg).unwrap() {
            AisMessage::Type22(r) => {
                assert!(r.addressed);
                match r.payload {
                    crate::ais::ChannelRegionOrDest::Dest { dest1, dest2 } => {
                        assert_eq!(crate::ais::format_mmsi(dest1), "028144881");
                        assert_eq!(crate::ais::format_mmsi(dest2), "268435519");
                    }
                    other => panic!("expected Dest, got {:?}", other),
                }
            }
            other => panic!("expected Type22, got {:?}", other),
        }
    }

    /// Scenario 6: a truncated aid-to-navigation report still decodes, with the optional tail
    /// fields absent and the MMSI reflecting only the bits that were actually present.
    #[test]
    fn scenario_six_truncated_aid_to_navigation_report() {
        let msg = assemble_one("!AIVDM,1,1,,B,E>lt;,2*52");
        match decode_assembled(&msg).unwrap() {
            AisMessage::Type21(r) => {
                assert_eq!(r.mmsi_str(), "000971714");
                assert_eq!(r.aid_type, None);
                assert_eq!(r.epfd, None);
                assert_eq!(r.name, "");
            }
            other => panic!("expected Type21, got {:?}", other),
        }
    }

    #[test]
    fn round_trip_through_encode_and_reassemble() {
        let msg = assemble_one("!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C");
        let decoded = decode_assembled(&msg).unwrap();
        let re_bits = ais::encode(&decoded);
        let re_decoded = ais::decode(&re_bits).unwrap();
        assert_eq!(decoded, re_decoded);
    }
}
