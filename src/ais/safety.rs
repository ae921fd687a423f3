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

//! Safety-related text messages: addressed (message type 12) and broadcast (message type 14).

use super::format_mmsi;
use crate::bitbuffer::BitBuffer;

/// Addressed safety-related message (message type 12).
#[derive(Clone, Debug, PartialEq)]
pub struct AddressedSafetyMessage {
    pub repeat: u8,
    pub mmsi: u32,
    pub seqno: u8,
    pub dest_mmsi: u32,
    pub retransmit: bool,
    pub text: String,
}

impl AddressedSafetyMessage {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
    pub fn dest_mmsi_str(&self) -> String {
        format_mmsi(self.dest_mmsi)
    }
}

pub fn decode_type12(buf: &BitBuffer) -> AddressedSafetyMessage {
    AddressedSafetyMessage {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        seqno: buf.read_uint(38, 2) as u8,
        dest_mmsi: buf.read_uint(40, 30) as u32,
        retransmit: buf.read_uint(70, 1) != 0,
        text: buf.read_text(72, buf.len().saturating_sub(72)),
    }
}

pub fn encode_type12(r: &AddressedSafetyMessage) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(12, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(r.seqno as u64, 2);
    b.write_uint(r.dest_mmsi as u64, 30);
    b.write_uint(r.retransmit as u64, 1);
    b.write_uint(0, 1); // spare
    b.write_text(&r.text, r.text.chars().count() * 6);
    b
}

/// Broadcast safety-related message (message type 14).
#[derive(Clone, Debug, PartialEq)]
pub struct BroadcastSafetyMessage {
    pub repeat: u8,
    pub mmsi: u32,
    pub text: String,
}

impl BroadcastSafetyMessage {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

pub fn decode_type14(buf: &BitBuffer) -> BroadcastSafetyMessage {
    BroadcastSafetyMessage {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        text: buf.read_text(40, buf.len().saturating_sub(40)),
    }
}

pub fn encode_type14(r: &BroadcastSafetyMessage) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(14, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(0, 2); // spare
    b.write_text(&r.text, r.text.chars().count() * 6);
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::armor;

    fn payload_to_buf(payload: &str, fill: u8) -> BitBuffer {
        BitBuffer::from_bits(armor::decode(payload, fill).unwrap())
    }

    #[test]
    fn decodes_type12_addressed_safety_message() {
        let buf = payload_to_buf("<5?SIj1;GbD07??4", 0);
        let r = decode_type12(&buf);
        assert_eq!(r.mmsi_str(), "351853000");
        assert_eq!(r.seqno, 0);
        assert_eq!(r.dest_mmsi_str(), "316123456");
        assert!(!r.retransmit);
        assert_eq!(r.text, "GOOD");
    }

    #[test]
    fn decodes_type12_retransmit_flag() {
        let buf = payload_to_buf("<42Lati0W:Ov=C7P6B?=Pjoihhjhqq0", 2);
        let r = decode_type12(&buf);
        assert_eq!(r.mmsi_str(), "271002099");
        assert_eq!(r.dest_mmsi_str(), "271002111");
        assert!(r.retransmit);
    }

    #[test]
    fn decodes_type14_broadcast_safety_message() {
        let buf = payload_to_buf(">5?Per18=HB1U:1@E=B0m<L", 2);
        let r = decode_type14(&buf);
        assert_eq!(r.mmsi_str(), "351809000");
        assert_eq!(r.text, "RCVD YR TEST MSG");
    }

    #[test]
    fn type12_round_trips_through_encode() {
        let buf = payload_to_buf("<5?SIj1;GbD07??4", 0);
        let r = decode_type12(&buf);
        let re = encode_type12(&r);
        assert_eq!(decode_type12(&re), r);
    }

    #[test]
    fn type14_round_trips_through_encode() {
        let buf = payload_to_buf(">5?Per18=HB1U:1@E=B0m<L", 2);
        let r = decode_type14(&buf);
        let re = encode_type14(&r);
        assert_eq!(decode_type14(&re), r);
    }
}
