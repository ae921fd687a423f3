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

//! Channel-management / acknowledgement family: binary acknowledge (7/13), UTC/date inquiry
//! (10), interrogation (15), assigned mode command (16), data link management (20).

use super::format_mmsi;
use crate::bitbuffer::BitBuffer;

/// Binary acknowledge (message 7) / safety-related acknowledge (message 13): up to four
/// (mmsi, sequence number) slots, present only as far as the payload reaches (§4.5 point 3).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct BinaryAcknowledge {
    pub repeat: u8,
    pub mmsi: u32,
    pub mmsi1: Option<u32>,
    pub mmsiseq1: Option<u8>,
    pub mmsi2: Option<u32>,
    pub mmsiseq2: Option<u8>,
    pub mmsi3: Option<u32>,
    pub mmsiseq3: Option<u8>,
    pub mmsi4: Option<u32>,
    pub mmsiseq4: Option<u8>,
}

impl BinaryAcknowledge {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

fn slot(buf: &BitBuffer, offset: usize) -> (Option<u32>, Option<u8>) {
    if !buf.fits(offset, 30) {
        return (None, None);
    }
    let mmsi = Some(buf.read_uint(offset, 30) as u32);
    let seq = if buf.fits(offset + 30, 2) {
        Some(buf.read_uint(offset + 30, 2) as u8)
    } else {
        None
    };
    (mmsi, seq)
}

pub fn decode_ack(buf: &BitBuffer) -> BinaryAcknowledge {
    let (mmsi1, mmsiseq1) = slot(buf, 40);
    let (mmsi2, mmsiseq2) = slot(buf, 72);
    let (mmsi3, mmsiseq3) = slot(buf, 104);
    let (mmsi4, mmsiseq4) = slot(buf, 136);
    BinaryAcknowledge {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        mmsi1,
        mmsiseq1,
        mmsi2,
        mmsiseq2,
        mmsi3,
        mmsiseq3,
        mmsi4,
        mmsiseq4,
    }
}

pub fn encode_ack(ais_id: u8, r: &BinaryAcknowledge) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(ais_id as u64, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(0, 2); // spare
    for (mmsi, seq) in [
        (r.mmsi1, r.mmsiseq1),
        (r.mmsi2, r.mmsiseq2),
        (r.mmsi3, r.mmsiseq3),
        (r.mmsi4, r.mmsiseq4),
    ] {
        if let Some(mmsi) = mmsi {
            b.write_uint(mmsi as u64, 30);
            b.write_uint(seq.unwrap_or(0) as u64, 2);
        }
    }
    b
}

/// UTC/date inquiry (message type 10).
#[derive(Clone, Debug, PartialEq)]
pub struct UtcDateInquiry {
    pub repeat: u8,
    pub mmsi: u32,
    pub dest_mmsi: u32,
}

impl UtcDateInquiry {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
    pub fn dest_mmsi_str(&self) -> String {
        format_mmsi(self.dest_mmsi)
    }
}

pub fn decode_type10(buf: &BitBuffer) -> UtcDateInquiry {
    UtcDateInquiry {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        dest_mmsi: buf.read_uint(40, 30) as u32,
    }
}

pub fn encode_type10(r: &UtcDateInquiry) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(10, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(0, 2);
    b.write_uint(r.dest_mmsi as u64, 30);
    b.write_uint(0, 2);
    b
}

/// Interrogation (message type 15): up to two interrogated stations, each with up to two
/// requested message types/slot offsets.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Interrogation {
    pub repeat: u8,
    pub mmsi: u32,
    pub mmsi1: Option<u32>,
    pub type1_1: Option<u8>,
    pub offset1_1: Option<u16>,
    pub type1_2: Option<u8>,
    pub offset1_2: Option<u16>,
    pub mmsi2: Option<u32>,
    pub type2_1: Option<u8>,
    pub offset2_1: Option<u16>,
}

impl Interrogation {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

pub fn decode_type15(buf: &BitBuffer) -> Interrogation {
    let mmsi1 = if buf.fits(40, 30) { Some(buf.read_uint(40, 30) as u32) } else { None };
    let type1_1 = if buf.fits(70, 6) { Some(buf.read_uint(70, 6) as u8) } else { None };
    let offset1_1 = if buf.fits(76, 12) { Some(buf.read_uint(76, 12) as u16) } else { None };
    let type1_2 = if buf.fits(90, 6) { Some(buf.read_uint(90, 6) as u8) } else { None };
    let offset1_2 = if buf.fits(96, 12) { Some(buf.read_uint(96, 12) as u16) } else { None };
    let mmsi2 = if buf.fits(110, 30) { Some(buf.read_uint(110, 30) as u32) } else { None };
    let type2_1 = if buf.fits(140, 6) { Some(buf.read_uint(140, 6) as u8) } else { None };
    let offset2_1 = if buf.fits(146, 12) { Some(buf.read_uint(146, 12) as u16) } else { None };
    Interrogation {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        mmsi1,
        type1_1,
        offset1_1,
        type1_2,
        offset1_2,
        mmsi2,
        type2_1,
        offset2_1,
    }
}

pub fn encode_type15(r: &Interrogation) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(15, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(0, 2);
    if let Some(mmsi1) = r.mmsi1 {
        b.write_uint(mmsi1 as u64, 30);
        b.write_uint(r.type1_1.unwrap_or(0) as u64, 6);
        b.write_uint(r.offset1_1.unwrap_or(0) as u64, 12);
        b.write_uint(0, 2);
        if r.type1_2.is_some() || r.offset1_2.is_some() {
            b.write_uint(r.type1_2.unwrap_or(0) as u64, 6);
            b.write_uint(r.offset1_2.unwrap_or(0) as u64, 12);
            b.write_uint(0, 2);
            if let Some(mmsi2) = r.mmsi2 {
                b.write_uint(mmsi2 as u64, 30);
                b.write_uint(r.type2_1.unwrap_or(0) as u64, 6);
                b.write_uint(r.offset2_1.unwrap_or(0) as u64, 12);
                b.write_uint(0, 2);
            }
        }
    }
    b
}

/// Assigned mode command (message type 16).
#[derive(Clone, Debug, PartialEq)]
pub struct AssignedModeCommand {
    pub repeat: u8,
    pub mmsi: u32,
    pub mmsi1: u32,
    pub offset1: u16,
    pub increment1: u16,
    pub mmsi2: u32,
    pub offset2: Option<u16>,
    pub increment2: Option<u16>,
}

impl AssignedModeCommand {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
    pub fn mmsi2_str(&self) -> String {
        format_mmsi(self.mmsi2)
    }
}

pub fn decode_type16(buf: &BitBuffer) -> AssignedModeCommand {
    AssignedModeCommand {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        mmsi1: buf.read_uint(40, 30) as u32,
        offset1: buf.read_uint(70, 12) as u16,
        increment1: buf.read_uint(82, 10) as u16,
        mmsi2: buf.read_uint(92, 30) as u32,
        offset2: if buf.fits(122, 12) { Some(buf.read_uint(122, 12) as u16) } else { None },
        increment2: if buf.fits(134, 10) { Some(buf.read_uint(134, 10) as u16) } else { None },
    }
}

pub fn encode_type16(r: &AssignedModeCommand) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(16, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(0, 2);
    b.write_uint(r.mmsi1 as u64, 30);
    b.write_uint(r.offset1 as u64, 12);
    b.write_uint(r.increment1 as u64, 10);
    if r.mmsi2 != 0 || r.offset2.is_some() || r.increment2.is_some() {
        b.write_uint(r.mmsi2 as u64, 30);
        b.write_uint(r.offset2.unwrap_or(0) as u64, 12);
        b.write_uint(r.increment2.unwrap_or(0) as u64, 10);
    }
    b
}

/// Data link management message (message type 20): up to four reserved-slot announcements.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DataLinkManagementMessage {
    pub repeat: u8,
    pub mmsi: u32,
    pub offset1: u16,
    pub number1: u8,
    pub timeout1: u8,
    pub increment1: u16,
    pub offset2: Option<u16>,
    pub number2: Option<u8>,
    pub timeout2: Option<u8>,
    pub increment2: Option<u16>,
    pub offset3: Option<u16>,
    pub number3: Option<u8>,
    pub timeout3: Option<u8>,
    pub increment3: Option<u16>,
    pub offset4: Option<u16>,
    pub number4: Option<u8>,
    pub timeout4: Option<u8>,
    pub increment4: Option<u16>,
}

impl DataLinkManagementMessage {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

fn dlm_slot(buf: &BitBuffer, offset: usize) -> Option<(u16, u8, u8, u16)> {
    if !buf.fits(offset, 30) {
        return None;
    }
    Some((
        buf.read_uint(offset, 12) as u16,
        buf.read_uint(offset + 12, 4) as u8,
        buf.read_uint(offset + 16, 3) as u8,
        buf.read_uint(offset + 19, 11) as u16,
    ))
}

pub fn decode_type20(buf: &BitBuffer) -> DataLinkManagementMessage {
    let (offset1, number1, timeout1, increment1) = dlm_slot(buf, 40).unwrap_or((0, 0, 0, 0));
    let s2 = dlm_slot(buf, 70);
    let s3 = dlm_slot(buf, 100);
    let s4 = dlm_slot(buf, 130);
    DataLinkManagementMessage {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        offset1,
        number1,
        timeout1,
        increment1,
        offset2: s2.map(|s| s.0),
        number2: s2.map(|s| s.1),
        timeout2: s2.map(|s| s.2),
        increment2: s2.map(|s| s.3),
        offset3: s3.map(|s| s.0),
        number3: s3.map(|s| s.1),
        timeout3: s3.map(|s| s.2),
        increment3: s3.map(|s| s.3),
        offset4: s4.map(|s| s.0),
        number4: s4.map(|s| s.1),
        timeout4: s4.map(|s| s.2),
        increment4: s4.map(|s| s.3),
    }
}

pub fn encode_type20(r: &DataLinkManagementMessage) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(20, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(0, 2);
    b.write_uint(r.offset1 as u64, 12);
    b.write_uint(r.number1 as u64, 4);
    b.write_uint(r.timeout1 as u64, 3);
    b.write_uint(r.increment1 as u64, 11);
    for (offset, number, timeout, increment) in [
        (r.offset2, r.number2, r.timeout2, r.increment2),
        (r.offset3, r.number3, r.timeout3, r.increment3),
        (r.offset4, r.number4, r.timeout4, r.increment4),
    ] {
        if let Some(offset) = offset {
            b.write_uint(offset as u64, 12);
            b.write_uint(number.unwrap_or(0) as u64, 4);
            b.write_uint(timeout.unwrap_or(0) as u64, 3);
            b.write_uint(increment.unwrap_or(0) as u64, 11);
        }
    }
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
    fn decodes_type7_binary_ack() {
        let buf = payload_to_buf("702R5`hwCjq8", 0);
        let r = decode_ack(&buf);
        assert_eq!(r.mmsi_str(), "002655651");
        assert_eq!(r.mmsi1.map(format_mmsi), Some("265538450".to_string()));
        assert_eq!(r.mmsiseq1, Some(0));
        assert_eq!(r.mmsi2, None);
    }

    #[test]
    fn decodes_type16_assigned_mode() {
        let buf = payload_to_buf("@01uEO@mMk7P<P00", 0);
        let r = decode_type16(&buf);
        assert_eq!(r.mmsi_str(), "002053501");
        assert_eq!(format_mmsi(r.mmsi1), "224251000");
        assert_eq!(r.offset1, 200);
        assert_eq!(r.increment1, 0);
        assert_eq!(r.mmsi2_str(), "000000000");
        assert_eq!(r.offset2, None);
        assert_eq!(r.increment2, None);
    }

    #[test]
    fn decodes_type15_interrogation_short() {
        let buf = payload_to_buf("?5OP=l00052HD00", 2);
        let r = decode_type15(&buf);
        assert_eq!(r.mmsi_str(), "368578000");
        assert_eq!(r.offset1_1, Some(0));
        assert_eq!(r.mmsi1.map(format_mmsi), Some("000005158".to_string()));
        assert_eq!(r.offset1_2, None);
        assert_eq!(r.mmsi2, None);
    }

    #[test]
    fn decodes_type20_data_link_management() {
        let buf = payload_to_buf("D028rqP<QNfp000000000000000", 2);
        let r = decode_type20(&buf);
        assert_eq!(r.mmsi_str(), "002243302");
        assert_eq!(r.offset1, 200);
        assert_eq!(r.number1, 5);
        assert_eq!(r.timeout1, 7);
        assert_eq!(r.increment1, 750);
    }

    #[test]
    fn type16_round_trips_through_encode() {
        let buf = payload_to_buf("@01uEO@mMk7P<P00", 0);
        let r = decode_type16(&buf);
        let re = encode_type16(&r);
        assert_eq!(decode_type16(&re), r);
    }
}
