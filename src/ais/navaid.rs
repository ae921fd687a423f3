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

//! Aid-to-navigation report (message type 21). The type most exposed to truncated payloads in
//! practice, since real-world AtoN transmitters often omit the optional name extension tail.

use super::{format_mmsi, EpfdType, NavAidType};
use crate::bitbuffer::BitBuffer;

#[derive(Clone, Debug, PartialEq)]
pub struct AidToNavigationReport {
    pub repeat: u8,
    pub mmsi: u32,
    pub aid_type: Option<NavAidType>,
    pub name: String,
    pub accuracy: bool,
    pub lon: f64,
    pub lat: f64,
    pub to_bow: u16,
    pub to_stern: u16,
    pub to_port: u8,
    pub to_starboard: u8,
    pub epfd: Option<EpfdType>,
    pub second: u8,
    pub off_position: bool,
    pub raim: bool,
    pub virtual_aid: bool,
    pub assigned: bool,
    pub name_ext: Option<String>,
}

impl AidToNavigationReport {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

pub fn decode_type21(buf: &BitBuffer) -> AidToNavigationReport {
    let name_ext = if buf.len() > 272 {
        let ext_bits = (buf.len() - 272) - (buf.len() - 272) % 6;
        Some(buf.read_text(272, ext_bits))
    } else {
        None
    };
    AidToNavigationReport {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        aid_type: if buf.fits(38, 5) {
            Some(NavAidType::from_u8(buf.read_uint(38, 5) as u8))
        } else {
            None
        },
        name: buf.read_text(43, 120),
        accuracy: buf.read_uint(163, 1) != 0,
        lon: buf.read_int(164, 28) as f64 / 600000.0,
        lat: buf.read_int(192, 27) as f64 / 600000.0,
        to_bow: buf.read_uint(219, 9) as u16,
        to_stern: buf.read_uint(228, 9) as u16,
        to_port: buf.read_uint(237, 6) as u8,
        to_starboard: buf.read_uint(243, 6) as u8,
        epfd: if buf.fits(249, 4) {
            Some(EpfdType::from_u8(buf.read_uint(249, 4) as u8))
        } else {
            None
        },
        second: buf.read_uint(253, 6) as u8,
        off_position: buf.read_uint(259, 1) != 0,
        raim: buf.read_uint(268, 1) != 0,
        virtual_aid: buf.read_uint(269, 1) != 0,
        assigned: buf.read_uint(270, 1) != 0,
        name_ext,
    }
}

pub fn encode_type21(r: &AidToNavigationReport) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(21, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(r.aid_type.map(NavAidType::as_u8).unwrap_or(0) as u64, 5);
    b.write_text(&r.name, 120);
    b.write_uint(r.accuracy as u64, 1);
    b.write_int((r.lon * 600000.0).round() as i64, 28);
    b.write_int((r.lat * 600000.0).round() as i64, 27);
    b.write_uint(r.to_bow as u64, 9);
    b.write_uint(r.to_stern as u64, 9);
    b.write_uint(r.to_port as u64, 6);
    b.write_uint(r.to_starboard as u64, 6);
    b.write_uint(r.epfd.map(EpfdType::as_u8).unwrap_or(0) as u64, 4);
    b.write_uint(r.second as u64, 6);
    b.write_uint(r.off_position as u64, 1);
    b.write_uint(0, 8); // regional reserved
    b.write_uint(r.raim as u64, 1);
    b.write_uint(r.virtual_aid as u64, 1);
    b.write_uint(r.assigned as u64, 1);
    b.write_uint(0, 1); // spare
    if let Some(ext) = &r.name_ext {
        b.write_text(ext, ext.chars().count() * 6);
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
    fn decodes_aid_to_navigation_report() {
        let p1 = "E4eHJhPR37q0000000000000000KUOSc=rq4h00000a";
        let p2 = "@20";
        let mut bits = armor::decode(p1, 0).unwrap();
        bits.extend_from_bitslice(&armor::decode(p2, 4).unwrap());
        let buf = BitBuffer::from_bits(bits);
        let r = decode_type21(&buf);
        assert_eq!(r.mmsi_str(), "316021442");
        assert_eq!(r.aid_type, Some(NavAidType::REFERENCE_POINT));
        assert_eq!(r.name, "DFO2");
        assert!(r.accuracy);
        assert!((r.lat - 48.65457).abs() < 1e-4);
        assert!((r.lon - (-123.429155)).abs() < 1e-4);
        assert_eq!(r.to_bow, 0);
        assert!(r.off_position);
        assert!(r.raim);
        assert!(!r.virtual_aid);
    }

    #[test]
    fn scenario_six_truncated_aid_to_navigation_report() {
        let buf = payload_to_buf("E>lt;", 2);
        let r = decode_type21(&buf);
        assert_eq!(r.mmsi_str(), "000971714");
        assert_eq!(r.aid_type, None);
        assert_eq!(r.epfd, None);
        assert_eq!(r.name, "");
    }

    #[test]
    fn truncated_payload_never_panics_on_tail_fields() {
        let buf = payload_to_buf("E>lt;", 2);
        let r = decode_type21(&buf);
        assert!(!r.raim);
        assert_eq!(r.to_bow, 0);
        assert_eq!(r.name_ext, None);
    }
}
