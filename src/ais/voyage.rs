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

//! Static and voyage related data (message type 5) and static data report (message type 24,
//! polymorphic on `partno`).

use super::{format_mmsi, EpfdType, ShipType};
use crate::bitbuffer::BitBuffer;

#[derive(Clone, Debug, PartialEq)]
pub struct StaticAndVoyageData {
    pub repeat: u8,
    pub mmsi: u32,
    pub ais_version: u8,
    pub imo: u32,
    pub callsign: String,
    pub shipname: String,
    pub ship_type: ShipType,
    pub to_bow: u16,
    pub to_stern: u16,
    pub to_port: u8,
    pub to_starboard: u8,
    pub epfd: EpfdType,
    pub eta_month: u8,
    pub eta_day: u8,
    pub eta_hour: u8,
    pub eta_minute: u8,
    pub draught: f32,
    pub destination: String,
    pub dte: bool,
}

impl StaticAndVoyageData {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

pub fn decode_type5(buf: &BitBuffer) -> StaticAndVoyageData {
    StaticAndVoyageData {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        ais_version: buf.read_uint(38, 2) as u8,
        imo: buf.read_uint(40, 30) as u32,
        callsign: buf.read_text(70, 42),
        shipname: buf.read_text(112, 120),
        ship_type: ShipType::from_u8(buf.read_uint(232, 8) as u8),
        to_bow: buf.read_uint(240, 9) as u16,
        to_stern: buf.read_uint(249, 9) as u16,
        to_port: buf.read_uint(258, 6) as u8,
        to_starboard: buf.read_uint(264, 6) as u8,
        epfd: EpfdType::from_u8(buf.read_uint(270, 4) as u8),
        eta_month: buf.read_uint(274, 4) as u8,
        eta_day: buf.read_uint(278, 5) as u8,
        eta_hour: buf.read_uint(283, 5) as u8,
        eta_minute: buf.read_uint(288, 6) as u8,
        draught: buf.read_uint(294, 8) as f32 / 10.0,
        destination: buf.read_text(302, 120),
        dte: buf.read_uint(422, 1) != 0,
    }
}

pub fn encode_type5(r: &StaticAndVoyageData) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(5, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(r.ais_version as u64, 2);
    b.write_uint(r.imo as u64, 30);
    b.write_text(&r.callsign, 42);
    b.write_text(&r.shipname, 120);
    b.write_uint(r.ship_type.as_u8() as u64, 8);
    b.write_uint(r.to_bow as u64, 9);
    b.write_uint(r.to_stern as u64, 9);
    b.write_uint(r.to_port as u64, 6);
    b.write_uint(r.to_starboard as u64, 6);
    b.write_uint(r.epfd.as_u8() as u64, 4);
    b.write_uint(r.eta_month as u64, 4);
    b.write_uint(r.eta_day as u64, 5);
    b.write_uint(r.eta_hour as u64, 5);
    b.write_uint(r.eta_minute as u64, 6);
    b.write_uint((r.draught * 10.0).round() as u64, 8);
    b.write_text(&r.destination, 120);
    b.write_uint(r.dte as u64, 1);
    b.write_uint(0, 1); // spare
    b
}

/// Static data report (message type 24). `partno` selects which half of the split static-data
/// broadcast this sentence carries.
#[derive(Clone, Debug, PartialEq)]
pub enum StaticDataReport {
    PartA { repeat: u8, mmsi: u32, shipname: String },
    PartB {
        repeat: u8,
        mmsi: u32,
        ship_type: ShipType,
        vendorid: String,
        callsign: String,
        to_bow: u16,
        to_stern: u16,
        to_port: u8,
        to_starboard: u8,
    },
}

impl StaticDataReport {
    pub fn mmsi(&self) -> u32 {
        match self {
            StaticDataReport::PartA { mmsi, .. } => *mmsi,
            StaticDataReport::PartB { mmsi, .. } => *mmsi,
        }
    }

    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi())
    }
}

pub fn decode_type24(buf: &BitBuffer) -> StaticDataReport {
    let repeat = buf.read_uint(6, 2) as u8;
    let mmsi = buf.read_uint(8, 30) as u32;
    let partno = buf.read_uint(38, 2) as u8;
    if partno == 0 {
        StaticDataReport::PartA {
            repeat,
            mmsi,
            shipname: buf.read_text(40, 120),
        }
    } else {
        StaticDataReport::PartB {
            repeat,
            mmsi,
            ship_type: ShipType::from_u8(buf.read_uint(40, 8) as u8),
            vendorid: buf.read_text(48, 18),
            callsign: buf.read_text(66, 42),
            to_bow: buf.read_uint(108, 9) as u16,
            to_stern: buf.read_uint(117, 9) as u16,
            to_port: buf.read_uint(126, 6) as u8,
            to_starboard: buf.read_uint(132, 6) as u8,
        }
    }
}

pub fn encode_type24(r: &StaticDataReport) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(24, 6);
    match r {
        StaticDataReport::PartA { repeat, mmsi, shipname } => {
            b.write_uint(*repeat as u64, 2);
            b.write_uint(*mmsi as u64, 30);
            b.write_uint(0, 2); // partno = 0
            b.write_text(shipname, 120);
            b.write_uint(0, 8); // spare
        }
        StaticDataReport::PartB {
            repeat,
            mmsi,
            ship_type,
            vendorid,
            callsign,
            to_bow,
            to_stern,
            to_port,
            to_starboard,
        } => {
            b.write_uint(*repeat as u64, 2);
            b.write_uint(*mmsi as u64, 30);
            b.write_uint(1, 2); // partno = 1
            b.write_uint(ship_type.as_u8() as u64, 8);
            b.write_text(vendorid, 18);
            b.write_text(callsign, 42);
            b.write_uint(*to_bow as u64, 9);
            b.write_uint(*to_stern as u64, 9);
            b.write_uint(*to_port as u64, 6);
            b.write_uint(*to_starboard as u64, 6);
            b.write_uint(0, 30); // spare
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
    fn decodes_scenario_two_static_and_voyage_data() {
        let p1 = "55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8";
        let p2 = "88888888880";
        let mut bits = armor::decode(p1, 0).unwrap();
        bits.extend_from_bitslice(&armor::decode(p2, 2).unwrap());
        let buf = BitBuffer::from_bits(bits);
        let r = decode_type5(&buf);
        assert_eq!(r.callsign, "3FOF8");
        assert_eq!(r.shipname, "EVER DIADEM");
        assert_eq!(r.ship_type, ShipType::CARGO);
        assert_eq!(r.to_bow, 225);
        assert_eq!(r.to_stern, 70);
        assert_eq!(r.to_port, 1);
        assert_eq!(r.to_starboard, 31);
        assert!((r.draught - 12.2).abs() < 1e-3);
        assert_eq!(r.destination, "NEW YORK");
        assert_eq!(r.epfd, EpfdType::Gps);
    }

    #[test]
    fn decodes_type24_part_b() {
        let buf = payload_to_buf("H52KMeDU653hhhi0000000000000", 0);
        match decode_type24(&buf) {
            StaticDataReport::PartB {
                mmsi,
                ship_type,
                vendorid,
                callsign,
                to_bow,
                to_stern,
                to_port,
                to_starboard,
                ..
            } => {
                assert_eq!(format_mmsi(mmsi), "338091445");
                assert_eq!(ship_type, ShipType::PLEASURE_CRAFT);
                assert_eq!(vendorid, "FEC");
                assert_eq!(callsign, "");
                assert_eq!(to_bow, 0);
                assert_eq!(to_stern, 0);
                assert_eq!(to_port, 0);
                assert_eq!(to_starboard, 0);
            }
            other => panic!("expected PartB, got {:?}", other),
        }
    }

    #[test]
    fn type5_round_trips_through_encode() {
        let p1 = "55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8";
        let p2 = "88888888880";
        let mut bits = armor::decode(p1, 0).unwrap();
        bits.extend_from_bitslice(&armor::decode(p2, 2).unwrap());
        let buf = BitBuffer::from_bits(bits);
        let r = decode_type5(&buf);
        let re = encode_type5(&r);
        assert_eq!(decode_type5(&re), r);
    }
}
