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

//! Channel management (message type 22) and group assignment command (message type 23). Type 22
//! is polymorphic: the same 70-bit span holds either a geographic region (broadcast form) or two
//! destination MMSIs (addressed form), disambiguated by the `addressed` flag trailing the span.

use super::{format_mmsi, ShipType, StationType, TransmitMode};
use crate::bitbuffer::BitBuffer;

#[derive(Clone, Debug, PartialEq)]
pub enum ChannelRegionOrDest {
    Region { ne_lon: f64, ne_lat: f64, sw_lon: f64, sw_lat: f64 },
    Dest { dest1: u32, dest2: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChannelManagement {
    pub repeat: u8,
    pub mmsi: u32,
    pub channel_a: u16,
    pub channel_b: u16,
    pub txrx: TransmitMode,
    pub power: bool,
    pub addressed: bool,
    pub band_a: bool,
    pub band_b: bool,
    pub zonesize: u8,
    pub payload: ChannelRegionOrDest,
}

impl ChannelManagement {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

pub fn decode_type22(buf: &BitBuffer) -> ChannelManagement {
    let addressed = buf.read_uint(139, 1) != 0;
    let payload = if addressed {
        ChannelRegionOrDest::Dest {
            dest1: buf.read_uint(69, 30) as u32,
            dest2: buf.read_uint(104, 30) as u32,
        }
    } else {
        ChannelRegionOrDest::Region {
            ne_lon: buf.read_int(69, 18) as f64 / 10.0,
            ne_lat: buf.read_int(87, 17) as f64 / 10.0,
            sw_lon: buf.read_int(104, 18) as f64 / 10.0,
            sw_lat: buf.read_int(122, 17) as f64 / 10.0,
        }
    };
    ChannelManagement {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        channel_a: buf.read_uint(40, 12) as u16,
        channel_b: buf.read_uint(52, 12) as u16,
        txrx: TransmitMode::from_u8(buf.read_uint(64, 4) as u8),
        power: buf.read_uint(68, 1) != 0,
        addressed,
        band_a: buf.read_uint(140, 1) != 0,
        band_b: buf.read_uint(141, 1) != 0,
        zonesize: buf.read_uint(142, 3) as u8,
        payload,
    }
}

pub fn encode_type22(r: &ChannelManagement) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(22, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(0, 2); // spare
    b.write_uint(r.channel_a as u64, 12);
    b.write_uint(r.channel_b as u64, 12);
    b.write_uint(r.txrx.as_u8() as u64, 4);
    b.write_uint(r.power as u64, 1);
    match &r.payload {
        ChannelRegionOrDest::Region { ne_lon, ne_lat, sw_lon, sw_lat } => {
            b.write_int((ne_lon * 10.0).round() as i64, 18);
            b.write_int((ne_lat * 10.0).round() as i64, 17);
            b.write_int((sw_lon * 10.0).round() as i64, 18);
            b.write_int((sw_lat * 10.0).round() as i64, 17);
        }
        ChannelRegionOrDest::Dest { dest1, dest2 } => {
            b.write_uint(*dest1 as u64, 30);
            b.write_uint(0, 5); // spare
            b.write_uint(*dest2 as u64, 30);
            b.write_uint(0, 5); // spare
        }
    }
    b.write_uint(r.addressed as u64, 1);
    b.write_uint(r.band_a as u64, 1);
    b.write_uint(r.band_b as u64, 1);
    b.write_uint(r.zonesize as u64, 3);
    b.write_uint(0, 23); // spare
    b
}

/// Group assignment command (message type 23).
#[derive(Clone, Debug, PartialEq)]
pub struct GroupAssignmentCommand {
    pub repeat: u8,
    pub mmsi: u32,
    pub ne_lon: f64,
    pub ne_lat: f64,
    pub sw_lon: f64,
    pub sw_lat: f64,
    pub station_type: StationType,
    pub ship_type: ShipType,
    pub txrx: TransmitMode,
    pub interval: u8,
    pub quiet: u8,
}

impl GroupAssignmentCommand {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

pub fn decode_type23(buf: &BitBuffer) -> GroupAssignmentCommand {
    GroupAssignmentCommand {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        ne_lon: buf.read_int(40, 18) as f64 / 10.0,
        ne_lat: buf.read_int(58, 17) as f64 / 10.0,
        sw_lon: buf.read_int(75, 18) as f64 / 10.0,
        sw_lat: buf.read_int(93, 17) as f64 / 10.0,
        station_type: StationType::from_u8(buf.read_uint(110, 4) as u8),
        ship_type: ShipType::from_u8(buf.read_uint(114, 8) as u8),
        txrx: TransmitMode::from_u8(buf.read_uint(144, 2) as u8),
        interval: buf.read_uint(146, 4) as u8,
        quiet: buf.read_uint(150, 4) as u8,
    }
}

pub fn encode_type23(r: &GroupAssignmentCommand) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(23, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(0, 2); // spare
    b.write_int((r.ne_lon * 10.0).round() as i64, 18);
    b.write_int((r.ne_lat * 10.0).round() as i64, 17);
    b.write_int((r.sw_lon * 10.0).round() as i64, 18);
    b.write_int((r.sw_lat * 10.0).round() as i64, 17);
    b.write_uint(r.station_type.as_u8() as u64, 4);
    b.write_uint(r.ship_type.as_u8() as u64, 8);
    b.write_uint(0, 22); // spare
    b.write_uint(r.txrx.as_u8() as u64, 2);
    b.write_uint(r.interval as u64, 4);
    b.write_uint(r.quiet as u64, 4);
    b.write_uint(0, 6); // spare
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
    fn decodes_type22_broadcast_form() {
        let buf = payload_to_buf("F030p:j2N2P5aJR0r;6f3rj10000", 0);
        let r = decode_type22(&buf);
        assert_eq!(r.mmsi_str(), "003160107");
        assert_eq!(r.channel_a, 2087);
        assert_eq!(r.channel_b, 2088);
        assert!(!r.power);
        assert!(!r.addressed);
        match r.payload {
            ChannelRegionOrDest::Region { ne_lon, sw_lat, .. } => {
                assert!((ne_lon - (-7710.0)).abs() < 1e-6);
                assert!((sw_lat - 3210.0).abs() < 1e-6);
            }
            other => panic!("expected Region, got {:?}", other),
        }
    }

    #[test]
    fn decodes_type22_addressed_form() {
        let buf = payload_to_buf("F@@W>gOP00PH=JrN9l000?wB2HH;", 0);
        let r = decode_type22(&buf);
        assert_eq!(r.mmsi_str(), "017419965");
        assert_eq!(r.channel_a, 3584);
        assert_eq!(r.channel_b, 8);
        assert!(r.power);
        assert!(r.addressed);
        match r.payload {
            ChannelRegionOrDest::Dest { dest1, dest2 } => {
                assert_eq!(format_mmsi(dest1), "028144881");
                assert_eq!(format_mmsi(dest2), "268435519");
            }
            other => panic!("expected Dest, got {:?}", other),
        }
    }

    #[test]
    fn decodes_type23_group_assignment_command() {
        let buf = payload_to_buf("G02:Kn01R`sn@291nj600000900", 2);
        let r = decode_type23(&buf);
        assert_eq!(r.mmsi_str(), "002268120");
        assert!((r.ne_lon - 157.8).abs() < 1e-6);
        assert_eq!(r.ship_type, ShipType::NOT_AVAILABLE);
        assert!((r.ne_lat - 3064.2).abs() < 1e-6);
        assert!((r.sw_lon - 109.6).abs() < 1e-6);
        assert!((r.sw_lat - 3040.8).abs() < 1e-6);
        assert_eq!(r.station_type, StationType::REGIONAL);
        assert_eq!(r.txrx, TransmitMode::TxATxBRxARxB);
        assert_eq!(r.interval, 9);
        assert_eq!(r.quiet, 0);
    }

    #[test]
    fn type22_broadcast_round_trips_through_encode() {
        let buf = payload_to_buf("F030p:j2N2P5aJR0r;6f3rj10000", 0);
        let r = decode_type22(&buf);
        let re = encode_type22(&r);
        assert_eq!(decode_type22(&re), r);
    }

    #[test]
    fn type23_round_trips_through_encode() {
        let buf = payload_to_buf("G02:Kn01R`sn@291nj600000900", 2);
        let r = decode_type23(&buf);
        let re = encode_type23(&r);
        assert_eq!(decode_type23(&re), r);
    }
}
