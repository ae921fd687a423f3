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

//! Base station report (message type 4) and UTC/date response (message type 11). Both share
//! the same wire layout; only the semantic role of the transmitting station differs.

use super::{format_mmsi, EpfdType};
use crate::bitbuffer::BitBuffer;

#[derive(Clone, Debug, PartialEq)]
pub struct BaseStationReport {
    pub repeat: u8,
    pub mmsi: u32,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub accuracy: bool,
    pub lon: f64,
    pub lat: f64,
    pub epfd: EpfdType,
    pub raim: bool,
    pub radio: u32,
}

impl BaseStationReport {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

pub fn decode(buf: &BitBuffer) -> BaseStationReport {
    BaseStationReport {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        year: buf.read_uint(38, 14) as u16,
        month: buf.read_uint(52, 4) as u8,
        day: buf.read_uint(56, 5) as u8,
        hour: buf.read_uint(61, 5) as u8,
        minute: buf.read_uint(66, 6) as u8,
        second: buf.read_uint(72, 6) as u8,
        accuracy: buf.read_uint(78, 1) != 0,
        lon: buf.read_int(79, 28) as f64 / 600000.0,
        lat: buf.read_int(107, 27) as f64 / 600000.0,
        epfd: EpfdType::from_u8(buf.read_uint(134, 4) as u8),
        raim: buf.read_uint(148, 1) != 0,
        radio: buf.read_uint(149, 19) as u32,
    }
}

pub fn encode(ais_id: u8, r: &BaseStationReport) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(ais_id as u64, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(r.year as u64, 14);
    b.write_uint(r.month as u64, 4);
    b.write_uint(r.day as u64, 5);
    b.write_uint(r.hour as u64, 5);
    b.write_uint(r.minute as u64, 6);
    b.write_uint(r.second as u64, 6);
    b.write_uint(r.accuracy as u64, 1);
    b.write_int((r.lon * 600000.0).round() as i64, 28);
    b.write_int((r.lat * 600000.0).round() as i64, 27);
    b.write_uint(r.epfd.as_u8() as u64, 4);
    b.write_uint(0, 10); // spare
    b.write_uint(r.raim as u64, 1);
    b.write_uint(r.radio as u64, 19);
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
    fn decodes_type11_utc_date_response() {
        let buf = payload_to_buf(";4R33:1uUK2F`q?mOt@@GoQ00000", 0);
        let r = decode(&buf);
        assert!((r.lon - (-94.4077)).abs() < 1e-4);
        assert!((r.lat - 28.4091).abs() < 1e-4);
        assert!(r.accuracy);
        assert_eq!(r.year, 2009);
        assert_eq!(r.month, 5);
        assert_eq!(r.day, 22);
        assert_eq!(r.hour, 2);
        assert_eq!(r.minute, 22);
        assert_eq!(r.second, 40);
    }

    #[test]
    fn round_trips_through_encode() {
        let buf = payload_to_buf(";4R33:1uUK2F`q?mOt@@GoQ00000", 0);
        let r = decode(&buf);
        let re = encode(11, &r);
        assert_eq!(decode(&re), r);
    }
}
