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

//! Position report message types: class A (1/2/3), SAR aircraft (9), class B (18/19), and
//! long range (27).

use super::{format_mmsi, NavigationStatus};
use crate::bitbuffer::BitBuffer;

/// Class A position report (message types 1, 2, 3). The three types share one layout; they
/// differ only in the reporting scheme the transmitting station used.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionReport {
    pub repeat: u8,
    pub mmsi: u32,
    pub status: NavigationStatus,
    pub turn: i8,
    pub speed: Option<f32>,
    pub accuracy: bool,
    pub lon: f64,
    pub lat: f64,
    pub course: Option<f32>,
    pub heading: Option<u16>,
    pub second: u8,
    pub maneuver: u8,
    pub raim: bool,
    pub radio: u32,
}

impl PositionReport {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

pub fn decode_position_report(buf: &BitBuffer) -> PositionReport {
    let turn_raw = buf.read_int(42, 8);
    let speed_raw = buf.read_uint(50, 10);
    let course_raw = buf.read_uint(116, 12);
    let heading_raw = buf.read_uint(128, 9);
    PositionReport {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        status: NavigationStatus::from_u8(buf.read_uint(38, 4) as u8),
        turn: turn_raw as i8,
        speed: if speed_raw >= 1023 { None } else { Some(speed_raw as f32 / 10.0) },
        accuracy: buf.read_uint(60, 1) != 0,
        lon: buf.read_int(61, 28) as f64 / 600000.0,
        lat: buf.read_int(89, 27) as f64 / 600000.0,
        course: if course_raw >= 3600 { None } else { Some(course_raw as f32 / 10.0) },
        heading: if heading_raw == 511 { None } else { Some(heading_raw as u16) },
        second: buf.read_uint(137, 6) as u8,
        maneuver: buf.read_uint(143, 2) as u8,
        raim: buf.read_uint(148, 1) != 0,
        radio: buf.read_uint(149, 19) as u32,
    }
}

pub fn encode_position_report(ais_id: u8, r: &PositionReport) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(ais_id as u64, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(r.status.as_u8() as u64, 4);
    b.write_int(r.turn as i64, 8);
    b.write_uint(r.speed.map(|v| (v * 10.0) as u64).unwrap_or(1023), 10);
    b.write_uint(r.accuracy as u64, 1);
    b.write_int((r.lon * 600000.0).round() as i64, 28);
    b.write_int((r.lat * 600000.0).round() as i64, 27);
    b.write_uint(r.course.map(|v| (v * 10.0) as u64).unwrap_or(3600), 12);
    b.write_uint(r.heading.map(|v| v as u64).unwrap_or(511), 9);
    b.write_uint(r.second as u64, 6);
    b.write_uint(r.maneuver as u64, 2);
    b.write_uint(0, 3); // spare
    b.write_uint(r.raim as u64, 1);
    b.write_uint(r.radio as u64, 19);
    b
}

/// Standard SAR aircraft position report (message type 9).
#[derive(Clone, Debug, PartialEq)]
pub struct StandardSarAircraftReport {
    pub repeat: u8,
    pub mmsi: u32,
    pub altitude: u16,
    pub speed: Option<u16>,
    pub accuracy: bool,
    pub lon: f64,
    pub lat: f64,
    pub course: Option<f32>,
    pub second: u8,
    pub dte: bool,
    pub assigned: bool,
    pub raim: bool,
    pub radio: u32,
}

impl StandardSarAircraftReport {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

pub fn decode_type9(buf: &BitBuffer) -> StandardSarAircraftReport {
    let speed_raw = buf.read_uint(50, 10);
    let course_raw = buf.read_uint(116, 12);
    StandardSarAircraftReport {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        altitude: buf.read_uint(38, 12) as u16,
        speed: if speed_raw >= 1023 { None } else { Some(speed_raw as u16) },
        accuracy: buf.read_uint(60, 1) != 0,
        lon: buf.read_int(61, 28) as f64 / 600000.0,
        lat: buf.read_int(89, 27) as f64 / 600000.0,
        course: if course_raw >= 3600 { None } else { Some(course_raw as f32 / 10.0) },
        second: buf.read_uint(128, 6) as u8,
        dte: buf.read_uint(142, 1) != 0,
        assigned: buf.read_uint(146, 1) != 0,
        raim: buf.read_uint(147, 1) != 0,
        radio: buf.read_uint(148, 20) as u32,
    }
}

pub fn encode_type9(r: &StandardSarAircraftReport) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(9, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(r.altitude as u64, 12);
    b.write_uint(r.speed.map(|v| v as u64).unwrap_or(1023), 10);
    b.write_uint(r.accuracy as u64, 1);
    b.write_int((r.lon * 600000.0).round() as i64, 28);
    b.write_int((r.lat * 600000.0).round() as i64, 27);
    b.write_uint(r.course.map(|v| (v * 10.0) as u64).unwrap_or(3600), 12);
    b.write_uint(r.second as u64, 6);
    b.write_uint(0, 8); // regional reserved
    b.write_uint(r.dte as u64, 1);
    b.write_uint(0, 3); // spare
    b.write_uint(r.assigned as u64, 1);
    b.write_uint(r.raim as u64, 1);
    b.write_uint(r.radio as u64, 20);
    b
}

/// Standard class B position report (message type 18).
#[derive(Clone, Debug, PartialEq)]
pub struct StandardClassBPositionReport {
    pub repeat: u8,
    pub mmsi: u32,
    pub speed: Option<f32>,
    pub accuracy: bool,
    pub lon: f64,
    pub lat: f64,
    pub course: Option<f32>,
    pub heading: Option<u16>,
    pub second: u8,
    pub cs_unit: bool,
    pub display: bool,
    pub dsc: bool,
    pub band: bool,
    pub msg22: bool,
    pub assigned: bool,
    pub raim: bool,
    pub radio: u32,
}

impl StandardClassBPositionReport {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

pub fn decode_type18(buf: &BitBuffer) -> StandardClassBPositionReport {
    let speed_raw = buf.read_uint(46, 10);
    let course_raw = buf.read_uint(112, 12);
    let heading_raw = buf.read_uint(124, 9);
    StandardClassBPositionReport {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        speed: if speed_raw >= 1023 { None } else { Some(speed_raw as f32 / 10.0) },
        accuracy: buf.read_uint(56, 1) != 0,
        lon: buf.read_int(57, 28) as f64 / 600000.0,
        lat: buf.read_int(85, 27) as f64 / 600000.0,
        course: if course_raw >= 3600 { None } else { Some(course_raw as f32 / 10.0) },
        heading: if heading_raw == 511 { None } else { Some(heading_raw as u16) },
        second: buf.read_uint(133, 6) as u8,
        cs_unit: buf.read_uint(141, 1) != 0,
        display: buf.read_uint(142, 1) != 0,
        dsc: buf.read_uint(143, 1) != 0,
        band: buf.read_uint(144, 1) != 0,
        msg22: buf.read_uint(145, 1) != 0,
        assigned: buf.read_uint(146, 1) != 0,
        raim: buf.read_uint(147, 1) != 0,
        radio: buf.read_uint(148, 20) as u32,
    }
}

pub fn encode_type18(r: &StandardClassBPositionReport) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(18, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(0, 8); // reserved
    b.write_uint(r.speed.map(|v| (v * 10.0) as u64).unwrap_or(1023), 10);
    b.write_uint(r.accuracy as u64, 1);
    b.write_int((r.lon * 600000.0).round() as i64, 28);
    b.write_int((r.lat * 600000.0).round() as i64, 27);
    b.write_uint(r.course.map(|v| (v * 10.0) as u64).unwrap_or(3600), 12);
    b.write_uint(r.heading.map(|v| v as u64).unwrap_or(511), 9);
    b.write_uint(r.second as u64, 6);
    b.write_uint(0, 2); // reserved_2
    b.write_uint(r.cs_unit as u64, 1);
    b.write_uint(r.display as u64, 1);
    b.write_uint(r.dsc as u64, 1);
    b.write_uint(r.band as u64, 1);
    b.write_uint(r.msg22 as u64, 1);
    b.write_uint(r.assigned as u64, 1);
    b.write_uint(r.raim as u64, 1);
    b.write_uint(r.radio as u64, 20);
    b
}

/// Extended class B position report (message type 19).
#[derive(Clone, Debug, PartialEq)]
pub struct ExtendedClassBPositionReport {
    pub repeat: u8,
    pub mmsi: u32,
    pub speed: Option<f32>,
    pub accuracy: bool,
    pub lon: f64,
    pub lat: f64,
    pub course: Option<f32>,
    pub heading: Option<u16>,
    pub second: u8,
    pub shipname: String,
    pub ship_type: super::ShipType,
    pub to_bow: u16,
    pub to_stern: u16,
    pub to_port: u8,
    pub to_starboard: u8,
    pub epfd: super::EpfdType,
    pub raim: bool,
    pub dte: bool,
    pub assigned: bool,
}

impl ExtendedClassBPositionReport {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

pub fn decode_type19(buf: &BitBuffer) -> ExtendedClassBPositionReport {
    let speed_raw = buf.read_uint(46, 10);
    let course_raw = buf.read_uint(112, 12);
    let heading_raw = buf.read_uint(124, 9);
    ExtendedClassBPositionReport {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        speed: if speed_raw >= 1023 { None } else { Some(speed_raw as f32 / 10.0) },
        accuracy: buf.read_uint(56, 1) != 0,
        lon: buf.read_int(57, 28) as f64 / 600000.0,
        lat: buf.read_int(85, 27) as f64 / 600000.0,
        course: if course_raw >= 3600 { None } else { Some(course_raw as f32 / 10.0) },
        heading: if heading_raw == 511 { None } else { Some(heading_raw as u16) },
        second: buf.read_uint(133, 6) as u8,
        shipname: buf.read_text(143, 120),
        ship_type: super::ShipType::from_u8(buf.read_uint(263, 8) as u8),
        to_bow: buf.read_uint(271, 9) as u16,
        to_stern: buf.read_uint(280, 9) as u16,
        to_port: buf.read_uint(289, 6) as u8,
        to_starboard: buf.read_uint(295, 6) as u8,
        epfd: super::EpfdType::from_u8(buf.read_uint(301, 4) as u8),
        raim: buf.read_uint(305, 1) != 0,
        dte: buf.read_uint(306, 1) != 0,
        assigned: buf.read_uint(307, 1) != 0,
    }
}

pub fn encode_type19(r: &ExtendedClassBPositionReport) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(19, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(0, 8); // reserved
    b.write_uint(r.speed.map(|v| (v * 10.0) as u64).unwrap_or(1023), 10);
    b.write_uint(r.accuracy as u64, 1);
    b.write_int((r.lon * 600000.0).round() as i64, 28);
    b.write_int((r.lat * 600000.0).round() as i64, 27);
    b.write_uint(r.course.map(|v| (v * 10.0) as u64).unwrap_or(3600), 12);
    b.write_uint(r.heading.map(|v| v as u64).unwrap_or(511), 9);
    b.write_uint(r.second as u64, 6);
    b.write_uint(0, 4); // regional reserved
    b.write_text(&r.shipname, 120);
    b.write_uint(r.ship_type.as_u8() as u64, 8);
    b.write_uint(r.to_bow as u64, 9);
    b.write_uint(r.to_stern as u64, 9);
    b.write_uint(r.to_port as u64, 6);
    b.write_uint(r.to_starboard as u64, 6);
    b.write_uint(r.epfd.as_u8() as u64, 4);
    b.write_uint(r.raim as u64, 1);
    b.write_uint(r.dte as u64, 1);
    b.write_uint(r.assigned as u64, 1);
    b.write_uint(0, 4); // spare
    b
}

/// Long range AIS broadcast message (message type 27), reduced precision for satellite relay.
#[derive(Clone, Debug, PartialEq)]
pub struct LongRangeAisBroadcastMessage {
    pub repeat: u8,
    pub mmsi: u32,
    pub accuracy: bool,
    pub raim: bool,
    pub status: NavigationStatus,
    pub lon: f64,
    pub lat: f64,
    pub speed: u16,
    pub course: u16,
    pub gnss: bool,
}

impl LongRangeAisBroadcastMessage {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

pub fn decode_type27(buf: &BitBuffer) -> LongRangeAisBroadcastMessage {
    LongRangeAisBroadcastMessage {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        accuracy: buf.read_uint(38, 1) != 0,
        raim: buf.read_uint(39, 1) != 0,
        status: NavigationStatus::from_u8(buf.read_uint(40, 4) as u8),
        lon: buf.read_int(44, 18) as f64 / 600.0,
        lat: buf.read_int(62, 17) as f64 / 600.0,
        speed: buf.read_uint(79, 6) as u16,
        course: buf.read_uint(85, 9) as u16,
        gnss: buf.read_uint(94, 1) != 0,
    }
}

pub fn encode_type27(r: &LongRangeAisBroadcastMessage) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(27, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(r.accuracy as u64, 1);
    b.write_uint(r.raim as u64, 1);
    b.write_uint(r.status.as_u8() as u64, 4);
    b.write_int((r.lon * 600.0).round() as i64, 18);
    b.write_int((r.lat * 600.0).round() as i64, 17);
    b.write_uint(r.speed as u64, 6);
    b.write_uint(r.course as u64, 9);
    b.write_uint(r.gnss as u64, 1);
    b.write_uint(0, 1); // spare
    b
}
