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

//! DGNSS broadcast binary message (message type 17). `lon`/`lat` here are reduced-precision
//! 1/10-minute offsets from the reference station, not full-precision geographic coordinates —
//! they are reported unconverted, matching how the reference decoder treats this type.

use super::format_mmsi;
use crate::bitbuffer::BitBuffer;

#[derive(Clone, Debug, PartialEq)]
pub struct DgnssBroadcastBinaryMessage {
    pub repeat: u8,
    pub mmsi: u32,
    pub lon: f64,
    pub lat: f64,
    pub data: Vec<u8>,
    pub data_bit_length: usize,
}

impl DgnssBroadcastBinaryMessage {
    pub fn mmsi_str(&self) -> String {
        format_mmsi(self.mmsi)
    }
}

pub fn decode_type17(buf: &BitBuffer) -> DgnssBroadcastBinaryMessage {
    let data_bit_length = buf.len().saturating_sub(80);
    DgnssBroadcastBinaryMessage {
        repeat: buf.read_uint(6, 2) as u8,
        mmsi: buf.read_uint(8, 30) as u32,
        lon: buf.read_int(40, 18) as f64 / 10.0,
        lat: buf.read_int(58, 17) as f64 / 10.0,
        data: buf.read_raw(80, data_bit_length),
        data_bit_length,
    }
}

pub fn encode_type17(r: &DgnssBroadcastBinaryMessage) -> BitBuffer {
    let mut b = BitBuffer::new();
    b.write_uint(17, 6);
    b.write_uint(r.repeat as u64, 2);
    b.write_uint(r.mmsi as u64, 30);
    b.write_uint(0, 2); // spare
    b.write_int((r.lon * 10.0).round() as i64, 18);
    b.write_int((r.lat * 10.0).round() as i64, 17);
    b.write_uint(0, 5); // spare
    b.write_raw(&r.data, r.data_bit_length);
    b
}
