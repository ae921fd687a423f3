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

//! Serde projection from a decoded [`AisMessage`] to the crate's public JSON contract (§6).
//!
//! `enum_as_int` governs only fields backed by a genuine closed Rust enum (navigation status,
//! EPFD, tx/rx mode); numeric code tables that this crate models as bare newtypes (ship type,
//! nav-aid type, station type) always serialise as plain integers, matching how the reference
//! decoder treats the ITU code tables it doesn't otherwise interpret.

use crate::ais::*;
use crate::sentence::NmeaSentence;
use serde::Serialize;

/// Rendering options for the JSON projection.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonOptions {
    pub enum_as_int: bool,
}

/// A rendered enum field: either its integer code or its symbolic name, per [`JsonOptions`].
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum JsonEnum {
    Int(u8),
    Name(String),
}

fn render_status(v: NavigationStatus, opts: JsonOptions) -> JsonEnum {
    if opts.enum_as_int {
        JsonEnum::Int(v.as_u8())
    } else {
        JsonEnum::Name(format!("{:?}", v))
    }
}

fn render_epfd(v: EpfdType, opts: JsonOptions) -> JsonEnum {
    if opts.enum_as_int {
        JsonEnum::Int(v.as_u8())
    } else {
        JsonEnum::Name(format!("{:?}", v))
    }
}

fn render_epfd_opt(v: Option<EpfdType>, opts: JsonOptions) -> Option<JsonEnum> {
    v.map(|v| render_epfd(v, opts))
}

fn render_txrx(v: TransmitMode, opts: JsonOptions) -> JsonEnum {
    if opts.enum_as_int {
        JsonEnum::Int(v.as_u8())
    } else {
        JsonEnum::Name(format!("{:?}", v))
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonPositionReport {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub status: JsonEnum,
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

fn position_report(ais_id: u8, r: &PositionReport, opts: JsonOptions) -> JsonPositionReport {
    JsonPositionReport {
        msg_type: ais_id,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        status: render_status(r.status, opts),
        turn: r.turn,
        speed: r.speed,
        accuracy: r.accuracy,
        lon: r.lon,
        lat: r.lat,
        course: r.course,
        heading: r.heading,
        second: r.second,
        maneuver: r.maneuver,
        raim: r.raim,
        radio: r.radio,
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonBaseStationReport {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub accuracy: bool,
    pub lon: f64,
    pub lat: f64,
    pub epfd: JsonEnum,
    pub raim: bool,
    pub radio: u32,
}

fn base_station_report(ais_id: u8, r: &BaseStationReport, opts: JsonOptions) -> JsonBaseStationReport {
    JsonBaseStationReport {
        msg_type: ais_id,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        year: r.year,
        month: r.month,
        day: r.day,
        hour: r.hour,
        minute: r.minute,
        second: r.second,
        accuracy: r.accuracy,
        lon: r.lon,
        lat: r.lat,
        epfd: render_epfd(r.epfd, opts),
        raim: r.raim,
        radio: r.radio,
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonStaticAndVoyageData {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub ais_version: u8,
    pub imo: u32,
    pub callsign: String,
    pub shipname: String,
    pub ship_type: u8,
    pub to_bow: u16,
    pub to_stern: u16,
    pub to_port: u8,
    pub to_starboard: u8,
    pub epfd: JsonEnum,
    pub eta_month: u8,
    pub eta_day: u8,
    pub eta_hour: u8,
    pub eta_minute: u8,
    pub draught: f32,
    pub destination: String,
    pub dte: bool,
}

fn static_and_voyage_data(r: &StaticAndVoyageData, opts: JsonOptions) -> JsonStaticAndVoyageData {
    JsonStaticAndVoyageData {
        msg_type: 5,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        ais_version: r.ais_version,
        imo: r.imo,
        callsign: r.callsign.clone(),
        shipname: r.shipname.clone(),
        ship_type: r.ship_type.as_u8(),
        to_bow: r.to_bow,
        to_stern: r.to_stern,
        to_port: r.to_port,
        to_starboard: r.to_starboard,
        epfd: render_epfd(r.epfd, opts),
        eta_month: r.eta_month,
        eta_day: r.eta_day,
        eta_hour: r.eta_hour,
        eta_minute: r.eta_minute,
        draught: r.draught,
        destination: r.destination.clone(),
        dte: r.dte,
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonBinaryAddressedMessage {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub sequence_number: u8,
    pub dest_mmsi: String,
    pub retransmit: bool,
    pub dac: u16,
    pub fid: u8,
    pub data_hex: String,
}

fn binary_addressed_message(r: &BinaryAddressedMessage) -> JsonBinaryAddressedMessage {
    JsonBinaryAddressedMessage {
        msg_type: 6,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        sequence_number: r.sequence_number,
        dest_mmsi: r.dest_mmsi_str(),
        retransmit: r.retransmit,
        dac: r.dac,
        fid: r.fid,
        data_hex: hex(&r.data),
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonBinaryAcknowledge {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub mmsi1: Option<String>,
    pub mmsiseq1: Option<u8>,
    pub mmsi2: Option<String>,
    pub mmsiseq2: Option<u8>,
    pub mmsi3: Option<String>,
    pub mmsiseq3: Option<u8>,
    pub mmsi4: Option<String>,
    pub mmsiseq4: Option<u8>,
}

fn binary_acknowledge(ais_id: u8, r: &BinaryAcknowledge) -> JsonBinaryAcknowledge {
    JsonBinaryAcknowledge {
        msg_type: ais_id,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        mmsi1: r.mmsi1.map(format_mmsi),
        mmsiseq1: r.mmsiseq1,
        mmsi2: r.mmsi2.map(format_mmsi),
        mmsiseq2: r.mmsiseq2,
        mmsi3: r.mmsi3.map(format_mmsi),
        mmsiseq3: r.mmsiseq3,
        mmsi4: r.mmsi4.map(format_mmsi),
        mmsiseq4: r.mmsiseq4,
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonBinaryBroadcastMessage {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub dac: u16,
    pub fid: u8,
    pub data_hex: String,
}

fn binary_broadcast_message(r: &BinaryBroadcastMessage) -> JsonBinaryBroadcastMessage {
    JsonBinaryBroadcastMessage {
        msg_type: 8,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        dac: r.dac,
        fid: r.fid,
        data_hex: hex(&r.data),
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonStandardSarAircraftReport {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
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

fn standard_sar_aircraft_report(r: &StandardSarAircraftReport) -> JsonStandardSarAircraftReport {
    JsonStandardSarAircraftReport {
        msg_type: 9,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        altitude: r.altitude,
        speed: r.speed,
        accuracy: r.accuracy,
        lon: r.lon,
        lat: r.lat,
        course: r.course,
        second: r.second,
        dte: r.dte,
        assigned: r.assigned,
        raim: r.raim,
        radio: r.radio,
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonUtcDateInquiry {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub dest_mmsi: String,
}

fn utc_date_inquiry(r: &UtcDateInquiry) -> JsonUtcDateInquiry {
    JsonUtcDateInquiry {
        msg_type: 10,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        dest_mmsi: r.dest_mmsi_str(),
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonAddressedSafetyMessage {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub seqno: u8,
    pub dest_mmsi: String,
    pub retransmit: bool,
    pub text: String,
}

fn addressed_safety_message(r: &AddressedSafetyMessage) -> JsonAddressedSafetyMessage {
    JsonAddressedSafetyMessage {
        msg_type: 12,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        seqno: r.seqno,
        dest_mmsi: r.dest_mmsi_str(),
        retransmit: r.retransmit,
        text: r.text.clone(),
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonBroadcastSafetyMessage {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub text: String,
}

fn broadcast_safety_message(r: &BroadcastSafetyMessage) -> JsonBroadcastSafetyMessage {
    JsonBroadcastSafetyMessage {
        msg_type: 14,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        text: r.text.clone(),
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonInterrogation {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub mmsi1: Option<String>,
    pub type1_1: Option<u8>,
    pub offset1_1: Option<u16>,
    pub type1_2: Option<u8>,
    pub offset1_2: Option<u16>,
    pub mmsi2: Option<String>,
    pub type2_1: Option<u8>,
    pub offset2_1: Option<u16>,
}

fn interrogation(r: &Interrogation) -> JsonInterrogation {
    JsonInterrogation {
        msg_type: 15,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        mmsi1: r.mmsi1.map(format_mmsi),
        type1_1: r.type1_1,
        offset1_1: r.offset1_1,
        type1_2: r.type1_2,
        offset1_2: r.offset1_2,
        mmsi2: r.mmsi2.map(format_mmsi),
        type2_1: r.type2_1,
        offset2_1: r.offset2_1,
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonAssignedModeCommand {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub mmsi1: String,
    pub offset1: u16,
    pub increment1: u16,
    pub mmsi2: String,
    pub offset2: Option<u16>,
    pub increment2: Option<u16>,
}

fn assigned_mode_command(r: &AssignedModeCommand) -> JsonAssignedModeCommand {
    JsonAssignedModeCommand {
        msg_type: 16,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        mmsi1: format_mmsi(r.mmsi1),
        offset1: r.offset1,
        increment1: r.increment1,
        mmsi2: r.mmsi2_str(),
        offset2: r.offset2,
        increment2: r.increment2,
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonDgnssBroadcastBinaryMessage {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub lon: f64,
    pub lat: f64,
    pub data_hex: String,
}

fn dgnss_broadcast_binary_message(r: &DgnssBroadcastBinaryMessage) -> JsonDgnssBroadcastBinaryMessage {
    JsonDgnssBroadcastBinaryMessage {
        msg_type: 17,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        lon: r.lon,
        lat: r.lat,
        data_hex: hex(&r.data),
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonStandardClassBPositionReport {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
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

fn standard_class_b_position_report(r: &StandardClassBPositionReport) -> JsonStandardClassBPositionReport {
    JsonStandardClassBPositionReport {
        msg_type: 18,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        speed: r.speed,
        accuracy: r.accuracy,
        lon: r.lon,
        lat: r.lat,
        course: r.course,
        heading: r.heading,
        second: r.second,
        cs_unit: r.cs_unit,
        display: r.display,
        dsc: r.dsc,
        band: r.band,
        msg22: r.msg22,
        assigned: r.assigned,
        raim: r.raim,
        radio: r.radio,
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonExtendedClassBPositionReport {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub speed: Option<f32>,
    pub accuracy: bool,
    pub lon: f64,
    pub lat: f64,
    pub course: Option<f32>,
    pub heading: Option<u16>,
    pub second: u8,
    pub shipname: String,
    pub ship_type: u8,
    pub to_bow: u16,
    pub to_stern: u16,
    pub to_port: u8,
    pub to_starboard: u8,
    pub epfd: JsonEnum,
    pub raim: bool,
    pub dte: bool,
    pub assigned: bool,
}

fn extended_class_b_position_report(r: &ExtendedClassBPositionReport, opts: JsonOptions) -> JsonExtendedClassBPositionReport {
    JsonExtendedClassBPositionReport {
        msg_type: 19,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        speed: r.speed,
        accuracy: r.accuracy,
        lon: r.lon,
        lat: r.lat,
        course: r.course,
        heading: r.heading,
        second: r.second,
        shipname: r.shipname.clone(),
        ship_type: r.ship_type.as_u8(),
        to_bow: r.to_bow,
        to_stern: r.to_stern,
        to_port: r.to_port,
        to_starboard: r.to_starboard,
        epfd: render_epfd(r.epfd, opts),
        raim: r.raim,
        dte: r.dte,
        assigned: r.assigned,
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonDataLinkManagementMessage {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
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

fn data_link_management_message(r: &DataLinkManagementMessage) -> JsonDataLinkManagementMessage {
    JsonDataLinkManagementMessage {
        msg_type: 20,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        offset1: r.offset1,
        number1: r.number1,
        timeout1: r.timeout1,
        increment1: r.increment1,
        offset2: r.offset2,
        number2: r.number2,
        timeout2: r.timeout2,
        increment2: r.increment2,
        offset3: r.offset3,
        number3: r.number3,
        timeout3: r.timeout3,
        increment3: r.increment3,
        offset4: r.offset4,
        number4: r.number4,
        timeout4: r.timeout4,
        increment4: r.increment4,
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonAidToNavigationReport {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub aid_type: Option<u8>,
    pub name: String,
    pub accuracy: bool,
    pub lon: f64,
    pub lat: f64,
    pub to_bow: u16,
    pub to_stern: u16,
    pub to_port: u8,
    pub to_starboard: u8,
    pub epfd: Option<JsonEnum>,
    pub second: u8,
    pub off_position: bool,
    pub raim: bool,
    pub virtual_aid: bool,
    pub assigned: bool,
    pub name_ext: Option<String>,
}

fn aid_to_navigation_report(r: &AidToNavigationReport, opts: JsonOptions) -> JsonAidToNavigationReport {
    JsonAidToNavigationReport {
        msg_type: 21,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        aid_type: r.aid_type.map(NavAidType::as_u8),
        name: r.name.clone(),
        accuracy: r.accuracy,
        lon: r.lon,
        lat: r.lat,
        to_bow: r.to_bow,
        to_stern: r.to_stern,
        to_port: r.to_port,
        to_starboard: r.to_starboard,
        epfd: render_epfd_opt(r.epfd, opts),
        second: r.second,
        off_position: r.off_position,
        raim: r.raim,
        virtual_aid: r.virtual_aid,
        assigned: r.assigned,
        name_ext: r.name_ext.clone(),
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum JsonChannelRegionOrDest {
    Region { ne_lon: f64, ne_lat: f64, sw_lon: f64, sw_lat: f64 },
    Dest { dest1: String, dest2: String },
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonChannelManagement {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub channel_a: u16,
    pub channel_b: u16,
    pub txrx: JsonEnum,
    pub power: bool,
    pub addressed: bool,
    pub band_a: bool,
    pub band_b: bool,
    pub zonesize: u8,
    #[serde(flatten)]
    pub payload: JsonChannelRegionOrDest,
}

fn channel_management(r: &ChannelManagement, opts: JsonOptions) -> JsonChannelManagement {
    let payload = match &r.payload {
        ChannelRegionOrDest::Region { ne_lon, ne_lat, sw_lon, sw_lat } => JsonChannelRegionOrDest::Region {
            ne_lon: *ne_lon,
            ne_lat: *ne_lat,
            sw_lon: *sw_lon,
            sw_lat: *sw_lat,
        },
        ChannelRegionOrDest::Dest { dest1, dest2 } => JsonChannelRegionOrDest::Dest {
            dest1: format_mmsi(*dest1),
            dest2: format_mmsi(*dest2),
        },
    };
    JsonChannelManagement {
        msg_type: 22,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        channel_a: r.channel_a,
        channel_b: r.channel_b,
        txrx: render_txrx(r.txrx, opts),
        power: r.power,
        addressed: r.addressed,
        band_a: r.band_a,
        band_b: r.band_b,
        zonesize: r.zonesize,
        payload,
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonGroupAssignmentCommand {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub ne_lon: f64,
    pub ne_lat: f64,
    pub sw_lon: f64,
    pub sw_lat: f64,
    pub station_type: u8,
    pub ship_type: u8,
    pub txrx: JsonEnum,
    pub interval: u8,
    pub quiet: u8,
}

fn group_assignment_command(r: &GroupAssignmentCommand, opts: JsonOptions) -> JsonGroupAssignmentCommand {
    JsonGroupAssignmentCommand {
        msg_type: 23,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        ne_lon: r.ne_lon,
        ne_lat: r.ne_lat,
        sw_lon: r.sw_lon,
        sw_lat: r.sw_lat,
        station_type: r.station_type.as_u8(),
        ship_type: r.ship_type.as_u8(),
        txrx: render_txrx(r.txrx, opts),
        interval: r.interval,
        quiet: r.quiet,
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum JsonStaticDataReport {
    PartA {
        msg_type: u8,
        repeat: u8,
        mmsi: String,
        shipname: String,
    },
    PartB {
        msg_type: u8,
        repeat: u8,
        mmsi: String,
        ship_type: u8,
        vendorid: String,
        callsign: String,
        to_bow: u16,
        to_stern: u16,
        to_port: u8,
        to_starboard: u8,
    },
}

fn static_data_report(r: &StaticDataReport) -> JsonStaticDataReport {
    match r {
        StaticDataReport::PartA { repeat, mmsi, shipname } => JsonStaticDataReport::PartA {
            msg_type: 24,
            repeat: *repeat,
            mmsi: format_mmsi(*mmsi),
            shipname: shipname.clone(),
        },
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
        } => JsonStaticDataReport::PartB {
            msg_type: 24,
            repeat: *repeat,
            mmsi: format_mmsi(*mmsi),
            ship_type: ship_type.as_u8(),
            vendorid: vendorid.clone(),
            callsign: callsign.clone(),
            to_bow: *to_bow,
            to_stern: *to_stern,
            to_port: *to_port,
            to_starboard: *to_starboard,
        },
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonSingleSlotBinaryMessage {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub addressed: bool,
    pub structured: bool,
    pub dest_mmsi: Option<String>,
    pub app_id: Option<u16>,
    pub data_hex: String,
}

fn single_slot_binary_message(r: &SingleSlotBinaryMessage) -> JsonSingleSlotBinaryMessage {
    JsonSingleSlotBinaryMessage {
        msg_type: 25,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        addressed: r.addressed,
        structured: r.structured,
        dest_mmsi: r.dest_mmsi_str(),
        app_id: r.app_id,
        data_hex: hex(&r.data),
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonMultipleSlotBinaryMessage {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub addressed: bool,
    pub structured: bool,
    pub dest_mmsi: Option<String>,
    pub app_id: Option<u16>,
    pub data_hex: String,
}

fn multiple_slot_binary_message(r: &MultipleSlotBinaryMessage) -> JsonMultipleSlotBinaryMessage {
    JsonMultipleSlotBinaryMessage {
        msg_type: 26,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        addressed: r.addressed,
        structured: r.structured,
        dest_mmsi: r.dest_mmsi_str(),
        app_id: r.app_id,
        data_hex: hex(&r.data),
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JsonLongRangeAisBroadcastMessage {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: String,
    pub accuracy: bool,
    pub raim: bool,
    pub status: JsonEnum,
    pub lon: f64,
    pub lat: f64,
    pub speed: u16,
    pub course: u16,
    pub gnss: bool,
}

fn long_range_ais_broadcast_message(r: &LongRangeAisBroadcastMessage, opts: JsonOptions) -> JsonLongRangeAisBroadcastMessage {
    JsonLongRangeAisBroadcastMessage {
        msg_type: 27,
        repeat: r.repeat,
        mmsi: r.mmsi_str(),
        accuracy: r.accuracy,
        raim: r.raim,
        status: render_status(r.status, opts),
        lon: r.lon,
        lat: r.lat,
        speed: r.speed,
        course: r.course,
        gnss: r.gnss,
    }
}

/// The serde projection of a decoded [`AisMessage`], one variant per ais_id.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum JsonAisMessage {
    Position(JsonPositionReport),
    BaseStation(JsonBaseStationReport),
    StaticAndVoyageData(JsonStaticAndVoyageData),
    BinaryAddressed(JsonBinaryAddressedMessage),
    BinaryAcknowledge(JsonBinaryAcknowledge),
    BinaryBroadcast(JsonBinaryBroadcastMessage),
    SarAircraft(JsonStandardSarAircraftReport),
    UtcDateInquiry(JsonUtcDateInquiry),
    AddressedSafety(JsonAddressedSafetyMessage),
    BroadcastSafety(JsonBroadcastSafetyMessage),
    Interrogation(JsonInterrogation),
    AssignedModeCommand(JsonAssignedModeCommand),
    DgnssBroadcast(JsonDgnssBroadcastBinaryMessage),
    ClassBPosition(JsonStandardClassBPositionReport),
    ExtendedClassBPosition(JsonExtendedClassBPositionReport),
    DataLinkManagement(JsonDataLinkManagementMessage),
    AidToNavigation(JsonAidToNavigationReport),
    ChannelManagement(JsonChannelManagement),
    GroupAssignmentCommand(JsonGroupAssignmentCommand),
    StaticDataReport(JsonStaticDataReport),
    SingleSlotBinary(JsonSingleSlotBinaryMessage),
    MultipleSlotBinary(JsonMultipleSlotBinaryMessage),
    LongRangeBroadcast(JsonLongRangeAisBroadcastMessage),
}

/// Projects a decoded message into its JSON form under the given rendering options.
pub fn to_json(msg: &AisMessage, opts: JsonOptions) -> JsonAisMessage {
    match msg {
        AisMessage::Type1(r) => JsonAisMessage::Position(position_report(1, r, opts)),
        AisMessage::Type2(r) => JsonAisMessage::Position(position_report(2, r, opts)),
        AisMessage::Type3(r) => JsonAisMessage::Position(position_report(3, r, opts)),
        AisMessage::Type4(r) => JsonAisMessage::BaseStation(base_station_report(4, r, opts)),
        AisMessage::Type5(r) => JsonAisMessage::StaticAndVoyageData(static_and_voyage_data(r, opts)),
        AisMessage::Type6(r) => JsonAisMessage::BinaryAddressed(binary_addressed_message(r)),
        AisMessage::Type7(r) => JsonAisMessage::BinaryAcknowledge(binary_acknowledge(7, r)),
        AisMessage::Type8(r) => JsonAisMessage::BinaryBroadcast(binary_broadcast_message(r)),
        AisMessage::Type9(r) => JsonAisMessage::SarAircraft(standard_sar_aircraft_report(r)),
        AisMessage::Type10(r) => JsonAisMessage::UtcDateInquiry(utc_date_inquiry(r)),
        AisMessage::Type11(r) => JsonAisMessage::BaseStation(base_station_report(11, r, opts)),
        AisMessage::Type12(r) => JsonAisMessage::AddressedSafety(addressed_safety_message(r)),
        AisMessage::Type13(r) => JsonAisMessage::BinaryAcknowledge(binary_acknowledge(13, r)),
        AisMessage::Type14(r) => JsonAisMessage::BroadcastSafety(broadcast_safety_message(r)),
        AisMessage::Type15(r) => JsonAisMessage::Interrogation(interrogation(r)),
        AisMessage::Type16(r) => JsonAisMessage::AssignedModeCommand(assigned_mode_command(r)),
        AisMessage::Type17(r) => JsonAisMessage::DgnssBroadcast(dgnss_broadcast_binary_message(r)),
        AisMessage::Type18(r) => JsonAisMessage::ClassBPosition(standard_class_b_position_report(r)),
        AisMessage::Type19(r) => JsonAisMessage::ExtendedClassBPosition(extended_class_b_position_report(r, opts)),
        AisMessage::Type20(r) => JsonAisMessage::DataLinkManagement(data_link_management_message(r)),
        AisMessage::Type21(r) => JsonAisMessage::AidToNavigation(aid_to_navigation_report(r, opts)),
        AisMessage::Type22(r) => JsonAisMessage::ChannelManagement(channel_management(r, opts)),
        AisMessage::Type23(r) => JsonAisMessage::GroupAssignmentCommand(group_assignment_command(r, opts)),
        AisMessage::Type24(r) => JsonAisMessage::StaticDataReport(static_data_report(r)),
        AisMessage::Type25(r) => JsonAisMessage::SingleSlotBinary(single_slot_binary_message(r)),
        AisMessage::Type26(r) => JsonAisMessage::MultipleSlotBinary(multiple_slot_binary_message(r)),
        AisMessage::Type27(r) => JsonAisMessage::LongRangeBroadcast(long_range_ais_broadcast_message(r, opts)),
    }
}

impl From<&AisMessage> for JsonAisMessage {
    fn from(msg: &AisMessage) -> Self {
        to_json(msg, JsonOptions::default())
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// The "decode and merge" view from §6: a decoded record plus the envelope fields of the single
/// sentence (or, for a multi-fragment group, the first sentence) that produced it.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DecodedSentence {
    pub talker: String,
    pub channel: Option<char>,
    pub frag_cnt: u8,
    pub frag_num: u8,
    pub seq_id: Option<u8>,
    pub payload: String,
    pub fill_bits: u8,
    pub checksum: u8,
    pub raw: String,
    pub ais_id: u8,
    #[serde(flatten)]
    pub message: JsonAisMessage,
}

impl DecodedSentence {
    pub fn new(sentence: &NmeaSentence, message: &AisMessage, opts: JsonOptions) -> Self {
        DecodedSentence {
            talker: sentence.talker.clone(),
            channel: sentence.channel,
            frag_cnt: sentence.fragment_count,
            frag_num: sentence.fragment_index,
            seq_id: sentence.seq_id,
            payload: sentence.payload.clone(),
            fill_bits: sentence.fill_bits,
            checksum: sentence.checksum,
            raw: sentence.raw.clone(),
            ais_id: message.ais_id(),
            message: to_json(message, opts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::parse;

    fn decode_line(line: &str) -> (NmeaSentence, AisMessage) {
        let s = parse(line).unwrap();
        let bits = crate::armor::decode(&s.payload, s.fill_bits).unwrap();
        let msg = crate::ais::decode(&crate::bitbuffer::BitBuffer::from_bits(bits)).unwrap();
        (s, msg)
    }

    #[test]
    fn position_report_projects_to_json() {
        let (_s, msg) = decode_line("!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C");
        match to_json(&msg, JsonOptions::default()) {
            JsonAisMessage::Position(p) => {
                assert_eq!(p.mmsi, "366053209");
                assert_eq!(p.msg_type, 1);
                assert_eq!(p.status, JsonEnum::Name("RestrictedManoeuverability".to_string()));
            }
            other => panic!("expected Position, got {:?}", other),
        }
    }

    #[test]
    fn enum_as_int_renders_integer_code() {
        let (_s, msg) = decode_line("!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C");
        match to_json(&msg, JsonOptions { enum_as_int: true }) {
            JsonAisMessage::Position(p) => assert_eq!(p.status, JsonEnum::Int(3)),
            other => panic!("expected Position, got {:?}", other),
        }
    }

    #[test]
    fn decoded_sentence_carries_envelope_fields() {
        let (s, msg) = decode_line("!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C");
        let decoded = DecodedSentence::new(&s, &msg, JsonOptions::default());
        assert_eq!(decoded.talker, "AI");
        assert_eq!(decoded.ais_id, 1);
        assert_eq!(decoded.channel, Some('B'));
        let json = serde_json::to_string(&decoded).unwrap();
        assert!(json.contains("\"ais_id\":1"));
    }

    #[test]
    fn binary_addressed_message_renders_data_as_hex() {
        let buf = crate::bitbuffer::BitBuffer::from_bits(
            crate::armor::decode("6B?n;be:cbapalgc;i6?Ow4", 2).unwrap(),
        );
        let r = crate::ais::decode_type6(&buf);
        let json = binary_addressed_message(&r);
        assert!(!json.data_hex.is_empty());
        assert_eq!(json.dest_mmsi, "313240222");
    }

    #[test]
    fn static_data_report_part_b_projects_untagged() {
        let buf = crate::bitbuffer::BitBuffer::from_bits(
            crate::armor::decode("H52KMeDU653hhhi0000000000000", 0).unwrap(),
        );
        let r = crate::ais::decode_type24(&buf);
        match static_data_report(&r) {
            JsonStaticDataReport::PartB { msg_type, vendorid, .. } => {
                assert_eq!(msg_type, 24);
                assert_eq!(vendorid, "FEC");
            }
            other => panic!("expected PartB, got {:?}", other),
        }
    }
}
