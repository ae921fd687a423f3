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

//! Field schema registry (C5) and message decoder/encoder (C6/C7) for the 27 AIS message types.
//!
//! Dispatch is a single `match` on `ais_id` in both directions, against a tagged-variant
//! `AisMessage` enum — not per-type class polymorphism.

mod ack;
mod basestation;
mod binary;
mod channel;
mod dgnss;
mod navaid;
mod position;
mod safety;
mod voyage;

pub use ack::*;
pub use basestation::*;
pub use binary::*;
pub use channel::*;
pub use dgnss::*;
pub use navaid::*;
pub use position::*;
pub use safety::*;
pub use voyage::*;

use crate::bitbuffer::BitBuffer;
use crate::error::ParseError;

/// Formats an MMSI as a zero-padded 9-digit decimal string; a presentation invariant, not a
/// numeric one (§4.5).
pub fn format_mmsi(mmsi: u32) -> String {
    format!("{:09}", mmsi)
}

/// Navigation status (message types 1/2/3/27), field width 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationStatus {
    UnderWayUsingEngine,
    AtAnchor,
    NotUnderCommand,
    RestrictedManoeuverability,
    ConstrainedByDraught,
    Moored,
    Aground,
    EngagedInFishing,
    UnderWaySailing,
    Reserved9,
    Reserved10,
    PowerDrivenVesselTowingAstern,
    PowerDrivenVesselPushingAheadOrTowingAlongside,
    Reserved13,
    AisSartActiveOrAtoNOrBaseStation,
    Undefined,
}

impl NavigationStatus {
    pub fn from_u8(v: u8) -> Self {
        use NavigationStatus::*;
        match v {
            0 => UnderWayUsingEngine,
            1 => AtAnchor,
            2 => NotUnderCommand,
            3 => RestrictedManoeuverability,
            4 => ConstrainedByDraught,
            5 => Moored,
            6 => Aground,
            7 => EngagedInFishing,
            8 => UnderWaySailing,
            9 => Reserved9,
            10 => Reserved10,
            11 => PowerDrivenVesselTowingAstern,
            12 => PowerDrivenVesselPushingAheadOrTowingAlongside,
            13 => Reserved13,
            14 => AisSartActiveOrAtoNOrBaseStation,
            _ => Undefined,
        }
    }

    pub fn as_u8(self) -> u8 {
        use NavigationStatus::*;
        match self {
            UnderWayUsingEngine => 0,
            AtAnchor => 1,
            NotUnderCommand => 2,
            RestrictedManoeuverability => 3,
            ConstrainedByDraught => 4,
            Moored => 5,
            Aground => 6,
            EngagedInFishing => 7,
            UnderWaySailing => 8,
            Reserved9 => 9,
            Reserved10 => 10,
            PowerDrivenVesselTowingAstern => 11,
            PowerDrivenVesselPushingAheadOrTowingAlongside => 12,
            Reserved13 => 13,
            AisSartActiveOrAtoNOrBaseStation => 14,
            Undefined => 15,
        }
    }
}

/// Ship/cargo type classification (messages 5, 19, 23, 24), field width 8.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShipType(pub u8);

impl ShipType {
    pub const NOT_AVAILABLE: ShipType = ShipType(0);
    pub const CARGO: ShipType = ShipType(70);
    pub const PLEASURE_CRAFT: ShipType = ShipType(37);

    pub fn from_u8(v: u8) -> Self {
        ShipType(v)
    }

    pub fn as_u8(self) -> u8 {
        self.0
    }
}

/// Electronic position fixing device category, field width 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpfdType {
    Undefined,
    Gps,
    Glonass,
    GpsGlonass,
    Loran,
    Chayka,
    IntegratedNavigationSystem,
    Surveyed,
    Galileo,
    Other(u8),
}

impl EpfdType {
    pub fn from_u8(v: u8) -> Self {
        use EpfdType::*;
        match v {
            0 => Undefined,
            1 => Gps,
            2 => Glonass,
            3 => GpsGlonass,
            4 => Loran,
            5 => Chayka,
            6 => IntegratedNavigationSystem,
            7 => Surveyed,
            8 => Galileo,
            other => Other(other),
        }
    }

    pub fn as_u8(self) -> u8 {
        use EpfdType::*;
        match self {
            Undefined => 0,
            Gps => 1,
            Glonass => 2,
            GpsGlonass => 3,
            Loran => 4,
            Chayka => 5,
            IntegratedNavigationSystem => 6,
            Surveyed => 7,
            Galileo => 8,
            Other(v) => v,
        }
    }
}

/// Aid-to-navigation type (message 21), field width 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavAidType(pub u8);

impl NavAidType {
    pub const REFERENCE_POINT: NavAidType = NavAidType(7);
    pub fn from_u8(v: u8) -> Self {
        NavAidType(v)
    }
    pub fn as_u8(self) -> u8 {
        self.0
    }
}

/// Message 23 broadcast station type, field width 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StationType(pub u8);

impl StationType {
    pub const REGIONAL: StationType = StationType(2);
    pub fn from_u8(v: u8) -> Self {
        StationType(v)
    }
    pub fn as_u8(self) -> u8 {
        self.0
    }
}

/// Message 23 tx/rx mode, field width 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransmitMode {
    TxATxBRxARxB,
    TxARxARxB,
    TxBRxARxB,
    Reserved,
}

impl TransmitMode {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => TransmitMode::TxATxBRxARxB,
            1 => TransmitMode::TxARxARxB,
            2 => TransmitMode::TxBRxARxB,
            _ => TransmitMode::Reserved,
        }
    }
    pub fn as_u8(self) -> u8 {
        match self {
            TransmitMode::TxATxBRxARxB => 0,
            TransmitMode::TxARxARxB => 1,
            TransmitMode::TxBRxARxB => 2,
            TransmitMode::Reserved => 3,
        }
    }
}

/// One (mmsi, sequence) or (mmsi, type, offset) interrogation/acknowledgement slot that may be
/// absent when the payload is truncated before it begins (§4.5 point 3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AckSlot {
    pub mmsi: u32,
    pub sequence_number: u8,
}

/// A single decoded AIS message, tagged by its `ais_id` (1..27). One variant per type, each
/// carrying the type's typed record (§3, §9).
#[derive(Clone, Debug, PartialEq)]
pub enum AisMessage {
    Type1(PositionReport),
    Type2(PositionReport),
    Type3(PositionReport),
    Type4(BaseStationReport),
    Type5(StaticAndVoyageData),
    Type6(BinaryAddressedMessage),
    Type7(BinaryAcknowledge),
    Type8(BinaryBroadcastMessage),
    Type9(StandardSarAircraftReport),
    Type10(UtcDateInquiry),
    Type11(BaseStationReport),
    Type12(AddressedSafetyMessage),
    Type13(BinaryAcknowledge),
    Type14(BroadcastSafetyMessage),
    Type15(Interrogation),
    Type16(AssignedModeCommand),
    Type17(DgnssBroadcastBinaryMessage),
    Type18(StandardClassBPositionReport),
    Type19(ExtendedClassBPositionReport),
    Type20(DataLinkManagementMessage),
    Type21(AidToNavigationReport),
    Type22(ChannelManagement),
    Type23(GroupAssignmentCommand),
    Type24(StaticDataReport),
    Type25(SingleSlotBinaryMessage),
    Type26(MultipleSlotBinaryMessage),
    Type27(LongRangeAisBroadcastMessage),
}

impl AisMessage {
    /// The message type identifier (1..27) carried in the first 6 bits of the payload. ais_id 0
    /// is folded into type 1 before this is ever constructed (§9 open question).
    pub fn ais_id(&self) -> u8 {
        match self {
            AisMessage::Type1(_) => 1,
            AisMessage::Type2(_) => 2,
            AisMessage::Type3(_) => 3,
            AisMessage::Type4(_) => 4,
            AisMessage::Type5(_) => 5,
            AisMessage::Type6(_) => 6,
            AisMessage::Type7(_) => 7,
            AisMessage::Type8(_) => 8,
            AisMessage::Type9(_) => 9,
            AisMessage::Type10(_) => 10,
            AisMessage::Type11(_) => 11,
            AisMessage::Type12(_) => 12,
            AisMessage::Type13(_) => 13,
            AisMessage::Type14(_) => 14,
            AisMessage::Type15(_) => 15,
            AisMessage::Type16(_) => 16,
            AisMessage::Type17(_) => 17,
            AisMessage::Type18(_) => 18,
            AisMessage::Type19(_) => 19,
            AisMessage::Type20(_) => 20,
            AisMessage::Type21(_) => 21,
            AisMessage::Type22(_) => 22,
            AisMessage::Type23(_) => 23,
            AisMessage::Type24(_) => 24,
            AisMessage::Type25(_) => 25,
            AisMessage::Type26(_) => 26,
            AisMessage::Type27(_) => 27,
        }
    }
}

/// Decodes an assembled bit payload into a typed record, dispatching on the 6-bit `ais_id`
/// read from the front of the buffer. ais_id 0 is treated as ais_id 1, matching the reference
/// decoder's handling of the "weird type 0" payload (§9).
pub fn decode(buf: &BitBuffer) -> Result<AisMessage, ParseError> {
    let raw_id = buf.read_uint(0, 6) as u8;
    let ais_id = if raw_id == 0 { 1 } else { raw_id };
    match ais_id {
        1 => Ok(AisMessage::Type1(position::decode_position_report(buf))),
        2 => Ok(AisMessage::Type2(position::decode_position_report(buf))),
        3 => Ok(AisMessage::Type3(position::decode_position_report(buf))),
        4 => Ok(AisMessage::Type4(basestation::decode(buf))),
        5 => Ok(AisMessage::Type5(voyage::decode_type5(buf))),
        6 => Ok(AisMessage::Type6(binary::decode_type6(buf))),
        7 => Ok(AisMessage::Type7(ack::decode_ack(buf))),
        8 => Ok(AisMessage::Type8(binary::decode_type8(buf))),
        9 => Ok(AisMessage::Type9(position::decode_type9(buf))),
        10 => Ok(AisMessage::Type10(ack::decode_type10(buf))),
        11 => Ok(AisMessage::Type11(basestation::decode(buf))),
        12 => Ok(AisMessage::Type12(safety::decode_type12(buf))),
        13 => Ok(AisMessage::Type13(ack::decode_ack(buf))),
        14 => Ok(AisMessage::Type14(safety::decode_type14(buf))),
        15 => Ok(AisMessage::Type15(ack::decode_type15(buf))),
        16 => Ok(AisMessage::Type16(ack::decode_type16(buf))),
        17 => Ok(AisMessage::Type17(dgnss::decode_type17(buf))),
        18 => Ok(AisMessage::Type18(position::decode_type18(buf))),
        19 => Ok(AisMessage::Type19(position::decode_type19(buf))),
        20 => Ok(AisMessage::Type20(ack::decode_type20(buf))),
        21 => Ok(AisMessage::Type21(navaid::decode_type21(buf))),
        22 => Ok(AisMessage::Type22(channel::decode_type22(buf))),
        23 => Ok(AisMessage::Type23(channel::decode_type23(buf))),
        24 => Ok(AisMessage::Type24(voyage::decode_type24(buf))),
        25 => Ok(AisMessage::Type25(binary::decode_type25(buf))),
        26 => Ok(AisMessage::Type26(binary::decode_type26(buf))),
        27 => Ok(AisMessage::Type27(position::decode_type27(buf))),
        other => Err(ParseError::UnknownMessageType(format!(
            "ais_id {} is outside 1..27",
            other
        ))),
    }
}

/// Runs the schema in reverse, emitting a bit payload for the given record. Dispatches on the
/// variant tag, mirroring `decode`'s dispatch on `ais_id`.
pub fn encode(msg: &AisMessage) -> BitBuffer {
    match msg {
        AisMessage::Type1(r) | AisMessage::Type2(r) | AisMessage::Type3(r) => {
            position::encode_position_report(msg.ais_id(), r)
        }
        AisMessage::Type4(r) | AisMessage::Type11(r) => basestation::encode(msg.ais_id(), r),
        AisMessage::Type5(r) => voyage::encode_type5(r),
        AisMessage::Type6(r) => binary::encode_type6(r),
        AisMessage::Type7(r) | AisMessage::Type13(r) => ack::encode_ack(msg.ais_id(), r),
        AisMessage::Type8(r) => binary::encode_type8(r),
        AisMessage::Type9(r) => position::encode_type9(r),
        AisMessage::Type10(r) => ack::encode_type10(r),
        AisMessage::Type12(r) => safety::encode_type12(r),
        AisMessage::Type14(r) => safety::encode_type14(r),
        AisMessage::Type15(r) => ack::encode_type15(r),
        AisMessage::Type16(r) => ack::encode_type16(r),
        AisMessage::Type17(r) => dgnss::encode_type17(r),
        AisMessage::Type18(r) => position::encode_type18(r),
        AisMessage::Type19(r) => position::encode_type19(r),
        AisMessage::Type20(r) => ack::encode_type20(r),
        AisMessage::Type21(r) => navaid::encode_type21(r),
        AisMessage::Type22(r) => channel::encode_type22(r),
        AisMessage::Type23(r) => channel::encode_type23(r),
        AisMessage::Type24(r) => voyage::encode_type24(r),
        AisMessage::Type25(r) => binary::encode_type25(r),
        AisMessage::Type26(r) => binary::encode_type26(r),
        AisMessage::Type27(r) => position::encode_type27(r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ais_id_is_rejected() {
        let mut buf = BitBuffer::new();
        buf.write_uint(28, 6);
        assert!(decode(&buf).is_err());
    }

    #[test]
    fn ais_id_zero_decodes_as_type_one() {
        let mut buf = BitBuffer::new();
        buf.write_uint(0, 6); // msg_type
        buf.write_uint(0, 2); // repeat
        buf.write_uint(366053209, 30); // mmsi
        match decode(&buf).unwrap() {
            AisMessage::Type1(r) => assert_eq!(r.mmsi, 366053209),
            other => panic!("expected Type1, got {:?}", other),
        }
    }
}
