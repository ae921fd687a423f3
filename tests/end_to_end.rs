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

//! End-to-end scenarios driven purely through the public API: parse, assemble, decode, and (for
//! the JSON scenario) project to the serde wire format.

use nmea_parser::ais::{AisMessage, ChannelRegionOrDest};
use nmea_parser::json::{to_json, JsonAisMessage, JsonOptions};
use nmea_parser::{decode_assembled, parse_sentence, FragmentAssembler};

fn decode_one(line: &str) -> AisMessage {
    let sentence = parse_sentence(line).unwrap();
    let mut assembler = FragmentAssembler::new();
    let assembled = assembler.push(&sentence).unwrap().unwrap();
    decode_assembled(&assembled).unwrap()
}

fn decode_group(lines: &[&str]) -> AisMessage {
    let mut assembler = FragmentAssembler::new();
    let mut last = None;
    for line in lines {
        let sentence = parse_sentence(line).unwrap();
        last = assembler.push(&sentence).unwrap();
    }
    decode_assembled(&last.unwrap()).unwrap()
}

#[test]
fn class_a_position_report_decodes_end_to_end() {
    match decode_one("!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C") {
        AisMessage::Type1(r) => {
            assert_eq!(r.mmsi_str(), "366053209");
            assert_eq!(r.second, 59);
        }
        other => panic!("expected Type1, got {:?}", other),
    }
}

#[test]
fn static_and_voyage_data_reassembles_across_two_sentences() {
    match decode_group(&[
        "!AIVDM,2,1,1,A,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1C",
        "!AIVDM,2,2,1,A,88888888880,2*25",
    ]) {
        AisMessage::Type5(r) => {
            assert_eq!(r.shipname, "EVER DIADEM");
            assert_eq!(r.destination, "NEW YORK");
        }
        other => panic!("expected Type5, got {:?}", other),
    }
}

#[test]
fn out_of_order_fragments_still_reassemble() {
    match decode_group(&[
        "!AIVDM,2,2,4,A,000000000000000,2*20",
        "!AIVDM,2,1,4,A,55O0W7`00001L@gCWGA2uItLth@DqtL5@F22220j1h742t0Ht0000000,0*08",
    ]) {
        AisMessage::Type5(r) => assert_eq!(r.mmsi_str(), "368060190"),
        other => panic!("expected Type5, got {:?}", other),
    }
}

#[test]
fn channel_management_broadcast_form_decodes() {
    match decode_one("!AIVDM,1,1,,B,F030p:j2N2P5aJR0r;6f3rj10000,0*11") {
        AisMessage::Type22(r) => assert!(!r.addressed),
        other => panic!("expected Type22, got {:?}", other),
    }
}

#[test]
fn channel_management_addressed_form_decodes() {
    match decode_one("!AIVDM,1,1,,A,F@@W>gOP00PH=JrN9l000?wB2HH;,0*44") {
        AisMessage::Type22(r) => match r.payload {
            ChannelRegionOrDest::Dest { .. } => assert!(r.addressed),
            other => panic!("expected Dest, got {:?}", other),
        },
        other => panic!("expected Type22, got {:?}", other),
    }
}

#[test]
fn truncated_aid_to_navigation_report_decodes_without_panicking() {
    match decode_one("!AIVDM,1,1,,B,E>lt;,2*52") {
        AisMessage::Type21(r) => {
            assert_eq!(r.mmsi_str(), "000971714");
            assert_eq!(r.aid_type, None);
        }
        other => panic!("expected Type21, got {:?}", other),
    }
}

#[test]
fn decoded_message_projects_to_the_public_json_contract() {
    let msg = decode_one("!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C");
    match to_json(&msg, JsonOptions::default()) {
        JsonAisMessage::Position(p) => {
            assert_eq!(p.mmsi, "366053209");
            let rendered = serde_json::to_string(&p).unwrap();
            assert!(rendered.contains("\"mmsi\":\"366053209\""));
        }
        other => panic!("expected Position, got {:?}", other),
    }
}
