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

//! NMEA sentence envelope: `!<talker><kind>,<fcnt>,<fidx>,<seq>,<ch>,<payload>,<fill>*<hh>`.

use crate::error::ParseError;

const RECOGNISED_TALKERS: &[&str] = &["AI", "AR", "BS", "SA", "AB", "AD", "AN", "AS", "AT", "AX"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SentenceKind {
    Vdm,
    Vdo,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NmeaSentence {
    pub talker: String,
    pub kind: SentenceKind,
    pub fragment_count: u8,
    pub fragment_index: u8,
    pub seq_id: Option<u8>,
    pub channel: Option<char>,
    pub payload: String,
    pub fill_bits: u8,
    pub checksum: u8,
    pub raw: String,
}

/// Parses one NMEA line, tolerating a trailing CR/LF. Performs checksum verification.
pub fn parse(line: &str) -> Result<NmeaSentence, ParseError> {
    let raw = line.trim_end_matches(['\r', '\n']);
    if !raw.is_ascii() {
        return Err(ParseError::Framing(format!("non-ASCII sentence: {}", raw)));
    }
    let body = raw
        .strip_prefix('!')
        .ok_or_else(|| ParseError::Framing(format!("missing '!' prefix: {}", raw)))?;

    let star = body
        .find('*')
        .ok_or_else(|| ParseError::Framing(format!("missing checksum tail: {}", raw)))?;
    let (fields_part, checksum_part) = (&body[..star], &body[star + 1..]);
    if checksum_part.len() < 2 {
        return Err(ParseError::Framing(format!("short checksum: {}", raw)));
    }
    let given = u8::from_str_radix(&checksum_part[..2], 16)
        .map_err(|_| ParseError::Framing(format!("non-hex checksum: {}", raw)))?;

    let computed = fields_part.bytes().fold(0u8, |acc, b| acc ^ b);
    if computed != given {
        return Err(ParseError::Checksum(format!(
            "computed {:02X} != declared {:02X} for {}",
            computed, given, raw
        )));
    }

    let mut fields = fields_part.split(',');
    let head = fields
        .next()
        .ok_or_else(|| ParseError::Framing(format!("empty sentence: {}", raw)))?;
    if head.len() != 5 {
        return Err(ParseError::Framing(format!("bad talker+kind: {}", raw)));
    }
    let talker = head[0..2].to_string();
    if !RECOGNISED_TALKERS.contains(&talker.as_str()) {
        return Err(ParseError::Framing(format!("unrecognised talker: {}", talker)));
    }
    let kind = match &head[2..5] {
        "VDM" => SentenceKind::Vdm,
        "VDO" => SentenceKind::Vdo,
        other => return Err(ParseError::Framing(format!("unrecognised kind: {}", other))),
    };

    let fragment_count: u8 = fields
        .next()
        .ok_or_else(|| ParseError::Framing("missing fragment count".to_string()))?
        .parse()
        .map_err(|_| ParseError::Framing("bad fragment count".to_string()))?;
    let fragment_index: u8 = fields
        .next()
        .ok_or_else(|| ParseError::Framing("missing fragment index".to_string()))?
        .parse()
        .map_err(|_| ParseError::Framing("bad fragment index".to_string()))?;
    if fragment_index == 0 || fragment_index > fragment_count {
        return Err(ParseError::Framing(format!(
            "fragment index {} exceeds count {}",
            fragment_index, fragment_count
        )));
    }
    let seq_field = fields
        .next()
        .ok_or_else(|| ParseError::Framing("missing sequence id".to_string()))?;
    let seq_id = if seq_field.is_empty() {
        None
    } else {
        Some(
            seq_field
                .parse()
                .map_err(|_| ParseError::Framing("bad sequence id".to_string()))?,
        )
    };
    let channel_field = fields
        .next()
        .ok_or_else(|| ParseError::Framing("missing channel".to_string()))?;
    let channel = channel_field.chars().next();
    let payload = fields
        .next()
        .ok_or_else(|| ParseError::Framing("missing payload".to_string()))?
        .to_string();
    let fill_bits: u8 = fields
        .next()
        .ok_or_else(|| ParseError::Framing("missing fill bits".to_string()))?
        .parse()
        .map_err(|_| ParseError::Framing("bad fill bits".to_string()))?;
    if fill_bits > 5 {
        return Err(ParseError::Framing(format!("fill bits out of range: {}", fill_bits)));
    }

    Ok(NmeaSentence {
        talker,
        kind,
        fragment_count,
        fragment_index,
        seq_id,
        channel,
        payload,
        fill_bits,
        checksum: given,
        raw: raw.to_string(),
    })
}

/// Rebuilds the sentence text from its fields, always emitting uppercase hex and never
/// inserting whitespace.
pub fn format(s: &NmeaSentence) -> String {
    let kind = match s.kind {
        SentenceKind::Vdm => "VDM",
        SentenceKind::Vdo => "VDO",
    };
    let seq = s.seq_id.map(|v| v.to_string()).unwrap_or_default();
    let ch = s.channel.map(|c| c.to_string()).unwrap_or_default();
    let fields = format!(
        "{}{},{},{},{},{},{},{}",
        s.talker, kind, s.fragment_count, s.fragment_index, seq, ch, s.payload, s.fill_bits
    );
    let checksum = fields.bytes().fold(0u8, |acc, b| acc ^ b);
    format!("!{}*{:02X}", fields, checksum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_type1_sentence() {
        let s = parse("!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C").unwrap();
        assert_eq!(s.talker, "AI");
        assert_eq!(s.kind, SentenceKind::Vdm);
        assert_eq!(s.fragment_count, 1);
        assert_eq!(s.fragment_index, 1);
        assert_eq!(s.seq_id, None);
        assert_eq!(s.channel, Some('B'));
        assert_eq!(s.fill_bits, 0);
    }

    #[test]
    fn rejects_bad_checksum() {
        assert!(parse("!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*00").is_err());
    }

    #[test]
    fn tolerates_trailing_crlf() {
        let s = parse("!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C\r\n").unwrap();
        assert_eq!(s.fragment_count, 1);
    }

    #[test]
    fn format_round_trips_parse() {
        let line = "!AIVDM,2,1,1,A,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1C";
        let s = parse(line).unwrap();
        assert_eq!(format(&s), line);
    }
}
