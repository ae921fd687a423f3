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

//! A pull adapter (C8) that drives the parse/assemble/decode pipeline over any line source.
//!
//! Lines that fail to parse or whose checksum doesn't match are logged and skipped rather than
//! surfaced as errors — a single bad line on a live feed shouldn't stop the whole stream.

use crate::ais::AisMessage;
use crate::assembler::FragmentAssembler;
use crate::bitbuffer::BitBuffer;
use crate::sentence;

/// Drives the decode pipeline over a line iterator, yielding one decoded message per completed
/// fragment group. Holds its own [`FragmentAssembler`] so interleaved groups from multiple
/// channels assemble correctly.
pub struct StreamDecoder<I> {
    lines: I,
    assembler: FragmentAssembler,
}

impl<I: Iterator<Item = String>> StreamDecoder<I> {
    pub fn new(lines: I) -> Self {
        StreamDecoder {
            lines,
            assembler: FragmentAssembler::new(),
        }
    }

    /// Number of fragment groups still awaiting completion.
    pub fn pending_groups(&self) -> usize {
        self.assembler.pending_groups()
    }
}

impl<I: Iterator<Item = String>> Iterator for StreamDecoder<I> {
    type Item = AisMessage;

    fn next(&mut self) -> Option<AisMessage> {
        loop {
            let line = self.lines.next()?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let sentence = match sentence::parse(trimmed) {
                Ok(s) => s,
                Err(e) => {
                    log::debug!("skipping unparsable line {:?}: {}", trimmed, e);
                    continue;
                }
            };
            let assembled = match self.assembler.push(&sentence) {
                Ok(Some(assembled)) => assembled,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("dropping fragment group: {}", e);
                    continue;
                }
            };
            let buf = BitBuffer::from_bits(assembled.bits);
            match crate::ais::decode(&buf) {
                Ok(msg) => return Some(msg),
                Err(e) => {
                    log::warn!("dropping undecodable message: {}", e);
                    continue;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ais::AisMessage;

    #[test]
    fn decodes_single_fragment_lines() {
        let lines = vec![
            "!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C".to_string(),
            "not an ais sentence at all".to_string(),
            "!AIVDM,1,1,,B,E>lt;,2*52".to_string(),
        ];
        let mut decoder = StreamDecoder::new(lines.into_iter());
        match decoder.next().unwrap() {
            AisMessage::Type1(r) => assert_eq!(r.mmsi_str(), "366053209"),
            other => panic!("expected Type1, got {:?}", other),
        }
        match decoder.next().unwrap() {
            AisMessage::Type21(r) => assert_eq!(r.mmsi_str(), "000971714"),
            other => panic!("expected Type21, got {:?}", other),
        }
        assert!(decoder.next().is_none());
    }

    #[test]
    fn reassembles_multi_fragment_groups_across_the_stream() {
        let lines = vec![
            "!AIVDM,2,1,1,A,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1C"
                .to_string(),
            "!AIVDM,2,2,1,A,88888888880,2*25".to_string(),
        ];
        let mut decoder = StreamDecoder::new(lines.into_iter());
        match decoder.next().unwrap() {
            AisMessage::Type5(r) => assert_eq!(r.shipname, "EVER DIADEM"),
            other => panic!("expected Type5, got {:?}", other),
        }
        assert_eq!(decoder.pending_groups(), 0);
    }

    #[test]
    fn skips_bad_checksum_and_keeps_going() {
        let lines = vec![
            "!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*00".to_string(),
            "!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C".to_string(),
        ];
        let mut decoder = StreamDecoder::new(lines.into_iter());
        assert!(decoder.next().is_some());
        assert!(decoder.next().is_none());
    }
}
