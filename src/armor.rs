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

//! The six-bit "armor" codec: converts between a bit sequence and the printable ASCII
//! characters carried in an NMEA payload field. Distinct from the sixbit TEXT alphabet used
//! inside payload text fields (see `bitbuffer.rs`).

use crate::error::ParseError;
use bitvec::prelude::*;

/// Decodes one armored payload string into bits, dropping `fill_bits` trailing bits from the
/// last character.
pub fn decode(payload: &str, fill_bits: u8) -> Result<BitVec<u8, Msb0>, ParseError> {
    let mut bits: BitVec<u8, Msb0> = BitVec::with_capacity(payload.len() * 6);
    for c in payload.chars() {
        let ord = c as u32;
        if !(0x30..=0x77).contains(&ord) || (0x58..=0x5F).contains(&ord) {
            return Err(ParseError::Armor(format!("invalid armor character '{}'", c)));
        }
        let mut v = ord as u8 - 48;
        if v > 39 {
            v -= 8;
        }
        for i in (0..6).rev() {
            bits.push((v >> i) & 1 != 0);
        }
    }
    let total = bits.len();
    let keep = total.saturating_sub(fill_bits as usize);
    bits.truncate(keep);
    Ok(bits)
}

/// Encodes bits into an armored payload string, returning the string and the fill-bit count
/// (0..6) added to pad the final character.
pub fn encode(bits: &BitSlice<u8, Msb0>) -> (String, u8) {
    let mut out = String::with_capacity((bits.len() + 5) / 6);
    let mut chunk: u8 = 0;
    let mut nbits = 0u32;
    let mut fill = 0u8;
    for bit in bits.iter() {
        chunk = (chunk << 1) | (*bit as u8);
        nbits += 1;
        if nbits == 6 {
            out.push(char_for(chunk));
            chunk = 0;
            nbits = 0;
        }
    }
    if nbits > 0 {
        fill = 6 - nbits as u8;
        chunk <<= fill;
        out.push(char_for(chunk));
    }
    (out, fill)
}

fn char_for(v: u8) -> char {
    let c = if v < 40 { v + 48 } else { v + 56 };
    c as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_invalid_character() {
        assert!(decode("^", 0).is_err());
    }

    #[test]
    fn round_trip_preserves_payload_for_same_fill() {
        let payload = "15M67FC000G?ufbE`FepT@3n00Sa";
        let bits = decode(payload, 0).unwrap();
        let (re_encoded, fill) = encode(&bits);
        assert_eq!(fill, 0);
        assert_eq!(re_encoded, payload);
    }

    #[test]
    fn decode_strips_fill_bits() {
        let bits = decode("E>lt;", 2).unwrap();
        assert_eq!(bits.len(), 5 * 6 - 2);
    }
}
