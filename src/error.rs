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

use std::fmt;

/// Errors produced while parsing an NMEA/AIS sentence or decoding an assembled payload.
#[derive(Debug)]
pub enum ParseError {
    /// The sentence does not match the `!xxVDx,...*hh` grammar, or is not ASCII.
    Framing(String),

    /// The computed checksum differs from the declared one.
    Checksum(String),

    /// A payload character falls outside the armor alphabet.
    Armor(String),

    /// ais_id is outside 1..27 (ais_id 0 is accepted and treated as type 1).
    UnknownMessageType(String),

    /// A fragment group was evicted by the LRU policy before it completed.
    ///
    /// Never raised from a stream adapter's iterator; surfaced only through the
    /// diagnostic log (`log::warn!`) at the point of eviction.
    IncompleteGroup(String),

    /// Transport-level I/O failure from a stream adapter.
    Io(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Framing(s) => write!(f, "framing error: {}", s),
            ParseError::Checksum(s) => write!(f, "checksum error: {}", s),
            ParseError::Armor(s) => write!(f, "armor error: {}", s),
            ParseError::UnknownMessageType(s) => write!(f, "unknown message type: {}", s),
            ParseError::IncompleteGroup(s) => write!(f, "incomplete group: {}", s),
            ParseError::Io(s) => write!(f, "i/o error: {}", s),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::Io(e.to_string())
    }
}
