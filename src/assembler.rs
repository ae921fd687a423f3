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

//! Joins multi-sentence AIS transmissions into a single assembled payload, keyed by
//! (channel, sequence id). Fragments may arrive out of order; groups that never complete are
//! bounded by an LRU eviction policy so a stream of stray fragments can't grow memory without
//! bound.

use crate::armor;
use crate::error::ParseError;
use crate::sentence::NmeaSentence;
use bitvec::prelude::*;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Default bound on the number of never-completed fragment groups held at once.
pub const DEFAULT_CAPACITY: usize = 1024;

/// A fully reassembled AIS transmission: de-armored bits plus a summary of the envelope(s) that
/// produced it.
#[derive(Clone, Debug)]
pub struct AssembledMessage {
    pub talker: String,
    pub channel: Option<char>,
    pub first_raw: String,
    pub last_raw: String,
    pub bits: BitVec<u8, Msb0>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct GroupKey {
    channel: Option<char>,
    seq_id: Option<u8>,
}

#[derive(Clone, Debug)]
struct PendingFragment {
    raw: String,
    payload: String,
    fill_bits: u8,
}

#[derive(Clone, Debug)]
struct PendingGroup {
    talker: String,
    fragment_count: u8,
    fragments: Vec<Option<PendingFragment>>,
}

/// Per-stream reassembly state. Not `Sync`; each stream adapter owns exactly one assembler.
pub struct FragmentAssembler {
    groups: LruCache<GroupKey, PendingGroup>,
}

impl FragmentAssembler {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap();
        FragmentAssembler {
            groups: LruCache::new(cap),
        }
    }

    /// Feeds one parsed sentence into the assembler. Returns `Ok(Some(..))` when the fragment
    /// completes a group, `Ok(None)` while a group remains partial, and `Err` only for armor
    /// decode failures or same-index payload conflicts (the group is discarded in that case).
    pub fn push(&mut self, s: &NmeaSentence) -> Result<Option<AssembledMessage>, ParseError> {
        if s.fragment_count <= 1 {
            let bits = armor::decode(&s.payload, s.fill_bits)?;
            return Ok(Some(AssembledMessage {
                talker: s.talker.clone(),
                channel: s.channel,
                first_raw: s.raw.clone(),
                last_raw: s.raw.clone(),
                bits,
            }));
        }

        let key = GroupKey {
            channel: s.channel,
            seq_id: s.seq_id,
        };
        let idx = (s.fragment_index - 1) as usize;

        if let Some(existing) = self.groups.get_mut(&key) {
            if existing.fragment_count != s.fragment_count {
                self.groups.pop(&key);
                return Err(ParseError::Framing(format!(
                    "conflicting fragment count for group {:?}",
                    key
                )));
            }
            if let Some(prior) = &existing.fragments[idx] {
                if prior.payload != s.payload || prior.fill_bits != s.fill_bits {
                    self.groups.pop(&key);
                    return Err(ParseError::Framing(format!(
                        "conflicting fragment payload at index {} for group {:?}",
                        s.fragment_index, key
                    )));
                }
            } else {
                existing.fragments[idx] = Some(PendingFragment {
                    raw: s.raw.clone(),
                    payload: s.payload.clone(),
                    fill_bits: s.fill_bits,
                });
            }
        } else {
            if self.groups.len() >= self.groups.cap().get() {
                if let Some((evicted_key, evicted_group)) = self.groups.peek_lru() {
                    let err = ParseError::IncompleteGroup(format!(
                        "group {:?} evicted with {}/{} fragments present",
                        evicted_key,
                        evicted_group.fragments.iter().filter(|f| f.is_some()).count(),
                        evicted_group.fragment_count,
                    ));
                    log::warn!("{}", err);
                }
            }
            let mut fragments = vec![None; s.fragment_count as usize];
            fragments[idx] = Some(PendingFragment {
                raw: s.raw.clone(),
                payload: s.payload.clone(),
                fill_bits: s.fill_bits,
            });
            self.groups.put(
                key.clone(),
                PendingGroup {
                    talker: s.talker.clone(),
                    fragment_count: s.fragment_count,
                    fragments,
                },
            );
        }

        let complete = self
            .groups
            .peek(&key)
            .map(|g| g.fragments.iter().all(Option::is_some))
            .unwrap_or(false);
        if !complete {
            return Ok(None);
        }

        let group = self.groups.pop(&key).expect("just verified present");
        let mut bits: BitVec<u8, Msb0> = BitVec::new();
        let frags: Vec<PendingFragment> = group.fragments.into_iter().map(|f| f.unwrap()).collect();
        let last_fill = frags.last().map(|f| f.fill_bits).unwrap_or(0);
        let last_idx = frags.len() - 1;
        for (i, frag) in frags.iter().enumerate() {
            let fill = if i == last_idx { last_fill } else { 0 };
            let decoded = armor::decode(&frag.payload, fill)?;
            bits.extend_from_bitslice(&decoded);
        }

        Ok(Some(AssembledMessage {
            talker: group.talker,
            channel: key.channel,
            first_raw: frags.first().unwrap().raw.clone(),
            last_raw: frags.last().unwrap().raw.clone(),
            bits,
        }))
    }

    pub fn pending_groups(&self) -> usize {
        self.groups.len()
    }
}

impl Default for FragmentAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::parse;

    #[test]
    fn single_fragment_assembles_immediately() {
        let mut a = FragmentAssembler::new();
        let s = parse("!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C").unwrap();
        let msg = a.push(&s).unwrap();
        assert!(msg.is_some());
    }

    #[test]
    fn two_fragments_in_order_assemble() {
        let mut a = FragmentAssembler::new();
        let f1 = parse("!AIVDM,2,1,1,A,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1C").unwrap();
        let f2 = parse("!AIVDM,2,2,1,A,88888888880,2*25").unwrap();
        assert!(a.push(&f1).unwrap().is_none());
        let msg = a.push(&f2).unwrap();
        assert!(msg.is_some());
    }

    #[test]
    fn out_of_order_fragments_still_assemble() {
        let mut a = FragmentAssembler::new();
        let f2 = parse("!AIVDM,2,2,4,A,000000000000000,2*20").unwrap();
        let f1 = parse("!AIVDM,2,1,4,A,55O0W7`00001L@gCWGA2uItLth@DqtL5@F22220j1h742t0Ht0000000,0*08").unwrap();
        assert!(a.push(&f2).unwrap().is_none());
        let msg = a.push(&f1).unwrap();
        assert!(msg.is_some());
    }

    #[test]
    fn conflicting_payload_at_same_index_discards_group() {
        let mut a = FragmentAssembler::new();
        let f1 = parse("!AIVDM,2,1,1,A,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1C").unwrap();
        a.push(&f1).unwrap();
        let mut conflicting = f1.clone();
        conflicting.payload = "00000000000000000000000000000000000000000000000000000000000".to_string();
        // Recompute a matching checksum isn't needed here since we bypass `parse` and push
        // the mutated struct directly.
        assert!(a.push(&conflicting).is_err());
        assert_eq!(a.pending_groups(), 0);
    }

    #[test]
    fn lru_eviction_bounds_memory() {
        let mut a = FragmentAssembler::with_capacity(1);
        let f1 = parse("!AIVDM,2,1,1,A,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1C").unwrap();
        let mut f1b = f1.clone();
        f1b.seq_id = Some(2);
        a.push(&f1).unwrap();
        a.push(&f1b).unwrap();
        assert_eq!(a.pending_groups(), 1);
    }
}
