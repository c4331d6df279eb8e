//! Codebook shared by the encoder and the decoder.
//!
//! Both sides own one [`Codebook`] and drive it through the same calls in the
//! same order: `touch` for every data codeword, `reserve` right after it,
//! `assign` once the reserved entry's contents are known. Width growth and
//! eviction therefore happen at identical stream positions on both ends.
//! Only the encoder's instance carries the prefix trie.

use crate::config::CodeLayout;
use crate::error::{LzwError, Result};
use crate::policy::{EvictionPolicy, PolicyKind};
use crate::trie::{NodeId, PrefixTrie};

/// Outcome of [`Codebook::reserve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    /// The next entry will live under this code.
    Slot(u32),
    /// Full, and the policy does not make room.
    Saturated,
}

/// Position of an in-progress match in the prefix trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCursor {
    node: NodeId,
    code: u32,
}

impl MatchCursor {
    /// Code of the sequence matched so far.
    pub fn code(&self) -> u32 {
        self.code
    }
}

/// Code table with width, capacity and eviction bookkeeping.
#[derive(Debug, Clone)]
pub struct Codebook {
    layout: CodeLayout,
    /// Code -> symbol-code sequence; `None` for markers and unused codes.
    entries: Vec<Option<Box<[u8]>>>,
    /// Sequence -> code, encoder side only.
    index: Option<PrefixTrie>,
    policy: EvictionPolicy,
    /// Lowest code never handed out since the last reset.
    next_code: u32,
    width: u8,
    /// Live entries, base entries included.
    len: u32,
    pending: Option<u32>,
    evictions: u64,
}

impl Codebook {
    /// Decoder-side codebook.
    pub fn new(layout: CodeLayout, policy: PolicyKind) -> Self {
        let mut codebook = Self {
            layout,
            entries: Vec::new(),
            index: None,
            policy: EvictionPolicy::new(policy),
            next_code: 0,
            width: layout.min_width(),
            len: 0,
            pending: None,
            evictions: 0,
        };
        codebook.reset();
        codebook
    }

    /// Encoder-side codebook, with the prefix trie for matching.
    pub fn with_prefix_index(layout: CodeLayout, policy: PolicyKind) -> Self {
        let mut codebook = Self::new(layout, policy);
        codebook.index = Some(PrefixTrie::new());
        codebook.reset();
        codebook
    }

    /// Back to the base entries only, at the minimum width.
    pub fn reset(&mut self) {
        let base = self.layout.alphabet_size();
        self.entries.clear();
        self.entries
            .extend((0..base).map(|code| Some(vec![code as u8].into_boxed_slice())));
        if let Some(index) = self.index.as_mut() {
            index.clear();
            for code in 0..base {
                index.insert(&[code as u8], code);
            }
        }
        self.policy.clear();
        self.next_code = self.layout.first_code();
        self.width = self.layout.min_width();
        self.len = base;
        self.pending = None;
    }

    /// Current codeword width.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Number of live entries, base entries included.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Never true: base entries are permanent.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Next never-used code.
    pub fn next_code(&self) -> u32 {
        self.next_code
    }

    /// True once every code has been handed out.
    pub fn is_saturated(&self) -> bool {
        self.next_code >= self.layout.capacity()
    }

    /// Reserved code whose entry is not assigned yet.
    pub fn pending(&self) -> Option<u32> {
        self.pending
    }

    /// Code-space layout.
    pub fn layout(&self) -> &CodeLayout {
        &self.layout
    }

    /// Active policy.
    pub fn policy(&self) -> &EvictionPolicy {
        &self.policy
    }

    /// Entries evicted over the codebook's lifetime.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Sequence stored under `code`.
    pub fn sequence(&self, code: u32) -> Option<&[u8]> {
        self.entries.get(code as usize)?.as_deref()
    }

    /// Cursor for the one-symbol sequence `symbol`.
    pub fn root(&self, symbol: u8) -> Option<MatchCursor> {
        self.cursor(None, symbol)
    }

    /// Extend a match by one symbol, if the longer sequence is known.
    pub fn extend(&self, cursor: MatchCursor, symbol: u8) -> Option<MatchCursor> {
        self.cursor(Some(cursor.node), symbol)
    }

    fn cursor(&self, parent: Option<NodeId>, symbol: u8) -> Option<MatchCursor> {
        let index = self.index.as_ref()?;
        let node = index.step(parent, symbol)?;
        let code = index.code(node)?;
        Some(MatchCursor { node, code })
    }

    /// Longest known prefix of `buffer` followed by `next_symbol`, as
    /// `(code, matched_len)`.
    ///
    /// Eviction can leave an uncoded node on the path to a live entry, so the
    /// walk continues through nodes without a code. Decoder-side codebooks
    /// return `None`.
    pub fn lookup_longest_prefix(&self, buffer: &[u8], next_symbol: u8) -> Option<(u32, usize)> {
        let index = self.index.as_ref()?;
        let mut best = None;
        let mut node = None;
        for (len, &symbol) in buffer.iter().chain(std::iter::once(&next_symbol)).enumerate() {
            let Some(next) = index.step(node, symbol) else {
                break;
            };
            if let Some(code) = index.code(next) {
                best = Some((code, len + 1));
            }
            node = Some(next);
        }
        best
    }

    /// Record a use of `code`. Base codes are not tracked.
    pub fn touch(&mut self, code: u32) {
        if code >= self.layout.first_code() {
            self.policy.record_use(code);
        }
    }

    /// Choose the code for the next entry.
    ///
    /// Below capacity this is the next never-used code, and the width grows
    /// if it cannot be written at the current width. At capacity, evicting
    /// policies free their victim's code; the others report `Saturated`.
    pub fn reserve(&mut self) -> Reservation {
        if let Some(code) = self.pending {
            return Reservation::Slot(code);
        }
        if !self.is_saturated() {
            let code = self.next_code;
            self.next_code += 1;
            self.grow_width_if_needed(code);
            self.pending = Some(code);
            return Reservation::Slot(code);
        }
        match self.policy.select_victim() {
            Some(victim) => {
                self.evict(victim);
                self.pending = Some(victim);
                Reservation::Slot(victim)
            }
            None => Reservation::Saturated,
        }
    }

    /// Store `sequence` under the reserved `code`.
    pub fn assign(&mut self, code: u32, sequence: &[u8]) -> Result<()> {
        if self.pending != Some(code) {
            return Err(LzwError::internal(format!(
                "assigned code {code} but {:?} is reserved",
                self.pending
            )));
        }
        if sequence.is_empty() {
            return Err(LzwError::internal(format!("empty sequence for code {code}")));
        }
        self.pending = None;

        let slot = code as usize;
        if slot >= self.entries.len() {
            self.entries.resize(slot + 1, None);
        }
        self.entries[slot] = Some(sequence.into());
        if let Some(index) = self.index.as_mut() {
            index.insert(sequence, code);
        }
        self.policy.record_insert(code);
        self.len += 1;
        Ok(())
    }

    /// Reserve and assign in one step. `None` when saturated.
    pub fn insert(&mut self, sequence: &[u8]) -> Result<Option<u32>> {
        match self.reserve() {
            Reservation::Slot(code) => {
                self.assign(code, sequence)?;
                Ok(Some(code))
            }
            Reservation::Saturated => Ok(None),
        }
    }

    fn grow_width_if_needed(&mut self, code: u32) {
        while self.width < self.layout.max_width() && code > (1u32 << self.width) - 1 {
            self.width += 1;
        }
    }

    fn evict(&mut self, code: u32) {
        let Some(sequence) = self.entries.get_mut(code as usize).and_then(Option::take) else {
            return;
        };
        if let Some(index) = self.index.as_mut() {
            index.remove(&sequence);
        }
        self.len -= 1;
        self.evictions += 1;
        tracing::trace!(code, len = sequence.len(), "evicted entry");
    }
}
