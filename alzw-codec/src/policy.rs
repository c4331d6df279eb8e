//! Dictionary management once the codebook is full.
//!
//! Encoder and decoder drive the same [`EvictionPolicy`] with the same
//! sequence of `record_insert` / `record_use` / `select_victim` calls, so both
//! sides pick identical victims without any signal in the stream.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::LzwError;

/// Policy identifier, as configured and as stored in the stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolicyKind {
    /// Stop learning once full.
    #[default]
    Freeze,
    /// Drop every learned entry and start over, signalled by a RESET marker.
    Reset,
    /// Replace the least recently used learned entry.
    Lru,
    /// Replace the least frequently used learned entry, lowest code first.
    Lfu,
}

impl PolicyKind {
    /// All policies, in header-tag order.
    pub const ALL: [Self; 4] = [Self::Freeze, Self::Reset, Self::Lru, Self::Lfu];

    /// Header tag.
    pub fn tag(self) -> u8 {
        match self {
            Self::Freeze => 0,
            Self::Reset => 1,
            Self::Lru => 2,
            Self::Lfu => 3,
        }
    }

    /// Policy for a header tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(usize::from(tag)).copied()
    }

    /// True when a full codebook makes room by evicting.
    pub fn evicts(self) -> bool {
        matches!(self, Self::Lru | Self::Lfu)
    }

    /// Lower-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Freeze => "freeze",
            Self::Reset => "reset",
            Self::Lru => "lru",
            Self::Lfu => "lfu",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = LzwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                LzwError::config(format!(
                    "unknown policy '{s}' (expected freeze, reset, lru or lfu)"
                ))
            })
    }
}

/// Policy state owned by a codebook.
#[derive(Debug, Clone)]
pub enum EvictionPolicy {
    /// No bookkeeping.
    Freeze,
    /// No bookkeeping; the encoder resets the codebook.
    Reset,
    /// Recency order over learned codes.
    Lru(RecencyList),
    /// Use counts over learned codes.
    Lfu(FrequencyTable),
}

impl EvictionPolicy {
    /// Fresh state for `kind`.
    pub fn new(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::Freeze => Self::Freeze,
            PolicyKind::Reset => Self::Reset,
            PolicyKind::Lru => Self::Lru(RecencyList::default()),
            PolicyKind::Lfu => Self::Lfu(FrequencyTable::default()),
        }
    }

    /// Which policy this is.
    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::Freeze => PolicyKind::Freeze,
            Self::Reset => PolicyKind::Reset,
            Self::Lru(_) => PolicyKind::Lru,
            Self::Lfu(_) => PolicyKind::Lfu,
        }
    }

    /// True when a full codebook makes room by evicting.
    pub fn evicts(&self) -> bool {
        self.kind().evicts()
    }

    /// A learned entry was just stored under `code`.
    pub fn record_insert(&mut self, code: u32) {
        match self {
            Self::Freeze | Self::Reset => {}
            Self::Lru(list) => list.touch(code),
            Self::Lfu(table) => table.insert(code),
        }
    }

    /// A learned entry was emitted or resolved.
    pub fn record_use(&mut self, code: u32) {
        match self {
            Self::Freeze | Self::Reset => {}
            Self::Lru(list) => list.touch(code),
            Self::Lfu(table) => table.increment(code),
        }
    }

    /// Pick and forget the entry to replace. `None` for non-evicting
    /// policies or when nothing is tracked.
    pub fn select_victim(&mut self) -> Option<u32> {
        match self {
            Self::Freeze | Self::Reset => None,
            Self::Lru(list) => list.pop_least_recent(),
            Self::Lfu(table) => table.pop_least_frequent(),
        }
    }

    /// Forget all tracked codes.
    pub fn clear(&mut self) {
        match self {
            Self::Freeze | Self::Reset => {}
            Self::Lru(list) => list.clear(),
            Self::Lfu(table) => table.clear(),
        }
    }
}

/// Intrusive doubly-linked recency list over code indices.
///
/// Links live in per-code slots, so moving a code to the front is O(1).
/// Every touch advances a logical clock and stamps the code with it.
#[derive(Debug, Clone, Default)]
pub struct RecencyList {
    slots: Vec<RecencySlot>,
    /// Most recently used.
    head: Option<u32>,
    /// Least recently used.
    tail: Option<u32>,
    tick: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct RecencySlot {
    prev: Option<u32>,
    next: Option<u32>,
    /// Zero when the code is not in the list.
    last_used: u64,
}

impl RecencyList {
    fn slot(&mut self, code: u32) -> &mut RecencySlot {
        let index = code as usize;
        if index >= self.slots.len() {
            self.slots.resize(index + 1, RecencySlot::default());
        }
        &mut self.slots[index]
    }

    /// Mark `code` as most recently used, adding it if untracked.
    pub fn touch(&mut self, code: u32) {
        if self.last_used_tick(code).is_some() {
            self.unlink(code);
        }
        self.tick += 1;
        let tick = self.tick;
        let old_head = self.head;
        let slot = self.slot(code);
        slot.prev = None;
        slot.next = old_head;
        slot.last_used = tick;
        match old_head {
            Some(head) => self.slots[head as usize].prev = Some(code),
            None => self.tail = Some(code),
        }
        self.head = Some(code);
    }

    /// Remove and return the least recently used code.
    pub fn pop_least_recent(&mut self) -> Option<u32> {
        let code = self.tail?;
        self.unlink(code);
        Some(code)
    }

    /// Clock value of the last touch of `code`, if tracked.
    pub fn last_used_tick(&self, code: u32) -> Option<u64> {
        self.slots
            .get(code as usize)
            .map(|slot| slot.last_used)
            .filter(|&tick| tick != 0)
    }

    /// Current clock value.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    fn unlink(&mut self, code: u32) {
        let RecencySlot { prev, next, .. } = self.slots[code as usize];
        match prev {
            Some(p) => self.slots[p as usize].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n as usize].prev = prev,
            None => self.tail = prev,
        }
        self.slots[code as usize] = RecencySlot::default();
    }

    /// Forget everything, including the clock.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.tick = 0;
    }
}

/// Use counts over learned codes, ordered by `(use_count, code)`.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    /// Zero when the code is not tracked.
    counts: Vec<u64>,
    order: BTreeSet<(u64, u32)>,
}

impl FrequencyTable {
    /// Start tracking `code` with one use.
    pub fn insert(&mut self, code: u32) {
        self.remove(code);
        self.set(code, 1);
    }

    /// Add one use to `code`; untracked codes start at one.
    pub fn increment(&mut self, code: u32) {
        let count = self.use_count(code).unwrap_or(0);
        self.remove(code);
        self.set(code, count + 1);
    }

    /// Remove and return the code with the fewest uses, lowest code on ties.
    pub fn pop_least_frequent(&mut self) -> Option<u32> {
        let (_, code) = self.order.pop_first()?;
        self.counts[code as usize] = 0;
        Some(code)
    }

    /// Use count of `code`, if tracked.
    pub fn use_count(&self, code: u32) -> Option<u64> {
        self.counts
            .get(code as usize)
            .copied()
            .filter(|&count| count != 0)
    }

    fn set(&mut self, code: u32, count: u64) {
        let index = code as usize;
        if index >= self.counts.len() {
            self.counts.resize(index + 1, 0);
        }
        self.counts[index] = count;
        self.order.insert((count, code));
    }

    fn remove(&mut self, code: u32) {
        if let Some(count) = self.use_count(code) {
            self.order.remove(&(count, code));
            self.counts[code as usize] = 0;
        }
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.order.clear();
    }
}
