/// One resident page. An address of 0 marks the slot as unused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageFrame {
    pub virtual_address: u64,
    /// Only meaningful for CLOCK.
    pub referenced: bool,
}

impl PageFrame {
    pub fn is_empty(&self) -> bool {
        self.virtual_address == 0
    }
}

/// Fixed ring of page frames with two cursors.
///
/// `first` is the oldest slot (the CLOCK hand) and `last` the next slot to
/// fill. Once every slot has been filled the ring stays full: evictions
/// always refill the slot they free, so `first == last` from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTable<const CAPACITY: usize> {
    pages: [PageFrame; CAPACITY],
    is_full: bool,
    first: usize,
    last: usize,
}

impl<const CAPACITY: usize> Default for FrameTable<CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAPACITY: usize> FrameTable<CAPACITY> {
    pub fn new() -> Self {
        assert!(CAPACITY > 0, "a frame table needs at least one frame");
        FrameTable {
            pages: [PageFrame::default(); CAPACITY],
            is_full: false,
            first: 0,
            last: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    pub fn is_full(&self) -> bool {
        self.is_full
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn last(&self) -> usize {
        self.last
    }

    /// Number of resident pages.
    pub fn len(&self) -> usize {
        if self.is_full {
            CAPACITY
        } else {
            (self.last + CAPACITY - self.first) % CAPACITY
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn frames(&self) -> &[PageFrame; CAPACITY] {
        &self.pages
    }

    /// Slot holding `virtual_address`, if it is resident.
    pub fn position(&self, virtual_address: u64) -> Option<usize> {
        if virtual_address == 0 {
            return None;
        }
        self.pages
            .iter()
            .position(|frame| frame.virtual_address == virtual_address)
    }

    pub fn contains(&self, virtual_address: u64) -> bool {
        self.position(virtual_address).is_some()
    }

    /// Resident addresses from oldest to newest.
    pub fn resident(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.len())
            .map(move |i| self.pages[(self.first + i) % CAPACITY].virtual_address)
    }

    pub(crate) fn frame_mut(&mut self, slot: usize) -> &mut PageFrame {
        &mut self.pages[slot]
    }

    pub(crate) fn hand(&mut self) -> &mut PageFrame {
        &mut self.pages[self.first]
    }

    pub(crate) fn advance_hand(&mut self) {
        self.first = (self.first + 1) % CAPACITY;
    }

    /// Fills the slot at `last`. Only valid while the table is not full.
    pub(crate) fn push(&mut self, virtual_address: u64, referenced: bool) -> usize {
        debug_assert!(!self.is_full);
        let slot = self.last;
        self.pages[slot] = PageFrame {
            virtual_address,
            referenced,
        };
        self.last = (self.last + 1) % CAPACITY;
        if self.last == self.first {
            self.is_full = true;
        }
        slot
    }

    /// Overwrites the slot under the hand, moves the hand past it and
    /// returns the page that was there.
    pub(crate) fn replace_at_hand(&mut self, virtual_address: u64, referenced: bool) -> u64 {
        debug_assert!(self.is_full);
        let victim = self.pages[self.first].virtual_address;
        self.pages[self.first] = PageFrame {
            virtual_address,
            referenced,
        };
        self.advance_hand();
        self.last = self.first;
        victim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table() {
        let table: FrameTable<8> = FrameTable::new();
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert!(!table.is_full());
        assert_eq!((table.first(), table.last()), (0, 0));
        assert!(table.frames().iter().all(PageFrame::is_empty));
        assert_eq!(table.resident().count(), 0);
    }

    #[test]
    fn push_until_full() {
        let mut table: FrameTable<4> = FrameTable::new();
        for (i, va) in [0x1000, 0x2000, 0x3000].into_iter().enumerate() {
            assert_eq!(table.push(va, false), i);
            assert!(!table.is_full());
        }
        assert_eq!(table.len(), 3);
        table.push(0x4000, false);
        assert!(table.is_full());
        assert_eq!(table.first(), table.last());
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn replace_moves_both_cursors() {
        let mut table: FrameTable<2> = FrameTable::new();
        table.push(1, false);
        table.push(2, false);
        assert_eq!(table.replace_at_hand(3, true), 1);
        assert_eq!((table.first(), table.last()), (1, 1));
        assert!(table.is_full());
        assert_eq!(table.resident().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(table.replace_at_hand(4, false), 2);
        assert_eq!(table.resident().collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn zero_is_never_found() {
        let mut table: FrameTable<8> = FrameTable::new();
        table.push(5, false);
        assert_eq!(table.position(0), None);
        assert_eq!(table.position(5), Some(0));
        assert!(!table.contains(6));
    }
}
