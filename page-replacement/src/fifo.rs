//! First in, first out: the page resident the longest is evicted.

use crate::{FrameTable, PageEvents};

/// Loads `virtual_address`, evicting the oldest page if the table is full.
///
/// Does nothing for the sentinel address 0 or a page that is already resident.
pub fn map_page<const CAPACITY: usize, E: PageEvents + ?Sized>(
    table: &mut FrameTable<CAPACITY>,
    virtual_address: u64,
    events: &mut E,
) {
    if virtual_address == 0 {
        log::debug!("Ignoring map of sentinel address");
        return;
    }
    if table.contains(virtual_address) {
        return;
    }

    if !table.is_full() {
        events.load_page(virtual_address);
        let slot = table.push(virtual_address, false);
        log::info!("Loaded {:#x} into frame {}", virtual_address, slot);
    } else {
        let slot = table.first();
        let victim = table.frames()[slot].virtual_address;
        events.evict_page(victim);
        events.load_page(virtual_address);
        table.replace_at_hand(virtual_address, false);
        log::info!(
            "Evicted {:#x} from frame {}, loaded {:#x}",
            victim,
            slot,
            virtual_address
        );
    }
}

/// FIFO keeps no recency, so a hit changes nothing.
pub fn access_page<const CAPACITY: usize, E: PageEvents + ?Sized>(
    table: &mut FrameTable<CAPACITY>,
    virtual_address: u64,
    events: &mut E,
) {
    if virtual_address == 0 || table.contains(virtual_address) {
        return;
    }
    map_page(table, virtual_address, events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Event, RecordingEvents, NO_PAGE_FRAMES};

    fn filled(count: u64) -> (FrameTable<NO_PAGE_FRAMES>, RecordingEvents) {
        let mut table = FrameTable::new();
        let mut events = RecordingEvents::new();
        for va in 1..=count {
            map_page(&mut table, va, &mut events);
        }
        (table, events)
    }

    #[test]
    fn ninth_insert_evicts_first() {
        let (table, events) = filled(9);
        assert_eq!(events.evictions(), vec![1]);
        assert_eq!(events.loads(), (1..=9).collect::<Vec<_>>());
        assert_eq!(events.events[8..], [Event::Evict(1), Event::Load(9)]);
        assert_eq!(table.resident().collect::<Vec<_>>(), (2..=9).collect::<Vec<_>>());
        assert_eq!(table.frames()[0].virtual_address, 9);
    }

    #[test]
    fn eviction_follows_insertion_order() {
        let (table, events) = filled(20);
        assert_eq!(events.evictions(), (1..=12).collect::<Vec<_>>());
        assert_eq!(table.len(), NO_PAGE_FRAMES);
        assert_eq!(table.first(), table.last());
        assert_eq!(table.first(), 20 % NO_PAGE_FRAMES);
    }

    #[test]
    fn fills_without_evicting() {
        let (table, events) = filled(8);
        assert!(table.is_full());
        assert!(events.evictions().is_empty());
        assert_eq!((table.first(), table.last()), (0, 0));
    }

    #[test]
    fn remap_is_a_no_op() {
        let (mut table, mut events) = filled(8);
        let before = table.clone();
        events.clear();
        map_page(&mut table, 3, &mut events);
        access_page(&mut table, 3, &mut events);
        assert_eq!(table, before);
        assert!(events.events.is_empty());
    }

    #[test]
    fn access_does_not_refresh() {
        let (mut table, mut events) = filled(8);
        access_page(&mut table, 1, &mut events);
        map_page(&mut table, 9, &mut events);
        assert_eq!(events.evictions(), vec![1]);
    }

    #[test]
    fn access_miss_maps() {
        let mut table: FrameTable<NO_PAGE_FRAMES> = FrameTable::new();
        let mut events = RecordingEvents::new();
        access_page(&mut table, 0x4000, &mut events);
        assert!(table.contains(0x4000));
        assert_eq!(events.events, vec![Event::Load(0x4000)]);
    }

    #[test]
    fn reinsert_after_eviction_is_newest() {
        let (mut table, mut events) = filled(9);
        map_page(&mut table, 1, &mut events);
        assert_eq!(events.evictions(), vec![1, 2]);
        assert_eq!(table.resident().last(), Some(1));
    }

    #[test]
    fn sentinel_is_ignored() {
        let (mut table, mut events) = filled(8);
        let before = table.clone();
        events.clear();
        map_page(&mut table, 0, &mut events);
        access_page(&mut table, 0, &mut events);
        assert_eq!(table, before);
        assert!(events.events.is_empty());
    }
}
