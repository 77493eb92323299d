//! Second chance (CLOCK) replacement.
//!
//! Each frame carries a referenced bit. The hand sweeps from the oldest
//! frame, clearing bits as it passes, and evicts the first frame whose bit
//! was already clear. A freshly loaded page starts with its bit set, so it
//! survives one full sweep.

use crate::{FrameTable, PageEvents};

fn hit<const CAPACITY: usize>(table: &mut FrameTable<CAPACITY>, virtual_address: u64) -> bool {
    match table.position(virtual_address) {
        Some(slot) => {
            table.frame_mut(slot).referenced = true;
            log::debug!("Hit {:#x} in frame {}", virtual_address, slot);
            true
        }
        None => false,
    }
}

/// Gives every referenced frame under the hand a second chance and returns
/// once the hand rests on an unreferenced one. Ends within two sweeps.
fn find_victim<const CAPACITY: usize>(table: &mut FrameTable<CAPACITY>) {
    while table.hand().referenced {
        table.hand().referenced = false;
        log::trace!("Second chance for frame {}", table.first());
        table.advance_hand();
    }
}

/// Loads `virtual_address`, or marks it referenced if it is already resident.
pub fn map_page<const CAPACITY: usize, E: PageEvents + ?Sized>(
    table: &mut FrameTable<CAPACITY>,
    virtual_address: u64,
    events: &mut E,
) {
    if virtual_address == 0 {
        log::debug!("Ignoring map of sentinel address");
        return;
    }
    if hit(table, virtual_address) {
        return;
    }

    if !table.is_full() {
        events.load_page(virtual_address);
        let slot = table.push(virtual_address, true);
        log::info!("Loaded {:#x} into frame {}", virtual_address, slot);
    } else {
        find_victim(table);
        let slot = table.first();
        let victim = table.frames()[slot].virtual_address;
        events.evict_page(victim);
        events.load_page(virtual_address);
        table.replace_at_hand(virtual_address, true);
        log::info!(
            "Evicted {:#x} from frame {}, loaded {:#x}",
            victim,
            slot,
            virtual_address
        );
    }
}

pub fn access_page<const CAPACITY: usize, E: PageEvents + ?Sized>(
    table: &mut FrameTable<CAPACITY>,
    virtual_address: u64,
    events: &mut E,
) {
    if virtual_address == 0 || hit(table, virtual_address) {
        return;
    }
    map_page(table, virtual_address, events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Event, RecordingEvents, NO_PAGE_FRAMES};

    fn filled(count: u64) -> (FrameTable<NO_PAGE_FRAMES>, RecordingEvents) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut table = FrameTable::new();
        let mut events = RecordingEvents::new();
        for va in 1..=count {
            map_page(&mut table, va, &mut events);
        }
        (table, events)
    }

    #[test]
    fn fresh_pages_start_referenced() {
        // Loaded pages count as seen once, unlike the textbook algorithm.
        let (table, _) = filled(3);
        assert!(table.frames()[..3].iter().all(|frame| frame.referenced));
        assert!(!table.frames()[3].referenced);
    }

    #[test]
    fn full_sweep_evicts_original_hand() {
        let (mut table, mut events) = filled(8);
        assert_eq!(table.first(), 0);
        map_page(&mut table, 9, &mut events);

        assert_eq!(events.evictions(), vec![1]);
        assert_eq!(&events.events[8..], &[Event::Evict(1), Event::Load(9)]);
        assert_eq!(table.frames()[0].virtual_address, 9);
        assert!(table.frames()[0].referenced);
        // the sweep cleared every other frame
        assert!(table.frames()[1..].iter().all(|frame| !frame.referenced));
        assert_eq!((table.first(), table.last()), (1, 1));
    }

    #[test]
    fn touched_page_survives() {
        let (mut table, mut events) = filled(9);
        // after the sweep only page 9 is referenced; hand is at page 2
        access_page(&mut table, 2, &mut events);
        map_page(&mut table, 10, &mut events);

        assert_eq!(events.evictions(), vec![1, 3]);
        assert!(table.contains(2));
        assert!(!table.frames()[1].referenced);
        assert!(!table.contains(3));
        assert_eq!(table.first(), 3);
    }

    #[test]
    fn untouched_pages_go_in_hand_order() {
        let (mut table, mut events) = filled(9);
        for va in 10..=15 {
            map_page(&mut table, va, &mut events);
        }
        assert_eq!(events.evictions(), (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn remap_sets_referenced() {
        let (mut table, mut events) = filled(9);
        assert!(!table.frames()[4].referenced);
        let before = events.events.len();

        map_page(&mut table, 5, &mut events);

        assert!(table.frames()[4].referenced);
        assert_eq!(events.events.len(), before);
        assert_eq!((table.first(), table.last()), (1, 1));
    }

    #[test]
    fn access_miss_maps() {
        let mut table: FrameTable<NO_PAGE_FRAMES> = FrameTable::new();
        let mut events = RecordingEvents::new();
        access_page(&mut table, 7, &mut events);
        assert_eq!(events.events, vec![Event::Load(7)]);
        assert!(table.frames()[0].referenced);
    }

    #[test]
    fn sentinel_is_ignored() {
        let (mut table, mut events) = filled(9);
        let before = table.clone();
        events.clear();
        map_page(&mut table, 0, &mut events);
        access_page(&mut table, 0, &mut events);
        assert_eq!(table, before);
        assert!(events.events.is_empty());
    }

    #[test]
    fn sweep_is_bounded() {
        let mut table: FrameTable<2> = FrameTable::new();
        let mut events = RecordingEvents::new();
        for va in 1..=100 {
            map_page(&mut table, va, &mut events);
            access_page(&mut table, va, &mut events);
        }
        assert_eq!(table.len(), 2);
        assert_eq!(events.evictions().len(), 98);
    }
}
