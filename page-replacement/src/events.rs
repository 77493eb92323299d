/// The owner of physical memory, told about every load and eviction.
pub trait PageEvents {
    /// `virtual_address` is losing its frame; called before the frame is reused.
    fn evict_page(&mut self, virtual_address: u64);

    /// `virtual_address` is being brought into a frame.
    fn load_page(&mut self, virtual_address: u64);
}

impl<T: PageEvents + ?Sized> PageEvents for &mut T {
    fn evict_page(&mut self, virtual_address: u64) {
        (**self).evict_page(virtual_address)
    }

    fn load_page(&mut self, virtual_address: u64) {
        (**self).load_page(virtual_address)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Load(u64),
    Evict(u64),
}

/// Keeps every callback in call order.
#[derive(Debug, Default, Clone)]
pub struct RecordingEvents {
    pub events: Vec<Event>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loads(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Load(va) => Some(*va),
                Event::Evict(_) => None,
            })
            .collect()
    }

    pub fn evictions(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Evict(va) => Some(*va),
                Event::Load(_) => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl PageEvents for RecordingEvents {
    fn evict_page(&mut self, virtual_address: u64) {
        self.events.push(Event::Evict(virtual_address));
    }

    fn load_page(&mut self, virtual_address: u64) {
        self.events.push(Event::Load(virtual_address));
    }
}
