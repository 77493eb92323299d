use std::fmt;
use std::str::FromStr;

use crate::{clock, fifo, FrameTable, PageEvents, NO_PAGE_FRAMES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    Fifo,
    #[default]
    Clock,
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownPolicy(pub String);

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown replacement policy '{}'", self.0)
    }
}

impl FromStr for Policy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(Policy::Fifo),
            "clock" | "second-chance" => Ok(Policy::Clock),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fifo => write!(f, "fifo"),
            Policy::Clock => write!(f, "clock"),
        }
    }
}

impl Policy {
    pub fn map<const CAPACITY: usize, E: PageEvents + ?Sized>(
        self,
        table: &mut FrameTable<CAPACITY>,
        virtual_address: u64,
        events: &mut E,
    ) {
        match self {
            Policy::Fifo => fifo::map_page(table, virtual_address, events),
            Policy::Clock => clock::map_page(table, virtual_address, events),
        }
    }

    pub fn access<const CAPACITY: usize, E: PageEvents + ?Sized>(
        self,
        table: &mut FrameTable<CAPACITY>,
        virtual_address: u64,
        events: &mut E,
    ) {
        match self {
            Policy::Fifo => fifo::access_page(table, virtual_address, events),
            Policy::Clock => clock::access_page(table, virtual_address, events),
        }
    }
}

/// A policy, its frame table and the memory owner it reports to.
#[derive(Debug)]
pub struct ReplacementEngine<E: PageEvents> {
    policy: Policy,
    table: FrameTable<NO_PAGE_FRAMES>,
    events: E,
}

impl<E: PageEvents> ReplacementEngine<E> {
    pub fn new(policy: Policy, events: E) -> Self {
        ReplacementEngine {
            policy,
            table: FrameTable::new(),
            events,
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn table(&self) -> &FrameTable<NO_PAGE_FRAMES> {
        &self.table
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn map(&mut self, virtual_address: u64) {
        self.policy.map(&mut self.table, virtual_address, &mut self.events);
    }

    pub fn access(&mut self, virtual_address: u64) {
        self.policy.access(&mut self.table, virtual_address, &mut self.events);
    }
}
