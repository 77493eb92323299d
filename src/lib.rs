//! A small MMU simulator: four level address translation with demand paging
//! on top of a fixed set of page frames managed by FIFO or CLOCK replacement.

pub mod config;
pub mod meta_commands;
pub mod mmu;
pub mod repl;
pub mod statements;

pub use page_replacement as replacement;
pub use page_walk as walk;
