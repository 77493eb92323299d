//! Page replacement over a fixed set of page frames.
//!
//! Two policies share the same [`FrameTable`]: [`fifo`] and [`clock`]
//! (second chance). Both expose `map_page` for the fault path and
//! `access_page` for the touch path, and report loads and evictions to a
//! [`PageEvents`] implementation supplied by the caller.
//!
//! Everything here is single threaded. Callers sharing a table across
//! threads must serialize access themselves.

pub mod clock;
mod engine;
mod events;
pub mod fifo;
mod frame_table;

pub use engine::{Policy, ReplacementEngine, UnknownPolicy};
pub use events::{Event, PageEvents, RecordingEvents};
pub use frame_table::{FrameTable, PageFrame};

/// Number of page frames available to a table.
pub const NO_PAGE_FRAMES: usize = 8;
