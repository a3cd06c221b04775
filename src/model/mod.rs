//! Deck model types for slide content representation.
//!
//! This module defines the intermediate representation that bridges
//! markdown parsing and output rendering. Slides carry finished markup;
//! the smaller types (lists, tables, extracted blocks) are the
//! structures the parser builds on the way there.

mod block;
mod deck;
mod list;
mod slide;
mod stats;
mod table;

pub use block::{BlockKind, BlockTable, ExtractedBlock, Placeholder, TOKEN_MARK};
pub use deck::{Deck, Metadata};
pub use list::{ListMarker, ListNode, MAX_LIST_DEPTH};
pub use slide::Slide;
pub use stats::{DeckStats, SlideStats};
pub use table::{Alignment, Table};
