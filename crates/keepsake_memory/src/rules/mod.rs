//! Game rules for memory matching.
//!
//! Pure functions over cards and decks, kept apart from the phase types
//! so contracts and invariants can reuse them.

pub mod deal;
pub mod pairing;

pub use deal::deal;
pub use pairing::{all_pairs_matched, is_pair};
