//! Data models for menu entities.
//!
//! The entity set is flat: `MenuItem` is the only entity, with no
//! relationships between items.

pub mod item;

pub use item::{next_item_id, MenuItem};
