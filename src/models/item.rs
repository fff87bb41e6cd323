//! Domain model for menu entries.
//!
//! The remote endpoint and the local cache slot both carry a flat JSON array
//! of these objects, field names matching exactly.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single entry on the menu.
///
/// `price` is numeric; the currency unit ("TK") is a display concern only.
/// `image` is an externally hosted URL and is never validated or fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub details: String,
    pub image: String,
}

/// Mint a fresh item id.
///
/// Ids are milliseconds since the Unix epoch, the same scheme the canonical
/// data uses. Ids minted within the same millisecond are bumped past the last
/// value handed out, so uniqueness holds within the process. Two separate
/// clients can still collide; there is no server-side uniqueness check.
pub fn next_item_id() -> i64 {
    static LAST_ID: AtomicI64 = AtomicI64::new(0);

    let mut candidate = Utc::now().timestamp_millis();
    loop {
        let last = LAST_ID.load(Ordering::SeqCst);
        if candidate <= last {
            candidate = last + 1;
        }
        if LAST_ID
            .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            return candidate;
        }
    }
}
