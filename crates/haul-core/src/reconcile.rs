//! # Quantity Reconciliation
//!
//! Keeps a request's quantity map in step with the rate table's items.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator edits items            Request quantities                     │
//! │                                                                         │
//! │  before: [fridge, washer]        { fridge: 2, washer: 1 }              │
//! │  after:  [fridge, desk]                                                 │
//! │                                                                         │
//! │  reconcile() ──►                 { fridge: 2, desk: 0 }                 │
//! │                                    ▲          ▲                         │
//! │                                    │          └── new id, starts at 0   │
//! │                                    └── surviving id, count kept         │
//! │                                  (washer dropped)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::types::{LineItem, QuoteRequest};

/// Reconciles `request.quantities` against the current item list.
///
/// - ids in `items` but not in the map are inserted with quantity 0
/// - ids in the map but not in `items` are removed
/// - ids in both keep their quantity
///
/// Idempotent: reconciling the result again with the same items changes
/// nothing. Only `quantities` is touched.
pub fn reconcile(mut request: QuoteRequest, items: &[LineItem]) -> QuoteRequest {
    let live: HashSet<&str> = items.iter().map(|item| item.id.as_str()).collect();

    request.quantities.retain(|id, _| live.contains(id.as_str()));
    for item in items {
        request.quantities.entry(item.id.clone()).or_insert(0);
    }

    request
}

// =============================================================================
// Unit Tests
// =============================================================================
