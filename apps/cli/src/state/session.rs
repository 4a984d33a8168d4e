//! # Quote Session
//!
//! Owns the rate table, the open request and the last breakdown.
//!
//! ## Recompute on Every Change
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  Operator / customer edit      Session method          Follow-up        │
//! │  ────────────────────────      ──────────────          ─────────        │
//! │                                                                         │
//! │  --distance / --floors ──────► update_request() ─────► reprice          │
//! │  --item fridge=2 ────────────► set_quantity() ───────► reprice          │
//! │  config set / biz ───────────► update_config() ──────► reconcile+reprice│
//! │  items add/update/remove ────► add_item() ... ───────► reconcile+reprice│
//! │  config import / reset ──────► replace_config() ─────► reconcile+reprice│
//! │                                                                         │
//! │  breakdown() is always the price of the current config and request.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use haul_core::validation::{
    validate_item_id, validate_item_label, validate_unique_ids, validate_unit_label,
};
use haul_core::{
    price, reconcile, CoreError, CoreResult, LineItem, Money, QuoteBreakdown, QuoteRequest,
    RateConfig, DEFAULT_UNIT_LABEL,
};

/// Partial update of one line item; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub label: Option<String>,
    pub unit_price: Option<Money>,
    pub unit_label: Option<String>,
}

/// The single open quote.
#[derive(Debug, Clone)]
pub struct QuoteSession {
    config: RateConfig,
    request: QuoteRequest,
    breakdown: QuoteBreakdown,
}

impl QuoteSession {
    /// Opens a session with a fresh request for `config`.
    pub fn new(config: RateConfig) -> Self {
        let request = QuoteRequest::for_items(&config.items);
        let breakdown = price(&config, &request);
        QuoteSession {
            config,
            request,
            breakdown,
        }
    }

    pub fn config(&self) -> &RateConfig {
        &self.config
    }

    pub fn request(&self) -> &QuoteRequest {
        &self.request
    }

    pub fn breakdown(&self) -> &QuoteBreakdown {
        &self.breakdown
    }

    // =========================================================================
    // Request edits
    // =========================================================================

    /// Applies a customer-side edit and reprices.
    ///
    /// The distance is re-clamped and the quantity map re-reconciled, so
    /// `f` cannot leave the request in a state `price` has to guard against.
    pub fn update_request(&mut self, f: impl FnOnce(&mut QuoteRequest)) -> &QuoteBreakdown {
        f(&mut self.request);
        let distance = self.request.distance_km;
        self.request.set_distance_km(distance);
        self.request = reconcile(std::mem::take(&mut self.request), &self.config.items);
        self.reprice()
    }

    /// Sets the quantity of one item.
    ///
    /// ## Errors
    /// `CoreError::ItemNotFound` when `item_id` is not in the rate table.
    pub fn set_quantity(&mut self, item_id: &str, qty: u32) -> CoreResult<&QuoteBreakdown> {
        if self.config.item(item_id).is_none() {
            return Err(CoreError::ItemNotFound(item_id.to_string()));
        }
        self.request.quantities.insert(item_id.to_string(), qty);
        Ok(self.reprice())
    }

    // =========================================================================
    // Rate table edits
    // =========================================================================

    /// Applies an operator edit to the rate table, then reconciles and reprices.
    pub fn update_config(&mut self, f: impl FnOnce(&mut RateConfig)) -> &QuoteBreakdown {
        f(&mut self.config);
        self.request = reconcile(std::mem::take(&mut self.request), &self.config.items);
        self.reprice()
    }

    /// Replaces the item list. Ids are not checked.
    pub fn set_items(&mut self, items: Vec<LineItem>) -> &QuoteBreakdown {
        self.update_config(|cfg| cfg.set_items(items))
    }

    /// Swaps in a whole new rate table (import, reset).
    pub fn replace_config(&mut self, config: RateConfig) -> &QuoteBreakdown {
        self.update_config(|cfg| cfg.replace(config))
    }

    /// Appends an item after validating it against the current table.
    ///
    /// ## Errors
    /// - `Validation` for a malformed id, empty/long label, long unit
    /// - `Validation(Duplicate)` when the id is already taken
    pub fn add_item(&mut self, item: LineItem) -> CoreResult<&QuoteBreakdown> {
        validate_item_id(&item.id)?;
        validate_item_label(&item.label)?;
        validate_unit_label(&item.unit_label)?;

        let mut items = self.config.items.clone();
        items.push(item);
        validate_unique_ids(&items)?;

        Ok(self.set_items(items))
    }

    /// Patches label, price or unit of one item.
    pub fn update_item(&mut self, item_id: &str, patch: ItemPatch) -> CoreResult<&QuoteBreakdown> {
        if let Some(label) = &patch.label {
            validate_item_label(label)?;
        }
        if let Some(unit) = &patch.unit_label {
            validate_unit_label(unit)?;
        }

        let mut items = self.config.items.clone();
        let item = items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;

        if let Some(label) = patch.label {
            item.label = label.trim().to_string();
        }
        if let Some(price) = patch.unit_price {
            item.unit_price = price;
        }
        if let Some(unit) = patch.unit_label {
            let unit = unit.trim();
            item.unit_label = if unit.is_empty() {
                DEFAULT_UNIT_LABEL.to_string()
            } else {
                unit.to_string()
            };
        }

        Ok(self.set_items(items))
    }

    /// Removes one item (every row with that id) and its quantity.
    pub fn remove_item(&mut self, item_id: &str) -> CoreResult<&QuoteBreakdown> {
        if self.config.item(item_id).is_none() {
            return Err(CoreError::ItemNotFound(item_id.to_string()));
        }

        let items = self
            .config
            .items
            .iter()
            .filter(|item| item.id != item_id)
            .cloned()
            .collect();

        Ok(self.set_items(items))
    }

    fn reprice(&mut self) -> &QuoteBreakdown {
        self.breakdown = price(&self.config, &self.request);
        &self.breakdown
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
