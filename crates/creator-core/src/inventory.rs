//! # Inventory Status & Valuation
//!
//! Stock-level classification for storefront badges and monetary
//! valuation of a studio's catalog.
//!
//! ## Classification Boundaries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity ≤ 0            ──► OutOfStock   "Out of Stock"               │
//! │  0 < quantity ≤ threshold ─► LowStock     "Low Stock (N)"              │
//! │  quantity > threshold    ──► InStock      "In Stock"                   │
//! │                                                                         │
//! │  threshold = 5 by default; the threshold itself counts as low          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both operations are pure and total: no side effects, no error
//! conditions, nothing persisted. The classification is recomputed on
//! render, never stored.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Default low-stock threshold used by storefront badges.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

// =============================================================================
// Stock Status
// =============================================================================

/// Ephemeral stock classification for a product or variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    /// Classifies a quantity against a low-stock threshold.
    ///
    /// ## Example
    /// ```rust
    /// use creator_core::inventory::StockStatus;
    ///
    /// assert_eq!(StockStatus::classify(0, 5), StockStatus::OutOfStock);
    /// assert_eq!(StockStatus::classify(5, 5), StockStatus::LowStock);
    /// assert_eq!(StockStatus::classify(6, 5), StockStatus::InStock);
    /// ```
    pub fn classify(quantity: i64, threshold: i64) -> StockStatus {
        if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity <= threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Classifies against [`DEFAULT_LOW_STOCK_THRESHOLD`].
    pub fn classify_default(quantity: i64) -> StockStatus {
        StockStatus::classify(quantity, DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

/// Human label paired with a classification, e.g. "Low Stock (3)".
///
/// The low-stock label carries the remaining quantity for urgency
/// display on product cards.
pub fn stock_label(quantity: i64, threshold: i64) -> String {
    match StockStatus::classify(quantity, threshold) {
        StockStatus::OutOfStock => "Out of Stock".to_string(),
        StockStatus::LowStock => format!("Low Stock ({quantity})"),
        StockStatus::InStock => "In Stock".to_string(),
    }
}

// =============================================================================
// Inventory Valuation
// =============================================================================

/// Stock position of a single variant.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantStock {
    /// Variant price in cents.
    pub price_cents: i64,
    /// Units on hand for this variant.
    pub stock: i64,
}

/// Stock position of one catalog product, with or without
/// variant-level stock splits.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductInventory {
    /// Product-level price in cents.
    pub price_cents: i64,
    /// Product-level quantity; ignored when variants carry the stock.
    pub quantity: i64,
    /// Variant-level stock splits. Empty when the product tracks stock
    /// at the product level.
    pub variants: Vec<VariantStock>,
}

/// Sums the monetary value of a catalog.
///
/// Each product is valued independently, branching per product:
/// - With variant-level stock: `Σ (variant.price × variant.stock)`
/// - Without: `price × quantity`
///
/// A mixed catalog is therefore valued correctly without any
/// catalog-wide mode switch.
///
/// ## Example
/// ```rust
/// use creator_core::inventory::{catalog_value, ProductInventory, VariantStock};
///
/// let catalog = vec![
///     ProductInventory { price_cents: 1000, quantity: 5, variants: vec![] },
///     ProductInventory {
///         price_cents: 2000,
///         quantity: 0,
///         variants: vec![
///             VariantStock { price_cents: 1500, stock: 2 },
///             VariantStock { price_cents: 2500, stock: 1 },
///         ],
///     },
/// ];
///
/// // 5000 + (3000 + 2500)
/// assert_eq!(catalog_value(&catalog).cents(), 10500);
/// ```
pub fn catalog_value(products: &[ProductInventory]) -> Money {
    products
        .iter()
        .map(|product| {
            if product.variants.is_empty() {
                Money::from_cents(product.price_cents).multiply_quantity(product.quantity)
            } else {
                product
                    .variants
                    .iter()
                    .map(|variant| {
                        Money::from_cents(variant.price_cents).multiply_quantity(variant.stock)
                    })
                    .sum()
            }
        })
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
