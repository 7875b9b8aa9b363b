//! # creator-core: Pure Business Logic for Core Creator
//!
//! This crate is the settlement heart of the Core Creator marketplace.
//! It contains the pricing, earnings and payout-eligibility rules as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Core Creator Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Web Application (storefront)                   │   │
//! │  │   Checkout ──► Studio Dashboard ──► Payouts ──► Admin          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ creator-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐ │   │
//! │  │   │  money   │ │ pricing  │ │ earnings │ │    inventory     │ │   │
//! │  │   │  Money   │ │Breakdown │ │Aggregate │ │  StockStatus     │ │   │
//! │  │   │  Rate    │ │Calculator│ │Eligibility│ │  Valuation      │ │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  creator-db (Database Layer)                    │   │
//! │  │        Line items, payout sweep, cached fee settings            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (FeeConfiguration, SellerLineItem, Payout, ...)
//! - [`money`] - Money and Rate types with integer arithmetic (no floats!)
//! - [`pricing`] - Price Breakdown Calculator
//! - [`earnings`] - Seller earnings aggregation and payout eligibility
//! - [`inventory`] - Stock classification and catalog valuation
//! - [`error`] - Domain error types and payout rejections
//! - [`validation`] - Input precondition checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are cents (i64); rates are basis points
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use creator_core::money::Money;
//! use creator_core::pricing::{compute_breakdown, BreakdownRequest};
//! use creator_core::types::FeeConfiguration;
//!
//! // $100.00 item, platform defaults (12% + 2.9%, no tax)
//! let request = BreakdownRequest::new(Money::from_cents(10000));
//! let breakdown = compute_breakdown(&request, &FeeConfiguration::default()).unwrap();
//!
//! assert_eq!(breakdown.total_buyer_pays.cents(), 10000);
//! assert_eq!(breakdown.seller_receives.cents(), 8510);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod earnings;
pub mod error;
pub mod inventory;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use creator_core::Money` instead of
// `use creator_core::money::Money`

pub use earnings::{aggregate, aggregate_with_basis, evaluate_payout, FeeBasis, PayoutDraft};
pub use error::{CoreError, CoreResult, PayoutRejection, ValidationError};
pub use money::{Money, Rate};
pub use pricing::{compute_breakdown, BreakdownRequest, PriceBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Settings cache time-to-live, in seconds.
///
/// ## Why a constant?
/// The fee configuration lives in the database and changes rarely.
/// Consumers cache it for this long before re-reading, and invalidate
/// explicitly when the admin back-office saves new settings.
pub const SETTINGS_CACHE_TTL_SECS: u64 = 300;
