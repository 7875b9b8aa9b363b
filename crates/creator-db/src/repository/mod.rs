//! # Repository Layer
//!
//! Data access repositories. Each repository owns the SQL for one
//! aggregate and keeps domain rules in creator-core:
//!
//! - [`line_item::LineItemRepository`] - seller line-item lifecycle
//! - [`payout::PayoutRepository`] - payout creation and status workflow

pub mod line_item;
pub mod payout;

pub use line_item::LineItemRepository;
pub use payout::{PayoutOutcome, PayoutRepository};
