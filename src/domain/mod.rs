//! Domain types for the trade engine.
//!
//! This module provides:
//! - Lossless salary arithmetic via the Decimal wrapper
//! - Domain primitives: PlayerId, TeamId, Position, HealthStatus, StatCategory
//! - Player and team snapshots with documented defaults for missing fields
//! - TradeOffer and a stable ordering key for deterministic result lists

pub mod decimal;
pub mod offer;
pub mod ordering;
pub mod player;
pub mod primitives;
pub mod team;

pub use decimal::Decimal;
pub use offer::TradeOffer;
pub use ordering::{sort_offers_deterministic, OfferOrderingKey};
pub use player::{total_salary, PlayerSnapshot};
pub use primitives::{HealthStatus, PlayerId, Position, StatCategory, TeamId};
pub use team::TeamSnapshot;
