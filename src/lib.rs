pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;

pub use config::{Config, TradeRules};
pub use domain::{
    Decimal, HealthStatus, PlayerId, PlayerSnapshot, Position, StatCategory, TeamId,
    TeamSnapshot, TradeOffer,
};
pub use engine::{
    CapComplianceValidator, CapTier, CounterOfferGenerator, NeedsAnalyzer, OfferSearchEngine,
    TeamNeeds, TradeVerdict, ValuationModel,
};
pub use error::AppError;
