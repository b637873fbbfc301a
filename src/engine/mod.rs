//! Pure computation engines for trade valuation and matching.
//!
//! Every entry point is a deterministic function of its inputs and the `TradeRules` it is
//! given. Nothing here performs I/O or holds state between calls.

pub mod cap;
pub mod counter;
pub mod needs;
pub mod offers;
pub mod package;
pub mod valuation;

pub use cap::{CapComplianceValidator, CapTier, CapViolation, TradeVerdict};
pub use counter::CounterOfferGenerator;
pub use needs::{CompetitivePhase, NeedsAnalyzer, TeamNeeds};
pub use offers::OfferSearchEngine;
pub use package::Interest;
pub use valuation::ValuationModel;
