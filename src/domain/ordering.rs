//! Stable offer ordering for deterministic result lists.

use crate::domain::TradeOffer;
use std::cmp::{Ordering, Reverse};

/// Ranking key for offers.
///
/// Ordering: interest_score desc -> diff_value desc -> team id asc -> offer_key asc.
/// The last component makes the order total, so ties never depend on league iteration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct OfferOrderingKey<'a> {
    pub interest_score: Reverse<u32>,
    pub diff_value: Reverse<i64>,
    pub team_id: &'a str,
    pub offer_key: &'a str,
}

impl<'a> OfferOrderingKey<'a> {
    pub fn from_offer(offer: &'a TradeOffer) -> Self {
        OfferOrderingKey {
            interest_score: Reverse(offer.interest_score),
            diff_value: Reverse(offer.diff_value),
            team_id: offer.proposing_team_id.as_str(),
            offer_key: &offer.offer_key,
        }
    }

    pub fn compare(a: &TradeOffer, b: &TradeOffer) -> Ordering {
        OfferOrderingKey::from_offer(a).cmp(&OfferOrderingKey::from_offer(b))
    }
}

/// Sort offers best-first.
pub fn sort_offers_deterministic(offers: &mut [TradeOffer]) {
    offers.sort_by(OfferOrderingKey::compare);
}
