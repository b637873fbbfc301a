//! League-wide search for return packages on a set of shopped players.

use crate::config::TradeRules;
use crate::domain::{sort_offers_deterministic, PlayerSnapshot, Position, TeamId, TeamSnapshot, TradeOffer};
use crate::engine::needs::NeedsAnalyzer;
use crate::engine::package::{assemble, score_interest, tradeable_pool};
use crate::engine::valuation::ValuationModel;
use std::collections::HashSet;

pub struct OfferSearchEngine<'a> {
    rules: &'a TradeRules,
}

impl<'a> OfferSearchEngine<'a> {
    pub fn new(rules: &'a TradeRules) -> Self {
        Self { rules }
    }

    /// Find packages other teams would give for `outgoing`.
    ///
    /// Every team except the requester is scanned. A team is skipped when nothing in
    /// `outgoing` answers its needs. Results are ranked with `OfferOrderingKey` and capped at
    /// `max_offers`.
    pub fn search(
        &self,
        outgoing: &[PlayerSnapshot],
        requesting_team_id: &TeamId,
        league: &[TeamSnapshot],
        desired_positions: &[Position],
    ) -> Vec<TradeOffer> {
        if outgoing.is_empty() {
            return Vec::new();
        }

        let search = &self.rules.search;
        let model = ValuationModel::new(&self.rules.valuation);
        let analyzer = NeedsAnalyzer::new(&self.rules.needs, &self.rules.cap);
        let outgoing_value = model.total(outgoing);
        let outgoing_ids: HashSet<&str> = outgoing.iter().map(|p| p.id.as_str()).collect();

        let mut offers = Vec::new();
        for team in league.iter().filter(|t| &t.id != requesting_team_id) {
            let needs = analyzer.analyze(team);
            let interest = score_interest(&needs, outgoing, search);
            if interest.score == 0 {
                tracing::debug!(team = %team.id, "no interest in shopped players");
                continue;
            }

            let pool = tradeable_pool(&team.roster, &model, search, desired_positions, &outgoing_ids);
            let Some(package) = assemble(&pool, outgoing_value, search) else {
                tracing::debug!(
                    team = %team.id,
                    interest = interest.score,
                    "no package inside the acceptance band"
                );
                continue;
            };

            let offer = TradeOffer::new(
                team.id.clone(),
                team.name.clone(),
                package.players.into_iter().cloned().collect(),
                package.value,
                outgoing_value,
                interest.score,
                interest.rationale(),
            );
            tracing::debug!(
                team = %team.id,
                interest = offer.interest_score,
                diff = offer.diff_value,
                "offer found"
            );
            offers.push(offer);
        }

        sort_offers_deterministic(&mut offers);
        offers.truncate(search.max_offers);
        offers
    }
}
