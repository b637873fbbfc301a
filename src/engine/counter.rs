//! Inverse search: what the requesting team should give up for players it wants.

use crate::config::TradeRules;
use crate::domain::{sort_offers_deterministic, PlayerSnapshot, TeamSnapshot, TradeOffer};
use crate::engine::needs::NeedsAnalyzer;
use crate::engine::package::{assemble, score_interest, tradeable_pool};
use crate::engine::valuation::ValuationModel;
use std::collections::HashSet;

pub struct CounterOfferGenerator<'a> {
    rules: &'a TradeRules,
}

impl<'a> CounterOfferGenerator<'a> {
    pub fn new(rules: &'a TradeRules) -> Self {
        Self { rules }
    }

    /// Packages from `requesting_team`'s roster that `owning_team` would accept for `desired`.
    ///
    /// The first candidate is the plain greedy package over the whole tradeable pool. Further
    /// candidates start the greedy pass from each successively lower-valued anchor, so cheaper
    /// alternatives are also surfaced. Each package must interest the owning team.
    pub fn search(
        &self,
        desired: &[PlayerSnapshot],
        owning_team: &TeamSnapshot,
        requesting_team: &TeamSnapshot,
    ) -> Vec<TradeOffer> {
        if desired.is_empty() || owning_team.id == requesting_team.id {
            return Vec::new();
        }

        let search = &self.rules.search;
        let model = ValuationModel::new(&self.rules.valuation);
        let needs = NeedsAnalyzer::new(&self.rules.needs, &self.rules.cap).analyze(owning_team);
        let reference_value = model.total(desired);
        let desired_ids: HashSet<&str> = desired.iter().map(|p| p.id.as_str()).collect();

        let pool = tradeable_pool(&requesting_team.roster, &model, search, &[], &desired_ids);

        let mut seen: HashSet<Vec<&str>> = HashSet::new();
        let mut offers = Vec::new();
        for anchor in 0..pool.len() {
            let Some(package) = assemble(&pool[anchor..], reference_value, search) else {
                // lower anchors only shrink the package
                break;
            };

            let ids: Vec<&str> = package.players.iter().copied().map(|p| p.id.as_str()).collect();
            if !seen.insert(ids) {
                continue;
            }

            let interest = score_interest(&needs, package.players.iter().copied(), search);
            if interest.score == 0 {
                tracing::debug!(
                    owner = %owning_team.id,
                    anchor,
                    "owning team has no interest in package"
                );
                continue;
            }

            offers.push(TradeOffer::new(
                requesting_team.id.clone(),
                requesting_team.name.clone(),
                package.players.into_iter().cloned().collect(),
                package.value,
                reference_value,
                interest.score,
                interest.rationale(),
            ));
        }

        tracing::debug!(
            owner = %owning_team.id,
            requester = %requesting_team.id,
            count = offers.len(),
            "counter offers assembled"
        );

        sort_offers_deterministic(&mut offers);
        offers.truncate(search.max_offers);
        offers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Decimal, Position, StatCategory};

    fn player(id: &str, position: Position, overall: f64) -> PlayerSnapshot {
        PlayerSnapshot::new(id, id, position, overall)
            .with_salary(Decimal::from_i64(10))
            .with_stat(StatCategory::Defense, 72.0)
            .with_stat(StatCategory::Rebounding, 72.0)
            .with_stat(StatCategory::OutsideScoring, 72.0)
    }

    fn owner_needing_center() -> TeamSnapshot {
        let roster = vec![
            player("o-pg1", Position::PG, 84.0),
            player("o-pg2", Position::PG, 76.0),
            player("o-sg1", Position::SG, 80.0),
            player("o-sg2", Position::SG, 76.0),
            player("o-sf1", Position::SF, 80.0),
            player("o-sf2", Position::SF, 76.0),
            player("o-pf1", Position::PF, 80.0),
            player("o-pf2", Position::PF, 76.0),
            player("o-c1", Position::C, 70.0),
        ];
        TeamSnapshot::new("owner", "Owner", roster)
    }

    fn requester() -> TeamSnapshot {
        let roster = vec![
            player("r-c1", Position::C, 80.0),
            player("r-c2", Position::C, 75.0),
            player("r-pg", Position::PG, 78.0),
            player("r-sf", Position::SF, 60.0),
            player("r-star", Position::SF, 95.0),
        ];
        TeamSnapshot::new("me", "Mine", roster)
    }

    fn counter(desired: &[PlayerSnapshot], owner: &TeamSnapshot, me: &TeamSnapshot) -> Vec<TradeOffer> {
        let rules = TradeRules::default();
        CounterOfferGenerator::new(&rules).search(desired, owner, me)
    }

    #[test]
    fn test_empty_desired_returns_nothing() {
        assert!(counter(&[], &owner_needing_center(), &requester()).is_empty());
    }

    #[test]
    fn test_same_team_returns_nothing() {
        let owner = owner_needing_center();
        let desired = vec![owner.roster[0].clone()];
        assert!(counter(&desired, &owner, &owner).is_empty());
    }

    #[test]
    fn test_package_built_from_requesting_roster() {
        let owner = owner_needing_center();
        let desired = vec![owner.roster[0].clone()];
        let offers = counter(&desired, &owner, &requester());

        assert!(!offers.is_empty());
        let best = &offers[0];
        assert_eq!(best.proposing_team_id.as_str(), "me");
        // 84 -> 85_184; top anchor r-c1 (64_000) then r-pg (54_872)
        assert_eq!(best.reference_value, 85_184);
        assert_eq!(best.player_ids(), vec!["r-c1", "r-pg"]);
        assert_eq!(best.package_value, 118_872);
        assert!(best.rationale.iter().any(|l| l.contains("weak spot at C")));
    }

    #[test]
    fn test_untouchable_never_offered() {
        let owner = owner_needing_center();
        let desired = vec![owner.roster[0].clone()];
        for offer in counter(&desired, &owner, &requester()) {
            assert!(offer.player_ids().iter().all(|id| *id != "r-star"));
        }
    }

    #[test]
    fn test_alternatives_are_distinct_and_ranked() {
        let owner = owner_needing_center();
        let desired = vec![owner.roster[0].clone()];
        let offers = counter(&desired, &owner, &requester());

        assert_eq!(offers.len(), 2);
        assert_ne!(offers[0].offer_key, offers[1].offer_key);
        // anchor r-pg: 54_872 + r-c2 42_875 = 97_747
        assert_eq!(offers[1].player_ids(), vec!["r-pg", "r-c2"]);
        assert!(offers[0].interest_score >= offers[1].interest_score);
    }

    #[test]
    fn test_no_interest_no_offer() {
        // owner is deep everywhere and neutral, so nothing the requester has appeals
        let roster: Vec<PlayerSnapshot> = Position::ALL
            .iter()
            .flat_map(|pos| {
                [
                    player(&format!("o-{}1", pos), *pos, 82.0),
                    player(&format!("o-{}2", pos), *pos, 78.0),
                ]
            })
            .collect();
        let owner = TeamSnapshot::new("owner", "Owner", roster);
        let desired = vec![owner.roster[0].clone()];
        let me = TeamSnapshot::new("me", "Mine", vec![player("r1", Position::C, 82.0).with_age(28)]);

        assert!(counter(&desired, &owner, &me).is_empty());
    }

    #[test]
    fn test_counter_is_idempotent() {
        let owner = owner_needing_center();
        let desired = vec![owner.roster[0].clone(), owner.roster[2].clone()];
        let me = requester();
        assert_eq!(counter(&desired, &owner, &me), counter(&desired, &owner, &me));
    }
}
