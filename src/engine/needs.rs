//! Roster needs and competitive phase of a team.

use crate::config::{CapRules, NeedsConfig};
use crate::domain::{Decimal, PlayerSnapshot, Position, StatCategory, TeamSnapshot};
use crate::engine::cap::CapTier;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Win-now versus rebuild orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompetitivePhase {
    Contender,
    Neutral,
    Seller,
}

/// Derived needs profile. Recomputed per call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamNeeds {
    pub weak_positions: BTreeSet<Position>,
    pub strong_positions: BTreeSet<Position>,
    pub stat_needs: BTreeSet<StatCategory>,
    pub competitive_phase: CompetitivePhase,
    pub cap_room_remaining: Decimal,
    pub is_taxpayer: bool,
    pub payroll: Decimal,
    pub cap_tier: CapTier,
    pub top3_average: f64,
    pub stat_averages: BTreeMap<StatCategory, f64>,
}

pub struct NeedsAnalyzer<'a> {
    config: &'a NeedsConfig,
    cap: &'a CapRules,
}

impl<'a> NeedsAnalyzer<'a> {
    pub fn new(config: &'a NeedsConfig, cap: &'a CapRules) -> Self {
        Self { config, cap }
    }

    pub fn analyze(&self, team: &TeamSnapshot) -> TeamNeeds {
        let cfg = self.config;
        let ranked = rank_by_rating(&team.roster);

        let mut weak_positions = BTreeSet::new();
        let mut strong_positions = BTreeSet::new();
        for position in Position::ALL {
            let listed: Vec<&PlayerSnapshot> =
                ranked.iter().copied().filter(|p| p.plays(position)).collect();
            // ranked is best-first, so the first listed player is the best
            match listed.first() {
                None => {
                    weak_positions.insert(position);
                }
                Some(best) => {
                    if best.overall() < cfg.weak_rating || listed.len() < cfg.min_depth {
                        weak_positions.insert(position);
                    }
                    if best.overall() >= cfg.strong_rating {
                        strong_positions.insert(position);
                    }
                }
            }
        }

        let core = &ranked[..ranked.len().min(cfg.core_size)];
        let mut stat_needs = BTreeSet::new();
        let mut stat_averages = BTreeMap::new();
        for stat in StatCategory::ALL {
            let avg = average(core.iter().map(|p| p.stat(stat)));
            if avg < cfg.stat_need_average {
                stat_needs.insert(stat);
            }
            stat_averages.insert(stat, avg);
        }

        let stars = &ranked[..ranked.len().min(cfg.star_core_size)];
        let top3_average = average(stars.iter().map(|p| p.overall()));

        let margin = team.win_margin();
        // empty roster is Neutral regardless of record
        let competitive_phase = if team.roster.is_empty() {
            CompetitivePhase::Neutral
        } else if top3_average >= cfg.contender_star_average || margin > cfg.record_margin {
            CompetitivePhase::Contender
        } else if -margin > cfg.record_margin {
            CompetitivePhase::Seller
        } else {
            CompetitivePhase::Neutral
        };

        let payroll = team.payroll();

        TeamNeeds {
            weak_positions,
            strong_positions,
            stat_needs,
            competitive_phase,
            cap_room_remaining: self.cap.cap_line - payroll,
            is_taxpayer: payroll > self.cap.tax_line,
            payroll,
            cap_tier: CapTier::for_payroll(payroll, self.cap),
            top3_average,
            stat_averages,
        }
    }
}

/// Roster sorted by overall rating, best first; ties by player id.
fn rank_by_rating(roster: &[PlayerSnapshot]) -> Vec<&PlayerSnapshot> {
    let mut ranked: Vec<&PlayerSnapshot> = roster.iter().collect();
    ranked.sort_by(|a, b| {
        b.overall()
            .total_cmp(&a.overall())
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked
}

/// Mean of the values, 0.0 when there are none.
fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(team: &TeamSnapshot) -> TeamNeeds {
        let needs = NeedsConfig::default();
        let cap = CapRules::default();
        NeedsAnalyzer::new(&needs, &cap).analyze(team)
    }

    fn player(id: &str, position: Position, overall: f64) -> PlayerSnapshot {
        PlayerSnapshot::new(id, id, position, overall)
    }

    fn balanced_roster(overall: f64) -> Vec<PlayerSnapshot> {
        Position::ALL
            .iter()
            .enumerate()
            .flat_map(|(i, pos)| {
                [
                    player(&format!("{}a", i), *pos, overall),
                    player(&format!("{}b", i), *pos, overall - 2.0),
                ]
            })
            .collect()
    }

    #[test]
    fn test_empty_roster() {
        let needs = analyze(&TeamSnapshot::new("t", "Empty", vec![]));
        assert_eq!(needs.weak_positions.len(), 5);
        assert!(needs.strong_positions.is_empty());
        assert_eq!(needs.stat_needs.len(), 3);
        assert_eq!(needs.competitive_phase, CompetitivePhase::Neutral);
        assert!(!needs.is_taxpayer);
        assert_eq!(needs.top3_average, 0.0);
        assert_eq!(needs.cap_room_remaining, Decimal::from_i64(140));
        assert_eq!(needs.cap_tier, CapTier::Healthy);
    }

    #[test]
    fn test_empty_roster_is_neutral_whatever_the_record() {
        for (wins, losses) in [(30, 10), (10, 30)] {
            let team = TeamSnapshot::new("t", "Empty", vec![]).with_record(wins, losses);
            assert_eq!(analyze(&team).competitive_phase, CompetitivePhase::Neutral);
        }
    }

    #[test]
    fn test_thin_position_is_weak_even_with_star() {
        let mut roster = balanced_roster(80.0);
        roster.retain(|p| !p.plays(Position::C));
        roster.push(player("big", Position::C, 88.0));

        let needs = analyze(&TeamSnapshot::new("t", "T", roster));
        assert!(needs.weak_positions.contains(&Position::C));
        assert!(needs.strong_positions.contains(&Position::C));
        assert!(!needs.weak_positions.contains(&Position::PG));
    }

    #[test]
    fn test_low_rated_best_is_weak() {
        let mut roster = balanced_roster(80.0);
        for p in roster.iter_mut().filter(|p| p.plays(Position::SG)) {
            p.overall_rating = Some(74.0);
        }
        let needs = analyze(&TeamSnapshot::new("t", "T", roster));
        assert_eq!(
            needs.weak_positions.iter().copied().collect::<Vec<_>>(),
            vec![Position::SG]
        );
    }

    #[test]
    fn test_secondary_position_counts_for_depth() {
        let roster = vec![
            player("a", Position::PG, 80.0),
            player("b", Position::SG, 78.0).with_secondary(Position::PG),
        ];
        let needs = analyze(&TeamSnapshot::new("t", "T", roster));
        assert!(!needs.weak_positions.contains(&Position::PG));
        assert!(needs.weak_positions.contains(&Position::SG));
    }

    #[test]
    fn test_stat_needs_use_top_eight_only() {
        let mut roster: Vec<PlayerSnapshot> = (0..8)
            .map(|i| {
                player(&format!("core{}", i), Position::SF, 80.0)
                    .with_stat(StatCategory::Defense, 80.0)
                    .with_stat(StatCategory::Rebounding, 72.0)
                    .with_stat(StatCategory::OutsideScoring, 60.0)
            })
            .collect();
        // bench players with terrible defense do not drag the core average down
        for i in 0..4 {
            roster.push(
                player(&format!("bench{}", i), Position::SF, 60.0)
                    .with_stat(StatCategory::Defense, 10.0),
            );
        }

        let needs = analyze(&TeamSnapshot::new("t", "T", roster));
        assert_eq!(
            needs.stat_needs.iter().copied().collect::<Vec<_>>(),
            vec![StatCategory::OutsideScoring]
        );
        assert_eq!(needs.stat_averages[&StatCategory::Defense], 80.0);
    }

    #[test]
    fn test_missing_sub_ratings_default_to_fifty() {
        let needs = analyze(&TeamSnapshot::new("t", "T", balanced_roster(80.0)));
        assert_eq!(needs.stat_needs.len(), 3);
        assert_eq!(needs.stat_averages[&StatCategory::Rebounding], 50.0);
    }

    #[test]
    fn test_contender_by_star_power() {
        let mut roster = balanced_roster(75.0);
        roster.push(player("s1", Position::SF, 90.0));
        roster.push(player("s2", Position::PG, 85.0));
        roster.push(player("s3", Position::C, 80.0));
        let needs = analyze(&TeamSnapshot::new("t", "T", roster).with_record(10, 30));
        assert_eq!(needs.top3_average, 85.0);
        assert_eq!(needs.competitive_phase, CompetitivePhase::Contender);
    }

    #[test]
    fn test_phase_by_record() {
        let roster = balanced_roster(78.0);
        let contender = analyze(&TeamSnapshot::new("t", "T", roster.clone()).with_record(30, 24));
        let neutral = analyze(&TeamSnapshot::new("t", "T", roster.clone()).with_record(20, 25));
        let seller = analyze(&TeamSnapshot::new("t", "T", roster).with_record(20, 26));
        assert_eq!(contender.competitive_phase, CompetitivePhase::Contender);
        assert_eq!(neutral.competitive_phase, CompetitivePhase::Neutral);
        assert_eq!(seller.competitive_phase, CompetitivePhase::Seller);
    }

    #[test]
    fn test_cap_fields() {
        let roster = vec![
            player("a", Position::PG, 80.0).with_salary(Decimal::from_i64(100)),
            player("b", Position::C, 80.0).with_salary(Decimal::from_i64(75)),
        ];
        let needs = analyze(&TeamSnapshot::new("t", "T", roster));
        assert_eq!(needs.payroll, Decimal::from_i64(175));
        assert_eq!(needs.cap_room_remaining, Decimal::from_i64(-35));
        assert!(needs.is_taxpayer);
        assert_eq!(needs.cap_tier, CapTier::Taxpayer);
    }

    #[test]
    fn test_payroll_at_tax_line_is_not_taxpayer() {
        let roster = vec![player("a", Position::PG, 80.0).with_salary(Decimal::from_i64(170))];
        let needs = analyze(&TeamSnapshot::new("t", "T", roster));
        assert!(!needs.is_taxpayer);
    }
}
