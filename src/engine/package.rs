//! Building blocks shared by both offer directions: interest scoring against a team's needs,
//! the tradeable pool, and greedy package assembly inside the acceptance band.

use crate::config::SearchConfig;
use crate::domain::{PlayerSnapshot, Position, StatCategory};
use crate::engine::needs::{CompetitivePhase, TeamNeeds};
use crate::engine::valuation::ValuationModel;
use std::collections::HashSet;

/// How much a team wants a set of incoming players, with one reason per point source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interest {
    pub score: u32,
    pub reasons: Vec<String>,
}

impl Interest {
    fn add(&mut self, points: u32, reason: String) {
        self.score += points;
        self.reasons.push(reason);
    }

    /// Rationale lines: the score first, then each reason in player order.
    pub fn rationale(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.reasons.len() + 1);
        lines.push(format!("Interest score: {}", self.score));
        lines.extend(self.reasons.iter().cloned());
        lines
    }
}

/// Score how well `incoming` answers the receiving team's needs.
pub fn score_interest<'p>(
    needs: &TeamNeeds,
    incoming: impl IntoIterator<Item = &'p PlayerSnapshot>,
    cfg: &SearchConfig,
) -> Interest {
    let mut interest = Interest::default();

    for player in incoming {
        let filled: Vec<String> = player
            .positions()
            .filter(|p| needs.weak_positions.contains(p))
            .map(|p| p.code().to_string())
            .collect();
        if !filled.is_empty() {
            interest.add(
                2,
                format!("{} fills a weak spot at {}", display_name(player), filled.join("/")),
            );
        }

        for stat in StatCategory::ALL {
            if needs.stat_needs.contains(&stat) && player.stat(stat) > cfg.stat_need_rating {
                interest.add(
                    1,
                    format!("{} adds needed {}", display_name(player), stat.label()),
                );
            }
        }

        match needs.competitive_phase {
            CompetitivePhase::Seller if player.age() < cfg.seller_youth_age => {
                interest.add(
                    2,
                    format!(
                        "Rebuilding team values {} (age {})",
                        display_name(player),
                        player.age()
                    ),
                );
            }
            CompetitivePhase::Contender if player.overall() > cfg.contender_rating => {
                interest.add(
                    2,
                    format!(
                        "Contending team wants {} ({} overall)",
                        display_name(player),
                        player.overall()
                    ),
                );
            }
            _ => {}
        }
    }

    interest
}

/// A roster player with its precomputed value.
pub type Valued<'p> = (&'p PlayerSnapshot, u64);

/// Players a team is willing to include in a package, highest value first (ties by id).
///
/// Untouchables and `excluded` ids are removed. A non-empty `positions` restricts the pool
/// to players listing at least one of them.
pub fn tradeable_pool<'p>(
    roster: &'p [PlayerSnapshot],
    model: &ValuationModel<'_>,
    cfg: &SearchConfig,
    positions: &[Position],
    excluded: &HashSet<&str>,
) -> Vec<Valued<'p>> {
    let mut pool: Vec<Valued<'p>> = roster
        .iter()
        .filter(|p| p.overall() < cfg.untouchable_rating)
        .filter(|p| !excluded.contains(p.id.as_str()))
        .filter(|p| positions.is_empty() || positions.iter().any(|pos| p.plays(*pos)))
        .map(|p| (p, model.value(p)))
        .collect();
    pool.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));
    pool
}

#[derive(Debug, Clone, PartialEq)]
pub struct Package<'p> {
    pub players: Vec<&'p PlayerSnapshot>,
    pub value: u64,
}

/// Greedily take players from `pool` while the package is below the upper band and under the
/// size cap; accept it only if it reaches the lower band.
pub fn assemble<'p>(pool: &[Valued<'p>], reference_value: u64, cfg: &SearchConfig) -> Option<Package<'p>> {
    let ceiling = reference_value as f64 * cfg.accept_max_ratio;
    let floor = reference_value as f64 * cfg.accept_min_ratio;

    let mut players = Vec::new();
    let mut value = 0u64;
    for &(player, player_value) in pool {
        if (value as f64) >= ceiling || players.len() >= cfg.max_package_size {
            break;
        }
        players.push(player);
        value = value.saturating_add(player_value);
    }

    if players.is_empty() || (value as f64) < floor {
        return None;
    }
    Some(Package { players, value })
}

fn display_name(player: &PlayerSnapshot) -> &str {
    if player.name.is_empty() {
        player.id.as_str()
    } else {
        &player.name
    }
}
