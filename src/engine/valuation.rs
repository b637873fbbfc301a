//! Scalar trade value of a player snapshot.

use crate::config::ValuationConfig;
use crate::domain::{HealthStatus, PlayerSnapshot};

/// Pure valuation function over a player snapshot.
///
/// value = clamp(trunc(base * star * age * contract * health), 1, u64::MAX), where
/// base = (max(overall, floor) - floor)^exponent.
#[derive(Debug, Clone, Copy)]
pub struct ValuationModel<'a> {
    config: &'a ValuationConfig,
}

impl<'a> ValuationModel<'a> {
    pub fn new(config: &'a ValuationConfig) -> Self {
        Self { config }
    }

    pub fn value(&self, player: &PlayerSnapshot) -> u64 {
        let cfg = self.config;
        let overall = player.overall();

        let effective = overall.max(cfg.replacement_floor);
        let mut value = (effective - cfg.replacement_floor).powf(cfg.exponent);

        value *= self.star_multiplier(overall);
        value *= self.age_factor(player);

        if overall < cfg.bad_contract_rating && player.salary() > cfg.bad_contract_salary {
            value *= cfg.bad_contract_penalty;
        }

        value *= match player.health {
            HealthStatus::Healthy => 1.0,
            HealthStatus::DayToDay => cfg.day_to_day_penalty,
            HealthStatus::Injured => cfg.injured_penalty,
        };

        if value.is_nan() || value < 1.0 {
            return 1;
        }
        if value >= u64::MAX as f64 {
            return u64::MAX;
        }
        value.trunc() as u64
    }

    /// Sum of values, saturating.
    pub fn total<'p>(&self, players: impl IntoIterator<Item = &'p PlayerSnapshot>) -> u64 {
        players
            .into_iter()
            .fold(0u64, |acc, p| acc.saturating_add(self.value(p)))
    }

    pub fn value_all<'p>(
        &self,
        players: impl IntoIterator<Item = &'p PlayerSnapshot>,
    ) -> Vec<(&'p PlayerSnapshot, u64)> {
        players.into_iter().map(|p| (p, self.value(p))).collect()
    }

    fn star_multiplier(&self, overall: f64) -> f64 {
        if overall >= self.config.superstar_threshold {
            self.config.superstar_multiplier
        } else if overall >= self.config.star_threshold {
            self.config.star_multiplier
        } else {
            1.0
        }
    }

    /// Young upside premium or aging decline. At most one applies.
    fn age_factor(&self, player: &PlayerSnapshot) -> f64 {
        let cfg = self.config;
        let age = player.age();
        let gap = player.potential() - player.overall();

        if age <= cfg.young_age_max && gap > 0.0 {
            1.0 + gap * cfg.young_gap_bonus
        } else if age > cfg.decline_age_start {
            let years_past = f64::from(age - cfg.decline_age_start);
            (1.0 - years_past * cfg.decline_per_year).max(cfg.decline_floor)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Decimal, Position};

    fn model_value(player: &PlayerSnapshot) -> u64 {
        let config = ValuationConfig::default();
        ValuationModel::new(&config).value(player)
    }

    fn prime(overall: f64) -> PlayerSnapshot {
        PlayerSnapshot::new("p", "Player", Position::SF, overall)
            .with_age(27)
            .with_salary(Decimal::from_i64(10))
    }

    #[test]
    fn test_star_scenario_value() {
        let player = PlayerSnapshot::new("p", "Star", Position::SF, 90.0)
            .with_age(25)
            .with_potential(90.0)
            .with_salary(Decimal::from_i64(30));
        // (90 - 40)^3 = 125_000, star tier x1.15
        assert_eq!(model_value(&player), 143_750);
    }

    #[test]
    fn test_plain_value_is_cubic_above_floor() {
        assert_eq!(model_value(&prime(60.0)), 8_000);
        assert_eq!(model_value(&prime(70.0)), 27_000);
    }

    #[test]
    fn test_superstar_multiplier() {
        // (94 - 40)^3 = 157_464, x1.5
        assert_eq!(model_value(&prime(94.0)), 236_196);
    }

    #[test]
    fn test_floor_is_one() {
        assert_eq!(model_value(&prime(0.0)), 1);
        assert_eq!(model_value(&prime(40.0)), 1);
        let hurt = prime(41.0).with_health(HealthStatus::Injured);
        assert_eq!(model_value(&hurt), 1);
    }

    #[test]
    fn test_missing_rating_defaults_to_seventy() {
        let mut player = prime(99.0);
        player.overall_rating = None;
        assert_eq!(model_value(&player), 27_000);
    }

    #[test]
    fn test_monotonic_in_overall() {
        for young in [false, true] {
            let mut previous = 0;
            for rating in 0..=99 {
                let mut player = prime(f64::from(rating)).with_potential(95.0);
                if young {
                    player = player.with_age(21);
                }
                let value = model_value(&player);
                assert!(
                    value >= previous,
                    "value dropped at rating {} (young={}): {} < {}",
                    rating,
                    young,
                    value,
                    previous
                );
                previous = value;
            }
        }
    }

    #[test]
    fn test_health_ordering() {
        let healthy = model_value(&prime(80.0));
        let day_to_day = model_value(&prime(80.0).with_health(HealthStatus::DayToDay));
        let injured = model_value(&prime(80.0).with_health(HealthStatus::Injured));
        assert!(healthy > day_to_day);
        assert!(day_to_day > injured);
        assert_eq!(healthy, 64_000);
        assert_eq!(injured, 6_400);
    }

    #[test]
    fn test_young_upside_premium() {
        // gap 10 -> x1.5
        let prospect = prime(70.0).with_age(21).with_potential(80.0);
        assert_eq!(model_value(&prospect), 40_500);
        // same player at 24 gets nothing
        let older = prime(70.0).with_age(24).with_potential(80.0);
        assert_eq!(model_value(&older), 27_000);
    }

    #[test]
    fn test_aging_decline_and_floor() {
        assert_eq!(model_value(&prime(80.0).with_age(31)), 64_000);
        // 33: two years past 31 -> x0.8
        assert_eq!(model_value(&prime(80.0).with_age(33)), 51_200);
        // 45 would go negative; floored at x0.1
        assert_eq!(model_value(&prime(80.0).with_age(45)), 6_400);
    }

    #[test]
    fn test_bad_contract_penalty() {
        let cheap = prime(70.0);
        let expensive = prime(70.0).with_salary(Decimal::from_i64(25));
        assert_eq!(model_value(&cheap), 27_000);
        assert_eq!(model_value(&expensive), 18_900);
        // exactly 20 is not "over 20"
        let boundary = prime(70.0).with_salary(Decimal::from_i64(20));
        assert_eq!(model_value(&boundary), 27_000);
        // good players are paid what they are worth
        let paid_star = prime(85.0).with_salary(Decimal::from_i64(45));
        assert_eq!(model_value(&paid_star), 91_125);
    }

    #[test]
    fn test_total_sums_values() {
        let config = ValuationConfig::default();
        let model = ValuationModel::new(&config);
        let players = [prime(60.0), prime(70.0)];
        assert_eq!(model.total(&players), 35_000);
        assert_eq!(model.value_all(&players)[1].1, 27_000);
    }

    #[test]
    fn test_configurable_exponent() {
        let config = ValuationConfig {
            exponent: 2.0,
            ..ValuationConfig::default()
        };
        assert_eq!(ValuationModel::new(&config).value(&prime(60.0)), 400);
    }

    #[test]
    fn test_overflowing_upside_saturates() {
        let prospect = PlayerSnapshot::new("p", "Prospect", Position::PG, 80.0)
            .with_age(20)
            .with_potential(1e308);
        assert_eq!(model_value(&prospect), u64::MAX);
    }
}
