//! Player snapshot as supplied by the caller.
//!
//! Every numeric field is optional on the wire. Accessors apply the documented defaults so
//! partial records never fail valuation or needs analysis.

use crate::domain::{Decimal, HealthStatus, PlayerId, Position, StatCategory};
use serde::{Deserialize, Serialize};

/// Overall rating assumed when a record carries none.
pub const DEFAULT_OVERALL_RATING: f64 = 70.0;
/// Sub-rating assumed when a record carries none.
pub const DEFAULT_SUB_RATING: f64 = 50.0;
/// Age assumed when a record carries none. Sits outside both the youth and decline windows.
pub const DEFAULT_AGE: u32 = 27;

/// Immutable view of one player. The engine never mutates a snapshot it receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    /// Primary position.
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_positions: Vec<Position>,
    /// Annual cap hit in millions.
    #[serde(default)]
    pub salary: Option<Decimal>,
    #[serde(default)]
    pub contract_years_remaining: Option<u32>,
    #[serde(default)]
    pub overall_rating: Option<f64>,
    #[serde(default)]
    pub potential_rating: Option<f64>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub health: HealthStatus,
    #[serde(default)]
    pub defense: Option<f64>,
    #[serde(default)]
    pub rebounding: Option<f64>,
    #[serde(default)]
    pub outside_scoring: Option<f64>,
    #[serde(default)]
    pub playmaking: Option<f64>,
}

impl PlayerSnapshot {
    /// Create a healthy player with only identity, position and overall rating set.
    pub fn new(id: &str, name: &str, position: Position, overall_rating: f64) -> Self {
        PlayerSnapshot {
            id: PlayerId::new(id),
            name: name.to_string(),
            position: Some(position),
            secondary_positions: Vec::new(),
            salary: None,
            contract_years_remaining: None,
            overall_rating: Some(overall_rating),
            potential_rating: None,
            age: None,
            health: HealthStatus::Healthy,
            defense: None,
            rebounding: None,
            outside_scoring: None,
            playmaking: None,
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_potential(mut self, potential: f64) -> Self {
        self.potential_rating = Some(potential);
        self
    }

    pub fn with_salary(mut self, salary: Decimal) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn with_health(mut self, health: HealthStatus) -> Self {
        self.health = health;
        self
    }

    pub fn with_stat(mut self, stat: StatCategory, rating: f64) -> Self {
        match stat {
            StatCategory::Defense => self.defense = Some(rating),
            StatCategory::Rebounding => self.rebounding = Some(rating),
            StatCategory::OutsideScoring => self.outside_scoring = Some(rating),
        }
        self
    }

    pub fn with_secondary(mut self, position: Position) -> Self {
        self.secondary_positions.push(position);
        self
    }

    pub fn overall(&self) -> f64 {
        self.overall_rating.unwrap_or(DEFAULT_OVERALL_RATING)
    }

    /// Potential defaults to the overall rating, i.e. no projected upside.
    pub fn potential(&self) -> f64 {
        self.potential_rating.unwrap_or_else(|| self.overall())
    }

    pub fn age(&self) -> u32 {
        self.age.unwrap_or(DEFAULT_AGE)
    }

    pub fn salary(&self) -> Decimal {
        self.salary.unwrap_or_default()
    }

    pub fn stat(&self, stat: StatCategory) -> f64 {
        let value = match stat {
            StatCategory::Defense => self.defense,
            StatCategory::Rebounding => self.rebounding,
            StatCategory::OutsideScoring => self.outside_scoring,
        };
        value.unwrap_or(DEFAULT_SUB_RATING)
    }

    /// Whether the player lists `position`, as primary or secondary.
    pub fn plays(&self, position: Position) -> bool {
        self.position == Some(position) || self.secondary_positions.contains(&position)
    }

    /// Every position the player lists, primary first.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.position
            .into_iter()
            .chain(self.secondary_positions.iter().copied())
    }
}

/// Sum of cap hits.
pub fn total_salary<'a>(players: impl IntoIterator<Item = &'a PlayerSnapshot>) -> Decimal {
    players.into_iter().map(|p| p.salary()).sum()
}
