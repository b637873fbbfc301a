//! Team snapshot: roster plus win/loss record.

use crate::domain::player::total_salary;
use crate::domain::{Decimal, PlayerSnapshot, TeamId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSnapshot {
    pub id: TeamId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub roster: Vec<PlayerSnapshot>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

impl TeamSnapshot {
    pub fn new(id: &str, name: &str, roster: Vec<PlayerSnapshot>) -> Self {
        TeamSnapshot {
            id: TeamId::new(id),
            name: name.to_string(),
            roster,
            wins: 0,
            losses: 0,
        }
    }

    pub fn with_record(mut self, wins: u32, losses: u32) -> Self {
        self.wins = wins;
        self.losses = losses;
        self
    }

    /// Current total salary of the roster.
    pub fn payroll(&self) -> Decimal {
        total_salary(&self.roster)
    }

    /// Signed win margin: wins minus losses.
    pub fn win_margin(&self) -> i64 {
        i64::from(self.wins) - i64::from(self.losses)
    }
}
