//! Candidate trade package produced by the offer engines.

use crate::domain::{PlayerSnapshot, TeamId};
use serde::{Deserialize, Serialize};

/// A package one team proposes in exchange for a reference set of players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOffer {
    /// Stable fingerprint of proposing team + offered player ids.
    pub offer_key: String,
    pub proposing_team_id: TeamId,
    pub proposing_team_name: String,
    /// Offered players, highest value first. Never empty.
    pub players: Vec<PlayerSnapshot>,
    pub package_value: u64,
    pub reference_value: u64,
    /// `package_value - reference_value`.
    pub diff_value: i64,
    pub interest_score: u32,
    pub rationale: Vec<String>,
}

impl TradeOffer {
    pub fn new(
        proposing_team_id: TeamId,
        proposing_team_name: String,
        players: Vec<PlayerSnapshot>,
        package_value: u64,
        reference_value: u64,
        interest_score: u32,
        rationale: Vec<String>,
    ) -> Self {
        let offer_key = Self::compute_offer_key(&proposing_team_id, &players);
        TradeOffer {
            offer_key,
            proposing_team_id,
            proposing_team_name,
            players,
            package_value,
            reference_value,
            diff_value: signed_diff(package_value, reference_value),
            interest_score,
            rationale,
        }
    }

    /// Generate a stable key for a package.
    ///
    /// Depends only on the team id and the ordered player ids, so the same search over the
    /// same snapshot always yields the same keys.
    pub fn compute_offer_key(team_id: &TeamId, players: &[PlayerSnapshot]) -> String {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(team_id.as_str());
        for player in players {
            hasher.update(b"|");
            hasher.update(player.id.as_str());
        }
        let hash = hasher.finalize();
        format!("offer:{}", hex::encode(&hash[..16]))
    }

    pub fn player_ids(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.id.as_str()).collect()
    }
}

/// `package - reference`, clamped into `i64`.
fn signed_diff(package_value: u64, reference_value: u64) -> i64 {
    let diff = i128::from(package_value) - i128::from(reference_value);
    diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
