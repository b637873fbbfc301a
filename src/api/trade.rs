//! Action dispatcher for the trade engine: `POST /v1/trade` with `{ action, payload }`.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::AppState;
use crate::config::TradeRules;
use crate::domain::{Decimal, PlayerId, PlayerSnapshot, Position, TeamId, TeamSnapshot, TradeOffer};
use crate::engine::{
    CapComplianceValidator, CounterOfferGenerator, NeedsAnalyzer, OfferSearchEngine, TeamNeeds,
    ValuationModel,
};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    GenerateOffers,
    GenerateCounterOffers,
    ValidateTrade,
    ValuePlayers,
    AnalyzeTeam,
    SimulateCpuTrades,
}

impl FromStr for TradeAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generate-offers" => Ok(TradeAction::GenerateOffers),
            "generate-counter-offers" => Ok(TradeAction::GenerateCounterOffers),
            "validate-trade" => Ok(TradeAction::ValidateTrade),
            "value-players" => Ok(TradeAction::ValuePlayers),
            "analyze-team" => Ok(TradeAction::AnalyzeTeam),
            "simulate-cpu-trades" => Ok(TradeAction::SimulateCpuTrades),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TradeRequest {
    pub action: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOffersPayload {
    pub my_team_id: TeamId,
    #[serde(default)]
    pub league_state: Vec<TeamSnapshot>,
    #[serde(default)]
    pub trading_players: Vec<PlayerSnapshot>,
    #[serde(default)]
    pub desired_positions: Vec<Position>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterOffersPayload {
    #[serde(default)]
    pub target_players: Vec<PlayerSnapshot>,
    pub target_team: TeamSnapshot,
    pub my_team: TeamSnapshot,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTradePayload {
    #[serde(default)]
    pub outgoing: Vec<PlayerSnapshot>,
    #[serde(default)]
    pub incoming: Vec<PlayerSnapshot>,
    pub acting_team_total_salary: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePlayersPayload {
    #[serde(default)]
    pub players: Vec<PlayerSnapshot>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeTeamPayload {
    pub team: TeamSnapshot,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffersResponse {
    pub offers: Vec<TradeOffer>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerValuation {
    pub player_id: PlayerId,
    pub value: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationsResponse {
    pub valuations: Vec<PlayerValuation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeedsResponse {
    pub needs: TeamNeeds,
}

pub async fn post_trade(
    State(state): State<AppState>,
    Json(request): Json<TradeRequest>,
) -> Result<Response, AppError> {
    let action = TradeAction::from_str(&request.action).map_err(|_| {
        AppError::BadRequest(format!(
            "Unknown action '{}': expected one of generate-offers, generate-counter-offers, \
             validate-trade, value-players, analyze-team",
            request.action
        ))
    })?;

    tracing::info!(action = %request.action, "trade request");

    // League scans are CPU-bound; keep them off the async workers.
    let rules = state.rules.clone();
    let payload = request.payload;
    tokio::task::spawn_blocking(move || dispatch(&rules, action, payload)).await?
}

/// Run one action against `rules`. Pure apart from logging.
pub fn dispatch(
    rules: &TradeRules,
    action: TradeAction,
    payload: serde_json::Value,
) -> Result<Response, AppError> {
    match action {
        TradeAction::GenerateOffers => {
            let p: GenerateOffersPayload = serde_json::from_value(payload)?;
            let offers = OfferSearchEngine::new(rules).search(
                &p.trading_players,
                &p.my_team_id,
                &p.league_state,
                &p.desired_positions,
            );
            tracing::info!(
                team = %p.my_team_id,
                teams = p.league_state.len(),
                offers = offers.len(),
                "generated offers"
            );
            Ok(Json(OffersResponse { offers }).into_response())
        }
        TradeAction::GenerateCounterOffers => {
            let p: CounterOffersPayload = serde_json::from_value(payload)?;
            let offers =
                CounterOfferGenerator::new(rules).search(&p.target_players, &p.target_team, &p.my_team);
            tracing::info!(
                owner = %p.target_team.id,
                requester = %p.my_team.id,
                offers = offers.len(),
                "generated counter offers"
            );
            Ok(Json(OffersResponse { offers }).into_response())
        }
        TradeAction::ValidateTrade => {
            let p: ValidateTradePayload = serde_json::from_value(payload)?;
            let verdict = CapComplianceValidator::new(&rules.cap).validate(
                &p.outgoing,
                &p.incoming,
                p.acting_team_total_salary,
            );
            tracing::info!(valid = verdict.valid, tier = %verdict.cap_tier, "validated trade");
            Ok(Json(verdict).into_response())
        }
        TradeAction::ValuePlayers => {
            let p: ValuePlayersPayload = serde_json::from_value(payload)?;
            let model = ValuationModel::new(&rules.valuation);
            let valuations = model
                .value_all(&p.players)
                .into_iter()
                .map(|(player, value)| PlayerValuation {
                    player_id: player.id.clone(),
                    value,
                })
                .collect();
            Ok(Json(ValuationsResponse { valuations }).into_response())
        }
        TradeAction::AnalyzeTeam => {
            let p: AnalyzeTeamPayload = serde_json::from_value(payload)?;
            let needs = NeedsAnalyzer::new(&rules.needs, &rules.cap).analyze(&p.team);
            Ok(Json(NeedsResponse { needs }).into_response())
        }
        TradeAction::SimulateCpuTrades => Err(AppError::NotImplemented(
            "simulate-cpu-trades is driven by season orchestration, not the trade engine"
                .to_string(),
        )),
    }
}
