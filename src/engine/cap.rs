//! Salary-matching compliance by cap tier.
//!
//! Tiers are decided by the acting team's current payroll alone. Only the rule of that team's
//! own tier applies; tiers are not cumulative.

use crate::config::CapRules;
use crate::domain::{total_salary, Decimal, PlayerSnapshot};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Payroll tier, in ascending severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CapTier {
    Healthy,
    Taxpayer,
    FirstApron,
    SecondApron,
}

impl CapTier {
    /// The tax line is exclusive (payroll exactly at it is Healthy, matching
    /// `TeamNeeds::is_taxpayer`); both apron lines are inclusive.
    pub fn for_payroll(payroll: Decimal, rules: &CapRules) -> Self {
        if payroll >= rules.second_apron_line {
            CapTier::SecondApron
        } else if payroll >= rules.first_apron_line {
            CapTier::FirstApron
        } else if payroll > rules.tax_line {
            CapTier::Taxpayer
        } else {
            CapTier::Healthy
        }
    }
}

impl fmt::Display for CapTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CapTier::Healthy => "Healthy",
            CapTier::Taxpayer => "Taxpayer",
            CapTier::FirstApron => "First apron",
            CapTier::SecondApron => "Second apron",
        })
    }
}

/// Why a trade was blocked. The Display text is surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapViolation {
    #[error("Second apron teams cannot aggregate salaries: salary aggregation is prohibited at this tier.")]
    AggregationBan,
    #[error("{tier} teams must match salaries 100%: incoming salary ({incoming}M) may not exceed outgoing salary ({outgoing}M) at this tier.")]
    ExceedsOutgoing {
        tier: CapTier,
        incoming: Decimal,
        outgoing: Decimal,
    },
    #[error("Taxpayer teams must match salaries within 110%: incoming salary ({incoming}M) may not exceed 110% of outgoing salary (limit {limit}M).")]
    ExceedsTaxpayerMatch { incoming: Decimal, limit: Decimal },
    #[error("Incoming salary ({incoming}M) may not exceed 125% of outgoing salary plus 0.25M (limit {limit}M).")]
    ExceedsHealthyMatch { incoming: Decimal, limit: Decimal },
}

/// Result of a compliance check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeVerdict {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub cap_tier: CapTier,
}

pub struct CapComplianceValidator<'a> {
    rules: &'a CapRules,
}

impl<'a> CapComplianceValidator<'a> {
    pub fn new(rules: &'a CapRules) -> Self {
        Self { rules }
    }

    pub fn validate(
        &self,
        outgoing: &[PlayerSnapshot],
        incoming: &[PlayerSnapshot],
        acting_team_salary: Decimal,
    ) -> TradeVerdict {
        let cap_tier = CapTier::for_payroll(acting_team_salary, self.rules);
        match Self::check(cap_tier, outgoing, incoming) {
            Ok(()) => TradeVerdict {
                valid: true,
                reason: None,
                cap_tier,
            },
            Err(violation) => {
                tracing::debug!(tier = ?cap_tier, %violation, "trade blocked by salary matching");
                TradeVerdict {
                    valid: false,
                    reason: Some(violation.to_string()),
                    cap_tier,
                }
            }
        }
    }

    /// Apply the matching rule of `tier`.
    pub fn check(
        tier: CapTier,
        outgoing: &[PlayerSnapshot],
        incoming: &[PlayerSnapshot],
    ) -> Result<(), CapViolation> {
        let out_val = total_salary(outgoing);
        let in_val = total_salary(incoming);

        match tier {
            CapTier::SecondApron => {
                if outgoing.len() > 1 && incoming.len() == 1 {
                    return Err(CapViolation::AggregationBan);
                }
                if in_val > out_val {
                    return Err(CapViolation::ExceedsOutgoing {
                        tier,
                        incoming: in_val,
                        outgoing: out_val,
                    });
                }
            }
            CapTier::FirstApron => {
                if in_val > out_val {
                    return Err(CapViolation::ExceedsOutgoing {
                        tier,
                        incoming: in_val,
                        outgoing: out_val,
                    });
                }
            }
            CapTier::Taxpayer => {
                let limit = out_val * Decimal::scaled(110, 2);
                if in_val > limit {
                    return Err(CapViolation::ExceedsTaxpayerMatch {
                        incoming: in_val,
                        limit,
                    });
                }
            }
            CapTier::Healthy => {
                let limit = out_val * Decimal::scaled(125, 2) + Decimal::scaled(25, 2);
                if in_val > limit {
                    return Err(CapViolation::ExceedsHealthyMatch {
                        incoming: in_val,
                        limit,
                    });
                }
            }
        }
        Ok(())
    }
}
