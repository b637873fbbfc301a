use crate::domain::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rules: TradeRules,
}

/// Every tunable the engine reads. Passed explicitly into each call so that several
/// rule-sets (e.g. different seasons' thresholds) can coexist in one process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeRules {
    pub cap: CapRules,
    pub valuation: ValuationConfig,
    pub needs: NeedsConfig,
    pub search: SearchConfig,
}

/// League-wide salary lines, in millions. Non-decreasing.
#[derive(Debug, Clone, PartialEq)]
pub struct CapRules {
    pub cap_line: Decimal,
    pub tax_line: Decimal,
    pub first_apron_line: Decimal,
    pub second_apron_line: Decimal,
}

impl Default for CapRules {
    fn default() -> Self {
        Self {
            cap_line: Decimal::from_i64(140),
            tax_line: Decimal::from_i64(170),
            first_apron_line: Decimal::from_i64(178),
            second_apron_line: Decimal::from_i64(189),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValuationConfig {
    pub replacement_floor: f64,
    pub exponent: f64,
    pub superstar_threshold: f64,
    pub superstar_multiplier: f64,
    pub star_threshold: f64,
    pub star_multiplier: f64,
    pub young_age_max: u32,
    pub young_gap_bonus: f64,
    /// Last age with no decline; each year past it costs `decline_per_year`.
    pub decline_age_start: u32,
    pub decline_per_year: f64,
    pub decline_floor: f64,
    pub bad_contract_rating: f64,
    pub bad_contract_salary: Decimal,
    pub bad_contract_penalty: f64,
    pub injured_penalty: f64,
    pub day_to_day_penalty: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            replacement_floor: 40.0,
            exponent: 3.0,
            superstar_threshold: 94.0,
            superstar_multiplier: 1.5,
            star_threshold: 88.0,
            star_multiplier: 1.15,
            young_age_max: 23,
            young_gap_bonus: 0.05,
            decline_age_start: 31,
            decline_per_year: 0.1,
            decline_floor: 0.1,
            bad_contract_rating: 80.0,
            bad_contract_salary: Decimal::from_i64(20),
            bad_contract_penalty: 0.7,
            injured_penalty: 0.10,
            day_to_day_penalty: 0.90,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NeedsConfig {
    pub weak_rating: f64,
    pub min_depth: usize,
    pub strong_rating: f64,
    pub core_size: usize,
    pub stat_need_average: f64,
    pub star_core_size: usize,
    pub contender_star_average: f64,
    pub record_margin: i64,
}

impl Default for NeedsConfig {
    fn default() -> Self {
        Self {
            weak_rating: 75.0,
            min_depth: 2,
            strong_rating: 85.0,
            core_size: 8,
            stat_need_average: 70.0,
            star_core_size: 3,
            contender_star_average: 85.0,
            record_margin: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub accept_min_ratio: f64,
    pub accept_max_ratio: f64,
    pub max_package_size: usize,
    /// Players rated at or above this are never offered back.
    pub untouchable_rating: f64,
    pub max_offers: usize,
    pub stat_need_rating: f64,
    pub contender_rating: f64,
    pub seller_youth_age: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            accept_min_ratio: 0.8,
            accept_max_ratio: 1.1,
            max_package_size: 3,
            untouchable_rating: 90.0,
            max_offers: 5,
            stat_need_rating: 75.0,
            contender_rating: 80.0,
            seller_youth_age: 25,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = parse_or(&env_map, "PORT", 8080u16, "must be a valid u16")?;

        let defaults = CapRules::default();
        let cap = CapRules {
            cap_line: parse_decimal_or(&env_map, "CAP_LINE", defaults.cap_line)?,
            tax_line: parse_decimal_or(&env_map, "TAX_LINE", defaults.tax_line)?,
            first_apron_line: parse_decimal_or(
                &env_map,
                "FIRST_APRON_LINE",
                defaults.first_apron_line,
            )?,
            second_apron_line: parse_decimal_or(
                &env_map,
                "SECOND_APRON_LINE",
                defaults.second_apron_line,
            )?,
        };
        if !(cap.cap_line <= cap.tax_line
            && cap.tax_line <= cap.first_apron_line
            && cap.first_apron_line <= cap.second_apron_line)
        {
            return Err(ConfigError::InvalidValue(
                "CAP_LINE..SECOND_APRON_LINE".to_string(),
                "salary lines must be non-decreasing".to_string(),
            ));
        }

        let defaults = ValuationConfig::default();
        let valuation = ValuationConfig {
            replacement_floor: parse_or(
                &env_map,
                "VALUATION_REPLACEMENT_FLOOR",
                defaults.replacement_floor,
                "must be a number",
            )?,
            exponent: parse_or(
                &env_map,
                "VALUATION_EXPONENT",
                defaults.exponent,
                "must be a number",
            )?,
            superstar_threshold: parse_or(
                &env_map,
                "VALUATION_SUPERSTAR_THRESHOLD",
                defaults.superstar_threshold,
                "must be a number",
            )?,
            superstar_multiplier: parse_or(
                &env_map,
                "VALUATION_SUPERSTAR_MULTIPLIER",
                defaults.superstar_multiplier,
                "must be a number",
            )?,
            bad_contract_penalty: parse_or(
                &env_map,
                "VALUATION_BAD_CONTRACT_PENALTY",
                defaults.bad_contract_penalty,
                "must be a number",
            )?,
            injured_penalty: parse_or(
                &env_map,
                "VALUATION_INJURED_PENALTY",
                defaults.injured_penalty,
                "must be a number",
            )?,
            day_to_day_penalty: parse_or(
                &env_map,
                "VALUATION_DAY_TO_DAY_PENALTY",
                defaults.day_to_day_penalty,
                "must be a number",
            )?,
            ..defaults
        };
        check_valuation(&valuation)?;

        let defaults = SearchConfig::default();
        let search = SearchConfig {
            accept_min_ratio: parse_or(
                &env_map,
                "SEARCH_ACCEPT_MIN_RATIO",
                defaults.accept_min_ratio,
                "must be a number",
            )?,
            accept_max_ratio: parse_or(
                &env_map,
                "SEARCH_ACCEPT_MAX_RATIO",
                defaults.accept_max_ratio,
                "must be a number",
            )?,
            max_package_size: parse_or(
                &env_map,
                "SEARCH_MAX_PACKAGE_SIZE",
                defaults.max_package_size,
                "must be a valid usize",
            )?,
            untouchable_rating: parse_or(
                &env_map,
                "SEARCH_UNTOUCHABLE_RATING",
                defaults.untouchable_rating,
                "must be a number",
            )?,
            max_offers: parse_or(
                &env_map,
                "SEARCH_MAX_OFFERS",
                defaults.max_offers,
                "must be a valid usize",
            )?,
            ..defaults
        };
        if search.accept_min_ratio > search.accept_max_ratio {
            return Err(ConfigError::InvalidValue(
                "SEARCH_ACCEPT_MIN_RATIO".to_string(),
                "must not exceed SEARCH_ACCEPT_MAX_RATIO".to_string(),
            ));
        }
        if search.max_package_size == 0 {
            return Err(ConfigError::InvalidValue(
                "SEARCH_MAX_PACKAGE_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Config {
            port,
            rules: TradeRules {
                cap,
                valuation,
                needs: NeedsConfig::default(),
                search,
            },
        })
    }
}

/// Largest accepted `VALUATION_EXPONENT`. Keeps a superstar's value well inside `u64`.
const MAX_EXPONENT: f64 = 10.0;

fn check_valuation(valuation: &ValuationConfig) -> Result<(), ConfigError> {
    let exponent = valuation.exponent;
    if !exponent.is_finite() || exponent <= 0.0 || exponent > MAX_EXPONENT {
        return Err(ConfigError::InvalidValue(
            "VALUATION_EXPONENT".to_string(),
            format!("must be a number in (0, {}]", MAX_EXPONENT),
        ));
    }

    let non_negative = [
        ("VALUATION_REPLACEMENT_FLOOR", valuation.replacement_floor),
        ("VALUATION_SUPERSTAR_THRESHOLD", valuation.superstar_threshold),
        ("VALUATION_SUPERSTAR_MULTIPLIER", valuation.superstar_multiplier),
        ("VALUATION_BAD_CONTRACT_PENALTY", valuation.bad_contract_penalty),
        ("VALUATION_INJURED_PENALTY", valuation.injured_penalty),
        ("VALUATION_DAY_TO_DAY_PENALTY", valuation.day_to_day_penalty),
    ];
    for (key, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidValue(
                key.to_string(),
                "must be a finite, non-negative number".to_string(),
            ));
        }
    }
    Ok(())
}

fn parse_or<T: FromStr>(
    env_map: &HashMap<String, String>,
    key: &str,
    default: T,
    expectation: &str,
) -> Result<T, ConfigError> {
    match env_map.get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(key.to_string(), expectation.to_string())),
        None => Ok(default),
    }
}

fn parse_decimal_or(
    env_map: &HashMap<String, String>,
    key: &str,
    default: Decimal,
) -> Result<Decimal, ConfigError> {
    match env_map.get(key) {
        Some(raw) => Decimal::from_str_canonical(raw).map_err(|_| {
            ConfigError::InvalidValue(key.to_string(), "must be a decimal amount".to_string())
        }),
        None => Ok(default),
    }
}
