use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use crate::matching::policy::MatchPolicy;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    /// Match cache is disabled when unset.
    pub redis_url: Option<String>,
    pub match_cache_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
    pub match_policy: MatchPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            database_url: lookup("DATABASE_URL").with_context(|| {
                "Required environment variable 'DATABASE_URL' is not set".to_string()
            })?,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            redis_url: lookup("REDIS_URL").filter(|url| !url.trim().is_empty()),
            match_cache_ttl_secs: cache_ttl_from_lookup(&lookup)?,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            match_policy: policy_from_lookup(&lookup)?,
        })
    }
}

fn cache_ttl_from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<u64> {
    let ttl: u64 = parse_or(lookup, "MATCH_CACHE_TTL_SECS", 300)?;
    if ttl == 0 {
        bail!("MATCH_CACHE_TTL_SECS must be at least 1 second");
    }
    Ok(ttl)
}

fn policy_from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<MatchPolicy> {
    let defaults = MatchPolicy::default();
    let mut policy = MatchPolicy {
        relevance_threshold: parse_or(
            lookup,
            "MATCH_RELEVANCE_THRESHOLD",
            defaults.relevance_threshold,
        )?,
        result_cap: parse_or(lookup, "MATCH_RESULT_CAP", defaults.result_cap)?,
        relocation_credit: parse_or(lookup, "MATCH_RELOCATION_CREDIT", defaults.relocation_credit)?,
        experience_falloff_years: parse_or(
            lookup,
            "MATCH_EXPERIENCE_FALLOFF_YEARS",
            defaults.experience_falloff_years,
        )?,
        weights: defaults.weights,
    };
    policy.weights.skills = parse_or(lookup, "MATCH_WEIGHT_SKILLS", policy.weights.skills)?;
    policy.weights.experience =
        parse_or(lookup, "MATCH_WEIGHT_EXPERIENCE", policy.weights.experience)?;
    policy.weights.location = parse_or(lookup, "MATCH_WEIGHT_LOCATION", policy.weights.location)?;
    policy.weights.job_type = parse_or(lookup, "MATCH_WEIGHT_JOB_TYPE", policy.weights.job_type)?;

    policy
        .validate()
        .map_err(|msg| anyhow!("Invalid match policy: {msg}"))?;
    Ok(policy)
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
