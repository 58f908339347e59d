//! Environment readers shared by the config sections.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Value of `name`, or `default` when unset or blank.
pub(crate) fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parsed value of `name`, or `default` when unset or blank. A value that does not parse is an error.
pub(crate) fn env_parse<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name).ok().filter(|s| !s.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("{} has an invalid value: {:?}", name, raw)),
        None => Ok(default),
    }
}

/// Comma-separated administrator ids; blanks are skipped.
pub fn parse_admin_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("invalid administrator id: {:?}", s))
        })
        .collect()
}
