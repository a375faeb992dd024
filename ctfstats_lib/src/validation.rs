//! Validation of user-provided input.

use crate::error::CtfStatsError;

pub const MAX_TEAM_ID_LENGTH: usize = 64;

/// Validate a team identifier: trim, enforce length, and allow only
/// `[A-Za-z0-9_-]`. The id becomes both a URL path segment and the output
/// file name, so separators and dots are refused.
pub fn validate_team_id(input: &str) -> Result<String, CtfStatsError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CtfStatsError::InvalidInput("team id is empty".to_string()));
    }
    if trimmed.len() > MAX_TEAM_ID_LENGTH {
        return Err(CtfStatsError::InvalidInput(format!(
            "team id exceeds maximum length of {} bytes",
            MAX_TEAM_ID_LENGTH
        )));
    }
    if let Some(bad) = trimmed
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(CtfStatsError::InvalidInput(format!(
            "team id '{}' contains invalid character {:?}",
            input, bad
        )));
    }
    Ok(trimmed.to_string())
}
