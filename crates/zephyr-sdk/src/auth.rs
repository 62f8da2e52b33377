use crate::error::ZephyrError;

/// Environment variable consulted for an API token.
pub const TOKEN_ENV_VAR: &str = "ZEPHYR_API_TOKEN";

/// Resolve a Zephyr Scale API token from the environment variable `ZEPHYR_API_TOKEN`.
/// Empty values are treated as unset.
pub fn token_from_env() -> Result<String, ZephyrError> {
    match std::env::var(TOKEN_ENV_VAR) {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(ZephyrError::AuthConfig(format!(
            "{} environment variable not set",
            TOKEN_ENV_VAR
        ))),
    }
}
