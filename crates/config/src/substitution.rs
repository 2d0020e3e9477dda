use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::env;
use tracing::{debug, warn};

/// `${VAR}`, `${VAR:-default}` or `$VAR`
const PLACEHOLDER_PATTERN: &str = r"\$\{(\w+)(?::-([^}]*))?\}|\$(\w+)";

fn placeholder_regex() -> Result<Regex> {
    Regex::new(PLACEHOLDER_PATTERN).context("Invalid placeholder pattern")
}

/// Substitute environment variables in the format `${VAR_NAME}`,
/// `${VAR_NAME:-default}` or `$VAR_NAME`.
///
/// Unset variables without a default keep their placeholder so the
/// validator can report them.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let re = placeholder_regex()?;
    let mut missing_vars = Vec::new();

    let result = re.replace_all(content, |caps: &Captures| {
        let placeholder = caps.get(0).map_or("", |m| m.as_str());
        let Some(var_name) = caps.get(1).or_else(|| caps.get(3)).map(|m| m.as_str()) else {
            return placeholder.to_string();
        };

        match env::var(var_name) {
            Ok(value) => {
                debug!("Substituting environment variable: {} = \"{}\"", var_name, value);
                value
            }
            Err(_) => match caps.get(2) {
                Some(default) => {
                    debug!(
                        "Environment variable '{}' not set, using inline default \"{}\"",
                        var_name,
                        default.as_str()
                    );
                    default.as_str().to_string()
                }
                None => {
                    warn!("Environment variable '{}' not set", var_name);
                    missing_vars.push(var_name.to_string());
                    placeholder.to_string()
                }
            },
        }
    });

    if !missing_vars.is_empty() {
        debug!(
            "Environment variables not set (validation will reject them): {:?}",
            missing_vars
        );
    }

    Ok(result.into_owned())
}

/// Names of placeholders still present in `content`
pub fn unresolved_env_vars(content: &str) -> Result<Vec<String>> {
    let re = placeholder_regex()?;
    Ok(re
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(3)))
        .map(|m| m.as_str().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_set_variable() {
        env::set_var("DS_TEST_PIP_SIZE", "0.001");
        let out = substitute_env_vars("pip_size: ${DS_TEST_PIP_SIZE}").unwrap();
        assert_eq!(out, "pip_size: 0.001");

        let out = substitute_env_vars("pip_size: $DS_TEST_PIP_SIZE").unwrap();
        assert_eq!(out, "pip_size: 0.001");
    }

    #[test]
    fn test_inline_default_used_when_unset() {
        env::remove_var("DS_TEST_UNSET_SPREAD");
        let out = substitute_env_vars("vol_spread: ${DS_TEST_UNSET_SPREAD:-0.02}").unwrap();
        assert_eq!(out, "vol_spread: 0.02");
    }

    #[test]
    fn test_inline_default_ignored_when_set() {
        env::set_var("DS_TEST_SET_SPREAD", "0.03");
        let out = substitute_env_vars("vol_spread: ${DS_TEST_SET_SPREAD:-0.02}").unwrap();
        assert_eq!(out, "vol_spread: 0.03");
    }

    #[test]
    fn test_missing_variable_keeps_placeholder() {
        env::remove_var("DS_TEST_MISSING");
        let out = substitute_env_vars("name: ${DS_TEST_MISSING}").unwrap();
        assert_eq!(out, "name: ${DS_TEST_MISSING}");

        let unresolved = unresolved_env_vars(&out).unwrap();
        assert_eq!(unresolved, vec!["DS_TEST_MISSING".to_string()]);
    }

    #[test]
    fn test_no_placeholders() {
        assert!(unresolved_env_vars("pip_size: 0.0001").unwrap().is_empty());
    }
}
