use crate::*;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Config name is required")]
    MissingName,

    #[error("Invalid version format: {0}. Must be in format X.Y.Z (e.g., 1.0.0)")]
    InvalidVersionFormat(String),

    #[error("Markup: {field} {message}")]
    InvalidMarkup { field: String, message: String },

    #[error("Underlying {symbol}: {message}")]
    InvalidUnderlying { symbol: String, message: String },

    #[error("Smile parameters {symbol}: {message}")]
    InvalidSmileParameters { symbol: String, message: String },

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("Environment variable '{var}' is missing or invalid: {message}")]
    InvalidEnvVar { var: String, message: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DefaultApplied {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub defaults_applied: Vec<DefaultApplied>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            defaults_applied: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_default(&mut self, field: &str, value: &str) {
        self.defaults_applied.push(DefaultApplied {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

const VALID_LOG_FORMATS: &[&str] = &["pretty", "json", "compact"];

pub fn validate_config(config: &PricingConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_header(config, &mut report);
    validate_markup(&config.markup, &mut report);
    validate_underlyings(config, &mut report);
    validate_smile_parameters(config, &mut report);
    validate_logging(&config.logging, &mut report);

    report
}

/// Reject placeholders left behind by [`substitute_env_vars`]
pub fn validate_env_substitution(content: &str, report: &mut ValidationReport) {
    match unresolved_env_vars(content) {
        Ok(vars) => {
            for var in vars {
                report.add_error(ValidationError::InvalidEnvVar {
                    var,
                    message: "variable is not set and has no inline default".to_string(),
                });
            }
        }
        Err(e) => report.add_warning("environment", &format!("could not scan placeholders: {e}")),
    }
}

fn validate_header(config: &PricingConfig, report: &mut ValidationReport) {
    if config.name.is_empty() {
        report.add_error(ValidationError::MissingName);
    }

    match Regex::new(r"^\d+\.\d+\.\d+$") {
        Ok(version_regex) => {
            if !version_regex.is_match(&config.version) {
                report.add_error(ValidationError::InvalidVersionFormat(config.version.clone()));
            }
        }
        Err(e) => report.add_warning("version", &format!("version check skipped: {e}")),
    }
}

fn validate_markup(markup: &MarkupConfig, report: &mut ValidationReport) {
    if markup.pip_size <= 0.0 {
        report.add_error(ValidationError::InvalidMarkup {
            field: "pip_size".to_string(),
            message: format!("must be positive, got: {}", markup.pip_size),
        });
    }

    let non_negative = [
        ("spot_spread_size", markup.spot_spread_size),
        ("vol_spread", markup.vol_spread),
    ];
    for (field, value) in non_negative {
        if value < 0.0 {
            report.add_error(ValidationError::InvalidMarkup {
                field: field.to_string(),
                message: format!("must not be negative, got: {}", value),
            });
        }
    }

    let amounts = [
        ("equal_tie_amount", markup.equal_tie_amount),
        ("model_arbitrage_amount", markup.model_arbitrage_amount),
        ("smile_uncertainty_amount", markup.smile_uncertainty_amount),
    ];
    for (field, value) in amounts {
        if !(0.0..=1.0).contains(&value) {
            report.add_error(ValidationError::InvalidMarkup {
                field: field.to_string(),
                message: format!("must be a probability amount in [0, 1], got: {}", value),
            });
        }
    }

    if let Some(hour_end) = &markup.hour_end {
        if hour_end.high_low.high < hour_end.high_low.low {
            report.add_error(ValidationError::InvalidMarkup {
                field: "hour_end.high_low".to_string(),
                message: format!(
                    "high {} is below low {}",
                    hour_end.high_low.high, hour_end.high_low.low
                ),
            });
        }
        report.add_warning(
            "markup.hour_end",
            "The default hour-end rule contributes 0; install a custom rule to price it",
        );
    }
}

fn validate_underlyings(config: &PricingConfig, report: &mut ValidationReport) {
    if config.underlyings.is_empty() {
        report.add_warning(
            "underlyings",
            "No underlyings configured, every symbol uses the frx prefix rule",
        );
        return;
    }

    for (symbol, underlying) in &config.underlyings {
        if underlying.market.is_empty() {
            report.add_error(ValidationError::InvalidUnderlying {
                symbol: symbol.clone(),
                message: "market is required".to_string(),
            });
        }

        if underlying.pip_size <= 0.0 {
            report.add_error(ValidationError::InvalidUnderlying {
                symbol: symbol.clone(),
                message: format!("pip_size must be positive, got: {}", underlying.pip_size),
            });
        }

        if underlying.spot_spread_size < 0.0 {
            report.add_error(ValidationError::InvalidUnderlying {
                symbol: symbol.clone(),
                message: format!(
                    "spot_spread_size must not be negative, got: {}",
                    underlying.spot_spread_size
                ),
            });
        }
    }
}

fn validate_smile_parameters(config: &PricingConfig, report: &mut ValidationReport) {
    for (symbol, params) in &config.smile_parameters {
        if params.smile_wings <= 0.0 || params.smile_body <= 0.0 {
            report.add_error(ValidationError::InvalidSmileParameters {
                symbol: symbol.clone(),
                message: "smile multipliers must be positive".to_string(),
            });
        }

        if params.smile_wings < params.smile_body {
            report.add_warning(
                &format!("smile_parameters.{}", symbol),
                "wings below body produce an inverted smile",
            );
        }
    }
}

fn validate_logging(logging: &LoggingConfig, report: &mut ValidationReport) {
    if !VALID_LOG_FORMATS.contains(&logging.format.to_lowercase().as_str()) {
        report.add_error(ValidationError::InvalidLogFormat(logging.format.clone()));
    }

    if logging.filter.is_empty() {
        report.add_default("logging.filter", &default_log_filter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_config_is_valid() {
        let config = generate_default_config();
        let report = validate_config(&config);

        assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
    }

    #[test]
    fn test_invalid_version_and_name() {
        let mut config = generate_default_config();
        config.name = String::new();
        config.version = "1.0".to_string();

        let report = validate_config(&config);

        assert!(!report.is_valid());
        assert!(report.errors.contains(&ValidationError::MissingName));
        assert!(report
            .errors
            .contains(&ValidationError::InvalidVersionFormat("1.0".to_string())));
    }

    #[test]
    fn test_invalid_markup_values() {
        let mut config = generate_default_config();
        config.markup.pip_size = 0.0;
        config.markup.vol_spread = -0.01;
        config.markup.model_arbitrage_amount = 1.5;

        let report = validate_config(&config);

        assert_eq!(report.errors.len(), 3);
        assert_matches!(
            &report.errors[0],
            ValidationError::InvalidMarkup { field, .. } if field == "pip_size"
        );
    }

    #[test]
    fn test_invalid_underlying() {
        let mut config = generate_default_config();
        config.underlyings.insert(
            "frxBAD".to_string(),
            UnderlyingConfig {
                market: String::new(),
                submarket: String::new(),
                pip_size: -1.0,
                spot_spread_size: 50.0,
            },
        );

        let report = validate_config(&config);

        let underlying_errors = report
            .errors
            .iter()
            .filter(|e| matches!(e, ValidationError::InvalidUnderlying { symbol, .. } if symbol == "frxBAD"))
            .count();
        assert_eq!(underlying_errors, 2);
    }

    #[test]
    fn test_hour_end_warning_and_bounds() {
        let mut config = generate_default_config();
        config.markup.hour_end = Some(HourEndConfig {
            current_spot: 1.1,
            high_low: HighLow { high: 1.0, low: 1.2 },
            ..Default::default()
        });

        let report = validate_config(&config);

        assert!(report.warnings.iter().any(|w| w.field == "markup.hour_end"));
        assert_matches!(
            &report.errors[..],
            [ValidationError::InvalidMarkup { field, .. }] if field == "hour_end.high_low"
        );
    }

    #[test]
    fn test_invalid_log_format_and_default_filter() {
        let mut config = generate_default_config();
        config.logging.format = "xml".to_string();
        config.logging.filter = String::new();

        let report = validate_config(&config);

        assert!(report
            .errors
            .contains(&ValidationError::InvalidLogFormat("xml".to_string())));
        assert_eq!(report.defaults_applied.len(), 1);
        assert_eq!(report.defaults_applied[0].value, "info");
    }

    #[test]
    fn test_unresolved_env_var_reported() {
        let mut report = ValidationReport::new();
        validate_env_substitution("pip_size: ${DS_NEVER_SET_VAR}", &mut report);

        assert_matches!(
            &report.errors[..],
            [ValidationError::InvalidEnvVar { var, .. }] if var == "DS_NEVER_SET_VAR"
        );
    }
}
