use crate::*;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PricingConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    debug!("Config file content length: {} bytes", content.len());

    parse_config(&content)
}

/// Substitute environment variables, parse and validate a YAML document
#[instrument(skip(content))]
pub fn parse_config(content: &str) -> Result<PricingConfig> {
    let substituted = substitution::substitute_env_vars(content)?;
    debug!("Environment variable substitution completed");

    let mut report = ValidationReport::new();
    validator::validate_env_substitution(&substituted, &mut report);

    let mut config: PricingConfig = serde_yaml::from_str(&substituted)
        .with_context(|| "Failed to parse YAML configuration")?;

    let semantic = validator::validate_config(&config);
    report.errors.extend(semantic.errors);
    report.warnings.extend(semantic.warnings);
    report.defaults_applied.extend(semantic.defaults_applied);

    for warning in &report.warnings {
        warn!(field = %warning.field, "{}", warning.message);
    }
    for applied in &report.defaults_applied {
        info!(field = %applied.field, value = %applied.value, "Default applied");
    }

    if !report.is_valid() {
        let errors: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration: {}", errors.join("; "));
    }

    if config.logging.filter.is_empty() {
        config.logging.filter = default_log_filter();
    }

    info!(
        underlyings = config.underlyings.len(),
        smile_parameters = config.smile_parameters.len(),
        "Configuration loaded successfully"
    );
    Ok(config)
}

#[instrument]
pub fn generate_default_config() -> PricingConfig {
    let mut config = PricingConfig {
        name: "Digital Slope Pricing".to_string(),
        version: "1.0.0".to_string(),
        markup: MarkupConfig::default(),
        underlyings: Default::default(),
        smile_parameters: Default::default(),
        logging: LoggingConfig::default(),
    };

    let products = [
        ("frxEURUSD", "forex", "major_pairs", 0.0001, 50.0),
        ("frxGBPUSD", "forex", "major_pairs", 0.0001, 50.0),
        ("frxXAUUSD", "commodities", "metals", 0.01, 0.5),
    ];
    for (symbol, market, submarket, pip_size, spot_spread_size) in products {
        config.underlyings.insert(
            symbol.to_string(),
            UnderlyingConfig {
                market: market.to_string(),
                submarket: submarket.to_string(),
                pip_size,
                spot_spread_size,
            },
        );
    }

    config
}

#[instrument(skip(config))]
pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(config: &PricingConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_config() {
        let config = generate_default_config();

        assert_eq!(config.name, "Digital Slope Pricing");
        assert_eq!(config.markup, MarkupConfig::default());
        assert_eq!(config.underlyings.len(), 3);
        assert!(config.smile_parameters.is_empty());
    }

    #[test]
    fn test_parse_config_with_env_default() {
        std::env::remove_var("DS_PARSER_VOL_SPREAD");
        let yaml = r#"
name: "Env"
version: "1.2.3"
markup:
  vol_spread: ${DS_PARSER_VOL_SPREAD:-0.015}
"#;

        let config = parse_config(yaml).expect("config should parse");
        assert_eq!(config.markup.vol_spread, 0.015);
    }

    #[test]
    fn test_parse_config_fills_empty_log_filter() {
        let yaml = r#"
name: "Logging"
version: "1.0.0"
logging:
  format: json
  filter: ""
"#;

        let config = parse_config(yaml).expect("config should parse");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.filter, default_log_filter());
    }

    #[test]
    fn test_parse_config_rejects_unresolved_env_var() {
        std::env::remove_var("DS_PARSER_MISSING_NAME");
        let yaml = r#"
name: "${DS_PARSER_MISSING_NAME}"
version: "1.0.0"
"#;

        let err = parse_config(yaml).unwrap_err();
        assert!(err.to_string().contains("DS_PARSER_MISSING_NAME"));
    }

    #[test]
    fn test_parse_config_rejects_invalid_values() {
        let yaml = r#"
name: "Bad"
version: "1.0.0"
markup:
  pip_size: 0
"#;

        let err = parse_config(yaml).unwrap_err();
        assert!(err.to_string().contains("pip_size"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let config = generate_default_config();
        let path = std::env::temp_dir().join(format!(
            "digital-slope-config-{}.yaml",
            std::process::id()
        ));

        save_config(&config, &path).expect("save");
        let loaded = load_config(&path).expect("load");
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config("/nonexistent/pricing.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
