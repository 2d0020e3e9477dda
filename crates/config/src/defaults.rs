// Markup defaults
pub fn default_spot_spread_size() -> f64 {
    50.0
}

pub fn default_pip_size() -> f64 {
    0.0001
}

pub fn default_vol_spread() -> f64 {
    0.01
}

pub fn default_equal_tie_amount() -> f64 {
    0.01
}

pub fn default_model_arbitrage_amount() -> f64 {
    0.05
}

pub fn default_smile_uncertainty_amount() -> f64 {
    0.05
}

// Underlying defaults
pub fn default_forex_pip_size() -> f64 {
    0.0001
}

pub fn default_indices_pip_size() -> f64 {
    0.01
}

pub fn default_forex_market() -> String {
    "forex".to_string()
}

pub fn default_indices_market() -> String {
    "indices".to_string()
}

pub fn default_forex_prefix() -> String {
    "frx".to_string()
}

// Smile parameter defaults (EURUSD-like)
pub fn default_smile_wings() -> f64 {
    1.06
}

pub fn default_smile_body() -> f64 {
    1.02
}

pub fn default_rr_25() -> f64 {
    -0.002
}

pub fn default_rr_10() -> f64 {
    -0.004
}

pub fn default_bf_25() -> f64 {
    0.0015
}

pub fn default_bf_10() -> f64 {
    0.0025
}

pub fn default_term_slope() -> f64 {
    0.1
}

pub fn default_rr_term() -> f64 {
    0.1
}

pub fn default_bf_term() -> f64 {
    0.05
}

// Logging defaults
pub fn default_log_format() -> String {
    "pretty".to_string()
}

pub fn default_log_filter() -> String {
    "info".to_string()
}
