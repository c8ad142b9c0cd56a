use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::commerce::checkout::{CheckoutSettings, DEFAULT_SESSION_TTL_MINUTES};
use crate::commerce::pricing::{PricingPolicy, DEFAULT_BUNDLE_DISCOUNT_PERCENT, DEFAULT_CURRENCY};
use crate::quiz::QuizVariant;

pub const CONFIG_FILE_CANDIDATES: &[&str] = &["glowcart.toml", "config/glowcart.toml"];

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub quiz: QuizConfig,
    pub cart: CartConfig,
    pub checkout: CheckoutConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct QuizConfig {
    pub default_variant: QuizVariant,
}

#[derive(Clone, Debug)]
pub struct CartConfig {
    pub bundle_discount_percent: u8,
}

#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
    pub session_ttl_minutes: u32,
    pub secret_key: Option<SecretString>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub quiz_variant: Option<QuizVariant>,
    pub bundle_discount_percent: Option<u8>,
    pub currency: Option<String>,
    pub checkout_secret_key: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            quiz: QuizConfig { default_variant: QuizVariant::Skincare },
            cart: CartConfig { bundle_discount_percent: DEFAULT_BUNDLE_DISCOUNT_PERCENT },
            checkout: CheckoutConfig {
                currency: DEFAULT_CURRENCY.to_string(),
                success_url: "http://localhost:3000/checkout/success".to_string(),
                cancel_url: "http://localhost:3000/cart".to_string(),
                session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
                secret_key: None,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_CANDIDATES[0]));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn pricing_policy(&self) -> PricingPolicy {
        PricingPolicy::new(
            self.checkout.currency.trim().to_ascii_lowercase(),
            self.cart.bundle_discount_percent,
        )
    }

    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            success_url: self.checkout.success_url.clone(),
            cancel_url: self.checkout.cancel_url.clone(),
            session_ttl_minutes: self.checkout.session_ttl_minutes,
        }
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(quiz) = patch.quiz {
            if let Some(default_variant) = quiz.default_variant {
                self.quiz.default_variant = default_variant;
            }
        }

        if let Some(cart) = patch.cart {
            if let Some(bundle_discount_percent) = cart.bundle_discount_percent {
                self.cart.bundle_discount_percent = bundle_discount_percent;
            }
        }

        if let Some(checkout) = patch.checkout {
            if let Some(currency) = checkout.currency {
                self.checkout.currency = currency;
            }
            if let Some(success_url) = checkout.success_url {
                self.checkout.success_url = success_url;
            }
            if let Some(cancel_url) = checkout.cancel_url {
                self.checkout.cancel_url = cancel_url;
            }
            if let Some(session_ttl_minutes) = checkout.session_ttl_minutes {
                self.checkout.session_ttl_minutes = session_ttl_minutes;
            }
            if let Some(checkout_secret_key_value) = checkout.secret_key {
                self.checkout.secret_key = Some(secret_value(checkout_secret_key_value));
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("GLOWCART_QUIZ_DEFAULT_VARIANT") {
            self.quiz.default_variant = value.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                key: "GLOWCART_QUIZ_DEFAULT_VARIANT".to_string(),
                value: value.clone(),
            })?;
        }

        if let Some(value) = read_env("GLOWCART_CART_BUNDLE_DISCOUNT_PERCENT") {
            self.cart.bundle_discount_percent =
                parse_u8("GLOWCART_CART_BUNDLE_DISCOUNT_PERCENT", &value)?;
        }

        if let Some(value) = read_env("GLOWCART_CHECKOUT_CURRENCY") {
            self.checkout.currency = value;
        }
        if let Some(value) = read_env("GLOWCART_CHECKOUT_SUCCESS_URL") {
            self.checkout.success_url = value;
        }
        if let Some(value) = read_env("GLOWCART_CHECKOUT_CANCEL_URL") {
            self.checkout.cancel_url = value;
        }
        if let Some(value) = read_env("GLOWCART_CHECKOUT_SESSION_TTL_MINUTES") {
            self.checkout.session_ttl_minutes =
                parse_u32("GLOWCART_CHECKOUT_SESSION_TTL_MINUTES", &value)?;
        }
        if let Some(value) = read_env("GLOWCART_CHECKOUT_SECRET_KEY") {
            self.checkout.secret_key = Some(secret_value(value));
        }

        let log_level =
            read_env("GLOWCART_LOGGING_LEVEL").or_else(|| read_env("GLOWCART_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("GLOWCART_LOGGING_FORMAT").or_else(|| read_env("GLOWCART_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(quiz_variant) = overrides.quiz_variant {
            self.quiz.default_variant = quiz_variant;
        }
        if let Some(bundle_discount_percent) = overrides.bundle_discount_percent {
            self.cart.bundle_discount_percent = bundle_discount_percent;
        }
        if let Some(currency) = overrides.currency {
            self.checkout.currency = currency;
        }
        if let Some(checkout_secret_key) = overrides.checkout_secret_key {
            self.checkout.secret_key = Some(secret_value(checkout_secret_key));
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_cart(&self.cart)?;
        validate_checkout(&self.checkout)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    CONFIG_FILE_CANDIDATES.iter().map(PathBuf::from).find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_cart(cart: &CartConfig) -> Result<(), ConfigError> {
    if cart.bundle_discount_percent > 100 {
        return Err(ConfigError::Validation(
            "cart.bundle_discount_percent must be in range 0..=100".to_string(),
        ));
    }

    Ok(())
}

fn validate_checkout(checkout: &CheckoutConfig) -> Result<(), ConfigError> {
    let currency = checkout.currency.trim();
    if currency.len() != 3 || !currency.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(ConfigError::Validation(format!(
            "checkout.currency must be a three-letter ISO code such as `usd`, got `{currency}`"
        )));
    }

    let urls = [
        ("checkout.success_url", &checkout.success_url),
        ("checkout.cancel_url", &checkout.cancel_url),
    ];
    for (key, url) in urls {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "{key} must start with http:// or https://"
            )));
        }
    }

    // Hosted sessions may live between 30 minutes and 24 hours.
    if !(30..=1440).contains(&checkout.session_ttl_minutes) {
        return Err(ConfigError::Validation(
            "checkout.session_ttl_minutes must be in range 30..=1440".to_string(),
        ));
    }

    if let Some(secret_key) = &checkout.secret_key {
        let secret_key = secret_key.expose_secret();
        if secret_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "checkout.secret_key is set but empty; remove it or supply the processor secret key"
                    .to_string(),
            ));
        }
        if !secret_key.starts_with("sk_") {
            let hint = if secret_key.starts_with("pk_") {
                " (hint: you may have used the publishable key instead of the secret key)"
            } else {
                ""
            };
            return Err(ConfigError::Validation(format!(
                "checkout.secret_key must start with `sk_`{hint}"
            )));
        }
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u8(key: &str, value: &str) -> Result<u8, ConfigError> {
    value.trim().parse::<u8>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    quiz: Option<QuizPatch>,
    cart: Option<CartPatch>,
    checkout: Option<CheckoutPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct QuizPatch {
    default_variant: Option<QuizVariant>,
}

#[derive(Debug, Default, Deserialize)]
struct CartPatch {
    bundle_discount_percent: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
struct CheckoutPatch {
    currency: Option<String>,
    success_url: Option<String>,
    cancel_url: Option<String>,
    session_ttl_minutes: Option<u32>,
    secret_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
