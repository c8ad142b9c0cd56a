use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use glowcart_core::config::{AppConfig, LoadOptions, CONFIG_FILE_CANDIDATES};
use secrecy::{ExposeSecret, SecretString};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "quiz.default_variant",
        config.quiz.default_variant.as_str(),
        source("quiz.default_variant", &["GLOWCART_QUIZ_DEFAULT_VARIANT"]),
    ));
    lines.push(render_line(
        "cart.bundle_discount_percent",
        &config.cart.bundle_discount_percent.to_string(),
        source("cart.bundle_discount_percent", &["GLOWCART_CART_BUNDLE_DISCOUNT_PERCENT"]),
    ));
    lines.push(render_line(
        "checkout.currency",
        &config.checkout.currency,
        source("checkout.currency", &["GLOWCART_CHECKOUT_CURRENCY"]),
    ));
    lines.push(render_line(
        "checkout.success_url",
        &config.checkout.success_url,
        source("checkout.success_url", &["GLOWCART_CHECKOUT_SUCCESS_URL"]),
    ));
    lines.push(render_line(
        "checkout.cancel_url",
        &config.checkout.cancel_url,
        source("checkout.cancel_url", &["GLOWCART_CHECKOUT_CANCEL_URL"]),
    ));
    lines.push(render_line(
        "checkout.session_ttl_minutes",
        &config.checkout.session_ttl_minutes.to_string(),
        source("checkout.session_ttl_minutes", &["GLOWCART_CHECKOUT_SESSION_TTL_MINUTES"]),
    ));
    lines.push(render_line(
        "checkout.secret_key",
        &redact_key(config.checkout.secret_key.as_ref()),
        source("checkout.secret_key", &["GLOWCART_CHECKOUT_SECRET_KEY"]),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source("logging.level", &["GLOWCART_LOGGING_LEVEL", "GLOWCART_LOG_LEVEL"]),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source("logging.format", &["GLOWCART_LOGGING_FORMAT", "GLOWCART_LOG_FORMAT"]),
    ));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    CONFIG_FILE_CANDIDATES.iter().map(PathBuf::from).find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

/// Keeps the `sk_test_` / `sk_live_` mode prefix and hides the rest.
fn redact_key(key: Option<&SecretString>) -> String {
    let Some(key) = key else {
        return "<unset>".to_string();
    };

    let exposed = key.expose_secret().trim();
    match exposed.match_indices('_').nth(1) {
        Some((index, _)) => format!("{}***", &exposed[..=index]),
        None => "<redacted>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::redact_key;

    #[test]
    fn secret_keys_keep_only_their_mode_prefix() {
        let key = SecretString::from("sk_test_51Habcdef".to_string());
        assert_eq!(redact_key(Some(&key)), "sk_test_***");
        assert_eq!(redact_key(Some(&SecretString::from("sk_abc".to_string()))), "<redacted>");
        assert_eq!(redact_key(None), "<unset>");
    }
}
