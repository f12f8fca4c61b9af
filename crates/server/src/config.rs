use shared_types::{AppConfig, FeatureFlags};
use std::sync::OnceLock;

static FLAGS: OnceLock<FeatureFlags> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

const DEFAULT_MAX_REQUEST_BYTES: usize = 2 * 1024 * 1024;

/// Parse feature flags from config file contents. Malformed input disables
/// every flag.
pub fn parse_feature_flags(contents: &str) -> FeatureFlags {
    match toml::from_str::<AppConfig>(contents) {
        Ok(config) => config.features,
        Err(e) => {
            tracing::warn!(path = CONFIG_PATH, error = %e, "failed to parse config; all features off");
            FeatureFlags::default()
        }
    }
}

/// Read `config.toml` once and store the flags. Later calls are no-ops.
pub fn load_feature_flags() {
    FLAGS.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let flags = parse_feature_flags(&contents);
            tracing::info!(?flags, "feature flags loaded");
            flags
        }
        Err(e) => {
            tracing::warn!(path = CONFIG_PATH, error = %e, "config not found; all features off");
            FeatureFlags::default()
        }
    });
}

/// The loaded flags, or all-off if `load_feature_flags()` hasn't run.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags {
        telemetry: false,
        api_docs: false,
    };
    FLAGS.get().unwrap_or(&DEFAULT)
}

/// Request body cap from `MAX_REQUEST_BYTES`, default 2 MiB.
pub fn max_request_bytes() -> usize {
    std::env::var("MAX_REQUEST_BYTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_REQUEST_BYTES)
}
