use crate::config::{ConfigValue, EngineConfig};
use crate::error::Result;
use crate::host::RenderHost;
use std::sync::OnceLock;

static PROCESS_CONFIG: OnceLock<ConfigValue> = OnceLock::new();

/// Applies `config` (or the defaults) to `host`.
///
/// Safe to call any number of times: each call re-applies the configuration. The first
/// configuration applied in this process is recorded and stays readable through
/// [`process_config`]; later calls never replace it.
pub async fn initialize_engine<H: RenderHost>(host: &H, config: Option<EngineConfig>) -> Result<()> {
    let value = config.unwrap_or_default().to_value();
    if PROCESS_CONFIG.set(ConfigValue::from_value(value.clone())).is_ok() {
        tracing::debug!(config = %value, "recorded process engine configuration");
    }
    host.configure(&value).await
}

/// The first engine configuration applied in this process, if any.
pub fn process_config() -> Option<&'static ConfigValue> {
    PROCESS_CONFIG.get()
}
