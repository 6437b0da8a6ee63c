use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A JSON object with dotted-path access, used for engine configuration passthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigValue(Value);

impl Default for ConfigValue {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl ConfigValue {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.lookup(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.lookup(dotted_path)?.as_bool()
    }

    /// Inserts `value` at `dotted_path`, creating (or replacing non-object) intermediate nodes.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    /// Objects merge key by key; any other incoming value replaces the existing one.
    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Base,
    Dark,
    Forest,
    Neutral,
}

/// How much the engine trusts notation text (HTML labels, click handlers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    #[default]
    Strict,
    Loose,
    Antiscript,
    Sandbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    #[default]
    Error,
    Fatal,
}

/// Rendering-engine configuration applied by [`crate::initialize_engine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub theme: Theme,
    /// Default edge curve for graph layouts (`basis`, `linear`, `cardinal`, ...).
    pub curve: String,
    pub security_level: SecurityLevel,
    pub log_level: LogLevel,
    pub start_on_load: bool,
    /// Extra engine options merged over the generated object, e.g. `{"flowchart": {"htmlLabels": false}}`.
    pub extra: ConfigValue,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Default,
            curve: "basis".to_string(),
            security_level: SecurityLevel::Strict,
            log_level: LogLevel::Error,
            start_on_load: false,
            extra: ConfigValue::default(),
        }
    }
}

impl EngineConfig {
    /// The engine's configuration object.
    pub fn to_value(&self) -> Value {
        let mut out = ConfigValue::from_value(json!({
            "startOnLoad": self.start_on_load,
            "theme": self.theme,
            "securityLevel": self.security_level,
            "logLevel": self.log_level,
        }));
        out.set_value("flowchart.curve", Value::String(self.curve.clone()));
        out.deep_merge(self.extra.as_value());
        out.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_paths_read_and_write() {
        let mut cfg = ConfigValue::default();
        cfg.set_value("flowchart.htmlLabels", json!(false));
        cfg.set_value("themeVariables.primaryColor", json!("#fff"));
        assert_eq!(cfg.get_bool("flowchart.htmlLabels"), Some(false));
        assert_eq!(cfg.get_str("themeVariables.primaryColor"), Some("#fff"));
        assert_eq!(cfg.get_str("missing.path"), None);
    }

    #[test]
    fn set_value_replaces_scalars_on_the_path() {
        let mut cfg = ConfigValue::from_value(json!({ "flowchart": 3 }));
        cfg.set_value("flowchart.curve", json!("linear"));
        assert_eq!(cfg.as_value(), &json!({ "flowchart": { "curve": "linear" } }));

        let mut cfg = ConfigValue::from_value(json!([1, 2]));
        cfg.set_value("theme", json!("dark"));
        assert_eq!(cfg.as_value(), &json!({ "theme": "dark" }));
    }

    #[test]
    fn default_engine_config_object() {
        assert_eq!(
            EngineConfig::default().to_value(),
            json!({
                "startOnLoad": false,
                "theme": "default",
                "securityLevel": "strict",
                "logLevel": "error",
                "flowchart": { "curve": "basis" }
            })
        );
    }

    #[test]
    fn extra_options_merge_over_generated_keys() {
        let config = EngineConfig {
            theme: Theme::Dark,
            extra: ConfigValue::from_value(json!({
                "flowchart": { "htmlLabels": false },
                "securityLevel": "loose"
            })),
            ..Default::default()
        };
        let value = config.to_value();
        assert_eq!(value["theme"], json!("dark"));
        assert_eq!(value["securityLevel"], json!("loose"));
        assert_eq!(
            value["flowchart"],
            json!({ "curve": "basis", "htmlLabels": false })
        );
    }

    #[test]
    fn engine_config_decodes_partial_json() {
        let config: EngineConfig =
            serde_json::from_value(json!({ "theme": "forest", "securityLevel": "sandbox" }))
                .unwrap();
        assert_eq!(config.theme, Theme::Forest);
        assert_eq!(config.security_level, SecurityLevel::Sandbox);
        assert_eq!(config.curve, "basis");
    }
}
