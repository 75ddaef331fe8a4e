use serde::{Deserialize, Serialize};

/// Construction parameters for a [`History`](crate::History) handle, matching
/// the plugin configuration section of the worker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// KairosDB query endpoint. Required; construction fails without it.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub history_enabled: bool,
    #[serde(default)]
    pub check_id: String,
    /// Entity filter; a scalar is accepted and normalized to a one-element
    /// list, absent or null means no filter.
    #[serde(default)]
    pub entities: Entities,
}

/// Entity filter as found in configuration: a list, a single scalar, or
/// nothing at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entities {
    Many(Vec<String>),
    One(String),
    Absent,
}

impl Entities {
    pub fn normalize(self) -> Vec<String> {
        match self {
            Entities::Many(entities) => entities,
            Entities::One(entity) => vec![entity],
            Entities::Absent => Vec::new(),
        }
    }
}

impl Default for Entities {
    fn default() -> Self {
        Entities::Absent
    }
}

impl From<Vec<String>> for Entities {
    fn from(entities: Vec<String>) -> Self {
        Entities::Many(entities)
    }
}

impl From<&str> for Entities {
    fn from(entity: &str) -> Self {
        Entities::One(entity.to_string())
    }
}

/// Parses the legacy string forms of the enable flag. Anything other than
/// `true`, `True` or `1` counts as disabled.
pub fn flag_enabled(raw: &str) -> bool {
    matches!(raw, "true" | "True" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalar_entity_normalizes_to_single_element_list() {
        let config: HistoryConfig =
            serde_json::from_str(r#"{"url":"http://kairosdb","entities":"GLOBAL"}"#).unwrap();
        assert_eq!(config.entities.normalize(), vec!["GLOBAL".to_string()]);
    }

    #[test]
    fn entity_list_passes_through() {
        let config: HistoryConfig =
            serde_json::from_str(r#"{"url":"http://kairosdb","entities":["a","b"]}"#).unwrap();
        assert_eq!(
            config.entities.normalize(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn absent_or_null_entities_normalize_to_empty() {
        let config: HistoryConfig = serde_json::from_str(r#"{"url":"http://kairosdb"}"#).unwrap();
        assert_eq!(config.entities.normalize(), Vec::<String>::new());

        let config: HistoryConfig =
            serde_json::from_str(r#"{"url":"http://kairosdb","entities":null}"#).unwrap();
        assert_eq!(config.entities.normalize(), Vec::<String>::new());
    }

    #[test]
    fn enable_flag_string_forms() {
        assert!(flag_enabled("true"));
        assert!(flag_enabled("True"));
        assert!(flag_enabled("1"));
        assert!(!flag_enabled("false"));
        assert!(!flag_enabled("yes"));
        assert!(!flag_enabled(""));
    }
}
