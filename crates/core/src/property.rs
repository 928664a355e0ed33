//! Template properties and the action configuration that carries them.
//!
//! The template system authors an ordered list of [`Property`] entries per
//! action. Order encodes the UI layout, so entries are addressed by position,
//! never by key.

use serde::{Deserialize, Serialize};

use crate::Value;

/// One key/value entry of a plugin-specified template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Label the template editor attached to this entry. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Untyped value; a missing value reads as `Null`.
    #[serde(default = "null_value")]
    pub value: Value,
}

fn null_value() -> Value {
    Value::Null
}

impl Property {
    /// Create a property without a key label.
    pub fn new(value: impl Into<Value>) -> Self {
        Property {
            key: None,
            value: value.into(),
        }
    }

    /// Create a property with a key label.
    pub fn with_key(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Property {
            key: Some(key.into()),
            value: value.into(),
        }
    }

    /// An unset slot, used to pad a template up to a later offset.
    pub fn empty() -> Self {
        Property::new(Value::Null)
    }
}

/// Full configuration of one plugin action, as produced by the template system.
///
/// # Example
///
/// ```
/// use mongoplug_core::ActionConfiguration;
///
/// let config: ActionConfiguration = serde_json::from_str(
///     r#"{"pluginSpecifiedTemplates": [{"value": "DISTINCT"}, {"value": "orders"}]}"#,
/// ).unwrap();
/// assert_eq!(config.plugin_specified_templates.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfiguration {
    /// Ordered property list.
    #[serde(default)]
    pub plugin_specified_templates: Vec<Property>,
    /// Raw body, used by actions authored as free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Execution timeout requested for the action.
    #[serde(
        default,
        rename = "timeoutInMillisecond",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout_ms: Option<u64>,
}

impl ActionConfiguration {
    /// Create a configuration from an ordered property list.
    pub fn new(plugin_specified_templates: Vec<Property>) -> Self {
        ActionConfiguration {
            plugin_specified_templates,
            ..Default::default()
        }
    }

    /// Ordered property list, borrowed read-only.
    pub fn templates(&self) -> &[Property] {
        &self.plugin_specified_templates
    }
}
