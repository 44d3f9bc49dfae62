use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

/// Provider attributes that configure tfsync itself and never reach
/// Terraform.
pub const SUPPRESSED_ATTRIBUTES: [&str; 2] = ["alias", "auto_commit"];

/// A labeled configuration block, such as a provider or backend.
///
/// Attributes are kept in ascending name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedBlock {
    pub name: String,
    attributes: BTreeMap<String, Value>,
}

impl NamedBlock {
    pub fn new(name: impl Into<String>, attributes: BTreeMap<String, Value>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Build a block from a single-entry mapping of `name -> attributes`,
    /// the shape backends and providers take in configuration.
    ///
    /// Returns `None` for an empty mapping.
    pub fn from_labeled(labeled: &BTreeMap<String, Value>) -> Option<Self> {
        let (name, value) = labeled.iter().next()?;
        if labeled.len() > 1 {
            warn!(
                block = %name,
                ignored = labeled.len() - 1,
                "only one labeled block is supported, ignoring the rest"
            );
        }

        let attributes = match value {
            Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            Value::Null => BTreeMap::new(),
            other => {
                warn!(block = %name, value = %other, "block value is not an object, ignoring it");
                BTreeMap::new()
            }
        };
        Some(Self::new(name.clone(), attributes))
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Attributes passed on to Terraform, i.e. without
    /// [`SUPPRESSED_ATTRIBUTES`].
    pub fn arguments(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes()
            .filter(|(name, _)| !SUPPRESSED_ATTRIBUTES.contains(name))
    }

    /// The arguments as a single object value.
    pub fn arguments_object(&self) -> Value {
        Value::Object(
            self.arguments()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }
}
