use std::collections::BTreeMap;

use serde::Deserialize;

/// A unit of automation. The name doubles as the module label and must be
/// unique among tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Module source, e.g. `org/consul-terraform-sync/aws`
    pub source: String,
    /// Module version constraint
    #[serde(default)]
    pub version: Option<String>,
}

impl Task {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// A service the task's module depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Service {
    pub name: String,
    pub datacenter: Option<String>,
    pub namespace: Option<String>,
    pub tag: Option<String>,
    /// Filter expression applied to the service health query
    pub filter: Option<String>,
    pub description: Option<String>,
    /// Metadata appended to every instance of the service
    #[serde(default)]
    pub cts_user_defined_meta: BTreeMap<String, String>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Arguments of the template `service` query for this service.
    ///
    /// ```
    /// use tfsync_tftmpl::Service;
    ///
    /// let service = Service {
    ///     datacenter: Some("dc1".into()),
    ///     tag: Some("blue".into()),
    ///     ..Service::new("web")
    /// };
    /// assert_eq!(service.query(), r#""web" "dc=dc1" "\"blue\" in Service.Tags""#);
    /// ```
    pub fn query(&self) -> String {
        let mut opts = Vec::new();

        if let Some(dc) = non_empty(&self.datacenter) {
            opts.push(format!("dc={}", dc));
        }
        if let Some(ns) = non_empty(&self.namespace) {
            opts.push(format!("ns={}", ns));
        }
        if let Some(tag) = non_empty(&self.tag) {
            opts.push(format!(r#"\"{}\" in Service.Tags"#, tag));
        }
        if let Some(filter) = non_empty(&self.filter) {
            opts.push(filter.replace('"', r#"\""#).trim_matches('\n').to_string());
        }

        let mut query = template_string(&self.name);
        if !opts.is_empty() {
            query.push_str(" \"");
            query.push_str(&opts.join("\" \""));
            query.push('"');
        }
        query
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Quote a string for use as a template string literal.
pub(crate) fn template_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', r"\\").replace('"', r#"\""#))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_name_only() {
        assert_eq!(Service::new("api").query(), r#""api""#);
    }

    #[test]
    fn test_query_all_options_in_order() {
        let service = Service {
            datacenter: Some("dc1".into()),
            namespace: Some("ns1".into()),
            tag: Some("blue".into()),
            filter: Some("\nService.Meta.env == \"prod\"\n".into()),
            ..Service::new("api")
        };
        assert_eq!(
            service.query(),
            r#""api" "dc=dc1" "ns=ns1" "\"blue\" in Service.Tags" "Service.Meta.env == \"prod\"""#
        );
    }

    #[test]
    fn test_query_ignores_empty_options() {
        let service = Service {
            datacenter: Some(String::new()),
            ..Service::new("api")
        };
        assert_eq!(service.query(), r#""api""#);
    }

    #[test]
    fn test_deserialize_service() {
        let service: Service = serde_json::from_value(serde_json::json!({
            "name": "web",
            "tag": "blue",
            "cts_user_defined_meta": {"team": "edge"}
        }))
        .unwrap();

        assert_eq!(service.name, "web");
        assert_eq!(service.tag.as_deref(), Some("blue"));
        assert_eq!(service.datacenter, None);
        assert_eq!(service.cts_user_defined_meta["team"], "edge");
    }

    #[test]
    fn test_task_builder() {
        let task = Task::new("web", "org/web/aws")
            .with_description("web servers")
            .with_version("1.0.0");
        assert_eq!(task.description, "web servers");
        assert_eq!(task.version.as_deref(), Some("1.0.0"));
    }
}
