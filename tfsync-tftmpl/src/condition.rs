use std::fmt;

use serde::Deserialize;
use tfsync_hcl::{Body, Traversal};

/// A task's run condition, as far as it affects the root module.
///
/// When the module source consumes a variable the condition provides,
/// [`Condition::append_module_attribute`] wires that variable into the
/// module block. The same call is used to discover which variables need to
/// be declared in `variables.tf`.
pub trait Condition: fmt::Debug {
    /// Whether the module consumes the condition's variable.
    fn source_includes_variable(&self) -> bool;

    /// Append the condition's attribute(s) to the module block body.
    fn append_module_attribute(&self, body: &mut Body);
}

/// Conditions a task can be configured with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TaskCondition {
    /// Run whenever one of the task's services changes.
    Services,
    /// Run when the set of services in the catalog changes.
    CatalogServices(CatalogServicesCondition),
}

impl TaskCondition {
    pub fn kind(&self) -> &'static str {
        match self {
            TaskCondition::Services => "services",
            TaskCondition::CatalogServices(_) => "catalog-services",
        }
    }
}

impl Condition for TaskCondition {
    fn source_includes_variable(&self) -> bool {
        match self {
            TaskCondition::Services => false,
            TaskCondition::CatalogServices(c) => c.source_includes_variable(),
        }
    }

    fn append_module_attribute(&self, body: &mut Body) {
        match self {
            TaskCondition::Services => {}
            TaskCondition::CatalogServices(c) => c.append_module_attribute(body),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogServicesCondition {
    #[serde(default)]
    pub source_includes_var: bool,
    /// Only services whose name matches are considered
    pub regexp: Option<String>,
}

impl CatalogServicesCondition {
    pub const VARIABLE: &'static str = "catalog_services";
}

impl Condition for CatalogServicesCondition {
    fn source_includes_variable(&self) -> bool {
        self.source_includes_var
    }

    fn append_module_attribute(&self, body: &mut Body) {
        body.set_attribute_traversal(Self::VARIABLE, Traversal::variable([Self::VARIABLE]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_services_condition_adds_nothing() {
        let mut body = Body::new();
        TaskCondition::Services.append_module_attribute(&mut body);
        assert!(body.is_empty());
        assert!(!TaskCondition::Services.source_includes_variable());
    }

    #[test]
    fn test_catalog_services_attribute() {
        let condition = TaskCondition::CatalogServices(CatalogServicesCondition {
            source_includes_var: true,
            regexp: None,
        });
        assert!(condition.source_includes_variable());

        let mut body = Body::new();
        condition.append_module_attribute(&mut body);
        let attr = body.get_attribute("catalog_services").unwrap();
        assert_eq!(
            attr.expr().as_traversal().unwrap().to_string(),
            "var.catalog_services"
        );
    }

    #[test]
    fn test_deserialize_tagged() {
        let condition: TaskCondition = serde_json::from_value(serde_json::json!({
            "kind": "catalog-services",
            "source_includes_var": true,
            "regexp": "^web"
        }))
        .unwrap();

        assert_eq!(condition.kind(), "catalog-services");
        assert!(condition.source_includes_variable());

        let services: TaskCondition =
            serde_json::from_value(serde_json::json!({"kind": "services"})).unwrap();
        assert_eq!(services, TaskCondition::Services);
    }
}
