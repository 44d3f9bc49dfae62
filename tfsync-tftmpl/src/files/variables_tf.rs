use std::io::{self, Write};

use tfsync_hcl::{Body, Document, TypeExpr, Value};

use super::write_preamble;
use crate::{Condition, NamedBlock, RootModuleInputData};

/// Type of the `services` variable, keyed by service instance id.
const SERVICES_TYPE: &str = "map(
object({
id = string
name = string
kind = string
address = string
port = number
meta = map(string)
tags = list(string)
namespace = string
status = string

node = string
node_id = string
node_address = string
node_datacenter = string
node_tagged_addresses = map(string)
node_meta = map(string)

cts_user_defined_meta = map(string)
})
)";

pub(super) fn render(
    w: &mut dyn Write,
    filename: &str,
    input: &RootModuleInputData,
) -> io::Result<()> {
    write_preamble(w, &input.task, filename);

    let mut doc = Document::new();
    let body = doc.body_mut();
    body.append_newline();
    append_services_variable(body);

    if let Some(condition) = input
        .condition
        .as_deref()
        .filter(|c| c.source_includes_variable())
    {
        for name in condition_variables(condition) {
            body.append_newline();
            let variable = body.append_block("variable", &[name.as_str()]);
            variable.set_attribute_value(
                "description",
                format!("Value of {} provided by the task condition", name),
            );
            variable.set_attribute_raw("type", "any");
        }
    }

    for provider in &input.providers {
        body.append_newline();
        append_provider_variable(body, provider);
    }

    w.write_all(&doc.to_bytes())
}

fn append_services_variable(body: &mut Body) {
    body.append_comment("Service definition protocol v0");
    let variable = body.append_block("variable", &["services"]);
    variable.set_attribute_value("description", "Consul services monitored by tfsync");
    variable.set_attribute_raw("type", SERVICES_TYPE);
}

/// Variables the condition references in the module block.
fn condition_variables(condition: &dyn Condition) -> Vec<String> {
    let mut scratch = Body::new();
    condition.append_module_attribute(&mut scratch);

    let mut names: Vec<String> = Vec::new();
    for attr in scratch.attributes() {
        let Some(traversal) = attr.expr().as_traversal() else {
            continue;
        };
        if traversal.root() != "var" {
            continue;
        }
        if let Some(name) = traversal.attrs().first() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    names
}

fn append_provider_variable(body: &mut Body, provider: &NamedBlock) {
    let fields = provider
        .arguments()
        .map(|(name, value)| (name.to_string(), TypeExpr::of(value)))
        .collect();

    let variable = body.append_block("variable", &[provider.name.as_str()]);
    variable.set_attribute_value("default", Value::Null);
    variable.set_attribute_value(
        "description",
        format!("Configuration object for {}", provider.name),
    );
    variable.set_attribute_value("sensitive", true);
    variable.set_attribute_raw("type", TypeExpr::Object(fields).to_string());
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;
    use crate::{CatalogServicesCondition, TaskCondition};

    #[test]
    fn test_condition_variables() {
        let condition = TaskCondition::CatalogServices(CatalogServicesCondition {
            source_includes_var: true,
            regexp: Some("^web".into()),
        });
        assert_eq!(condition_variables(&condition), ["catalog_services"]);
        assert!(condition_variables(&TaskCondition::Services).is_empty());
    }

    #[test]
    fn test_provider_variable() {
        let provider = NamedBlock::new("consul", BTreeMap::new())
            .with_attribute("alias", "east")
            .with_attribute("address", "localhost:8500")
            .with_attribute("auth", json!({"user": "admin", "pass": "secret"}));

        let mut doc = Document::new();
        append_provider_variable(doc.body_mut(), &provider);

        insta::assert_snapshot!(doc.to_string(), @r#"
        variable "consul" {
          default     = null
          description = "Configuration object for consul"
          sensitive   = true
          type = object({
            address = string
            auth = object({
              pass = string
              user = string
            })
          })
        }
        "#);
    }

    #[test]
    fn test_services_variable() {
        let mut doc = Document::new();
        append_services_variable(doc.body_mut());

        insta::assert_snapshot!(doc.to_string(), @r#"
        # Service definition protocol v0
        variable "services" {
          description = "Consul services monitored by tfsync"
          type = map(
            object({
              id        = string
              name      = string
              kind      = string
              address   = string
              port      = number
              meta      = map(string)
              tags      = list(string)
              namespace = string
              status    = string

              node                  = string
              node_id               = string
              node_address          = string
              node_datacenter       = string
              node_tagged_addresses = map(string)
              node_meta             = map(string)

              cts_user_defined_meta = map(string)
            })
          )
        }
        "#);
    }
}
