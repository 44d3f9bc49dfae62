use std::{
    collections::BTreeMap,
    io::{self, Write},
};

use tfsync_hcl::{Body, Document, Traversal, Value};
use tracing::warn;

use super::{REQUIRED_VERSION, write_preamble};
use crate::{Condition, NamedBlock, RootModuleInputData, Task};

pub(super) fn render(
    w: &mut dyn Write,
    filename: &str,
    input: &RootModuleInputData,
) -> io::Result<()> {
    write_preamble(w, &input.task, filename);

    let mut doc = Document::new();
    let body = doc.body_mut();
    body.append_newline();
    append_terraform_block(body, input.backend_block(), &input.provider_info);
    body.append_newline();
    if !input.providers.is_empty() {
        append_provider_blocks(body, &input.providers);
        body.append_newline();
    }
    append_module_block(
        body,
        &input.task,
        input.condition.as_deref(),
        input.variables.keys(),
    );

    w.write_all(&doc.to_bytes())
}

fn append_terraform_block(
    body: &mut Body,
    backend: Option<&NamedBlock>,
    provider_info: &BTreeMap<String, Value>,
) {
    let tf = body.append_block("terraform", &[]);
    tf.set_attribute_value("required_version", REQUIRED_VERSION);

    if !provider_info.is_empty() {
        let required = tf.append_block("required_providers", &[]);
        for (name, info) in provider_info {
            required.set_attribute_value(name, info.clone());
        }
    }

    if let Some(backend) = backend.filter(|b| !b.name.is_empty()) {
        let block = tf.append_block("backend", &[backend.name.as_str()]);
        for (name, value) in backend.attributes() {
            block.set_attribute_value(name, value.clone());
        }
    }
}

/// Provider blocks reference their configuration through `var.<provider>`
/// so secrets stay in `providers.tfvars`.
fn append_provider_blocks(body: &mut Body, providers: &[NamedBlock]) {
    for (i, provider) in providers.iter().enumerate() {
        if i > 0 {
            body.append_newline();
        }
        let block = body.append_block("provider", &[provider.name.as_str()]);
        for (name, value) in provider.arguments() {
            match value {
                Value::Object(fields) => {
                    let nested = block.append_block(name, &[]);
                    let mut keys: Vec<&String> = fields.keys().collect();
                    keys.sort();
                    for key in keys {
                        if fields[key.as_str()].is_object() {
                            warn!(
                                provider = %provider.name,
                                attribute = name,
                                key = %key,
                                "nested provider objects are only expanded one level deep"
                            );
                        }
                        nested.set_attribute_traversal(
                            key,
                            Traversal::variable([provider.name.as_str(), name, key.as_str()]),
                        );
                    }
                }
                _ => {
                    block.set_attribute_traversal(
                        name,
                        Traversal::variable([provider.name.as_str(), name]),
                    );
                }
            }
        }
    }
}

fn append_module_block<'a>(
    body: &mut Body,
    task: &Task,
    condition: Option<&dyn Condition>,
    variables: impl Iterator<Item = &'a String>,
) {
    if !task.description.is_empty() {
        body.append_comment(task.description.as_str());
    }

    let module = body.append_block("module", &[task.name.as_str()]);
    module.set_attribute_value("source", task.source.as_str());
    if let Some(version) = task.version.as_deref().filter(|v| !v.is_empty()) {
        module.set_attribute_value("version", version);
    }
    module.set_attribute_traversal("services", Traversal::variable(["services"]));

    if let Some(condition) = condition.filter(|c| c.source_includes_variable()) {
        condition.append_module_attribute(module);
    }

    let mut variables = variables.peekable();
    if variables.peek().is_some() {
        module.append_newline();
    }
    for name in variables {
        module.set_attribute_traversal(name, Traversal::variable([name.as_str()]));
    }
}
