use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;
use serde_json::Value;
use tfsync_core::TerraformConfig;
use tfsync_tftmpl::{NamedBlock, RootModuleInputData, Service, Task, TaskCondition, Variables};

use crate::{
    Error, Result,
    validate::{ParseContext, find_string_spans},
};

/// File name looked up when no configuration path is given.
pub const DEFAULT_FILENAME: &str = "task.toml";

/// Root of a `task.toml`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub task: Task,

    #[serde(default)]
    pub services: Vec<Service>,

    /// Provider configuration keyed by provider name
    #[serde(default)]
    pub providers: BTreeMap<String, BTreeMap<String, Value>>,

    /// `required_providers` entries keyed by provider name
    #[serde(default)]
    pub required_providers: BTreeMap<String, Value>,

    /// At most one `[backend.<type>]` table, defaults to the driver's
    #[serde(default)]
    pub backend: BTreeMap<String, Value>,

    #[serde(default)]
    pub variables: Variables,

    #[serde(default)]
    pub condition: Option<TaskCondition>,

    #[serde(default)]
    pub terraform: TerraformConfig,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, DEFAULT_FILENAME)
    }
}

impl Manifest {
    /// Parse a task configuration file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a task configuration with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let manifest: Self =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        manifest.validate(content, filename)?;
        Ok(manifest)
    }

    /// Backend of the root module: the task's own, or else the one
    /// configured for the Terraform driver.
    pub fn backend(&self) -> &BTreeMap<String, Value> {
        if self.backend.is_empty() {
            &self.terraform.backend
        } else {
            &self.backend
        }
    }

    /// Build the root module input for this task, to be written to `path`.
    pub fn into_input(self, path: impl Into<PathBuf>) -> RootModuleInputData {
        let backend = self.backend().clone();
        let providers = self
            .providers
            .into_iter()
            .map(|(name, attributes)| NamedBlock::new(name, attributes))
            .collect();

        let input = RootModuleInputData::new(self.task, path)
            .with_services(self.services)
            .with_providers(providers)
            .with_provider_info(self.required_providers)
            .with_backend(backend)
            .with_variables(self.variables);

        match self.condition {
            Some(condition) => input.with_condition(condition),
            None => input,
        }
    }

    fn validate(&self, src: &str, filename: &str) -> Result<()> {
        let ctx = ParseContext::new(src, filename);

        let task_ctx = ctx.push("task");
        task_ctx.validate_name(&self.task.name, "task")?;
        if self.task.source.trim().is_empty() {
            return Err(task_ctx.error("task source cannot be empty", task_ctx.find_span("source")));
        }

        let providers_ctx = ctx.push("providers");
        for (name, attributes) in &self.providers {
            providers_ctx.validate_name(name, "provider")?;
            // Attributes and the keys of nested objects become HCL attribute names.
            let provider_ctx = providers_ctx.push(name);
            for (key, value) in attributes {
                provider_ctx.validate_name(key, "attribute")?;
                if let Value::Object(nested) = value {
                    let nested_ctx = provider_ctx.push(key);
                    for nested_key in nested.keys() {
                        nested_ctx.validate_name(nested_key, "attribute")?;
                    }
                }
            }
        }
        let required_ctx = ctx.push("required_providers");
        for name in self.required_providers.keys() {
            required_ctx.validate_name(name, "provider")?;
        }

        validate_backend(&ctx.push("backend"), &self.backend)?;
        validate_backend(&ctx.push("terraform").push("backend"), &self.terraform.backend)?;

        let variables_ctx = ctx.push("variables");
        for name in self.variables.keys() {
            variables_ctx.validate_variable(name)?;
        }

        self.validate_services(&ctx)
    }

    fn validate_services(&self, ctx: &ParseContext<'_>) -> Result<()> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for service in &self.services {
            if service.name.trim().is_empty() {
                return Err(ctx.error("service name cannot be empty", ctx.find_span("services")));
            }

            let count = seen.entry(service.name.as_str()).or_insert(0);
            *count += 1;
            if *count > 1 {
                let spans = find_string_spans(ctx.src(), &service.name);
                return Err(Error::duplicate_service(
                    service.name.as_str(),
                    ctx.src(),
                    ctx.filename(),
                    (spans.first().copied(), spans.get(1).copied()),
                ));
            }
        }
        Ok(())
    }
}

fn validate_backend(ctx: &ParseContext<'_>, backend: &BTreeMap<String, Value>) -> Result<()> {
    if backend.len() > 1 {
        let names: Vec<&str> = backend.keys().map(String::as_str).collect();
        return Err(ctx.error(
            format!("only one backend can be configured, found {}", names.join(", ")),
            ctx.find_span("backend"),
        ));
    }

    for (name, value) in backend {
        if let Value::Object(attributes) = value {
            let backend_ctx = ctx.push(name);
            for key in attributes.keys() {
                backend_ctx.validate_name(key, "attribute")?;
            }
        }
    }
    Ok(())
}
