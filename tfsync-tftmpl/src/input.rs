use std::{collections::BTreeMap, path::PathBuf};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::{Condition, NamedBlock, Service, Task};

/// Operator variables for the module, in the order they were configured.
pub type Variables = IndexMap<String, Value>;

pub const DEFAULT_FILE_PERMS: u32 = 0o644;

/// Everything needed to write a task's root module.
#[derive(Debug)]
pub struct RootModuleInputData {
    pub task: Task,
    pub services: Vec<Service>,
    pub providers: Vec<NamedBlock>,
    /// `required_providers` entries keyed by provider name
    pub provider_info: BTreeMap<String, Value>,
    /// Backend configuration as `{ <type> = { ... } }`, empty for none
    pub backend: BTreeMap<String, Value>,
    pub variables: Variables,
    pub condition: Option<Box<dyn Condition>>,
    /// Directory the root module is written to
    pub path: PathBuf,
    pub file_perms: u32,
    /// Leave files that already exist untouched
    pub skip_existing: bool,
    backend_block: Option<NamedBlock>,
}

impl RootModuleInputData {
    pub fn new(task: Task, path: impl Into<PathBuf>) -> Self {
        Self {
            task,
            services: Vec::new(),
            providers: Vec::new(),
            provider_info: BTreeMap::new(),
            backend: BTreeMap::new(),
            variables: Variables::new(),
            condition: None,
            path: path.into(),
            file_perms: DEFAULT_FILE_PERMS,
            skip_existing: false,
            backend_block: None,
        }
    }

    pub fn with_services(mut self, services: Vec<Service>) -> Self {
        self.services = services;
        self
    }

    pub fn with_providers(mut self, providers: Vec<NamedBlock>) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_provider_info(mut self, provider_info: BTreeMap<String, Value>) -> Self {
        self.provider_info = provider_info;
        self
    }

    pub fn with_backend(mut self, backend: BTreeMap<String, Value>) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_condition(mut self, condition: impl Condition + 'static) -> Self {
        self.condition = Some(Box::new(condition));
        self
    }

    pub fn with_file_perms(mut self, file_perms: u32) -> Self {
        self.file_perms = file_perms;
        self
    }

    pub fn with_skip_existing(mut self, skip_existing: bool) -> Self {
        self.skip_existing = skip_existing;
        self
    }

    /// Normalize the input before rendering.
    ///
    /// Wraps the backend into a [`NamedBlock`] and sorts providers and
    /// services by name so the output is independent of their original
    /// order. Calling it again has no further effect.
    pub fn init(&mut self) {
        self.backend_block = NamedBlock::from_labeled(&self.backend);
        self.providers.sort_by(|a, b| a.name.cmp(&b.name));
        self.services.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(
            task = %self.task.name,
            providers = self.providers.len(),
            services = self.services.len(),
            backend = self.backend_block.as_ref().map(|b| b.name.as_str()),
            "normalized root module input"
        );
    }

    /// The backend block, once [`init`](Self::init) has run.
    pub fn backend_block(&self) -> Option<&NamedBlock> {
        self.backend_block.as_ref()
    }
}
