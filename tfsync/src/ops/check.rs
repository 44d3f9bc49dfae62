//! Check operation - task configuration review.

use std::path::Path;

use tfsync_manifest::Manifest;
use tfsync_tftmpl::{Condition, SUPPRESSED_ATTRIBUTES};

use crate::reports::CheckReport;

/// Review a parsed task configuration.
///
/// Parsing already rejected invalid configuration, what is left are
/// warnings about output that is likely not what the operator meant.
pub fn check(manifest: &Manifest, config_path: &Path) -> CheckReport {
    let mut warnings = Vec::new();

    if manifest.services.is_empty() {
        warnings.push(format!(
            "task '{}' has no services, the module will receive an empty map",
            manifest.task.name
        ));
    }

    for (name, attributes) in &manifest.providers {
        if !manifest.required_providers.contains_key(name) {
            warnings.push(format!(
                "provider '{}' has no [required_providers.{}] entry",
                name, name
            ));
        }
        for (attr, value) in attributes {
            if SUPPRESSED_ATTRIBUTES.contains(&attr.as_str()) {
                continue;
            }
            let nested = value
                .as_object()
                .is_some_and(|fields| fields.values().any(|v| v.is_object()));
            if nested {
                warnings.push(format!(
                    "provider '{}' attribute '{}' nests objects more than one level deep, \
                     only the first level is expanded in main.tf",
                    name, attr
                ));
            }
        }
    }

    if let Some(condition) = &manifest.condition {
        if !condition.source_includes_variable() && condition.kind() == "catalog-services" {
            warnings.push(
                "catalog-services condition does not pass catalog_services to the module, \
                 set source_includes_var = true if the module expects it"
                    .to_string(),
            );
        }
    }

    CheckReport {
        config_path: config_path.to_path_buf(),
        task: manifest.task.name.clone(),
        source: manifest.task.source.clone(),
        version: manifest.task.version.clone(),
        services: manifest.services.iter().map(|s| s.query()).collect(),
        providers: manifest.providers.keys().cloned().collect(),
        backend: manifest.backend().keys().next().cloned(),
        variables: manifest.variables.keys().cloned().collect(),
        condition: manifest.condition.as_ref().map(|c| c.kind().to_string()),
        warnings,
    }
}
