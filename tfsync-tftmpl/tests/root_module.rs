use std::{collections::BTreeMap, fs};

use serde_json::{Value, json};
use tfsync_tftmpl::{
    CatalogServicesCondition, FileKind, NamedBlock, PreviewFile, RootModuleInputData, Service,
    Task, TaskCondition, Variables, files::ROOT_PREAMBLE, init_root_module, preview,
};

fn object(value: Value) -> BTreeMap<String, Value> {
    serde_json::from_value(value).unwrap()
}

fn task() -> Task {
    Task::new("test", "namespace/test/module")
        .with_description("user description")
        .with_version("0.0.0")
}

fn services() -> Vec<Service> {
    vec![
        Service {
            tag: Some("blue".into()),
            ..Service::new("web")
        },
        Service {
            datacenter: Some("dc1".into()),
            namespace: Some("ns1".into()),
            ..Service::new("api")
        },
    ]
}

fn providers() -> Vec<NamedBlock> {
    vec![
        NamedBlock::new(
            "local",
            object(json!({"alias": "tf", "auto_commit": true, "token": "abc"})),
        ),
        NamedBlock::new(
            "consul",
            object(json!({
                "address": "localhost:8500",
                "auth": {"user": "admin", "pass": "secret"}
            })),
        ),
    ]
}

fn variables() -> Variables {
    let mut variables = Variables::new();
    variables.insert("region".into(), json!("us-east-1"));
    variables.insert("instances".into(), json!(2));
    variables
}

fn fixture(services: Vec<Service>, providers: Vec<NamedBlock>) -> RootModuleInputData {
    RootModuleInputData::new(task(), "unused")
        .with_services(services)
        .with_providers(providers)
        .with_provider_info(object(json!({
            "consul": {"source": "hashicorp/consul", "version": "2.5.0"}
        })))
        .with_backend(object(json!({
            "consul": {"path": "tfsync/terraform", "gzip": true}
        })))
        .with_variables(variables())
}

fn rendered(files: &[PreviewFile], kind: FileKind) -> &str {
    let file = files
        .iter()
        .find(|f| f.kind == kind)
        .unwrap_or_else(|| panic!("{} was not rendered", kind.filename()));
    file.content
        .strip_prefix(ROOT_PREAMBLE)
        .unwrap_or_else(|| panic!("{} is missing the preamble", kind.filename()))
}

#[test]
fn test_main_tf() {
    let files = preview(&mut fixture(services(), providers()));

    insta::assert_snapshot!(rendered(&files, FileKind::Main), @r#"
    # Task: test
    # Description: user description

    terraform {
      required_version = ">= 0.13.0, < 0.15"
      required_providers {
        consul = {
          source  = "hashicorp/consul"
          version = "2.5.0"
        }
      }
      backend "consul" {
        gzip = true
        path = "tfsync/terraform"
      }
    }

    provider "consul" {
      address = var.consul.address
      auth {
        pass = var.consul.auth.pass
        user = var.consul.auth.user
      }
    }

    provider "local" {
      token = var.local.token
    }

    # user description
    module "test" {
      source   = "namespace/test/module"
      version  = "0.0.0"
      services = var.services

      region    = var.region
      instances = var.instances
    }
    "#);
}

#[test]
fn test_variables_tf() {
    let files = preview(&mut fixture(services(), providers()));
    let content = rendered(&files, FileKind::Variables);

    assert!(content.starts_with("# Task: test\n# Description: user description\n\n"));
    assert!(content.contains("# Service definition protocol v0\nvariable \"services\" {\n"));
    assert!(content.contains("      cts_user_defined_meta = map(string)\n"));

    let consul = content.find("variable \"consul\"").unwrap();
    let local = content.find("variable \"local\"").unwrap();
    assert!(consul < local);

    insta::assert_snapshot!(&content[local..], @r#"
    variable "local" {
      default     = null
      description = "Configuration object for local"
      sensitive   = true
      type = object({
        token = string
      })
    }
    "#);
}

#[test]
fn test_module_variables_tf() {
    let files = preview(&mut fixture(services(), providers()));

    insta::assert_snapshot!(rendered(&files, FileKind::ModuleVariables), @r#"
    # Task: test
    # Description: user description

    variable "region" {
      default = "us-east-1"
      type    = string
    }

    variable "instances" {
      default = 2
      type    = number
    }
    "#);
}

#[test]
fn test_tfvars_tmpl() {
    let files = preview(&mut fixture(services(), providers()));

    insta::assert_snapshot!(rendered(&files, FileKind::TfVarsTemplate), @r#"
    # Task: test
    # Description: user description

    services = {
    {{- with $srv := service "api" "dc=dc1" "ns=ns1" }}
      {{- range $s := $srv}}
      "{{ joinStrings "." .ID .Node .Namespace .NodeDatacenter }}" = {
    {{ HCLService $s | indent 4 }}
      },
      {{- end}}
    {{- end}}
    {{- with $srv := service "web" "\"blue\" in Service.Tags" }}
      {{- range $s := $srv}}
      "{{ joinStrings "." .ID .Node .Namespace .NodeDatacenter }}" = {
    {{ HCLService $s | indent 4 }}
      },
      {{- end}}
    {{- end}}
    }
    "#);
}

#[test]
fn test_providers_tfvars() {
    let files = preview(&mut fixture(services(), providers()));

    insta::assert_snapshot!(rendered(&files, FileKind::ProvidersTfVars), @r#"
    # Task: test
    # Description: user description

    consul = {
      address = "localhost:8500"
      auth = {
        pass = "secret"
        user = "admin"
      }
    }

    local = {
      token = "abc"
    }
    "#);
}

#[test]
fn test_output_independent_of_input_order() {
    let forward = preview(&mut fixture(services(), providers()));

    let mut services = services();
    services.reverse();
    let mut providers = providers();
    providers.reverse();
    let reversed = preview(&mut fixture(services, providers));

    assert_eq!(forward, reversed);
}

#[test]
fn test_secrets_stay_out_of_main_tf() {
    let files = preview(&mut fixture(services(), providers()));
    let main = rendered(&files, FileKind::Main);

    assert!(!main.contains("secret"));
    assert!(!main.contains("abc"));
    assert!(!main.contains("localhost:8500"));
}

#[test]
fn test_suppressed_attributes_never_rendered() {
    let files = preview(&mut fixture(services(), providers()));

    for file in &files {
        assert!(!file.content.contains("alias"), "{}", file.filename());
        assert!(!file.content.contains("auto_commit"), "{}", file.filename());
    }
}

#[test]
fn test_hcl_files_are_canonically_formatted() {
    let files = preview(&mut fixture(services(), providers()));

    for file in files.iter().filter(|f| f.kind != FileKind::TfVarsTemplate) {
        assert_eq!(
            tfsync_hcl::format(&file.content),
            file.content,
            "{} is not formatted",
            file.filename()
        );
    }
}

#[test]
fn test_minimal_root_module() {
    let mut input = RootModuleInputData::new(Task::new("min", "org/min/aws"), "unused");
    let files = preview(&mut input);

    let kinds: Vec<FileKind> = files.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        [
            FileKind::Main,
            FileKind::Variables,
            FileKind::TfVarsTemplate,
            FileKind::ProvidersTfVars
        ]
    );

    insta::assert_snapshot!(rendered(&files, FileKind::Main), @r#"
    # Task: min
    # Description:

    terraform {
      required_version = ">= 0.13.0, < 0.15"
    }

    module "min" {
      source   = "org/min/aws"
      services = var.services
    }
    "#);

    assert_eq!(
        rendered(&files, FileKind::ProvidersTfVars),
        "# Task: min\n# Description:\n"
    );
    assert!(rendered(&files, FileKind::TfVarsTemplate).ends_with("\nservices = {\n}\n"));
}

#[test]
fn test_catalog_services_condition() {
    let mut input = fixture(services(), providers()).with_condition(
        TaskCondition::CatalogServices(CatalogServicesCondition {
            source_includes_var: true,
            regexp: Some("^api".into()),
        }),
    );
    let files = preview(&mut input);

    assert!(
        rendered(&files, FileKind::Main).contains("  catalog_services = var.catalog_services\n")
    );
    assert!(rendered(&files, FileKind::Variables).contains(
        "variable \"catalog_services\" {\n  description = \"Value of catalog_services provided by the task condition\"\n  type        = any\n}\n"
    ));
}

#[test]
fn test_init_root_module_writes_preview() {
    let dir = tempfile::tempdir().unwrap();
    let mut input = fixture(services(), providers()).with_skip_existing(false);
    input.path = dir.path().join("test");

    let files = preview(&mut input);
    init_root_module(&mut input).unwrap();

    for file in &files {
        let written = fs::read_to_string(input.path.join(file.filename())).unwrap();
        assert_eq!(&written, &file.content);
    }
}

#[test]
fn test_render_is_idempotent_across_directories() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    for dir in [first.path(), second.path()] {
        let mut input = fixture(services(), providers());
        input.path = dir.to_path_buf();
        init_root_module(&mut input).unwrap();
    }

    for kind in FileKind::ALL {
        let a = fs::read(first.path().join(kind.filename())).unwrap();
        let b = fs::read(second.path().join(kind.filename())).unwrap();
        assert_eq!(a, b, "{} differs", kind.filename());
    }
}

#[test]
fn test_preamble_is_unique_per_task() {
    let render = |name: &str| {
        let mut input = RootModuleInputData::new(Task::new(name, "org/m/aws"), "unused");
        preview(&mut input)
    };
    let web = render("web");
    let api = render("api");

    for (a, b) in web.iter().zip(&api) {
        assert_ne!(a.content, b.content, "{}", a.filename());
    }
}
