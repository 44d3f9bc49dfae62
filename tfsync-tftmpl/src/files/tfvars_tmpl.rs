//! `terraform.tfvars.tmpl` is not HCL until the template engine has filled
//! in the service instances, so it is assembled as text.

use std::io::{self, Write};

use super::write_preamble;
use crate::{RootModuleInputData, Service, task::template_string};

pub(super) fn render(
    w: &mut dyn Write,
    filename: &str,
    input: &RootModuleInputData,
) -> io::Result<()> {
    write_preamble(w, &input.task, filename);
    w.write_all(services_template(&input.services).as_bytes())
}

fn services_template(services: &[Service]) -> String {
    let mut out = String::from("\nservices = {\n");
    for service in services {
        out.push_str(&service_template(service));
    }
    out.push_str("}\n");
    out
}

fn service_template(service: &Service) -> String {
    format!(
        r#"{{{{- with $srv := service {query} }}}}
  {{{{- range $s := $srv}}}}
  "{{{{ joinStrings "." .ID .Node .Namespace .NodeDatacenter }}}}" = {{
{{{{ {instance} | indent 4 }}}}
  }},
  {{{{- end}}}}
{{{{- end}}}}
"#,
        query = service.query(),
        instance = instance_call(service),
    )
}

/// Template call rendering one instance, with the service's user metadata
/// attached when there is any.
fn instance_call(service: &Service) -> String {
    if service.cts_user_defined_meta.is_empty() {
        return "HCLService $s".to_string();
    }

    let pairs: Vec<String> = service
        .cts_user_defined_meta
        .iter()
        .map(|(k, v)| format!("{} {}", template_string(k), template_string(v)))
        .collect();
    format!("HCLServiceMeta $s (dict {})", pairs.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_services() {
        assert_eq!(services_template(&[]), "\nservices = {\n}\n");
    }

    #[test]
    fn test_service_template() {
        let service = Service {
            datacenter: Some("dc1".into()),
            ..Service::new("api")
        };

        insta::assert_snapshot!(service_template(&service), @r#"
        {{- with $srv := service "api" "dc=dc1" }}
          {{- range $s := $srv}}
          "{{ joinStrings "." .ID .Node .Namespace .NodeDatacenter }}" = {
        {{ HCLService $s | indent 4 }}
          },
          {{- end}}
        {{- end}}
        "#);
    }

    #[test]
    fn test_user_defined_meta() {
        let mut service = Service::new("web");
        service
            .cts_user_defined_meta
            .insert("team".into(), "edge".into());
        service
            .cts_user_defined_meta
            .insert("env".into(), "prod".into());

        assert_eq!(
            instance_call(&service),
            r#"HCLServiceMeta $s (dict "env" "prod" "team" "edge")"#
        );
    }
}
