use std::io::{self, Write};

use tfsync_hcl::{Document, TypeExpr};

use super::write_preamble;
use crate::RootModuleInputData;

pub(super) fn render(
    w: &mut dyn Write,
    filename: &str,
    input: &RootModuleInputData,
) -> io::Result<()> {
    write_preamble(w, &input.task, filename);

    let mut doc = Document::new();
    let body = doc.body_mut();
    body.append_newline();
    for (i, (name, value)) in input.variables.iter().enumerate() {
        if i > 0 {
            body.append_newline();
        }
        let variable = body.append_block("variable", &[name.as_str()]);
        variable.set_attribute_value("default", value.clone());
        variable.set_attribute_raw("type", TypeExpr::of(value).to_string());
    }

    w.write_all(&doc.to_bytes())
}
