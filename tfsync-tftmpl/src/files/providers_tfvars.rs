use std::io::{self, Write};

use tfsync_hcl::Document;

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
    for (i, provider) in input.providers.iter().enumerate() {
        if i > 0 {
            body.append_newline();
        }
        body.set_attribute_value(&provider.name, provider.arguments_object());
    }

    w.write_all(&doc.to_bytes())
}
