use std::fmt;

use crate::{Body, CodeBuilder, Renderable, format};

/// A whole HCL file under construction.
///
/// # Example
///
/// ```
/// use tfsync_hcl::{Document, Traversal};
///
/// let mut doc = Document::new();
/// let module = doc.body_mut().append_block("module", &["web"]);
/// module.set_attribute_value("source", "org/web/aws");
/// module.set_attribute_traversal("services", Traversal::variable(["services"]));
///
/// assert_eq!(
///     doc.to_string(),
///     "module \"web\" {\n  source   = \"org/web/aws\"\n  services = var.services\n}\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    body: Body,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Canonically formatted bytes of the document.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = CodeBuilder::hcl();
        builder.emit(&self.body);
        f.write_str(&format(&builder.build()))
    }
}
