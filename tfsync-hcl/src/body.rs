//! Append-only HCL syntax tree.

use crate::{CodeFragment, Expression, Renderable, Traversal, Value, quote};

/// `name = expression`
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    expr: Expression,
}

impl Attribute {
    pub fn new(name: impl Into<String>, expr: impl Into<Expression>) -> Self {
        Self {
            name: name.into(),
            expr: expr.into(),
        }
    }

    pub fn expr(&self) -> &Expression {
        &self.expr
    }
}

impl Renderable for Attribute {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.expr.attribute_fragments(&self.name)
    }
}

/// `ident "label" ... { body }`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    ident: String,
    labels: Vec<String>,
    body: Body,
}

impl Block {
    pub fn new(ident: impl Into<String>, labels: &[&str]) -> Self {
        Self {
            ident: ident.into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            body: Body::new(),
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn header(&self) -> String {
        let mut header = self.ident.clone();
        for label in &self.labels {
            header.push(' ');
            header.push_str(&quote(label));
        }
        header.push_str(" {");
        header
    }
}

impl Renderable for Block {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::block(self.header(), self.body.to_fragments())]
    }
}

/// One item of a body, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    Attribute(Attribute),
    Block(Block),
    Newline,
    Comment(String),
}

/// The content of a document or a block.
///
/// Items are kept in the order they were appended; setting an attribute
/// that already exists replaces its expression in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    items: Vec<Structure>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block and return its body for further appends.
    pub fn append_block(&mut self, ident: &str, labels: &[&str]) -> &mut Body {
        self.items.push(Structure::Block(Block::new(ident, labels)));
        match self.items.last_mut() {
            Some(Structure::Block(block)) => block.body_mut(),
            _ => unreachable!("a block was just appended"),
        }
    }

    /// Set `name` to a literal value.
    pub fn set_attribute_value(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.set_attribute(name, Expression::Literal(value.into()))
    }

    /// Set `name` to a traversal such as `var.services`.
    pub fn set_attribute_traversal(&mut self, name: &str, traversal: Traversal) -> &mut Self {
        self.set_attribute(name, Expression::Traversal(traversal))
    }

    /// Set `name` to an expression written verbatim.
    pub fn set_attribute_raw(&mut self, name: &str, raw: impl Into<String>) -> &mut Self {
        self.set_attribute(name, Expression::Raw(raw.into()))
    }

    pub fn set_attribute(&mut self, name: &str, expr: Expression) -> &mut Self {
        let existing = self.items.iter_mut().find_map(|item| match item {
            Structure::Attribute(attr) if attr.name == name => Some(attr),
            _ => None,
        });
        if let Some(attr) = existing {
            attr.expr = expr;
        } else {
            self.items
                .push(Structure::Attribute(Attribute::new(name, expr)));
        }
        self
    }

    pub fn append_newline(&mut self) -> &mut Self {
        self.items.push(Structure::Newline);
        self
    }

    pub fn append_comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.items.push(Structure::Comment(text.into()));
        self
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.items.iter().filter_map(|item| match item {
            Structure::Attribute(attr) => Some(attr),
            _ => None,
        })
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes().find(|attr| attr.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Renderable for Body {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        for item in &self.items {
            match item {
                Structure::Attribute(attr) => fragments.extend(attr.to_fragments()),
                Structure::Block(block) => fragments.extend(block.to_fragments()),
                Structure::Newline => fragments.push(CodeFragment::Blank),
                Structure::Comment(text) => fragments.push(CodeFragment::comment(text.clone())),
            }
        }
        fragments
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::CodeBuilder;

    fn render(body: &Body) -> String {
        let mut builder = CodeBuilder::hcl();
        builder.emit(body);
        builder.build()
    }

    #[test]
    fn test_nested_blocks() {
        let mut body = Body::new();
        let provider = body.append_block("provider", &["consul"]);
        provider.set_attribute_traversal("address", Traversal::variable(["consul", "address"]));
        provider
            .append_block("auth", &[])
            .set_attribute_traversal("user", Traversal::variable(["consul", "auth", "user"]));

        assert_eq!(
            render(&body),
            "provider \"consul\" {\n  address = var.consul.address\n  auth {\n    user = var.consul.auth.user\n  }\n}\n"
        );
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut body = Body::new();
        body.set_attribute_value("a", 1)
            .set_attribute_value("b", 2)
            .set_attribute_value("a", "one");

        assert_eq!(body.attributes().count(), 2);
        assert_eq!(
            body.get_attribute("a").map(|a| a.expr()),
            Some(&Expression::Literal(json!("one")))
        );
        assert_eq!(render(&body), "a = \"one\"\nb = 2\n");
    }

    #[test]
    fn test_newline_and_comment() {
        let mut body = Body::new();
        body.append_comment("user description")
            .append_block("module", &["web"])
            .set_attribute_value("source", "org/web/aws");
        body.append_newline();

        assert_eq!(
            render(&body),
            "# user description\nmodule \"web\" {\n  source = \"org/web/aws\"\n}\n\n"
        );
    }

    #[test]
    fn test_empty_block() {
        let mut body = Body::new();
        body.append_block("terraform", &[]);
        assert_eq!(render(&body), "terraform {\n}\n");
    }
}
