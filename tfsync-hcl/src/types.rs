//! Type constraints for variable declarations.

use std::fmt;

use crate::{Value, is_identifier, quote};

/// A Terraform type constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    String,
    Number,
    Bool,
    Any,
    List(Box<TypeExpr>),
    Tuple(Vec<TypeExpr>),
    /// Attributes in ascending name order.
    Object(Vec<(String, TypeExpr)>),
}

impl TypeExpr {
    /// Infer the type constraint of a value.
    ///
    /// Lists whose elements share one type become `list(T)`, mixed lists
    /// become tuples, `null` carries no information and becomes `any`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => TypeExpr::Any,
            Value::Bool(_) => TypeExpr::Bool,
            Value::Number(_) => TypeExpr::Number,
            Value::String(_) => TypeExpr::String,
            Value::Array(items) => {
                let types: Vec<TypeExpr> = items.iter().map(Self::of).collect();
                match types.first() {
                    None => TypeExpr::List(Box::new(TypeExpr::Any)),
                    Some(first) if types.iter().all(|t| t == first) => {
                        TypeExpr::List(Box::new(first.clone()))
                    }
                    Some(_) => TypeExpr::Tuple(types),
                }
            }
            Value::Object(map) => {
                let mut fields: Vec<(String, TypeExpr)> =
                    map.iter().map(|(k, v)| (k.clone(), Self::of(v))).collect();
                fields.sort_by(|a, b| a.0.cmp(&b.0));
                TypeExpr::Object(fields)
            }
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::String => f.write_str("string"),
            TypeExpr::Number => f.write_str("number"),
            TypeExpr::Bool => f.write_str("bool"),
            TypeExpr::Any => f.write_str("any"),
            TypeExpr::List(t) => write!(f, "list({})", t),
            TypeExpr::Tuple(types) => {
                let types: Vec<String> = types.iter().map(ToString::to_string).collect();
                write!(f, "tuple([{}])", types.join(", "))
            }
            TypeExpr::Object(fields) if fields.is_empty() => f.write_str("object({})"),
            TypeExpr::Object(fields) => {
                writeln!(f, "object({{")?;
                for (name, t) in fields {
                    if is_identifier(name) {
                        writeln!(f, "{} = {}", name, t)?;
                    } else {
                        writeln!(f, "{} = {}", quote(name), t)?;
                    }
                }
                f.write_str("})")
            }
        }
    }
}
