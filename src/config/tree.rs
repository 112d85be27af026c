//! Parsed configuration tree.
//!
//! Every node built by [`ConfigParser`](super::ConfigParser) carries the range
//! it was parsed from. Nodes built by hand have none.

use std::fmt::{ Display, Formatter };
use std::fmt;

use serde::{ Deserialize, Serialize };

use crate::locus::{ Located, Range };

/// What kind of token a scalar was written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    /// A bare word, e.g. `localhost` or `/var/mail`.
    Word,
    /// A double-quoted string; the text is unescaped.
    String,
    /// A decimal number, kept as written.
    Number,
}

/// A single value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scalar {
    pub kind: ScalarKind,
    pub text: String,
    pub locus: Option<Range>,
}

impl Scalar {
    pub fn new(kind: ScalarKind, text: impl Into<String>) -> Self {
        Scalar { kind, text: text.into(), locus: None }
    }

    /// The value as an integer, if it was written as one.
    pub fn as_i64(&self) -> Option<i64> {
        match self.kind {
            ScalarKind::Number => self.text.parse().ok(),
            _ => None,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.kind {
            ScalarKind::String => write!(f, "{:?}", self.text),
            _ => f.write_str(&self.text),
        }
    }
}

/// The right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Scalar(Scalar),
    /// `[a, b, c]`; `locus` spans the brackets.
    List { items: Vec<Scalar>, locus: Option<Range> },
}

impl Value {
    /// Text of a scalar value; `None` for lists.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(&s.text),
            Value::List { .. } => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Value::Scalar(_) => None,
            Value::List { items, .. } => Some(items),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Scalar(s) => s.fmt(f),
            Value::List { items, .. } => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// `name = value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assign {
    pub name: String,
    pub value: Value,
    /// From the first character of the name to the last of the value; the
    /// terminator is not included.
    pub locus: Option<Range>,
}

/// `name [label] { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    pub label: Option<Scalar>,
    pub nodes: Vec<Node>,
    /// From the name to the closing brace.
    pub locus: Option<Range>,
    /// The statements between the braces. For an empty body this is a
    /// zero-width range at the opening brace.
    pub body_locus: Option<Range>,
}

impl Block {
    /// Looks up a direct child by name.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Assign(Assign),
    Block(Block),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Assign(a) => &a.name,
            Node::Block(b) => &b.name,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Node::Assign(a) => Some(&a.value),
            Node::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Node::Assign(_) => None,
            Node::Block(b) => Some(b),
        }
    }
}

/// A parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub nodes: Vec<Node>,
}

impl Config {
    /// Finds a node by dotted path, e.g. `"server.tls.cert"`.
    ///
    /// Each component names a block except the last, which may name either.
    /// The first match wins at every level.
    pub fn get(&self, path: &str) -> Option<&Node> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut node = self.nodes.iter().find(|n| n.name() == first)?;
        for part in parts {
            node = node.as_block()?.get(part)?;
        }
        Some(node)
    }

    /// Shorthand for the value of the assignment at `path`.
    pub fn value(&self, path: &str) -> Option<&Value> {
        self.get(path)?.value()
    }
}

impl Located for Scalar {
    fn locus(&self) -> Option<&Range> {
        self.locus.as_ref()
    }
}

impl Located for Value {
    fn locus(&self) -> Option<&Range> {
        match self {
            Value::Scalar(s) => s.locus(),
            Value::List { locus, .. } => locus.as_ref(),
        }
    }
}

impl Located for Assign {
    fn locus(&self) -> Option<&Range> {
        self.locus.as_ref()
    }
}

impl Located for Block {
    fn locus(&self) -> Option<&Range> {
        self.locus.as_ref()
    }
}

impl Located for Node {
    fn locus(&self) -> Option<&Range> {
        match self {
            Node::Assign(a) => a.locus(),
            Node::Block(b) => b.locus(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assign(name: &str, text: &str) -> Node {
        Node::Assign(Assign {
            name: name.to_string(),
            value: Value::Scalar(Scalar::new(ScalarKind::Word, text)),
            locus: None,
        })
    }

    #[test]
    fn dotted_lookup() {
        let config = Config {
            nodes: vec![
                assign("user", "root"),
                Node::Block(Block {
                    name: "server".to_string(),
                    label: None,
                    nodes: vec![assign("port", "25")],
                    locus: None,
                    body_locus: None,
                }),
            ],
        };
        assert_eq!(config.value("user").and_then(Value::as_str), Some("root"));
        assert_eq!(config.value("server.port").and_then(Value::as_str), Some("25"));
        assert!(config.get("server.missing").is_none());
        assert!(config.get("user.port").is_none());
        assert!(config.value("server").is_none());
    }

    #[test]
    fn hand_built_nodes_have_no_locus() {
        assert!(assign("a", "b").locus().is_none());
    }

    #[test]
    fn value_display() {
        let v = Value::List {
            items: vec![Scalar::new(ScalarKind::Word, "a"), Scalar::new(ScalarKind::String, "b c")],
            locus: None,
        };
        assert_eq!(v.to_string(), "[a, \"b c\"]");
    }
}
