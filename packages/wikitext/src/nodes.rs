//! Node model for parsed wikitext documents.
//!
//! A [`Document`] is a flat, ordered sequence of [`MarkupNode`]s. Nested
//! markup inside template parameters is kept as raw text and re-parsed on
//! demand rather than expanded into child nodes.

use std::fmt;

// ---------------------------------------------------------------------------
// Param
// ---------------------------------------------------------------------------

/// One template parameter.
///
/// Positional parameters are keyed `"1"`, `"2"`, ... in order of appearance
/// among positional parameters; named parameters carry their explicit key.
/// Values are stored raw, exactly as they appeared between delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    value: String,
    named: bool,
}

impl Param {
    /// Parameter key within the template's unified key space.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw parameter value (untrimmed).
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the key was written explicitly (`key=value`).
    pub fn is_named(&self) -> bool {
        self.named
    }
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// A named, parameter-bearing markup construct (`{{name|...}}`).
///
/// Parameters live in one ordered list over a single key space. Setting a
/// key that already exists replaces the earlier value in place, so the last
/// occurrence wins while the original position is kept.
#[derive(Debug, Clone, Default, Eq)]
pub struct Template {
    name: String,
    params: Vec<Param>,
    // Positional params seen so far; drives "1", "2", ... numbering even
    // after a positional slot was overwritten by an explicit key.
    positional_count: usize,
}

impl Template {
    /// Create an empty template with the given (trimmed) name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            positional_count: 0,
        }
    }

    /// Template name, trimmed of surrounding whitespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a named parameter. Replaces the value in place if the key
    /// already exists (explicitly named or positional).
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.params.iter_mut().find(|p| p.name == key) {
            existing.value = value;
        } else {
            self.params.push(Param {
                name: key,
                value,
                named: true,
            });
        }
    }

    /// Append a positional parameter, keyed by its 1-based position among
    /// positional parameters.
    pub fn push_positional(&mut self, value: impl Into<String>) {
        self.positional_count += 1;
        let key = self.positional_count.to_string();
        let value = value.into();
        if let Some(existing) = self.params.iter_mut().find(|p| p.name == key) {
            existing.value = value;
        } else {
            self.params.push(Param {
                name: key,
                value,
                named: false,
            });
        }
    }

    /// Raw value for the given key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name == key)
            .map(|p| p.value.as_str())
    }

    /// Raw value of the nth positional parameter (1-based).
    pub fn get_positional(&self, n: usize) -> Option<&str> {
        self.get(&n.to_string())
    }

    /// Whether a parameter with the given key exists.
    pub fn has(&self, key: &str) -> bool {
        self.params.iter().any(|p| p.name == key)
    }

    /// All parameters in insertion order.
    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }
}

// Equality ignores the positional counter: two templates with the same
// name and parameter list are the same template.
impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.params == other.params
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{}", self.name)?;
        for param in &self.params {
            if param.named {
                write!(f, "|{}={}", param.name, param.value)?;
            } else {
                write!(f, "|{}", param.value)?;
            }
        }
        write!(f, "}}}}")
    }
}

// ---------------------------------------------------------------------------
// MarkupNode
// ---------------------------------------------------------------------------

/// One top-level node of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    /// A section header. The title may be empty (`== ==`).
    Heading { level: usize, title: String },
    /// A template with its parameters.
    Template(Template),
    /// Literal text and whitespace between structured constructs.
    Text { content: String },
}

impl fmt::Display for MarkupNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heading { level, title } => {
                let markers = "=".repeat(*level);
                if title.is_empty() {
                    write!(f, "{markers}  {markers}")
                } else {
                    write!(f, "{markers} {title} {markers}")
                }
            }
            Self::Template(template) => write!(f, "{template}"),
            Self::Text { content } => f.write_str(content),
        }
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// An ordered sequence of top-level markup nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<MarkupNode>,
}

impl Document {
    /// Create a document from a node list.
    pub fn new(nodes: Vec<MarkupNode>) -> Self {
        Self { nodes }
    }

    /// All top-level nodes in document order.
    pub fn nodes(&self) -> &[MarkupNode] {
        &self.nodes
    }

    /// Top-level templates in document order.
    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.nodes.iter().filter_map(|node| match node {
            MarkupNode::Template(template) => Some(template),
            _ => None,
        })
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_positional_numbering() {
        let mut tpl = Template::new("birth date");
        tpl.push_positional("1990");
        tpl.push_positional("5");
        tpl.push_positional("4");

        assert_eq!(tpl.get_positional(1), Some("1990"));
        assert_eq!(tpl.get_positional(2), Some("5"));
        assert_eq!(tpl.get_positional(3), Some("4"));
        assert_eq!(tpl.get("2"), Some("5"));
        assert!(tpl.get_positional(4).is_none());
    }

    #[test]
    fn template_duplicate_key_last_wins() {
        let mut tpl = Template::new("x");
        tpl.set("name", "first");
        tpl.set("name", "second");

        assert_eq!(tpl.get("name"), Some("second"));
        assert_eq!(tpl.params().count(), 1);
    }

    #[test]
    fn template_explicit_key_overrides_positional_slot() {
        let mut tpl = Template::new("x");
        tpl.push_positional("a");
        tpl.set("1", "b");

        assert_eq!(tpl.get("1"), Some("b"));
        assert_eq!(tpl.params().count(), 1);
    }

    #[test]
    fn template_render() {
        let mut tpl = Template::new("Infobox person");
        tpl.set("name", "Jane Roe");
        tpl.push_positional("extra");

        assert_eq!(tpl.to_string(), "{{Infobox person|name=Jane Roe|extra}}");
    }

    #[test]
    fn heading_render() {
        let node = MarkupNode::Heading {
            level: 2,
            title: "Argentina".into(),
        };
        assert_eq!(node.to_string(), "== Argentina ==");

        let empty = MarkupNode::Heading {
            level: 3,
            title: String::new(),
        };
        assert_eq!(empty.to_string(), "===  ===");
    }

    #[test]
    fn document_templates_iterator() {
        let doc = Document::new(vec![
            MarkupNode::Text {
                content: "intro".into(),
            },
            MarkupNode::Template(Template::new("first")),
            MarkupNode::Heading {
                level: 2,
                title: "S".into(),
            },
            MarkupNode::Template(Template::new("second")),
        ]);

        let names: Vec<&str> = doc.templates().map(Template::name).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(doc.len(), 4);
        assert!(!doc.is_empty());
    }
}
