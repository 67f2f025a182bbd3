//! In-memory document tree for one sanitization call.
//!
//! The parser is intentionally minimal and hostile-input-first: external
//! entities are never resolved and external DTDs are never fetched (the
//! event reader has no such machinery at all, so this holds at construction
//! time rather than as a runtime branch). Entity references that are not
//! built into XML round-trip as literal text; `&xxe;` in the input is
//! `&xxe;` in the output, never an expansion.

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// Hard limit on element nesting; the sanitize and serialize passes recurse
/// one frame per level, so depth must be bounded before the tree exists.
const MAX_ELEMENT_DEPTH: usize = 512;

/// One node of the parsed tree.
///
/// Text and comment payloads are carried in raw escaped form exactly as
/// they appeared in the input and are emitted verbatim by the serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    DocType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element {
    pub(crate) name: String,
    /// Ordered name/value pairs; values are entity-decoded.
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<Node>,
}

impl Element {
    /// Case-insensitive attribute lookup by qualified name.
    pub(crate) fn attr_ci(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Root container; owns prolog-level nodes plus the document element.
///
/// Lives only for the duration of one sanitization call: created by
/// [`Document::parse`], mutated destructively in place, consumed by
/// [`Document::serialize_root`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Document {
    pub(crate) children: Vec<Node>,
}

impl Document {
    /// Parses `input` into a tree.
    ///
    /// Structural problems (mismatched or unclosed tags, broken attribute
    /// syntax) fail with [`Error::Unparsable`]; the diagnostic is carried
    /// in the error instead of being raised or printed anywhere.
    pub(crate) fn parse(input: &str) -> Result<Self> {
        let mut reader = Reader::from_str(input);
        reader.trim_text(false);

        let mut doc = Self {
            children: Vec::new(),
        };
        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event() {
                Err(e) => {
                    return Err(Error::Unparsable {
                        message: e.to_string(),
                    });
                }
                Ok(Event::Eof) => break,
                Ok(Event::Start(e)) => {
                    if stack.len() == MAX_ELEMENT_DEPTH {
                        return Err(Error::Unparsable {
                            message: format!(
                                "element nesting deeper than {MAX_ELEMENT_DEPTH}"
                            ),
                        });
                    }
                    stack.push(element_from_start(&e)?);
                }
                Ok(Event::Empty(e)) => {
                    let el = element_from_start(&e)?;
                    attach(&mut doc, &mut stack, Node::Element(el));
                }
                Ok(Event::End(_)) => {
                    // check_end_names (on by default) already verified the
                    // name matches the innermost open tag.
                    let el = stack.pop().ok_or_else(|| Error::Unparsable {
                        message: "close tag without a matching open tag".to_string(),
                    })?;
                    attach(&mut doc, &mut stack, Node::Element(el));
                }
                Ok(Event::Text(e)) => {
                    let raw = String::from_utf8_lossy(&e).into_owned();
                    // Whitespace between elements is ignorable.
                    if raw.trim().is_empty() {
                        continue;
                    }
                    attach(&mut doc, &mut stack, Node::Text(raw));
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    let raw = escape(&text).into_owned();
                    attach(&mut doc, &mut stack, Node::Text(raw));
                }
                Ok(Event::Comment(e)) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    attach(&mut doc, &mut stack, Node::Comment(text));
                }
                Ok(Event::DocType(e)) => {
                    // Recorded at document level no matter where it showed
                    // up, so the structural pass can always find it.
                    let text = String::from_utf8_lossy(&e).into_owned();
                    doc.children.push(Node::DocType(text));
                }
                Ok(Event::Decl(_)) | Ok(Event::PI(_)) => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::Unparsable {
                message: "unclosed element at end of input".to_string(),
            });
        }

        Ok(doc)
    }

    /// Detaches every DocumentType node from the document's direct
    /// children. DTD-declared entities go with it, before any expansion
    /// could occur; this holds even if the parser's own entity handling
    /// were ever to change.
    pub(crate) fn strip_doctype(&mut self) {
        self.children.retain(|n| !matches!(n, Node::DocType(_)));
    }

    pub(crate) fn root_element(&self) -> Option<&Element> {
        self.children.iter().find_map(|n| match n {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Renders the document element (not the whole document, so no XML
    /// prolog) back to a string. Empty elements are written as explicit
    /// `<tag></tag>` pairs, never collapsed to self-closing form.
    ///
    /// Returns `None` when no element survived sanitization.
    pub(crate) fn serialize_root(&self) -> Option<String> {
        let root = self.root_element()?;
        let mut out = String::new();
        write_element(&mut out, root);
        Some(out)
    }
}

fn element_from_start(e: &BytesStart) -> Result<Element> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Unparsable {
            message: e.to_string(),
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        // Unknown entity references cannot be decoded; keep them literal.
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        attrs.push((key, value));
    }
    Ok(Element {
        name,
        attrs,
        children: Vec::new(),
    })
}

fn attach(doc: &mut Document, stack: &mut Vec<Element>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => doc.children.push(node),
    }
}

fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(&el.name);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }
    out.push('>');
    for child in &el.children {
        match child {
            Node::Element(inner) => write_element(out, inner),
            Node::Text(raw) => out.push_str(raw),
            Node::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            // Cannot occur below the document level; dropped if it does.
            Node::DocType(_) => {}
        }
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}
