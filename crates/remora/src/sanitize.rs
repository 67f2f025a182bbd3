//! The sanitization pipeline: element filter, attribute filter, and
//! cross-reference validation over the parsed tree.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

use crate::config::AllowLists;
use crate::defaults;
use crate::dom::{Document, Element, Node};
use crate::error::{Error, Result};
use crate::preprocess;

fn url_wrapper_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)^url\(\s*['"]?\s*(.*?)\s*['"]?\s*\)$"#).expect("valid regex"))
}

fn remote_reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(?:(?:https?|ftp|file):)?//").expect("valid regex"))
}

fn script_value_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)base64|data|(?:java)?script|alert\(|window\.|document").expect("valid regex")
    })
}

fn scheme_threat_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?:\w+script|data):").expect("valid regex"))
}

fn printable_ascii(value: &str) -> String {
    value.chars().filter(|c| (' '..='~').contains(c)).collect()
}

/// Remote-reference heuristic: `url(...)` wrapping a value with an explicit
/// remote scheme (`http:`, `https:`, `ftp:`, `file:`) or a protocol-relative
/// `//...` target. Non-printable characters are stripped first so they
/// cannot be used to split the scheme.
pub(crate) fn is_remote_value(value: &str) -> bool {
    let cleaned = printable_ascii(value);
    let cleaned = cleaned.trim();
    let Some(caps) = url_wrapper_regex().captures(cleaned) else {
        return false;
    };
    let inner = caps
        .get(1)
        .map(|m| m.as_str())
        .unwrap_or_default()
        .trim_matches(|c| c == '\'' || c == '"');
    remote_reference_regex().is_match(inner)
}

/// Script heuristic: substring match on `base64`, `data`, `script` (which
/// also catches `javascript`/`jscript`), `alert(`, `window.`, `document`.
///
/// Deliberately broad. Legitimate values containing e.g. the word
/// "document" are removed too; false positives are preferred over false
/// negatives here.
pub(crate) fn has_script_value(value: &str) -> bool {
    script_value_regex().is_match(value)
}

/// Threat test for reference attributes: a `<scheme>script:` or `data:`
/// scheme anywhere in the value, or a value pointing at a remote target
/// (explicit scheme or protocol-relative).
fn reference_is_threat(value: &str) -> bool {
    scheme_threat_regex().is_match(value) || remote_reference_regex().is_match(value.trim())
}

fn is_image_data_uri(value: &str) -> bool {
    defaults::ALLOWED_IMAGE_DATA_URI_PREFIXES
        .iter()
        .any(|prefix| value.starts_with(prefix))
}

/// Allow-list driven SVG sanitizer.
///
/// Construction computes the allow-lists once; the value is immutable
/// afterwards and safe to share across threads. Each call to
/// [`Sanitizer::sanitize`] owns its document tree exclusively and keeps no
/// state across invocations, so one sanitizer can serve a parallel batch
/// loop without synchronization.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    allow: AllowLists,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    /// Sanitizer with the default element and attribute allow-lists.
    pub fn new() -> Self {
        Self {
            allow: AllowLists::default(),
        }
    }

    /// Sanitizer with caller-built allow-lists.
    pub fn with_allow_lists(allow: AllowLists) -> Self {
        Self { allow }
    }

    /// Replaces the element allow-list. The closure receives the current
    /// list and returns the list to enforce; the sanitizer applies whatever
    /// it is given. Names are re-lowercased on the way in.
    pub fn map_allowed_elements<F>(mut self, f: F) -> Self
    where
        F: FnOnce(HashSet<String>) -> HashSet<String>,
    {
        self.allow.elements = f(self.allow.elements)
            .into_iter()
            .map(|n| n.to_ascii_lowercase())
            .collect();
        self
    }

    /// Replaces the attribute allow-list; same contract as
    /// [`Sanitizer::map_allowed_elements`].
    pub fn map_allowed_attributes<F>(mut self, f: F) -> Self
    where
        F: FnOnce(HashSet<String>) -> HashSet<String>,
    {
        self.allow.attributes = f(self.allow.attributes)
            .into_iter()
            .map(|n| n.to_ascii_lowercase())
            .collect();
        self
    }

    /// Read access to the enforced allow-lists.
    pub fn allow_lists(&self) -> &AllowLists {
        &self.allow
    }

    /// Runs the full pipeline over one candidate SVG body.
    ///
    /// # Errors
    ///
    /// - [`Error::UnstrippableMarkup`]: comment or server-tag delimiters
    ///   survived preprocessing (fail closed, nothing is forwarded).
    /// - [`Error::MissingSvgBoundary`]: no `<svg ...> ... </svg>` span.
    /// - [`Error::Unparsable`]: the extracted span is not well-formed.
    ///
    /// Hostile-but-parsable content is not an error: offending elements
    /// and attributes are stripped and the call succeeds.
    pub fn sanitize(&self, input: &str) -> Result<String> {
        let stripped = preprocess::strip_comments(input).ok_or(Error::UnstrippableMarkup)?;
        let stripped =
            preprocess::strip_server_tags(&stripped).ok_or(Error::UnstrippableMarkup)?;
        let span =
            preprocess::extract_svg_boundary(&stripped).ok_or(Error::MissingSvgBoundary)?;

        let mut doc = Document::parse(span)?;
        doc.strip_doctype();
        self.sanitize_nodes(&mut doc.children);

        // An empty string here means the document element itself was not
        // allow-listed; still a successful (fully sanitized) outcome,
        // distinguishable from every failure above.
        Ok(doc.serialize_root().unwrap_or_default())
    }

    /// Walks a sibling list in reverse index order over its original range,
    /// so removals never perturb positions that have not been visited yet.
    fn sanitize_nodes(&self, nodes: &mut Vec<Node>) {
        for index in (0..nodes.len()).rev() {
            let Node::Element(el) = &mut nodes[index] else {
                continue;
            };

            let lc_tag = el.name.to_ascii_lowercase();
            if !self.allow.elements.contains(&lc_tag) {
                debug!(tag = %el.name, "detaching element not in allow-list");
                nodes.remove(index);
                continue;
            }

            self.sanitize_nodes(&mut el.children);
            self.filter_attributes(el);

            // <use> is the one tag where a disallowed reference removes the
            // whole node: a non-local target is remote content inclusion.
            if lc_tag == "use" {
                if !use_reference_is_local(el) {
                    debug!("detaching <use> with non-fragment reference");
                    nodes.remove(index);
                }
            } else {
                strip_untrusted_xlink(el);
            }
        }
    }

    /// Attribute filter, reverse index order for the same reason as the
    /// element walk.
    fn filter_attributes(&self, el: &mut Element) {
        for index in (0..el.attrs.len()).rev() {
            let (name, value) = &el.attrs[index];
            let lc_name = name.to_ascii_lowercase();

            if !self.allow.attributes.contains(&lc_name)
                && !lc_name.starts_with("aria-")
                && !lc_name.starts_with("data-")
            {
                debug!(tag = %el.name, attr = %name, "removing attribute not in allow-list");
                el.attrs.remove(index);
                continue;
            }

            if !value.is_empty() && (is_remote_value(value) || has_script_value(value)) {
                debug!(tag = %el.name, attr = %name, "removing attribute with threat-matching value");
                el.attrs.remove(index);
            }
        }
    }
}

/// Removes an `xlink:href` whose value looks like script, data, or remote
/// content, unless it carries one of the approved inline-image data-URI
/// prefixes.
fn strip_untrusted_xlink(el: &mut Element) {
    let Some(value) = el.attr_ci("xlink:href") else {
        return;
    };
    if value.is_empty() || !reference_is_threat(value) {
        return;
    }
    if is_image_data_uri(value) {
        return;
    }
    debug!(tag = %el.name, "removing untrusted xlink:href");
    el.attrs.retain(|(k, _)| !k.eq_ignore_ascii_case("xlink:href"));
}

/// A `<use>` reference (`xlink:href` or plain `href`) must be a same-document
/// fragment. Absent or empty references pass; anything else must start
/// with `#`.
fn use_reference_is_local(el: &Element) -> bool {
    let reference = el.attr_ci("xlink:href").or_else(|| el.attr_ci("href"));
    match reference {
        None => true,
        Some(v) if v.is_empty() => true,
        Some(v) => v.starts_with('#'),
    }
}
