//! Raw-text preprocessing that runs before any XML parsing.
//!
//! Comments and server-side tag syntax are removed on the raw bytes so that
//! nothing can be smuggled across comment or tag boundaries into the parser.
//! If a removal pass cannot be verified complete, the whole operation fails
//! closed: destroying ambiguous input is always preferred to forwarding it.

use regex::Regex;
use std::sync::OnceLock;

fn xml_comment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"))
}

fn block_comment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"))
}

fn php_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<\?(=|php).*?\?>").expect("valid regex"))
}

fn processing_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<\?.*?\?>").expect("valid regex"))
}

fn asp_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<%.*?%>").expect("valid regex"))
}

/// Removes XML/HTML comment spans and C-style block comments.
///
/// Returns `None` when a comment-open delimiter still occurs after removal
/// (an unterminated or nested construct the regexes could not consume).
pub(crate) fn strip_comments(input: &str) -> Option<String> {
    let out = xml_comment_regex().replace_all(input, "");
    let out = block_comment_regex().replace_all(&out, "");
    if out.contains("<!--") || out.contains("/*") {
        return None;
    }
    Some(out.into_owned())
}

/// Removes `<? ... ?>` and `<% ... %>` spans: PHP short/long tags, ASP tags,
/// and processing-instruction-like syntax (including any XML declaration).
///
/// Returns `None` when an open delimiter survives removal.
pub(crate) fn strip_server_tags(input: &str) -> Option<String> {
    let out = php_tag_regex().replace_all(input, "");
    let out = processing_tag_regex().replace_all(&out, "");
    let out = asp_tag_regex().replace_all(&out, "");
    if out.contains("<?") || out.contains("<%") {
        return None;
    }
    Some(out.into_owned())
}

/// Slices the outermost `<svg ...> ... </svg>` span out of `input`.
///
/// Anything before the first `<svg` or after the last `</svg>` is stray
/// garbage and is discarded. Returns `None` when either boundary is absent
/// or the closing tag precedes the opening one.
pub(crate) fn extract_svg_boundary(input: &str) -> Option<&str> {
    const CLOSE: &str = "</svg>";
    let start = input.find("<svg")?;
    let end = input.rfind(CLOSE)?;
    if end < start {
        return None;
    }
    Some(&input[start..end + CLOSE.len()])
}

/// Cheap sniff for "does this buffer look like an SVG document".
///
/// Only the first 1 KiB is examined. This exists for batch collaborators
/// that pick candidate files before invoking the sanitizer; it performs no
/// validation beyond marker detection.
pub fn looks_like_svg(data: &[u8]) -> bool {
    let check_len = data.len().min(1024);
    let Ok(head) = std::str::from_utf8(&data[..check_len]) else {
        return false;
    };
    let head = head.trim_start();
    head.starts_with("<svg")
        || (head.starts_with("<?xml") && head.contains("<svg"))
        || head.contains("<svg ")
        || head.contains("<svg>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_xml_and_block_comments() {
        let out = strip_comments("<svg><!-- evil --><rect/>/* css */</svg>").unwrap();
        assert_eq!(out, "<svg><rect/></svg>");
    }

    #[test]
    fn comments_spanning_lines_are_removed() {
        let out = strip_comments("<svg><!--\nline1\nline2\n--><g/></svg>").unwrap();
        assert_eq!(out, "<svg><g/></svg>");
    }

    #[test]
    fn unterminated_comment_fails_closed() {
        assert_eq!(strip_comments("<svg><!-- never closed <rect/>"), None);
        assert_eq!(strip_comments("<svg>/* never closed"), None);
    }

    #[test]
    fn cross_construct_smuggling_fails_closed() {
        // The XML-comment pass consumes the `*/`, leaving an unclosable
        // `/*` behind. The residue check refuses to forward the result.
        assert_eq!(strip_comments("/* <!-- */ --><svg/></svg>"), None);
    }

    #[test]
    fn strips_php_and_asp_tags() {
        let out = strip_server_tags("<?php echo 'x'; ?><svg/><% y %>").unwrap();
        assert_eq!(out, "<svg/>");
        let out = strip_server_tags("<?= $x ?><svg/>").unwrap();
        assert_eq!(out, "<svg/>");
    }

    #[test]
    fn strips_xml_declaration() {
        let out = strip_server_tags("<?xml version=\"1.0\" encoding=\"UTF-8\"?><svg/>").unwrap();
        assert_eq!(out, "<svg/>");
    }

    #[test]
    fn unterminated_server_tag_fails_closed() {
        assert_eq!(strip_server_tags("<? echo 'x'; <svg/>"), None);
        assert_eq!(strip_server_tags("<% echo 'x'; <svg/>"), None);
    }

    #[test]
    fn extracts_span_and_discards_garbage() {
        let input = "junk before<svg width=\"1\"><rect/></svg>junk after";
        assert_eq!(
            extract_svg_boundary(input),
            Some("<svg width=\"1\"><rect/></svg>")
        );
    }

    #[test]
    fn boundary_requires_both_tags_in_order() {
        assert_eq!(extract_svg_boundary("<svg><rect/>"), None);
        assert_eq!(extract_svg_boundary("<rect/></svg>"), None);
        assert_eq!(extract_svg_boundary("</svg>junk<svg"), None);
        assert_eq!(extract_svg_boundary("no markup at all"), None);
    }

    #[test]
    fn svg_sniffing_checks_leading_markers() {
        assert!(looks_like_svg(b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>"));
        assert!(looks_like_svg(b"  <?xml version=\"1.0\"?><svg></svg>"));
        assert!(!looks_like_svg(b"<html><body></body></html>"));
        assert!(!looks_like_svg(&[0xff, 0xd8, 0xff, 0xe0]));
    }
}
