#![forbid(unsafe_code)]

//! Defensive SVG sanitizer (headless; no I/O).
//!
//! `remora` takes arbitrary, potentially hostile SVG markup and produces
//! markup that is safe to redistribute: script payloads, remote references,
//! XML-entity attack vectors, and unapproved vocabulary are stripped.
//!
//! One call runs a single synchronous pipeline:
//!
//! 1. strip comments and embedded server-tag syntax from the raw text
//! 2. extract the outermost `<svg ...> ... </svg>` span
//! 3. parse into a tree (external entities are never resolved)
//! 4. detach document-type declarations (XXE defense in depth)
//! 5. detach elements whose tag is not allow-listed
//! 6. remove attributes not allow-listed or with threat-matching values
//! 7. validate `xlink:href` references and `<use>` targets
//! 8. serialize the document element back to a string (no prolog)
//!
//! The sanitizer accepts a string and returns a string or a failure value;
//! it performs no I/O and keeps no state across calls. Surrounding batch
//! loops (file discovery, persistence) are the caller's business and may
//! parallelize freely: a [`Sanitizer`] is read-only after construction.
//!
//! ```
//! let sanitizer = remora::Sanitizer::new();
//! let out = sanitizer
//!     .sanitize(r#"<svg><script>alert(1)</script><rect width="1"/></svg>"#)
//!     .unwrap();
//! assert_eq!(out, r#"<svg><rect width="1"></rect></svg>"#);
//! ```

pub mod config;
pub mod defaults;
mod dom;
pub mod error;
mod preprocess;
mod sanitize;

pub use config::AllowLists;
pub use error::{Error, Result};
pub use preprocess::looks_like_svg;
pub use sanitize::Sanitizer;

/// Sanitizes `input` with the default allow-lists.
///
/// Convenience wrapper over [`Sanitizer::new`] + [`Sanitizer::sanitize`];
/// batch callers should construct one [`Sanitizer`] and reuse it.
///
/// # Errors
///
/// See [`Sanitizer::sanitize`].
pub fn sanitize(input: &str) -> Result<String> {
    Sanitizer::new().sanitize(input)
}
