pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy for one sanitization call.
///
/// Every variant means "no output was produced". Stripping elements or
/// attributes is the intended sanitizing effect and is never an error; a
/// successful call can legitimately return a document that was sanitized
/// down to a bare `<svg></svg>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input contains no `<svg ...> ... </svg>` span to extract.
    #[error("no <svg>...</svg> boundary found in input")]
    MissingSvgBoundary,

    /// Comment or processing-instruction delimiters survived preprocessing.
    ///
    /// This is the fail-closed path: ambiguous content is destroyed rather
    /// than forwarded downstream.
    #[error("comment or script delimiters could not be stripped from input")]
    UnstrippableMarkup,

    /// The extracted span could not be parsed into a document tree.
    #[error("SVG markup could not be parsed: {message}")]
    Unparsable { message: String },
}
