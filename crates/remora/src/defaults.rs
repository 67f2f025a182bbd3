//! Default allow-list tables.
//!
//! All names are lowercase; tag and attribute names are lowercased before
//! membership checks, so `clipPath` is covered by `clippath` and
//! `viewBox` by `viewbox`.

/// Element tags permitted by default.
pub const DEFAULT_ALLOWED_ELEMENTS: &[&str] = &[
    "a",
    "circle",
    "clippath",
    "defs",
    "style",
    "desc",
    "ellipse",
    "fegaussianblur",
    "filter",
    "foreignobject",
    "g",
    "image",
    "line",
    "lineargradient",
    "marker",
    "mask",
    "metadata",
    "path",
    "pattern",
    "polygon",
    "polyline",
    "radialgradient",
    "rect",
    "stop",
    "svg",
    "switch",
    "symbol",
    "text",
    "textpath",
    "title",
    "tspan",
    "use",
];

/// Attribute names permitted by default.
///
/// `aria-*` and `data-*` attributes are always accepted in addition to this
/// table (accessibility and custom-data conventions).
pub const DEFAULT_ALLOWED_ATTRIBUTES: &[&str] = &[
    "class",
    "clip-path",
    "clip-rule",
    "fill",
    "fill-opacity",
    "fill-rule",
    "filter",
    "mask",
    "opacity",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "style",
    "systemlanguage",
    "transform",
    "href",
    "xlink:href",
    "xlink:title",
    "cx",
    "cy",
    "r",
    "requiredfeatures",
    "clippathunits",
    "type",
    "rx",
    "ry",
    "color-interpolation-filters",
    "stddeviation",
    "filterres",
    "filterunits",
    "height",
    "primitiveunits",
    "width",
    "x",
    "y",
    "font-size",
    "display",
    "font-family",
    "font-style",
    "font-weight",
    "text-anchor",
    "marker-end",
    "marker-mid",
    "marker-start",
    "x1",
    "x2",
    "y1",
    "y2",
    "gradienttransform",
    "gradientunits",
    "spreadmethod",
    "markerheight",
    "markerunits",
    "markerwidth",
    "orient",
    "preserveaspectratio",
    "refx",
    "refy",
    "viewbox",
    "maskcontentunits",
    "maskunits",
    "d",
    "patterncontentunits",
    "patterntransform",
    "patternunits",
    "points",
    "fx",
    "fy",
    "offset",
    "stop-color",
    "stop-opacity",
    "xmlns",
    "xmlns:se",
    "xmlns:xlink",
    "xml:space",
    "method",
    "spacing",
    "startoffset",
    "dx",
    "dy",
    "rotate",
    "textlength",
];

/// Inline-image data-URI prefixes a surviving `xlink:href` may start with.
///
/// Each entry is exactly 14 bytes; the original check compared the first 14
/// characters of the value against this table.
pub const ALLOWED_IMAGE_DATA_URI_PREFIXES: &[&str] = &[
    "data:image/png",
    "data:image/gif",
    "data:image/jpg",
    "data:image/jpe",
    "data:image/pjp",
];
