use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("path traversal attempt detected in `{0}`")]
    Traversal(String),
}

/// Escapes an untrusted display string (player names, statuses) for use as
/// HTML text. Rendered markup is trusted and never goes through this.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Validates a content path relative to the site root.
///
/// Rejects `..` and `//`, then collapses repeated slashes and strips leading
/// and trailing ones.
pub fn sanitize_path(path: &str) -> Result<String, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    if path.contains("..") || path.contains("//") {
        return Err(PathError::Traversal(path.to_string()));
    }
    let segments: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();
    Ok(segments.join("/"))
}

const ROMAN: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Roman numeral used for act numbers in titles; `0` has none.
pub fn to_roman(number: u32) -> String {
    let mut out = String::new();
    let mut remaining = number;
    for (value, numeral) in ROMAN {
        while remaining >= value {
            out.push_str(numeral);
            remaining -= value;
        }
    }
    out
}
