pub const W_BLOCK_UNTERMINATED: &str = "W_BLOCK_UNTERMINATED";
pub const W_BLOCK_NO_URL: &str = "W_BLOCK_NO_URL";
pub const W_IMAGE_PATH: &str = "W_IMAGE_PATH";
pub const W_BLOCK_DEPTH: &str = "W_BLOCK_DEPTH";

/// An authoring problem noticed while rendering.
///
/// Diagnostics never change the rendered output; the renderer always degrades
/// to literal or partial markup and reports what it did here.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
