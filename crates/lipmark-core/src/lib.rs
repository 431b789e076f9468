mod block;
mod context;
mod diagnostic;
mod extract;
mod inline;
mod lines;
mod render;
mod restore;
mod util;

pub use block::{BlockKind, BlockTable, Placeholder, SpecialBlock};
pub use context::{DEFAULT_ID_PREFIX, MAX_NESTING, RenderOptions};
pub use diagnostic::{
    Diagnostic, W_BLOCK_DEPTH, W_BLOCK_NO_URL, W_BLOCK_UNTERMINATED, W_IMAGE_PATH,
};
pub use inline::{format_inline, format_inline_with_links, format_multiline};
pub use render::{
    RenderResult, render, render_html, render_html_sanitized, render_html_with_options,
    sanitize_html,
};
pub use util::{PathError, escape_html, sanitize_path, to_roman};
