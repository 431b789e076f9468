use crate::context::{ParseContext, RenderOptions};
use crate::diagnostic::Diagnostic;
use crate::inline::format_inline;
use crate::lines::render_blocks;
use ammonia::Builder;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};

static SPOILER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|\|(.+?)\|\|").expect("valid spoiler pattern"));

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderResult {
    pub html: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Renders markup to trusted, un-sanitized HTML with default options.
pub fn render_html(source: &str) -> String {
    render(source, &RenderOptions::default()).html
}

pub fn render_html_with_options(source: &str, options: &RenderOptions) -> String {
    render(source, options).html
}

/// Renders markup and returns the authoring diagnostics collected on the way.
///
/// Never fails: malformed markup degrades to literal or partial output.
pub fn render(source: &str, options: &RenderOptions) -> RenderResult {
    if source.is_empty() {
        return RenderResult {
            html: String::new(),
            diagnostics: Vec::new(),
        };
    }

    let mut ctx = ParseContext::new(options);
    let html = render_blocks(source, &mut ctx);
    // Spoilers go last so their delimiters wrap already formatted content.
    let html = apply_spoilers(&html);

    RenderResult {
        html,
        diagnostics: ctx.diagnostics,
    }
}

fn apply_spoilers(html: &str) -> String {
    SPOILER
        .replace_all(html, |caps: &Captures| {
            format!(
                "<span class=\"lip-spoiler\" onclick=\"this.classList.toggle('revealed')\">{}</span>",
                format_inline(&caps[1])
            )
        })
        .into_owned()
}

/// Renders markup and passes it through [`sanitize_html`].
pub fn render_html_sanitized(source: &str, options: &RenderOptions) -> String {
    sanitize_html(&render_html_with_options(source, options))
}

/// Runs already rendered HTML through the allow-list sanitizer.
///
/// Meant for sources that are not site-owner authored. Inline event handlers
/// (spoiler `onclick`, image `onerror`) are removed; the page script shipped
/// by the renderer crate covers spoilers in that case.
pub fn sanitize_html(raw_html: &str) -> String {
    let tags: HashSet<&'static str> = [
        "a", "br", "button", "div", "em", "h4", "h5", "h6", "hr", "img", "li", "p", "s", "span",
        "strong", "u", "ul",
    ]
    .iter()
    .copied()
    .collect();

    let mut generic_attributes: HashSet<&'static str> = HashSet::new();
    generic_attributes.insert("class");
    generic_attributes.insert("id");

    let styled: HashSet<&'static str> = ["style"].iter().copied().collect();
    let mut tag_attributes = HashMap::new();
    tag_attributes.insert("a", ["href", "target"].iter().copied().collect());
    tag_attributes.insert("img", ["alt", "src", "loading"].iter().copied().collect());
    tag_attributes.insert("button", ["type"].iter().copied().collect());
    for tag in ["div", "h4", "h5", "h6", "li", "p", "span"] {
        tag_attributes.insert(tag, styled.clone());
    }

    let mut generic_attribute_prefixes = HashSet::new();
    generic_attribute_prefixes.insert("data-");
    generic_attribute_prefixes.insert("aria-");

    Builder::new()
        .tags(tags)
        .generic_attributes(generic_attributes)
        .tag_attributes(tag_attributes)
        .generic_attribute_prefixes(generic_attribute_prefixes)
        .clean(raw_html)
        .to_string()
}
