use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link pattern"));

// Longer delimiters sharing a marker character must come first.
static FORMAT_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"===(.+?)===", "<span class=\"lip-center\">${1}</span>"),
        (r"\^\^\^(.+?)\^\^\^", "<span class=\"lip-size-4xl\">${1}</span>"),
        (r"\^\^(.+?)\^\^", "<span class=\"lip-size-3xl\">${1}</span>"),
        (r"\^(.+?)\^", "<span class=\"lip-size-2xl\">${1}</span>"),
        (r"\*\*\*(.+?)\*\*\*", "<strong><em>${1}</em></strong>"),
        (r"\*\*(.+?)\*\*", "<strong>${1}</strong>"),
        (r"\*(.+?)\*", "<em>${1}</em>"),
        (r"__(.+?)__", "<u>${1}</u>"),
        (r"~~(.+?)~~", "<s>${1}</s>"),
    ]
    .into_iter()
    .map(|(pattern, template)| (Regex::new(pattern).expect("valid inline pattern"), template))
    .collect()
});

/// Applies centring, size, emphasis, underline and strikethrough rules in
/// their fixed order. Link syntax is left untouched.
pub fn format_inline(text: &str) -> String {
    let mut out = text.to_string();
    for (pattern, template) in FORMAT_RULES.iter() {
        out = pattern.replace_all(&out, *template).into_owned();
    }
    out
}

/// Rewrites `[label](url)` into anchors, then runs [`format_inline`].
///
/// The label is formatted on its own; the url is used verbatim.
pub fn format_inline_with_links(text: &str) -> String {
    let linked = LINK.replace_all(text, |caps: &Captures| {
        anchor(&caps[2], &format_inline(&caps[1]))
    });
    format_inline(&linked)
}

/// Splits on newlines, formats each line and joins them with `<br>`.
pub fn format_multiline(text: &str) -> String {
    text.split('\n')
        .map(format_inline)
        .collect::<Vec<_>>()
        .join("<br>")
}

pub(crate) fn anchor(href: &str, label: &str) -> String {
    format!(
        "<a href=\"{}\" class=\"lip-link\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
        href, label
    )
}
