use crate::block::{BlockKind, BlockTable, Placeholder, SpecialBlock};
use crate::context::{MAX_NESTING, ParseContext};
use crate::diagnostic::{Diagnostic, W_BLOCK_DEPTH, W_IMAGE_PATH};
use crate::inline::{anchor, format_inline, format_inline_with_links, format_multiline};
use crate::lines::render_blocks;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const IMAGE_EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg"];
const DEFAULT_ALT: &str = "Изображение";

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__BLOCK_(\d+)__").expect("valid placeholder pattern"));

// Placeholder tokens contain `__`, which the underline rule would consume, so
// they travel through inline formatting in this private-use form.
static SHIELDED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x{E000}(\d+)\x{E001}").expect("valid shielded pattern"));
const SHIELDED_TEMPLATE: &str = "\u{E000}${1}\u{E001}";

/// Replaces every placeholder in `line` with the HTML of its block.
///
/// Tokens that are not in `table` are left as they are.
pub(crate) fn restore(line: &str, table: &BlockTable, ctx: &mut ParseContext<'_>) -> String {
    substitute(&PLACEHOLDER, line, table, ctx)
}

/// Inline-formats `line`, link pass included, and only then substitutes its
/// placeholders. Rendered block HTML is never run through the inline rules.
pub(crate) fn restore_formatted(
    line: &str,
    table: &BlockTable,
    ctx: &mut ParseContext<'_>,
) -> String {
    let shielded = PLACEHOLDER.replace_all(line, SHIELDED_TEMPLATE);
    let formatted = format_inline_with_links(&shielded);
    substitute(&SHIELDED, &formatted, table, ctx)
}

fn substitute(
    pattern: &Regex,
    line: &str,
    table: &BlockTable,
    ctx: &mut ParseContext<'_>,
) -> String {
    pattern
        .replace_all(line, |caps: &Captures| {
            let block = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| table.get(Placeholder(index)));
            match block {
                Some(block) => render_special_block(block, ctx),
                None => format!("{}{}{}", Placeholder::PREFIX, &caps[1], Placeholder::SUFFIX),
            }
        })
        .into_owned()
}

fn render_special_block(block: &SpecialBlock, ctx: &mut ParseContext<'_>) -> String {
    let Some(url) = block.url.as_deref() else {
        return block.to_source();
    };
    match block.kind {
        BlockKind::Collapsible if ctx.depth >= MAX_NESTING => {
            ctx.report(Diagnostic::new(
                W_BLOCK_DEPTH,
                format!("collapsibles nested deeper than {MAX_NESTING} levels are kept as text"),
            ));
            block.to_source()
        }
        BlockKind::Collapsible => render_collapsible(&block.body, url, ctx),
        BlockKind::Image => render_image(&block.body, url, ctx),
        BlockKind::Link => anchor(url, &format_multiline(&block.body)),
        BlockKind::Tooltip => {
            let hint = url.replace('\n', " ").replace('"', "&quot;");
            format!(
                "<span class=\"lip-tooltip\" data-tooltip=\"{}\">{}</span>",
                hint,
                format_multiline(&block.body)
            )
        }
    }
}

fn render_collapsible(title: &str, content: &str, ctx: &mut ParseContext<'_>) -> String {
    let id = ctx.next_collapsible_id();
    let title = format_inline(&title.replace('\n', " "));
    ctx.depth += 1;
    let content = render_blocks(content, ctx);
    ctx.depth -= 1;

    let mut out = String::new();
    out.push_str(&format!("<div class=\"lip-collapsible\" data-collapsible-id=\"{id}\">\n"));
    out.push_str(&format!(
        "<button type=\"button\" class=\"lip-collapsible-toggle\" data-collapsible-target=\"{id}\" aria-controls=\"{id}\" aria-expanded=\"false\">"
    ));
    out.push_str(&format!("<span class=\"lip-collapsible-title\">{title}</span>"));
    out.push_str("<span class=\"lip-collapsible-arrow\" aria-hidden=\"true\"></span></button>\n");
    out.push_str(&format!(
        "<div id=\"{id}\" class=\"lip-collapsible-content\" style=\"max-height: 0\">\n"
    ));
    out.push_str("<div class=\"lip-collapsible-body\">\n");
    out.push_str(&content);
    out.push_str("\n</div>\n</div>\n</div>");
    out
}

fn render_image(body: &str, url: &str, ctx: &mut ParseContext<'_>) -> String {
    let lowered = url.to_lowercase();
    if !IMAGE_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext)) {
        ctx.report(Diagnostic::new(
            W_IMAGE_PATH,
            format!("`{}` is not a supported image path", url),
        ));
        return format!(
            "<span class=\"lip-image-invalid\">[Некорректный путь к изображению: {}]</span>",
            url
        );
    }

    let mut lines = body.split('\n');
    let alt = lines
        .by_ref()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| format_inline(line).replace('"', "&quot;"))
        .unwrap_or_else(|| DEFAULT_ALT.to_string());
    let caption = lines.collect::<Vec<_>>().join("\n");

    let mut out = String::new();
    out.push_str("<div class=\"lip-image\">\n");
    out.push_str(&format!(
        "<img src=\"{}\" alt=\"{}\" class=\"lip-image-img\" loading=\"lazy\" onerror=\"this.style.display='none'; this.parentNode.querySelector('.lip-image-error').style.display='block';\">",
        url, alt
    ));
    if !caption.trim().is_empty() {
        out.push_str(&format!(
            "<p class=\"lip-image-caption\">{}</p>",
            format_multiline(caption.trim())
        ));
    }
    out.push_str(&format!(
        "<p class=\"lip-image-error\" style=\"display: none;\">Изображение не найдено: {}</p></div>",
        url
    ));
    out
}
