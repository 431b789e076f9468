use crate::block::BlockTable;
use crate::context::ParseContext;
use crate::extract::extract;
use crate::restore::{restore, restore_formatted};

const LINE_BREAK: &str = "<br>";
const LIST_MARKER: &str = "– ";

/// Runs extraction and line classification over `text` and joins the
/// resulting blocks with newlines. Collapsible content re-enters here.
pub(crate) fn render_blocks(text: &str, ctx: &mut ParseContext<'_>) -> String {
    let extraction = extract(text, ctx);
    classify_lines(&extraction.carrier, &extraction.table, ctx).join("\n")
}

/// Turns carrier text into a sequence of HTML blocks, one classification per
/// trimmed line.
pub(crate) fn classify_lines(
    carrier: &str,
    table: &BlockTable,
    ctx: &mut ParseContext<'_>,
) -> Vec<String> {
    let style = ctx.color_style();
    let lines: Vec<&str> = carrier.split('\n').map(str::trim).collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        i += 1;

        if line.is_empty() {
            blocks.push(LINE_BREAK.to_string());
            continue;
        }

        if line.starts_with("-----") {
            blocks.push("<hr class=\"lip-divider lip-divider-full\">".to_string());
            continue;
        }
        if line.starts_with("---") {
            blocks.push("<hr class=\"lip-divider lip-divider-partial\">".to_string());
            continue;
        }

        if let Some((level, text)) = heading(line) {
            log::trace!("heading level {}", level);
            let tag = heading_tag(level);
            blocks.push(format!(
                "<{tag} class=\"lip-heading lip-heading-{level}\"{style}>{}</{tag}>",
                restore(text, table, ctx)
            ));
            continue;
        }

        if let Some(text) = line.strip_prefix("-# ") {
            blocks.push(format!(
                "<p class=\"lip-subtext\"{style}>{}</p>",
                restore(text, table, ctx)
            ));
            continue;
        }

        if let Some(first) = line.strip_prefix(LIST_MARKER) {
            let mut items = vec![first];
            while let Some(next) = lines.get(i).and_then(|line| line.strip_prefix(LIST_MARKER)) {
                items.push(next);
                i += 1;
            }
            log::trace!("list with {} items", items.len());
            let mut list = String::from("<ul class=\"lip-list\">");
            for item in items {
                list.push_str(&format!(
                    "<li class=\"lip-list-item\"{style}>{}</li>",
                    restore_formatted(item, table, ctx)
                ));
            }
            list.push_str("</ul>");
            blocks.push(list);
            continue;
        }

        let formatted = restore_formatted(line, table, ctx);
        if !formatted.trim().is_empty() {
            blocks.push(format!("<p class=\"lip-paragraph\"{style}>{}</p>", formatted));
        }
    }

    blocks
}

/// Splits `# `, `## ` and `### ` prefixes off a line.
fn heading(line: &str) -> Option<(usize, &str)> {
    let hashes = line.bytes().take_while(|byte| *byte == b'#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    line[hashes..].strip_prefix(' ').map(|text| (hashes, text))
}

fn heading_tag(level: usize) -> &'static str {
    match level {
        1 => "h4",
        2 => "h5",
        _ => "h6",
    }
}

#[cfg(test)]
mod tests {
    use super::{heading, render_blocks};
    use crate::context::{ParseContext, RenderOptions};
    use pretty_assertions::assert_eq;

    fn render(source: &str) -> String {
        let options = RenderOptions::default();
        let mut ctx = ParseContext::new(&options);
        render_blocks(source, &mut ctx)
    }

    #[test]
    fn heading_levels_count_hashes() {
        assert_eq!(heading("# One"), Some((1, "One")));
        assert_eq!(heading("## Two"), Some((2, "Two")));
        assert_eq!(heading("### Three"), Some((3, "Three")));
        assert_eq!(heading("#### Four"), None);
        assert_eq!(heading("#tag"), None);
    }

    #[test]
    fn headings_render_largest_first() {
        assert_eq!(
            render("# A\n## B\n### C"),
            "<h4 class=\"lip-heading lip-heading-1\">A</h4>\n\
             <h5 class=\"lip-heading lip-heading-2\">B</h5>\n\
             <h6 class=\"lip-heading lip-heading-3\">C</h6>"
        );
    }

    #[test]
    fn dividers_prefer_the_longer_prefix() {
        assert_eq!(
            render("------\n---"),
            "<hr class=\"lip-divider lip-divider-full\">\n<hr class=\"lip-divider lip-divider-partial\">"
        );
    }

    #[test]
    fn subtext_and_blank_lines() {
        assert_eq!(
            render("-# small print\n\n  "),
            "<p class=\"lip-subtext\">small print</p>\n<br>\n<br>"
        );
    }

    #[test]
    fn list_is_contiguous_and_formatted() {
        assert_eq!(
            render("– **a**\n  – [b](http://b)\nafter"),
            "<ul class=\"lip-list\"><li class=\"lip-list-item\"><strong>a</strong></li>\
             <li class=\"lip-list-item\"><a href=\"http://b\" class=\"lip-link\" target=\"_blank\" rel=\"noopener noreferrer\">b</a></li></ul>\n\
             <p class=\"lip-paragraph\">after</p>"
        );
    }

    #[test]
    fn hyphen_is_not_a_list_marker() {
        assert_eq!(render("- item"), "<p class=\"lip-paragraph\">- item</p>");
    }

    #[test]
    fn text_color_reaches_block_elements() {
        let options = RenderOptions::default().with_text_color("red");
        let mut ctx = ParseContext::new(&options);
        assert_eq!(
            render_blocks("# H\n-# s\n– i\np\n---", &mut ctx),
            "<h4 class=\"lip-heading lip-heading-1\" style=\"color: red\">H</h4>\n\
             <p class=\"lip-subtext\" style=\"color: red\">s</p>\n\
             <ul class=\"lip-list\"><li class=\"lip-list-item\" style=\"color: red\">i</li></ul>\n\
             <p class=\"lip-paragraph\" style=\"color: red\">p</p>\n\
             <hr class=\"lip-divider lip-divider-partial\">"
        );
    }

    #[test]
    fn list_items_restore_blocks() {
        let html = render("– [$x](http://x)");
        assert!(html.contains("<li class=\"lip-list-item\"><a href=\"http://x\""));
        assert!(!html.contains("__BLOCK_"));
    }

    #[test]
    fn headings_restore_blocks_without_formatting() {
        assert_eq!(
            render("## **T** [?a](b)"),
            "<h5 class=\"lip-heading lip-heading-2\">**T** <span class=\"lip-tooltip\" data-tooltip=\"b\">a</span></h5>"
        );
    }
}
