use std::collections::HashMap;

use crate::block::{BlockKind, BlockTable, SpecialBlock};
use crate::context::ParseContext;
use crate::diagnostic::{Diagnostic, W_BLOCK_NO_URL, W_BLOCK_UNTERMINATED};

pub(crate) struct Extraction {
    /// Source text with every special block replaced by its placeholder.
    pub(crate) carrier: String,
    pub(crate) table: BlockTable,
}

/// Lifts `[#..](..)`, `[%..](..)`, `[$..](..)` and `[?..](..)` blocks out of
/// `text` in one left-to-right scan.
pub(crate) fn extract(text: &str, ctx: &mut ParseContext<'_>) -> Extraction {
    let pairs = Pairs::new(text);
    let mut carrier = String::with_capacity(text.len());
    let mut table = BlockTable::default();
    let mut pos = 0;

    while let Some(found) = text[pos..].find('[') {
        let open = pos + found;
        carrier.push_str(&text[pos..open]);
        let kind = text[open + 1..].chars().next().and_then(BlockKind::from_marker);

        let Some(kind) = kind else {
            carrier.push('[');
            pos = open + 1;
            continue;
        };

        match scan_block(kind, text, open, &pairs) {
            Some((block, end)) => {
                if block.url.is_none() {
                    ctx.report(Diagnostic::new(
                        W_BLOCK_NO_URL,
                        format!(
                            "`[{}` block has no `(...)` part and is kept as text",
                            kind.marker()
                        ),
                    ));
                }
                let placeholder = ctx.next_placeholder();
                carrier.push_str(&placeholder.to_string());
                table.insert(placeholder, block);
                pos = end;
            }
            None => {
                ctx.report(Diagnostic::new(
                    W_BLOCK_UNTERMINATED,
                    format!(
                        "`[{}` block is not closed before the end of the text",
                        kind.marker()
                    ),
                ));
                carrier.push('[');
                pos = open + 1;
            }
        }
    }
    carrier.push_str(&text[pos..]);

    log::debug!("extracted {} special blocks", table.len());
    Extraction { carrier, table }
}

/// Scans the block whose `[` sits at byte `open`.
///
/// Returns the block and the byte offset just past it, or `None` when the
/// body or the url runs off the end of the input.
fn scan_block(
    kind: BlockKind,
    text: &str,
    open: usize,
    pairs: &Pairs,
) -> Option<(SpecialBlock, usize)> {
    // Markers are ASCII, so the body starts two bytes after `[`.
    let body_end = pairs.closing(open)?;
    let body = text[open + 2..body_end].to_string();
    let after_body = body_end + 1;

    let url_open = match pairs.next_url_stop(after_body) {
        Some(stop) if text[stop..].starts_with('(') => stop,
        _ => {
            let block = SpecialBlock {
                kind,
                body,
                url: None,
            };
            return Some((block, after_body));
        }
    };

    let url_end = pairs.closing(url_open)?;
    let url = text[url_open + 1..url_end].to_string();
    let block = SpecialBlock {
        kind,
        body,
        url: Some(url),
    };
    Some((block, url_end + 1))
}

/// Bracket and paren partners for one text, found in a single stack pass.
///
/// The partner of an opener is the first closer after it at depth zero, so
/// every lookup matches a depth-counting scan from that opener without
/// rescanning the rest of the text.
struct Pairs {
    closing: HashMap<usize, usize>,
    /// Byte offsets of every `(` and `\n`, ascending.
    url_stops: Vec<usize>,
}

impl Pairs {
    fn new(text: &str) -> Self {
        let mut closing = HashMap::new();
        let mut brackets = Vec::new();
        let mut parens = Vec::new();
        let mut url_stops = Vec::new();

        for (idx, ch) in text.char_indices() {
            match ch {
                '[' => brackets.push(idx),
                ']' => {
                    if let Some(open) = brackets.pop() {
                        closing.insert(open, idx);
                    }
                }
                '(' => {
                    parens.push(idx);
                    url_stops.push(idx);
                }
                ')' => {
                    if let Some(open) = parens.pop() {
                        closing.insert(open, idx);
                    }
                }
                '\n' => url_stops.push(idx),
                _ => {}
            }
        }

        Self { closing, url_stops }
    }

    fn closing(&self, open: usize) -> Option<usize> {
        self.closing.get(&open).copied()
    }

    /// First `(` or newline at or after `from`.
    fn next_url_stop(&self, from: usize) -> Option<usize> {
        let idx = self.url_stops.partition_point(|stop| *stop < from);
        self.url_stops.get(idx).copied()
    }
}
