use crate::block::Placeholder;
use crate::diagnostic::Diagnostic;

pub const DEFAULT_ID_PREFIX: &str = "collapsible";

/// Collapsibles nested deeper than this are emitted as their source text.
pub const MAX_NESTING: usize = 32;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderOptions {
    /// CSS colour applied to headings, subtext, list items and paragraphs.
    pub text_color: Option<String>,
    /// Prefix for generated collapsible ids (`<prefix>-<n>`).
    pub id_prefix: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            text_color: None,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }
}

/// State owned by a single render call and threaded through every recursive
/// re-entry of the pipeline.
pub(crate) struct ParseContext<'a> {
    pub(crate) options: &'a RenderOptions,
    next_placeholder: usize,
    next_collapsible: usize,
    /// Number of collapsible bodies currently being rendered.
    pub(crate) depth: usize,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'a> ParseContext<'a> {
    pub(crate) fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            next_placeholder: 0,
            next_collapsible: 0,
            depth: 0,
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn next_placeholder(&mut self) -> Placeholder {
        let placeholder = Placeholder(self.next_placeholder);
        self.next_placeholder += 1;
        placeholder
    }

    pub(crate) fn next_collapsible_id(&mut self) -> String {
        let id = format!("{}-{}", self.options.id_prefix, self.next_collapsible);
        self.next_collapsible += 1;
        id
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        log::debug!("{}: {}", diagnostic.code, diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    /// ` style="color: ..."` when a text colour is configured.
    pub(crate) fn color_style(&self) -> String {
        self.options
            .text_color
            .as_deref()
            .map(|color| {
                format!(
                    " style=\"color: {}\"",
                    html_escape::encode_double_quoted_attribute(color)
                )
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{ParseContext, RenderOptions};

    #[test]
    fn counters_are_per_context() {
        let options = RenderOptions::default();
        let mut first = ParseContext::new(&options);
        assert_eq!(first.next_placeholder().0, 0);
        assert_eq!(first.next_placeholder().0, 1);
        assert_eq!(first.next_collapsible_id(), "collapsible-0");

        let mut second = ParseContext::new(&options);
        assert_eq!(second.next_placeholder().0, 0);
        assert_eq!(second.next_collapsible_id(), "collapsible-0");
    }

    #[test]
    fn color_style_is_empty_without_color() {
        let options = RenderOptions::default();
        assert_eq!(ParseContext::new(&options).color_style(), "");

        let options = RenderOptions::default().with_text_color("#ff0000");
        assert_eq!(
            ParseContext::new(&options).color_style(),
            " style=\"color: #ff0000\""
        );
    }
}
