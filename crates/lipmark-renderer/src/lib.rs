use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

const BASE_CSS: &str = include_str!("../assets/lipmark.css");
const BASE_JS: &str = include_str!("../assets/lipmark.js");

const WARNING_COLOR: &str = "#facc15";
const ERROR_COLOR: &str = "#f87171";

/// Colours of one act, read from its `design.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActTheme {
    /// Page background.
    pub primary: String,
    /// Borders, spoiler covers and other secondary elements.
    pub secondary: String,
    /// Links, buttons and highlighted elements.
    pub accent: String,
    pub text: String,
    pub background_image: Option<String>,
}

impl Default for ActTheme {
    fn default() -> Self {
        Self {
            primary: "#0f172a".to_string(),
            secondary: "#475569".to_string(),
            accent: "#6366f1".to_string(),
            text: "#f8fafc".to_string(),
            background_image: None,
        }
    }
}

impl ActTheme {
    /// Parses `key: value` lines (`background`, `primary`, `secondary`,
    /// `accent`, `text`). Keys are case-insensitive; colours that are not
    /// `#rgb` or `#rrggbb` keep their default.
    pub fn parse(design: &str) -> Self {
        let mut theme = Self::default();
        for line in design.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            let slot = match key.trim().to_ascii_lowercase().as_str() {
                "background" => {
                    if !value.is_empty() {
                        theme.background_image = Some(value.to_string());
                    }
                    continue;
                }
                "primary" => &mut theme.primary,
                "secondary" => &mut theme.secondary,
                "accent" => &mut theme.accent,
                "text" => &mut theme.text,
                _ => continue,
            };
            if is_hex_color(value) {
                *slot = value.to_string();
            } else {
                log::debug!("ignoring invalid colour {:?} for {}", value, key.trim());
            }
        }
        theme
    }

    fn vars(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::from([
            ("--lip-bg".to_string(), self.primary.clone()),
            ("--lip-fg".to_string(), self.text.clone()),
            ("--lip-muted".to_string(), self.secondary.clone()),
            ("--lip-border".to_string(), self.secondary.clone()),
            ("--lip-accent".to_string(), self.accent.clone()),
            ("--lip-link".to_string(), self.accent.clone()),
            ("--lip-panel-bg".to_string(), shade(&self.primary, 20)),
            ("--lip-spoiler-bg".to_string(), self.secondary.clone()),
            ("--lip-btn-hover".to_string(), shade(&self.accent, -20)),
            ("--lip-btn-active".to_string(), shade(&self.accent, -40)),
            ("--lip-warning".to_string(), WARNING_COLOR.to_string()),
            ("--lip-error".to_string(), ERROR_COLOR.to_string()),
        ]);
        if let Some(image) = &self.background_image {
            vars.insert(
                "--lip-bg-image".to_string(),
                format!("url(\"{}\")", image.replace('"', "%22")),
            );
        }
        vars
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Lightens (positive `amount`) or darkens a hex colour channel-wise,
/// clamping every channel to `0..=255`. Values that are not hex colours are
/// returned unchanged.
pub fn shade(color: &str, amount: i32) -> String {
    if !is_hex_color(color) {
        return color.to_string();
    }
    let hex = &color[1..];
    let full: String = if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };
    let Ok(value) = u32::from_str_radix(&full, 16) else {
        return color.to_string();
    };
    let channel = |shift: u32| (((value >> shift) & 0xff) as i32 + amount).clamp(0, 255) as u32;
    format!("#{:02x}{:02x}{:02x}", channel(16), channel(8), channel(0))
}

/// Wraps rendered fragments in a standalone page and ships the stylesheet and
/// the script that wires collapsibles, tooltips and spoilers after injection.
#[derive(Debug, Clone)]
pub struct Renderer {
    theme: ActTheme,
    custom_vars: BTreeMap<String, String>,
}

impl Renderer {
    pub fn new(theme: ActTheme) -> Self {
        Self {
            theme,
            custom_vars: BTreeMap::new(),
        }
    }

    /// Overrides one derived CSS custom property.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_vars.insert(key.into(), value.into());
        self
    }

    pub fn stylesheet(&self) -> String {
        let mut vars = self.theme.vars();
        vars.extend(self.custom_vars.clone());

        let mut out = String::from(":root {\n");
        for (key, value) in &vars {
            out.push_str(&format!("  {key}: {value};\n"));
        }
        out.push_str("}\n");
        out.push_str(BASE_CSS);
        out
    }

    pub fn script(&self) -> &'static str {
        BASE_JS
    }

    pub fn embed_html(&self, html: &str, with_inline_css: bool, with_inline_js: bool) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n");
        out.push_str("<html lang=\"ru\">\n");
        out.push_str("<head>\n");
        out.push_str("  <meta charset=\"utf-8\" />\n");
        out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
        if with_inline_css {
            out.push_str("  <style>\n");
            out.push_str(&self.stylesheet());
            out.push_str("\n  </style>\n");
        }
        out.push_str("</head>\n");
        out.push_str("<body>\n");
        out.push_str("<main class=\"lip-content\">\n");
        out.push_str(html);
        if !html.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("</main>\n");
        if with_inline_js {
            out.push_str("  <script>\n");
            out.push_str(BASE_JS);
            out.push_str("\n  </script>\n");
        }
        out.push_str("</body>\n");
        out.push_str("</html>\n");
        out
    }

    /// Writes `lipmark.css` and `lipmark.js` into `out_dir`.
    pub fn generate_files(&self, out_dir: &Path) -> io::Result<()> {
        log::debug!("writing assets to {}", out_dir.display());
        fs::create_dir_all(out_dir)?;
        fs::write(out_dir.join("lipmark.css"), self.stylesheet())?;
        fs::write(out_dir.join("lipmark.js"), BASE_JS)?;
        Ok(())
    }
}
