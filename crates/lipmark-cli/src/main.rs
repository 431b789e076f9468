use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lipmark_core::{Diagnostic, RenderOptions, render, sanitize_html};
use lipmark_renderer::{ActTheme, Renderer};
use serde::Serialize;

/// Render lipmark markup to HTML.
#[derive(Debug, Parser)]
#[command(name = "lipmark", version, about)]
struct Cli {
    /// Input file; reads stdin when omitted.
    input: Option<PathBuf>,

    /// CSS colour for headings, subtext, list items and paragraphs.
    #[arg(long, env = "LIPMARK_TEXT_COLOR")]
    color: Option<String>,

    /// Prefix for generated collapsible ids.
    #[arg(long, env = "LIPMARK_ID_PREFIX", default_value = lipmark_core::DEFAULT_ID_PREFIX)]
    id_prefix: String,

    /// Pass the output through the allow-list sanitizer.
    #[arg(long)]
    sanitized: bool,

    /// Print the HTML fragment without the page wrapper.
    #[arg(long)]
    raw: bool,

    /// Act `design.txt` with the page colours and background.
    #[arg(long, value_name = "FILE", env = "LIPMARK_DESIGN")]
    design: Option<PathBuf>,

    /// Inline the collapsible/tooltip/spoiler script into the page.
    #[arg(long)]
    js: bool,

    /// Also write lipmark.css and lipmark.js into this directory.
    #[arg(long, value_name = "DIR")]
    emit_assets: Option<PathBuf>,

    /// Report authoring diagnostics on stderr.
    #[arg(long, value_enum, value_name = "FORMAT")]
    diagnostics: Option<DiagnosticsMode>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DiagnosticsMode {
    Json,
    Pretty,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    code: &'a str,
    message: &'a str,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = read_source(cli.input.as_ref())?;
    let options = RenderOptions {
        text_color: cli.color.clone(),
        id_prefix: cli.id_prefix.clone(),
    };

    let result = render(&source, &options);
    let html = if cli.sanitized {
        sanitize_html(&result.html)
    } else {
        result.html
    };

    if let Some(mode) = cli.diagnostics {
        emit_diagnostics(&result.diagnostics, mode)?;
    }

    let theme = match &cli.design {
        Some(path) => ActTheme::parse(
            &fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        None => ActTheme::default(),
    };
    let renderer = Renderer::new(theme);
    if let Some(dir) = &cli.emit_assets {
        renderer
            .generate_files(dir)
            .with_context(|| format!("failed to write assets to {}", dir.display()))?;
    }

    if cli.raw {
        print!("{}", html);
    } else {
        print!("{}", renderer.embed_html(&html, true, cli.js));
    }
    Ok(())
}

fn read_source(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => {
            log::debug!("reading {}", path.display());
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn emit_diagnostics(diagnostics: &[Diagnostic], mode: DiagnosticsMode) -> Result<()> {
    match mode {
        DiagnosticsMode::Json => {
            let entries: Vec<JsonDiagnostic<'_>> = diagnostics
                .iter()
                .map(|diag| JsonDiagnostic {
                    code: diag.code,
                    message: &diag.message,
                })
                .collect();
            eprintln!("{}", serde_json::to_string_pretty(&entries)?);
        }
        DiagnosticsMode::Pretty => {
            for diag in diagnostics {
                eprintln!("warning {} {}", diag.code, diag.message);
            }
        }
    }
    Ok(())
}
