use std::io::IsTerminal;
use std::io::Read as _;

use anyhow::Context;
use anyhow::Result;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use clap::Parser;
use t4_conf::DiagnosticSeverity;
use t4_conf::DiagnosticsConfig;
use t4_conf::Settings;
use t4_source::Diagnostic;
use t4_source::DiagnosticRenderer;
use t4_templates::TemplateError;
use t4_workspace::walk_template_files;
use t4_workspace::TextDocument;
use t4_workspace::WalkOptions;
use t4_workspace::Workspace;

use crate::args::Args;
use crate::commands::Command;
use crate::exit::Exit;

const STDIN_PATH: &str = "<stdin>";

#[derive(Debug, Parser)]
pub struct Check {
    /// Files or directories to check. If omitted, reads a template from
    /// stdin when it is piped, otherwise checks the current directory.
    paths: Vec<Utf8PathBuf>,

    /// Only report these diagnostic codes or prefixes (e.g. T1,S100).
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Never report these diagnostic codes or prefixes (e.g. S101).
    #[arg(long, value_delimiter = ',')]
    ignore: Vec<String>,

    /// Include hidden files and directories.
    #[arg(long)]
    hidden: bool,

    /// Do not respect `.gitignore` and `.ignore` files.
    #[arg(long)]
    no_ignore: bool,
}

impl Command for Check {
    fn execute(&self, args: &Args) -> Result<Exit> {
        let project_root = resolve_project_root()?;
        let settings = Settings::new(&project_root).context("Failed to load settings")?;
        let config = build_diagnostics_config(&settings.diagnostics, &self.select, &self.ignore);
        let fmt = pick_renderer();
        let quiet = args.global.quiet;

        let mut workspace = Workspace::new();
        let mut summary = Summary::default();

        if self.paths.is_empty() && !std::io::stdin().is_terminal() {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;

            let rendered = check_source(
                &mut workspace,
                Utf8Path::new(STDIN_PATH),
                source,
                &config,
                &fmt,
            );
            summary.record(&rendered, quiet);
            return Ok(summary.into_exit());
        }

        let roots = if self.paths.is_empty() {
            vec![project_root]
        } else {
            self.paths.clone()
        };
        let options = WalkOptions {
            hidden: self.hidden,
            no_ignore: self.no_ignore,
            ..WalkOptions::default()
        };
        let files = walk_template_files(&roots, &options);
        tracing::debug!(files = files.len(), "discovered templates");

        for path in files {
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {path}"))?;
            let rendered = check_source(&mut workspace, &path, source, &config, &fmt);
            summary.record(&rendered, quiet);
        }

        Ok(summary.into_exit())
    }
}

/// Analyze one template and render its enabled diagnostics.
fn check_source(
    workspace: &mut Workspace,
    path: &Utf8Path,
    source: String,
    config: &DiagnosticsConfig,
    fmt: &DiagnosticRenderer,
) -> Vec<String> {
    workspace.open(path, TextDocument::new(source, 0));

    let rendered = match (workspace.current_analysis(path), workspace.document(path)) {
        (Some(analysis), Some(document)) => render_errors(
            document.text(),
            path.as_str(),
            analysis.errors(),
            config,
            fmt,
        ),
        _ => Vec::new(),
    };

    workspace.close(path);
    rendered
}

fn render_errors(
    source: &str,
    path: &str,
    errors: &[TemplateError],
    config: &DiagnosticsConfig,
    fmt: &DiagnosticRenderer,
) -> Vec<String> {
    errors
        .iter()
        .filter_map(|error| {
            let severity = config.get_severity(error.code()).to_severity()?;
            let message = error.message();
            let diagnostic =
                Diagnostic::new(source, path, error.code(), &message, severity, error.span());
            Some(fmt.render(&diagnostic))
        })
        .collect()
}

#[derive(Debug, Default)]
struct Summary {
    diagnostics: usize,
    files: usize,
}

impl Summary {
    fn record(&mut self, rendered: &[String], quiet: bool) {
        if rendered.is_empty() {
            return;
        }
        self.files += 1;
        self.diagnostics += rendered.len();
        if !quiet {
            for output in rendered {
                println!("{output}\n");
            }
        }
    }

    fn into_exit(self) -> Exit {
        if self.diagnostics == 0 {
            return Exit::success();
        }
        let file_word = if self.files == 1 { "file" } else { "files" };
        let diagnostic_word = if self.diagnostics == 1 {
            "diagnostic"
        } else {
            "diagnostics"
        };
        Exit::error().with_message(format!(
            "Found {} {diagnostic_word} in {} {file_word}.",
            self.diagnostics, self.files
        ))
    }
}

/// Layer `--select` and `--ignore` over the configured severities.
///
/// Selecting codes turns everything else off but keeps configured severities
/// for the selected codes and anything more specific under them.
fn build_diagnostics_config(
    configured: &DiagnosticsConfig,
    select: &[String],
    ignore: &[String],
) -> DiagnosticsConfig {
    let mut config = configured.clone();

    if !select.is_empty() {
        let selected: Vec<(&str, DiagnosticSeverity)> = select
            .iter()
            .map(|code| {
                let severity = match configured.get_severity(code) {
                    DiagnosticSeverity::Off => DiagnosticSeverity::Error,
                    severity => severity,
                };
                (code.as_str(), severity)
            })
            .collect();

        config.severity.retain(|pattern, _| {
            let pattern = pattern.to_ascii_uppercase();
            select.iter().any(|code| {
                pattern.len() > code.len() && pattern.starts_with(&code.to_ascii_uppercase())
            })
        });
        config.set("", DiagnosticSeverity::Off);
        for (code, severity) in selected {
            config.set(code, severity);
        }
    }

    for code in ignore {
        config.set(code, DiagnosticSeverity::Off);
    }

    config
}

fn resolve_project_root() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|_| anyhow::anyhow!("Current directory is not valid UTF-8"))
}

fn pick_renderer() -> DiagnosticRenderer {
    if std::io::stdout().is_terminal() {
        DiagnosticRenderer::styled()
    } else {
        DiagnosticRenderer::plain()
    }
}
