mod render;

use std::fs;
use std::io::{self, Read};
use std::process;
use std::slice;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use ldap_syntax_core::hex_escape::decode_value_escapes;
use ldap_syntax_core::{
    DEFAULT_MAX_DEPTH, ModeLexer, ParseConfig, ParseError, SourceMode, TokenSource,
    parse_bytes_with_depth, parse_with_config, samples,
};
use ldap_syntax_diagnostics::{self as diag, Diagnostic};
use serde::Serialize;

use crate::render::{Format, print_summary, render_diagnostics_pretty};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "ldap-syntax",
    version,
    about = "Tokenize and check RFC 4515 LDAP search filters"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Lex raw bytes instead of Unicode scalar values. Positions become
    /// byte offsets.
    #[arg(long, global = true)]
    bytes: bool,

    /// Maximum nesting depth of and/or/not filters.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log more (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the tokens of a filter.
    Tokens { filter: String },

    /// Check filters against the RFC 4515 grammar.
    Check {
        /// Filters to check.
        filters: Vec<String>,
        /// Read filters from a file, one per line ("-" for stdin). Blank
        /// lines and lines starting with '#' are skipped.
        #[arg(long, short)]
        file: Option<String>,
        /// Check the built-in RFC 4515 and field example filters.
        #[arg(long)]
        samples: bool,
    },

    /// Decode the `\XX` escapes of an assertion value.
    Unescape { value: String },

    /// Explain a diagnostic ID (e.g. LDAP2001).
    Explain { id: String },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match run(cli, format) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            report_failure(&e, format);
            process::exit(1);
        }
    }
}

/// Run the selected command. `Ok(false)` means the input was rejected.
fn run(cli: Cli, format: Format) -> Result<bool> {
    let config = ParseConfig {
        mode: if cli.bytes {
            SourceMode::Byte
        } else {
            SourceMode::CodePoint
        },
        max_depth: cli.max_depth,
    };
    log::debug!("{config:?}, output {format:?}");

    match cli.cmd {
        Cmd::Tokens { filter } => cmd_tokens(&filter, config.mode, format),
        Cmd::Check {
            filters,
            file,
            samples,
        } => cmd_check(filters, file.as_deref(), samples, &config, format),
        Cmd::Unescape { value } => cmd_unescape(&value, format),
        Cmd::Explain { id } => cmd_explain(&id, format),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_tokens(filter: &str, mode: SourceMode, format: Format) -> Result<bool> {
    let mut tokens = Vec::new();
    let mut failure = None;
    for item in ModeLexer::new(filter, mode).tokens() {
        match item {
            Ok(tok) => tokens.push(tok),
            Err(e) => failure = Some(e.to_diagnostic()),
        }
    }

    match format {
        Format::Json => print_json(&serde_json::json!({
            "ok": failure.is_none(),
            "mode": mode.to_string(),
            "tokens": tokens,
            "diagnostics": failure.as_slice(),
        }))?,
        Format::Pretty => {
            for tok in &tokens {
                println!("{tok}");
            }
            if let Some(d) = &failure {
                render_diagnostics_pretty(filter, "<filter>", slice::from_ref(d));
            }
        }
    }

    Ok(failure.is_none())
}

/// One filter to check and the name it is reported under.
struct FilterInput {
    name: String,
    filter: Vec<u8>,
}

impl FilterInput {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.filter).into_owned()
    }
}

/// Outcome of checking one filter.
#[derive(Serialize)]
struct CheckResult<'a> {
    name: &'a str,
    filter: String,
    ok: bool,
    diagnostics: Vec<Diagnostic>,
}

/// Parse one filter. Byte mode hands the raw bytes to the byte lexer. In
/// code-point mode, input that is not UTF-8 still goes to the byte lexer so
/// the bad sequence is reported with its offset.
fn check_one(filter: &[u8], config: &ParseConfig) -> Result<(), ParseError> {
    match (config.mode, std::str::from_utf8(filter)) {
        (SourceMode::CodePoint, Ok(text)) => parse_with_config(text, config),
        _ => parse_bytes_with_depth(filter, config.max_depth),
    }
}

fn cmd_check(
    filters: Vec<String>,
    file: Option<&str>,
    with_samples: bool,
    config: &ParseConfig,
    format: Format,
) -> Result<bool> {
    let inputs = collect_filters(filters, file, with_samples)?;
    if inputs.is_empty() {
        bail!("no filters given; pass filters as arguments, --file PATH or --samples");
    }

    let results: Vec<CheckResult<'_>> = inputs
        .iter()
        .map(|input| {
            let outcome = check_one(&input.filter, config);
            CheckResult {
                name: &input.name,
                filter: input.text(),
                ok: outcome.is_ok(),
                diagnostics: outcome.err().map(|e| e.to_diagnostic()).into_iter().collect(),
            }
        })
        .collect();
    let rejected = results.iter().filter(|r| !r.ok).count();

    match format {
        Format::Json => print_json(&serde_json::json!({
            "ok": rejected == 0,
            "mode": config.mode.to_string(),
            "results": results,
        }))?,
        Format::Pretty => {
            for result in &results {
                if result.ok {
                    println!("{} matches", result.filter);
                } else {
                    // Everything before the first bad byte survives the lossy
                    // conversion, so span starts still line up.
                    render_diagnostics_pretty(&result.filter, result.name, &result.diagnostics);
                }
            }
            print_summary(results.len() - rejected, rejected);
        }
    }

    Ok(rejected == 0)
}

/// Gather filters from arguments, then `--file`, then `--samples`.
fn collect_filters(
    filters: Vec<String>,
    file: Option<&str>,
    with_samples: bool,
) -> Result<Vec<FilterInput>> {
    let mut inputs: Vec<FilterInput> = filters
        .into_iter()
        .enumerate()
        .map(|(i, filter)| FilterInput {
            name: format!("<arg {}>", i + 1),
            filter: filter.into_bytes(),
        })
        .collect();

    if let Some(path) = file {
        let data = if path == "-" {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read filters from stdin")?;
            buf
        } else {
            fs::read(path).with_context(|| format!("failed to read filter file '{path}'"))?
        };
        let label = if path == "-" { "<stdin>" } else { path };
        for (i, line) in data.split(|&b| b == b'\n').enumerate() {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if line.iter().all(u8::is_ascii_whitespace) || line.first() == Some(&b'#') {
                continue;
            }
            inputs.push(FilterInput {
                name: format!("{label}:{}", i + 1),
                filter: line.to_vec(),
            });
        }
    }

    if with_samples {
        inputs.extend(samples::all().enumerate().map(|(i, filter)| FilterInput {
            name: format!("<sample {}>", i + 1),
            filter: filter.as_bytes().to_vec(),
        }));
    }

    log::debug!("checking {} filters", inputs.len());
    Ok(inputs)
}

fn cmd_unescape(value: &str, format: Format) -> Result<bool> {
    match decode_value_escapes(value) {
        Ok(bytes) => {
            match format {
                Format::Json => print_json(&serde_json::json!({
                    "ok": true,
                    "text": std::str::from_utf8(&bytes).ok(),
                    "bytes": bytes,
                }))?,
                Format::Pretty => println!("{}", String::from_utf8_lossy(&bytes)),
            }
            Ok(true)
        }
        Err(errors) => {
            let diagnostics: Vec<Diagnostic> =
                errors.iter().map(|e| e.to_diagnostic(value)).collect();
            match format {
                Format::Json => print_json(&serde_json::json!({
                    "ok": false,
                    "diagnostics": diagnostics,
                }))?,
                Format::Pretty => render_diagnostics_pretty(value, "<value>", &diagnostics),
            }
            Ok(false)
        }
    }
}

fn cmd_explain(id: &str, format: Format) -> Result<bool> {
    match format {
        Format::Json => {
            print_json(&serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            }))?;
        }
        Format::Pretty => {
            // Explanations are the command output, so stdout.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(true)
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Report a command failure (bad file, no input) in the selected format.
fn report_failure(err: &anyhow::Error, format: Format) {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "success": false,
                "error": "command_failed",
                "message": format!("{err:#}"),
            });
            println!("{out:#}");
        }
        Format::Pretty => eprintln!("error: {err:#}"),
    }
}
