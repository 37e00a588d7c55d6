//! Pretty diagnostic rendering using ariadne.
//!
//! Converts the toolkit's [`Diagnostic`] type into ariadne [`Report`]s for
//! coloured, source-annotated terminal output. Commands fall back to
//! structured JSON when the output is piped or when the user explicitly
//! requests it.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use ldap_syntax_diagnostics::Diagnostic;

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or detect from whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            // Default: pretty for interactive terminals, JSON for pipes
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics for one filter in pretty (ariadne) format to stderr.
///
/// Spans are byte offsets into `source`. Diagnostics without a span are
/// rendered as standalone messages.
pub(crate) fn render_diagnostics_pretty(source: &str, name: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let config = Config::default()
        .with_compact(false)
        .with_index_type(IndexType::Byte);

    let mut cache = (name, Source::from(source));

    for diag in diagnostics {
        if let Some(span) = &diag.span {
            // Clamp to the source so truncated input cannot panic the renderer.
            let start = span.start.min(source.len());
            let end = span.end.min(source.len()).max(start);

            let mut builder = Report::build(ReportKind::Error, (name, start..end))
                .with_code(diag.id.as_ref())
                .with_message(&diag.message)
                .with_config(config);

            builder = builder.with_label(
                Label::new((name, start..end))
                    .with_message(make_label_message(diag))
                    .with_color(Color::Red),
            );

            if let Some(explanation) = diag.explain() {
                builder = builder.with_help(explanation);
            }

            builder.finish().eprint(&mut cache).ok();
        } else {
            eprintln!("{diag}");

            if let Some(explanation) = diag.explain() {
                eprintln!("  = help: {explanation}");
            }
        }
    }
}

/// Short label text under the offending span.
///
/// Syntax failures read `expected X, found <'t', KIND>`; anything else falls
/// back to the context pairs or the message.
fn make_label_message(diag: &Diagnostic) -> String {
    let Some(ctx) = diag.context.as_ref().filter(|c| !c.is_empty()) else {
        return diag.message.clone();
    };
    if let (Some(expected), Some(found)) = (ctx.get("expected"), ctx.get("found")) {
        let text = ctx.get("text").map_or("", String::as_str);
        return format!("expected {expected}, found <'{text}', {found}>");
    }
    ctx.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured summary line, e.g. `3 filters checked: 2 matched, 1 rejected`.
pub(crate) fn print_summary(matched: usize, rejected: usize) {
    use ariadne::Fmt;

    let total = matched + rejected;
    let s = if total == 1 { "" } else { "s" };
    let mut parts = vec![format!("{}", format!("{matched} matched").fg(Color::Green))];
    if rejected > 0 {
        parts.push(format!("{}", format!("{rejected} rejected").fg(Color::Red)));
    }
    eprintln!("{total} filter{s} checked: {}", parts.join(", "));
}
