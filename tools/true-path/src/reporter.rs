use std::io::Write;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::checks::{CheckResult, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Pass,
    Fail,
    Error,
    Unknown,
}

/// Colour `text` for the console. Falls back to plain text when stdout has no colour support.
pub fn paint(text: &str, tone: Tone) -> String {
    match tone {
        Tone::Pass => text.if_supports_color(Stdout, |s| s.bright_blue()).to_string(),
        Tone::Fail | Tone::Error => text.if_supports_color(Stdout, |s| s.bright_red()).to_string(),
        Tone::Unknown => text.if_supports_color(Stdout, |s| s.yellow()).to_string(),
    }
}

pub fn label(passed: bool) -> String {
    if passed {
        paint("Passed", Tone::Pass)
    } else {
        paint("FAILED", Tone::Fail)
    }
}

pub fn outcome_label(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Passed => label(true),
        Outcome::Failed => label(false),
        Outcome::Indeterminate(_) => paint("INDETERMINATE", Tone::Unknown),
    }
}

pub fn print_error(out: &mut dyn Write, message: &str) {
    writeln!(out, "{}: {}", paint("ERROR", Tone::Error), message).ok();
}

/// Detailed per-check block printed in verbose mode.
pub fn print_check_report(out: &mut dyn Write, name: &str, passed: bool, explanation: &[&str]) {
    writeln!(out, "***{} check: {}***", name, label(passed)).ok();
    for line in explanation {
        writeln!(out, "{line}").ok();
    }
}

pub fn print_indeterminate(out: &mut dyn Write, name: &str, reason: &str) {
    writeln!(
        out,
        "***{} check: {}***",
        name,
        paint("INDETERMINATE", Tone::Unknown)
    )
    .ok();
    writeln!(out, "The check could not be completed: {reason}").ok();
    writeln!(out, "An incomplete check never counts as passed.").ok();
}

/// One line per check, used when verbose mode is off.
pub fn print_summary(out: &mut dyn Write, results: &[CheckResult]) {
    for result in results {
        match &result.outcome {
            Outcome::Indeterminate(reason) => {
                writeln!(
                    out,
                    "{} check: {} ({})",
                    result.name,
                    outcome_label(&result.outcome),
                    reason
                )
                .ok();
            }
            outcome => {
                writeln!(out, "{} check: {}", result.name, outcome_label(outcome)).ok();
            }
        }
    }
}
