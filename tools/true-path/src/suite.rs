use std::io::Write;

use crate::checks::{self, CheckContext, CheckResult, CheckSpec, Outcome};
use crate::reporter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteReport {
    pub results: Vec<CheckResult>,
}

impl SuiteReport {
    /// True only when every check passed. Indeterminate counts as not passed.
    pub fn passed(&self) -> bool {
        self.results.iter().all(CheckResult::passed)
    }

    /// 0 when all passed, 1 when any check failed, 2 when nothing failed but
    /// some check could not be completed.
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else if self.results.iter().any(|r| r.outcome == Outcome::Failed) {
            1
        } else {
            2
        }
    }
}

pub fn run_suite(ctx: &CheckContext, out: &mut dyn Write) -> SuiteReport {
    run_checks(&checks::ALL_CHECKS, ctx, out)
}

/// Runs every check in order, never stopping early, then prints the summary
/// unless each check already reported itself verbosely.
pub fn run_checks(specs: &[CheckSpec], ctx: &CheckContext, out: &mut dyn Write) -> SuiteReport {
    let mut results = Vec::with_capacity(specs.len());
    for spec in specs {
        let result = (spec.run)(ctx, out);
        let outcome = Outcome::from_result(&result);
        if let Outcome::Indeterminate(reason) = &outcome {
            tracing::warn!(check = spec.name, %reason, "check could not be completed");
            if ctx.verbose {
                reporter::print_indeterminate(out, spec.name, reason);
            }
        }
        results.push(CheckResult {
            name: spec.name,
            outcome,
        });
    }

    if !ctx.verbose {
        reporter::print_summary(out, &results);
    }

    SuiteReport { results }
}
