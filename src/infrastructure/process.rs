use crate::core::interfaces::{EnvironmentSink, ExitPrinter};
use crate::core::models::ExitOutcome;
use std::io::Write;

/// Writes straight into the process environment, inherited by the pipeline
pub struct ProcessEnvironment;

impl EnvironmentSink for ProcessEnvironment {
    fn set(&mut self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }

    fn is_set(&self, key: &str) -> bool {
        std::env::var_os(key).is_some_and(|value| !value.is_empty())
    }
}

/// Prints the exit lines and payload to stderr, then exits
pub struct ProcessExitPrinter;

impl ProcessExitPrinter {
    pub fn render(outcome: &ExitOutcome, out: &mut dyn Write) -> std::io::Result<()> {
        for line in &outcome.lines {
            writeln!(out, "{}", line)?;
        }
        if let Some(payload) = &outcome.payload {
            writeln!(out, "{}", payload)?;
        }
        out.flush()
    }
}

impl ExitPrinter for ProcessExitPrinter {
    fn print_and_exit(&self, outcome: &ExitOutcome) {
        let stderr = std::io::stderr();
        let _ = Self::render(outcome, &mut stderr.lock());
        std::process::exit(outcome.code);
    }
}
