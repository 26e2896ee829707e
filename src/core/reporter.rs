use crate::core::classifier::{Classification, ErrorClassifier};
use crate::core::interfaces::ExitPrinter;
use crate::core::models::{BuildOutcome, ExitOutcome};

pub const FAILURE_EXIT_CODE: i32 = 1;
pub const UNEXPECTED_HEADER: &str = "> Build error occurred";

/// Maps a build outcome onto the single terminal action of the run
pub struct ExitReporter;

impl ExitReporter {
    /// `None` on success: the process ends through the command's normal return.
    pub fn report(outcome: BuildOutcome) -> Option<ExitOutcome> {
        let failure = match outcome {
            BuildOutcome::Success => return None,
            BuildOutcome::Failure(failure) => failure,
        };

        let exit = match ErrorClassifier::classify(failure) {
            Classification::Domain { message, .. } => ExitOutcome {
                lines: vec![format!("> {}", message)],
                payload: None,
                code: FAILURE_EXIT_CODE,
            },
            Classification::Unexpected { payload } => ExitOutcome {
                lines: vec![String::new(), UNEXPECTED_HEADER.to_string()],
                payload: Some(format!("{:?}", payload)),
                code: FAILURE_EXIT_CODE,
            },
        };

        Some(exit)
    }

    /// Report and hand any failure to the printer. Returns true on success.
    pub fn finish(outcome: BuildOutcome, printer: &dyn ExitPrinter) -> bool {
        match Self::report(outcome) {
            Some(exit) => {
                printer.print_and_exit(&exit);
                false
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{FailureDetail, FailureKind};
    use std::cell::RefCell;

    #[derive(Default)]
    struct CapturingPrinter {
        exits: RefCell<Vec<ExitOutcome>>,
    }

    impl ExitPrinter for CapturingPrinter {
        fn print_and_exit(&self, outcome: &ExitOutcome) {
            self.exits.borrow_mut().push(outcome.clone());
        }
    }

    #[test]
    fn test_success_has_no_terminal_action() {
        let printer = CapturingPrinter::default();

        assert!(ExitReporter::finish(BuildOutcome::Success, &printer));
        assert!(printer.exits.borrow().is_empty());
    }

    #[test]
    fn test_domain_failure_prints_one_line() {
        let outcome = BuildOutcome::Failure(FailureDetail::tagged(FailureKind::EdgeRuntimeUnsupportedApi, "M"));
        let exit = ExitReporter::report(outcome).unwrap();

        assert_eq!(exit.lines, vec!["> M".to_string()]);
        assert!(exit.payload.is_none());
        assert_ne!(exit.code, 0);
    }

    #[test]
    fn test_unexpected_failure_prints_header_and_payload() {
        let outcome = BuildOutcome::Failure(FailureDetail::untagged(anyhow::anyhow!("worker crashed")));
        let printer = CapturingPrinter::default();

        assert!(!ExitReporter::finish(outcome, &printer));

        let exits = printer.exits.borrow();
        assert_eq!(exits.len(), 1);
        assert_eq!(exits[0].lines, vec!["".to_string(), "> Build error occurred".to_string()]);
        assert!(exits[0].payload.as_deref().unwrap().contains("worker crashed"));
        assert_ne!(exits[0].code, 0);
    }
}
