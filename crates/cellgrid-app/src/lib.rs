//! Command-line front end for the cellgrid interaction engine.
//!
//! The `cellgrid` binary loads or generates a board, replays an input
//! [`script`] against an [`InteractionController`], and prints the grid with
//! [`render`].

use std::{cell::RefCell, io, mem, path::PathBuf, rc::Rc};

use cellgrid_core::MatrixError;
use cellgrid_interaction::{ChangeEvent, InteractionController};

use self::{
    render::{render_changes, render_grid},
    script::{ScriptError, Step},
};

pub mod render;
pub mod script;

/// Errors reported by the `cellgrid` binary.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AppError {
    /// A file could not be read.
    #[display("failed to read {}: {source}", path.display())]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// Standard input or output failed.
    #[display("I/O error: {_0}")]
    Io(#[from] io::Error),
    /// The board could not be built.
    #[display("invalid board: {_0}")]
    Matrix(#[from] MatrixError),
    /// The input script is malformed.
    #[display("invalid script: {_0}")]
    Script(#[from] ScriptError),
}

/// Counters reported after a script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Events that produced at least one change.
    pub changed: usize,
    /// Events the controller rejected.
    pub rejected: usize,
}

/// A controller plus a listener that collects its change batches.
#[derive(Debug)]
pub struct Session {
    controller: InteractionController,
    batches: Rc<RefCell<Vec<Vec<ChangeEvent>>>>,
    echo_changes: bool,
}

impl Session {
    /// Wraps `controller`. If `echo_changes` is set, each change batch is
    /// written as one line while a script runs.
    #[must_use]
    pub fn new(mut controller: InteractionController, echo_changes: bool) -> Self {
        let batches = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&batches);
        controller.subscribe(move |batch: &[ChangeEvent]| sink.borrow_mut().push(batch.to_vec()));
        Self {
            controller,
            batches,
            echo_changes,
        }
    }

    /// The wrapped controller.
    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Replays `steps`, writing requested renders and echoed changes to `out`.
    ///
    /// Events the controller rejects are logged and counted; the run goes on.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to `out` fails.
    pub fn run<W>(&mut self, steps: &[Step], out: &mut W) -> io::Result<RunSummary>
    where
        W: io::Write,
    {
        let mut summary = RunSummary::default();
        for step in steps {
            match step {
                Step::Event(event) => match self.controller.handle_event(event) {
                    Ok(changes) if !changes.is_empty() => summary.changed += 1,
                    Ok(_) => {}
                    Err(err) => {
                        log::warn!("rejected {event:?}: {err}");
                        summary.rejected += 1;
                    }
                },
                Step::Print => write!(out, "{}", render_grid(self.controller.matrix()))?,
            }
            let batches = mem::take(&mut *self.batches.borrow_mut());
            if self.echo_changes {
                for batch in batches {
                    writeln!(out, "{}", render_changes(&batch))?;
                }
            }
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use cellgrid_core::{Matrix, Position};

    use super::*;
    use crate::script::parse_script;

    fn run(size: usize, script: &str, echo: bool) -> (Session, RunSummary, String) {
        let controller = InteractionController::with_empty(size).unwrap();
        let mut session = Session::new(controller, echo);
        let steps = parse_script(script).unwrap();
        let mut out = vec![];
        let summary = session.run(&steps, &mut out).unwrap();
        (session, summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_script_drives_controller() {
        let (session, summary, _) = run(9, "click 2 2\nkey 5\nkey ArrowUp\nkey x", false);
        assert_eq!(summary, RunSummary { changed: 3, rejected: 0 });
        let matrix = session.controller().matrix();
        assert_eq!(matrix.value(Position::new(2, 2)).unwrap(), 5);
        assert_eq!(
            matrix.selected_positions().collect::<Vec<_>>(),
            vec![Position::new(1, 2)]
        );
    }

    #[test]
    fn test_echo_writes_one_line_per_batch() {
        let (_, _, out) = run(4, "click 0 0\nkey 3\nkey Escape\nkey Escape", true);
        assert_eq!(out, "+(0, 0)\n(0, 0)=3\n-(0, 0)\n");
    }

    #[test]
    fn test_print_renders_current_grid() {
        let (session, _, out) = run(4, "focus 3 3\nkey 4\nprint", false);
        let expected = render_grid(session.controller().matrix());
        assert_eq!(out, expected);
        assert!(out.lines().last().unwrap().ends_with("[4]"));
    }

    #[test]
    fn test_ignored_events_are_not_counted() {
        let (session, summary, out) = run(4, "key Enter\nkey 5\nfocus 7 7", true);
        assert_eq!(summary, RunSummary::default());
        assert!(out.is_empty());
        assert_eq!(session.controller().matrix(), &Matrix::empty(4).unwrap());
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::from(parse_script("dance").unwrap_err());
        assert_eq!(err.to_string(), "invalid script: line 1: unknown step \"dance\"");

        let err = AppError::Read {
            path: PathBuf::from("missing.txt"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("failed to read missing.txt: "));
    }
}
