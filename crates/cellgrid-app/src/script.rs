//! Line-oriented input scripts.
//!
//! Each non-blank line holds one step. `#` starts a comment.
//!
//! ```text
//! click ROW COL [ctrl] [meta] [shift] [alt]
//! click-outside
//! focus ROW COL
//! key NAME            # DOM key name: 7, ArrowUp, Backspace, Escape, ...
//! print               # render the current grid
//! ```

use std::str::FromStr;

use cellgrid_core::Position;
use cellgrid_interaction::{Key, KeyEvent, Modifiers, PointerEvent, RawEvent};

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Feed an input event to the controller.
    Event(RawEvent),
    /// Render the current grid.
    Print,
}

/// Why a script line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ScriptError {
    /// The first word is not a known step.
    #[display("line {line}: unknown step {word:?}")]
    UnknownStep {
        /// 1-based line number.
        line: usize,
        /// The unrecognized word.
        word: String,
    },
    /// A step is missing an argument or has an unparsable one.
    #[display("line {line}: {message}")]
    InvalidArgument {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },
}

/// Parses a whole script, skipping blank and comment-only lines.
///
/// # Errors
///
/// Returns the first [`ScriptError`] encountered.
///
/// # Examples
///
/// ```
/// use cellgrid_app::script::{Step, parse_script};
/// use cellgrid_core::Position;
/// use cellgrid_interaction::{Key, RawEvent};
///
/// let steps = parse_script("click 0 1\nkey 7 # type\n\nprint").unwrap();
/// assert_eq!(
///     steps,
///     vec![
///         Step::Event(RawEvent::click(Position::new(0, 1))),
///         Step::Event(RawEvent::key(Key::Char('7'))),
///         Step::Print,
///     ]
/// );
/// ```
pub fn parse_script(text: &str) -> Result<Vec<Step>, ScriptError> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| parse_line(index + 1, line).transpose())
        .collect()
}

fn parse_line(line: usize, text: &str) -> Result<Option<Step>, ScriptError> {
    let text = text.split_once('#').map_or(text, |(code, _)| code);
    let mut words = text.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let args = words.collect::<Vec<_>>();
    let invalid = |message: String| ScriptError::InvalidArgument { line, message };

    let step = match word {
        "click" => {
            let (pos, rest) = parse_position(&args).map_err(invalid)?;
            let modifiers = rest
                .iter()
                .map(|name| parse_modifier(name))
                .collect::<Result<Modifiers, _>>()
                .map_err(invalid)?;
            Step::Event(RawEvent::Pointer(PointerEvent {
                target: Some(pos),
                modifiers,
            }))
        }
        "click-outside" => {
            expect_no_args(&args).map_err(invalid)?;
            Step::Event(RawEvent::click_outside())
        }
        "focus" => {
            let (pos, rest) = parse_position(&args).map_err(invalid)?;
            expect_no_args(rest).map_err(invalid)?;
            Step::Event(RawEvent::focus(pos))
        }
        "key" => match args.as_slice() {
            [name] => Step::Event(RawEvent::Key(KeyEvent {
                key: Key::from_name(name),
                modifiers: Modifiers::empty(),
            })),
            _ => return Err(invalid("key takes exactly one key name".to_owned())),
        },
        "print" => {
            expect_no_args(&args).map_err(invalid)?;
            Step::Print
        }
        _ => {
            return Err(ScriptError::UnknownStep {
                line,
                word: word.to_owned(),
            });
        }
    };
    Ok(Some(step))
}

fn parse_position<'a, 'b>(args: &'a [&'b str]) -> Result<(Position, &'a [&'b str]), String> {
    let [row, col, rest @ ..] = args else {
        return Err("expected ROW COL".to_owned());
    };
    let row = parse_index(row)?;
    let col = parse_index(col)?;
    Ok((Position::new(row, col), rest))
}

fn parse_index(text: &str) -> Result<usize, String> {
    usize::from_str(text).map_err(|err| format!("invalid coordinate {text:?}: {err}"))
}

fn parse_modifier(name: &str) -> Result<Modifiers, String> {
    match name {
        "ctrl" => Ok(Modifiers::CTRL),
        "meta" => Ok(Modifiers::META),
        "shift" => Ok(Modifiers::SHIFT),
        "alt" => Ok(Modifiers::ALT),
        _ => Err(format!("unknown modifier {name:?}")),
    }
}

fn expect_no_args(args: &[&str]) -> Result<(), String> {
    match args {
        [] => Ok(()),
        [extra, ..] => Err(format!("unexpected argument {extra:?}")),
    }
}
