//! Confirmation gate: show the plan and ask the operator before deleting.
use std::io::{self, BufRead, Write};

use super::RemovalPlan;

/// Colour used for directory names.
const DIR_COLOR: &str = "\x1b[35m";
/// Reset to the default colour.
const RESET: &str = "\x1b[0m";
/// Separator between entry names.
const NAME_SEPARATOR: &str = "  ";
/// Question appended after the entry names.
const QUESTION: &str = "The following entries will be removed; Proceed? [y/n]: ";

/// Operator's answer to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The operator typed `y` or `Y`.
    Proceed,
    /// Anything else, including an empty line or end of input.
    Decline,
}

/// Render the prompt: directory names, then file names, then the question.
///
/// With `color`, directory names are shown in magenta.
#[must_use]
pub fn render_prompt(plan: &RemovalPlan, color: bool) -> String {
    let join = |entries: &[crate::resources::Entry]| {
        entries
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(NAME_SEPARATOR)
    };

    let mut groups = Vec::with_capacity(2);
    if !plan.dirs().is_empty() {
        let dirs = join(plan.dirs());
        groups.push(if color {
            format!("{DIR_COLOR}{dirs}{RESET}")
        } else {
            dirs
        });
    }
    if !plan.files().is_empty() {
        groups.push(join(plan.files()));
    }

    format!("{}\n{QUESTION}", groups.join(NAME_SEPARATOR))
}

/// Return `true` for `y` or `Y`, ignoring surrounding whitespace.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Write the prompt for `plan` to `output` and read one line from `input`.
///
/// End of input is a [`Decision::Decline`].
///
/// # Errors
///
/// Returns the I/O error if the prompt cannot be written or the answer
/// cannot be read.
pub fn confirm<R, W>(
    plan: &RemovalPlan,
    color: bool,
    input: &mut R,
    output: &mut W,
) -> io::Result<Decision>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    output.write_all(render_prompt(plan, color).as_bytes())?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        // Keep the shell prompt off the question line.
        writeln!(output)?;
        return Ok(Decision::Decline);
    }

    Ok(if is_affirmative(&answer) {
        Decision::Proceed
    } else {
        Decision::Decline
    })
}
