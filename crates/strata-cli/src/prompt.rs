//! Yes/no confirmation.
//!
//! On a terminal (and with the `interactive` feature) a `dialoguer` prompt is
//! shown; otherwise one line is read from stdin, so piped input still works.

use std::io::{self, BufRead, Write};

use crate::error::{CliError, CliResult};

/// Ask `question`; an empty answer counts as `default_yes`.
pub fn confirm(question: &str, default_yes: bool) -> CliResult<bool> {
    if let Some(answer) = terminal_confirm(question, default_yes) {
        return answer;
    }

    let hint = if default_yes { "[Y/n]" } else { "[y/N]" };
    print!("{question} {hint} ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    read_answer(io::stdin().lock(), default_yes)
}

#[cfg(feature = "interactive")]
fn terminal_confirm(question: &str, default_yes: bool) -> Option<CliResult<bool>> {
    use std::io::IsTerminal;

    if !(io::stdin().is_terminal() && io::stdout().is_terminal()) {
        return None;
    }

    Some(
        dialoguer::Confirm::new()
            .with_prompt(question)
            .default(default_yes)
            .interact()
            .map_err(|e| CliError::IoError {
                message: "failed to read confirmation".into(),
                source: io::Error::other(e.to_string()),
            }),
    )
}

#[cfg(not(feature = "interactive"))]
fn terminal_confirm(_question: &str, _default_yes: bool) -> Option<CliResult<bool>> {
    None
}

fn read_answer(mut input: impl BufRead, default_yes: bool) -> CliResult<bool> {
    let mut line = String::new();
    input.read_line(&mut line).map_err(|e| CliError::IoError {
        message: "failed to read confirmation input".into(),
        source: e,
    })?;

    Ok(parse_answer(&line, default_yes))
}

fn parse_answer(line: &str, default_yes: bool) -> bool {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => default_yes,
        "y" | "yes" => true,
        _ => false,
    }
}
