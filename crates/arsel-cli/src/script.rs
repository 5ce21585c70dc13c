//! Line-oriented scripts driving a [`SelectionSession`].
//!
//! One command per line; blank lines and `#` comments are ignored.
//!
//! ```text
//! add 3 1 @0          # move positions 3 and 1 into the sequence at index 0
//! add-rows 0 2        # move pool rows 0 and 2 to the end
//! activate 0          # double-click pool row 0
//! remove 1            # take sequence index 1 back to the pool
//! reorder 0 2 -> 1    # move sequence indices 0 and 2 to slot 1
//! mode short
//! mask 0 4 5
//! reset
//! rename 0 speed_kmh
//! press available
//! drop selected 0 1 @2
//! ```

use std::fmt;

use arsel_core::{Operation, RenameOutcome, SelectionSession};
use arsel_model::{ListMode, ListSide, SelectionError};
use thiserror::Error;
use tracing::{debug, info_span};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: `{command}` failed: {source}")]
    Command {
        line: usize,
        command: String,
        #[source]
        source: SelectionError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Add {
        positions: Vec<usize>,
        at: Option<usize>,
    },
    AddRows {
        rows: Vec<usize>,
    },
    Activate {
        row: usize,
    },
    Remove {
        indices: Vec<usize>,
    },
    Reorder {
        from: Vec<usize>,
        to: usize,
    },
    Mode(ListMode),
    Mask {
        positions: Vec<usize>,
    },
    Reset,
    Rename {
        index: usize,
        alias: String,
    },
    Press(ListSide),
    Drop {
        target: ListSide,
        rows: Vec<usize>,
        at: Option<usize>,
    },
}

impl fmt::Display for ScriptCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = |at: &Option<usize>| at.map(|at| format!(" @{at}")).unwrap_or_default();
        match self {
            Self::Add { positions, at: slot } => {
                write!(f, "add {}{}", join(positions, " "), at(slot))
            }
            Self::AddRows { rows } => write!(f, "add-rows {}", join(rows, " ")),
            Self::Activate { row } => write!(f, "activate {row}"),
            Self::Remove { indices } => write!(f, "remove {}", join(indices, " ")),
            Self::Reorder { from, to } => write!(f, "reorder {} -> {to}", join(from, " ")),
            Self::Mode(mode) => write!(f, "mode {mode}"),
            Self::Mask { positions } => write!(f, "mask {}", join(positions, " ")),
            Self::Reset => f.write_str("reset"),
            Self::Rename { index, alias } => write!(f, "rename {index} {alias}"),
            Self::Press(side) => write!(f, "press {side}"),
            Self::Drop {
                target,
                rows,
                at: slot,
            } => write!(f, "drop {target} {}{}", join(rows, " "), at(slot)),
        }
    }
}

fn join(values: &[usize], separator: &str) -> String {
    values
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// A parsed command with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: ScriptCommand,
}

/// Parse a whole script. Stops at the first malformed line.
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }
        let command =
            parse_command(text).map_err(|message| ScriptError::Parse { line, message })?;
        commands.push(ScriptLine { line, command });
    }
    Ok(commands)
}

/// Parse a single command line (without comment).
pub fn parse_command(text: &str) -> Result<ScriptCommand, String> {
    let mut tokens = text.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Err("empty command".to_string());
    };
    let args: Vec<&str> = tokens.collect();

    match keyword {
        "add" => {
            let (values, at) = numbers_with_slot(&args)?;
            require_some(&values, "add")?;
            Ok(ScriptCommand::Add {
                positions: values,
                at,
            })
        }
        "add-rows" => {
            let rows = numbers(&args)?;
            require_some(&rows, "add-rows")?;
            Ok(ScriptCommand::AddRows { rows })
        }
        "activate" => match args.as_slice() {
            [row] => Ok(ScriptCommand::Activate { row: number(row)? }),
            _ => Err("activate takes exactly one row".to_string()),
        },
        "remove" => {
            let indices = numbers(&args)?;
            require_some(&indices, "remove")?;
            Ok(ScriptCommand::Remove { indices })
        }
        "reorder" => {
            let Some(arrow) = args.iter().position(|token| *token == "->") else {
                return Err("reorder needs `-> TARGET`".to_string());
            };
            let from = numbers(&args[..arrow])?;
            require_some(&from, "reorder")?;
            match &args[arrow + 1..] {
                [to] => Ok(ScriptCommand::Reorder {
                    from,
                    to: number(to)?,
                }),
                _ => Err("reorder needs exactly one target after `->`".to_string()),
            }
        }
        "mode" => match args.as_slice() {
            ["full"] => Ok(ScriptCommand::Mode(ListMode::Full)),
            ["short"] => Ok(ScriptCommand::Mode(ListMode::Short)),
            _ => Err("mode takes `full` or `short`".to_string()),
        },
        "mask" => Ok(ScriptCommand::Mask {
            positions: numbers(&args)?,
        }),
        "reset" if args.is_empty() => Ok(ScriptCommand::Reset),
        "reset" => Err("reset takes no arguments".to_string()),
        "rename" => match args.as_slice() {
            [index, alias @ ..] if !alias.is_empty() => Ok(ScriptCommand::Rename {
                index: number(index)?,
                alias: alias.join(" "),
            }),
            _ => Err("rename needs an index and an alias".to_string()),
        },
        "press" => match args.as_slice() {
            [side] => Ok(ScriptCommand::Press(list_side(side)?)),
            _ => Err("press takes `available` or `selected`".to_string()),
        },
        "drop" => {
            let Some((side, rest)) = args.split_first() else {
                return Err("drop needs a target list".to_string());
            };
            let target = list_side(side)?;
            let (rows, at) = numbers_with_slot(rest)?;
            Ok(ScriptCommand::Drop { target, rows, at })
        }
        other => Err(format!("unknown command `{other}`")),
    }
}

fn number(token: &str) -> Result<usize, String> {
    token
        .parse()
        .map_err(|_| format!("`{token}` is not a non-negative integer"))
}

fn numbers(tokens: &[&str]) -> Result<Vec<usize>, String> {
    tokens.iter().copied().map(number).collect()
}

/// Numbers followed by an optional trailing `@SLOT`.
fn numbers_with_slot(tokens: &[&str]) -> Result<(Vec<usize>, Option<usize>), String> {
    match tokens.split_last() {
        Some((last, rest)) if last.starts_with('@') => {
            let slot = number(&last[1..])?;
            Ok((numbers(rest)?, Some(slot)))
        }
        _ => Ok((numbers(tokens)?, None)),
    }
}

fn require_some(values: &[usize], keyword: &str) -> Result<(), String> {
    if values.is_empty() {
        Err(format!("{keyword} needs at least one value"))
    } else {
        Ok(())
    }
}

fn list_side(token: &str) -> Result<ListSide, String> {
    match token {
        "available" => Ok(ListSide::Available),
        "selected" => Ok(ListSide::Selected),
        other => Err(format!("unknown list `{other}`")),
    }
}

/// Apply `commands` in order and return one description per command.
///
/// The first failing command aborts the run; earlier effects stay applied.
pub fn execute(
    session: &mut SelectionSession,
    commands: &[ScriptLine],
) -> Result<Vec<String>, ScriptError> {
    let span = info_span!("script", commands = commands.len());
    let _guard = span.enter();

    let mut log = Vec::with_capacity(commands.len());
    for ScriptLine { line, command } in commands {
        let described = apply(session, command).map_err(|source| ScriptError::Command {
            line: *line,
            command: command.to_string(),
            source,
        })?;
        debug!(line, %command, result = %described, "script command applied");
        log.push(described);
    }
    Ok(log)
}

fn apply(session: &mut SelectionSession, command: &ScriptCommand) -> Result<String, SelectionError> {
    let operation = match command {
        ScriptCommand::Add { positions, at } => session.add(positions, *at)?,
        ScriptCommand::AddRows { rows } => session.add_rows(rows)?,
        ScriptCommand::Activate { row } => session.activate_row(*row)?,
        ScriptCommand::Remove { indices } => session.remove(indices)?,
        ScriptCommand::Reorder { from, to } => session.reorder(from, *to)?,
        ScriptCommand::Mode(mode) => session.set_mode(*mode),
        ScriptCommand::Mask { positions } => session.set_mask(positions.iter().copied()),
        ScriptCommand::Reset => session.reset(),
        ScriptCommand::Rename { index, alias } => {
            return Ok(describe_rename(&session.rename(*index, alias)?));
        }
        ScriptCommand::Press(side) => {
            session.press(*side);
            return Ok(format!("pressed on {side}"));
        }
        ScriptCommand::Drop { target, rows, at } => session.drop_rows(*target, rows, *at)?,
    };
    Ok(describe(&operation))
}

/// One-line summary of an operation's effect.
pub fn describe(operation: &Operation) -> String {
    match operation {
        Operation::Added { positions, at } => {
            format!("added [{}] at {at}", join(positions, ", "))
        }
        Operation::Removed {
            positions,
            restored,
        } => format!(
            "removed [{}], restored [{}]",
            join(positions, ", "),
            join(restored, ", ")
        ),
        Operation::Reordered { count, at } => format!("moved {count} to {at}"),
        Operation::ModeSwitched { mode } => format!("mode {mode}"),
        Operation::MaskReplaced { mode, switchable } => {
            format!("mask replaced, mode {mode}, switchable {switchable}")
        }
        Operation::SelectionReplaced { selected, skipped } => {
            format!("selection replaced, {selected} selected, {skipped} skipped")
        }
        Operation::Reset => "reset".to_string(),
        Operation::NoAction => "no action".to_string(),
    }
}

fn describe_rename(outcome: &RenameOutcome) -> String {
    format!(
        "renamed {}: {:?} -> {:?}",
        outcome.index, outcome.previous, outcome.accepted
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let script = parse_script("# header\n\nreset  # clear\n").expect("parse");
        assert_eq!(
            script,
            vec![ScriptLine {
                line: 3,
                command: ScriptCommand::Reset
            }]
        );
    }

    #[test]
    fn slot_suffix_is_optional() {
        assert_eq!(
            numbers_with_slot(&["1", "2", "@0"]).expect("parse"),
            (vec![1, 2], Some(0))
        );
        assert_eq!(numbers_with_slot(&["4"]).expect("parse"), (vec![4], None));
        assert!(numbers_with_slot(&["1", "@x"]).is_err());
    }

    #[test]
    fn commands_and_results_use_their_own_separators() {
        let command = ScriptCommand::Remove {
            indices: vec![2, 0],
        };
        assert_eq!(command.to_string(), "remove 2 0");
        let removed = Operation::Removed {
            positions: vec![4, 1],
            restored: vec![4],
        };
        assert_eq!(describe(&removed), "removed [4, 1], restored [4]");
    }

    #[test]
    fn display_round_trips_through_parse() {
        let command = ScriptCommand::Drop {
            target: ListSide::Selected,
            rows: vec![0, 2],
            at: Some(1),
        };
        assert_eq!(command.to_string(), "drop selected 0 2 @1");
        assert_eq!(parse_command(&command.to_string()), Ok(command));
    }
}
