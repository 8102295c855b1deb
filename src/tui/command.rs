//! Slash commands typed into the input box.
//!
//! Anything that doesn't start with `/` (or names no known command) is
//! an ordinary message.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/attach <path>`
    Attach(PathBuf),
    /// `/mode <id>`
    Mode(String),
    /// `/new`
    NewChat,
    /// A known command with its argument missing.
    Usage(&'static str),
}

pub fn parse(input: &str) -> Option<Command> {
    let trimmed = input.trim();
    let rest = trimmed.strip_prefix('/')?;
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "attach" if arg.is_empty() => Command::Usage("/attach <dosya yolu>"),
        "attach" => Command::Attach(PathBuf::from(arg)),
        "mode" if arg.is_empty() => Command::Usage("/mode <casual|formal|technical>"),
        "mode" => Command::Mode(arg.to_string()),
        "new" => Command::NewChat,
        _ => return None,
    };
    Some(command)
}
