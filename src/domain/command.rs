//! Slash-command parsing for the task input line.
//!
//! Input starting with `/` is never added as a task. Instead it resolves by
//! prefix to one of the commands below, which arm or clear the priority of
//! the next created task.

use super::enums::Priority;

/// A resolved slash command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandToken {
    High,
    Medium,
    Low,
    Clear,
}

impl CommandToken {
    /// All commands in palette order
    pub fn all() -> &'static [CommandToken] {
        &[
            CommandToken::High,
            CommandToken::Medium,
            CommandToken::Low,
            CommandToken::Clear,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Clear => "clear",
        }
    }

    /// One-line description for the command palette
    pub fn hint(&self) -> &'static str {
        match self {
            Self::High => "Next task is high priority",
            Self::Medium => "Next task is medium priority",
            Self::Low => "Next task is low priority",
            Self::Clear => "No priority for the next task",
        }
    }

    /// The priority this command arms (`None` for `/clear`)
    pub fn priority(&self) -> Option<Priority> {
        match self {
            Self::High => Some(Priority::High),
            Self::Medium => Some(Priority::Medium),
            Self::Low => Some(Priority::Low),
            Self::Clear => None,
        }
    }
}

/// Whether this input is a command rather than a task
pub fn is_command_input(input: &str) -> bool {
    input.trim_start().starts_with('/')
}

fn command_prefix(input: &str) -> Option<String> {
    input
        .trim_start()
        .strip_prefix('/')
        .map(|rest| rest.trim().to_lowercase())
}

/// Commands whose name starts with what has been typed after the slash
pub fn matching_commands(input: &str) -> Vec<CommandToken> {
    match command_prefix(input) {
        Some(prefix) => CommandToken::all()
            .iter()
            .copied()
            .filter(|cmd| cmd.name().starts_with(&prefix))
            .collect(),
        None => Vec::new(),
    }
}

/// Resolve submitted input to a command, first prefix match wins
pub fn parse_command(input: &str) -> Option<CommandToken> {
    let prefix = command_prefix(input)?;
    if prefix.is_empty() {
        return None;
    }
    CommandToken::all()
        .iter()
        .copied()
        .find(|cmd| cmd.name().starts_with(&prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_names() {
        assert_eq!(parse_command("/high"), Some(CommandToken::High));
        assert_eq!(parse_command("/medium"), Some(CommandToken::Medium));
        assert_eq!(parse_command("/low"), Some(CommandToken::Low));
        assert_eq!(parse_command("/clear"), Some(CommandToken::Clear));
    }

    #[test]
    fn test_parse_prefixes() {
        assert_eq!(parse_command("/h"), Some(CommandToken::High));
        assert_eq!(parse_command("/me"), Some(CommandToken::Medium));
        assert_eq!(parse_command("/L"), Some(CommandToken::Low));
        assert_eq!(parse_command("  /cl "), Some(CommandToken::Clear));
    }

    #[test]
    fn test_parse_rejects_non_commands() {
        assert_eq!(parse_command("high"), None);
        assert_eq!(parse_command("/"), None);
        assert_eq!(parse_command("/urgent"), None);
        assert_eq!(parse_command("/highest"), None);
    }

    #[test]
    fn test_is_command_input() {
        assert!(is_command_input("/"));
        assert!(is_command_input("/anything"));
        assert!(!is_command_input("Buy milk /high"));
    }

    #[test]
    fn test_matching_commands() {
        assert_eq!(matching_commands("/").len(), 4);
        assert_eq!(matching_commands("/m"), vec![CommandToken::Medium]);
        assert!(matching_commands("/x").is_empty());
        assert!(matching_commands("task").is_empty());
    }

    #[test]
    fn test_command_priority() {
        assert_eq!(CommandToken::High.priority(), Some(Priority::High));
        assert_eq!(CommandToken::Clear.priority(), None);
    }
}
