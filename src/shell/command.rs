/// One line of shell input, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// `ls`
    List,
    /// `cd <dir>` or `cd ..`
    ChangeDir(String),
    /// `take <path>`
    Take(String),
    /// `see`
    See,
    /// `rename`
    Rename,
    /// `help`
    Help,
    /// `exit`
    Exit,
    /// Anything else; carries the command word
    Unknown(String),
}

/// Help lines printed by the `help` command
pub const HELP_LINES: &[&str] = &[
    "ls - list the current directory",
    "cd <dir> - move into a directory (cd .. moves up)",
    "take <path> - select a file for future recovery",
    "see - show the selected file",
    "rename - restore the extension of the selected file",
    "help - show this list",
    "exit - exit the program",
];

impl ShellCommand {
    /// Parse a line of input. Blank lines yield `None`.
    ///
    /// The first word is the command; everything after the first space is the
    /// argument, so paths with spaces survive. Argument validation happens when
    /// the command runs.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (word, argument) = line.split_once(' ').unwrap_or((line, ""));

        Some(match word {
            "ls" => Self::List,
            "cd" => Self::ChangeDir(argument.to_string()),
            "take" => Self::Take(argument.to_string()),
            "see" => Self::See,
            "rename" => Self::Rename,
            "help" => Self::Help,
            "exit" => Self::Exit,
            other => Self::Unknown(other.to_string()),
        })
    }
}
