//! Minimal interactive shell for navigating, selecting and renaming.
//!
//! Every command runs to completion before the next line is read. Failures
//! from the core are caught at dispatch and printed as one line, so a bad
//! command never ends the session.
//!
//! ```text
//! /home/me/downloads$ take invoice
//! /home/me/downloads$ rename
//! file renamed to: invoice.pdf
//! ```

pub mod command;
pub mod console;

use std::io::BufRead;
use tracing::{debug, info};

use crate::core::error::RestoreError;
use crate::detection::resolver::TypeResolver;
use crate::restore::rename_selected;
use crate::session::{Navigation, Session};
use command::{ShellCommand, HELP_LINES};
use console::Console;

/// Whether the read loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<'a, C: Console> {
    session: Session,
    resolver: TypeResolver<'a>,
    console: C,
}

impl<'a, C: Console> Shell<'a, C> {
    pub fn new(session: Session, resolver: TypeResolver<'a>, console: C) -> Self {
        Self {
            session,
            resolver,
            console,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Read commands from `input` until `exit` or end of input
    ///
    /// A line that is not valid UTF-8 is reported like any failed command
    /// and the loop keeps reading.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading `input` fails.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> std::io::Result<()> {
        info!("Shell started in {}", self.session.current_dir().display());
        self.console.notify("type \"help\" to view the commands");
        self.show_prompt();

        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if input.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }

            match std::str::from_utf8(&buffer) {
                Ok(line) => {
                    if let Some(command) = ShellCommand::parse(line) {
                        if self.execute(command) == Flow::Exit {
                            return Ok(());
                        }
                    }
                }
                Err(e) => self.report(&RestoreError::InvalidArgument(format!(
                    "command is not valid UTF-8 ({e})"
                ))),
            }
            self.show_prompt();
        }

        debug!("End of input, leaving shell");
        Ok(())
    }

    /// Run one command, printing any failure instead of returning it
    pub fn execute(&mut self, command: ShellCommand) -> Flow {
        debug!("Executing {command:?}");
        match self.dispatch(command) {
            Ok(flow) => flow,
            Err(e) => {
                self.report(&e);
                Flow::Continue
            }
        }
    }

    fn report(&mut self, error: &RestoreError) {
        self.console
            .notify(&format!("error executing command: {error}"));
    }

    fn dispatch(&mut self, command: ShellCommand) -> Result<Flow, RestoreError> {
        match command {
            ShellCommand::List => {
                for name in self.session.list_current_directory()? {
                    self.console.notify(&format!(" -> {name}"));
                }
            }
            ShellCommand::ChangeDir(target) => match self.session.change_directory(&target)? {
                Navigation::Moved(_) => {}
                Navigation::AtRoot => self
                    .console
                    .notify("already at the filesystem root"),
                Navigation::NotFound(dir) => {
                    self.console.notify(&format!("directory not found: {dir}"));
                }
            },
            ShellCommand::Take(path) => {
                self.session.select_file(&path)?;
            }
            ShellCommand::See => match self.session.selected_file_name() {
                Ok(name) => self.console.notify(&name),
                Err(RestoreError::NotSelected) => {
                    self.console.notify("the file is not selected");
                }
                Err(e) => return Err(e),
            },
            ShellCommand::Rename => {
                rename_selected(&mut self.session, &self.resolver, &mut self.console)?;
            }
            ShellCommand::Help => {
                for line in HELP_LINES {
                    self.console.notify(line);
                }
            }
            ShellCommand::Exit => {
                self.console.notify("exiting...");
                info!("End of the program");
                return Ok(Flow::Exit);
            }
            ShellCommand::Unknown(word) => {
                self.console.notify(&format!("unknown command: {word}"));
            }
        }

        Ok(Flow::Continue)
    }

    fn show_prompt(&mut self) {
        let prompt = format!("{}$ ", self.session.current_dir().display());
        self.console.prompt(&prompt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signatures::SignatureTable;
    use std::path::Path;
    use tempfile::TempDir;

    fn shell_in(dir: &Path) -> Shell<'static, Vec<String>> {
        Shell::new(
            Session::new(dir).unwrap(),
            TypeResolver::new(SignatureTable::embedded().unwrap()),
            Vec::new(),
        )
    }

    fn run(shell: &mut Shell<'static, Vec<String>>, line: &str) -> Flow {
        shell.console_mut().clear();
        shell.execute(ShellCommand::parse(line).unwrap())
    }

    #[test]
    fn test_take_see_rename() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("testfile"), [0x89, 0x50, 0x4E, 0x47]).unwrap();
        let mut shell = shell_in(dir.path());

        run(&mut shell, "see");
        assert_eq!(shell.console_mut().as_slice(), ["the file is not selected"]);

        run(&mut shell, "take testfile");
        assert!(shell.console_mut().is_empty());

        run(&mut shell, "see");
        assert_eq!(shell.console_mut().as_slice(), ["testfile"]);

        run(&mut shell, "rename");
        assert_eq!(
            shell.console_mut().as_slice(),
            ["file renamed to: testfile.png"]
        );

        run(&mut shell, "see");
        assert_eq!(shell.console_mut().as_slice(), ["testfile.png"]);
        assert!(dir.path().join("testfile.png").exists());
    }

    #[test]
    fn test_errors_are_reported_not_returned() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("junk"), [0x00, 0x00, 0x00, 0x00]).unwrap();
        let mut shell = shell_in(dir.path());

        assert_eq!(run(&mut shell, "rename"), Flow::Continue);
        assert_eq!(
            shell.console_mut().as_slice(),
            ["error executing command: the file is not selected"]
        );

        run(&mut shell, "take");
        assert_eq!(
            shell.console_mut().as_slice(),
            ["error executing command: invalid argument: take requires a path"]
        );

        run(&mut shell, "take missing");
        assert!(shell.console_mut()[0].starts_with("error executing command: file not found"));

        run(&mut shell, "take junk");
        run(&mut shell, "rename");
        assert!(shell.console_mut()[0].contains("unknown file type"));
        assert!(dir.path().join("junk").exists());
    }

    #[test]
    fn test_ls_and_cd() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("inner")).unwrap();
        std::fs::write(dir.path().join("inner").join("x.bin"), b"").unwrap();
        let mut shell = shell_in(dir.path());

        run(&mut shell, "ls");
        assert_eq!(shell.console_mut().as_slice(), [" -> inner"]);

        run(&mut shell, "cd inner");
        run(&mut shell, "ls");
        assert_eq!(shell.console_mut().as_slice(), [" -> x.bin"]);

        run(&mut shell, "cd nowhere");
        assert_eq!(
            shell.console_mut().as_slice(),
            ["directory not found: nowhere"]
        );
    }

    #[test]
    fn test_cd_at_root_is_notice() {
        let mut shell = shell_in(Path::new("/"));

        assert_eq!(run(&mut shell, "cd .."), Flow::Continue);
        assert_eq!(
            shell.console_mut().as_slice(),
            ["already at the filesystem root"]
        );
        assert_eq!(shell.session().current_dir(), Path::new("/"));
    }

    #[test]
    fn test_help_unknown_exit() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_in(dir.path());

        run(&mut shell, "help");
        assert_eq!(shell.console_mut().len(), HELP_LINES.len());

        run(&mut shell, "frobnicate now");
        assert_eq!(
            shell.console_mut().as_slice(),
            ["unknown command: frobnicate"]
        );

        assert_eq!(run(&mut shell, "exit"), Flow::Exit);
        assert_eq!(shell.console_mut().as_slice(), ["exiting..."]);
    }

    #[test]
    fn test_run_reads_until_exit() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_in(dir.path());
        let input = "\nhelp\nexit\nls\n";

        shell.run(input.as_bytes()).unwrap();

        let output = shell.into_console();
        assert_eq!(output[0], "type \"help\" to view the commands");
        assert_eq!(output.last().unwrap(), "exiting...");
        // ls after exit never runs
        assert!(!output.iter().any(|line| line.starts_with(" -> ")));
    }

    #[test]
    fn test_run_survives_invalid_utf8_line() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_in(dir.path());

        shell.run(&b"take caf\xe9\nhelp\nexit\n"[..]).unwrap();

        let output = shell.into_console();
        assert!(output
            .iter()
            .any(|line| line.starts_with("error executing command: invalid argument: ")));
        assert!(output.contains(&HELP_LINES[0].to_string()));
        assert_eq!(output.last().unwrap(), "exiting...");
    }

    #[test]
    fn test_run_handles_crlf_and_missing_final_newline() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_in(dir.path());

        shell.run("see\r\nexit".as_bytes()).unwrap();

        let output = shell.into_console();
        assert!(output.contains(&"the file is not selected".to_string()));
        assert_eq!(output.last().unwrap(), "exiting...");
    }

    #[test]
    fn test_run_stops_at_end_of_input() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_in(dir.path());

        shell.run("see\n".as_bytes()).unwrap();

        let output = shell.into_console();
        assert!(output.contains(&"the file is not selected".to_string()));
        assert!(output.last().unwrap().ends_with("$ "));
    }
}
