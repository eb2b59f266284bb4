//! User-facing texts.

use strum::Display;
use vfm_core::{DEFAULT_MAX_DEPTH, DisplayLine, LineBuffer};

/// Fixed messages shown in the frame and on the message line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Message {
    #[strum(serialize = " vfm ")]
    AppName,
    #[strum(serialize = ":>")]
    Prompt,
    #[strum(serialize = "Enter a command (help - list of commands)")]
    Greeting,
    #[strum(serialize = "Wrong command.")]
    WrongCommand,
    #[strum(serialize = "Wrong arguments.")]
    WrongArguments,
    #[strum(serialize = "Wrong path.")]
    WrongPath,
    #[strum(serialize = "Wrong source path.")]
    WrongSourcePath,
    #[strum(serialize = "Wrong destination path.")]
    WrongDestinationPath,
    #[strum(serialize = "File already exists.")]
    FileExists,
    #[strum(serialize = "Directory already exists.")]
    DirExists,
    #[strum(serialize = "pageUp/pageDown (or arrows) - change pages. Q/Esc - stop.")]
    ListHint,
    #[strum(serialize = "Success.")]
    Success,
    #[strum(serialize = "Operation failed.")]
    Failure,
    #[strum(serialize = "The window is too small.")]
    TooSmall,
}

impl Message {
    /// The message as a line for the message pane.
    pub fn line(self) -> DisplayLine {
        match self {
            Self::Greeting => DisplayLine::new()
                .standard("Enter a command (")
                .command("help")
                .standard(" - list of commands)"),
            Self::Success | Self::ListHint => DisplayLine::new().command(self.to_string()),
            _ => DisplayLine::new().argument(self.to_string()),
        }
    }
}

/// `Version: x.y.z`
pub fn version_line() -> DisplayLine {
    DisplayLine::new()
        .command("Version: ")
        .standard(env!("CARGO_PKG_VERSION"))
}

/// Command, argument synopsis, description.
const MANUAL: &[(&str, &str, &str)] = &[
    ("help", "", "this list"),
    ("dir", " [<path>] [-p <page>] [-l <levels>]", "directory tree"),
    ("files", " [<path>] [-p <page>]", "files of a directory"),
    ("info", " [<path>]", "details of a file or directory"),
    ("copy", " <file> <destination dir>", "copy a file into a directory"),
    ("move", " <file> <destination dir>", "move a file into a directory"),
    ("del", " <file>", "delete a file"),
    ("dcopy", " <dir> <destination dir>", "copy a directory into another"),
    ("dmove", " <dir> <destination dir>", "move a directory into another"),
    ("ddel", " <dir>", "delete a directory and everything in it"),
    ("log", "", "show the log file"),
    ("version", "", "show the program version"),
    ("exit", "", "save settings and quit"),
];

/// The help text shown by `help`.
pub fn manual() -> LineBuffer {
    let mut buffer = LineBuffer::new("List of commands");
    buffer.extend(MANUAL.iter().map(|(command, args, description)| {
        DisplayLine::new()
            .command(command)
            .argument(args)
            .standard(format!(" - {description}"))
    }));
    buffer.push(DisplayLine::new());
    buffer.push(
        DisplayLine::new()
            .argument("..")
            .standard(" means the parent directory; a missing <path> means the current one."),
    );
    buffer.push(DisplayLine::new().standard(format!(
        "Pages start at 1; the tree shows {DEFAULT_MAX_DEPTH} levels unless -l says otherwise."
    )));
    buffer.push(DisplayLine::new().standard("Put paths containing spaces in double quotes."));
    buffer
}
