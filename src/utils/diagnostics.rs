//! User-facing run diagnostics.
//!
//! Messages are grouped per processing phase: the first message after
//! construction or [`Reporter::reset`] is preceded by a blank line. The
//! reporter never terminates the process; after [`Reporter::fatal`] the
//! caller is expected to stop and exit with a failure status.

use crate::domain::model::EntryField;
use crate::utils::error::LedgerError;
use std::fmt;
use std::io::{self, Write};

const INFO_PREFIX: &str = "\x1b[32minfo:\x1b[0m";
const WARNING_PREFIX: &str = "\x1b[33mwarning:\x1b[0m";
const ERROR_PREFIX: &str = "\x1b[31merror:\x1b[0m";

const USAGE_BANNER: &str = "\n\x1b[36musage:\x1b[0m camt2csv --in <XML_FILENAMES_PREFIX> --out <CSV_FILENAME> [--config <MAPPING_FILENAME>]\nfor more details, please see \x1b[36mREADME.md\x1b[0m\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    fn prefix(self) -> &'static str {
        match self {
            Severity::Info => INFO_PREFIX,
            Severity::Warning => WARNING_PREFIX,
            Severity::Error => ERROR_PREFIX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub text: String,
}

/// Non-error messages. Errors are rendered from [`LedgerError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ConfigLoaded {
        file: String,
    },
    StatementLoaded {
        file: String,
    },
    EntrySkipped {
        field: EntryField,
        ordinal: usize,
        file: String,
    },
    UnmappedCode {
        code: String,
        ordinal: usize,
        file: String,
    },
    OutputWritten {
        file: String,
        count: usize,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ConfigLoaded { file } => {
                writeln!(f, "configuration file \"{}\" successfully parsed", file)
            }
            Notice::StatementLoaded { file } => {
                write!(f, "XML file \"{}\" successfully parsed", file)
            }
            Notice::EntrySkipped {
                field,
                ordinal,
                file,
            } => write!(
                f,
                "cannot process \"{}\" field of entry number {} in XML file \"{}\"",
                field, ordinal, file
            ),
            Notice::UnmappedCode {
                code,
                ordinal,
                file,
            } => write!(
                f,
                "cannot map end-to-end code \"{}\" of entry number {} in XML file \"{}\"",
                code, ordinal, file
            ),
            Notice::OutputWritten { file, count } => writeln!(
                f,
                "output file \"{}\" written with \x1b[36m{}\x1b[0m {}",
                file,
                count,
                if *count == 1 { "entry" } else { "entries" }
            ),
        }
    }
}

pub struct Reporter {
    out: Box<dyn Write>,
    first_output: bool,
    history: Vec<Diagnostic>,
}

impl Reporter {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self {
            out,
            first_output: true,
            history: Vec::new(),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Keeps the history but writes nowhere.
    pub fn silent() -> Self {
        Self::new(Box::new(io::sink()))
    }

    pub fn info(&mut self, message: &dyn fmt::Display) {
        self.emit(Severity::Info, message);
    }

    pub fn warning(&mut self, message: &dyn fmt::Display) {
        self.emit(Severity::Warning, message);
    }

    pub fn error(&mut self, message: &dyn fmt::Display) {
        self.emit(Severity::Error, message);
    }

    /// Error line plus the usage banner.
    pub fn fatal(&mut self, err: &LedgerError) {
        self.error(err);
        // console output is best effort
        let _ = writeln!(self.out, "{}", USAGE_BANNER);
        let _ = self.out.flush();
    }

    /// Starts a new phase: the next message gets a leading blank line again.
    pub fn reset(&mut self) {
        self.first_output = true;
    }

    pub fn messages(&self) -> &[Diagnostic] {
        &self.history
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.history
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn emit(&mut self, severity: Severity, message: &dyn fmt::Display) {
        let text = message.to_string();
        if self.first_output {
            let _ = writeln!(self.out);
        }
        self.first_output = false;
        let _ = writeln!(self.out, "{} {}", severity.prefix(), text);
        self.history.push(Diagnostic { severity, text });
    }
}
