use std::io::{self, Write};

use crawlchat_core::Role;

use super::constants::{BOT_LABEL, USER_LABEL};

/// Output primitives of the line-oriented terminal front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Title(String),
    Message { role: Role, text: String },
    /// Bot-side text that is not part of the conversation log.
    Placeholder(&'static str),
    Status(String),
    Notice(String),
    /// Question without a trailing newline; the answer is the next input line.
    Prompt(String),
}

pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn execute(&mut self, commands: &[ConsoleCommand]) -> io::Result<()> {
        for command in commands {
            match command {
                ConsoleCommand::Title(text) => {
                    writeln!(self.out, "{text}")?;
                    writeln!(self.out, "{}", "=".repeat(text.chars().count()))?;
                }
                ConsoleCommand::Message { role, text } => {
                    let label = match role {
                        Role::User => USER_LABEL,
                        Role::Bot => BOT_LABEL,
                    };
                    self.write_labelled(label, text)?;
                }
                ConsoleCommand::Placeholder(text) => {
                    writeln!(self.out, "{BOT_LABEL}> ({text})")?;
                }
                ConsoleCommand::Status(text) => writeln!(self.out, "[status] {text}")?,
                ConsoleCommand::Notice(text) => writeln!(self.out, "-- {text}")?,
                ConsoleCommand::Prompt(text) => write!(self.out, "{text}")?,
            }
        }
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn write_labelled(&mut self, label: &str, text: &str) -> io::Result<()> {
        let indent = " ".repeat(label.len() + 2);
        let mut lines = text.lines();
        writeln!(self.out, "{label}> {}", lines.next().unwrap_or_default())?;
        for line in lines {
            writeln!(self.out, "{indent}{line}")?;
        }
        Ok(())
    }
}
