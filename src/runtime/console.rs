//! Input/output boundary between the interpreter and whatever presents it
//!
//! The interpreter only talks to a [`Console`]: it writes messages with a
//! severity and asks for a value when it runs a `Captura`. Reading blocks
//! the execution thread until a value is supplied; there is no timeout.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};

use colored::Colorize;

use crate::error::{PqekError, PqekResult};
use crate::types::TypeInfo;

/// Severity of a console message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A message written to a console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
}

impl Message {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

pub trait Console {
    /// Render one message
    fn write(&mut self, message: &str, severity: Severity);

    /// Block until the user supplies a value for a `Captura` of `requested_type`
    fn read_blocking(&mut self, requested_type: TypeInfo) -> PqekResult<String>;

    /// Mark a source line (1-based) as erroneous. Display only.
    fn mark_error_line(&mut self, _line: usize) {}
}

impl<C: Console + ?Sized> Console for &mut C {
    fn write(&mut self, message: &str, severity: Severity) {
        (**self).write(message, severity)
    }

    fn read_blocking(&mut self, requested_type: TypeInfo) -> PqekResult<String> {
        (**self).read_blocking(requested_type)
    }

    fn mark_error_line(&mut self, line: usize) {
        (**self).mark_error_line(line)
    }
}

/// Console on the process's stdout and stdin
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for TerminalConsole {
    fn write(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => println!("{}", message),
            Severity::Success => println!("{}", message.green()),
            Severity::Error => println!("{}", message.red()),
        }
    }

    fn read_blocking(&mut self, _requested_type: TypeInfo) -> PqekResult<String> {
        print!(">> ");
        io::stdout()
            .flush()
            .map_err(|e| PqekError::runtime_error(format!("Failed to write prompt: {}", e), None))?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| PqekError::runtime_error(format!("Failed to read input: {}", e), None))?;
        if read == 0 {
            return Err(PqekError::runtime_error("Input closed before a value was supplied", None));
        }

        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }
}

/// Console whose input is handed over through a single-slot channel
///
/// The execution thread owns the `ChannelConsole`; the presenting side keeps
/// the [`ConsoleHandle`] to receive messages and supply captured values.
#[derive(Debug)]
pub struct ChannelConsole {
    messages: Sender<Message>,
    input: Receiver<String>,
}

/// Presenter side of a [`ChannelConsole`]
#[derive(Debug)]
pub struct ConsoleHandle {
    messages: Receiver<Message>,
    input: SyncSender<String>,
}

impl ChannelConsole {
    pub fn new() -> (ChannelConsole, ConsoleHandle) {
        let (message_tx, message_rx) = mpsc::channel();
        let (input_tx, input_rx) = mpsc::sync_channel(1);
        (
            ChannelConsole {
                messages: message_tx,
                input: input_rx,
            },
            ConsoleHandle {
                messages: message_rx,
                input: input_tx,
            },
        )
    }
}

impl Console for ChannelConsole {
    fn write(&mut self, message: &str, severity: Severity) {
        // A dropped handle just means nobody is watching any more
        let _ = self.messages.send(Message::new(message, severity));
    }

    fn read_blocking(&mut self, _requested_type: TypeInfo) -> PqekResult<String> {
        self.input.recv().map_err(|_| {
            PqekError::runtime_error("Input channel closed before a value was supplied", None)
        })
    }
}

impl ConsoleHandle {
    /// Hand a value to the waiting `Captura`. Blocks while a previous value
    /// is still unread. Returns `false` if the console is gone.
    pub fn supply(&self, value: impl Into<String>) -> bool {
        self.input.send(value.into()).is_ok()
    }

    /// Wait for the next message; `None` once the console is dropped and drained
    pub fn recv(&self) -> Option<Message> {
        self.messages.recv().ok()
    }

    /// Messages already written, without waiting
    pub fn drain(&self) -> Vec<Message> {
        self.messages.try_iter().collect()
    }
}

/// Console with scripted input that records everything written to it
#[derive(Debug, Default)]
pub struct MemoryConsole {
    inputs: VecDeque<String>,
    messages: Vec<Message>,
    error_lines: Vec<usize>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Console that answers reads with `inputs`, in order
    pub fn with_inputs<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Texts of the messages with the given severity
    pub fn texts(&self, severity: Severity) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.severity == severity)
            .map(|m| m.text.as_str())
            .collect()
    }

    pub fn error_lines(&self) -> &[usize] {
        &self.error_lines
    }
}

impl Console for MemoryConsole {
    fn write(&mut self, message: &str, severity: Severity) {
        self.messages.push(Message::new(message, severity));
    }

    fn read_blocking(&mut self, requested_type: TypeInfo) -> PqekResult<String> {
        self.inputs.pop_front().ok_or_else(|| {
            PqekError::runtime_error(format!("No input left for a value of type {}", requested_type), None)
        })
    }

    fn mark_error_line(&mut self, line: usize) {
        self.error_lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_memory_console_records_and_answers() {
        let mut console = MemoryConsole::with_inputs(["12"]);
        console.write("hello", Severity::Info);
        console.write("boom", Severity::Error);
        console.mark_error_line(3);

        assert_eq!(console.read_blocking(TypeInfo::Entero).unwrap(), "12");
        assert!(console.read_blocking(TypeInfo::Entero).is_err());
        assert_eq!(console.texts(Severity::Error), vec!["boom"]);
        assert_eq!(console.error_lines(), &[3]);
    }

    #[test]
    fn test_channel_console_blocks_until_supplied() {
        let (mut console, handle) = ChannelConsole::new();

        let worker = thread::spawn(move || {
            console.write("waiting", Severity::Info);
            console.read_blocking(TypeInfo::Texto)
        });

        assert_eq!(handle.recv(), Some(Message::new("waiting", Severity::Info)));
        assert!(handle.supply("hola"));
        assert_eq!(worker.join().unwrap().unwrap(), "hola");
    }

    #[test]
    fn test_channel_console_fails_when_handle_dropped() {
        let (mut console, handle) = ChannelConsole::new();
        drop(handle);
        assert!(console.read_blocking(TypeInfo::Entero).is_err());
    }
}
