//! Runtime module
//!
//! This module handles interpretation and execution of PQEK programs.

pub mod console;
pub mod value;
pub mod interpreter;

pub use console::{ChannelConsole, Console, ConsoleHandle, MemoryConsole, Message, Severity, TerminalConsole};
pub use value::Value;
pub use interpreter::Interpreter;
