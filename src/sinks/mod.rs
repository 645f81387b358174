//! Built-in display sinks
//!
//! Both sinks write to any `std::io::Write`; the binary hands them stdout.

mod json;
mod terminal;

pub use json::JsonSink;
pub use terminal::TerminalSink;
