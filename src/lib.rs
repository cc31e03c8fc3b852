//! An interactive Brainfuck interpreter with a persistent tape.
//!
//! Each line typed at the `>>> ` prompt runs immediately against the same
//! tape, so cells and the cursor carry over from one input to the next. A
//! line that opens a loop without closing it is continued at `... ` prompts
//! until every `[` has its `]`.
//!
//! Features and behaviors:
//! - Fixed-size tape (256 cells by default) initialized to 0.
//! - Strict cursor bounds: moving left from cell 0 or right past the last
//!   cell is reported and the rest of that input is abandoned.
//! - Cells are `u8` and wrap on increment and decrement.
//! - `,` reads one byte; newline and end of input both store 0.
//! - `.` writes the current cell as a raw byte, immediately.
//! - Characters other than `+-<>.,[]` are ignored, so comments are free.
//!
//! Quick start:
//!
//! ```
//! use bf_repl::{Interpreter, Tape};
//! use std::io;
//!
//! let mut bf = Interpreter::new(Tape::default(), io::empty(), Vec::new());
//! bf.run_instructions("++++++++[>++++++++<-]>+.").unwrap();
//! bf.run_instructions("+.").unwrap();
//! assert_eq!(bf.into_output(), b"AB");
//! ```

mod block;
mod flat;

pub mod brackets;
pub mod config;
pub mod editor;
pub mod error;
pub mod interpreter;
pub mod line;
pub mod logging;
pub mod repl;
pub mod session;
pub mod tape;
pub mod theme;

pub use brackets::BlockState;
pub use config::Config;
pub use error::{ConfigError, Direction, ExecError, SessionError};
pub use interpreter::Interpreter;
pub use line::{LineSource, Prompt};
pub use session::{Session, Submission};
pub use tape::Tape;
