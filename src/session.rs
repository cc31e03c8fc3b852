//! The interactive loop: read a line, wait for open blocks to close, run it.

use std::io::{Read, Write};

use tracing::{debug, info};

use crate::brackets::{self, BlockState};
use crate::error::{ExecError, SessionError};
use crate::interpreter::Interpreter;
use crate::line::{LineSource, Prompt};

/// Outcome of reading one complete program fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Balanced text ready to run. May span several input lines.
    Ready(String),
    /// A close marker appeared before its opener; nothing should run.
    Unbalanced,
}

/// An interactive session over a persistent interpreter.
pub struct Session<L, R, W> {
    lines: L,
    interpreter: Interpreter<R, W>,
}

impl<L: LineSource, R: Read, W: Write> Session<L, R, W> {
    pub fn new(lines: L, interpreter: Interpreter<R, W>) -> Self {
        Self { lines, interpreter }
    }

    pub fn interpreter(&self) -> &Interpreter<R, W> {
        &self.interpreter
    }

    pub fn into_parts(self) -> (L, Interpreter<R, W>) {
        (self.lines, self.interpreter)
    }

    /// Run until the line source reaches end of input.
    pub fn run(&mut self) -> Result<(), SessionError> {
        info!("session started");
        while self.step()? {}
        info!("session ended");
        Ok(())
    }

    /// Handle one top-level input. Returns `false` once input is exhausted.
    pub fn step(&mut self) -> Result<bool, SessionError> {
        let Some(submission) = self.read_submission()? else {
            return Ok(false);
        };

        let result = match submission {
            Submission::Ready(code) => self.interpreter.run_instructions(&code),
            Submission::Unbalanced => Err(ExecError::UnbalancedBlocks),
        };

        match result {
            Ok(()) => Ok(true),
            Err(ExecError::Io(e)) => Err(SessionError::ProgramIo(e)),
            Err(err) => {
                debug!(%err, cursor = self.interpreter.tape().cursor(), "input abandoned");
                self.report(&err)?;
                Ok(true)
            }
        }
    }

    /// Read one top-level line and, while its blocks are open, keep
    /// appending continuation lines until they close or turn invalid.
    ///
    /// Empty top-level lines are skipped. `Ok(None)` means end of input,
    /// including end of input in the middle of an open block.
    pub fn read_submission(&mut self) -> Result<Option<Submission>, SessionError> {
        let mut prompt = Prompt::Primary;
        let mut code = loop {
            match self.read_line(prompt)? {
                None => return Ok(None),
                Some(line) if line.is_empty() => prompt = Prompt::Repeat,
                Some(line) => break line,
            }
        };

        loop {
            match brackets::classify(&code) {
                BlockState::Closed => return Ok(Some(Submission::Ready(code))),
                BlockState::Invalid => return Ok(Some(Submission::Unbalanced)),
                BlockState::Open => {
                    let Some(more) = self.read_line(Prompt::Continuation)? else {
                        debug!(pending = code.len(), "end of input inside an open block");
                        return Ok(None);
                    };
                    debug!(line = %more, "continuation line");
                    code.push_str(&more);
                }
            }
        }
    }

    fn read_line(&mut self, prompt: Prompt) -> Result<Option<String>, SessionError> {
        self.lines.read_line(prompt).map_err(SessionError::Input)
    }

    fn report(&mut self, err: &ExecError) -> Result<(), SessionError> {
        let out = self.interpreter.output_mut();
        writeln!(out, "{err}").map_err(SessionError::Output)?;
        out.flush().map_err(SessionError::Output)
    }
}
