use std::io::{Read, Write};

use tracing::trace;

use crate::brackets;
use crate::error::ExecError;
use crate::interpreter::Interpreter;

/// One step of a planned line: a bracket-free run, or a loop edge that
/// knows where its partner sits in the step list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step<'a> {
    Run(&'a str),
    Open { close: usize },
    Close { open: usize },
}

/// Split `code` into flat runs and loop edges, pairing every `[` with its `]`.
///
/// Pairing uses a heap stack, so nesting depth is bounded by memory rather
/// than the native call stack.
fn plan(code: &str) -> Result<Vec<Step<'_>>, ExecError> {
    let mut steps = Vec::new();
    let mut pending: Vec<usize> = Vec::new();
    let mut run_start = 0;

    for (i, byte) in code.bytes().enumerate() {
        if byte != brackets::OPEN && byte != brackets::CLOSE {
            continue;
        }
        if run_start < i {
            steps.push(Step::Run(&code[run_start..i]));
        }
        run_start = i + 1;

        if byte == brackets::OPEN {
            pending.push(steps.len());
            // Patched once the partner is seen.
            steps.push(Step::Open { close: 0 });
        } else {
            let open = pending.pop().ok_or(ExecError::UnbalancedBlocks)?;
            let close = steps.len();
            steps[open] = Step::Open { close };
            steps.push(Step::Close { open });
        }
    }

    if !pending.is_empty() {
        return Err(ExecError::UnbalancedBlocks);
    }
    if run_start < code.len() {
        steps.push(Step::Run(&code[run_start..]));
    }
    Ok(steps)
}

impl<R: Read, W: Write> Interpreter<R, W> {
    /// Execute balanced instruction text containing loops.
    ///
    /// Text before the first loop runs once, each loop body runs while the
    /// current cell is nonzero (checked before every pass), and the text
    /// after a loop is then processed the same way, so sibling loops are
    /// resolved left to right. There is no iteration cap: a loop whose cell
    /// never reaches zero runs forever.
    ///
    /// Bracket pairs are resolved once up front. If they do not balance,
    /// [`ExecError::UnbalancedBlocks`] is returned before anything runs.
    pub fn execute_blocks(&mut self, code: &str) -> Result<(), ExecError> {
        let steps = plan(code)?;
        trace!(steps = steps.len(), "planned blocks");

        let mut pc = 0;
        while let Some(step) = steps.get(pc) {
            match *step {
                Step::Run(text) => self.execute_flat(text)?,
                Step::Open { close } if self.tape.get() == 0 => pc = close,
                Step::Open { .. } => {}
                Step::Close { open } if self.tape.get() != 0 => pc = open,
                Step::Close { .. } => {}
            }
            pc += 1;
        }
        Ok(())
    }
}
