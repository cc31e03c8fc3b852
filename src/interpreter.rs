use std::io::{Read, Write};

use crate::brackets::{self, BlockState};
use crate::error::ExecError;
use crate::tape::Tape;

/// Executes instruction text against a persistent [`Tape`].
///
/// The interpreter owns:
/// - the tape and its cursor, which survive across calls,
/// - the input source that `,` reads bytes from,
/// - the output sink that `.` writes bytes to.
///
/// Instruction execution lives in two engines: [`Interpreter::execute_flat`]
/// for bracket-free text and [`Interpreter::execute_blocks`] for text with
/// loops.
pub struct Interpreter<R, W> {
    pub(crate) tape: Tape,
    pub(crate) input: R,
    pub(crate) output: W,
}

impl<R: Read, W: Write> Interpreter<R, W> {
    pub fn new(tape: Tape, input: R, output: W) -> Self {
        Self { tape, input, output }
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Validate and execute one complete unit of program text.
    ///
    /// Text whose brackets are not balanced is rejected with
    /// [`ExecError::UnbalancedBlocks`] before anything runs. On any other
    /// error the tape keeps whatever effects were applied before it.
    pub fn run_instructions(&mut self, code: &str) -> Result<(), ExecError> {
        match brackets::classify(code) {
            BlockState::Invalid | BlockState::Open => Err(ExecError::UnbalancedBlocks),
            BlockState::Closed if brackets::has_brackets(code) => self.execute_blocks(code),
            BlockState::Closed => self.execute_flat(code),
        }
    }

    /// Write the cell under the cursor to the output sink immediately.
    pub(crate) fn write_cell(&mut self) -> Result<(), ExecError> {
        self.output.write_all(&[self.tape.get()])?;
        self.output.flush()?;
        Ok(())
    }

    /// Read one byte into the cell under the cursor.
    ///
    /// A newline or end of input stores 0.
    pub(crate) fn read_cell(&mut self) -> Result<(), ExecError> {
        let mut buf = [0u8; 1];
        let value = match self.input.read(&mut buf)? {
            0 => 0,
            _ if buf[0] == b'\n' => 0,
            _ => buf[0],
        };
        self.tape.set(value);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Direction;
    use std::io::Cursor;

    pub(crate) type TestInterpreter = Interpreter<Cursor<Vec<u8>>, Vec<u8>>;

    pub(crate) fn interpreter(input: &[u8]) -> TestInterpreter {
        Interpreter::new(Tape::default(), Cursor::new(input.to_vec()), Vec::new())
    }

    #[test]
    fn output_is_the_raw_cell_value() {
        let mut bf = interpreter(b"");
        bf.run_instructions("+++.").unwrap();
        assert_eq!(bf.output(), &vec![3u8]);
    }

    #[test]
    fn loop_clears_cell() {
        let mut bf = interpreter(b"");
        bf.run_instructions("+++[-]").unwrap();
        assert_eq!(bf.tape().get(), 0);
    }

    #[test]
    fn lone_close_is_rejected_without_mutation() {
        let mut bf = interpreter(b"");
        let err = bf.run_instructions("]").unwrap_err();
        assert!(matches!(err, ExecError::UnbalancedBlocks));
        assert_eq!(bf.tape(), &Tape::default());
    }

    #[test]
    fn open_text_is_rejected_without_mutation() {
        let mut bf = interpreter(b"");
        let err = bf.run_instructions("+[+").unwrap_err();
        assert!(matches!(err, ExecError::UnbalancedBlocks));
        assert_eq!(bf.tape().get(), 0);
    }

    #[test]
    fn state_persists_between_calls() {
        let mut bf = interpreter(b"");
        bf.run_instructions("++>").unwrap();
        bf.run_instructions("+<.").unwrap();
        assert_eq!(bf.tape().cursor(), 0);
        assert_eq!(bf.tape().cells()[1], 1);
        assert_eq!(bf.output(), &vec![2u8]);
    }

    #[test]
    fn out_of_bounds_keeps_earlier_effects() {
        let mut bf = interpreter(b"");
        let err = bf.run_instructions("++<+").unwrap_err();
        assert!(matches!(err, ExecError::OutOfBounds(Direction::Left)));
        assert_eq!(bf.tape().get(), 2);
    }

    #[test]
    fn input_reads_bytes_and_maps_newline_and_eof_to_zero() {
        let mut bf = interpreter(b"A\n");
        bf.run_instructions(",.").unwrap();
        assert_eq!(bf.tape().get(), b'A');
        bf.run_instructions(",").unwrap();
        assert_eq!(bf.tape().get(), 0);
        bf.run_instructions("+,").unwrap();
        assert_eq!(bf.tape().get(), 0);
        assert_eq!(bf.output(), &vec![b'A']);
    }
}
