use std::io::{Read, Write};

use crate::brackets;
use crate::error::ExecError;
use crate::interpreter::Interpreter;

impl<R: Read, W: Write> Interpreter<R, W> {
    /// Execute bracket-free instruction text left to right.
    ///
    /// Characters outside `+-<>.,` are ignored so comments and whitespace
    /// can sit between instructions. The first failing instruction stops the
    /// call; everything before it has already been applied.
    pub fn execute_flat(&mut self, code: &str) -> Result<(), ExecError> {
        debug_assert!(
            !brackets::has_brackets(code),
            "flat executor called with bracketed text: {code:?}"
        );

        for byte in code.bytes() {
            match byte {
                b'+' => self.tape.increment(),
                b'-' => self.tape.decrement(),
                b'>' => self.tape.move_right()?,
                b'<' => self.tape.move_left()?,
                b'.' => self.write_cell()?,
                b',' => self.read_cell()?,
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{Direction, ExecError};
    use crate::interpreter::tests::interpreter;

    #[test]
    fn comments_and_whitespace_are_inert() {
        let mut bf = interpreter(b"");
        bf.execute_flat("add two: + +\tthen print .").unwrap();
        assert_eq!(bf.tape().get(), 2);
        assert_eq!(bf.output(), &vec![2u8]);
    }

    #[test]
    fn right_bound_stops_the_rest_of_the_call() {
        let mut bf = interpreter(b"");
        assert_eq!(bf.tape().len(), 256);
        bf.execute_flat(&">".repeat(255)).unwrap();
        assert_eq!(bf.tape().cursor(), 255);

        let err = bf.execute_flat(">+").unwrap_err();
        assert!(matches!(err, ExecError::OutOfBounds(Direction::Right)));
        assert_eq!(bf.tape().cursor(), 255);
        assert_eq!(bf.tape().get(), 0);
    }

    #[test]
    fn left_bound_stops_the_rest_of_the_call() {
        let mut bf = interpreter(b"");
        let err = bf.execute_flat("<+.").unwrap_err();
        assert!(matches!(err, ExecError::OutOfBounds(Direction::Left)));
        assert_eq!(bf.tape().get(), 0);
        assert!(bf.output().is_empty());
    }

    #[test]
    fn moves_between_cells() {
        let mut bf = interpreter(b"");
        bf.execute_flat("+>++>+++<").unwrap();
        assert_eq!(bf.tape().cursor(), 1);
        assert_eq!(&bf.tape().cells()[..3], &[1, 2, 3]);
    }
}
