//! Line acquisition for the session.

use std::cell::{Cell, RefCell};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::rc::Rc;

/// Which prompt precedes a line read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// A new top-level input: `>>> `.
    Primary,
    /// More text for a block that is still open: `... `.
    Continuation,
    /// Re-read after an empty top-level line. Plain sources print nothing.
    Repeat,
}

impl Prompt {
    pub const PRIMARY: &'static str = ">>> ";
    pub const CONTINUATION: &'static str = "... ";

    pub fn text(self) -> &'static str {
        match self {
            Prompt::Primary | Prompt::Repeat => Self::PRIMARY,
            Prompt::Continuation => Self::CONTINUATION,
        }
    }
}

/// Something that yields one line of user text at a time.
pub trait LineSource {
    /// Read one line without its terminator. `Ok(None)` means end of input.
    fn read_line(&mut self, prompt: Prompt) -> io::Result<Option<String>>;
}

/// A buffered reader shared between the line source and the `,` instruction,
/// so both consume the same stream in order.
pub struct SharedInput<R>(Rc<RefCell<R>>);

impl<R> SharedInput<R> {
    pub fn new(reader: R) -> Self {
        Self(Rc::new(RefCell::new(reader)))
    }
}

impl<R> Clone for SharedInput<R> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<R: Read> Read for SharedInput<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.borrow_mut().read(buf)
    }
}

/// Plain line source: writes prompts to `prompt_out`, reads lines from a
/// shared buffered reader.
pub struct BareLines<R, W> {
    input: SharedInput<R>,
    prompt_out: W,
}

impl<R: BufRead, W: Write> BareLines<R, W> {
    pub fn new(input: SharedInput<R>, prompt_out: W) -> Self {
        Self { input, prompt_out }
    }
}

impl<R: BufRead, W: Write> LineSource for BareLines<R, W> {
    fn read_line(&mut self, prompt: Prompt) -> io::Result<Option<String>> {
        if prompt != Prompt::Repeat {
            self.prompt_out.write_all(prompt.text().as_bytes())?;
            self.prompt_out.flush()?;
        }

        let mut raw = Vec::new();
        if self.input.0.borrow_mut().read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        if raw.last() == Some(&b'\n') {
            raw.pop();
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
    }
}

/// Program input for editor mode, where lines come from the terminal directly
/// and `,` reads its own line of keystrokes.
///
/// The line terminator that follows a consumed byte is dropped along with it,
/// so the next `,` waits for the user instead of reading a leftover newline.
/// Only bytes already buffered are inspected; this never blocks.
pub struct KeyboardInput<R> {
    inner: BufReader<R>,
}

impl<R: Read> KeyboardInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
        }
    }
}

impl<R: Read> Read for KeyboardInput<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 || buf[n - 1] == b'\n' {
            return Ok(n);
        }
        let terminator = match self.inner.buffer() {
            [b'\n', ..] => 1,
            [b'\r', b'\n', ..] => 2,
            _ => 0,
        };
        self.inner.consume(terminator);
        Ok(n)
    }
}

/// Output wrapper that remembers whether the last byte written ended a line.
pub struct LineTracker<W> {
    inner: W,
    mid_line: Rc<Cell<bool>>,
}

impl<W: Write> LineTracker<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            mid_line: Rc::new(Cell::new(false)),
        }
    }

    /// Handle for checking and clearing the mid-line flag elsewhere.
    pub fn mid_line(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.mid_line)
    }
}

impl<W: Write> Write for LineTracker<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        if let Some(&last) = buf[..n].last() {
            self.mid_line.set(last != b'\n');
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Cursor;

    /// Scripted line source that records which prompts were asked for.
    pub(crate) struct ScriptedLines {
        lines: VecDeque<String>,
        pub(crate) prompts: Vec<Prompt>,
    }

    impl ScriptedLines {
        pub(crate) fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|l| l.to_string()).collect(),
                prompts: Vec::new(),
            }
        }
    }

    impl LineSource for ScriptedLines {
        fn read_line(&mut self, prompt: Prompt) -> io::Result<Option<String>> {
            self.prompts.push(prompt);
            Ok(self.lines.pop_front())
        }
    }

    #[test]
    fn bare_lines_strip_terminators_and_print_prompts() {
        let input = SharedInput::new(Cursor::new(b"+++\r\n>.\nlast".to_vec()));
        let mut lines = BareLines::new(input, Vec::new());

        assert_eq!(lines.read_line(Prompt::Primary).unwrap().as_deref(), Some("+++"));
        assert_eq!(lines.read_line(Prompt::Continuation).unwrap().as_deref(), Some(">."));
        assert_eq!(lines.read_line(Prompt::Repeat).unwrap().as_deref(), Some("last"));
        assert_eq!(lines.read_line(Prompt::Primary).unwrap(), None);
        assert_eq!(lines.prompt_out, b">>> ... >>> ".to_vec());
    }

    #[test]
    fn shared_input_interleaves_with_line_reads() {
        let input = SharedInput::new(Cursor::new(b",\nZ\n+\n".to_vec()));
        let mut byte_reader = input.clone();
        let mut lines = BareLines::new(input, io::sink());

        assert_eq!(lines.read_line(Prompt::Primary).unwrap().as_deref(), Some(","));
        let mut buf = [0u8; 1];
        byte_reader.read_exact(&mut buf).unwrap();
        assert_eq!(buf[0], b'Z');
        assert_eq!(lines.read_line(Prompt::Primary).unwrap().as_deref(), Some(""));
        assert_eq!(lines.read_line(Prompt::Primary).unwrap().as_deref(), Some("+"));
    }

    #[test]
    fn tracker_follows_last_byte() {
        let mut out = LineTracker::new(Vec::new());
        let flag = out.mid_line();
        assert!(!flag.get());
        out.write_all(b"A").unwrap();
        assert!(flag.get());
        out.write_all(b"B\n").unwrap();
        assert!(!flag.get());
    }

    fn read_byte(input: &mut impl Read) -> Option<u8> {
        let mut buf = [0u8; 1];
        match input.read(&mut buf).unwrap() {
            0 => None,
            _ => Some(buf[0]),
        }
    }

    #[test]
    fn keyboard_input_drops_the_newline_after_a_byte() {
        let mut input = KeyboardInput::new(Cursor::new(b"Z\nY\r\n".to_vec()));
        assert_eq!(read_byte(&mut input), Some(b'Z'));
        assert_eq!(read_byte(&mut input), Some(b'Y'));
        assert_eq!(read_byte(&mut input), None);
    }

    #[test]
    fn keyboard_input_keeps_the_rest_of_a_typed_line() {
        let mut input = KeyboardInput::new(Cursor::new(b"AB\n".to_vec()));
        assert_eq!(read_byte(&mut input), Some(b'A'));
        assert_eq!(read_byte(&mut input), Some(b'B'));
        assert_eq!(read_byte(&mut input), None);
    }

    #[test]
    fn keyboard_input_passes_a_bare_enter_through() {
        let mut input = KeyboardInput::new(Cursor::new(b"\nQ\n".to_vec()));
        assert_eq!(read_byte(&mut input), Some(b'\n'));
        assert_eq!(read_byte(&mut input), Some(b'Q'));
        assert_eq!(read_byte(&mut input), None);
    }
}
