//! Interactive line source backed by `reedline`.

use std::borrow::Cow;
use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;

use nu_ansi_term::Style;
use reedline::{
    default_emacs_keybindings, Emacs, FileBackedHistory, Highlighter, KeyCode, KeyModifiers,
    PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, Reedline, ReedlineEvent,
    Signal, StyledText,
};

use crate::error::SessionError;
use crate::line::{LineSource, Prompt};
use crate::theme::Palette;

/// Reads lines through a reedline editor with `>>> ` / `... ` prompts.
pub struct EditorLines {
    editor: Reedline,
    mid_line: Rc<Cell<bool>>,
}

impl EditorLines {
    /// `mid_line` is set by the program output writer when the last byte it
    /// wrote was not a newline.
    pub fn new(
        palette: Palette,
        history_size: usize,
        mid_line: Rc<Cell<bool>>,
    ) -> Result<Self, SessionError> {
        let mut keybindings = default_emacs_keybindings();
        // Alt+Up/Alt+Down or Ctrl+Up/Ctrl+Down to navigate history items.
        keybindings.add_binding(KeyModifiers::ALT, KeyCode::Up, ReedlineEvent::PreviousHistory);
        keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Up, ReedlineEvent::PreviousHistory);
        keybindings.add_binding(KeyModifiers::ALT, KeyCode::Down, ReedlineEvent::NextHistory);
        keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Down, ReedlineEvent::NextHistory);

        let history = FileBackedHistory::new(history_size)
            .map_err(|e| SessionError::Editor(e.to_string()))?;

        let editor = Reedline::create()
            .with_highlighter(Box::new(InstructionHighlighter { palette }))
            .with_history(Box::new(history))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        Ok(Self { editor, mid_line })
    }
}

impl LineSource for EditorLines {
    fn read_line(&mut self, prompt: Prompt) -> io::Result<Option<String>> {
        // Keep the editor from painting over unterminated program output.
        if self.mid_line.replace(false) {
            let mut stdout = io::stdout();
            stdout.write_all(b"\n")?;
            stdout.flush()?;
        }

        match self.editor.read_line(&EditorPrompt(prompt))? {
            Signal::Success(line) => Ok(Some(line)),
            // Ctrl+C and Ctrl+D both end the session
            _ => Ok(None),
        }
    }
}

struct EditorPrompt(Prompt);

impl reedline::Prompt for EditorPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.0.text())
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(Prompt::CONTINUATION)
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({prefix}reverse-search: {}) ", history_search.term))
    }
}

struct InstructionHighlighter {
    palette: Palette,
}

impl Highlighter for InstructionHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();
        let mut run: Option<(usize, Style)> = None;

        for (at, ch) in line.char_indices() {
            let style = self.palette.style_for(ch);
            match run {
                Some((_, current)) if current == style => {}
                Some((start, current)) => {
                    styled.push((current, line[start..at].to_string()));
                    run = Some((at, style));
                }
                None => run = Some((at, style)),
            }
        }

        if let Some((start, style)) = run {
            styled.push((style, line[start..].to_string()));
        }
        styled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_groups_runs_of_the_same_style() {
        let highlighter = InstructionHighlighter { palette: Palette::default() };
        let styled = highlighter.highlight("++[-]ab", 0);
        let pieces: Vec<&str> = styled.buffer.iter().map(|(_, s)| s.as_str()).collect();
        assert_eq!(pieces, vec!["++", "[", "-", "]", "ab"]);
    }

    #[test]
    fn highlight_slices_on_char_boundaries() {
        let highlighter = InstructionHighlighter { palette: Palette::default() };
        let styled = highlighter.highlight("+é-", 0);
        let pieces: Vec<&str> = styled.buffer.iter().map(|(_, s)| s.as_str()).collect();
        assert_eq!(pieces, vec!["+", "é", "-"]);
    }

    #[test]
    fn highlight_of_empty_line_is_empty() {
        let highlighter = InstructionHighlighter { palette: Palette::default() };
        assert!(highlighter.highlight("", 0).buffer.is_empty());
    }

    #[test]
    fn prompt_renders_session_prompts() {
        use reedline::Prompt as _;
        assert_eq!(EditorPrompt(Prompt::Primary).render_prompt_left(), ">>> ");
        assert_eq!(EditorPrompt(Prompt::Continuation).render_prompt_left(), "... ");
        assert_eq!(EditorPrompt(Prompt::Repeat).render_prompt_left(), ">>> ");
    }
}
