use std::io::{self, IsTerminal, Write};

use tracing::info;

use crate::config::{Config, ModeSetting};
use crate::editor::EditorLines;
use crate::error::SessionError;
use crate::interpreter::Interpreter;
use crate::line::{BareLines, KeyboardInput, LineTracker, SharedInput};
use crate::session::Session;
use crate::tape::Tape;
use crate::theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplMode {
    /// Plain prompts on stdout, lines from buffered stdin.
    Bare,
    /// Line editor with history and highlighting.
    Editor,
}

/// Resolve the configured mode against whether stdin is a TTY.
pub fn select_mode(
    setting: ModeSetting,
    stdin_is_terminal: bool,
) -> Result<ReplMode, SessionError> {
    match setting {
        ModeSetting::Bare => Ok(ReplMode::Bare),
        ModeSetting::Editor if !stdin_is_terminal => Err(SessionError::Editor(
            "stdin is not a TTY (use BF_REPL_MODE=bare)".to_string(),
        )),
        ModeSetting::Editor => Ok(ReplMode::Editor),
        ModeSetting::Auto if stdin_is_terminal => Ok(ReplMode::Editor),
        ModeSetting::Auto => Ok(ReplMode::Bare),
    }
}

/// Entry point from main.rs. Returns the process exit code.
pub fn run(program: &str, config: &Config) -> i32 {
    let mode = match select_mode(config.repl.mode, io::stdin().is_terminal()) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{program}: {e}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    // Install SIGINT (ctrl+c) handler to flush and exit(0) immediately
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(0);
    }) {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        return 1;
    }

    // Banner only if stderr is a TTY
    if config.repl.banner && io::stderr().is_terminal() {
        eprintln!("BrainF**k REPL {}", env!("CARGO_PKG_VERSION"));
        let _ = io::stderr().flush();
    }

    info!(?mode, tape_size = config.tape.size, "starting repl");
    let result = match mode {
        ReplMode::Bare => run_bare(config),
        ReplMode::Editor => run_editor(config),
    };

    // End the session on a fresh line
    let _ = writeln!(io::stdout());
    let _ = io::stdout().flush();

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{program}: REPL error: {e}");
            let _ = io::stderr().flush();
            1
        }
    }
}

/// Prompts and program output share stdout; lines and `,` share stdin.
fn run_bare(config: &Config) -> Result<(), SessionError> {
    let input = SharedInput::new(io::stdin().lock());
    let lines = BareLines::new(input.clone(), io::stdout());
    let interpreter = Interpreter::new(Tape::new(config.tape.size), input, io::stdout());
    Session::new(lines, interpreter).run()
}

/// The editor reads the terminal itself, so `,` gets a separate reader that
/// swallows the Enter after each typed byte.
fn run_editor(config: &Config) -> Result<(), SessionError> {
    let output = LineTracker::new(io::stdout());
    let palette = Palette::from_config(&config.colors);
    let lines = EditorLines::new(palette, config.repl.history_size, output.mid_line())?;
    let input = KeyboardInput::new(io::stdin());
    let interpreter = Interpreter::new(Tape::new(config.tape.size), input, output);
    Session::new(lines, interpreter).run()
}
