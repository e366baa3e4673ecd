//! Interactive raw-mode terminal.
//!
//! Every key press goes to the session's secret-sequence detector before
//! it is interpreted as editing, so arrow keys both walk the history and
//! count towards the code.

use crate::render::Renderer;
use crate::repl::{is_exit, TranscriptCursor};
use anyhow::Result;
use crossterm::cursor::{MoveTo, MoveToColumn};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use shellfolio_core::{Key, TerminalSession};
use std::io::{self, Write};
use tracing::debug;

/// Restores cooked mode when dropped, including on early return.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            debug!(error = %e, "failed to leave raw mode");
        }
    }
}

pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

struct Screen<'a> {
    out: io::Stdout,
    renderer: &'a Renderer,
    cursor: TranscriptCursor,
}

impl Screen<'_> {
    /// Replace the prompt line with any new transcript lines, then redraw
    /// the prompt.
    fn refresh(&mut self, session: &TerminalSession, draft: &str) -> io::Result<()> {
        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        let (cleared, lines) = self.cursor.take(session);
        if cleared {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        for line in lines {
            write!(self.out, "{}\r\n", self.renderer.line(line))?;
        }
        let shown = if session.awaiting_password() {
            "*".repeat(draft.chars().count())
        } else {
            draft.to_string()
        };
        write!(self.out, "{}{}", self.renderer.prompt(), shown)?;
        self.out.flush()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Apply one key press to the session and the draft line.
fn handle_key(
    session: &mut TerminalSession,
    draft: &mut String,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Flow {
    if session.handle_key(map_key(code)) {
        // The sequence's trailing letters are not input
        draft.clear();
        return Flow::Continue;
    }

    match (code, modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL)
        | (KeyCode::Char('d'), KeyModifiers::CONTROL) => return Flow::Exit,
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => session.clear(),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => draft.clear(),
        (KeyCode::Enter, _) => {
            let line = std::mem::take(draft);
            session.submit(&line);
            if is_exit(&line) {
                return Flow::Exit;
            }
        }
        (KeyCode::Backspace, _) => {
            draft.pop();
        }
        (KeyCode::Up, _) => {
            if let Some(previous) = session.history_back() {
                *draft = previous.to_string();
            }
        }
        (KeyCode::Down, _) => {
            *draft = session.history_forward().to_string();
        }
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            draft.push(c);
        }
        _ => {}
    }
    Flow::Continue
}

pub fn run_interactive(session: &mut TerminalSession, renderer: &Renderer) -> Result<()> {
    let _guard = RawModeGuard::enable()?;
    let mut screen = Screen {
        out: io::stdout(),
        renderer,
        cursor: TranscriptCursor::new(),
    };
    let mut draft = String::new();

    session.greet();
    screen.refresh(session, &draft)?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if handle_key(session, &mut draft, key.code, key.modifiers) == Flow::Exit {
            screen.refresh(session, "")?;
            break;
        }
        screen.refresh(session, &draft)?;
    }

    execute!(screen.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    Ok(())
}
