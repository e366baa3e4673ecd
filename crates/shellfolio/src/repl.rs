//! Line-mode front-end for piped input and one-shot runs.
//!
//! No raw mode and no key events, so the secret sequence can't be entered
//! here; everything else behaves like the interactive terminal.

use crate::render::Renderer;
use anyhow::Result;
use shellfolio_core::{LineKind, TerminalSession, TranscriptLine};
use std::io::{self, BufRead, Write};

/// Tracks which transcript lines a front-end has already shown.
#[derive(Debug, Default, Clone)]
pub struct TranscriptCursor {
    printed: usize,
    clears: u64,
}

impl TranscriptCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines not shown yet. The flag is true when the transcript was
    /// cleared since the last call, in which case the slice starts at the
    /// top.
    pub fn take<'s>(&mut self, session: &'s TerminalSession) -> (bool, &'s [TranscriptLine]) {
        let lines = session.transcript();
        let cleared = session.clear_count() != self.clears;
        let start = if cleared {
            0
        } else {
            self.printed.min(lines.len())
        };
        self.clears = session.clear_count();
        self.printed = lines.len();
        (cleared, &lines[start..])
    }
}

/// Write unseen lines, each followed by `newline`. Returns whether any of
/// them is an error line.
pub fn print_new<W: Write>(
    session: &TerminalSession,
    renderer: &Renderer,
    cursor: &mut TranscriptCursor,
    out: &mut W,
    newline: &str,
) -> io::Result<bool> {
    let (_, lines) = cursor.take(session);
    for line in lines {
        write!(out, "{}{}", renderer.line(line), newline)?;
    }
    out.flush()?;
    Ok(lines.iter().any(|l| l.kind == LineKind::Error))
}

pub fn is_exit(line: &str) -> bool {
    matches!(line.trim(), "exit" | "logout" | "quit")
}

/// Read lines from stdin until EOF or `exit`.
pub fn run_line_mode(session: &mut TerminalSession, renderer: &Renderer) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut cursor = TranscriptCursor::new();

    session.greet();
    print_new(session, renderer, &mut cursor, &mut stdout, "\n")?;

    for line in stdin.lock().lines() {
        let line = line?;
        session.submit(&line);
        print_new(session, renderer, &mut cursor, &mut stdout, "\n")?;
        if is_exit(&line) {
            break;
        }
    }
    Ok(())
}

/// Ask a yes/no question. Anything but `y` or `yes` is a no, as is EOF.
pub fn confirm<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    out: &mut W,
) -> io::Result<bool> {
    write!(out, "{} [y/N] ", question)?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Submit each line in order, printing as it goes. Returns true if any
/// command produced an error line.
pub fn run_lines<W: Write>(
    session: &mut TerminalSession,
    renderer: &Renderer,
    lines: &[String],
    out: &mut W,
) -> Result<bool> {
    let mut cursor = TranscriptCursor::new();
    let mut failed = false;
    for line in lines {
        session.submit(line);
        failed |= print_new(session, renderer, &mut cursor, out, "\n")?;
    }
    Ok(failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shellfolio_core::{Config, MemoryStorage};

    fn session() -> TerminalSession {
        TerminalSession::new(Config::default(), Box::new(MemoryStorage::new()))
    }

    #[test]
    fn test_run_lines_prints_transcript() {
        let mut s = session();
        let renderer = Renderer::new("$ ", false);
        let mut out = Vec::new();
        let failed = run_lines(
            &mut s,
            &renderer,
            &["echo hi".to_string(), "whoami".to_string()],
            &mut out,
        )
        .unwrap();
        assert!(!failed);
        assert_eq!(String::from_utf8(out).unwrap(), "$ echo hi\nhi\n$ whoami\nguest\n");
    }

    #[test]
    fn test_run_lines_reports_errors() {
        let mut s = session();
        let renderer = Renderer::new("$ ", false);
        let mut out = Vec::new();
        let failed = run_lines(&mut s, &renderer, &["nope".to_string()], &mut out).unwrap();
        assert!(failed);
    }

    #[test]
    fn test_cursor_restarts_after_clear() {
        let mut s = session();
        let mut cursor = TranscriptCursor::new();
        s.submit("echo one");
        assert_eq!(cursor.take(&s).1.len(), 2);

        s.submit("clear");
        s.submit("echo two");
        let (cleared, lines) = cursor.take(&s);
        assert!(cleared);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].content, "two");

        assert!(cursor.take(&s).1.is_empty());
    }

    #[test]
    fn test_exit_aliases_are_commands() {
        let renderer = Renderer::new("$ ", false);
        for word in ["exit", "logout", "quit"] {
            let mut s = session();
            let mut out = Vec::new();
            let failed = run_lines(&mut s, &renderer, &[word.to_string()], &mut out).unwrap();
            assert!(!failed, "{} reported an error", word);
            assert!(String::from_utf8(out).unwrap().ends_with("logout\n"));
        }
    }

    #[test]
    fn test_confirm() {
        let mut out = Vec::new();
        assert!(confirm("Erase?", &mut "Yes\n".as_bytes(), &mut out).unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "Erase? [y/N] ");
        assert!(!confirm("Erase?", &mut "n\n".as_bytes(), &mut Vec::new()).unwrap());
        assert!(!confirm("Erase?", &mut "".as_bytes(), &mut Vec::new()).unwrap());
    }

    #[test]
    fn test_exit_words() {
        assert!(is_exit(" exit "));
        assert!(!is_exit("exits"));
    }
}
