use crate::utils::error::{AppError, AppResult};
use crate::utils::output::OutputStyle;
use crossterm::{
    cursor,
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style,
    terminal::{self, ClearType},
};
use std::io::{self, Read, Write};

fn term_err(e: io::Error) -> AppError {
    AppError::System(format!("Terminal error: {}", e))
}

/// Esc or Ctrl+C. Raw mode swallows SIGINT, so Ctrl+C arrives as a key.
fn is_cancel(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Read one line from stdin. `None` on end of input.
pub fn prompt_input(prompt: &str) -> AppResult<Option<String>> {
    eprint!("{}", prompt);
    io::stderr().flush().map_err(term_err)?;

    let mut input = String::new();
    let read = io::stdin().read_line(&mut input).map_err(term_err)?;
    if read == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}

/// Everything left on stdin, for piped prompts
pub fn read_stdin() -> AppResult<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf).map_err(term_err)?;
    Ok(buf)
}

/// Single-line editor with `initial` pre-filled. Enter accepts, Esc or Ctrl+C cancels.
pub fn prompt_line_editable(prompt: &str, initial: &str) -> AppResult<Option<String>> {
    terminal::enable_raw_mode().map_err(term_err)?;

    let result = (|| -> io::Result<Option<String>> {
        let mut stderr = io::stderr();
        let mut input = initial.to_string();

        loop {
            execute!(
                stderr,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                style::Print(prompt),
                style::Print(&input)
            )?;
            stderr.flush()?;

            match event::read()? {
                Event::Key(KeyEvent { kind: KeyEventKind::Release, .. }) => {}
                Event::Key(key) if is_cancel(&key) => break Ok(None),
                Event::Key(KeyEvent { code: KeyCode::Char(c), .. }) => input.push(c),
                Event::Key(KeyEvent { code: KeyCode::Backspace, .. }) => {
                    input.pop();
                }
                Event::Key(KeyEvent { code: KeyCode::Enter, .. }) => break Ok(Some(input.trim().to_string())),
                Event::Paste(text) => input.push_str(text.lines().next().unwrap_or_default()),
                _ => {}
            }
        }
    })();

    let _ = terminal::disable_raw_mode();
    eprintln!();
    result.map_err(term_err)
}

/// Multi-line input. Enter finishes, Ctrl+J or Shift+Enter breaks the line, Esc or Ctrl+C cancels.
pub fn prompt_multiline(prompt: &str) -> AppResult<Option<String>> {
    eprintln!("{}", prompt);

    terminal::enable_raw_mode().map_err(term_err)?;
    let _ = execute!(io::stderr(), EnableBracketedPaste);

    let result = (|| -> io::Result<Option<String>> {
        let mut stderr = io::stderr();
        let mut lines: Vec<String> = Vec::new();
        let mut current_line = String::new();

        loop {
            match event::read()? {
                Event::Key(KeyEvent { kind: KeyEventKind::Release, .. }) => {}
                Event::Key(key) if is_cancel(&key) => break Ok(None),
                Event::Key(KeyEvent {
                    code: KeyCode::Char('j'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                })
                | Event::Key(KeyEvent {
                    code: KeyCode::Enter,
                    modifiers: KeyModifiers::SHIFT,
                    ..
                }) => {
                    lines.push(std::mem::take(&mut current_line));
                    write!(stderr, "\r\n")?;
                    stderr.flush()?;
                }
                Event::Key(KeyEvent { code: KeyCode::Enter, .. }) => {
                    lines.push(current_line);
                    break Ok(Some(lines.join("\n")));
                }
                Event::Key(KeyEvent { code: KeyCode::Char(c), .. }) => {
                    current_line.push(c);
                    write!(stderr, "{}", c)?;
                    stderr.flush()?;
                }
                Event::Key(KeyEvent { code: KeyCode::Backspace, .. }) => {
                    if current_line.pop().is_some() {
                        execute!(stderr, cursor::MoveLeft(1), terminal::Clear(ClearType::UntilNewLine))?;
                    } else if let Some(previous) = lines.pop() {
                        current_line = previous;
                        execute!(
                            stderr,
                            cursor::MoveUp(1),
                            cursor::MoveToColumn(0),
                            terminal::Clear(ClearType::UntilNewLine),
                            style::Print(&current_line)
                        )?;
                    }
                    stderr.flush()?;
                }
                Event::Paste(pasted_text) => {
                    let mut pasted_lines = pasted_text.lines().peekable();
                    while let Some(line) = pasted_lines.next() {
                        current_line.push_str(line);
                        if pasted_lines.peek().is_some() {
                            lines.push(std::mem::take(&mut current_line));
                            write!(stderr, "{}\r\n", line)?;
                        } else {
                            write!(stderr, "{}", line)?;
                        }
                    }
                    stderr.flush()?;
                }
                _ => {}
            }
        }
    })();

    let _ = execute!(io::stderr(), DisableBracketedPaste);
    let _ = terminal::disable_raw_mode();

    eprintln!();
    result.map_err(term_err)
}

pub fn prompt_yes_no(prompt: &str) -> AppResult<bool> {
    loop {
        let Some(input) = prompt_input(&format!("{} [y/N]: ", prompt))? else {
            return Ok(false);
        };
        match input.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" | "" => return Ok(false),
            _ => eprintln!("{}", OutputStyle::warning("Please enter 'y' or 'n'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_keys() {
        assert!(is_cancel(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_cancel(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(is_cancel(&KeyEvent::new(
            KeyCode::Char('C'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        )));

        assert!(!is_cancel(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_cancel(&KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL)));
        assert!(!is_cancel(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
