//! Terminal clipboards: platform copy commands, with an OSC 52 escape
//! sequence as the fallback for remote shells.

use base64::Engine;
use copyedit_editor::{Clipboard, ClipboardError};
use std::io::{IsTerminal, Write};
use std::process::{Command, Stdio};
use tracing::debug;

/// Pipes the report into the first copy command that works
pub struct CommandClipboard {
    candidates: Vec<Vec<String>>,
}

impl CommandClipboard {
    /// Use `command` if configured, otherwise the platform defaults
    pub fn new(command: Option<Vec<String>>) -> Self {
        let candidates = match command {
            Some(command) if !command.is_empty() => vec![command],
            _ => default_commands(),
        };
        Self { candidates }
    }
}

fn default_commands() -> Vec<Vec<String>> {
    let commands: &[&[&str]] = if cfg!(target_os = "macos") {
        &[&["pbcopy"]]
    } else if cfg!(target_os = "windows") {
        &[&["clip"]]
    } else {
        &[
            &["wl-copy"],
            &["xclip", "-selection", "clipboard"],
            &["xsel", "--clipboard", "--input"],
        ]
    };

    commands
        .iter()
        .map(|c| c.iter().map(|s| s.to_string()).collect())
        .collect()
}

fn run_copy_command(command: &[String], text: &str) -> Result<(), ClipboardError> {
    let Some((program, args)) = command.split_first() else {
        return Err(ClipboardError::Unavailable("command".to_string()));
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            debug!(program = %program, error = %e, "Copy command not available");
            ClipboardError::Unavailable(program.clone())
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).map_err(|e| ClipboardError::Rejected {
            backend: program.clone(),
            reason: e.to_string(),
        })?;
    }

    let status = child.wait().map_err(|e| ClipboardError::Rejected {
        backend: program.clone(),
        reason: e.to_string(),
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::Rejected {
            backend: program.clone(),
            reason: format!("exited with {}", status),
        })
    }
}

impl Clipboard for CommandClipboard {
    fn name(&self) -> &str {
        "system"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut last_error = ClipboardError::Unavailable(self.name().to_string());

        for command in &self.candidates {
            match run_copy_command(command, text) {
                Ok(()) => return Ok(()),
                Err(e) => last_error = e,
            }
        }

        Err(last_error)
    }
}

enum Target {
    Stderr,
    Writer(Box<dyn Write>),
}

/// Asks the terminal to copy via the OSC 52 escape sequence
pub struct Osc52Clipboard {
    target: Target,
}

impl Osc52Clipboard {
    /// Write to stderr; unavailable when stderr is not a terminal
    pub fn stderr() -> Self {
        Self { target: Target::Stderr }
    }

    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            target: Target::Writer(writer),
        }
    }
}

/// Escape sequence that sets the clipboard selection to `text`
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{}\x07", encoded)
}

impl Clipboard for Osc52Clipboard {
    fn name(&self) -> &str {
        "osc52"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let sequence = osc52_sequence(text);
        let rejected = |e: std::io::Error| ClipboardError::Rejected {
            backend: "osc52".to_string(),
            reason: e.to_string(),
        };

        match &mut self.target {
            Target::Stderr => {
                let mut stderr = std::io::stderr();
                if !stderr.is_terminal() {
                    return Err(ClipboardError::Unavailable("osc52".to_string()));
                }
                stderr.write_all(sequence.as_bytes()).map_err(rejected)?;
                stderr.flush().map_err(rejected)
            }
            Target::Writer(writer) => {
                writer.write_all(sequence.as_bytes()).map_err(rejected)?;
                writer.flush().map_err(rejected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_osc52_writes_to_writer() {
        let buffer = SharedBuffer::default();
        let mut clipboard = Osc52Clipboard::with_writer(Box::new(buffer.clone()));

        clipboard.write_text("hi").unwrap();

        assert_eq!(buffer.0.borrow().as_slice(), b"\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_missing_command_is_unavailable() {
        let mut clipboard = CommandClipboard::new(Some(vec!["copyedit-no-such-copy-tool".to_string()]));

        let err = clipboard.write_text("text").unwrap_err();

        assert_eq!(err, ClipboardError::Unavailable("copyedit-no-such-copy-tool".to_string()));
    }

    #[test]
    fn test_empty_command_falls_back_to_defaults() {
        let clipboard = CommandClipboard::new(Some(vec![]));
        assert!(!clipboard.candidates.is_empty());
    }
}
