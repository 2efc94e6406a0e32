use std::io::Write;
use std::process::{Command, Stdio};

use obenseuer_core::core_api::Clipboard;
use tracing::debug;

/// Clipboard helpers tried in order; the first one that accepts the text wins.
const CLIPBOARD_PROGRAMS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// Pipes text into the first available platform clipboard program.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> bool {
        CLIPBOARD_PROGRAMS
            .iter()
            .any(|(program, args)| pipe_to(program, args, text))
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> bool {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    let mut child = match child {
        Ok(child) => child,
        Err(e) => {
            debug!(program, error = %e, "clipboard program unavailable");
            return false;
        }
    };

    let wrote = child
        .stdin
        .take()
        .is_some_and(|mut stdin| stdin.write_all(text.as_bytes()).is_ok());
    let succeeded = child.wait().is_ok_and(|status| status.success());
    debug!(program, wrote, succeeded, "clipboard program finished");
    wrote && succeeded
}

/// Last resort: asks the user to copy the printed command by hand.
#[derive(Debug, Default)]
pub struct ManualCopy;

impl Clipboard for ManualCopy {
    fn copy_text(&mut self, text: &str) -> bool {
        let mut stderr = std::io::stderr();
        writeln!(stderr, "No clipboard available; copy this manually:\n  {text}").is_ok()
    }
}
