//! `hd chat`: line-based conversation with the mock support desk.
//!
//! Each line is one message. `/attach PATH` stages a file for the next
//! message and `/quit` (or end of input) leaves. Canned replies are waited
//! for before the next prompt so the transcript reads in order.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use helpdesk_core::chat::{Attachment, ChatMessage, ChatSession, Sender};
use helpdesk_core::config::load_project_config;

use crate::output::{CliError, OutputMode, render_error};

#[derive(Args, Debug, Default)]
pub struct ChatArgs {
    /// File to attach to the first message.
    #[arg(long, value_name = "PATH")]
    pub attach: Option<PathBuf>,
}

/// What one input line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Attach(&'a str),
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed == "/quit" {
        return Input::Quit;
    }
    if let Some(path) = trimmed.strip_prefix("/attach")
        && (path.is_empty() || path.starts_with(char::is_whitespace))
    {
        return Input::Attach(path.trim());
    }
    Input::Message(trimmed)
}

fn write_message(out: &mut dyn Write, message: &ChatMessage, mode: OutputMode) -> io::Result<()> {
    if mode.is_json() {
        serde_json::to_writer(&mut *out, message).map_err(io::Error::other)?;
        return writeln!(out);
    }
    let who = match message.sender {
        Sender::User => "you",
        Sender::Support => "support",
    };
    if let Some(text) = &message.text {
        writeln!(out, "{who}: {text}")?;
    }
    if let Some(attachment) = &message.attachment {
        writeln!(
            out,
            "{who}: [attached {} ({} bytes)]",
            attachment.name, attachment.size_bytes
        )?;
    }
    Ok(())
}

/// Drive a session from `input` until `/quit` or end of input.
///
/// `wait` is called with the time left until the next reply is due.
fn run_session(
    session: &mut ChatSession,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    mode: OutputMode,
    mut staged: Option<Attachment>,
    wait: &mut dyn FnMut(Duration),
) -> anyhow::Result<()> {
    for message in session.messages() {
        write_message(out, message, mode)?;
    }

    let mut line = String::new();
    loop {
        if !mode.is_json() {
            write!(out, "> ")?;
        }
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match parse_input(&line) {
            Input::Quit => break,
            Input::Attach("") => {
                render_error(mode, &CliError::new("usage: /attach PATH"))?;
            }
            Input::Attach(path) => match Attachment::from_path(Path::new(path)) {
                Ok(attachment) => {
                    if !mode.is_json() {
                        writeln!(out, "(staged {} for the next message)", attachment.name)?;
                    }
                    staged = Some(attachment);
                }
                Err(err) => render_error(mode, &CliError::from(&err))?,
            },
            Input::Message(text) => {
                match session.submit(text, staged.take(), Instant::now()) {
                    // The typed text is already on screen; only echo what isn't.
                    Ok(sent) if mode.is_json() => write_message(out, sent, mode)?,
                    Ok(sent) => {
                        if let Some(attachment) = &sent.attachment {
                            writeln!(
                                out,
                                "you: [attached {} ({} bytes)]",
                                attachment.name, attachment.size_bytes
                            )?;
                        }
                    }
                    Err(err) => {
                        render_error(mode, &CliError::from(&err))?;
                        continue;
                    }
                }
                deliver_replies(session, out, mode, wait)?;
            }
        }
    }

    deliver_replies(session, out, mode, wait)?;
    Ok(())
}

fn deliver_replies(
    session: &mut ChatSession,
    out: &mut dyn Write,
    mode: OutputMode,
    wait: &mut dyn FnMut(Duration),
) -> io::Result<()> {
    while let Some(due) = session.next_reply_due() {
        wait(due.saturating_duration_since(Instant::now()));
        for reply in session.poll(Instant::now().max(due)) {
            write_message(out, reply, mode)?;
        }
    }
    Ok(())
}

/// Execute `hd chat`.
///
/// # Errors
///
/// Returns an error if the initial attachment cannot be read or I/O fails.
pub fn run_chat(args: &ChatArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let config = load_project_config(project_root)?;
    let staged = args
        .attach
        .as_deref()
        .map(Attachment::from_path)
        .transpose()?;

    let mut session = ChatSession::new(&config.chat);
    tracing::debug!(delay_ms = config.chat.reply_delay_ms, "chat session opened");

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(
        &mut session,
        &mut stdin.lock(),
        &mut stdout.lock(),
        output,
        staged,
        &mut std::thread::sleep,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpdesk_core::config::ChatConfig;

    fn session() -> ChatSession {
        ChatSession::new(&ChatConfig {
            reply_delay_ms: 250,
            reply: "On it".into(),
            greeting: "Hi".into(),
        })
    }

    fn transcript(input: &str, staged: Option<Attachment>) -> (String, Vec<Duration>) {
        let mut session = session();
        let mut out = Vec::new();
        let mut waits = Vec::new();
        run_session(
            &mut session,
            &mut input.as_bytes(),
            &mut out,
            OutputMode::Text,
            staged,
            &mut |d: Duration| waits.push(d),
        )
        .unwrap();
        (String::from_utf8(out).unwrap(), waits)
    }

    #[test]
    fn parse_commands() {
        assert_eq!(parse_input("/quit\n"), Input::Quit);
        assert_eq!(parse_input("/attach  a b.png "), Input::Attach("a b.png"));
        assert_eq!(parse_input("/attach"), Input::Attach(""));
        assert_eq!(parse_input("/attachment"), Input::Message("/attachment"));
        assert_eq!(parse_input("  hello  "), Input::Message("hello"));
    }

    #[test]
    fn each_message_is_acknowledged_in_order() {
        let (out, waits) = transcript("printer is down\nstill down\n/quit\n", None);
        assert_eq!(out.matches("support: On it").count(), 2);
        assert!(out.starts_with("support: Hi\n"));
        assert_eq!(waits.len(), 2);
        assert!(waits.iter().all(|d| *d <= Duration::from_millis(250)));
    }

    #[test]
    fn blank_line_is_not_sent() {
        let (out, waits) = transcript("\n   \n", None);
        assert_eq!(out.matches("On it").count(), 0);
        assert!(waits.is_empty());
    }

    #[test]
    fn staged_attachment_goes_with_next_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "boom").unwrap();
        let attachment = Attachment::from_path(&path).unwrap();

        let (out, _) = transcript("", Some(attachment));
        // A staged file only travels with a message.
        assert_eq!(out.matches("On it").count(), 0);

        let input = format!("/attach {}\n\n", path.display());
        let (out, _) = transcript(&input, None);
        assert!(out.contains("(staged log.txt"));
        assert!(out.contains("you: [attached log.txt (4 bytes)]"));
        assert_eq!(out.matches("support: On it").count(), 1);
    }

    #[test]
    fn unreadable_attachment_keeps_session_alive() {
        let (out, _) = transcript("/attach /definitely/not/here.png\nhello\n", None);
        assert_eq!(out.matches("support: On it").count(), 1);
        assert!(!out.contains("staged"));
    }
}
