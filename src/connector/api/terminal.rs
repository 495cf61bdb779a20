use std::borrow::Cow;
use std::cell::RefCell;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::application::{ChatSession, WorkingIndicator};
use crate::domain::{PersonaConfig, Role, TranscriptEntry};

const USER_LABEL: &str = "You";

/// Renders the header and the whole transcript, top to bottom. With `styled`
/// the title and role labels carry ANSI styling.
pub fn render_transcript(persona: &PersonaConfig, entries: &[TranscriptEntry], styled: bool) -> String {
    let mut out = render_header(persona, styled);
    for entry in entries {
        out.push_str(&render_entry(persona, entry, styled));
    }
    out
}

fn render_header(persona: &PersonaConfig, styled: bool) -> String {
    if styled {
        format!("{}\n{}\n\n", persona.title().bold(), persona.welcome().dim())
    } else {
        format!("{}\n{}\n\n", persona.title(), persona.welcome())
    }
}

fn label(persona: &PersonaConfig, role: Role) -> &'static str {
    match role {
        Role::User => USER_LABEL,
        Role::Assistant => persona.name(),
    }
}

fn render_entry(persona: &PersonaConfig, entry: &TranscriptEntry, styled: bool) -> String {
    let name = label(persona, entry.role());
    let name = match (styled, entry.role()) {
        (false, _) => name.to_string(),
        (true, Role::User) => name.bold().cyan().to_string(),
        (true, Role::Assistant) => name.bold().green().to_string(),
    };
    format!("{name}: {}\n\n", entry.text())
}

/// `indicatif` spinner shown while a reply is in flight.
#[derive(Default)]
pub struct SpinnerIndicator {
    bar: RefCell<Option<ProgressBar>>,
}

impl SpinnerIndicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkingIndicator for SpinnerIndicator {
    fn start(&self, message: &str) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        *self.bar.borrow_mut() = Some(bar);
    }

    fn finish(&self) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }
}

/// Line-at-a-time chat surface on stdin/stdout.
///
/// On a terminal every refresh clears the screen and redraws the transcript.
/// When stdout is not a terminal the header is written once and each refresh
/// appends only the entries not yet written, so the full output equals the
/// unstyled `render_transcript`.
pub struct TerminalSurface {
    interactive: bool,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            interactive: io::stdout().is_terminal(),
        }
    }

    pub async fn run(&self, session: &mut ChatSession) -> Result<()> {
        let input = BufReader::new(tokio::io::stdin());
        self.converse(session, input, io::stdout()).await
    }

    /// Reads lines from `input` until end of input. The next line is not read
    /// until the current turn has its reply. Bytes that are not valid UTF-8
    /// are replaced rather than ending the session.
    pub async fn converse<R, W>(&self, session: &mut ChatSession, mut input: R, mut out: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut written = 0;
        let mut buf = Vec::new();

        if !self.interactive {
            write!(out, "{}", render_header(session.responder().persona(), false))?;
        }
        self.refresh(session, &mut out, &mut written)?;

        loop {
            self.prompt(session.responder().persona(), &mut out)?;

            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = line {
                warn!("Session {}: input line was not valid UTF-8, invalid bytes replaced", session.id());
            }

            let indicator = SpinnerIndicator::new();
            if session.submit(&line, &indicator).await.is_none() {
                continue;
            }
            self.refresh(session, &mut out, &mut written)?;
        }

        info!(
            "Session {} ended after {} turns",
            session.id(),
            session.turn_count()
        );
        Ok(())
    }

    fn refresh<W: Write>(&self, session: &ChatSession, out: &mut W, written: &mut usize) -> Result<()> {
        let persona = session.responder().persona();
        let entries = session.transcript();

        if self.interactive {
            queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
            write!(out, "{}", render_transcript(persona, entries, true))?;
        } else {
            for entry in &entries[*written..] {
                write!(out, "{}", render_entry(persona, entry, false))?;
            }
        }
        *written = entries.len();
        out.flush()?;
        Ok(())
    }

    fn prompt<W: Write>(&self, persona: &PersonaConfig, out: &mut W) -> Result<()> {
        if self.interactive {
            write!(out, "{} {} ", persona.input_hint().dim(), ">".bold())?;
        }
        out.flush()?;
        Ok(())
    }
}
