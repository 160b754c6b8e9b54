use std::time::Duration;
#[cfg(test)]
use std::collections::VecDeque;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use tracing::{debug, warn};

use crate::{
    field::{FieldHost, NumberFormat},
    presentation::{self, FormView, UiContext},
};

use super::{dialog::ConfirmDialog, input::classify_dialog};

/// Where the runtime reads terminal events from.
pub(crate) trait EventSource {
    /// `Ok(None)` when no event arrived within one tick.
    fn next_event(&mut self) -> Result<Option<Event>>;
}

pub(crate) struct CrosstermEvents {
    tick_rate: Duration,
}

impl CrosstermEvents {
    pub(crate) fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }
}

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> Result<Option<Event>> {
        if !event::poll(self.tick_rate)? {
            return Ok(None);
        }
        Ok(Some(event::read()?))
    }
}

/// Replays a fixed list of events; fails once the list runs out.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedEvents {
    events: VecDeque<Event>,
}

#[cfg(test)]
impl ScriptedEvents {
    pub(crate) fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

#[cfg(test)]
impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> Result<Option<Event>> {
        self.events
            .pop_front()
            .map(Some)
            .ok_or_else(|| anyhow::anyhow!("event script exhausted"))
    }
}

/// Host that answers every prompt with "no" and never draws anything.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HeadlessHost {
    format: NumberFormat,
}

impl HeadlessHost {
    pub(crate) fn new(format: NumberFormat) -> Self {
        Self { format }
    }
}

impl FieldHost for HeadlessHost {
    fn number_format(&self) -> NumberFormat {
        self.format
    }

    fn confirm(&mut self, message: &str, _title: &str) -> bool {
        debug!(message, "declining prompt without a terminal");
        false
    }

    fn request_focus(&mut self) {}
}

/// Shows prompts as a modal dialog drawn over a snapshot of the form.
pub(crate) struct TerminalHost<'a, B: Backend, E: EventSource> {
    terminal: &'a mut Terminal<B>,
    events: &'a mut E,
    backdrop: FormView,
    format: NumberFormat,
    status: String,
    help: Option<&'static str>,
    dirty: bool,
    focus_requested: bool,
    error: Option<anyhow::Error>,
}

impl<'a, B: Backend, E: EventSource> TerminalHost<'a, B, E> {
    pub(crate) fn new(
        terminal: &'a mut Terminal<B>,
        events: &'a mut E,
        backdrop: FormView,
        format: NumberFormat,
    ) -> Self {
        Self {
            terminal,
            events,
            backdrop,
            format,
            status: String::new(),
            help: None,
            dirty: false,
            focus_requested: false,
            error: None,
        }
    }

    pub(crate) fn with_footer(
        mut self,
        status: &str,
        help: Option<&'static str>,
        dirty: bool,
    ) -> Self {
        self.status = status.to_string();
        self.help = help;
        self.dirty = dirty;
        self
    }

    pub(crate) fn focus_requested(&self) -> bool {
        self.focus_requested
    }

    /// Surface a terminal failure that happened while a prompt was open.
    pub(crate) fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn run_dialog(&mut self, message: &str, title: &str) -> Result<bool> {
        let mut dialog = ConfirmDialog::new(title, message);
        loop {
            let view = &self.backdrop;
            let status = self.status.as_str();
            let help = self.help;
            let dirty = self.dirty;
            self.terminal.draw(|frame| {
                presentation::draw(
                    frame,
                    UiContext {
                        view,
                        status_message: status,
                        dirty,
                        help,
                        dialog: Some(dialog.as_render()),
                    },
                )
            })?;

            let Some(Event::Key(key)) = self.events.next_event()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(answer) = dialog.apply(classify_dialog(&key)) {
                return Ok(answer);
            }
        }
    }
}

impl<B: Backend, E: EventSource> FieldHost for TerminalHost<'_, B, E> {
    fn number_format(&self) -> NumberFormat {
        self.format
    }

    /// A failed prompt counts as "yes" so the field keeps the user's text
    /// while the error travels out through [`TerminalHost::finish`].
    fn confirm(&mut self, message: &str, title: &str) -> bool {
        match self.run_dialog(message, title) {
            Ok(answer) => answer,
            Err(err) => {
                warn!(%err, "prompt aborted");
                self.error = Some(err);
                true
            }
        }
    }

    fn request_focus(&mut self) {
        self.focus_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FORMAT_PROMPT_TITLE, format_prompt};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn dialog_is_drawn_until_answered() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut events = ScriptedEvents::new([
            press(KeyCode::Char('7')),
            press(KeyCode::Right),
            press(KeyCode::Enter),
        ]);
        let mut host = TerminalHost::new(
            &mut terminal,
            &mut events,
            FormView::default(),
            NumberFormat::invariant(),
        );
        let answer = host.confirm(&format_prompt('.'), FORMAT_PROMPT_TITLE);
        assert!(!answer, "Right moved the highlight to No");
        host.finish().unwrap();

        let screen = screen_text(&terminal);
        assert!(screen.contains("Confirmation"));
        assert!(screen.contains("Data has incorrect format!"));
        assert!(screen.contains("[ Yes ]"));
    }

    #[test]
    fn exhausted_events_surface_as_error() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut events = ScriptedEvents::default();
        let mut host = TerminalHost::new(
            &mut terminal,
            &mut events,
            FormView::default(),
            NumberFormat::invariant(),
        );
        assert!(host.confirm("question", "title"), "failed prompts keep the text");
        assert!(host.finish().is_err());
    }

    #[test]
    fn request_focus_is_recorded() {
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        let mut events = ScriptedEvents::default();
        let mut host = TerminalHost::new(
            &mut terminal,
            &mut events,
            FormView::default(),
            NumberFormat::invariant(),
        );
        host.request_focus();
        assert!(host.focus_requested());
    }

    #[test]
    fn headless_host_declines() {
        let mut host = HeadlessHost::new(NumberFormat::invariant());
        assert!(!host.confirm("fix?", "Confirmation"));
    }
}
