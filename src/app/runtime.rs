use anyhow::{Result, anyhow};
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use serde_json::Value;
use tracing::info;

use crate::{
    field::{FocusOutcome, NumberFormat},
    form::NumericForm,
    io::values_to_document,
    presentation::{self, FormView, UiContext},
};

use super::{
    host::{CrosstermEvents, EventSource, HeadlessHost, TerminalHost},
    input::{KeyCommand, classify},
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
};

const HELP_TEXT: &str =
    "Tab/Enter next field • Shift+Tab previous • Ctrl+S save • Ctrl+Q quit";

pub(crate) struct App {
    form: NumericForm,
    options: UiOptions,
    format: NumberFormat,
    status: StatusLine,
    exit_armed: bool,
    should_quit: bool,
    result: Option<Value>,
}

impl App {
    pub fn new(form: NumericForm, options: UiOptions, format: NumberFormat) -> Self {
        Self {
            form,
            options,
            format,
            status: StatusLine::new(),
            exit_armed: false,
            should_quit: false,
            result: None,
        }
    }

    pub fn run(&mut self) -> Result<Value> {
        let mut guard = TerminalGuard::enter()?;
        let mut events = CrosstermEvents::new(self.options.tick_rate);
        self.run_with(guard.terminal(), &mut events)
    }

    pub(crate) fn run_with<B: Backend, E: EventSource>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
    ) -> Result<Value> {
        self.form.activate_all(&mut HeadlessHost::new(self.format));

        while !self.should_quit {
            let view = FormView::capture(&self.form, &self.format);
            terminal.draw(|frame| self.draw(frame, &view))?;
            let Some(event) = events.next_event()? else {
                continue;
            };
            if let Event::Key(key) = event {
                self.handle_key(key, terminal, events)?;
            }
        }

        self.result
            .take()
            .ok_or_else(|| anyhow!("user exited without saving"))
    }

    fn help(&self) -> Option<&'static str> {
        self.options.show_help.then_some(HELP_TEXT)
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>, view: &FormView) {
        presentation::draw(
            frame,
            UiContext {
                view,
                status_message: self.status.message(),
                dirty: self.form.is_dirty(),
                help: self.help(),
                dialog: None,
            },
        );
    }

    fn handle_key<B: Backend, E: EventSource>(
        &mut self,
        key: KeyEvent,
        terminal: &mut Terminal<B>,
        events: &mut E,
    ) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        match classify(&key) {
            KeyCommand::Save => {
                self.exit_armed = false;
                self.on_save(terminal, events)?;
            }
            KeyCommand::Quit => self.on_exit(),
            KeyCommand::NextField => {
                self.exit_armed = false;
                self.step_focus(1, terminal, events)?;
            }
            KeyCommand::PrevField => {
                self.exit_armed = false;
                self.step_focus(-1, terminal, events)?;
            }
            KeyCommand::ResetStatus => {
                self.exit_armed = false;
                self.status.ready();
            }
            KeyCommand::Edit(key) => {
                if self.form.handle_key(&key) {
                    self.exit_armed = false;
                    if let Some(entry) = self.form.focused_field() {
                        self.status.editing(&entry.label);
                    }
                }
            }
            KeyCommand::None => {}
        }
        Ok(())
    }

    /// Run `action` against the form with a terminal host that can prompt.
    fn with_host<B, E, T>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
        action: impl FnOnce(&mut NumericForm, &mut TerminalHost<'_, B, E>) -> T,
    ) -> Result<T>
    where
        B: Backend,
        E: EventSource,
    {
        let backdrop = FormView::capture(&self.form, &self.format);
        let mut host = TerminalHost::new(terminal, events, backdrop, self.format).with_footer(
            self.status.message(),
            self.help(),
            self.form.is_dirty(),
        );
        let result = action(&mut self.form, &mut host);
        if host.focus_requested() {
            info!("focus kept on field with unreadable text");
        }
        host.finish()?;
        Ok(result)
    }

    fn step_focus<B: Backend, E: EventSource>(
        &mut self,
        delta: i32,
        terminal: &mut Terminal<B>,
        events: &mut E,
    ) -> Result<()> {
        let index = self.form.focused_index();
        let outcome = self.with_host(terminal, events, |form, host| form.focus_step(delta, host))?;
        self.report_commit(index, outcome);
        Ok(())
    }

    fn report_commit(&mut self, index: usize, outcome: FocusOutcome) {
        let Some(entry) = self.form.fields().get(index) else {
            return;
        };
        match outcome {
            FocusOutcome::Retained => self.status.fix_requested(&entry.label),
            FocusOutcome::Released => self.status.value_updated(&entry.label, entry.field.text()),
        }
    }

    fn on_save<B: Backend, E: EventSource>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
    ) -> Result<()> {
        let index = self.form.focused_index();
        let outcome = self.with_host(terminal, events, |form, host| form.commit_focused(host))?;
        if outcome.is_retained() {
            self.report_commit(index, outcome);
            return Ok(());
        }

        match self.form.try_collect(&self.format) {
            Ok(values) => {
                info!(fields = values.len(), "values saved");
                self.result = Some(values_to_document(&values));
                self.form.clear_dirty();
                self.status.saved();
                self.should_quit = true;
            }
            Err(err) => self.status.set_raw(err.to_string()),
        }
        Ok(())
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.form.is_dirty() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
        self.result = None;
    }
}
