use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Save,
    Quit,
    NextField,
    PrevField,
    ResetStatus,
    Edit(KeyEvent),
    None,
}

pub fn classify(key: &KeyEvent) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') => KeyCommand::Save,
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyCommand::Quit,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyCommand::Quit,
            _ => KeyCommand::None,
        };
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down | KeyCode::Enter => KeyCommand::NextField,
        KeyCode::BackTab | KeyCode::Up => KeyCommand::PrevField,
        KeyCode::Esc => KeyCommand::ResetStatus,
        _ => KeyCommand::Edit(*key),
    }
}

/// What a key press means while the confirm dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogCommand {
    Answer(bool),
    Toggle,
    Accept,
    Ignore,
}

pub fn classify_dialog(key: &KeyEvent) -> DialogCommand {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => DialogCommand::Answer(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => DialogCommand::Answer(false),
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => DialogCommand::Toggle,
        KeyCode::Enter => DialogCommand::Accept,
        _ => DialogCommand::Ignore,
    }
}
