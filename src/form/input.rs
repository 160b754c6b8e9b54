use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Apply an editing key to `buffer`; `true` when the text changed.
pub(crate) fn handle_text_edit(buffer: &mut String, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(ch) => {
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                return false;
            }
            buffer.push(ch);
            true
        }
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Delete => {
            if buffer.is_empty() {
                return false;
            }
            buffer.clear();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn appends_and_removes_characters() {
        let mut buffer = "1".to_string();
        assert!(handle_text_edit(&mut buffer, &key(KeyCode::Char('2'), KeyModifiers::NONE)));
        assert!(handle_text_edit(&mut buffer, &key(KeyCode::Char(','), KeyModifiers::NONE)));
        assert_eq!(buffer, "12,");
        assert!(handle_text_edit(&mut buffer, &key(KeyCode::Backspace, KeyModifiers::NONE)));
        assert_eq!(buffer, "12");
        assert!(handle_text_edit(&mut buffer, &key(KeyCode::Delete, KeyModifiers::NONE)));
        assert_eq!(buffer, "");
        assert!(!handle_text_edit(&mut buffer, &key(KeyCode::Backspace, KeyModifiers::NONE)));
    }

    #[test]
    fn ignores_control_chords() {
        let mut buffer = String::new();
        let ctrl_a = key(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert!(!handle_text_edit(&mut buffer, &ctrl_a));
        assert_eq!(buffer, "");
    }
}
