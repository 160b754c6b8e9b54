use crate::presentation::DialogRender;

use super::input::DialogCommand;

/// Yes/no question shown over the form.
pub(crate) struct ConfirmDialog {
    title: String,
    message: String,
    yes_selected: bool,
}

impl ConfirmDialog {
    pub(crate) fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            yes_selected: true,
        }
    }

    /// `Some(answer)` once the command settles the question.
    pub(crate) fn apply(&mut self, command: DialogCommand) -> Option<bool> {
        match command {
            DialogCommand::Answer(answer) => Some(answer),
            DialogCommand::Accept => Some(self.yes_selected),
            DialogCommand::Toggle => {
                self.yes_selected = !self.yes_selected;
                None
            }
            DialogCommand::Ignore => None,
        }
    }

    pub(crate) fn as_render(&self) -> DialogRender<'_> {
        DialogRender {
            title: &self.title,
            message: &self.message,
            yes_selected: self.yes_selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_accepts_highlighted_button() {
        let mut dialog = ConfirmDialog::new("Confirmation", "fix?");
        assert_eq!(dialog.apply(DialogCommand::Accept), Some(true));
        assert_eq!(dialog.apply(DialogCommand::Toggle), None);
        assert!(!dialog.as_render().yes_selected);
        assert_eq!(dialog.apply(DialogCommand::Accept), Some(false));
    }

    #[test]
    fn direct_answers_ignore_highlight() {
        let mut dialog = ConfirmDialog::new("Confirmation", "fix?");
        dialog.apply(DialogCommand::Toggle);
        assert_eq!(dialog.apply(DialogCommand::Answer(true)), Some(true));
        assert_eq!(dialog.apply(DialogCommand::Ignore), None);
    }
}
