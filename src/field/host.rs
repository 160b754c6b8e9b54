use super::number::NumberFormat;

pub const FORMAT_PROMPT_TITLE: &str = "Confirmation";

/// Services a UI layer provides to a [`NumericField`](super::NumericField).
pub trait FieldHost {
    /// Numeric format of the active locale.
    fn number_format(&self) -> NumberFormat {
        NumberFormat::invariant()
    }

    /// Ask a blocking yes/no question. `true` means yes.
    fn confirm(&mut self, message: &str, title: &str) -> bool;

    /// Give input focus back to the field.
    fn request_focus(&mut self);
}

/// Whether focus may leave the field after a focus-loss event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    Released,
    /// The host must cancel the focus transition.
    Retained,
}

impl FocusOutcome {
    pub fn is_retained(self) -> bool {
        self == FocusOutcome::Retained
    }
}

pub fn format_prompt(separator: char) -> String {
    format!(
        "Data has incorrect format!\n(Current separator is \"{separator}\")\nDo you want to fix format?"
    )
}
