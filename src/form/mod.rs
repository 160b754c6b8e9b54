mod error;
mod input;

use crossterm::event::KeyEvent;
use indexmap::IndexMap;

use crate::field::{FieldHost, FocusOutcome, NumberFormat, NumericField};
use crate::io::{FieldDefinition, FormDefinition};

pub use error::FieldValueError;

#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub field: NumericField,
}

impl FormField {
    pub fn from_definition(definition: &FieldDefinition) -> Self {
        let mut field = NumericField::new(definition.limitation.clone());
        if let Some(text) = &definition.text {
            field.set_text(text.clone());
        }
        Self {
            name: definition.name.clone(),
            label: definition.display_label().to_string(),
            field,
        }
    }
}

/// Ordered numeric fields with a single input focus.
#[derive(Debug, Clone)]
pub struct NumericForm {
    title: Option<String>,
    fields: Vec<FormField>,
    focus: usize,
    dirty: bool,
}

impl NumericForm {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            title: None,
            fields,
            focus: 0,
            dirty: false,
        }
    }

    pub fn from_definition(definition: &FormDefinition) -> Self {
        let fields = definition
            .fields
            .iter()
            .map(FormField::from_definition)
            .collect();
        let mut form = Self::new(fields);
        form.title = definition.title.clone();
        form
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focused_index(&self) -> usize {
        self.focus
    }

    pub fn focused_field(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Activate every field that is not active yet.
    pub fn activate_all<H: FieldHost + ?Sized>(&mut self, host: &mut H) {
        for entry in &mut self.fields {
            entry.field.activate(host);
        }
    }

    /// Validate the focused field as if focus left it, without moving.
    pub fn commit_focused<H: FieldHost + ?Sized>(&mut self, host: &mut H) -> FocusOutcome {
        match self.fields.get_mut(self.focus) {
            Some(entry) => entry.field.focus_lost(host),
            None => FocusOutcome::Released,
        }
    }

    /// Move focus by `delta` fields (wrapping). Focus stays put when the
    /// focused field retains it.
    pub fn focus_step<H: FieldHost + ?Sized>(&mut self, delta: i32, host: &mut H) -> FocusOutcome {
        if self.fields.is_empty() {
            return FocusOutcome::Released;
        }
        let outcome = self.commit_focused(host);
        if outcome.is_retained() {
            return outcome;
        }
        let len = self.fields.len() as i64;
        let next = (self.focus as i64 + i64::from(delta)).rem_euclid(len);
        self.focus = next as usize;
        outcome
    }

    /// Route an editing key to the focused field's text.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let Some(entry) = self.fields.get_mut(self.focus) else {
            return false;
        };
        let changed = input::handle_text_edit(entry.field.text_mut(), key);
        if changed {
            self.dirty = true;
        }
        changed
    }

    /// Current values keyed by field name, in declaration order.
    pub fn try_collect(
        &self,
        format: &NumberFormat,
    ) -> Result<IndexMap<String, f64>, FieldValueError> {
        self.fields
            .iter()
            .map(|entry| {
                format
                    .parse(entry.field.text())
                    .map(|value| (entry.name.clone(), value))
                    .map_err(|source| FieldValueError {
                        field: entry.name.clone(),
                        source,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limitation::{LimitationConfig, LimitationType};
    use crossterm::event::{KeyCode, KeyModifiers};

    struct AnswerHost {
        answer: bool,
        prompts: usize,
    }

    impl FieldHost for AnswerHost {
        fn confirm(&mut self, _message: &str, _title: &str) -> bool {
            self.prompts += 1;
            self.answer
        }

        fn request_focus(&mut self) {}
    }

    fn invoice() -> NumericForm {
        NumericForm::from_definition(&FormDefinition::new(vec![
            FieldDefinition::new("price", LimitationConfig::preset(LimitationType::Currency))
                .with_label("Unit price")
                .with_text("19.999"),
            FieldDefinition::new("share", LimitationConfig::preset(LimitationType::Percents))
                .with_text("150"),
            FieldDefinition::new("qty", LimitationConfig::new().with_integer_only(true)),
        ]))
    }

    fn type_text(form: &mut NumericForm, text: &str) {
        form.handle_key(&KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE));
        for ch in text.chars() {
            form.handle_key(&KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }
    }

    #[test]
    fn activation_normalizes_every_field() {
        let mut form = invoice();
        let mut host = AnswerHost { answer: false, prompts: 0 };
        form.activate_all(&mut host);
        let texts: Vec<_> = form.fields().iter().map(|f| f.field.text()).collect();
        assert_eq!(texts, vec!["20", "100", "0"]);
        assert_eq!(form.fields()[0].label, "Unit price");
        assert_eq!(form.fields()[1].label, "share");
    }

    #[test]
    fn focus_moves_after_valid_edit() {
        let mut form = invoice();
        let mut host = AnswerHost { answer: true, prompts: 0 };
        form.activate_all(&mut host);
        type_text(&mut form, "-3.456");
        assert!(form.is_dirty());
        assert_eq!(form.focus_step(1, &mut host), FocusOutcome::Released);
        assert_eq!(form.focused_index(), 1);
        assert_eq!(form.fields()[0].field.text(), "0");
        assert_eq!(host.prompts, 0);
    }

    #[test]
    fn retained_focus_stays_on_field() {
        let mut form = invoice();
        let mut host = AnswerHost { answer: true, prompts: 0 };
        form.activate_all(&mut host);
        type_text(&mut form, "abc");
        assert_eq!(form.focus_step(1, &mut host), FocusOutcome::Retained);
        assert_eq!(form.focused_index(), 0);
        assert_eq!(form.fields()[0].field.text(), "abc");
        assert_eq!(host.prompts, 1);
    }

    #[test]
    fn focus_wraps_backwards() {
        let mut form = invoice();
        let mut host = AnswerHost { answer: false, prompts: 0 };
        form.activate_all(&mut host);
        form.focus_step(-1, &mut host);
        assert_eq!(form.focused_index(), 2);
        form.focus_step(1, &mut host);
        assert_eq!(form.focused_index(), 0);
    }

    #[test]
    fn collects_values_in_order() {
        let mut form = invoice();
        let format = NumberFormat::invariant();
        form.activate_all(&mut AnswerHost { answer: false, prompts: 0 });
        let values = form.try_collect(&format).unwrap();
        let pairs: Vec<_> = values.into_iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("price".to_string(), 20.0),
                ("share".to_string(), 100.0),
                ("qty".to_string(), 0.0),
            ]
        );

        type_text(&mut form, "1,5");
        let err = form.try_collect(&format).unwrap_err();
        assert_eq!(err.field, "price");
        assert!(err.to_string().starts_with("price: '1,5'"));
    }
}
