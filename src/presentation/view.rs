use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    field::NumberFormat,
    form::NumericForm,
    limitation::{LimitationConfig, LimitationType, LimitationValue},
};

use super::components::{render_dialog, render_fields, render_footer};

pub struct UiContext<'a> {
    pub view: &'a FormView,
    pub status_message: &'a str,
    pub dirty: bool,
    pub help: Option<&'a str>,
    pub dialog: Option<DialogRender<'a>>,
}

pub struct DialogRender<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub yes_selected: bool,
}

/// Owned copy of what the field list shows, so the form can be drawn
/// while one of its fields is busy prompting.
#[derive(Debug, Clone, Default)]
pub struct FormView {
    pub title: Option<String>,
    pub rows: Vec<FieldRow>,
    pub focused: usize,
}

#[derive(Debug, Clone)]
pub struct FieldRow {
    pub label: String,
    pub text: String,
    pub hint: String,
    pub readable: bool,
}

impl FormView {
    pub fn capture(form: &NumericForm, format: &NumberFormat) -> Self {
        let rows = form
            .fields()
            .iter()
            .map(|entry| FieldRow {
                label: entry.label.clone(),
                text: entry.field.text().to_string(),
                hint: limitation_hint(entry.field.config(), format),
                readable: entry.field.value(format).is_some(),
            })
            .collect();
        Self {
            title: form.title().map(str::to_string),
            rows,
            focused: form.focused_index(),
        }
    }
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(4)])
        .split(frame.area());

    let cursor_enabled = ctx.dialog.is_none();
    render_fields(frame, chunks[0], ctx.view, cursor_enabled);
    render_footer(frame, chunks[1], &ctx);

    if let Some(dialog) = ctx.dialog {
        render_dialog(frame, dialog);
    }
}

fn limitation_hint(config: &LimitationConfig, format: &NumberFormat) -> String {
    let mut parts = Vec::new();
    let preset = match config.limitation_type {
        LimitationType::Custom => None,
        LimitationType::Positive => Some("positive"),
        LimitationType::Negative => Some("negative"),
        LimitationType::Currency => Some("currency"),
        LimitationType::Percents => Some("percents"),
    };
    if let Some(preset) = preset {
        parts.push(preset.to_string());
    }
    if config.integer_only {
        parts.push("integer".to_string());
    } else if config.precision > 0 {
        parts.push(format!("{} decimals", config.precision));
    }
    match config.limitation_value {
        LimitationValue::None => {}
        LimitationValue::Minimum => parts.push(format!("≥ {}", format.format(config.minimum))),
        LimitationValue::Maximum => parts.push(format!("≤ {}", format.format(config.maximum))),
        LimitationValue::Range => parts.push(format!(
            "{} … {}",
            format.format(config.minimum),
            format.format(config.maximum)
        )),
    }
    parts.join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldHost;
    use crate::io::{FieldDefinition, FormDefinition};

    struct Silent;

    impl FieldHost for Silent {
        fn confirm(&mut self, _message: &str, _title: &str) -> bool {
            false
        }

        fn request_focus(&mut self) {}
    }

    #[test]
    fn hints_describe_derived_limitations() {
        let mut form = NumericForm::from_definition(&FormDefinition::new(vec![
            FieldDefinition::new("price", LimitationConfig::preset(LimitationType::Currency)),
            FieldDefinition::new("share", LimitationConfig::preset(LimitationType::Percents)),
            FieldDefinition::new("qty", LimitationConfig::new().with_integer_only(true)),
        ]));
        form.activate_all(&mut Silent);
        let view = FormView::capture(&form, &NumberFormat::invariant());
        let hints: Vec<_> = view.rows.iter().map(|row| row.hint.as_str()).collect();
        assert_eq!(
            hints,
            vec!["currency • 2 decimals • ≥ 0", "percents • 0 … 100", "integer"]
        );
        assert!(view.rows.iter().all(|row| row.readable));
    }
}
