use anyhow::Result;
use serde_json::Value;

use crate::{
    field::NumberFormat,
    form::NumericForm,
    io::{FormDefinition, OutputOptions, emit, values_to_document},
};

use super::{host::HeadlessHost, options::UiOptions, runtime::App};

#[derive(Debug)]
pub struct NumericFormUI {
    definition: FormDefinition,
    title: Option<String>,
    options: UiOptions,
    output: Option<OutputOptions>,
}

impl NumericFormUI {
    pub fn new(definition: FormDefinition) -> Self {
        Self {
            definition,
            title: None,
            options: UiOptions::default(),
            output: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_output(mut self, output: OutputOptions) -> Self {
        self.output = Some(output);
        self
    }

    /// Run the form in the terminal until the user saves or quits.
    pub fn run(self) -> Result<Value> {
        let (form, format, options, output) = self.prepare()?;
        let mut app = App::new(form, options, format);
        let value = app.run()?;
        if let Some(output) = &output {
            emit(&value, output)?;
        }
        Ok(value)
    }

    /// Activate every field without a terminal and return the normalized values.
    pub fn evaluate(self) -> Result<Value> {
        let (mut form, format, _, output) = self.prepare()?;
        form.activate_all(&mut HeadlessHost::new(format));
        let values = form.try_collect(&format)?;
        let value = values_to_document(&values);
        if let Some(output) = &output {
            emit(&value, output)?;
        }
        Ok(value)
    }

    fn prepare(self) -> Result<(NumericForm, NumberFormat, UiOptions, Option<OutputOptions>)> {
        let NumericFormUI {
            definition,
            title,
            options,
            output,
        } = self;

        definition.validate()?;
        let format = options
            .number_format
            .unwrap_or_else(|| definition.number_format());
        let mut form = NumericForm::from_definition(&definition);
        if let Some(title) = title {
            form.set_title(title);
        }
        Ok((form, format, options, output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::FieldDefinition;
    use crate::limitation::{LimitationConfig, LimitationType};
    use serde_json::json;

    #[test]
    fn evaluate_normalizes_without_terminal() {
        let definition = FormDefinition::new(vec![
            FieldDefinition::new("debt", LimitationConfig::preset(LimitationType::Negative))
                .with_text("15"),
            FieldDefinition::new("ratio", LimitationConfig::new().with_precision(3))
                .with_text("oops"),
        ]);
        let value = NumericFormUI::new(definition)
            .with_output(OutputOptions::default().with_destinations(Vec::new()))
            .evaluate()
            .unwrap();
        assert_eq!(value, json!({"debt": 0, "ratio": 0}));
    }

    #[test]
    fn options_override_document_locale() {
        let mut definition = FormDefinition::new(vec![
            FieldDefinition::new("amount", LimitationConfig::new()).with_text("2,5"),
        ]);
        definition.decimal_separator = Some('.');
        let value = NumericFormUI::new(definition)
            .with_options(
                UiOptions::default()
                    .with_number_format(NumberFormat::invariant().with_decimal_separator(',')),
            )
            .evaluate()
            .unwrap();
        assert_eq!(value, json!({"amount": 2.5}));
    }

    #[test]
    fn invalid_definitions_are_rejected() {
        let definition = FormDefinition::new(Vec::new());
        assert!(NumericFormUI::new(definition).evaluate().is_err());
    }
}
