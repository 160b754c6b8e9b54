use anyhow::{Context, Result, bail};
use indexmap::IndexSet;
use serde::Deserialize;
use serde_json::Value;

use super::DocumentFormat;
use crate::{field::NumberFormat, limitation::LimitationConfig};

/// A set of named numeric fields, as read from a JSON/YAML/TOML document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub decimal_separator: Option<char>,
    #[serde(default)]
    pub group_separator: Option<char>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Initial text; the field starts at "0" when omitted.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(flatten)]
    pub limitation: LimitationConfig,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, limitation: LimitationConfig) -> Self {
        Self {
            name: name.into(),
            label: None,
            text: None,
            limitation,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

impl FormDefinition {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self {
            title: None,
            decimal_separator: None,
            group_separator: None,
            fields,
        }
    }

    /// Locale declared by the document, falling back to the host locale.
    pub fn number_format(&self) -> NumberFormat {
        self.number_format_over(NumberFormat::from_env())
    }

    /// Locale declared by the document, with `fallback` filling the
    /// separators it leaves out.
    pub fn number_format_over(&self, fallback: NumberFormat) -> NumberFormat {
        NumberFormat {
            decimal_separator: self
                .decimal_separator
                .unwrap_or(fallback.decimal_separator),
            group_separator: self.group_separator.or(fallback.group_separator),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            bail!("form definition declares no fields");
        }
        let mut seen = IndexSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if field.name.trim().is_empty() {
                bail!("field names cannot be empty");
            }
            if !seen.insert(field.name.as_str()) {
                bail!("field '{}' is declared more than once", field.name);
            }
        }
        if let (Some(decimal), Some(group)) = (self.decimal_separator, self.group_separator)
            && decimal == group
        {
            bail!("decimal and group separators must differ (both are '{decimal}')");
        }
        Ok(())
    }
}

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::from_str::<toml::Table>(contents)
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Parse and validate a form definition document.
pub fn parse_form_definition_str(contents: &str, format: DocumentFormat) -> Result<FormDefinition> {
    let value = parse_document_str(contents, format)?;
    let definition: FormDefinition =
        serde_json::from_value(value).context("document is not a form definition")?;
    definition.validate()?;
    Ok(definition)
}
