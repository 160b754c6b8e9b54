//! A text field that keeps its content a number satisfying its limitations.

mod host;
mod number;

use tracing::{debug, warn};

use crate::limitation::{
    LimitationConfig, LimitationType, LimitationValue, derive_preset, normalize,
};

pub use host::{FORMAT_PROMPT_TITLE, FieldHost, FocusOutcome, format_prompt};
pub use number::{NumberFormat, ParseNumberError};

pub const INITIAL_TEXT: &str = "0";

#[derive(Debug, Clone)]
pub struct NumericField {
    config: LimitationConfig,
    text: String,
    activated: bool,
}

impl Default for NumericField {
    fn default() -> Self {
        Self::new(LimitationConfig::default())
    }
}

impl NumericField {
    pub fn new(config: LimitationConfig) -> Self {
        Self {
            config,
            text: INITIAL_TEXT.to_string(),
            activated: false,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the displayed text. No normalization happens until the next
    /// focus loss.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub(crate) fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn config(&self) -> &LimitationConfig {
        &self.config
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn set_integer_only(&mut self, integer_only: bool) {
        self.configure(|config| config.integer_only = integer_only);
    }

    pub fn set_minimum(&mut self, minimum: f64) {
        self.configure(|config| config.minimum = minimum);
    }

    pub fn set_maximum(&mut self, maximum: f64) {
        self.configure(|config| config.maximum = maximum);
    }

    pub fn set_precision(&mut self, precision: u32) {
        self.configure(|config| config.precision = precision);
    }

    pub fn set_limitation_type(&mut self, limitation_type: LimitationType) {
        self.configure(|config| config.limitation_type = limitation_type);
    }

    pub fn set_limitation_value(&mut self, limitation_value: LimitationValue) {
        self.configure(|config| config.limitation_value = limitation_value);
    }

    fn configure(&mut self, update: impl FnOnce(&mut LimitationConfig)) {
        if self.activated {
            warn!("ignoring limitation change on an activated field");
            return;
        }
        update(&mut self.config);
    }

    /// Current text read under `format`, if it is a number.
    pub fn value(&self, format: &NumberFormat) -> Option<f64> {
        format.parse(&self.text).ok()
    }

    /// Derive the preset and normalize the initial text. Runs once; later
    /// calls return `false` and change nothing.
    pub fn activate<H: FieldHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.activated {
            return false;
        }
        if self.config.is_type_set() {
            derive_preset(self.config.limitation_type).apply_to(&mut self.config);
            debug!(preset = ?self.config.limitation_type, config = ?self.config, "preset derived");
        }

        let format = host.number_format();
        let value = match format.parse(&self.text) {
            Ok(value) => value,
            Err(err) => {
                debug!(%err, "initial text unreadable, starting from zero");
                self.text = INITIAL_TEXT.to_string();
                0.0
            }
        };
        self.commit(value, &format);
        self.activated = true;
        true
    }

    /// Validate the text as focus leaves the field.
    ///
    /// Unreadable text asks the host whether the user wants to fix it. A yes
    /// keeps the text and the focus; a no resets the text to zero.
    pub fn focus_lost<H: FieldHost + ?Sized>(&mut self, host: &mut H) -> FocusOutcome {
        let format = host.number_format();
        let value = match format.parse(&self.text) {
            Ok(value) => value,
            Err(err) => {
                debug!(%err, "focus lost with unreadable text");
                let message = format_prompt(format.decimal_separator);
                if host.confirm(&message, FORMAT_PROMPT_TITLE) {
                    host.request_focus();
                    return FocusOutcome::Retained;
                }
                self.text = INITIAL_TEXT.to_string();
                0.0
            }
        };
        self.commit(value, &format);
        FocusOutcome::Released
    }

    fn commit(&mut self, value: f64, format: &NumberFormat) {
        let normalized = normalize(value, &self.config);
        self.text = format.format(normalized);
        debug!(value, normalized, text = %self.text, "value committed");
    }
}
