mod rounding;

use serde::Deserialize;

pub use rounding::round_half_away;

/// Allows to set a type in order to automatically assign other limitations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitationType {
    /// Does not set anything.
    #[default]
    Custom,
    /// Value limitation to minimum 0.
    Positive,
    /// Value limitation to maximum 0.
    Negative,
    /// Positive value limitation with a precision of 2.
    Currency,
    /// Value limitation to the range 0..=100.
    Percents,
}

/// Clamping rule applied to a value once it has been rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitationValue {
    #[default]
    None,
    /// Not lesser than `minimum`.
    Minimum,
    /// Not greater than `maximum`.
    Maximum,
    /// Not lesser than `minimum` and not greater than `maximum`.
    Range,
}

/// Limitations declared for one numeric field.
///
/// `minimum > maximum` is accepted as is; the clamp simply applies the
/// minimum first and the maximum second.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LimitationConfig {
    pub integer_only: bool,
    pub minimum: f64,
    pub maximum: f64,
    /// Digits kept after the decimal point; `0` keeps the full fraction.
    pub precision: u32,
    pub limitation_type: LimitationType,
    pub limitation_value: LimitationValue,
}

impl Default for LimitationConfig {
    fn default() -> Self {
        Self {
            integer_only: false,
            minimum: 0.0,
            maximum: 0.0,
            precision: 0,
            limitation_type: LimitationType::Custom,
            limitation_value: LimitationValue::None,
        }
    }
}

impl LimitationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset(limitation_type: LimitationType) -> Self {
        Self::default().with_type(limitation_type)
    }

    pub fn with_integer_only(mut self, integer_only: bool) -> Self {
        self.integer_only = integer_only;
        self
    }

    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = minimum;
        self
    }

    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = maximum;
        self
    }

    pub fn with_range(self, minimum: f64, maximum: f64) -> Self {
        self.with_minimum(minimum)
            .with_maximum(maximum)
            .with_value(LimitationValue::Range)
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_type(mut self, limitation_type: LimitationType) -> Self {
        self.limitation_type = limitation_type;
        self
    }

    pub fn with_value(mut self, limitation_value: LimitationValue) -> Self {
        self.limitation_value = limitation_value;
        self
    }

    pub fn is_type_set(&self) -> bool {
        self.limitation_type != LimitationType::Custom
    }
}

/// The part of a [`LimitationConfig`] a preset fixes. `None` entries are
/// left untouched when the delta is applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PresetDelta {
    pub integer_only: Option<bool>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub precision: Option<u32>,
    pub limitation_value: Option<LimitationValue>,
}

impl PresetDelta {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, config: &mut LimitationConfig) {
        if let Some(integer_only) = self.integer_only {
            config.integer_only = integer_only;
        }
        if let Some(minimum) = self.minimum {
            config.minimum = minimum;
        }
        if let Some(maximum) = self.maximum {
            config.maximum = maximum;
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if let Some(limitation_value) = self.limitation_value {
            config.limitation_value = limitation_value;
        }
    }
}

pub fn derive_preset(limitation_type: LimitationType) -> PresetDelta {
    match limitation_type {
        LimitationType::Custom => PresetDelta::default(),
        LimitationType::Positive => PresetDelta {
            limitation_value: Some(LimitationValue::Minimum),
            minimum: Some(0.0),
            ..PresetDelta::default()
        },
        LimitationType::Negative => PresetDelta {
            limitation_value: Some(LimitationValue::Maximum),
            maximum: Some(0.0),
            ..PresetDelta::default()
        },
        LimitationType::Currency => PresetDelta {
            integer_only: Some(false),
            limitation_value: Some(LimitationValue::Minimum),
            minimum: Some(0.0),
            precision: Some(2),
            ..PresetDelta::default()
        },
        LimitationType::Percents => PresetDelta {
            integer_only: Some(false),
            limitation_value: Some(LimitationValue::Range),
            minimum: Some(0.0),
            maximum: Some(100.0),
            ..PresetDelta::default()
        },
    }
}

/// Truncate or round `value`, then clamp it per `config.limitation_value`.
pub fn normalize(value: f64, config: &LimitationConfig) -> f64 {
    let mut value = if config.integer_only {
        value.trunc()
    } else if config.precision > 0 {
        round_half_away(value, config.precision)
    } else {
        value
    };

    match config.limitation_value {
        LimitationValue::None => {}
        LimitationValue::Minimum => value = config.minimum.max(value),
        LimitationValue::Maximum => value = config.maximum.min(value),
        LimitationValue::Range => {
            value = config.minimum.max(value);
            value = config.maximum.min(value);
        }
    }
    value
}
