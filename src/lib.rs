#![deny(rust_2018_idioms)]
//! A numeric text field that keeps its content consistent with declared
//! limitations (sign, range, precision, integrality), plus a terminal host
//! that drives it.

mod app;
pub mod field;
pub mod form;
mod io;
pub mod limitation;
mod presentation;

pub use app::{NumericFormUI, UiOptions};
pub use field::{FieldHost, FocusOutcome, NumberFormat, NumericField, ParseNumberError};
pub use io::{
    DocumentFormat, FieldDefinition, FormDefinition, OutputDestination, OutputOptions, emit,
    parse_document_str, parse_form_definition_str, values_to_document,
};
pub use limitation::{LimitationConfig, LimitationType, LimitationValue, derive_preset, normalize};

pub mod prelude {
    pub use super::{
        FieldHost, FocusOutcome, LimitationConfig, LimitationType, LimitationValue,
        NumberFormat, NumericField, NumericFormUI, UiOptions,
    };
}
