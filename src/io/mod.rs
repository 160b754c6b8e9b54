mod format;
mod input;
mod output;

pub use format::DocumentFormat;
pub use input::{FieldDefinition, FormDefinition, parse_document_str, parse_form_definition_str};
pub use output::{OutputDestination, OutputOptions, emit, values_to_document};
