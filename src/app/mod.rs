mod dialog;
mod host;
mod input;
mod numeric_ui;
mod options;
mod runtime;
mod status;
mod terminal;

pub use numeric_ui::NumericFormUI;
pub use options::UiOptions;
