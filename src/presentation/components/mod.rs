mod dialog;
mod fields;
mod footer;
mod layout;

pub use dialog::render_dialog;
pub use fields::render_fields;
pub use footer::render_footer;
