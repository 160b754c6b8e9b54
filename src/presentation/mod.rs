mod components;
mod view;

pub use view::{DialogRender, FormView, UiContext, draw};
