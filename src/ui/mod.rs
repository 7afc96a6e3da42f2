pub mod layout;
mod editor;
mod form;

pub use editor::{draw_clear_confirmation, draw_editor};
pub use form::{draw_form, draw_quit_confirmation};
pub use layout::{calculate_editor_chunks, calculate_form_chunks};
