pub mod export;
pub mod r#gen;
pub mod logger;
pub mod models;
pub mod session;
pub mod template;
pub mod ui;
pub mod utils;
pub mod worker;

// Re-exports for convenience
pub use export::{export_file_name, render_csv, write_csv};
pub use r#gen::{ContentGenClient, parse_questions, strip_code_fence};
pub use models::{
    AppState, Correctness, Difficulty, FormField, FormState, GenEvent, GenRequest, OptionEntry,
    QuestionRecord, RecordField, Studio, Technology,
};
pub use session::{handle_editor_input, handle_form_input};
pub use template::{Substitutions, substitute};
pub use worker::spawn_gen_worker;
