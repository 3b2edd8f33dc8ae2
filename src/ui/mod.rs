pub mod format;
pub mod thesaurus_ui;

pub use thesaurus_ui::ThesaurusApp;
