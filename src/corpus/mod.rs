pub mod loader;
pub mod registry;

pub use loader::{load_corpus_dir, load_corpus_str};
pub use registry::{LoadStats, QuestionFilter, Registry};
