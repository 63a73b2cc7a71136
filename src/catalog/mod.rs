pub mod candidates;
pub mod questions;

pub use candidates::CandidateRegistry;
pub use questions::QuestionCatalog;
