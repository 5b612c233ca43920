pub mod tutor;

pub use tutor::{ExplainRequest, ExplanationResponse};
