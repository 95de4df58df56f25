pub mod catalog;
pub mod interpreter;
pub mod llm;
pub mod prompt;
pub mod recommendations;

pub use interpreter::{BracketSliceInterpreter, ResponseInterpreter};
pub use recommendations::RecommendationService;
