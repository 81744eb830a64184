pub mod date;
pub mod engine;
pub mod text;

pub use engine::{execute, Payload, ToolError, ToolKind, ToolOutput};
pub use text::CaseMode;
