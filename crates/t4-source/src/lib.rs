mod buffer;
mod db;
mod position;
mod render;
mod span;

pub use buffer::SourceBuffer;
pub use db::Db;
pub use position::LineIndex;
pub use position::Position;
pub use render::Diagnostic;
pub use render::DiagnosticRenderer;
pub use render::Severity;
pub use span::Span;
