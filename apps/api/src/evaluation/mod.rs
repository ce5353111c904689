// Evaluation API: PDF intake, grading, and the append-only score sheet.
// All model calls go through scoring::pipeline; no direct Anthropic calls here.

pub mod handlers;
pub mod pdf;
pub mod store;
