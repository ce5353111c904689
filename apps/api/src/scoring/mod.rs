// Rubric-response parsing engine.
// Pure, synchronous extraction (sections, fields, envelope, record) plus the rubric it
// grades against. Only `pipeline` touches the model, and only through `ModelInvoker`.

pub mod envelope;
pub mod fields;
pub mod pipeline;
pub mod prompts;
pub mod record;
pub mod rubric;
pub mod sections;
