// Resume analysis: plain-text serialization, prompt templates, and the
// grammar/ATS and scoring calls against the generation endpoint.

pub mod client;
pub mod handlers;
pub mod prompts;
pub mod serializer;
