// CV ingestion and restructuring pipeline.
// Implements: document extraction, normalization, prompt building, model-output
// parsing, heuristic fallback, result synthesis and the HTTP handlers.
// All model calls go through llm_client; nothing here talks to the endpoint directly.

pub mod analysis;
pub mod fallback;
pub mod handlers;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod prompts;
