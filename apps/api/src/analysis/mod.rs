// Analysis artifacts: prompt building and generation for the five deck outputs.
// All LLM calls go through llm_client::retry::RetryingGenerator.

pub mod handlers;
pub mod prompts;
pub mod tasks;
