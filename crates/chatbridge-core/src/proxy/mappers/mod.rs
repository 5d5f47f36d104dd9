// Backend protocol mappers
pub mod ollama;
