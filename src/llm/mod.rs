//! Generative-model collaborator
//!
//! The grading and question services both drive one contract: send a system
//! prompt plus a user prompt, constrain the response to a JSON schema, and
//! get back the parsed object or a typed failure. `OpenAiModel` is the
//! production implementation over the chat completions REST API; tests
//! substitute their own `GenerativeModel`.

mod model;
mod openai;

pub use model::{GenerativeModel, StructuredSchema};
pub use openai::OpenAiModel;
