//! Follow-up question generation
//!
//! After the presentation phase, the examiner-side of the questioning phase
//! comes from the generative-model collaborator: an ordered list of
//! open-ended questions derived from the transcript, consumed one at a time
//! by the questioning session.

mod service;

pub use service::{QuestionList, QuestionService};
