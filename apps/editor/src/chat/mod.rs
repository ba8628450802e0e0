// Assistant conversation: append-only history, backend chat calls, and the
// bridge that routes chat-borne suggestions through the reconciler.

pub mod bridge;
pub mod handlers;
pub mod history;
pub mod prompts;
pub mod service;
