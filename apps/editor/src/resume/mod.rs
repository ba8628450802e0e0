// Resume load/parse/save flow against the backend, and input checks that run
// before any request is made.

pub mod handlers;
pub mod service;
pub mod validation;
