//! Integration tests for scribe-api
//!
//! Uses wiremock to simulate the pipeline backend and verifies end-to-end
//! behavior of the ApiClient endpoint calls and the BackendProvider port
//! implementation.

mod common;

mod test_actions;
mod test_dashboard;
mod test_progress;
