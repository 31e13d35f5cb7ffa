//! Reusable command flows
//!
//! Every data command follows the same path: build the context, pass the
//! route guard, fetch while a spinner runs, print.

mod guarded;

pub use guarded::{run_document, run_list, with_spinner};
