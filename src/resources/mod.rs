//! Endpoint groups, each an `impl Client` block over the transport core.

mod algorithms;
mod billing;
mod detect;
mod jobs;
mod media;
mod rights;
mod search;
