//! Progressive display of complete responses.

pub mod token_streamer;
