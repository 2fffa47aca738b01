//! Output formatting for transcripts, graphs and errors

pub mod console;
