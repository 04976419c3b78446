// ABOUTME: Brainstorm module - round-robin discussion between providers.
// ABOUTME: Each participant sees the whole transcript as one flattened message.

mod brainstorm;
mod transcript;

pub use brainstorm::{Brainstorm, Turn};
pub use transcript::{Transcript, TranscriptEntry};

#[cfg(test)]
mod brainstorm_test;
