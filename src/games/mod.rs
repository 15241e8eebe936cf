//! Game implementations.

pub mod word_chain;
