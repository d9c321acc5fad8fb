//! Recap Core Library
//!
//! Core domain logic for summarizing hashtag-filtered journal entries
//! from an Obsidian vault with a local LLM.

pub mod batch;
pub mod config;
pub mod entry;
pub mod error;
pub mod logging;
pub mod rag;
pub mod summarize;
pub mod vault;
pub mod writer;
