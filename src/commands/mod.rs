//! CLI commands for recap

pub mod chat;
pub mod dispatch;
pub mod scan;
pub mod suggest;
pub mod summarize;
