//! Object Finder
//!
//! 写真から身の回りの物を識別し、ポイントとコレクションを貯めるアプリの中核

pub mod ai_provider;
pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod hunt;
pub mod identifier;
pub mod notice;
pub mod session;
pub mod state;
pub mod storage;
pub mod workflow;
