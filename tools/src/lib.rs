//! Terminal front end and debugging tools for quizshare.
//!
//! This crate provides what the browser page does around the quiz core:
//!
//! - Load the dataset and message tables from disk
//! - Render questions and the result screen as text
//! - Decode and inspect share tokens bit by bit
//!
//! # Design Principles
//!
//! - **First-class tooling** - Token inspection is part of the product, not an afterthought.
//! - **Human-readable output** - Make it easy to see what a share link contains.

mod data;
mod inspect;
mod render;

pub use data::{load_dataset, load_messages, messages_path, MessageStore};
pub use inspect::{format_inspect, inspect_token, FieldSpan, InspectReport, ItemSpan};
pub use render::{
    format_decode_pretty, render_question, render_results, DecodeOutput,
};
