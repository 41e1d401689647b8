//! Renders portfolio project and achievement cards from loosely-typed JSON
//! records and serves the resulting pages.

pub mod core;
pub mod error;
pub mod pages;
pub mod render;
pub mod server;
