//! UCI protocol front end for the fianchetto engine.

pub mod commands;
pub mod emitter;
pub mod handler;
pub mod info;
pub mod parser;
pub mod server;
