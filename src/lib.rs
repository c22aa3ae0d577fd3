//! Base-62 URL shortener
//!
//! Records get a numeric id from the storage backend; their public short code
//! is that id, shifted by [`resolver::OFFSET`] and written in base 62.

pub mod codec;
pub mod config;
pub mod database;
pub mod error;
pub mod handler;
pub mod memory;
pub mod model;
pub mod resolver;
pub mod route;
pub mod storage;
