pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod feed;
pub mod naming;
pub mod object_store;
pub mod reader;
pub mod resolve;
pub mod version;
pub mod writer;
