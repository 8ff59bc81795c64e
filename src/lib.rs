//! Library surface of `todolite`: the SQLite task store, the snapshot
//! synchronizer both front-ends drive, and the front-ends themselves.

pub mod board;
pub mod commands;
pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod models;
pub mod storage;
pub mod tui;
