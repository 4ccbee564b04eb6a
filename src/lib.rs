//! itemdb - a small CRUD HTTP API over a single SQLite-backed item table
//!
//! Layers, leaves first: `storage` → `controller` → `http_server` → `cli`.

pub mod cli;
pub mod controller;
pub mod http_server;
pub mod storage;
