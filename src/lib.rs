//! employee-api - HTTP CRUD over a single pooled `employee` table

pub mod cli;
pub mod db;
pub mod employees;
pub mod http_server;
pub mod observability;
