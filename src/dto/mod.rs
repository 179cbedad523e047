//! DTOs exchanged between services and the HTTP API.

pub mod client;
