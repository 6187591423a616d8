//! Infrastructure: HTTP transport, Graph client, logging

pub mod graph;
pub mod http_client;
pub mod logging;
