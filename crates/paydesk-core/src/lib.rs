//! Core paydesk library (session, HTTP client, roles, routes, portal API).

pub mod config;
pub mod endpoints;
pub mod http;
pub mod latest;
pub mod portal;
pub mod roles;
pub mod routes;
pub mod session;
