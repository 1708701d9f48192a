//! HTTP API layer for the Signa verification service

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
