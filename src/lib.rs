//! Note creation service: validates requests, forwards them to the store and
//! answers with uniform response envelopes.

pub mod config;
pub mod dto;
pub mod envelope;
pub mod handlers;
pub mod repository;
pub mod routes;
pub mod service;
pub mod validation;
