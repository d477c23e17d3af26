//! HTTP adapters exposing the orchestration core

pub mod api_handler;
pub mod health_handler;
