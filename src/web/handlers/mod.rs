//! # Web API Handlers

pub mod health;
pub mod submission;
