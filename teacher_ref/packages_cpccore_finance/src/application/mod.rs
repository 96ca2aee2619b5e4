//! Application layer for the finance module
//!
//! Contains the application services that orchestrate domain logic and interact with infrastructure.

pub mod budget_service;
pub mod savings_service;