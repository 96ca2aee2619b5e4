//! Database infrastructure for the expense tracker module

pub mod expense_repository;
pub mod receipt_repository;
pub mod sharing_preference_repository;