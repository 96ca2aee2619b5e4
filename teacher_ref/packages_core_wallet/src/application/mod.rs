//! Application services for the wallet system

pub mod wallet_service;

pub use wallet_service::{WalletService, WalletRepository, WalletServiceImpl};