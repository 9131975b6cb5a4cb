pub mod account;
pub mod bidding;
pub mod config;
pub mod database;
pub mod donation;
pub mod error;
pub mod handlers;
pub mod query;
