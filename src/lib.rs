pub mod app_state;
pub mod config;
pub mod constants;
pub mod errors;
pub mod formatting;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod views;

#[cfg(test)]
pub mod test_utils;
