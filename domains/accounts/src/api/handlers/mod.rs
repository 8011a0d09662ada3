//! HTTP handlers for the Accounts domain

pub mod admin;
pub mod auth;
pub mod dashboards;
pub mod profile;
