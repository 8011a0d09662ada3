//! Accounts domain layer: authentication flows, validation

pub mod service;
pub mod validation;
