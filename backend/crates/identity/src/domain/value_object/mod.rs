//! Value Object Module

pub mod auth_provider;
pub mod birth_date;
pub mod credential;
pub mod display_name;
pub mod email;
pub mod lifecycle;
