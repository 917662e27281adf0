//! Request handlers

pub mod health;
pub mod share_roll;
