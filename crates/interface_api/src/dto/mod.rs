//! Request/response data transfer objects

pub mod share_roll;
