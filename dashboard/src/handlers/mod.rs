//! HTTP handlers

pub mod charts;
pub mod health;
pub mod page;
