//! Domain types shared by extraction, scoring and the service layer.

pub mod models;
