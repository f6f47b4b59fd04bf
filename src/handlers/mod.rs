//! HTTP handlers for supplier CRUD and search.

pub mod suppliers;
