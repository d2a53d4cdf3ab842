//! Shared contracts between backend and frontend
//!
//! Domain aggregates, DTOs and the page editor core live here so both sides
//! agree on one wire shape and one set of validation rules.

pub mod domain;
