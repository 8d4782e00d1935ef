//! Leave Overlap & Capacity Engine
//!
//! This crate keeps an in-memory set of employees and leave records,
//! answers "who is away on this day or in this window", checks whether a
//! new leave request would push concurrent absences over a configured
//! share of headcount, and produces day, month and year aggregates for
//! calendar views.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod store;
