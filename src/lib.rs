//! Payroll export engine for small businesses.
//!
//! This crate computes pay period boundaries, aggregates time clock entries
//! into weekly regular and overtime hours, distributes pooled tips by hours
//! worked, merges approved PTO, and writes one payroll CSV row per employee.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod tips;
