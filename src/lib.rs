//! K-Tax: Thai personal income tax calculation.
//!
//! This crate computes personal income tax under the Thai progressive
//! bracket schedule. It validates the caller's tax information and the
//! configured deduction ceilings, caps claimed allowances, and nets the
//! result against withholding tax. The calculation core is pure; the HTTP
//! layer fetches the deduction configuration from a store and passes it in.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod csv_loader;
pub mod error;
pub mod models;
pub mod repository;
