//! Skolar - Tutoring Marketplace Application Core
//!
//! This crate implements the data-access and screen-state layer of the
//! Skolar tutoring app: browsing tutors and creating bookings against a
//! Firestore-backed document store, gated behind an external identity
//! provider.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
