//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostGIS-backed repositories using Diesel.
//! - **static_regions**: the bundled country dataset, read once at startup.
//!
//! Adapters translate between domain types and infrastructure representations
//! and contain no business logic.

pub mod persistence;
pub mod static_regions;
