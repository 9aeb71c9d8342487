//! # ledger-core
//!
//! Core types, wire contracts, and port traits for the valve ledger client.
//!
//! This crate provides the foundational types shared across all ledger crates:
//! - Entity structs for the form domain (attachments, draft snapshots, steps)
//! - Enums for batch actions, toast kinds, and step indicator states
//! - Record identifiers tolerant of numeric or string server ids
//! - Response types for the JSON endpoints
//! - Port traits for everything that leaves the process or touches the user
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod ports;
pub mod responses;
