//! # Cloudex Database Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! PostgreSQL database. It is the system's "permanent archive."
//!
//! ## Architectural Principles
//!
//! - **Adapter Layer:** This crate encapsulates all database-specific logic for
//!   the plain read/listing/CRUD paths, hiding the underlying SQL from the rest
//!   of the application. The one deliberate exception is trade execution, which
//!   owns its own locking transaction in the `executor` crate.
//! - **Asynchronous & Pooled:** All operations are asynchronous and go through
//!   a shared connection pool (`PgPool`) with a bounded acquire timeout, so a
//!   saturated pool surfaces as a retryable error instead of a hang.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `run_migrations`: A utility to apply database migrations, ensuring the schema is up-to-date.
//! - `DbRepository`: The main struct that holds the connection pool and provides all
//!   the high-level data access methods (e.g., `get_top_gainers`).
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::{DbRepository, NewStock, NewUser};
