//! Failures the user store surfaces to views.
//!
//! Store actions never return these; they are written to the store's
//! `error` field, replacing whatever was there.

use thiserror::Error;

/// User-visible store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Listing users failed; the list was left unchanged.
    #[error("Failed to fetch users")]
    FetchFailed,
    /// Creating a user failed; the optimistic entry was rolled back.
    #[error("Failed to create user")]
    CreateFailed,
}
