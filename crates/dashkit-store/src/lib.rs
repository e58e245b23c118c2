//! # Dashkit Store
//!
//! Local persistence for the dashboard:
//!
//! - **Key-value layer**: a `localStorage`-shaped store, file-backed in
//!   production and in-memory for tests
//! - **Layout store**: the canonical ordered widget collection, persisted
//!   whole on every mutation and notifying subscribers through the event
//!   bus
//! - **Session**: typed records for the persisted auth keys plus the pure
//!   route-gating rules (collaborator boundary; no network auth here)

pub mod error;
pub mod kv;
pub mod layout;
pub mod session;

pub use error::{Result, StoreError};
pub use kv::{keys, FileStore, KeyValueStore, MemoryStore};
pub use layout::LayoutStore;
pub use session::{
    is_admin, is_client, is_onboarding_required, redirect_path, routes, OnboardingProcedure,
    OnboardingStatus, Session, StoreProfile, UserGroup, UserRecord, ViewKind, ViewRecord,
};
