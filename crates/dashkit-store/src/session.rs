//! Session records and route gating.
//!
//! Collaborator boundary for the auth flow: typed views of the persisted
//! session keys plus the pure rules deciding which view a user lands on.
//! The actual login/refresh network calls live outside this workspace.

use serde::{Deserialize, Serialize};

use dashkit_core::{AppEvent, EventBus, SessionEvent};

use crate::error::Result;
use crate::kv::{keys, KeyValueStore};

/// Route paths the gating rules resolve to.
pub mod routes {
    pub const LOGIN: &str = "/login";
    pub const ADMIN: &str = "/admin";
    pub const DASHBOARD: &str = "/dashboard";
    pub const ONBOARDING: &str = "/onboarding";
    pub const HOME: &str = "/";
}

/// Backend user group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserGroup {
    #[serde(rename = "ADMINISTRATOR")]
    Administrator,
    #[serde(rename = "USER")]
    User,
}

/// View the session is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewKind {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "CLIENT")]
    Client,
}

/// Onboarding progress reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnboardingStatus {
    #[serde(rename = "INIT")]
    Init,
    #[serde(rename = "DONE")]
    Done,
}

/// Persisted `view` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRecord {
    #[serde(rename = "type")]
    pub kind: ViewKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OnboardingProcedure {
    #[serde(default)]
    pub onboarding_status: Option<OnboardingStatus>,
}

/// The merchant store attached to a client user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoreProfile {
    #[serde(default)]
    pub onboarding_procedure: Option<OnboardingProcedure>,
}

/// Persisted `user` record. Fields the core never reads are not modeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserRecord {
    #[serde(default)]
    pub user_group: Option<UserGroup>,
    #[serde(default)]
    pub view: Option<ViewRecord>,
    #[serde(default, rename = "store")]
    pub store_profile: Option<StoreProfile>,
}

impl UserRecord {
    fn onboarding_status(&self) -> Option<OnboardingStatus> {
        self.store_profile
            .as_ref()
            .and_then(|p| p.onboarding_procedure.as_ref())
            .and_then(|p| p.onboarding_status)
    }
}

/// True when the user should see the admin surface.
pub fn is_admin(user: Option<&UserRecord>, view: Option<&ViewRecord>) -> bool {
    let Some(user) = user else { return false };

    user.user_group == Some(UserGroup::Administrator)
        || view.map(|v| v.kind) == Some(ViewKind::Admin)
        || user.view.map(|v| v.kind) == Some(ViewKind::Admin)
}

/// True when the user should see the client dashboard.
pub fn is_client(user: Option<&UserRecord>, view: Option<&ViewRecord>) -> bool {
    let Some(user) = user else { return false };

    user.user_group == Some(UserGroup::User)
        || view.map(|v| v.kind) == Some(ViewKind::Client)
        || user.view.map(|v| v.kind) == Some(ViewKind::Client)
}

/// Client users must finish onboarding before reaching the dashboard;
/// administrators never onboard.
pub fn is_onboarding_required(user: Option<&UserRecord>) -> bool {
    let Some(user) = user else { return false };
    if user.user_group == Some(UserGroup::Administrator) {
        return false;
    }
    user.onboarding_status() != Some(OnboardingStatus::Done)
}

/// The route an authenticated (or not) session should land on.
pub fn redirect_path(
    is_authenticated: bool,
    user: Option<&UserRecord>,
    view: Option<&ViewRecord>,
) -> &'static str {
    let Some(user) = (if is_authenticated { user } else { None }) else {
        return routes::LOGIN;
    };

    match user.user_group {
        Some(UserGroup::Administrator) => return routes::ADMIN,
        Some(UserGroup::User) => return routes::DASHBOARD,
        None => {}
    }

    if view.map(|v| v.kind) == Some(ViewKind::Admin)
        || user.view.map(|v| v.kind) == Some(ViewKind::Admin)
    {
        return routes::ADMIN;
    }

    let client_view = view.map(|v| v.kind) == Some(ViewKind::Client)
        || user.view.map(|v| v.kind) == Some(ViewKind::Client);
    if client_view {
        if user.onboarding_status() != Some(OnboardingStatus::Done) {
            return routes::ONBOARDING;
        }
        return routes::DASHBOARD;
    }

    routes::LOGIN
}

/// The full persisted session, one field per key-value key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserRecord>,
    pub view: Option<ViewRecord>,
    pub accesses: Option<serde_json::Value>,
}

impl Session {
    /// Reads the session keys from the key-value store. Unreadable
    /// individual values surface as errors; absent ones as `None`.
    pub fn load(kv: &dyn KeyValueStore) -> Result<Self> {
        Ok(Self {
            access_token: read_json(kv, keys::ACCESS_TOKEN)?,
            refresh_token: read_json(kv, keys::REFRESH_TOKEN)?,
            user: read_json(kv, keys::USER)?,
            view: read_json(kv, keys::VIEW)?,
            accesses: read_json(kv, keys::ACCESSES)?,
        })
    }

    /// Writes all present fields and announces the sign-in.
    pub fn persist(&self, kv: &dyn KeyValueStore, bus: &EventBus) -> Result<()> {
        write_json(kv, keys::ACCESS_TOKEN, self.access_token.as_ref())?;
        write_json(kv, keys::REFRESH_TOKEN, self.refresh_token.as_ref())?;
        write_json(kv, keys::USER, self.user.as_ref())?;
        write_json(kv, keys::VIEW, self.view.as_ref())?;
        write_json(kv, keys::ACCESSES, self.accesses.as_ref())?;
        bus.publish(AppEvent::Session(SessionEvent::SignedIn));
        Ok(())
    }

    /// Clears every session key and announces the sign-out.
    pub fn clear(kv: &dyn KeyValueStore, bus: &EventBus) -> Result<()> {
        for key in [
            keys::ACCESS_TOKEN,
            keys::REFRESH_TOKEN,
            keys::USER,
            keys::VIEW,
            keys::ACCESSES,
        ] {
            kv.remove(key)?;
        }
        bus.publish(AppEvent::Session(SessionEvent::SignedOut));
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Route this session should land on.
    pub fn redirect_path(&self) -> &'static str {
        redirect_path(
            self.is_authenticated(),
            self.user.as_ref(),
            self.view.as_ref(),
        )
    }
}

fn read_json<T: serde::de::DeserializeOwned>(
    kv: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    match kv.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

fn write_json<T: Serialize>(kv: &dyn KeyValueStore, key: &str, value: Option<&T>) -> Result<()> {
    match value {
        Some(value) => kv.set(key, &serde_json::to_string(value)?),
        None => kv.remove(key),
    }
}
