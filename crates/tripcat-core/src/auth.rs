// crates/tripcat-core/src/auth.rs

//! # Route Guard
//!
//! Session state is reduced to an [`AuthDecision`] once per navigation, and
//! [`guard`] maps (route, decision) to either rendering the route or a
//! redirect.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const HOME: &str = "/";
pub const SIGN_IN: &str = "/sign-in";

/// A user record from the users collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub account_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub joined_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Anything that can tell who is signed in.
pub trait SessionProvider {
    /// `Ok(None)` when there is no session.
    fn current_user(&self) -> Result<Option<User>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Authenticated(User),
    Unauthenticated,
    Error(String),
}

impl AuthDecision {
    pub fn from_session<P: SessionProvider + ?Sized>(provider: &P) -> Self {
        match provider.current_user() {
            Ok(Some(user)) => AuthDecision::Authenticated(user),
            Ok(None) => AuthDecision::Unauthenticated,
            Err(e) => {
                warn!(error = %e, "session lookup failed");
                AuthDecision::Error(e.to_string())
            }
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthDecision::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

/// The application's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Dashboard,
    AllUsers,
    Trips,
    CreateTrip,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::SignIn,
        Route::Dashboard,
        Route::AllUsers,
        Route::Trips,
        Route::CreateTrip,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::SignIn => SIGN_IN,
            Route::Dashboard => "/dashboard",
            Route::AllUsers => "/all-users",
            Route::Trips => "/trips",
            Route::CreateTrip => "/trips/create",
        }
    }

    /// Match a path; `/` is the dashboard. Trailing slashes are ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Dashboard);
        }
        Route::ALL.into_iter().find(|r| r.path() == trimmed)
    }

    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::SignIn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Render(Route),
    Redirect(&'static str),
}

/// Decide what a navigation to `route` does.
///
/// | route     | Authenticated | Unauthenticated | Error         |
/// |-----------|---------------|-----------------|---------------|
/// | sign-in   | redirect `/`  | render          | render        |
/// | any admin | render        | redirect sign-in| redirect sign-in |
pub fn guard(route: Route, decision: &AuthDecision) -> RouteOutcome {
    match (route.requires_auth(), decision) {
        (false, AuthDecision::Authenticated(_)) => RouteOutcome::Redirect(HOME),
        (false, _) => RouteOutcome::Render(route),
        (true, AuthDecision::Authenticated(_)) => RouteOutcome::Render(route),
        (true, _) => RouteOutcome::Redirect(SIGN_IN),
    }
}
