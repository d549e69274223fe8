//! Circle store: add/remove a friend in a named circle.
//!
//! # Responsibility
//! - Translate circle UI actions into requests against `/api/circles`.
//!
//! # Invariants
//! - One action issues exactly one request and resolves only after the
//!   server responds.
//! - Failures propagate as `reqwest::Error` without transformation; user
//!   facing handling lives in UI code above this crate.

use log::debug;
use serde::Serialize;

#[derive(Serialize)]
struct AddToCircleBody<'a> {
    name: &'a str,
    friend: &'a str,
}

#[derive(Serialize)]
struct RemoveFromCircleBody<'a> {
    friend: &'a str,
}

/// Stateless HTTP pass-through for circle membership actions.
pub struct CircleStore {
    base_url: String,
    client: reqwest::Client,
}

impl CircleStore {
    /// Creates a store with a default client.
    ///
    /// `base_url` is the server origin, e.g. `http://localhost:3000`;
    /// trailing slashes are tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Creates a store reusing a caller-supplied client.
    ///
    /// Connection pooling and timeout policy belong to the caller; the
    /// store adds none of its own.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    /// Adds `friend` to the circle called `name`.
    ///
    /// Issues `POST /api/circles` with body `{name, friend}`. Non-success
    /// statuses and transport failures return the underlying error.
    pub async fn add_to_circle(&self, name: &str, friend: &str) -> reqwest::Result<()> {
        debug!("event=circle_add module=circles status=start");
        self.client
            .post(self.circles_url())
            .json(&AddToCircleBody { name, friend })
            .send()
            .await?
            .error_for_status()?;
        debug!("event=circle_add module=circles status=ok");
        Ok(())
    }

    /// Removes `friend` from their circle.
    ///
    /// Issues `PATCH /api/circles` with body `{friend}`; same failure
    /// propagation as `add_to_circle`.
    pub async fn remove_from_circle(&self, friend: &str) -> reqwest::Result<()> {
        debug!("event=circle_remove module=circles status=start");
        self.client
            .patch(self.circles_url())
            .json(&RemoveFromCircleBody { friend })
            .send()
            .await?
            .error_for_status()?;
        debug!("event=circle_remove module=circles status=ok");
        Ok(())
    }

    fn circles_url(&self) -> String {
        format!("{}/api/circles", self.base_url)
    }
}
