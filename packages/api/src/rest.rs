//! # REST client for the hosted tables
//!
//! [`RestClient`] implements [`Backend`] against a PostgREST-style endpoint (the
//! Supabase REST API). Every request carries the project key twice, as
//! `Authorization: Bearer <key>` and as the `apikey` header.
//!
//! | Call | Request | Success |
//! |------|---------|---------|
//! | `fetch_user_by_email` | `GET /Users?email=eq.<email>&select=*` | any 2xx, JSON array |
//! | `fetch_tasks` | `GET /Tasks?id_user=eq.<id>&select=*` | any 2xx, JSON array |
//! | `create_user` | `POST /Users` `{email, password_hash}` | `201 Created` only |
//! | `create_task` | `POST /Tasks` `{description, priority, id_user}` | `201 Created` only |
//!
//! Any other status becomes [`Error::Rejected`], carrying the `message` field of the
//! JSON error body when the body has one.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use store::{NewTask, NewUser, Task, User};

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::settings::Settings;

/// Error body returned by the backend on a failed request.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP implementation of [`Backend`].
#[derive(Clone, Debug)]
pub struct RestClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl RestClient {
    /// Client with reqwest defaults (no timeout).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Build a client from loaded [`Settings`], applying the configured timeout.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let http = Client::builder().timeout(settings.http.timeout()).build()?;
        Ok(Self::with_client(
            http,
            settings.supabase.url.clone(),
            settings.supabase.key.clone(),
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.base_url, table))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
    }

    async fn select<T>(&self, table: &str, column: &str, value: &str) -> Result<Vec<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        tracing::debug!(table, column, "GET");
        let response = self
            .request(Method::GET, table)
            .query(&[(column, format!("eq.{value}").as_str()), ("select", "*")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn insert<B: serde::Serialize>(&self, table: &str, body: &B) -> Result<()> {
        tracing::debug!(table, "POST");
        let response = self.request(Method::POST, table).json(body).send().await?;

        if response.status() != StatusCode::CREATED {
            return Err(rejection(response).await);
        }
        Ok(())
    }
}

/// Turn a non-accepted response into [`Error::Rejected`].
async fn rejection(response: Response) -> Error {
    let status = response.status().as_u16();
    let body: ErrorBody = match response.bytes().await {
        Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
        Err(_) => ErrorBody::default(),
    };
    tracing::warn!(status, message = ?body.message, "backend rejected request");
    Error::Rejected {
        status,
        message: body.message,
    }
}

impl Backend for RestClient {
    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users: Vec<User> = self.select("Users", "email", email).await?;
        Ok(users.into_iter().next())
    }

    async fn fetch_tasks(&self, user_id: i64) -> Result<Vec<Task>> {
        self.select("Tasks", "id_user", &user_id.to_string()).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<()> {
        self.insert("Users", user).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<()> {
        self.insert("Tasks", task).await
    }
}
