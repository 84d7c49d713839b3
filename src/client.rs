//! This module provides a client to connect to a task-board server

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use url::Url;

use crate::config;
use crate::day::DayRange;
use crate::error::Error;
use crate::task::{Task, TaskDraft, TaskId, TaskUpdate};
use crate::traits::TaskSource;

/// A task source that fetches its data from a REST server.
///
/// The client is authenticated when it holds a bearer credential; without one it can
/// only read the public endpoints, and the board it backs runs in demo mode.
pub struct Client {
    base_url: Url,
    bearer_token: Option<String>,
    http: reqwest::Client,
}

impl Client {
    /// Create an unauthenticated client. This does not start a connection
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self, Error> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            base_url,
            bearer_token: None,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client that authenticates with the given bearer credential
    pub fn new_with_token<S: AsRef<str>, T: ToString>(base_url: S, token: T) -> Result<Self, Error> {
        let mut client = Self::new(base_url)?;
        client.bearer_token = Some(token.to_string());
        Ok(client)
    }

    /// Install (or clear) the bearer credential, e.g. after a login or logout.
    /// Refresh the provider afterwards, so the board matches the new session.
    pub fn set_token(&mut self, token: Option<String>) {
        self.bearer_token = token;
    }

    fn endpoint(&self, tail: &str) -> Url {
        let mut url = self.base_url.clone();
        let base = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}/{}", base, tail));
        url
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url)
            .header(USER_AGENT, config::USER_AGENT.lock().unwrap().clone())
            .header(CONTENT_TYPE, "application/json");
        match &self.bearer_token {
            None => builder,
            Some(token) => builder.bearer_auth(token),
        }
    }

    /// Map non-2xx replies onto the error taxonomy
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        match status {
            StatusCode::UNAUTHORIZED => Err(Error::AuthRequired),
            StatusCode::NOT_FOUND => Err(Error::NotFound),
            _ => {
                let message = response.text().await.unwrap_or_default();
                Err(Error::Server { status: status.as_u16(), message })
            },
        }
    }
}

#[async_trait]
impl TaskSource for Client {
    fn is_authenticated(&self) -> bool {
        self.bearer_token.is_some()
    }

    async fn owned_tasks(&self) -> Result<Vec<Task>, Error> {
        let url = self.endpoint("tasks");
        log::debug!("GET {}", url);
        let response = self.request(Method::GET, url).send().await?;
        let tasks = Self::check(response).await?.json().await?;
        Ok(tasks)
    }

    async fn public_tasks(&self, range: &DayRange) -> Result<Vec<Task>, Error> {
        let url = self.endpoint(&format!("tasks/public/date/{}/{}", range.start(), range.end()));
        log::debug!("GET {}", url);
        let response = self.request(Method::GET, url).send().await?;
        let tasks = Self::check(response).await?.json().await?;
        Ok(tasks)
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, Error> {
        let url = self.endpoint("tasks");
        log::debug!("POST {}", url);
        let response = self.request(Method::POST, url).json(draft).send().await?;
        let task = Self::check(response).await?.json().await?;
        Ok(task)
    }

    async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> Result<Task, Error> {
        let url = self.endpoint(&format!("tasks/{}", id));
        log::debug!("PUT {}", url);
        let response = self.request(Method::PUT, url).json(update).send().await?;
        let task = Self::check(response).await?.json().await?;
        Ok(task)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), Error> {
        let url = self.endpoint(&format!("tasks/{}", id));
        log::debug!("DELETE {}", url);
        let response = self.request(Method::DELETE, url).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_built_from_the_base_url() {
        let client = Client::new("https://tasks.example.com/api").unwrap();
        assert_eq!(client.endpoint("tasks").as_str(), "https://tasks.example.com/api/tasks");

        // a trailing slash on the base makes no difference
        let client = Client::new("https://tasks.example.com/api/").unwrap();
        assert_eq!(
            client.endpoint("tasks/public/date/2024-06-01/2024-06-30").as_str(),
            "https://tasks.example.com/api/tasks/public/date/2024-06-01/2024-06-30"
        );
    }

    #[test]
    fn a_token_authenticates_the_client() {
        let mut client = Client::new("https://tasks.example.com/api").unwrap();
        assert!(client.is_authenticated() == false);

        client.set_token(Some(String::from("jwt")));
        assert!(client.is_authenticated());

        client.set_token(None);
        assert!(client.is_authenticated() == false);
    }
}
