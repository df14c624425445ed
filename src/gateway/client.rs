//! HTTP client for remote store requests.
//!
//! This module provides a low-level HTTP client wrapper over the store's REST
//! and auth endpoints, handling authentication headers, query building, and
//! response parsing.

use super::error::GatewayError;
use super::models::{AuthSession, AuthUser};
use serde::de::DeserializeOwned;
use serde_json::json;

/// A read query against one table: column projection (including embedded
/// joins), equality filters, ordering, and a row limit.
///
#[derive(Clone, Debug, Default)]
pub struct Query {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Query::default()
    }

    /// Set the column projection. Embedded joins use the
    /// `alias:table!inner(columns)` form.
    ///
    pub fn select(mut self, projection: &str) -> Self {
        self.select = Some(projection.to_owned());
        self
    }

    /// Keep only rows where `column` equals `value`.
    ///
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters
            .push((column.to_owned(), format!("eq.{}", value)));
        self
    }

    /// Order rows by `column`, ascending or descending.
    ///
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order = Some(format!("{}.{}", column, direction));
        self
    }

    /// Cap the number of rows returned.
    ///
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Render the query as URL parameters.
    ///
    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(ref select) = self.select {
            params.push(("select".to_owned(), select.clone()));
        }
        for (column, condition) in &self.filters {
            params.push((column.clone(), condition.clone()));
        }
        if let Some(ref order) = self.order {
            params.push(("order".to_owned(), order.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_owned(), limit.to_string()));
        }
        params
    }
}

/// Makes requests to the remote store and tries to conform response data to
/// the given row type. Requests carry the project key plus a bearer token:
/// the user's access token when signed in, the project key otherwise.
///
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) anon_key: String,
    pub(crate) access_token: Option<String>,
    pub(crate) http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and project key.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created. This should never happen
    /// in practice as reqwest::Client::builder().build() only fails on
    /// invalid configuration, which we don't use.
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            anon_key: anon_key.to_owned(),
            access_token: None,
            http_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create HTTP client - this should never happen"),
        }
    }

    /// Install or clear the signed-in user's access token.
    ///
    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Return all rows matching the query, decoded as `T`.
    ///
    pub async fn rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, GatewayError> {
        let response = self
            .http_client
            .get(self.table_url(table))
            .query(&query.to_params())
            .header("apikey", &self.anon_key)
            .header("Authorization", self.bearer())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.api_error(status.as_u16(), response).await);
        }

        let bytes = response.bytes().await?;
        match serde_json::from_slice::<Vec<T>>(&bytes) {
            Ok(rows) => Ok(rows),
            Err(e) => {
                log::error!(
                    "Failed to deserialize rows from {}: {}. Response body: {}",
                    table,
                    e,
                    String::from_utf8_lossy(&bytes)
                );
                Err(GatewayError::Deserialization(e))
            }
        }
    }

    /// Return the exact number of rows matching the query without fetching
    /// them. Uses a HEAD request with `Prefer: count=exact` and parses the
    /// total out of the Content-Range header (`items 0-24/57` or `*/57`).
    ///
    pub async fn count(&self, table: &str, query: &Query) -> Result<u64, GatewayError> {
        let response = self
            .http_client
            .head(self.table_url(table))
            .query(&query.to_params())
            .header("apikey", &self.anon_key)
            .header("Authorization", self.bearer())
            .header("Prefer", "count=exact")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.api_error(status.as_u16(), response).await);
        }

        response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .and_then(|range| range.rsplit('/').next())
            .and_then(|total| total.parse::<u64>().ok())
            .ok_or(GatewayError::MissingCount)
    }

    /// Insert one row. The store is asked for a minimal response; callers get
    /// no row back.
    ///
    pub async fn insert(&self, table: &str, body: serde_json::Value) -> Result<(), GatewayError> {
        let response = self
            .http_client
            .post(self.table_url(table))
            .header("apikey", &self.anon_key)
            .header("Authorization", self.bearer())
            .header("Prefer", "return=minimal")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.api_error(status.as_u16(), response).await);
        }
        Ok(())
    }

    /// Exchange email and password for an access token.
    ///
    pub async fn auth_sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, GatewayError> {
        let response = self
            .http_client
            .post(format!("{}/auth/v1/token", self.base_url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.api_error(status.as_u16(), response).await);
        }
        Ok(response.json().await?)
    }

    /// Return the identity behind the current access token.
    ///
    pub async fn auth_user(&self) -> Result<AuthUser, GatewayError> {
        let response = self
            .http_client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .header("Authorization", self.bearer())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.api_error(status.as_u16(), response).await);
        }
        Ok(response.json().await?)
    }

    /// Ask the identity provider to send a password recovery email. Always
    /// succeeds for well-formed addresses, whether or not an account exists.
    ///
    pub async fn auth_recover(&self, email: &str) -> Result<(), GatewayError> {
        let response = self
            .http_client
            .post(format!("{}/auth/v1/recover", self.base_url))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.api_error(status.as_u16(), response).await);
        }
        Ok(())
    }

    /// Revoke the current access token.
    ///
    pub async fn auth_sign_out(&self) -> Result<(), GatewayError> {
        let response = self
            .http_client
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .header("Authorization", self.bearer())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.api_error(status.as_u16(), response).await);
        }
        Ok(())
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn bearer(&self) -> String {
        match &self.access_token {
            Some(token) => format!("Bearer {}", token),
            None => format!("Bearer {}", self.anon_key),
        }
    }

    async fn api_error(&self, status: u16, response: reqwest::Response) -> GatewayError {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("Unable to read response"));
        log::error!("API request failed with status {}: {}", status, message);
        GatewayError::Api { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_render_in_rest_form() {
        let query = Query::new()
            .select("id,full_name")
            .eq("student_id", "abc-123")
            .order("scheduled_date", false)
            .limit(5);

        let params = query.to_params();
        assert_eq!(
            params,
            vec![
                ("select".to_owned(), "id,full_name".to_owned()),
                ("student_id".to_owned(), "eq.abc-123".to_owned()),
                ("order".to_owned(), "scheduled_date.desc".to_owned()),
                ("limit".to_owned(), "5".to_owned()),
            ]
        );
    }

    #[test]
    fn test_empty_query_has_no_params() {
        assert!(Query::new().to_params().is_empty());
    }

    #[test]
    fn test_bearer_prefers_access_token() {
        let mut client = Client::new("http://localhost", "anon");
        assert_eq!(client.bearer(), "Bearer anon");
        client.set_access_token(Some("user-token".to_owned()));
        assert_eq!(client.bearer(), "Bearer user-token");
        client.set_access_token(None);
        assert_eq!(client.bearer(), "Bearer anon");
    }
}
