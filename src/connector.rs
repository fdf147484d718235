use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::{Authenticator, Profile};
use crate::executor::QueryExecutor;
use crate::row::RawRow;

/// Environment variable holding the bearer token for the SQL API.
pub const TOKEN_ENV: &str = "SNOWFLAKE_TOKEN";

const POLL_INTERVAL: Duration = Duration::from_secs(1);
const MAX_POLLS: usize = 300;

/// A Snowflake SQL API v2 client.
///
/// Authenticates with a bearer token read from `SNOWFLAKE_TOKEN` — either an
/// OAuth access token or a programmatic access token, per the profile's
/// `authenticator` setting. Statements are submitted to
/// `POST /api/v2/statements`; asynchronous statements are polled on their
/// handle and multi-partition results are fetched partition by partition.
pub struct SnowflakeClient {
    client: Client,
    base_url: String,
    token: String,
    token_type: &'static str,
    role: String,
    warehouse: String,
    database: Option<String>,
    schema: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatementRequest<'a> {
    statement: &'a str,
    role: &'a str,
    warehouse: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatementResponse {
    #[serde(default)]
    statement_handle: Option<String>,
    #[serde(default)]
    result_set_meta_data: Option<ResultSetMetaData>,
    #[serde(default)]
    data: Option<Vec<RawRow>>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultSetMetaData {
    #[serde(default)]
    partition_info: Vec<PartitionInfo>,
}

/// Only the partition count matters; sizes are opaque to us.
#[derive(Debug, Deserialize)]
struct PartitionInfo {}

impl SnowflakeClient {
    /// Build a client for the profile's account. Fails when `SNOWFLAKE_TOKEN`
    /// is unset; no network traffic happens until the first statement.
    pub fn connect(profile: &Profile) -> Result<Self> {
        let token = std::env::var(TOKEN_ENV).with_context(|| {
            format!("{TOKEN_ENV} must hold an OAuth or programmatic access token")
        })?;
        let token_type = match profile.authenticator {
            Authenticator::Oauth => "OAUTH",
            Authenticator::Pat => "PROGRAMMATIC_ACCESS_TOKEN",
        };
        let client = Client::builder()
            .user_agent(concat!("snowdeps/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("cannot build HTTP client")?;
        Ok(Self {
            client,
            base_url: format!(
                "https://{}.snowflakecomputing.com/api/v2",
                profile.account
            ),
            token,
            token_type,
            role: profile.role.clone(),
            warehouse: profile.warehouse.clone(),
            database: profile.database.clone(),
            schema: profile.schema.clone(),
        })
    }

    /// Attach the bearer token and SQL API headers. Every request goes
    /// through here so the submit, poll, and partition paths cannot drift.
    fn authed(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header("X-Snowflake-Authorization-Token-Type", self.token_type)
            .header("Accept", "application/json")
    }

    fn get(&self, url: &str) -> Result<StatementResponse> {
        let resp = self
            .authed(self.client.get(url))
            .send()
            .context("request to Snowflake SQL API failed")?;
        read_response(resp)
    }

    /// Poll an asynchronous statement until it completes.
    fn wait_for(&self, handle: &str) -> Result<StatementResponse> {
        let url = format!("{}/statements/{}", self.base_url, handle);
        for _ in 0..MAX_POLLS {
            thread::sleep(POLL_INTERVAL);
            let resp = self
                .authed(self.client.get(&url))
                .send()
                .context("request to Snowflake SQL API failed")?;
            if resp.status() == StatusCode::ACCEPTED {
                continue;
            }
            return read_response(resp);
        }
        bail!("statement {handle} did not complete after {MAX_POLLS} polls");
    }

    /// Fetch the remaining partitions of a completed statement and append
    /// their rows, preserving server order.
    fn collect_rows(&self, first: StatementResponse) -> Result<Vec<RawRow>> {
        let handle = first.statement_handle.clone();
        let partitions = first
            .result_set_meta_data
            .as_ref()
            .map(|m| m.partition_info.len())
            .unwrap_or(0);
        let mut rows = first.data.unwrap_or_default();
        for partition in 1..partitions {
            let handle = handle
                .as_deref()
                .context("multi-partition result without a statement handle")?;
            let url = format!(
                "{}/statements/{}?partition={}",
                self.base_url, handle, partition
            );
            let chunk = self.get(&url)?;
            rows.extend(chunk.data.unwrap_or_default());
        }
        Ok(rows)
    }
}

impl QueryExecutor for SnowflakeClient {
    fn execute(&mut self, sql: &str) -> Result<Vec<RawRow>> {
        let request = StatementRequest {
            statement: sql,
            role: &self.role,
            warehouse: &self.warehouse,
            database: self.database.as_deref(),
            schema: self.schema.as_deref(),
        };
        let resp = self
            .authed(self.client.post(format!("{}/statements", self.base_url)))
            .json(&request)
            .send()
            .context("request to Snowflake SQL API failed")?;

        let body = if resp.status() == StatusCode::ACCEPTED {
            let pending: StatementResponse =
                resp.json().context("cannot decode SQL API response")?;
            let handle = pending
                .statement_handle
                .context("asynchronous statement without a handle")?;
            self.wait_for(&handle)?
        } else {
            read_response(resp)?
        };
        self.collect_rows(body)
    }
}

fn read_response(resp: reqwest::blocking::Response) -> Result<StatementResponse> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp
            .json::<StatementResponse>()
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| "no error message".to_owned());
        bail!("Snowflake SQL API returned {status}: {message}");
    }
    resp.json().context("cannot decode SQL API response")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(authenticator: Authenticator) -> Profile {
        Profile {
            account: "acct".into(),
            user: "U".into(),
            role: "R".into(),
            warehouse: "W".into(),
            database: None,
            schema: None,
            authenticator,
        }
    }

    // Env mutation is process-global, so every token-dependent case runs in
    // one test body.
    #[test]
    fn test_connect_and_request_headers() {
        unsafe { std::env::remove_var(TOKEN_ENV) };
        assert!(SnowflakeClient::connect(&profile(Authenticator::Oauth)).is_err());

        unsafe { std::env::set_var(TOKEN_ENV, "tok") };
        let client = SnowflakeClient::connect(&profile(Authenticator::Oauth)).unwrap();
        assert_eq!(client.token_type, "OAUTH");
        assert_eq!(client.base_url, "https://acct.snowflakecomputing.com/api/v2");

        let client = SnowflakeClient::connect(&profile(Authenticator::Pat)).unwrap();
        assert_eq!(client.token_type, "PROGRAMMATIC_ACCESS_TOKEN");

        // Submit, poll, and partition requests all flow through `authed`;
        // a built request must carry the full header set.
        let request = client
            .authed(client.client.get("https://acct.snowflakecomputing.com/api/v2/statements/h"))
            .build()
            .unwrap();
        assert_eq!(request.headers()["Authorization"], "Bearer tok");
        assert_eq!(
            request.headers()["X-Snowflake-Authorization-Token-Type"],
            "PROGRAMMATIC_ACCESS_TOKEN"
        );
        assert_eq!(request.headers()["Accept"], "application/json");

        unsafe { std::env::remove_var(TOKEN_ENV) };
    }
}
