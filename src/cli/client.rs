use anyhow::{anyhow, Context};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

/// Thin HTTP client for the gateway's JSON endpoints.
pub struct AdminClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl AdminClient {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let parsed = url::Url::parse(base_url).with_context(|| format!("invalid gateway URL '{}'", base_url))?;

        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()?,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> anyhow::Result<Value> {
        let request = self.http.get(self.url(path)).query(query);
        self.send(request).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> anyhow::Result<Value> {
        let request = self.http.post(self.url(path)).json(body);
        self.send(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, mut request: RequestBuilder) -> anyhow::Result<Value> {
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.context("request to gateway failed")?;
        let status = response.status();
        let body: Value = response.json().await.context("gateway returned a non-JSON body")?;

        if status.is_success() {
            return Ok(body);
        }

        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        Err(anyhow!("{} ({})", message, status))
    }
}
