// fetch/client.rs
use crate::fetch::{FetchError, FetchRequest, JsonFetcher};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

pub const USER_AGENT: &str = concat!("parcel-lookup/", env!("CARGO_PKG_VERSION"));

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Network {
                url: String::new(),
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }
}

impl JsonFetcher for HttpFetcher {
    fn get_json(&self, request: &FetchRequest) -> Result<Value, FetchError> {
        debug!(url = %request.url, params = request.query.len(), "outbound GET");

        let mut builder = self
            .client
            .get(&request.url)
            .query(&request.query)
            .timeout(request.timeout);

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().map_err(|e| classify(&request.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().map_err(|e| FetchError::Json {
            url: request.url.clone(),
            message: e.to_string(),
        })
    }
}

fn classify(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
