use crate::core::error::PollError;
use crate::core::settings::ApiSettings;
use crate::providers::HomeworkProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;

pub struct PracticumProvider {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumProvider {
    pub fn new(settings: &ApiSettings, token: String) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build Practicum HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            token,
        })
    }
}

#[async_trait]
impl HomeworkProvider for PracticumProvider {
    fn name(&self) -> &'static str {
        "Practicum"
    }

    async fn fetch_statuses(&self, from_date: i64) -> Result<Value, PollError> {
        tracing::debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(PollError::Network)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PollError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(PollError::Network)?;
        serde_json::from_str(&body).map_err(PollError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const STATUSES_PATH: &str = "/api/user_api/homework_statuses/";

    fn provider_for(server: &MockServer) -> PracticumProvider {
        let settings = ApiSettings {
            endpoint: format!("{}{}", server.uri(), STATUSES_PATH),
            request_timeout_secs: Some(5),
        };
        PracticumProvider::new(&settings, "y0_test".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_sends_token_and_from_date() {
        let server = MockServer::start().await;
        let body = json!({
            "homeworks": [{"homework_name": "proj1", "status": "reviewing"}],
            "current_date": 1700000600
        });

        Mock::given(method("GET"))
            .and(path(STATUSES_PATH))
            .and(header("Authorization", "OAuth y0_test"))
            .and(query_param("from_date", "1700000000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let answer = provider_for(&server)
            .fetch_statuses(1_700_000_000)
            .await
            .unwrap();
        assert_eq!(answer, body);
    }

    #[tokio::test]
    async fn test_non_ok_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = provider_for(&server).fetch_statuses(0).await.unwrap_err();
        assert!(matches!(err, PollError::UnexpectedStatus(503)));
        assert_eq!(err.to_string(), "Код запроса не равен 200. Код запроса 503");
    }

    #[tokio::test]
    async fn test_other_success_codes_are_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = provider_for(&server).fetch_statuses(0).await.unwrap_err();
        assert!(matches!(err, PollError::UnexpectedStatus(204)));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = provider_for(&server).fetch_statuses(0).await.unwrap_err();
        assert!(matches!(err, PollError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let settings = ApiSettings {
            endpoint: "http://127.0.0.1:1/".to_string(),
            request_timeout_secs: Some(5),
        };
        let provider = PracticumProvider::new(&settings, "y0_test".to_string()).unwrap();

        let err = provider.fetch_statuses(0).await.unwrap_err();
        assert!(matches!(err, PollError::Network(_)));
    }
}
