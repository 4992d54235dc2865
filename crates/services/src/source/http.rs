use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::QuestionSource;
use crate::error::FetchError;

/// Reads questions with an HTTP GET against a published CSV export.
#[derive(Clone, Debug)]
pub struct HttpQuestionSource {
    client: Client,
    url: Url,
}

impl HttpQuestionSource {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self::with_client(Client::new(), url)
    }

    #[must_use]
    pub fn with_client(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch_text(&self) -> Result<String, FetchError> {
        debug!(url = %self.url, "fetching question sheet");
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, %status, "question sheet request failed");
            return Err(FetchError::HttpStatus(status));
        }

        Ok(response.text().await?)
    }
}
