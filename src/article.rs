/*!
 * Article retrieval for the link-vocab flow.
 *
 * Articles are fetched through a reader endpoint that strips markup and
 * returns plain text. A failed fetch maps to a single error; partial
 * content is never used.
 */

use log::{debug, info};
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::errors::FetchError;
use crate::keywords::{Keyword, KeywordOptions, extract_keywords};

/// Reader endpoint that converts an article URL into plain text
const READER_ENDPOINT: &str = "https://r.jina.ai/";

/// How many keywords the vocab flow extracts from an article
pub const VOCAB_KEYWORD_MAX: usize = 60;

/// Minimum token length for vocab keywords
pub const VOCAB_KEYWORD_MIN_LEN: usize = 3;

/// Normalize user input into an absolute URL, defaulting to https
pub fn normalize_article_url(raw: &str) -> Result<String, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidUrl("empty URL".to_string()));
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    Url::parse(&with_scheme).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    Ok(with_scheme)
}

/// Fetcher for article text
pub struct ArticleFetcher {
    /// HTTP client for reader requests
    client: Client,
}

impl ArticleFetcher {
    /// Create a fetcher with the given request timeout
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fetch the plain text of an article.
    ///
    /// Non-2xx responses and transport failures map to a `FetchError`;
    /// whatever body a failed response carried is discarded.
    pub async fn fetch_article_text(&self, raw_url: &str) -> Result<String, FetchError> {
        let target = normalize_article_url(raw_url)?;
        let reader_url = format!("{}{}", READER_ENDPOINT, target);

        debug!("Fetching article via reader: {}", reader_url);

        let response = self
            .client
            .get(&reader_url)
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        info!("Fetched article: {} chars", text.len());
        Ok(text)
    }

    /// Fetch an article and extract its vocabulary keywords
    pub async fn fetch_vocabulary(
        &self,
        raw_url: &str,
        lang: &str,
    ) -> Result<(String, Vec<Keyword>), FetchError> {
        let article = self.fetch_article_text(raw_url).await?;
        let keywords = article_keywords(&article, lang);
        Ok((article, keywords))
    }
}

impl Default for ArticleFetcher {
    fn default() -> Self {
        Self::new(60)
    }
}

/// Extract keywords from article text with the vocab flow's defaults
pub fn article_keywords(article: &str, lang: &str) -> Vec<Keyword> {
    extract_keywords(
        article,
        &KeywordOptions {
            lang: Some(lang.to_string()),
            min_len: VOCAB_KEYWORD_MIN_LEN,
            max: VOCAB_KEYWORD_MAX,
        },
    )
}
