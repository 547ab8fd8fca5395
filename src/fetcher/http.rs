use crate::fetcher::retry::{RetryPolicy, HTTP_OK};
use crate::fetcher::traits::Fetcher;
use crate::model::ScraperError;

use reqwest::blocking::Client;
use tracing::debug;

pub struct HttpFetcher {
    client: Client,
    retry: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, retry: RetryPolicy) -> Result<Self, ScraperError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, retry })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        self.retry.run(url, || {
            debug!("GET {}", url);
            let response = self.client.get(url).send()?;
            let status = response.status().as_u16();
            if status != HTTP_OK {
                return Ok((status, String::new()));
            }
            Ok((status, response.text()?))
        })
    }
}
