use anyhow::bail;
use log::{debug, info};
use scraper::Html;
use url::Url;

pub const DEFAULT_LIST_URL: &str = "https://www.xcontest.org/world/en/flights/daily-score-pg/";

const USER_AGENT: &str = concat!("wefly-track-loader/", env!("CARGO_PKG_VERSION"));

pub struct TrackSourceClient {
    client: reqwest::Client,
    list_url: Url,
}

impl TrackSourceClient {
    pub fn new(list_url: Url) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connection_verbose(true)
            .build()?;
        Ok(Self { client, list_url })
    }

    pub fn list_url(&self) -> &Url {
        &self.list_url
    }

    pub fn track_list_url(&self, date: &str) -> Url {
        let mut url = self.list_url.clone();
        url.query_pairs_mut().append_pair("filter[date]", date);
        url
    }

    pub async fn fetch_track_list(&self, date: &str) -> anyhow::Result<Html> {
        let url = self.track_list_url(date);
        info!("Fetching track list from {url}");
        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            bail!("Request to {url} failed: {}", response.status());
        }
        Ok(Html::parse_document(&response.text().await?))
    }

    pub async fn download_igc(&self, url: &Url) -> anyhow::Result<String> {
        debug!("Downloading tracklog from {url}");
        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            bail!("Request to {url} failed: {}", response.status());
        }
        Ok(response.text().await?)
    }
}
