use reqwest::{
    header::{HeaderMap, CONTENT_TYPE},
    Client, Error as RequestError,
};
use tracing::{instrument, Level};
use url::Url;

use crate::{
    cache::PageCache,
    config::{InspectionQuery, DEFAULT_HTTP_ENCODING},
    parse::RawPage,
};

pub fn make_client() -> Result<Client, RequestError> {
    Client::builder().gzip(true).build()
}

/// Gets the results page, either from the inspection site or from the last saved snapshot.
#[derive(Debug, Clone)]
pub struct Loader {
    client: Client,
    endpoint: Url,
    defaults: InspectionQuery,
    cache: PageCache,
}

impl Loader {
    pub const fn new(
        client: Client,
        endpoint: Url,
        defaults: InspectionQuery,
        cache: PageCache,
    ) -> Self {
        Self {
            client,
            endpoint,
            defaults,
            cache,
        }
    }

    /// The url a fetch with these overrides would request.
    pub fn query_url<K, V>(&self, overrides: impl IntoIterator<Item = (K, V)>) -> Url
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let query = self.defaults.clone().with_overrides(overrides);
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(query.pairs());
        url
    }

    /// Fetches a fresh page and replaces the snapshot with it. Non-2xx responses are errors.
    #[instrument(skip(self, overrides), fields(endpoint = %self.endpoint), level = Level::DEBUG)]
    pub async fn fetch<K, V>(
        &self,
        overrides: impl IntoIterator<Item = (K, V)>,
    ) -> crate::Result<RawPage>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let url = self.query_url(overrides);
        log::info!("querying inspections: {url}");
        let start = std::time::Instant::now();
        let response = self.client.get(url).send().await?.error_for_status()?;
        let encoding = charset(response.headers())
            .unwrap_or(DEFAULT_HTTP_ENCODING)
            .to_owned();
        let bytes = response.bytes().await?;
        log::debug!(
            "got {} bytes ({encoding}) in {:?}",
            bytes.len(),
            start.elapsed()
        );
        let page = RawPage::new(bytes.to_vec(), encoding);
        self.cache.save(&page).await?;
        Ok(page)
    }

    pub async fn load_cached(&self) -> crate::Result<RawPage> {
        self.cache.load().await
    }
}

/// The `charset` parameter of the response's content type, if it names one.
fn charset(headers: &HeaderMap) -> Option<&str> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
            .filter(|value| !value.is_empty())
    })
}
