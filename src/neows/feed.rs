use bytes::Bytes;
use reqwest::Url;
use tracing::info;

use crate::error::Result;
use crate::fetch::auth::UrlParam;
use crate::fetch::{HttpClient, endpoint_url, fetch_bytes};
use crate::neows::request::DateRange;

pub const FEED_PATH: &str = "/neo/rest/v1/feed";

/// Fetches the raw NeoWs feed body for `range`.
///
/// Exactly one upstream request is made; there is no retry.
pub async fn fetch_feed<C: HttpClient + ?Sized>(
    client: &C,
    base_url: &Url,
    range: &DateRange,
    api_key: &str,
) -> Result<Bytes> {
    let start_date = DateRange::format(range.start());
    let end_date = DateRange::format(range.end());

    let mut url = endpoint_url(base_url, FEED_PATH);
    url.query_pairs_mut()
        .append_pair("start_date", &start_date)
        .append_pair("end_date", &end_date);

    info!(%start_date, %end_date, "Fetching NeoWs feed");

    let authed = UrlParam::api_key(client, api_key);
    let body = fetch_bytes(&authed, url).await?;
    Ok(body.bytes)
}
