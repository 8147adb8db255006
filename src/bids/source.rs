use reqwest::{Method, Request, StatusCode, Url};

use super::bid::Bid;
use super::sender::HttpSender;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("error on create request: {0}")]
    RequestConstruction(#[from] url::ParseError),
    #[error("error on send request: {0:#}")]
    Transport(#[source] anyhow::Error),
    #[error("wrong status: {0}")]
    UnexpectedStatus(StatusCode),
    #[error("error on decode json: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Asks one source for its bids. A single request, no retries.
pub async fn fetch_bids<S>(sender: &S, source: &str) -> Result<Vec<Bid>, FetchError>
where
    S: HttpSender + ?Sized,
{
    let url = Url::parse(source)?;
    let reply = sender
        .send(Request::new(Method::GET, url))
        .await
        .map_err(FetchError::Transport)?;
    if reply.status != StatusCode::OK {
        return Err(FetchError::UnexpectedStatus(reply.status));
    }
    let bids: Option<Vec<Bid>> = serde_json::from_slice(&reply.body)?;
    Ok(bids.unwrap_or_default())
}
