use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned {status} for {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },
}
