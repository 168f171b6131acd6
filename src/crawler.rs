use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::extract;

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const ACCEPT_LANG: &str = "te,en;q=0.8,*;q=0.5";
const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("could not read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Rate limiting and server errors are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// What a followed page contributed. A failed page is skipped, never fatal.
#[derive(Debug)]
pub enum PageOutcome {
    Fetched { url: String, paragraphs: Vec<String> },
    Skipped { url: String, reason: String },
}

impl PageOutcome {
    pub fn into_paragraphs(self) -> Vec<String> {
        match self {
            PageOutcome::Fetched { paragraphs, .. } => paragraphs,
            PageOutcome::Skipped { .. } => Vec::new(),
        }
    }
}

pub struct CrawlOptions {
    pub follow: bool,
    pub limit: usize,
    pub concurrency: usize,
    pub timeout: Duration,
}

pub struct CrawlResult {
    pub paragraphs: Vec<String>,
    pub followed: usize,
    pub skipped: usize,
}

pub fn build_client(timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANG));
    let client = Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// GET a page as text. Never decides whether the failure is fatal.
pub async fn fetch(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await.map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }
    response.text().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })
}

async fn fetch_with_retry(client: &Client, url: &str) -> Result<String, FetchError> {
    let mut attempt = 0;
    loop {
        match fetch(client, url).await {
            Err(e) if e.is_retryable() && attempt < MAX_RETRIES => {
                let backoff = Duration::from_millis(BASE_BACKOFF_MS * 2u64.pow(attempt));
                warn!(
                    "{} (attempt {}/{}), backing off {:.1}s",
                    e,
                    attempt + 1,
                    MAX_RETRIES,
                    backoff.as_secs_f64()
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

/// Seed page first, then (optionally) same-domain links. Paragraphs come back
/// in seed-then-link order whatever order the fetches finish in.
pub async fn crawl(seed: &str, opts: &CrawlOptions) -> Result<CrawlResult> {
    let seed_url = Url::parse(seed).with_context(|| format!("invalid seed URL: {}", seed))?;
    let client = build_client(opts.timeout)?;

    info!("Fetching seed: {}", seed_url);
    let seed_html = fetch_with_retry(&client, seed_url.as_str())
        .await
        .context("failed to fetch seed page")?;
    let mut paragraphs = extract::paragraphs(&seed_html);
    info!("Seed page: {} paragraphs", paragraphs.len());

    if !opts.follow {
        return Ok(CrawlResult {
            paragraphs,
            followed: 0,
            skipped: 0,
        });
    }

    let links = extract::same_domain_links(&seed_url, &seed_html, opts.limit);
    info!("Following {} same-domain links", links.len());
    let outcomes = follow_links(client, links, opts.concurrency).await;

    let followed = outcomes.len();
    let mut skipped = 0;
    for outcome in outcomes {
        match &outcome {
            PageOutcome::Fetched { url, paragraphs: found } => {
                debug!("{}: {} paragraphs", url, found.len());
            }
            PageOutcome::Skipped { url, reason } => {
                warn!("Skipped {}: {}", url, reason);
                skipped += 1;
            }
        }
        paragraphs.extend(outcome.into_paragraphs());
    }

    Ok(CrawlResult {
        paragraphs,
        followed,
        skipped,
    })
}

/// Fetch links concurrently; the returned outcomes follow the order of `links`.
async fn follow_links(client: Client, links: Vec<String>, concurrency: usize) -> Vec<PageOutcome> {
    let total = links.len();
    if total == 0 {
        return Vec::new();
    }

    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let pb = progress_bar(total);

    let (tx, mut rx) = tokio::sync::mpsc::channel::<(usize, PageOutcome)>(concurrency.max(1) * 2);

    for (idx, url) in links.iter().cloned().enumerate() {
        let client = client.clone();
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();

        tokio::spawn(async move {
            let outcome = match sem.acquire().await {
                Ok(_permit) => {
                    info!("({}/{}) Following: {}", idx + 1, total, url);
                    follow_one(&client, url).await
                }
                Err(e) => PageOutcome::Skipped {
                    url,
                    reason: e.to_string(),
                },
            };
            let _ = tx.send((idx, outcome)).await;
        });
    }

    // rx closes once every task has sent and dropped its sender
    drop(tx);

    let mut slots: Vec<Option<PageOutcome>> = (0..total).map(|_| None).collect();
    while let Some((idx, outcome)) = rx.recv().await {
        slots[idx] = Some(outcome);
        pb.inc(1);
    }
    pb.finish_and_clear();

    fill_missing(slots, links)
}

/// A task that died before sending (panic, runtime shutdown) still counts as a
/// skipped page.
fn fill_missing(slots: Vec<Option<PageOutcome>>, links: Vec<String>) -> Vec<PageOutcome> {
    slots
        .into_iter()
        .zip(links)
        .map(|(slot, url)| {
            slot.unwrap_or_else(|| PageOutcome::Skipped {
                url,
                reason: "fetch task ended without a result".to_string(),
            })
        })
        .collect()
}

async fn follow_one(client: &Client, url: String) -> PageOutcome {
    match fetch_with_retry(client, &url).await {
        Ok(html) => PageOutcome::Fetched {
            paragraphs: extract::paragraphs(&html),
            url,
        },
        Err(e) => PageOutcome::Skipped {
            url,
            reason: e.to_string(),
        },
    }
}

fn progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
        .map(|s| s.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}
