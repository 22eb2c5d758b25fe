//! Fire a burst of requests and report which ones got rate limited.

use std::time::Duration;

use anyhow::Context;
use reqwest::StatusCode;

use postboard_shared::ErrorResponse;

/// How a single probe request was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Ok,
    Limited,
    Other(StatusCode),
}

impl From<StatusCode> for ProbeOutcome {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::OK => Self::Ok,
            StatusCode::TOO_MANY_REQUESTS => Self::Limited,
            other => Self::Other(other),
        }
    }
}

/// Tally of a probe run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProbeSummary {
    pub ok: u32,
    pub limited: u32,
    pub other: u32,
}

impl ProbeSummary {
    pub fn record(&mut self, outcome: ProbeOutcome) {
        match outcome {
            ProbeOutcome::Ok => self.ok += 1,
            ProbeOutcome::Limited => self.limited += 1,
            ProbeOutcome::Other(_) => self.other += 1,
        }
    }
}

pub async fn probe_rate_limit(
    client: &reqwest::Client,
    url: &str,
    requests: u32,
    delay: Duration,
) -> anyhow::Result<ProbeSummary> {
    let mut summary = ProbeSummary::default();

    for n in 1..=requests {
        let response = client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request {n} to {url} failed"))?;

        let status = response.status();
        let outcome = ProbeOutcome::from(status);
        summary.record(outcome);

        match outcome {
            ProbeOutcome::Ok => println!("Request {n}: Success"),
            ProbeOutcome::Limited => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);
                let message = response
                    .json::<ErrorResponse>()
                    .await
                    .map(|body| body.error)
                    .unwrap_or_else(|_| "rate limited".to_string());
                match retry_after {
                    Some(secs) => {
                        println!("Request {n}: Rate limit exceeded - {message} (retry after {secs}s)")
                    }
                    None => println!("Request {n}: Rate limit exceeded - {message}"),
                }
            }
            ProbeOutcome::Other(status) => println!("Request {n}: Unexpected status {status}"),
        }

        if n < requests && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    tracing::debug!(?summary, "Probe finished");
    Ok(summary)
}
