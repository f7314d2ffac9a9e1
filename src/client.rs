//! Fetch orchestrator: three concurrent reads against the bot backend.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::Client;
use url::Url;

use crate::config::Config;
use crate::logging::{log, obj, v_num, Domain, Level};
use crate::telemetry::{LatestBatch, ProfitCurve, StatsSummary};

pub const LIMIT_MIN: u32 = 1;
pub const LIMIT_MAX: u32 = 300;
pub const LIMIT_DEFAULT: u32 = 20;

/// Parse the user-supplied record limit. Values above the cap clamp down;
/// missing, non-numeric, or below-minimum input falls back to the default.
pub fn clamp_limit(raw: Option<&str>) -> u32 {
    let s = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s,
        None => return LIMIT_DEFAULT,
    };
    match s.parse::<i128>() {
        Ok(v) if v > LIMIT_MAX as i128 => LIMIT_MAX,
        Ok(v) if v >= LIMIT_MIN as i128 => v as u32,
        Ok(_) => LIMIT_DEFAULT,
        // A digit run too long even for i128 is still just a huge number.
        Err(_) if s.chars().all(|c| c.is_ascii_digit()) => LIMIT_MAX,
        Err(_) => LIMIT_DEFAULT,
    }
}

/// One refresh worth of telemetry, all three payloads or nothing.
#[derive(Debug, Clone)]
pub struct Telemetry {
    pub curve: ProfitCurve,
    pub latest: LatestBatch,
    pub stats: StatsSummary,
}

pub struct TelemetryClient {
    client: Client,
    base: Url,
}

impl TelemetryClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .build()?;
        let base = Url::parse(&cfg.backend_base)
            .with_context(|| format!("invalid backend base url: {}", cfg.backend_base))?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("cannot build url for {}", path))
    }

    pub async fn fetch_profit_curve(&self) -> Result<ProfitCurve> {
        let url = self.endpoint("/profit_curve")?;
        let curve = self
            .client
            .get(url)
            .send()
            .await
            .context("requesting /profit_curve")?
            .json()
            .await
            .context("decoding /profit_curve")?;
        Ok(curve)
    }

    pub async fn fetch_latest(&self, limit: u32) -> Result<LatestBatch> {
        let mut url = self.endpoint("/latest")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        let latest = self
            .client
            .get(url)
            .send()
            .await
            .context("requesting /latest")?
            .json()
            .await
            .context("decoding /latest")?;
        Ok(latest)
    }

    pub async fn fetch_stats(&self) -> Result<StatsSummary> {
        let url = self.endpoint("/stats")?;
        let stats = self
            .client
            .get(url)
            .send()
            .await
            .context("requesting /stats")?
            .json()
            .await
            .context("decoding /stats")?;
        Ok(stats)
    }

    /// Concurrent fan-out over all three endpoints. Any failure discards the
    /// whole refresh; there is no retry and no partial result.
    pub async fn fetch_all(&self, limit: u32) -> Result<Telemetry> {
        let started = Instant::now();
        let (curve, latest, stats) = tokio::try_join!(
            self.fetch_profit_curve(),
            self.fetch_latest(limit),
            self.fetch_stats(),
        )?;
        log(
            Level::Debug,
            Domain::Fetch,
            "refresh",
            obj(&[
                ("limit", v_num(limit as f64)),
                ("points", v_num(curve.data.len() as f64)),
                ("records", v_num(latest.response.len() as f64)),
                ("elapsed_ms", v_num(started.elapsed().as_secs_f64() * 1000.0)),
            ]),
        );
        Ok(Telemetry {
            curve,
            latest,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_clamps_above_cap() {
        assert_eq!(clamp_limit(Some("500")), 300);
        assert_eq!(clamp_limit(Some("300")), 300);
    }

    #[test]
    fn test_limit_oversized_numbers_clamp_not_default() {
        assert_eq!(clamp_limit(Some("999999999999999999999")), 300);
        let forty_nines = "9".repeat(40);
        assert_eq!(clamp_limit(Some(&forty_nines)), 300);
        // Oversized negatives are invalid input, not a huge count.
        assert_eq!(clamp_limit(Some("-999999999999999999999999999999999999999999")), 20);
    }

    #[test]
    fn test_limit_accepts_valid_range() {
        assert_eq!(clamp_limit(Some("1")), 1);
        assert_eq!(clamp_limit(Some("42")), 42);
    }

    #[test]
    fn test_limit_invalid_falls_back_to_default() {
        assert_eq!(clamp_limit(Some("0")), 20);
        assert_eq!(clamp_limit(Some("-3")), 20);
        assert_eq!(clamp_limit(Some("abc")), 20);
        assert_eq!(clamp_limit(Some("")), 20);
        assert_eq!(clamp_limit(None), 20);
    }

    #[test]
    fn test_endpoint_urls() {
        let cfg = Config {
            backend_base: "http://127.0.0.1:9000".to_string(),
            listen_addr: "0.0.0.0:8080".to_string(),
            http_timeout_secs: 10,
        };
        let client = TelemetryClient::new(&cfg).unwrap();
        assert_eq!(
            client.endpoint("/profit_curve").unwrap().as_str(),
            "http://127.0.0.1:9000/profit_curve"
        );
        let mut url = client.endpoint("/latest").unwrap();
        url.query_pairs_mut().append_pair("limit", "20");
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/latest?limit=20");
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let cfg = Config {
            backend_base: "not a url".to_string(),
            listen_addr: "0.0.0.0:8080".to_string(),
            http_timeout_secs: 10,
        };
        assert!(TelemetryClient::new(&cfg).is_err());
    }
}
