//! Useful metrics that the wallet tracks.

use ethers::types::U256;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry};
use std::sync::Arc;
use tokio::task::JoinHandle;

const NAMESPACE: &str = "portage";

fn u16_from_env(s: impl AsRef<str>) -> Option<u16> {
    std::env::var(s.as_ref()).ok().and_then(|i| i.parse().ok())
}

#[derive(Debug)]
/// Metrics for a particular wallet deployment
pub struct WalletMetrics {
    wallet_name: String,
    balances: Box<IntGaugeVec>,
    transfers: Box<IntCounterVec>,
    span_durations: Box<HistogramVec>,
    listen_port: Option<u16>,
    /// Metrics registry for adding new metrics and gathering reports
    registry: Arc<Registry>,
}

impl WalletMetrics {
    /// Track metrics for a particular wallet name.
    pub fn new<S: Into<String>>(
        for_wallet: S,
        listen_port: Option<u16>,
        registry: Arc<Registry>,
    ) -> prometheus::Result<WalletMetrics> {
        let metrics = WalletMetrics {
            wallet_name: for_wallet.into(),
            balances: Box::new(IntGaugeVec::new(
                Opts::new(
                    "asset_balance_total",
                    "Last observed balance of an asset held by this wallet, in chain minor units",
                )
                .namespace(NAMESPACE)
                .const_label("VERSION", env!("CARGO_PKG_VERSION")),
                &["chain", "asset", "wallet"],
            )?),
            transfers: Box::new(IntCounterVec::new(
                Opts::new(
                    "transfers_assembled_total",
                    "Number of transfer calls assembled by this wallet since boot",
                )
                .namespace(NAMESPACE)
                .const_label("VERSION", env!("CARGO_PKG_VERSION")),
                &["source", "destination", "mechanism"],
            )?),
            span_durations: Box::new(HistogramVec::new(
                HistogramOpts::new(
                    "span_duration_sec",
                    "Duration from span creation to span destruction",
                )
                .namespace(NAMESPACE)
                .const_label("VERSION", env!("CARGO_PKG_VERSION")),
                &["span_name", "target"],
            )?),
            registry,
            listen_port,
        };

        metrics.registry.register(metrics.balances.clone())?;
        metrics.registry.register(metrics.transfers.clone())?;
        metrics.registry.register(metrics.span_durations.clone())?;

        Ok(metrics)
    }

    /// Call with the new balance when a balance read completes.
    pub fn balance_observed(&self, chain: &str, asset: &str, balance: U256) {
        self.balances
            .with_label_values(&[chain, asset, &self.wallet_name])
            .set(balance.low_u64() as i64) // XXX: truncated data
    }

    /// Call when a transfer call is assembled.
    pub fn transfer_assembled(&self, source: &str, destination: &str, mechanism: &str) {
        self.transfers
            .with_label_values(&[source, destination, mechanism])
            .inc()
    }

    /// Histogram for measuring span durations.
    ///
    /// Labels needed: `span_name`, `target`.
    pub fn span_duration(&self) -> HistogramVec {
        *self.span_durations.clone()
    }

    /// Gather available metrics into an encoded (plaintext, OpenMetrics format) report.
    pub fn gather(&self) -> prometheus::Result<Vec<u8>> {
        let collected_metrics = self.registry.gather();
        let mut out_buf = Vec::with_capacity(1024 * 64);
        let encoder = prometheus::TextEncoder::new();
        encoder.encode(&collected_metrics, &mut out_buf)?;
        Ok(out_buf)
    }

    /// Run an HTTP server serving OpenMetrics format reports on `/metrics`
    ///
    /// This is compatible with Prometheus, which ought to be configured to scrape me!
    pub fn run_http_server(self: Arc<WalletMetrics>) -> JoinHandle<()> {
        use warp::Filter;

        // Default to port 9090
        let port = u16_from_env("METRICS_PORT")
            .or(self.listen_port)
            .unwrap_or(9090);
        tracing::info!(
            port,
            "starting prometheus server on 0.0.0.0:{port}",
            port = port
        );

        tokio::spawn(async move {
            warp::serve(
                warp::path!("metrics")
                    .map(move || {
                        warp::reply::with_header(
                            self.gather().expect("failed to encode metrics"),
                            "Content-Type",
                            // OpenMetrics specs demands "application/openmetrics-text; version=1.0.0; charset=utf-8"
                            // but the prometheus scraper itself doesn't seem to care?
                            // try text/plain to make web browsers happy.
                            "text/plain; charset=utf-8",
                        )
                    })
                    .or(warp::any().map(|| {
                        warp::http::Response::builder()
                            .header("Location", "/metrics")
                            .status(301)
                            .body("".to_string())
                    })),
            )
            .run(([0, 0, 0, 0], port))
            .await;
        })
    }
}
