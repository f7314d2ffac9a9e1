//! HTTP surface: one route that fetches telemetry and returns the rendered
//! dashboard. Failures are shown in-page, so the route always answers 200.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::client::{clamp_limit, TelemetryClient};
use crate::config::Config;
use crate::logging::{log, obj, v_str, Domain, Level};
use crate::page::render_page;
use crate::render::{render_error, render_latest, render_profit};

pub struct AppState {
    pub client: TelemetryClient,
}

#[derive(Debug, Deserialize)]
pub struct DashQuery {
    pub limit: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/", get(dashboard)).with_state(state)
}

pub async fn serve(cfg: Config) -> Result<()> {
    let state = Arc::new(AppState {
        client: TelemetryClient::new(&cfg)?,
    });
    log(
        Level::Info,
        Domain::Server,
        "listen",
        obj(&[("addr", v_str(&cfg.listen_addr))]),
    );
    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashQuery>,
) -> Html<String> {
    let limit = clamp_limit(query.limit.as_deref());
    match state.client.fetch_all(limit).await {
        Ok(telemetry) => {
            let profit = render_profit(&telemetry.curve);
            let latest = render_latest(&telemetry.latest, &telemetry.stats);
            Html(render_page(limit, &profit, &latest))
        }
        Err(err) => {
            let text = format!("{:#}", err);
            log(
                Level::Error,
                Domain::Fetch,
                "refresh_failed",
                obj(&[("error", v_str(&text))]),
            );
            let (profit, latest) = render_error(&text);
            Html(render_page(limit, &profit, &latest))
        }
    }
}
