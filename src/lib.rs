//! Server-rendered dashboard for the AIBTC trading bot.
//!
//! Per page request the service fetches three read-only telemetry endpoints
//! from the bot backend (equity curve, latest decision records, aggregate
//! stats) concurrently, then renders the full dashboard document: profit
//! summary and ECharts equity chart on the left, stats strip and collapsible
//! decision cards on the right.

pub mod chart;
pub mod client;
pub mod config;
pub mod highlight;
pub mod logging;
pub mod page;
pub mod render;
pub mod server;
pub mod telemetry;
