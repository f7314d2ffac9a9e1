//! Pure renderers: telemetry payloads in, HTML strings out.
//!
//! Each refresh produces one complete set of region strings; nothing is
//! mutated incrementally. All user-originated text goes through
//! [`escape_html`] before interpolation.

use chrono::{Local, TimeZone};
use serde_json::Value;

use crate::chart;
use crate::highlight::{escape_html, highlight_json};
use crate::telemetry::{DecisionResponse, LatestBatch, ProfitCurve, StatsSummary};

const NO_CURVE: &str = "暂无收益数据";
const NO_RECORDS: &str = "无最新记录";
const NO_TIME: &str = "（无时间）";
const NO_REASONING: &str = "（无分析内容）";
const UNKNOWN: &str = "--";

/// Left panel: summary line plus chart region.
#[derive(Debug, Clone)]
pub struct ProfitView {
    pub meta: String,
    pub chart: String,
}

/// Right panel: stats strip plus decision cards.
#[derive(Debug, Clone)]
pub struct LatestView {
    pub stats: String,
    pub cards: String,
}

pub fn render_profit(curve: &ProfitCurve) -> ProfitView {
    if !curve.has_data() {
        return ProfitView {
            meta: NO_CURVE.to_string(),
            chart: format!(r#"<div style="padding:14px;color:#b5b5b5;">{}</div>"#, NO_CURVE),
        };
    }

    let points = curve.normalized();
    let equity = points.last().map(|p| p.equity).unwrap_or(0.0);
    let profit = equity - curve.initial_equity;
    let pct = profit / curve.initial_equity * 100.0;
    let color = if profit >= 0.0 { "#00c853" } else { "#ff5252" };
    let sign = if profit >= 0.0 { "+" } else { "" };

    let meta = format!(
        "初始权益：<b>{:.2} USDT</b>&nbsp;&nbsp;当前权益：<b>{:.2} USDT</b>&nbsp;&nbsp;\
         <span style=\"color:{}\">未实现盈亏：{}{:.2} USDT ({:.2}%)</span>",
        curve.initial_equity, equity, color, sign, profit, pct
    );

    let chart = match chart::chart_option(&points, curve.initial_equity) {
        Some(option) => format!(
            "<div id=\"profit_chart\" class=\"chart\"></div>\n{}",
            chart::chart_script(&option, curve.initial_equity)
        ),
        None => String::new(),
    };

    ProfitView { meta, chart }
}

fn card_time(timestamp: Option<i64>) -> String {
    timestamp
        .and_then(|t| Local.timestamp_opt(t, 0).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| NO_TIME.to_string())
}

fn render_card(request: &Value, response: &DecisionResponse) -> String {
    let time = card_time(response.timestamp);
    let reasoning = response
        .reasoning
        .clone()
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| NO_REASONING.to_string());

    let signals = response.signals_or_empty();
    let pretty_signals =
        serde_json::to_string_pretty(&signals).unwrap_or_else(|_| "[]".to_string());

    // The request element usually carries the fed prompt under "request";
    // otherwise show the whole element.
    let request_text = match request.get("request").and_then(Value::as_str) {
        Some(text) => text.to_string(),
        None => serde_json::to_string_pretty(request).unwrap_or_else(|_| request.to_string()),
    };

    format!(
        r#"<div class="card">
  <div class="title">🧠 AIBTC.VIP 决策</div>
  <div class="time">时间：{time}</div>
  <div class="section collapsible">
    <button class="toggle">📌 展开/折叠投喂内容</button>
    <div class="content" style="display:none;"><pre>{request}</pre></div>
  </div>
  <div class="section collapsible">
    <button class="toggle">📌 展开/折叠推理内容</button>
    <div class="content" style="display:none;"><pre>{reasoning}</pre></div>
  </div>
  <div class="section collapsible">
    <button class="toggle">🚨 展开/折叠 AI 最终交易信号</button>
    <button class="copy" data-json="{raw}">📋 复制 JSON</button>
    <div class="content" style="display:block;"><pre class="json">{signals}</pre></div>
  </div>
</div>
"#,
        time = time,
        request = escape_html(&request_text),
        reasoning = escape_html(&reasoning),
        raw = urlencoding::encode(&pretty_signals),
        signals = highlight_json(&pretty_signals),
    )
}

pub fn render_latest(latest: &LatestBatch, stats: &StatsSummary) -> LatestView {
    if latest.request.is_empty() || latest.response.is_empty() {
        return LatestView {
            stats: String::new(),
            cards: format!(r#"<div class="card"><b>{}</b></div>"#, NO_RECORDS),
        };
    }

    let n = latest.request.len().min(latest.response.len());
    let mut cards = String::new();
    for i in 0..n {
        cards.push_str(&render_card(&latest.request[i], &latest.response[i]));
    }

    LatestView {
        stats: render_stats(stats, n),
        cards,
    }
}

fn stat_cell(label: &str, value: &str) -> String {
    format!(
        r#"<div class="stat-cell"><div class="stat-label">{}</div><div class="stat-value">{}</div></div>"#,
        label, value
    )
}

/// 4-cell strip. Trade/win/loss counters have no backend source yet and stay
/// explicit "--" markers, never zero.
pub fn render_stats(stats: &StatsSummary, shown: usize) -> String {
    let decisions = stats
        .decision_count()
        .map(|n| n.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    format!(
        r#"<div class="card stats-card">
  <div class="title">📊 统计</div>
  <div class="stats-grid-4">
{}{}{}{}  </div>
  <div class="stats-note">当前展示：最新 {} 条（统计按“最新一条”计算）</div>
</div>
"#,
        stat_cell("总交易数", UNKNOWN),
        stat_cell("盈利次数", UNKNOWN),
        stat_cell("亏损次数", UNKNOWN),
        stat_cell("总决策次数", &decisions),
        shown
    )
}

/// All-or-nothing failure view: the error text lands in both panels and the
/// stats strip is cleared.
pub fn render_error(err: &str) -> (ProfitView, LatestView) {
    let msg = escape_html(err);
    (
        ProfitView {
            meta: format!(r#"<span style="color:#ff5252">加载失败：{}</span>"#, msg),
            chart: format!(r#"<div style="padding:14px;color:#ff5252;">{}</div>"#, msg),
        },
        LatestView {
            stats: String::new(),
            cards: format!(r#"<div class="card"><b>加载失败：</b><br>{}</div>"#, msg),
        },
    )
}
