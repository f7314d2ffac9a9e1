//! End-to-end render pipeline tests: backend payload JSON in, full
//! dashboard document out. No network; payloads are decoded the same way
//! the fetch path decodes them.

use serde_json::json;

use aibtc_dashboard::page::render_page;
use aibtc_dashboard::render::{render_error, render_latest, render_profit};
use aibtc_dashboard::telemetry::{LatestBatch, ProfitCurve, StatsSummary};

fn decode<T: serde::de::DeserializeOwned>(v: serde_json::Value) -> T {
    serde_json::from_value(v).expect("payload decodes")
}

#[test]
fn full_page_happy_path() {
    let curve: ProfitCurve = decode(json!({
        "count": 3,
        "initial_equity": 1000.0,
        "data": [
            {"ts": 1700000000000i64, "equity": 1000.0},
            [1700000060000i64, 1080.0],
            {"ts": 1700000120000i64, "equity": 1100.0}
        ],
    }));
    let latest: LatestBatch = decode(json!({
        "request": [{"request": "fed prompt"}],
        "response": [{
            "timestamp": 1700000120,
            "reasoning": "momentum up",
            "signals": [{"symbol": "BTCUSDT", "side": "BUY", "confidence": 0.8}],
        }],
    }));
    let stats: StatsSummary = decode(json!({"total_decisions": 7}));

    let profit = render_profit(&curve);
    let right = render_latest(&latest, &stats);
    let page = render_page(20, &profit, &right);

    // Profit summary with mixed point shapes: last point wins.
    assert!(page.contains("初始权益：<b>1000.00 USDT</b>"));
    assert!(page.contains("当前权益：<b>1100.00 USDT</b>"));
    assert!(page.contains("+100.00 USDT (10.00%)"));

    // Chart present with both series and the leak-safe init.
    assert!(page.contains(r#"id="profit_chart""#));
    assert!(page.contains("账户权益"));
    assert!(page.contains("初始资金"));
    assert!(page.contains("__profitResizeBound"));

    // One card, highlighted signals, stats strip.
    assert!(page.contains("fed prompt"));
    assert!(page.contains("momentum up"));
    assert!(page.contains(r#"<span class="key">"side":</span>"#));
    assert!(page.contains(r#"<span class="string">"BUY"</span>"#));
    assert!(page.contains("总决策次数"));
    assert!(page.contains(">7<"));
    assert!(page.contains("最新 1 条"));
}

#[test]
fn empty_curve_means_no_chart() {
    let curve: ProfitCurve = decode(json!({
        "count": 0,
        "initial_equity": 1000.0,
        "data": [],
    }));
    let profit = render_profit(&curve);
    assert!(profit.meta.contains("暂无收益数据"));
    assert!(!profit.chart.contains("profit_chart"));
}

#[test]
fn zero_initial_equity_means_no_chart() {
    let curve: ProfitCurve = decode(json!({
        "count": 1,
        "initial_equity": 0,
        "data": [[1, 1000.0]],
    }));
    let profit = render_profit(&curve);
    assert!(profit.meta.contains("暂无收益数据"));
    assert!(!profit.chart.contains("echarts"));
}

#[test]
fn pairing_truncates_to_shorter_side() {
    let latest: LatestBatch = decode(json!({
        "request": [{"request": "r0"}, {"request": "r1"}, {"request": "r2"}],
        "response": [
            {"timestamp": 1, "reasoning": "a", "signals": []},
            {"timestamp": 2, "reasoning": "b", "signals": []},
        ],
    }));
    let view = render_latest(&latest, &StatsSummary::default());
    assert_eq!(view.cards.matches("🧠 AIBTC.VIP 决策").count(), 2);
    assert!(view.cards.contains("<pre>r0</pre>"));
    assert!(view.cards.contains("<pre>r1</pre>"));
    assert!(!view.cards.contains("r2"));
}

#[test]
fn empty_requests_show_placeholder_regardless_of_responses() {
    let latest: LatestBatch = decode(json!({
        "request": [],
        "response": [{"timestamp": 1, "reasoning": "a", "signals": []}],
    }));
    let view = render_latest(&latest, &StatsSummary::default());
    assert!(view.cards.contains("无最新记录"));
    assert!(view.stats.is_empty());
}

#[test]
fn fetch_failure_renders_error_in_both_panels() {
    let (profit, right) = render_error("error sending request for url");
    let page = render_page(20, &profit, &right);
    assert_eq!(page.matches("加载失败").count(), 2);
    assert!(right.stats.is_empty());
    assert!(!page.contains("profit_chart\" class"));
}

#[test]
fn hostile_payload_text_never_escapes_its_pre_block() {
    let latest: LatestBatch = decode(json!({
        "request": [{"request": "</pre><script>alert(1)</script>"}],
        "response": [{
            "timestamp": 1,
            "reasoning": "<img src=x onerror=alert(1)>",
            "signals": [{"note": "</span><script>"}],
        }],
    }));
    let view = render_latest(&latest, &StatsSummary::default());
    assert!(!view.cards.contains("<script>alert(1)"));
    assert!(!view.cards.contains("<img src=x"));
    assert!(view.cards.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn stats_placeholders_stay_unknown_not_zero() {
    let stats: StatsSummary = decode(json!({"total_decisions": "many"}));
    let latest: LatestBatch = decode(json!({
        "request": [{"request": "x"}],
        "response": [{"timestamp": 1, "reasoning": "y", "signals": []}],
    }));
    let view = render_latest(&latest, &stats);
    // Non-numeric decision total renders as unknown too: four "--" cells.
    assert_eq!(view.stats.matches("--").count(), 4);
    assert!(!view.stats.contains(">0<"));
}
