//! Equity-curve chart adapter: canonical points in, ECharts config out.

use chrono::{Local, TimeZone};
use serde_json::{json, Value};

use crate::logging::{log, obj, v_num, Domain, Level};
use crate::telemetry::{EquityPoint, Stamp};

fn axis_label(stamp: &Stamp) -> String {
    match stamp {
        Stamp::Millis(ms) => Local
            .timestamp_millis_opt(*ms)
            .single()
            .map(|dt| dt.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| ms.to_string()),
        Stamp::Text(s) => chrono::DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|_| s.clone()),
    }
}

/// Build the two-series line chart option: smooth filled equity line plus a
/// dashed flat baseline at initial equity.
///
/// The adapter keeps its own positive-baseline guard so it stays safe when
/// called outside the profit renderer.
pub fn chart_option(points: &[EquityPoint], initial_equity: f64) -> Option<Value> {
    if initial_equity <= 0.0 {
        log(
            Level::Warn,
            Domain::Render,
            "chart_guard",
            obj(&[("initial_equity", v_num(initial_equity))]),
        );
        return None;
    }

    let x: Vec<String> = points.iter().map(|p| axis_label(&p.stamp)).collect();
    let y: Vec<f64> = points.iter().map(|p| p.equity).collect();
    let baseline: Vec<f64> = vec![initial_equity; points.len()];

    Some(json!({
        "backgroundColor": "#111319",
        "tooltip": { "trigger": "axis" },
        "grid": { "left": 55, "right": 20, "top": 30, "bottom": 55 },
        "xAxis": {
            "type": "category",
            "data": x,
            "axisLabel": { "color": "#aaa" }
        },
        "yAxis": {
            "type": "value",
            "axisLabel": { "color": "#aaa" },
            "scale": true
        },
        "series": [
            {
                "name": "账户权益",
                "type": "line",
                "data": y,
                "smooth": true,
                "symbol": "circle",
                "symbolSize": 6,
                "lineStyle": { "width": 3 },
                "areaStyle": { "opacity": 0.15 }
            },
            {
                "name": "初始资金",
                "type": "line",
                "data": baseline,
                "symbol": "none",
                "lineStyle": { "type": "dashed", "width": 2, "color": "#888" }
            }
        ]
    }))
}

/// Inline init snippet for the rendered page. Disposes any previous chart
/// instance before re-init and binds the resize relayout listener once, so
/// in-page refreshes do not leak listeners.
pub fn chart_script(option: &Value, initial_equity: f64) -> String {
    // Axis labels carry backend text; a "<" surviving into the inline script
    // could open "</script>" and terminate the element. serde_json leaves
    // "<" alone, so escape it for the script context here.
    let option_text = option.to_string().replace('<', "\\u003c");
    format!(
        r##"<script>
(function () {{
  var el = document.getElementById("profit_chart");
  if (!el || typeof echarts === "undefined") return;
  if (window.__profitChart) {{ window.__profitChart.dispose(); }}
  var chart = echarts.init(el);
  var initialEquity = {initial};
  var option = {option};
  option.tooltip.formatter = function (params) {{
    var equity = Number(params[0].value);
    var profit = equity - initialEquity;
    var pct = ((profit / initialEquity) * 100).toFixed(2);
    var sign = profit >= 0 ? "+" : "";
    var color = profit >= 0 ? "#00c853" : "#ff5252";
    return "<b>权益：</b>" + equity.toFixed(2) + " USDT<br/>" +
      "<b>盈亏：</b><span style=\"color:" + color + "\">" +
      sign + profit.toFixed(2) + " USDT (" + pct + "%)</span>";
  }};
  chart.setOption(option);
  window.__profitChart = chart;
  if (!window.__profitResizeBound) {{
    window.addEventListener("resize", function () {{
      if (window.__profitChart) window.__profitChart.resize();
    }});
    window.__profitResizeBound = true;
  }}
}})();
</script>"##,
        initial = initial_equity,
        option = option_text
    )
}
