//! Document shell: stylesheet, interaction script, and page assembly.

use crate::render::{LatestView, ProfitView};

pub const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: #0d0f14;
  color: #e8e8e8;
  font-family: -apple-system, "Segoe UI", "PingFang SC", "Microsoft YaHei", sans-serif;
}
header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 14px 18px;
  border-bottom: 1px solid #1d2330;
}
header h1 { font-size: 18px; }
header form { display: flex; align-items: center; gap: 8px; font-size: 13px; color: #b5b5b5; }
header input {
  width: 70px;
  background: #181c27;
  border: 1px solid #1d2330;
  border-radius: 6px;
  color: #e8e8e8;
  padding: 6px 8px;
}
header button {
  background: #1f6feb;
  border: none;
  border-radius: 6px;
  color: #fff;
  padding: 6px 12px;
  cursor: pointer;
}
.layout { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; padding: 16px; }
.panel { min-width: 0; }
.panel > .title { font-weight: 700; margin-bottom: 10px; }
#profit_meta { font-size: 14px; color: #b5b5b5; margin-bottom: 10px; }
.chart { height: 420px; background: #111319; border-radius: 10px; }
.card {
  background: #141824;
  border: 1px solid #1d2330;
  border-radius: 10px;
  padding: 12px 14px;
  margin-bottom: 14px;
}
.card .title { font-weight: 700; margin-bottom: 6px; }
.card .time { font-size: 12px; color: #777; margin-bottom: 8px; }
.section { margin-top: 8px; }
.section button {
  background: #181c27;
  border: 1px solid #1d2330;
  border-radius: 6px;
  color: #b5b5b5;
  padding: 5px 10px;
  margin-right: 6px;
  font-size: 12px;
  cursor: pointer;
}
.section .content { margin-top: 6px; }
pre {
  background: #111319;
  border-radius: 8px;
  padding: 10px;
  font-size: 12px;
  overflow-x: auto;
  white-space: pre-wrap;
  word-break: break-word;
}
.stats-card { margin-bottom: 14px; }
.stats-grid-4 { display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; }
.stat-cell {
  background: #181c27;
  border: 1px solid #1d2330;
  border-radius: 10px;
  padding: 12px;
}
.stat-label { font-size: 13px; color: #b5b5b5; margin-bottom: 6px; }
.stat-value { font-size: 20px; font-weight: 800; color: #ff5252; }
.stats-note { margin-top: 10px; font-size: 12px; color: #777; }
.json .key { color: #7ec8ff; }
.json .string { color: #9ccc65; }
.json .number { color: #ffb74d; }
.json .boolean { color: #ba68c8; }
.json .null { color: #90a4ae; }
"#;

/// Toggle/copy bindings for the rendered cards. Handlers are assigned, never
/// accumulated, so re-running after a reload is safe.
pub const SCRIPT: &str = r#"
function bindButtons() {
  document.querySelectorAll(".section.collapsible .toggle").forEach(function (btn) {
    btn.onclick = function () {
      var content = btn.closest(".section.collapsible").querySelector(".content");
      content.style.display =
        (content.style.display === "none" || !content.style.display) ? "block" : "none";
    };
  });

  document.querySelectorAll(".section.collapsible .copy").forEach(function (btn) {
    btn.onclick = function () {
      var raw = decodeURIComponent(btn.getAttribute("data-json") || "");
      if (navigator.clipboard && navigator.clipboard.writeText) {
        navigator.clipboard.writeText(raw);
      } else {
        var ta = document.createElement("textarea");
        ta.value = raw;
        document.body.appendChild(ta);
        ta.select();
        document.execCommand("copy");
        document.body.removeChild(ta);
      }
      alert("📋 JSON 已复制");
    };
  });
}
bindButtons();
"#;

/// Assemble the full document from the two rendered panels.
pub fn render_page(limit: u32, profit: &ProfitView, latest: &LatestView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>AIBTC.VIP 交易面板</title>
<script src="https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js"></script>
<style>{style}</style>
</head>
<body>
<header>
  <h1>🧠 AIBTC.VIP 交易面板</h1>
  <form method="get" action="/">
    <label for="limit">最新记录条数</label>
    <input id="limit" name="limit" type="number" min="1" max="300" value="{limit}">
    <button type="submit">🔄 刷新</button>
  </form>
</header>
<main class="layout">
  <section class="panel">
    <div class="title">📈 收益曲线</div>
    <div id="profit_meta">{meta}</div>
    {chart}
  </section>
  <section class="panel">
    <div id="stats_wrap">{stats}</div>
    <div id="latest_wrap">{cards}</div>
  </section>
</main>
<script>{script}</script>
</body>
</html>
"#,
        style = STYLE,
        limit = limit,
        meta = profit.meta,
        chart = profit.chart,
        stats = latest.stats,
        cards = latest.cards,
        script = SCRIPT
    )
}
