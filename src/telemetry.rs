//! Payload types for the three backend endpoints, plus shape normalization.
//!
//! The backend emits equity points in two shapes, `[ts, equity]` pairs and
//! `{ts, equity}` objects. Both are normalized into one canonical
//! [`EquityPoint`] right after decoding so no consumer branches on shape.
//! Malformed entries coerce to zero rather than failing the whole refresh.

use serde::Deserialize;
use serde_json::Value;

/// Raw equity point as it arrives on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawEquityPoint {
    Pair(Vec<Value>),
    Labeled {
        #[serde(default)]
        ts: Value,
        #[serde(default)]
        equity: Value,
    },
    Other(Value),
}

/// Timestamp as carried by an equity point: epoch milliseconds or free text.
#[derive(Debug, Clone, PartialEq)]
pub enum Stamp {
    Millis(i64),
    Text(String),
}

/// Canonical equity point, produced at the ingestion boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub stamp: Stamp,
    pub equity: f64,
}

fn coerce_stamp(ts: &Value) -> Stamp {
    match ts {
        Value::Number(n) => Stamp::Millis(n.as_f64().unwrap_or(0.0) as i64),
        Value::String(s) => Stamp::Text(s.clone()),
        other => Stamp::Text(other.to_string()),
    }
}

fn coerce_equity(equity: &Value) -> f64 {
    match equity {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

impl RawEquityPoint {
    pub fn normalize(&self) -> EquityPoint {
        let null = Value::Null;
        let (ts, equity) = match self {
            RawEquityPoint::Pair(cells) => (
                cells.first().unwrap_or(&null),
                cells.get(1).unwrap_or(&null),
            ),
            RawEquityPoint::Labeled { ts, equity } => (ts, equity),
            RawEquityPoint::Other(v) => (
                v.get("ts").unwrap_or(&null),
                v.get("equity").unwrap_or(&null),
            ),
        };
        EquityPoint {
            stamp: coerce_stamp(ts),
            equity: coerce_equity(equity),
        }
    }
}

/// `/profit_curve` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfitCurve {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub initial_equity: f64,
    #[serde(default)]
    pub data: Vec<RawEquityPoint>,
}

impl ProfitCurve {
    /// The curve renders only when it has points and a positive baseline.
    pub fn has_data(&self) -> bool {
        !self.data.is_empty() && self.initial_equity > 0.0
    }

    pub fn normalized(&self) -> Vec<EquityPoint> {
        self.data.iter().map(RawEquityPoint::normalize).collect()
    }
}

/// One response element in the `/latest` batch. Signals stay opaque JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecisionResponse {
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub signals: Value,
}

impl DecisionResponse {
    /// Signal sequence with null/missing collapsed to an empty array.
    pub fn signals_or_empty(&self) -> Value {
        match &self.signals {
            Value::Null => Value::Array(Vec::new()),
            v => v.clone(),
        }
    }
}

/// `/latest` response: positionally paired request/response sequences.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestBatch {
    #[serde(default)]
    pub request: Vec<Value>,
    #[serde(default)]
    pub response: Vec<DecisionResponse>,
}

/// `/stats` response. Trade-level counters are not supplied by the backend;
/// only the decision total exists, and only when it is actually a number.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsSummary {
    #[serde(default)]
    pub total_decisions: Option<Value>,
}

impl StatsSummary {
    pub fn decision_count(&self) -> Option<i64> {
        let v = self.total_decisions.as_ref()?;
        if !v.is_number() {
            return None;
        }
        v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
    }
}
