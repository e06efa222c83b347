use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `GET /deliveries`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToursSnapshot {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub cards: Vec<TourCard>,
    /// Backend cache hit; logged only.
    #[serde(default)]
    pub cached: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TourCard {
    #[serde(default, deserialize_with = "lenient_option")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub area: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub drivers: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub truck: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status_label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status_badge_class: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub pickings: Vec<Picking>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub kpi_progress: Option<DeliveryProgressKpi>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub kpi_customer_confirmation: Option<ConfirmationKpi>,
}

impl TourCard {
    pub fn badge_class(&self) -> &str {
        non_empty(&self.status_badge_class).unwrap_or("text-bg-secondary")
    }
}

/// One stop of a tour.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Picking {
    #[serde(default, deserialize_with = "lenient_string")]
    pub x_time_from: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time_badge_class: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub badge_class: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub x_city: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub partner_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub row_class: String,
}

impl Picking {
    /// Style of the time badge: `time_badge_class`, else `badge_class`.
    pub fn time_class(&self) -> &str {
        non_empty(&self.time_badge_class)
            .or_else(|| non_empty(&self.badge_class))
            .unwrap_or("")
    }
}

/// Delivery progress of a tour, cancelled pickings excluded from `active`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryProgressKpi {
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub active: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub done: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub not_done: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub cancel: i64,
    #[serde(default, deserialize_with = "lenient_option")]
    pub pct: Option<f64>,
}

/// Customer confirmation rate of a tour, cancelled pickings excluded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfirmationKpi {
    #[serde(default, deserialize_with = "lenient_count")]
    pub active: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub yes: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub no: i64,
    #[serde(default, deserialize_with = "lenient_option")]
    pub pct: Option<f64>,
}

/// The three regions a page swaps in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub content: String,
    pub last_update: String,
    pub position: String,
    pub animate: bool,
    /// Counts cards entering the carousel slot, so a client that skipped the
    /// version carrying `animate` can still replay the entry.
    pub entered: u64,
    pub version: u64,
    pub card_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// The backend forwards ERP fields as-is, which uses `false` for "empty".

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => String::new(),
    })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    })
}

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
