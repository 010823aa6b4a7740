//! One refresh cycle as plain data: fetch the snapshot and histories, then
//! map them onto what the dashboard shows. Drawing lives in `ui`.

use tracing::{debug, warn};

use crate::api::{FetchError, MetricsClient};
use crate::history::TrendSeries;
use crate::types::{DeviceSnapshot, HistoryPoint};

#[derive(Debug, Clone, PartialEq)]
pub enum BoardView {
    /// Snapshot fetch failed; nothing else is drawn this cycle.
    Unavailable(ApiFailure),
    /// Service answered with no devices.
    Waiting,
    Devices(Vec<DeviceView>),
}

impl BoardView {
    pub fn device_count(&self) -> usize {
        match self {
            BoardView::Devices(d) => d.len(),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiFailure {
    Unreachable(String),
    Status(u16),
    Unexpected(String),
}

impl From<&FetchError> for ApiFailure {
    fn from(e: &FetchError) -> Self {
        match e {
            FetchError::Status(code) => ApiFailure::Status(*code),
            e if e.is_unreachable() => ApiFailure::Unreachable(e.to_string()),
            e => ApiFailure::Unexpected(e.to_string()),
        }
    }
}

impl ApiFailure {
    pub fn message(&self) -> String {
        match self {
            ApiFailure::Unreachable(_) => {
                "❌ Cannot reach the metrics service. Check that the API server is up.".into()
            }
            ApiFailure::Status(code) => {
                format!("⚠️ Failed to connect to the API server (status: {code})")
            }
            ApiFailure::Unexpected(e) => format!("Unexpected error: {e}"),
        }
    }

    /// Underlying cause, when there is more to say than the message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiFailure::Unreachable(d) => Some(d.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Online,
    Offline,
}

impl From<bool> for Status {
    fn from(is_online: bool) -> Self {
        if is_online {
            Status::Online
        } else {
            Status::Offline
        }
    }
}

impl Status {
    pub fn icon(self) -> &'static str {
        match self {
            Status::Online => "🟢",
            Status::Offline => "🔴",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Online => "ONLINE",
            Status::Offline => "OFFLINE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    Charging,
    OnBattery,
}

impl From<bool> for Power {
    fn from(is_plugged: bool) -> Self {
        if is_plugged {
            Power::Charging
        } else {
            Power::OnBattery
        }
    }
}

impl Power {
    pub fn icon(self) -> &'static str {
        match self {
            Power::Charging => "⚡",
            Power::OnBattery => "🔋",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Ram,
    Storage,
    Battery,
}

impl Metric {
    pub fn title(self) -> &'static str {
        match self {
            Metric::Ram => "🧠 RAM Usage",
            Metric::Storage => "💾 Storage",
            Metric::Battery => "Battery",
        }
    }
}

/// Proportional fill for a percentage, always within `[0, 1]`.
pub fn fill_ratio(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    (value / 100.0).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeView {
    pub metric: Metric,
    pub value: f64,
    pub fill: f64,
    pub label: String,
}

impl GaugeView {
    fn new(metric: Metric, value: f64, suffix: Option<&str>) -> Self {
        let label = match suffix {
            Some(s) => format!("{value:.1}% {s}"),
            None => format!("{value:.1}%"),
        };
        Self {
            metric,
            value,
            fill: fill_ratio(value),
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Trend(TrendSeries),
    /// Fewer than two samples so far.
    Collecting,
    /// History endpoint answered with a non-200 status.
    Warning(String),
    /// History could not be fetched or decoded.
    Failed(String),
}

impl ChartView {
    pub fn from_history(history: Result<Vec<HistoryPoint>, FetchError>) -> Self {
        match history {
            Ok(points) => match TrendSeries::from_history(&points) {
                Some(series) => ChartView::Trend(series),
                None => ChartView::Collecting,
            },
            Err(FetchError::Status(code)) => {
                ChartView::Warning(format!("Failed to fetch history (API: {code})"))
            }
            Err(e) => ChartView::Failed(format!("Failed to load chart: {e}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceView {
    pub name: String,
    pub status: Status,
    pub power: Power,
    pub gauges: [GaugeView; 3],
    pub last_seen: String,
    pub chart: ChartView,
}

impl DeviceView {
    pub fn new(d: &DeviceSnapshot, history: Result<Vec<HistoryPoint>, FetchError>) -> Self {
        let power = Power::from(d.is_plugged);
        Self {
            name: d.display_name().to_string(),
            status: Status::from(d.is_online),
            power,
            gauges: [
                GaugeView::new(Metric::Ram, d.ram, None),
                GaugeView::new(Metric::Storage, d.disk, None),
                GaugeView::new(Metric::Battery, d.battery, Some(power.icon())),
            ],
            last_seen: d.last_seen_text(),
            chart: ChartView::from_history(history),
        }
    }

    /// Section title, e.g. `🟢 Phone (ONLINE)`.
    pub fn title(&self) -> String {
        format!("{} {} ({})", self.status.icon(), self.name, self.status.label())
    }
}

/// Runs one fetch pass. Never fails: errors become part of the view.
pub async fn build_board(client: &MetricsClient) -> BoardView {
    let devices = match client.fetch_snapshot().await {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "snapshot fetch failed");
            return BoardView::Unavailable(ApiFailure::from(&e));
        }
    };
    if devices.is_empty() {
        debug!("snapshot is empty");
        return BoardView::Waiting;
    }

    let mut views = Vec::with_capacity(devices.len());
    for d in &devices {
        let history = client.fetch_history(&d.device_id).await;
        match &history {
            Ok(points) => debug!(device = %d.device_id, points = points.len(), "history"),
            Err(e) => warn!(device = %d.device_id, error = %e, "history fetch failed"),
        }
        views.push(DeviceView::new(d, history));
    }
    BoardView::Devices(views)
}
