//! Dashboard refresh endpoint
//!
//! Each call re-runs join → filter → aggregate over the cached tables and
//! returns the three charts ready for Plotly.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use olist_common::pipeline::{run_pipeline, DashboardView, Selection};
use olist_common::DatasetVersion;

use super::error::ApiError;
use crate::AppState;

/// Plotly trace type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Box,
    Bar,
}

/// One chart as handed to the browser
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub id: &'static str,
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x: Vec<Value>,
    pub y: Vec<Value>,
}

/// Response of GET/POST /api/dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub dataset: Option<DatasetVersion>,
    #[serde(flatten)]
    pub view: DashboardView,
    pub charts: Vec<ChartSpec>,
}

/// Line chart: distinct orders per month
pub fn monthly_chart(view: &DashboardView) -> ChartSpec {
    ChartSpec {
        id: "monthly-orders",
        kind: ChartKind::Line,
        title: "📈 Evolução Mensal dos Pedidos",
        x_label: "Mês",
        y_label: "Pedidos",
        x: view.monthly_volume.iter().map(|m| json!(m.month)).collect(),
        y: view.monthly_volume.iter().map(|m| json!(m.orders)).collect(),
    }
}

/// Box chart: delivery days grouped by review score
pub fn delivery_chart(view: &DashboardView) -> ChartSpec {
    ChartSpec {
        id: "delivery-vs-review",
        kind: ChartKind::Box,
        title: "⏱️ Tempo de Entrega vs Avaliação do Cliente",
        x_label: "review_score",
        y_label: "tempo_entrega_dias",
        x: view
            .delivery_vs_review
            .iter()
            .map(|(score, _)| json!(score))
            .collect(),
        y: view
            .delivery_vs_review
            .iter()
            .map(|(_, days)| json!(days))
            .collect(),
    }
}

/// Bar chart: top sellers by distinct order count
pub fn sellers_chart(view: &DashboardView) -> ChartSpec {
    ChartSpec {
        id: "top-sellers",
        kind: ChartKind::Bar,
        title: "🏆 Top 10 Vendedores por Volume de Pedidos",
        x_label: "Vendedor",
        y_label: "Pedidos",
        x: view.top_sellers.iter().map(|s| json!(s.seller_id)).collect(),
        y: view.top_sellers.iter().map(|s| json!(s.orders)).collect(),
    }
}

fn refresh(state: &AppState, selection: Selection) -> Result<DashboardResponse, ApiError> {
    let dataset = state.cache.get_or_load()?;
    let view = run_pipeline(&dataset, &selection)?;

    info!(
        "Dashboard refresh: {} of {} rows, {} orders",
        view.filtered_rows, view.joined_rows, view.filtered_orders
    );

    let charts = vec![monthly_chart(&view), delivery_chart(&view), sellers_chart(&view)];
    Ok(DashboardResponse {
        dataset: state.cache.version().cloned(),
        view,
        charts,
    })
}

/// GET /api/dashboard
///
/// Default selection: every state, every category.
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    refresh(&state, Selection::all()).map(Json)
}

/// POST /api/dashboard
///
/// Body: `{"states": [...], "categories": [...]}`; an omitted list means
/// all values, an empty list means none.
pub async fn post_dashboard(
    State(state): State<AppState>,
    Json(selection): Json<Selection>,
) -> Result<Json<DashboardResponse>, ApiError> {
    refresh(&state, selection).map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use olist_common::pipeline::{FilterOptions, MonthlyVolume, SellerSummary};

    fn view() -> DashboardView {
        DashboardView {
            selection: Selection::all(),
            options: FilterOptions::default(),
            joined_rows: 3,
            filtered_rows: 3,
            filtered_orders: 2,
            monthly_volume: vec![
                MonthlyVolume {
                    month: "2018-01".to_string(),
                    orders: 1,
                },
                MonthlyVolume {
                    month: "2018-02".to_string(),
                    orders: 1,
                },
            ],
            delivery_vs_review: vec![(5, 3), (1, 20)],
            top_sellers: vec![SellerSummary {
                seller_id: "s1".to_string(),
                orders: 2,
                avg_review_score: 3.0,
                avg_delivery_days: 11.5,
            }],
        }
    }

    #[test]
    fn test_monthly_chart_axes() {
        let chart = monthly_chart(&view());
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.x, vec![json!("2018-01"), json!("2018-02")]);
        assert_eq!(chart.y, vec![json!(1), json!(1)]);
    }

    #[test]
    fn test_delivery_chart_keeps_raw_pairs() {
        let chart = delivery_chart(&view());
        assert_eq!(chart.kind, ChartKind::Box);
        assert_eq!(chart.x, vec![json!(5), json!(1)]);
        assert_eq!(chart.y, vec![json!(3), json!(20)]);
    }

    #[test]
    fn test_sellers_chart() {
        let chart = sellers_chart(&view());
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.x, vec![json!("s1")]);
        assert_eq!(chart.y, vec![json!(2)]);
    }

    #[test]
    fn test_chart_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ChartKind::Box).unwrap(), json!("box"));
    }
}
