use askama::Template;
use axum::{extract::State, http::StatusCode, response::Response};

use super::{load_failure, page, Nav};
use crate::auth::AuthContext;
use crate::data::{self, ProductionView};
use crate::filters;
use crate::render::{self, CHART_TITLE};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "production.html")]
pub struct ProductionTemplate {
  pub nav: Nav,
  pub columns: &'static [&'static str],
  pub rows: Vec<Vec<String>>,
  pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "chart.html")]
pub struct ChartTemplate {
  pub nav: Nav,
  pub title: &'static str,
  /// Inline SVG, None when there are no joined rows
  pub chart: Option<String>,
  pub error: Option<String>,
}

/// GET /production
pub async fn production_list(auth: AuthContext, State(state): State<AppState>) -> Response {
  let nav = Nav::from(&auth);
  match data::combine(&state.paths) {
    Ok(view) => page(
      StatusCode::OK,
      ProductionTemplate {
        nav,
        columns: view.columns(),
        rows: view.rows.iter().map(|r| r.cells()).collect(),
        error: None,
      },
    ),
    Err(e) => {
      let (status, message) = load_failure(&e);
      page(
        status,
        ProductionTemplate {
          nav,
          columns: &ProductionView::COLUMNS,
          rows: Vec::new(),
          error: Some(message),
        },
      )
    }
  }
}

/// GET /chart
pub async fn production_chart(auth: AuthContext, State(state): State<AppState>) -> Response {
  let nav = Nav::from(&auth);
  match data::combine(&state.paths).and_then(|view| render::production_chart(&view)) {
    Ok(chart) => page(
      StatusCode::OK,
      ChartTemplate {
        nav,
        title: CHART_TITLE,
        chart,
        error: None,
      },
    ),
    Err(e) => {
      let (status, message) = load_failure(&e);
      page(
        status,
        ChartTemplate {
          nav,
          title: CHART_TITLE,
          chart: None,
          error: Some(message),
        },
      )
    }
  }
}
