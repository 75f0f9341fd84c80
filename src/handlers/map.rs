use askama::Template;
use axum::{extract::State, http::StatusCode, response::Response};

use super::{load_failure, page, Nav};
use crate::auth::AuthContext;
use crate::config::{MAP_CENTER, MAP_ZOOM};
use crate::data;
use crate::filters;
use crate::render;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "map.html")]
pub struct MapTemplate {
  pub nav: Nav,
  pub center_lat: f64,
  pub center_lng: f64,
  pub zoom: u8,
  pub markers_json: String,
  pub error: Option<String>,
}

impl MapTemplate {
  fn new(nav: Nav, markers_json: String, error: Option<String>) -> Self {
    Self {
      nav,
      center_lat: MAP_CENTER.0,
      center_lng: MAP_CENTER.1,
      zoom: MAP_ZOOM,
      markers_json,
      error,
    }
  }
}

/// GET /map - Countries on a map. Marker positions are placeholders.
pub async fn map_view(auth: AuthContext, State(state): State<AppState>) -> Response {
  let nav = Nav::from(&auth);
  match data::load_countries(&state.paths) {
    Ok(countries) => {
      let markers = render::markers(&countries);
      page(
        StatusCode::OK,
        MapTemplate::new(nav, render::markers_json(&markers), None),
      )
    }
    Err(e) => {
      let (status, message) = load_failure(&e);
      page(status, MapTemplate::new(nav, "[]".to_string(), Some(message)))
    }
  }
}
