use askama::Template;
use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::Response,
};

use super::{load_failure, page, Nav};
use crate::auth::AuthContext;
use crate::data::{self, Mineral};
use crate::filters;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "minerals.html")]
pub struct MineralsTemplate {
  pub nav: Nav,
  pub minerals: Vec<Mineral>,
  pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "mineral.html")]
pub struct MineralTemplate {
  pub nav: Nav,
  pub mineral: Option<Mineral>,
  pub error: Option<String>,
}

/// GET /minerals
pub async fn mineral_list(auth: AuthContext, State(state): State<AppState>) -> Response {
  let nav = Nav::from(&auth);
  match data::load_minerals(&state.paths) {
    Ok(minerals) => page(
      StatusCode::OK,
      MineralsTemplate {
        nav,
        minerals,
        error: None,
      },
    ),
    Err(e) => {
      let (status, message) = load_failure(&e);
      page(
        status,
        MineralsTemplate {
          nav,
          minerals: Vec::new(),
          error: Some(message),
        },
      )
    }
  }
}

/// GET /mineral/{name}
pub async fn mineral_profile(
  auth: AuthContext,
  State(state): State<AppState>,
  Path(name): Path<String>,
) -> Response {
  let nav = Nav::from(&auth);
  match data::get_mineral(&state.paths, &name) {
    Ok(mineral) => page(
      StatusCode::OK,
      MineralTemplate {
        nav,
        mineral: Some(mineral),
        error: None,
      },
    ),
    Err(e) => {
      let (status, message) = load_failure(&e);
      page(
        status,
        MineralTemplate {
          nav,
          mineral: None,
          error: Some(message),
        },
      )
    }
  }
}
