use askama::Template;
use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::Response,
};

use super::{load_failure, page, Nav};
use crate::auth::AuthContext;
use crate::data::{self, Country};
use crate::filters;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "countries.html")]
pub struct CountriesTemplate {
  pub nav: Nav,
  pub countries: Vec<Country>,
  pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "country.html")]
pub struct CountryTemplate {
  pub nav: Nav,
  pub country: Option<Country>,
  pub error: Option<String>,
}

/// GET /countries
pub async fn country_list(auth: AuthContext, State(state): State<AppState>) -> Response {
  let nav = Nav::from(&auth);
  match data::load_countries(&state.paths) {
    Ok(countries) => page(
      StatusCode::OK,
      CountriesTemplate {
        nav,
        countries,
        error: None,
      },
    ),
    Err(e) => {
      let (status, message) = load_failure(&e);
      page(
        status,
        CountriesTemplate {
          nav,
          countries: Vec::new(),
          error: Some(message),
        },
      )
    }
  }
}

/// GET /country/{name}
pub async fn country_profile(
  auth: AuthContext,
  State(state): State<AppState>,
  Path(name): Path<String>,
) -> Response {
  let nav = Nav::from(&auth);
  match data::get_country(&state.paths, &name) {
    Ok(country) => page(
      StatusCode::OK,
      CountryTemplate {
        nav,
        country: Some(country),
        error: None,
      },
    ),
    Err(e) => {
      let (status, message) = load_failure(&e);
      page(
        status,
        CountryTemplate {
          nav,
          country: None,
          error: Some(message),
        },
      )
    }
  }
}
