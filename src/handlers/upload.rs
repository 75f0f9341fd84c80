//! Admin-only dataset upload.

use askama::Template;
use axum::{
  extract::{Multipart, State},
  http::StatusCode,
  response::Response,
};

use super::{error_status, page, Nav};
use crate::auth::AdminContext;
use crate::data::{self, DatasetKind, ReplaceOutcome};
use crate::error::DashboardError;
use crate::filters;
use crate::state::AppState;

/// Multipart field holding the dataset kind
const KIND_FIELD: &str = "updateType";

/// Multipart field holding the file
const FILE_FIELD: &str = "file";

#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadTemplate {
  pub nav: Nav,
  pub kinds: [DatasetKind; 3],
  pub message: Option<String>,
  pub warning: Option<String>,
  pub checksum: Option<String>,
  pub error: Option<String>,
}

impl UploadTemplate {
  fn new(nav: Nav) -> Self {
    Self {
      nav,
      kinds: DatasetKind::ALL,
      message: None,
      warning: None,
      checksum: None,
      error: None,
    }
  }
}

/// Fields read from the upload form
#[derive(Default)]
struct UploadForm {
  kind: Option<String>,
  file: Option<Vec<u8>>,
}

/// GET /upload
pub async fn upload_page(AdminContext(auth): AdminContext) -> Response {
  page(StatusCode::OK, UploadTemplate::new(Nav::from(&auth)))
}

/// POST /upload - Replace one dataset with the uploaded file
pub async fn upload_submit(
  AdminContext(auth): AdminContext,
  State(state): State<AppState>,
  mut multipart: Multipart,
) -> Response {
  let mut template = UploadTemplate::new(Nav::from(&auth));

  let result = match read_upload_form(&mut multipart).await {
    Ok(form) => replace_from_form(&state, form),
    Err(e) => Err(e),
  };

  match result {
    Ok(Some(outcome)) => {
      tracing::info!("User {} replaced the {} dataset", auth.username, outcome.kind);
      template.message = Some(outcome.kind.success_message().to_string());
      template.warning = outcome.schema_warning;
      template.checksum = Some(outcome.sha256);
      page(StatusCode::OK, template)
    }
    Ok(None) => {
      template.error = Some("Please choose a file to upload".to_string());
      page(StatusCode::BAD_REQUEST, template)
    }
    Err(e) => {
      tracing::warn!("Upload by {} failed: {}", auth.username, e);
      template.error = Some(e.user_message());
      page(error_status(&e), template)
    }
  }
}

/// Swap in the uploaded file. `Ok(None)` when the form carried no file.
fn replace_from_form(state: &AppState, form: UploadForm) -> Result<Option<ReplaceOutcome>, DashboardError> {
  let kind: DatasetKind = form.kind.unwrap_or_default().parse()?;

  let Some(contents) = form.file else {
    return Ok(None);
  };

  data::replace_dataset(&state.paths, &state.dataset_lock, kind, &contents).map(Some)
}

/// Extract the dataset kind and file bytes from the multipart body
async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, DashboardError> {
  let mut form = UploadForm::default();

  loop {
    let field = match multipart.next_field().await {
      Ok(Some(field)) => field,
      Ok(None) => break,
      Err(e) => return Err(DashboardError::UploadFailed(format!("read multipart body: {}", e))),
    };

    let name = field.name().unwrap_or_default().to_string();
    match name.as_str() {
      KIND_FIELD => {
        let value = field
          .text()
          .await
          .map_err(|e| DashboardError::UploadFailed(format!("read {}: {}", KIND_FIELD, e)))?;
        form.kind = Some(value.trim().to_string());
      }
      FILE_FIELD => {
        // Browsers send an empty, unnamed part when no file was chosen
        let chosen = field.file_name().map(|n| !n.is_empty()).unwrap_or(false);
        let bytes = field
          .bytes()
          .await
          .map_err(|e| DashboardError::UploadFailed(format!("read upload: {}", e)))?;
        if chosen || !bytes.is_empty() {
          form.file = Some(bytes.to_vec());
        }
      }
      _ => {}
    }
  }

  Ok(form)
}
