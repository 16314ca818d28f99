//! Edit store screen: load one store and overwrite its fields.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::instrument;

use karam_core::{StoreId, parse_store_id};

use super::{Notice, StoreQuery, render};
use crate::error::AppError;
use crate::models::Store;
use crate::services::{LoadState, StoreForm};
use crate::state::AppState;

/// Edit store page template.
#[derive(Template)]
#[template(path = "edit_store.html")]
pub struct EditStoreTemplate {
    pub store_id: i32,
    /// Name as stored, used in the heading.
    pub store_name: String,
    pub form: StoreForm,
    pub notice: Option<Notice>,
}

impl EditStoreTemplate {
    fn new(store: &Store, form: StoreForm, notice: Option<Notice>) -> Self {
        Self {
            store_id: store.id.as_i32(),
            store_name: store.name.clone(),
            form,
            notice,
        }
    }
}

/// Build the edit store router.
pub fn router() -> Router<AppState> {
    Router::new().route("/edit-store", get(edit_store_page).post(update_store))
}

/// Fetch exactly one store; no match is an error.
async fn load_store(state: &AppState, id: StoreId) -> Result<Store, AppError> {
    state
        .backend()
        .get_store(id)
        .await
        .inspect_err(|e| tracing::error!(error = %e, store_id = %id, "Failed to load store"))?
        .ok_or_else(|| AppError::store_not_found(id))
}

/// Parse `storeId`, then load. A bad parameter never reaches the backend.
async fn open_screen(state: &AppState, query: &StoreQuery) -> Result<Store, AppError> {
    let loaded = match parse_store_id(query.store_id.as_deref()) {
        Err(e) => LoadState::failed(e.into()),
        Ok(id) => LoadState::run(load_store(state, id)).await,
    };
    loaded.into_result()
}

/// Render the store form.
///
/// GET /edit-store?storeId=N
#[instrument(skip(state))]
async fn edit_store_page(
    State(state): State<AppState>,
    Query(query): Query<StoreQuery>,
) -> Result<Response, AppError> {
    let store = open_screen(&state, &query).await?;
    let form = StoreForm::from(&store);
    Ok(render(&EditStoreTemplate::new(&store, form, None)).into_response())
}

/// Overwrite every editable field of the store.
///
/// POST /edit-store?storeId=N
#[instrument(skip(state, form))]
async fn update_store(
    State(state): State<AppState>,
    Query(query): Query<StoreQuery>,
    Form(form): Form<StoreForm>,
) -> Result<Response, AppError> {
    let mut store = open_screen(&state, &query).await?;

    let input = match form.validate_edit() {
        Ok(input) => input,
        Err(e) => {
            let template = EditStoreTemplate::new(&store, form, Some(Notice::error(e.to_string())));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&template)).into_response());
        }
    };

    match state.backend().update_store(store.id, &input).await {
        Ok(()) => {
            tracing::info!(store_id = %store.id, "Store updated");
            store.apply(&input);
            let form = StoreForm::from(&store);
            let notice = Notice::success("Tienda actualizada correctamente.");
            Ok(render(&EditStoreTemplate::new(&store, form, Some(notice))).into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, store_id = %store.id, "Failed to update store");
            let notice =
                Notice::error("Error al actualizar la tienda. Por favor, intenta de nuevo.");
            let template = EditStoreTemplate::new(&store, form, Some(notice));
            Ok((StatusCode::INTERNAL_SERVER_ERROR, render(&template)).into_response())
        }
    }
}
