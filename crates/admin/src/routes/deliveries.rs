//! Store deliveries screen: every delivery of one store, editable per row.
//!
//! The page is one form. Each row posts its buffer as `<field>-<id>` inputs;
//! the row's buttons post `save=<id>` or `delete=<id>`. A POST acts on that
//! one row and re-renders every other row exactly as it was submitted.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::instrument;

use karam_core::{DeliveryId, StoreId, parse_store_id};

use super::{Notice, StoreQuery, render};
use crate::error::AppError;
use crate::services::{DeliveryRow, DraftBook, LoadState, StoreDeliveries};
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Delivery row for template rendering.
#[derive(Debug, Clone)]
pub struct DeliveryRowView {
    pub id: i32,
    pub previous_quantity: String,
    pub quantity_left: String,
    pub amount_owed: String,
    pub date: String,
    pub notes: String,
}

impl From<DeliveryRow> for DeliveryRowView {
    fn from(row: DeliveryRow) -> Self {
        let previous_quantity = row.previous_label();
        Self {
            id: row.id.as_i32(),
            previous_quantity,
            quantity_left: row.draft.quantity_left,
            amount_owed: row.draft.amount_owed,
            date: row.draft.date,
            notes: row.draft.notes,
        }
    }
}

/// Store deliveries page template.
#[derive(Template)]
#[template(path = "deliveries.html")]
pub struct DeliveriesTemplate {
    pub store_id: i32,
    pub store_name: String,
    pub rows: Vec<DeliveryRowView>,
    pub notice: Option<Notice>,
}

impl DeliveriesTemplate {
    fn new(store_id: StoreId, screen: &StoreDeliveries, notice: Option<Notice>) -> Self {
        Self {
            store_id: store_id.as_i32(),
            store_name: screen.store_name().to_string(),
            rows: screen.rows().into_iter().map(Into::into).collect(),
            notice,
        }
    }
}

/// Build the store deliveries router.
pub fn router() -> Router<AppState> {
    Router::new().route("/deliveries", get(deliveries_page).post(deliveries_action))
}

// =============================================================================
// Row Actions
// =============================================================================

/// What a submission asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Save(DeliveryId),
    Delete(DeliveryId),
}

impl RowAction {
    /// Find the pressed button among submitted pairs.
    #[must_use]
    pub fn from_form(pairs: &[(String, String)]) -> Option<Self> {
        pairs.iter().find_map(|(key, value)| {
            let id = DeliveryId::new(value.trim().parse().ok()?);
            match key.as_str() {
                "save" => Some(Self::Save(id)),
                "delete" => Some(Self::Delete(id)),
                _ => None,
            }
        })
    }
}

/// Load the store and its deliveries.
async fn load_screen(state: &AppState, store_id: StoreId) -> Result<StoreDeliveries, AppError> {
    let backend = state.backend();
    let store = backend.get_store(store_id).await.inspect_err(|e| {
        tracing::error!(error = %e, store_id = %store_id, "Failed to load store");
    })?;
    let deliveries = backend
        .list_store_deliveries(store_id)
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, store_id = %store_id, "Failed to load deliveries");
        })?;
    Ok(StoreDeliveries::new(store, deliveries))
}

/// Parse `storeId`, then load. A bad parameter never reaches the backend.
async fn open_screen(
    state: &AppState,
    query: &StoreQuery,
) -> Result<(StoreId, StoreDeliveries), AppError> {
    let loaded = match parse_store_id(query.store_id.as_deref()) {
        Err(e) => LoadState::failed(e.into()),
        Ok(store_id) => {
            LoadState::run(async move { Ok((store_id, load_screen(state, store_id).await?)) })
                .await
        }
    };
    loaded.into_result()
}

/// Persist the pressed row and mirror the outcome into the screen.
async fn apply_action(
    state: &AppState,
    screen: &mut StoreDeliveries,
    action: RowAction,
) -> Notice {
    match action {
        RowAction::Save(id) => {
            let Some(draft) = screen.draft(id) else {
                return Notice::error("La entrega ya no existe.");
            };
            let changes = match draft.to_changes() {
                Ok(changes) => changes,
                Err(e) => return Notice::error(e.to_string()),
            };
            match state.backend().update_delivery(id, &changes).await {
                Ok(()) => {
                    tracing::info!(delivery_id = %id, "Delivery updated");
                    screen.mirror_saved(id, &changes);
                    Notice::success("Entrega actualizada correctamente.")
                }
                Err(e) => {
                    tracing::error!(error = %e, delivery_id = %id, "Failed to update delivery");
                    Notice::error("Error al actualizar la entrega. Por favor, intenta de nuevo.")
                }
            }
        }
        RowAction::Delete(id) => {
            if !screen.contains(id) {
                return Notice::error("La entrega ya no existe.");
            }
            match state.backend().delete_delivery(id).await {
                Ok(_) => {
                    tracing::info!(delivery_id = %id, "Delivery deleted");
                    screen.forget(id);
                    Notice::success("Entrega eliminada correctamente.")
                }
                Err(e) => {
                    tracing::error!(error = %e, delivery_id = %id, "Failed to delete delivery");
                    Notice::error("Error al eliminar la entrega. Por favor, intenta de nuevo.")
                }
            }
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Render one store's deliveries.
///
/// GET /deliveries?storeId=N
#[instrument(skip(state))]
async fn deliveries_page(
    State(state): State<AppState>,
    Query(query): Query<StoreQuery>,
) -> Result<Response, AppError> {
    let (store_id, screen) = open_screen(&state, &query).await?;
    Ok(render(&DeliveriesTemplate::new(store_id, &screen, None)).into_response())
}

/// Save or delete one row.
///
/// POST /deliveries?storeId=N
#[instrument(skip(state, pairs))]
async fn deliveries_action(
    State(state): State<AppState>,
    Query(query): Query<StoreQuery>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let (store_id, mut screen) = open_screen(&state, &query).await?;
    screen.adopt_drafts(&DraftBook::from_form(&pairs));

    let notice = match RowAction::from_form(&pairs) {
        Some(action) => Some(apply_action(&state, &mut screen, action).await),
        None => None,
    };

    Ok(render(&DeliveriesTemplate::new(store_id, &screen, notice)).into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{Delivery, Store};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_row_action_from_form() {
        let form = pairs(&[("dejados-3", "1"), ("save", "3")]);
        assert_eq!(
            RowAction::from_form(&form),
            Some(RowAction::Save(DeliveryId::new(3)))
        );

        let form = pairs(&[("delete", "9")]);
        assert_eq!(
            RowAction::from_form(&form),
            Some(RowAction::Delete(DeliveryId::new(9)))
        );

        assert_eq!(RowAction::from_form(&pairs(&[("save", "x")])), None);
        assert_eq!(RowAction::from_form(&pairs(&[("dejados-1", "2")])), None);
    }

    #[test]
    fn test_enter_key_submits_no_row_action() {
        let store = Store {
            id: StoreId::new(1),
            nickname: "A".to_string(),
            name: "A".to_string(),
            address: "Centro".to_string(),
            contact: None,
            visit_date: None,
        };
        let deliveries = [(10, "2024-01-01"), (11, "2024-01-02")]
            .into_iter()
            .map(|(id, day)| Delivery {
                id: DeliveryId::new(id),
                store_id: StoreId::new(1),
                quantity_left: Some(5),
                amount_owed: None,
                date: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
                notes: None,
            })
            .collect();
        let screen = StoreDeliveries::new(Some(store), deliveries);
        let html = DeliveriesTemplate::new(StoreId::new(1), &screen, None)
            .render()
            .unwrap();

        // The form's default button is the first submit button; it must not
        // carry a save or delete value.
        let form = html.find("<form").unwrap();
        let first_submit = form + html[form..].find("type=\"submit\"").unwrap();
        let tag_end = first_submit + html[first_submit..].find('>').unwrap();
        let tag = &html[first_submit..tag_end];
        assert!(tag.contains("implicit-submit"));
        assert!(!tag.contains("name="));
        assert!(html.find("name=\"save\" value=\"11\"").unwrap() > tag_end);
    }
}
