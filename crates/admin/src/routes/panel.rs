//! The panel: store list, latest delivery per store, creation forms and the
//! daily aggregate.
//!
//! Mutations follow post/redirect/get: on success they redirect back to `/`
//! with a notice code. Validation and backend failures re-render the panel
//! directly so the typed values are kept.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tracing::instrument;

use karam_core::{DeliveryId, FORM_DATE_FORMAT, StoreId};

use super::{Notice, NoticeParams, render};
use crate::db::RepositoryError;
use crate::error::AppError;
use crate::models::{Delivery, Store};
use crate::services::{
    DailyReport, DeliveryForm, LoadState, StoreForm, StoreSummary, daily_report, summarize,
};
use crate::state::AppState;

const NOT_APPLICABLE: &str = "N/A";

// =============================================================================
// Templates
// =============================================================================

/// Store row for template rendering.
#[derive(Debug, Clone)]
pub struct StoreView {
    pub id: i32,
    pub nickname: String,
    pub name: String,
    pub address: String,
    pub contact: String,
    pub visit_date: String,
    /// Preselected in the delivery form's store picker.
    pub selected: bool,
}

impl StoreView {
    fn new(store: &Store, selected_id: &str) -> Self {
        Self {
            id: store.id.as_i32(),
            nickname: store.nickname.clone(),
            name: store.name.clone(),
            address: store.address.clone(),
            contact: store
                .contact
                .clone()
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
            visit_date: store.visit_date.map_or_else(
                || NOT_APPLICABLE.to_string(),
                |d| d.format(FORM_DATE_FORMAT).to_string(),
            ),
            selected: selected_id.trim() == store.id.to_string(),
        }
    }
}

/// Latest-delivery row for template rendering.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub store_id: i32,
    pub delivery_id: i32,
    pub store_name: String,
    pub quantity_left: String,
    pub amount_owed: String,
    pub date: String,
    pub notes: String,
}

impl From<StoreSummary> for SummaryView {
    fn from(summary: StoreSummary) -> Self {
        let latest = summary.latest;
        Self {
            store_id: summary.store_id.as_i32(),
            delivery_id: latest.id.as_i32(),
            store_name: summary.store_name,
            quantity_left: or_not_applicable(latest.quantity_left),
            amount_owed: or_not_applicable(latest.amount_owed),
            date: latest.date.format(FORM_DATE_FORMAT).to_string(),
            notes: latest
                .notes
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
        }
    }
}

fn or_not_applicable(value: Option<i32>) -> String {
    value.map_or_else(|| NOT_APPLICABLE.to_string(), |n| n.to_string())
}

/// Panel page template.
#[derive(Template)]
#[template(path = "panel.html")]
pub struct PanelTemplate {
    pub stores: Vec<StoreView>,
    pub summaries: Vec<SummaryView>,
    pub store_form: StoreForm,
    pub delivery_form: DeliveryForm,
    pub notice: Option<Notice>,
    pub report: Option<DailyReport>,
}

/// Everything the panel shows, as loaded from the backend.
struct PanelData {
    stores: Vec<Store>,
    deliveries: Vec<Delivery>,
}

impl PanelData {
    fn into_template(
        self,
        store_form: StoreForm,
        delivery_form: DeliveryForm,
        notice: Option<Notice>,
        report: Option<DailyReport>,
    ) -> PanelTemplate {
        let stores = self
            .stores
            .iter()
            .map(|s| StoreView::new(s, &delivery_form.tienda))
            .collect();
        let summaries = summarize(&self.stores, &self.deliveries)
            .into_iter()
            .map(SummaryView::from)
            .collect();

        PanelTemplate {
            stores,
            summaries,
            store_form,
            delivery_form,
            notice,
            report,
        }
    }
}

/// Build the panel router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(panel_page))
        .route("/daily-total", get(daily_total))
        .route("/stores", post(create_store))
        .route("/stores/{id}/delete", post(delete_store))
        .route("/deliveries/new", post(create_delivery))
        .route("/deliveries/{id}/delete", post(delete_delivery))
}

/// Load every store and every delivery.
async fn load_panel(state: &AppState) -> Result<PanelData, AppError> {
    let backend = state.backend();
    let stores = backend.list_stores().await.inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load stores");
    })?;
    let deliveries = backend.list_deliveries().await.inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load deliveries");
    })?;
    Ok(PanelData { stores, deliveries })
}

/// Re-render the panel after a failed mutation, keeping the typed values.
async fn rerender(
    state: &AppState,
    status: StatusCode,
    store_form: StoreForm,
    delivery_form: DeliveryForm,
    notice: Notice,
) -> Result<Response, AppError> {
    let data = LoadState::run(load_panel(state)).await.into_result()?;
    let template = data.into_template(store_form, delivery_form, Some(notice), None);
    Ok((status, render(&template)).into_response())
}

// =============================================================================
// Pages
// =============================================================================

/// Render the panel.
///
/// GET /
#[instrument(skip(state))]
async fn panel_page(
    State(state): State<AppState>,
    Query(params): Query<NoticeParams>,
) -> Result<Response, AppError> {
    let data = LoadState::run(load_panel(&state)).await.into_result()?;
    let template = data.into_template(
        StoreForm::default(),
        DeliveryForm::default(),
        params.resolve(),
        None,
    );
    Ok(render(&template).into_response())
}

/// Render the panel with today's aggregate.
///
/// GET /daily-total
#[instrument(skip(state))]
async fn daily_total(State(state): State<AppState>) -> Result<Response, AppError> {
    let data = LoadState::run(load_panel(&state)).await.into_result()?;
    let today = state.today();

    let (notice, report) = match daily_report(state.backend(), today, &data.stores).await {
        Ok(report) if report.is_empty() => (Some(Notice::info(report.empty_message())), None),
        Ok(report) => {
            tracing::info!(
                date = %report.date,
                timezone = %state.timezone(),
                stores = report.groups.len(),
                grand_total = report.grand_total,
                "Daily total computed"
            );
            (None, Some(report))
        }
        Err(e) => {
            tracing::error!(error = %e, date = %today, "Failed to compute daily total");
            (
                Some(Notice::error(
                    "Error al calcular el total del día. Por favor, intenta de nuevo.",
                )),
                None,
            )
        }
    };

    let template = data.into_template(
        StoreForm::default(),
        DeliveryForm::default(),
        notice,
        report,
    );
    Ok(render(&template).into_response())
}

// =============================================================================
// Mutations
// =============================================================================

/// Create a store.
///
/// POST /stores
#[instrument(skip(state, form))]
async fn create_store(
    State(state): State<AppState>,
    Form(form): Form<StoreForm>,
) -> Result<Response, AppError> {
    let input = match form.validate_new() {
        Ok(input) => input,
        Err(e) => {
            return rerender(
                &state,
                StatusCode::UNPROCESSABLE_ENTITY,
                form,
                DeliveryForm::default(),
                Notice::error(e.to_string()),
            )
            .await;
        }
    };

    match state.backend().create_store(&input).await {
        Ok(store) => {
            tracing::info!(store_id = %store.id, "Store created");
            Ok(Redirect::to("/?notice=store_created").into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create store");
            rerender(
                &state,
                StatusCode::INTERNAL_SERVER_ERROR,
                form,
                DeliveryForm::default(),
                Notice::error("Error al agregar la tienda. Por favor, intenta de nuevo."),
            )
            .await
        }
    }
}

/// Delete a store; the backend removes its deliveries with it.
///
/// POST /stores/{id}/delete
#[instrument(skip(state))]
async fn delete_store(State(state): State<AppState>, Path(id): Path<i32>) -> Redirect {
    let id = StoreId::new(id);
    match state.backend().delete_store(id).await {
        Ok(true) => {
            tracing::info!(store_id = %id, "Store deleted");
            Redirect::to("/?notice=store_deleted")
        }
        Ok(false) => {
            tracing::warn!(store_id = %id, "Store to delete not found");
            Redirect::to("/?error=store_delete_failed")
        }
        Err(e) => {
            tracing::error!(error = %e, store_id = %id, "Failed to delete store");
            Redirect::to("/?error=store_delete_failed")
        }
    }
}

/// Record a delivery.
///
/// POST /deliveries/new
#[instrument(skip(state, form))]
async fn create_delivery(
    State(state): State<AppState>,
    Form(form): Form<DeliveryForm>,
) -> Result<Response, AppError> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            return rerender(
                &state,
                StatusCode::UNPROCESSABLE_ENTITY,
                StoreForm::default(),
                form,
                Notice::error(e.to_string()),
            )
            .await;
        }
    };

    match state.backend().create_delivery(&input).await {
        Ok(delivery) => {
            tracing::info!(
                delivery_id = %delivery.id,
                store_id = %delivery.store_id,
                "Delivery recorded"
            );
            Ok(Redirect::to("/?notice=delivery_created").into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, store_id = %input.store_id, "Failed to record delivery");
            let message = match e {
                RepositoryError::Conflict(message) => message,
                _ => "Error al registrar la entrega. Por favor, intenta de nuevo.".to_string(),
            };
            rerender(
                &state,
                StatusCode::INTERNAL_SERVER_ERROR,
                StoreForm::default(),
                form,
                Notice::error(message),
            )
            .await
        }
    }
}

/// Delete one delivery.
///
/// POST /deliveries/{id}/delete
#[instrument(skip(state))]
async fn delete_delivery(State(state): State<AppState>, Path(id): Path<i32>) -> Redirect {
    let id = DeliveryId::new(id);
    match state.backend().delete_delivery(id).await {
        Ok(true) => {
            tracing::info!(delivery_id = %id, "Delivery deleted");
            Redirect::to("/?notice=delivery_deleted")
        }
        Ok(false) => {
            tracing::warn!(delivery_id = %id, "Delivery to delete not found");
            Redirect::to("/?error=delivery_delete_failed")
        }
        Err(e) => {
            tracing::error!(error = %e, delivery_id = %id, "Failed to delete delivery");
            Redirect::to("/?error=delivery_delete_failed")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_store_view_fallbacks_and_selection() {
        let store = Store {
            id: StoreId::new(3),
            nickname: "Esquina".to_string(),
            name: "Abarrotes".to_string(),
            address: "Centro".to_string(),
            contact: None,
            visit_date: None,
        };
        let view = StoreView::new(&store, "3");
        assert_eq!(view.contact, "N/A");
        assert_eq!(view.visit_date, "N/A");
        assert!(view.selected);
        assert!(!StoreView::new(&store, "").selected);
    }

    #[test]
    fn test_panel_renders_summary_and_confirmations() {
        let stores = vec![Store {
            id: StoreId::new(1),
            nickname: "A".to_string(),
            name: "A".to_string(),
            address: "Centro".to_string(),
            contact: Some("Ana".to_string()),
            visit_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        }];
        let deliveries = vec![Delivery {
            id: DeliveryId::new(11),
            store_id: StoreId::new(1),
            quantity_left: Some(8),
            amount_owed: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            notes: None,
        }];
        let html = PanelData { stores, deliveries }
            .into_template(StoreForm::default(), DeliveryForm::default(), None, None)
            .render()
            .unwrap();

        assert!(html.contains("Panel Karam Bolis Gourmet"));
        assert!(html.contains("2024-01-02"));
        assert!(html.contains("/deliveries?storeId=1"));
        assert!(html.contains("/edit-store?storeId=1"));
        assert!(html.contains("/deliveries/11/delete"));
        assert!(html.contains("data-confirm"));
    }
}
