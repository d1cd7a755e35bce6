//! Layout engine endpoints. Every engine call is CPU-bound and runs on the
//! blocking pool; handlers only validate, resolve styles and shape responses.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::extract::extract_record;
use crate::format::{apply_palette, apply_style_delta, reorder_sections, StyleDelta};
use crate::layout::{analyze_page_fill, flatten, paginate, render, PageFillAnalysis};
use crate::models::element::{Document, VisualElement};
use crate::models::resume::ResumeRecord;
use crate::models::style::{ColorScheme, StyleConfig};
use crate::semantic::add_inferred_tags;
use crate::semantic::vocabulary::SemanticCategory;
use crate::state::AppState;
use crate::templates::{switch_template, TemplateRef};

const DEFAULT_BACKGROUND: &str = "#ffffff";

// ────────────────────────────────────────────────────────────────────────────
// Request / response shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub record: ResumeRecord,
    #[serde(default)]
    pub style: Option<StyleConfig>,
    #[serde(default)]
    pub template: Option<TemplateRef>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub objects: Vec<VisualElement>,
    pub page_fill: PageFillAnalysis,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectsRequest {
    #[serde(default)]
    pub objects: Vec<VisualElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchRequest {
    #[serde(default)]
    pub objects: Vec<VisualElement>,
    #[serde(default)]
    pub style: Option<StyleConfig>,
    #[serde(default)]
    pub template: Option<TemplateRef>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectsResponse {
    pub objects: Vec<VisualElement>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedResponse {
    pub objects: Vec<VisualElement>,
    pub changed: usize,
}

/// Old and new palettes for a whole-canvas color swap.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteSwap {
    pub from: ColorScheme,
    pub to: ColorScheme,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRequest {
    #[serde(default)]
    pub objects: Vec<VisualElement>,
    #[serde(default)]
    pub delta: StyleDelta,
    #[serde(default)]
    pub palette: Option<PaletteSwap>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    #[serde(default)]
    pub objects: Vec<VisualElement>,
    pub order: Vec<SemanticCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginateRequest {
    #[serde(default)]
    pub objects: Vec<VisualElement>,
    #[serde(default)]
    pub background: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn check_size(state: &AppState, objects: &[VisualElement]) -> Result<(), AppError> {
    if objects.len() > state.config.max_elements {
        return Err(AppError::Validation(format!(
            "Too many objects: {} (limit {})",
            objects.len(),
            state.config.max_elements
        )));
    }
    Ok(())
}

/// An explicit style wins; otherwise the template (or the catalog default).
fn resolve_style(
    state: &AppState,
    style: Option<StyleConfig>,
    template: Option<TemplateRef>,
) -> Result<StyleConfig, AppError> {
    match (style, template) {
        (Some(_), Some(_)) => Err(AppError::Validation(
            "Pass either style or template, not both".to_string(),
        )),
        (Some(style), None) => Ok(style),
        (None, template) => state.catalog.resolve(&template.unwrap_or_default()),
    }
}

async fn run_blocking<T, F>(operation: &'static str, f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in {operation}: {e}"))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let listing = serde_json::to_value(state.catalog.listing()).map_err(anyhow::Error::from)?;
    Ok(Json(listing))
}

/// POST /api/v1/layout/render
pub async fn handle_render(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, AppError> {
    let style = resolve_style(&state, req.style, req.template)?;
    let record = req.record;
    let response = run_blocking("render", move || {
        let objects = render(&record, &style);
        let page_fill = analyze_page_fill(&objects);
        RenderResponse { objects, page_fill }
    })
    .await?;
    debug!(
        objects = response.objects.len(),
        pages = response.page_fill.pages_used,
        "rendered record"
    );
    Ok(Json(response))
}

/// POST /api/v1/layout/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ObjectsRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    check_size(&state, &req.objects)?;
    let record = run_blocking("extract", move || extract_record(&req.objects)).await?;
    Ok(Json(record))
}

/// POST /api/v1/layout/switch
pub async fn handle_switch(
    State(state): State<AppState>,
    Json(req): Json<SwitchRequest>,
) -> Result<Json<ObjectsResponse>, AppError> {
    check_size(&state, &req.objects)?;
    let style = resolve_style(&state, req.style, req.template)?;
    let objects = req.objects;
    let objects = run_blocking("switch", move || switch_template(&objects, &style)).await?;
    Ok(Json(ObjectsResponse { objects }))
}

/// POST /api/v1/layout/infer
pub async fn handle_infer(
    State(state): State<AppState>,
    Json(req): Json<ObjectsRequest>,
) -> Result<Json<ChangedResponse>, AppError> {
    check_size(&state, &req.objects)?;
    let mut objects = req.objects;
    let response = run_blocking("infer", move || {
        let changed = add_inferred_tags(&mut objects);
        ChangedResponse { objects, changed }
    })
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/layout/style
pub async fn handle_style(
    State(state): State<AppState>,
    Json(req): Json<StyleRequest>,
) -> Result<Json<ChangedResponse>, AppError> {
    check_size(&state, &req.objects)?;
    let StyleRequest {
        mut objects,
        delta,
        palette,
    } = req;
    let response = run_blocking("style", move || {
        let mut changed = 0;
        if let Some(swap) = palette {
            changed += apply_palette(&mut objects, &swap.from, &swap.to);
        }
        changed += apply_style_delta(&mut objects, &delta);
        ChangedResponse { objects, changed }
    })
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/layout/reorder
pub async fn handle_reorder(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<ChangedResponse>, AppError> {
    check_size(&state, &req.objects)?;
    if req.order.is_empty() {
        return Err(AppError::Validation("order must name at least one section".to_string()));
    }
    let ReorderRequest { mut objects, order } = req;
    let response = run_blocking("reorder", move || {
        let changed = reorder_sections(&mut objects, &order);
        ChangedResponse { objects, changed }
    })
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/layout/paginate
pub async fn handle_paginate(
    State(state): State<AppState>,
    Json(req): Json<PaginateRequest>,
) -> Result<Json<Document>, AppError> {
    check_size(&state, &req.objects)?;
    let background = req
        .background
        .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string());
    let objects = req.objects;
    let document = run_blocking("paginate", move || paginate(&objects, &background)).await?;
    Ok(Json(document))
}

/// POST /api/v1/layout/flatten
///
/// Inverse of `/paginate`: joins a `{ pages }` document back into one canvas.
pub async fn handle_flatten(
    State(state): State<AppState>,
    Json(document): Json<Document>,
) -> Result<Json<ObjectsResponse>, AppError> {
    let total: usize = document.pages.iter().map(|p| p.objects.len()).sum();
    if total > state.config.max_elements {
        return Err(AppError::Validation(format!(
            "Too many objects: {total} (limit {})",
            state.config.max_elements
        )));
    }
    let objects = run_blocking("flatten", move || flatten(&document)).await?;
    Ok(Json(ObjectsResponse { objects }))
}
