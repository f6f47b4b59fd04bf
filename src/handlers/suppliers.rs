//! Supplier handlers: create, read, update, delete, list, name lookup, search.

use crate::error::AppError;
use crate::model::{PageRequest, SupplierDto, SupplierFilter, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::response::Paginated;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

fn parse_body<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    if !value.is_object() {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    }
    serde_json::from_value(value).map_err(|e| AppError::BadRequest(format!("invalid body: {}", e)))
}

fn query_param<T: FromStr>(params: &HashMap<String, String>, key: &str) -> Result<Option<T>, AppError> {
    match params.get(key).map(|v| v.trim()) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("invalid {} '{}'", key, v))),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest {
        page: query_param(&params, "page")?.unwrap_or(DEFAULT_PAGE),
        page_size: query_param(&params, "pageSize")?.unwrap_or(DEFAULT_PAGE_SIZE),
    };
    let page = state.suppliers.list(page).await?;
    Ok((StatusCode::OK, Json(Paginated::<SupplierDto>::from(page))))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let supplier = state.suppliers.get(id).await?;
    Ok((StatusCode::OK, Json(SupplierDto::from(supplier))))
}

pub async fn by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.suppliers.search_by_name(&name).await?;
    let dtos: Vec<SupplierDto> = rows.into_iter().map(SupplierDto::from).collect();
    Ok((StatusCode::OK, Json(dtos)))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = SupplierFilter {
        name: params.get("name").cloned(),
        country: params.get("country").cloned(),
        min_annual_billing: query_param::<Decimal>(&params, "minAnnualBilling")?,
        max_annual_billing: query_param::<Decimal>(&params, "maxAnnualBilling")?,
    };
    let rows = state.suppliers.search(filter).await?;
    let dtos: Vec<SupplierDto> = rows.into_iter().map(SupplierDto::from).collect();
    Ok((StatusCode::OK, Json(dtos)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let body = parse_body(body)?;
    let created = state.suppliers.create(body).await?;
    let location = format!("/suppliers/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(SupplierDto::from(created)),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let body = parse_body(body)?;
    state.suppliers.update(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.suppliers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
