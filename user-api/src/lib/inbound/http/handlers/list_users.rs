use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::UserSort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn list_users<S: UserServicePort>(
    State(state): State<AppState<S>>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    state
        .user_service
        .list_users()
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.iter().map(UserData::from).collect()))
}

pub async fn list_users_page<S: UserServicePort>(
    State(state): State<AppState<S>>,
    Query(params): Query<PageParams>,
) -> Result<ApiSuccess<PageData>, ApiError> {
    let request = params.try_into_request()?;

    let page = state
        .user_service
        .list_users_page(&request)
        .await
        .map_err(ApiError::from)?;

    let total_pages = page.total_pages();
    let page = page.map(|user| UserData::from(&user));

    Ok(ApiSuccess::new(
        StatusCode::OK,
        PageData {
            items: page.items,
            page: page.page,
            size: page.size,
            total_items: page.total_items,
            total_pages,
        },
    ))
}

/// Query string of the paged listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    page: Option<u32>,
    size: Option<u32>,
    sort: Option<String>,
}

impl PageParams {
    fn try_into_request(self) -> Result<PageRequest, UserError> {
        let sort = match self.sort.as_deref() {
            Some(sort) if !sort.trim().is_empty() => UserSort::parse(sort)?,
            _ => UserSort::default(),
        };

        Ok(PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(PageRequest::DEFAULT_SIZE),
            sort,
        )?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageData {
    pub items: Vec<UserData>,
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}
