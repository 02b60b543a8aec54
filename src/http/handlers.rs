use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::engagement::{ShareOutcome, SharePlatform};
use crate::domain::post::{MediaFilter, Post, PostDraft, PostView};
use crate::http::AppError;
use crate::AppState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub filter: Option<String>,
}

#[derive(Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
}

fn parse_filter(filter: Option<String>) -> Result<MediaFilter, AppError> {
    match filter.as_deref() {
        None | Some("all") => Ok(MediaFilter::All),
        Some("images") => Ok(MediaFilter::Images),
        Some("videos") => Ok(MediaFilter::Videos),
        Some(_) => Err(AppError::bad_request(
            "filter must be one of all, images, videos",
        )),
    }
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.store.ping().await.is_ok();
    let status = if store { "ok" } else { "degraded" };

    Json(HealthResponse { status })
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<PostView>>, AppError> {
    let filter = parse_filter(query.filter)?;

    state.posts.load_all().await;
    let items = state
        .posts
        .filtered(filter)
        .await
        .into_iter()
        .map(PostView::from)
        .collect();

    Ok(Json(ListResponse { items }))
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<PostDraft>,
) -> Result<(StatusCode, Json<PostView>), AppError> {
    let post = state
        .posts
        .create(payload)
        .await
        .map_err(|err| AppError::from_repo(err, "create post"))?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

pub async fn get_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PostView>, AppError> {
    match state.posts.find(&id).await {
        Some(post) => Ok(Json(post.into())),
        None => Err(AppError::not_found("post not found")),
    }
}

pub async fn update_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<Post>,
) -> Result<Json<PostView>, AppError> {
    if payload.id != id {
        return Err(AppError::bad_request("post id does not match path"));
    }

    let post = state
        .posts
        .update(payload)
        .await
        .map_err(|err| AppError::from_repo(err, "update post"))?;

    Ok(Json(post.into()))
}

pub async fn delete_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state
        .posts
        .delete(&id)
        .await
        .map_err(|err| AppError::from_repo(err, "delete post"))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn like_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PostView>, AppError> {
    let post = state
        .posts
        .like(&id)
        .await
        .map_err(|err| AppError::from_repo(err, "like post"))?;

    Ok(Json(post.into()))
}

pub async fn view_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PostView>, AppError> {
    let post = state
        .posts
        .increment_views(&id)
        .await
        .map_err(|err| AppError::from_repo(err, "count view"))?;

    Ok(Json(post.into()))
}

#[derive(Deserialize)]
pub struct ShareRequest {
    pub platform: String,
}

#[derive(Serialize)]
pub struct ShareResponse {
    pub post: PostView,
    pub share: ShareOutcome,
}

pub async fn share_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<ShareRequest>,
) -> Result<Json<ShareResponse>, AppError> {
    let platform: SharePlatform = payload.platform.parse().map_err(AppError::bad_request)?;

    let (post, share) = state
        .posts
        .record_share(&id, platform)
        .await
        .map_err(|err| AppError::from_repo(err, "share post"))?;

    Ok(Json(ShareResponse {
        post: post.into(),
        share,
    }))
}

#[derive(Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
}

pub async fn comment_post(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<CommentRequest>,
) -> Result<(StatusCode, Json<PostView>), AppError> {
    let post = state
        .posts
        .add_comment(&id, &payload.name, &payload.text)
        .await
        .map_err(|err| AppError::from_repo(err, "comment"))?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

pub async fn delete_comment(
    Path((post_id, comment_id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<PostView>, AppError> {
    let post = state
        .posts
        .delete_comment(&post_id, &comment_id)
        .await
        .map_err(|err| AppError::from_repo(err, "delete comment"))?;

    Ok(Json(post.into()))
}
