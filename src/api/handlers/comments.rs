/*
 * Responsibility
 * - /comment 系 CRUD handler
 * - Path の {id} は CommentId extractor で u64 に変換して受け取る
 * - body は JsonBody で decode → DTO → service 呼び出し
 * - 失敗は AppError に寄せる (status / envelope は error.rs で決まる)
 */
use axum::{extract::State, response::Response};

use crate::{
    api::{
        dto::comments::{CommentRequest, CommentResponse},
        extractors::{CommentId, JsonBody},
    },
    error::AppError,
    response::{self, Envelope},
    state::AppState,
};

pub async fn get_comment(
    State(state): State<AppState>,
    CommentId(id): CommentId,
) -> Result<Response, AppError> {
    let row = state
        .comments
        .get_comment(id)
        .await
        .map_err(|e| AppError::from_service("Error retrieving comment by id", e))?;

    Ok(response::ok(&CommentResponse::from(row)))
}

pub async fn get_all_comments(State(state): State<AppState>) -> Result<Response, AppError> {
    let rows = state
        .comments
        .get_all_comments()
        .await
        .map_err(|e| AppError::from_service("Error retrieving all comments", e))?;

    let res: Vec<CommentResponse> = rows.into_iter().map(CommentResponse::from).collect();
    Ok(response::ok(&res))
}

pub async fn post_comment(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<Option<CommentRequest>>,
) -> Result<Response, AppError> {
    let row = state
        .comments
        .post_comment(req.into())
        .await
        .map_err(|e| AppError::from_service("Error posting comment", e))?;

    Ok(response::ok(&CommentResponse::from(row)))
}

pub async fn update_comment(
    State(state): State<AppState>,
    CommentId(id): CommentId,
    JsonBody(req): JsonBody<Option<CommentRequest>>,
) -> Result<Response, AppError> {
    let row = state
        .comments
        .update_comment(id, req.into())
        .await
        .map_err(|e| AppError::from_service("Error updating comment", e))?;

    Ok(response::ok(&CommentResponse::from(row)))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    CommentId(id): CommentId,
) -> Result<Response, AppError> {
    state
        .comments
        .delete_comment(id)
        .await
        .map_err(|e| AppError::from_service("Error deleting comment", e))?;

    Ok(response::ok(&Envelope::message("Comment deleted successfully")))
}
