/*
 * Responsibility
 * - comments の request/response DTO
 * - `body` は任意の JSON 値を素通し。欠落 / null は "" (構造上の既定値)
 * - `body` 以外のフィールドも素通し (fields に保持して、そのまま返す)
 * - request の `id` は型を問わず読み捨てる (採番は storage)
 */
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::repos::{CommentInput, CommentRow, empty_body};

/// Body of POST / PUT. PUT is a full replacement, so a missing `body` becomes "".
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    #[serde(default, rename = "id")]
    _id: Option<Value>,
    #[serde(default = "empty_body", deserialize_with = "null_as_empty")]
    pub body: Value,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Default for CommentRequest {
    fn default() -> Self {
        Self {
            _id: None,
            body: empty_body(),
            fields: Map::new(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.unwrap_or_else(empty_body))
}

impl From<CommentRequest> for CommentInput {
    fn from(req: CommentRequest) -> Self {
        CommentInput {
            body: req.body,
            fields: req.fields,
        }
    }
}

/// A top-level `null` payload is an empty comment.
impl From<Option<CommentRequest>> for CommentInput {
    fn from(req: Option<CommentRequest>) -> Self {
        req.unwrap_or_default().into()
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: u64,
    pub body: Value,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl From<CommentRow> for CommentResponse {
    fn from(row: CommentRow) -> Self {
        CommentResponse {
            id: row.id,
            body: row.body,
            fields: row.fields,
        }
    }
}
