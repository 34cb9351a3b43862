/*
 * Responsibility
 * - comments テーブル向け SQLx 操作
 * - PgPool を受け取り CommentRepo を実装
 * - id は BIGSERIAL (i64)。u64 に収まらない id は存在しないものとして扱う
 */
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool, types::Json};

use crate::repos::{
    comment_repo::{CommentInput, CommentRepo, CommentRow},
    error::RepoError,
};

#[derive(Debug, FromRow)]
struct PgCommentRow {
    id: i64,
    body: Json<Value>,
    fields: Json<Map<String, Value>>,
}

impl TryFrom<PgCommentRow> for CommentRow {
    type Error = RepoError;

    fn try_from(row: PgCommentRow) -> Result<Self, Self::Error> {
        let id = u64::try_from(row.id).map_err(|_| RepoError::IdOutOfRange(row.id))?;
        Ok(CommentRow {
            id,
            body: row.body.0,
            fields: row.fields.0,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PgCommentRepo {
    db: PgPool,
}

impl PgCommentRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Apply embedded migrations (`migrations/`).
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.db).await
    }
}

#[async_trait]
impl CommentRepo for PgCommentRepo {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, input: CommentInput) -> Result<CommentRow, RepoError> {
        let row = sqlx::query_as::<_, PgCommentRow>(
            r#"
            INSERT INTO comments (body, fields)
            VALUES ($1, $2)
            RETURNING id, body, fields
            "#,
        )
        .bind(Json(&input.body))
        .bind(Json(&input.fields))
        .fetch_one(&self.db)
        .await?;

        row.try_into()
    }

    async fn get(&self, id: u64) -> Result<Option<CommentRow>, RepoError> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, PgCommentRow>(
            r#"
            SELECT id, body, fields
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.map(CommentRow::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<CommentRow>, RepoError> {
        let rows = sqlx::query_as::<_, PgCommentRow>(
            r#"
            SELECT id, body, fields
            FROM comments
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(CommentRow::try_from).collect()
    }

    async fn update(&self, id: u64, input: CommentInput) -> Result<Option<CommentRow>, RepoError> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };

        // full replacement: every column is overwritten, no COALESCE
        let row = sqlx::query_as::<_, PgCommentRow>(
            r#"
            UPDATE comments
            SET
                body = $2,
                fields = $3,
                updated_at = now()
            WHERE id = $1
            RETURNING id, body, fields
            "#,
        )
        .bind(id)
        .bind(Json(&input.body))
        .bind(Json(&input.fields))
        .fetch_optional(&self.db)
        .await?;

        row.map(CommentRow::try_from).transpose()
    }

    async fn delete(&self, id: u64) -> Result<bool, RepoError> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(false);
        };

        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn input(body: Value, fields: Value) -> CommentInput {
        CommentInput {
            body,
            fields: serde_json::from_value(fields).unwrap(),
        }
    }

    #[test]
    fn stored_row_converts_to_comment_row() {
        let row = PgCommentRow {
            id: 3,
            body: Json(json!("hi")),
            fields: Json(serde_json::from_value(json!({ "author": "ann" })).unwrap()),
        };

        let row = CommentRow::try_from(row).unwrap();
        assert_eq!(row.id, 3);
        assert_eq!(row.body, "hi");
        assert_eq!(row.fields.get("author"), Some(&json!("ann")));
    }

    #[test]
    fn negative_id_is_out_of_range() {
        let row = PgCommentRow {
            id: -1,
            body: Json(json!("")),
            fields: Json(Map::new()),
        };

        assert!(matches!(
            CommentRow::try_from(row),
            Err(RepoError::IdOutOfRange(-1))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore] // Requires Postgres via DATABASE_URL
    async fn update_replaces_every_column(pool: PgPool) {
        let repo = PgCommentRepo::new(pool);

        let created = repo
            .create(input(json!("first"), json!({ "author": "ann" })))
            .await
            .unwrap();
        let replaced = repo
            .update(created.id, input(json!({ "text": "second" }), json!({})))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(replaced.body, json!({ "text": "second" }));
        assert!(replaced.fields.is_empty());
        assert_eq!(repo.get(created.id).await.unwrap(), Some(replaced));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore] // Requires Postgres via DATABASE_URL
    async fn list_is_ordered_and_missing_rows_are_reported(pool: PgPool) {
        let repo = PgCommentRepo::new(pool);
        for body in ["a", "b", "c"] {
            repo.create(input(json!(body), json!({}))).await.unwrap();
        }

        let bodies: Vec<Value> = repo.list().await.unwrap().into_iter().map(|r| r.body).collect();
        assert_eq!(bodies, vec![json!("a"), json!("b"), json!("c")]);

        assert_eq!(repo.get(9_999).await.unwrap(), None);
        assert_eq!(repo.update(9_999, input(json!("x"), json!({}))).await.unwrap(), None);
        assert!(!repo.delete(9_999).await.unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore] // Requires Postgres via DATABASE_URL
    async fn ids_beyond_bigint_do_not_exist(pool: PgPool) {
        let repo = PgCommentRepo::new(pool);
        let too_big = i64::MAX as u64 + 1;

        assert_eq!(repo.get(too_big).await.unwrap(), None);
        assert_eq!(repo.update(too_big, input(json!("x"), json!({}))).await.unwrap(), None);
        assert!(!repo.delete(too_big).await.unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore] // Requires Postgres via DATABASE_URL
    async fn deleted_row_is_gone(pool: PgPool) {
        let repo = PgCommentRepo::new(pool);
        let created = repo.create(input(json!("bye"), json!({}))).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert_eq!(repo.get(created.id).await.unwrap(), None);
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
