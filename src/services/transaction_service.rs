use crate::error::AppResult;
use crate::models::*;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Append one ledger row. Generic over the executor so purchases can write
/// it inside the same transaction as the rows it pays for.
pub async fn record_transaction<'e, E>(
    executor: E,
    user_id: i64,
    transaction_type: TransactionType,
    status: TransactionStatus,
    amount_cents: i64,
    description: Option<String>,
) -> AppResult<Transaction>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let row = sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (user_id, reference, transaction_type, status, amount_cents, description)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, reference, transaction_type, status, amount_cents, description, created_at
        "#,
    )
    .bind(user_id)
    .bind(Uuid::new_v4())
    .bind(transaction_type)
    .bind(status)
    .bind(amount_cents)
    .bind(description)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

#[derive(Clone)]
pub struct TransactionService {
    pool: PgPool,
}

impl TransactionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn history(
        &self,
        user_id: i64,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<TransactionResponse>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, user_id, reference, transaction_type, status, amount_cents, description, created_at
            FROM transactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(params.get_limit())
        .bind(params.get_offset())
        .fetch_all(&self.pool)
        .await?;

        let items: Vec<TransactionResponse> =
            rows.into_iter().map(TransactionResponse::from).collect();

        Ok(PaginatedResponse::new(items, params, total))
    }
}
