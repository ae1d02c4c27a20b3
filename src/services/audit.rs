use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Set};
use serde_json::Value;
use uuid::Uuid;

use crate::entities::audit_log::{self, AuditAction};

/// Append one change record. Called inside the same transaction as the
/// mutation it describes so the trail commits or rolls back with it.
pub async fn record<C: ConnectionTrait>(
    conn: &C,
    table_name: &str,
    record_id: Uuid,
    action: AuditAction,
    old_values: Option<Value>,
    new_values: Option<Value>,
    changed_by: Option<Uuid>,
) -> Result<(), DbErr> {
    audit_log::ActiveModel {
        id: Set(Uuid::new_v4()),
        table_name: Set(table_name.to_string()),
        record_id: Set(record_id),
        action: Set(action),
        old_values: Set(old_values),
        new_values: Set(new_values),
        changed_by: Set(changed_by),
        created_at: Set(Utc::now()),
    }
    .insert(conn)
    .await?;

    Ok(())
}
