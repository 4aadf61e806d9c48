use log::trace;
use sqlx::SqliteConnection;

use crate::db_types::{MailSendHistory, NewMailSendHistory};

pub async fn insert_mail_history(
    history: NewMailSendHistory,
    conn: &mut SqliteConnection,
) -> Result<MailSendHistory, sqlx::Error> {
    let inserted: Vec<MailSendHistory> = sqlx::query_as(
        r#"
            INSERT INTO mail_send_histories (from_email, to_email, subject, content)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(history.from_email)
    .bind(history.to_email)
    .bind(history.subject)
    .bind(history.content)
    .fetch_all(conn)
    .await?;
    let record = inserted.into_iter().next().ok_or(sqlx::Error::RowNotFound)?;
    trace!("📧️ Mail history #{} recorded for {}", record.id, record.to_email);
    Ok(record)
}

pub async fn fetch_mail_histories(conn: &mut SqliteConnection) -> Result<Vec<MailSendHistory>, sqlx::Error> {
    let records = sqlx::query_as("SELECT * FROM mail_send_histories ORDER BY id ASC").fetch_all(conn).await?;
    Ok(records)
}
