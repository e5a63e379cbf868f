use crate::database::{run_blocking, sessions, SqlitePool};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use domain::{DomainError, Session, SessionRepository, SessionToken};

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct SessionModel {
    token: String,
    username: String,
    created_at: NaiveDateTime,
}

impl From<SessionModel> for Session {
    fn from(model: SessionModel) -> Self {
        Session {
            token: SessionToken::from(model.token),
            username: model.username,
            created_at: model.created_at.and_utc(),
        }
    }
}

impl From<&Session> for SessionModel {
    fn from(session: &Session) -> Self {
        SessionModel {
            token: session.token.as_str().to_string(),
            username: session.username.clone(),
            created_at: session.created_at.naive_utc(),
        }
    }
}

pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn find(&self, token: &SessionToken) -> Result<Option<Session>, DomainError> {
        let token = token.as_str().to_string();
        let result = run_blocking(&self.pool, move |conn| {
            sessions::table
                .find(token)
                .select(SessionModel::as_select())
                .first::<SessionModel>(conn)
                .optional()
        })
        .await?;

        Ok(result.map(|model| model.into()))
    }

    async fn upsert(&self, session: &Session) -> Result<(), DomainError> {
        let model = SessionModel::from(session);

        run_blocking(&self.pool, move |conn| {
            diesel::insert_into(sessions::table)
                .values(&model)
                .on_conflict(sessions::token)
                .do_update()
                .set((
                    sessions::username.eq(&model.username),
                    sessions::created_at.eq(model.created_at),
                ))
                .execute(conn)
        })
        .await?;

        Ok(())
    }

    async fn delete(&self, token: &SessionToken) -> Result<(), DomainError> {
        let token = token.as_str().to_string();
        run_blocking(&self.pool, move |conn| {
            diesel::delete(sessions::table.find(token)).execute(conn)
        })
        .await?;

        Ok(())
    }
}
