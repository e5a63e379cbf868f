use crate::database::{run_blocking, users, SqlitePool};
use async_trait::async_trait;
use diesel::prelude::*;
use domain::list_encoding;
use domain::{DomainError, NewUser, User, UserChanges, UserRepository};

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct UserModel {
    username: String,
    password: String,
    first_name: String,
    last_name: String,
    email: String,
    liked_genres: String,
    liked_va: Option<String>,
    bookmarks: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
struct NewUserModel {
    username: String,
    password: String,
    first_name: String,
    last_name: String,
    email: String,
    liked_genres: String,
    liked_va: Option<String>,
    bookmarks: Option<String>,
}

// Convert between domain and database models
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            liked_genres: list_encoding::decode_ids(Some(&model.liked_genres)),
            liked_va: list_encoding::decode(model.liked_va.as_deref()),
            bookmarks: list_encoding::decode(model.bookmarks.as_deref()),
            username: model.username,
            password: model.password,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
        }
    }
}

impl From<&NewUser> for NewUserModel {
    fn from(user: &NewUser) -> Self {
        NewUserModel {
            username: user.username.clone(),
            password: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            liked_genres: list_encoding::encode_ids(&user.liked_genres),
            liked_va: None,
            bookmarks: None,
        }
    }
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let username = username.to_string();
        let result = run_blocking(&self.pool, move |conn| {
            users::table
                .find(username)
                .select(UserModel::as_select())
                .first::<UserModel>(conn)
                .optional()
        })
        .await?;

        Ok(result.map(|model| model.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email = email.to_string();
        let result = run_blocking(&self.pool, move |conn| {
            users::table
                .filter(users::email.eq(email))
                .select(UserModel::as_select())
                .first::<UserModel>(conn)
                .optional()
        })
        .await?;

        Ok(result.map(|model| model.into()))
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let new_user = NewUserModel::from(user);
        let username = new_user.username.clone();

        // A single INSERT: a unique violation leaves nothing behind
        let result = run_blocking(&self.pool, move |conn| {
            diesel::insert_into(users::table)
                .values(&new_user)
                .execute(conn)?;

            users::table
                .find(username)
                .select(UserModel::as_select())
                .first::<UserModel>(conn)
        })
        .await?;

        Ok(result.into())
    }

    async fn update_profile(
        &self,
        username: &str,
        changes: &UserChanges,
    ) -> Result<User, DomainError> {
        let username = username.to_string();
        let changes = changes.clone();

        let result = run_blocking(&self.pool, move |conn| {
            conn.transaction(|conn| {
                let current = users::table
                    .find(&username)
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)?;

                let new_username = changes.username.unwrap_or(current.username);
                diesel::update(users::table.find(&username))
                    .set((
                        users::username.eq(&new_username),
                        users::email.eq(changes.email.unwrap_or(current.email)),
                        users::first_name.eq(changes.first_name.unwrap_or(current.first_name)),
                        users::last_name.eq(changes.last_name.unwrap_or(current.last_name)),
                    ))
                    .execute(conn)?;

                // Reviews and sessions follow the rename via ON UPDATE CASCADE
                users::table
                    .find(&new_username)
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)
            })
        })
        .await?;

        Ok(result.into())
    }

    async fn set_bookmarks(&self, username: &str, bookmarks: &[String]) -> Result<User, DomainError> {
        let username = username.to_string();
        let stored = list_encoding::encode_optional(bookmarks);

        let result = run_blocking(&self.pool, move |conn| {
            let updated = diesel::update(users::table.find(&username))
                .set(users::bookmarks.eq(stored))
                .execute(conn)?;

            if updated == 0 {
                return Err(diesel::result::Error::NotFound);
            }

            users::table
                .find(&username)
                .select(UserModel::as_select())
                .first::<UserModel>(conn)
        })
        .await?;

        Ok(result.into())
    }

    async fn delete(&self, username: &str) -> Result<(), DomainError> {
        let username = username.to_string();
        run_blocking(&self.pool, move |conn| {
            diesel::delete(users::table.find(username)).execute(conn)
        })
        .await?;

        Ok(())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        run_blocking(&self.pool, |conn| users::table.count().get_result::<i64>(conn)).await
    }
}
