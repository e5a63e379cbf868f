use config::AppConfig;
use domain::*;
use infrastructure::*;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Anime review application - wires repositories, services and the upstream catalog
pub struct AnimeReviewApp {
    pub user_service: UserService,
    pub review_service: ReviewService,
    pub session_service: SessionService,
    pub catalog: Arc<dyn AnimeCatalog>,
}

/// Upstream document for one anime plus the local reviews for it.
#[derive(Debug, Serialize)]
pub struct AnimePage {
    pub anime: Value,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Serialize)]
pub struct Profile {
    pub user: User,
    pub reviews: Vec<Review>,
}

impl AnimeReviewApp {
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        // Infrastructure layer - database setup
        let database = Database::new(&config.database_path)?;
        database.run_migrations()?;

        let catalog: Arc<dyn AnimeCatalog> = Arc::new(JikanClient::new(
            &config.upstream_api_url,
            config.upstream_timeout(),
        )?);

        info!(
            "Using database {} and upstream {}",
            config.database_path, config.upstream_api_url
        );

        Ok(Self::with_parts(
            &database,
            catalog,
            CredentialService::new(config.bcrypt_cost),
        ))
    }

    pub fn with_parts(
        database: &Database,
        catalog: Arc<dyn AnimeCatalog>,
        credentials: CredentialService,
    ) -> Self {
        let pool = database.get_pool().clone();

        // Create repository implementations
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(SqliteUserRepository::new(pool.clone()));
        let review_repository: Arc<dyn ReviewRepository> =
            Arc::new(SqliteReviewRepository::new(pool.clone()));
        let session_repository: Arc<dyn SessionRepository> =
            Arc::new(SqliteSessionRepository::new(pool));

        // Domain services
        let user_service = UserService::new(user_repository.clone(), credentials);
        let review_service = ReviewService::new(review_repository);
        let session_service = SessionService::new(session_repository, user_repository);

        Self {
            user_service,
            review_service,
            session_service,
            catalog,
        }
    }

    /// Signup logs the new user in on the current session.
    pub async fn sign_up(
        &self,
        current: Option<&SessionToken>,
        form: SignupForm,
    ) -> Result<(User, SessionToken), DomainError> {
        let user = self.user_service.register(form).await?;
        let token = self.session_service.login(current, &user).await?;
        Ok((user, token))
    }

    /// `Ok(None)` for bad credentials, whatever the reason.
    pub async fn log_in(
        &self,
        current: Option<&SessionToken>,
        form: LoginForm,
    ) -> Result<Option<(User, SessionToken)>, DomainError> {
        match self.user_service.login(form).await? {
            Some(user) => {
                let token = self.session_service.login(current, &user).await?;
                Ok(Some((user, token)))
            }
            None => Ok(None),
        }
    }

    pub async fn anime_page(&self, anime_id: i32) -> Result<AnimePage, DomainError> {
        let anime = self.catalog.anime_by_id(anime_id).await?;
        let reviews = self.review_service.reviews_for_anime(anime_id).await?;
        Ok(AnimePage { anime, reviews })
    }

    pub async fn profile(&self, username: &str) -> Result<Profile, DomainError> {
        let user = self.user_service.get_user(username).await?;
        let reviews = self.review_service.reviews_by_user(username).await?;
        Ok(Profile { user, reviews })
    }

    /// Upstream search restricted to the user's liked genres.
    pub async fn recommendations(&self, user: &User, page: u32) -> Result<Value, DomainError> {
        let params = SearchParams::by_genres(user.favorite_genres(), page);
        self.catalog.search(&params).await
    }
}
