/// End-to-end application tests against in-memory SQLite and a stub catalog
///
/// Tests cover:
/// - Signup uniqueness scenarios
/// - Login/logout session transitions
/// - Reviews and bookmarks
/// - Upstream failures
use application::AnimeReviewApp;
use async_trait::async_trait;
use domain::{
    AnimeCatalog, BookmarkChange, CredentialService, DomainError, Genre, LoginForm,
    ProfileEditForm, ReviewForm, SearchParams, SessionState, SignupForm, UserRepository,
};
use infrastructure::{Database, SqliteUserRepository};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct StubCatalog {
    searches: Mutex<Vec<SearchParams>>,
}

#[async_trait]
impl AnimeCatalog for StubCatalog {
    async fn anime_by_id(&self, anime_id: i32) -> Result<Value, DomainError> {
        Ok(json!({"data": {"mal_id": anime_id, "title": "Stub"}}))
    }

    async fn search(&self, params: &SearchParams) -> Result<Value, DomainError> {
        self.searches.lock().unwrap().push(params.clone());
        Ok(json!({"data": [], "pagination": {"current_page": params.page}}))
    }

    async fn featured(&self) -> Result<Value, DomainError> {
        Ok(json!({"data": []}))
    }

    async fn genres(&self) -> Result<Vec<Genre>, DomainError> {
        Ok(vec![Genre {
            id: 1,
            name: "Action".to_string(),
        }])
    }
}

struct DownCatalog;

#[async_trait]
impl AnimeCatalog for DownCatalog {
    async fn anime_by_id(&self, _anime_id: i32) -> Result<Value, DomainError> {
        Err(DomainError::UpstreamUnavailable("connection refused".to_string()))
    }

    async fn search(&self, _params: &SearchParams) -> Result<Value, DomainError> {
        Err(DomainError::UpstreamUnavailable("connection refused".to_string()))
    }

    async fn featured(&self) -> Result<Value, DomainError> {
        Err(DomainError::UpstreamUnavailable("connection refused".to_string()))
    }

    async fn genres(&self) -> Result<Vec<Genre>, DomainError> {
        Err(DomainError::UpstreamUnavailable("connection refused".to_string()))
    }
}

fn setup_with(catalog: Arc<dyn AnimeCatalog>) -> (AnimeReviewApp, SqliteUserRepository) {
    let database = Database::in_memory().unwrap();
    database.run_migrations().unwrap();
    let app = AnimeReviewApp::with_parts(&database, catalog, CredentialService::new(4));
    let users = SqliteUserRepository::new(database.get_pool().clone());
    (app, users)
}

fn setup() -> (AnimeReviewApp, SqliteUserRepository) {
    setup_with(Arc::new(StubCatalog::default()))
}

fn signup(username: &str, email: &str, genres: &[i32]) -> SignupForm {
    SignupForm {
        username: username.to_string(),
        password: "password123".to_string(),
        email: email.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        liked_genres: genres.to_vec(),
    }
}

#[tokio::test]
async fn signup_scenario_with_conflicts() {
    let (app, users) = setup();

    let (alice, _) = app
        .sign_up(None, signup("alice", "alice@x.com", &[1, 4]))
        .await
        .unwrap();
    assert_ne!(alice.password, "password123");
    assert_eq!(alice.favorite_genres(), [1, 4]);
    assert_eq!(users.count().await.unwrap(), 1);

    let same_name = app.sign_up(None, signup("alice", "other@x.com", &[1])).await;
    assert!(matches!(same_name, Err(DomainError::Conflict(_))));

    let same_email = app.sign_up(None, signup("bob", "alice@x.com", &[1])).await;
    assert!(matches!(same_email, Err(DomainError::Conflict(_))));

    assert_eq!(users.count().await.unwrap(), 1);
}

#[tokio::test]
async fn authenticate_succeeds_only_with_the_right_password() {
    let (app, _) = setup();
    app.sign_up(None, signup("alice", "alice@x.com", &[1]))
        .await
        .unwrap();

    let ok = app.user_service.authenticate("alice", "password123").await.unwrap();
    assert_eq!(ok.map(|u| u.username), Some("alice".to_string()));

    assert!(app.user_service.authenticate("alice", "password124").await.unwrap().is_none());
    assert!(app.user_service.authenticate("zed", "password123").await.unwrap().is_none());
}

#[tokio::test]
async fn login_then_logout_twice() {
    let (app, _) = setup();
    let (_, signup_token) = app
        .sign_up(None, signup("alice", "alice@x.com", &[1]))
        .await
        .unwrap();
    app.session_service.logout(Some(&signup_token)).await.unwrap();

    let form = LoginForm {
        username: "alice".to_string(),
        password: "password123".to_string(),
    };
    let (_, token) = app.log_in(None, form).await.unwrap().unwrap();
    assert_eq!(
        app.session_service.state(Some(&token)).await.unwrap(),
        SessionState::Authenticated("alice".to_string())
    );

    app.session_service.logout(Some(&token)).await.unwrap();
    assert_eq!(app.session_service.state(Some(&token)).await.unwrap(), SessionState::Anonymous);
    app.session_service.logout(Some(&token)).await.unwrap();
    assert_eq!(app.session_service.state(Some(&token)).await.unwrap(), SessionState::Anonymous);
}

#[tokio::test]
async fn wrong_password_login_is_none() {
    let (app, _) = setup();
    app.sign_up(None, signup("alice", "alice@x.com", &[1]))
        .await
        .unwrap();

    let form = LoginForm {
        username: "alice".to_string(),
        password: "not-it-at-all".to_string(),
    };
    assert!(app.log_in(None, form).await.unwrap().is_none());
}

#[tokio::test]
async fn review_without_comment_shows_on_anime_page() {
    let (app, _) = setup();
    app.sign_up(None, signup("bob", "bob@x.com", &[1]))
        .await
        .unwrap();

    let form = ReviewForm {
        rating: 8,
        comment: None,
    };
    let review = app.review_service.submit("bob", 5000, form).await.unwrap();
    assert_eq!(review.comment, "");

    let page = app.anime_page(5000).await.unwrap();
    assert_eq!(page.anime["data"]["mal_id"], 5000);
    assert_eq!(page.reviews, vec![review]);
}

#[tokio::test]
async fn bookmarks_round_trip_and_toggle() {
    let (app, _) = setup();
    app.sign_up(None, signup("bob", "bob@x.com", &[1]))
        .await
        .unwrap();

    let list = vec!["1".to_string(), "2".to_string(), "3".to_string()];
    app.user_service.set_bookmarks("bob", list).await.unwrap();
    let fresh = app.user_service.get_user("bob").await.unwrap();
    assert_eq!(fresh.bookmarked_anime(), ["1", "2", "3"]);

    let (user, change) = app.user_service.toggle_bookmark("bob", "2").await.unwrap();
    assert_eq!(change, BookmarkChange::Removed);
    assert_eq!(user.bookmarked_anime(), ["1", "3"]);

    let (user, change) = app.user_service.toggle_bookmark("bob", "2").await.unwrap();
    assert_eq!(change, BookmarkChange::Added);
    assert_eq!(user.bookmarked_anime(), ["1", "3", "2"]);
}

/// Known boundary: the bookmark list is one column, so two toggles that read
/// the same snapshot overwrite each other.
#[tokio::test]
async fn interleaved_toggles_lose_an_update() {
    let (app, _) = setup();
    app.sign_up(None, signup("bob", "bob@x.com", &[1]))
        .await
        .unwrap();

    let first_read = app.user_service.get_user("bob").await.unwrap();
    let second_read = app.user_service.get_user("bob").await.unwrap();

    let (first_list, _) = first_read.toggled_bookmarks("100");
    let (second_list, _) = second_read.toggled_bookmarks("200");
    app.user_service.set_bookmarks("bob", first_list).await.unwrap();
    app.user_service.set_bookmarks("bob", second_list).await.unwrap();

    let user = app.user_service.get_user("bob").await.unwrap();
    assert_eq!(user.bookmarked_anime(), ["200"]);
}

#[tokio::test]
async fn rename_keeps_session_and_reviews() {
    let (app, _) = setup();
    let (_, token) = app
        .sign_up(None, signup("dave", "dave@x.com", &[1]))
        .await
        .unwrap();
    app.review_service
        .submit("dave", 1, ReviewForm { rating: 9, comment: Some("great".to_string()) })
        .await
        .unwrap();

    let form = ProfileEditForm {
        username: Some("david".to_string()),
        email: Some("".to_string()),
        ..Default::default()
    };
    let user = app.user_service.edit_profile("dave", form).await.unwrap();
    assert_eq!(user.username, "david");
    assert_eq!(user.email, "dave@x.com");

    let current = app.session_service.current_user(Some(&token)).await.unwrap().unwrap();
    assert_eq!(current.username, "david");
    assert_eq!(app.profile("david").await.unwrap().reviews.len(), 1);
}

#[tokio::test]
async fn deleted_user_session_resolves_to_anonymous() {
    let (app, _) = setup();
    let (_, token) = app
        .sign_up(None, signup("erin", "erin@x.com", &[1]))
        .await
        .unwrap();

    app.user_service.delete_user("erin").await.unwrap();
    assert!(app.session_service.current_user(Some(&token)).await.unwrap().is_none());
}

#[tokio::test]
async fn recommendations_search_liked_genres() {
    let catalog = Arc::new(StubCatalog::default());
    let (app, _) = setup_with(catalog.clone());
    let (user, _) = app
        .sign_up(None, signup("fay", "fay@x.com", &[10, 22]))
        .await
        .unwrap();

    app.recommendations(&user, 2).await.unwrap();

    let searches = catalog.searches.lock().unwrap();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].genres, vec![10, 22]);
    assert_eq!(searches[0].page, 2);
}

#[tokio::test]
async fn upstream_failure_surfaces_as_unavailable() {
    let (app, _) = setup_with(Arc::new(DownCatalog));
    let err = app.anime_page(1).await.unwrap_err();
    assert!(matches!(err, DomainError::UpstreamUnavailable(_)));
}
