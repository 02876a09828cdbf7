mod common;

use std::sync::Arc;

use common::{ACCESS_TOKEN, REFRESH_TOKEN, student_session};
use doro_client::nav::{NavBar, NavDisplay};
use doro_client::page::PageContext;
use doro_client::session::{
    ACCESS_TOKEN_KEY, AuthChange, MemorySessionStore, REFRESH_TOKEN_KEY, SessionContext,
    SessionStore, SqliteSessionStore, USER_KEY,
};
use doro_client::ui::RecordingUi;
use doro_client::{ClientConfig, HttpLmsApi};
use tokio::sync::broadcast::error::TryRecvError;

#[tokio::test]
async fn session_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("session.db").display());

    {
        let store = SqliteSessionStore::connect(&url).await.unwrap();
        let session = SessionContext::new(Arc::new(store));
        session.save(&student_session()).await.unwrap();
    }

    let store = SqliteSessionStore::connect(&url).await.unwrap();
    let session = SessionContext::new(Arc::new(store));
    let restored = session.read().await.expect("session should persist");
    assert_eq!(restored, student_session());
    assert_eq!(restored.display_name(), "김도로");
}

#[tokio::test]
async fn save_writes_exactly_three_keys() {
    let store = Arc::new(SqliteSessionStore::connect("sqlite::memory:").await.unwrap());
    let session = SessionContext::new(store.clone());
    session.save(&student_session()).await.unwrap();

    assert_eq!(
        store.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(),
        Some(ACCESS_TOKEN)
    );
    assert_eq!(
        store.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(),
        Some(REFRESH_TOKEN)
    );
    let raw_user = store.get(USER_KEY).await.unwrap().unwrap();
    let user: serde_json::Value = serde_json::from_str(&raw_user).unwrap();
    assert_eq!(user["username"], "student");
}

#[tokio::test]
async fn corrupt_user_reads_as_signed_out() {
    let store = Arc::new(MemorySessionStore::new());
    store
        .put_all(&[
            (USER_KEY, "{not json".to_string()),
            (ACCESS_TOKEN_KEY, ACCESS_TOKEN.to_string()),
            (REFRESH_TOKEN_KEY, REFRESH_TOKEN.to_string()),
        ])
        .await
        .unwrap();
    let session = SessionContext::new(store);

    assert!(session.read().await.is_none());
    // The route guard only looks at the token.
    assert_eq!(session.access_token().await.as_deref(), Some(ACCESS_TOKEN));
}

#[tokio::test]
async fn partial_session_reads_as_signed_out() {
    let store = Arc::new(MemorySessionStore::new());
    store
        .put_all(&[(ACCESS_TOKEN_KEY, ACCESS_TOKEN.to_string())])
        .await
        .unwrap();
    let session = SessionContext::new(store);
    assert!(session.read().await.is_none());
}

#[tokio::test]
async fn each_change_is_broadcast_once() {
    let session = SessionContext::in_memory();
    let mut changes = session.subscribe();

    session.save(&student_session()).await.unwrap();
    assert_eq!(changes.try_recv(), Ok(AuthChange::SignedIn));
    assert_eq!(changes.try_recv(), Err(TryRecvError::Empty));

    let mut user = student_session().user;
    user.first_name = "로봇".to_string();
    session.update_user(&user).await.unwrap();
    assert_eq!(changes.try_recv(), Ok(AuthChange::ProfileUpdated));
    assert_eq!(changes.try_recv(), Err(TryRecvError::Empty));

    session.clear().await.unwrap();
    assert_eq!(changes.try_recv(), Ok(AuthChange::SignedOut));
    assert_eq!(changes.try_recv(), Err(TryRecvError::Empty));
    assert!(session.read().await.is_none());
    assert!(session.access_token().await.is_none());
}

#[tokio::test]
async fn clear_removes_every_key() {
    let store = Arc::new(SqliteSessionStore::connect("sqlite::memory:").await.unwrap());
    let session = SessionContext::new(store.clone());
    session.save(&student_session()).await.unwrap();
    session.clear().await.unwrap();

    for key in [USER_KEY, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
        assert_eq!(store.get(key).await.unwrap(), None);
    }
}

#[tokio::test]
async fn nav_bar_follows_auth_changes() {
    let session = SessionContext::in_memory();
    let config = ClientConfig::new("http://127.0.0.1:9").unwrap();
    let ctx = PageContext::new(
        Arc::new(HttpLmsApi::new(&config).unwrap()),
        session.clone(),
        Arc::new(RecordingUi::new()),
    );

    let mut nav = NavBar::mount(ctx).await;
    assert_eq!(nav.display(), &NavDisplay::Anonymous);

    session.save(&student_session()).await.unwrap();
    assert_eq!(nav.sync().await, 1);
    assert_eq!(
        nav.display(),
        &NavDisplay::SignedIn {
            name: "김도로".to_string()
        }
    );

    let mut user = student_session().user;
    user.last_name = "이".to_string();
    session.update_user(&user).await.unwrap();
    assert_eq!(nav.next_change().await, Some(AuthChange::ProfileUpdated));
    assert_eq!(
        nav.display(),
        &NavDisplay::SignedIn {
            name: "이도로".to_string()
        }
    );

    // Nothing new since the last sync.
    assert_eq!(nav.sync().await, 0);
}
