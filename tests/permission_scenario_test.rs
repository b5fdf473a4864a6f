mod common;

use common::setup_app_data;
use linkstash_rbac::config::{begin_transaction, commit_transaction, MapEnvironment};
use linkstash_rbac::providers::FixedUser;
use linkstash_rbac::types::NewUser;

#[tokio::test]
async fn test_editor_can_publish_but_not_delete() {
    let app = setup_app_data(MapEnvironment::empty()).await;
    let db = &app.db;

    let editor = app.role_store.find_or_create(db, "editor").await.unwrap();
    app.role_store.add_abilities(db, &editor, &["publish", "edit"]).await.unwrap();

    let user = app
        .user_store
        .create_user(db, &app.password_provider, NewUser::new("ed").roles(["editor"]))
        .await
        .unwrap();
    let current = FixedUser(Some(user));

    assert!(app.permission_service.user_has_ability(db, "publish", &current).await.unwrap());
    assert!(!app.permission_service.user_has_ability(db, "delete", &current).await.unwrap());
}

#[tokio::test]
async fn test_unknown_ability_is_denied_even_for_admins() {
    let app = setup_app_data(MapEnvironment::empty()).await;
    let db = &app.db;

    let admin = app.role_store.find_or_create(db, "admin").await.unwrap();
    app.role_store.add_abilities(db, &admin, &["manage"]).await.unwrap();
    let user = app
        .user_store
        .create_user(db, &app.password_provider, NewUser::new("root").roles("admin"))
        .await
        .unwrap();

    let current = || Some(user.clone());
    assert!(!app.permission_service.user_has_ability(db, "launch", &current).await.unwrap());
    assert!(app.permission_service.user_has_ability(db, "manage", &current).await.unwrap());
}

#[tokio::test]
async fn test_settings_defaults_flow_into_new_users() {
    let env = MapEnvironment::empty()
        .with_var("DEFAULT_ROLE", "member")
        .with_var("DEFAULT_CONTAINER", "global");
    let app = setup_app_data(env).await;
    let db = &app.db;

    let user = app
        .user_store
        .create_user(db, &app.password_provider, app.settings.new_user("amy"))
        .await
        .unwrap();

    assert_eq!(app.user_store.role_names(db, &user).await.unwrap(), vec!["member"]);
    assert_eq!(app.user_store.container_names(db, &user).await.unwrap(), vec!["global"]);
}

#[tokio::test]
async fn test_membership_changes_inside_a_transaction() {
    let app = setup_app_data(MapEnvironment::empty()).await;

    let txn = begin_transaction(&app.db).await.unwrap();
    let user = app
        .user_store
        .create_user(&txn, &app.password_provider, NewUser::new("tom"))
        .await
        .unwrap();
    app.user_store.add_roles(&txn, &user, &["editor"]).await.unwrap();
    app.user_store.add_containers(&txn, &user, &["eu"]).await.unwrap();
    commit_transaction(txn).await.unwrap();

    let db = &app.db;
    let user = app.user_store.find_by_username(db, "tom").await.unwrap().unwrap();
    assert_eq!(app.user_store.role_names(db, &user).await.unwrap(), vec!["editor", "user"]);
    assert_eq!(app.user_store.container_names(db, &user).await.unwrap(), vec!["all", "eu"]);
}

#[tokio::test]
async fn test_peppered_password_round_trip() {
    let env = MapEnvironment::empty().with_var("PASSWORD_PEPPER", "integration-test-pepper");
    let app = setup_app_data(env).await;
    let db = &app.db;

    let user = app
        .user_store
        .create_user(db, &app.password_provider, NewUser::new("pat"))
        .await
        .unwrap();
    assert!(!user.verify_password(&app.password_provider, "secret"));

    let user = app
        .user_store
        .hash_password(db, &app.password_provider, &user, "secret")
        .await
        .unwrap();

    assert!(user.verify_password(&app.password_provider, "secret"));
    assert!(!user.verify_password(&app.password_provider, "wrong"));
}
