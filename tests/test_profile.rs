mod common;

use common::{ingredient_json, TestEnvironment};
use fodmap_chef::client::types::{FodmapLevel, ProfileUpdate};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn profile_json() -> serde_json::Value {
    json!({
        "id": 1,
        "user": 7,
        "diet_type": "low-fodmap",
        "dietary_restrictions": ["gluten-free"],
        "preferences": ["vegetarian"],
        "liked_ingredients": [1, 2],
        "disliked_ingredients": [],
        "allergic_ingredients": [9]
    })
}

#[tokio::test]
async fn test_get_user_profile() {
    common::init_test_logging();
    let env = TestEnvironment::authenticated("tok123").await;

    Mock::given(method("GET"))
        .and(path("/api/user-profile/"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .mount(&env.server)
        .await;

    let profile = env.client.get_user_profile().await.expect("Should fetch profile");
    assert_eq!(profile.diet_type, "low-fodmap");
    assert_eq!(profile.liked_ingredients, vec![1, 2]);
    assert_eq!(profile.allergic_ingredients, vec![9]);
}

#[tokio::test]
async fn test_update_user_profile_sends_only_set_fields() {
    common::init_test_logging();
    let env = TestEnvironment::authenticated("tok123").await;

    Mock::given(method("POST"))
        .and(path("/api/user-profile/"))
        .and(body_json(json!({
            "diet_type": "low-fodmap",
            "dietary_restrictions": ["gluten-free"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .expect(1)
        .mount(&env.server)
        .await;

    let update = ProfileUpdate {
        diet_type: Some("low-fodmap".to_string()),
        dietary_restrictions: Some(vec!["gluten-free".to_string()]),
        ..Default::default()
    };
    let profile = env.client.update_user_profile(&update).await.expect("Should update profile");
    assert_eq!(profile.user, 7);
}

#[tokio::test]
async fn test_unauthenticated_profile_request_is_rejected() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/api/user-profile/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Authentication credentials were not provided."})),
        )
        .mount(&env.server)
        .await;

    let err = env.client.get_user_profile().await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
    assert_eq!(
        err.body_json(),
        Some(json!({"detail": "Authentication credentials were not provided."}))
    );
}

#[tokio::test]
async fn test_list_ingredients() {
    common::init_test_logging();
    let env = TestEnvironment::authenticated("tok123").await;

    Mock::given(method("GET"))
        .and(path("/api/ingredients/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            ingredient_json(1, "Carrot", "low"),
            ingredient_json(2, "Onion", "high")
        ])))
        .mount(&env.server)
        .await;

    let ingredients = env.client.list_ingredients().await.expect("Should list ingredients");
    assert_eq!(ingredients.len(), 2);
    assert_eq!(ingredients[1].fodmap_level, FodmapLevel::High);
}

#[tokio::test]
async fn test_search_ingredients_encodes_query() {
    common::init_test_logging();
    let env = TestEnvironment::authenticated("tok123").await;

    Mock::given(method("GET"))
        .and(path("/api/ingredients/search/"))
        .and(query_param("q", "green beans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([ingredient_json(4, "Green beans", "low")])))
        .expect(1)
        .mount(&env.server)
        .await;

    let results = env
        .client
        .search_ingredients("green beans")
        .await
        .expect("Should search ingredients");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Green beans");

    let requests = env.requests().await;
    assert_eq!(requests[0].url.query(), Some("q=green%20beans"));
}
