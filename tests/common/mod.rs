#![allow(dead_code)]

use std::sync::Arc;

use fodmap_chef::client::KeyValueStorage;
use fodmap_chef::{ClientConfig, FodmapChefClient, MemoryStorage, TokenStore};
use serde_json::{json, Value};
use wiremock::{MockServer, Request};

pub struct TestEnvironment {
    pub server: MockServer,
    pub storage: Arc<MemoryStorage>,
    pub tokens: TokenStore,
    pub client: FodmapChefClient,
}

impl TestEnvironment {
    /// Fake backend plus a client with an empty in-memory token store.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let storage = Arc::new(MemoryStorage::new());
        let tokens = TokenStore::new(storage.clone());
        let client = FodmapChefClient::new(ClientConfig::new(server.uri()), tokens.clone())
            .expect("Failed to build client");

        Self {
            server,
            storage,
            tokens,
            client,
        }
    }

    /// Same as [`TestEnvironment::new`] but already signed in with `token`.
    pub async fn authenticated(token: &str) -> Self {
        let env = Self::new().await;
        env.storage
            .set(fodmap_chef::client::AUTH_TOKEN_KEY, token)
            .expect("Failed to seed token");
        env
    }

    pub async fn requests(&self) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .expect("Request recording is enabled by default")
    }
}

pub fn authorization(request: &Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .map(|v| v.to_str().unwrap().to_string())
}

pub fn ingredient_json(id: i64, name: &str, level: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": "vegetable",
        "fodmap_level": level
    })
}

pub fn recipe_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "Quick weeknight dinner",
        "instructions": "Chop. Fry. Serve.",
        "prep_time": 10,
        "cook_time": 15,
        "servings": 2,
        "difficulty": "easy",
        "is_fodmap_friendly": true,
        "fodmap_notes": "Uses garlic-infused oil instead of garlic",
        "created_by": 7,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-02T08:30:00Z",
        "ingredients": [
            {
                "id": 100,
                "ingredient": ingredient_json(1, "Carrot", "low"),
                "quantity": 2.0,
                "unit": "pcs"
            }
        ],
        "tags": ["dinner", "low-fodmap"]
    })
}

pub fn init_test_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
