use reqwest::{Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::client::{
    auth::{request_headers, token_preview, ClearOutcome, TokenStore},
    error::{ApiError, Result},
    types::*,
};
use crate::config::ClientConfig;

/// # FODMAP Chef API Client
///
/// One method per backend endpoint. Every method reads the session token from
/// the shared [`TokenStore`] right before sending, so a login performed through
/// one clone is visible to all others.
///
/// Errors are never retried or reinterpreted. A non-2xx answer comes back as
/// [`ApiError::Rejected`] with the status and the body exactly as received.
#[derive(Debug, Clone)]
pub struct FodmapChefClient {
    config: ClientConfig,
    client: Client,
    tokens: TokenStore,
}

impl FodmapChefClient {
    pub fn new(config: ClientConfig, tokens: TokenStore) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            tokens,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.tokens.is_authenticated()?)
    }

    // Session operations
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegistrationResponse> {
        tracing::info!("Registering account for {}", request.email);

        let response: RegistrationResponse = self.post("/auth/registration/", request).await?;

        if let Some(token) = &response.token {
            self.tokens.set_token(token)?;
            tracing::info!("Registration for {} returned a session token", request.email);
        } else {
            tracing::info!("Registration for {} accepted", request.email);
        }

        Ok(response)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        tracing::info!("Attempting login for user: {}", email);

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.post("/auth/login/", &request).await?;

        self.tokens.set_token(&response.token)?;
        tracing::info!("Login successful for user: {}", email);
        tracing::debug!("Received token: {}", token_preview(&response.token));

        Ok(response)
    }

    /// Exchange a Google access token for a session token.
    pub async fn google_sign_in(&self, access_token: &str) -> Result<AuthResponse> {
        tracing::info!("Completing Google sign-in");

        let request = GoogleSignInRequest {
            access_token: access_token.to_string(),
        };
        let response: AuthResponse = self.post("/auth/google/login/callback/", &request).await?;

        self.tokens.set_token(&response.token)?;
        tracing::info!("Google sign-in successful for user id {}", response.user.id);

        Ok(response)
    }

    /// Log out on the backend and drop the stored token.
    ///
    /// The token is cleared whatever the backend answers. The backend's error,
    /// if any, is still returned.
    pub async fn logout(&self) -> Result<()> {
        let remote = self.send_empty(Method::POST, "/auth/logout/").await;

        match self.tokens.clear_token() {
            ClearOutcome::Cleared => tracing::debug!("Session token removed"),
            ClearOutcome::AlreadyAbsent => tracing::debug!("No session token to remove"),
            ClearOutcome::Failed(_) => {}
        }

        match &remote {
            Ok(()) => tracing::info!("Logged out"),
            Err(e) => tracing::warn!("Logged out locally; backend logout failed: {}", e),
        }

        remote
    }

    /// Profile of the stored session, or `None` when there is no usable session.
    ///
    /// Backend and network failures count as "no session" and are only logged.
    /// Storage faults still propagate.
    pub async fn restore_session(&self) -> Result<Option<UserProfile>> {
        if !self.tokens.is_authenticated()? {
            return Ok(None);
        }

        match self.get_user_profile().await {
            Ok(profile) => Ok(Some(profile)),
            Err(ApiError::Storage(e)) => Err(ApiError::Storage(e)),
            Err(e) => {
                tracing::warn!("Stored session could not be restored: {}", e);
                Ok(None)
            }
        }
    }

    // Profile operations
    pub async fn get_user_profile(&self) -> Result<UserProfile> {
        self.get("/api/user-profile/").await
    }

    pub async fn update_user_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        self.post("/api/user-profile/", update).await
    }

    // Recipe operations
    pub async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        let recipes: Vec<Recipe> = self.get("/api/recipes/").await?;
        tracing::debug!("Retrieved {} recipes", recipes.len());
        Ok(recipes)
    }

    pub async fn get_recipe(&self, id: i64) -> Result<Recipe> {
        self.get(&format!("/api/recipes/{}/", id)).await
    }

    pub async fn create_recipe(&self, request: &RecipeRequest) -> Result<Recipe> {
        self.post("/api/recipes/", request).await
    }

    pub async fn update_recipe(&self, id: i64, request: &RecipeRequest) -> Result<Recipe> {
        self.request(Method::PUT, &format!("/api/recipes/{}/", id), Some(request))
            .await
    }

    pub async fn delete_recipe(&self, id: i64) -> Result<()> {
        self.send_empty(Method::DELETE, &format!("/api/recipes/{}/", id))
            .await
    }

    pub async fn generate_recipe(&self, request: &RecipeGenerationRequest) -> Result<RecipeGenerationResponse> {
        tracing::info!("Requesting recipe generation");
        let response: RecipeGenerationResponse = self.post("/api/recipes/generate/", request).await?;
        tracing::info!("Generated recipe {}: {}", response.recipe.id, response.recipe.title);
        Ok(response)
    }

    // Ingredient operations
    pub async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        self.get("/api/ingredients/").await
    }

    pub async fn search_ingredients(&self, query: &str) -> Result<Vec<Ingredient>> {
        let path = format!("/api/ingredients/search/?q={}", urlencoding::encode(query));
        self.get(&path).await
    }

    // Shopping list operations
    pub async fn list_shopping_lists(&self) -> Result<Vec<ShoppingList>> {
        self.get("/api/shopping-lists/").await
    }

    pub async fn create_shopping_list_from_recipe(&self, recipe_id: i64) -> Result<ShoppingList> {
        let request = CreateShoppingListFromRecipe { recipe_id };
        self.post("/api/shopping-lists/from-recipe/", &request).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (url, response) = self.send(method, path, body).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { url: url.clone(), source })?;

        serde_json::from_slice(&bytes).map_err(|source| {
            tracing::error!("Failed to parse response from {}: {}", url, source);
            ApiError::Decode { url, source }
        })
    }

    /// Request whose success body, if any, is ignored.
    async fn send_empty(&self, method: Method, path: &str) -> Result<()> {
        self.send::<()>(method, path, None).await?;
        Ok(())
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<(String, Response)>
    where
        B: Serialize + ?Sized,
    {
        let url = self.config.url(path);
        let token = self.tokens.get_token()?;
        let headers = request_headers(token.as_deref())?;

        tracing::debug!(
            "{} {} ({})",
            method,
            url,
            if token.is_some() { "authenticated" } else { "anonymous" }
        );

        let mut request = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| {
            tracing::error!("Network error calling {} {}: {}", method, url, source);
            ApiError::Transport { url: url.clone(), source }
        })?;

        let status = response.status();
        tracing::debug!("{} {} response status: {}", method, url, status);

        if !status.is_success() {
            let raw = response
                .bytes()
                .await
                .map_err(|source| ApiError::Transport { url: url.clone(), source })?;
            let err = ApiError::rejected(status, raw.to_vec());
            tracing::error!("{} {} failed: {}", method, url, err);
            return Err(err);
        }

        Ok((url, response))
    }
}
