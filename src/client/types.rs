//! Type definitions for the FODMAP Chef API.
//!
//! Request and response payloads for authentication, user profiles, recipes,
//! ingredients and shopping lists. Field names follow the backend's JSON.
//!
//! ## Key Types
//!
//! - [`AuthResponse`] - token and user returned by login and Google sign-in
//! - [`UserProfile`] - dietary profile of the signed in user
//! - [`Recipe`] - recipe with its ingredients and FODMAP notes
//! - [`RecipeGenerationRequest`] - constraints for AI recipe generation
//! - [`ShoppingList`] - named list of ingredients to buy
//!
//! Request types skip unset optional fields, so the JSON body contains only
//! what the caller filled in.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration payload. The password is sent twice for confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

impl RegisterRequest {
    /// Build a request where the confirmation matches the password.
    pub fn new(username: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            email: email.into(),
            password1: password.clone(),
            password2: password,
        }
    }
}

/// Access token issued by the Google identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleSignInRequest {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Session token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

/// Registration result. Depending on backend settings a token may already be
/// issued, or the account may await e-mail verification (`detail`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegistrationResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub user: i64,
    #[serde(default)]
    pub diet_type: String,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
    /// Ingredient ids
    #[serde(default)]
    pub liked_ingredients: Vec<i64>,
    #[serde(default)]
    pub disliked_ingredients: Vec<i64>,
    #[serde(default)]
    pub allergic_ingredients: Vec<i64>,
}

/// Partial profile update. Only the fields that are set are sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_ingredients: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disliked_ingredients: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergic_ingredients: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FodmapLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for FodmapLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FodmapLevel::Low => "low",
            FodmapLevel::Medium => "medium",
            FodmapLevel::High => "high",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub fodmap_level: FodmapLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fodmap_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub id: i64,
    pub ingredient: Ingredient,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A recipe as stored by the backend.
///
/// Times are in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructions: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_fodmap_friendly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fodmap_notes: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Recipe {
    /// Preparation plus cooking time, saturating at `u32::MAX`.
    pub fn total_time(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredientRequest {
    pub ingredient_id: i64,
    pub quantity: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for creating or replacing a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub title: String,
    pub description: String,
    pub instructions: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_fodmap_friendly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fodmap_notes: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientRequest>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Constraints for AI recipe generation. Every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecipeGenerationRequest {
    /// Ingredient names to build the recipe around
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Vec<String>>,
    /// Minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_prep_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeGenerationResponse {
    pub recipe: Recipe,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: i64,
    pub ingredient: Ingredient,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub is_checked: bool,
}

impl ShoppingListItem {
    /// Flip the local checked state. Not synchronized with the backend.
    pub fn toggle_checked(&mut self) {
        self.is_checked = !self.is_checked;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ShoppingListItem>,
    pub created_at: DateTime<Utc>,
}

impl ShoppingList {
    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_checked).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShoppingListFromRecipe {
    pub recipe_id: i64,
}
