use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub notes: String,
    pub images: Vec<String>,
}

/// A recipe as submitted; the server assigns the id and owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRecipe {
    pub url: String,
    pub title: String,
    pub notes: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleLogin {
    pub session_id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionEstablished {
    pub session_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    pub filename: String,
}
