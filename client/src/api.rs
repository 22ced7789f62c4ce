use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::types::{GoogleLogin, NewRecipe, Recipe, SessionEstablished, UploadedImage};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Any status the operation did not expect. The raw body is retained
    /// so the caller can inspect what the server actually said.
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
}

/// Thin typed wrapper over the HTTP API. Holds the base URL and the
/// current bearer token; one method per operation.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct DeleteRecipeBody {
    id: Uuid,
}

#[derive(Serialize)]
struct GoogleLoginBody<'a> {
    id_token: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignInBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
            token: None,
        }
    }

    /// Set (or clear) the bearer token attached to authenticated calls.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn expect(response: Response, expected: StatusCode) -> Result<Response, ClientError> {
        let status = response.status();
        if status != expected {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus { status, body });
        }
        Ok(response)
    }

    pub async fn recipes(&self) -> Result<Vec<Recipe>, ClientError> {
        let response = self.authed(self.http.get(self.url("/"))).send().await?;
        Ok(Self::expect(response, StatusCode::OK).await?.json().await?)
    }

    pub async fn create_recipe(&self, recipe: &NewRecipe) -> Result<Recipe, ClientError> {
        let response = self
            .authed(self.http.post(self.url("/")).json(recipe))
            .send()
            .await?;
        Ok(Self::expect(response, StatusCode::CREATED)
            .await?
            .json()
            .await?)
    }

    /// Full replacement of the recipe's fields (PUT semantics).
    pub async fn update_recipe(&self, recipe: &Recipe) -> Result<(), ClientError> {
        let response = self
            .authed(self.http.put(self.url("/")).json(recipe))
            .send()
            .await?;
        Self::expect(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    pub async fn delete_recipe(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .authed(self.http.delete(self.url("/")).json(&DeleteRecipeBody { id }))
            .send()
            .await?;
        Self::expect(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    /// Uploads the image and returns the generated filename. Attaching it
    /// to a recipe's `images` is a separate `update_recipe` call; the two
    /// are not transactional.
    pub async fn upload_image(
        &self,
        filename: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ClientError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime_type)?;
        let form = multipart::Form::new().part("image", part);

        let response = self
            .authed(self.http.post(self.url("/image")).multipart(form))
            .send()
            .await?;

        let uploaded: UploadedImage = Self::expect(response, StatusCode::OK).await?.json().await?;
        Ok(uploaded.filename)
    }

    pub async fn login_google(&self, id_token: &str) -> Result<GoogleLogin, ClientError> {
        let response = self
            .http
            .post(self.url("/login/google"))
            .json(&GoogleLoginBody { id_token })
            .send()
            .await?;
        Ok(Self::expect(response, StatusCode::OK).await?.json().await?)
    }

    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionEstablished, ClientError> {
        let response = self
            .http
            .post(self.url("/sign-up"))
            .json(&SignUpBody {
                name,
                email,
                password,
            })
            .send()
            .await?;
        Ok(Self::expect(response, StatusCode::OK).await?.json().await?)
    }

    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionEstablished, ClientError> {
        let response = self
            .http
            .post(self.url("/sign-in"))
            .json(&SignInBody { email, password })
            .send()
            .await?;
        Ok(Self::expect(response, StatusCode::OK).await?.json().await?)
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.authed(self.http.post(self.url("/logout"))).send().await?;
        Self::expect(response, StatusCode::OK).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slashes_are_trimmed() {
        let client = ApiClient::new("http://localhost:8000//");
        assert_eq!(client.url("/image"), "http://localhost:8000/image");
        assert_eq!(client.url("/"), "http://localhost:8000/");
    }

    #[test]
    fn unexpected_status_error_keeps_the_raw_body() {
        let err = ClientError::UnexpectedStatus {
            status: StatusCode::FORBIDDEN,
            body: r#"{"msg":"Invalid session"}"#.to_string(),
        };
        let shown = err.to_string();
        assert!(shown.contains("403"));
        assert!(shown.contains("Invalid session"));
    }
}
