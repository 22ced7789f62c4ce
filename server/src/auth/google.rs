use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Identity attested by the external verifier.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub subject: String,
    pub email: String,
    pub name: String,
}

/// Seam for the external identity provider so tests can substitute a
/// fake. The `Err` string is the rejection reason, surfaced as the opaque
/// diagnostic of the 403.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, String>;
}

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Claims returned by Google's tokeninfo endpoint. Depending on the token
/// the display name arrives either assembled (`name`) or split.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: Option<String>,
    name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
}

impl TokenInfo {
    fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        let parts: Vec<&str> = [self.given_name.as_deref(), self.family_name.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        parts.join(" ")
    }
}

pub struct GoogleTokenVerifier {
    http: reqwest::Client,
    client_id: String,
}

impl GoogleTokenVerifier {
    pub fn new(client_id: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http,
            client_id: client_id.into(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, String> {
        let response = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| format!("tokeninfo request failed: {e}"))?;

        if !response.status().is_success() {
            return Err(format!("tokeninfo returned {}", response.status()));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| format!("tokeninfo response was not valid JSON: {e}"))?;

        if info.aud != self.client_id {
            return Err("aud does not match app client ID".to_string());
        }

        Ok(VerifiedIdentity {
            email: info.email.clone().unwrap_or_default(),
            name: info.display_name(),
            subject: info.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(name: Option<&str>, given: Option<&str>, family: Option<&str>) -> TokenInfo {
        TokenInfo {
            aud: "client".into(),
            sub: "sub".into(),
            email: None,
            name: name.map(String::from),
            given_name: given.map(String::from),
            family_name: family.map(String::from),
        }
    }

    #[test]
    fn prefers_assembled_name() {
        let info = claims(Some("Ada Lovelace"), Some("Ada"), Some("Lovelace"));
        assert_eq!(info.display_name(), "Ada Lovelace");
    }

    #[test]
    fn joins_split_name_parts() {
        assert_eq!(
            claims(None, Some("Ada"), Some("Lovelace")).display_name(),
            "Ada Lovelace"
        );
        assert_eq!(claims(None, Some("Ada"), None).display_name(), "Ada");
        assert_eq!(claims(None, None, None).display_name(), "");
    }
}
