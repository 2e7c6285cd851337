use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer};

/// An already-acquired bearer credential.
///
/// The client only reads it to build the `Authorization` header; acquiring
/// and refreshing tokens is left to the caller.
#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: String,
    pub access_token: String,
    pub expiration: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct TokenData {
    access_token: String,
    token_type: Option<String>,
    expires_in: Option<u64>,
}

impl Token {
    pub fn new(token_type: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            access_token: access_token.into(),
            expiration: None,
        }
    }

    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self::new("Bearer", access_token)
    }

    pub fn with_expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration = Some(expiration);
        self
    }

    pub fn is_valid(&self) -> bool {
        if self.access_token.is_empty() {
            return false;
        }

        match self.expiration {
            Some(expiration) => Utc::now() < expiration,
            None => true,
        }
    }

    pub fn header_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token_data = TokenData::deserialize(deserializer)?;
        let expiration = token_data
            .expires_in
            .map(|expires_in| Utc::now() + Duration::seconds(expires_in as i64 - 1));

        Ok(Token {
            token_type: token_data.token_type.unwrap_or_else(|| "Bearer".to_string()),
            access_token: token_data.access_token,
            expiration,
        })
    }
}
