use std::sync::{Arc, OnceLock};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::error::UserAuthError;
use crate::blog::models::{NewUser, RecordId, User, UserInfo};
use crate::blog::repository::{StoreError, UserStore};
use crate::blog::validation::{Normalize, clean, trim_in_place};
use crate::config::AuthConfig;

/// Which half of the token pair a JWT is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (user id as string)
    pub username: String,
    pub email: String,
    pub token_type: TokenType,
    pub jti: String,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at
}

/// Verified caller identity, injected into every authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: RecordId,
    pub username: String,
    pub email: String,
}

impl TryFrom<Claims> for AuthUser {
    type Error = UserAuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse::<RecordId>()
            .map_err(|_| UserAuthError::InvalidToken)?;
        Ok(Self {
            id,
            username: claims.username,
            email: claims.email,
        })
    }
}

/// User Registration Request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "alice")]
    #[validate(required, length(min = 1, max = 150))]
    pub username: Option<String>,
    #[schema(example = "alice@example.com")]
    #[validate(email)]
    pub email: Option<String>,
    #[schema(example = "password123")]
    #[validate(required, length(min = 8))]
    pub password: Option<String>,
}

impl Normalize for RegisterRequest {
    fn normalize(&mut self) {
        trim_in_place(&mut self.username);
        trim_in_place(&mut self.email);
        if self.email.as_deref() == Some("") {
            self.email = None;
        }
    }
}

/// User Login Request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "password123")]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Login response: an access + refresh token pair
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenPair {
    pub refresh: String,
    pub access: String,
}

/// Refresh response: a fresh access token
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessToken {
    pub access: String,
}

/// Hash checked against when the username is unknown, so a miss costs the
/// same argon2 work as a wrong password
fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(b"quillboard-dummy-password", &salt)
                .map(|h| h.to_string())
                .ok()
        })
        .as_deref()
}

pub struct UserAuthService {
    users: Arc<dyn UserStore>,
    config: AuthConfig,
}

impl UserAuthService {
    pub fn new(users: Arc<dyn UserStore>, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Register a new user
    pub async fn register(&self, req: RegisterRequest) -> Result<UserInfo, UserAuthError> {
        let req = clean(req)?;
        let password = req.password.unwrap_or_default();

        // 1. Hash password
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| UserAuthError::Hashing(e.to_string()))?
            .to_string();

        // 2. Insert
        let user = self
            .users
            .insert_user(NewUser {
                username: req.username.unwrap_or_default(),
                email: req.email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(_) => UserAuthError::UsernameTaken,
                other => UserAuthError::Store(other),
            })?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(UserInfo::from(&user))
    }

    /// Login user and issue an access + refresh token pair
    pub async fn login(&self, req: LoginRequest) -> Result<TokenPair, UserAuthError> {
        // 1. Find user by username
        let Some(user) = self.users.find_user_by_username(&req.username).await? else {
            if let Some(parsed) = dummy_hash().and_then(|h| PasswordHash::new(h).ok()) {
                let _ = Argon2::default().verify_password(req.password.as_bytes(), &parsed);
            }
            return Err(UserAuthError::InvalidCredentials);
        };

        // 2. Verify password
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| UserAuthError::Hashing(e.to_string()))?;
        Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed_hash)
            .map_err(|_| UserAuthError::InvalidCredentials)?;

        // 3. Generate JWTs
        Ok(TokenPair {
            refresh: self.issue(&user, TokenType::Refresh)?,
            access: self.issue(&user, TokenType::Access)?,
        })
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh(&self, req: RefreshRequest) -> Result<AccessToken, UserAuthError> {
        let claims = self.verify(&req.refresh, TokenType::Refresh)?;
        let user = self.resolve(AuthUser::try_from(claims)?).await?;

        Ok(AccessToken {
            access: self.issue(&user, TokenType::Access)?,
        })
    }

    /// Verify a bearer (access) token
    pub fn verify_access_token(&self, token: &str) -> Result<AuthUser, UserAuthError> {
        AuthUser::try_from(self.verify(token, TokenType::Access)?)
    }

    /// Verify a bearer token and confirm it still names a stored user
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, UserAuthError> {
        let user = self.resolve(self.verify_access_token(token)?).await?;
        Ok(AuthUser {
            id: user.id,
            username: user.username,
            email: user.email.unwrap_or_default(),
        })
    }

    /// Load the user a token was issued to. Ids are only trusted together
    /// with the username: the in-memory store reissues ids after a restart.
    async fn resolve(&self, claimed: AuthUser) -> Result<User, UserAuthError> {
        match self.users.find_user_by_id(claimed.id).await? {
            Some(user) if user.username == claimed.username => Ok(user),
            _ => {
                tracing::warn!(
                    user_id = claimed.id,
                    username = %claimed.username,
                    "Token subject does not match a stored user"
                );
                Err(UserAuthError::InvalidToken)
            }
        }
    }

    fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, UserAuthError> {
        let decoding_key = DecodingKey::from_secret(self.config.jwt_secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|_| UserAuthError::InvalidToken)?;
        if token_data.claims.token_type != expected {
            return Err(UserAuthError::InvalidToken);
        }
        Ok(token_data.claims)
    }

    fn issue(&self, user: &User, token_type: TokenType) -> Result<String, UserAuthError> {
        let ttl_secs = match token_type {
            TokenType::Access => self.config.access_token_ttl_secs,
            TokenType::Refresh => self.config.refresh_token_ttl_secs,
        };
        let now = Utc::now();
        let expiration = now + Duration::seconds(ttl_secs as i64);

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone().unwrap_or_default(),
            token_type,
            jti: uuid::Uuid::new_v4().simple().to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )?)
    }
}
