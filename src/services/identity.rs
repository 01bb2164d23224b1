// src/services/identity.rs
//! Session identity backed by Firebase Authentication
//!
//! The rest of the crate only sees [`IdentityProvider`]: exchange a client's
//! short-lived ID token for a session cookie, and verify a session cookie on
//! every request. Verification always goes back to the provider for the
//! revocation check; nothing about a verified session is remembered between
//! calls. Only key material (signing certificates, the service-account access
//! token) is cached, and only until its own expiry.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use reqwest::{header::CACHE_CONTROL, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Maximum lifetime the provider allows for a session cookie
pub const SESSION_DURATION: Duration = Duration::from_secs(14 * 24 * 60 * 60);
const MIN_SESSION_DURATION: Duration = Duration::from_secs(5 * 60);

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const SESSION_CERTS_URL: &str = "https://www.googleapis.com/identitytoolkit/v3/relyingparty/publicKeys";
const SESSION_ISSUER_PREFIX: &str = "https://session.firebase.google.com/";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const OAUTH_SCOPES: &str =
    "https://www.googleapis.com/auth/cloud-platform https://www.googleapis.com/auth/identitytoolkit";
const DEFAULT_CREDENTIALS_FILE: &str = "firebase-adminsdk.json";

/// Verified identity claim set, rebuilt from the session cookie on each request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub subject_id: String,
    pub email: Option<String>,
    pub issued_at: i64,
    pub expires_at: i64,
    pub auth_time: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity provider is not configured")]
    NotConfigured,

    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    #[error("session has been revoked")]
    Revoked,

    #[error("account is disabled")]
    Disabled,

    #[error("identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("invalid identity configuration: {0}")]
    InvalidConfig(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange an ID token for a session cookie valid for `valid_for`
    async fn create_session(
        &self,
        id_token: &str,
        valid_for: Duration,
    ) -> Result<String, IdentityError>;

    /// Verify signature, expiry and revocation status of a session cookie
    async fn verify_session(&self, session_cookie: &str) -> Result<Principal, IdentityError>;
}

// ============================================================================
// CREDENTIALS
// ============================================================================

/// Google service-account key file, as downloaded from the Firebase console
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccount {
    pub fn from_json(raw: &str) -> Result<Self, IdentityError> {
        let account: ServiceAccount = serde_json::from_str(raw)
            .map_err(|e| IdentityError::InvalidConfig(format!("credentials JSON: {}", e)))?;
        if account.project_id.trim().is_empty() {
            return Err(IdentityError::InvalidConfig(
                "credentials are missing project_id".to_string(),
            ));
        }
        Ok(account)
    }

    pub async fn from_file(path: &Path) -> Result<Self, IdentityError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            IdentityError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// Resolve credentials in priority order:
    /// `FIREBASE_CREDENTIALS_JSON`, then `FIREBASE_CREDENTIALS_PATH`,
    /// then `firebase-adminsdk.json` in the working directory.
    pub async fn from_env() -> Result<Option<Self>, IdentityError> {
        if let Ok(raw) = env::var("FIREBASE_CREDENTIALS_JSON") {
            if !raw.trim().is_empty() {
                info!("Using Firebase credentials from FIREBASE_CREDENTIALS_JSON");
                return Self::from_json(&raw).map(Some);
            }
        }

        if let Ok(path) = env::var("FIREBASE_CREDENTIALS_PATH") {
            if !path.trim().is_empty() {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return Err(IdentityError::InvalidConfig(format!(
                        "FIREBASE_CREDENTIALS_PATH set but file not found: {}",
                        path.display()
                    )));
                }
                info!(path = %path.display(), "Using Firebase credentials from path");
                return Self::from_file(&path).await.map(Some);
            }
        }

        let default_path = Path::new(DEFAULT_CREDENTIALS_FILE);
        if default_path.exists() {
            info!("Using Firebase credentials from {}", DEFAULT_CREDENTIALS_FILE);
            return Self::from_file(default_path).await.map(Some);
        }

        Ok(None)
    }
}

// ============================================================================
// FIREBASE ADAPTER
// ============================================================================

#[derive(Debug, Clone)]
struct CachedAccessToken {
    token: String,
    expires_at: i64,
}

#[derive(Debug, Clone)]
struct CachedCertificates {
    certs: HashMap<String, String>,
    expires_at: i64,
}

#[derive(Serialize)]
struct GrantClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: String,
    #[serde(default = "default_token_ttl")]
    expires_in: i64,
}

fn default_token_ttl() -> i64 {
    3600
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionCookieResponse {
    session_cookie: String,
}

#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    iat: i64,
    exp: i64,
    auth_time: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub local_id: String,
    #[serde(default)]
    pub disabled: bool,
    /// Seconds since epoch before which issued sessions are revoked
    #[serde(default)]
    pub valid_since: Option<String>,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<UserRecord>,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

pub struct FirebaseIdentity {
    http: Client,
    account: Option<ServiceAccount>,
    signing_key: Option<EncodingKey>,
    access_token: RwLock<Option<CachedAccessToken>>,
    certificates: RwLock<Option<CachedCertificates>>,
}

impl FirebaseIdentity {
    pub fn new(http: Client, account: Option<ServiceAccount>) -> Result<Self, IdentityError> {
        let signing_key = match &account {
            Some(acc) => Some(
                EncodingKey::from_rsa_pem(acc.private_key.as_bytes()).map_err(|e| {
                    IdentityError::InvalidConfig(format!("service account private key: {}", e))
                })?,
            ),
            None => {
                warn!("Firebase credentials not found; every login and session check will fail");
                None
            }
        };

        Ok(Self {
            http,
            account,
            signing_key,
            access_token: RwLock::new(None),
            certificates: RwLock::new(None),
        })
    }

    fn account(&self) -> Result<&ServiceAccount, IdentityError> {
        self.account.as_ref().ok_or(IdentityError::NotConfigured)
    }

    /// OAuth2 access token for the service account (JWT-bearer grant)
    async fn access_token(&self) -> Result<String, IdentityError> {
        let now = Utc::now().timestamp();
        {
            let cached = self.access_token.read().await;
            if let Some(token) = cached.as_ref() {
                if token.expires_at - 60 > now {
                    return Ok(token.token.clone());
                }
            }
        }

        let account = self.account()?;
        let key = self.signing_key.as_ref().ok_or(IdentityError::NotConfigured)?;

        let claims = GrantClaims {
            iss: &account.client_email,
            scope: OAUTH_SCOPES,
            aud: &account.token_uri,
            iat: now,
            exp: now + 3600,
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, key)
            .map_err(|e| IdentityError::InvalidConfig(format!("signing grant: {}", e)))?;

        let resp = self
            .http
            .post(&account.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("token endpoint: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            warn!(http_status = %status, "Service account token exchange failed");
            return Err(IdentityError::Unavailable(format!(
                "token endpoint returned {}",
                status
            )));
        }

        let body: AccessTokenResponse = resp
            .json()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("token response: {}", e)))?;

        let mut cached = self.access_token.write().await;
        *cached = Some(CachedAccessToken {
            token: body.access_token.clone(),
            expires_at: now + body.expires_in,
        });
        debug!("Service account access token refreshed");

        Ok(body.access_token)
    }

    /// Public certificates used to sign session cookies, keyed by `kid`
    async fn session_certificates(&self) -> Result<HashMap<String, String>, IdentityError> {
        let now = Utc::now().timestamp();
        {
            let cached = self.certificates.read().await;
            if let Some(certs) = cached.as_ref() {
                if certs.expires_at > now {
                    return Ok(certs.certs.clone());
                }
            }
        }

        let resp = self
            .http
            .get(SESSION_CERTS_URL)
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("certificate endpoint: {}", e)))?;

        if !resp.status().is_success() {
            return Err(IdentityError::Unavailable(format!(
                "certificate endpoint returned {}",
                resp.status()
            )));
        }

        let max_age = resp
            .headers()
            .get(CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_max_age)
            .unwrap_or(3600);

        let certs: HashMap<String, String> = resp
            .json()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("certificate response: {}", e)))?;

        let mut cached = self.certificates.write().await;
        *cached = Some(CachedCertificates {
            certs: certs.clone(),
            expires_at: now + max_age,
        });

        Ok(certs)
    }

    async fn lookup_user(&self, uid: &str) -> Result<UserRecord, IdentityError> {
        let account = self.account()?;
        let token = self.access_token().await?;
        let url = format!(
            "{}/projects/{}/accounts:lookup",
            IDENTITY_TOOLKIT_URL,
            urlencoding::encode(&account.project_id)
        );

        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "localId": [uid] }))
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("accounts lookup: {}", e)))?;

        if !resp.status().is_success() {
            return Err(provider_error(resp).await);
        }

        let body: LookupResponse = resp
            .json()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("lookup response: {}", e)))?;

        body.users
            .into_iter()
            .find(|u| u.local_id == uid)
            .ok_or_else(|| IdentityError::InvalidCredential("user not found".to_string()))
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn create_session(
        &self,
        id_token: &str,
        valid_for: Duration,
    ) -> Result<String, IdentityError> {
        if id_token.trim().is_empty() {
            return Err(IdentityError::InvalidCredential("empty ID token".to_string()));
        }
        if valid_for < MIN_SESSION_DURATION || valid_for > SESSION_DURATION {
            return Err(IdentityError::InvalidConfig(
                "session duration must be between 5 minutes and 14 days".to_string(),
            ));
        }

        let account = self.account()?;
        let token = self.access_token().await?;
        let url = format!(
            "{}/projects/{}:createSessionCookie",
            IDENTITY_TOOLKIT_URL,
            urlencoding::encode(&account.project_id)
        );

        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({
                "idToken": id_token,
                "validDuration": valid_for.as_secs().to_string(),
            }))
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("createSessionCookie: {}", e)))?;

        if !resp.status().is_success() {
            return Err(provider_error(resp).await);
        }

        let body: SessionCookieResponse = resp
            .json()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("session cookie response: {}", e)))?;

        Ok(body.session_cookie)
    }

    async fn verify_session(&self, session_cookie: &str) -> Result<Principal, IdentityError> {
        let account = self.account()?;

        let header = decode_header(session_cookie)
            .map_err(|e| IdentityError::InvalidCredential(format!("malformed session: {}", e)))?;
        if header.alg != Algorithm::RS256 {
            return Err(IdentityError::InvalidCredential(
                "unexpected signing algorithm".to_string(),
            ));
        }
        let kid = header
            .kid
            .ok_or_else(|| IdentityError::InvalidCredential("session has no key id".to_string()))?;

        let certs = self.session_certificates().await?;
        let cert = certs
            .get(&kid)
            .ok_or_else(|| IdentityError::InvalidCredential("unknown signing key".to_string()))?;
        let key = DecodingKey::from_rsa_pem(cert.as_bytes())
            .map_err(|e| IdentityError::Unavailable(format!("signing certificate: {}", e)))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[account.project_id.as_str()]);
        let issuer = format!("{}{}", SESSION_ISSUER_PREFIX, account.project_id);
        validation.set_issuer(&[issuer.as_str()]);

        let claims = decode::<SessionClaims>(session_cookie, &key, &validation)
            .map_err(|e| IdentityError::InvalidCredential(e.to_string()))?
            .claims;

        if claims.sub.is_empty() || claims.sub.len() > 128 {
            return Err(IdentityError::InvalidCredential("invalid subject".to_string()));
        }

        // Revocation is checked on every call, not only at expiry
        let user = self.lookup_user(&claims.sub).await?;
        check_revocation(claims.auth_time, &user)?;

        Ok(Principal {
            subject_id: claims.sub,
            email: claims.email,
            issued_at: claims.iat,
            expires_at: claims.exp,
            auth_time: claims.auth_time,
        })
    }
}

/// A session is dead once the account is disabled or its tokens were
/// revoked after the session's sign-in time
pub fn check_revocation(auth_time: i64, user: &UserRecord) -> Result<(), IdentityError> {
    if user.disabled {
        return Err(IdentityError::Disabled);
    }
    let valid_since = user
        .valid_since
        .as_deref()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0);
    if auth_time < valid_since {
        return Err(IdentityError::Revoked);
    }
    Ok(())
}

fn parse_max_age(cache_control: &str) -> Option<i64> {
    cache_control
        .split(',')
        .filter_map(|part| part.trim().strip_prefix("max-age="))
        .find_map(|v| v.trim().parse::<i64>().ok())
}

async fn provider_error(resp: reqwest::Response) -> IdentityError {
    let status = resp.status();
    let message = resp
        .json::<ProviderErrorBody>()
        .await
        .map(|b| b.error.message)
        .unwrap_or_else(|_| status.to_string());

    if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
        IdentityError::InvalidCredential(message)
    } else {
        IdentityError::Unavailable(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(disabled: bool, valid_since: Option<&str>) -> UserRecord {
        UserRecord {
            local_id: "uid-1".to_string(),
            disabled,
            valid_since: valid_since.map(str::to_string),
        }
    }

    #[test]
    fn test_revoked_session_is_rejected_before_expiry() {
        // Signed in at t=1000, tokens revoked at t=2000
        let result = check_revocation(1_000, &user(false, Some("2000")));
        assert!(matches!(result, Err(IdentityError::Revoked)));
    }

    #[test]
    fn test_session_after_revocation_is_accepted() {
        assert!(check_revocation(3_000, &user(false, Some("2000"))).is_ok());
        assert!(check_revocation(3_000, &user(false, None)).is_ok());
    }

    #[test]
    fn test_disabled_account_is_rejected() {
        let result = check_revocation(3_000, &user(true, None));
        assert!(matches!(result, Err(IdentityError::Disabled)));
    }

    #[test]
    fn test_parse_max_age() {
        assert_eq!(
            parse_max_age("public, max-age=19302, must-revalidate, no-transform"),
            Some(19302)
        );
        assert_eq!(parse_max_age("no-cache"), None);
    }

    #[test]
    fn test_service_account_requires_project_id() {
        let raw = r#"{"project_id":"","client_email":"x@y","private_key":"k"}"#;
        assert!(matches!(
            ServiceAccount::from_json(raw),
            Err(IdentityError::InvalidConfig(_))
        ));

        let raw = r#"{"project_id":"church","client_email":"x@y","private_key":"k"}"#;
        let account = ServiceAccount::from_json(raw).unwrap();
        assert_eq!(account.token_uri, DEFAULT_TOKEN_URI);
    }

    #[tokio::test]
    async fn test_unconfigured_provider_fails_closed() {
        let identity = FirebaseIdentity::new(Client::new(), None).unwrap();
        assert!(matches!(
            identity.create_session("token", SESSION_DURATION).await,
            Err(IdentityError::NotConfigured)
        ));
        assert!(matches!(
            identity.verify_session("cookie").await,
            Err(IdentityError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_session_duration_bounds() {
        let identity = FirebaseIdentity::new(Client::new(), None).unwrap();
        let result = identity
            .create_session("token", Duration::from_secs(15 * 24 * 60 * 60))
            .await;
        assert!(matches!(result, Err(IdentityError::InvalidConfig(_))));
    }
}
