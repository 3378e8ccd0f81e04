use crate::{
    errors::{AppError, AppResult},
    models::{Claims, Role, User},
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

// ─── Identity ─────────────────────────────────────────────────────────────────

/// Resolves credentials to a console user.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>>;
}

/// Placeholder provider for the two demo accounts. Each role has a single
/// shared demo password; replace with a real identity provider before use.
pub struct DemoIdentityProvider {
    users: Vec<User>,
    admin_hash: String,
    employee_hash: String,
}

const DEMO_ADMIN_PASSWORD: &str = "admin123";
const DEMO_EMPLOYEE_PASSWORD: &str = "emp123";
const DEMO_HASH_COST: u32 = 4;

impl DemoIdentityProvider {
    pub fn new() -> AppResult<Self> {
        let hash = |password: &str| {
            bcrypt::hash(password, DEMO_HASH_COST).map_err(|e| AppError::Internal(e.to_string()))
        };
        Ok(Self {
            users: demo_users(),
            admin_hash: hash(DEMO_ADMIN_PASSWORD)?,
            employee_hash: hash(DEMO_EMPLOYEE_PASSWORD)?,
        })
    }
}

pub fn demo_users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            email: "admin@tyrecentre.com".to_string(),
            name: "Admin User".to_string(),
            role: Role::Admin,
            employee_id: None,
        },
        User {
            id: "2".to_string(),
            email: "employee@tyrecentre.com".to_string(),
            name: "John Doe".to_string(),
            role: Role::Employee,
            employee_id: Some("EMP001".to_string()),
        },
    ]
}

#[async_trait]
impl IdentityProvider for DemoIdentityProvider {
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.users.iter().find(|u| u.email == email) else {
            return Ok(None);
        };
        let hash = match user.role {
            Role::Admin => &self.admin_hash,
            Role::Employee => &self.employee_hash,
        };
        let ok = bcrypt::verify(password, hash).map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(ok.then(|| user.clone()))
    }
}

// ─── Extractors ───────────────────────────────────────────────────────────────

/// Authenticated user extractor.
/// Add `auth: AuthUser` as a parameter in any handler that requires a session.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let headers: &HeaderMap = &parts.headers;

        let auth_header = headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization format".to_string()))?;

        let secret = state.config.jwt_secret.as_bytes();
        let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret), &Validation::default())
            .map_err(|_| AppError::InvalidToken)?
            .claims;

        if !state.sessions.is_active(&claims.sub, claims.jti).await? {
            return Err(AppError::Unauthorized("Session has ended".to_string()));
        }

        Ok(AuthUser(User {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
            role: claims.role,
            employee_id: claims.employee_id,
        }))
    }
}

/// Like [`AuthUser`] but rejects non-admin users with 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }
        Ok(AdminUser(user))
    }
}

pub fn generate_token(
    user: &User,
    session_id: Uuid,
    secret: &str,
    expiry_hours: i64,
) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role,
        employee_id: user.employee_id.clone(),
        jti: session_id,
        exp: (now + Duration::hours(expiry_hours)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_credentials_are_tied_to_role() {
        let provider = DemoIdentityProvider::new().unwrap();

        let admin = provider.authenticate("admin@tyrecentre.com", "admin123").await.unwrap();
        assert_eq!(admin.map(|u| u.role), Some(Role::Admin));

        let employee = provider.authenticate("employee@tyrecentre.com", "emp123").await.unwrap();
        assert_eq!(employee.and_then(|u| u.employee_id).as_deref(), Some("EMP001"));
    }

    #[tokio::test]
    async fn other_combinations_fail() {
        let provider = DemoIdentityProvider::new().unwrap();
        for (email, password) in [
            ("admin@tyrecentre.com", "emp123"),
            ("employee@tyrecentre.com", "admin123"),
            ("admin@tyrecentre.com", "wrong"),
            ("nobody@tyrecentre.com", "admin123"),
            ("ADMIN@tyrecentre.com", "admin123"),
        ] {
            assert!(
                provider.authenticate(email, password).await.unwrap().is_none(),
                "{email} / {password} should fail"
            );
        }
    }

    #[test]
    fn token_round_trips_claims() {
        let users = demo_users();
        let session_id = Uuid::new_v4();
        let token = generate_token(&users[1], session_id, "secret", 1).unwrap();
        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap()
        .claims;
        assert_eq!(claims.sub, "2");
        assert_eq!(claims.role, Role::Employee);
        assert_eq!(claims.employee_id.as_deref(), Some("EMP001"));
        assert_eq!(claims.jti, session_id);
    }
}
