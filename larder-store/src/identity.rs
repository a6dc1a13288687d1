//! Identity provider
//!
//! Adapters only need two capabilities from authentication: "who is signed in
//! right now" and "tell me when that changes". [`IdentityProvider`] is that
//! seam. [`LocalIdentity`] implements it over the local `users` table with
//! salted SHA-256 password digests.

use chrono::{DateTime, Utc};
use larder_common::events::{SessionBus, SessionEvent};
use larder_common::{Error, Result, Session, UserProfile};
use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{Row, SqlitePool};
use std::sync::{PoisonError, RwLock};
use tokio::sync::broadcast;
use tracing::info;
use uuid::Uuid;

/// Minimum password length accepted at sign-up
pub const MIN_PASSWORD_LEN: usize = 6;

/// Source of the current session
pub trait IdentityProvider: Send + Sync {
    fn current_session(&self) -> Option<Session>;

    /// Sign-in / sign-out notifications emitted after this call
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;

    fn current_user_id(&self) -> Option<String> {
        self.current_session().map(|s| s.user_id)
    }
}

/// Local account store and session holder
pub struct LocalIdentity {
    pool: SqlitePool,
    session: RwLock<Option<Session>>,
    bus: SessionBus,
}

impl LocalIdentity {
    pub fn new(pool: SqlitePool, bus: SessionBus) -> Self {
        Self {
            pool,
            session: RwLock::new(None),
            bus,
        }
    }

    /// Create an account, record its profile and sign it in.
    pub async fn sign_up(&self, full_name: &str, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::InvalidInput(format!(
                "Password should be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
            .bind(&email)
            .fetch_one(&self.pool)
            .await?;
        if taken {
            return Err(Error::InvalidInput("Email already in use".to_string()));
        }

        let user_id = Uuid::new_v4().to_string();
        let salt = generate_salt();
        let profile = UserProfile {
            full_name: full_name.trim().to_string(),
            email: email.clone(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO users (user_id, full_name, email, password_hash, password_salt, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user_id)
        .bind(&profile.full_name)
        .bind(&profile.email)
        .bind(hash_password(&salt, password))
        .bind(&salt)
        .bind(profile.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        info!(user_id = %user_id, "Account created");
        Ok(self.start_session(Session {
            user_id,
            profile: Some(profile),
        }))
    }

    /// Verify credentials and sign in.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email)?;
        let row = sqlx::query(
            r#"
            SELECT user_id, full_name, email, password_hash, password_salt, created_at
            FROM users WHERE email = ?
            "#,
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?;

        let invalid = || Error::InvalidInput("Invalid email or password".to_string());
        let row = row.ok_or_else(invalid)?;

        let salt: String = row.try_get("password_salt")?;
        let stored: String = row.try_get("password_hash")?;
        if hash_password(&salt, password) != stored {
            return Err(invalid());
        }

        let session = Session {
            user_id: row.try_get("user_id")?,
            profile: Some(profile_from_row(&row)?),
        };
        Ok(self.start_session(session))
    }

    /// Re-establish a session for a known user id (e.g. remembered on disk).
    ///
    /// Returns `None` when the id no longer exists.
    pub async fn restore(&self, user_id: &str) -> Result<Option<Session>> {
        let row = sqlx::query(
            "SELECT user_id, full_name, email, created_at FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let session = Session {
                    user_id: user_id.to_string(),
                    profile: Some(profile_from_row(&row)?),
                };
                Ok(Some(self.start_session(session)))
            }
            None => Ok(None),
        }
    }

    /// Clear the session; returns the one that ended, if any.
    pub fn sign_out(&self) -> Option<Session> {
        let ended = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(session) = &ended {
            info!(user_id = %session.user_id, "Signed out");
            self.bus.emit_lossy(SessionEvent::SignedOut {
                user_id: session.user_id.clone(),
            });
        }
        ended
    }

    fn start_session(&self, session: Session) -> Session {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());

        info!(user_id = %session.user_id, "Signed in");
        self.bus.emit_lossy(SessionEvent::SignedIn {
            user_id: session.user_id.clone(),
        });
        session
    }
}

impl IdentityProvider for LocalIdentity {
    fn current_session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.bus.subscribe()
    }
}

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::InvalidInput("Please enter a valid email".to_string()));
    }
    Ok(email.to_string())
}

fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn profile_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<UserProfile> {
    let created_at: String = row.try_get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| Error::Internal(format!("Failed to parse created_at: {}", e)))?
        .with_timezone(&Utc);

    Ok(UserProfile {
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        created_at,
    })
}
