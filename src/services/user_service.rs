use crate::dto::admin_dto::{CreateUserPayload, UpdateUserPayload};
use crate::error::{Error, Result};
use crate::models::user::{AdminUser, User, ROLE_OWNER};
use crate::utils::crypto::{hash_password, verify_password};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_admin_users(&self) -> Result<Vec<AdminUser>> {
        let users = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, email, first_name, last_name, role, created_at
            FROM users
            WHERE role IN ('admin', 'owner', 'editor')
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Only owners may manage users.
    fn require_owner(actor_role: Option<&str>) -> Result<()> {
        if actor_role != Some(ROLE_OWNER) {
            return Err(Error::Forbidden(
                "Access denied. Only owners can manage users.".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn create_user(
        &self,
        payload: CreateUserPayload,
        actor_role: Option<&str>,
    ) -> Result<AdminUser> {
        Self::require_owner(actor_role)?;

        let existing: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
                .bind(&payload.email)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(Error::BadRequest(
                "User with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;

        let user = sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO users (email, first_name, last_name, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, first_name, last_name, role, created_at
            "#,
        )
        .bind(&payload.email)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&password_hash)
        .bind(&payload.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn update_user(
        &self,
        user_id: Uuid,
        payload: UpdateUserPayload,
        actor_role: Option<&str>,
    ) -> Result<AdminUser> {
        Self::require_owner(actor_role)?;

        let taken: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM users WHERE email = $1 AND id != $2")
                .bind(&payload.email)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        if taken.is_some() {
            return Err(Error::BadRequest(
                "Email is already taken by another user".to_string(),
            ));
        }

        let password_hash = match payload.password.as_deref() {
            Some(p) if !p.is_empty() => Some(
                hash_password(p)
                    .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?,
            ),
            _ => None,
        };

        let user = sqlx::query_as::<_, AdminUser>(
            r#"
            UPDATE users
            SET email = $1,
                first_name = $2,
                last_name = $3,
                role = $4,
                password_hash = COALESCE($5, password_hash),
                updated_at = NOW()
            WHERE id = $6
            RETURNING id, email, first_name, last_name, role, created_at
            "#,
        )
        .bind(&payload.email)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.role)
        .bind(&password_hash)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn delete_user(&self, user_id: Uuid, actor_role: Option<&str>) -> Result<()> {
        Self::require_owner(actor_role)?;

        let target_role: Option<Option<String>> =
            sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        let target_role =
            target_role.ok_or_else(|| Error::NotFound("User not found".to_string()))?;
        if target_role.as_deref() == Some(ROLE_OWNER) {
            return Err(Error::Forbidden("Cannot delete owner account".to_string()));
        }

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Verify credentials for the admin surface. Failures are deliberately
    /// indistinguishable between unknown email and wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid email or password".to_string()))?;

        let hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| Error::Unauthorized("Invalid email or password".to_string()))?;

        let ok = verify_password(password, hash)
            .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
        if !ok {
            return Err(Error::Unauthorized("Invalid email or password".to_string()));
        }

        if !user.has_admin_access() {
            return Err(Error::Forbidden(
                "Access denied. Admin privileges required.".to_string(),
            ));
        }

        Ok(user)
    }

    /// Give the seeded admin a password on first boot. The seed migration
    /// cannot carry an argon2 hash (salted at hash time), so the hash is
    /// written here when configured and still missing.
    pub async fn ensure_bootstrap_admin(&self) -> Result<()> {
        let config = crate::config::get_config();
        let Some(ref password) = config.admin_bootstrap_password else {
            return Ok(());
        };

        let needs_hash: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM users WHERE email = $1 AND password_hash IS NULL",
        )
        .bind(&config.admin_bootstrap_email)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(user_id) = needs_hash {
            let hash = hash_password(password)
                .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;
            sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
                .bind(&hash)
                .bind(user_id)
                .execute(&self.pool)
                .await?;
            tracing::info!(
                "Bootstrap password set for {}",
                config.admin_bootstrap_email
            );
        }

        Ok(())
    }
}
