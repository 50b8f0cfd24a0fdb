use sqlx::PgPool;

use crate::database::models::UserProfile;

/// Fields a user may change about their own profile. Role, permissions,
/// and subscription state are managed elsewhere (admin setup, billing).
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub email: String,
    pub display_name: Option<String>,
    pub company_name: Option<String>,
}

const DEFAULT_PERMISSIONS: &[&str] = &["alerts:read", "targets:read", "targets:write"];

const ADMIN_PERMISSIONS: &[&str] = &[
    "alerts:read",
    "alerts:write",
    "targets:read",
    "targets:write",
    "billing:read",
    "users:manage",
];

pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT user_id, email, display_name, company_name, role, permissions,
                   subscription_tier, subscription_status, created_at, updated_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert-or-update the caller's profile row. An update never touches
    /// role, permissions, or subscription fields.
    pub async fn upsert(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<UserProfile, sqlx::Error> {
        let default_permissions: Vec<String> =
            DEFAULT_PERMISSIONS.iter().map(|p| p.to_string()).collect();

        sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles
                (user_id, email, display_name, company_name, role, permissions,
                 subscription_tier, subscription_status)
            VALUES ($1, $2, $3, $4, 'member', $5, 'free', 'inactive')
            ON CONFLICT (user_id) DO UPDATE SET
                email = EXCLUDED.email,
                display_name = EXCLUDED.display_name,
                company_name = EXCLUDED.company_name,
                updated_at = NOW()
            RETURNING user_id, email, display_name, company_name, role, permissions,
                      subscription_tier, subscription_status, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&update.email)
        .bind(&update.display_name)
        .bind(&update.company_name)
        .bind(&default_permissions)
        .fetch_one(&self.pool)
        .await
    }

    /// Bootstrap (or repair) the admin profile row from the setup endpoint.
    pub async fn ensure_admin(&self, email: &str) -> Result<UserProfile, sqlx::Error> {
        let admin_permissions: Vec<String> =
            ADMIN_PERMISSIONS.iter().map(|p| p.to_string()).collect();

        sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles
                (user_id, email, display_name, company_name, role, permissions,
                 subscription_tier, subscription_status)
            VALUES ('admin', $1, 'Administrator', NULL, 'admin', $2, 'enterprise', 'active')
            ON CONFLICT (user_id) DO UPDATE SET
                email = EXCLUDED.email,
                role = 'admin',
                permissions = EXCLUDED.permissions,
                updated_at = NOW()
            RETURNING user_id, email, display_name, company_name, role, permissions,
                      subscription_tier, subscription_status, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(&admin_permissions)
        .fetch_one(&self.pool)
        .await
    }

    /// Subscription state transition driven by billing webhook events.
    /// Returns the affected count; 0 means no profile exists for the user.
    pub async fn set_subscription(
        &self,
        user_id: &str,
        tier: Option<&str>,
        status: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE user_profiles
            SET subscription_tier = COALESCE($2, subscription_tier),
                subscription_status = $3,
                updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(tier)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
