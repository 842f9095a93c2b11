/// Bootstrap admin seeding
///
/// When an admin password is configured, startup ensures an `admin`
/// account exists so a fresh deployment is usable without a manual insert.
/// The check-then-create is idempotent across restarts.

use taskbook_shared::auth::password;
use taskbook_shared::models::user::{CreateUser, Role};
use taskbook_shared::store::UserStore;

/// Username of the seeded administrator account
pub const ADMIN_USERNAME: &str = "admin";

/// Email of the seeded administrator account
pub const ADMIN_EMAIL: &str = "admin@taskbook.dev";

/// Ensures the admin account exists, creating it if missing
///
/// # Errors
///
/// Returns an error if hashing or the store fails.
pub async fn ensure_admin(users: &dyn UserStore, admin_password: &str) -> anyhow::Result<()> {
    if users.find_by_username(ADMIN_USERNAME).await?.is_some() {
        tracing::debug!("admin account already present, skipping seed");
        return Ok(());
    }

    let password_hash = password::hash_password(admin_password)?;

    users
        .create(CreateUser {
            username: ADMIN_USERNAME.to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_hash,
            role: Role::Admin,
            enabled: true,
        })
        .await?;

    tracing::info!("seeded admin account");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskbook_shared::store::memory::MemUserStore;

    #[tokio::test]
    async fn test_seed_creates_admin_once() {
        let store = MemUserStore::new();

        ensure_admin(&store, "senha000").await.unwrap();
        ensure_admin(&store, "different-password").await.unwrap();

        let users = store.list().await.unwrap();
        assert_eq!(users.len(), 1);

        let admin = &users[0];
        assert_eq!(admin.username, ADMIN_USERNAME);
        assert_eq!(admin.role, Role::Admin);
        assert!(admin.enabled);
        assert!(password::verify_password("senha000", &admin.password_hash));
    }
}
