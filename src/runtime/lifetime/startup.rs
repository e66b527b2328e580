use crate::cache::{ObjectCache, register::create_object_cache};
use crate::config::AppConfig;
use crate::models::users::entities::{UserStatus, role_names};
use crate::models::users::requests::NewUser;
use crate::object_storage::{ObjectStorage, register::create_object_storage};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_ADMIN_USERNAME: &str = "admin";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub object_storage: Arc<dyn ObjectStorage>,
}

/// 初始化超级管理员账号
/// 没有任何 super_admin 时创建一个，密码取自 ADMIN_PASSWORD 或随机生成
async fn seed_super_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users_with_role(role_names::SUPER_ADMIN).await {
        Ok(count) if count > 0 => {
            debug!("Found {} super admin account(s), skipping seed", count);
            return;
        }
        Ok(_) => {
            info!("No super admin found, creating default account...");
        }
        Err(e) => {
            warn!("Failed to count super admins: {}, skipping seed", e);
            return;
        }
    }

    let password = std::env::var("ADMIN_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| {
            let pwd = generate_password(16);
            warn!("==========================================================");
            warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
            warn!("  Generated admin password: {}", pwd);
            warn!("  Please save this password or set ADMIN_PASSWORD env var");
            warn!("==========================================================");
            pwd
        });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping seed", e);
            return;
        }
    };

    let admin = NewUser {
        username: DEFAULT_ADMIN_USERNAME.to_string(),
        email: Some("admin@localhost".to_string()),
        student_id: None,
        password_hash,
        role: role_names::SUPER_ADMIN.to_string(),
        status: UserStatus::Active,
        full_name: Some("Administrator".to_string()),
        phone: None,
        state: None,
        district: None,
        region: None,
        college: None,
    };

    match storage.create_user(admin).await {
        Ok(user) => info!(
            "Default super admin created (ID: {}, username: {})",
            user.id, user.username
        ),
        Err(e) => warn!("Failed to create super admin: {}", e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存与对象存储
pub async fn prepare_server_startup() -> StartupContext {
    let config = AppConfig::get();

    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_super_admin(&storage).await;

    let cache = create_object_cache(&config.cache.cache_type)
        .await
        .expect("Failed to create cache");
    warn!("Cache backend initialized");

    let object_storage = create_object_storage(&config.object_storage.storage_type)
        .expect("Failed to create object storage");
    warn!(
        "Object storage '{}' initialized",
        config.object_storage.storage_type
    );

    StartupContext {
        storage,
        cache,
        object_storage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn test_seed_super_admin_runs_once() {
        let storage: Arc<dyn Storage> = test_support::storage().await;

        seed_super_admin(&storage).await;
        seed_super_admin(&storage).await;

        assert_eq!(
            storage
                .count_users_with_role(role_names::SUPER_ADMIN)
                .await
                .unwrap(),
            1
        );
        let admin = storage
            .get_user_by_login(DEFAULT_ADMIN_USERNAME)
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_active());
    }
}
