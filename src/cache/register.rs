//! 缓存插件注册表

use crate::cache::ObjectCache;
use crate::errors::{ExamAdminError, Result};
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, PoisonError, RwLock},
};
use tracing::{debug, warn};

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

/// 内置的兜底后端
pub const FALLBACK_CACHE: &str = "moka";

static OBJECT_CACHE_REGISTRY: Lazy<RwLock<HashMap<String, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_object_cache_plugin<S: Into<String>>(name: S, constructor: ObjectCacheConstructor) {
    OBJECT_CACHE_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.into(), constructor);
}

pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    OBJECT_CACHE_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .cloned()
}

pub fn debug_object_cache_registry() {
    let registry = OBJECT_CACHE_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    let mut names: Vec<_> = registry.keys().cloned().collect();
    names.sort();
    debug!("Registered object cache plugins: {:?}", names);
}

/// 按名称创建缓存；不存在或创建失败时回退到 moka
pub async fn create_object_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    match get_object_cache_plugin(name) {
        Some(constructor) => match constructor().await {
            Ok(cache) => return Ok(Arc::from(cache)),
            Err(e) if name != FALLBACK_CACHE => {
                warn!("Failed to create {} cache: {}, falling back to {}", name, e, FALLBACK_CACHE);
            }
            Err(e) => return Err(e),
        },
        None if name != FALLBACK_CACHE => {
            warn!("Cache backend '{}' not registered, falling back to {}", name, FALLBACK_CACHE);
        }
        None => {}
    }

    let constructor = get_object_cache_plugin(FALLBACK_CACHE).ok_or_else(|| {
        ExamAdminError::cache_plugin_not_found(format!("No cache backend available (tried: {name})"))
    })?;
    Ok(Arc::from(constructor().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheResult;

    #[tokio::test]
    async fn test_unknown_backend_falls_back_to_moka() {
        let cache = create_object_cache("memcached").await.unwrap();
        cache.insert_raw("k".into(), "v".into(), 0).await;
        assert_eq!(cache.get_raw("k").await, CacheResult::Found("v".into()));
    }
}
