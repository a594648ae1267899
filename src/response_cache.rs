use serde_json::Value;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

const MAX_ENTRIES: usize = 1024;

#[derive(Clone)]
struct CacheItem {
    value: Value,
    cached_at: Instant,
}

/// 报表响应缓存
///
/// 缓存完整的响应体，数据与分页元数据始终来自同一次计算。
pub struct ResponseCache<K> {
    items: Mutex<HashMap<K, CacheItem>>,
    cache_duration: Duration,
}

impl<K: Eq + Hash + Clone> ResponseCache<K> {
    pub fn new(cache_duration: Duration) -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            cache_duration,
        }
    }

    fn is_expired(&self, item: &CacheItem) -> bool {
        item.cached_at.elapsed() > self.cache_duration
    }

    pub fn get(&self, key: &K) -> Option<Value> {
        let items = self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        items
            .get(key)
            .filter(|item| !self.is_expired(item))
            .map(|item| item.value.clone())
    }

    pub fn insert(&self, key: K, value: Value) {
        let mut items = self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if items.len() >= MAX_ENTRIES && !items.contains_key(&key) {
            items.retain(|_, item| item.cached_at.elapsed() <= self.cache_duration);
            if items.len() >= MAX_ENTRIES {
                debug!("响应缓存已满，清空 {} 项", items.len());
                items.clear();
            }
        }
        items.insert(key, CacheItem {
            value,
            cached_at: Instant::now(),
        });
    }

    /// 清理过期缓存
    pub fn cleanup(&self) {
        let mut items = self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        items.retain(|_, item| item.cached_at.elapsed() <= self.cache_duration);
        debug!("缓存清理完成，剩余项目: {}", items.len());
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
