//! 进程内 TTL 缓存
//!
//! 扁平的 key → value 映射，过期条目只在下一次读取同一个 key 时惰性删除，
//! 没有后台清理任务。值以类型擦除的方式存储，读取时按类型还原。

use dashmap::DashMap;
use std::any::Any;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

pub const DEFAULT_TTL: Duration = Duration::from_millis(60_000);
pub const KEY_DELIMITER: &str = ":";

struct CacheEntry {
    data: Box<dyn Any + Send + Sync>,
    timestamp: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.timestamp.elapsed() > ttl
    }
}

pub struct TtlCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// 由操作名和参数拼接缓存 key，调用方需按固定顺序传入参数
    pub fn key(parts: &[&str]) -> String {
        parts.join(KEY_DELIMITER)
    }

    /// 读取未过期的值；过期条目在此处被删除。
    /// 以不同类型读取已存储的值视为不存在。
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired(self.ttl))
            .is_some()
        {
            debug!("缓存过期: {}", key);
            return None;
        }

        let entry = self.entries.get(key)?;
        entry.data.downcast_ref::<T>().cloned()
    }

    pub fn set<T>(&self, key: impl Into<String>, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.entries.insert(
            key.into(),
            CacheEntry {
                data: Box::new(value),
                timestamp: Instant::now(),
            },
        );
    }

    /// `None` 清空全部；否则删除 key 中包含 `pattern` 子串的所有条目
    pub fn invalidate(&self, pattern: Option<&str>) {
        match pattern {
            None => {
                self.entries.clear();
                debug!("缓存已全部清空");
            }
            Some(pattern) => {
                let before = self.entries.len();
                self.entries.retain(|key, _| !key.contains(pattern));
                debug!(
                    "缓存失效: 模式 '{}'，删除 {} 条",
                    pattern,
                    before.saturating_sub(self.entries.len())
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
