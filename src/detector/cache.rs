//! 匹配结果缓存
//! 以归一化键为键的有界缓存，超出容量时淘汰最早插入的条目（按插入顺序，不按访问顺序）

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

/// 缓存统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub capacity: usize,
    pub len: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// 有界匹配缓存
#[derive(Debug, Clone)]
pub struct MatchCache<V> {
    capacity: usize,
    entries: FxHashMap<String, V>,
    // 插入顺序，队首最早
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<V> MatchCache<V> {
    /// 容量为0时不缓存任何条目
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: FxHashMap::default(),
            order: VecDeque::with_capacity(capacity.min(1024)),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// 查询缓存（计入命中/未命中统计）
    pub fn get(&mut self, key: &str) -> Option<&V> {
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// 不计统计的查询
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 插入条目，返回被淘汰的键
    ///
    /// 已存在的键只更新值，不改变其插入位置。
    pub fn insert(&mut self, key: String, value: V) -> Option<String> {
        if self.capacity == 0 {
            return None;
        }
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            return None;
        }

        let mut evicted = None;
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                self.evictions += 1;
                debug!("Match cache full ({}), evicted {:?}", self.capacity, oldest);
                evicted = Some(oldest);
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, value);
        evicted
    }

    /// 当前键（按插入顺序）
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            capacity: self.capacity,
            len: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }
}
