//! Time-bounded geolocation cache shielding redirects from slow lookups.

use dashmap::DashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::debug;

use super::provider::{GeoError, GeoProvider};

/// Location reported for loopback clients.
pub const LOCALHOST: &str = "localhost";

/// Default lifetime of a cached location.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
struct CachedLocation {
    location: String,
    inserted_at: Instant,
}

/// Concurrent IP → location cache with per-entry expiry.
///
/// Entries expire lazily on read and are also removed by
/// [`purge_expired`](Self::purge_expired), which the server runs periodically
/// via [`spawn_sweeper`](Self::spawn_sweeper). No read ever returns an entry
/// older than the TTL.
///
/// Failed lookups are never cached. Two concurrent misses for the same IP
/// may both reach the provider; the last insert wins.
pub struct GeoCache {
    provider: Arc<dyn GeoProvider>,
    entries: DashMap<String, CachedLocation>,
    ttl: Duration,
}

impl GeoCache {
    pub fn new(provider: Arc<dyn GeoProvider>, ttl: Duration) -> Self {
        Self {
            provider,
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Resolves a client IP to a location string.
    ///
    /// Loopback addresses resolve to [`LOCALHOST`] without touching the cache
    /// or the provider.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidIp`] if `ip` is not an IP address, or the
    /// provider's error on a failed lookup.
    pub async fn resolve(&self, ip: &str) -> Result<String, GeoError> {
        let addr: IpAddr = ip
            .trim()
            .parse()
            .map_err(|_| GeoError::InvalidIp(ip.to_string()))?;
        let addr = addr.to_canonical();

        if addr.is_loopback() {
            return Ok(LOCALHOST.to_string());
        }

        let key = addr.to_string();

        if let Some(location) = self.get_fresh(&key) {
            debug!(ip = %key, "Geo cache HIT");
            return Ok(location);
        }

        debug!(ip = %key, "Geo cache MISS");
        let location = self.provider.lookup(&key).await?;

        self.entries.insert(
            key,
            CachedLocation {
                location: location.clone(),
                inserted_at: Instant::now(),
            },
        );

        Ok(location)
    }

    fn get_fresh(&self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                return Some(entry.location.clone());
            }
            Some(_) => true,
            None => false,
        };

        // The read guard is released above; removing while holding it would deadlock.
        if expired {
            self.entries
                .remove_if(key, |_, entry| entry.inserted_at.elapsed() >= self.ttl);
        }

        None
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
        before.saturating_sub(self.entries.len())
    }

    /// Number of entries currently held, including not-yet-swept expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Spawns a background task purging expired entries every `interval`.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let cache = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let removed = cache.purge_expired();
                if removed > 0 {
                    debug!(removed, remaining = cache.len(), "Purged expired geo cache entries");
                }
            }
        })
    }
}
