//! Per-portal client cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use cfphub_core::{Portal, PortalClientFactory, PortalClientPort, PortalError, PortalType};
use tracing::debug;

use crate::client::{DefaultCfpDevClient, DefaultDev2NextClient, DefaultSessionizeClient};
use crate::config::PortalClientConfig;
use crate::error::PortalHttpError;

/// A cached client together with the portal it was built for.
struct CachedClient {
    portal: Portal,
    client: Arc<dyn PortalClientPort>,
}

impl CachedClient {
    fn serves(&self, portal: &Portal) -> bool {
        self.portal.base_url == portal.base_url && self.portal.portal_type == portal.portal_type
    }
}

/// Builds portal clients and caches them by portal name.
///
/// The cache lock is held while a client is built, so concurrent first
/// access to the same portal creates exactly one client. A cached client is
/// only reused for the same base URL and portal type; otherwise it is
/// replaced.
pub struct PortalClientRegistry {
    config: PortalClientConfig,
    clients: Mutex<HashMap<String, CachedClient>>,
}

impl PortalClientRegistry {
    pub fn new(config: PortalClientConfig) -> Self {
        Self {
            config,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached clients.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CachedClient>> {
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn build(&self, portal: &Portal) -> Result<Arc<dyn PortalClientPort>, PortalHttpError> {
        let portal = portal.clone();
        Ok(match portal.portal_type {
            PortalType::CfpDev => Arc::new(DefaultCfpDevClient::new(portal, &self.config)?),
            PortalType::Sessionize => {
                Arc::new(DefaultSessionizeClient::new(portal, &self.config)?)
            }
            PortalType::Dev2Next => Arc::new(DefaultDev2NextClient::new(portal, &self.config)?),
        })
    }
}

impl PortalClientFactory for PortalClientRegistry {
    fn client_for(&self, portal: &Portal) -> Result<Arc<dyn PortalClientPort>, PortalError> {
        let mut clients = self.lock();
        match clients.get(&portal.name) {
            Some(cached) if cached.serves(portal) => return Ok(Arc::clone(&cached.client)),
            Some(_) => debug!(
                target: "cfphub.http",
                portal = %portal.name,
                "Portal changed, rebuilding client"
            ),
            None => {}
        }

        let client = self.build(portal).map_err(|e| PortalError::Configuration {
            message: format!("cannot create client for portal '{}': {e}", portal.name),
        })?;
        debug!(
            target: "cfphub.http",
            portal = %portal.name,
            portal_type = portal.portal_type.as_str(),
            "Created portal client"
        );
        clients.insert(
            portal.name.clone(),
            CachedClient {
                portal: portal.clone(),
                client: Arc::clone(&client),
            },
        );
        Ok(client)
    }

    fn evict(&self, portal_name: &str) {
        if self.lock().remove(portal_name).is_some() {
            debug!(target: "cfphub.http", portal = portal_name, "Evicted portal client");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PortalClientRegistry {
        PortalClientRegistry::new(PortalClientConfig::new())
    }

    #[test]
    fn test_clients_are_cached_per_portal() {
        let registry = registry();
        let devoxx = Portal::new("devoxxuk", "https://devoxxuk.cfp.dev", PortalType::CfpDev);
        let jfall = Portal::new("jfall", "https://sessionize.com", PortalType::Sessionize);

        let first = registry.client_for(&devoxx).unwrap();
        let second = registry.client_for(&devoxx).unwrap();
        let other = registry.client_for(&jfall).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(first.portal_name(), "devoxxuk");
        assert_eq!(other.portal_name(), "jfall");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_evict_forces_rebuild() {
        let registry = registry();
        let portal = Portal::new("dev2next", "https://cfp.dev2next.com", PortalType::Dev2Next);

        let first = registry.client_for(&portal).unwrap();
        registry.evict("dev2next");
        assert!(registry.is_empty());

        let second = registry.client_for(&portal).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));

        registry.evict("unknown");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_changed_portal_gets_a_new_client() {
        let registry = registry();
        let old = Portal::new("devoxx", "https://old.cfp.dev", PortalType::CfpDev);
        let moved = Portal::new("devoxx", "https://sessionize.com", PortalType::Sessionize);

        let first = registry.client_for(&old).unwrap();
        let second = registry.client_for(&moved).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);

        // Same name and type, different base URL.
        let edited = Portal::new("devoxx", "https://new.cfp.dev", PortalType::Sessionize);
        let third = registry.client_for(&edited).unwrap();
        assert!(!Arc::ptr_eq(&second, &third));

        // Switching back rebuilds again, then caches.
        let fourth = registry.client_for(&old).unwrap();
        let fifth = registry.client_for(&old).unwrap();
        assert!(!Arc::ptr_eq(&third, &fourth));
        assert!(Arc::ptr_eq(&fourth, &fifth));
    }

    #[test]
    fn test_concurrent_first_access_builds_once() {
        let registry = Arc::new(registry());
        let portal = Portal::new("devoxxuk", "https://devoxxuk.cfp.dev", PortalType::CfpDev);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let portal = portal.clone();
                std::thread::spawn(move || registry.client_for(&portal).unwrap())
            })
            .collect();
        let clients: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(clients.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(registry.len(), 1);
    }
}
