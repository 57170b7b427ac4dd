use crate::assistant::service::ServiceId;
use crate::assistant::store::{self, StoreError};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Which services the user has "connected". No real OAuth happens
/// anywhere; membership in this set is the whole simulation. There is
/// deliberately no disconnect operation, matching the widget this
/// replaces.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    slot_path: PathBuf,
    connected: BTreeSet<ServiceId>,
}

impl ServiceRegistry {
    pub fn new(slot_path: PathBuf) -> Self {
        Self {
            slot_path,
            connected: BTreeSet::new(),
        }
    }

    /// Loads the persisted set from the default slot, reporting any
    /// recoverable damage as warning strings.
    pub fn load_default() -> (Self, Vec<String>) {
        Self::load_from(store::default_slot_path())
    }

    pub fn load_from(slot_path: PathBuf) -> (Self, Vec<String>) {
        let (connected, warnings) = store::load(&slot_path);
        (
            Self {
                slot_path,
                connected,
            },
            warnings,
        )
    }

    pub fn is_connected(&self, service: ServiceId) -> bool {
        self.connected.contains(&service)
    }

    pub fn connected(&self) -> &BTreeSet<ServiceId> {
        &self.connected
    }

    /// Idempotent: connecting an already-connected service changes
    /// nothing. The set is persisted after every mutation.
    pub fn connect(&mut self, service: ServiceId) -> Result<(), StoreError> {
        self.connected.insert(service);
        self.save()
    }

    pub fn save(&self) -> Result<(), StoreError> {
        store::save(&self.slot_path, &self.connected)
    }

    /// Required minus connected, preserving the order `required` was
    /// supplied in. The gating message lists services in this order.
    pub fn missing(&self, required: &[ServiceId]) -> Vec<ServiceId> {
        required
            .iter()
            .copied()
            .filter(|service| !self.connected.contains(service))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceRegistry;
    use crate::assistant::service::ServiceId;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_slot(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be monotonic")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "celesta_registry_{prefix}_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn connect_is_idempotent() {
        let path = temp_slot("idempotent");
        let mut registry = ServiceRegistry::new(path.clone());

        registry.connect(ServiceId::Gmail).expect("connect should save");
        let once = registry.connected().clone();
        registry.connect(ServiceId::Gmail).expect("connect should save");
        assert_eq!(registry.connected(), &once);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn save_then_load_into_fresh_registry_matches() {
        let path = temp_slot("round_trip");
        let mut registry = ServiceRegistry::new(path.clone());
        registry.connect(ServiceId::Maps).expect("connect should save");
        registry
            .connect(ServiceId::Calendar)
            .expect("connect should save");

        let (restored, warnings) = ServiceRegistry::load_from(path.clone());
        assert!(warnings.is_empty());
        assert_eq!(restored.connected(), registry.connected());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_preserves_required_order() {
        let path = temp_slot("ordering");
        let mut registry = ServiceRegistry::new(path.clone());
        registry
            .connect(ServiceId::Calendar)
            .expect("connect should save");

        let required = [ServiceId::Gmail, ServiceId::Calendar, ServiceId::Twitter];
        assert_eq!(
            registry.missing(&required),
            vec![ServiceId::Gmail, ServiceId::Twitter]
        );

        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_is_empty_when_everything_is_connected() {
        let path = temp_slot("all_connected");
        let mut registry = ServiceRegistry::new(path.clone());
        registry.connect(ServiceId::Gmail).expect("connect should save");

        assert!(registry.missing(&[ServiceId::Gmail]).is_empty());
        assert!(registry.missing(&[]).is_empty());

        let _ = fs::remove_file(path);
    }
}
