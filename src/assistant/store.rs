use crate::assistant::service::ServiceId;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure writing the connected-services slot. Reads never fail; they
/// degrade to the empty set plus warnings.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write connected services: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode connected services: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_slot_path() -> PathBuf {
    home_dir().join(".celesta").join("connected_services.json")
}

/// Serializes the set as a JSON array of service tokens, written to a
/// temp file and renamed into place so a crash mid-write cannot leave a
/// half-written slot behind.
pub fn save(path: &Path, connected: &BTreeSet<ServiceId>) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let tokens: Vec<&str> = connected.iter().map(|service| service.token()).collect();
    let bytes = serde_json::to_vec_pretty(&tokens)?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, bytes)?;
    match fs::rename(&tmp_path, path) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if path.exists() {
                fs::remove_file(path)?;
                fs::rename(&tmp_path, path)?;
                Ok(())
            } else {
                Err(rename_err.into())
            }
        }
    }
}

/// Restores the connected set. A missing slot is the empty set; corrupt
/// JSON or unknown tokens are reported as warnings and skipped, never
/// surfaced to the caller as an error.
pub fn load(path: &Path) -> (BTreeSet<ServiceId>, Vec<String>) {
    let mut connected = BTreeSet::new();
    let mut warnings = Vec::new();

    if !path.exists() {
        return (connected, warnings);
    }

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) => {
            warnings.push(format!("failed to read {}: {err}", path.display()));
            return (connected, warnings);
        }
    };

    let tokens: Vec<String> = match serde_json::from_slice(&data) {
        Ok(tokens) => tokens,
        Err(err) => {
            warnings.push(format!("failed to parse {}: {err}", path.display()));
            return (connected, warnings);
        }
    };

    for token in tokens {
        match ServiceId::from_token(&token) {
            Some(service) => {
                connected.insert(service);
            }
            None => warnings.push(format!("unknown service token in slot: {token}")),
        }
    }

    (connected, warnings)
}

#[cfg(test)]
mod tests {
    use super::{load, save};
    use crate::assistant::service::ServiceId;
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_slot(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be monotonic")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "celesta_store_{prefix}_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn save_then_load_reproduces_the_set() {
        let path = temp_slot("round_trip");
        let mut connected = BTreeSet::new();
        connected.insert(ServiceId::Calendar);
        connected.insert(ServiceId::Gmail);

        save(&path, &connected).expect("slot should save");
        let (restored, warnings) = load(&path);
        assert_eq!(restored, connected);
        assert!(warnings.is_empty());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_slot_is_the_empty_set() {
        let path = temp_slot("missing");
        let (restored, warnings) = load(&path);
        assert!(restored.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn corrupt_slot_degrades_to_empty_with_warning() {
        let path = temp_slot("corrupt");
        fs::write(&path, b"not json at all").expect("fixture should write");

        let (restored, warnings) = load(&path);
        assert!(restored.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("failed to parse"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn unknown_tokens_are_skipped_not_fatal() {
        let path = temp_slot("unknown_token");
        fs::write(&path, br#"["gmail", "telegram"]"#).expect("fixture should write");

        let (restored, warnings) = load(&path);
        assert_eq!(restored, BTreeSet::from([ServiceId::Gmail]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("telegram"));

        let _ = fs::remove_file(path);
    }
}
