//! Reference data loading with hot reload support
//!
//! The three reference files are read once at start-up into an immutable
//! [`ReferenceData`] bundle. [`ReferenceStore`] keeps the current bundle behind
//! an [`ArcSwap`] so a reload swaps the whole bundle at once; callers holding
//! an older `Arc` keep reading the data they started with.

use super::allowed_transactions::AllowedTransactionRegistry;
use super::penalty_types::PenaltyTypeCatalogue;
use super::regime_descriptor::RegimeDescriptorCatalogue;
use crate::types::EngineError;
use arc_swap::ArcSwap;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default location of the allow-list file
pub const DEFAULT_ALLOWED_TRANSACTIONS_PATH: &str = "assets/allowed_transactions.yml";

/// Default location of the regime descriptor file
pub const DEFAULT_PENALTY_DETAILS_PATH: &str = "assets/penalty_details.yml";

/// Default location of the penalty type catalogue
pub const DEFAULT_PENALTY_TYPES_PATH: &str = "assets/penalty_types.yml";

/// Locations of the reference files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePaths {
    pub allowed_transactions: PathBuf,
    pub penalty_details: PathBuf,
    pub penalty_types: PathBuf,
}

impl Default for ReferencePaths {
    fn default() -> Self {
        Self {
            allowed_transactions: PathBuf::from(DEFAULT_ALLOWED_TRANSACTIONS_PATH),
            penalty_details: PathBuf::from(DEFAULT_PENALTY_DETAILS_PATH),
            penalty_types: PathBuf::from(DEFAULT_PENALTY_TYPES_PATH),
        }
    }
}

impl ReferencePaths {
    /// All three files inside one directory, using the default file names
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            allowed_transactions: dir.join("allowed_transactions.yml"),
            penalty_details: dir.join("penalty_details.yml"),
            penalty_types: dir.join("penalty_types.yml"),
        }
    }
}

/// Validated reference data, shared read-only between invocations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub allowed_transactions: AllowedTransactionRegistry,
    pub descriptors: RegimeDescriptorCatalogue,
    pub penalty_types: PenaltyTypeCatalogue,
}

impl ReferenceData {
    pub fn new(
        allowed_transactions: AllowedTransactionRegistry,
        descriptors: RegimeDescriptorCatalogue,
        penalty_types: PenaltyTypeCatalogue,
    ) -> Self {
        Self {
            allowed_transactions,
            descriptors,
            penalty_types,
        }
    }

    /// Load and validate all reference files
    ///
    /// # Arguments
    ///
    /// * `paths` - Locations of the three reference files
    /// * `disabled_subtypes` - Subtypes to drop from the penalty-bearing sets
    ///
    /// # Returns
    ///
    /// * `Ok(ReferenceData)` - Every file parsed and passed validation
    /// * `Err(EngineError::FileNotFound)` - A file does not exist
    /// * `Err(EngineError::ReferenceData)` - A file is unreadable, malformed or invalid
    pub fn load<S: AsRef<str>>(
        paths: &ReferencePaths,
        disabled_subtypes: &[S],
    ) -> Result<Self, EngineError> {
        let allowed_transactions: AllowedTransactionRegistry =
            read_yaml(&paths.allowed_transactions)?;

        let descriptors: RegimeDescriptorCatalogue = read_yaml(&paths.penalty_details)?;
        descriptors
            .validate()
            .map_err(|message| reference_error(&paths.penalty_details, message))?;

        let mut penalty_types: PenaltyTypeCatalogue = read_yaml(&paths.penalty_types)?;
        penalty_types
            .validate()
            .map_err(|message| reference_error(&paths.penalty_types, message))?;
        penalty_types.disable_subtypes(disabled_subtypes);

        Ok(Self::new(allowed_transactions, descriptors, penalty_types))
    }
}

fn reference_error(path: &Path, message: impl Into<String>) -> EngineError {
    EngineError::reference_data(&path.display().to_string(), message)
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, EngineError> {
    if !path.exists() {
        return Err(EngineError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| reference_error(path, e.to_string()))?;
    serde_yaml::from_str(&content).map_err(|e| reference_error(path, e.to_string()))
}

/// Holder of the current [`ReferenceData`], swappable without locking readers
pub struct ReferenceStore {
    current: ArcSwap<ReferenceData>,
    source: Option<(ReferencePaths, Vec<String>)>,
}

impl ReferenceStore {
    /// Wrap already loaded data; [`ReferenceStore::reload`] is unavailable
    pub fn new(data: ReferenceData) -> Self {
        Self {
            current: ArcSwap::from_pointee(data),
            source: None,
        }
    }

    /// Load from files, remembering the paths for later reloads
    pub fn load<S: AsRef<str>>(
        paths: ReferencePaths,
        disabled_subtypes: &[S],
    ) -> Result<Self, EngineError> {
        let disabled: Vec<String> = disabled_subtypes
            .iter()
            .map(|subtype| subtype.as_ref().to_string())
            .collect();
        let data = ReferenceData::load(&paths, &disabled)?;

        Ok(Self {
            current: ArcSwap::from_pointee(data),
            source: Some((paths, disabled)),
        })
    }

    /// Current reference data
    #[inline]
    pub fn current(&self) -> Arc<ReferenceData> {
        self.current.load_full()
    }

    /// Re-read the reference files and swap them in
    ///
    /// On failure the current data stays in place.
    pub fn reload(&self) -> Result<(), EngineError> {
        let (paths, disabled) = self.source.as_ref().ok_or_else(|| {
            EngineError::reference_data("<memory>", "no reference file paths set")
        })?;

        let data = ReferenceData::load(paths, disabled)?;
        self.current.store(Arc::new(data));

        tracing::info!(
            allowed_transactions = %paths.allowed_transactions.display(),
            penalty_details = %paths.penalty_details.display(),
            penalty_types = %paths.penalty_types.display(),
            "Reference data reloaded"
        );
        Ok(())
    }

    /// Swap in reference data built in code
    pub fn replace(&self, data: ReferenceData) {
        self.current.store(Arc::new(data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Regime;
    use std::fs;
    use tempfile::TempDir;

    const ALLOWED: &str = r#"
allowed_transactions:
  SANCTIONS:
    "1":
      S1: true
"#;

    const DETAILS: &str = r#"
name: penalty details
details:
  SANCTIONS:
    Description: Sanctions Penalty Payment
    DescriptionId: penalty-sanctions
    ClassOfPayment: penalty-sanctions
    ResourceKind: penalty#sanctions
    ProductType: penalty-sanctions
    EmailReceivedAppId: penalty-payment-api.penalty_payment_received_email
    EmailMsgType: sanctions_penalty_payment_received_email
"#;

    const TYPES: &str = r#"
penalty_types:
  - regime: SANCTIONS
    transaction_type: "1"
    transaction_subtype: S1
    reason: Failure to file a confirmation statement
"#;

    fn write_reference_dir(types: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("allowed_transactions.yml"), ALLOWED).unwrap();
        fs::write(dir.path().join("penalty_details.yml"), DETAILS).unwrap();
        fs::write(dir.path().join("penalty_types.yml"), types).unwrap();
        dir
    }

    #[test]
    fn test_load_reference_files() {
        let dir = write_reference_dir(TYPES);
        let data = ReferenceData::load(&ReferencePaths::in_dir(dir.path()), &[] as &[&str]).unwrap();

        assert!(data
            .allowed_transactions
            .for_regime(Regime::Sanctions)
            .unwrap()
            .is_allowed("1", "S1"));
        assert_eq!(
            data.descriptors.get(Regime::Sanctions).unwrap().kind,
            "penalty#sanctions"
        );
        assert!(data
            .penalty_types
            .penalty_subtypes(Regime::Sanctions)
            .contains("1", "S1"));
    }

    #[test]
    fn test_load_applies_disabled_subtypes() {
        let dir = write_reference_dir(TYPES);
        let data = ReferenceData::load(&ReferencePaths::in_dir(dir.path()), &["S1"]).unwrap();

        assert!(data.penalty_types.penalty_subtypes(Regime::Sanctions).is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = ReferenceData::load(&ReferencePaths::in_dir(dir.path()), &[] as &[&str]);

        assert!(matches!(result, Err(EngineError::FileNotFound { .. })));
    }

    #[test]
    fn test_invalid_penalty_types_names_file() {
        let dir = write_reference_dir(
            r#"
penalty_types:
  - regime: SANCTIONS
    transaction_type: "1"
    transaction_subtype: S1
    reason: ""
"#,
        );
        let err = ReferenceData::load(&ReferencePaths::in_dir(dir.path()), &[] as &[&str])
            .unwrap_err();

        match err {
            EngineError::ReferenceData { path, message } => {
                assert!(path.ends_with("penalty_types.yml"));
                assert!(message.contains("empty reason"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_reload_swaps_data_for_new_readers_only() {
        let dir = write_reference_dir(TYPES);
        let store = ReferenceStore::load(ReferencePaths::in_dir(dir.path()), &[] as &[&str]).unwrap();
        let before = store.current();

        fs::write(
            dir.path().join("penalty_types.yml"),
            TYPES.replace("Failure to file a confirmation statement", "Updated reason"),
        )
        .unwrap();
        store.reload().unwrap();

        assert_eq!(
            before.penalty_types.reason_table().reason_for("S1"),
            Some("Failure to file a confirmation statement")
        );
        assert_eq!(
            store.current().penalty_types.reason_table().reason_for("S1"),
            Some("Updated reason")
        );
    }

    #[test]
    fn test_reload_failure_keeps_current_data() {
        let dir = write_reference_dir(TYPES);
        let store = ReferenceStore::load(ReferencePaths::in_dir(dir.path()), &[] as &[&str]).unwrap();

        fs::write(dir.path().join("penalty_types.yml"), "penalty_types: [").unwrap();
        assert!(store.reload().is_err());
        assert_eq!(
            store.current().penalty_types.reason_table().reason_for("S1"),
            Some("Failure to file a confirmation statement")
        );
    }

    #[test]
    fn test_in_memory_store_cannot_reload() {
        let store = ReferenceStore::new(ReferenceData::default());
        assert!(store.reload().is_err());

        store.replace(ReferenceData::new(
            AllowedTransactionRegistry::new(),
            RegimeDescriptorCatalogue::new("replaced"),
            PenaltyTypeCatalogue::default(),
        ));
        assert_eq!(store.current().descriptors.name, "replaced");
    }
}
