use std::fs;
use std::path::Path;

use crate::models::config::ComparatorSettings;
use crate::models::error::ComparatorError;

/// Write settings as pretty-printed JSON.
pub fn write_settings(settings: &ComparatorSettings, path: &Path) -> Result<(), ComparatorError> {
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ComparatorError::StorageError(format!("failed to serialize settings: {}", e)))?;
    fs::write(path, json).map_err(|e| ComparatorError::StorageError(format!("failed to write settings: {}", e)))?;
    log::debug!("saved comparator settings to {}", path.display());
    Ok(())
}

/// Read and validate settings from a JSON file. Missing fields take defaults.
pub fn read_settings(path: &Path) -> Result<ComparatorSettings, ComparatorError> {
    let json = fs::read_to_string(path)
        .map_err(|e| ComparatorError::StorageError(format!("failed to read settings: {}", e)))?;
    let settings: ComparatorSettings = serde_json::from_str(&json)
        .map_err(|e| ComparatorError::StorageError(format!("failed to parse settings: {}", e)))?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("audio-latency-core-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn write_then_read() {
        let path = temp_path("round-trip");
        let settings = ComparatorSettings {
            source1_name: Some("Camera".into()),
            source2_name: Some("Mic/Aux".into()),
            add_sync_offset: false,
            window_ms: 50,
            range_ms: 400,
            decay_s: 2.5,
        };

        write_settings(&settings, &path).unwrap();
        let loaded = read_settings(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_file_is_storage_error() {
        let result = read_settings(&temp_path("does-not-exist"));
        assert!(matches!(result, Err(ComparatorError::StorageError(_))));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let path = temp_path("invalid");
        fs::write(&path, r#"{"window_ms": 0}"#).unwrap();

        let result = read_settings(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(ComparatorError::ConfigurationFailed(_))));
    }

    #[test]
    fn malformed_json_is_storage_error() {
        let path = temp_path("malformed");
        fs::write(&path, "{ not json").unwrap();

        let result = read_settings(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(ComparatorError::StorageError(_))));
    }
}
