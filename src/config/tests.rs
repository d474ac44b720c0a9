use super::*;
use rand::Rng;
use std::fs::File;
use std::io::Write;
use tempfile::{TempDir, tempdir};

/// Helper function to create a test configuration file
fn create_test_config_file(dir: &TempDir, content: &str) -> PathBuf {
    let config_path = dir.path().join("config.toml");
    let mut file = File::create(&config_path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    config_path
}

fn sample_config() -> Config {
    Config {
        shuffle_questions: false,
        shuffle_options: true,
        auto_advance_ms: 800,
        seed: Some(1),
        log_dir: None,
    }
}

/// Tests for Config::apply_update
#[test]
fn test_apply_update_with_all_values() {
    let update = ConfigUpdate {
        shuffle_questions: Some(true),
        shuffle_options: Some(false),
        auto_advance_ms: Some(2000),
        seed: Some(9),
        log_dir: Some(PathBuf::from("/tmp/logs")),
    };

    let updated = sample_config().apply_update(update);

    assert!(updated.shuffle_questions);
    assert!(!updated.shuffle_options);
    assert_eq!(updated.auto_advance_ms, 2000);
    assert_eq!(updated.seed, Some(9));
    assert_eq!(updated.log_dir, Some(PathBuf::from("/tmp/logs")));
}

#[test]
fn test_apply_update_with_partial_values() {
    let update = ConfigUpdate {
        auto_advance_ms: Some(0),
        ..Default::default()
    };

    let updated = sample_config().apply_update(update);

    assert_eq!(updated.auto_advance_ms, 0);
    assert!(updated.shuffle_options); // Unchanged
    assert_eq!(updated.seed, Some(1)); // Unchanged
}

#[test]
fn test_apply_update_with_no_values() {
    let updated = sample_config().apply_update(ConfigUpdate::default());
    assert_eq!(updated, sample_config());
}

#[test]
fn test_auto_advance_delay_conversion() {
    assert_eq!(sample_config().auto_advance_delay(), Duration::from_millis(800));
}

#[test]
fn test_seeded_session_rng_is_reproducible() {
    let config = sample_config();
    let first: u64 = config.session_rng().random();
    let second: u64 = config.session_rng().random();
    assert_eq!(first, second);
}

/// Tests for base_config
#[test]
fn test_base_config_defaults() {
    let config = base_config();

    assert!(!config.shuffle_questions);
    assert!(!config.shuffle_options);
    assert_eq!(config.auto_advance_ms, 1500);
    assert_eq!(config.seed, None);
    assert_eq!(config.log_dir, None);
}

/// Tests for config_from_args
#[test]
fn test_config_from_args_with_all_values() {
    let args = CliArgs {
        shuffle_questions: Some(true),
        shuffle_options: Some(true),
        auto_advance_ms: Some(300),
        seed: Some(42),
        log_dir: Some(PathBuf::from("logs")),
        debug: true,
    };

    let update = config_from_args(args);

    assert_eq!(update.shuffle_questions, Some(true));
    assert_eq!(update.shuffle_options, Some(true));
    assert_eq!(update.auto_advance_ms, Some(300));
    assert_eq!(update.seed, Some(42));
    assert_eq!(update.log_dir, Some(PathBuf::from("logs")));
}

#[test]
fn test_config_from_args_with_no_values() {
    let update = config_from_args(CliArgs::default());
    assert_eq!(update, ConfigUpdate::default());
}

/// Tests for config_from_file - successful cases
#[test]
fn test_config_from_file_with_no_path() {
    let update = config_from_file(None).unwrap();
    assert_eq!(update, ConfigUpdate::default());
}

#[test]
fn test_config_from_file_with_valid_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = create_test_config_file(
        &temp_dir,
        r#"
            shuffle_questions = true
            shuffle_options = true
            auto_advance_ms = 2500
            seed = 7
            log_dir = "/var/log/quizmaster"
        "#,
    );

    let result = config_from_file(Some(config_path));

    assert!(result.is_ok(), "Failed to parse config file: {:?}", result.err());
    let update = result.unwrap();
    assert_eq!(update.shuffle_questions, Some(true));
    assert_eq!(update.shuffle_options, Some(true));
    assert_eq!(update.auto_advance_ms, Some(2500));
    assert_eq!(update.seed, Some(7));
    assert_eq!(update.log_dir, Some(PathBuf::from("/var/log/quizmaster")));
}

#[test]
fn test_config_from_file_with_partial_values() {
    let temp_dir = tempdir().unwrap();
    let config_path = create_test_config_file(
        &temp_dir,
        r#"
            shuffle_options = true
            # Intentionally missing other fields
        "#,
    );

    let update = config_from_file(Some(config_path)).unwrap();
    assert_eq!(update.shuffle_options, Some(true));
    assert_eq!(update.shuffle_questions, None);
    assert_eq!(update.auto_advance_ms, None);
}

/// Tests for config_from_file - failure cases
#[test]
fn test_config_from_file_with_invalid_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = create_test_config_file(
        &temp_dir,
        r#"
            auto_advance_ms = "soon" # Type error
        "#,
    );

    let err = config_from_file(Some(config_path)).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}

#[test]
fn test_config_from_file_with_nonexistent_file() {
    let temp_dir = tempdir().unwrap();
    let nonexistent_path = temp_dir.path().join("nonexistent_config.toml");

    let update = config_from_file(Some(nonexistent_path)).unwrap();
    assert_eq!(update, ConfigUpdate::default());
}

/// Tests for layering
#[test]
fn test_config_precedence() {
    let args = CliArgs {
        seed: Some(3),
        ..Default::default()
    };

    let file_update = ConfigUpdate {
        seed: Some(1),
        auto_advance_ms: Some(900),
        ..Default::default()
    };

    let config = base_config()
        .apply_update(file_update)
        .apply_update(config_from_args(args));

    assert_eq!(config.seed, Some(3)); // From args
    assert_eq!(config.auto_advance_ms, 900); // From file
    assert!(!config.shuffle_options); // From base
}
