use genesolver::config::{ConfigSection, LoggingConfig};
use genesolver::{ConfigManager, SolverConfig, SolverError};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("genesolver-{}-{}.toml", name, std::process::id()))
}

#[test]
fn test_save_then_load_preserves_values() {
    let path = temp_path("roundtrip");
    let writer = ConfigManager::new();
    writer
        .update(|config| {
            config.solver.population_size = 512;
            config.solver.use_hill_climbing = true;
            config.solver.random_seed = Some(1234);
            config.logging.level = "debug".to_string();
        })
        .unwrap();
    writer.save_to_file(&path).unwrap();

    let reader = ConfigManager::new();
    reader.load_from_file(&path).unwrap();
    assert_eq!(reader.get().unwrap(), writer.get().unwrap());

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_partial_file_keeps_defaults() {
    let path = temp_path("partial");
    std::fs::write(&path, "[solver]\nunit_of_meaning_size = 4\n").unwrap();

    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    let config = manager.get().unwrap();
    assert_eq!(config.solver.unit_of_meaning_size, 4);
    assert_eq!(config.solver.population_size, SolverConfig::default().population_size);
    assert_eq!(config.logging, LoggingConfig::default());

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_invalid_update_is_rejected_and_not_applied() {
    let manager = ConfigManager::new();
    let result = manager.update(|config| config.solver.population_size = 1);

    assert!(matches!(result, Err(SolverError::Configuration(_))));
    assert_eq!(manager.get().unwrap().solver.population_size, 300);
}

#[test]
fn test_layered_load_applies_file_and_environment() {
    let path = temp_path("layered");
    std::fs::write(&path, "[solver]\npopulation_size = 64\nmutation_rate = 0.2\n").unwrap();
    std::env::set_var("GENESOLVER_SOLVER__MINIMUM_STRATEGY_PERCENTAGE", "5");

    let manager = ConfigManager::new();
    manager.load_layered(Some(&path)).unwrap();
    let config = manager.get().unwrap().solver;
    assert_eq!(config.population_size, 64);
    assert_eq!(config.mutation_rate, 0.2);
    assert_eq!(config.minimum_strategy_percentage, 5.0);

    std::env::remove_var("GENESOLVER_SOLVER__MINIMUM_STRATEGY_PERCENTAGE");
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_unknown_log_level_fails_validation() {
    let config = LoggingConfig {
        level: "loud".to_string(),
    };
    assert!(config.validate().is_err());
}
