use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::SolverError;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Tuning knobs of the genetic search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub population_size: usize,
    pub elitism_rate: f64,
    /// Seed of the generation budget; a tenth of it is the stagnation limit
    pub max_generations_without_improvement: usize,
    /// Initial and reset value of the sliding mutation intensity
    pub mutation_rate: f64,
    /// Adaptive weight floor per strategy, in percent
    pub minimum_strategy_percentage: f64,
    pub unit_of_meaning_size: usize,
    pub use_hill_climbing: bool,
    pub only_permute_new_genes_while_hill_climbing: bool,
    pub use_fast_search: bool,
    pub random_seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            elitism_rate: 0.1,
            max_generations_without_improvement: 16384,
            mutation_rate: 0.5,
            minimum_strategy_percentage: 2.0,
            unit_of_meaning_size: 1,
            use_hill_climbing: false,
            only_permute_new_genes_while_hill_climbing: false,
            use_fast_search: false,
            random_seed: None,
        }
    }
}

impl SolverConfig {
    /// Number of top candidates copied unchanged into the next generation
    pub fn elite_count(&self) -> usize {
        ((self.population_size as f64 * self.elitism_rate).floor() as usize)
            .max(1)
            .min(self.population_size.saturating_sub(1))
    }

    /// Consecutive generations without a qualifying survivor before giving up
    pub fn stagnation_limit(&self) -> usize {
        (self.max_generations_without_improvement / 10).max(1)
    }

    /// Upper bound on fresh survivors merged per generation
    pub fn survivor_cap(&self) -> usize {
        if self.use_fast_search {
            10
        } else {
            ((self.population_size as f64 * self.mutation_rate).ceil() as usize).max(1)
        }
    }
}

impl ConfigSection for SolverConfig {
    fn section_name() -> &'static str {
        "solver"
    }

    fn validate(&self) -> Result<(), SolverError> {
        if self.population_size < 2 {
            return Err(SolverError::Configuration(
                "Population size must be at least 2".to_string()
            ));
        }
        if !(0.0..=0.5).contains(&self.elitism_rate) {
            return Err(SolverError::Configuration(
                "Elitism rate must be between 0 and 0.5".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SolverError::Configuration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        if !(0.0..=100.0).contains(&self.minimum_strategy_percentage) {
            return Err(SolverError::Configuration(
                "Minimum strategy percentage must be between 0 and 100".to_string()
            ));
        }
        if self.unit_of_meaning_size == 0 {
            return Err(SolverError::Configuration(
                "Unit of meaning size must be at least 1".to_string()
            ));
        }
        if self.max_generations_without_improvement < 10 {
            return Err(SolverError::Configuration(
                "Max generations without improvement must be at least 10".to_string()
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Solver".to_string(),
            fields: vec![
                FieldManifest::new(
                    "population_size",
                    "integer",
                    json!(300),
                    Some((2.0, 100_000.0)),
                    "Number of candidates per generation",
                ),
                FieldManifest::new(
                    "elitism_rate",
                    "float",
                    json!(0.1),
                    Some((0.0, 0.5)),
                    "Fraction of the population copied unchanged",
                ),
                FieldManifest::new(
                    "max_generations_without_improvement",
                    "integer",
                    json!(16384),
                    Some((10.0, 1_000_000.0)),
                    "Initial generation budget",
                ),
                FieldManifest::new(
                    "mutation_rate",
                    "float",
                    json!(0.5),
                    Some((0.0, 1.0)),
                    "Initial sliding mutation intensity",
                ),
                FieldManifest::new(
                    "minimum_strategy_percentage",
                    "float",
                    json!(2.0),
                    Some((0.0, 100.0)),
                    "Lowest selection weight any strategy can fall to",
                ),
                FieldManifest::new(
                    "unit_of_meaning_size",
                    "integer",
                    json!(1),
                    Some((1.0, 10_000.0)),
                    "Genes added per hill-climbing round",
                ),
                FieldManifest::new(
                    "use_hill_climbing",
                    "bool",
                    json!(false),
                    None,
                    "Grow the sequence one unit of meaning at a time",
                ),
                FieldManifest::new(
                    "only_permute_new_genes_while_hill_climbing",
                    "bool",
                    json!(false),
                    None,
                    "Freeze genes solved in earlier rounds",
                ),
                FieldManifest::new(
                    "use_fast_search",
                    "bool",
                    json!(false),
                    None,
                    "Merge at most 10 fresh survivors per generation",
                ),
                FieldManifest::new(
                    "random_seed",
                    "integer",
                    serde_json::Value::Null,
                    None,
                    "Fixed seed for reproducible runs",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_mutation_rate() {
        let config = SolverConfig {
            mutation_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SolverError::Configuration(_))));
    }

    #[test]
    fn test_derived_budgets() {
        let config = SolverConfig {
            population_size: 2048,
            max_generations_without_improvement: 1000,
            ..Default::default()
        };
        assert_eq!(config.elite_count(), 204);
        assert_eq!(config.stagnation_limit(), 100);
        assert_eq!(config.survivor_cap(), 1024);

        let fast = SolverConfig {
            use_fast_search: true,
            ..config
        };
        assert_eq!(fast.survivor_cap(), 10);
    }

    #[test]
    fn test_manifest_lists_every_field() {
        let manifest = SolverConfig::default().to_manifest();
        assert_eq!(manifest.fields.len(), 10);
        let field = manifest.field("minimum_strategy_percentage").unwrap();
        assert_eq!(field.max, Some(100.0));
    }
}
