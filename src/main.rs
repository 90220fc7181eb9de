use anyhow::Context;
use genesolver::{strategies, ConfigManager, ConsoleProgressCallback, Solver};
use std::env;
use std::time::Instant;

const DEFAULT_TARGET: &str = "Hello World!";
const DEFAULT_ALPHABET: &str =
    " abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!.,?";

fn main() -> anyhow::Result<()> {
    // genesolver [config.toml] [target] [alphabet]
    let args: Vec<String> = env::args().collect();
    let config_path = args.get(1).filter(|p| !p.is_empty());
    let target = args.get(2).map(String::as_str).unwrap_or(DEFAULT_TARGET);
    let alphabet = args.get(3).map(String::as_str).unwrap_or(DEFAULT_ALPHABET);

    let manager = ConfigManager::new();
    manager
        .load_layered(config_path)
        .with_context(|| format!("loading configuration from {:?}", config_path))?;
    let config = manager.get()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level))
        .init();

    if let Some(missing) = target.chars().find(|c| !alphabet.contains(*c)) {
        anyhow::bail!("target symbol {:?} is not in the alphabet", missing);
    }

    let target_genes: Vec<char> = target.chars().collect();
    let mut solver = Solver::new(config.solver)?
        .with_strategies(strategies::builtin())
        .with_observer(Box::new(ConsoleProgressCallback));

    let start = Instant::now();
    let outcome = solver.search(target_genes.len(), alphabet, |genes: &str| {
        genes
            .chars()
            .zip(target_genes.iter())
            .filter(|(a, b)| a != *b)
            .count() as u64
    });

    println!("Best:        {}", outcome.best.sequence());
    println!("Fitness:     {}", outcome.best.fitness());
    println!("Generations: {}", outcome.generations);
    println!("Evaluations: {}", outcome.evaluations);
    println!("Seed:        {}", outcome.seed);
    println!("Elapsed:     {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
