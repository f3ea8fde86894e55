use rand::Rng;
use serde::{Deserialize, Serialize};
use symbios_population::{
    Breeder, EvolutionConfig, Evaluator, Genotype, Individual, Phenotype, Population, Replacement,
    algorithms::truncation::TruncationGA,
};
use tracing::Level;

const GENOME_LEN: usize = 64;

#[derive(Clone, Serialize, Deserialize, Debug)]
struct Bits(Vec<bool>);

impl Genotype for Bits {
    fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for bit in &mut self.0 {
            *bit = rng.random_bool(0.5);
        }
    }
}

struct OneMax;
impl Evaluator<Phenotype<Bits>> for OneMax {
    fn evaluate(&self, p: &Phenotype<Bits>) -> f64 {
        p.genotype.0.iter().filter(|&&b| b).count() as f64
    }
}

/// Uniform crossover of two random parents followed by 1/L bit flips.
struct UniformFlip;
impl Breeder<Phenotype<Bits>> for UniformFlip {
    fn breed<R: Rng>(
        &self,
        parents: &Population<Phenotype<Bits>>,
        count: usize,
        rng: &mut R,
    ) -> Vec<Phenotype<Bits>> {
        (0..count)
            .map(|_| {
                let a = &parents[rng.random_range(0..parents.len())].genotype.0;
                let b = &parents[rng.random_range(0..parents.len())].genotype.0;
                let child = a
                    .iter()
                    .zip(b)
                    .map(|(&x, &y)| {
                        let bit = if rng.random_bool(0.5) { x } else { y };
                        if rng.random_bool(1.0 / GENOME_LEN as f64) {
                            !bit
                        } else {
                            bit
                        }
                    })
                    .collect();
                Phenotype::new(Bits(child))
            })
            .collect()
    }
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = EvolutionConfig {
        population_size: 30,
        offspring_size: 60,
        replacement: Replacement::Plus,
        max_generations: 200,
        seed: 42,
    };
    let template = Phenotype::new(Bits(vec![false; GENOME_LEN]));

    let mut ga = match TruncationGA::new(&template, UniformFlip, config) {
        Ok(ga) => ga,
        Err(err) => {
            tracing::error!(%err, "invalid configuration");
            return;
        }
    };

    match ga.run(&OneMax) {
        Ok(history) => {
            if let Some(last) = history.last() {
                println!(
                    "Gen {}: best {} avg {:.2} stdev {:.2}",
                    last.generation, last.stats.best, last.stats.average, last.stats.stdev
                );
            }
        }
        Err(err) => {
            tracing::error!(%err, "run aborted");
            return;
        }
    }

    if let Ok(best) = ga.best() {
        let bits: String = best
            .genotype
            .0
            .iter()
            .map(|&b| if b { '1' } else { '0' })
            .collect();
        println!("Best ({}): {}", best.fitness(), bits);
    }
}
