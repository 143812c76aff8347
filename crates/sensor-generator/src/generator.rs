//! Random record generation against a static topology.

use crate::record::{Record, MAX_META_ID};
use crate::topology::{Topology, TopologyError};
use chrono::{DateTime, SubsecRound, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use indexmap::IndexMap;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Invalid topology: {0}")]
    Topology(#[from] TopologyError),

    /// A lookup came back empty. Unreachable for a validated topology.
    #[error("Nothing to choose from: {0}")]
    EmptyChoice(String),
}

/// Produces one fresh [`Record`] per call.
///
/// With a seed the node, sensor, `meta_id` and feature values are
/// reproducible; timestamps always come from the clock unless
/// [`RecordGenerator::next_record_at`] is used.
pub struct RecordGenerator {
    topology: &'static Topology,
    rng: StdRng,
    generated: u64,
}

impl RecordGenerator {
    /// Create a generator. `seed = None` seeds from OS entropy.
    pub fn new(topology: &'static Topology, seed: Option<u64>) -> Result<Self, GeneratorError> {
        topology.validate()?;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            topology,
            rng,
            generated: 0,
        })
    }

    /// Number of records generated so far.
    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Generate a record stamped with the current UTC time.
    pub fn next_record(&mut self) -> Result<Record, GeneratorError> {
        self.next_record_at(Utc::now())
    }

    /// Generate a record stamped with `now`.
    pub fn next_record_at(&mut self, now: DateTime<Utc>) -> Result<Record, GeneratorError> {
        let meta_id = self.rng.gen_range(0..=MAX_META_ID);

        let node = self
            .topology
            .nodes()
            .choose(&mut self.rng)
            .ok_or_else(|| GeneratorError::EmptyChoice("nodes".to_string()))?;

        let sensor = *node
            .sensors
            .choose(&mut self.rng)
            .ok_or_else(|| GeneratorError::EmptyChoice(format!("sensors of {}", node.id)))?;

        let features = self
            .topology
            .features_for(sensor)
            .ok_or_else(|| GeneratorError::EmptyChoice(format!("features of {sensor}")))?;

        // Standard distribution for f64 samples [0, 1)
        let data: IndexMap<String, f64> = features
            .iter()
            .map(|feature| (feature.to_string(), self.rng.gen::<f64>()))
            .collect();

        self.generated += 1;

        Ok(Record {
            meta_id,
            node_id: node.id.to_string(),
            sensor: sensor.to_string(),
            feature_of_interest: None,
            data,
            // Truncated to the precision the payload carries
            datetime: now.naive_utc().trunc_subsecs(6),
        })
    }
}
