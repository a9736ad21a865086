//! Tunables for the graph engine.
//!
//! Every field has a default, so a partial document (JSON, TOML, ...) can be
//! deserialized into a [`GraphConfig`] and only override what it names.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

pub const DEFAULT_PRECISION: u32 = 1000;
pub const DEFAULT_BLOCK_SIZE: usize = 4096;
pub const DEFAULT_BUFFER_OPS_LIMIT: usize = 8 * 1024;
pub const DEFAULT_EXPANSION_MIN: usize = 1024;
pub const DEFAULT_EXPANSION_MAX: usize = 1024 * 1024;

/// Upper bound for `block_size`; larger blocks defeat the point of blocking.
const MAX_BLOCK_SIZE: usize = 1 << 20;

/// Layout of the block-backed adjacency structures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjacencyConfig {
    /// Capacity of a single sorted block before a new block is started.
    pub block_size: usize,
    /// Operations buffered in the hot tier before it is flushed.
    pub buffer_ops_limit: usize,
    /// Minimum growth step of the per-source block store array.
    pub expansion_min: usize,
    /// Maximum growth step of the per-source block store array.
    pub expansion_max: usize,
}

impl Default for AdjacencyConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            buffer_ops_limit: DEFAULT_BUFFER_OPS_LIMIT,
            expansion_min: DEFAULT_EXPANSION_MIN,
            expansion_max: DEFAULT_EXPANSION_MAX,
        }
    }
}

impl AdjacencyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(GraphError::InvalidConfig(format!(
                "block_size must be in 1..={}, got {}",
                MAX_BLOCK_SIZE, self.block_size
            )));
        }
        if self.buffer_ops_limit == 0 {
            return Err(GraphError::InvalidConfig(
                "buffer_ops_limit must be positive".to_string(),
            ));
        }
        if self.expansion_min == 0 || self.expansion_min > self.expansion_max {
            return Err(GraphError::InvalidConfig(format!(
                "expansion steps must satisfy 0 < min <= max, got min={} max={}",
                self.expansion_min, self.expansion_max
            )));
        }
        Ok(())
    }
}

/// Top-level graph configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Quantization steps per unit weight.
    pub precision: u32,
    /// Capacity hint for the node indexer.
    pub expected_nodes: usize,
    /// Capacity hint for the hash backend.
    pub expected_edges: usize,
    pub adjacency: AdjacencyConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            expected_nodes: 1024,
            expected_edges: 4096,
            adjacency: AdjacencyConfig::default(),
        }
    }
}

impl GraphConfig {
    pub fn with_precision(precision: u32) -> Self {
        Self {
            precision,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.precision <= 1 {
            return Err(GraphError::InvalidConfig(format!(
                "precision must be bigger than 1, got {}",
                self.precision
            )));
        }
        self.adjacency.validate()
    }
}
