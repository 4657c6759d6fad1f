/// Validated engine configuration: output key, default action and the
/// ordered `(condition, action)` pairs.
///
/// With the `serde` feature this deserializes from e.g.
/// `{"key": "action", "default_action": "high", "rules": [["score < 80", "low"]]}`;
/// each rule must be a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    pub key: String,
    pub default_action: String,
    pub rules: Vec<(String, String)>,
}

/// Minimum rows before rule masks are computed on the rayon pool.
pub const DEFAULT_PARALLEL_MIN_ROWS: usize = 10_000;

/// Controls parallel mask computation. Has no effect without the `parallel`
/// feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    pub enabled: bool,
    /// Tables with fewer rows are evaluated on the calling thread.
    pub min_rows: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_rows: DEFAULT_PARALLEL_MIN_ROWS,
        }
    }
}

impl ParallelConfig {
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub(crate) fn should_parallelize(&self, rows: usize, rules: usize) -> bool {
        cfg!(feature = "parallel") && self.enabled && rules > 1 && rows >= self.min_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_threshold() {
        let config = ParallelConfig {
            enabled: true,
            min_rows: 100,
        };
        assert!(!config.should_parallelize(99, 4));
        assert!(!config.should_parallelize(100, 1));
        assert_eq!(config.should_parallelize(100, 4), cfg!(feature = "parallel"));
        assert!(!ParallelConfig::disabled().should_parallelize(1_000_000, 4));
    }
}
