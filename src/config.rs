//! Search configuration.
//!
//! None of these settings change which move is chosen; they only trade
//! memory and threads for speed.

/// Settings for [`crate::minimax::MinimaxBot`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Cache exact values of positions reached more than once during a
    /// single search. The cache is dropped when the search returns.
    pub transposition_table: bool,

    /// Worker threads for scoring root moves. `1` searches on the calling
    /// thread only.
    pub threads: usize,

    /// Roots with fewer legal moves than this are searched sequentially.
    pub parallel_min_moves: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            transposition_table: true,
            threads: num_cpus::get(),
            parallel_min_moves: 4,
        }
    }
}

impl SearchConfig {
    /// Single-threaded search that still uses a transposition table.
    pub fn sequential() -> Self {
        Self {
            threads: 1,
            ..Default::default()
        }
    }

    /// Plain exhaustive minimax: no cache, no worker threads.
    pub fn exhaustive() -> Self {
        Self {
            transposition_table: false,
            threads: 1,
            ..Default::default()
        }
    }

    /// Default settings with the given number of worker threads.
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
            ..Default::default()
        }
    }

    /// Whether a root with `moves` legal moves should be split across threads.
    pub fn is_parallel(&self, moves: usize) -> bool {
        self.threads > 1 && moves >= self.parallel_min_moves.max(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhaustive_disables_everything() {
        let config = SearchConfig::exhaustive();
        assert!(!config.transposition_table);
        assert!(!config.is_parallel(9));
    }

    #[test]
    fn parallel_threshold() {
        let config = SearchConfig {
            threads: 4,
            ..SearchConfig::sequential()
        };
        assert!(config.is_parallel(4));
        assert!(!config.is_parallel(3));
        assert!(!SearchConfig::sequential().is_parallel(9));
    }

    #[test]
    fn with_threads_never_zero() {
        assert_eq!(SearchConfig::with_threads(0).threads, 1);
        assert_eq!(SearchConfig::with_threads(8).threads, 8);
    }
}
