//! This module's primary struct is [`MinimaxBot`],
//! which runs exhaustive minimax on a game.
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use rustc_hash::FxBuildHasher;

use crate::config::SearchConfig;
use crate::game::*;

/// The outcome of a search from a non-terminal root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// The first root move, in child order, that reaches `value`.
    pub best_move: M,
    /// The minimax value of the root under optimal play by both sides.
    pub value: Utility,
    /// Positions visited, including the root and cache hits.
    pub nodes: usize,
}

/// State shared by one search call and dropped when it returns.
struct Search<G: GameState> {
    table: Option<DashMap<G, Utility, FxBuildHasher>>,
    nodes: AtomicUsize,
}

impl<G: GameState> Search<G> {
    fn new(config: &SearchConfig) -> Self {
        Self {
            table: config
                .transposition_table
                .then(|| DashMap::with_hasher(FxBuildHasher)),
            nodes: AtomicUsize::new(0),
        }
    }

    fn visit(&self) {
        self.nodes.fetch_add(1, Ordering::Relaxed);
    }

    fn cached(&self, state: &G) -> Option<Utility> {
        self.table.as_ref()?.get(state).map(|entry| *entry)
    }

    fn store(&self, state: &G, value: Utility) {
        if let Some(table) = &self.table {
            table.insert(state.clone(), value);
        }
    }

    fn value(&self, state: &G, player: Player) -> Utility {
        match player {
            Player::Maximizing => self.max_value(state),
            Player::Minimizing => self.min_value(state),
        }
    }

    fn max_value(&self, state: &G) -> Utility {
        self.visit();
        if state.is_terminal() {
            return state.utility();
        }
        if let Some(value) = self.cached(state) {
            return value;
        }

        let value = state
            .children()
            .into_iter()
            .map(|(_, child)| self.min_value(&child))
            .max()
            // a state with no moves is scored as finished
            .unwrap_or_else(|| state.utility());

        self.store(state, value);
        value
    }

    fn min_value(&self, state: &G) -> Utility {
        self.visit();
        if state.is_terminal() {
            return state.utility();
        }
        if let Some(value) = self.cached(state) {
            return value;
        }

        let value = state
            .children()
            .into_iter()
            .map(|(_, child)| self.max_value(&child))
            .min()
            .unwrap_or_else(|| state.utility());

        self.store(state, value);
        value
    }
}

/// Where root moves are scored.
enum Workers {
    Sequential,
    /// rayon's global pool, shared by every bot sized to the machine.
    Global,
    Pool(ThreadPool),
}

/// A bot that runs full-depth minimax.
///
/// Every call searches the whole game tree below the root, so the result
/// is exact. Nothing is remembered between calls: a bot can be shared
/// between threads and asked about unrelated positions.
///
/// The struct is parameterized on G, the type of a game that
/// implements [`crate::game::GameState`].
pub struct MinimaxBot<G>
where
    G: GameState,
{
    config: SearchConfig,
    workers: Workers,
    _game: PhantomData<fn() -> G>,
}

impl<G: GameState> MinimaxBot<G> {
    /// Create a MinimaxBot with the default [`SearchConfig`].
    ///
    /// The default thread count matches `num_cpus::get()`, so the bot scores
    /// root moves on rayon's global pool and starts no threads of its own.
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    /// Create a MinimaxBot with the given settings.
    ///
    /// A single thread searches on the caller. A thread count equal to
    /// `num_cpus::get()` shares rayon's global pool. Any other count builds
    /// a private pool owned by this bot; if that pool cannot be started the
    /// bot searches on the calling thread.
    pub fn with_config(config: SearchConfig) -> Self {
        let workers = if config.threads <= 1 {
            Workers::Sequential
        } else if config.threads == num_cpus::get() {
            Workers::Global
        } else {
            match ThreadPoolBuilder::new().num_threads(config.threads).build() {
                Ok(pool) => Workers::Pool(pool),
                Err(err) => {
                    log::warn!("falling back to sequential search: {}", err);
                    Workers::Sequential
                }
            }
        };

        Self {
            config,
            workers,
            _game: PhantomData,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches the game tree at `root`.
    ///
    /// Returns `None` if the game is already over. Otherwise returns the
    /// best move for the player to move together with the root's value.
    /// When several moves share the best value, the one yielded first by
    /// [`GameState::children`] wins, whether or not the root moves were
    /// scored in parallel.
    pub fn search(&self, root: &G) -> Option<SearchResult<G::Move>> {
        if root.is_terminal() {
            log::debug!("no search: game is over");
            return None;
        }

        let search = Search::new(&self.config);
        search.visit();

        let player = root.turn();
        let children: Vec<(G::Move, G)> = root.children().into_iter().collect();
        log::debug!("searching {} root moves for {:?}", children.len(), player);

        let score = |(mv, child): (G::Move, G)| (mv, search.value(&child, player.flip()));
        // collect keeps child order, so merging below stays deterministic
        let scored: Vec<(G::Move, Utility)> = match &self.workers {
            Workers::Pool(pool) if self.config.is_parallel(children.len()) => {
                pool.install(|| children.into_par_iter().map(score).collect())
            }
            Workers::Global if self.config.is_parallel(children.len()) => {
                children.into_par_iter().map(score).collect()
            }
            _ => children.into_iter().map(score).collect(),
        };

        let mut best: Option<(G::Move, Utility)> = None;
        for (mv, value) in scored {
            log::trace!("root move {:?} scores {:?}", mv, value);
            if best.map_or(true, |(_, best_value)| player.prefers(value, best_value)) {
                best = Some((mv, value));
            }
        }
        let (best_move, value) = best?;

        let nodes = search.nodes.load(Ordering::Relaxed);
        log::debug!(
            "best move {:?} with value {:?} after {} nodes",
            best_move,
            value,
            nodes
        );

        Some(SearchResult {
            best_move,
            value,
            nodes,
        })
    }

    /// The optimal move for the player to move, or `None` once the game is over.
    pub fn best_move(&self, root: &G) -> Option<G::Move> {
        self.search(root).map(|result| result.best_move)
    }

    /// The minimax value of `state`. Finished games score their utility.
    pub fn value(&self, state: &G) -> Utility {
        match self.search(state) {
            Some(result) => result.value,
            None => state.utility(),
        }
    }
}

impl<G: GameState> Default for MinimaxBot<G> {
    fn default() -> Self {
        Self::new()
    }
}
