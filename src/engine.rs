use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{rules, Grid, LifeError, Result};

/// Game engine for Game of Life on a torus.
pub trait Engine {
    /// Computes the generation that follows `grid`.
    ///
    /// Every cell of the result is evaluated against `grid` only, never
    /// against partially computed output. On error no grid is returned.
    fn advance(&self, grid: &Grid) -> Result<Grid>;

    /// Advances `grid` by `generations` steps.
    fn advance_n(&self, grid: &Grid, generations: u64) -> Result<Grid> {
        let mut curr = grid.clone();
        for _ in 0..generations {
            curr = self.advance(&curr)?;
        }
        Ok(curr)
    }

    /// Short name used in logs and benches.
    fn name(&self) -> &'static str;
}

/// Computes every cell of the next generation as a separate unit of work
/// on a dedicated rayon pool.
///
/// Each unit owns exactly one slot of the output buffer, so units never
/// share mutable state; `advance` returns only after all of them finished.
pub struct ParallelEngine {
    pool: ThreadPool,
}

impl ParallelEngine {
    /// `threads` - size of the worker pool (if `None`, rayon picks one per core)
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("life-worker-{i}"));
        if let Some(n) = threads {
            if n == 0 {
                return Err(LifeError::ComputationFailure(
                    "worker pool needs at least one thread".into(),
                ));
            }
            builder = builder.num_threads(n);
        }
        let pool = builder
            .build()
            .map_err(|e| LifeError::ComputationFailure(format!("cannot start worker pool: {e}")))?;
        tracing::debug!(threads = pool.current_num_threads(), "worker pool started");
        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Fan-out/fan-in over the output cells with an arbitrary per-cell rule.
    pub(crate) fn compute<F>(&self, grid: &Grid, rule: F) -> Result<Grid>
    where
        F: Fn(&Grid, i64, i64) -> bool + Sync,
    {
        let (w, h) = grid.size();
        let timer = Instant::now();
        let mut cells = vec![false; w * h];

        let joined = catch_unwind(AssertUnwindSafe(|| {
            self.pool.install(|| {
                cells.par_iter_mut().enumerate().for_each(|(i, cell)| {
                    *cell = rule(grid, (i % w) as i64, (i / w) as i64);
                });
            })
        }));
        if let Err(payload) = joined {
            let reason = panic_message(payload.as_ref());
            tracing::error!(width = w, height = h, %reason, "generation aborted");
            return Err(LifeError::ComputationFailure(reason));
        }

        tracing::trace!(width = w, height = h, elapsed = ?timer.elapsed(), "generation computed");
        Grid::from_cells(w, h, cells)
    }
}

impl Engine for ParallelEngine {
    fn advance(&self, grid: &Grid) -> Result<Grid> {
        self.compute(grid, rules::next_state)
    }

    fn name(&self) -> &'static str {
        "parallel"
    }
}

/// Single-threaded reference engine.
#[derive(Default)]
pub struct SequentialEngine;

impl Engine for SequentialEngine {
    fn advance(&self, grid: &Grid) -> Result<Grid> {
        let (w, h) = grid.size();
        let mut cells = Vec::with_capacity(w * h);
        for y in 0..h as i64 {
            for x in 0..w as i64 {
                cells.push(rules::next_state(grid, x, y));
            }
        }
        Grid::from_cells(w, h, cells)
    }

    fn name(&self) -> &'static str {
        "sequential"
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_owned()
    }
}
