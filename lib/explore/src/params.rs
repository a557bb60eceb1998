//! Safe ranges for every tunable request parameter.
//!
//! Values are clamped, never rejected, before any algorithm runs. The clamps
//! are the only bound on compute and on the number of store queries a
//! request can trigger.

pub const MIN_NUM_STEPS: usize = 1;
pub const MAX_NUM_STEPS: usize = 100;
pub const DEFAULT_NUM_STEPS: usize = 10;

pub const MIN_MAX_HOPS: usize = 1;
pub const MAX_MAX_HOPS: usize = 50;
pub const DEFAULT_MAX_HOPS: usize = 20;

pub const MIN_MAX_DEPTH: usize = 1;
pub const MAX_MAX_DEPTH: usize = 10;
pub const DEFAULT_MAX_DEPTH: usize = 5;

pub const MIN_NUM_RESULTS: usize = 1;
pub const MAX_NUM_RESULTS: usize = 50;
pub const DEFAULT_NUM_RESULTS: usize = 5;

pub const MIN_SLICE_RESULTS: usize = 1;
pub const MAX_SLICE_RESULTS: usize = 10;
pub const DEFAULT_SLICE_RESULTS: usize = 3;

pub const MAX_COORDINATE_WORDS: usize = 200;

pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.98;
pub const DEFAULT_MAX_SLICE_POINTS: usize = 100;
pub const DEFAULT_GREEDY_CANDIDATES: usize = 10;

#[inline]
pub fn num_steps(requested: usize) -> usize {
    requested.clamp(MIN_NUM_STEPS, MAX_NUM_STEPS)
}

#[inline]
pub fn max_hops(requested: usize) -> usize {
    requested.clamp(MIN_MAX_HOPS, MAX_MAX_HOPS)
}

#[inline]
pub fn max_depth(requested: usize) -> usize {
    requested.clamp(MIN_MAX_DEPTH, MAX_MAX_DEPTH)
}

#[inline]
pub fn num_results(requested: usize) -> usize {
    requested.clamp(MIN_NUM_RESULTS, MAX_NUM_RESULTS)
}

#[inline]
pub fn slice_results(requested: usize) -> usize {
    requested.clamp(MIN_SLICE_RESULTS, MAX_SLICE_RESULTS)
}
