//! Source of randomness for dice and fleet layouts.
//!
//! Engines never reach for a global RNG; the caller injects one so tests can
//! replay a game exactly.

#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Roll one die with faces `1..=sides`
    fn roll_die(&self, sides: u8) -> u8;

    /// Pick an index in `0..len` (`len > 0`)
    fn pick_index(&self, len: usize) -> usize;
}
