//! Plaintext backend used by simulate mode.
//!
//! Every operation is straight-line mask arithmetic on `u64`: no
//! comparison feeds a jump. Values must stay below `2^63`, which the
//! configured bit-width limit guarantees.

use crate::Backend;

/// Branch-free plaintext evaluation.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainBackend;

impl PlainBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// `1` if `x != 0`, else `0`.
#[inline]
fn is_nonzero(x: u64) -> u64 {
    (x | x.wrapping_neg()) >> 63
}

/// `1` if `a < b`, else `0`. Requires `a, b < 2^63`.
#[inline]
fn less_than(a: u64, b: u64) -> u64 {
    a.wrapping_sub(b) >> 63
}

/// `t` if `m == 1`, `f` if `m == 0`.
#[inline]
fn blend(m: u64, t: u64, f: u64) -> u64 {
    f ^ ((t ^ f) & m.wrapping_neg())
}

impl Backend for PlainBackend {
    type Value = u64;

    fn constant(&mut self, value: u64) -> u64 {
        value
    }

    fn equal(&mut self, a: &u64, b: &u64) -> u64 {
        1 ^ is_nonzero(a ^ b)
    }

    fn not_equal(&mut self, a: &u64, b: &u64) -> u64 {
        is_nonzero(a ^ b)
    }

    fn and(&mut self, a: &u64, b: &u64) -> u64 {
        a & b & 1
    }

    fn min(&mut self, a: &u64, b: &u64) -> u64 {
        blend(less_than(*a, *b), *a, *b)
    }

    fn select(&mut self, mask: &u64, when_true: &u64, when_false: &u64) -> u64 {
        blend(*mask, *when_true, *when_false)
    }

    fn add(&mut self, a: &u64, b: &u64) -> u64 {
        a + b
    }

    fn mask(&mut self, mask: &u64, value: &u64) -> u64 {
        value * mask
    }

    fn tag<R>(&mut self, name: &'static str, block: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        let _span = tracing::trace_span!("circuit_tag", tag = name).entered();
        block(self)
    }
}
