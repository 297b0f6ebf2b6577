//! The capability set a matching circuit needs from its arithmetic backend.
//!
//! Circuit functions are generic over [`Backend`] and never inspect a
//! value: every operation is requested unconditionally, in an order that
//! depends only on the circuit shape. The same function therefore runs on
//! plaintext ([`crate::PlainBackend`]), is recorded into a replayable
//! [`crate::Circuit`] ([`crate::CircuitBuilder`]), or runs under an
//! encrypted-arithmetic backend supplied by the caller.
//!
//! Boolean results are the integers `0` and `1`.

/// Branch-free arithmetic over a bounded unsigned integer domain.
pub trait Backend {
    /// A (possibly encrypted) integer.
    type Value: Clone;

    /// A public constant.
    fn constant(&mut self, value: u64) -> Self::Value;

    /// `1` if `a == b`, else `0`.
    fn equal(&mut self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// `1` if `a != b`, else `0`.
    fn not_equal(&mut self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// Conjunction of two `{0, 1}` values. Both operands are always
    /// evaluated; there is no short circuit.
    fn and(&mut self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// Minimum of two values.
    fn min(&mut self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// `when_true` if `mask == 1`, `when_false` if `mask == 0`.
    ///
    /// Both branches are already-computed values; the mask only combines
    /// them.
    fn select(
        &mut self,
        mask: &Self::Value,
        when_true: &Self::Value,
        when_false: &Self::Value,
    ) -> Self::Value;

    /// Exact sum of two values.
    fn add(&mut self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// `value` if `mask == 1`, else `0`.
    fn mask(&mut self, mask: &Self::Value, value: &Self::Value) -> Self::Value {
        let zero = self.constant(0);
        self.select(mask, value, &zero)
    }

    /// Exact left-to-right sum of a sequence; `0` for an empty one.
    fn sum(&mut self, values: &[Self::Value]) -> Self::Value {
        let Some((first, rest)) = values.split_first() else {
            return self.constant(0);
        };
        let mut total = first.clone();
        for value in rest {
            total = self.add(&total, value);
        }
        total
    }

    /// Run `block` under a cost/profiling label. Purely observational.
    fn tag<R>(&mut self, name: &'static str, block: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        let _ = name;
        block(self)
    }
}
