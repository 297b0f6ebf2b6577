//! Circuit recording, compilation and replay.
//!
//! [`CircuitBuilder`] is a [`Backend`] whose values are wires: running a
//! circuit function on it records every requested operation as a gate
//! instead of computing anything. The finished [`Circuit`] is a fixed
//! straight-line program that any other backend can replay with
//! [`Circuit::evaluate`]. Execute mode hands the identical operation
//! sequence to an encrypted-arithmetic backend this way.
//!
//! ## Bit widths
//!
//! Every input is declared with an inclusive upper bound. Bounds are
//! propagated through the gates (`min` keeps the smaller bound, `add` sums
//! them, comparisons are `1`) and the widest wire decides the integer width
//! a backend has to support. Compilation fails if it exceeds
//! [`constants::MAX_CIRCUIT_BIT_WIDTH`].
//!
//! ## Cost accounting
//!
//! Gates inherit the innermost active [`Backend::tag`]. [`Circuit::stats`]
//! groups operation counts per tag and [`Circuit::complexity`] weights
//! every non-linear gate by the size of the lookup table it needs
//! (`2^operand_width`); additions cost one unit. Totals saturate at
//! `u64::MAX` rather than wrap.

use std::collections::BTreeMap;

use primematch_types::{PrimematchError, Result, bit_width, constants};
use sha2::{Digest, Sha256};

use crate::Backend;

/// Handle to a value inside a recorded circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wire(usize);

impl Wire {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A recorded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Input(usize),
    Const(u64),
    Equal(Wire, Wire),
    NotEqual(Wire, Wire),
    And(Wire, Wire),
    Min(Wire, Wire),
    Select {
        mask: Wire,
        when_true: Wire,
        when_false: Wire,
    },
    Add(Wire, Wire),
}

impl Op {
    fn kind(self) -> u8 {
        match self {
            Self::Input(_) => 0,
            Self::Const(_) => 1,
            Self::Equal(..) => 2,
            Self::NotEqual(..) => 3,
            Self::And(..) => 4,
            Self::Min(..) => 5,
            Self::Select { .. } => 6,
            Self::Add(..) => 7,
        }
    }

    fn operands(self) -> Vec<Wire> {
        match self {
            Self::Input(_) | Self::Const(_) => vec![],
            Self::Equal(a, b)
            | Self::NotEqual(a, b)
            | Self::And(a, b)
            | Self::Min(a, b)
            | Self::Add(a, b) => vec![a, b],
            Self::Select {
                mask,
                when_true,
                when_false,
            } => vec![mask, when_true, when_false],
        }
    }
}

/// One gate: the operation, the tag it was recorded under, and the
/// inclusive upper bound of its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    pub op: Op,
    pub tag: Option<&'static str>,
    pub bound: u64,
}

/// A declared circuit input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    pub name: String,
    /// Inclusive upper bound of accepted values.
    pub bound: u64,
}

// ---------------------------------------------------------------------------
// CircuitBuilder
// ---------------------------------------------------------------------------

/// Records circuit functions into a [`Circuit`].
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    inputs: Vec<InputSpec>,
    gates: Vec<Gate>,
    tags: Vec<&'static str>,
}

impl CircuitBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an input accepting values in `0..=bound`.
    pub fn input(&mut self, name: impl Into<String>, bound: u64) -> Wire {
        let index = self.inputs.len();
        self.inputs.push(InputSpec {
            name: name.into(),
            bound,
        });
        self.push(Op::Input(index), bound)
    }

    /// Declare `count` inputs named `prefix[0]`, `prefix[1]`, ...
    pub fn inputs(&mut self, prefix: &str, count: usize, bound: u64) -> Vec<Wire> {
        (0..count)
            .map(|i| self.input(format!("{prefix}[{i}]"), bound))
            .collect()
    }

    /// Finish recording with `outputs` as the circuit result.
    ///
    /// # Errors
    /// `BitWidthExceeded` if any wire needs more than
    /// [`constants::MAX_CIRCUIT_BIT_WIDTH`] bits.
    pub fn finish(self, outputs: Vec<Wire>) -> Result<Circuit> {
        let circuit = Circuit {
            inputs: self.inputs,
            gates: self.gates,
            outputs,
        };
        let required = circuit.max_bit_width();
        if required > constants::MAX_CIRCUIT_BIT_WIDTH {
            return Err(PrimematchError::BitWidthExceeded {
                required,
                limit: constants::MAX_CIRCUIT_BIT_WIDTH,
            });
        }
        tracing::debug!(
            inputs = circuit.input_count(),
            gates = circuit.gate_count(),
            outputs = circuit.output_count(),
            bit_width = required,
            fingerprint = %circuit.fingerprint_hex(),
            "Circuit compiled"
        );
        Ok(circuit)
    }

    fn bound(&self, wire: Wire) -> u64 {
        self.gates[wire.0].bound
    }

    fn push(&mut self, op: Op, bound: u64) -> Wire {
        let wire = Wire(self.gates.len());
        self.gates.push(Gate {
            op,
            tag: self.tags.last().copied(),
            bound,
        });
        wire
    }
}

impl Backend for CircuitBuilder {
    type Value = Wire;

    fn constant(&mut self, value: u64) -> Wire {
        self.push(Op::Const(value), value)
    }

    fn equal(&mut self, a: &Wire, b: &Wire) -> Wire {
        self.push(Op::Equal(*a, *b), 1)
    }

    fn not_equal(&mut self, a: &Wire, b: &Wire) -> Wire {
        self.push(Op::NotEqual(*a, *b), 1)
    }

    fn and(&mut self, a: &Wire, b: &Wire) -> Wire {
        self.push(Op::And(*a, *b), 1)
    }

    fn min(&mut self, a: &Wire, b: &Wire) -> Wire {
        let bound = self.bound(*a).min(self.bound(*b));
        self.push(Op::Min(*a, *b), bound)
    }

    fn select(&mut self, mask: &Wire, when_true: &Wire, when_false: &Wire) -> Wire {
        let bound = self.bound(*when_true).max(self.bound(*when_false));
        self.push(
            Op::Select {
                mask: *mask,
                when_true: *when_true,
                when_false: *when_false,
            },
            bound,
        )
    }

    fn add(&mut self, a: &Wire, b: &Wire) -> Wire {
        let bound = self.bound(*a).saturating_add(self.bound(*b));
        self.push(Op::Add(*a, *b), bound)
    }

    fn tag<R>(&mut self, name: &'static str, block: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        self.tags.push(name);
        let out = block(self);
        self.tags.pop();
        out
    }
}

// ---------------------------------------------------------------------------
// Circuit
// ---------------------------------------------------------------------------

/// A compiled, fixed-shape straight-line program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    inputs: Vec<InputSpec>,
    gates: Vec<Gate>,
    outputs: Vec<Wire>,
}

impl Circuit {
    #[must_use]
    pub fn inputs(&self) -> &[InputSpec] {
        &self.inputs
    }

    #[must_use]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    #[must_use]
    pub fn outputs(&self) -> &[Wire] {
        &self.outputs
    }

    #[must_use]
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    #[must_use]
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Widest wire, in bits.
    #[must_use]
    pub fn max_bit_width(&self) -> u32 {
        self.gates
            .iter()
            .map(|g| bit_width(g.bound))
            .max()
            .unwrap_or(1)
    }

    /// Check plaintext input values against the declared bounds.
    ///
    /// # Errors
    /// `CircuitArity` on a length mismatch, `InputOutOfBounds` for the
    /// first value above its bound.
    pub fn check_inputs(&self, values: &[u64]) -> Result<()> {
        self.check_arity(values.len())?;
        for (spec, value) in self.inputs.iter().zip(values) {
            if *value > spec.bound {
                return Err(PrimematchError::InputOutOfBounds {
                    name: spec.name.clone(),
                    value: *value,
                    bound: spec.bound,
                });
            }
        }
        Ok(())
    }

    /// Replay every gate, in recorded order, on `backend`.
    ///
    /// # Errors
    /// `CircuitArity` if `inputs` does not match the declared inputs.
    pub fn evaluate<B: Backend>(&self, backend: &mut B, inputs: &[B::Value]) -> Result<Vec<B::Value>> {
        self.check_arity(inputs.len())?;
        let mut wires: Vec<B::Value> = Vec::with_capacity(self.gates.len());
        for gate in &self.gates {
            let value = match gate.op {
                Op::Input(index) => inputs[index].clone(),
                Op::Const(value) => backend.constant(value),
                Op::Equal(a, b) => backend.equal(&wires[a.0], &wires[b.0]),
                Op::NotEqual(a, b) => backend.not_equal(&wires[a.0], &wires[b.0]),
                Op::And(a, b) => backend.and(&wires[a.0], &wires[b.0]),
                Op::Min(a, b) => backend.min(&wires[a.0], &wires[b.0]),
                Op::Select {
                    mask,
                    when_true,
                    when_false,
                } => backend.select(&wires[mask.0], &wires[when_true.0], &wires[when_false.0]),
                Op::Add(a, b) => backend.add(&wires[a.0], &wires[b.0]),
            };
            wires.push(value);
        }
        Ok(self.outputs.iter().map(|w| wires[w.0].clone()).collect())
    }

    /// Operation counts, overall and per tag.
    #[must_use]
    pub fn stats(&self) -> CircuitStats {
        let mut stats = CircuitStats::default();
        for gate in &self.gates {
            stats.total.record(gate.op);
            stats
                .by_tag
                .entry(gate.tag.unwrap_or(UNTAGGED))
                .or_default()
                .record(gate.op);
        }
        stats
    }

    /// Weighted cost of the circuit (see module docs).
    #[must_use]
    pub fn complexity(&self) -> u64 {
        self.gates
            .iter()
            .fold(0u64, |total, g| total.saturating_add(self.gate_cost(g)))
    }

    /// Weighted cost per tag.
    #[must_use]
    pub fn complexity_by_tag(&self) -> BTreeMap<&'static str, u64> {
        let mut costs = BTreeMap::new();
        for gate in &self.gates {
            let cost = costs.entry(gate.tag.unwrap_or(UNTAGGED)).or_insert(0u64);
            *cost = cost.saturating_add(self.gate_cost(gate));
        }
        costs
    }

    /// SHA-256 over the gate list and outputs. Two circuits with the same
    /// fingerprint perform the same operation sequence.
    #[must_use]
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"primematch:circuit:v1:");
        hasher.update((self.inputs.len() as u64).to_le_bytes());
        for spec in &self.inputs {
            hasher.update(spec.bound.to_le_bytes());
        }
        hasher.update((self.gates.len() as u64).to_le_bytes());
        for gate in &self.gates {
            hasher.update([gate.op.kind()]);
            match gate.op {
                Op::Const(value) => hasher.update(value.to_le_bytes()),
                Op::Input(index) => hasher.update((index as u64).to_le_bytes()),
                _ => {}
            }
            for operand in gate.op.operands() {
                hasher.update((operand.0 as u64).to_le_bytes());
            }
        }
        hasher.update((self.outputs.len() as u64).to_le_bytes());
        for output in &self.outputs {
            hasher.update((output.0 as u64).to_le_bytes());
        }
        let result = hasher.finalize();
        let mut root = [0u8; 32];
        root.copy_from_slice(&result);
        root
    }

    #[must_use]
    pub fn fingerprint_hex(&self) -> String {
        hex::encode(self.fingerprint())
    }

    fn gate_cost(&self, gate: &Gate) -> u64 {
        match gate.op {
            Op::Input(_) | Op::Const(_) => 0,
            Op::Add(..) => 1,
            op => {
                let width = op
                    .operands()
                    .iter()
                    .map(|w| bit_width(self.gates[w.0].bound))
                    .sum::<u32>();
                1u64 << width.min(63)
            }
        }
    }

    fn check_arity(&self, actual: usize) -> Result<()> {
        if actual != self.inputs.len() {
            return Err(PrimematchError::CircuitArity {
                expected: self.inputs.len(),
                actual,
            });
        }
        Ok(())
    }
}

/// Tag assigned to gates recorded outside any [`Backend::tag`] block.
pub const UNTAGGED: &str = "untagged";

/// Gate counts by operation family.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OpCounts {
    pub inputs: usize,
    pub constants: usize,
    pub comparisons: usize,
    pub conjunctions: usize,
    pub minimums: usize,
    pub selections: usize,
    pub additions: usize,
}

impl OpCounts {
    fn record(&mut self, op: Op) {
        match op {
            Op::Input(_) => self.inputs += 1,
            Op::Const(_) => self.constants += 1,
            Op::Equal(..) | Op::NotEqual(..) => self.comparisons += 1,
            Op::And(..) => self.conjunctions += 1,
            Op::Min(..) => self.minimums += 1,
            Op::Select { .. } => self.selections += 1,
            Op::Add(..) => self.additions += 1,
        }
    }

    /// Gates that need a table lookup under encrypted arithmetic.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.comparisons + self.conjunctions + self.minimums + self.selections
    }
}

/// Operation counts of a compiled circuit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CircuitStats {
    pub total: OpCounts,
    pub by_tag: BTreeMap<&'static str, OpCounts>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlainBackend;

    fn min_plus_one() -> Circuit {
        let mut c = CircuitBuilder::new();
        let a = c.input("a", 50);
        let b = c.input("b", 50);
        let m = c.tag("min", |c| c.min(&a, &b));
        let one = c.constant(1);
        let out = c.add(&m, &one);
        c.finish(vec![out]).unwrap()
    }

    #[test]
    fn replay_on_plain_backend() {
        let circuit = min_plus_one();
        let out = circuit.evaluate(&mut PlainBackend, &[30, 12]).unwrap();
        assert_eq!(out, vec![13]);
    }

    #[test]
    fn arity_is_checked() {
        let circuit = min_plus_one();
        let err = circuit.evaluate(&mut PlainBackend, &[1]).unwrap_err();
        assert!(matches!(
            err,
            PrimematchError::CircuitArity {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn input_bounds_are_checked() {
        let circuit = min_plus_one();
        circuit.check_inputs(&[50, 0]).unwrap();
        let err = circuit.check_inputs(&[51, 0]).unwrap_err();
        assert!(
            matches!(err, PrimematchError::InputOutOfBounds { ref name, value: 51, bound: 50 } if name == "a")
        );
    }

    #[test]
    fn bounds_propagate() {
        let circuit = min_plus_one();
        let out = circuit.outputs()[0];
        assert_eq!(circuit.gates()[out.index()].bound, 51);
        assert_eq!(circuit.max_bit_width(), 6);
    }

    #[test]
    fn oversized_sum_fails_to_compile() {
        let mut c = CircuitBuilder::new();
        let a = c.input("a", u64::from(u32::MAX));
        let b = c.input("b", u64::from(u32::MAX));
        let s = c.add(&a, &b);
        assert!(matches!(
            c.finish(vec![s]),
            Err(PrimematchError::BitWidthExceeded { required: 33, .. })
        ));
    }

    #[test]
    fn stats_group_by_innermost_tag() {
        let circuit = min_plus_one();
        let stats = circuit.stats();
        assert_eq!(stats.total.inputs, 2);
        assert_eq!(stats.total.minimums, 1);
        assert_eq!(stats.total.additions, 1);
        assert_eq!(stats.by_tag["min"].minimums, 1);
        assert_eq!(stats.by_tag[UNTAGGED].additions, 1);
        assert_eq!(stats.total.lookups(), 1);
    }

    #[test]
    fn complexity_weights_lookups_by_width() {
        let circuit = min_plus_one();
        // min over two 6-bit operands: 2^12; one addition: 1.
        assert_eq!(circuit.complexity(), (1 << 12) + 1);
        assert_eq!(circuit.complexity_by_tag()["min"], 1 << 12);
    }

    #[test]
    fn complexity_saturates_on_wide_operands() {
        let mut c = CircuitBuilder::new();
        let bound = (1u64 << 31) - 1;
        let xs = c.inputs("x", 4, bound);
        let ys = c.inputs("y", 4, bound);
        let mins: Vec<Wire> = c.tag("min", |c| {
            xs.iter().zip(&ys).map(|(x, y)| c.min(x, y)).collect()
        });
        let circuit = c.finish(mins).unwrap();
        assert_eq!(circuit.max_bit_width(), 31);
        assert_eq!(circuit.complexity(), u64::MAX);
        assert_eq!(circuit.complexity_by_tag()["min"], u64::MAX);
    }

    #[test]
    fn fingerprint_is_stable_and_shape_sensitive() {
        assert_eq!(min_plus_one().fingerprint(), min_plus_one().fingerprint());

        let mut c = CircuitBuilder::new();
        let a = c.input("a", 50);
        let b = c.input("b", 50);
        let m = c.min(&a, &b);
        let other = c.finish(vec![m]).unwrap();
        assert_ne!(min_plus_one().fingerprint(), other.fingerprint());
        assert_eq!(other.fingerprint_hex().len(), 64);
    }
}
