//! Serializable cost summary of a compiled circuit.

use std::collections::BTreeMap;

use primematch_circuit::{Circuit, OpCounts};
use serde::Serialize;

/// Shape and cost of a compiled circuit, for logs and the demo driver.
#[derive(Debug, Clone, Serialize)]
pub struct CircuitSummary {
    pub fingerprint: String,
    pub inputs: usize,
    pub outputs: usize,
    pub gates: usize,
    pub bit_width: u32,
    pub lookups: usize,
    pub additions: usize,
    pub complexity: u64,
    /// Weighted cost per tag.
    pub complexity_by_tag: BTreeMap<&'static str, u64>,
}

impl CircuitSummary {
    #[must_use]
    pub fn of(circuit: &Circuit) -> Self {
        let totals: OpCounts = circuit.stats().total;
        Self {
            fingerprint: circuit.fingerprint_hex(),
            inputs: circuit.input_count(),
            outputs: circuit.output_count(),
            gates: circuit.gate_count(),
            bit_width: circuit.max_bit_width(),
            lookups: totals.lookups(),
            additions: totals.additions,
            complexity: circuit.complexity(),
            complexity_by_tag: circuit.complexity_by_tag(),
        }
    }
}
