//! The typed multi-symbol matching circuit.
//!
//! ```text
//! typed_match(bank sides/symbols/qty, client sides/symbols/qty)
//!   -> [side, symbol, filled] × (N_bank + N_client)
//! ```
//!
//! Inputs are laid out as six consecutive blocks: bank sides, bank
//! symbols, bank quantities, client sides, client symbols, client
//! quantities. Outputs are three values per order, bank orders first.

use primematch_types::{
    EncodedBatch, MatchConfig, PrimematchError, Result, ResultEntry, Side, Symbol, constants,
};

use crate::aggregate::{ResultRow, aggregate};
use crate::{Backend, Circuit, CircuitBuilder, build_compatibility, build_fill_matrix};

/// Fixed shape of a typed circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedShape {
    pub bank_orders: usize,
    pub client_orders: usize,
}

impl TypedShape {
    #[must_use]
    pub fn input_count(&self) -> usize {
        3 * (self.bank_orders + self.client_orders)
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        ResultRow::<()>::WIDTH * (self.bank_orders + self.client_orders)
    }
}

impl From<&MatchConfig> for TypedShape {
    fn from(config: &MatchConfig) -> Self {
        Self {
            bank_orders: config.bank_orders,
            client_orders: config.client_orders,
        }
    }
}

/// The six input vectors of the typed circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedInputs<V> {
    pub bank_sides: Vec<V>,
    pub bank_symbols: Vec<V>,
    pub bank_quantities: Vec<V>,
    pub client_sides: Vec<V>,
    pub client_symbols: Vec<V>,
    pub client_quantities: Vec<V>,
}

impl<V> TypedInputs<V> {
    #[must_use]
    pub fn shape(&self) -> TypedShape {
        TypedShape {
            bank_orders: self.bank_quantities.len(),
            client_orders: self.client_quantities.len(),
        }
    }

    /// Concatenate the six blocks in circuit input order.
    #[must_use]
    pub fn flatten(self) -> Vec<V> {
        let mut out = Vec::with_capacity(self.shape().input_count());
        out.extend(self.bank_sides);
        out.extend(self.bank_symbols);
        out.extend(self.bank_quantities);
        out.extend(self.client_sides);
        out.extend(self.client_symbols);
        out.extend(self.client_quantities);
        out
    }
}

impl TypedInputs<u64> {
    /// Plaintext inputs from two encoded batches.
    #[must_use]
    pub fn from_batches(bank: &EncodedBatch, client: &EncodedBatch) -> Self {
        Self {
            bank_sides: bank.sides.clone(),
            bank_symbols: bank.symbols.clone(),
            bank_quantities: bank.quantities.clone(),
            client_sides: client.sides.clone(),
            client_symbols: client.symbols.clone(),
            client_quantities: client.quantities.clone(),
        }
    }
}

/// The matching circuit. Runs unchanged on every [`Backend`].
pub fn typed_match<B: Backend>(backend: &mut B, inputs: &TypedInputs<B::Value>) -> Vec<B::Value> {
    let compatibility = build_compatibility(
        backend,
        &inputs.bank_sides,
        &inputs.bank_symbols,
        &inputs.client_sides,
        &inputs.client_symbols,
    );
    let fill = build_fill_matrix(
        backend,
        &inputs.bank_quantities,
        &inputs.client_quantities,
        &compatibility,
    );
    let rows = aggregate(
        backend,
        &fill,
        &inputs.bank_sides,
        &inputs.bank_symbols,
        &inputs.client_sides,
        &inputs.client_symbols,
    );
    ResultRow::flatten(&rows)
}

/// Record the typed circuit for `config`.
///
/// # Errors
/// `Configuration` / `BitWidthExceeded` if `config` is invalid.
pub fn compile_typed(config: &MatchConfig) -> Result<Circuit> {
    config.validate()?;
    let symbol_bound = (config.symbols - 1) as u64;
    let qty_bound = config.bounds.max_qty;

    let mut builder = CircuitBuilder::new();
    let inputs = TypedInputs {
        bank_sides: builder.inputs("bank_side", config.bank_orders, constants::SIDE_CODE_SELL),
        bank_symbols: builder.inputs("bank_symbol", config.bank_orders, symbol_bound),
        bank_quantities: builder.inputs("bank_quantity", config.bank_orders, qty_bound),
        client_sides: builder.inputs("client_side", config.client_orders, constants::SIDE_CODE_SELL),
        client_symbols: builder.inputs("client_symbol", config.client_orders, symbol_bound),
        client_quantities: builder.inputs("client_quantity", config.client_orders, qty_bound),
    };
    let outputs = typed_match(&mut builder, &inputs);
    builder.finish(outputs)
}

/// Decode typed circuit output into result entries.
///
/// # Errors
/// `MalformedOutput` if the length is wrong or a side/symbol code does
/// not decode.
pub fn decode_typed_output(values: &[u64], shape: TypedShape) -> Result<Vec<ResultEntry>> {
    if values.len() != shape.output_count() {
        return Err(PrimematchError::MalformedOutput {
            reason: format!(
                "expected {} values, got {}",
                shape.output_count(),
                values.len()
            ),
        });
    }
    values
        .chunks_exact(ResultRow::<()>::WIDTH)
        .map(|row| {
            let side = Side::from_code(row[0]).map_err(malformed)?;
            let symbol = Symbol::from_code(row[1]).map_err(malformed)?;
            Ok(ResultEntry {
                side,
                symbol,
                filled_quantity: row[2],
            })
        })
        .collect()
}

fn malformed(err: PrimematchError) -> PrimematchError {
    PrimematchError::MalformedOutput {
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use primematch_types::{Order, QuantityBounds};

    use super::*;
    use crate::PlainBackend;

    fn small_config() -> MatchConfig {
        MatchConfig {
            bank_orders: 2,
            client_orders: 2,
            symbols: 4,
            bounds: QuantityBounds::new(5, 60).unwrap(),
            ..MatchConfig::default()
        }
    }

    #[test]
    fn shape_counts() {
        let shape = TypedShape::from(&MatchConfig::default());
        assert_eq!(shape.input_count(), 45);
        assert_eq!(shape.output_count(), 45);
    }

    #[test]
    fn flatten_order() {
        let inputs = TypedInputs {
            bank_sides: vec![1],
            bank_symbols: vec![2],
            bank_quantities: vec![3],
            client_sides: vec![4],
            client_symbols: vec![5],
            client_quantities: vec![6],
        };
        assert_eq!(inputs.flatten(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn sell_thirty_against_buy_twenty() {
        let bank = EncodedBatch::from_orders(&[
            Order::dummy(Side::Sell, Symbol::A, 30),
            Order::dummy(Side::Buy, Symbol::B, 12),
        ]);
        let client = EncodedBatch::from_orders(&[
            Order::dummy(Side::Buy, Symbol::A, 20),
            Order::dummy(Side::Sell, Symbol::C, 40),
        ]);
        let inputs = TypedInputs::from_batches(&bank, &client);
        let shape = inputs.shape();
        let out = typed_match(&mut PlainBackend, &inputs);
        let entries = decode_typed_output(&out, shape).unwrap();
        let filled: Vec<u64> = entries.iter().map(|e| e.filled_quantity).collect();
        assert_eq!(filled, vec![20, 0, 20, 0]);
        assert_eq!(entries[0].side, Side::Sell);
        assert_eq!(entries[3].symbol, Symbol::C);
    }

    #[test]
    fn compiled_circuit_matches_direct_evaluation() {
        let config = small_config();
        let circuit = compile_typed(&config).unwrap();
        assert_eq!(circuit.input_count(), 12);
        assert_eq!(circuit.output_count(), 12);

        let inputs = TypedInputs {
            bank_sides: vec![1, 0],
            bank_symbols: vec![0, 3],
            bank_quantities: vec![30, 60],
            client_sides: vec![0, 1],
            client_symbols: vec![0, 3],
            client_quantities: vec![20, 5],
        };
        let direct = typed_match(&mut PlainBackend, &inputs);
        let flat = inputs.flatten();
        circuit.check_inputs(&flat).unwrap();
        let replayed = circuit.evaluate(&mut PlainBackend, &flat).unwrap();
        assert_eq!(direct, replayed);
    }

    #[test]
    fn compiled_circuit_tags_every_stage() {
        let circuit = compile_typed(&small_config()).unwrap();
        let stats = circuit.stats();
        assert_eq!(stats.by_tag["comparing-order-sides"].comparisons, 4);
        assert_eq!(stats.by_tag["comparing-order-symbols"].comparisons, 4);
        assert_eq!(stats.by_tag["checking-compatibility"].conjunctions, 4);
        assert_eq!(stats.by_tag["calculating-matching-quantity"].minimums, 4);
        assert_eq!(stats.by_tag["calculating-filled-quantity"].selections, 4);
        // 2 rows and 2 columns of 2 cells each: one addition per sum.
        assert_eq!(stats.by_tag["creating-result"].additions, 4);
        let untagged = stats.by_tag[crate::circuit::UNTAGGED];
        assert_eq!(untagged.inputs, 12);
        assert_eq!(untagged.lookups() + untagged.additions, 0);
    }

    #[test]
    fn compiled_width_fits_accumulator() {
        let circuit = compile_typed(&MatchConfig::default()).unwrap();
        // 10 × 60 = 600 needs 10 bits.
        assert_eq!(circuit.max_bit_width(), 10);
    }

    #[test]
    fn symbol_outside_config_is_rejected_by_circuit() {
        let circuit = compile_typed(&small_config()).unwrap();
        let mut flat = vec![0u64; 12];
        flat[2] = 4; // bank_symbol[0], only 4 symbols configured
        flat[4] = 30;
        assert!(matches!(
            circuit.check_inputs(&flat),
            Err(PrimematchError::InputOutOfBounds { bound: 3, .. })
        ));
    }

    #[test]
    fn decode_rejects_bad_codes_and_lengths() {
        let shape = TypedShape {
            bank_orders: 1,
            client_orders: 0,
        };
        assert!(decode_typed_output(&[0, 0], shape).is_err());
        assert!(matches!(
            decode_typed_output(&[2, 0, 5], shape),
            Err(PrimematchError::MalformedOutput { .. })
        ));
        assert!(decode_typed_output(&[0, 30, 5], shape).is_err());
        assert_eq!(
            decode_typed_output(&[1, 25, 5], shape).unwrap(),
            vec![ResultEntry {
                side: Side::Sell,
                symbol: Symbol::Z,
                filled_quantity: 5
            }]
        );
    }
}
