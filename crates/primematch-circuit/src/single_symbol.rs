//! The simplified single-symbol circuit.
//!
//! Each slot pairs one bank quantity with one client quantity that are
//! already known to be compatible, so the fill is the elementwise minimum.
//! An empty slot carries quantity `0` and fills `0`.

use primematch_types::{PrimematchError, Result, SingleSymbolConfig};

use crate::{Backend, Circuit, CircuitBuilder};

/// Elementwise minimum over two slot vectors of equal length.
pub fn single_symbol_match<B: Backend>(
    backend: &mut B,
    bank_quantities: &[B::Value],
    client_quantities: &[B::Value],
) -> Vec<B::Value> {
    debug_assert_eq!(bank_quantities.len(), client_quantities.len());
    backend.tag("calculating-matching-quantity", |b| {
        bank_quantities
            .iter()
            .zip(client_quantities)
            .map(|(bank, client)| b.min(bank, client))
            .collect()
    })
}

/// Record the single-symbol circuit for `config`.
pub fn compile_single_symbol(config: &SingleSymbolConfig) -> Result<Circuit> {
    config.validate()?;
    let slots = config.slots();
    let mut builder = CircuitBuilder::new();
    let bank = builder.inputs("bank_quantity", slots, config.bounds.max_qty);
    let client = builder.inputs("client_quantity", slots, config.bounds.max_qty);
    let outputs = single_symbol_match(&mut builder, &bank, &client);
    builder.finish(outputs)
}

/// Concatenate bank and client slot vectors in circuit input order.
///
/// # Errors
/// `CircuitArity` if the vectors differ in length.
pub fn single_symbol_inputs<V: Clone>(bank: &[V], client: &[V]) -> Result<Vec<V>> {
    if bank.len() != client.len() {
        return Err(PrimematchError::CircuitArity {
            expected: bank.len() * 2,
            actual: bank.len() + client.len(),
        });
    }
    Ok(bank.iter().chain(client).cloned().collect())
}
