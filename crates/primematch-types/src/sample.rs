//! Random sample generation for tests and the demo driver.
//!
//! Batches drawn by [`random_batch`] never repeat a symbol within one
//! batch, which satisfies the one-order-per-symbol-per-side policy.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::{MatchConfig, Order, PrimematchError, Result, Side, SingleSymbolConfig, Symbol};

/// Draw `len` orders with pairwise distinct symbols.
///
/// # Errors
/// `Configuration` if `len` exceeds the configured symbol count.
pub fn random_batch<R: Rng + ?Sized>(
    rng: &mut R,
    config: &MatchConfig,
    len: usize,
) -> Result<Vec<Order>> {
    if len > config.symbols {
        return Err(PrimematchError::Configuration(format!(
            "cannot draw {len} orders with distinct symbols from {} symbols",
            config.symbols
        )));
    }
    let mut symbols: Vec<Symbol> = config.symbol_set().to_vec();
    symbols.shuffle(rng);
    symbols
        .into_iter()
        .take(len)
        .map(|symbol| random_order(rng, config, symbol))
        .collect()
}

/// Draw `len` orders with no restriction on repeated symbols.
pub fn random_orders<R: Rng + ?Sized>(
    rng: &mut R,
    config: &MatchConfig,
    len: usize,
) -> Result<Vec<Order>> {
    (0..len)
        .map(|_| {
            let symbol = config.symbol_set()[rng.gen_range(0..config.symbols)];
            random_order(rng, config, symbol)
        })
        .collect()
}

/// Draw a bank batch and a client batch sized by `config`.
pub fn random_round<R: Rng + ?Sized>(
    rng: &mut R,
    config: &MatchConfig,
) -> Result<(Vec<Order>, Vec<Order>)> {
    let bank = random_batch(rng, config, config.bank_orders)?;
    let client = random_batch(rng, config, config.client_orders)?;
    Ok((bank, client))
}

/// Draw slot vectors where each symbol is live in exactly one direction.
///
/// For every symbol one of its two slots receives a bank and a client
/// quantity; the other stays empty (zero).
pub fn random_slots<R: Rng + ?Sized>(
    rng: &mut R,
    config: &SingleSymbolConfig,
) -> (Vec<u64>, Vec<u64>) {
    let mut bank = vec![0u64; config.slots()];
    let mut client = vec![0u64; config.slots()];
    for symbol in 0..config.symbols {
        let slot = if rng.gen_bool(0.5) {
            symbol + config.symbols
        } else {
            symbol
        };
        bank[slot] = rng.gen_range(config.bounds.min_qty..=config.bounds.max_qty);
        client[slot] = rng.gen_range(config.bounds.min_qty..=config.bounds.max_qty);
    }
    (bank, client)
}

fn random_order<R: Rng + ?Sized>(rng: &mut R, config: &MatchConfig, symbol: Symbol) -> Result<Order> {
    let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
    let quantity = rng.gen_range(config.bounds.min_qty..=config.bounds.max_qty);
    Order::new(side, symbol, quantity, config.bounds)
}
