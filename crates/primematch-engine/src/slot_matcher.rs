//! Single-symbol slot matcher.
//!
//! The simplified variant: both parties submit a slot vector of
//! `2 × symbols` quantities laid out by [`SlotLayout`], and each slot
//! fills at the minimum of the two quantities.

use primematch_circuit::{
    Circuit, PlainBackend, compile_single_symbol, compute_slot_root, single_symbol_inputs,
    single_symbol_match,
};
use primematch_ingress::SlotLayout;
use primematch_types::{
    ExecutionMode, Order, Party, PrimematchError, Result, SingleSymbolConfig, SlotReport,
};

use crate::{ClearExecutor, Executor};

/// Matches bank and client slot vectors.
#[derive(Debug)]
pub struct SlotMatcher<E = ClearExecutor> {
    config: SingleSymbolConfig,
    layout: SlotLayout,
    circuit: Circuit,
    executor: E,
}

impl SlotMatcher<ClearExecutor> {
    /// # Errors
    /// Configuration and bit-width errors.
    pub fn new(config: SingleSymbolConfig) -> Result<Self> {
        Self::with_executor(config, ClearExecutor)
    }
}

impl<E: Executor> SlotMatcher<E> {
    /// # Errors
    /// Configuration and bit-width errors.
    pub fn with_executor(config: SingleSymbolConfig, executor: E) -> Result<Self> {
        Ok(Self {
            layout: SlotLayout::new(config)?,
            circuit: compile_single_symbol(&config)?,
            config,
            executor,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SingleSymbolConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    #[must_use]
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Match two slot vectors in `mode`.
    ///
    /// # Errors
    /// - `BatchSizeMismatch` if a vector is not `2 × symbols` long
    /// - `QuantityOutOfRange` for a non-zero slot outside the bounds
    /// - `Backend` / `MalformedOutput` from execute mode
    pub fn match_slots(
        &mut self,
        bank: &[u64],
        client: &[u64],
        mode: ExecutionMode,
    ) -> Result<SlotReport> {
        self.check_slots(Party::Bank, bank)?;
        self.check_slots(Party::Client, client)?;

        let fills = match mode {
            ExecutionMode::Simulate => single_symbol_match(&mut PlainBackend, bank, client),
            ExecutionMode::Execute => self.execute(bank, client)?,
        };
        let report = SlotReport {
            mode,
            result_root: compute_slot_root(&fills),
            fills,
        };
        tracing::info!(
            mode = %mode,
            slots = report.fills.len(),
            total_filled = report.fills.iter().sum::<u64>(),
            result_root = %report.result_root_hex(),
            "Slots matched"
        );
        Ok(report)
    }

    /// Pack both parties' orders with the slot layout, then match.
    ///
    /// # Errors
    /// Packing errors from [`SlotLayout::pack`], then
    /// [`Self::match_slots`] errors.
    pub fn match_orders(
        &mut self,
        bank: &[Order],
        client: &[Order],
        mode: ExecutionMode,
    ) -> Result<SlotReport> {
        let bank = self.layout.pack_bank(bank)?;
        let client = self.layout.pack_client(client)?;
        self.match_slots(&bank, &client, mode)
    }

    /// Run both modes and require identical fills.
    ///
    /// # Errors
    /// Any [`Self::match_slots`] error, or `ModeMismatch`.
    pub fn verify_modes(&mut self, bank: &[u64], client: &[u64]) -> Result<(SlotReport, SlotReport)> {
        let simulated = self.match_slots(bank, client, ExecutionMode::Simulate)?;
        let executed = self.match_slots(bank, client, ExecutionMode::Execute)?;
        if simulated.result_root != executed.result_root {
            tracing::warn!(
                simulated = %simulated.result_root_hex(),
                executed = %executed.result_root_hex(),
                "Execution modes disagree"
            );
            return Err(PrimematchError::ModeMismatch {
                simulated: simulated.result_root_hex(),
                executed: executed.result_root_hex(),
            });
        }
        Ok((simulated, executed))
    }

    fn execute(&mut self, bank: &[u64], client: &[u64]) -> Result<Vec<u64>> {
        let flat = single_symbol_inputs(bank, client)?;
        self.circuit.check_inputs(&flat)?;
        let out = self.executor.execute(&self.circuit, &flat)?;
        if out.len() != self.circuit.output_count() {
            return Err(PrimematchError::MalformedOutput {
                reason: format!(
                    "expected {} values, got {}",
                    self.circuit.output_count(),
                    out.len()
                ),
            });
        }
        Ok(out)
    }

    fn check_slots(&self, party: Party, slots: &[u64]) -> Result<()> {
        if slots.len() != self.config.slots() {
            return Err(PrimematchError::BatchSizeMismatch {
                party,
                expected: self.config.slots(),
                actual: slots.len(),
            });
        }
        slots.iter().try_for_each(|q| self.config.check_slot(*q))
    }
}
