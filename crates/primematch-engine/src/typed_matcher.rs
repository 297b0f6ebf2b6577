//! Typed multi-symbol matcher.
//!
//! Owns the compiled circuit for one [`MatchConfig`] and turns a sealed
//! bank batch plus a sealed client batch into a [`MatchReport`], in
//! either execution mode:
//!
//! ```text
//! SIMULATE: typed_match(PlainBackend, inputs)
//! EXECUTE:  executor.execute(compiled circuit, flattened inputs)
//! ```
//!
//! Both paths run the same operation sequence and must agree bit for bit;
//! [`TypedMatcher::verify_modes`] checks that they do.

use chrono::Utc;
use primematch_circuit::{
    Circuit, PlainBackend, TypedInputs, TypedShape, compile_typed, compute_result_root,
    decode_typed_output, typed_match,
};
use primematch_ingress::{BatchValidator, compute_input_hash, verify_batch_hash};
use primematch_types::{
    ExecutionMode, MatchConfig, MatchReport, Party, PrimematchError, Result, ResultEntry,
    SealedBatch,
};

use crate::{ClearExecutor, Executor};

/// Matches sealed bank and client batches.
#[derive(Debug)]
pub struct TypedMatcher<E = ClearExecutor> {
    validator: BatchValidator,
    circuit: Circuit,
    executor: E,
}

impl TypedMatcher<ClearExecutor> {
    /// Compile the circuit for `config` with the bundled [`ClearExecutor`].
    ///
    /// # Errors
    /// Configuration and bit-width errors from [`compile_typed`].
    pub fn new(config: MatchConfig) -> Result<Self> {
        Self::with_executor(config, ClearExecutor)
    }
}

impl<E: Executor> TypedMatcher<E> {
    /// Compile the circuit for `config`, executing with `executor`.
    ///
    /// # Errors
    /// Configuration and bit-width errors from [`compile_typed`].
    pub fn with_executor(config: MatchConfig, executor: E) -> Result<Self> {
        let circuit = compile_typed(&config)?;
        Ok(Self {
            validator: BatchValidator::new(config),
            circuit,
            executor,
        })
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        self.validator.config()
    }

    #[must_use]
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    #[must_use]
    pub fn shape(&self) -> TypedShape {
        TypedShape::from(self.config())
    }

    /// Match one round in `mode`.
    ///
    /// # Errors
    /// - `WrongParty`, `RoundMismatch`, `BatchHashMismatch` for batches that
    ///   do not form a round
    /// - any batch validation error
    /// - `CircuitArity` / `InputOutOfBounds` / `Backend` / `MalformedOutput`
    ///   from execute mode
    pub fn match_batches(
        &mut self,
        bank: &SealedBatch,
        client: &SealedBatch,
        mode: ExecutionMode,
    ) -> Result<MatchReport> {
        self.check_round(bank, client)?;

        let inputs = TypedInputs::from_batches(&bank.encode(), &client.encode());
        let entries = match mode {
            ExecutionMode::Simulate => self.simulate(&inputs)?,
            ExecutionMode::Execute => self.execute(inputs)?,
        };

        let report = MatchReport {
            round: bank.round,
            mode,
            bank_len: bank.len(),
            input_hash: compute_input_hash(bank, client),
            result_root: compute_result_root(&entries),
            entries,
            matched_at: Utc::now(),
        };

        tracing::info!(
            round = %report.round,
            mode = %mode,
            bank_orders = bank.len(),
            client_orders = client.len(),
            total_filled = report.total_filled(),
            result_root = %report.result_root_hex(),
            "Round matched"
        );
        Ok(report)
    }

    /// Run both modes on the same round and require identical results.
    ///
    /// Returns `(simulated, executed)`.
    ///
    /// # Errors
    /// Any [`Self::match_batches`] error, or `ModeMismatch`.
    pub fn verify_modes(
        &mut self,
        bank: &SealedBatch,
        client: &SealedBatch,
    ) -> Result<(MatchReport, MatchReport)> {
        let simulated = self.match_batches(bank, client, ExecutionMode::Simulate)?;
        let executed = self.match_batches(bank, client, ExecutionMode::Execute)?;
        ensure_same_result(&simulated, &executed)?;
        Ok((simulated, executed))
    }

    fn simulate(&self, inputs: &TypedInputs<u64>) -> Result<Vec<ResultEntry>> {
        let out = typed_match(&mut PlainBackend, inputs);
        decode_typed_output(&out, self.shape())
    }

    fn execute(&mut self, inputs: TypedInputs<u64>) -> Result<Vec<ResultEntry>> {
        let flat = inputs.flatten();
        self.circuit.check_inputs(&flat)?;
        tracing::debug!(
            executor = self.executor.name(),
            gates = self.circuit.gate_count(),
            "Executing typed circuit"
        );
        let out = self.executor.execute(&self.circuit, &flat)?;
        decode_typed_output(&out, self.shape())
    }

    fn check_round(&self, bank: &SealedBatch, client: &SealedBatch) -> Result<()> {
        check_party(bank, Party::Bank)?;
        check_party(client, Party::Client)?;
        if bank.round != client.round {
            return Err(PrimematchError::RoundMismatch {
                bank: bank.round.0,
                client: client.round.0,
            });
        }
        for batch in [bank, client] {
            if !verify_batch_hash(batch) {
                return Err(PrimematchError::BatchHashMismatch { party: batch.party });
            }
            self.validator.validate_batch(batch.party, &batch.orders)?;
        }
        Ok(())
    }
}

/// Compare two reports of the same round by result root.
///
/// # Errors
/// `ModeMismatch` carrying both roots in hex.
pub fn ensure_same_result(simulated: &MatchReport, executed: &MatchReport) -> Result<()> {
    if simulated.result_root != executed.result_root {
        tracing::warn!(
            round = %simulated.round,
            simulated = %simulated.result_root_hex(),
            executed = %executed.result_root_hex(),
            "Execution modes disagree"
        );
        return Err(PrimematchError::ModeMismatch {
            simulated: simulated.result_root_hex(),
            executed: executed.result_root_hex(),
        });
    }
    Ok(())
}

fn check_party(batch: &SealedBatch, expected: Party) -> Result<()> {
    if batch.party != expected {
        return Err(PrimematchError::WrongParty {
            expected,
            actual: batch.party,
        });
    }
    Ok(())
}
