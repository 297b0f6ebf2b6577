//! Execute-mode seam.
//!
//! An [`Executor`] receives the compiled circuit and its plaintext input
//! vector and returns the plaintext output vector. Encrypting the inputs,
//! evaluating under encryption and decrypting the outputs all happen
//! behind this trait.

use primematch_circuit::{Circuit, PlainBackend};
use primematch_types::Result;

/// Runs a compiled [`Circuit`] on some backend.
pub trait Executor {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Evaluate `circuit` on `inputs`.
    ///
    /// # Errors
    /// `Backend` for any failure inside the backend. Output that does not
    /// match the circuit's output count is rejected by the caller.
    fn execute(&mut self, circuit: &Circuit, inputs: &[u64]) -> Result<Vec<u64>>;
}

/// Replays the compiled circuit gate by gate on [`PlainBackend`].
///
/// Exercises exactly the operation sequence an encrypted backend would
/// run, without encryption.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClearExecutor;

impl Executor for ClearExecutor {
    fn name(&self) -> &str {
        "clear"
    }

    fn execute(&mut self, circuit: &Circuit, inputs: &[u64]) -> Result<Vec<u64>> {
        circuit.evaluate(&mut PlainBackend, inputs)
    }
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(&mut self, circuit: &Circuit, inputs: &[u64]) -> Result<Vec<u64>> {
        (**self).execute(circuit, inputs)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(&mut self, circuit: &Circuit, inputs: &[u64]) -> Result<Vec<u64>> {
        (**self).execute(circuit, inputs)
    }
}

#[cfg(test)]
mod tests {
    use primematch_circuit::{Backend, CircuitBuilder};

    use super::*;

    #[test]
    fn clear_executor_replays() {
        let mut c = CircuitBuilder::new();
        let a = c.input("a", 50);
        let b = c.input("b", 50);
        let m = c.min(&a, &b);
        let circuit = c.finish(vec![m]).unwrap();

        let mut exec = ClearExecutor;
        assert_eq!(exec.name(), "clear");
        assert_eq!(exec.execute(&circuit, &[40, 25]).unwrap(), vec![25]);
        assert!(exec.execute(&circuit, &[40]).is_err());
    }

    #[test]
    fn boxed_executor_delegates() {
        let mut c = CircuitBuilder::new();
        let a = c.input("a", 9);
        let circuit = c.finish(vec![a]).unwrap();
        let mut exec: Box<dyn Executor> = Box::new(ClearExecutor);
        assert_eq!(exec.execute(&circuit, &[7]).unwrap(), vec![7]);
    }
}
