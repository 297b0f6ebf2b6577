//! Pending buffer for one party's orders during a round.
//!
//! Circuits have a fixed shape, so a buffer only seals when it holds
//! exactly the configured batch size. A sealed buffer accepts no more
//! orders until it is drained and reset.

use primematch_types::{Order, Party, PrimematchError, Result};

/// Collects one party's orders for the current round.
#[derive(Debug)]
pub struct PendingBuffer {
    party: Party,
    /// Orders in arrival order. Position is the order's identity.
    orders: Vec<Order>,
    sealed: bool,
    /// Exact number of orders a round needs from this party.
    batch_size: usize,
}

impl PendingBuffer {
    #[must_use]
    pub fn new(party: Party, batch_size: usize) -> Self {
        Self {
            party,
            orders: Vec::with_capacity(batch_size),
            sealed: false,
            batch_size,
        }
    }

    /// Push an order into the buffer.
    ///
    /// # Errors
    /// - `BufferAlreadySealed` if the buffer has been sealed
    /// - `BufferFull` if the buffer already holds `batch_size` orders
    pub fn push(&mut self, order: Order) -> Result<()> {
        if self.sealed {
            return Err(PrimematchError::BufferAlreadySealed);
        }
        if self.orders.len() >= self.batch_size {
            return Err(PrimematchError::BufferFull);
        }
        self.orders.push(order);
        Ok(())
    }

    /// Seal the buffer.
    ///
    /// # Errors
    /// - `BufferAlreadySealed` if already sealed
    /// - `BatchSizeMismatch` unless exactly `batch_size` orders are held
    pub fn seal(&mut self) -> Result<()> {
        if self.sealed {
            return Err(PrimematchError::BufferAlreadySealed);
        }
        if self.orders.len() != self.batch_size {
            return Err(PrimematchError::BatchSizeMismatch {
                party: self.party,
                expected: self.batch_size,
                actual: self.orders.len(),
            });
        }
        self.sealed = true;
        Ok(())
    }

    /// Take the sealed orders, leaving the buffer empty but still sealed.
    ///
    /// # Errors
    /// `BufferNotSealed` if [`Self::seal`] has not succeeded.
    pub fn drain(&mut self) -> Result<Vec<Order>> {
        if !self.sealed {
            return Err(PrimematchError::BufferNotSealed);
        }
        Ok(std::mem::take(&mut self.orders))
    }

    /// Orders held so far, in arrival order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn party(&self) -> Party {
        self.party
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Reset the buffer for the next round.
    pub fn reset(&mut self) {
        self.orders.clear();
        self.sealed = false;
    }
}
