//! # Chain Store
//!
//! Owner of the block sequence and the sole mutation path. Everything that
//! changes the chain goes through [`ChainStore::append`], and `append`
//! revalidates the *entire* chain before touching it.
//!
//! ## On the O(n) append
//!
//! Revalidating the whole chain on every append makes appends O(n) and a
//! full chain build O(n²). That is the contract, not an accident: no
//! corrupt state is ever built upon, full stop. For a small,
//! trust-sensitive ledger this consistency-over-throughput trade is the
//! right one. Do not "optimize" this away — the refusal to append onto a
//! corrupt chain is observable behavior that callers and tests depend on.
//!
//! ## Locking
//!
//! One `RwLock` guards the block vector. `append` holds the write lock
//! across the whole validate → link → seal → push sequence; two concurrent
//! appends can therefore never both validate against the same pre-mutation
//! snapshot. Reads take the shared lock and hand out clones, so they
//! observe a consistent chain and never a half-built block.

use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;

use super::block::{Block, BlockError, StarRecord};
use super::validator::{validate, Violation};

/// Errors from chain store operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Pre-append validation found violations; nothing was mutated.
    #[error("chain is corrupt: {} violation(s) found", .violations.len())]
    Corrupt { violations: Vec<Violation> },

    /// The last stored block's hash was unreadable during append. This is
    /// an internal invariant breach — a sealed block always has a hash.
    #[error("previous block hash is missing")]
    MissingPreviousHash,

    /// No block with the requested hash exists.
    #[error("no block with hash {hash}")]
    NotFound { hash: String },

    /// Block construction failed (body encoding).
    #[error(transparent)]
    Block(#[from] BlockError),
}

/// The in-memory, append-only block store.
///
/// Created empty, seeded with genesis via [`initialize`](Self::initialize),
/// grows monotonically by one block per successful append, never shrinks.
/// Lifetime is the process's lifetime — this ledger is explicitly volatile.
#[derive(Debug, Default)]
pub struct ChainStore {
    blocks: RwLock<Vec<Block>>,
}

impl ChainStore {
    /// Creates an empty, uninitialized store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the chain with the genesis block if it is empty.
    ///
    /// Idempotent: calling this on an initialized store is a no-op.
    pub fn initialize(&self) {
        let mut blocks = self.blocks.write();
        if blocks.is_empty() {
            let genesis = Block::genesis();
            tracing::info!(hash = %genesis.hash, "genesis block created");
            blocks.push(genesis);
        }
    }

    /// Appends a new block carrying `payload`. The single mutating entry
    /// point.
    ///
    /// The whole sequence runs under one exclusive lock:
    ///
    /// 1. Validate the entire stored chain; any violation refuses the
    ///    append with [`ChainError::Corrupt`] and **no** mutation.
    /// 2. Read the last block's hash ([`ChainError::MissingPreviousHash`]
    ///    if unreadable); an empty chain yields the genesis sentinel.
    /// 3. Construct and seal the new block, then push it.
    ///
    /// Returns the sealed block as stored.
    ///
    /// Crate-internal on purpose: the public entry points into mutation
    /// are [`initialize`](Self::initialize) and the registry's `submit`.
    /// Appending without an ownership proof is not part of the contract.
    pub(crate) fn append<T: Serialize>(&self, payload: &T) -> Result<Block, ChainError> {
        let mut blocks = self.blocks.write();

        let violations = validate(&blocks);
        if !violations.is_empty() {
            tracing::warn!(
                count = violations.len(),
                "append refused: chain failed validation"
            );
            return Err(ChainError::Corrupt { violations });
        }

        let previous_hash = match blocks.last() {
            Some(last) if last.hash.is_empty() => return Err(ChainError::MissingPreviousHash),
            Some(last) => Some(last.hash.clone()),
            None => None,
        };

        let block = Block::new(blocks.len() as u64, previous_hash, payload)?;
        tracing::debug!(height = block.height, hash = %block.hash, "block appended");
        blocks.push(block.clone());

        Ok(block)
    }

    /// Current chain height (block count).
    pub fn height(&self) -> u64 {
        self.blocks.read().len() as u64
    }

    /// Look up a block by its hex hash.
    ///
    /// A miss is an error here — callers asking by hash claim the block
    /// exists. Contrast with [`block_by_height`](Self::block_by_height).
    pub fn block_by_hash(&self, hash: &str) -> Result<Block, ChainError> {
        self.blocks
            .read()
            .iter()
            .find(|b| b.hash == hash)
            .cloned()
            .ok_or_else(|| ChainError::NotFound {
                hash: hash.to_string(),
            })
    }

    /// Look up a block by its height field.
    ///
    /// Absence is a normal, non-exceptional outcome — probing one past the
    /// tip is how callers discover the end of the chain. This asymmetry
    /// with [`block_by_hash`](Self::block_by_hash) is intentional.
    pub fn block_by_height(&self, height: u64) -> Option<Block> {
        self.blocks
            .read()
            .iter()
            .find(|b| b.height == height)
            .cloned()
    }

    /// All star records owned by `address`, in chain order.
    ///
    /// Decodes every block body; keeps the ones that parse as a
    /// [`StarRecord`] with a matching address and a non-empty star
    /// payload. The genesis block has no address and drops out naturally.
    pub fn stars_by_address(&self, address: &str) -> Vec<StarRecord> {
        self.blocks
            .read()
            .iter()
            .filter_map(|b| b.decode_body::<StarRecord>().ok())
            .filter(|r| r.address == address && r.has_star())
            .collect()
    }

    /// Run the full-chain validator against the current sequence.
    ///
    /// Read-only; safe to call concurrently with anything. An empty report
    /// means the chain is fully consistent.
    pub fn validate_chain(&self) -> Vec<Violation> {
        validate(&self.blocks.read())
    }

    /// Snapshot of the whole chain, for diagnostics and tests.
    pub fn snapshot(&self) -> Vec<Block> {
        self.blocks.read().clone()
    }

    /// Rebuild a store from an existing block sequence, e.g. an exported
    /// snapshot. The sequence is adopted as-is — a corrupt snapshot yields
    /// a store whose next `append` will refuse to build on it, which is
    /// exactly the point.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks: RwLock::new(blocks),
        }
    }
}
