//! # Chain Storage & Validation
//!
//! The append-only block sequence and everything that guards it:
//!
//! - **block** — the sealed Block record and its body encoding.
//! - **store** — the Chain Store, owner of the single mutation path.
//! - **validator** — the read-only full-chain tamper/linkage scan.
//!
//! The store owns all blocks exclusively; nothing outside this module ever
//! holds a mutable reference into the sequence. Reads hand out clones.

pub mod block;
pub mod store;
pub mod validator;

pub use block::{Block, BlockError, StarRecord};
pub use store::{ChainError, ChainStore};
pub use validator::{validate, Violation};
