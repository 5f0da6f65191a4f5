// Copyright (c) 2026 ASTRA Contributors. MIT License.
// See LICENSE for details.

//! # ASTRA Ledger — Core Library
//!
//! A minimal append-only ledger for star ownership claims: hash-linked
//! blocks, an atomic integrity-checked append path, a full-chain tamper
//! validator, and a time-boxed ownership-proof workflow that gates who may
//! register a star.
//!
//! ASTRA is deliberately small. It is a single authoritative, in-process,
//! memory-resident ledger — not a distributed blockchain. There is no
//! consensus, no replication, no fork choice, and no durability across
//! restarts. What it does have is a hard guarantee: **no block is ever
//! appended on top of a corrupt chain**, because every append revalidates
//! the entire sequence first.
//!
//! ## Architecture
//!
//! - **crypto** — SHA-256 and Ed25519 wrappers. Opaque primitives with
//!   documented contracts; nothing is reimplemented here.
//! - **chain** — the Block record, the Chain Store (sole mutation path),
//!   and the read-only Chain Validator.
//! - **registry** — the challenge/sign/verify ownership-proof workflow.
//! - **config** — protocol constants. Every magic number lives there.
//!
//! ## Design Philosophy
//!
//! 1. Consistency over throughput. Appends are O(n) on purpose.
//! 2. One mutation path, one lock, zero partially-built blocks.
//! 3. Verification errors say "no", not why. No oracles for attackers.
//! 4. If it guards the chain, it has tests. Plural.

pub mod chain;
pub mod config;
pub mod crypto;
pub mod registry;
