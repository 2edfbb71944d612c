#![no_std]

//! # Secret Variable Store (reference evaluator)
//!
//! Holds commitments to secret answer vectors on behalf of a controlling
//! contract and runs the batched answer-comparison computation through a
//! single trusted evaluator.
//!
//! **This store is not confidential against its evaluator.** Chain observers
//! only ever see `keccak256` commitments and final scores, but the evaluator
//! receives every opening off-chain and computes the scores in the clear. A
//! production deployment replaces it with an MPC node network exposing the
//! same interface.
//!
//! | Operation       | Who           | Effect                                       |
//! |-----------------|---------------|----------------------------------------------|
//! | `commit`        | owner         | register a commitment, return an opaque handle |
//! | `variable`      | anyone        | public metadata (owner, kind, length)        |
//! | `claim`         | controller    | bind an input to one use                     |
//! | `compute_batch` | controller    | request `key × entry[i]` scores, one batch   |
//! | `post_scores`   | evaluator     | deliver the scores of a pending batch        |
//! | `abort`         | evaluator     | fail a pending batch                         |
//! | `open`          | controller    | reveal the scores of a finished batch        |
//!
//! ## Commitments
//!
//! An input commits to `keccak256(answers || salt || owner)`, see
//! [`seal_answers`]. `answers` holds one byte per question and
//! `BLANK_ANSWER` (0) marks an unanswered or padded position. The owner sends
//! `(answers, salt)` to the evaluator over a private channel; the evaluator
//! checks them with [`verify_opening`] and scores with [`score_answers`].

use soroban_sdk::{
    contract, contracterror, contractevent, contractimpl, contracttype, log, Address, Bytes,
    BytesN, Env, Vec,
};

mod evaluator;

pub use evaluator::{score_answers, seal_answers, verify_opening};

// ═══════════════════════════════════════════════════════════════════════════════
//  Error codes
// ═══════════════════════════════════════════════════════════════════════════════

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum StoreError {
    UnknownVariable = 1,
    UnknownBatch = 2,
    NotController = 3,
    NotAnInput = 4,
    InputNotOpenable = 5,
    NotComputed = 6,
    InvalidLength = 7,
    AlreadyClaimed = 8,
    InvalidWidth = 9,
    BatchNotPending = 10,
    MalformedOutput = 11,
    EvaluatorNotSet = 12,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Events
// ═══════════════════════════════════════════════════════════════════════════════

#[contractevent]
pub struct EvVariableCommitted {
    pub handle: u64,
    pub owner: Address,
    pub controller: Address,
    pub commitment: BytesN<32>,
}

#[contractevent]
pub struct EvVariableClaimed {
    pub handle: u64,
    pub controller: Address,
}

/// The evaluator listens for this to collect the openings of `entries`.
#[contractevent]
pub struct EvBatchRequested {
    pub batch_id: u64,
    pub controller: Address,
    pub size: u32,
}

#[contractevent]
pub struct EvBatchEvaluated {
    pub batch_id: u64,
}

#[contractevent]
pub struct EvBatchFailed {
    pub batch_id: u64,
}

#[contractevent]
pub struct EvVariablesOpened {
    pub controller: Address,
    pub count: u32,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Types
// ═══════════════════════════════════════════════════════════════════════════════

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VarKind {
    Input,
    Output,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BatchStatus {
    Pending,
    Done,
    Failed,
}

/// Public metadata of a secret variable. Answers never appear here.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SecretVar {
    pub controller: Address,
    pub owner: Address,
    pub kind: VarKind,
    /// Declared number of answers for inputs, 1 for outputs.
    pub length: u32,
    /// Producing batch, for `Output` variables.
    pub batch: Option<u64>,
    /// Set once the controller has bound the input to a use.
    pub claimed: bool,
    /// `keccak256(answers || salt || owner)` for inputs.
    pub commitment: Option<BytesN<32>>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Batch {
    pub controller: Address,
    pub key: u64,
    pub entries: Vec<u64>,
    pub outputs: Vec<u64>,
    pub width: u32,
    pub status: BatchStatus,
    pub requested_at: u64,
    /// `scores[i]` belongs to `outputs[i]`; empty until `Done`.
    pub scores: Vec<u32>,
}

/// Returned by `compute_batch`: `outputs[i]` will hold the score of `entries[i]`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComputeTicket {
    pub batch_id: u64,
    pub outputs: Vec<u64>,
}

#[contracttype]
#[derive(Clone)]
enum StorageKey {
    Evaluator,
    NextHandle,
    NextBatch,
    Var(u64),
    Batch(u64),
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Constants
// ═══════════════════════════════════════════════════════════════════════════════

pub const MAX_VECTOR_LEN: u32 = 100;
pub const BLANK_ANSWER: u8 = 0;

// Ledger rate is approximately 5 seconds per ledger on Stellar
const LEDGER_RATE_SECS: u32 = 5;

// Variables outlive the games that reference them: 180 days
const TTL_SECONDS: u32 = 180 * 24 * 60 * 60;
const TTL_LEDGERS: u32 = TTL_SECONDS / LEDGER_RATE_SECS;

// ═══════════════════════════════════════════════════════════════════════════════
//  Contract
// ═══════════════════════════════════════════════════════════════════════════════

#[contract]
pub struct SecretStoreContract;

#[contractimpl]
impl SecretStoreContract {
    pub fn __constructor(env: Env, evaluator: Address) {
        env.storage()
            .instance()
            .set(&StorageKey::Evaluator, &evaluator);
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Variables
    // ───────────────────────────────────────────────────────────────────────────

    /// Register a commitment under a fresh handle. `controller` is the contract
    /// allowed to claim, compute over and open it.
    pub fn commit(
        env: Env,
        owner: Address,
        controller: Address,
        length: u32,
        commitment: BytesN<32>,
    ) -> Result<u64, StoreError> {
        owner.require_auth();

        if length == 0 || length > MAX_VECTOR_LEN {
            return Err(StoreError::InvalidLength);
        }

        let handle = Self::next_id(&env, StorageKey::NextHandle);
        let var = SecretVar {
            controller: controller.clone(),
            owner: owner.clone(),
            kind: VarKind::Input,
            length,
            batch: None,
            claimed: false,
            commitment: Some(commitment.clone()),
        };
        Self::write_var(&env, handle, &var);

        EvVariableCommitted {
            handle,
            owner,
            controller,
            commitment,
        }.publish(&env);

        Ok(handle)
    }

    pub fn variable(env: Env, handle: u64) -> Result<SecretVar, StoreError> {
        Self::read_var(&env, handle)
    }

    /// Mark an input as used. Each input can be claimed once.
    pub fn claim(env: Env, controller: Address, handle: u64) -> Result<SecretVar, StoreError> {
        controller.require_auth();

        let mut var = Self::require_input(&env, &controller, handle)?;
        if var.claimed {
            return Err(StoreError::AlreadyClaimed);
        }
        var.claimed = true;
        Self::write_var(&env, handle, &var);

        EvVariableClaimed { handle, controller }.publish(&env);
        Ok(var)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Computation
    // ───────────────────────────────────────────────────────────────────────────

    /// Request one comparison per entry against `key`, over the first `width`
    /// positions. All handles must be inputs controlled by `controller`. The
    /// batch stays `Pending` until the evaluator posts or aborts it.
    pub fn compute_batch(
        env: Env,
        controller: Address,
        key: u64,
        entries: Vec<u64>,
        width: u32,
    ) -> Result<ComputeTicket, StoreError> {
        controller.require_auth();

        if width == 0 || width > MAX_VECTOR_LEN {
            return Err(StoreError::InvalidWidth);
        }
        Self::require_input(&env, &controller, key)?;

        let batch_id = Self::next_id(&env, StorageKey::NextBatch);
        let mut outputs: Vec<u64> = Vec::new(&env);
        for entry in entries.iter() {
            let input = Self::require_input(&env, &controller, entry)?;
            let handle = Self::next_id(&env, StorageKey::NextHandle);
            Self::write_var(
                &env,
                handle,
                &SecretVar {
                    controller: controller.clone(),
                    owner: input.owner,
                    kind: VarKind::Output,
                    length: 1,
                    batch: Some(batch_id),
                    claimed: false,
                    commitment: None,
                },
            );
            outputs.push_back(handle);
        }

        let batch = Batch {
            controller: controller.clone(),
            key,
            entries,
            outputs: outputs.clone(),
            width,
            status: BatchStatus::Pending,
            requested_at: env.ledger().timestamp(),
            scores: Vec::new(&env),
        };
        Self::write_batch(&env, batch_id, &batch);

        EvBatchRequested {
            batch_id,
            controller,
            size: outputs.len(),
        }.publish(&env);

        Ok(ComputeTicket { batch_id, outputs })
    }

    /// Deliver the scores of a pending batch, one per entry. Evaluator only.
    pub fn post_scores(env: Env, batch_id: u64, scores: Vec<u32>) -> Result<(), StoreError> {
        let evaluator = Self::load_evaluator(&env)?;
        evaluator.require_auth();

        let mut batch = Self::read_batch(&env, batch_id)?;
        if batch.status != BatchStatus::Pending {
            return Err(StoreError::BatchNotPending);
        }
        if scores.len() != batch.outputs.len() {
            return Err(StoreError::MalformedOutput);
        }
        // A score can never exceed the number of compared positions
        if scores.iter().any(|s| s > batch.width) {
            return Err(StoreError::MalformedOutput);
        }

        batch.scores = scores;
        batch.status = BatchStatus::Done;
        Self::write_batch(&env, batch_id, &batch);

        log!(&env, "batch evaluated", batch_id, batch.outputs.len());
        EvBatchEvaluated { batch_id }.publish(&env);
        Ok(())
    }

    /// Mark a pending batch as failed without producing outputs. Evaluator only.
    pub fn abort(env: Env, batch_id: u64) -> Result<(), StoreError> {
        let evaluator = Self::load_evaluator(&env)?;
        evaluator.require_auth();

        let mut batch = Self::read_batch(&env, batch_id)?;
        if batch.status != BatchStatus::Pending {
            return Err(StoreError::BatchNotPending);
        }

        batch.status = BatchStatus::Failed;
        Self::write_batch(&env, batch_id, &batch);

        log!(&env, "batch aborted", batch_id);
        EvBatchFailed { batch_id }.publish(&env);
        Ok(())
    }

    pub fn batch_status(env: Env, batch_id: u64) -> Result<BatchStatus, StoreError> {
        Ok(Self::read_batch(&env, batch_id)?.status)
    }

    pub fn get_batch(env: Env, batch_id: u64) -> Result<Batch, StoreError> {
        Self::read_batch(&env, batch_id)
    }

    /// Reveal computed scores, in the order of `handles`.
    pub fn open(env: Env, controller: Address, handles: Vec<u64>) -> Result<Vec<u32>, StoreError> {
        controller.require_auth();

        let mut scores: Vec<u32> = Vec::new(&env);
        let mut cached: Option<(u64, Batch)> = None;
        for handle in handles.iter() {
            let var = Self::read_var(&env, handle)?;
            if var.controller != controller {
                return Err(StoreError::NotController);
            }
            if var.kind != VarKind::Output {
                return Err(StoreError::InputNotOpenable);
            }

            let batch_id = var.batch.ok_or(StoreError::NotComputed)?;
            if cached.as_ref().map(|(id, _)| *id) != Some(batch_id) {
                cached = Some((batch_id, Self::read_batch(&env, batch_id)?));
            }
            let (_, batch) = cached.as_ref().ok_or(StoreError::NotComputed)?;
            if batch.status != BatchStatus::Done {
                return Err(StoreError::NotComputed);
            }

            let idx = batch
                .outputs
                .first_index_of(handle)
                .ok_or(StoreError::MalformedOutput)?;
            scores.push_back(batch.scores.get(idx).ok_or(StoreError::MalformedOutput)?);
        }

        EvVariablesOpened {
            controller,
            count: scores.len(),
        }.publish(&env);

        Ok(scores)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Config
    // ───────────────────────────────────────────────────────────────────────────

    pub fn get_evaluator(env: Env) -> Result<Address, StoreError> {
        Self::load_evaluator(&env)
    }

    pub fn set_evaluator(env: Env, new_evaluator: Address) -> Result<(), StoreError> {
        let evaluator = Self::load_evaluator(&env)?;
        evaluator.require_auth();
        env.storage()
            .instance()
            .set(&StorageKey::Evaluator, &new_evaluator);
        Ok(())
    }

    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) -> Result<(), StoreError> {
        let evaluator = Self::load_evaluator(&env)?;
        evaluator.require_auth();
        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    //  Internal: Guards & Storage
    // ═══════════════════════════════════════════════════════════════════════════

    fn require_input(env: &Env, controller: &Address, handle: u64) -> Result<SecretVar, StoreError> {
        let var = Self::read_var(env, handle)?;
        if var.controller != *controller {
            return Err(StoreError::NotController);
        }
        if var.kind != VarKind::Input {
            return Err(StoreError::NotAnInput);
        }
        Ok(var)
    }

    fn next_id(env: &Env, counter: StorageKey) -> u64 {
        let id: u64 = env.storage().instance().get(&counter).unwrap_or(1);
        env.storage().instance().set(&counter, &(id + 1));
        id
    }

    fn read_var(env: &Env, handle: u64) -> Result<SecretVar, StoreError> {
        env.storage()
            .persistent()
            .get(&StorageKey::Var(handle))
            .ok_or(StoreError::UnknownVariable)
    }

    fn write_var(env: &Env, handle: u64, var: &SecretVar) {
        let key = StorageKey::Var(handle);
        env.storage().persistent().set(&key, var);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_LEDGERS, TTL_LEDGERS);
    }

    fn read_batch(env: &Env, batch_id: u64) -> Result<Batch, StoreError> {
        env.storage()
            .persistent()
            .get(&StorageKey::Batch(batch_id))
            .ok_or(StoreError::UnknownBatch)
    }

    fn write_batch(env: &Env, batch_id: u64, batch: &Batch) {
        let key = StorageKey::Batch(batch_id);
        env.storage().persistent().set(&key, batch);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_LEDGERS, TTL_LEDGERS);
        env.storage()
            .instance()
            .extend_ttl(TTL_LEDGERS, TTL_LEDGERS);
    }

    fn load_evaluator(env: &Env) -> Result<Address, StoreError> {
        env.storage()
            .instance()
            .get(&StorageKey::Evaluator)
            .ok_or(StoreError::EvaluatorNotSet)
    }
}

#[cfg(test)]
mod test;
