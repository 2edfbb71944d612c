#![cfg(test)]

//! Tests for the reference secret store.
//!
//! Commitments are built with `seal_answers`; the tests play the evaluator
//! node by checking openings and posting scores themselves.

use crate::{
    score_answers, seal_answers, verify_opening, BatchStatus, SecretStoreContract,
    SecretStoreContractClient, StoreError, VarKind, MAX_VECTOR_LEN,
};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{vec, Address, Bytes, BytesN, Env, Vec};

// ════════════════════════════════════════════════════════════════════════════
//  Helpers
// ════════════════════════════════════════════════════════════════════════════

fn setup() -> (Env, SecretStoreContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let evaluator = Address::generate(&env);
    let store_id = env.register(SecretStoreContract, (&evaluator,));
    let client = SecretStoreContractClient::new(&env, &store_id);
    let controller = Address::generate(&env);

    (env, client, evaluator, controller)
}

/// 20-answer vector with the given leading answers, padded with blanks.
fn answers(env: &Env, leading: &[u8]) -> Bytes {
    let mut buf = [0u8; 20];
    buf[..leading.len()].copy_from_slice(leading);
    Bytes::from_array(env, &buf)
}

fn salt(env: &Env, seed: u8) -> BytesN<32> {
    BytesN::from_array(env, &[seed; 32])
}

/// Commit `leading` (20 answers) for `owner`, returning the handle.
fn commit(
    env: &Env,
    client: &SecretStoreContractClient,
    owner: &Address,
    controller: &Address,
    leading: &[u8],
) -> u64 {
    let commitment = seal_answers(env, &answers(env, leading), &salt(env, 1), owner);
    client.commit(owner, controller, &20, &commitment)
}

fn assert_store_error<T, E>(
    result: &Result<Result<T, E>, Result<StoreError, soroban_sdk::InvokeError>>,
    expected: StoreError,
) {
    match result {
        Err(Ok(actual)) => assert_eq!(*actual, expected),
        Err(Err(invoke_err)) => panic!("Expected {:?}, got invoke error: {:?}", expected, invoke_err),
        Ok(_) => panic!("Expected {:?}, but operation succeeded", expected),
    }
}

// ════════════════════════════════════════════════════════════════════════════
//  Commit & claim
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn test_commit_records_metadata() {
    let (env, client, _evaluator, controller) = setup();
    let owner = Address::generate(&env);
    let commitment = seal_answers(&env, &answers(&env, &[1, 2, 3]), &salt(&env, 1), &owner);

    let h1 = client.commit(&owner, &controller, &20, &commitment);
    let h2 = commit(&env, &client, &owner, &controller, &[4]);
    assert_ne!(h1, h2);

    let var = client.variable(&h1);
    assert_eq!(var.controller, controller);
    assert_eq!(var.owner, owner);
    assert_eq!(var.kind, VarKind::Input);
    assert_eq!(var.length, 20);
    assert_eq!(var.batch, None);
    assert!(!var.claimed);
    assert_eq!(var.commitment, Some(commitment));

    // The owner authorizes their own commit
    assert_eq!(env.auths()[0].0, owner);
}

#[test]
fn test_commit_rejects_invalid_length() {
    let (env, client, _evaluator, controller) = setup();
    let owner = Address::generate(&env);
    let commitment = salt(&env, 9);

    let empty = client.try_commit(&owner, &controller, &0, &commitment);
    assert_store_error(&empty, StoreError::InvalidLength);

    let too_long = client.try_commit(&owner, &controller, &(MAX_VECTOR_LEN + 1), &commitment);
    assert_store_error(&too_long, StoreError::InvalidLength);
}

#[test]
fn test_unknown_variable() {
    let (_env, client, _evaluator, _controller) = setup();
    assert_store_error(&client.try_variable(&42), StoreError::UnknownVariable);
}

#[test]
fn test_claim_is_single_use() {
    let (env, client, _evaluator, controller) = setup();
    let owner = Address::generate(&env);
    let handle = commit(&env, &client, &owner, &controller, &[1]);

    let var = client.claim(&controller, &handle);
    assert!(var.claimed);
    assert!(client.variable(&handle).claimed);

    assert_store_error(&client.try_claim(&controller, &handle), StoreError::AlreadyClaimed);
}

#[test]
fn test_claim_by_foreign_controller() {
    let (env, client, _evaluator, controller) = setup();
    let owner = Address::generate(&env);
    let intruder = Address::generate(&env);
    let handle = commit(&env, &client, &owner, &controller, &[1]);

    assert_store_error(&client.try_claim(&intruder, &handle), StoreError::NotController);
    assert!(!client.variable(&handle).claimed);
}

// ════════════════════════════════════════════════════════════════════════════
//  Batches
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn test_batch_waits_for_evaluator() {
    let (env, client, _evaluator, controller) = setup();
    let creator = Address::generate(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    let key = commit(&env, &client, &creator, &controller, &[1, 2, 3]);
    let a = commit(&env, &client, &alice, &controller, &[1, 2, 3]);
    let b = commit(&env, &client, &bob, &controller, &[1, 6, 4]);

    let ticket = client.compute_batch(&controller, &key, &vec![&env, a, b], &20);
    assert_eq!(ticket.outputs.len(), 2);
    assert_eq!(client.batch_status(&ticket.batch_id), BatchStatus::Pending);

    let early = client.try_open(&controller, &ticket.outputs);
    assert_store_error(&early, StoreError::NotComputed);

    client.post_scores(&ticket.batch_id, &vec![&env, 3u32, 1u32]);
    assert_eq!(client.batch_status(&ticket.batch_id), BatchStatus::Done);
    assert_eq!(client.open(&controller, &ticket.outputs), vec![&env, 3u32, 1u32]);

    // Opening a subset keeps the order of the handles given
    let reversed = vec![&env, ticket.outputs.get_unchecked(1), ticket.outputs.get_unchecked(0)];
    assert_eq!(client.open(&controller, &reversed), vec![&env, 1u32, 3u32]);

    let out = client.variable(&ticket.outputs.get_unchecked(0));
    assert_eq!(out.kind, VarKind::Output);
    assert_eq!(out.owner, alice);
    assert_eq!(out.batch, Some(ticket.batch_id));
    assert_eq!(out.commitment, None);
}

#[test]
fn test_evaluator_scores_verified_openings() {
    let (env, client, _evaluator, controller) = setup();
    let creator = Address::generate(&env);
    let player = Address::generate(&env);

    let key_answers = answers(&env, &[1, 2, 3, 4, 5]);
    let player_answers = answers(&env, &[1, 2, 3, 9, 5]);
    let key = client.commit(
        &creator,
        &controller,
        &20,
        &seal_answers(&env, &key_answers, &salt(&env, 3), &creator),
    );
    let entry = client.commit(
        &player,
        &controller,
        &20,
        &seal_answers(&env, &player_answers, &salt(&env, 4), &player),
    );

    let ticket = client.compute_batch(&controller, &key, &vec![&env, entry], &4);

    // Evaluator side: check both openings, score over the batch width
    assert!(verify_opening(&env, &client.variable(&key), &key_answers, &salt(&env, 3)));
    assert!(verify_opening(&env, &client.variable(&entry), &player_answers, &salt(&env, 4)));
    let width = client.get_batch(&ticket.batch_id).width;
    let score = score_answers(&key_answers, &player_answers, width);
    assert_eq!(score, 3);

    client.post_scores(&ticket.batch_id, &vec![&env, score]);
    assert_eq!(client.open(&controller, &ticket.outputs), vec![&env, 3u32]);
}

#[test]
fn test_post_scores_validates_output() {
    let (env, client, _evaluator, controller) = setup();
    let owner = Address::generate(&env);
    let key = commit(&env, &client, &owner, &controller, &[1]);
    let entry = commit(&env, &client, &owner, &controller, &[1]);
    let ticket = client.compute_batch(&controller, &key, &vec![&env, entry], &5);

    let short = client.try_post_scores(&ticket.batch_id, &Vec::new(&env));
    assert_store_error(&short, StoreError::MalformedOutput);

    let too_high = client.try_post_scores(&ticket.batch_id, &vec![&env, 6u32]);
    assert_store_error(&too_high, StoreError::MalformedOutput);
    assert_eq!(client.batch_status(&ticket.batch_id), BatchStatus::Pending);

    client.post_scores(&ticket.batch_id, &vec![&env, 5u32]);
    let again = client.try_post_scores(&ticket.batch_id, &vec![&env, 1u32]);
    assert_store_error(&again, StoreError::BatchNotPending);
}

#[test]
fn test_abort_fails_batch() {
    let (env, client, _evaluator, controller) = setup();
    let owner = Address::generate(&env);
    let key = commit(&env, &client, &owner, &controller, &[1]);
    let entry = commit(&env, &client, &owner, &controller, &[1]);
    let ticket = client.compute_batch(&controller, &key, &vec![&env, entry], &20);

    client.abort(&ticket.batch_id);
    assert_eq!(client.batch_status(&ticket.batch_id), BatchStatus::Failed);

    assert_store_error(&client.try_open(&controller, &ticket.outputs), StoreError::NotComputed);
    let post = client.try_post_scores(&ticket.batch_id, &vec![&env, 1u32]);
    assert_store_error(&post, StoreError::BatchNotPending);
    assert_store_error(&client.try_abort(&ticket.batch_id), StoreError::BatchNotPending);
}

#[test]
fn test_empty_batch() {
    let (env, client, _evaluator, controller) = setup();
    let owner = Address::generate(&env);
    let key = commit(&env, &client, &owner, &controller, &[1]);

    let ticket = client.compute_batch(&controller, &key, &Vec::new(&env), &20);
    assert_eq!(ticket.outputs.len(), 0);

    client.post_scores(&ticket.batch_id, &Vec::new(&env));
    assert_eq!(client.batch_status(&ticket.batch_id), BatchStatus::Done);
    assert_eq!(client.open(&controller, &ticket.outputs).len(), 0);
}

#[test]
fn test_unknown_batch() {
    let (env, client, _evaluator, _controller) = setup();
    assert_store_error(&client.try_batch_status(&7), StoreError::UnknownBatch);
    assert_store_error(&client.try_post_scores(&7, &Vec::new(&env)), StoreError::UnknownBatch);
}

// ════════════════════════════════════════════════════════════════════════════
//  Access control
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn test_inputs_can_never_be_opened() {
    let (env, client, _evaluator, controller) = setup();
    let owner = Address::generate(&env);
    let key = commit(&env, &client, &owner, &controller, &[1, 2]);

    let result = client.try_open(&controller, &vec![&env, key]);
    assert_store_error(&result, StoreError::InputNotOpenable);
}

#[test]
fn test_foreign_controller_rejected() {
    let (env, client, _evaluator, controller) = setup();
    let owner = Address::generate(&env);
    let intruder = Address::generate(&env);

    let key = commit(&env, &client, &owner, &controller, &[1]);
    let entry = commit(&env, &client, &owner, &controller, &[1]);

    let result = client.try_compute_batch(&intruder, &key, &vec![&env, entry], &20);
    assert_store_error(&result, StoreError::NotController);

    let ticket = client.compute_batch(&controller, &key, &vec![&env, entry], &20);
    client.post_scores(&ticket.batch_id, &vec![&env, 1u32]);
    let result = client.try_open(&intruder, &ticket.outputs);
    assert_store_error(&result, StoreError::NotController);
}

#[test]
fn test_outputs_cannot_be_batch_inputs() {
    let (env, client, _evaluator, controller) = setup();
    let owner = Address::generate(&env);
    let key = commit(&env, &client, &owner, &controller, &[1]);
    let entry = commit(&env, &client, &owner, &controller, &[1]);
    let ticket = client.compute_batch(&controller, &key, &vec![&env, entry], &20);
    let output = ticket.outputs.get_unchecked(0);

    let result = client.try_compute_batch(&controller, &key, &vec![&env, output], &20);
    assert_store_error(&result, StoreError::NotAnInput);
    assert_store_error(&client.try_claim(&controller, &output), StoreError::NotAnInput);
}

#[test]
fn test_invalid_width() {
    let (env, client, _evaluator, controller) = setup();
    let owner = Address::generate(&env);
    let key = commit(&env, &client, &owner, &controller, &[1]);

    let zero = client.try_compute_batch(&controller, &key, &Vec::new(&env), &0);
    assert_store_error(&zero, StoreError::InvalidWidth);
    let wide = client.try_compute_batch(&controller, &key, &Vec::new(&env), &(MAX_VECTOR_LEN + 1));
    assert_store_error(&wide, StoreError::InvalidWidth);
}

#[test]
fn test_set_evaluator() {
    let (env, client, evaluator, _controller) = setup();
    assert_eq!(client.get_evaluator(), evaluator);

    let replacement = Address::generate(&env);
    client.set_evaluator(&replacement);
    assert_eq!(env.auths()[0].0, evaluator);
    assert_eq!(client.get_evaluator(), replacement);
}
