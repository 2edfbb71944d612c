//! Evaluator-side helpers.
//!
//! These never run inside `SecretStoreContract` entry points. They are the
//! scoring rules an evaluator node links against, and what owners use to
//! build their commitments.

use soroban_sdk::{Address, Bytes, BytesN, Env};

use crate::{SecretVar, BLANK_ANSWER};

/// `keccak256(answers || salt || owner)`
pub fn seal_answers(env: &Env, answers: &Bytes, salt: &BytesN<32>, owner: &Address) -> BytesN<32> {
    let mut preimage = answers.clone();
    preimage.append(&Bytes::from_array(env, &salt.to_array()));
    preimage.append(&owner.to_string().to_bytes());
    env.crypto().keccak256(&preimage).into()
}

/// Check an off-chain opening against the committed input.
pub fn verify_opening(env: &Env, var: &SecretVar, answers: &Bytes, salt: &BytesN<32>) -> bool {
    if answers.len() != var.length {
        return false;
    }
    match &var.commitment {
        Some(commitment) => seal_answers(env, answers, salt, &var.owner) == *commitment,
        None => false,
    }
}

/// Matches over the first `width` positions. Blank answers never match and
/// positions missing from either vector count as unanswered.
pub fn score_answers(key: &Bytes, answers: &Bytes, width: u32) -> u32 {
    let mut score = 0u32;
    for i in 0..width {
        if let (Some(expected), Some(answer)) = (key.get(i), answers.get(i)) {
            if answer != BLANK_ANSWER && answer == expected {
                score += 1;
            }
        }
    }
    score
}
