use soroban_sdk::{Address, BytesN};

use crate::{types::Choice, ConfidentialClient};

// `this` is the quiz contract. Every handle below is computed by and readable
// to it alone; players never gain access to the aggregate.

/// Encrypted `true`, the neutral element the round's aggregate starts from.
pub fn seed(service: &ConfidentialClient, this: &Address) -> BytesN<32> {
    service.as_ebool(this, &true)
}

/// Encrypted per-question result: the choice equals the reference answer and
/// is one of the permitted choice values.
pub fn score_choice(
    service: &ConfidentialClient,
    this: &Address,
    choice: &BytesN<32>,
    answer: &BytesN<32>,
) -> BytesN<32> {
    let matches = service.fhe_eq(this, choice, answer);

    let yes = service.as_euint8(this, &Choice::Yes.to_u32());
    let no = service.as_euint8(this, &Choice::No.to_u32());
    let is_yes = service.fhe_eq(this, choice, &yes);
    let is_no = service.fhe_eq(this, choice, &no);
    let permitted = service.fhe_or(this, &is_yes, &is_no);

    service.fhe_and(this, &matches, &permitted)
}

/// Fold one question's result into the running aggregate.
pub fn fold(
    service: &ConfidentialClient,
    this: &Address,
    aggregate: &BytesN<32>,
    score: &BytesN<32>,
) -> BytesN<32> {
    service.fhe_and(this, aggregate, score)
}
