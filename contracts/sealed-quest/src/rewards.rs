use soroban_sdk::{Address, Env};

use crate::{events, storage, Error};

pub const FIRST_TOKEN_ID: u64 = 1;

/// Mint the next reward token to `player`. Called only when a decryption
/// request resolves to a win, and a request resolves at most once.
pub fn mint(env: &Env, player: &Address) -> u64 {
    let token_id = next_token_id(env);
    storage::set_token_owner(env, token_id, player);
    storage::set_balance(env, player, storage::get_balance(env, player) + 1);
    storage::set_next_token_id(env, token_id + 1);
    events::emit_reward_minted(env, player, token_id);
    token_id
}

pub fn next_token_id(env: &Env) -> u64 {
    storage::get_next_token_id(env, FIRST_TOKEN_ID)
}

pub fn balance_of(env: &Env, owner: &Address) -> u64 {
    storage::get_balance(env, owner)
}

pub fn owner_of(env: &Env, token_id: u64) -> Result<Address, Error> {
    storage::get_token_owner(env, token_id).ok_or(Error::UnknownToken)
}
