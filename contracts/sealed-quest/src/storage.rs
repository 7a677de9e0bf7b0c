use soroban_sdk::{contracttype, Address, BytesN, Env, String, Vec};

use crate::types::{DecryptionRequest, PlayerProgress};

const PERSISTENT_TTL_LEDGERS: u32 = 535_680; // ~30 days at 5s/ledger
pub(crate) const INSTANCE_TTL_THRESHOLD: u32 = 120_960; // ~7 days
const INSTANCE_TTL_LEDGERS: u32 = 535_680;

#[contracttype]
pub enum DataKey {
    Admin,
    ServiceAddress,
    Answers,
    Questions,
    NextTokenId,
    Player(Address),
    Request(u64),
    TokenOwner(u64),
    Balance(Address),
}

// --- Admin ---

pub fn get_admin(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Admin).unwrap()
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

// --- Confidential computation service ---

pub fn get_service(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::ServiceAddress)
        .unwrap()
}

pub fn set_service(env: &Env, service: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::ServiceAddress, service);
}

// --- Answer set (write-once) ---

// The answers live in instance storage, so every touch keeps the instance alive.

pub fn get_answers(env: &Env) -> Option<Vec<BytesN<32>>> {
    let answers = env.storage().instance().get(&DataKey::Answers);
    if answers.is_some() {
        bump_instance(env);
    }
    answers
}

pub fn set_answers(env: &Env, answers: &Vec<BytesN<32>>) {
    env.storage().instance().set(&DataKey::Answers, answers);
    bump_instance(env);
}

pub fn has_answers(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Answers)
}

// --- Questions ---

pub fn get_questions(env: &Env) -> Vec<String> {
    env.storage()
        .instance()
        .get(&DataKey::Questions)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_questions(env: &Env, questions: &Vec<String>) {
    env.storage().instance().set(&DataKey::Questions, questions);
}

// --- Player rounds ---

pub fn get_progress(env: &Env, player: &Address) -> Option<PlayerProgress> {
    env.storage()
        .persistent()
        .get(&DataKey::Player(player.clone()))
}

pub fn set_progress(env: &Env, player: &Address, progress: &PlayerProgress) {
    persist(env, &DataKey::Player(player.clone()), progress);
}

// --- Decryption requests ---

pub fn get_request(env: &Env, request_id: u64) -> Option<DecryptionRequest> {
    env.storage()
        .persistent()
        .get(&DataKey::Request(request_id))
}

pub fn set_request(env: &Env, request_id: u64, request: &DecryptionRequest) {
    persist(env, &DataKey::Request(request_id), request);
}

pub fn has_request(env: &Env, request_id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Request(request_id))
}

// --- Reward ledger ---

pub fn get_next_token_id(env: &Env, first: u64) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::NextTokenId)
        .unwrap_or(first)
}

pub fn set_next_token_id(env: &Env, token_id: u64) {
    env.storage().instance().set(&DataKey::NextTokenId, &token_id);
}

pub fn get_token_owner(env: &Env, token_id: u64) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::TokenOwner(token_id))
}

pub fn set_token_owner(env: &Env, token_id: u64, owner: &Address) {
    persist(env, &DataKey::TokenOwner(token_id), owner);
}

pub fn get_balance(env: &Env, owner: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(owner.clone()))
        .unwrap_or(0)
}

pub fn set_balance(env: &Env, owner: &Address, balance: u64) {
    persist(env, &DataKey::Balance(owner.clone()), &balance);
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_LEDGERS);
}

fn persist<V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(env: &Env, key: &DataKey, val: &V) {
    env.storage().persistent().set(key, val);
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_LEDGERS, PERSISTENT_TTL_LEDGERS);
}
