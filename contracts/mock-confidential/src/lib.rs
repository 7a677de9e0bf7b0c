#![no_std]

//! Stand-in for the confidential computation service. Plaintexts live in this
//! contract's storage keyed by handle, so "homomorphic" operators are plain
//! comparisons and decryption is a lookup plus a hash attestation.
//!
//! Every handle carries an access list. Operators and decryption requests
//! need access to their inputs; results are readable only by their caller.

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, Address, Bytes, BytesN, Env, Vec,
};

const INPUT_DOMAIN: &[u8] = b"mock-confidential/input/v1";
const DECRYPTION_DOMAIN: &[u8] = b"mock-confidential/decryption/v1";

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ServiceError {
    ValueOutOfRange = 1,
    UnknownHandle = 2,
    UnknownRequest = 3,
    NotAllowed = 4,
}

/// Handles plus the proof binding them to (contract, submitter).
#[contracttype]
#[derive(Clone, Debug)]
pub struct EncryptedInput {
    pub handles: Vec<BytesN<32>>,
    pub proof: Bytes,
}

/// What the oracle relays to the requesting contract's callback.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Decryption {
    pub request_id: u64,
    pub cleartexts: Bytes,
    pub proof: Bytes,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct InputBinding {
    pub contract: Address,
    pub submitter: Address,
    pub handles: Vec<BytesN<32>>,
    pub consumed: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PendingDecryption {
    pub requester: Address,
    pub handle: BytesN<32>,
}

#[contracttype]
pub enum DataKey {
    NextHandle,
    NextProof,
    NextRequest,
    Plaintext(BytesN<32>),
    Acl(BytesN<32>, Address),
    Input(Bytes),
    Request(u64),
}

#[contract]
pub struct MockConfidential;

#[contractimpl]
impl MockConfidential {
    /// Client-side encoder: encrypt a batch of 8-bit values for `submitter`
    /// calling `contract`.
    pub fn encrypt_input(
        env: Env,
        contract: Address,
        submitter: Address,
        values: Vec<u32>,
    ) -> Result<EncryptedInput, ServiceError> {
        let mut handles = Vec::new(&env);
        for value in values.iter() {
            if value > u8::MAX as u32 {
                return Err(ServiceError::ValueOutOfRange);
            }
            handles.push_back(fresh_handle(&env, value));
        }

        let nonce = next_counter(&env, &DataKey::NextProof);
        let mut seed = Bytes::from_slice(&env, INPUT_DOMAIN);
        seed.append(&Bytes::from_array(&env, &nonce.to_be_bytes()));
        let digest: BytesN<32> = env.crypto().sha256(&seed).into();
        let proof = Bytes::from_array(&env, &digest.to_array());

        env.storage().persistent().set(
            &DataKey::Input(proof.clone()),
            &InputBinding {
                contract,
                submitter: submitter.clone(),
                handles: handles.clone(),
                consumed: false,
            },
        );

        log!(
            &env,
            "mock encrypt_input: submitter={}, count={}",
            submitter,
            handles.len()
        );

        Ok(EncryptedInput { handles, proof })
    }

    /// Consume `proof` if it was issued for exactly these handles, this
    /// contract and this submitter. The calling contract gains access to the
    /// handles.
    pub fn verify_input(
        env: Env,
        contract: Address,
        submitter: Address,
        handles: Vec<BytesN<32>>,
        proof: Bytes,
    ) -> bool {
        contract.require_auth();

        let key = DataKey::Input(proof);
        let Some(mut binding) = env.storage().persistent().get::<_, InputBinding>(&key) else {
            return false;
        };
        if binding.consumed
            || binding.contract != contract
            || binding.submitter != submitter
            || binding.handles != handles
        {
            log!(&env, "mock verify_input rejected: submitter={}", submitter);
            return false;
        }

        binding.consumed = true;
        env.storage().persistent().set(&key, &binding);
        for handle in handles.iter() {
            grant(&env, &handle, &contract);
        }
        true
    }

    /// Trivial encryption of a public boolean, readable by `caller`.
    pub fn as_ebool(env: Env, caller: Address, value: bool) -> BytesN<32> {
        caller.require_auth();
        owned_handle(&env, &caller, value as u32)
    }

    pub fn as_euint8(env: Env, caller: Address, value: u32) -> Result<BytesN<32>, ServiceError> {
        caller.require_auth();
        if value > u8::MAX as u32 {
            return Err(ServiceError::ValueOutOfRange);
        }
        Ok(owned_handle(&env, &caller, value))
    }

    pub fn fhe_eq(
        env: Env,
        caller: Address,
        lhs: BytesN<32>,
        rhs: BytesN<32>,
    ) -> Result<BytesN<32>, ServiceError> {
        let (a, b) = operands(&env, &caller, &lhs, &rhs)?;
        Ok(owned_handle(&env, &caller, (a == b) as u32))
    }

    pub fn fhe_and(
        env: Env,
        caller: Address,
        lhs: BytesN<32>,
        rhs: BytesN<32>,
    ) -> Result<BytesN<32>, ServiceError> {
        let (a, b) = operands(&env, &caller, &lhs, &rhs)?;
        Ok(owned_handle(&env, &caller, (a != 0 && b != 0) as u32))
    }

    pub fn fhe_or(
        env: Env,
        caller: Address,
        lhs: BytesN<32>,
        rhs: BytesN<32>,
    ) -> Result<BytesN<32>, ServiceError> {
        let (a, b) = operands(&env, &caller, &lhs, &rhs)?;
        Ok(owned_handle(&env, &caller, (a != 0 || b != 0) as u32))
    }

    /// `owner` shares its access to `handle` with `account`.
    pub fn allow(
        env: Env,
        owner: Address,
        handle: BytesN<32>,
        account: Address,
    ) -> Result<(), ServiceError> {
        owner.require_auth();
        require_access(&env, &handle, &owner)?;
        grant(&env, &handle, &account);
        Ok(())
    }

    pub fn is_allowed(env: Env, handle: BytesN<32>, account: Address) -> bool {
        has_access(&env, &handle, &account)
    }

    pub fn request_decryption(
        env: Env,
        requester: Address,
        handle: BytesN<32>,
    ) -> Result<u64, ServiceError> {
        requester.require_auth();
        require_access(&env, &handle, &requester)?;
        plaintext(&env, &handle)?;

        let request_id = next_counter(&env, &DataKey::NextRequest);
        env.storage().persistent().set(
            &DataKey::Request(request_id),
            &PendingDecryption {
                requester: requester.clone(),
                handle,
            },
        );

        log!(
            &env,
            "mock request_decryption: id={}, requester={}",
            request_id,
            requester
        );
        Ok(request_id)
    }

    /// Oracle side: produce the cleartext word and its attestation.
    pub fn reveal(env: Env, request_id: u64) -> Result<Decryption, ServiceError> {
        let pending: PendingDecryption = env
            .storage()
            .persistent()
            .get(&DataKey::Request(request_id))
            .ok_or(ServiceError::UnknownRequest)?;
        let cleartexts = encode_word(&env, plaintext(&env, &pending.handle)?);
        let proof = attest(&env, request_id, &cleartexts);
        Ok(Decryption {
            request_id,
            cleartexts,
            proof,
        })
    }

    pub fn verify_decryption(env: Env, request_id: u64, cleartexts: Bytes, proof: Bytes) -> bool {
        let Some(pending) = env
            .storage()
            .persistent()
            .get::<_, PendingDecryption>(&DataKey::Request(request_id))
        else {
            return false;
        };
        let Ok(value) = plaintext(&env, &pending.handle) else {
            return false;
        };
        cleartexts == encode_word(&env, value) && proof == attest(&env, request_id, &cleartexts)
    }
}

fn next_counter(env: &Env, key: &DataKey) -> u64 {
    let n: u64 = env.storage().instance().get(key).unwrap_or(1);
    env.storage().instance().set(key, &(n + 1));
    n
}

fn fresh_handle(env: &Env, value: u32) -> BytesN<32> {
    let n = next_counter(env, &DataKey::NextHandle);
    let mut raw = [0u8; 32];
    raw[24..32].copy_from_slice(&n.to_be_bytes());
    let handle = BytesN::from_array(env, &raw);
    env.storage()
        .persistent()
        .set(&DataKey::Plaintext(handle.clone()), &value);
    handle
}

fn owned_handle(env: &Env, owner: &Address, value: u32) -> BytesN<32> {
    let handle = fresh_handle(env, value);
    grant(env, &handle, owner);
    handle
}

/// Plaintexts of both operands, provided `caller` may compute on them.
fn operands(
    env: &Env,
    caller: &Address,
    lhs: &BytesN<32>,
    rhs: &BytesN<32>,
) -> Result<(u32, u32), ServiceError> {
    caller.require_auth();
    require_access(env, lhs, caller)?;
    require_access(env, rhs, caller)?;
    Ok((plaintext(env, lhs)?, plaintext(env, rhs)?))
}

fn plaintext(env: &Env, handle: &BytesN<32>) -> Result<u32, ServiceError> {
    env.storage()
        .persistent()
        .get(&DataKey::Plaintext(handle.clone()))
        .ok_or(ServiceError::UnknownHandle)
}

fn has_access(env: &Env, handle: &BytesN<32>, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Acl(handle.clone(), account.clone()))
        .unwrap_or(false)
}

fn require_access(env: &Env, handle: &BytesN<32>, account: &Address) -> Result<(), ServiceError> {
    if !has_access(env, handle, account) {
        return Err(ServiceError::NotAllowed);
    }
    Ok(())
}

fn grant(env: &Env, handle: &BytesN<32>, account: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Acl(handle.clone(), account.clone()), &true);
}

/// One ABI word: value big-endian in the low bytes.
fn encode_word(env: &Env, value: u32) -> Bytes {
    let mut word = [0u8; 32];
    word[28..32].copy_from_slice(&value.to_be_bytes());
    Bytes::from_array(env, &word)
}

fn attest(env: &Env, request_id: u64, cleartexts: &Bytes) -> Bytes {
    let mut data = Bytes::from_slice(env, DECRYPTION_DOMAIN);
    data.append(&Bytes::from_array(env, &request_id.to_be_bytes()));
    data.append(cleartexts);
    let digest: BytesN<32> = env.crypto().sha256(&data).into();
    Bytes::from_array(env, &digest.to_array())
}
