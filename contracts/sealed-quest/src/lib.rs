#![no_std]

mod accumulator;
mod events;
mod rewards;
mod storage;
pub mod types;
mod verifier;


use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, log, vec, Address, Bytes, BytesN, Env,
    String, Vec,
};

use types::{DecryptionRequest, GameStats, PlayerProgress, PlayerStatus, RequestStatus};

pub const TOTAL_QUESTIONS: u32 = 4;
pub const YES_CHOICE: u32 = 1;
pub const NO_CHOICE: u32 = 2;

const REWARD_NAME: &str = "Sealed Quest Badge";
const REWARD_SYMBOL: &str = "SQB";

const DEFAULT_QUESTIONS: [&str; TOTAL_QUESTIONS as usize] = [
    "Gatekeeper: Will you share your last ration with a stranger?",
    "Cartographer: Is the river path safer than the mountain pass?",
    "Moneylender: Should a debt be forgiven when the harvest fails?",
    "Lighthouse keeper: Would you keep the lamp lit through a storm?",
];

/// Confidential computation service. The `#[contractclient]` macro generates
/// `ConfidentialClient` for cross-contract calls into it.
#[contractclient(name = "ConfidentialClient")]
pub trait Confidential {
    fn verify_input(
        env: Env,
        contract: Address,
        submitter: Address,
        handles: Vec<BytesN<32>>,
        proof: Bytes,
    ) -> bool;

    // Results of the operators below are readable only by `caller`, which
    // must itself have access to every input handle.

    fn as_ebool(env: Env, caller: Address, value: bool) -> BytesN<32>;

    fn as_euint8(env: Env, caller: Address, value: u32) -> BytesN<32>;

    fn fhe_eq(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32>;

    fn fhe_and(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32>;

    fn fhe_or(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32>;

    fn allow(env: Env, owner: Address, handle: BytesN<32>, account: Address);

    fn request_decryption(env: Env, requester: Address, handle: BytesN<32>) -> u64;

    fn verify_decryption(env: Env, request_id: u64, cleartexts: Bytes, proof: Bytes) -> bool;
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 1,
    AlreadyInitialized = 2,
    NotInitialized = 3,
    GameAlreadyCompleted = 4,
    GameNotCompleted = 5,
    InvalidProof = 6,
    InvalidDecryptionProof = 7,
    UnknownRequest = 8,
    AlreadyResolved = 9,
    UnknownToken = 10,
    InvalidChoice = 11,
    InvalidQuestionIndex = 12,
    ChoiceNotSubmitted = 13,
    MalformedCleartext = 14,
    DuplicateRequest = 15,
    RequestCancelled = 16,
    NotAwaitingDecryption = 17,
}

#[contract]
pub struct SealedQuestContract;

fn service_client(env: &Env) -> ConfidentialClient<'_> {
    ConfidentialClient::new(env, &storage::get_service(env))
}

fn require_admin(env: &Env, admin: &Address) -> Result<(), Error> {
    if *admin != storage::get_admin(env) {
        return Err(Error::Unauthorized);
    }
    admin.require_auth();
    Ok(())
}

#[contractimpl]
impl SealedQuestContract {
    /// Deploy: store admin, confidential service address and the default
    /// question prompts.
    pub fn __constructor(env: Env, admin: Address, service: Address) {
        storage::set_admin(&env, &admin);
        storage::set_service(&env, &service);

        let mut questions = Vec::new(&env);
        for text in DEFAULT_QUESTIONS {
            questions.push_back(String::from_str(&env, text));
        }
        storage::set_questions(&env, &questions);
    }

    // ----- Answer registry -----

    /// Admin: store the four encrypted reference answers. Write-once.
    pub fn initialize_answers(
        env: Env,
        admin: Address,
        a1: BytesN<32>,
        a2: BytesN<32>,
        a3: BytesN<32>,
        a4: BytesN<32>,
        proof: Bytes,
    ) -> Result<(), Error> {
        require_admin(&env, &admin)?;
        if storage::has_answers(&env) {
            return Err(Error::AlreadyInitialized);
        }

        let answers = vec![&env, a1, a2, a3, a4];
        let service = service_client(&env);
        if !service.verify_input(&env.current_contract_address(), &admin, &answers, &proof) {
            return Err(Error::InvalidProof);
        }

        storage::set_answers(&env, &answers);
        events::emit_answers_initialized(&env, &admin);
        log!(&env, "answers initialized by {}", admin);

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::has_answers(&env)
    }

    // ----- Progress tracker + correctness accumulator -----

    /// Submit the encrypted choice for the next unanswered question. The
    /// fourth accepted choice closes the round and issues the decryption
    /// request for its aggregate in the same invocation.
    ///
    /// Returns the number of questions answered so far.
    pub fn submit_choice(
        env: Env,
        player: Address,
        choice: BytesN<32>,
        proof: Bytes,
    ) -> Result<u32, Error> {
        let answers = storage::get_answers(&env).ok_or(Error::NotInitialized)?;
        let mut progress =
            storage::get_progress(&env, &player).unwrap_or_else(|| PlayerProgress::new(&env));
        if progress.completed {
            return Err(Error::GameAlreadyCompleted);
        }

        player.require_auth();

        let service = service_client(&env);
        let this = env.current_contract_address();
        let handles = vec![&env, choice.clone()];
        if !service.verify_input(&this, &player, &handles, &proof) {
            return Err(Error::InvalidProof);
        }

        let index = progress.answered;
        if index == 0 {
            progress.all_correct = accumulator::seed(&service, &this);
        }
        let answer = answers.get_unchecked(index);
        let score = accumulator::score_choice(&service, &this, &choice, &answer);
        progress.all_correct = accumulator::fold(&service, &this, &progress.all_correct, &score);
        progress.choices.push_back(choice);
        progress.answered = index + 1;
        events::emit_choice_submitted(&env, &player, index);

        if progress.answered == TOTAL_QUESTIONS {
            progress.completed = true;
            let request_id =
                Self::issue_decryption(&env, &service, &player, &progress.all_correct)?;
            progress.pending_request = Some(request_id);
        }

        storage::set_progress(&env, &player, &progress);

        Ok(progress.answered)
    }

    // ----- Decryption coordinator -----

    /// Oracle entry point. Applies the revealed aggregate of `request_id`
    /// exactly once and mints the reward on a win.
    pub fn decryption_callback(
        env: Env,
        request_id: u64,
        cleartexts: Bytes,
        proof: Bytes,
    ) -> Result<bool, Error> {
        let mut request = storage::get_request(&env, request_id).ok_or(Error::UnknownRequest)?;
        match request.status {
            RequestStatus::Pending => {}
            RequestStatus::Resolved => return Err(Error::AlreadyResolved),
            RequestStatus::Cancelled => return Err(Error::RequestCancelled),
        }

        let mut progress = storage::get_progress(&env, &request.player)
            .filter(|p| p.is_awaiting_decryption() && p.pending_request == Some(request_id))
            .ok_or(Error::NotAwaitingDecryption)?;

        // Authenticate before reading anything out of the cleartexts
        let service = service_client(&env);
        if !verifier::authenticate(&service, request_id, &cleartexts, &proof) {
            return Err(Error::InvalidDecryptionProof);
        }
        let won = verifier::decode_bool(&cleartexts)?;

        request.status = RequestStatus::Resolved;
        request.won = won;
        storage::set_request(&env, request_id, &request);

        progress.resolved_won = Some(won);
        storage::set_progress(&env, &request.player, &progress);

        events::emit_round_resolved(&env, &request.player, request_id, won);
        log!(&env, "request {} resolved: won={}", request_id, won);

        if won {
            let token_id = rewards::mint(&env, &request.player);
            log!(&env, "reward {} minted to {}", token_id, request.player);
        }

        Ok(won)
    }

    /// Start a fresh round once the previous one has resolved. Minted
    /// rewards are untouched.
    pub fn reset_game(env: Env, player: Address) -> Result<(), Error> {
        let progress = storage::get_progress(&env, &player).ok_or(Error::GameNotCompleted)?;
        if !progress.is_resolved() {
            return Err(Error::GameNotCompleted);
        }

        player.require_auth();

        storage::set_progress(&env, &player, &PlayerProgress::new(&env));
        events::emit_game_reset(&env, &player);

        Ok(())
    }

    /// Admin: abandon a round whose decryption never came back. The request
    /// is marked cancelled so a late callback cannot apply it.
    pub fn force_reset(env: Env, admin: Address, player: Address) -> Result<(), Error> {
        require_admin(&env, &admin)?;

        let progress = storage::get_progress(&env, &player)
            .filter(|p| p.is_awaiting_decryption())
            .ok_or(Error::NotAwaitingDecryption)?;
        let request_id = progress
            .pending_request
            .ok_or(Error::NotAwaitingDecryption)?;
        let mut request = storage::get_request(&env, request_id).ok_or(Error::UnknownRequest)?;

        request.status = RequestStatus::Cancelled;
        storage::set_request(&env, request_id, &request);
        storage::set_progress(&env, &player, &PlayerProgress::new(&env));
        events::emit_round_cancelled(&env, &player, request_id);
        log!(&env, "request {} cancelled by admin", request_id);

        Ok(())
    }

    pub fn get_request(env: Env, request_id: u64) -> Option<DecryptionRequest> {
        storage::get_request(&env, request_id)
    }

    // ----- Player queries -----

    pub fn get_progress(env: Env, player: Address) -> Option<PlayerProgress> {
        storage::get_progress(&env, &player)
    }

    pub fn get_status(env: Env, player: Address) -> PlayerStatus {
        match storage::get_progress(&env, &player) {
            Some(p) => PlayerStatus {
                submitted: p.completed,
                pending: p.is_awaiting_decryption(),
                won: p.resolved_won == Some(true),
            },
            None => PlayerStatus {
                submitted: false,
                pending: false,
                won: false,
            },
        }
    }

    pub fn get_game_stats(env: Env, player: Address) -> GameStats {
        let progress = storage::get_progress(&env, &player);
        GameStats {
            progress: progress.as_ref().map_or(0, |p| p.answered),
            completed: progress.as_ref().is_some_and(|p| p.completed),
            won: progress.as_ref().is_some_and(|p| p.resolved_won == Some(true)),
            balance: rewards::balance_of(&env, &player),
        }
    }

    /// Encrypted aggregate of the player's closed round.
    pub fn get_last_all_correct(env: Env, player: Address) -> Option<BytesN<32>> {
        storage::get_progress(&env, &player)
            .filter(|p| p.completed)
            .map(|p| p.all_correct)
    }

    /// Let the player decrypt their own choice for question `index`.
    pub fn allow_player_choice(env: Env, player: Address, index: u32) -> Result<(), Error> {
        if index >= TOTAL_QUESTIONS {
            return Err(Error::InvalidQuestionIndex);
        }
        let choice = storage::get_progress(&env, &player)
            .and_then(|p| p.choices.get(index))
            .ok_or(Error::ChoiceNotSubmitted)?;

        player.require_auth();

        service_client(&env).allow(&env.current_contract_address(), &choice, &player);
        Ok(())
    }

    // ----- Questions -----

    pub fn get_all_questions(env: Env) -> Vec<String> {
        storage::get_questions(&env)
    }

    /// Index and prompt of the question the player answers next.
    pub fn get_current_question(env: Env, player: Address) -> Result<(u32, String), Error> {
        let answered = storage::get_progress(&env, &player).map_or(0, |p| p.answered);
        if answered >= TOTAL_QUESTIONS {
            return Err(Error::GameAlreadyCompleted);
        }
        let text = storage::get_questions(&env)
            .get(answered)
            .ok_or(Error::InvalidQuestionIndex)?;
        Ok((answered, text))
    }

    /// Admin: replace the prompt for question `index`.
    pub fn update_question(
        env: Env,
        admin: Address,
        index: u32,
        text: String,
    ) -> Result<(), Error> {
        require_admin(&env, &admin)?;
        if index >= TOTAL_QUESTIONS {
            return Err(Error::InvalidQuestionIndex);
        }

        let mut questions = storage::get_questions(&env);
        questions.set(index, text);
        storage::set_questions(&env, &questions);
        events::emit_question_updated(&env, index);

        Ok(())
    }

    // ----- Administration -----

    pub fn get_admin(env: Env) -> Address {
        storage::get_admin(&env)
    }

    pub fn transfer_ownership(env: Env, admin: Address, new_admin: Address) -> Result<(), Error> {
        require_admin(&env, &admin)?;
        storage::set_admin(&env, &new_admin);
        events::emit_ownership_transferred(&env, &admin, &new_admin);
        Ok(())
    }

    // ----- Reward ledger -----

    pub fn name(env: Env) -> String {
        String::from_str(&env, REWARD_NAME)
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, REWARD_SYMBOL)
    }

    pub fn balance_of(env: Env, owner: Address) -> u64 {
        rewards::balance_of(&env, &owner)
    }

    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, Error> {
        rewards::owner_of(&env, token_id)
    }

    pub fn next_token_id(env: Env) -> u64 {
        rewards::next_token_id(&env)
    }
}

impl SealedQuestContract {
    fn issue_decryption(
        env: &Env,
        service: &ConfidentialClient,
        player: &Address,
        flag: &BytesN<32>,
    ) -> Result<u64, Error> {
        let request_id = service.request_decryption(&env.current_contract_address(), flag);
        if storage::has_request(env, request_id) {
            return Err(Error::DuplicateRequest);
        }

        storage::set_request(
            env,
            request_id,
            &DecryptionRequest {
                player: player.clone(),
                flag: flag.clone(),
                status: RequestStatus::Pending,
                won: false,
            },
        );
        events::emit_decryption_requested(env, player, request_id);
        log!(env, "decryption request {} issued for {}", request_id, player);

        Ok(request_id)
    }
}
