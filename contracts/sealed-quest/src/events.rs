use soroban_sdk::{contractevent, Address, Env};

#[contractevent]
pub struct AnswersInitialized {
    pub admin: Address,
}

#[contractevent]
pub struct ChoiceSubmitted {
    pub player: Address,
    pub index: u32,
}

#[contractevent]
pub struct DecryptionRequested {
    pub player: Address,
    pub request_id: u64,
}

#[contractevent]
pub struct RoundResolved {
    pub player: Address,
    pub request_id: u64,
    pub won: bool,
}

#[contractevent]
pub struct RewardMinted {
    pub player: Address,
    pub token_id: u64,
}

#[contractevent]
pub struct GameReset {
    pub player: Address,
}

#[contractevent]
pub struct RoundCancelled {
    pub player: Address,
    pub request_id: u64,
}

#[contractevent]
pub struct QuestionUpdated {
    pub index: u32,
}

#[contractevent]
pub struct OwnershipTransferred {
    pub previous_admin: Address,
    pub new_admin: Address,
}

pub fn emit_answers_initialized(env: &Env, admin: &Address) {
    AnswersInitialized {
        admin: admin.clone(),
    }
    .publish(env);
}

pub fn emit_choice_submitted(env: &Env, player: &Address, index: u32) {
    ChoiceSubmitted {
        player: player.clone(),
        index,
    }
    .publish(env);
}

pub fn emit_decryption_requested(env: &Env, player: &Address, request_id: u64) {
    DecryptionRequested {
        player: player.clone(),
        request_id,
    }
    .publish(env);
}

pub fn emit_round_resolved(env: &Env, player: &Address, request_id: u64, won: bool) {
    RoundResolved {
        player: player.clone(),
        request_id,
        won,
    }
    .publish(env);
}

pub fn emit_reward_minted(env: &Env, player: &Address, token_id: u64) {
    RewardMinted {
        player: player.clone(),
        token_id,
    }
    .publish(env);
}

pub fn emit_game_reset(env: &Env, player: &Address) {
    GameReset {
        player: player.clone(),
    }
    .publish(env);
}

pub fn emit_round_cancelled(env: &Env, player: &Address, request_id: u64) {
    RoundCancelled {
        player: player.clone(),
        request_id,
    }
    .publish(env);
}

pub fn emit_question_updated(env: &Env, index: u32) {
    QuestionUpdated { index }.publish(env);
}

pub fn emit_ownership_transferred(env: &Env, previous_admin: &Address, new_admin: &Address) {
    OwnershipTransferred {
        previous_admin: previous_admin.clone(),
        new_admin: new_admin.clone(),
    }
    .publish(env);
}
