use soroban_sdk::{contracttype, Address, BytesN, Env, Vec};

use crate::{Error, NO_CHOICE, YES_CHOICE};

/// Plaintext values a player may encrypt as a choice.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Choice {
    Yes,
    No,
}

impl Choice {
    pub fn from_u32(value: u32) -> Result<Self, Error> {
        match value {
            YES_CHOICE => Ok(Choice::Yes),
            NO_CHOICE => Ok(Choice::No),
            _ => Err(Error::InvalidChoice),
        }
    }

    pub fn to_u32(self) -> u32 {
        match self {
            Choice::Yes => YES_CHOICE,
            Choice::No => NO_CHOICE,
        }
    }
}

/// One player's current round, stored in persistent storage.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PlayerProgress {
    pub answered: u32,
    pub choices: Vec<BytesN<32>>,
    pub all_correct: BytesN<32>, // running encrypted AND; zero until the first choice
    pub completed: bool,
    pub pending_request: Option<u64>,
    pub resolved_won: Option<bool>,
}

impl PlayerProgress {
    pub fn new(env: &Env) -> Self {
        PlayerProgress {
            answered: 0,
            choices: Vec::new(env),
            all_correct: BytesN::from_array(env, &[0u8; 32]),
            completed: false,
            pending_request: None,
            resolved_won: None,
        }
    }

    pub fn is_awaiting_decryption(&self) -> bool {
        self.completed && self.pending_request.is_some() && self.resolved_won.is_none()
    }

    pub fn is_resolved(&self) -> bool {
        self.completed && self.resolved_won.is_some()
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RequestStatus {
    Pending,
    Resolved,
    Cancelled,
}

/// Decryption of a round's aggregate flag. Kept after resolution so past
/// requests stay auditable.
#[contracttype]
#[derive(Clone, Debug)]
pub struct DecryptionRequest {
    pub player: Address,
    pub flag: BytesN<32>,
    pub status: RequestStatus,
    pub won: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerStatus {
    pub submitted: bool,
    pub pending: bool,
    pub won: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameStats {
    pub progress: u32,
    pub completed: bool,
    pub won: bool,
    pub balance: u64,
}
