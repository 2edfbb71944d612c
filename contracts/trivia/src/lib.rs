#![no_std]

//! # Confidential Trivia
//!
//! A creator publishes a quiz with a secret answer key and a deadline. Players
//! submit secret answer vectors until the deadline. Once the deadline has
//! passed, the contract asks the secret store to score every submission
//! against the key in one batch, opens only the resulting scores and freezes a
//! ranked leaderboard.
//!
//! ## Game flow
//! 1. The creator commits the answer key to the secret store (controller =
//!    this contract) and calls `create_game` with the returned handle.
//! 2. Each player does the same with their answers and calls `submit_answers`.
//! 3. `finish_game` (strictly after the deadline) requests the scoring batch.
//!    If the store evaluates in the same call, the game is published at once.
//! 4. Otherwise the game waits in `Scoring`; `complete_scoring` publishes once
//!    the store reports the batch done, or returns the game to `InProgress`
//!    if the batch failed.
//!
//! ## Secrecy
//! Answers never reach this contract. It only receives `u64` handles, claims
//! each one exactly once, and checks their public metadata (owner,
//! controller, declared length). The only values that leave the store in
//! plaintext are the per-player scores of a finished batch.
//!
//! ## Ranking
//! Score descending. Equal scores keep submission order, so the earlier
//! submission ranks higher.

use soroban_sdk::{
    contract, contractclient, contracterror, contractevent, contractimpl, contracttype, log,
    Address, BytesN, Env, Map, Vec,
};

mod leaderboard;

pub use leaderboard::{build_leaderboard, rank_of};

// ═══════════════════════════════════════════════════════════════════════════════
//  Contract Events
// ═══════════════════════════════════════════════════════════════════════════════

#[contractevent]
pub struct EvGameCreated {
    pub game_id: u32,
    pub creator: Address,
    pub deadline: u64,
    pub question_count: u32,
}

#[contractevent]
pub struct EvAnswersSubmitted {
    pub game_id: u32,
    pub player: Address,
    pub entrants: u32,
}

#[contractevent]
pub struct EvScoringStarted {
    pub game_id: u32,
    pub batch_id: u64,
    pub entrants: u32,
}

/// Emitted when the store reports a failed batch and the game is reopened
/// for another `finish_game`.
#[contractevent]
pub struct EvScoringFailed {
    pub game_id: u32,
    pub batch_id: u64,
}

#[contractevent]
pub struct EvLeaderboardPublished {
    pub game_id: u32,
    pub entrants: u32,
    pub top_score: u32,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  External trait interfaces
// ═══════════════════════════════════════════════════════════════════════════════

/// Secret variable store.
///
/// Handles are opaque. Owners commit inputs directly to the store, naming
/// this contract as controller; only the controller may claim, compute over
/// or open them.
///
/// Scoring contract of `compute_batch`: `outputs[i]` receives the number of
/// positions `< width` where `entries[i]` equals `key`, ignoring blank (0)
/// answers. Outputs can be opened once `batch_status` is `Done`.
#[contractclient(name = "SecretStoreClient")]
pub trait SecretStore {
    fn variable(env: Env, handle: u64) -> SecretVar;

    fn claim(env: Env, controller: Address, handle: u64) -> SecretVar;

    fn compute_batch(
        env: Env,
        controller: Address,
        key: u64,
        entries: Vec<u64>,
        width: u32,
    ) -> ComputeTicket;

    fn batch_status(env: Env, batch_id: u64) -> BatchStatus;

    fn open(env: Env, controller: Address, handles: Vec<u64>) -> Vec<u32>;
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VarKind {
    Input,
    Output,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SecretVar {
    pub controller: Address,
    pub owner: Address,
    pub kind: VarKind,
    pub length: u32,
    pub batch: Option<u64>,
    pub claimed: bool,
    pub commitment: Option<BytesN<32>>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComputeTicket {
    pub batch_id: u64,
    pub outputs: Vec<u64>,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BatchStatus {
    Pending,
    Done,
    Failed,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Errors
// ═══════════════════════════════════════════════════════════════════════════════

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TriviaError {
    GameNotFound = 1,
    DuplicateId = 2,
    InvalidDeadline = 3,
    GameNotInProgress = 4,
    DuplicateSubmission = 5,
    DeadlineNotReached = 6,
    DeadlinePassed = 7,
    InvalidQuestionCount = 8,
    AnswerLengthMismatch = 9,
    NotCreator = 10,
    NotScoring = 11,
    ScoringPending = 12,
    MalformedScores = 13,
    AdminNotSet = 14,
    SecretStoreNotSet = 15,
    ScoringFailed = 16,
    GameFull = 17,
    InvalidHandle = 18,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Game state & storage keys
// ═══════════════════════════════════════════════════════════════════════════════

/// `InProgress → Scoring → Published`. `Published` is terminal.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameStatus {
    InProgress,
    Scoring,
    Published,
}

/// Who may call `finish_game`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FinishPolicy {
    CreatorOnly,
    Anyone,
}

/// Marker stored per player. Scores never live here.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerEntry {
    /// Index into `submissions` / `entrants`.
    pub slot: u32,
    pub submitted_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeaderboardPosition {
    pub game_id: u32,
    pub player: Address,
    pub score: u32,
}

/// A player's place on a published leaderboard. `rank` is 1-based.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RankedPosition {
    pub rank: u32,
    pub player: Address,
    pub score: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TriviaGame {
    pub game_id: u32,
    pub creator: Address,
    pub status: GameStatus,
    /// Store holding every handle of this game, fixed at creation.
    pub store: Address,
    /// Ledger timestamp; submissions accepted up to and including it.
    pub deadline: u64,
    pub question_count: u32,
    /// Store handle of the secret answer key.
    pub answer_key: u64,
    pub players: Map<Address, PlayerEntry>,
    /// Players in submission order, parallel to `submissions`.
    pub entrants: Vec<Address>,
    pub submissions: Vec<u64>,
    /// One score handle per submission; empty until scoring is requested.
    pub result_handles: Vec<u64>,
    /// Batch that produced (or is producing) `result_handles`.
    pub batch_id: Option<u64>,
    pub leaderboard: Vec<LeaderboardPosition>,
    pub created_at: u64,
    pub published_at: Option<u64>,
}

#[contracttype]
#[derive(Clone)]
enum StorageKey {
    Admin,
    SecretStoreAddress,
    FinishPolicy,
    /// Number of games ever created.
    GameCount,
    /// Creation index → game id.
    GameIdAt(u32),
    UsedId(u32),
    Game(u32),
    /// Present while the game waits on its scoring batch.
    Scoring(u32),
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Upper bound on `question_count`; matches the store's vector length limit.
pub const MAX_QUESTIONS: u32 = 100;

/// Submissions per game. Scoring touches two store entries per player in one
/// transaction, which must stay inside the ledger footprint limits.
pub const MAX_PLAYERS: u32 = 25;

/// Page size cap for the paged read model.
pub const MAX_PAGE_SIZE: u32 = 20;

// Ledger rate is approximately 5 seconds per ledger on Stellar
const LEDGER_RATE_SECS: u32 = 5;

// Games are never deleted; every write pushes the TTL out by 120 days
const TTL_SECONDS: u32 = 120 * 24 * 60 * 60; // 10,368,000 seconds

/// 120 * 24 * 60 * 60 / 5 = 2,073,600 ledgers
const GAME_TTL_LEDGERS: u32 = TTL_SECONDS / LEDGER_RATE_SECS;

// ═══════════════════════════════════════════════════════════════════════════════
//  Contract
// ═══════════════════════════════════════════════════════════════════════════════

#[contract]
pub struct TriviaContract;

#[contractimpl]
impl TriviaContract {
    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Constructor & Lifecycle
    // ───────────────────────────────────────────────────────────────────────────

    pub fn __constructor(env: Env, admin: Address, secret_store: Address) {
        env.storage()
            .instance()
            .set(&StorageKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&StorageKey::SecretStoreAddress, &secret_store);
        env.storage()
            .instance()
            .set(&StorageKey::FinishPolicy, &FinishPolicy::CreatorOnly);
    }

    /// Create a game around an answer key the creator already committed to
    /// the current secret store.
    ///
    /// The id check runs before anything else, so a used id is rejected
    /// regardless of the other arguments.
    pub fn create_game(
        env: Env,
        game_id: u32,
        creator: Address,
        question_count: u32,
        deadline: u64,
        answer_key: u64,
    ) -> Result<(), TriviaError> {
        if Self::is_id_used(&env, game_id) {
            return Err(TriviaError::DuplicateId);
        }

        let now = env.ledger().timestamp();
        if deadline <= now {
            return Err(TriviaError::InvalidDeadline);
        }
        if question_count == 0 || question_count > MAX_QUESTIONS {
            return Err(TriviaError::InvalidQuestionCount);
        }

        creator.require_auth();

        let store_addr = Self::load_secret_store(&env)?;
        let store = SecretStoreClient::new(&env, &store_addr);
        Self::bind_input(&env, &store, &creator, answer_key, question_count)?;

        let game = TriviaGame {
            game_id,
            creator: creator.clone(),
            status: GameStatus::InProgress,
            store: store_addr,
            deadline,
            question_count,
            answer_key,
            players: Map::new(&env),
            entrants: Vec::new(&env),
            submissions: Vec::new(&env),
            result_handles: Vec::new(&env),
            batch_id: None,
            leaderboard: Vec::new(&env),
            created_at: now,
            published_at: None,
        };

        Self::reserve_id(&env, game_id);
        Self::write_game(&env, &game);

        EvGameCreated {
            game_id,
            creator,
            deadline,
            question_count,
        }.publish(&env);

        Ok(())
    }

    /// Submit the handle of a committed answer vector. One submission per
    /// player, accepted up to and including the deadline.
    pub fn submit_answers(
        env: Env,
        game_id: u32,
        player: Address,
        answers: u64,
    ) -> Result<(), TriviaError> {
        let mut game = Self::read_game(&env, game_id)?;
        Self::require_in_progress(&game)?;

        let now = env.ledger().timestamp();
        if now > game.deadline {
            return Err(TriviaError::DeadlinePassed);
        }
        if game.players.contains_key(player.clone()) {
            return Err(TriviaError::DuplicateSubmission);
        }
        if game.submissions.len() >= MAX_PLAYERS {
            return Err(TriviaError::GameFull);
        }

        player.require_auth();

        let store = SecretStoreClient::new(&env, &game.store);
        Self::bind_input(&env, &store, &player, answers, game.question_count)?;

        let slot = game.submissions.len();
        game.submissions.push_back(answers);
        game.entrants.push_back(player.clone());
        game.players.set(
            player.clone(),
            PlayerEntry {
                slot,
                submitted_at: now,
            },
        );

        Self::write_game(&env, &game);

        EvAnswersSubmitted {
            game_id,
            player,
            entrants: game.submissions.len(),
        }.publish(&env);

        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Scoring
    // ───────────────────────────────────────────────────────────────────────────

    /// Request scoring for every submission, strictly after the deadline.
    ///
    /// Returns `Published` when the store evaluated the batch in this
    /// invocation, `Scoring` when the result arrives later through
    /// `complete_scoring`.
    pub fn finish_game(
        env: Env,
        game_id: u32,
        caller: Address,
    ) -> Result<GameStatus, TriviaError> {
        let mut game = Self::read_game(&env, game_id)?;
        Self::require_in_progress(&game)?;

        if env.ledger().timestamp() <= game.deadline {
            return Err(TriviaError::DeadlineNotReached);
        }

        caller.require_auth();
        if Self::load_finish_policy(&env) == FinishPolicy::CreatorOnly && caller != game.creator {
            return Err(TriviaError::NotCreator);
        }

        let store = SecretStoreClient::new(&env, &game.store);

        // One batch for the whole game: every submission is scored exactly once.
        let ticket = store.compute_batch(
            &env.current_contract_address(),
            &game.answer_key,
            &game.submissions,
            &game.question_count,
        );
        if ticket.outputs.len() != game.submissions.len() {
            return Err(TriviaError::MalformedScores);
        }

        game.status = GameStatus::Scoring;
        game.result_handles = ticket.outputs;
        game.batch_id = Some(ticket.batch_id);
        Self::set_scoring(&env, game_id);

        match store.batch_status(&ticket.batch_id) {
            BatchStatus::Done => Self::publish_results(&env, &store, &mut game)?,
            BatchStatus::Failed => return Err(TriviaError::ScoringFailed),
            BatchStatus::Pending => {
                log!(&env, "scoring deferred", game_id, ticket.batch_id);
            }
        }

        Self::write_game(&env, &game);

        EvScoringStarted {
            game_id,
            batch_id: ticket.batch_id,
            entrants: game.submissions.len(),
        }.publish(&env);
        if game.status == GameStatus::Published {
            Self::emit_published(&env, &game);
        }

        Ok(game.status)
    }

    /// Pick up the result of a deferred scoring batch.
    ///
    /// Permissionless: it only reads what the store already decided. A failed
    /// batch voids the finish attempt and reopens the game.
    pub fn complete_scoring(env: Env, game_id: u32) -> Result<GameStatus, TriviaError> {
        let mut game = Self::read_game(&env, game_id)?;
        if game.status != GameStatus::Scoring {
            return Err(TriviaError::NotScoring);
        }
        let batch_id = game.batch_id.ok_or(TriviaError::NotScoring)?;

        let store = SecretStoreClient::new(&env, &game.store);

        match store.batch_status(&batch_id) {
            BatchStatus::Pending => return Err(TriviaError::ScoringPending),
            BatchStatus::Done => {
                Self::publish_results(&env, &store, &mut game)?;
                Self::write_game(&env, &game);
                Self::emit_published(&env, &game);
            }
            BatchStatus::Failed => {
                game.status = GameStatus::InProgress;
                game.result_handles = Vec::new(&env);
                game.batch_id = None;
                Self::clear_scoring(&env, game_id);
                Self::write_game(&env, &game);

                log!(&env, "scoring batch failed", game_id, batch_id);
                EvScoringFailed { game_id, batch_id }.publish(&env);
            }
        }

        Ok(game.status)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Read
    // ───────────────────────────────────────────────────────────────────────────

    pub fn find_game(env: Env, game_id: u32) -> Option<TriviaGame> {
        env.storage()
            .persistent()
            .get(&StorageKey::Game(game_id))
    }

    pub fn get_game(env: Env, game_id: u32) -> Result<TriviaGame, TriviaError> {
        Self::read_game(&env, game_id)
    }

    pub fn has_game(env: Env, game_id: u32) -> bool {
        Self::is_id_used(&env, game_id)
    }

    /// Used ids in creation order, one page at a time.
    pub fn get_game_ids(env: Env, offset: u32, limit: u32) -> Vec<u32> {
        let mut ids = Vec::new(&env);
        for idx in Self::page(&env, offset, limit) {
            if let Some(id) = Self::game_id_at(&env, idx) {
                ids.push_back(id);
            }
        }
        ids
    }

    pub fn game_count(env: Env) -> u32 {
        Self::load_game_count(&env)
    }

    /// Registry snapshot page, in creation order. `limit` is capped at
    /// `MAX_PAGE_SIZE`.
    pub fn get_games(env: Env, offset: u32, limit: u32) -> Result<Vec<TriviaGame>, TriviaError> {
        let mut games = Vec::new(&env);
        for idx in Self::page(&env, offset, limit) {
            let game_id = Self::game_id_at(&env, idx).ok_or(TriviaError::GameNotFound)?;
            games.push_back(Self::read_game(&env, game_id)?);
        }
        Ok(games)
    }

    /// Empty until the game is published.
    pub fn get_leaderboard(
        env: Env,
        game_id: u32,
    ) -> Result<Vec<LeaderboardPosition>, TriviaError> {
        Ok(Self::read_game(&env, game_id)?.leaderboard)
    }

    pub fn get_player_position(
        env: Env,
        game_id: u32,
        player: Address,
    ) -> Result<Option<RankedPosition>, TriviaError> {
        let game = Self::read_game(&env, game_id)?;
        Ok(rank_of(&game.leaderboard, &player))
    }

    pub fn has_submitted(env: Env, game_id: u32, player: Address) -> Result<bool, TriviaError> {
        let game = Self::read_game(&env, game_id)?;
        Ok(game.players.contains_key(player))
    }

    /// Games whose scoring batch is still outstanding, among the creation
    /// indexes `offset..offset + limit`. After an interrupted deployment
    /// these are the ids to call `complete_scoring` on.
    pub fn get_scoring_games(env: Env, offset: u32, limit: u32) -> Vec<u32> {
        let mut ids = Vec::new(&env);
        for idx in Self::page(&env, offset, limit) {
            if let Some(id) = Self::game_id_at(&env, idx) {
                if env.storage().persistent().has(&StorageKey::Scoring(id)) {
                    ids.push_back(id);
                }
            }
        }
        ids
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Admin
    // ───────────────────────────────────────────────────────────────────────────

    pub fn get_admin(env: Env) -> Result<Address, TriviaError> {
        Self::load_admin(&env)
    }

    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), TriviaError> {
        let admin = Self::load_admin(&env)?;
        admin.require_auth();
        env.storage()
            .instance()
            .set(&StorageKey::Admin, &new_admin);
        Ok(())
    }

    pub fn get_secret_store(env: Env) -> Result<Address, TriviaError> {
        Self::load_secret_store(&env)
    }

    /// Store used by games created from now on. Existing games keep the store
    /// recorded at their creation.
    pub fn set_secret_store(env: Env, new_store: Address) -> Result<(), TriviaError> {
        let admin = Self::load_admin(&env)?;
        admin.require_auth();
        env.storage()
            .instance()
            .set(&StorageKey::SecretStoreAddress, &new_store);
        Ok(())
    }

    pub fn get_finish_policy(env: Env) -> FinishPolicy {
        Self::load_finish_policy(&env)
    }

    pub fn set_finish_policy(env: Env, policy: FinishPolicy) -> Result<(), TriviaError> {
        let admin = Self::load_admin(&env)?;
        admin.require_auth();
        env.storage()
            .instance()
            .set(&StorageKey::FinishPolicy, &policy);
        Ok(())
    }

    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) -> Result<(), TriviaError> {
        let admin = Self::load_admin(&env)?;
        admin.require_auth();
        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    //  Internal: Secret inputs & publication
    // ═══════════════════════════════════════════════════════════════════════════

    /// Check a committed input belongs to `owner`, is controlled by this
    /// contract and covers every question, then claim it so it cannot be
    /// used twice.
    fn bind_input(
        env: &Env,
        store: &SecretStoreClient,
        owner: &Address,
        handle: u64,
        question_count: u32,
    ) -> Result<(), TriviaError> {
        let this = env.current_contract_address();
        let var = store.variable(&handle);
        if var.kind != VarKind::Input
            || var.controller != this
            || var.owner != *owner
            || var.claimed
        {
            return Err(TriviaError::InvalidHandle);
        }
        if var.length < question_count {
            return Err(TriviaError::AnswerLengthMismatch);
        }

        store.claim(&this, &handle);
        Ok(())
    }

    fn publish_results(
        env: &Env,
        store: &SecretStoreClient,
        game: &mut TriviaGame,
    ) -> Result<(), TriviaError> {
        let scores = store.open(&env.current_contract_address(), &game.result_handles);
        if scores.len() != game.entrants.len() {
            return Err(TriviaError::MalformedScores);
        }

        game.leaderboard = build_leaderboard(env, game.game_id, &game.entrants, &scores);
        game.status = GameStatus::Published;
        game.published_at = Some(env.ledger().timestamp());
        Self::clear_scoring(env, game.game_id);
        Ok(())
    }

    fn emit_published(env: &Env, game: &TriviaGame) {
        let top_score = game.leaderboard.first().map(|p| p.score).unwrap_or(0);
        EvLeaderboardPublished {
            game_id: game.game_id,
            entrants: game.leaderboard.len(),
            top_score,
        }.publish(env);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    //  Internal: Phase guards
    // ═══════════════════════════════════════════════════════════════════════════

    fn require_in_progress(game: &TriviaGame) -> Result<(), TriviaError> {
        if game.status != GameStatus::InProgress {
            return Err(TriviaError::GameNotInProgress);
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    //  Internal: Registry & Storage
    // ═══════════════════════════════════════════════════════════════════════════

    fn is_id_used(env: &Env, game_id: u32) -> bool {
        env.storage()
            .persistent()
            .has(&StorageKey::UsedId(game_id))
    }

    /// Mark the id used and append it to the creation index.
    fn reserve_id(env: &Env, game_id: u32) {
        Self::write_flag(env, &StorageKey::UsedId(game_id), &true);

        let idx = Self::load_game_count(env);
        Self::write_flag(env, &StorageKey::GameIdAt(idx), &game_id);
        env.storage()
            .instance()
            .set(&StorageKey::GameCount, &(idx + 1));
    }

    fn load_game_count(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&StorageKey::GameCount)
            .unwrap_or(0)
    }

    fn game_id_at(env: &Env, idx: u32) -> Option<u32> {
        env.storage()
            .persistent()
            .get(&StorageKey::GameIdAt(idx))
    }

    /// Creation indexes of one page, `limit` capped at `MAX_PAGE_SIZE`.
    fn page(env: &Env, offset: u32, limit: u32) -> core::ops::Range<u32> {
        let limit = limit.min(MAX_PAGE_SIZE);
        let end = offset.saturating_add(limit).min(Self::load_game_count(env));
        offset..end.max(offset)
    }

    fn set_scoring(env: &Env, game_id: u32) {
        Self::write_flag(env, &StorageKey::Scoring(game_id), &true);
    }

    fn clear_scoring(env: &Env, game_id: u32) {
        env.storage()
            .persistent()
            .remove(&StorageKey::Scoring(game_id));
    }

    fn write_flag<V>(env: &Env, key: &StorageKey, value: &V)
    where
        V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
    {
        env.storage().persistent().set(key, value);
        env.storage()
            .persistent()
            .extend_ttl(key, GAME_TTL_LEDGERS, GAME_TTL_LEDGERS);
    }

    fn read_game(env: &Env, game_id: u32) -> Result<TriviaGame, TriviaError> {
        env.storage()
            .persistent()
            .get(&StorageKey::Game(game_id))
            .ok_or(TriviaError::GameNotFound)
    }

    fn write_game(env: &Env, game: &TriviaGame) {
        let key = StorageKey::Game(game.game_id);
        env.storage().persistent().set(&key, game);
        env.storage()
            .persistent()
            .extend_ttl(&key, GAME_TTL_LEDGERS, GAME_TTL_LEDGERS);
        // Keep instance storage (admin, store address, policy, count) alive
        env.storage()
            .instance()
            .extend_ttl(GAME_TTL_LEDGERS, GAME_TTL_LEDGERS);
    }

    fn load_admin(env: &Env) -> Result<Address, TriviaError> {
        env.storage()
            .instance()
            .get(&StorageKey::Admin)
            .ok_or(TriviaError::AdminNotSet)
    }

    fn load_secret_store(env: &Env) -> Result<Address, TriviaError> {
        env.storage()
            .instance()
            .get(&StorageKey::SecretStoreAddress)
            .ok_or(TriviaError::SecretStoreNotSet)
    }

    fn load_finish_policy(env: &Env) -> FinishPolicy {
        env.storage()
            .instance()
            .get(&StorageKey::FinishPolicy)
            .unwrap_or(FinishPolicy::CreatorOnly)
    }
}
