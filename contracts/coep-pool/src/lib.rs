#![no_std]

use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol, Vec};

mod admin;
mod constants;
mod contribution;
mod errors;
mod interfaces;
mod pool;
mod rotation;
mod social;
mod storage;
mod types;

pub use errors::ContractError;
pub use interfaces::{
    CrowdfundingClient, CrowdfundingInterface, EscrowClient, EscrowInterface, VerificationClient,
    VerificationInterface,
};
pub use types::*;

/// Co-EP (Collaborative Executive Producer) rotating funding pools.
#[contract]
pub struct CoEpPoolContract;

#[contractimpl]
impl CoEpPoolContract {
    // ─── Governance ─────────────────────────────────────────────────

    /// Set the module admin. Callable once.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        admin::initialize(&env, admin)
    }

    /// Hand the admin role to `new_admin`. Current admin only.
    pub fn set_admin(env: Env, admin: Address, new_admin: Address) -> Result<(), ContractError> {
        admin::set_admin(&env, admin, new_admin)
    }

    /// Halt every fund-moving entry point.
    pub fn pause_system(env: Env, admin: Address) -> Result<(), ContractError> {
        admin::set_paused(&env, admin, true)
    }

    pub fn unpause_system(env: Env, admin: Address) -> Result<(), ContractError> {
        admin::set_paused(&env, admin, false)
    }

    /// Wire the collaborator contracts the pool calls into.
    pub fn set_modules(
        env: Env,
        admin: Address,
        crowdfunding: Address,
        verification: Address,
        escrow: Address,
    ) -> Result<(), ContractError> {
        admin::set_modules(&env, admin, crowdfunding, verification, escrow)
    }

    /// Allowed range for `PoolConfig::cycle_duration`, in ledgers.
    pub fn set_cycle_bounds(
        env: Env,
        admin: Address,
        min_cycle: u32,
        max_cycle: u32,
    ) -> Result<(), ContractError> {
        admin::set_cycle_bounds(&env, admin, min_cycle, max_cycle)
    }

    /// Pull `amount` out of escrow to `recipient`. The system must be paused first.
    pub fn emergency_withdraw(
        env: Env,
        admin: Address,
        amount: i128,
        recipient: Address,
    ) -> Result<(), ContractError> {
        admin::emergency_withdraw(&env, admin, amount, recipient)
    }

    pub fn pause_pool(env: Env, admin: Address, pool_id: u64) -> Result<(), ContractError> {
        admin::pause_pool(&env, admin, pool_id)
    }

    pub fn resume_pool(env: Env, admin: Address, pool_id: u64) -> Result<(), ContractError> {
        admin::resume_pool(&env, admin, pool_id)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        Ok(GovernanceState::load(&env)?.admin)
    }

    pub fn get_governance(env: Env) -> Result<GovernanceState, ContractError> {
        GovernanceState::load(&env)
    }

    pub fn is_system_paused(env: Env) -> Result<bool, ContractError> {
        Ok(GovernanceState::load(&env)?.paused)
    }

    pub fn get_module_name(env: Env) -> String {
        String::from_str(&env, constants::MODULE_NAME)
    }

    pub fn get_module_version(env: Env) -> String {
        String::from_str(&env, constants::MODULE_VERSION)
    }

    /// Initialized and not paused.
    pub fn is_module_active(env: Env) -> bool {
        GovernanceState::load(&env)
            .map(|state| !state.paused)
            .unwrap_or(false)
    }

    // ─── Pool Registry ──────────────────────────────────────────────

    /// Create a pool. The creator becomes member #1 and the first beneficiary.
    pub fn create_pool(
        env: Env,
        creator: Address,
        config: PoolConfig,
        verification: Address,
    ) -> Result<u64, ContractError> {
        let gov = GovernanceState::load_active(&env)?;
        pool::create_pool(&env, &gov, creator, config, verification)
    }

    /// Join a forming pool on the strength of a verified connection with
    /// `referrer`, declaring the project this member's turn will fund.
    #[allow(clippy::too_many_arguments)]
    pub fn join_pool(
        env: Env,
        applicant: Address,
        pool_id: u64,
        referrer: Address,
        mutual_project_ids: Vec<u32>,
        title: String,
        description: String,
        expected_completion: u32,
    ) -> Result<Member, ContractError> {
        let gov = GovernanceState::load_active(&env)?;
        pool::join_pool(
            &env,
            &gov,
            applicant,
            pool_id,
            referrer,
            mutual_project_ids,
            title,
            description,
            expected_completion,
        )
    }

    /// Start a forming pool before it fills (creator only, at least 3 members).
    pub fn activate_pool(env: Env, creator: Address, pool_id: u64) -> Result<(), ContractError> {
        GovernanceState::load_active(&env)?;
        pool::activate_pool(&env, creator, pool_id)
    }

    pub fn get_pool(env: Env, pool_id: u64) -> Result<Pool, ContractError> {
        pool::get_pool(&env, pool_id)
    }

    /// Member addresses in rotation order.
    pub fn get_pool_members(env: Env, pool_id: u64) -> Result<Vec<Address>, ContractError> {
        pool::get_pool_members(&env, pool_id)
    }

    pub fn get_member(env: Env, pool_id: u64, member: Address) -> Result<Member, ContractError> {
        pool::get_member(&env, pool_id, member)
    }

    pub fn get_member_pools(env: Env, member: Address) -> Vec<u64> {
        pool::get_member_pools(&env, member)
    }

    pub fn get_pool_count(env: Env) -> u64 {
        storage::get_pool_counter(&env)
    }

    // ─── Contributions ──────────────────────────────────────────────

    /// Pay this member's share into the rotation currently collecting.
    pub fn contribute_to_pool(
        env: Env,
        member: Address,
        pool_id: u64,
    ) -> Result<Contribution, ContractError> {
        let gov = GovernanceState::load_active(&env)?;
        contribution::contribute_to_pool(&env, &gov, member, pool_id)
    }

    pub fn has_contributed(env: Env, pool_id: u64, member: Address) -> Result<bool, ContractError> {
        contribution::has_contributed(&env, pool_id, member)
    }

    pub fn get_contribution(
        env: Env,
        pool_id: u64,
        rotation: u32,
        member: Address,
    ) -> Option<Contribution> {
        contribution::get_contribution(&env, pool_id, rotation, member)
    }

    pub fn get_contribution_count(env: Env, pool_id: u64) -> Result<u32, ContractError> {
        contribution::get_contribution_count(&env, pool_id)
    }

    // ─── Rotations ──────────────────────────────────────────────────

    /// Disburse the current rotation once every member has paid. Callable by
    /// any pool member or the module admin.
    pub fn execute_rotation_funding(
        env: Env,
        caller: Address,
        pool_id: u64,
        crowdfunding: Address,
        verification: Address,
    ) -> Result<RotationPayout, ContractError> {
        let gov = GovernanceState::load_active(&env)?;
        rotation::execute_rotation_funding(&env, &gov, caller, pool_id, crowdfunding, verification)
    }

    /// Configure the project (and optional public campaign) for the caller's
    /// own upcoming turn. `reward_tiers = 0` opts out of crowdfunding.
    #[allow(clippy::too_many_arguments)]
    pub fn update_rotation_project_details(
        env: Env,
        caller: Address,
        pool_id: u64,
        rotation_number: u32,
        title: String,
        description: String,
        expected_completion: u32,
        reward_tiers: u32,
        reward_description: String,
    ) -> Result<(), ContractError> {
        GovernanceState::load_active(&env)?;
        rotation::update_rotation_project_details(
            &env,
            caller,
            pool_id,
            rotation_number,
            title,
            description,
            expected_completion,
            reward_tiers,
            reward_description,
        )
    }

    pub fn get_rotation(env: Env, pool_id: u64, number: u32) -> Result<Rotation, ContractError> {
        rotation::get_rotation(&env, pool_id, number)
    }

    pub fn get_current_beneficiary(env: Env, pool_id: u64) -> Result<Address, ContractError> {
        rotation::get_current_beneficiary(&env, pool_id)
    }

    // ─── Social Trust ───────────────────────────────────────────────

    /// Declare a project. Returns the owner-scoped project id.
    pub fn add_filmmaker_project(
        env: Env,
        owner: Address,
        draft: ProjectDraft,
    ) -> Result<u32, ContractError> {
        GovernanceState::load_active(&env)?;
        social::add_filmmaker_project(&env, owner, draft)
    }

    pub fn verify_mutual_project(
        env: Env,
        collaborator: Address,
        owner: Address,
        project_id: u32,
    ) -> Result<(), ContractError> {
        GovernanceState::load_active(&env)?;
        social::verify_mutual_project(&env, collaborator, owner, project_id)
    }

    /// Record a connection backed by the initiator's projects that
    /// `counterpart` has verified.
    pub fn create_mutual_connection(
        env: Env,
        initiator: Address,
        counterpart: Address,
        connection_type: Symbol,
        project_ids: Vec<u32>,
    ) -> Result<(), ContractError> {
        GovernanceState::load_active(&env)?;
        social::create_mutual_connection(&env, initiator, counterpart, connection_type, project_ids)
    }

    pub fn get_filmmaker_project(
        env: Env,
        owner: Address,
        project_id: u32,
    ) -> Result<Project, ContractError> {
        social::get_filmmaker_project(&env, owner, project_id)
    }

    pub fn get_project_counts(env: Env, owner: Address) -> ProjectCounts {
        social::get_project_counts(&env, owner)
    }

    pub fn get_social_connection(env: Env, a: Address, b: Address) -> Option<SocialConnection> {
        social::get_social_connection(&env, a, b)
    }

    pub fn has_verified_connection(env: Env, a: Address, b: Address) -> bool {
        social::has_verified_connection(&env, &a, &b)
    }
}

#[cfg(test)]
mod testutils;
