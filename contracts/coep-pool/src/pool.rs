use soroban_sdk::{symbol_short, Address, Env, String, Symbol, Vec};

use crate::admin::Module;
use crate::constants::{
    GEO_FOCUSES, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_POOL_MEMBERS, MAX_TITLE_LEN,
    MIN_POOL_MEMBERS, POOL_CATEGORIES,
};
use crate::errors::ContractError;
use crate::interfaces::VerificationClient;
use crate::social;
use crate::storage;
use crate::types::{
    GovernanceState, Member, PauseMark, Pool, PoolConfig, PoolStatus, ProjectSlot, Rotation,
    RotationProject, RotationStatus,
};

pub fn create_pool(
    env: &Env,
    gov: &GovernanceState,
    creator: Address,
    config: PoolConfig,
    verification: Address,
) -> Result<u64, ContractError> {
    creator.require_auth();
    gov.check_module(Module::Verification, &verification)?;

    check_text(&config.name, MAX_NAME_LEN, ContractError::InvalidTitle)?;
    check_optional_text(&config.description, MAX_DESCRIPTION_LEN)?;

    if config.max_members < MIN_POOL_MEMBERS || config.max_members > MAX_POOL_MEMBERS {
        return Err(ContractError::InvalidPoolSize);
    }
    if config.contribution_amount <= 0 {
        return Err(ContractError::InvalidContribution);
    }
    if config.cycle_duration < gov.min_cycle || config.cycle_duration > gov.max_cycle {
        return Err(ContractError::InvalidCycleDuration);
    }
    if !is_listed(env, &config.category, &POOL_CATEGORIES)
        || !is_listed(env, &config.geo_focus, &GEO_FOCUSES)
    {
        return Err(ContractError::InvalidCategory);
    }

    let tier = verification_tier(&VerificationClient::new(env, &verification), &creator)?;
    if config.require_verified && tier == 0 {
        return Err(ContractError::IdentityNotVerified);
    }

    let pool_id = storage::get_pool_counter(env) + 1;
    storage::set_pool_counter(env, pool_id);

    let now = env.ledger().sequence();
    let pool = Pool {
        id: pool_id,
        name: config.name,
        description: config.description,
        creator: creator.clone(),
        max_members: config.max_members,
        current_members: 1,
        contribution_amount: config.contribution_amount,
        cycle_duration: config.cycle_duration,
        category: config.category,
        geo_focus: config.geo_focus,
        legal_hash: config.legal_hash,
        require_verified: config.require_verified,
        status: PoolStatus::Forming,
        paused_from: PauseMark::Running,
        current_rotation: 0,
        total_rotations: config.max_members,
        total_disbursed: 0,
        created_at: now,
    };

    let member = Member {
        address: creator.clone(),
        joined_at: now,
        rotation_order: 1,
        has_benefited: false,
        contributions_made: 0,
        active: true,
        verification_tier: tier,
    };

    let mut members = Vec::new(env);
    members.push_back(creator.clone());

    storage::set_pool(env, &pool);
    storage::set_pool_members(env, pool_id, &members);
    storage::set_member(env, pool_id, &member);
    storage::set_rotation(env, &upcoming_rotation(pool_id, 1, creator.clone(), ProjectSlot::Undeclared));
    storage::add_member_pool(env, &creator, pool_id);

    env.events()
        .publish((symbol_short!("pool_new"),), (pool_id, creator));

    Ok(pool_id)
}

#[allow(clippy::too_many_arguments)]
pub fn join_pool(
    env: &Env,
    gov: &GovernanceState,
    applicant: Address,
    pool_id: u64,
    referrer: Address,
    mutual_project_ids: Vec<u32>,
    title: String,
    description: String,
    expected_completion: u32,
) -> Result<Member, ContractError> {
    applicant.require_auth();

    let mut pool = storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)?;

    if pool.is_paused() {
        return Err(ContractError::PoolPaused);
    }
    if pool.current_members >= pool.max_members {
        return Err(ContractError::PoolFull);
    }
    if pool.status != PoolStatus::Forming {
        return Err(ContractError::PoolNotForming);
    }
    if storage::get_member(env, pool_id, &applicant).is_some() {
        return Err(ContractError::AlreadyMember);
    }

    check_text(&title, MAX_TITLE_LEN, ContractError::InvalidTitle)?;
    check_optional_text(&description, MAX_DESCRIPTION_LEN)?;

    let now = env.ledger().sequence();
    if expected_completion <= now {
        return Err(ContractError::InvalidTimeWindow);
    }

    let verifier = gov
        .module(Module::Verification)
        .map(|address| VerificationClient::new(env, &address));

    let tier = match verifier.as_ref() {
        Some(client) => verification_tier(client, &applicant)?,
        None => 0,
    };
    if pool.require_verified && tier == 0 {
        return Err(ContractError::IdentityNotVerified);
    }

    let vouched = is_active_member(env, pool_id, &referrer)
        && (social::connection_backed_by(env, &applicant, &referrer, &mutual_project_ids)
            || match verifier.as_ref() {
                Some(client) => has_mutual_project(client, &applicant, &referrer)?,
                None => false,
            });
    if !vouched {
        return Err(ContractError::NoVerifiedConnection);
    }

    // Join order is payout order.
    let rotation_order = pool.current_members + 1;
    let member = Member {
        address: applicant.clone(),
        joined_at: now,
        rotation_order,
        has_benefited: false,
        contributions_made: 0,
        active: true,
        verification_tier: tier,
    };

    let project = RotationProject {
        title,
        description,
        expected_completion,
        reward_tiers: 0,
        reward_description: String::from_str(env, ""),
        public_crowdfunding: false,
    };

    let mut members = storage::get_pool_members(env, pool_id);
    members.push_back(applicant.clone());
    pool.current_members += 1;

    storage::set_pool_members(env, pool_id, &members);
    storage::set_member(env, pool_id, &member);
    storage::set_rotation(
        env,
        &upcoming_rotation(
            pool_id,
            rotation_order,
            applicant.clone(),
            ProjectSlot::Declared(project),
        ),
    );
    storage::add_member_pool(env, &applicant, pool_id);

    env.events()
        .publish((symbol_short!("pool_join"),), (pool_id, applicant, rotation_order));

    if pool.current_members == pool.max_members {
        activate(env, &mut pool)?;
    }
    storage::set_pool(env, &pool);

    Ok(member)
}

/// Start a pool before it fills. Rotations shrink to the members present.
pub fn activate_pool(env: &Env, creator: Address, pool_id: u64) -> Result<(), ContractError> {
    creator.require_auth();

    let mut pool = storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)?;

    if creator != pool.creator {
        return Err(ContractError::NotAuthorized);
    }
    if pool.is_paused() {
        return Err(ContractError::PoolPaused);
    }
    if pool.status != PoolStatus::Forming {
        return Err(ContractError::PoolNotForming);
    }
    if pool.current_members < MIN_POOL_MEMBERS {
        return Err(ContractError::InsufficientMembers);
    }

    pool.total_rotations = pool.current_members;
    activate(env, &mut pool)?;
    storage::set_pool(env, &pool);

    Ok(())
}

pub fn get_pool(env: &Env, pool_id: u64) -> Result<Pool, ContractError> {
    storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)
}

pub fn get_pool_members(env: &Env, pool_id: u64) -> Result<Vec<Address>, ContractError> {
    get_pool(env, pool_id)?;
    Ok(storage::get_pool_members(env, pool_id))
}

pub fn get_member(env: &Env, pool_id: u64, address: Address) -> Result<Member, ContractError> {
    get_pool(env, pool_id)?;
    storage::get_member(env, pool_id, &address).ok_or(ContractError::NotPoolMember)
}

pub fn get_member_pools(env: &Env, member: Address) -> Vec<u64> {
    storage::get_member_pools(env, &member)
}

pub fn is_active_member(env: &Env, pool_id: u64, address: &Address) -> bool {
    storage::get_member(env, pool_id, address)
        .map(|m| m.active)
        .unwrap_or(false)
}

/// Tier reported by the verification gateway, `0` when unverified.
pub fn verification_tier(
    client: &VerificationClient,
    identity: &Address,
) -> Result<u32, ContractError> {
    match client.try_verification_tier(identity) {
        Ok(Ok(tier)) => Ok(tier),
        _ => Err(ContractError::VerificationFailed),
    }
}

fn has_mutual_project(
    client: &VerificationClient,
    a: &Address,
    b: &Address,
) -> Result<bool, ContractError> {
    match client.try_has_mutual_project(a, b) {
        Ok(Ok(shared)) => Ok(shared),
        _ => Err(ContractError::VerificationFailed),
    }
}

/// Flip a forming pool to active and open rotation #1.
fn activate(env: &Env, pool: &mut Pool) -> Result<(), ContractError> {
    let now = env.ledger().sequence();
    let mut first = storage::get_rotation(env, pool.id, 1).ok_or(ContractError::RotationNotFound)?;
    first.status = RotationStatus::Active;
    first.start_block = now;
    first.end_block = now.saturating_add(pool.cycle_duration);
    storage::set_rotation(env, &first);

    pool.status = PoolStatus::Active;

    env.events()
        .publish((symbol_short!("pool_actv"),), (pool.id, pool.total_rotations));

    Ok(())
}

fn upcoming_rotation(
    pool_id: u64,
    number: u32,
    beneficiary: Address,
    project: ProjectSlot,
) -> Rotation {
    Rotation {
        pool_id,
        number,
        beneficiary,
        amount: 0,
        start_block: 0,
        end_block: 0,
        status: RotationStatus::Upcoming,
        project,
        linked_campaign: None,
    }
}

fn is_listed(env: &Env, value: &Symbol, allowed: &[&str]) -> bool {
    allowed.iter().any(|s| *value == Symbol::new(env, s))
}

/// Non-empty and at most `max` bytes.
pub fn check_text(value: &String, max: u32, err: ContractError) -> Result<(), ContractError> {
    if value.is_empty() || value.len() > max {
        return Err(err);
    }
    Ok(())
}

pub fn check_optional_text(value: &String, max: u32) -> Result<(), ContractError> {
    if value.len() > max {
        return Err(ContractError::InvalidDescription);
    }
    Ok(())
}
