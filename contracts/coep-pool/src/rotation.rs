use soroban_sdk::{symbol_short, Address, Env, String};

use crate::admin::Module;
use crate::constants::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
use crate::errors::ContractError;
use crate::interfaces::{CrowdfundingClient, EscrowClient, VerificationClient};
use crate::pool::{check_optional_text, check_text, is_active_member, verification_tier};
use crate::storage;
use crate::types::{
    GovernanceState, PoolStatus, ProjectSlot, Rotation, RotationPayout, RotationProject,
    RotationStatus,
};

/// Pay the current rotation's pot to its beneficiary and advance the pool.
/// Requires every active member to have contributed.
pub fn execute_rotation_funding(
    env: &Env,
    gov: &GovernanceState,
    caller: Address,
    pool_id: u64,
    crowdfunding: Address,
    verification: Address,
) -> Result<RotationPayout, ContractError> {
    caller.require_auth();
    gov.check_module(Module::Crowdfunding, &crowdfunding)?;
    gov.check_module(Module::Verification, &verification)?;

    let mut pool = storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)?;

    if caller != gov.admin && !is_active_member(env, pool_id, &caller) {
        return Err(ContractError::NotAuthorized);
    }

    match pool.status {
        PoolStatus::Active => {}
        PoolStatus::Paused => return Err(ContractError::PoolPaused),
        PoolStatus::Completed => return Err(ContractError::AlreadyFunded),
        PoolStatus::Forming => return Err(ContractError::PoolNotActive),
    }

    let number = pool.active_rotation();
    let mut rotation =
        storage::get_rotation(env, pool_id, number).ok_or(ContractError::RotationNotFound)?;
    if rotation.status == RotationStatus::Completed {
        return Err(ContractError::AlreadyFunded);
    }

    let members = storage::get_pool_members(env, pool_id);
    for address in members.iter() {
        if is_active_member(env, pool_id, &address)
            && !storage::has_contribution(env, pool_id, number, &address)
        {
            return Err(ContractError::RotationInProgress);
        }
    }

    // What was collected, not what a full pool would hold.
    let amount = pool
        .contribution_amount
        .checked_mul(pool.current_members as i128)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let total_disbursed = pool
        .total_disbursed
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;

    let mut beneficiary = storage::get_member(env, pool_id, &rotation.beneficiary)
        .filter(|m| m.rotation_order == number)
        .ok_or(ContractError::NotPoolMember)?;
    if beneficiary.has_benefited {
        return Err(ContractError::AlreadyFunded);
    }

    if pool.require_verified
        && verification_tier(
            &VerificationClient::new(env, &verification),
            &beneficiary.address,
        )? == 0
    {
        return Err(ContractError::IdentityNotVerified);
    }

    let escrow = EscrowClient::new(env, &gov.require_module(Module::Escrow)?);
    match escrow.try_release(&pool_id, &beneficiary.address, &amount) {
        Ok(Ok(true)) => {}
        Ok(Ok(false)) => return Err(ContractError::InsufficientBalance),
        _ => return Err(ContractError::EscrowFailed),
    }

    env.events().publish(
        (symbol_short!("payout"),),
        (pool_id, number, beneficiary.address.clone(), amount),
    );

    let campaign_id = match rotation.project.declared() {
        Some(project) if project.public_crowdfunding && project.reward_tiers > 0 => {
            let id = launch_campaign(env, &crowdfunding, &beneficiary.address, project, amount)?;
            env.events().publish(
                (symbol_short!("campaign"),),
                (pool_id, number, beneficiary.address.clone(), id),
            );
            Some(id)
        }
        _ => None,
    };

    let now = env.ledger().sequence();

    beneficiary.has_benefited = true;
    storage::set_member(env, pool_id, &beneficiary);

    rotation.amount = amount;
    rotation.end_block = now;
    rotation.status = RotationStatus::Completed;
    rotation.linked_campaign = campaign_id;
    storage::set_rotation(env, &rotation);

    for address in members.iter() {
        storage::remove_contribution(env, pool_id, number, &address);
    }

    pool.current_rotation += 1;
    pool.total_disbursed = total_disbursed;

    env.events()
        .publish((symbol_short!("rot_done"),), (pool_id, number));

    if pool.current_rotation >= pool.total_rotations {
        pool.status = PoolStatus::Completed;
        env.events()
            .publish((symbol_short!("pool_done"),), pool_id);
    } else {
        open_rotation(env, pool_id, pool.active_rotation(), pool.cycle_duration)?;
    }
    storage::set_pool(env, &pool);

    Ok(RotationPayout {
        rotation: number,
        beneficiary: beneficiary.address,
        amount,
        campaign_id,
    })
}

#[allow(clippy::too_many_arguments)]
pub fn update_rotation_project_details(
    env: &Env,
    caller: Address,
    pool_id: u64,
    rotation_number: u32,
    title: String,
    description: String,
    expected_completion: u32,
    reward_tiers: u32,
    reward_description: String,
) -> Result<(), ContractError> {
    caller.require_auth();

    let pool = storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)?;
    if pool.is_paused() {
        return Err(ContractError::PoolPaused);
    }

    let member = storage::get_member(env, pool_id, &caller).ok_or(ContractError::NotAuthorized)?;
    if member.rotation_order != rotation_number {
        return Err(ContractError::NotAuthorized);
    }

    let mut rotation = storage::get_rotation(env, pool_id, rotation_number)
        .ok_or(ContractError::RotationNotFound)?;
    if rotation.status == RotationStatus::Completed || member.has_benefited {
        return Err(ContractError::AlreadyFunded);
    }

    check_text(&title, MAX_TITLE_LEN, ContractError::InvalidTitle)?;
    check_optional_text(&description, MAX_DESCRIPTION_LEN)?;
    check_optional_text(&reward_description, MAX_DESCRIPTION_LEN)?;
    if expected_completion <= env.ledger().sequence() {
        return Err(ContractError::InvalidTimeWindow);
    }

    rotation.project = ProjectSlot::Declared(RotationProject {
        title,
        description,
        expected_completion,
        reward_tiers,
        reward_description,
        public_crowdfunding: reward_tiers > 0,
    });
    storage::set_rotation(env, &rotation);

    env.events()
        .publish((symbol_short!("rot_proj"),), (pool_id, rotation_number, reward_tiers));

    Ok(())
}

pub fn get_rotation(env: &Env, pool_id: u64, number: u32) -> Result<Rotation, ContractError> {
    storage::get_rotation(env, pool_id, number).ok_or(ContractError::RotationNotFound)
}

pub fn get_current_beneficiary(env: &Env, pool_id: u64) -> Result<Address, ContractError> {
    let pool = storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)?;
    if pool.status == PoolStatus::Completed {
        return Err(ContractError::PoolNotActive);
    }
    let rotation = get_rotation(env, pool_id, pool.active_rotation())?;
    Ok(rotation.beneficiary)
}

fn launch_campaign(
    env: &Env,
    crowdfunding: &Address,
    beneficiary: &Address,
    project: &RotationProject,
    target_amount: i128,
) -> Result<u64, ContractError> {
    let client = CrowdfundingClient::new(env, crowdfunding);
    match client.try_create_linked_campaign(
        beneficiary,
        &project.title,
        &project.description,
        &target_amount,
        &project.expected_completion,
    ) {
        Ok(Ok(id)) => Ok(id),
        _ => Err(ContractError::CampaignFailed),
    }
}

fn open_rotation(
    env: &Env,
    pool_id: u64,
    number: u32,
    cycle_duration: u32,
) -> Result<(), ContractError> {
    let mut next = storage::get_rotation(env, pool_id, number).ok_or(ContractError::RotationNotFound)?;
    let now = env.ledger().sequence();
    next.status = RotationStatus::Active;
    next.start_block = now;
    next.end_block = now.saturating_add(cycle_duration);
    storage::set_rotation(env, &next);
    Ok(())
}
