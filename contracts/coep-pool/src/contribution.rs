use soroban_sdk::{symbol_short, Address, Env};

use crate::admin::Module;
use crate::errors::ContractError;
use crate::interfaces::EscrowClient;
use crate::storage;
use crate::types::{Contribution, GovernanceState, PoolStatus};

pub fn contribute_to_pool(
    env: &Env,
    gov: &GovernanceState,
    member: Address,
    pool_id: u64,
) -> Result<Contribution, ContractError> {
    member.require_auth();

    let pool = storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)?;

    let mut record = storage::get_member(env, pool_id, &member)
        .filter(|m| m.active)
        .ok_or(ContractError::NotPoolMember)?;

    if pool.is_paused() {
        return Err(ContractError::PoolPaused);
    }
    if pool.status != PoolStatus::Active {
        return Err(ContractError::PoolNotActive);
    }

    let rotation = pool.active_rotation();
    if storage::has_contribution(env, pool_id, rotation, &member) {
        return Err(ContractError::AlreadyContributed);
    }

    let escrow = EscrowClient::new(env, &gov.require_module(Module::Escrow)?);
    match escrow.try_lock(&pool_id, &member, &pool.contribution_amount) {
        Ok(Ok(true)) => {}
        Ok(Ok(false)) => return Err(ContractError::InsufficientBalance),
        _ => return Err(ContractError::EscrowFailed),
    }

    let contribution = Contribution {
        paid: true,
        amount: pool.contribution_amount,
        paid_at: env.ledger().sequence(),
    };
    storage::insert_contribution(env, pool_id, rotation, &member, &contribution)?;

    record.contributions_made += 1;
    storage::set_member(env, pool_id, &record);

    env.events().publish(
        (symbol_short!("contrib"),),
        (pool_id, rotation, member, pool.contribution_amount),
    );

    Ok(contribution)
}

/// Whether `member` has paid into the rotation currently collecting.
pub fn has_contributed(env: &Env, pool_id: u64, member: Address) -> Result<bool, ContractError> {
    let pool = storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)?;
    Ok(storage::has_contribution(
        env,
        pool_id,
        pool.active_rotation(),
        &member,
    ))
}

pub fn get_contribution(
    env: &Env,
    pool_id: u64,
    rotation: u32,
    member: Address,
) -> Option<Contribution> {
    storage::get_contribution(env, pool_id, rotation, &member)
}

/// Number of members who have paid into the rotation currently collecting.
pub fn get_contribution_count(env: &Env, pool_id: u64) -> Result<u32, ContractError> {
    let pool = storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)?;
    let rotation = pool.active_rotation();
    let mut count = 0;
    for member in storage::get_pool_members(env, pool_id).iter() {
        if storage::has_contribution(env, pool_id, rotation, &member) {
            count += 1;
        }
    }
    Ok(count)
}
