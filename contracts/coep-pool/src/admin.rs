use soroban_sdk::{symbol_short, Address, Env};

use crate::constants::{DEFAULT_MAX_CYCLE, DEFAULT_MIN_CYCLE};
use crate::errors::ContractError;
use crate::interfaces::EscrowClient;
use crate::storage;
use crate::types::{GovernanceState, PauseMark, PoolStatus};

/// Collaborator slots the admin wires up with `set_modules`.
#[derive(Clone, Copy)]
pub enum Module {
    Crowdfunding,
    Verification,
    Escrow,
}

impl GovernanceState {
    /// Load the module state, failing if `initialize` has not run yet.
    pub fn load(env: &Env) -> Result<Self, ContractError> {
        storage::get_governance(env).ok_or(ContractError::NotInitialized)
    }

    /// Load and reject the call while the system is paused.
    pub fn load_active(env: &Env) -> Result<Self, ContractError> {
        let state = Self::load(env)?;
        if state.paused {
            return Err(ContractError::SystemPaused);
        }
        Ok(state)
    }

    pub fn require_admin(&self, caller: &Address) -> Result<(), ContractError> {
        if *caller != self.admin {
            return Err(ContractError::NotAuthorized);
        }
        Ok(())
    }

    pub fn module(&self, module: Module) -> Option<Address> {
        match module {
            Module::Crowdfunding => self.crowdfunding.clone(),
            Module::Verification => self.verification.clone(),
            Module::Escrow => self.escrow.clone(),
        }
    }

    /// Wired address of `module`.
    pub fn require_module(&self, module: Module) -> Result<Address, ContractError> {
        self.module(module).ok_or(ContractError::ModuleNotConfigured)
    }

    /// Check that a collaborator passed in by the caller is the wired one.
    pub fn check_module(&self, module: Module, supplied: &Address) -> Result<(), ContractError> {
        if self.require_module(module)? != *supplied {
            return Err(ContractError::ModuleMismatch);
        }
        Ok(())
    }
}

pub fn initialize(env: &Env, admin: Address) -> Result<(), ContractError> {
    if storage::has_governance(env) {
        return Err(ContractError::AlreadyInitialized);
    }
    admin.require_auth();

    let state = GovernanceState {
        admin: admin.clone(),
        paused: false,
        crowdfunding: None,
        verification: None,
        escrow: None,
        min_cycle: DEFAULT_MIN_CYCLE,
        max_cycle: DEFAULT_MAX_CYCLE,
    };
    storage::set_governance(env, &state);

    env.events().publish((symbol_short!("init"),), admin);

    Ok(())
}

pub fn set_admin(env: &Env, admin: Address, new_admin: Address) -> Result<(), ContractError> {
    admin.require_auth();

    let mut state = GovernanceState::load(env)?;
    state.require_admin(&admin)?;

    state.admin = new_admin.clone();
    storage::set_governance(env, &state);

    env.events()
        .publish((symbol_short!("adm_chng"),), (admin, new_admin));

    Ok(())
}

pub fn set_paused(env: &Env, admin: Address, paused: bool) -> Result<(), ContractError> {
    admin.require_auth();

    let mut state = GovernanceState::load(env)?;
    state.require_admin(&admin)?;

    state.paused = paused;
    storage::set_governance(env, &state);

    let topic = if paused {
        symbol_short!("sys_paus")
    } else {
        symbol_short!("sys_resm")
    };
    env.events().publish((topic,), admin);

    Ok(())
}

pub fn set_modules(
    env: &Env,
    admin: Address,
    crowdfunding: Address,
    verification: Address,
    escrow: Address,
) -> Result<(), ContractError> {
    admin.require_auth();

    let mut state = GovernanceState::load(env)?;
    state.require_admin(&admin)?;

    state.crowdfunding = Some(crowdfunding.clone());
    state.verification = Some(verification.clone());
    state.escrow = Some(escrow.clone());
    storage::set_governance(env, &state);

    env.events().publish(
        (symbol_short!("mod_wire"),),
        (crowdfunding, verification, escrow),
    );

    Ok(())
}

pub fn set_cycle_bounds(
    env: &Env,
    admin: Address,
    min_cycle: u32,
    max_cycle: u32,
) -> Result<(), ContractError> {
    admin.require_auth();

    let mut state = GovernanceState::load(env)?;
    state.require_admin(&admin)?;

    if min_cycle == 0 || min_cycle > max_cycle {
        return Err(ContractError::InvalidCycleDuration);
    }

    state.min_cycle = min_cycle;
    state.max_cycle = max_cycle;
    storage::set_governance(env, &state);

    env.events()
        .publish((symbol_short!("cyc_bnds"),), (min_cycle, max_cycle));

    Ok(())
}

/// Sweep funds out of escrow. Only allowed once the system is paused.
pub fn emergency_withdraw(
    env: &Env,
    admin: Address,
    amount: i128,
    recipient: Address,
) -> Result<(), ContractError> {
    admin.require_auth();

    let state = GovernanceState::load(env)?;
    state.require_admin(&admin)?;

    if !state.paused {
        return Err(ContractError::SystemNotPaused);
    }
    if amount <= 0 {
        return Err(ContractError::InvalidContribution);
    }

    let escrow = EscrowClient::new(env, &state.require_module(Module::Escrow)?);
    match escrow.try_emergency_release(&recipient, &amount) {
        Ok(Ok(true)) => {}
        Ok(Ok(false)) => return Err(ContractError::InsufficientBalance),
        _ => return Err(ContractError::EscrowFailed),
    }

    env.events()
        .publish((symbol_short!("emergenc"),), (recipient, amount));

    Ok(())
}

pub fn pause_pool(env: &Env, admin: Address, pool_id: u64) -> Result<(), ContractError> {
    admin.require_auth();

    let state = GovernanceState::load(env)?;
    state.require_admin(&admin)?;

    let mut pool = storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)?;

    if pool.is_paused() {
        return Err(ContractError::PoolPaused);
    }
    if pool.status == PoolStatus::Completed {
        return Err(ContractError::PoolNotActive);
    }

    pool.paused_from = PauseMark::PausedFrom(pool.status);
    pool.status = PoolStatus::Paused;
    storage::set_pool(env, &pool);

    env.events()
        .publish((symbol_short!("pool_paus"),), pool_id);

    Ok(())
}

pub fn resume_pool(env: &Env, admin: Address, pool_id: u64) -> Result<(), ContractError> {
    admin.require_auth();

    let state = GovernanceState::load(env)?;
    state.require_admin(&admin)?;

    let mut pool = storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)?;

    let PauseMark::PausedFrom(previous) = pool.paused_from else {
        return Err(ContractError::PoolNotActive);
    };
    pool.status = previous;
    pool.paused_from = PauseMark::Running;
    storage::set_pool(env, &pool);

    env.events()
        .publish((symbol_short!("pool_resm"),), pool_id);

    Ok(())
}
