//! In-memory stand-ins for the collaborator contracts.

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String, Vec};

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Balance(Address),
    Custody(u64),
    CustodyPools,
    TotalCustody,
    Offline,
    Tier(Address),
    Link(Address, Address),
    CampaignCounter,
    Campaign(u64),
    Reject,
}

fn read_i128(env: &Env, key: &MockKey) -> i128 {
    env.storage().instance().get(key).unwrap_or(0)
}

fn write_i128(env: &Env, key: &MockKey, value: i128) {
    env.storage().instance().set(key, &value);
}

fn write_offline(env: &Env, offline: bool) {
    env.storage().instance().set(&MockKey::Offline, &offline);
}

/// Trap when the mock was switched offline.
fn check_online(env: &Env) {
    let offline: bool = env.storage().instance().get(&MockKey::Offline).unwrap_or(false);
    if offline {
        panic!("collaborator offline");
    }
}

// ─── Escrow ────────────────────────────────────────────────────────────────

/// Tracks wallet balances and per-pool custody as plain numbers.
#[contract]
pub struct MockEscrow;

#[contractimpl]
impl MockEscrow {
    pub fn fund(env: Env, member: Address, amount: i128) {
        let key = MockKey::Balance(member);
        let balance = read_i128(&env, &key);
        write_i128(&env, &key, balance + amount);
    }

    pub fn balance(env: Env, member: Address) -> i128 {
        read_i128(&env, &MockKey::Balance(member))
    }

    pub fn custody(env: Env, pool_id: u64) -> i128 {
        read_i128(&env, &MockKey::Custody(pool_id))
    }

    pub fn total_custody(env: Env) -> i128 {
        read_i128(&env, &MockKey::TotalCustody)
    }

    pub fn set_offline(env: Env, offline: bool) {
        write_offline(&env, offline);
    }

    pub fn lock(env: Env, pool_id: u64, member: Address, amount: i128) -> bool {
        check_online(&env);
        let wallet = MockKey::Balance(member);
        let balance = read_i128(&env, &wallet);
        if balance < amount {
            return false;
        }
        write_i128(&env, &wallet, balance - amount);
        move_custody(&env, pool_id, amount);
        true
    }

    pub fn release(env: Env, pool_id: u64, recipient: Address, amount: i128) -> bool {
        check_online(&env);
        if read_i128(&env, &MockKey::Custody(pool_id)) < amount {
            return false;
        }
        move_custody(&env, pool_id, -amount);
        Self::fund(env, recipient, amount);
        true
    }

    /// Sweeps custody pool by pool, oldest first.
    pub fn emergency_release(env: Env, recipient: Address, amount: i128) -> bool {
        if read_i128(&env, &MockKey::TotalCustody) < amount {
            return false;
        }
        let pools: Vec<u64> = env
            .storage()
            .instance()
            .get(&MockKey::CustodyPools)
            .unwrap_or(Vec::new(&env));
        let mut remaining = amount;
        for pool_id in pools.iter() {
            let taken = remaining.min(read_i128(&env, &MockKey::Custody(pool_id)));
            move_custody(&env, pool_id, -taken);
            remaining -= taken;
        }
        Self::fund(env, recipient, amount);
        true
    }
}

fn move_custody(env: &Env, pool_id: u64, delta: i128) {
    let mut pools: Vec<u64> = env
        .storage()
        .instance()
        .get(&MockKey::CustodyPools)
        .unwrap_or(Vec::new(env));
    if !pools.contains(pool_id) {
        pools.push_back(pool_id);
        env.storage().instance().set(&MockKey::CustodyPools, &pools);
    }

    let pool = MockKey::Custody(pool_id);
    let held = read_i128(env, &pool);
    write_i128(env, &pool, held + delta);
    let total = read_i128(env, &MockKey::TotalCustody);
    write_i128(env, &MockKey::TotalCustody, total + delta);
}

// ─── Verification ──────────────────────────────────────────────────────────

// Own module so the `set_offline` items generated by `#[contractimpl]` don't
// clash with the ones generated for `MockEscrow`.
mod verification {
    use super::*;

    #[contract]
    pub struct MockVerification;

    #[contractimpl]
    impl MockVerification {
        pub fn set_tier(env: Env, identity: Address, tier: u32) {
            env.storage().instance().set(&MockKey::Tier(identity), &tier);
        }

        pub fn set_offline(env: Env, offline: bool) {
            write_offline(&env, offline);
        }

        pub fn link(env: Env, a: Address, b: Address) {
            env.storage().instance().set(&MockKey::Link(a.clone(), b.clone()), &true);
            env.storage().instance().set(&MockKey::Link(b, a), &true);
        }

        pub fn verification_tier(env: Env, identity: Address) -> u32 {
            check_online(&env);
            env.storage()
                .instance()
                .get(&MockKey::Tier(identity))
                .unwrap_or(0)
        }

        pub fn has_mutual_project(env: Env, a: Address, b: Address) -> bool {
            check_online(&env);
            env.storage().instance().has(&MockKey::Link(a, b))
        }
    }
}

pub use verification::{MockVerification, MockVerificationClient};

// ─── Crowdfunding ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct MockCampaign {
    pub beneficiary: Address,
    pub title: String,
    pub description: String,
    pub target_amount: i128,
    pub deadline: u32,
}

#[contract]
pub struct MockCrowdfunding;

#[contractimpl]
impl MockCrowdfunding {
    /// Make every following campaign creation trap.
    pub fn set_reject(env: Env, reject: bool) {
        env.storage().instance().set(&MockKey::Reject, &reject);
    }

    pub fn campaign(env: Env, id: u64) -> Option<MockCampaign> {
        env.storage().instance().get(&MockKey::Campaign(id))
    }

    pub fn campaign_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&MockKey::CampaignCounter)
            .unwrap_or(0)
    }

    pub fn create_linked_campaign(
        env: Env,
        beneficiary: Address,
        title: String,
        description: String,
        target_amount: i128,
        deadline: u32,
    ) -> u64 {
        let reject: bool = env.storage().instance().get(&MockKey::Reject).unwrap_or(false);
        if reject {
            panic!("campaign rejected");
        }

        let id = Self::campaign_count(env.clone()) + 1;
        env.storage().instance().set(&MockKey::CampaignCounter, &id);
        env.storage().instance().set(
            &MockKey::Campaign(id),
            &MockCampaign {
                beneficiary,
                title,
                description,
                target_amount,
                deadline,
            },
        );
        id
    }
}
