//! Collaborator contracts the pool calls into. Only the calls the pool makes
//! are declared here; the collaborators' own logic lives elsewhere.

use soroban_sdk::{contractclient, Address, Env, String};

/// Custody of pool funds.
#[contractclient(name = "EscrowClient")]
pub trait EscrowInterface {
    /// Move `amount` from `member` into the pool's custody. Returns `false`
    /// when the member cannot cover it.
    fn lock(env: Env, pool_id: u64, member: Address, amount: i128) -> bool;

    /// Pay `amount` out of the pool's custody to `recipient`.
    fn release(env: Env, pool_id: u64, recipient: Address, amount: i128) -> bool;

    /// Admin sweep used by `emergency_withdraw`.
    fn emergency_release(env: Env, recipient: Address, amount: i128) -> bool;
}

/// Identity and portfolio verification gateway.
#[contractclient(name = "VerificationClient")]
pub trait VerificationInterface {
    /// Verification tier of `identity`, `0` when unverified.
    fn verification_tier(env: Env, identity: Address) -> u32;

    fn has_mutual_project(env: Env, a: Address, b: Address) -> bool;
}

/// Public crowdfunding module that hosts linked campaigns.
#[contractclient(name = "CrowdfundingClient")]
pub trait CrowdfundingInterface {
    fn create_linked_campaign(
        env: Env,
        beneficiary: Address,
        title: String,
        description: String,
        target_amount: i128,
        deadline: u32,
    ) -> u64;
}
