use soroban_sdk::{Address, Env, Vec};

use crate::errors::ContractError;
use crate::types::{
    Contribution, DataKey, GovernanceState, Member, Pool, Project, Rotation, SocialConnection,
};

// Entries stay live for about 30 days after each touch.
const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_TTL_THRESHOLD: u32 = DAY_IN_LEDGERS;
const INSTANCE_TTL_EXTEND: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_TTL_THRESHOLD: u32 = DAY_IN_LEDGERS;
const PERSISTENT_TTL_EXTEND: u32 = 30 * DAY_IN_LEDGERS;

// --- Governance ---

pub fn get_governance(env: &Env) -> Option<GovernanceState> {
    env.storage().instance().get(&DataKey::Governance)
}

pub fn set_governance(env: &Env, state: &GovernanceState) {
    env.storage().instance().set(&DataKey::Governance, state);
    extend_instance_ttl(env);
}

pub fn has_governance(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Governance)
}

// --- Pool Counter ---

pub fn get_pool_counter(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::PoolCounter)
        .unwrap_or(0)
}

pub fn set_pool_counter(env: &Env, counter: u64) {
    env.storage().instance().set(&DataKey::PoolCounter, &counter);
    extend_instance_ttl(env);
}

// --- Pool ---

pub fn get_pool(env: &Env, pool_id: u64) -> Option<Pool> {
    read_persistent(env, &DataKey::Pool(pool_id))
}

pub fn set_pool(env: &Env, pool: &Pool) {
    write_persistent(env, &DataKey::Pool(pool.id), pool);
}

pub fn get_pool_members(env: &Env, pool_id: u64) -> Vec<Address> {
    read_persistent(env, &DataKey::PoolMembers(pool_id)).unwrap_or(Vec::new(env))
}

pub fn set_pool_members(env: &Env, pool_id: u64, members: &Vec<Address>) {
    write_persistent(env, &DataKey::PoolMembers(pool_id), members);
}

// --- Member ---

pub fn get_member(env: &Env, pool_id: u64, address: &Address) -> Option<Member> {
    read_persistent(env, &DataKey::Member(pool_id, address.clone()))
}

pub fn set_member(env: &Env, pool_id: u64, member: &Member) {
    write_persistent(env, &DataKey::Member(pool_id, member.address.clone()), member);
}

pub fn get_member_pools(env: &Env, member: &Address) -> Vec<u64> {
    read_persistent(env, &DataKey::MemberPools(member.clone())).unwrap_or(Vec::new(env))
}

pub fn add_member_pool(env: &Env, member: &Address, pool_id: u64) {
    let mut pools = get_member_pools(env, member);
    pools.push_back(pool_id);
    write_persistent(env, &DataKey::MemberPools(member.clone()), &pools);
}

// --- Rotation ---

pub fn get_rotation(env: &Env, pool_id: u64, number: u32) -> Option<Rotation> {
    read_persistent(env, &DataKey::Rotation(pool_id, number))
}

pub fn set_rotation(env: &Env, rotation: &Rotation) {
    write_persistent(
        env,
        &DataKey::Rotation(rotation.pool_id, rotation.number),
        rotation,
    );
}

// --- Contribution ---

pub fn get_contribution(
    env: &Env,
    pool_id: u64,
    rotation: u32,
    member: &Address,
) -> Option<Contribution> {
    read_persistent(env, &DataKey::Contribution(pool_id, rotation, member.clone()))
}

pub fn has_contribution(env: &Env, pool_id: u64, rotation: u32, member: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Contribution(pool_id, rotation, member.clone()))
}

/// Insert-only: an existing record is never replaced.
pub fn insert_contribution(
    env: &Env,
    pool_id: u64,
    rotation: u32,
    member: &Address,
    contribution: &Contribution,
) -> Result<(), ContractError> {
    if has_contribution(env, pool_id, rotation, member) {
        return Err(ContractError::AlreadyContributed);
    }
    write_persistent(
        env,
        &DataKey::Contribution(pool_id, rotation, member.clone()),
        contribution,
    );
    Ok(())
}

pub fn remove_contribution(env: &Env, pool_id: u64, rotation: u32, member: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Contribution(pool_id, rotation, member.clone()));
}

// --- Projects ---

pub fn get_project_count(env: &Env, owner: &Address) -> u32 {
    read_persistent(env, &DataKey::ProjectCount(owner.clone())).unwrap_or(0)
}

pub fn set_project_count(env: &Env, owner: &Address, count: u32) {
    write_persistent(env, &DataKey::ProjectCount(owner.clone()), &count);
}

pub fn get_project(env: &Env, owner: &Address, project_id: u32) -> Option<Project> {
    read_persistent(env, &DataKey::Project(owner.clone(), project_id))
}

pub fn set_project(env: &Env, project: &Project) {
    write_persistent(
        env,
        &DataKey::Project(project.owner.clone(), project.id),
        project,
    );
}

// --- Social connections ---

/// Connections are keyed by the address pair in ascending order.
pub fn canonical_pair(a: &Address, b: &Address) -> (Address, Address) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

pub fn get_connection(env: &Env, a: &Address, b: &Address) -> Option<SocialConnection> {
    let (first, second) = canonical_pair(a, b);
    read_persistent(env, &DataKey::Connection(first, second))
}

pub fn set_connection(env: &Env, connection: &SocialConnection) {
    let (first, second) = canonical_pair(&connection.identity_a, &connection.identity_b);
    write_persistent(env, &DataKey::Connection(first, second), connection);
}

pub fn get_connection_count(env: &Env, identity: &Address) -> u32 {
    read_persistent(env, &DataKey::ConnectionCount(identity.clone())).unwrap_or(0)
}

pub fn increment_connection_count(env: &Env, identity: &Address) {
    let count = get_connection_count(env, identity) + 1;
    write_persistent(env, &DataKey::ConnectionCount(identity.clone()), &count);
}

// --- TTL Management ---

fn read_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
    V::Error: core::fmt::Debug,
{
    let result = env.storage().persistent().get(key);
    if result.is_some() {
        extend_persistent_ttl(env, key);
    }
    result
}

fn write_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    extend_persistent_ttl(env, key);
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
