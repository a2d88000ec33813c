use soroban_sdk::{contracttype, Address, BytesN, String, Symbol, Vec};

/// Status of a pool throughout its lifecycle.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolStatus {
    Forming,   // Accepting members
    Active,    // Full, rotations running
    Completed, // Every member has had their turn
    Paused,    // Admin override, see `Pool::paused_from`
}

/// What an admin pause interrupted.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PauseMark {
    Running,
    PausedFrom(PoolStatus),
}

/// Creation parameters for a pool.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolConfig {
    pub name: String,
    pub description: String,
    pub max_members: u32,
    pub contribution_amount: i128,
    pub cycle_duration: u32,
    pub legal_hash: Option<BytesN<32>>,
    pub category: Symbol,
    pub geo_focus: Symbol,
    pub require_verified: bool,
}

/// A rotating funding pool.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Pool {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub creator: Address,
    pub max_members: u32,
    pub current_members: u32,
    pub contribution_amount: i128,
    pub cycle_duration: u32,
    pub category: Symbol,
    pub geo_focus: Symbol,
    pub legal_hash: Option<BytesN<32>>,
    pub require_verified: bool,
    pub status: PoolStatus,
    /// Status interrupted by an admin pause, restored on resume.
    pub paused_from: PauseMark,
    /// Number of rotations already executed.
    pub current_rotation: u32,
    pub total_rotations: u32,
    pub total_disbursed: i128,
    pub created_at: u32,
}

impl Pool {
    /// Rotation number currently collecting contributions (1-based).
    pub fn active_rotation(&self) -> u32 {
        self.current_rotation + 1
    }

    pub fn is_paused(&self) -> bool {
        self.status == PoolStatus::Paused
    }
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub address: Address,
    pub joined_at: u32,
    pub rotation_order: u32,
    pub has_benefited: bool,
    pub contributions_made: u32,
    pub active: bool,
    pub verification_tier: u32,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RotationStatus {
    Upcoming,
    Active,
    Completed,
    Failed,
}

/// Project a beneficiary plans to fund with their turn.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct RotationProject {
    pub title: String,
    pub description: String,
    pub expected_completion: u32,
    pub reward_tiers: u32,
    pub reward_description: String,
    pub public_crowdfunding: bool,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub enum ProjectSlot {
    Undeclared,
    Declared(RotationProject),
}

impl ProjectSlot {
    pub fn declared(&self) -> Option<&RotationProject> {
        match self {
            ProjectSlot::Declared(project) => Some(project),
            ProjectSlot::Undeclared => None,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct Rotation {
    pub pool_id: u64,
    pub number: u32,
    pub beneficiary: Address,
    pub amount: i128,
    pub start_block: u32,
    pub end_block: u32,
    pub status: RotationStatus,
    pub project: ProjectSlot,
    pub linked_campaign: Option<u64>,
}

/// Ledger entry for one member's payment into one rotation.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Contribution {
    pub paid: bool,
    pub amount: i128,
    pub paid_at: u32,
}

/// Result of a successful rotation execution.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct RotationPayout {
    pub rotation: u32,
    pub beneficiary: Address,
    pub amount: i128,
    pub campaign_id: Option<u64>,
}

// ─── Social trust ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Collaborator {
    pub identity: Address,
    pub role: String,
    pub verified: bool,
}

/// Input for `add_filmmaker_project`. `collaborators` and
/// `collaborator_roles` are parallel lists.
#[contracttype]
#[derive(Clone, Debug)]
pub struct ProjectDraft {
    pub title: String,
    pub project_type: Symbol,
    pub role: String,
    pub collaborators: Vec<Address>,
    pub collaborator_roles: Vec<String>,
    pub start_time: u64,
    pub end_time: u64,
    pub reference_url: String,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct Project {
    pub id: u32,
    pub owner: Address,
    pub title: String,
    pub project_type: Symbol,
    pub role: String,
    pub collaborators: Vec<Collaborator>,
    pub start_time: u64,
    pub end_time: u64,
    pub reference_url: String,
    pub created_at: u32,
}

/// Mutually acknowledged relationship, stored once per canonical pair.
#[contracttype]
#[derive(Clone, Debug)]
pub struct SocialConnection {
    pub identity_a: Address,
    pub identity_b: Address,
    pub initiator: Address,
    pub connection_type: Symbol,
    /// Project ids owned by `initiator`.
    pub mutual_projects: Vec<u32>,
    pub created_at: u32,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectCounts {
    pub projects: u32,
    pub connections: u32,
}

// ─── Governance ────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug)]
pub struct GovernanceState {
    pub admin: Address,
    pub paused: bool,
    pub crowdfunding: Option<Address>,
    pub verification: Option<Address>,
    pub escrow: Option<Address>,
    pub min_cycle: u32,
    pub max_cycle: u32,
}

/// Storage keys for all contract data.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Governance,
    PoolCounter,
    Pool(u64),
    PoolMembers(u64),
    Member(u64, Address),
    MemberPools(Address),
    Rotation(u64, u32),
    Contribution(u64, u32, Address),
    ProjectCount(Address),
    Project(Address, u32),
    Connection(Address, Address),
    ConnectionCount(Address),
}
