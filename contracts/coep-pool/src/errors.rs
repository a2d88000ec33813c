use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAuthorized = 3,
    SystemPaused = 4,
    SystemNotPaused = 5,
    PoolPaused = 6,
    ModuleNotConfigured = 7,
    ModuleMismatch = 8,
    VerificationFailed = 9,

    // Lookups
    PoolNotFound = 10,
    RotationNotFound = 11,
    ProjectNotFound = 12,

    // Pool creation
    InvalidPoolSize = 20,
    InvalidContribution = 21,
    InvalidCycleDuration = 22,
    InvalidCategory = 23,
    InvalidTitle = 24,
    InvalidDescription = 25,
    InvalidTimeWindow = 26,

    // Membership
    PoolFull = 30,
    AlreadyMember = 31,
    NoVerifiedConnection = 32,
    PoolNotForming = 33,
    PoolNotActive = 34,
    InsufficientMembers = 35,
    IdentityNotVerified = 36,
    NotPoolMember = 37,

    // Ledger and rotation
    AlreadyContributed = 40,
    RotationInProgress = 41,
    AlreadyFunded = 42,
    InsufficientBalance = 43,
    EscrowFailed = 44,
    CampaignFailed = 45,
    ArithmeticOverflow = 46,

    // Social trust
    ListLengthMismatch = 50,
    TooManyCollaborators = 51,
    NotCollaborator = 52,
    AlreadyVerified = 53,
    SelfConnection = 54,
    ConnectionExists = 55,
    ProjectNotVerified = 56,
}
