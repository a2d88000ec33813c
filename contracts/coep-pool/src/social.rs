use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::constants::{MAX_COLLABORATORS, MAX_TITLE_LEN, MAX_URL_LEN};
use crate::errors::ContractError;
use crate::pool::{check_optional_text, check_text};
use crate::storage;
use crate::types::{Collaborator, Project, ProjectCounts, ProjectDraft, SocialConnection};

pub fn add_filmmaker_project(
    env: &Env,
    owner: Address,
    draft: ProjectDraft,
) -> Result<u32, ContractError> {
    owner.require_auth();

    check_text(&draft.title, MAX_TITLE_LEN, ContractError::InvalidTitle)?;
    check_optional_text(&draft.role, MAX_TITLE_LEN)?;
    check_optional_text(&draft.reference_url, MAX_URL_LEN)?;

    if draft.collaborators.len() != draft.collaborator_roles.len() {
        return Err(ContractError::ListLengthMismatch);
    }
    if draft.collaborators.len() > MAX_COLLABORATORS {
        return Err(ContractError::TooManyCollaborators);
    }
    if draft.start_time > draft.end_time {
        return Err(ContractError::InvalidTimeWindow);
    }

    let mut collaborators = Vec::new(env);
    for (identity, role) in draft.collaborators.iter().zip(draft.collaborator_roles.iter()) {
        if identity == owner {
            return Err(ContractError::SelfConnection);
        }
        collaborators.push_back(Collaborator {
            identity,
            role,
            verified: false,
        });
    }

    let project_id = storage::get_project_count(env, &owner) + 1;
    let project = Project {
        id: project_id,
        owner: owner.clone(),
        title: draft.title,
        project_type: draft.project_type,
        role: draft.role,
        collaborators,
        start_time: draft.start_time,
        end_time: draft.end_time,
        reference_url: draft.reference_url,
        created_at: env.ledger().sequence(),
    };

    storage::set_project(env, &project);
    storage::set_project_count(env, &owner, project_id);

    env.events()
        .publish((symbol_short!("proj_add"),), (owner, project_id));

    Ok(project_id)
}

/// A collaborator named on `owner`'s project confirms it happened.
pub fn verify_mutual_project(
    env: &Env,
    collaborator: Address,
    owner: Address,
    project_id: u32,
) -> Result<(), ContractError> {
    collaborator.require_auth();

    let mut project =
        storage::get_project(env, &owner, project_id).ok_or(ContractError::ProjectNotFound)?;

    let index = project
        .collaborators
        .iter()
        .position(|c| c.identity == collaborator)
        .ok_or(ContractError::NotCollaborator)? as u32;

    let mut entry = project
        .collaborators
        .get(index)
        .ok_or(ContractError::NotCollaborator)?;
    if entry.verified {
        return Err(ContractError::AlreadyVerified);
    }
    entry.verified = true;
    project.collaborators.set(index, entry);

    storage::set_project(env, &project);

    env.events()
        .publish((symbol_short!("proj_vrfy"),), (owner, project_id, collaborator));

    Ok(())
}

pub fn create_mutual_connection(
    env: &Env,
    initiator: Address,
    counterpart: Address,
    connection_type: Symbol,
    project_ids: Vec<u32>,
) -> Result<(), ContractError> {
    initiator.require_auth();

    if initiator == counterpart {
        return Err(ContractError::SelfConnection);
    }
    if project_ids.is_empty() {
        return Err(ContractError::NoVerifiedConnection);
    }
    if storage::get_connection(env, &initiator, &counterpart).is_some() {
        return Err(ContractError::ConnectionExists);
    }

    for project_id in project_ids.iter() {
        let project = storage::get_project(env, &initiator, project_id)
            .ok_or(ContractError::ProjectNotFound)?;
        let confirmed = project
            .collaborators
            .iter()
            .any(|c| c.identity == counterpart && c.verified);
        if !confirmed {
            return Err(ContractError::ProjectNotVerified);
        }
    }

    let (identity_a, identity_b) = storage::canonical_pair(&initiator, &counterpart);
    let connection = SocialConnection {
        identity_a,
        identity_b,
        initiator: initiator.clone(),
        connection_type: connection_type.clone(),
        mutual_projects: project_ids,
        created_at: env.ledger().sequence(),
    };

    storage::set_connection(env, &connection);
    storage::increment_connection_count(env, &initiator);
    storage::increment_connection_count(env, &counterpart);

    env.events().publish(
        (symbol_short!("conn_new"),),
        (initiator, counterpart, connection_type),
    );

    Ok(())
}

pub fn get_filmmaker_project(
    env: &Env,
    owner: Address,
    project_id: u32,
) -> Result<Project, ContractError> {
    storage::get_project(env, &owner, project_id).ok_or(ContractError::ProjectNotFound)
}

pub fn get_project_counts(env: &Env, owner: Address) -> ProjectCounts {
    ProjectCounts {
        projects: storage::get_project_count(env, &owner),
        connections: storage::get_connection_count(env, &owner),
    }
}

pub fn get_social_connection(env: &Env, a: Address, b: Address) -> Option<SocialConnection> {
    storage::get_connection(env, &a, &b)
}

/// True when `a` and `b` share a stored connection.
pub fn has_verified_connection(env: &Env, a: &Address, b: &Address) -> bool {
    storage::get_connection(env, a, b).is_some()
}

/// True when `a` and `b` share a connection listing any of `project_ids`.
pub fn connection_backed_by(env: &Env, a: &Address, b: &Address, project_ids: &Vec<u32>) -> bool {
    match storage::get_connection(env, a, b) {
        Some(connection) => project_ids
            .iter()
            .any(|id| connection.mutual_projects.contains(id)),
        None => false,
    }
}
