//! Business logic services

pub mod approvals;
pub mod auth;
pub mod borrows;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub borrows: borrows::BorrowsService,
    pub approvals: approvals::ApprovalsService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            borrows: borrows::BorrowsService::new(repository.clone()),
            approvals: approvals::ApprovalsService::new(repository.clone()),
            repository,
        }
    }
}
