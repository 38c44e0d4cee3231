//! Access control for the club platform
//!
//! This module provides the role- and ownership-based access engine used by
//! every privileged route handler and by the UI permission queries.
//!
//! The two inputs, the role hierarchy and the permission matrix, are built
//! from static configuration once at startup, validated eagerly, and frozen.
//! Changing policy is a config change plus restart (or a whole-table rebuild
//! swapped in atomically); there is no in-place mutation path.

pub mod facade;
pub mod hierarchy;
pub mod matrix;
pub mod rbac;

#[cfg(test)]
mod tests;

pub use facade::{PermissionFacade, PermissionSummary};
pub use hierarchy::{Rank, RoleHierarchy};
pub use matrix::PermissionMatrix;
pub use rbac::{AccessEngine, Action, Resource};

use crate::config::AccessConfig;
use crate::utils::error::Result;
use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Root of the access-control subsystem.
///
/// Owns the engine behind an atomically swappable reference: readers load a
/// consistent table set without locks, and a reload installs a freshly built
/// and validated engine in one step.
pub struct AccessControl {
    engine: ArcSwap<AccessEngine>,
    generation: AtomicU64,
}

impl AccessControl {
    /// Wrap an already-assembled engine.
    pub fn new(engine: AccessEngine) -> Self {
        Self {
            engine: ArcSwap::from_pointee(engine),
            generation: AtomicU64::new(0),
        }
    }

    /// Access control over the built-in tables.
    pub fn with_defaults() -> Self {
        Self::new(AccessEngine::default())
    }

    /// Build and validate the engine from configuration.
    ///
    /// A hierarchy override missing any declared role is rejected here, at
    /// startup, never discovered mid-request.
    pub fn from_config(config: &AccessConfig) -> Result<Self> {
        let engine = build_engine(config)?;
        info!("Access engine initialized");
        Ok(Self::new(engine))
    }

    /// Current engine snapshot.
    pub fn engine(&self) -> Arc<AccessEngine> {
        self.engine.load_full()
    }

    /// Table generation, bumped on every reload. Memo caches key on it.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Rebuild the tables from configuration and swap them in atomically.
    ///
    /// On validation failure the running engine stays untouched.
    pub fn reload(&self, config: &AccessConfig) -> Result<()> {
        let engine = build_engine(config)?;
        self.engine.store(Arc::new(engine));
        self.generation.fetch_add(1, Ordering::AcqRel);
        info!("Access engine reloaded");
        Ok(())
    }
}

fn build_engine(config: &AccessConfig) -> Result<AccessEngine> {
    let hierarchy = match &config.hierarchy {
        Some(ranks) => RoleHierarchy::from_ranks(ranks)?,
        None => RoleHierarchy::default(),
    };

    let mut matrix = PermissionMatrix::club_defaults();
    for rule in &config.extra_grants {
        matrix.grant(rule.role, rule.resource, &rule.actions);
    }

    Ok(AccessEngine::new(hierarchy, matrix))
}

#[cfg(test)]
mod control_tests {
    use super::*;
    use crate::config::GrantRule;
    use crate::core::models::Role;
    use std::collections::HashMap;

    #[test]
    fn defaults_build_without_config() {
        let control = AccessControl::with_defaults();
        assert!(control
            .engine()
            .has_permission(Role::Admin, Resource::Users, Action::Read));
    }

    #[test]
    fn extra_grants_extend_the_matrix() {
        let config = AccessConfig {
            hierarchy: None,
            extra_grants: vec![GrantRule {
                role: Role::Trainer,
                resource: Resource::Reports,
                actions: vec![Action::Read],
            }],
        };
        let control = AccessControl::from_config(&config).unwrap();
        assert!(control
            .engine()
            .has_permission(Role::Trainer, Resource::Reports, Action::Read));
        assert!(!control
            .engine()
            .has_permission(Role::Trainer, Resource::Reports, Action::Export));
    }

    #[test]
    fn partial_hierarchy_override_fails_at_build() {
        let mut ranks = HashMap::new();
        ranks.insert(Role::SuperAdmin, 9u8);
        let config = AccessConfig {
            hierarchy: Some(ranks),
            extra_grants: Vec::new(),
        };
        assert!(AccessControl::from_config(&config).is_err());
    }

    #[test]
    fn reload_swaps_tables_and_bumps_generation() {
        let control = AccessControl::with_defaults();
        let before = control.generation();
        assert!(!control
            .engine()
            .has_permission(Role::Staff, Resource::Analytics, Action::Read));

        let config = AccessConfig {
            hierarchy: None,
            extra_grants: vec![GrantRule {
                role: Role::Staff,
                resource: Resource::Analytics,
                actions: vec![Action::Read],
            }],
        };
        control.reload(&config).unwrap();

        assert_eq!(control.generation(), before + 1);
        assert!(control
            .engine()
            .has_permission(Role::Staff, Resource::Analytics, Action::Read));
    }

    #[test]
    fn failed_reload_keeps_the_running_engine() {
        let control = AccessControl::with_defaults();
        let before = control.generation();

        let mut ranks = HashMap::new();
        ranks.insert(Role::Admin, 1u8);
        let bad = AccessConfig {
            hierarchy: Some(ranks),
            extra_grants: Vec::new(),
        };
        assert!(control.reload(&bad).is_err());
        assert_eq!(control.generation(), before);
        assert!(control
            .engine()
            .has_permission(Role::Admin, Resource::Users, Action::Read));
    }
}
