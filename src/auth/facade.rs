//! View-layer permission facade
//!
//! A thin, memoizing adapter over the decision engine for the presentation
//! layer: cheap repeated queries ("can I edit this trainer's profile") and a
//! serializable summary the UI uses to hide or disable affordances. Every
//! answer is derived from the engine; the facade encodes no policy of its
//! own, so UI and server can never disagree.

use crate::auth::rbac::{Action, Resource};
use crate::auth::AccessControl;
use crate::core::models::{Principal, Role};
use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Memo key: the full query tuple plus the table generation, so a reloaded
/// table set never serves stale verdicts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QueryKey {
    generation: u64,
    principal_id: String,
    role: Role,
    resource: Resource,
    action: Action,
    owner_id: Option<String>,
}

/// Memoized permission queries for the presentation layer.
pub struct PermissionFacade {
    control: Arc<AccessControl>,
    memo: DashMap<QueryKey, bool>,
}

impl PermissionFacade {
    /// Create a facade over the given access control root.
    pub fn new(control: Arc<AccessControl>) -> Self {
        Self {
            control,
            memo: DashMap::new(),
        }
    }

    /// Whether the principal holds a blanket grant for the action.
    pub fn can(&self, principal: &Principal, resource: Resource, action: Action) -> bool {
        self.query(principal, None, resource, action)
    }

    /// Whether the principal may touch a specific object.
    pub fn can_touch(
        &self,
        principal: &Principal,
        owner_id: Option<&str>,
        resource: Resource,
        action: Action,
    ) -> bool {
        self.query(principal, owner_id, resource, action)
    }

    /// Roles the principal may provision.
    pub fn creatable_roles(&self, principal: &Principal) -> Vec<Role> {
        self.control.engine().creatable_roles_for(principal.role)
    }

    /// Full permission grid for the principal, for UI consumption.
    pub fn summary_for(&self, principal: &Principal) -> PermissionSummary {
        let engine = self.control.engine();

        let mut grants = BTreeMap::new();
        for resource in Resource::ALL {
            let mut actions: Vec<String> = engine
                .matrix()
                .actions_of(principal.role, resource)
                .iter()
                .map(|a| a.to_string())
                .collect();
            actions.sort();
            if !actions.is_empty() {
                grants.insert(resource.to_string(), actions);
            }
        }

        PermissionSummary {
            principal_id: principal.id.clone(),
            role: principal.role,
            grants,
            creatable_roles: engine.creatable_roles_for(principal.role),
        }
    }

    fn query(
        &self,
        principal: &Principal,
        owner_id: Option<&str>,
        resource: Resource,
        action: Action,
    ) -> bool {
        let key = QueryKey {
            generation: self.control.generation(),
            principal_id: principal.id.clone(),
            role: principal.role,
            resource,
            action,
            owner_id: owner_id.map(str::to_string),
        };
        if let Some(verdict) = self.memo.get(&key) {
            return *verdict;
        }
        let verdict = self.control.engine().can_access_object(
            principal.role,
            &principal.id,
            owner_id,
            resource,
            action,
        );
        self.memo.insert(key, verdict);
        verdict
    }
}

/// Serializable permission grid for a principal.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionSummary {
    /// Principal the summary was computed for
    pub principal_id: String,
    /// Role carried by the session
    pub role: Role,
    /// Resource name to granted action names; resources with no grants are
    /// omitted
    pub grants: BTreeMap<String, Vec<String>>,
    /// Roles the principal may provision
    pub creatable_roles: Vec<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AccessControl;

    fn facade() -> PermissionFacade {
        PermissionFacade::new(Arc::new(AccessControl::with_defaults()))
    }

    #[test]
    fn facade_agrees_with_engine() {
        let facade = facade();
        let engine = facade.control.engine();
        let trainer = Principal::new("T1", Role::Trainer);

        for resource in Resource::ALL {
            for action in Action::ALL {
                assert_eq!(
                    facade.can(&trainer, resource, action),
                    engine.can_access_object(Role::Trainer, "T1", None, resource, action),
                );
                assert_eq!(
                    facade.can_touch(&trainer, Some("T1"), resource, action),
                    engine.can_access_object(Role::Trainer, "T1", Some("T1"), resource, action),
                );
            }
        }
    }

    #[test]
    fn memoized_answers_are_stable() {
        let facade = facade();
        let admin = Principal::new("A1", Role::Admin);

        let first = facade.can(&admin, Resource::Users, Action::Delete);
        let second = facade.can(&admin, Resource::Users, Action::Delete);
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn summary_reflects_matrix_and_hierarchy() {
        let facade = facade();
        let manager = Principal::new("M1", Role::Manager);

        let summary = facade.summary_for(&manager);
        assert_eq!(summary.role, Role::Manager);
        assert!(summary.grants.contains_key("schedule"));
        assert!(!summary.grants.contains_key("system"));
        assert!(summary.creatable_roles.contains(&Role::Trainer));
        assert!(!summary.creatable_roles.contains(&Role::Manager));
    }

    #[test]
    fn member_summary_is_ownership_only() {
        let facade = facade();
        let member = Principal::new("M9", Role::Member);

        let summary = facade.summary_for(&member);
        assert!(summary.grants.is_empty());
        assert!(summary.creatable_roles.is_empty());
        // Self-service still works through the object query.
        assert!(facade.can_touch(&member, Some("M9"), Resource::Users, Action::Update));
    }
}
