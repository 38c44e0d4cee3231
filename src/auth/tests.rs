//! Access-control behavior tests
//!
//! Cross-module checks of the properties the engine is built around:
//! deny-by-default, hierarchy antisymmetry, ownership substitution limits,
//! and list/detail agreement.

use crate::auth::hierarchy::RoleHierarchy;
use crate::auth::matrix::PermissionMatrix;
use crate::auth::rbac::{AccessEngine, Action, Resource};
use crate::core::models::{ClientRecord, Role, ScheduleEntry};
use std::collections::HashMap;

fn custom_hierarchy() -> RoleHierarchy {
    let mut ranks = HashMap::new();
    ranks.insert(Role::SuperAdmin, 4u8);
    ranks.insert(Role::Admin, 3);
    ranks.insert(Role::Manager, 2);
    ranks.insert(Role::Trainer, 1);
    ranks.insert(Role::Staff, 1);
    ranks.insert(Role::Client, 0);
    ranks.insert(Role::Member, 0);
    RoleHierarchy::from_ranks(&ranks).expect("total ranks")
}

#[test]
fn unlisted_pairs_deny_every_action() {
    let engine = AccessEngine::default();

    // Admin holds users CRUD; trainer has no users row at all.
    assert!(engine.has_permission(Role::Admin, Resource::Users, Action::Delete));
    assert!(!engine.has_permission(Role::Trainer, Resource::Users, Action::Read));

    for action in Action::ALL {
        assert!(!engine.has_permission(Role::Trainer, Resource::Users, action));
        assert!(!engine.has_permission(Role::Member, Resource::Reports, action));
    }
}

#[test]
fn delegation_follows_ranks_strictly() {
    let engine = AccessEngine::new(custom_hierarchy(), PermissionMatrix::club_defaults());

    assert!(engine.can_manage_role(Role::Manager, Role::Trainer));
    assert!(!engine.can_manage_role(Role::Trainer, Role::Manager));
    assert!(!engine.can_manage_role(Role::Manager, Role::Manager));
    // Tied ranks get no manage rights in either direction.
    assert!(!engine.can_manage_role(Role::Trainer, Role::Staff));
    assert!(!engine.can_manage_role(Role::Staff, Role::Trainer));
}

#[test]
fn owned_client_record_is_updatable_without_blanket_grant() {
    let engine = AccessEngine::default();

    assert!(engine.can_access_object(Role::Trainer, "T1", Some("T1"), Resource::Clients, Action::Update));
    assert!(!engine.can_access_object(Role::Trainer, "T1", Some("T2"), Resource::Clients, Action::Update));
}

#[test]
fn trainer_sees_only_assigned_client_records() {
    let engine = AccessEngine::default();

    let mut c1 = ClientRecord::new("First");
    c1.trainer_id = Some("T1".into());
    let mut c2 = ClientRecord::new("Second");
    c2.trainer_id = Some("T2".into());

    let visible = engine.filter_by_permission(
        vec![c1.clone(), c2],
        Role::Trainer,
        "T1",
        Resource::Clients,
        |r| r.owner_for(Role::Trainer),
    );

    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, c1.id);
}

#[test]
fn schedule_filter_matches_object_verdicts_for_clients() {
    let engine = AccessEngine::default();
    let now = chrono::Utc::now();

    let mut own = ScheduleEntry::new("1:1", "T1", now, now + chrono::Duration::hours(1));
    own.client_id = Some("C1".into());
    let mut other = ScheduleEntry::new("1:1", "T1", now, now + chrono::Duration::hours(1));
    other.client_id = Some("C2".into());
    let open = ScheduleEntry::new("Class", "T2", now, now + chrono::Duration::hours(1));

    let entries = vec![own, other, open];
    let visible = engine.filter_by_permission(
        entries.clone(),
        Role::Client,
        "C1",
        Resource::Schedule,
        |e| e.owner_for(Role::Client),
    );

    for entry in &entries {
        let listed = visible.iter().any(|v| v.id == entry.id);
        let detail = engine.can_access_object(
            Role::Client,
            "C1",
            entry.owner_for(Role::Client),
            Resource::Schedule,
            Action::Read,
        );
        assert_eq!(listed, detail, "entry {} diverges between list and detail", entry.id);
    }
    assert_eq!(visible.len(), 1);
}

#[test]
fn incomplete_rank_table_never_defaults_to_zero() {
    let mut ranks = HashMap::new();
    ranks.insert(Role::Admin, 3u8);
    ranks.insert(Role::Manager, 2);

    // Building the table is the only place a rank can come from; a missing
    // role must surface as a configuration error, not as rank 0.
    assert!(RoleHierarchy::from_ranks(&ranks).is_err());
}

#[test]
fn ownership_branch_respects_the_self_service_boundary_everywhere() {
    let engine = AccessEngine::default();

    for role in Role::ALL {
        for resource in Resource::ALL {
            for action in Action::ALL {
                let own = engine.can_access_object(role, "X", Some("X"), resource, action);
                let blanket = engine.has_permission(role, resource, action);
                if own && !blanket {
                    assert!(
                        action.is_self_service(),
                        "{} gained non-self-service {} on {} through ownership",
                        role,
                        action,
                        resource
                    );
                }
                // The blanket branch is always honored.
                if blanket {
                    assert!(own);
                }
            }
        }
    }
}
