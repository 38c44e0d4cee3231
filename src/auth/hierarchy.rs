//! Role hierarchy table
//!
//! A total mapping from roles to integer ranks, used exclusively for
//! delegation questions ("can role A provision or manage role B"), never for
//! resource permission lookups.

use crate::core::models::Role;
use crate::utils::error::{AppError, Result};
use std::collections::HashMap;

/// Delegation rank; higher means more authority. Ties are allowed and mean
/// equal standing.
pub type Rank = u8;

/// Immutable role-to-rank table.
///
/// Totality over [`Role`] is checked when the table is built; a missing role
/// is a configuration fault that aborts startup. After construction the
/// table is a dense array and lookups cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleHierarchy {
    ranks: [Rank; Role::ALL.len()],
}

impl RoleHierarchy {
    /// Build a table from an explicit role-to-rank map.
    ///
    /// Every declared role must be present; an unranked role is rejected
    /// here rather than silently defaulted at call time.
    pub fn from_ranks(ranks: &HashMap<Role, Rank>) -> Result<Self> {
        let mut table = [0u8; Role::ALL.len()];
        for role in Role::ALL {
            let rank = ranks.get(&role).ok_or_else(|| {
                AppError::config(format!("role '{}' has no hierarchy rank", role))
            })?;
            table[role.index()] = *rank;
        }
        Ok(Self { ranks: table })
    }

    /// Rank of a role
    pub fn rank_of(&self, role: Role) -> Rank {
        self.ranks[role.index()]
    }

    /// Whether `a` holds strictly more authority than `b`
    pub fn outranks(&self, a: Role, b: Role) -> bool {
        self.rank_of(a) > self.rank_of(b)
    }

    /// Whether `a` and `b` hold equal authority
    pub fn same_rank(&self, a: Role, b: Role) -> bool {
        self.rank_of(a) == self.rank_of(b)
    }
}

impl Default for RoleHierarchy {
    /// The club's standard delegation ladder.
    fn default() -> Self {
        let mut ranks = [0u8; Role::ALL.len()];
        ranks[Role::SuperAdmin.index()] = 6;
        ranks[Role::Admin.index()] = 5;
        ranks[Role::Manager.index()] = 4;
        ranks[Role::Trainer.index()] = 3;
        ranks[Role::Staff.index()] = 2;
        ranks[Role::Client.index()] = 1;
        ranks[Role::Member.index()] = 0;
        Self { ranks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ladder_orders_roles() {
        let h = RoleHierarchy::default();
        assert!(h.outranks(Role::SuperAdmin, Role::Admin));
        assert!(h.outranks(Role::Admin, Role::Manager));
        assert!(h.outranks(Role::Manager, Role::Trainer));
        assert!(h.outranks(Role::Trainer, Role::Staff));
        assert!(h.outranks(Role::Staff, Role::Client));
        assert!(h.outranks(Role::Client, Role::Member));
    }

    #[test]
    fn outranks_is_antisymmetric() {
        let h = RoleHierarchy::default();
        for a in Role::ALL {
            for b in Role::ALL {
                if h.outranks(a, b) {
                    assert!(!h.outranks(b, a), "{} and {} outrank each other", a, b);
                }
            }
        }
    }

    #[test]
    fn no_role_outranks_itself() {
        let h = RoleHierarchy::default();
        for role in Role::ALL {
            assert!(!h.outranks(role, role));
            assert!(h.same_rank(role, role));
        }
    }

    #[test]
    fn ties_mean_equal_standing() {
        let mut ranks = HashMap::new();
        for role in Role::ALL {
            ranks.insert(role, 1);
        }
        ranks.insert(Role::SuperAdmin, 2);
        let h = RoleHierarchy::from_ranks(&ranks).unwrap();

        assert!(h.same_rank(Role::Admin, Role::Manager));
        assert!(!h.outranks(Role::Admin, Role::Manager));
        assert!(!h.outranks(Role::Manager, Role::Admin));
        assert!(h.outranks(Role::SuperAdmin, Role::Admin));
    }

    #[test]
    fn missing_role_is_a_configuration_fault() {
        let mut ranks = HashMap::new();
        ranks.insert(Role::SuperAdmin, 6);
        ranks.insert(Role::Admin, 5);
        // staff and the rest left unranked on purpose
        let err = RoleHierarchy::from_ranks(&ranks).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("hierarchy rank"));
    }
}
