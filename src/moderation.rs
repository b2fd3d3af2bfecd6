use diesel::prelude::*;
use serde::Deserialize;

use crate::schema;

/// The closed set of bulk moderation actions an admin may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum AdminAction {
    Block,
    Unblock,
    Delete,
    ToggleAdmin,
}

impl AdminAction {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            AdminAction::Block => "block",
            AdminAction::Unblock => "unblock",
            AdminAction::Delete => "delete",
            AdminAction::ToggleAdmin => "toggleAdmin",
        }
    }
}

/// User-directory operations the engine needs. Implemented for
/// `PgConnection`; tests substitute an in-memory directory.
pub(crate) trait ModerationStore {
    fn set_blocked(&self, targets: &[i32], blocked: bool) -> QueryResult<usize>;
    fn delete_users(&self, targets: &[i32]) -> QueryResult<usize>;
    fn admin_count(&self) -> QueryResult<i64>;
    fn admin_flag(&self, user: i32) -> QueryResult<Option<bool>>;
    fn set_admin(&self, user: i32, admin: bool) -> QueryResult<usize>;
}

impl ModerationStore for PgConnection {
    fn set_blocked(&self, targets: &[i32], blocked: bool) -> QueryResult<usize> {
        use schema::users::dsl::*;

        diesel::update(users.filter(id.eq_any(targets.to_vec())))
            .set(is_blocked.eq(blocked))
            .execute(self)
    }

    fn delete_users(&self, targets: &[i32]) -> QueryResult<usize> {
        use schema::users::dsl::*;

        diesel::delete(users.filter(id.eq_any(targets.to_vec()))).execute(self)
    }

    fn admin_count(&self) -> QueryResult<i64> {
        use schema::users::dsl::*;

        users.filter(is_admin.eq(true)).count().get_result(self)
    }

    fn admin_flag(&self, user: i32) -> QueryResult<Option<bool>> {
        use schema::users::dsl::*;

        users
            .filter(id.eq(user))
            .select(is_admin)
            .first::<bool>(self)
            .optional()
    }

    fn set_admin(&self, user: i32, admin: bool) -> QueryResult<usize> {
        use schema::users::dsl::*;

        diesel::update(users.filter(id.eq(user)))
            .set(is_admin.eq(admin))
            .execute(self)
    }
}

/// Per-batch result. Skipped ids are not reported to the client; the route
/// logs them instead.
#[derive(Debug, Default)]
pub(crate) struct BulkOutcome {
    pub(crate) skipped: Vec<i32>,
}

/// Applies one moderation action to a batch of user ids.
///
/// Block and unblock are single bulk updates and idempotent; an admin
/// blocking themselves is allowed. Delete always drops the acting admin's
/// own id from the batch first. ToggleAdmin goes id by id because each flip
/// depends on current state: a self-demotion is skipped while the
/// point-in-time admin count is at most one, and unknown ids are skipped
/// rather than failing the batch. Callers wanting the last-admin check to
/// be race-free must run this inside a serializable transaction.
pub(crate) fn apply_bulk_action<S: ModerationStore>(
    store: &S,
    action: AdminAction,
    targets: &[i32],
    acting_user: i32,
) -> QueryResult<BulkOutcome> {
    let mut outcome = BulkOutcome::default();

    match action {
        AdminAction::Block => {
            store.set_blocked(targets, true)?;
        }
        AdminAction::Unblock => {
            store.set_blocked(targets, false)?;
        }
        AdminAction::Delete => {
            let remaining = targets
                .iter()
                .copied()
                .filter(|target| *target != acting_user)
                .collect::<Vec<_>>();
            if !remaining.is_empty() {
                store.delete_users(&remaining)?;
            }
        }
        AdminAction::ToggleAdmin => {
            for &target in targets {
                if target == acting_user && store.admin_count()? <= 1 {
                    // The sole admin must not demote themselves.
                    outcome.skipped.push(target);
                    continue;
                }
                match store.admin_flag(target)? {
                    Some(admin) => {
                        store.set_admin(target, !admin)?;
                    }
                    None => outcome.skipped.push(target),
                }
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error};
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    #[derive(Clone, Copy)]
    struct Flags {
        admin: bool,
        blocked: bool,
    }

    struct MemUsers {
        users: RefCell<BTreeMap<i32, Flags>>,
        broken: bool,
    }

    impl MemUsers {
        fn new(entries: &[(i32, bool, bool)]) -> MemUsers {
            let users = entries
                .iter()
                .map(|&(id, admin, blocked)| (id, Flags { admin, blocked }))
                .collect();
            MemUsers {
                users: RefCell::new(users),
                broken: false,
            }
        }

        fn admin(&self, id: i32) -> bool {
            self.users.borrow()[&id].admin
        }

        fn blocked(&self, id: i32) -> bool {
            self.users.borrow()[&id].blocked
        }

        fn contains(&self, id: i32) -> bool {
            self.users.borrow().contains_key(&id)
        }
    }

    fn storage_error() -> Error {
        Error::DatabaseError(
            DatabaseErrorKind::UnableToSendCommand,
            Box::new("connection reset".to_string()),
        )
    }

    impl ModerationStore for MemUsers {
        fn set_blocked(&self, targets: &[i32], blocked: bool) -> QueryResult<usize> {
            if self.broken {
                return Err(storage_error());
            }
            let mut users = self.users.borrow_mut();
            let mut touched = 0;
            for target in targets {
                if let Some(flags) = users.get_mut(target) {
                    flags.blocked = blocked;
                    touched += 1;
                }
            }
            Ok(touched)
        }

        fn delete_users(&self, targets: &[i32]) -> QueryResult<usize> {
            if self.broken {
                return Err(storage_error());
            }
            let mut users = self.users.borrow_mut();
            let before = users.len();
            for target in targets {
                users.remove(target);
            }
            Ok(before - users.len())
        }

        fn admin_count(&self) -> QueryResult<i64> {
            if self.broken {
                return Err(storage_error());
            }
            Ok(self.users.borrow().values().filter(|f| f.admin).count() as i64)
        }

        fn admin_flag(&self, user: i32) -> QueryResult<Option<bool>> {
            if self.broken {
                return Err(storage_error());
            }
            Ok(self.users.borrow().get(&user).map(|f| f.admin))
        }

        fn set_admin(&self, user: i32, admin: bool) -> QueryResult<usize> {
            if self.broken {
                return Err(storage_error());
            }
            let mut users = self.users.borrow_mut();
            match users.get_mut(&user) {
                Some(flags) => {
                    flags.admin = admin;
                    Ok(1)
                }
                None => Ok(0),
            }
        }
    }

    #[test]
    fn block_sets_flag_for_every_target() {
        let store = MemUsers::new(&[(1, true, false), (2, false, false), (3, false, false)]);
        apply_bulk_action(&store, AdminAction::Block, &[2, 3], 1).unwrap();
        assert!(store.blocked(2));
        assert!(store.blocked(3));
        assert!(!store.blocked(1));
    }

    #[test]
    fn block_is_idempotent() {
        let store = MemUsers::new(&[(1, true, false), (2, false, true)]);
        apply_bulk_action(&store, AdminAction::Block, &[2], 1).unwrap();
        assert!(store.blocked(2));
        apply_bulk_action(&store, AdminAction::Block, &[2], 1).unwrap();
        assert!(store.blocked(2));
    }

    #[test]
    fn unblock_clears_flag() {
        let store = MemUsers::new(&[(1, true, false), (2, false, true)]);
        apply_bulk_action(&store, AdminAction::Unblock, &[2], 1).unwrap();
        assert!(!store.blocked(2));
    }

    #[test]
    fn admin_may_block_themselves() {
        let store = MemUsers::new(&[(1, true, false)]);
        apply_bulk_action(&store, AdminAction::Block, &[1], 1).unwrap();
        assert!(store.blocked(1));
    }

    #[test]
    fn delete_never_removes_the_acting_admin() {
        let store = MemUsers::new(&[(1, true, false), (2, false, false), (3, false, false)]);
        apply_bulk_action(&store, AdminAction::Delete, &[1, 2, 3], 1).unwrap();
        assert!(store.contains(1));
        assert!(!store.contains(2));
        assert!(!store.contains(3));
    }

    #[test]
    fn delete_targeting_only_self_is_a_successful_noop() {
        let store = MemUsers::new(&[(1, true, false)]);
        apply_bulk_action(&store, AdminAction::Delete, &[1], 1).unwrap();
        assert!(store.contains(1));
    }

    #[test]
    fn sole_admin_self_toggle_is_skipped() {
        let store = MemUsers::new(&[(1, true, false), (2, false, false)]);
        let outcome = apply_bulk_action(&store, AdminAction::ToggleAdmin, &[1], 1).unwrap();
        assert!(store.admin(1));
        assert_eq!(store.admin_count().unwrap(), 1);
        assert_eq!(outcome.skipped, vec![1]);
    }

    #[test]
    fn self_toggle_with_another_admin_demotes() {
        let store = MemUsers::new(&[(1, true, false), (2, true, false)]);
        let outcome = apply_bulk_action(&store, AdminAction::ToggleAdmin, &[1], 1).unwrap();
        assert!(!store.admin(1));
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn mixed_batch_skips_sole_admin_and_promotes_the_rest() {
        let store = MemUsers::new(&[(1, true, false), (2, false, false), (3, false, false)]);
        let outcome = apply_bulk_action(&store, AdminAction::ToggleAdmin, &[1, 2, 3], 1).unwrap();
        assert!(store.admin(1));
        assert!(store.admin(2));
        assert!(store.admin(3));
        assert_eq!(store.admin_count().unwrap(), 3);
        assert_eq!(outcome.skipped, vec![1]);
    }

    #[test]
    fn unknown_target_is_skipped_not_fatal() {
        let store = MemUsers::new(&[(1, true, false), (2, false, false)]);
        let outcome = apply_bulk_action(&store, AdminAction::ToggleAdmin, &[99, 2], 1).unwrap();
        assert!(store.admin(2));
        assert_eq!(outcome.skipped, vec![99]);
    }

    #[test]
    fn store_failure_propagates() {
        let store = MemUsers {
            users: RefCell::new(BTreeMap::new()),
            broken: true,
        };
        assert!(apply_bulk_action(&store, AdminAction::Block, &[1], 1).is_err());
        assert!(apply_bulk_action(&store, AdminAction::ToggleAdmin, &[1], 2).is_err());
    }

    #[test]
    fn action_names_follow_the_wire_format() {
        assert_eq!(
            serde_json::from_str::<AdminAction>("\"toggleAdmin\"").unwrap(),
            AdminAction::ToggleAdmin
        );
        assert_eq!(AdminAction::ToggleAdmin.as_str(), "toggleAdmin");
        assert_eq!(AdminAction::Block.as_str(), "block");
        assert!(serde_json::from_str::<AdminAction>("\"obliterate\"").is_err());
    }
}
