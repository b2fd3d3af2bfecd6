use diesel::prelude::*;

use crate::schema;

/// The two read paths write-access resolution depends on. Implemented for
/// `PgConnection`; tests substitute an in-memory source.
pub(crate) trait GrantSource {
    fn inventory_creator(&self, inventory: i32) -> QueryResult<Option<i32>>;
    fn has_access_grant(&self, user: i32, inventory: i32) -> QueryResult<bool>;
}

impl GrantSource for PgConnection {
    fn inventory_creator(&self, inventory: i32) -> QueryResult<Option<i32>> {
        use schema::inventories::dsl::*;

        inventories
            .filter(id.eq(inventory))
            .select(creator_id)
            .first::<i32>(self)
            .optional()
    }

    fn has_access_grant(&self, user: i32, inventory: i32) -> QueryResult<bool> {
        use schema::access_permissions::dsl::*;

        access_permissions
            .filter(user_id.eq(user).and(inventory_id.eq(inventory)))
            .select(id)
            .first::<i32>(self)
            .optional()
            .map(|row| row.is_some())
    }
}

/// Whether `user` may mutate items belonging to `inventory`.
///
/// Ownership wins outright; a delegated access grant is only consulted for
/// non-creators. An unknown inventory denies (fail closed) while a failed
/// lookup propagates as an error, never as a grant or a denial.
pub(crate) fn can_write<S: GrantSource>(
    source: &S,
    user: i32,
    inventory: i32,
) -> QueryResult<bool> {
    let creator = match source.inventory_creator(inventory)? {
        Some(creator) => creator,
        None => return Ok(false),
    };

    if creator == user {
        return Ok(true);
    }

    source.has_access_grant(user, inventory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error};
    use std::collections::{HashMap, HashSet};

    fn storage_error() -> Error {
        Error::DatabaseError(
            DatabaseErrorKind::UnableToSendCommand,
            Box::new("connection reset".to_string()),
        )
    }

    #[derive(Default)]
    struct MemGrants {
        creators: HashMap<i32, i32>,
        grants: HashSet<(i32, i32)>,
        broken: bool,
    }

    impl GrantSource for MemGrants {
        fn inventory_creator(&self, inventory: i32) -> QueryResult<Option<i32>> {
            if self.broken {
                return Err(storage_error());
            }
            Ok(self.creators.get(&inventory).copied())
        }

        fn has_access_grant(&self, user: i32, inventory: i32) -> QueryResult<bool> {
            if self.broken {
                return Err(storage_error());
            }
            Ok(self.grants.contains(&(user, inventory)))
        }
    }

    fn sample() -> MemGrants {
        // inv 1 created by user 10; user 20 holds a grant, user 30 nothing
        let mut source = MemGrants::default();
        source.creators.insert(1, 10);
        source.grants.insert((20, 1));
        source
    }

    #[test]
    fn creator_may_write() {
        assert!(can_write(&sample(), 10, 1).unwrap());
    }

    #[test]
    fn grant_holder_may_write() {
        assert!(can_write(&sample(), 20, 1).unwrap());
    }

    #[test]
    fn stranger_may_not_write() {
        assert!(!can_write(&sample(), 30, 1).unwrap());
    }

    #[test]
    fn unknown_inventory_denies_without_error() {
        assert!(!can_write(&sample(), 10, 99).unwrap());
    }

    #[test]
    fn lookup_failure_propagates() {
        let source = MemGrants {
            broken: true,
            ..MemGrants::default()
        };
        assert!(can_write(&source, 10, 1).is_err());
    }

    #[test]
    fn ownership_short_circuits_grant_lookup() {
        struct OwnerOnly;

        impl GrantSource for OwnerOnly {
            fn inventory_creator(&self, _inventory: i32) -> QueryResult<Option<i32>> {
                Ok(Some(10))
            }

            fn has_access_grant(&self, _user: i32, _inventory: i32) -> QueryResult<bool> {
                Err(storage_error())
            }
        }

        assert!(can_write(&OwnerOnly, 10, 1).unwrap());
    }
}
