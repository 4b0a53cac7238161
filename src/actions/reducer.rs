//! Reducer over the user collection.

use super::types::Action;
use crate::error::Result;
use crate::types::UserList;

/// Apply an action to a snapshot, producing the next snapshot.
pub fn apply(state: &UserList, action: Action) -> UserList {
    match action {
        Action::Add(user) => {
            let mut users = Vec::with_capacity(state.users.len() + 1);
            users.extend(state.users.iter().cloned());
            users.push(user);
            UserList { users }
        }

        Action::Update(user) => {
            let users = state
                .users
                .iter()
                .map(|existing| {
                    if existing.id == user.id {
                        user.clone()
                    } else {
                        existing.clone()
                    }
                })
                .collect();
            UserList { users }
        }

        Action::Delete(id) => {
            let users = state.users.iter().filter(|u| u.id != id).cloned().collect();
            UserList { users }
        }
    }
}

/// Decode a raw JSON action and apply it.
///
/// Fails with `StoreError::InvalidAction` for any kind outside
/// `ADD_USER`/`UPDATE_USER`/`DELETE_USER`; no snapshot is produced then.
pub fn apply_raw(state: &UserList, raw: &str) -> Result<UserList> {
    let action = Action::from_json(raw)?;
    Ok(apply(state, action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::types::{User, UserId};

    fn ann() -> User {
        User::new("1", "Ann", "a@x.com")
    }

    fn bob() -> User {
        User::new("2", "Bob", "b@x.com")
    }

    #[test]
    fn test_add_appends() {
        let state = UserList::new();
        let state = apply(&state, Action::add(ann()));
        let state = apply(&state, Action::add(bob()));

        assert_eq!(state.users, vec![ann(), bob()]);
    }

    #[test]
    fn test_add_leaves_previous_snapshot_untouched() {
        let before = UserList::from(vec![ann()]);
        let after = apply(&before, Action::add(bob()));

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let state = UserList::from(vec![ann(), bob(), User::new("3", "Cy", "c@x.com")]);
        let renamed = User::new("2", "Robert", "robert@x.com");

        let state = apply(&state, Action::update(renamed.clone()));

        assert_eq!(state.users[0], ann());
        assert_eq!(state.users[1], renamed);
        assert_eq!(state.users[2].name, "Cy");
    }

    #[test]
    fn test_update_missing_is_noop() {
        let state = UserList::from(vec![ann(), bob()]);
        let next = apply(&state, Action::update(User::new("9", "Nobody", "n@x.com")));
        assert_eq!(next, state);
    }

    #[test]
    fn test_update_hits_every_duplicate() {
        let state = UserList::from(vec![ann(), User::new("1", "Ann2", "a2@x.com")]);
        let next = apply(&state, Action::update(User::new("1", "Z", "z@x.com")));

        assert_eq!(next.len(), 2);
        assert!(next.users.iter().all(|u| u.name == "Z"));
    }

    #[test]
    fn test_delete_removes_all_matches() {
        let state = UserList::from(vec![ann(), bob(), ann()]);
        let next = apply(&state, Action::delete("1"));
        assert_eq!(next.users, vec![bob()]);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let state = UserList::from(vec![ann()]);
        let next = apply(&state, Action::Delete(UserId::from("nope")));
        assert_eq!(next, state);
    }

    #[test]
    fn test_apply_raw() {
        let state = UserList::new();
        let state = apply_raw(
            &state,
            r#"{"type":"ADD_USER","payload":{"id":"1","name":"Ann","email":"a@x.com"}}"#,
        )
        .unwrap();
        assert_eq!(state.users, vec![ann()]);

        let result = apply_raw(&state, r#"{"type":"RESET","payload":null}"#);
        assert!(matches!(result, Err(StoreError::InvalidAction(_))));
    }
}
