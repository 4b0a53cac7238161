//! Form drafts: raw field input turned into records.
//!
//! Each form keeps its in-progress values in one struct. A successful
//! submit resets the whole struct; a failed one leaves it as typed.

use crate::actions::Action;
use crate::error::{Result, StoreError};
use crate::ids::IdGenerator;
use crate::types::{Student, User};

/// Trimmed value of a required field. Whitespace-only input counts as empty.
fn required(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Draft of the "Add User" form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
}

impl UserDraft {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }

    /// Build an `Add` action with a fresh id, then clear the draft.
    ///
    /// Leading and trailing whitespace is trimmed from `name` and `email`
    /// before they are stored, and a field that is empty after trimming is
    /// rejected with `StoreError::MissingField`.
    pub fn submit(&mut self, ids: &dyn IdGenerator) -> Result<Action> {
        let name = required("name", &self.name)?;
        let email = required("email", &self.email)?;

        let user = User {
            id: ids.next_id(),
            name,
            email,
        };
        *self = Self::default();
        Ok(Action::Add(user))
    }
}

/// Draft of the student form. `age` holds the raw text of the number field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub age: String,
    pub grade: String,
}

impl StudentDraft {
    /// Build a `Student`, then clear the draft. All fields are trimmed and
    /// required; `age` must parse as a whole number.
    pub fn submit(&mut self) -> Result<Student> {
        let first_name = required("first_name", &self.first_name)?;
        let last_name = required("last_name", &self.last_name)?;
        let age_text = required("age", &self.age)?;
        let grade = required("grade", &self.grade)?;

        let age = age_text
            .parse::<u32>()
            .map_err(|e| StoreError::InvalidField {
                field: "age",
                reason: e.to_string(),
            })?;

        *self = Self::default();
        Ok(Student {
            first_name,
            last_name,
            age,
            grade,
        })
    }
}
