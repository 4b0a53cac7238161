//! Plain-text views of snapshots.

use crate::types::{StudentTable, UserList};

/// Render the user list: one `name - email` line per user.
pub fn render_user_list(list: &UserList) -> String {
    let mut out = String::from("User List\n");
    if list.is_empty() {
        out.push_str("No users found.\n");
        return out;
    }
    for user in &list.users {
        out.push_str(&format!("{} - {}\n", user.name, user.email));
    }
    out
}

/// Render the student table as tab-separated rows under a header.
pub fn render_student_table(table: &StudentTable) -> String {
    let mut out = String::from("First Name\tLast Name\tAge\tGrade\n");
    for s in &table.students {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            s.first_name, s.last_name, s.age, s.grade
        ));
    }
    out
}
