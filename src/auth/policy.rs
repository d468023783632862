use crate::model::role::Role;

/// Token-gated operations. Registration is open to anyone and never reaches
/// this table.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Action {
    MarkAttendance,
    ViewOwnAttendance,
    ViewAbsentees,
    DailySummary,
    ListStaff,
    DeleteStaff,
    AttendancePercentage,
}

/// Pure role/action decision. A deny here is FORBIDDEN, not UNAUTHENTICATED.
pub fn allowed(role: Role, action: Action) -> bool {
    match action {
        Action::MarkAttendance | Action::ViewOwnAttendance => role == Role::Staff,
        Action::ViewAbsentees
        | Action::DailySummary
        | Action::ListStaff
        | Action::DeleteStaff
        | Action::AttendancePercentage => role == Role::Admin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_actions_are_staff_only() {
        for action in [Action::MarkAttendance, Action::ViewOwnAttendance] {
            assert!(allowed(Role::Staff, action));
            assert!(!allowed(Role::Admin, action));
        }
    }

    #[test]
    fn admin_actions_are_admin_only() {
        for action in [
            Action::ViewAbsentees,
            Action::DailySummary,
            Action::ListStaff,
            Action::DeleteStaff,
            Action::AttendancePercentage,
        ] {
            assert!(allowed(Role::Admin, action));
            assert!(!allowed(Role::Staff, action));
        }
    }
}
