//! Role changes inside a class.

use crate::models::{ClassMember, ClassRole, UserId};

/// A role transition an owner can apply to a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    /// MEMBER → ADMIN
    Promote,
    /// ADMIN → MEMBER
    Demote,
}

impl RoleChange {
    /// Trailing path segment of `PUT /classes/{id}/members/{userId}/...`
    pub fn path_segment(&self) -> &str {
        match self {
            RoleChange::Promote => "promote",
            RoleChange::Demote => "demote",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RoleChange::Promote => "Make admin",
            RoleChange::Demote => "Remove admin",
        }
    }

    pub fn resulting_role(&self) -> ClassRole {
        match self {
            RoleChange::Promote => ClassRole::Admin,
            RoleChange::Demote => ClassRole::Member,
        }
    }
}

/// The change the viewer may apply to `target`, if any.
///
/// Only an owner changes roles, never their own and never another owner's.
pub fn role_change(
    viewer_role: ClassRole,
    viewer_id: Option<UserId>,
    target_id: UserId,
    target_role: ClassRole,
) -> Option<RoleChange> {
    if viewer_role != ClassRole::Owner || viewer_id == Some(target_id) {
        return None;
    }
    match target_role {
        ClassRole::Owner => None,
        ClassRole::Admin => Some(RoleChange::Demote),
        ClassRole::Member => Some(RoleChange::Promote),
    }
}

pub fn role_change_for(
    viewer_role: ClassRole,
    viewer_id: Option<UserId>,
    member: &ClassMember,
) -> Option<RoleChange> {
    role_change(viewer_role, viewer_id, member.user_id, member.role)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWER: UserId = 1;
    const OTHER: UserId = 2;

    fn expected(viewer: ClassRole, target: ClassRole, is_self: bool) -> Option<RoleChange> {
        match (viewer, target, is_self) {
            (ClassRole::Owner, ClassRole::Member, false) => Some(RoleChange::Promote),
            (ClassRole::Owner, ClassRole::Admin, false) => Some(RoleChange::Demote),
            _ => None,
        }
    }

    #[test]
    fn test_all_role_combinations() {
        for viewer in ClassRole::ALL {
            for target in ClassRole::ALL {
                for is_self in [false, true] {
                    let target_id = if is_self { VIEWER } else { OTHER };
                    assert_eq!(
                        role_change(viewer, Some(VIEWER), target_id, target),
                        expected(viewer, target, is_self),
                        "viewer={viewer:?} target={target:?} self={is_self}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_unknown_viewer_id_is_never_self() {
        assert_eq!(
            role_change(ClassRole::Owner, None, OTHER, ClassRole::Member),
            Some(RoleChange::Promote)
        );
    }

    #[test]
    fn test_change_targets() {
        assert_eq!(RoleChange::Promote.path_segment(), "promote");
        assert_eq!(RoleChange::Demote.path_segment(), "demote");
        assert_eq!(RoleChange::Promote.resulting_role(), ClassRole::Admin);
        assert_eq!(RoleChange::Demote.resulting_role(), ClassRole::Member);

        let member = ClassMember {
            user_id: OTHER,
            username: "bo".into(),
            display_name: None,
            role: ClassRole::Admin,
        };
        assert_eq!(
            role_change_for(ClassRole::Owner, Some(VIEWER), &member),
            Some(RoleChange::Demote)
        );
    }
}
