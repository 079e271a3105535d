// Static role-based access policy

use crate::core::error::AccessDenied;
use crate::models::user::Role;

/// Operations guarded by the gate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    AddUser,
    ListUsers,
}

impl Operation {
    /// Roles allowed to invoke this operation
    pub fn permitted_roles(&self) -> &'static [Role] {
        match self {
            Operation::AddUser => &[Role::Admin],
            Operation::ListUsers => &[Role::Admin, Role::Viewer],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::AddUser => "add_user",
            Operation::ListUsers => "list_users",
        }
    }
}

/// Who is making a request, as far as the gate is concerned
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    Authenticated { subject: String, roles: Vec<Role> },
}

impl Caller {
    pub fn subject(&self) -> &str {
        match self {
            Caller::Anonymous => "anonymous",
            Caller::Authenticated { subject, .. } => subject,
        }
    }
}

/// Permit when the caller's roles intersect the operation's permitted roles
pub fn authorize(operation: Operation, caller: &Caller) -> Result<(), AccessDenied> {
    match caller {
        Caller::Anonymous => Err(AccessDenied::Unauthenticated),
        Caller::Authenticated { roles, .. } => {
            let permitted = operation.permitted_roles();
            if roles.iter().any(|role| permitted.contains(role)) {
                Ok(())
            } else {
                Err(AccessDenied::Forbidden)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(roles: &[Role]) -> Caller {
        Caller::Authenticated {
            subject: "test".to_string(),
            roles: roles.to_vec(),
        }
    }

    #[test]
    fn test_add_user_admin_only() {
        assert_eq!(authorize(Operation::AddUser, &caller(&[Role::Admin])), Ok(()));
        assert_eq!(
            authorize(Operation::AddUser, &caller(&[Role::Viewer])),
            Err(AccessDenied::Forbidden)
        );
    }

    #[test]
    fn test_list_users_admin_or_viewer() {
        assert_eq!(authorize(Operation::ListUsers, &caller(&[Role::Admin])), Ok(()));
        assert_eq!(authorize(Operation::ListUsers, &caller(&[Role::Viewer])), Ok(()));
    }

    #[test]
    fn test_anonymous_is_unauthenticated() {
        for op in [Operation::AddUser, Operation::ListUsers] {
            assert_eq!(
                authorize(op, &Caller::Anonymous),
                Err(AccessDenied::Unauthenticated)
            );
        }
    }

    #[test]
    fn test_empty_role_set_is_forbidden() {
        assert_eq!(
            authorize(Operation::ListUsers, &caller(&[])),
            Err(AccessDenied::Forbidden)
        );
    }

    #[test]
    fn test_any_intersecting_role_permits() {
        assert_eq!(
            authorize(Operation::AddUser, &caller(&[Role::Viewer, Role::Admin])),
            Ok(())
        );
    }

    #[test]
    fn test_subject() {
        assert_eq!(Caller::Anonymous.subject(), "anonymous");
        assert_eq!(caller(&[Role::Admin]).subject(), "test");
    }
}
