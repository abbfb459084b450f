//! Membership rules and view selection for the committee workflow.
//!
//! The guards here mirror the server's rules so the interface can
//! disable or hide controls before a request is ever made. The server
//! stays authoritative: a guard rejection is a local message, and a
//! guard pass still means the server may refuse.

use super::errors::{DomainError, DomainResult};
use super::models::{CommitteeName, CommitteeRole, CommitteeState, MembershipStatus};

/// The role-derived panel a signed-in user sees on the committee screen.
///
/// Exactly one variant applies at a time. Admin access is carried
/// separately in [`CommitteeView`] because an admin keeps the admin
/// panel regardless of their own membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolePanel {
    /// Head of a committee: roster management and co-head assignment
    Head { committee: CommitteeName },
    /// Co-head of a committee: informational panel only
    CoHead { committee: CommitteeName },
    /// Applicant or approved member: informational panel only
    Member {
        committee: CommitteeName,
        status: MembershipStatus,
    },
    /// No membership and applications are possible: the committee grid
    ApplicantGrid,
    /// No membership and applications are closed
    Closed,
}

/// The complete committee screen selection for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitteeView {
    /// Whether the assign-head admin panel is shown in addition to `panel`
    pub admin: bool,
    pub panel: RolePanel,
}

/// Selects the committee view for the given state and admin flag.
///
/// Precedence: a held role (head, co-head, member) always wins over the
/// applicant grid; with no role the grid is shown while registration is
/// open or the user is an admin, and the closed notice otherwise. A
/// membership record missing its committee name is treated as no role;
/// [`can_apply`] still rejects for it, so no apply can slip through.
pub fn select_view(state: &CommitteeState, is_admin: bool) -> CommitteeView {
    let panel = match (state.my.role, state.my.committee_name) {
        (Some(CommitteeRole::Head), Some(committee)) => RolePanel::Head { committee },
        (Some(CommitteeRole::CoHead), Some(committee)) => RolePanel::CoHead { committee },
        (Some(CommitteeRole::Member), Some(committee)) => RolePanel::Member {
            committee,
            status: state.my.status.unwrap_or(MembershipStatus::Pending),
        },
        _ => {
            if state.is_committee_reg_open || is_admin {
                RolePanel::ApplicantGrid
            } else {
                RolePanel::Closed
            }
        }
    };

    CommitteeView {
        admin: is_admin,
        panel,
    }
}

/// Checks whether the user may apply to a committee.
///
/// A user holding any membership, pending or approved, in any
/// committee may not apply again. With no membership, applying needs
/// open registration unless the user is an admin.
pub fn can_apply(state: &CommitteeState, is_admin: bool) -> DomainResult<()> {
    if state.my.role.is_some() || state.my.committee_id.is_some() {
        return Err(DomainError::AlreadyInCommittee);
    }
    if !state.is_committee_reg_open && !is_admin {
        return Err(DomainError::ApplicationsClosed);
    }
    Ok(())
}

/// Checks whether the user may approve the given membership.
///
/// Only the head of a committee approves, and only applications that
/// are currently pending in their own roster.
pub fn can_approve(state: &CommitteeState, membership_id: u64) -> DomainResult<()> {
    if state.my.role != Some(CommitteeRole::Head) {
        return Err(DomainError::NotACommitteeHead);
    }
    let pending = state
        .pending_applicants
        .iter()
        .any(|a| a.membership_id == membership_id && a.status == MembershipStatus::Pending);
    if !pending {
        return Err(DomainError::NotPending);
    }
    Ok(())
}

/// Checks whether the user may assign a committee head.
///
/// Head assignment is an admin action on any committee; assigning over
/// an existing head replaces that head.
///
/// # Examples
///
/// ```
/// use utsav::domain::can_assign_head;
///
/// assert!(can_assign_head(true).is_ok());
/// assert!(can_assign_head(false).is_err());
/// ```
pub fn can_assign_head(is_admin: bool) -> DomainResult<()> {
    if is_admin {
        Ok(())
    } else {
        Err(DomainError::AdminOnly)
    }
}

/// Checks whether the user may assign a co-head for `committee`.
///
/// Only the head of that same committee may do so; assigning over an
/// existing co-head replaces them.
pub fn can_assign_cohead(state: &CommitteeState, committee: CommitteeName) -> DomainResult<()> {
    if state.my.role != Some(CommitteeRole::Head) {
        return Err(DomainError::NotACommitteeHead);
    }
    match state.my.committee_name {
        Some(own) if own == committee => Ok(()),
        Some(own) => Err(DomainError::OtherCommittee(own)),
        None => Err(DomainError::NotACommitteeHead),
    }
}

/// Render state of one committee's control in the applicant grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyControl {
    /// No membership anywhere and applying is allowed
    Apply,
    /// This committee holds the user's pending application
    Applied,
    /// This committee holds the user's approved membership
    Joined,
    /// Applying is not allowed here
    Disabled,
}

impl ApplyControl {
    pub fn label(&self) -> &'static str {
        match self {
            ApplyControl::Apply | ApplyControl::Disabled => "Apply",
            ApplyControl::Applied => "Applied",
            ApplyControl::Joined => "Joined",
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ApplyControl::Apply)
    }
}

/// Computes the apply control for one grid row.
///
/// The row for the user's own membership reads `Applied` while
/// pending and `Joined` once approved; every other row is enabled only
/// when [`can_apply`] passes.
pub fn apply_control(state: &CommitteeState, is_admin: bool, committee_id: u64) -> ApplyControl {
    if state.my.committee_id == Some(committee_id) {
        return match state.my.status {
            Some(MembershipStatus::Approved) => ApplyControl::Joined,
            _ => ApplyControl::Applied,
        };
    }
    match can_apply(state, is_admin) {
        Ok(()) => ApplyControl::Apply,
        Err(_) => ApplyControl::Disabled,
    }
}

/// Trims role strings, drops empties, and removes duplicates while
/// keeping first-seen order.
///
/// # Examples
///
/// ```
/// use utsav::domain::normalize_roles;
///
/// let roles = vec![" ADMIN ".to_string(), "".to_string(), "ADMIN".to_string()];
/// assert_eq!(normalize_roles(&roles), vec!["ADMIN".to_string()]);
/// ```
pub fn normalize_roles(roles: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for role in roles {
        let trimmed = role.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !normalized.iter().any(|existing| existing == trimmed) {
            normalized.push(trimmed.to_string());
        }
    }
    normalized
}

/// Whether the normalized role list contains `target`.
///
/// # Examples
///
/// ```
/// use utsav::domain::has_role;
///
/// let roles = vec!["  ADMIN ".to_string()];
/// assert!(has_role(&roles, "ADMIN"));
/// assert!(!has_role(&roles, "BRANCH_REP"));
/// ```
pub fn has_role(roles: &[String], target: &str) -> bool {
    normalize_roles(roles).iter().any(|role| role == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Applicant, CommitteeSummary, MyMembership};

    fn committee(id: u64, name: CommitteeName) -> CommitteeSummary {
        CommitteeSummary {
            id,
            name,
            head: None,
            co_head: None,
            member_count: 0,
        }
    }

    fn applicant(membership_id: u64, status: MembershipStatus) -> Applicant {
        Applicant {
            membership_id,
            user_id: membership_id + 100,
            name: Some(format!("user-{}", membership_id)),
            email: format!("user-{}@example.com", membership_id),
            phone_number: None,
            status,
        }
    }

    fn base_state(open: bool) -> CommitteeState {
        CommitteeState {
            is_committee_reg_open: open,
            committees: vec![
                committee(1, CommitteeName::Media),
                committee(2, CommitteeName::Digital),
            ],
            my: MyMembership::default(),
            pending_applicants: Vec::new(),
            approved_members: Vec::new(),
        }
    }

    fn member_state(open: bool, status: MembershipStatus) -> CommitteeState {
        let mut state = base_state(open);
        state.my = MyMembership {
            role: Some(CommitteeRole::Member),
            committee_id: Some(1),
            committee_name: Some(CommitteeName::Media),
            status: Some(status),
        };
        state
    }

    fn head_state() -> CommitteeState {
        let mut state = base_state(true);
        state.my = MyMembership {
            role: Some(CommitteeRole::Head),
            committee_id: Some(1),
            committee_name: Some(CommitteeName::Media),
            status: Some(MembershipStatus::Approved),
        };
        state.pending_applicants = vec![applicant(7, MembershipStatus::Pending)];
        state.approved_members = vec![applicant(8, MembershipStatus::Approved)];
        state
    }

    #[test]
    fn test_apply_requires_open_registration() {
        assert!(can_apply(&base_state(true), false).is_ok());
        assert_eq!(
            can_apply(&base_state(false), false),
            Err(DomainError::ApplicationsClosed)
        );
        // Admins may apply while registration is closed
        assert!(can_apply(&base_state(false), true).is_ok());
    }

    #[test]
    fn test_apply_blocked_by_existing_membership() {
        let pending = member_state(true, MembershipStatus::Pending);
        assert_eq!(
            can_apply(&pending, false),
            Err(DomainError::AlreadyInCommittee)
        );

        let approved = member_state(true, MembershipStatus::Approved);
        assert_eq!(
            can_apply(&approved, false),
            Err(DomainError::AlreadyInCommittee)
        );

        // Membership wins over the closed check, and over admin access
        let closed = member_state(false, MembershipStatus::Pending);
        assert_eq!(
            can_apply(&closed, true),
            Err(DomainError::AlreadyInCommittee)
        );

        // A membership record without a role still counts
        let mut odd = base_state(true);
        odd.my.committee_id = Some(2);
        assert_eq!(can_apply(&odd, false), Err(DomainError::AlreadyInCommittee));
    }

    #[test]
    fn test_approve_requires_head() {
        let state = base_state(true);
        assert_eq!(
            can_approve(&state, 7),
            Err(DomainError::NotACommitteeHead)
        );

        let member = member_state(true, MembershipStatus::Approved);
        assert_eq!(
            can_approve(&member, 7),
            Err(DomainError::NotACommitteeHead)
        );
    }

    #[test]
    fn test_approve_requires_pending_membership() {
        let state = head_state();
        assert!(can_approve(&state, 7).is_ok());
        assert_eq!(can_approve(&state, 999), Err(DomainError::NotPending));
        // An already approved member cannot be approved again
        assert_eq!(can_approve(&state, 8), Err(DomainError::NotPending));
    }

    #[test]
    fn test_assign_cohead_own_committee_only() {
        let state = head_state();
        assert!(can_assign_cohead(&state, CommitteeName::Media).is_ok());
        assert_eq!(
            can_assign_cohead(&state, CommitteeName::Digital),
            Err(DomainError::OtherCommittee(CommitteeName::Media))
        );

        let member = member_state(true, MembershipStatus::Approved);
        assert_eq!(
            can_assign_cohead(&member, CommitteeName::Media),
            Err(DomainError::NotACommitteeHead)
        );
    }

    #[test]
    fn test_view_precedence_roles_over_grid() {
        let head = head_state();
        assert_eq!(
            select_view(&head, false).panel,
            RolePanel::Head {
                committee: CommitteeName::Media
            }
        );

        let mut cohead = base_state(true);
        cohead.my = MyMembership {
            role: Some(CommitteeRole::CoHead),
            committee_id: Some(2),
            committee_name: Some(CommitteeName::Digital),
            status: Some(MembershipStatus::Approved),
        };
        assert_eq!(
            select_view(&cohead, false).panel,
            RolePanel::CoHead {
                committee: CommitteeName::Digital
            }
        );

        let member = member_state(true, MembershipStatus::Pending);
        assert_eq!(
            select_view(&member, false).panel,
            RolePanel::Member {
                committee: CommitteeName::Media,
                status: MembershipStatus::Pending
            }
        );
    }

    #[test]
    fn test_view_grid_and_closed() {
        assert_eq!(
            select_view(&base_state(true), false).panel,
            RolePanel::ApplicantGrid
        );
        assert_eq!(
            select_view(&base_state(false), false).panel,
            RolePanel::Closed
        );
        // Admins see the grid even while registration is closed
        assert_eq!(
            select_view(&base_state(false), true).panel,
            RolePanel::ApplicantGrid
        );
    }

    #[test]
    fn test_view_admin_flag_is_orthogonal() {
        let head = head_state();
        let view = select_view(&head, true);
        assert!(view.admin);
        assert_eq!(
            view.panel,
            RolePanel::Head {
                committee: CommitteeName::Media
            }
        );

        let view = select_view(&base_state(true), false);
        assert!(!view.admin);
    }

    #[test]
    fn test_view_membership_without_committee_name() {
        let mut state = base_state(true);
        state.my.role = Some(CommitteeRole::Head);
        // Falls back to the grid, and the guard still refuses an apply
        assert_eq!(select_view(&state, false).panel, RolePanel::ApplicantGrid);
        assert_eq!(can_apply(&state, false), Err(DomainError::AlreadyInCommittee));
    }

    #[test]
    fn test_apply_control_for_own_row() {
        let pending = member_state(true, MembershipStatus::Pending);
        assert_eq!(apply_control(&pending, false, 1), ApplyControl::Applied);
        assert!(!apply_control(&pending, false, 1).is_enabled());
        assert_eq!(apply_control(&pending, false, 1).label(), "Applied");

        let approved = member_state(true, MembershipStatus::Approved);
        assert_eq!(apply_control(&approved, false, 1), ApplyControl::Joined);
    }

    #[test]
    fn test_apply_control_for_other_rows() {
        let state = base_state(true);
        assert_eq!(apply_control(&state, false, 1), ApplyControl::Apply);
        assert!(apply_control(&state, false, 1).is_enabled());

        // Holding a membership disables every other row
        let pending = member_state(true, MembershipStatus::Pending);
        assert_eq!(apply_control(&pending, false, 2), ApplyControl::Disabled);

        // Closed registration disables the grid for non-admins
        let closed = base_state(false);
        assert_eq!(apply_control(&closed, false, 1), ApplyControl::Disabled);
        assert_eq!(apply_control(&closed, true, 1), ApplyControl::Apply);
    }

    #[test]
    fn test_normalize_roles() {
        let roles = vec![
            " ADMIN ".to_string(),
            "".to_string(),
            "ADMIN".to_string(),
            "JURY".to_string(),
        ];
        assert_eq!(
            normalize_roles(&roles),
            vec!["ADMIN".to_string(), "JURY".to_string()]
        );
        assert!(has_role(&roles, "JURY"));
        assert!(!has_role(&roles, "HEAD"));
    }
}
