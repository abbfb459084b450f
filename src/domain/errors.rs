use super::models::CommitteeName;

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    ApplicationsClosed,
    AlreadyInCommittee,
    NotACommitteeHead,
    OtherCommittee(CommitteeName),
    NotPending,
    AdminOnly,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::ApplicationsClosed => {
                write!(f, "Committee applications are closed")
            }
            DomainError::AlreadyInCommittee => {
                write!(f, "You can only apply to one committee")
            }
            DomainError::NotACommitteeHead => {
                write!(f, "Only a committee head can do that")
            }
            DomainError::OtherCommittee(committee) => {
                write!(f, "You can only manage the {} committee", committee)
            }
            DomainError::NotPending => {
                write!(f, "That application is not pending")
            }
            DomainError::AdminOnly => {
                write!(f, "Only an admin can do that")
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
