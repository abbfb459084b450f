use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitteeName {
    Media,
    SocialMedia,
    Thorana,
    EventManagement,
    Accommodation,
    Digital,
    Inaugural,
    Crew,
    HouseKeeping,
    Food,
    Transport,
    Publicity,
    Documentation,
    Finance,
    Cultural,
    Requirements,
    Disciplinary,
    Technical,
    Jury,
}

impl CommitteeName {
    pub const ALL: [CommitteeName; 19] = [
        CommitteeName::Media,
        CommitteeName::SocialMedia,
        CommitteeName::Thorana,
        CommitteeName::EventManagement,
        CommitteeName::Accommodation,
        CommitteeName::Digital,
        CommitteeName::Inaugural,
        CommitteeName::Crew,
        CommitteeName::HouseKeeping,
        CommitteeName::Food,
        CommitteeName::Transport,
        CommitteeName::Publicity,
        CommitteeName::Documentation,
        CommitteeName::Finance,
        CommitteeName::Cultural,
        CommitteeName::Requirements,
        CommitteeName::Disciplinary,
        CommitteeName::Technical,
        CommitteeName::Jury,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CommitteeName::Media => "Media",
            CommitteeName::SocialMedia => "Social Media",
            CommitteeName::Thorana => "Thorana",
            CommitteeName::EventManagement => "Event Management",
            CommitteeName::Accommodation => "Accommodation",
            CommitteeName::Digital => "Digital",
            CommitteeName::Inaugural => "Inaugural",
            CommitteeName::Crew => "Crew",
            CommitteeName::HouseKeeping => "House Keeping",
            CommitteeName::Food => "Food",
            CommitteeName::Transport => "Transport",
            CommitteeName::Publicity => "Publicity",
            CommitteeName::Documentation => "Documentation",
            CommitteeName::Finance => "Finance",
            CommitteeName::Cultural => "Cultural",
            CommitteeName::Requirements => "Requirements",
            CommitteeName::Disciplinary => "Disciplinary",
            CommitteeName::Technical => "Technical",
            CommitteeName::Jury => "Jury",
        }
    }
}

impl std::fmt::Display for CommitteeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitteeRole {
    Head,
    CoHead,
    Member,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    Pending,
    Approved,
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipStatus::Pending => f.write_str("PENDING"),
            MembershipStatus::Approved => f.write_str("APPROVED"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRef {
    pub id: u64,
    pub name: Option<String>,
    pub email: String,
}

impl PersonRef {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeSummary {
    pub id: u64,
    pub name: CommitteeName,
    pub head: Option<PersonRef>,
    pub co_head: Option<PersonRef>,
    pub member_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMembership {
    #[serde(default)]
    pub role: Option<CommitteeRole>,
    #[serde(default)]
    pub committee_id: Option<u64>,
    #[serde(default)]
    pub committee_name: Option<CommitteeName>,
    #[serde(default)]
    pub status: Option<MembershipStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub membership_id: u64,
    pub user_id: u64,
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub status: MembershipStatus,
}

impl Applicant {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeState {
    pub is_committee_reg_open: bool,
    pub committees: Vec<CommitteeSummary>,
    #[serde(default)]
    pub my: MyMembership,
    #[serde(default)]
    pub pending_applicants: Vec<Applicant>,
    #[serde(default)]
    pub approved_members: Vec<Applicant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserHit {
    pub id: u64,
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl UserHit {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub is_branch_rep: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: PortalUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollegeSelection {
    Nmamit,
    Other,
    Alumni,
}

impl CollegeSelection {
    pub const ALL: [CollegeSelection; 3] = [
        CollegeSelection::Nmamit,
        CollegeSelection::Other,
        CollegeSelection::Alumni,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CollegeSelection::Nmamit => "NMAMIT",
            CollegeSelection::Other => "Other college",
            CollegeSelection::Alumni => "Alumni",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub championship_points: i64,
    #[serde(rename = "type", default)]
    pub college_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub college_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_graduation: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Individual,
    Team,
    IndividualMultipleEntry,
    TeamMultipleEntry,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Individual,
        EventType::Team,
        EventType::IndividualMultipleEntry,
        EventType::TeamMultipleEntry,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EventType::Individual => "Individual",
            EventType::Team => "Team",
            EventType::IndividualMultipleEntry => "Individual (multiple entries)",
            EventType::TeamMultipleEntry => "Team (multiple entries)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Technical,
    NonTechnical,
    Core,
    Special,
}

impl EventCategory {
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Technical,
        EventCategory::NonTechnical,
        EventCategory::Core,
        EventCategory::Special,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Technical => "Technical",
            EventCategory::NonTechnical => "Non Technical",
            EventCategory::Core => "Core",
            EventCategory::Special => "Special",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventTier {
    Gold,
    Silver,
    Bronze,
}

impl EventTier {
    pub const ALL: [EventTier; 3] = [EventTier::Gold, EventTier::Silver, EventTier::Bronze];

    pub fn label(&self) -> &'static str {
        match self {
            EventTier::Gold => "Gold",
            EventTier::Silver => "Silver",
            EventTier::Bronze => "Bronze",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organizer {
    pub user_id: u64,
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Organizer {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub fees: u64,
    #[serde(default = "default_team_size")]
    pub min_team_size: u32,
    #[serde(default = "default_team_size")]
    pub max_team_size: u32,
    #[serde(default)]
    pub max_teams: Option<u32>,
    pub event_type: EventType,
    #[serde(default)]
    pub category: Option<EventCategory>,
    #[serde(default)]
    pub tier: Option<EventTier>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub organizers: Vec<Organizer>,
}

fn default_team_size() -> u32 {
    1
}

impl Event {
    pub fn team_size_label(&self) -> String {
        if self.min_team_size == self.max_team_size {
            if self.min_team_size == 1 {
                "Solo".to_string()
            } else {
                format!("Teams of {}", self.min_team_size)
            }
        } else {
            format!("Teams of {}-{}", self.min_team_size, self.max_team_size)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailsPayload {
    pub name: String,
    pub description: String,
    pub venue: String,
    pub fees: u64,
    pub min_team_size: u32,
    pub max_team_size: u32,
    pub max_teams: Option<u32>,
    pub event_type: EventType,
    pub category: EventCategory,
    pub tier: EventTier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub id: u64,
    pub key: String,
    pub value: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub id: u64,
    pub key: String,
    pub value: String,
}
