use crate::domain::{
    College, CommitteeName, CommitteeState, Event, EventDetailsPayload, EventType, PortalUser,
    Session, Setting, SignupPayload, UserHit, Variable,
};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Unauthorized,
    Api { status: u16, message: String },
    Network(String),
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::Api { status, message } => {
                if message.is_empty() {
                    write!(f, "Request failed with status {}", status)
                } else {
                    write!(f, "{}", message)
                }
            }
            ApiError::Network(detail) => write!(f, "Network error: {}", detail),
            ApiError::Decode(detail) => write!(f, "Unexpected response: {}", detail),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchEvents {
    pub events: Vec<Event>,
    #[serde(default)]
    pub branch_name: Option<String>,
}

#[derive(Deserialize)]
struct MeEnvelope {
    user: PortalUser,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    users: Vec<UserHit>,
}

#[derive(Deserialize)]
struct CollegesEnvelope {
    colleges: Vec<College>,
}

#[derive(Deserialize)]
struct EventsEnvelope {
    events: Vec<Event>,
}

#[derive(Deserialize)]
struct SettingsEnvelope {
    settings: Vec<Setting>,
}

#[derive(Deserialize)]
struct VariablesEnvelope {
    variables: Vec<Variable>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub struct PortalClient {
    http: Client,
    base_url: String,
}

impl PortalClient {
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("UTSAV_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let request = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }));
        self.send(request)
    }

    pub fn signup(&self, payload: &SignupPayload) -> ApiResult<()> {
        let request = self.http.post(self.url("/auth/signup")).json(payload);
        self.send_ok(request)
    }

    pub fn verify_otp(&self, email: &str, otp: &str) -> ApiResult<Session> {
        let request = self
            .http
            .post(self.url("/auth/verify-otp"))
            .json(&json!({ "email": email, "otp": otp }));
        self.send(request)
    }

    pub fn me(&self, token: &str) -> ApiResult<PortalUser> {
        let request = self.http.get(self.url("/auth/me")).bearer_auth(token);
        self.send::<MeEnvelope>(request).map(|body| body.user)
    }

    pub fn colleges(&self) -> ApiResult<Vec<College>> {
        let request = self.http.get(self.url("/colleges"));
        self.send::<CollegesEnvelope>(request)
            .map(|body| body.colleges)
    }

    pub fn committee_state(&self, token: &str) -> ApiResult<CommitteeState> {
        let request = self.http.get(self.url("/committee/state")).bearer_auth(token);
        self.send(request)
    }

    pub fn apply_to_committee(&self, token: &str, committee: CommitteeName) -> ApiResult<()> {
        let request = self
            .http
            .post(self.url("/committee/apply"))
            .bearer_auth(token)
            .json(&json!({ "committee": committee }));
        self.send_ok(request)
    }

    pub fn approve_member(&self, token: &str, membership_id: u64) -> ApiResult<()> {
        let request = self
            .http
            .post(self.url("/committee/approve-member"))
            .bearer_auth(token)
            .json(&json!({ "membershipId": membership_id }));
        self.send_ok(request)
    }

    pub fn assign_head(&self, token: &str, committee: CommitteeName, email: &str) -> ApiResult<()> {
        let request = self
            .http
            .post(self.url("/committee/assign-head"))
            .bearer_auth(token)
            .json(&json!({ "committee": committee, "email": email }));
        self.send_ok(request)
    }

    pub fn assign_cohead(
        &self,
        token: &str,
        committee: CommitteeName,
        email: &str,
    ) -> ApiResult<()> {
        let request = self
            .http
            .post(self.url("/committee/assign-cohead"))
            .bearer_auth(token)
            .json(&json!({ "committee": committee, "email": email }));
        self.send_ok(request)
    }

    pub fn search_users(&self, token: &str, query: &str) -> ApiResult<Vec<UserHit>> {
        let request = self
            .http
            .get(self.url("/committee/users"))
            .bearer_auth(token)
            .query(&[("q", query)]);
        self.send::<UsersEnvelope>(request).map(|body| body.users)
    }

    pub fn published_events(&self) -> ApiResult<Vec<Event>> {
        let request = self.http.get(self.url("/events"));
        self.send::<EventsEnvelope>(request).map(|body| body.events)
    }

    pub fn branch_events(&self, token: &str) -> ApiResult<BranchEvents> {
        let request = self.http.get(self.url("/branch-rep/events")).bearer_auth(token);
        self.send(request)
    }

    pub fn create_event(&self, token: &str, name: &str, event_type: EventType) -> ApiResult<()> {
        let request = self
            .http
            .post(self.url("/branch-rep/events"))
            .bearer_auth(token)
            .json(&json!({ "name": name, "eventType": event_type }));
        self.send_ok(request)
    }

    pub fn update_event(
        &self,
        token: &str,
        event_id: u64,
        details: &EventDetailsPayload,
    ) -> ApiResult<()> {
        let request = self
            .http
            .put(self.url(&format!("/branch-rep/events/{}", event_id)))
            .bearer_auth(token)
            .json(details);
        self.send_ok(request)
    }

    pub fn publish_event(&self, token: &str, event_id: u64, published: bool) -> ApiResult<()> {
        let request = self
            .http
            .post(self.url(&format!("/branch-rep/events/{}/publish", event_id)))
            .bearer_auth(token)
            .json(&json!({ "published": published }));
        self.send_ok(request)
    }

    pub fn delete_event(&self, token: &str, event_id: u64) -> ApiResult<()> {
        let request = self
            .http
            .delete(self.url(&format!("/branch-rep/events/{}", event_id)))
            .bearer_auth(token);
        self.send_ok(request)
    }

    pub fn add_organizer(&self, token: &str, event_id: u64, email: &str) -> ApiResult<()> {
        let request = self
            .http
            .post(self.url(&format!("/branch-rep/events/{}/organizers", event_id)))
            .bearer_auth(token)
            .json(&json!({ "email": email }));
        self.send_ok(request)
    }

    pub fn remove_organizer(&self, token: &str, event_id: u64, user_id: u64) -> ApiResult<()> {
        let request = self
            .http
            .delete(self.url(&format!(
                "/branch-rep/events/{}/organizers/{}",
                event_id, user_id
            )))
            .bearer_auth(token);
        self.send_ok(request)
    }

    pub fn search_branch_users(&self, token: &str, query: &str) -> ApiResult<Vec<UserHit>> {
        let request = self
            .http
            .get(self.url("/branch-rep/users"))
            .bearer_auth(token)
            .query(&[("q", query)]);
        self.send::<UsersEnvelope>(request).map(|body| body.users)
    }

    pub fn settings(&self, token: &str) -> ApiResult<Vec<Setting>> {
        let request = self.http.get(self.url("/admin/settings")).bearer_auth(token);
        self.send::<SettingsEnvelope>(request)
            .map(|body| body.settings)
    }

    pub fn update_setting(&self, token: &str, key: &str, value: bool) -> ApiResult<()> {
        let request = self
            .http
            .put(self.url(&format!("/admin/settings/{}", encode_segment(key))))
            .bearer_auth(token)
            .json(&json!({ "value": value }));
        self.send_ok(request)
    }

    pub fn variables(&self, token: &str) -> ApiResult<Vec<Variable>> {
        let request = self.http.get(self.url("/admin/variables")).bearer_auth(token);
        self.send::<VariablesEnvelope>(request)
            .map(|body| body.variables)
    }

    pub fn upsert_variable(&self, token: &str, key: &str, value: &str) -> ApiResult<()> {
        let request = self
            .http
            .put(self.url(&format!("/admin/variables/{}", encode_segment(key))))
            .bearer_auth(token)
            .json(&json!({ "value": value }));
        self.send_ok(request)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode_body(response)
    }

    fn send_ok(&self, request: RequestBuilder) -> ApiResult<()> {
        let response = request
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response).map(|_| ())
    }
}

fn decode_body<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let response = check_status(response)?;
    let body = response
        .text()
        .map_err(|e| ApiError::Network(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let message = response.text().map(|body| extract_message(&body)).unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

fn extract_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message.or(parsed.error).unwrap_or_default(),
        Err(_) => String::new(),
    }
}

fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommitteeRole, MembershipStatus};

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = PortalClient::new("http://localhost:4000/api/");
        assert_eq!(
            client.url("/committee/state"),
            "http://localhost:4000/api/committee/state"
        );
    }

    #[test]
    fn test_extract_message_prefers_message_field() {
        assert_eq!(
            extract_message(r#"{"message":"Committee is full"}"#),
            "Committee is full"
        );
        assert_eq!(extract_message(r#"{"error":"Bad request"}"#), "Bad request");
        assert_eq!(
            extract_message(r#"{"message":"first","error":"second"}"#),
            "first"
        );
        assert_eq!(extract_message("<html>oops</html>"), "");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("committeeRegOpen"), "committeeRegOpen");
        assert_eq!(encode_segment("day 1/start"), "day%201%2Fstart");
    }

    #[test]
    fn test_server_message_only_for_api_errors() {
        let api = ApiError::Api {
            status: 400,
            message: "You can only apply to one committee".to_string(),
        };
        assert_eq!(
            api.server_message(),
            Some("You can only apply to one committee")
        );

        let empty = ApiError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(empty.server_message(), None);
        assert_eq!(ApiError::Network("timed out".to_string()).server_message(), None);
        assert!(ApiError::Unauthorized.is_unauthorized());
    }

    #[test]
    fn test_committee_state_decodes_wire_shape() {
        let body = serde_json::json!({
            "isCommitteeRegOpen": true,
            "committees": [
                {
                    "id": 3,
                    "name": "SOCIAL_MEDIA",
                    "head": { "id": 9, "name": "Asha", "email": "asha@example.com" },
                    "coHead": null,
                    "memberCount": 12
                }
            ],
            "my": {
                "role": "HEAD",
                "committeeId": 3,
                "committeeName": "SOCIAL_MEDIA",
                "status": "APPROVED"
            },
            "pendingApplicants": [
                {
                    "membershipId": 41,
                    "userId": 17,
                    "name": null,
                    "email": "riya@example.com",
                    "phoneNumber": "9876543210",
                    "status": "PENDING"
                }
            ],
            "approvedMembers": []
        });

        let state: CommitteeState = serde_json::from_value(body).unwrap();
        assert!(state.is_committee_reg_open);
        assert_eq!(state.committees[0].name, CommitteeName::SocialMedia);
        assert_eq!(state.committees[0].member_count, 12);
        assert!(state.committees[0].co_head.is_none());
        assert_eq!(state.my.role, Some(CommitteeRole::Head));
        assert_eq!(state.my.committee_name, Some(CommitteeName::SocialMedia));
        assert_eq!(state.pending_applicants[0].membership_id, 41);
        assert_eq!(state.pending_applicants[0].display_name(), "riya@example.com");
        assert_eq!(state.pending_applicants[0].status, MembershipStatus::Pending);
    }

    #[test]
    fn test_committee_state_tolerates_missing_sections() {
        let body = serde_json::json!({
            "isCommitteeRegOpen": false,
            "committees": [],
            "my": {}
        });
        let state: CommitteeState = serde_json::from_value(body).unwrap();
        assert!(state.my.role.is_none());
        assert!(state.pending_applicants.is_empty());
        assert!(state.approved_members.is_empty());
    }

    #[test]
    fn test_session_decodes_auth_response() {
        let body = serde_json::json!({
            "token": "jwt-token",
            "user": {
                "name": "Asha",
                "email": "asha@example.com",
                "roles": ["ADMIN"],
                "isBranchRep": true
            }
        });
        let session: Session = serde_json::from_value(body).unwrap();
        assert_eq!(session.token, "jwt-token");
        assert_eq!(session.user.roles, vec!["ADMIN".to_string()]);
        assert!(session.user.is_branch_rep);
    }

    #[test]
    fn test_session_tolerates_missing_role_fields() {
        let body = serde_json::json!({
            "token": "jwt-token",
            "user": { "name": "Asha", "email": "asha@example.com" }
        });
        let session: Session = serde_json::from_value(body).unwrap();
        assert!(session.user.roles.is_empty());
        assert!(!session.user.is_branch_rep);
    }

    #[test]
    fn test_users_envelope_decodes() {
        let body = serde_json::json!({
            "users": [
                { "id": 4, "name": null, "email": "x@example.com", "phoneNumber": "123" }
            ]
        });
        let envelope: UsersEnvelope = serde_json::from_value(body).unwrap();
        assert_eq!(envelope.users[0].display_name(), "x@example.com");
    }

    #[test]
    fn test_branch_events_decodes_with_organizers() {
        let body = serde_json::json!({
            "branchName": "CSE",
            "events": [
                {
                    "id": 2,
                    "name": "Hackathon",
                    "eventType": "TEAM_MULTIPLE_ENTRY",
                    "category": "TECHNICAL",
                    "tier": "GOLD",
                    "published": false,
                    "minTeamSize": 2,
                    "maxTeamSize": 4,
                    "organizers": [
                        { "userId": 5, "name": "Ravi", "email": "ravi@example.com" }
                    ]
                }
            ]
        });
        let branch: BranchEvents = serde_json::from_value(body).unwrap();
        assert_eq!(branch.branch_name.as_deref(), Some("CSE"));
        let event = &branch.events[0];
        assert_eq!(event.event_type, EventType::TeamMultipleEntry);
        assert_eq!(event.team_size_label(), "Teams of 2-4");
        assert_eq!(event.organizers[0].user_id, 5);
        assert!(!event.published);
    }

    #[test]
    fn test_event_details_payload_serializes_camel_case() {
        use crate::domain::{EventCategory, EventTier};

        let payload = EventDetailsPayload {
            name: "Hackathon".to_string(),
            description: "Overnight build".to_string(),
            venue: "Lab 3".to_string(),
            fees: 200,
            min_team_size: 2,
            max_team_size: 4,
            max_teams: Some(20),
            event_type: EventType::Team,
            category: EventCategory::Technical,
            tier: EventTier::Gold,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["minTeamSize"], 2);
        assert_eq!(value["eventType"], "TEAM");
        assert_eq!(value["category"], "TECHNICAL");
        assert_eq!(value["tier"], "GOLD");
    }

    #[test]
    fn test_committee_name_wire_values() {
        let value = serde_json::to_value(CommitteeName::HouseKeeping).unwrap();
        assert_eq!(value, "HOUSE_KEEPING");
        let parsed: CommitteeName = serde_json::from_value(serde_json::json!("EVENT_MANAGEMENT")).unwrap();
        assert_eq!(parsed, CommitteeName::EventManagement);
        assert_eq!(parsed.label(), "Event Management");
    }
}
