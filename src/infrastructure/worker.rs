use super::api::{ApiError, ApiResult, BranchEvents, PortalClient};
use crate::domain::{
    College, CommitteeName, CommitteeState, Event, EventDetailsPayload, EventType, PortalUser,
    Session, Setting, SignupPayload, UserHit, Variable,
};
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    AssignHead(CommitteeName),
    AssignCoHead,
    Organizer(u64),
}

#[derive(Debug, Clone)]
pub enum ApiRequest {
    Login { email: String, password: String },
    Signup { payload: SignupPayload },
    VerifyOtp { email: String, otp: String },
    FetchMe,
    FetchColleges,
    FetchCommitteeState,
    Apply { committee: CommitteeName },
    ApproveMember { membership_id: u64 },
    AssignHead { committee: CommitteeName, email: String },
    AssignCoHead { committee: CommitteeName, email: String },
    SearchUsers { target: SearchTarget, query: String },
    FetchEvents,
    FetchBranchEvents,
    CreateEvent { name: String, event_type: EventType },
    UpdateEvent { event_id: u64, details: EventDetailsPayload },
    PublishEvent { event_id: u64, published: bool },
    DeleteEvent { event_id: u64 },
    AddOrganizer { event_id: u64, email: String },
    RemoveOrganizer { event_id: u64, user_id: u64 },
    FetchSettings,
    UpdateSetting { key: String, value: bool },
    FetchVariables,
    UpsertVariable { key: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ApiJob {
    pub token: Option<String>,
    pub request: ApiRequest,
}

#[derive(Debug)]
pub enum ApiOutcome {
    Login(Result<Session, ApiError>),
    Signup(Result<(), ApiError>),
    VerifyOtp(Result<Session, ApiError>),
    Me(Result<PortalUser, ApiError>),
    Colleges(Result<Vec<College>, ApiError>),
    CommitteeState(Result<CommitteeState, ApiError>),
    Apply(Result<(), ApiError>),
    ApproveMember(Result<(), ApiError>),
    AssignHead(Result<(), ApiError>),
    AssignCoHead(Result<(), ApiError>),
    UserSearch {
        target: SearchTarget,
        query: String,
        result: Result<Vec<UserHit>, ApiError>,
    },
    Events(Result<Vec<Event>, ApiError>),
    BranchEvents(Result<BranchEvents, ApiError>),
    CreateEvent(Result<(), ApiError>),
    UpdateEvent(Result<(), ApiError>),
    PublishEvent(Result<(), ApiError>),
    DeleteEvent(Result<(), ApiError>),
    AddOrganizer(Result<(), ApiError>),
    RemoveOrganizer(Result<(), ApiError>),
    Settings(Result<Vec<Setting>, ApiError>),
    UpdateSetting(Result<(), ApiError>),
    Variables(Result<Vec<Variable>, ApiError>),
    UpsertVariable(Result<(), ApiError>),
}

pub fn spawn_worker(client: PortalClient, jobs: Receiver<ApiJob>, outcomes: Sender<ApiOutcome>) {
    thread::spawn(move || {
        while let Ok(job) = jobs.recv() {
            if outcomes.send(execute(&client, job)).is_err() {
                break;
            }
        }
    });
}

pub fn execute(client: &PortalClient, job: ApiJob) -> ApiOutcome {
    let ApiJob { token, request } = job;
    match request {
        ApiRequest::Login { email, password } => ApiOutcome::Login(client.login(&email, &password)),
        ApiRequest::Signup { payload } => ApiOutcome::Signup(client.signup(&payload)),
        ApiRequest::VerifyOtp { email, otp } => {
            ApiOutcome::VerifyOtp(client.verify_otp(&email, &otp))
        }
        ApiRequest::FetchMe => ApiOutcome::Me(authed(&token, |t| client.me(t))),
        ApiRequest::FetchColleges => ApiOutcome::Colleges(client.colleges()),
        ApiRequest::FetchCommitteeState => {
            ApiOutcome::CommitteeState(authed(&token, |t| client.committee_state(t)))
        }
        ApiRequest::Apply { committee } => {
            ApiOutcome::Apply(authed(&token, |t| client.apply_to_committee(t, committee)))
        }
        ApiRequest::ApproveMember { membership_id } => {
            ApiOutcome::ApproveMember(authed(&token, |t| client.approve_member(t, membership_id)))
        }
        ApiRequest::AssignHead { committee, email } => {
            ApiOutcome::AssignHead(authed(&token, |t| client.assign_head(t, committee, &email)))
        }
        ApiRequest::AssignCoHead { committee, email } => {
            ApiOutcome::AssignCoHead(authed(&token, |t| client.assign_cohead(t, committee, &email)))
        }
        ApiRequest::SearchUsers { target, query } => {
            let result = match target {
                SearchTarget::Organizer(_) => {
                    authed(&token, |t| client.search_branch_users(t, &query))
                }
                _ => authed(&token, |t| client.search_users(t, &query)),
            };
            ApiOutcome::UserSearch {
                target,
                query,
                result,
            }
        }
        ApiRequest::FetchEvents => ApiOutcome::Events(client.published_events()),
        ApiRequest::FetchBranchEvents => {
            ApiOutcome::BranchEvents(authed(&token, |t| client.branch_events(t)))
        }
        ApiRequest::CreateEvent { name, event_type } => {
            ApiOutcome::CreateEvent(authed(&token, |t| client.create_event(t, &name, event_type)))
        }
        ApiRequest::UpdateEvent { event_id, details } => {
            ApiOutcome::UpdateEvent(authed(&token, |t| client.update_event(t, event_id, &details)))
        }
        ApiRequest::PublishEvent {
            event_id,
            published,
        } => ApiOutcome::PublishEvent(authed(&token, |t| {
            client.publish_event(t, event_id, published)
        })),
        ApiRequest::DeleteEvent { event_id } => {
            ApiOutcome::DeleteEvent(authed(&token, |t| client.delete_event(t, event_id)))
        }
        ApiRequest::AddOrganizer { event_id, email } => {
            ApiOutcome::AddOrganizer(authed(&token, |t| client.add_organizer(t, event_id, &email)))
        }
        ApiRequest::RemoveOrganizer { event_id, user_id } => ApiOutcome::RemoveOrganizer(authed(
            &token,
            |t| client.remove_organizer(t, event_id, user_id),
        )),
        ApiRequest::FetchSettings => ApiOutcome::Settings(authed(&token, |t| client.settings(t))),
        ApiRequest::UpdateSetting { key, value } => {
            ApiOutcome::UpdateSetting(authed(&token, |t| client.update_setting(t, &key, value)))
        }
        ApiRequest::FetchVariables => {
            ApiOutcome::Variables(authed(&token, |t| client.variables(t)))
        }
        ApiRequest::UpsertVariable { key, value } => {
            ApiOutcome::UpsertVariable(authed(&token, |t| client.upsert_variable(t, &key, &value)))
        }
    }
}

fn authed<T>(token: &Option<String>, call: impl FnOnce(&str) -> ApiResult<T>) -> ApiResult<T> {
    match token {
        Some(token) => call(token),
        None => Err(ApiError::Unauthorized),
    }
}
