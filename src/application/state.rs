//! Application state management for the portal client.
//!
//! This module contains the main application state, the request outbox
//! consumed by the background API worker, and the outcome handling that
//! folds server responses back into the interface.

use crate::domain::{
    Applicant, College, CollegeSelection, CommitteeName, CommitteeState, CommitteeSummary,
    CommitteeView, Event, EventCategory, EventDetailsPayload, EventTier, EventType, Organizer,
    RegistrationForm, Session, Setting, UserHit, Variable, can_apply, can_approve,
    can_assign_cohead, can_assign_head, current_year, has_role, select_view,
    validate_registration,
};
use crate::infrastructure::{ApiError, ApiOutcome, ApiRequest, SearchTarget};

const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
const NETWORK_ERROR: &str = "Network error. Please try again.";
const ACCESS_REQUIRED: &str = "Access required.";

/// Number of fields on the registration form, hidden ones included.
const REGISTER_FIELD_COUNT: usize = 8;

/// Represents the screen currently shown.
///
/// Each screen owns its portion of the state below; switching screens
/// never discards another screen's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Email and password entry
    Login,
    /// Registration form and OTP verification
    Register,
    /// Published events, open to signed-out users as well
    Events,
    /// Committee grid or role panel, requires a session
    Committees,
    /// Settings, variables and branch events for privileged users
    Dashboard,
}

/// Represents the current input mode of the application.
///
/// The mode determines how keystrokes are interpreted and which
/// overlay, if any, is drawn over the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation mode
    Normal,
    /// A search box is open and capturing keystrokes
    Search,
    /// A confirmation dialog is awaiting a yes or no
    Confirm,
    /// Help overlay is displayed
    Help,
}

/// Step of the registration flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterStep {
    /// Filling in the form fields
    Details,
    /// Entering the one-time password sent by email
    Otp,
}

/// Roster list shown to a committee head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterTab {
    Pending,
    Approved,
}

/// Tab of the dashboard screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashTab {
    /// Feature toggles, admin only
    Settings,
    /// Key-value variables, admin only
    Variables,
    /// Branch event management, branch representatives only
    BranchEvents,
}

/// Pane of the committee screen.
///
/// Admins can flip between their own role panel and the head
/// assignment pane; everyone else stays on the role panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitteePane {
    Role,
    Admin,
}

/// Focused list on the branch events tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchFocus {
    /// The event list itself
    List,
    /// The organizer list of the selected event
    Organizers,
}

/// An action that runs only after the user confirms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Apply to the named committee
    Apply(CommitteeName),
    /// Delete the event with this id
    DeleteEvent(u64),
}

/// A pending confirmation dialog.
#[derive(Debug, Clone)]
pub struct Confirmation {
    /// Question shown in the dialog
    pub prompt: String,
    /// What runs on confirmation
    pub action: ConfirmAction,
}

/// Tracks which requests are currently running on the worker.
///
/// Every operation has its own flag so one slow request never blocks
/// an unrelated one. A set flag suppresses duplicate submissions of
/// the same operation and drives the per-control busy indicators.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    pub login: bool,
    pub signup: bool,
    pub verify_otp: bool,
    pub me: bool,
    pub colleges: bool,
    pub committee_state: bool,
    pub apply: bool,
    pub approve: bool,
    pub assign_head: bool,
    pub assign_cohead: bool,
    pub search: bool,
    pub events: bool,
    pub branch_events: bool,
    pub create_event: bool,
    pub update_event: bool,
    pub publish_event: bool,
    pub delete_event: bool,
    pub add_organizer: bool,
    pub remove_organizer: bool,
    pub settings: bool,
    pub update_setting: bool,
    pub variables: bool,
    pub upsert_variable: bool,
}

/// Draft state of the variable editor.
///
/// `key` is `None` while creating a new variable; editing an existing
/// one locks the key and only the value can change.
#[derive(Debug, Clone, Default)]
pub struct VariableEdit {
    pub key: Option<String>,
    pub key_input: String,
    pub value_input: String,
    pub focus: usize,
}

impl VariableEdit {
    pub fn for_new() -> Self {
        VariableEdit::default()
    }

    pub fn for_variable(variable: &Variable) -> Self {
        VariableEdit {
            key: Some(variable.key.clone()),
            key_input: variable.key.clone(),
            value_input: variable.value.clone(),
            focus: 1,
        }
    }

    /// The editable text field under the focus, if any.
    pub fn text_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 if self.key.is_none() => Some(&mut self.key_input),
            1 => Some(&mut self.value_input),
            _ => None,
        }
    }
}

/// Draft state of the event editor.
///
/// Numeric fields stay raw strings until submission so typing is never
/// rejected mid-keystroke; [`EventEdit::to_payload`] parses them.
/// `event_id` is `None` while creating, which narrows the form down to
/// the name and event type.
#[derive(Debug, Clone, Default)]
pub struct EventEdit {
    pub event_id: Option<u64>,
    pub name: String,
    pub description: String,
    pub venue: String,
    pub fees: String,
    pub min_team_size: String,
    pub max_team_size: String,
    pub max_teams: String,
    pub event_type: usize,
    pub category: usize,
    pub tier: usize,
    pub focus: usize,
}

impl EventEdit {
    pub fn for_new() -> Self {
        EventEdit::default()
    }

    pub fn for_event(event: &Event) -> Self {
        EventEdit {
            event_id: Some(event.id),
            name: event.name.clone(),
            description: event.description.clone().unwrap_or_default(),
            venue: event.venue.clone().unwrap_or_default(),
            fees: event.fees.to_string(),
            min_team_size: event.min_team_size.to_string(),
            max_team_size: event.max_team_size.to_string(),
            max_teams: event.max_teams.map(|n| n.to_string()).unwrap_or_default(),
            event_type: EventType::ALL
                .iter()
                .position(|t| *t == event.event_type)
                .unwrap_or(0),
            category: event
                .category
                .and_then(|c| EventCategory::ALL.iter().position(|x| *x == c))
                .unwrap_or(0),
            tier: event
                .tier
                .and_then(|t| EventTier::ALL.iter().position(|x| *x == t))
                .unwrap_or(0),
            focus: 0,
        }
    }

    /// Fields shown by the editor: the full set when editing, name and
    /// type when creating.
    pub fn field_count(&self) -> usize {
        if self.event_id.is_some() { 10 } else { 2 }
    }

    /// The editable text field under the focus, if any.
    pub fn text_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.name),
            4 => Some(&mut self.description),
            5 => Some(&mut self.venue),
            6 => Some(&mut self.fees),
            7 => Some(&mut self.min_team_size),
            8 => Some(&mut self.max_team_size),
            9 => Some(&mut self.max_teams),
            _ => None,
        }
    }

    /// Cycles the choice field under the focus, if any.
    pub fn cycle_choice(&mut self, step: isize) {
        match self.focus {
            1 => self.event_type = step_index(self.event_type, EventType::ALL.len(), step),
            2 => self.category = step_index(self.category, EventCategory::ALL.len(), step),
            3 => self.tier = step_index(self.tier, EventTier::ALL.len(), step),
            _ => {}
        }
    }

    /// Parses the draft into the update payload.
    ///
    /// Empty numeric fields fall back to zero fees, solo team sizes
    /// and no team cap.
    pub fn to_payload(&self) -> Result<EventDetailsPayload, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Event name is required".to_string());
        }
        let fees = if self.fees.trim().is_empty() {
            0
        } else {
            self.fees
                .trim()
                .parse()
                .map_err(|_| "Fees must be a number".to_string())?
        };
        let min_team_size = parse_count(&self.min_team_size, 1, "Minimum team size")?;
        let max_team_size = parse_count(&self.max_team_size, min_team_size, "Maximum team size")?;
        if min_team_size == 0 {
            return Err("Team sizes start at 1".to_string());
        }
        if min_team_size > max_team_size {
            return Err("Minimum team size cannot exceed the maximum".to_string());
        }
        let max_teams = if self.max_teams.trim().is_empty() {
            None
        } else {
            Some(
                self.max_teams
                    .trim()
                    .parse()
                    .map_err(|_| "Maximum teams must be a number".to_string())?,
            )
        };
        Ok(EventDetailsPayload {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            venue: self.venue.trim().to_string(),
            fees,
            min_team_size,
            max_team_size,
            max_teams,
            event_type: EventType::ALL[self.event_type % EventType::ALL.len()],
            category: EventCategory::ALL[self.category % EventCategory::ALL.len()],
            tier: EventTier::ALL[self.tier % EventTier::ALL.len()],
        })
    }
}

fn parse_count(raw: &str, default: u32, label: &str) -> Result<u32, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed
        .parse()
        .map_err(|_| format!("{} must be a number", label))
}

/// Steps a list index by `step` with wraparound.
pub fn step_index(current: usize, len: usize, step: isize) -> usize {
    if len == 0 {
        return 0;
    }
    (current as isize + step).rem_euclid(len as isize) as usize
}

fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { index.min(len - 1) }
}

/// Main application state for the portal client.
///
/// Holds the session, the per-screen data and the request outbox. The
/// state itself never performs I/O: actions push [`ApiRequest`] values
/// into the outbox, the main loop hands them to the worker, and
/// [`App::apply_outcome`] folds the responses back in.
///
/// # Examples
///
/// ```
/// use utsav::application::{App, Screen};
///
/// let app = App::default();
/// assert!(app.session.is_none());
/// assert_eq!(app.screen, Screen::Login);
/// ```
#[derive(Debug)]
pub struct App {
    /// Signed-in session, if any
    pub session: Option<Session>,
    /// Screen currently shown
    pub screen: Screen,
    /// Current input mode
    pub mode: Mode,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Requests waiting to be handed to the worker
    pub outbox: Vec<ApiRequest>,
    /// Whether the session changed since it was last persisted
    pub session_dirty: bool,
    /// Per-operation busy flags
    pub in_flight: InFlight,
    /// Email input on the login screen
    pub login_email: String,
    /// Password input on the login screen
    pub login_password: String,
    /// Focused login field, 0 email and 1 password
    pub login_focus: usize,
    /// Registration form fields
    pub register_form: RegistrationForm,
    /// Focused registration field
    pub register_focus: usize,
    /// Step of the registration flow
    pub register_step: RegisterStep,
    /// One-time password input
    pub otp_input: String,
    /// Colleges for the registration picker
    pub colleges: Vec<College>,
    /// Published events
    pub events: Vec<Event>,
    /// Selected index into the filtered event list
    pub events_selected: usize,
    /// Name filter on the events screen
    pub events_query: String,
    /// Category filter index, 0 for all
    pub events_category: usize,
    /// Committee data as last fetched
    pub committee_state: Option<CommitteeState>,
    /// Load failure shown in place of the committee screen
    pub committee_error: Option<String>,
    /// Pane of the committee screen
    pub committee_pane: CommitteePane,
    /// Selected row of the applicant grid
    pub grid_selected: usize,
    /// Roster list shown to a head
    pub roster_tab: RosterTab,
    /// Selected row of the roster
    pub roster_selected: usize,
    /// Selected row of the admin assignment pane
    pub admin_selected: usize,
    /// What an accepted search result will be used for
    pub search_target: Option<SearchTarget>,
    /// Search query as typed
    pub search_query: String,
    /// Results of the latest matching search response
    pub search_results: Vec<UserHit>,
    /// Selected search result
    pub search_selected: usize,
    /// Tab of the dashboard screen
    pub dash_tab: DashTab,
    /// Feature toggles
    pub settings: Vec<Setting>,
    /// Selected setting row
    pub settings_selected: usize,
    /// Key-value variables
    pub variables: Vec<Variable>,
    /// Selected variable row
    pub variables_selected: usize,
    /// Open variable editor, if any
    pub var_edit: Option<VariableEdit>,
    /// Events of the user's branch
    pub branch_events: Vec<Event>,
    /// Branch name reported with the branch events
    pub branch_name: Option<String>,
    /// Selected branch event row
    pub branch_selected: usize,
    /// Focused list on the branch events tab
    pub branch_focus: BranchFocus,
    /// Selected organizer of the selected branch event
    pub organizer_selected: usize,
    /// Open event editor, if any
    pub event_edit: Option<EventEdit>,
    /// Pending confirmation dialog, if any
    pub confirm: Option<Confirmation>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            session: None,
            screen: Screen::Login,
            mode: Mode::Normal,
            status_message: None,
            help_scroll: 0,
            outbox: Vec::new(),
            session_dirty: false,
            in_flight: InFlight::default(),
            login_email: String::new(),
            login_password: String::new(),
            login_focus: 0,
            register_form: RegistrationForm::default(),
            register_focus: 0,
            register_step: RegisterStep::Details,
            otp_input: String::new(),
            colleges: Vec::new(),
            events: Vec::new(),
            events_selected: 0,
            events_query: String::new(),
            events_category: 0,
            committee_state: None,
            committee_error: None,
            committee_pane: CommitteePane::Role,
            grid_selected: 0,
            roster_tab: RosterTab::Pending,
            roster_selected: 0,
            admin_selected: 0,
            search_target: None,
            search_query: String::new(),
            search_results: Vec::new(),
            search_selected: 0,
            dash_tab: DashTab::Settings,
            settings: Vec::new(),
            settings_selected: 0,
            variables: Vec::new(),
            variables_selected: 0,
            var_edit: None,
            branch_events: Vec::new(),
            branch_name: None,
            branch_selected: 0,
            branch_focus: BranchFocus::List,
            organizer_selected: 0,
            event_edit: None,
            confirm: None,
        }
    }
}

impl App {
    /// Creates the state for a fresh start, resuming `session` if one
    /// was persisted.
    ///
    /// With a session the app lands on the events screen and refreshes
    /// the profile so stale roles never linger; without one it lands
    /// on the login screen.
    pub fn new(session: Option<Session>) -> Self {
        let mut app = App::default();
        if session.is_some() {
            app.session = session;
            app.refresh_me();
            app.show_events();
        }
        app
    }

    /// Moves queued requests out of the state.
    ///
    /// The main loop calls this once per tick and forwards everything
    /// to the worker together with the current token.
    pub fn take_outbox(&mut self) -> Vec<ApiRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// Returns whether the session needs persisting and resets the flag.
    pub fn take_session_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.session_dirty, false)
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.session
            .as_ref()
            .map(|s| has_role(&s.user.roles, "ADMIN"))
            .unwrap_or(false)
    }

    pub fn is_branch_rep(&self) -> bool {
        self.session
            .as_ref()
            .map(|s| s.user.is_branch_rep)
            .unwrap_or(false)
    }

    // --- screen switching ---

    pub fn show_login(&mut self) {
        self.screen = Screen::Login;
        self.mode = Mode::Normal;
    }

    pub fn show_register(&mut self) {
        self.screen = Screen::Register;
        self.register_step = RegisterStep::Details;
        self.mode = Mode::Normal;
        if self.colleges.is_empty() {
            self.refresh_colleges();
        }
    }

    pub fn show_events(&mut self) {
        self.screen = Screen::Events;
        self.mode = Mode::Normal;
        self.refresh_events();
    }

    /// Opens the committee screen, or bounces to login when signed out.
    pub fn show_committees(&mut self) {
        if self.session.is_none() {
            self.status_message = Some("Log in to view committees".to_string());
            self.show_login();
            return;
        }
        self.screen = Screen::Committees;
        self.committee_pane = CommitteePane::Role;
        self.mode = Mode::Normal;
        self.refresh_committee_state();
    }

    /// Opens the dashboard on the first tab the user may see.
    pub fn show_dashboard(&mut self) {
        let tabs = self.available_dash_tabs();
        let Some(first) = tabs.first().copied() else {
            self.status_message = Some(ACCESS_REQUIRED.to_string());
            return;
        };
        self.screen = Screen::Dashboard;
        self.mode = Mode::Normal;
        self.dash_tab = first;
        self.reload_dash_tab();
    }

    /// Dashboard tabs the current user is allowed to open.
    pub fn available_dash_tabs(&self) -> Vec<DashTab> {
        let mut tabs = Vec::new();
        if self.is_admin() {
            tabs.push(DashTab::Settings);
            tabs.push(DashTab::Variables);
        }
        if self.is_branch_rep() {
            tabs.push(DashTab::BranchEvents);
        }
        tabs
    }

    pub fn next_dash_tab(&mut self) {
        let tabs = self.available_dash_tabs();
        if tabs.is_empty() {
            return;
        }
        let current = tabs.iter().position(|t| *t == self.dash_tab).unwrap_or(0);
        self.dash_tab = tabs[(current + 1) % tabs.len()];
        self.reload_dash_tab();
    }

    fn reload_dash_tab(&mut self) {
        match self.dash_tab {
            DashTab::Settings => self.refresh_settings(),
            DashTab::Variables => self.refresh_variables(),
            DashTab::BranchEvents => self.refresh_branch_events(),
        }
    }

    // --- fetches ---

    pub fn refresh_me(&mut self) {
        if self.in_flight.me {
            return;
        }
        self.in_flight.me = true;
        self.outbox.push(ApiRequest::FetchMe);
    }

    pub fn refresh_colleges(&mut self) {
        if self.in_flight.colleges {
            return;
        }
        self.in_flight.colleges = true;
        self.outbox.push(ApiRequest::FetchColleges);
    }

    pub fn refresh_committee_state(&mut self) {
        if self.in_flight.committee_state {
            return;
        }
        self.in_flight.committee_state = true;
        self.outbox.push(ApiRequest::FetchCommitteeState);
    }

    pub fn refresh_events(&mut self) {
        if self.in_flight.events {
            return;
        }
        self.in_flight.events = true;
        self.outbox.push(ApiRequest::FetchEvents);
    }

    pub fn refresh_branch_events(&mut self) {
        if self.in_flight.branch_events {
            return;
        }
        self.in_flight.branch_events = true;
        self.outbox.push(ApiRequest::FetchBranchEvents);
    }

    pub fn refresh_settings(&mut self) {
        if self.in_flight.settings {
            return;
        }
        self.in_flight.settings = true;
        self.outbox.push(ApiRequest::FetchSettings);
    }

    pub fn refresh_variables(&mut self) {
        if self.in_flight.variables {
            return;
        }
        self.in_flight.variables = true;
        self.outbox.push(ApiRequest::FetchVariables);
    }

    // --- authentication ---

    /// Submits the login form.
    pub fn submit_login(&mut self) {
        if self.in_flight.login {
            return;
        }
        let email = self.login_email.trim().to_string();
        if email.is_empty() || self.login_password.is_empty() {
            self.status_message = Some("Enter your email and password".to_string());
            return;
        }
        self.in_flight.login = true;
        self.outbox.push(ApiRequest::Login {
            email,
            password: self.login_password.clone(),
        });
    }

    /// Validates the registration form and submits it.
    ///
    /// On a validation failure the first failing field's message is
    /// shown and nothing is sent.
    pub fn submit_registration(&mut self) {
        if self.in_flight.signup {
            return;
        }
        match validate_registration(&self.register_form, current_year()) {
            Ok(payload) => {
                self.in_flight.signup = true;
                self.outbox.push(ApiRequest::Signup { payload });
            }
            Err(errors) => {
                self.status_message = errors.first().map(|e| e.message.clone());
            }
        }
    }

    /// Submits the one-time password for the address being registered.
    pub fn submit_otp(&mut self) {
        if self.in_flight.verify_otp {
            return;
        }
        let otp = self.otp_input.trim().to_string();
        if otp.is_empty() {
            self.status_message = Some("Enter the OTP from your email".to_string());
            return;
        }
        self.in_flight.verify_otp = true;
        self.outbox.push(ApiRequest::VerifyOtp {
            email: self.register_form.email.trim().to_string(),
            otp,
        });
    }

    /// Drops the session locally and returns to the login screen.
    pub fn logout(&mut self) {
        self.clear_private_state();
        self.status_message = Some("Logged out".to_string());
    }

    fn install_session(&mut self, session: Session, message: &str) {
        self.session = Some(session);
        self.session_dirty = true;
        self.login_password.clear();
        self.register_form = RegistrationForm::default();
        self.register_focus = 0;
        self.register_step = RegisterStep::Details;
        self.otp_input.clear();
        self.refresh_me();
        self.show_events();
        self.status_message = Some(message.to_string());
    }

    fn clear_private_state(&mut self) {
        self.session = None;
        self.session_dirty = true;
        self.committee_state = None;
        self.committee_error = None;
        self.settings.clear();
        self.variables.clear();
        self.branch_events.clear();
        self.branch_name = None;
        self.var_edit = None;
        self.event_edit = None;
        self.confirm = None;
        self.in_flight = InFlight::default();
        self.close_search();
        self.mode = Mode::Normal;
        self.screen = Screen::Login;
    }

    fn expire_session(&mut self) {
        self.clear_private_state();
        self.status_message = Some(SESSION_EXPIRED.to_string());
    }

    // --- registration form helpers ---

    /// Whether the registration field at `index` applies under the
    /// current category selection.
    pub fn register_field_visible(&self, index: usize) -> bool {
        match index {
            6 => self.register_form.selection == Some(CollegeSelection::Other),
            7 => self.register_form.selection == Some(CollegeSelection::Alumni),
            _ => index < 6,
        }
    }

    pub fn register_focus_next(&mut self) {
        for _ in 0..REGISTER_FIELD_COUNT {
            self.register_focus = (self.register_focus + 1) % REGISTER_FIELD_COUNT;
            if self.register_field_visible(self.register_focus) {
                return;
            }
        }
    }

    pub fn register_focus_prev(&mut self) {
        for _ in 0..REGISTER_FIELD_COUNT {
            self.register_focus =
                (self.register_focus + REGISTER_FIELD_COUNT - 1) % REGISTER_FIELD_COUNT;
            if self.register_field_visible(self.register_focus) {
                return;
            }
        }
    }

    /// Cycles the category between NMAMIT, other college and alumni.
    ///
    /// Leaving the other-college category drops the picked college so
    /// validation fills in the home college id.
    pub fn cycle_college_selection(&mut self, step: isize) {
        let all = CollegeSelection::ALL;
        let next = match self
            .register_form
            .selection
            .and_then(|s| all.iter().position(|c| *c == s))
        {
            Some(index) => step_index(index, all.len(), step),
            None => {
                if step >= 0 {
                    0
                } else {
                    all.len() - 1
                }
            }
        };
        self.register_form.selection = Some(all[next]);
        if all[next] != CollegeSelection::Other {
            self.register_form.college_id = None;
        }
    }

    /// Cycles the college picker over every college except the home one.
    pub fn cycle_college_choice(&mut self, step: isize) {
        let choices: Vec<&College> = self.colleges.iter().filter(|c| c.id != 1).collect();
        if choices.is_empty() {
            return;
        }
        let current = self
            .register_form
            .college_id
            .and_then(|id| choices.iter().position(|c| c.id == id));
        let next = match current {
            Some(index) => step_index(index, choices.len(), step),
            None => {
                if step >= 0 {
                    0
                } else {
                    choices.len() - 1
                }
            }
        };
        self.register_form.college_id = Some(choices[next].id);
    }

    /// Name of the picked college, for rendering the picker.
    pub fn picked_college_name(&self) -> Option<&str> {
        let id = self.register_form.college_id?;
        self.colleges
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    // --- events screen ---

    /// Published events passing the category and name filters.
    pub fn filtered_events(&self) -> Vec<&Event> {
        let query = self.events_query.trim().to_lowercase();
        self.events
            .iter()
            .filter(|event| {
                self.events_category == 0
                    || event.category == Some(EventCategory::ALL[self.events_category - 1])
            })
            .filter(|event| query.is_empty() || event.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn events_category_label(&self) -> &'static str {
        if self.events_category == 0 {
            "All"
        } else {
            EventCategory::ALL[self.events_category - 1].label()
        }
    }

    pub fn cycle_events_category(&mut self, step: isize) {
        self.events_category =
            step_index(self.events_category, EventCategory::ALL.len() + 1, step);
        self.events_selected = 0;
    }

    pub fn selected_public_event(&self) -> Option<&Event> {
        self.filtered_events().get(self.events_selected).copied()
    }

    // --- committee screen ---

    /// The role-derived committee view, once the state has loaded.
    pub fn committee_view(&self) -> Option<CommitteeView> {
        self.committee_state
            .as_ref()
            .map(|state| select_view(state, self.is_admin()))
    }

    pub fn grid_committee(&self) -> Option<&CommitteeSummary> {
        self.committee_state
            .as_ref()
            .and_then(|state| state.committees.get(self.grid_selected))
    }

    pub fn admin_committee(&self) -> Option<&CommitteeSummary> {
        self.committee_state
            .as_ref()
            .and_then(|state| state.committees.get(self.admin_selected))
    }

    /// Roster list for the current tab, empty until the state loads.
    pub fn roster_members(&self) -> &[Applicant] {
        match (&self.committee_state, self.roster_tab) {
            (Some(state), RosterTab::Pending) => &state.pending_applicants,
            (Some(state), RosterTab::Approved) => &state.approved_members,
            (None, _) => &[],
        }
    }

    pub fn selected_roster_member(&self) -> Option<&Applicant> {
        self.roster_members().get(self.roster_selected)
    }

    pub fn set_roster_tab(&mut self, tab: RosterTab) {
        if self.roster_tab != tab {
            self.roster_tab = tab;
            self.roster_selected = 0;
        }
    }

    /// Flips between the role panel and the admin assignment pane.
    pub fn toggle_committee_pane(&mut self) {
        if !self.is_admin() {
            return;
        }
        self.committee_pane = match self.committee_pane {
            CommitteePane::Role => CommitteePane::Admin,
            CommitteePane::Admin => CommitteePane::Role,
        };
    }

    /// Asks for confirmation before applying to the committee under
    /// the cursor.
    ///
    /// Rejections from the membership rules surface as a status
    /// message and no dialog opens.
    pub fn request_apply_confirmation(&mut self) {
        let admin = self.is_admin();
        let (committee, verdict) = {
            let Some(state) = self.committee_state.as_ref() else {
                return;
            };
            let Some(summary) = state.committees.get(self.grid_selected) else {
                return;
            };
            (summary.name, can_apply(state, admin))
        };
        if let Err(error) = verdict {
            self.status_message = Some(error.to_string());
            return;
        }
        if self.in_flight.apply {
            return;
        }
        self.confirm = Some(Confirmation {
            prompt: format!(
                "Apply to the {} committee? You can only join one.",
                committee.label()
            ),
            action: ConfirmAction::Apply(committee),
        });
        self.mode = Mode::Confirm;
    }

    /// Runs the action behind the open confirmation dialog.
    pub fn confirm_pending_action(&mut self) {
        self.mode = Mode::Normal;
        let Some(confirmation) = self.confirm.take() else {
            return;
        };
        match confirmation.action {
            ConfirmAction::Apply(committee) => {
                if self.in_flight.apply {
                    return;
                }
                self.in_flight.apply = true;
                self.outbox.push(ApiRequest::Apply { committee });
            }
            ConfirmAction::DeleteEvent(event_id) => {
                if self.in_flight.delete_event {
                    return;
                }
                self.in_flight.delete_event = true;
                self.outbox.push(ApiRequest::DeleteEvent { event_id });
            }
        }
    }

    pub fn dismiss_confirmation(&mut self) {
        self.confirm = None;
        self.mode = Mode::Normal;
    }

    /// Approves the pending application under the cursor.
    pub fn approve_selected_applicant(&mut self) {
        if self.roster_tab != RosterTab::Pending || self.in_flight.approve {
            return;
        }
        let (membership_id, verdict) = {
            let Some(state) = self.committee_state.as_ref() else {
                return;
            };
            let Some(applicant) = state.pending_applicants.get(self.roster_selected) else {
                return;
            };
            (
                applicant.membership_id,
                can_approve(state, applicant.membership_id),
            )
        };
        if let Err(error) = verdict {
            self.status_message = Some(error.to_string());
            return;
        }
        self.in_flight.approve = true;
        self.outbox.push(ApiRequest::ApproveMember { membership_id });
    }

    /// Records the outcome of writing the roster CSV.
    pub fn set_roster_export_result(&mut self, result: Result<String, String>) {
        self.status_message = Some(match result {
            Ok(path) => format!("Roster exported to {}", path),
            Err(error) => format!("Export failed: {}", error),
        });
    }

    /// Records the outcome of a clipboard copy.
    pub fn set_clipboard_result(&mut self, result: Result<String, String>) {
        self.status_message = Some(match result {
            Ok(what) => format!("Copied {}", what),
            Err(error) => format!("Copy failed: {}", error),
        });
    }

    // --- user search ---

    /// Opens the search box for assigning a co-head in the user's own
    /// committee.
    pub fn start_cohead_search(&mut self) {
        let verdict = {
            let Some(state) = self.committee_state.as_ref() else {
                return;
            };
            match state.my.committee_name {
                Some(committee) => can_assign_cohead(state, committee),
                None => return,
            }
        };
        if let Err(error) = verdict {
            self.status_message = Some(error.to_string());
            return;
        }
        self.open_search(SearchTarget::AssignCoHead);
    }

    /// Opens the search box for assigning a head to the committee
    /// under the admin cursor.
    pub fn start_head_search(&mut self) {
        if let Err(error) = can_assign_head(self.is_admin()) {
            self.status_message = Some(error.to_string());
            return;
        }
        let Some(committee) = self.admin_committee().map(|summary| summary.name) else {
            return;
        };
        self.open_search(SearchTarget::AssignHead(committee));
    }

    /// Opens the search box for adding an organizer to the selected
    /// branch event.
    pub fn start_organizer_search(&mut self) {
        let Some(event_id) = self.selected_branch_event().map(|event| event.id) else {
            return;
        };
        self.open_search(SearchTarget::Organizer(event_id));
    }

    fn open_search(&mut self, target: SearchTarget) {
        self.search_target = Some(target);
        self.search_query.clear();
        self.search_results.clear();
        self.search_selected = 0;
        self.mode = Mode::Search;
    }

    pub fn close_search(&mut self) {
        self.search_target = None;
        self.search_query.clear();
        self.search_results.clear();
        self.search_selected = 0;
        if self.mode == Mode::Search {
            self.mode = Mode::Normal;
        }
    }

    /// Reacts to an edited search query.
    ///
    /// Below two characters nothing is sent and stale results are
    /// dropped; from two characters on, every edit sends one search
    /// request.
    pub fn update_user_search(&mut self) {
        let Some(target) = self.search_target else {
            return;
        };
        let query = self.search_query.trim().to_string();
        if query.chars().count() < 2 {
            self.search_results.clear();
            self.search_selected = 0;
            return;
        }
        self.in_flight.search = true;
        self.outbox.push(ApiRequest::SearchUsers { target, query });
    }

    /// Uses the highlighted search result for the target the search
    /// was opened for.
    pub fn choose_search_result(&mut self) {
        let Some(target) = self.search_target else {
            return;
        };
        let Some(email) = self
            .search_results
            .get(self.search_selected)
            .map(|hit| hit.email.clone())
        else {
            return;
        };
        match target {
            SearchTarget::AssignHead(committee) => {
                if self.in_flight.assign_head {
                    return;
                }
                if let Err(error) = can_assign_head(self.is_admin()) {
                    self.status_message = Some(error.to_string());
                    return;
                }
                self.in_flight.assign_head = true;
                self.outbox.push(ApiRequest::AssignHead { committee, email });
            }
            SearchTarget::AssignCoHead => {
                let verdict = {
                    let Some(state) = self.committee_state.as_ref() else {
                        return;
                    };
                    match state.my.committee_name {
                        Some(committee) => {
                            can_assign_cohead(state, committee).map(|_| committee)
                        }
                        None => return,
                    }
                };
                match verdict {
                    Ok(committee) => {
                        if self.in_flight.assign_cohead {
                            return;
                        }
                        self.in_flight.assign_cohead = true;
                        self.outbox
                            .push(ApiRequest::AssignCoHead { committee, email });
                    }
                    Err(error) => self.status_message = Some(error.to_string()),
                }
            }
            SearchTarget::Organizer(event_id) => {
                if self.in_flight.add_organizer {
                    return;
                }
                self.in_flight.add_organizer = true;
                self.outbox.push(ApiRequest::AddOrganizer { event_id, email });
            }
        }
    }

    // --- dashboard ---

    pub fn selected_setting(&self) -> Option<&Setting> {
        self.settings.get(self.settings_selected)
    }

    pub fn selected_variable(&self) -> Option<&Variable> {
        self.variables.get(self.variables_selected)
    }

    pub fn selected_branch_event(&self) -> Option<&Event> {
        self.branch_events.get(self.branch_selected)
    }

    pub fn selected_organizer(&self) -> Option<&Organizer> {
        self.selected_branch_event()?
            .organizers
            .get(self.organizer_selected)
    }

    /// Flips the setting under the cursor.
    pub fn toggle_selected_setting(&mut self) {
        if self.in_flight.update_setting {
            return;
        }
        let Some((key, value)) = self
            .selected_setting()
            .map(|setting| (setting.key.clone(), !setting.value))
        else {
            return;
        };
        self.in_flight.update_setting = true;
        self.outbox.push(ApiRequest::UpdateSetting { key, value });
    }

    pub fn start_variable_create(&mut self) {
        self.var_edit = Some(VariableEdit::for_new());
    }

    pub fn start_variable_edit(&mut self) {
        let Some(variable) = self.selected_variable() else {
            return;
        };
        self.var_edit = Some(VariableEdit::for_variable(variable));
    }

    pub fn cancel_variable_edit(&mut self) {
        self.var_edit = None;
    }

    /// Saves the open variable editor.
    pub fn submit_variable_edit(&mut self) {
        if self.in_flight.upsert_variable {
            return;
        }
        let Some((key, value)) = self.var_edit.as_ref().map(|edit| {
            (
                edit.key
                    .clone()
                    .unwrap_or_else(|| edit.key_input.trim().to_string()),
                edit.value_input.clone(),
            )
        }) else {
            return;
        };
        if key.is_empty() {
            self.status_message = Some("Variable key is required".to_string());
            return;
        }
        self.in_flight.upsert_variable = true;
        self.outbox.push(ApiRequest::UpsertVariable { key, value });
    }

    pub fn start_event_create(&mut self) {
        self.event_edit = Some(EventEdit::for_new());
    }

    /// Opens the detail editor for the event under the cursor.
    /// Published events must be unpublished first.
    pub fn start_event_edit(&mut self) {
        let Some(event) = self.selected_branch_event() else {
            return;
        };
        if event.published {
            self.status_message = Some("Unpublish the event before editing it".to_string());
            return;
        }
        self.event_edit = Some(EventEdit::for_event(event));
    }

    pub fn cancel_event_editor(&mut self) {
        self.event_edit = None;
    }

    /// Saves the open event editor, creating or updating as appropriate.
    pub fn submit_event_editor(&mut self) {
        let Some(edit) = self.event_edit.clone() else {
            return;
        };
        match edit.event_id {
            None => {
                if self.in_flight.create_event {
                    return;
                }
                let name = edit.name.trim().to_string();
                if name.is_empty() {
                    self.status_message = Some("Event name is required".to_string());
                    return;
                }
                self.in_flight.create_event = true;
                self.outbox.push(ApiRequest::CreateEvent {
                    name,
                    event_type: EventType::ALL[edit.event_type % EventType::ALL.len()],
                });
            }
            Some(event_id) => {
                if self.in_flight.update_event {
                    return;
                }
                match edit.to_payload() {
                    Ok(details) => {
                        self.in_flight.update_event = true;
                        self.outbox.push(ApiRequest::UpdateEvent { event_id, details });
                    }
                    Err(message) => self.status_message = Some(message),
                }
            }
        }
    }

    /// Flips the publish state of the event under the cursor.
    pub fn toggle_publish_selected_event(&mut self) {
        if self.in_flight.publish_event {
            return;
        }
        let Some((event_id, published)) = self
            .selected_branch_event()
            .map(|event| (event.id, !event.published))
        else {
            return;
        };
        self.in_flight.publish_event = true;
        self.outbox.push(ApiRequest::PublishEvent {
            event_id,
            published,
        });
    }

    /// Asks for confirmation before deleting the event under the
    /// cursor. Published events must be unpublished first.
    pub fn request_delete_selected_event(&mut self) {
        let Some((event_id, name, published)) = self
            .selected_branch_event()
            .map(|event| (event.id, event.name.clone(), event.published))
        else {
            return;
        };
        if published {
            self.status_message = Some("Unpublish the event before deleting it".to_string());
            return;
        }
        self.confirm = Some(Confirmation {
            prompt: format!("Delete the event '{}'? This cannot be undone.", name),
            action: ConfirmAction::DeleteEvent(event_id),
        });
        self.mode = Mode::Confirm;
    }

    /// Removes the highlighted organizer from the selected event.
    pub fn remove_selected_organizer(&mut self) {
        if self.in_flight.remove_organizer {
            return;
        }
        let Some((event_id, user_id)) = self.selected_branch_event().and_then(|event| {
            event
                .organizers
                .get(self.organizer_selected)
                .map(|organizer| (event.id, organizer.user_id))
        }) else {
            return;
        };
        self.in_flight.remove_organizer = true;
        self.outbox
            .push(ApiRequest::RemoveOrganizer { event_id, user_id });
    }

    // --- outcomes ---

    /// Folds one worker response into the state.
    ///
    /// Successful mutations show their toast and queue a fresh fetch
    /// of the data they touched; the server response itself is never
    /// merged in. An unauthorized response on an authenticated call
    /// drops the session and returns to the login screen.
    pub fn apply_outcome(&mut self, outcome: ApiOutcome) {
        match outcome {
            ApiOutcome::Login(result) => {
                self.in_flight.login = false;
                match result {
                    Ok(session) => self.install_session(session, "Logged in successfully"),
                    Err(error) => self.handle_signin_error(error, "Could not log in"),
                }
            }
            ApiOutcome::Signup(result) => {
                self.in_flight.signup = false;
                match result {
                    Ok(()) => {
                        self.register_step = RegisterStep::Otp;
                        self.status_message =
                            Some("OTP sent to your email. Check your inbox.".to_string());
                    }
                    Err(error) => self.handle_signin_error(error, "Could not sign up"),
                }
            }
            ApiOutcome::VerifyOtp(result) => {
                self.in_flight.verify_otp = false;
                match result {
                    Ok(session) => {
                        self.install_session(session, "Email verified. You are now logged in!")
                    }
                    Err(error) => self.handle_signin_error(error, "Could not verify OTP"),
                }
            }
            ApiOutcome::Me(result) => {
                self.in_flight.me = false;
                match result {
                    Ok(user) => {
                        if let Some(session) = self.session.as_mut() {
                            session.user = user;
                            self.session_dirty = true;
                        }
                    }
                    Err(error) => {
                        self.handle_api_error(error, "Could not refresh your profile")
                    }
                }
            }
            ApiOutcome::Colleges(result) => {
                self.in_flight.colleges = false;
                match result {
                    Ok(colleges) => self.colleges = colleges,
                    Err(error) => self.handle_api_error(error, "Failed to load colleges."),
                }
            }
            ApiOutcome::CommitteeState(result) => {
                self.in_flight.committee_state = false;
                match result {
                    Ok(state) => {
                        self.grid_selected =
                            clamp_index(self.grid_selected, state.committees.len());
                        self.admin_selected =
                            clamp_index(self.admin_selected, state.committees.len());
                        let roster_len = match self.roster_tab {
                            RosterTab::Pending => state.pending_applicants.len(),
                            RosterTab::Approved => state.approved_members.len(),
                        };
                        self.roster_selected = clamp_index(self.roster_selected, roster_len);
                        self.committee_error = None;
                        self.committee_state = Some(state);
                    }
                    Err(error) => {
                        if error.is_unauthorized() {
                            self.expire_session();
                        } else {
                            self.committee_error =
                                Some(failure_message(&error, "Failed to load committee data."));
                        }
                    }
                }
            }
            ApiOutcome::Apply(result) => {
                self.in_flight.apply = false;
                match result {
                    Ok(()) => {
                        self.status_message = Some("Applied to committee".to_string());
                        self.refresh_committee_state();
                    }
                    Err(error) => self.handle_api_error(error, "Could not apply"),
                }
            }
            ApiOutcome::ApproveMember(result) => {
                self.in_flight.approve = false;
                match result {
                    Ok(()) => {
                        self.status_message = Some("Member approved".to_string());
                        self.refresh_committee_state();
                    }
                    Err(error) => self.handle_api_error(error, "Could not approve member"),
                }
            }
            ApiOutcome::AssignHead(result) => {
                self.in_flight.assign_head = false;
                match result {
                    Ok(()) => {
                        self.status_message = Some("Head assigned".to_string());
                        self.close_search();
                        self.refresh_committee_state();
                    }
                    Err(error) => self.handle_api_error(error, "Could not assign head"),
                }
            }
            ApiOutcome::AssignCoHead(result) => {
                self.in_flight.assign_cohead = false;
                match result {
                    Ok(()) => {
                        self.status_message = Some("Co-head assigned".to_string());
                        self.close_search();
                        self.refresh_committee_state();
                    }
                    Err(error) => self.handle_api_error(error, "Could not assign co-head"),
                }
            }
            ApiOutcome::UserSearch {
                target,
                query,
                result,
            } => {
                // Stale echoes are dropped; a newer request is on its way
                if self.search_target != Some(target) || query != self.search_query.trim() {
                    return;
                }
                self.in_flight.search = false;
                match result {
                    Ok(users) => {
                        self.search_results = users;
                        self.search_selected = 0;
                    }
                    Err(error) => self.handle_api_error(error, "Search failed"),
                }
            }
            ApiOutcome::Events(result) => {
                self.in_flight.events = false;
                match result {
                    Ok(events) => {
                        self.events_selected = clamp_index(self.events_selected, events.len());
                        self.events = events;
                    }
                    Err(error) => self.handle_api_error(error, "Failed to load events."),
                }
            }
            ApiOutcome::BranchEvents(result) => {
                self.in_flight.branch_events = false;
                match result {
                    Ok(batch) => {
                        self.branch_selected =
                            clamp_index(self.branch_selected, batch.events.len());
                        let organizer_len = batch
                            .events
                            .get(self.branch_selected)
                            .map(|event| event.organizers.len())
                            .unwrap_or(0);
                        self.organizer_selected =
                            clamp_index(self.organizer_selected, organizer_len);
                        self.branch_name = batch.branch_name;
                        self.branch_events = batch.events;
                    }
                    Err(error) => self.handle_api_error(error, "Failed to load branch events."),
                }
            }
            ApiOutcome::CreateEvent(result) => {
                self.in_flight.create_event = false;
                match result {
                    Ok(()) => {
                        self.status_message = Some("Event created".to_string());
                        self.event_edit = None;
                        self.refresh_branch_events();
                    }
                    Err(error) => self.handle_api_error(error, "Failed to create event"),
                }
            }
            ApiOutcome::UpdateEvent(result) => {
                self.in_flight.update_event = false;
                match result {
                    Ok(()) => {
                        self.status_message = Some("Event updated".to_string());
                        self.event_edit = None;
                        self.refresh_branch_events();
                    }
                    Err(error) => self.handle_api_error(error, "Failed to update event"),
                }
            }
            ApiOutcome::PublishEvent(result) => {
                self.in_flight.publish_event = false;
                match result {
                    Ok(()) => {
                        self.status_message = Some("Publish state updated".to_string());
                        self.refresh_branch_events();
                    }
                    Err(error) => self.handle_api_error(error, "Failed to update publish state"),
                }
            }
            ApiOutcome::DeleteEvent(result) => {
                self.in_flight.delete_event = false;
                match result {
                    Ok(()) => {
                        self.status_message = Some("Event deleted".to_string());
                        self.refresh_branch_events();
                    }
                    Err(error) => self.handle_api_error(error, "Failed to delete event"),
                }
            }
            ApiOutcome::AddOrganizer(result) => {
                self.in_flight.add_organizer = false;
                match result {
                    Ok(()) => {
                        self.status_message = Some("Organizer added".to_string());
                        self.close_search();
                        self.refresh_branch_events();
                    }
                    Err(error) => self.handle_api_error(error, "Failed to add organizer"),
                }
            }
            ApiOutcome::RemoveOrganizer(result) => {
                self.in_flight.remove_organizer = false;
                match result {
                    Ok(()) => {
                        self.status_message = Some("Organizer removed".to_string());
                        self.refresh_branch_events();
                    }
                    Err(error) => self.handle_api_error(error, "Failed to remove organizer"),
                }
            }
            ApiOutcome::Settings(result) => {
                self.in_flight.settings = false;
                match result {
                    Ok(settings) => {
                        self.settings_selected =
                            clamp_index(self.settings_selected, settings.len());
                        self.settings = settings;
                    }
                    Err(error) => self.handle_api_error(error, "Failed to load settings."),
                }
            }
            ApiOutcome::UpdateSetting(result) => {
                self.in_flight.update_setting = false;
                match result {
                    Ok(()) => {
                        self.status_message = Some("Setting updated".to_string());
                        self.refresh_settings();
                    }
                    Err(error) => self.handle_api_error(error, "Failed to update setting"),
                }
            }
            ApiOutcome::Variables(result) => {
                self.in_flight.variables = false;
                match result {
                    Ok(variables) => {
                        self.variables_selected =
                            clamp_index(self.variables_selected, variables.len());
                        self.variables = variables;
                    }
                    Err(error) => self.handle_api_error(error, "Failed to load variables."),
                }
            }
            ApiOutcome::UpsertVariable(result) => {
                self.in_flight.upsert_variable = false;
                match result {
                    Ok(()) => {
                        self.status_message = Some("Variable saved".to_string());
                        self.var_edit = None;
                        self.refresh_variables();
                    }
                    Err(error) => self.handle_api_error(error, "Failed to save variable"),
                }
            }
        }
    }

    fn handle_api_error(&mut self, error: ApiError, fallback: &str) {
        if error.is_unauthorized() {
            self.expire_session();
            return;
        }
        self.status_message = Some(failure_message(&error, fallback));
    }

    // Rejected credentials come back as 401 here, which is not an
    // expired session
    fn handle_signin_error(&mut self, error: ApiError, fallback: &str) {
        let message = match &error {
            ApiError::Unauthorized => fallback.to_string(),
            _ => failure_message(&error, fallback),
        };
        self.status_message = Some(message);
    }
}

fn failure_message(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::Network(_) | ApiError::Decode(_) => NETWORK_ERROR.to_string(),
        _ => error
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CommitteeRole, MembershipStatus, MyMembership, PortalUser, RolePanel,
    };

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
            name: Some(format!("Applicant {}", membership_id)),
            email: format!("applicant{}@example.com", membership_id),
            phone_number: None,
            status,
        }
    }

    fn open_state() -> CommitteeState {
        CommitteeState {
            is_committee_reg_open: true,
            committees: vec![
                committee(1, CommitteeName::Media),
                committee(2, CommitteeName::Cultural),
            ],
            my: MyMembership::default(),
            pending_applicants: Vec::new(),
            approved_members: Vec::new(),
        }
    }

    fn head_state() -> CommitteeState {
        CommitteeState {
            is_committee_reg_open: true,
            committees: vec![committee(1, CommitteeName::Media)],
            my: MyMembership {
                role: Some(CommitteeRole::Head),
                committee_id: Some(1),
                committee_name: Some(CommitteeName::Media),
                status: Some(MembershipStatus::Approved),
            },
            pending_applicants: vec![applicant(41, MembershipStatus::Pending)],
            approved_members: vec![applicant(7, MembershipStatus::Approved)],
        }
    }

    fn session_with_roles(roles: &[&str]) -> Session {
        Session {
            token: "token-1".to_string(),
            user: PortalUser {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                roles: roles.iter().map(|r| r.to_string()).collect(),
                is_branch_rep: false,
            },
        }
    }

    fn signed_in_app() -> App {
        let mut app = App::default();
        app.session = Some(session_with_roles(&[]));
        app.screen = Screen::Committees;
        app
    }

    fn app_with_state(state: CommitteeState) -> App {
        let mut app = signed_in_app();
        app.committee_state = Some(state);
        app
    }

    fn hit(id: u64, name: &str) -> UserHit {
        UserHit {
            id,
            name: Some(name.to_string()),
            email: format!("{}@example.com", name.to_lowercase()),
            phone_number: None,
        }
    }

    fn event(id: u64, name: &str, published: bool) -> Event {
        Event {
            id,
            name: name.to_string(),
            description: None,
            venue: None,
            fees: 0,
            min_team_size: 1,
            max_team_size: 1,
            max_teams: None,
            event_type: EventType::Individual,
            category: None,
            tier: None,
            published,
            organizers: Vec::new(),
        }
    }

    #[test]
    fn test_apply_asks_for_confirmation_then_requests() {
        let mut app = app_with_state(open_state());
        app.request_apply_confirmation();
        assert_eq!(app.mode, Mode::Confirm);
        assert!(app.confirm.is_some());
        // Nothing goes out until the dialog is confirmed
        assert!(app.take_outbox().is_empty());

        app.confirm_pending_action();
        let requests = app.take_outbox();
        assert_eq!(requests.len(), 1);
        assert!(matches!(
            requests[0],
            ApiRequest::Apply {
                committee: CommitteeName::Media
            }
        ));
        assert!(app.in_flight.apply);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_apply_success_toasts_and_refetches() {
        let mut app = app_with_state(open_state());
        app.in_flight.apply = true;
        app.apply_outcome(ApiOutcome::Apply(Ok(())));
        assert!(!app.in_flight.apply);
        assert_eq!(app.status_message.as_deref(), Some("Applied to committee"));
        let requests = app.take_outbox();
        assert!(matches!(requests[..], [ApiRequest::FetchCommitteeState]));
        assert!(app.in_flight.committee_state);
    }

    #[test]
    fn test_apply_blocked_while_closed() {
        let mut state = open_state();
        state.is_committee_reg_open = false;
        let mut app = app_with_state(state);
        app.request_apply_confirmation();
        assert!(app.confirm.is_none());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Committee applications are closed")
        );
        assert!(app.take_outbox().is_empty());
    }

    #[test]
    fn test_apply_blocked_with_existing_membership() {
        let mut state = open_state();
        state.my = MyMembership {
            role: Some(CommitteeRole::Member),
            committee_id: Some(2),
            committee_name: Some(CommitteeName::Cultural),
            status: Some(MembershipStatus::Pending),
        };
        let mut app = app_with_state(state);
        app.request_apply_confirmation();
        assert!(app.confirm.is_none());
        assert_eq!(
            app.status_message.as_deref(),
            Some("You can only apply to one committee")
        );
        assert!(app.take_outbox().is_empty());
    }

    #[test]
    fn test_failed_apply_keeps_snapshot_and_shows_server_message() {
        let mut app = app_with_state(open_state());
        app.in_flight.apply = true;
        app.apply_outcome(ApiOutcome::Apply(Err(ApiError::Api {
            status: 400,
            message: "You can only apply to one committee".to_string(),
        })));
        assert_eq!(
            app.status_message.as_deref(),
            Some("You can only apply to one committee")
        );
        // No refetch on failure, and the snapshot is untouched
        assert!(app.take_outbox().is_empty());
        let state = app.committee_state.as_ref().unwrap();
        assert!(state.my.role.is_none());
        assert!(state.is_committee_reg_open);
    }

    #[test]
    fn test_network_failure_reads_generically() {
        let mut app = app_with_state(open_state());
        app.in_flight.apply = true;
        app.apply_outcome(ApiOutcome::Apply(Err(ApiError::Network(
            "connection refused".to_string(),
        ))));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Network error. Please try again.")
        );
    }

    #[test]
    fn test_unauthorized_response_expires_session() {
        let mut app = app_with_state(open_state());
        app.in_flight.committee_state = true;
        app.apply_outcome(ApiOutcome::CommitteeState(Err(ApiError::Unauthorized)));
        assert!(app.session.is_none());
        assert!(app.take_session_dirty());
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Session expired. Please log in again.")
        );
        assert!(app.committee_state.is_none());
    }

    #[test]
    fn test_search_needs_two_characters() {
        let mut app = app_with_state(head_state());
        app.start_cohead_search();
        assert_eq!(app.mode, Mode::Search);

        app.search_query.push('r');
        app.update_user_search();
        assert!(app.take_outbox().is_empty());

        app.search_query.push('i');
        app.update_user_search();
        let requests = app.take_outbox();
        assert_eq!(requests.len(), 1);
        match &requests[0] {
            ApiRequest::SearchUsers { target, query } => {
                assert_eq!(*target, SearchTarget::AssignCoHead);
                assert_eq!(query, "ri");
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_shrinking_query_below_two_clears_results() {
        let mut app = app_with_state(head_state());
        app.start_cohead_search();
        app.search_query = "ra".to_string();
        app.search_results = vec![hit(7, "Ravi")];
        app.search_query.pop();
        app.update_user_search();
        assert!(app.search_results.is_empty());
        assert!(app.take_outbox().is_empty());
    }

    #[test]
    fn test_stale_search_results_are_dropped() {
        let mut app = app_with_state(head_state());
        app.start_cohead_search();
        app.search_query = "rav".to_string();
        app.in_flight.search = true;

        app.apply_outcome(ApiOutcome::UserSearch {
            target: SearchTarget::AssignCoHead,
            query: "ra".to_string(),
            result: Ok(vec![hit(7, "Ravi")]),
        });
        assert!(app.search_results.is_empty());
        assert!(app.in_flight.search);

        app.apply_outcome(ApiOutcome::UserSearch {
            target: SearchTarget::AssignCoHead,
            query: "rav".to_string(),
            result: Ok(vec![hit(7, "Ravi")]),
        });
        assert_eq!(app.search_results.len(), 1);
        assert!(!app.in_flight.search);
    }

    #[test]
    fn test_cohead_assignment_clears_search_and_refetches() {
        let mut app = app_with_state(head_state());
        app.start_cohead_search();
        app.search_query = "ra".to_string();
        app.search_results = vec![hit(7, "Ravi")];

        app.choose_search_result();
        let requests = app.take_outbox();
        assert!(matches!(
            &requests[..],
            [ApiRequest::AssignCoHead {
                committee: CommitteeName::Media,
                email
            }] if email == "ravi@example.com"
        ));

        app.apply_outcome(ApiOutcome::AssignCoHead(Ok(())));
        assert_eq!(app.status_message.as_deref(), Some("Co-head assigned"));
        assert!(app.search_target.is_none());
        assert!(app.search_results.is_empty());
        assert_eq!(app.mode, Mode::Normal);
        assert!(matches!(
            app.take_outbox()[..],
            [ApiRequest::FetchCommitteeState]
        ));
    }

    #[test]
    fn test_approve_sends_membership_id_and_refetches() {
        let mut app = app_with_state(head_state());
        app.approve_selected_applicant();
        assert!(app.in_flight.approve);
        let requests = app.take_outbox();
        assert!(matches!(
            requests[..],
            [ApiRequest::ApproveMember { membership_id: 41 }]
        ));

        app.apply_outcome(ApiOutcome::ApproveMember(Ok(())));
        assert_eq!(app.status_message.as_deref(), Some("Member approved"));
        assert!(matches!(
            app.take_outbox()[..],
            [ApiRequest::FetchCommitteeState]
        ));
    }

    #[test]
    fn test_approve_rejected_for_non_head() {
        let mut state = open_state();
        state.pending_applicants = vec![applicant(41, MembershipStatus::Pending)];
        let mut app = app_with_state(state);
        app.approve_selected_applicant();
        assert_eq!(
            app.status_message.as_deref(),
            Some("Only a committee head can do that")
        );
        assert!(app.take_outbox().is_empty());
    }

    #[test]
    fn test_head_search_requires_admin() {
        let mut app = app_with_state(open_state());
        app.start_head_search();
        assert_eq!(
            app.status_message.as_deref(),
            Some("Only an admin can do that")
        );
        assert!(app.search_target.is_none());
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_admin_head_assignment() {
        let mut app = app_with_state(open_state());
        app.session = Some(session_with_roles(&["ADMIN"]));
        app.admin_selected = 1;
        app.start_head_search();
        assert_eq!(
            app.search_target,
            Some(SearchTarget::AssignHead(CommitteeName::Cultural))
        );

        app.search_query = "ra".to_string();
        app.search_results = vec![hit(7, "Ravi")];
        app.choose_search_result();
        let requests = app.take_outbox();
        assert!(matches!(
            &requests[..],
            [ApiRequest::AssignHead {
                committee: CommitteeName::Cultural,
                email
            }] if email == "ravi@example.com"
        ));

        app.apply_outcome(ApiOutcome::AssignHead(Ok(())));
        assert_eq!(app.status_message.as_deref(), Some("Head assigned"));
        assert!(matches!(
            app.take_outbox()[..],
            [ApiRequest::FetchCommitteeState]
        ));
    }

    #[test]
    fn test_duplicate_requests_are_suppressed() {
        let mut app = signed_in_app();
        app.refresh_committee_state();
        app.refresh_committee_state();
        assert_eq!(app.take_outbox().len(), 1);
    }

    #[test]
    fn test_login_flow_installs_session() {
        let mut app = App::default();
        app.login_email = "asha@example.com".to_string();
        app.login_password = "secret123".to_string();
        app.submit_login();
        assert!(app.in_flight.login);
        assert!(matches!(app.take_outbox()[..], [ApiRequest::Login { .. }]));

        app.apply_outcome(ApiOutcome::Login(Ok(session_with_roles(&[]))));
        assert!(app.session.is_some());
        assert!(app.take_session_dirty());
        assert_eq!(app.screen, Screen::Events);
        assert!(app.login_password.is_empty());
    }

    #[test]
    fn test_rejected_login_stays_on_login_screen() {
        let mut app = App::default();
        app.in_flight.login = true;
        app.apply_outcome(ApiOutcome::Login(Err(ApiError::Unauthorized)));
        assert!(app.session.is_none());
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.status_message.as_deref(), Some("Could not log in"));
    }

    #[test]
    fn test_registration_validation_blocks_submission() {
        let mut app = App::default();
        app.register_form.email = "not-an-email".to_string();
        app.submit_registration();
        assert!(app.take_outbox().is_empty());
        assert_eq!(app.status_message.as_deref(), Some("Name is required"));
    }

    #[test]
    fn test_signup_then_otp_logs_in() {
        let mut app = App::default();
        app.register_form.name = "Asha".to_string();
        app.register_form.email = "asha@example.com".to_string();
        app.register_form.password = "secret123".to_string();
        app.register_form.confirm_password = "secret123".to_string();
        app.register_form.phone_number = "9876543210".to_string();
        app.register_form.selection = Some(CollegeSelection::Nmamit);

        app.submit_registration();
        assert!(matches!(app.take_outbox()[..], [ApiRequest::Signup { .. }]));

        app.apply_outcome(ApiOutcome::Signup(Ok(())));
        assert_eq!(app.register_step, RegisterStep::Otp);
        assert_eq!(
            app.status_message.as_deref(),
            Some("OTP sent to your email. Check your inbox.")
        );

        app.otp_input = "123456".to_string();
        app.submit_otp();
        let requests = app.take_outbox();
        assert!(matches!(
            &requests[..],
            [ApiRequest::VerifyOtp { email, otp }] if email == "asha@example.com" && otp == "123456"
        ));

        app.apply_outcome(ApiOutcome::VerifyOtp(Ok(session_with_roles(&[]))));
        assert!(app.session.is_some());
        assert_eq!(app.screen, Screen::Events);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Email verified. You are now logged in!")
        );
    }

    #[test]
    fn test_register_focus_skips_hidden_fields() {
        let mut app = App::default();
        app.register_focus = 5;
        app.register_focus_next();
        // Without a category choice the college and year fields stay hidden
        assert_eq!(app.register_focus, 0);

        app.register_form.selection = Some(CollegeSelection::Other);
        app.register_focus = 5;
        app.register_focus_next();
        assert_eq!(app.register_focus, 6);

        app.register_form.selection = Some(CollegeSelection::Alumni);
        app.register_focus = 5;
        app.register_focus_next();
        assert_eq!(app.register_focus, 7);
    }

    #[test]
    fn test_dashboard_needs_access() {
        let mut app = signed_in_app();
        app.screen = Screen::Events;
        app.show_dashboard();
        assert_eq!(app.screen, Screen::Events);
        assert_eq!(app.status_message.as_deref(), Some("Access required."));
        assert!(app.take_outbox().is_empty());
    }

    #[test]
    fn test_admin_dashboard_starts_on_settings() {
        let mut app = App::default();
        app.session = Some(session_with_roles(&["ADMIN"]));
        app.show_dashboard();
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.dash_tab, DashTab::Settings);
        assert!(matches!(app.take_outbox()[..], [ApiRequest::FetchSettings]));
    }

    #[test]
    fn test_branch_rep_dashboard_shows_branch_events() {
        let mut app = App::default();
        let mut session = session_with_roles(&[]);
        session.user.is_branch_rep = true;
        app.session = Some(session);
        app.show_dashboard();
        assert_eq!(app.dash_tab, DashTab::BranchEvents);
        assert!(matches!(
            app.take_outbox()[..],
            [ApiRequest::FetchBranchEvents]
        ));
    }

    #[test]
    fn test_setting_toggle_round_trip() {
        let mut app = App::default();
        app.session = Some(session_with_roles(&["ADMIN"]));
        app.settings = vec![Setting {
            id: 1,
            key: "isCommitteeRegOpen".to_string(),
            value: false,
        }];
        app.toggle_selected_setting();
        let requests = app.take_outbox();
        assert!(matches!(
            &requests[..],
            [ApiRequest::UpdateSetting { key, value: true }] if key == "isCommitteeRegOpen"
        ));

        app.apply_outcome(ApiOutcome::UpdateSetting(Ok(())));
        assert_eq!(app.status_message.as_deref(), Some("Setting updated"));
        assert!(matches!(app.take_outbox()[..], [ApiRequest::FetchSettings]));
    }

    #[test]
    fn test_variable_editor_round_trip() {
        let mut app = App::default();
        app.session = Some(session_with_roles(&["ADMIN"]));
        app.variables = vec![Variable {
            id: 1,
            key: "heroTitle".to_string(),
            value: "Utsav".to_string(),
        }];
        app.start_variable_edit();
        if let Some(edit) = app.var_edit.as_mut() {
            edit.value_input = "Utsav 2026".to_string();
        }
        app.submit_variable_edit();
        let requests = app.take_outbox();
        assert!(matches!(
            &requests[..],
            [ApiRequest::UpsertVariable { key, value }]
                if key == "heroTitle" && value == "Utsav 2026"
        ));

        app.apply_outcome(ApiOutcome::UpsertVariable(Ok(())));
        assert_eq!(app.status_message.as_deref(), Some("Variable saved"));
        assert!(app.var_edit.is_none());
        assert!(matches!(
            app.take_outbox()[..],
            [ApiRequest::FetchVariables]
        ));
    }

    #[test]
    fn test_published_event_cannot_be_deleted() {
        let mut app = signed_in_app();
        app.branch_events = vec![event(9, "Hackathon", true)];
        app.request_delete_selected_event();
        assert!(app.confirm.is_none());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Unpublish the event before deleting it")
        );
        assert!(app.take_outbox().is_empty());
    }

    #[test]
    fn test_published_event_cannot_be_edited() {
        let mut app = signed_in_app();
        app.branch_events = vec![event(9, "Hackathon", true)];
        app.start_event_edit();
        assert!(app.event_edit.is_none());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Unpublish the event before editing it")
        );
    }

    #[test]
    fn test_unpublished_event_delete_confirms_first() {
        let mut app = signed_in_app();
        app.branch_events = vec![event(9, "Hackathon", false)];
        app.request_delete_selected_event();
        assert!(app.confirm.is_some());
        app.confirm_pending_action();
        assert!(matches!(
            app.take_outbox()[..],
            [ApiRequest::DeleteEvent { event_id: 9 }]
        ));

        app.apply_outcome(ApiOutcome::DeleteEvent(Ok(())));
        assert_eq!(app.status_message.as_deref(), Some("Event deleted"));
        assert!(matches!(
            app.take_outbox()[..],
            [ApiRequest::FetchBranchEvents]
        ));
    }

    #[test]
    fn test_event_editor_parses_numbers() {
        let source = event(9, "Hackathon", false);
        let mut edit = EventEdit::for_event(&source);
        edit.fees = "abc".to_string();
        assert_eq!(edit.to_payload(), Err("Fees must be a number".to_string()));

        edit.fees = "250".to_string();
        edit.min_team_size = "2".to_string();
        edit.max_team_size = "4".to_string();
        edit.max_teams = "".to_string();
        let payload = edit.to_payload().unwrap();
        assert_eq!(payload.fees, 250);
        assert_eq!(payload.min_team_size, 2);
        assert_eq!(payload.max_team_size, 4);
        assert_eq!(payload.max_teams, None);

        edit.min_team_size = "5".to_string();
        assert_eq!(
            edit.to_payload(),
            Err("Minimum team size cannot exceed the maximum".to_string())
        );
    }

    #[test]
    fn test_event_editor_submission_updates() {
        let mut app = signed_in_app();
        app.branch_events = vec![event(9, "Hackathon", false)];
        app.start_event_edit();
        if let Some(edit) = app.event_edit.as_mut() {
            edit.venue = "Main auditorium".to_string();
        }
        app.submit_event_editor();
        assert!(app.in_flight.update_event);
        let requests = app.take_outbox();
        match &requests[..] {
            [ApiRequest::UpdateEvent { event_id, details }] => {
                assert_eq!(*event_id, 9);
                assert_eq!(details.venue, "Main auditorium");
            }
            other => panic!("unexpected requests: {:?}", other),
        }

        app.apply_outcome(ApiOutcome::UpdateEvent(Ok(())));
        assert_eq!(app.status_message.as_deref(), Some("Event updated"));
        assert!(app.event_edit.is_none());
    }

    #[test]
    fn test_event_creation_needs_only_name_and_type() {
        let mut app = signed_in_app();
        app.start_event_create();
        app.submit_event_editor();
        assert_eq!(app.status_message.as_deref(), Some("Event name is required"));
        assert!(app.take_outbox().is_empty());

        if let Some(edit) = app.event_edit.as_mut() {
            edit.name = "Quiz".to_string();
            edit.event_type = 1;
        }
        app.submit_event_editor();
        let requests = app.take_outbox();
        assert!(matches!(
            &requests[..],
            [ApiRequest::CreateEvent { name, event_type: EventType::Team }] if name == "Quiz"
        ));
    }

    #[test]
    fn test_organizer_add_and_remove() {
        let mut app = signed_in_app();
        let mut hackathon = event(9, "Hackathon", false);
        hackathon.organizers = vec![Organizer {
            user_id: 31,
            name: Some("Ravi".to_string()),
            email: "ravi@example.com".to_string(),
            phone_number: None,
        }];
        app.branch_events = vec![hackathon];

        app.start_organizer_search();
        assert_eq!(app.search_target, Some(SearchTarget::Organizer(9)));
        app.search_query = "pr".to_string();
        app.search_results = vec![hit(32, "Priya")];
        app.choose_search_result();
        assert!(matches!(
            &app.take_outbox()[..],
            [ApiRequest::AddOrganizer { event_id: 9, email }] if email == "priya@example.com"
        ));
        app.apply_outcome(ApiOutcome::AddOrganizer(Ok(())));
        assert_eq!(app.status_message.as_deref(), Some("Organizer added"));
        assert!(matches!(
            app.take_outbox()[..],
            [ApiRequest::FetchBranchEvents]
        ));

        app.branch_focus = BranchFocus::Organizers;
        app.remove_selected_organizer();
        assert!(matches!(
            app.take_outbox()[..],
            [ApiRequest::RemoveOrganizer {
                event_id: 9,
                user_id: 31
            }]
        ));
    }

    #[test]
    fn test_events_filter_by_category_and_name() {
        let mut app = App::default();
        let mut coding = event(1, "Code Sprint", true);
        coding.category = Some(EventCategory::Technical);
        let mut dance = event(2, "Group Dance", true);
        dance.category = Some(EventCategory::NonTechnical);
        app.events = vec![coding, dance];

        assert_eq!(app.filtered_events().len(), 2);

        app.events_query = "dance".to_string();
        let filtered = app.filtered_events();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Group Dance");

        app.events_query.clear();
        app.events_category = 1 + EventCategory::ALL
            .iter()
            .position(|c| *c == EventCategory::Technical)
            .unwrap();
        let filtered = app.filtered_events();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Code Sprint");
    }

    #[test]
    fn test_committee_view_follows_refetched_state() {
        let mut app = app_with_state(open_state());
        assert_eq!(
            app.committee_view().map(|v| v.panel),
            Some(RolePanel::ApplicantGrid)
        );

        let mut joined = open_state();
        joined.my = MyMembership {
            role: Some(CommitteeRole::Member),
            committee_id: Some(1),
            committee_name: Some(CommitteeName::Media),
            status: Some(MembershipStatus::Pending),
        };
        app.in_flight.committee_state = true;
        app.apply_outcome(ApiOutcome::CommitteeState(Ok(joined)));
        assert_eq!(
            app.committee_view().map(|v| v.panel),
            Some(RolePanel::Member {
                committee: CommitteeName::Media,
                status: MembershipStatus::Pending,
            })
        );
    }

    #[test]
    fn test_logout_clears_session_and_data() {
        let mut app = app_with_state(head_state());
        app.settings = vec![Setting {
            id: 1,
            key: "isCommitteeRegOpen".to_string(),
            value: true,
        }];
        app.logout();
        assert!(app.session.is_none());
        assert!(app.take_session_dirty());
        assert_eq!(app.screen, Screen::Login);
        assert!(app.committee_state.is_none());
        assert!(app.settings.is_empty());
        assert_eq!(app.status_message.as_deref(), Some("Logged out"));
    }
}
