use crate::application::{App, BranchFocus, CommitteePane, DashTab, Mode, RegisterStep, RosterTab, Screen};
use crate::domain::RolePanel;
use crate::infrastructure::RosterExporter;
use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyModifiers};

const ROSTER_FILENAME: &str = "committee-roster.csv";

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            Mode::Normal => Self::handle_normal_mode(app, key, modifiers),
            Mode::Search => Self::handle_search_mode(app, key),
            Mode::Confirm => Self::handle_confirm_mode(app, key),
            Mode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('l') = key {
                app.logout();
                return;
            }
        }

        // Any other keypress replaces the previous toast
        app.status_message = None;

        match key {
            KeyCode::F(1) => {
                app.mode = Mode::Help;
                app.help_scroll = 0;
                return;
            }
            KeyCode::F(2) => {
                if app.is_signed_in() {
                    app.status_message = Some("Already signed in. Ctrl+L logs out".to_string());
                } else if matches!(app.screen, Screen::Login) {
                    app.show_register();
                } else {
                    app.show_login();
                }
                return;
            }
            KeyCode::F(3) => {
                app.show_events();
                return;
            }
            KeyCode::F(4) => {
                app.show_committees();
                return;
            }
            KeyCode::F(5) => {
                app.show_dashboard();
                return;
            }
            _ => {}
        }

        match app.screen {
            Screen::Login => Self::handle_login_keys(app, key),
            Screen::Register => Self::handle_register_keys(app, key),
            Screen::Events => Self::handle_events_keys(app, key),
            Screen::Committees => Self::handle_committee_keys(app, key),
            Screen::Dashboard => Self::handle_dashboard_keys(app, key),
        }
    }

    fn handle_login_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.submit_login(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                app.login_focus = (app.login_focus + 1) % 2;
            }
            KeyCode::Backspace => {
                Self::login_field(app).pop();
            }
            KeyCode::Char(c) => {
                Self::login_field(app).push(c);
            }
            KeyCode::Esc => app.show_events(),
            _ => {}
        }
    }

    fn login_field(app: &mut App) -> &mut String {
        if app.login_focus == 0 {
            &mut app.login_email
        } else {
            &mut app.login_password
        }
    }

    fn handle_register_keys(app: &mut App, key: KeyCode) {
        match app.register_step {
            RegisterStep::Details => Self::handle_register_form_keys(app, key),
            RegisterStep::Otp => Self::handle_otp_keys(app, key),
        }
    }

    fn handle_register_form_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.submit_registration(),
            KeyCode::Tab | KeyCode::Down => app.register_focus_next(),
            KeyCode::BackTab | KeyCode::Up => app.register_focus_prev(),
            KeyCode::Left => Self::cycle_register_choice(app, -1),
            KeyCode::Right => Self::cycle_register_choice(app, 1),
            KeyCode::Backspace => {
                if let Some(field) = Self::register_text_field(app) {
                    field.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = Self::register_text_field(app) {
                    field.push(c);
                }
            }
            KeyCode::Esc => app.show_login(),
            _ => {}
        }
    }

    fn cycle_register_choice(app: &mut App, step: isize) {
        match app.register_focus {
            5 => app.cycle_college_selection(step),
            6 => app.cycle_college_choice(step),
            _ => {}
        }
    }

    fn register_text_field(app: &mut App) -> Option<&mut String> {
        let focus = app.register_focus;
        let form = &mut app.register_form;
        match focus {
            0 => Some(&mut form.name),
            1 => Some(&mut form.email),
            2 => Some(&mut form.password),
            3 => Some(&mut form.confirm_password),
            4 => Some(&mut form.phone_number),
            7 => Some(&mut form.year_of_graduation),
            _ => None,
        }
    }

    fn handle_otp_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.submit_otp(),
            KeyCode::Backspace => {
                app.otp_input.pop();
            }
            KeyCode::Char(c) => app.otp_input.push(c),
            KeyCode::Esc => app.register_step = RegisterStep::Details,
            _ => {}
        }
    }

    fn handle_events_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.events_selected = app.events_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = app.filtered_events().len();
                if app.events_selected + 1 < len {
                    app.events_selected += 1;
                }
            }
            KeyCode::Char('/') => app.mode = Mode::Search,
            KeyCode::Char('c') => app.cycle_events_category(1),
            KeyCode::Char('C') => app.cycle_events_category(-1),
            KeyCode::Char('r') => app.refresh_events(),
            _ => {}
        }
    }

    fn handle_committee_keys(app: &mut App, key: KeyCode) {
        if app.is_admin() && matches!(app.committee_pane, CommitteePane::Admin) {
            Self::handle_admin_pane_keys(app, key);
            return;
        }
        let Some(view) = app.committee_view() else {
            if let KeyCode::Char('r') = key {
                app.refresh_committee_state();
            }
            return;
        };
        match view.panel {
            RolePanel::Head { .. } => Self::handle_head_panel_keys(app, key),
            RolePanel::ApplicantGrid => Self::handle_grid_keys(app, key),
            _ => match key {
                KeyCode::Char('a') => app.toggle_committee_pane(),
                KeyCode::Char('r') => app.refresh_committee_state(),
                _ => {}
            },
        }
    }

    fn handle_grid_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.grid_selected = app.grid_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = Self::committee_count(app);
                if app.grid_selected + 1 < len {
                    app.grid_selected += 1;
                }
            }
            KeyCode::Enter => app.request_apply_confirmation(),
            KeyCode::Char('a') => app.toggle_committee_pane(),
            KeyCode::Char('r') => app.refresh_committee_state(),
            _ => {}
        }
    }

    fn handle_head_panel_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.roster_selected = app.roster_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = app.roster_members().len();
                if app.roster_selected + 1 < len {
                    app.roster_selected += 1;
                }
            }
            KeyCode::Tab => {
                let next = match app.roster_tab {
                    RosterTab::Pending => RosterTab::Approved,
                    RosterTab::Approved => RosterTab::Pending,
                };
                app.set_roster_tab(next);
            }
            KeyCode::Enter => app.approve_selected_applicant(),
            KeyCode::Char('c') => app.start_cohead_search(),
            KeyCode::Char('e') => Self::export_roster(app),
            KeyCode::Char('y') => Self::copy_member_email(app),
            KeyCode::Char('a') => app.toggle_committee_pane(),
            KeyCode::Char('r') => app.refresh_committee_state(),
            _ => {}
        }
    }

    fn handle_admin_pane_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.admin_selected = app.admin_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = Self::committee_count(app);
                if app.admin_selected + 1 < len {
                    app.admin_selected += 1;
                }
            }
            KeyCode::Enter => app.start_head_search(),
            KeyCode::Char('a') | KeyCode::Esc | KeyCode::Tab => app.toggle_committee_pane(),
            KeyCode::Char('r') => app.refresh_committee_state(),
            _ => {}
        }
    }

    fn committee_count(app: &App) -> usize {
        app.committee_state
            .as_ref()
            .map(|state| state.committees.len())
            .unwrap_or(0)
    }

    fn export_roster(app: &mut App) {
        let result = match app.committee_state.as_ref() {
            Some(state) => RosterExporter::export_roster(state, ROSTER_FILENAME),
            None => return,
        };
        app.set_roster_export_result(result);
    }

    fn copy_member_email(app: &mut App) {
        let Some(email) = app.selected_roster_member().map(|m| m.email.clone()) else {
            return;
        };
        let result = Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(email.clone()))
            .map(|_| email)
            .map_err(|e| e.to_string());
        app.set_clipboard_result(result);
    }

    fn handle_dashboard_keys(app: &mut App, key: KeyCode) {
        if app.var_edit.is_some() {
            Self::handle_variable_editor_keys(app, key);
            return;
        }
        if app.event_edit.is_some() {
            Self::handle_event_editor_keys(app, key);
            return;
        }
        if let KeyCode::Tab = key {
            app.next_dash_tab();
            return;
        }
        match app.dash_tab {
            DashTab::Settings => Self::handle_settings_keys(app, key),
            DashTab::Variables => Self::handle_variables_keys(app, key),
            DashTab::BranchEvents => Self::handle_branch_keys(app, key),
        }
    }

    fn handle_settings_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.settings_selected = app.settings_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if app.settings_selected + 1 < app.settings.len() {
                    app.settings_selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected_setting(),
            KeyCode::Char('r') => app.refresh_settings(),
            _ => {}
        }
    }

    fn handle_variables_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.variables_selected = app.variables_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if app.variables_selected + 1 < app.variables.len() {
                    app.variables_selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char('e') => app.start_variable_edit(),
            KeyCode::Char('n') => app.start_variable_create(),
            KeyCode::Char('r') => app.refresh_variables(),
            _ => {}
        }
    }

    fn handle_branch_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => match app.branch_focus {
                BranchFocus::List => {
                    app.branch_selected = app.branch_selected.saturating_sub(1);
                    app.organizer_selected = 0;
                }
                BranchFocus::Organizers => {
                    app.organizer_selected = app.organizer_selected.saturating_sub(1);
                }
            },
            KeyCode::Down | KeyCode::Char('j') => match app.branch_focus {
                BranchFocus::List => {
                    if app.branch_selected + 1 < app.branch_events.len() {
                        app.branch_selected += 1;
                        app.organizer_selected = 0;
                    }
                }
                BranchFocus::Organizers => {
                    let len = app
                        .selected_branch_event()
                        .map(|event| event.organizers.len())
                        .unwrap_or(0);
                    if app.organizer_selected + 1 < len {
                        app.organizer_selected += 1;
                    }
                }
            },
            KeyCode::Left | KeyCode::Right => {
                app.branch_focus = match app.branch_focus {
                    BranchFocus::List => BranchFocus::Organizers,
                    BranchFocus::Organizers => BranchFocus::List,
                };
                app.organizer_selected = 0;
            }
            KeyCode::Enter | KeyCode::Char('e') => app.start_event_edit(),
            KeyCode::Char('n') => app.start_event_create(),
            KeyCode::Char('p') => app.toggle_publish_selected_event(),
            KeyCode::Char('d') => app.request_delete_selected_event(),
            KeyCode::Char('o') => app.start_organizer_search(),
            KeyCode::Char('x') => app.remove_selected_organizer(),
            KeyCode::Char('r') => app.refresh_branch_events(),
            _ => {}
        }
    }

    fn handle_variable_editor_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.submit_variable_edit(),
            KeyCode::Esc => app.cancel_variable_edit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                if let Some(edit) = app.var_edit.as_mut() {
                    edit.focus = (edit.focus + 1) % 2;
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = app.var_edit.as_mut().and_then(|e| e.text_field_mut()) {
                    field.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = app.var_edit.as_mut().and_then(|e| e.text_field_mut()) {
                    field.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_event_editor_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.submit_event_editor(),
            KeyCode::Esc => app.cancel_event_editor(),
            KeyCode::Tab | KeyCode::Down => {
                if let Some(edit) = app.event_edit.as_mut() {
                    edit.focus = (edit.focus + 1) % edit.field_count();
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(edit) = app.event_edit.as_mut() {
                    let count = edit.field_count();
                    edit.focus = (edit.focus + count - 1) % count;
                }
            }
            KeyCode::Left => {
                if let Some(edit) = app.event_edit.as_mut() {
                    edit.cycle_choice(-1);
                }
            }
            KeyCode::Right => {
                if let Some(edit) = app.event_edit.as_mut() {
                    edit.cycle_choice(1);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = app.event_edit.as_mut().and_then(|e| e.text_field_mut()) {
                    field.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = app.event_edit.as_mut().and_then(|e| e.text_field_mut()) {
                    field.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_search_mode(app: &mut App, key: KeyCode) {
        if app.search_target.is_some() {
            Self::handle_user_search_keys(app, key);
        } else {
            Self::handle_event_filter_keys(app, key);
        }
    }

    fn handle_user_search_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.choose_search_result(),
            KeyCode::Esc => app.close_search(),
            KeyCode::Up => app.search_selected = app.search_selected.saturating_sub(1),
            KeyCode::Down => {
                if app.search_selected + 1 < app.search_results.len() {
                    app.search_selected += 1;
                }
            }
            KeyCode::Backspace => {
                app.search_query.pop();
                app.update_user_search();
            }
            KeyCode::Char(c) => {
                app.search_query.push(c);
                app.update_user_search();
            }
            _ => {}
        }
    }

    fn handle_event_filter_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc => app.mode = Mode::Normal,
            KeyCode::Backspace => {
                app.events_query.pop();
                app.events_selected = 0;
            }
            KeyCode::Char(c) => {
                app.events_query.push(c);
                app.events_selected = 0;
            }
            _ => {}
        }
    }

    fn handle_confirm_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_pending_action(),
            KeyCode::Char('n') | KeyCode::Esc => app.dismiss_confirmation(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = Mode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
