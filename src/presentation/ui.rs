use crate::application::{
    App, BranchFocus, CommitteePane, DashTab, EventEdit, Mode, RegisterStep, RosterTab, Screen,
    VariableEdit,
};
use crate::domain::{
    ApplyControl, CommitteeName, EventCategory, EventTier, EventType, MembershipStatus, PersonRef,
    RolePanel, apply_control,
};
use crate::infrastructure::SearchTarget;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.screen {
        Screen::Login => render_login(f, app, chunks[1]),
        Screen::Register => render_register(f, app, chunks[1]),
        Screen::Events => render_events(f, app, chunks[1]),
        Screen::Committees => render_committees(f, app, chunks[1]),
        Screen::Dashboard => render_dashboard(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    if let Some(edit) = &app.var_edit {
        render_variable_editor(f, edit);
    }
    if let Some(edit) = &app.event_edit {
        render_event_editor(f, edit);
    }
    if matches!(app.mode, Mode::Search) && app.search_target.is_some() {
        render_search_popup(f, app);
    }
    if matches!(app.mode, Mode::Confirm) {
        render_confirm_popup(f, app);
    }
    if matches!(app.mode, Mode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let identity = match &app.session {
        Some(session) => format!("{} <{}>", session.user.name, session.user.email),
        None => "not signed in".to_string(),
    };
    let header = Paragraph::new(format!("utsav - Festival Portal | {}", identity))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn field_line(label: &str, value: &str, focused: bool) -> String {
    let marker = if focused { ">" } else { " " };
    format!("{} {:<16} {}", marker, label, value)
}

fn render_login(f: &mut Frame, app: &App, area: Rect) {
    let masked = "*".repeat(app.login_password.chars().count());
    let text = [
        field_line("Email", &app.login_email, app.login_focus == 0),
        field_line("Password", &masked, app.login_focus == 1),
        String::new(),
        "Enter: log in | Tab: switch field | F2: register".to_string(),
        "Esc: browse events without signing in".to_string(),
    ]
    .join("\n");

    let widget =
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Log in"));
    f.render_widget(widget, centered_rect(area, 56, 8));
}

fn render_register(f: &mut Frame, app: &App, area: Rect) {
    match app.register_step {
        RegisterStep::Details => render_register_form(f, app, area),
        RegisterStep::Otp => render_otp_entry(f, app, area),
    }
}

fn render_register_form(f: &mut Frame, app: &App, area: Rect) {
    let form = &app.register_form;
    let password = "*".repeat(form.password.chars().count());
    let confirm = "*".repeat(form.confirm_password.chars().count());
    let selection = form
        .selection
        .map(|s| s.label().to_string())
        .unwrap_or_else(|| "choose with Left/Right".to_string());

    let mut lines = vec![
        field_line("Name", &form.name, app.register_focus == 0),
        field_line("Email", &form.email, app.register_focus == 1),
        field_line("Password", &password, app.register_focus == 2),
        field_line("Confirm password", &confirm, app.register_focus == 3),
        field_line("Phone", &form.phone_number, app.register_focus == 4),
        field_line("Category", &selection, app.register_focus == 5),
    ];
    if app.register_field_visible(6) {
        let college = app
            .picked_college_name()
            .map(|name| name.to_string())
            .unwrap_or_else(|| "choose with Left/Right".to_string());
        lines.push(field_line("College", &college, app.register_focus == 6));
    }
    if app.register_field_visible(7) {
        lines.push(field_line(
            "Graduation year",
            &form.year_of_graduation,
            app.register_focus == 7,
        ));
    }
    lines.push(String::new());
    lines.push("Enter: sign up | Tab: next field | F2/Esc: back to log in".to_string());

    let height = lines.len() as u16 + 2;
    let widget = Paragraph::new(lines.join("\n"))
        .block(Block::default().borders(Borders::ALL).title("Register"));
    f.render_widget(widget, centered_rect(area, 64, height));
}

fn render_otp_entry(f: &mut Frame, app: &App, area: Rect) {
    let text = [
        format!("An OTP was sent to {}", app.register_form.email.trim()),
        String::new(),
        field_line("OTP", &app.otp_input, true),
        String::new(),
        "Enter: verify | Esc: back to the form".to_string(),
    ]
    .join("\n");

    let widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Verify your email"),
    );
    f.render_widget(widget, centered_rect(area, 56, 8));
}

fn render_events(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let events = app.filtered_events();
    let header =
        Row::new(vec!["Event", "Category", "Fees"]).style(Style::default().fg(Color::Yellow));
    let mut rows = vec![header];
    for (index, event) in events.iter().enumerate() {
        let style = if index == app.events_selected {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                Cell::from(event.name.clone()),
                Cell::from(event.category.map(|c| c.label()).unwrap_or("-")),
                Cell::from(event.fees.to_string()),
            ])
            .style(style),
        );
    }
    let mut title = format!("Events [{}]", app.events_category_label());
    if !app.events_query.trim().is_empty() {
        title.push_str(&format!(" filter: {}", app.events_query.trim()));
    }
    let widths = [
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);
    f.render_widget(table, chunks[0]);

    render_event_detail(f, app, chunks[1]);
}

fn render_event_detail(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Details");
    let Some(event) = app.selected_public_event() else {
        f.render_widget(Paragraph::new("No event selected").block(block), area);
        return;
    };

    let mut lines = vec![
        event.name.clone(),
        String::new(),
        format!("Type:      {}", event.event_type.label()),
        format!(
            "Category:  {}",
            event.category.map(|c| c.label()).unwrap_or("-")
        ),
        format!(
            "Tier:      {}",
            event.tier.map(|t| t.label()).unwrap_or("-")
        ),
        format!("Team:      {}", event.team_size_label()),
        format!("Fees:      {}", event.fees),
        format!("Venue:     {}", event.venue.as_deref().unwrap_or("-")),
    ];
    if let Some(cap) = event.max_teams {
        lines.push(format!("Max teams: {}", cap));
    }
    if let Some(description) = event.description.as_deref() {
        lines.push(String::new());
        lines.push(description.to_string());
    }

    let widget = Paragraph::new(lines.join("\n"))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

fn render_committees(f: &mut Frame, app: &App, area: Rect) {
    if let Some(error) = &app.committee_error {
        let widget = Paragraph::new(error.clone())
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title("Committees"));
        f.render_widget(widget, area);
        return;
    }
    let Some(view) = app.committee_view() else {
        let widget = Paragraph::new("Loading committee data...")
            .block(Block::default().borders(Borders::ALL).title("Committees"));
        f.render_widget(widget, area);
        return;
    };

    if view.admin && matches!(app.committee_pane, CommitteePane::Admin) {
        render_admin_pane(f, app, area);
        return;
    }

    match view.panel {
        RolePanel::Head { committee } => render_head_panel(f, app, committee, area),
        RolePanel::CoHead { committee } => {
            let text = format!(
                "You are the co-head of the {} committee.\n\nThe head manages the roster; this panel is informational.",
                committee.label()
            );
            render_role_notice(f, view.admin, "Co-head", &text, area);
        }
        RolePanel::Member { committee, status } => {
            let text = match status {
                MembershipStatus::Pending => format!(
                    "Your application to the {} committee is awaiting approval by its head.",
                    committee.label()
                ),
                MembershipStatus::Approved => {
                    format!("You are a member of the {} committee.", committee.label())
                }
            };
            render_role_notice(f, view.admin, "Membership", &text, area);
        }
        RolePanel::ApplicantGrid => render_applicant_grid(f, app, area),
        RolePanel::Closed => {
            render_role_notice(
                f,
                view.admin,
                "Committees",
                "Committee applications are closed. Check back later.",
                area,
            );
        }
    }
}

fn render_role_notice(f: &mut Frame, admin: bool, title: &str, text: &str, area: Rect) {
    let mut body = text.to_string();
    if admin {
        body.push_str("\n\na: head assignment pane");
    }
    let widget = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

fn person_name(person: &Option<PersonRef>) -> String {
    person
        .as_ref()
        .map(|p| p.display_name().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn render_applicant_grid(f: &mut Frame, app: &App, area: Rect) {
    let Some(state) = &app.committee_state else {
        return;
    };
    let admin = app.is_admin();

    let header = Row::new(vec!["Committee", "Head", "Co-head", "Members", ""])
        .style(Style::default().fg(Color::Yellow));
    let mut rows = vec![header];
    for (index, committee) in state.committees.iter().enumerate() {
        let control = apply_control(state, admin, committee.id);
        let control_style = match control {
            ApplyControl::Apply => Style::default().fg(Color::Green),
            ApplyControl::Applied => Style::default().fg(Color::Yellow),
            ApplyControl::Joined => Style::default().fg(Color::Blue),
            ApplyControl::Disabled => Style::default().fg(Color::DarkGray),
        };
        let row_style = if index == app.grid_selected {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                Cell::from(committee.name.label()),
                Cell::from(person_name(&committee.head)),
                Cell::from(person_name(&committee.co_head)),
                Cell::from(committee.member_count.to_string()),
                Cell::from(control.label()).style(control_style),
            ])
            .style(row_style),
        );
    }

    let title = if state.is_committee_reg_open {
        "Committees (applications open)"
    } else {
        "Committees (applications closed)"
    };
    let widths = [
        Constraint::Length(18),
        Constraint::Min(16),
        Constraint::Min(16),
        Constraint::Length(7),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_head_panel(f: &mut Frame, app: &App, committee: CommitteeName, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let (pending, approved) = match &app.committee_state {
        Some(state) => (state.pending_applicants.len(), state.approved_members.len()),
        None => (0, 0),
    };
    let summary = Paragraph::new(format!(
        "Head of {} | pending {} | approved {}",
        committee.label(),
        pending,
        approved
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Your committee"),
    );
    f.render_widget(summary, chunks[0]);

    let members = app.roster_members();
    let header = Row::new(vec!["Name", "Email", "Phone", "Status"])
        .style(Style::default().fg(Color::Yellow));
    let mut rows = vec![header];
    for (index, member) in members.iter().enumerate() {
        let style = if index == app.roster_selected {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                Cell::from(member.display_name().to_string()),
                Cell::from(member.email.clone()),
                Cell::from(member.phone_number.as_deref().unwrap_or("-").to_string()),
                Cell::from(member.status.to_string()),
            ])
            .style(style),
        );
    }
    let title = match app.roster_tab {
        RosterTab::Pending => format!("Pending applications ({})", pending),
        RosterTab::Approved => format!("Approved members ({})", approved),
    };
    let widths = [
        Constraint::Min(16),
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);
    f.render_widget(table, chunks[1]);
}

fn render_admin_pane(f: &mut Frame, app: &App, area: Rect) {
    let Some(state) = &app.committee_state else {
        return;
    };
    let header = Row::new(vec!["Committee", "Head", "Co-head", "Members"])
        .style(Style::default().fg(Color::Yellow));
    let mut rows = vec![header];
    for (index, committee) in state.committees.iter().enumerate() {
        let style = if index == app.admin_selected {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                Cell::from(committee.name.label()),
                Cell::from(person_name(&committee.head)),
                Cell::from(person_name(&committee.co_head)),
                Cell::from(committee.member_count.to_string()),
            ])
            .style(style),
        );
    }
    let widths = [
        Constraint::Length(18),
        Constraint::Min(16),
        Constraint::Min(16),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Assign committee heads (Enter assigns, a returns)"),
        )
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let tabs: Vec<String> = app
        .available_dash_tabs()
        .iter()
        .map(|tab| {
            let label = match tab {
                DashTab::Settings => "Settings",
                DashTab::Variables => "Variables",
                DashTab::BranchEvents => "Branch events",
            };
            if *tab == app.dash_tab {
                format!("[{}]", label)
            } else {
                format!(" {} ", label)
            }
        })
        .collect();
    let bar = Paragraph::new(tabs.join(" ")).style(Style::default().fg(Color::Yellow));
    f.render_widget(bar, chunks[0]);

    match app.dash_tab {
        DashTab::Settings => render_settings_tab(f, app, chunks[1]),
        DashTab::Variables => render_variables_tab(f, app, chunks[1]),
        DashTab::BranchEvents => render_branch_tab(f, app, chunks[1]),
    }
}

fn render_settings_tab(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["Setting", "Value"]).style(Style::default().fg(Color::Yellow));
    let mut rows = vec![header];
    for (index, setting) in app.settings.iter().enumerate() {
        let style = if index == app.settings_selected {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default()
        };
        let value_style = if setting.value {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };
        rows.push(
            Row::new(vec![
                Cell::from(setting.key.clone()),
                Cell::from(if setting.value { "ON" } else { "OFF" }).style(value_style),
            ])
            .style(style),
        );
    }
    let widths = [Constraint::Min(24), Constraint::Length(6)];
    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Settings (Enter toggles)"),
        )
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_variables_tab(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["Key", "Value"]).style(Style::default().fg(Color::Yellow));
    let mut rows = vec![header];
    for (index, variable) in app.variables.iter().enumerate() {
        let style = if index == app.variables_selected {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                Cell::from(variable.key.clone()),
                Cell::from(variable.value.clone()),
            ])
            .style(style),
        );
    }
    let widths = [Constraint::Min(20), Constraint::Min(30)];
    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Variables (Enter edits, n creates)"),
        )
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_branch_tab(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let focused = matches!(app.branch_focus, BranchFocus::List);
    let header =
        Row::new(vec!["Event", "Type", "Published"]).style(Style::default().fg(Color::Yellow));
    let mut rows = vec![header];
    for (index, event) in app.branch_events.iter().enumerate() {
        let style = if index == app.branch_selected {
            if focused {
                Style::default().bg(Color::LightBlue).fg(Color::Black)
            } else {
                Style::default().fg(Color::LightBlue)
            }
        } else {
            Style::default()
        };
        let published_style = if event.published {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        rows.push(
            Row::new(vec![
                Cell::from(event.name.clone()),
                Cell::from(event.event_type.label()),
                Cell::from(if event.published { "Yes" } else { "No" }).style(published_style),
            ])
            .style(style),
        );
    }
    let title = match &app.branch_name {
        Some(branch) => format!("{} events", branch),
        None => "Branch events".to_string(),
    };
    let widths = [
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(9),
    ];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);
    f.render_widget(table, chunks[0]);

    render_organizers(f, app, chunks[1]);
}

fn render_organizers(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Organizers");
    let Some(event) = app.selected_branch_event() else {
        f.render_widget(Paragraph::new("No event selected").block(block), area);
        return;
    };

    let focused = matches!(app.branch_focus, BranchFocus::Organizers);
    let mut lines = Vec::new();
    if event.organizers.is_empty() {
        lines.push("No organizers yet".to_string());
    }
    for (index, organizer) in event.organizers.iter().enumerate() {
        let marker = if focused && index == app.organizer_selected {
            ">"
        } else {
            " "
        };
        lines.push(format!(
            "{} {} <{}>",
            marker,
            organizer.display_name(),
            organizer.email
        ));
    }
    lines.push(String::new());
    lines.push("o: add | x: remove | Left/Right: switch list".to_string());

    let widget = Paragraph::new(lines.join("\n")).block(block);
    f.render_widget(widget, area);
}

fn render_variable_editor(f: &mut Frame, edit: &VariableEdit) {
    let area = centered_rect(f.area(), 56, 8);
    f.render_widget(Clear, area);

    let key_value = match &edit.key {
        Some(key) => key.clone(),
        None => edit.key_input.clone(),
    };
    let text = [
        field_line("Key", &key_value, edit.focus == 0),
        field_line("Value", &edit.value_input, edit.focus == 1),
        String::new(),
        "Enter: save | Tab: switch field | Esc: cancel".to_string(),
    ]
    .join("\n");

    let title = if edit.key.is_some() {
        "Edit variable"
    } else {
        "New variable"
    };
    let widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(Color::Green)),
    );
    f.render_widget(widget, area);
}

fn render_event_editor(f: &mut Frame, edit: &EventEdit) {
    let area = centered_rect(f.area(), 64, 17);
    f.render_widget(Clear, area);

    let type_label = EventType::ALL[edit.event_type % EventType::ALL.len()].label();
    let mut lines = vec![
        field_line("Name", &edit.name, edit.focus == 0),
        field_line("Type", type_label, edit.focus == 1),
    ];
    if edit.event_id.is_some() {
        let category_label = EventCategory::ALL[edit.category % EventCategory::ALL.len()].label();
        let tier_label = EventTier::ALL[edit.tier % EventTier::ALL.len()].label();
        lines.push(field_line("Category", category_label, edit.focus == 2));
        lines.push(field_line("Tier", tier_label, edit.focus == 3));
        lines.push(field_line("Description", &edit.description, edit.focus == 4));
        lines.push(field_line("Venue", &edit.venue, edit.focus == 5));
        lines.push(field_line("Fees", &edit.fees, edit.focus == 6));
        lines.push(field_line(
            "Min team size",
            &edit.min_team_size,
            edit.focus == 7,
        ));
        lines.push(field_line(
            "Max team size",
            &edit.max_team_size,
            edit.focus == 8,
        ));
        lines.push(field_line("Max teams", &edit.max_teams, edit.focus == 9));
    }
    lines.push(String::new());
    lines.push("Enter: save | Tab: next | Left/Right: change choice | Esc: cancel".to_string());

    let title = if edit.event_id.is_some() {
        "Edit event"
    } else {
        "New event"
    };
    let widget = Paragraph::new(lines.join("\n")).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(Color::Green)),
    );
    f.render_widget(widget, area);
}

fn render_search_popup(f: &mut Frame, app: &App) {
    let Some(target) = app.search_target else {
        return;
    };
    let area = centered_rect(f.area(), 60, 14);
    f.render_widget(Clear, area);

    let title = match target {
        SearchTarget::AssignHead(committee) => format!("Assign head - {}", committee.label()),
        SearchTarget::AssignCoHead => "Assign co-head".to_string(),
        SearchTarget::Organizer(_) => "Add organizer".to_string(),
    };

    let mut lines = vec![format!("Search: {}_", app.search_query), String::new()];
    if app.search_query.trim().chars().count() < 2 {
        lines.push("Type at least 2 characters".to_string());
    } else if app.search_results.is_empty() {
        lines.push(if app.in_flight.search {
            "Searching...".to_string()
        } else {
            "No matches".to_string()
        });
    } else {
        for (index, hit) in app.search_results.iter().enumerate() {
            let marker = if index == app.search_selected { ">" } else { " " };
            lines.push(format!("{} {} <{}>", marker, hit.display_name(), hit.email));
        }
    }
    lines.push(String::new());
    lines.push("Enter: pick | Up/Down: move | Esc: close".to_string());

    let widget = Paragraph::new(lines.join("\n")).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(widget, area);
}

fn render_confirm_popup(f: &mut Frame, app: &App) {
    let Some(confirmation) = &app.confirm else {
        return;
    };
    let area = centered_rect(f.area(), 56, 7);
    f.render_widget(Clear, area);

    let text = format!("{}\n\ny: confirm | n/Esc: cancel", confirmation.prompt);
    let widget = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Confirm")
            .style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(widget, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        Mode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                normal_hint(app).to_string()
            }
        }
        Mode::Search => {
            if app.search_target.is_some() {
                format!(
                    "Search: {} (type at least 2 characters, Enter picks, Esc closes)",
                    app.search_query
                )
            } else {
                format!("Filter: {} (Enter or Esc closes)", app.events_query)
            }
        }
        Mode::Confirm => app
            .confirm
            .as_ref()
            .map(|c| format!("{} (y/n)", c.prompt))
            .unwrap_or_default(),
        Mode::Help => {
            "Up/Down: scroll | PgUp/PgDn: fast scroll | Home: top | Esc: close help".to_string()
        }
    };

    let widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            Mode::Normal => Style::default(),
            Mode::Search => Style::default().fg(Color::Green),
            Mode::Confirm => Style::default().fg(Color::Yellow),
            Mode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(widget, area);
}

fn normal_hint(app: &App) -> &'static str {
    if app.var_edit.is_some() || app.event_edit.is_some() {
        return "Enter: save | Tab: next field | Esc: cancel";
    }
    match app.screen {
        Screen::Login => {
            "Enter: log in | Tab: field | F2: register | F3: events | F1: help | Ctrl+Q: quit"
        }
        Screen::Register => {
            "Enter: submit | Tab: field | Left/Right: choices | Esc: back | Ctrl+Q: quit"
        }
        Screen::Events => {
            "/: filter | c: category | F4: committees | F5: dashboard | r: refresh | F1: help"
        }
        Screen::Committees => {
            "Enter: apply/approve | Tab: roster tab | c: co-head | e: export | y: copy email | a: admin pane"
        }
        Screen::Dashboard => {
            "Tab: next tab | Enter: toggle/edit | n: new | p: publish | d: delete | o: organizer"
        }
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "utsav Help (Line {}/{})",
                    start_line + 1,
                    help_lines.len()
                ))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"UTSAV PORTAL CLIENT REFERENCE

=== SCREENS ===
F1              This help
F2              Log in / register (switches between the two)
F3              Published events
F4              Committees (requires signing in)
F5              Dashboard (admins and branch representatives)
Ctrl+L          Log out
Ctrl+Q          Quit

=== LOGIN & REGISTRATION ===
Tab / Up / Down Move between fields
Enter           Submit the form
Left / Right    Change the category or college choice
Esc             Back (login: browse events, register: login)
                Registering sends an OTP to your email address.
                Enter it on the verification step to finish.

=== EVENTS ===
Up/Down or j/k  Move through the list
/               Filter events by name as you type
c / C           Next / previous category filter
r               Refresh the list
                The detail pane follows the selected event.

=== COMMITTEES: APPLICANT GRID ===
Up/Down or j/k  Move through the committees
Enter           Apply to the selected committee (asks first)
                You can hold one membership at a time. A pending
                application shows Applied, an approved one Joined.
                While applications are closed the grid is read only.

=== COMMITTEES: HEAD PANEL ===
Up/Down or j/k  Move through the roster
Tab             Switch between pending and approved lists
Enter           Approve the selected pending application
c               Assign a co-head (opens the user search)
e               Export the roster to committee-roster.csv
y               Copy the selected member's email address
r               Refresh committee data

=== COMMITTEES: ADMIN PANE ===
a               Flip between your panel and head assignment
Up/Down or j/k  Move through the committees
Enter           Assign a head to the selected committee
                Assigning over an existing head replaces them.

=== DASHBOARD ===
Tab             Next tab (Settings / Variables / Branch events)
Up/Down or j/k  Move through the current list
Enter           Toggle the setting or edit the variable / event
n               New variable or new event
p               Publish or unpublish the selected event
d               Delete the selected event (unpublish it first)
o               Add an organizer to the selected event
x               Remove the selected organizer
Left / Right    Switch between event and organizer lists
r               Refresh the current tab

=== USER SEARCH BOX ===
Type at least two characters to search. Results refresh on
every keystroke.
Up/Down         Move through the results
Enter           Use the selected person for the assignment
Esc             Close without assigning

=== HELP NAVIGATION ===
Up/Down or j/k  Scroll one line
Page Up/Down    Scroll five lines
Home            Jump to the top
Esc/F1/q        Close this window"#
        .to_string()
}
