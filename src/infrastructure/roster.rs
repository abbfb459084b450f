use crate::domain::{Applicant, CommitteeState};
use std::fs::File;

pub struct RosterExporter;

impl RosterExporter {
    pub fn export_roster(state: &CommitteeState, path: &str) -> Result<String, String> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| e.to_string())?;
        writer
            .write_record(["name", "email", "phone", "status"])
            .map_err(|e| e.to_string())?;
        for member in state
            .pending_applicants
            .iter()
            .chain(state.approved_members.iter())
        {
            Self::write_member(&mut writer, member)?;
        }
        writer.flush().map_err(|e| e.to_string())?;
        Ok(path.to_string())
    }

    fn write_member(writer: &mut csv::Writer<File>, member: &Applicant) -> Result<(), String> {
        let status = member.status.to_string();
        writer
            .write_record([
                member.display_name(),
                member.email.as_str(),
                member.phone_number.as_deref().unwrap_or(""),
                status.as_str(),
            ])
            .map_err(|e| e.to_string())
    }
}
