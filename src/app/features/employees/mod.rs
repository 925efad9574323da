mod archived;
mod bulk;
mod create;
mod list;
mod show;

use axum::Router;
use serde::Deserialize;
use validator::Validate;

use crate::app::{
    db::{employees::{Employee, EmployeeFields}, positions::Position},
    domain::{BadgeStyle, RecordId},
    error::AppError,
    features::{format_date, non_blank},
    AppState,
};

/// Employee routes (list, create, archive/reinstate, bulk import, detail + entries).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(list::routes())
        .merge(create::routes())
        .merge(archived::routes())
        .merge(bulk::routes())
        .merge(show::routes())
}

/// One employee as rendered in lists and on the detail page.
pub struct EmployeeRow {
    pub id: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub position: String,
    pub badge: BadgeStyle,
    pub since: String,
}

impl EmployeeRow {
    pub fn new(employee: Employee, positions: &[Position]) -> Self {
        let badge = BadgeStyle::for_color(position_color(&employee.position, positions));
        Self {
            name: employee.full_name(),
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name.unwrap_or_default(),
            nickname: employee.nickname.unwrap_or_default(),
            position: employee.position,
            badge,
            since: format_date(employee.created_at),
        }
    }
}

/// Color of the position with this title (case-insensitive), if it has one.
fn position_color<'a>(title: &str, positions: &'a [Position]) -> Option<&'a str> {
    let wanted = title.to_lowercase();
    positions
        .iter()
        .find(|p| p.title.to_lowercase() == wanted)
        .and_then(|p| p.color.as_deref())
}

/// Create/update employee form data.
#[derive(Debug, Deserialize, Validate)]
pub struct EmployeeForm {
    #[serde(default)]
    #[validate(length(max = 100))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub last_name: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub nickname: String,

    #[serde(default)]
    pub position: String,
}

impl EmployeeForm {
    /// Validate and normalise. The position must be one of `known_positions`
    /// (case-insensitive); the stored title is the canonical one.
    fn into_fields(self, known_positions: &[String]) -> Result<EmployeeFields, String> {
        if self.validate().is_err() {
            return Err("Names must be at most 100 characters.".to_string());
        }

        let (Some(first_name), Some(last_name), Some(position)) = (
            non_blank(&self.first_name),
            non_blank(&self.last_name),
            non_blank(&self.position),
        ) else {
            return Err("First name, last name and position are required.".to_string());
        };

        let wanted = position.to_lowercase();
        let position = known_positions
            .iter()
            .find(|p| p.to_lowercase() == wanted)
            .cloned()
            .ok_or_else(|| format!("Position \"{}\" does not exist.", position))?;

        Ok(EmployeeFields {
            first_name,
            last_name: Some(last_name),
            nickname: non_blank(&self.nickname),
            position,
        })
    }
}

/// Parse an `:id` path segment. Malformed IDs cannot name a record.
fn parse_id(id: &str) -> Result<RecordId, AppError> {
    RecordId::from_string(id).map_err(|_| AppError::not_found())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(first: &str, last: &str, position: &str) -> EmployeeForm {
        EmployeeForm {
            first_name: first.to_string(),
            last_name: last.to_string(),
            nickname: String::new(),
            position: position.to_string(),
        }
    }

    #[test]
    fn canonicalises_position_title() {
        let fields = form(" Ada ", "Lovelace ", "developer")
            .into_fields(&["Developer".to_string()])
            .unwrap();
        assert_eq!(fields.first_name, "Ada");
        assert_eq!(fields.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(fields.position, "Developer");
    }

    #[test]
    fn requires_names_and_position() {
        assert!(form("  ", "Lovelace", "Developer")
            .into_fields(&["Developer".to_string()])
            .is_err());
        let err = form("Ada", "   ", "Developer")
            .into_fields(&["Developer".to_string()])
            .unwrap_err();
        assert_eq!(err, "First name, last name and position are required.");
        assert!(form("Ada", "Lovelace", "")
            .into_fields(&["Developer".to_string()])
            .is_err());
    }

    #[test]
    fn rejects_unknown_position() {
        let err = form("Ada", "Lovelace", "Pilot")
            .into_fields(&["Developer".to_string()])
            .unwrap_err();
        assert!(err.contains("Pilot"));
    }

    #[test]
    fn malformed_id_is_not_found() {
        assert!(matches!(parse_id("../etc"), Err(AppError::NotFound(_))));
    }
}
