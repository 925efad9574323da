//! Parsing for bulk employee import (`first_name,last_name,position` per line).

/// One valid row of a roster import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub first_name: String,
    pub last_name: String,
    /// Canonical title of the matching position.
    pub position: String,
}

/// Validate every row before anything is imported.
///
/// Positions match case-insensitively against `known_positions`. Row numbers
/// in error messages are 1-based. Either all rows are valid or none are
/// returned.
pub fn parse_roster(csv: &str, known_positions: &[String]) -> Result<Vec<RosterRow>, Vec<String>> {
    let csv = csv.trim();
    if csv.is_empty() {
        return Err(vec!["Paste at least one row to import.".to_string()]);
    }

    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in csv.lines().enumerate() {
        let raw = line.trim_end_matches('\r');
        let mut fields = raw.split(',').map(str::trim);
        let first_name = fields.next().unwrap_or_default();
        let last_name = fields.next().unwrap_or_default();
        let position = fields.next().unwrap_or_default();

        if first_name.is_empty() || last_name.is_empty() || position.is_empty() {
            errors.push(format!(
                "Row {}: Missing required fields (first_name, last_name, position). Row data: \"{}\"",
                index + 1,
                raw
            ));
            continue;
        }

        let wanted = position.to_lowercase();
        match known_positions.iter().find(|p| p.to_lowercase() == wanted) {
            Some(title) => rows.push(RosterRow {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                position: title.clone(),
            }),
            None => errors.push(format!(
                "Row {}: Position \"{}\" does not exist. Row data: \"{}\"",
                index + 1,
                position,
                raw
            )),
        }
    }

    if errors.is_empty() {
        Ok(rows)
    } else {
        Err(errors)
    }
}
