use anyhow::{anyhow, Result};

/// Validates a client name: 2-60 characters, Latin or Cyrillic letters,
/// spaces, and hyphens only. Returns the trimmed name.
pub fn validate_client_name(raw: &str) -> Result<String> {
    let name = raw.trim();

    let len = name.chars().count();
    if len < 2 {
        return Err(anyhow!("Name must be at least 2 characters long"));
    }
    if len > 60 {
        return Err(anyhow!("Name cannot be longer than 60 characters"));
    }

    if !name.chars().all(is_name_char) {
        return Err(anyhow!("Name may contain only letters, spaces, and hyphens"));
    }

    Ok(name.to_string())
}

fn is_name_char(c: char) -> bool {
    c == ' ' || c == '-' || c.is_ascii_alphabetic() || ('А'..='я').contains(&c) || c == 'Ё' || c == 'ё'
}

/// Validates a hand-typed phone number: an optional leading `+`, then 10-22
/// characters of digits with optional spaces, dashes, and parentheses,
/// starting and ending with a digit. Returns the normalized number.
pub fn validate_phone(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let len = body.chars().count();
    if !(10..=22).contains(&len) {
        return Err(anyhow!("Phone number must be 10-22 characters long"));
    }

    let first_last_digits = body.starts_with(|c: char| c.is_ascii_digit())
        && body.ends_with(|c: char| c.is_ascii_digit());
    if !first_last_digits {
        return Err(anyhow!("Phone number must start and end with a digit"));
    }

    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
    {
        return Err(anyhow!(
            "Phone number may contain only digits, spaces, dashes, and parentheses"
        ));
    }

    Ok(normalize_phone(trimmed))
}

/// Strips separators, keeping digits and a leading `+` only.
pub fn normalize_phone(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());
    if trimmed.starts_with('+') {
        out.push('+');
    }
    out.extend(trimmed.chars().filter(char::is_ascii_digit));
    out
}

/// Team size must lie within `[2, max_team]` for the chosen quest.
pub fn validate_team_size(team_size: u8, max_team: u8) -> Result<()> {
    if team_size < 2 {
        return Err(anyhow!("Team must have at least 2 people"));
    }
    if team_size > max_team {
        return Err(anyhow!("Team cannot have more than {max_team} people"));
    }
    Ok(())
}
