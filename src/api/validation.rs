use super::ApiError;

/// Parses an optional `sol` query value, falling back to `default`.
pub fn validate_sol(sol: Option<&str>, default: i32) -> Result<i32, ApiError> {
    let Some(raw) = sol.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default);
    };

    match raw.parse::<i32>() {
        Ok(sol) if sol >= 0 => Ok(sol),
        _ => Err(ApiError::validation(format!(
            "Invalid sol: {}. Sol must be a non-negative integer",
            raw
        ))),
    }
}

/// Rover names are substituted into the upstream path, so only plain
/// alphanumeric names are accepted.
pub fn validate_rover<'a>(rover: Option<&'a str>, default: &'a str) -> Result<&'a str, ApiError> {
    let name = rover.map(str::trim).filter(|r| !r.is_empty()).unwrap_or(default);

    if name.len() > 32 || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::validation(format!(
            "Invalid rover name: '{}'",
            name
        )));
    }

    Ok(name)
}

pub fn validate_camera(camera: Option<&str>) -> Result<Option<&str>, ApiError> {
    let Some(name) = camera.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };

    if name.len() > 32 || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ApiError::validation(format!(
            "Invalid camera name: '{}'",
            name
        )));
    }

    Ok(Some(name))
}
