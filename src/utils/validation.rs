use crate::core::encoder::SEPARATOR;
use crate::utils::error::{BridgeError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BridgeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BridgeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BridgeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// A wire field must not contain the separator, or the receiver would split it.
pub fn validate_wire_field(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if value.contains(SEPARATOR) {
        return Err(BridgeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value cannot contain the '{}' separator", SEPARATOR),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("channel.output", "-").is_ok());
        assert!(validate_path("channel.output", "/tmp/emu.log").is_ok());
        assert!(validate_path("channel.output", "").is_err());
        assert!(validate_path("channel.output", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_wire_field() {
        assert!(validate_wire_field("setup.arch", "arm64").is_ok());
        assert!(validate_wire_field("setup.arch", "  ").is_err());
        assert!(validate_wire_field("setup.mode", "thumb:::arm").is_err());
    }
}
