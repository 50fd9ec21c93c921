use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Fabricante - mapea a la tabla manufacturers. El código lo genera la base
/// de datos la primera vez que se guarda.
///
/// En las requests basta con el código (`{"code": 101}`); sin código hace
/// falta el nombre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
#[validate(schema(function = "validate_reference"))]
pub struct Manufacturer {
    #[serde(default)]
    pub code: Option<i32>,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub name: String,
}

fn validate_reference(manufacturer: &Manufacturer) -> Result<(), ValidationError> {
    if manufacturer.code.is_none() && manufacturer.name.trim().is_empty() {
        return Err(ValidationError::new("manufacturer_code_or_name_required"));
    }
    Ok(())
}

impl Manufacturer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            code: None,
            name: name.into(),
        }
    }

    pub fn with_code(code: i32, name: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_alone_is_a_valid_reference() {
        let manufacturer: Manufacturer = serde_json::from_str(r#"{"code": 101}"#).unwrap();

        assert_eq!(manufacturer.code, Some(101));
        assert!(manufacturer.name.is_empty());
        assert!(manufacturer.validate().is_ok());
    }

    #[test]
    fn test_name_required_without_code() {
        assert!(Manufacturer::new("  ").validate().is_err());
        assert!(Manufacturer::new("Tesla").validate().is_ok());
    }
}
