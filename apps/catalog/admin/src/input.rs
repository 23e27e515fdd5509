//! JSON input loading and validation.

use eyre::{Result, WrapErr, eyre};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;
use validator::Validate;

/// Read `path` (or stdin for `-`) and parse it as `T`.
pub fn read_json<T: DeserializeOwned + Validate>(path: &Path) -> Result<T> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .wrap_err("Failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?
    };

    parse_json(&raw)
}

pub fn parse_json<T: DeserializeOwned + Validate>(raw: &str) -> Result<T> {
    let value: T = serde_json::from_str(raw).wrap_err("Input is not valid JSON for this command")?;
    validated(value)
}

/// Reject input the catalog must never see.
pub fn validated<T: Validate>(value: T) -> Result<T> {
    value
        .validate()
        .map_err(|errors| eyre!("Invalid input: {errors}"))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_catalog::{CreateProduct, UpdateVariant};

    #[test]
    fn test_valid_create_product() {
        let input: CreateProduct = parse_json(
            r#"{
                "title": "Runner",
                "description": "Trail shoe",
                "options": ["Size"],
                "variants": [{
                    "title": "42",
                    "options": [{"value": "42"}],
                    "prices": [{"currency_code": "USD", "amount": "89.90"}]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(input.variants.len(), 1);
        assert_eq!(input.options, vec!["Size".to_string()]);
    }

    #[test]
    fn test_product_without_variants_is_rejected() {
        let result: Result<CreateProduct> =
            parse_json(r#"{"title": "Runner", "description": "Trail shoe", "variants": []}"#);

        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("Invalid input"));
    }

    #[test]
    fn test_bad_currency_in_variant_update() {
        let result: Result<UpdateVariant> =
            parse_json(r#"{"prices": [{"currency_code": "usd", "amount": "1"}]}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_json() {
        let result: Result<UpdateVariant> = parse_json("{");
        assert!(result.is_err());
    }
}
