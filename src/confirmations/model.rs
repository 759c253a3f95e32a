use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One release confirmation as listed by the brokerage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    #[serde(default, deserialize_with = "text")]
    pub confirmation_id: String,
    /// `MM/DD/YYYY` as sent by the server; not validated here.
    #[serde(default, deserialize_with = "text")]
    pub confirmation_date: String,
    #[serde(default, deserialize_with = "text")]
    pub plan_type_code: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ListResponse {
    pub data: ListData,
}

#[derive(Debug, Deserialize)]
pub(super) struct ListData {
    pub confirmation: ConfirmationBlock,
}

#[derive(Debug, Deserialize)]
pub(super) struct ConfirmationBlock {
    pub confirmations: Vec<Value>,
}

/// Scalars are accepted as text; `null`, arrays and objects read as empty.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => value,
        Value::Number(value) => value.to_string(),
        Value::Bool(value) => value.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_camel_case_records() -> anyhow::Result<()> {
        let confirmation: Confirmation = serde_json::from_str(
            r#"{"confirmationId":"C1","confirmationDate":"01/02/2024","planTypeCode":"STOCK OPTIONS","extra":true}"#,
        )?;
        assert_eq!(
            confirmation,
            Confirmation {
                confirmation_id: "C1".to_string(),
                confirmation_date: "01/02/2024".to_string(),
                plan_type_code: "STOCK OPTIONS".to_string(),
            }
        );
        Ok(())
    }

    #[test]
    fn tolerates_numeric_ids_and_missing_fields() -> anyhow::Result<()> {
        let confirmation: Confirmation =
            serde_json::from_str(r#"{"confirmationId":991,"planTypeCode":null}"#)?;
        assert_eq!(confirmation.confirmation_id, "991");
        assert_eq!(confirmation.confirmation_date, "");
        assert_eq!(confirmation.plan_type_code, "");
        Ok(())
    }

    #[test]
    fn malformed_fields_read_as_empty() -> anyhow::Result<()> {
        let confirmation: Confirmation = serde_json::from_str(
            r#"{"confirmationDate":{"d":1},"planTypeCode":["ESPP"]}"#,
        )?;
        assert_eq!(confirmation.confirmation_id, "");
        assert_eq!(confirmation.confirmation_date, "");
        assert_eq!(confirmation.plan_type_code, "");
        Ok(())
    }

    #[test]
    fn non_object_records_are_rejected() {
        assert!(serde_json::from_str::<Confirmation>("null").is_err());
        assert!(serde_json::from_str::<Confirmation>("\"C1\"").is_err());
    }
}
