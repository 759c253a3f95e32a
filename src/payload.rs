use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Earliest date the confirmation search reaches back to.
pub const DEFAULT_START_DATE: &str = "3/17/2018";

pub const PAYLOAD_DATE_FORMAT: &str = "%m/%d/%Y";

const VALUE_KEY: &str = "value";
const EMPLOYEE_ID_KEY: &str = "encryptedEmployeeId";

/// The list-request body after the search window has been widened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPayload {
    pub body: String,
    pub encrypted_employee_id: String,
}

/// Rewrite the captured search so it covers every plan type from
/// `start_date` through `today`, and pull out the employee id needed for
/// the PDF links.
pub fn prepare_payload(body: &str, start_date: &str, today: NaiveDate) -> Result<PreparedPayload> {
    let mut document: Value =
        serde_json::from_str(body).map_err(|err| Error::InvalidPayload(err.to_string()))?;

    let value = document
        .get_mut(VALUE_KEY)
        .ok_or(Error::MissingField(VALUE_KEY))?
        .as_object_mut()
        .ok_or_else(|| Error::InvalidPayload(format!("`{VALUE_KEY}` is not an object")))?;

    apply_search_window(value, start_date, today);
    let encrypted_employee_id = employee_id(value)?;

    let body =
        serde_json::to_string(&document).map_err(|err| Error::InvalidPayload(err.to_string()))?;

    Ok(PreparedPayload {
        body,
        encrypted_employee_id,
    })
}

fn apply_search_window(value: &mut Map<String, Value>, start_date: &str, today: NaiveDate) {
    let end_date = today.format(PAYLOAD_DATE_FORMAT).to_string();
    let overrides = [
        ("taxYear", ""),
        ("startDate", start_date),
        ("endDate", end_date.as_str()),
        ("planTypeCode", "All"),
        ("appType", "STOCKPLAN"),
    ];
    for (key, replacement) in overrides {
        value.insert(key.to_string(), Value::String(replacement.to_string()));
    }
}

fn employee_id(value: &Map<String, Value>) -> Result<String> {
    match value.get(EMPLOYEE_ID_KEY) {
        None | Some(Value::Null) => Err(Error::MissingField(EMPLOYEE_ID_KEY)),
        Some(Value::String(id)) => Ok(id.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 9).unwrap()
    }

    #[test]
    fn overwrites_search_fields_and_keeps_the_rest() -> anyhow::Result<()> {
        let body = json!({
            "value": {
                "encryptedEmployeeId": "E1",
                "taxYear": "2023",
                "planTypeCode": "ESPP",
                "sortOrder": "desc"
            },
            "meta": 1
        })
        .to_string();

        let prepared = prepare_payload(&body, DEFAULT_START_DATE, today())?;
        let document: Value = serde_json::from_str(&prepared.body)?;

        assert_eq!(prepared.encrypted_employee_id, "E1");
        assert_eq!(
            document,
            json!({
                "value": {
                    "encryptedEmployeeId": "E1",
                    "taxYear": "",
                    "startDate": "3/17/2018",
                    "endDate": "05/09/2024",
                    "planTypeCode": "All",
                    "appType": "STOCKPLAN",
                    "sortOrder": "desc"
                },
                "meta": 1
            })
        );
        Ok(())
    }

    #[test]
    fn preparing_twice_is_stable() -> anyhow::Result<()> {
        let body = r#"{"value":{"encryptedEmployeeId":"E1","appType":"OTHER"}}"#;
        let once = prepare_payload(body, DEFAULT_START_DATE, today())?;
        let twice = prepare_payload(&once.body, DEFAULT_START_DATE, today())?;

        let first: Value = serde_json::from_str(&once.body)?;
        let second: Value = serde_json::from_str(&twice.body)?;
        for key in ["taxYear", "planTypeCode", "appType", "startDate", "endDate"] {
            assert_eq!(first["value"][key], second["value"][key], "{key}");
        }
        Ok(())
    }

    #[test]
    fn custom_start_date_is_used() -> anyhow::Result<()> {
        let prepared = prepare_payload(
            r#"{"value":{"encryptedEmployeeId":"E1"}}"#,
            "01/01/2020",
            today(),
        )?;
        let document: Value = serde_json::from_str(&prepared.body)?;
        assert_eq!(document["value"]["startDate"], "01/01/2020");
        Ok(())
    }

    #[test]
    fn numeric_employee_id_is_rendered_as_text() -> anyhow::Result<()> {
        let prepared = prepare_payload(r#"{"value":{"encryptedEmployeeId":42}}"#, "x", today())?;
        assert_eq!(prepared.encrypted_employee_id, "42");
        Ok(())
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = prepare_payload("{not json", DEFAULT_START_DATE, today()).unwrap_err();
        assert!(matches!(err, Error::InvalidPayload(_)));
    }

    #[test]
    fn missing_value_is_rejected() {
        let err = prepare_payload(r#"{"other":{}}"#, DEFAULT_START_DATE, today()).unwrap_err();
        assert!(matches!(err, Error::MissingField("value")));

        let err = prepare_payload(r#"{"value":"flat"}"#, DEFAULT_START_DATE, today()).unwrap_err();
        assert!(matches!(err, Error::InvalidPayload(_)));
    }

    #[test]
    fn missing_employee_id_is_rejected() {
        let err = prepare_payload(r#"{"value":{}}"#, DEFAULT_START_DATE, today()).unwrap_err();
        assert!(matches!(err, Error::MissingField("encryptedEmployeeId")));

        let err = prepare_payload(
            r#"{"value":{"encryptedEmployeeId":null}}"#,
            DEFAULT_START_DATE,
            today(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingField("encryptedEmployeeId")));
    }
}
