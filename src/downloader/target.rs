use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use url::Url;

use crate::confirmations::Confirmation;
use crate::payload::PAYLOAD_DATE_FORMAT;

pub const DEFAULT_PDF_ENDPOINT: &str =
    "https://us.etrade.com/webapisp/stockplan/pdf/getReleaseConfirmation.pdf";
pub const UNKNOWN_DATE: &str = "unknown_date";

/// Where one confirmation is fetched from and saved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub output_path: PathBuf,
    pub download_url: Url,
    pub date_known: bool,
}

pub fn build_target(
    confirmation: &Confirmation,
    employee_id: &str,
    output_dir: &Path,
    endpoint: &Url,
) -> DownloadTarget {
    let date = file_date(&confirmation.confirmation_date);
    let file_name = format!(
        "{}_{}_{}.pdf",
        date.as_deref().unwrap_or(UNKNOWN_DATE),
        plan_type_slug(&confirmation.plan_type_code),
        confirmation.confirmation_id
    );

    let mut download_url = endpoint.clone();
    download_url
        .query_pairs_mut()
        .append_pair("eId", employee_id)
        .append_pair("cId", &confirmation.confirmation_id);

    DownloadTarget {
        output_path: output_dir.join(file_name),
        download_url,
        date_known: date.is_some(),
    }
}

/// `MM/DD/YYYY` → `YYYY-MM-DD`, or `None` for anything that is not a real date.
pub fn file_date(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw, PAYLOAD_DATE_FORMAT)
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}

pub fn plan_type_slug(plan_type: &str) -> String {
    plan_type.to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use regex::Regex;

    fn confirmation(date: &str, plan_type: &str) -> Confirmation {
        Confirmation {
            confirmation_id: "C1".to_string(),
            confirmation_date: date.to_string(),
            plan_type_code: plan_type.to_string(),
        }
    }

    fn endpoint() -> Url {
        Url::parse(DEFAULT_PDF_ENDPOINT).unwrap()
    }

    #[test]
    fn builds_dated_file_name_and_query() {
        let target = build_target(
            &confirmation("01/02/2024", "STOCK OPTIONS"),
            "E1",
            Path::new("docs"),
            &endpoint(),
        );

        assert_eq!(
            target.output_path,
            PathBuf::from("docs/2024-01-02_stock_options_C1.pdf")
        );
        assert_eq!(
            target.download_url.as_str(),
            "https://us.etrade.com/webapisp/stockplan/pdf/getReleaseConfirmation.pdf?eId=E1&cId=C1"
        );
        assert!(target.date_known);
    }

    #[test]
    fn invalid_calendar_date_uses_placeholder() {
        let target = build_target(
            &confirmation("02/30/2024", "Restricted Stock"),
            "E1",
            Path::new("docs"),
            &endpoint(),
        );
        assert_eq!(
            target.output_path,
            PathBuf::from("docs/unknown_date_restricted_stock_C1.pdf")
        );
        assert!(!target.date_known);
    }

    #[test]
    fn file_names_follow_date_slug_id_pattern() {
        let pattern = Regex::new(r"^(\d{4}-\d{2}-\d{2}|unknown_date)_[a-z_]+_C1\.pdf$").unwrap();
        for (date, plan_type) in [
            ("1/2/2024", "Restricted Stock"),
            ("12/31/2023", "STOCK OPTIONS"),
            ("13/01/2023", "STOCK OPTIONS"),
        ] {
            let target = build_target(
                &confirmation(date, plan_type),
                "E1",
                Path::new("docs"),
                &endpoint(),
            );
            let name = target.output_path.file_name().unwrap().to_str().unwrap();
            assert!(pattern.is_match(name), "{name}");
        }
    }

    #[test]
    fn file_date_variants() {
        assert_eq!(file_date("12/31/2023").as_deref(), Some("2023-12-31"));
        assert_eq!(file_date("2023-12-31"), None);
        assert_eq!(file_date(""), None);
    }

    #[test]
    fn query_values_are_encoded() {
        let target = build_target(
            &confirmation("01/02/2024", "STOCK OPTIONS"),
            "a+b/c=",
            Path::new("out"),
            &endpoint(),
        );
        let pairs: Vec<(String, String)> = target
            .download_url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("eId".to_string(), "a+b/c=".to_string()),
                ("cId".to_string(), "C1".to_string()),
            ]
        );
    }
}
