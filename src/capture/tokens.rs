use super::model::CapturedRequest;
use crate::error::{Error, Result};

const COMMAND: &str = "curl";
const DEFAULT_METHOD: &str = "POST";
const COOKIE_HEADER: &str = "Cookie";
const HEADER_SEPARATOR: &str = ": ";

const DATA_OPTIONS: &[&str] = &[
    "-d",
    "--data",
    "--data-raw",
    "--data-binary",
    "--data-ascii",
];

#[derive(Debug, Default)]
struct ParsedCurl {
    method: Option<String>,
    url: Option<String>,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

/// Walk shell-split tokens of a captured command. Flags without a value and
/// anything unrecognised are skipped rather than rejected.
pub(crate) fn parse_tokens(tokens: &[String]) -> Result<CapturedRequest> {
    let mut parsed = ParsedCurl::default();
    let mut index = 0;

    while index < tokens.len() {
        let token = tokens[index].as_str();
        let value = tokens.get(index + 1);

        match (token, value) {
            (COMMAND, Some(url)) => parsed.url = Some(url.clone()),
            ("-H" | "--header", Some(header)) => {
                if let Some((name, value)) = header.split_once(HEADER_SEPARATOR) {
                    set_header(&mut parsed.headers, name, value.to_string());
                }
            }
            ("-b" | "--cookie", Some(cookie)) => append_cookie(&mut parsed.headers, cookie),
            ("-X" | "--request", Some(method)) => parsed.method = Some(method.to_uppercase()),
            (option, Some(body)) if DATA_OPTIONS.contains(&option) => {
                parsed.body = Some(body.clone())
            }
            _ => {
                index += 1;
                continue;
            }
        }
        index += 2;
    }

    Ok(CapturedRequest {
        method: parsed
            .method
            .unwrap_or_else(|| DEFAULT_METHOD.to_string()),
        url: parsed.url.ok_or(Error::MissingField("url"))?,
        headers: parsed.headers,
        body: parsed.body.ok_or(Error::MissingField("--data-raw"))?,
    })
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    match headers.iter_mut().find(|(existing, _)| existing == name) {
        Some(entry) => entry.1 = value,
        None => headers.push((name.to_string(), value)),
    }
}

fn append_cookie(headers: &mut Vec<(String, String)>, cookie: &str) {
    match headers.iter_mut().find(|(name, _)| name == COOKIE_HEADER) {
        Some(entry) => {
            entry.1.push_str("; ");
            entry.1.push_str(cookie);
        }
        None => headers.push((COOKIE_HEADER.to_string(), cookie.to_string())),
    }
}
