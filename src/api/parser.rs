// src/api/parser.rs
//! Turns raw responses into typed values or API errors.

use super::request::FetchResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, CodaErrorCode};
use serde::Deserialize;

/// Error body of the Coda API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodaApiErrorResponse {
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Parses a response: JSON body on success, API error otherwise.
pub fn parse_api_response<T>(response: &FetchResponse) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if !response.is_success() {
        return Err(parse_error_response(response));
    }

    serde_json::from_str(&response.body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", response.url, e);
        AppError::MalformedResponse(format!(
            "{} (body: {})",
            e,
            preview(&response.body)
        ))
    })
}

/// Builds the error for a non-success response, keeping the API's message.
pub fn parse_error_response(response: &FetchResponse) -> AppError {
    let code = CodaErrorCode::from_http_status(response.status);

    let message = serde_json::from_str::<CodaApiErrorResponse>(&response.body)
        .ok()
        .and_then(|error| error.message.or(error.status_message))
        .unwrap_or_else(|| {
            if response.body.trim().is_empty() {
                format!("HTTP {} from {}", response.status, response.url)
            } else {
                preview(&response.body)
            }
        });

    log::debug!("{} from {}: {}", response.status, response.url, message);

    AppError::CodaService {
        code,
        message,
        status: response.status,
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    #[test]
    fn test_error_parsing_keeps_api_message() {
        let response = FetchResponse::new(
            404,
            "https://coda.io/apis/v1/docs/d1/pages/nope",
            r#"{"statusCode":404,"statusMessage":"Not Found","message":"Could not find a page with ID nope"}"#,
        );

        match parse_api_response::<Page>(&response) {
            Err(AppError::CodaService {
                code,
                message,
                status,
            }) => {
                assert_eq!(code, CodaErrorCode::NotFound);
                assert_eq!(message, "Could not find a page with ID nope");
                assert_eq!(status, 404);
            }
            other => panic!("Expected CodaService error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_without_json_body_falls_back() {
        let response = FetchResponse::new(502, "https://coda.io/x", "");
        let err = parse_error_response(&response);
        assert_eq!(
            err.to_string(),
            "Coda API returned an error (server_error_502): HTTP 502 from https://coda.io/x"
        );
    }

    #[test]
    fn test_malformed_success_body() {
        let response = FetchResponse::new(200, "https://coda.io/x", "<html>");
        assert!(matches!(
            parse_api_response::<Page>(&response),
            Err(AppError::MalformedResponse(_))
        ));
    }
}
