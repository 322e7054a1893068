use crate::error::NetworkError;

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Collapse whitespace and truncate an error body for display.
pub fn sanitize_error_body(input: &str) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return collapsed;
    }

    let mut end = MAX_ERROR_BODY_CHARS;
    while end > 0 && !collapsed.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &collapsed[..end])
}

/// Build a sanitized status error from a failed HTTP response.
pub async fn status_error(ritual: &str, response: reqwest::Response) -> NetworkError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());
    NetworkError::Status {
        ritual: ritual.to_string(),
        status,
        body: sanitize_error_body(&body),
    }
}
