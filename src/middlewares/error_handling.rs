use crate::error::{ApiError, Error};
use async_trait::async_trait;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;

/// Reqwest middleware which translates error responses returned from the providers
/// into [`Error::ApiError`](crate::error::Error)s.
pub struct ErrorHandlingMiddleware;

#[async_trait]
impl Middleware for ErrorHandlingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        // Capture the response
        let response = next.run(req, extensions).await?;

        // Build an ApiError if the response is not a success
        if !response.status().is_success() {
            tracing::debug!("Failed HTTP request. Status code: {}", response.status());

            let api_error = api_error_from_response(response).await?;
            return Err(Error::ApiError(api_error).into());
        }

        Ok(response)
    }
}

/// Body of an error response from one of the providers.
#[derive(serde::Deserialize, Debug)]
#[serde(untagged)]
enum ErrorResponseBody {
    Stripe {
        error: StripeErrorDetail,
    },
    Paystack {
        #[allow(dead_code)]
        status: bool,
        message: String,
        code: Option<String>,
    },
    Unknown,
}

#[derive(serde::Deserialize, Debug)]
struct StripeErrorDetail {
    r#type: Option<String>,
    message: Option<String>,
    code: Option<String>,
    param: Option<String>,
}

async fn api_error_from_response(response: Response) -> reqwest_middleware::Result<ApiError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    // Fall back to the raw body, or to the status reason if there's no body at all
    let fallback_message = || {
        if bytes.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string()
        } else {
            String::from_utf8_lossy(&bytes).into_owned()
        }
    };

    let error_response: ErrorResponseBody =
        serde_json::from_slice(&bytes).unwrap_or(ErrorResponseBody::Unknown);

    let api_error = match error_response {
        ErrorResponseBody::Stripe { error } => ApiError {
            status: status.as_u16(),
            message: error.message.unwrap_or_else(fallback_message),
            r#type: error.r#type,
            code: error.code,
            param: error.param,
        },
        ErrorResponseBody::Paystack { message, code, .. } => ApiError {
            status: status.as_u16(),
            message,
            r#type: None,
            code,
            param: None,
        },
        ErrorResponseBody::Unknown => ApiError {
            status: status.as_u16(),
            message: fallback_message(),
            r#type: None,
            code: None,
            param: None,
        },
    };

    Ok(api_error)
}
