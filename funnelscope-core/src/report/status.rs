/// Short human description of an HTTP status code.
pub fn status_description(code: u16) -> &'static str {
    match code {
        400 => "Bad Request - Invalid request syntax",
        401 => "Unauthorized - Authentication required",
        403 => "Forbidden - Access denied",
        404 => "Not Found - Resource not found",
        405 => "Method Not Allowed - HTTP method not supported",
        408 => "Request Timeout - Client took too long",
        409 => "Conflict - Resource conflict",
        422 => "Unprocessable Entity - Invalid request data",
        429 => "Too Many Requests - Rate limit exceeded",
        500 => "Internal Server Error - Server-side error",
        502 => "Bad Gateway - Upstream server error",
        503 => "Service Unavailable - Server overloaded",
        504 => "Gateway Timeout - Upstream timeout",
        505 => "HTTP Version Not Supported",
        _ => "Unknown error",
    }
}
