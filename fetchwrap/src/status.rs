//! Fixed table of HTTP statuses that carry a predefined default message.

/// HTTP statuses with a predefined default message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KnownErrorCode {
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 500
    InternalServerError,
}

impl KnownErrorCode {
    /// Every known code, in ascending status order.
    pub const ALL: [KnownErrorCode; 5] = [
        KnownErrorCode::BadRequest,
        KnownErrorCode::Unauthorized,
        KnownErrorCode::Forbidden,
        KnownErrorCode::NotFound,
        KnownErrorCode::InternalServerError,
    ];

    /// Looks up the table entry for a status, if it has one.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(KnownErrorCode::BadRequest),
            401 => Some(KnownErrorCode::Unauthorized),
            403 => Some(KnownErrorCode::Forbidden),
            404 => Some(KnownErrorCode::NotFound),
            500 => Some(KnownErrorCode::InternalServerError),
            _ => None,
        }
    }

    pub fn as_u16(self) -> u16 {
        match self {
            KnownErrorCode::BadRequest => 400,
            KnownErrorCode::Unauthorized => 401,
            KnownErrorCode::Forbidden => 403,
            KnownErrorCode::NotFound => 404,
            KnownErrorCode::InternalServerError => 500,
        }
    }

    /// Human-readable message used when the server supplies none.
    pub fn default_message(self) -> &'static str {
        match self {
            KnownErrorCode::BadRequest => "Bad request",
            KnownErrorCode::Unauthorized => "Authentication required",
            KnownErrorCode::Forbidden => "Access denied",
            KnownErrorCode::NotFound => "Resource not found",
            KnownErrorCode::InternalServerError => "Internal server error",
        }
    }
}

/// Resolves the fallback message for a status: the table entry when known,
/// otherwise a generic message embedding the code.
pub(crate) fn default_message_for(status: u16) -> String {
    match KnownErrorCode::from_status(status) {
        Some(code) => code.default_message().to_string(),
        None => format!("Unknown error (status: {})", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_both_ways() {
        for code in KnownErrorCode::ALL {
            assert_eq!(KnownErrorCode::from_status(code.as_u16()), Some(code));
        }
    }

    #[test]
    fn unlisted_statuses_are_unknown() {
        for status in [0, 200, 204, 402, 405, 409, 422, 429, 502, 503, 504] {
            assert_eq!(KnownErrorCode::from_status(status), None, "status {}", status);
        }
    }

    #[test]
    fn default_message_uses_table_for_known_codes() {
        assert_eq!(default_message_for(400), "Bad request");
        assert_eq!(default_message_for(401), "Authentication required");
        assert_eq!(default_message_for(403), "Access denied");
        assert_eq!(default_message_for(404), "Resource not found");
        assert_eq!(default_message_for(500), "Internal server error");
    }

    #[test]
    fn default_message_is_generic_for_unknown_codes() {
        assert_eq!(default_message_for(418), "Unknown error (status: 418)");
        assert_eq!(default_message_for(503), "Unknown error (status: 503)");
    }
}
