//! Request identity used for throttle bookkeeping.

/// The slice of an incoming API request that throttles care about.
///
/// Policies never see the full request, only who sent it. Authenticated
/// traffic is tracked per user so that clients behind a shared proxy do
/// not consume each other's quota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Remote address the request arrived from
    pub remote_addr: String,

    /// Authenticated user ID, if any
    pub user_id: Option<String>,
}

impl ApiRequest {
    /// Create a request with no authenticated user.
    pub fn anonymous(remote_addr: impl Into<String>) -> Self {
        Self {
            remote_addr: remote_addr.into(),
            user_id: None,
        }
    }

    /// Create a request on behalf of an authenticated user.
    pub fn authenticated(remote_addr: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            remote_addr: remote_addr.into(),
            user_id: Some(user_id.into()),
        }
    }

    /// Stable key identifying the caller for throttle bookkeeping.
    ///
    /// Prefers the user ID when one is present, falling back to the
    /// remote address for anonymous traffic.
    pub fn ident(&self) -> String {
        match &self.user_id {
            Some(user_id) => format!("user:{}", user_id),
            None => format!("ip:{}", self.remote_addr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_ident_uses_remote_addr() {
        let request = ApiRequest::anonymous("203.0.113.7");
        assert_eq!(request.ident(), "ip:203.0.113.7");
    }

    #[test]
    fn test_authenticated_ident_prefers_user_id() {
        let request = ApiRequest::authenticated("203.0.113.7", "staff-42");
        assert_eq!(request.ident(), "user:staff-42");
    }

    #[test]
    fn test_same_user_different_addresses_share_ident() {
        let at_home = ApiRequest::authenticated("198.51.100.1", "staff-42");
        let at_work = ApiRequest::authenticated("203.0.113.7", "staff-42");
        assert_eq!(at_home.ident(), at_work.ident());
    }
}
