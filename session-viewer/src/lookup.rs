use url::Url;

use crate::{
    backend::models::ActiveSession,
    utils::errors::{Result, ViewerError},
};

/// Query parameter aliases under which a viewer URL may carry the session id.
/// First present wins.
const SESSION_ID_PARAMS: [&str; 2] = ["local_session_id", "session_id"];

/// Resolve the session id from the viewer argument
///
/// Accepts either a bare session id or a full viewer URL whose query string
/// carries the id. Fails before any network call when nothing usable is given.
pub fn resolve_session_id(arg: Option<&str>) -> Result<String> {
    let arg = match arg {
        Some(arg) if !arg.trim().is_empty() => arg.trim(),
        _ => return Err(ViewerError::MissingSessionId),
    };

    // Viewer URLs carry the id in the query string
    if let Ok(url) = Url::parse(arg) {
        if url.has_host() {
            for param in SESSION_ID_PARAMS {
                if let Some((_, value)) = url.query_pairs().find(|(key, _)| key == param) {
                    if !value.is_empty() {
                        return Ok(value.into_owned());
                    }
                }
            }
            return Err(ViewerError::MissingSessionId);
        }
    }

    Ok(arg.to_string())
}

/// Locate the session record matching the id under either alias
///
/// The backend listing is small; a linear scan is all this needs.
pub fn find_session<'a>(
    sessions: &'a [ActiveSession],
    session_id: &str,
) -> Result<&'a ActiveSession> {
    sessions
        .iter()
        .find(|session| session.matches(session_id))
        .ok_or_else(|| ViewerError::SessionNotFound {
            session_id: session_id.to_string(),
        })
}

/// Extract the access token from a matched record
pub fn extract_access_token(session: &ActiveSession) -> Result<String> {
    session
        .access_token
        .clone()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ViewerError::MissingAccessToken {
            session_id: session.display_id().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn session(local: Option<&str>, remote: Option<&str>, token: Option<&str>) -> ActiveSession {
        serde_json::from_value(serde_json::json!({
            "local_session_id": local,
            "session_id": remote,
            "access_token": token,
        }))
        .unwrap()
    }

    #[test]
    fn resolves_bare_id() {
        assert_eq!(resolve_session_id(Some("abc-123")).unwrap(), "abc-123");
    }

    #[test]
    fn resolves_id_from_viewer_url() {
        let id = resolve_session_id(Some(
            "http://localhost:5173/viewer?local_session_id=abc-123",
        ))
        .unwrap();
        assert_eq!(id, "abc-123");
    }

    #[test]
    fn local_session_id_alias_wins_over_session_id() {
        let id = resolve_session_id(Some(
            "http://localhost:5173/viewer?session_id=remote&local_session_id=local",
        ))
        .unwrap();
        assert_eq!(id, "local");
    }

    #[test]
    fn falls_back_to_session_id_alias() {
        let id =
            resolve_session_id(Some("http://localhost:5173/viewer?session_id=remote")).unwrap();
        assert_eq!(id, "remote");
    }

    #[test]
    fn missing_argument_is_an_error() {
        assert_matches!(resolve_session_id(None), Err(ViewerError::MissingSessionId));
        assert_matches!(
            resolve_session_id(Some("  ")),
            Err(ViewerError::MissingSessionId)
        );
    }

    #[test]
    fn url_without_session_parameter_is_an_error() {
        assert_matches!(
            resolve_session_id(Some("http://localhost:5173/viewer?foo=bar")),
            Err(ViewerError::MissingSessionId)
        );
    }

    #[test]
    fn finds_record_by_either_alias() {
        let sessions = vec![
            session(Some("local-1"), Some("remote-1"), Some("tok-1")),
            session(Some("local-2"), Some("remote-2"), Some("tok-2")),
        ];
        assert_eq!(
            find_session(&sessions, "remote-2").unwrap().display_id(),
            "local-2"
        );
        assert_eq!(
            find_session(&sessions, "local-1").unwrap().display_id(),
            "local-1"
        );
    }

    #[test]
    fn unmatched_id_is_not_found() {
        let sessions = vec![session(Some("local-1"), None, Some("tok"))];
        assert_matches!(
            find_session(&sessions, "nope"),
            Err(ViewerError::SessionNotFound { .. })
        );
    }

    #[test]
    fn record_without_token_is_rejected() {
        let record = session(Some("local-1"), None, None);
        assert_matches!(
            extract_access_token(&record),
            Err(ViewerError::MissingAccessToken { .. })
        );

        let record = session(Some("local-1"), None, Some(""));
        assert_matches!(
            extract_access_token(&record),
            Err(ViewerError::MissingAccessToken { .. })
        );
    }
}
