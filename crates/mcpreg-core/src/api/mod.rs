//! HTTP routing for the registry API
//!
//! Routes:
//! - `GET /v0/servers?limit=&cursor=` - paginated listing
//! - `GET /v0/servers/{name}?version=` - one entry, latest by default or for
//!   `version=latest`
//! - `GET /v0/servers/{name}/versions` - all versions, newest first
//! - `GET /health` - load status and server count
//!
//! `HEAD` is accepted wherever `GET` is and yields the same status, which makes
//! it a cheap existence check. The router never touches a socket; the server
//! module feeds it request lines and writes back whatever it returns.

mod response;

pub use response::ApiResponse;

use std::borrow::Cow;
use std::num::IntErrorKind;

use serde::Serialize;
use url::form_urlencoded;

use crate::entry::Entry;
use crate::registry::Registry;

pub const SERVERS_PATH: &str = "/v0/servers";
pub const HEALTH_PATH: &str = "/health";
const VERSIONS_SUFFIX: &str = "/versions";

/// `?version=` value that selects the newest version unless a server
/// publishes a version with this literal name.
pub const LATEST_ALIAS: &str = "latest";

/// Body of `GET /v0/servers/{name}/versions`
#[derive(Debug, Serialize)]
struct VersionsBody<'a> {
    servers: &'a [Entry],
}

/// Maps request lines to registry operations.
#[derive(Debug, Clone)]
pub struct Router {
    registry: Registry,
}

impl Router {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Handle one request given its method and request target (`/path?query`).
    ///
    /// The path is matched as sent. Dot segments and backslashes are not
    /// normalized, so they reach name lookup untouched.
    pub fn handle(&self, method: &str, target: &str) -> ApiResponse {
        if !method.eq_ignore_ascii_case("GET") && !method.eq_ignore_ascii_case("HEAD") {
            return ApiResponse::method_not_allowed();
        }

        let (path, query) = split_target(target);
        if path == HEALTH_PATH {
            return ApiResponse::ok(&self.registry.health().health());
        }
        if path == SERVERS_PATH || path == "/v0/servers/" {
            return self.list(query);
        }

        match path.strip_prefix("/v0/servers/") {
            Some(rest) => match rest.strip_suffix(VERSIONS_SUFFIX) {
                Some(raw_name) if !raw_name.is_empty() => self.versions(raw_name),
                _ => self.get(rest, query),
            },
            None => ApiResponse::not_found("Not found"),
        }
    }

    fn list(&self, query: &str) -> ApiResponse {
        let limit = match query_param(query, "limit") {
            Some(raw) => match parse_limit(&raw) {
                Ok(limit) => Some(limit),
                Err(message) => return ApiResponse::bad_request(message),
            },
            None => None,
        };
        let cursor = query_param(query, "cursor");

        match self.registry.listing().list(limit, cursor.as_deref()) {
            Ok(page) => ApiResponse::ok(&page),
            Err(err) => {
                tracing::debug!(error = %err, "Rejected listing cursor");
                err.into()
            }
        }
    }

    fn get(&self, raw_name: &str, query: &str) -> ApiResponse {
        let name = match decode_name(raw_name) {
            Ok(name) => name,
            Err(response) => return response,
        };
        let resolver = self.registry.resolver();
        let version = query_param(query, "version");
        let version = match version.as_deref() {
            Some(v) if !resolver.exists(&name, Some(v)) && is_latest_alias(v) => None,
            other => other,
        };

        match resolver.resolve(&name, version) {
            Ok(entry) => ApiResponse::ok(entry),
            Err(err) => err.into(),
        }
    }

    fn versions(&self, raw_name: &str) -> ApiResponse {
        let name = match decode_name(raw_name) {
            Ok(name) => name,
            Err(response) => return response,
        };

        match self.registry.resolver().versions(&name) {
            Ok(servers) => ApiResponse::ok(&VersionsBody { servers }),
            Err(err) => err.into(),
        }
    }
}

/// Split a request target into raw path and raw query.
fn split_target(target: &str) -> (&str, &str) {
    let target = target.split_once('#').map_or(target, |(before, _)| before);
    target.split_once('?').unwrap_or((target, ""))
}

fn is_latest_alias(version: &str) -> bool {
    version.trim().eq_ignore_ascii_case(LATEST_ALIAS)
}

/// First non-empty value of a query parameter.
fn query_param(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

/// Parse a `limit` value, saturating integers too large for `i64`.
fn parse_limit(raw: &str) -> Result<i64, String> {
    match raw.trim().parse::<i64>() {
        Ok(limit) => Ok(limit),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(format!("Invalid limit '{raw}': must be an integer")),
        },
    }
}

/// Percent-decode a `{name}` path segment. Decoded names are opaque.
fn decode_name(raw: &str) -> Result<Cow<'_, str>, ApiResponse> {
    let name = urlencoding::decode(raw)
        .map_err(|_| ApiResponse::bad_request("Server name is not valid UTF-8"))?;
    if name.is_empty() {
        return Err(ApiResponse::not_found("Not found"));
    }
    Ok(name)
}
