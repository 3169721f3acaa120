//! Static routing table.
//!
//! Each entry binds an inbound path to one upstream endpoint. New routes are
//! new entries here; the validate → forward → relay handler is shared.

use axum::http::Method;
use url::Url;

/// How upstream outcomes are turned into caller responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayPolicy {
    /// Any failure collapses into a 500 carrying `failure_message`.
    Strict { failure_message: &'static str },

    /// Upstream rejections keep the upstream status; local failures are 500.
    Passthrough {
        /// Used when a rejecting upstream gives no usable `message`.
        rejected_message: &'static str,
        transport_message: &'static str,
        unparsable_message: &'static str,
    },
}

/// One relayed endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    /// Route identifier for logs and metrics.
    pub name: &'static str,
    /// Inbound method; also used for the upstream call.
    pub method: Method,
    pub inbound_path: &'static str,
    /// Path relative to the configured upstream base URL.
    pub upstream_path: &'static str,
    /// Keys the inbound JSON object must carry with truthy values, in report order.
    pub required_fields: &'static [&'static str],
    pub policy: RelayPolicy,
}

impl RouteSpec {
    /// Whether the inbound body is read, validated and forwarded.
    pub fn forwards_body(&self) -> bool {
        self.method != Method::GET
    }
}

const TRANSPORT_MESSAGE: &str = "Internal server error.";
const UNPARSABLE_MESSAGE: &str = "Failed to parse response from PBX API.";

pub const USER_FIELDS: &[&str] = &[
    "username",
    "password",
    "email",
    "language",
    "timezone",
    "first_name",
    "last_name",
    "organization",
    "user_groups",
    "domain",
];

pub const EXTENSION_FIELDS: &[&str] = &[
    "extension",
    "user",
    "voicemail_password",
    "account_code",
    "outbound_caller_id_name",
    "outbound_caller_id_number",
    "effective_caller_id_name",
    "effective_caller_id_number",
    "emergency_caller_id_name",
    "emergency_caller_id_number",
    "max_registrations",
    "limit_max",
    "user_record",
    "domain",
    "context",
    "description",
    "extension_enabled",
];

/// Every relayed route.
pub static ROUTES: &[RouteSpec] = &[
    RouteSpec {
        name: "list_extensions",
        method: Method::GET,
        inbound_path: "/webapi/core/extension",
        upstream_path: "core/extension",
        required_fields: &[],
        policy: RelayPolicy::Strict {
            failure_message: "Error fetching PBX data",
        },
    },
    RouteSpec {
        name: "create_user",
        method: Method::POST,
        inbound_path: "/webapi/core/user/create",
        upstream_path: "core/user/create.php",
        required_fields: USER_FIELDS,
        policy: RelayPolicy::Passthrough {
            rejected_message: "Failed to create user on PBX.",
            transport_message: TRANSPORT_MESSAGE,
            unparsable_message: UNPARSABLE_MESSAGE,
        },
    },
    RouteSpec {
        name: "create_extension",
        method: Method::POST,
        inbound_path: "/webapi/core/extension/create",
        upstream_path: "core/extension/create.php",
        required_fields: EXTENSION_FIELDS,
        policy: RelayPolicy::Passthrough {
            rejected_message: "Failed to create extension on PBX.",
            transport_message: TRANSPORT_MESSAGE,
            unparsable_message: UNPARSABLE_MESSAGE,
        },
    },
];

/// A route bound to its absolute upstream URL.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub spec: &'static RouteSpec,
    pub upstream_url: Url,
}

/// Resolve every route against the upstream base URL.
///
/// The base is treated as a directory, so `https://pbx/webapi` and
/// `https://pbx/webapi/` resolve identically.
pub fn resolve_routes(base_url: &str) -> Result<Vec<ResolvedRoute>, url::ParseError> {
    let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
    ROUTES
        .iter()
        .map(|spec| {
            Ok(ResolvedRoute {
                spec,
                upstream_url: base.join(spec.upstream_path)?,
            })
        })
        .collect()
}
