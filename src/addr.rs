//! Server address classification.
//!
//! The address segment of a connection string names either a TCP endpoint
//! (`host`, `host:port`, `[::1]:3306`) or a Unix domain socket path, which
//! may arrive as a parenthesized literal (`(/tmp/mysql.sock)`) or
//! percent-encoded (`%2Ftmp%2Fmysql.sock`). Both socket spellings
//! canonicalize to the identical decoded filesystem path here, before any
//! later stage sees them.

use crate::error::{DialResult, Grammar};

/// An address as written in the connection string, before defaults.
///
/// `Tcp` fields stay `None` when the string leaves them out; the resolver
/// fills them from the documented defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawAddr {
    Tcp {
        host: Option<String>,
        port: Option<u16>,
    },
    Unix {
        path: String,
    },
}

impl RawAddr {
    pub(crate) fn unspecified() -> Self {
        Self::Tcp {
            host: None,
            port: None,
        }
    }

    pub(crate) fn is_unspecified(&self) -> bool {
        matches!(
            self,
            Self::Tcp {
                host: None,
                port: None
            }
        )
    }
}

/// A fully resolved server address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerAddr {
    /// TCP endpoint.
    Tcp { host: String, port: u16 },
    /// Unix domain socket.
    Unix { path: String },
}

impl std::fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tcp { host, port } if host.contains(':') => {
                write!(f, "[{}]:{}", host, port)
            }
            Self::Tcp { host, port } => write!(f, "{}:{}", host, port),
            Self::Unix { path } => write!(f, "unix:{}", path),
        }
    }
}

/// Canonical form of a decoded socket path: always absolute.
///
/// `(path/to/socket.sock)` and `path%2Fto%2Fsocket.sock` both mean
/// `/path/to/socket.sock`.
pub(crate) fn socket_path(decoded: String) -> String {
    if decoded.starts_with('/') {
        decoded
    } else {
        format!("/{}", decoded)
    }
}

/// Classify a parenthesized address literal.
///
/// The literal is read verbatim: anything containing `/` is a socket path,
/// anything else is a `host[:port]` endpoint, and an empty literal leaves
/// the address unspecified.
pub(crate) fn parse_literal(inner: &str, grammar: Grammar) -> DialResult<RawAddr> {
    if inner.is_empty() {
        return Ok(RawAddr::unspecified());
    }
    if inner.contains('/') {
        return Ok(RawAddr::Unix {
            path: socket_path(inner.to_string()),
        });
    }
    let (host, port) = split_host_port(inner, grammar)?;
    Ok(RawAddr::Tcp { host, port })
}

/// Parse the host segment of a URI authority or a bare hostname.
pub(crate) fn parse_host_segment(segment: &str, grammar: Grammar) -> DialResult<RawAddr> {
    if segment.is_empty() {
        return Ok(RawAddr::unspecified());
    }
    if let Some(rest) = segment.strip_prefix('(') {
        let Some(inner) = rest.strip_suffix(')') else {
            return Err(grammar.malformed("unexpected text after address literal"));
        };
        return parse_literal(inner, grammar);
    }
    let (host, port) = split_host_port(segment, grammar)?;
    Ok(RawAddr::Tcp { host, port })
}

/// Apply a native-DSN network token to a parsed address.
///
/// `unix` forces the socket interpretation (with the conventional default
/// path when none is given); the `tcp` family requires a TCP endpoint.
pub(crate) fn apply_proto(proto: Option<&str>, addr: RawAddr) -> DialResult<RawAddr> {
    let Some(proto) = proto else { return Ok(addr) };
    match proto {
        "unix" => match addr {
            RawAddr::Unix { .. } => Ok(addr),
            RawAddr::Tcp {
                host: None,
                port: None,
            } => Ok(RawAddr::Unix {
                path: crate::resolve::DEFAULT_UNIX_SOCKET.to_string(),
            }),
            RawAddr::Tcp { .. } => Err(Grammar::Dsn
                .malformed("network 'unix' requires a socket path address")),
        },
        "tcp" | "tcp4" | "tcp6" => match addr {
            RawAddr::Tcp { .. } => Ok(addr),
            RawAddr::Unix { .. } => Err(Grammar::Dsn
                .malformed(format!("network '{}' cannot use a socket path", proto))),
        },
        other => Err(Grammar::Dsn.malformed(format!("unknown network '{}'", other))),
    }
}

/// Split `host[:port]`, honoring `[...]` IPv6 literals, and validate the
/// host text. An empty host or missing port stays unresolved.
fn split_host_port(segment: &str, grammar: Grammar) -> DialResult<(Option<String>, Option<u16>)> {
    let (host_raw, port_raw) = if segment.starts_with('[') {
        let Some(close) = segment.find(']') else {
            return Err(grammar.malformed("unterminated '[' in host"));
        };
        let host = &segment[..close + 1];
        match &segment[close + 1..] {
            "" => (host, None),
            rest if rest.starts_with(':') => (host, Some(&rest[1..])),
            _ => return Err(grammar.malformed("unexpected text after IPv6 host")),
        }
    } else if let Some(colon) = segment.rfind(':') {
        (&segment[..colon], Some(&segment[colon + 1..]))
    } else {
        (segment, None)
    };

    let port = match port_raw {
        Some(text) => Some(
            text.parse::<u16>()
                .map_err(|_| grammar.malformed(format!("invalid port '{}'", text)))?,
        ),
        None => None,
    };

    let host = if host_raw.is_empty() {
        None
    } else {
        Some(validate_host(host_raw, grammar)?)
    };

    Ok((host, port))
}

// Validation rides on url's host parser, which percent-decodes domain text
// itself. IPv6 hosts are stored without their brackets; domains come back
// in the normalized (lowercased) form url gives them.
fn validate_host(host: &str, grammar: Grammar) -> DialResult<String> {
    match url::Host::parse(host) {
        Ok(url::Host::Ipv6(ip)) => Ok(ip.to_string()),
        Ok(other) => Ok(other.to_string()),
        Err(_) => Err(grammar.malformed(format!("invalid host '{}'", host))),
    }
}
