//! Connection dialing.

use std::time::Duration;

use mysql_async::prelude::Queryable;
use mysql_async::{DriverError, Opts};
use tokio::time;
use tracing::{debug, info, instrument};

use crate::error::{DialError, DialResult};
use crate::target::ConnectionTarget;
use crate::tls::TlsMode;

pub use mysql_async::Conn;

/// Open a connection to a resolved target.
///
/// The attempt is bounded by the target's connect timeout when one is set.
/// A `Preferred` target meeting a server without TLS support is retried
/// unencrypted, under the same bound. Server-side failures come back as
/// [`DialError::Connect`] carrying the inspected
/// [`ErrorStatus`](crate::ErrorStatus).
#[instrument(
    skip(target),
    fields(
        address = %target.address,
        database = ?target.database,
        tls = %target.tls_mode
    )
)]
pub async fn dial(target: &ConnectionTarget) -> DialResult<Conn> {
    if !target.params.is_empty() {
        let keys: Vec<_> = target.params.keys().map(String::as_str).collect();
        debug!(?keys, "ignoring passthrough options at the wire layer");
    }

    let conn = match attempt(target.to_opts(), target.connect_timeout).await {
        Err(err) if target.tls_mode == TlsMode::Preferred && server_offers_no_tls(&err) => {
            debug!("server offers no TLS, retrying unencrypted");
            attempt(target.plaintext_opts(), target.connect_timeout).await?
        }
        other => other?,
    };

    info!("MySQL connection established");
    Ok(conn)
}

/// Open a connection and verify liveness with a server ping.
pub async fn dial_and_ping(target: &ConnectionTarget) -> DialResult<Conn> {
    let mut conn = dial(target).await?;
    conn.ping().await?;
    Ok(conn)
}

async fn attempt(opts: Opts, limit: Option<Duration>) -> DialResult<Conn> {
    let connecting = Conn::new(opts);
    match limit {
        Some(limit) => time::timeout(limit, connecting)
            .await
            .map_err(|_| DialError::Timeout(limit))?
            .map_err(DialError::from),
        None => connecting.await.map_err(DialError::from),
    }
}

// the driver refuses the handshake when TLS is requested but the server
// lacks the capability
fn server_offers_no_tls(err: &DialError) -> bool {
    matches!(
        err,
        DialError::Connect {
            source: mysql_async::Error::Driver(DriverError::NoClientSslFlagFromServer),
            ..
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_server_tls_is_recognized() {
        let err = DialError::from(mysql_async::Error::Driver(
            DriverError::NoClientSslFlagFromServer,
        ));
        assert!(server_offers_no_tls(&err));
    }

    #[test]
    fn test_other_errors_do_not_trigger_the_plaintext_retry() {
        let err = DialError::from(mysql_async::Error::Driver(DriverError::ConnectionClosed));
        assert!(!server_offers_no_tls(&err));

        let err = DialError::Timeout(Duration::from_secs(1));
        assert!(!server_offers_no_tls(&err));
    }
}
