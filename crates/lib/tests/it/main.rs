/*! Integration tests for the Precog client.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - facade: Tests for the Precog operations and the paths/parameters they produce
 * - requests: Tests for HttpClient request assembly, response decoding and errors
 * - tokens: Tests for token creation payloads, including expiry evaluation
 * - end_to_end: Tests driving ReqwestTransport against a local HTTP server
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("precog=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod end_to_end;
mod helpers;
