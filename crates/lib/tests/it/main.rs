/*! Integration tests for Dynadoc.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * - persistence: End-to-end document lifecycle through a repository and
 *   the in-memory store
 * - wire: Serialized wire shapes of items and partial updates
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("dynadoc=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod persistence;
mod wire;
