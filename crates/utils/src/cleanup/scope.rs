//! Run a closure with a manager that is closed on every exit path.

use super::config::ManagerConfig;
use super::manager::ResourceManager;
use infra_core::Error;
use tracing::warn;

/// Run `body` with a fresh manager and close the manager afterwards.
///
/// If `body` fails, its error is returned and any teardown failure is
/// logged. If `body` succeeds but teardown fails, the teardown error is
/// returned. A panic in `body` still releases everything through `Drop`.
pub fn scope<R, E, F>(config: ManagerConfig, body: F) -> Result<R, E>
where
    F: FnOnce(&mut ResourceManager) -> Result<R, E>,
    E: From<Error>,
{
    let mut manager = ResourceManager::with_config(config)?;
    let outcome = body(&mut manager);
    let closed = manager.close();

    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(suppressed)) => {
            warn!(
                manager = %manager.config().name,
                "Teardown failed after scope error: {suppressed}"
            );
            if let Some(failures) = suppressed.release_failures() {
                for failure in failures {
                    warn!(
                        manager = %manager.config().name,
                        resource = %failure.resource,
                        "Suppressed release failure: {}",
                        failure.source
                    );
                }
            }
            Err(e)
        }
    }
}
