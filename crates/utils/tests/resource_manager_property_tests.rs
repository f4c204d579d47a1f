use infra_core::{BoxError, Error};
use infra_utils::ResourceManager;
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<usize>>>;

fn register_all(rm: &mut ResourceManager, log: &Log, ids: std::ops::Range<usize>, failing: &[bool]) {
    for id in ids {
        let log = Arc::clone(log);
        let fails = failing.get(id).copied().unwrap_or(false);
        rm.register(id, move |id| -> Result<(), BoxError> {
            log.lock().unwrap().push(id);
            if fails {
                Err(format!("resource {id} failed").into())
            } else {
                Ok(())
            }
        });
    }
}

proptest! {
    #[test]
    fn test_close_releases_in_reverse_registration_order(n in 0usize..64) {
        let log = Log::default();
        let mut rm = ResourceManager::new();
        register_all(&mut rm, &log, 0..n, &[]);

        prop_assert!(rm.close().is_ok());
        let expected: Vec<usize> = (0..n).rev().collect();
        prop_assert_eq!(log.lock().unwrap().clone(), expected);
    }

    #[test]
    fn test_every_resource_released_once_despite_failures(
        failing in prop::collection::vec(any::<bool>(), 0..48)
    ) {
        let n = failing.len();
        let log = Log::default();
        let mut rm = ResourceManager::new();
        register_all(&mut rm, &log, 0..n, &failing);

        let result = rm.close();

        let expected: Vec<usize> = (0..n).rev().collect();
        prop_assert_eq!(log.lock().unwrap().clone(), expected);

        let expected_failures: Vec<String> = (0..n)
            .rev()
            .filter(|&id| failing[id])
            .map(|id| format!("resource {id} failed"))
            .collect();
        match result {
            Ok(()) => prop_assert!(expected_failures.is_empty()),
            Err(Error::Teardown(failures)) => {
                let actual: Vec<String> =
                    failures.iter().map(|f| f.source.to_string()).collect();
                prop_assert_eq!(actual, expected_failures);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
        prop_assert!(rm.is_empty());
    }

    #[test]
    fn test_rollback_keeps_entries_below_savepoint(below in 0usize..16, above in 0usize..16) {
        let log = Log::default();
        let mut rm = ResourceManager::new();
        register_all(&mut rm, &log, 0..below, &[]);
        let sp = rm.savepoint();
        register_all(&mut rm, &log, below..below + above, &[]);

        prop_assert!(rm.rollback(&sp).is_ok());
        let released_above: Vec<usize> = (below..below + above).rev().collect();
        prop_assert_eq!(log.lock().unwrap().clone(), released_above.clone());
        prop_assert_eq!(rm.len(), below);

        prop_assert!(rm.close().is_ok());
        let mut expected = released_above;
        expected.extend((0..below).rev());
        prop_assert_eq!(log.lock().unwrap().clone(), expected);
    }

    #[test]
    fn test_repeated_savepoints_grow_stack_once(repeats in 1usize..8) {
        let mut rm = ResourceManager::new();
        let first = rm.savepoint();
        for _ in 1..repeats {
            prop_assert_eq!(rm.savepoint(), first);
        }
        prop_assert_eq!(rm.len(), 1);
    }
}
