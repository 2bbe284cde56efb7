//! One-shot loading tests

#[cfg(test)]
mod tests {
    use crate::core::globals::shared_bridge_with;
    use crate::core::tests::stub_native;
    use crate::core::{BridgeConfig, BridgeError, LoadOnce, NativeBridge, shared_bridge};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    const THREADS: usize = 16;

    #[test]
    fn test_racing_threads_load_once() {
        let slot = Arc::new(LoadOnce::<Arc<String>>::new());
        let attempts = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let slot = Arc::clone(&slot);
                let attempts = Arc::clone(&attempts);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    slot.get_or_load(|| {
                        attempts.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(20));
                        Ok(Arc::new("libquilt_rs".to_string()))
                    })
                })
            })
            .collect();

        let loaded: Vec<_> = handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect();

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(loaded.iter().all(|value| Arc::ptr_eq(value, &loaded[0])));
        assert!(slot.is_loaded());
    }

    #[test]
    fn test_failure_is_cached_without_retry() {
        let slot: LoadOnce<u32> = LoadOnce::new();
        let missing = BridgeError::LibraryNotFound {
            path: PathBuf::from("/home/dev/quilt-rs/target/debug/libquilt_rs.so"),
        };

        assert!(!slot.is_loaded());
        let first = slot.get_or_load(|| Err(missing.clone()));
        assert_eq!(first, Err(missing.clone()));
        assert!(slot.is_loaded());

        let attempts = AtomicUsize::new(0);
        let second = slot.get_or_load(|| {
            attempts.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        });
        assert_eq!(second, Err(missing));
        assert_eq!(attempts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_racing_threads_share_failure() {
        let slot = Arc::new(LoadOnce::<u32>::new());
        let attempts = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let slot = Arc::clone(&slot);
                let attempts = Arc::clone(&attempts);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    slot.get_or_load(|| {
                        attempts.fetch_add(1, Ordering::SeqCst);
                        Err(BridgeError::NotConfigured)
                    })
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Err(BridgeError::NotConfigured));
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shared_bridge_outcome_is_stable() {
        match (shared_bridge(), shared_bridge()) {
            (Ok(first), Ok(second)) => assert!(Arc::ptr_eq(&first, &second)),
            (Err(first), Err(second)) => {
                assert_eq!(first, second);
                assert!(first.is_load_failure());
            },
            (first, second) => {
                panic!("outcome changed between calls: {:?} then {:?}", first, second)
            },
        }
    }

    #[test]
    fn test_missing_library_fails_every_shared_call() {
        stub_native::reset();
        let slot: LoadOnce<Arc<NativeBridge>> = LoadOnce::new();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("libquilt_rs.so");
        let resolves = AtomicUsize::new(0);

        for _ in 0..3 {
            let err = shared_bridge_with(&slot, || {
                resolves.fetch_add(1, Ordering::SeqCst);
                Ok(BridgeConfig::new(&missing))
            })
            .unwrap_err();

            assert_eq!(err, BridgeError::LibraryNotFound { path: missing.clone() });
            assert_eq!(err.java_exception_class(), "java/lang/UnsatisfiedLinkError");
        }

        assert_eq!(resolves.load(Ordering::SeqCst), 1);
        assert!(slot.is_loaded());
        assert!(stub_native::calls().is_empty());
    }

    #[test]
    fn test_unresolved_config_is_cached() {
        let slot: LoadOnce<Arc<NativeBridge>> = LoadOnce::new();

        let first = shared_bridge_with(&slot, || Err(BridgeError::NotConfigured));
        let second =
            shared_bridge_with(&slot, || Ok(BridgeConfig::new("/opt/quilt/libquilt_rs.so")));

        assert_eq!(first.unwrap_err(), BridgeError::NotConfigured);
        assert_eq!(second.unwrap_err(), BridgeError::NotConfigured);
    }
}
