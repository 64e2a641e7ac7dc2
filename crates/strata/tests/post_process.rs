//! Integration tests for the post-processing decorator.

use std::collections::HashMap;

use strata::{CacheLevelExt, Error, post_process, transformer};
use strata_level::{
    CacheLevel,
    testing::{CacheOp, RecordingCache},
};

type TestResult = Result<(), Error>;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

fn base_with(entries: &[(&str, i32)]) -> RecordingCache<String, i32> {
    let data: HashMap<String, i32> = entries.iter().map(|(k, v)| ((*k).to_string(), *v)).collect();
    RecordingCache::with_data(data)
}

#[test]
fn successful_fetch_is_transformed() -> TestResult {
    block_on(async {
        let base = base_with(&[("a", 10)]);
        let cache = post_process(base, transformer::from_fn(|v: i32| async move { Ok(v * 2) }));

        assert_eq!(cache.get(&"a".to_string()).await?, 20);
        Ok(())
    })
}

#[test]
fn fetch_failure_skips_the_transformer() {
    block_on(async {
        let base = RecordingCache::<String, i32>::new();
        let cache = post_process(
            base,
            transformer::from_fn(|_: i32| async move {
                panic!("transformer must not run when the fetch fails");
            }),
        );

        let err = cache.get(&"b".to_string()).await.expect_err("miss should fail");
        assert!(err.is_not_found());
    });
}

#[test]
fn backend_failure_propagates_unchanged() {
    block_on(async {
        let base = base_with(&[("a", 10)]);
        base.fail_when(|op| matches!(op, CacheOp::Get(_)));

        let cache = post_process(
            base,
            transformer::from_fn(|_: i32| async move {
                panic!("transformer must not run when the fetch fails");
            }),
        );

        let err = cache.get(&"a".to_string()).await.expect_err("injected failure");
        assert!(matches!(err, Error::Backend(_)));
    });
}

#[test]
fn transform_failure_fails_the_get_and_leaves_storage_untouched() -> TestResult {
    block_on(async {
        let base = base_with(&[("x", -1)]);
        let inspect = base.clone();
        let cache = post_process(
            base,
            transformer::from_fn(|v: i32| async move {
                if v < 0 {
                    Err(Error::transform_rejected("negative input"))
                } else {
                    Ok(v)
                }
            }),
        );

        let err = cache.get(&"x".to_string()).await.expect_err("should be rejected");
        assert!(matches!(err, Error::TransformRejected { .. }));

        // The stored value is unaffected by the failed transformation.
        assert_eq!(inspect.stored(&"x".to_string()), Some(-1));
        Ok(())
    })
}

#[test]
fn set_bypasses_the_transformer() -> TestResult {
    block_on(async {
        let base = RecordingCache::<String, i32>::new();
        let inspect = base.clone();
        let cache = post_process(base, transformer::from_fn(|v: i32| async move { Ok(v * 2) }));

        cache.set(&"k".to_string(), 7).await?;

        // Read through the base directly: the untransformed value was stored.
        assert_eq!(inspect.get(&"k".to_string()).await?, 7);

        // Reading through the decorator re-applies post-processing.
        assert_eq!(cache.get(&"k".to_string()).await?, 14);
        Ok(())
    })
}

#[test]
fn chained_transformers_apply_in_construction_order() -> TestResult {
    block_on(async {
        // v + 1 then v * 10 does not commute with v * 10 then v + 1.
        let forward = base_with(&[("k", 4)])
            .post_process(transformer::from_fn(|v: i32| async move { Ok(v + 1) }))
            .post_process(transformer::from_fn(|v: i32| async move { Ok(v * 10) }));
        let reversed = base_with(&[("k", 4)])
            .post_process(transformer::from_fn(|v: i32| async move { Ok(v * 10) }))
            .post_process(transformer::from_fn(|v: i32| async move { Ok(v + 1) }));

        assert_eq!(forward.get(&"k".to_string()).await?, 50);
        assert_eq!(reversed.get(&"k".to_string()).await?, 41);
        Ok(())
    })
}

#[test]
fn chaining_method_matches_nested_calls() -> TestResult {
    block_on(async {
        let nested = post_process(
            post_process(
                base_with(&[("k", 4)]),
                transformer::from_fn(|v: i32| async move { Ok(v + 1) }),
            ),
            transformer::from_fn(|v: i32| async move { Ok(v * 10) }),
        );
        let chained = base_with(&[("k", 4)])
            .post_process(transformer::from_fn(|v: i32| async move { Ok(v + 1) }))
            .post_process(transformer::from_fn(|v: i32| async move { Ok(v * 10) }));

        assert_eq!(
            nested.get(&"k".to_string()).await?,
            chained.get(&"k".to_string()).await?
        );
        Ok(())
    })
}

#[test]
fn clear_and_memory_pressure_pass_through() -> TestResult {
    block_on(async {
        let base = RecordingCache::<String, i32>::new();
        let inspect = base.clone();
        let cache = post_process(base, transformer::from_fn(|v: i32| async move { Ok(v) }));

        cache.set(&"k".to_string(), 1).await?;
        cache.clear().await?;
        cache.on_memory_pressure();

        assert_eq!(inspect.entry_count(), 0);
        assert_eq!(
            inspect.operations(),
            vec![
                CacheOp::Set {
                    key: "k".to_string(),
                    value: 1,
                },
                CacheOp::Clear,
                CacheOp::MemoryPressure,
            ]
        );
        Ok(())
    })
}

#[test]
fn clear_failure_propagates_unchanged() {
    block_on(async {
        let base = RecordingCache::<String, i32>::new();
        base.fail_when(|op| matches!(op, CacheOp::Clear));

        let cache = post_process(base, transformer::from_fn(|v: i32| async move { Ok(v) }));

        let err = cache.clear().await.expect_err("injected failure");
        assert!(matches!(err, Error::Backend(_)));
    });
}

#[test]
fn decorated_cache_decorates_again() -> TestResult {
    block_on(async {
        // Three levels of decoration, proving the result satisfies the same
        // contract recursively.
        let cache = base_with(&[("k", 1)])
            .post_process(transformer::from_fn(|v: i32| async move { Ok(v + 1) }))
            .post_process(transformer::from_fn(|v: i32| async move { Ok(v + 1) }))
            .post_process(transformer::from_fn(|v: i32| async move { Ok(v + 1) }));

        assert_eq!(cache.get(&"k".to_string()).await?, 4);
        Ok(())
    })
}

#[test]
fn worked_example_from_the_docs() {
    block_on(async {
        // {"a": 10}, doubling transformer: get("a") -> 20, get("b") -> NotFound.
        let cache = post_process(
            base_with(&[("a", 10)]),
            transformer::from_fn(|v: i32| async move { Ok(v * 2) }),
        );
        assert_eq!(cache.get(&"a".to_string()).await.expect("get failed"), 20);
        assert!(
            cache
                .get(&"b".to_string())
                .await
                .expect_err("miss should fail")
                .is_not_found()
        );

        // {"x": -1}, negative-rejecting transformer: get("x") -> TransformRejected.
        let cache = post_process(
            base_with(&[("x", -1)]),
            transformer::from_fn(|v: i32| async move {
                if v < 0 {
                    Err(Error::transform_rejected("negative input"))
                } else {
                    Ok(v)
                }
            }),
        );
        let err = cache.get(&"x".to_string()).await.expect_err("should be rejected");
        assert!(matches!(err, Error::TransformRejected { .. }));
    });
}

#[tokio::test]
async fn decorated_cache_is_shareable_across_tasks() -> TestResult {
    use std::sync::Arc;

    let base = base_with(&[("k", 21)]);
    let cache = Arc::new(post_process(
        base,
        transformer::from_fn(|v: i32| async move { Ok(v * 2) }),
    ));

    let handle = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.get(&"k".to_string()).await })
    };

    assert_eq!(cache.get(&"k".to_string()).await?, 42);
    assert_eq!(handle.await.expect("task panicked")?, 42);
    Ok(())
}
