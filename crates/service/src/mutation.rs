//! Validation-before-write helpers for relationship mutations.
//!
//! Both ends of a link are looked up concurrently before anything is
//! written. There is no transaction around check and write: a referenced row
//! deleted in between is not detected here.

use std::future::Future;

use crate::errors::{OptionExt, ServiceError};

/// Await a single-row lookup, turning an empty result into `NotFound`.
pub async fn require<T, F>(lookup: F, entity: &'static str, id: i64) -> Result<T, ServiceError>
where
    F: Future<Output = Result<Option<T>, ServiceError>>,
{
    lookup.await?.or_not_found(entity, id)
}

/// Run two existence checks concurrently; both must succeed.
///
/// When both fail, the primary (`a`) error is reported.
pub async fn require_both<A, B, FA, FB>(a: FA, b: FB) -> Result<(A, B), ServiceError>
where
    FA: Future<Output = Result<A, ServiceError>>,
    FB: Future<Output = Result<B, ServiceError>>,
{
    let (a, b) = tokio::join!(a, b);
    Ok((a?, b?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn missing_secondary_is_named() {
        let err = require_both(
            require(async { Ok::<_, ServiceError>(Some(1)) }, "Course", 1),
            require(async { Ok::<Option<i32>, ServiceError>(None) }, "Teacher", 9),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Teacher with ID 9 not found");
    }

    #[tokio::test]
    async fn primary_reported_first_when_both_missing() {
        let err = require_both(
            require(async { Ok::<Option<i32>, ServiceError>(None) }, "Student", 3),
            require(async { Ok::<Option<i32>, ServiceError>(None) }, "Course", 4),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Student", id: 3 }));
    }

    #[tokio::test]
    async fn both_present() {
        let (a, b) = require_both(
            require(async { Ok::<_, ServiceError>(Some("d")) }, "Department", 1),
            require(async { Ok::<_, ServiceError>(Some("t")) }, "Teacher", 2),
        )
        .await
        .unwrap();
        assert_eq!((a, b), ("d", "t"));
    }

    #[tokio::test]
    async fn existence_checks_run_concurrently() {
        // each lookup waits until the other has started; sequential polling never finishes
        let started = AtomicUsize::new(0);
        let lookup = |value: i32| {
            let started = &started;
            async move {
                started.fetch_add(1, Ordering::SeqCst);
                while started.load(Ordering::SeqCst) < 2 {
                    tokio::task::yield_now().await;
                }
                Ok::<_, ServiceError>(Some(value))
            }
        };
        let both = require_both(require(lookup(1), "Course", 1), require(lookup(2), "Teacher", 2));
        let (a, b) = tokio::time::timeout(Duration::from_secs(1), both)
            .await
            .expect("lookups were polled one after the other")
            .unwrap();
        assert_eq!((a, b), (1, 2));
    }
}
