//! Relation fetch orchestration for a single parent.
//!
//! The relation lookups of one parent are polled together and joined; the
//! composite resolves only when every lookup has returned. The first error
//! fails the whole composite and is returned as-is.

use std::future::Future;

use crate::errors::ServiceError;

/// A parent paired with its optional single relation and its list relation.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite<P, O = (), M = ()> {
    pub parent: P,
    pub one: Option<O>,
    pub many: Vec<M>,
}

/// Resolve a single-valued and a list-valued relation of `parent` concurrently.
///
/// An absent single relation stays `None`; it is never turned into an error.
///
/// # Examples
/// ```
/// use service::compose::fetch_related;
/// use service::errors::ServiceError;
/// let c = tokio_test::block_on(fetch_related(
///     "course",
///     async { Ok::<_, ServiceError>(None::<&str>) },
///     async { Ok::<_, ServiceError>(vec!["ann", "bob"]) },
/// )).unwrap();
/// assert_eq!(c.one, None);
/// assert_eq!(c.many.len(), 2);
/// ```
pub async fn fetch_related<P, O, M, FO, FM>(parent: P, one: FO, many: FM) -> Result<Composite<P, O, M>, ServiceError>
where
    FO: Future<Output = Result<Option<O>, ServiceError>>,
    FM: Future<Output = Result<Vec<M>, ServiceError>>,
{
    let (one, many) = tokio::try_join!(one, many)?;
    Ok(Composite { parent, one, many })
}

/// Parent with only a single-valued relation.
pub async fn fetch_one<P, O, FO>(parent: P, one: FO) -> Result<Composite<P, O>, ServiceError>
where
    FO: Future<Output = Result<Option<O>, ServiceError>>,
{
    fetch_related(parent, one, async { Ok::<_, ServiceError>(Vec::new()) }).await
}

/// Parent with only a list relation.
pub async fn fetch_many<P, M, FM>(parent: P, many: FM) -> Result<Composite<P, (), M>, ServiceError>
where
    FM: Future<Output = Result<Vec<M>, ServiceError>>,
{
    fetch_related(parent, async { Ok::<_, ServiceError>(None) }, many).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn waits_for_every_lookup() {
        let c = fetch_related(
            1,
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok::<_, ServiceError>(Some("teacher"))
            },
            async { Ok::<_, ServiceError>(vec!["a", "b", "c"]) },
        )
        .await
        .unwrap();
        assert_eq!(c, Composite { parent: 1, one: Some("teacher"), many: vec!["a", "b", "c"] });
    }

    #[tokio::test]
    async fn lookups_run_concurrently() {
        // each side waits until the other has started
        let started = AtomicUsize::new(0);
        let side = || async {
            started.fetch_add(1, Ordering::SeqCst);
            while started.load(Ordering::SeqCst) < 2 {
                tokio::task::yield_now().await;
            }
            Ok::<_, ServiceError>(())
        };
        let c = fetch_related(
            (),
            async {
                side().await?;
                Ok::<_, ServiceError>(Some(1))
            },
            async {
                side().await?;
                Ok::<_, ServiceError>(vec![2])
            },
        )
        .await
        .unwrap();
        assert_eq!(c.one, Some(1));
    }

    #[tokio::test]
    async fn absent_single_relation_is_none() {
        let c = fetch_one("dept", async { Ok::<Option<u8>, ServiceError>(None) }).await.unwrap();
        assert!(c.one.is_none());
        assert!(c.many.is_empty());
    }

    #[tokio::test]
    async fn failure_propagates_unmodified() {
        let err = fetch_many("student", async { Err::<Vec<u8>, ServiceError>(ServiceError::Db(DbErr::Custom("boom".into()))) })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Db(DbErr::Custom(m)) if m == "boom"));
    }
}
