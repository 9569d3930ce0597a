//! Property tests for the repository adapters.

#![allow(clippy::unwrap_used)]

use order_service::{
    InMemoryOrderRepository, OrderDraft, OrderRepository, SqliteOrderRepository,
};
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sqlite_create_then_find_preserves_fields(
        title in "\\PC{0,64}",
        status in any::<bool>(),
    ) {
        let (created, found) = runtime().block_on(async {
            let repo = SqliteOrderRepository::in_memory().await.unwrap();
            let created = repo.create(OrderDraft::new(title.clone(), status)).await.unwrap();
            let found = repo.find_by_id(created.id).await.unwrap();
            (created, found)
        });

        prop_assert_eq!(&found, &created);
        prop_assert_eq!(found.title, title);
        prop_assert_eq!(found.status, status);
    }

    #[test]
    fn in_memory_ids_are_unique_and_increasing(
        drafts in prop::collection::vec(("\\PC{0,16}", any::<bool>()), 1..20),
    ) {
        let ids = tokio_test::block_on(async {
            let repo = InMemoryOrderRepository::new();
            let mut ids = Vec::with_capacity(drafts.len());
            for (title, status) in &drafts {
                let order = repo.create(OrderDraft::new(title.clone(), *status)).await.unwrap();
                ids.push(order.id);
            }
            ids
        });

        prop_assert_eq!(ids.len(), drafts.len());
        prop_assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn update_then_find_reflects_new_fields(
        before in ("\\PC{0,32}", any::<bool>()),
        after in ("\\PC{0,32}", any::<bool>()),
    ) {
        let (updated, found) = tokio_test::block_on(async {
            let repo = InMemoryOrderRepository::new();
            let mut order = repo.create(OrderDraft::new(before.0, before.1)).await.unwrap();
            order.apply(OrderDraft::new(after.0.clone(), after.1));
            let updated = repo.update(order).await.unwrap();
            let found = repo.find_by_id(updated.id).await.unwrap();
            (updated, found)
        });

        prop_assert_eq!(&found, &updated);
        prop_assert_eq!(found.title, after.0);
        prop_assert_eq!(found.status, after.1);
    }
}
