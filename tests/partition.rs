//! Property tests for the favorites/others partition over live reads.

mod common;

use common::{people, runtime_with};
use phonebook::domain::ContactId;
use phonebook::Event;
use proptest::prelude::*;
use std::collections::BTreeSet;

const CONTACTS: u64 = 8;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #[test]
    fn sections_never_overlap(
        toggles in proptest::collection::vec(1..=CONTACTS, 0..12),
        page_size in 1usize..5,
    ) {
        let (favorite_ids, other_ids, total, expected) = block_on(async {
            let mut runtime = runtime_with(people(CONTACTS as usize), page_size);
            runtime.dispatch(Event::Load).await.unwrap();

            let mut expected = BTreeSet::new();
            for id in &toggles {
                let id = ContactId::new(*id);
                if !expected.remove(&id) {
                    expected.insert(id);
                }
                runtime.dispatch(Event::ToggleFavorite(id)).await.unwrap();
            }

            let view = runtime.state().view().unwrap();
            let favorite_ids: BTreeSet<_> = view.favorites.iter().map(|c| c.id).collect();
            let other_ids: BTreeSet<_> = view.others.iter().map(|c| c.id).collect();
            (favorite_ids, other_ids, view.total_others_count, expected)
        });

        prop_assert!(favorite_ids.is_disjoint(&other_ids));
        prop_assert_eq!(&favorite_ids, &expected);
        prop_assert_eq!(total, CONTACTS as usize - expected.len());
        prop_assert!(other_ids.len() <= page_size);
    }

    #[test]
    fn paging_back_and_forth_stays_in_bounds(
        moves in proptest::collection::vec(any::<bool>(), 0..20),
    ) {
        let pages = block_on(async {
            let mut runtime = runtime_with(people(CONTACTS as usize), 3);
            runtime.dispatch(Event::Load).await.unwrap();

            let mut pages = Vec::new();
            for forward in moves {
                let event = if forward { Event::NextPage } else { Event::PrevPage };
                runtime.dispatch(event).await.unwrap();
                let view = runtime.state().view().unwrap();
                pages.push((view.current_page, view.others.len()));
            }
            pages
        });

        for (page, rows) in pages {
            prop_assert!((1..=3).contains(&page));
            prop_assert!(rows > 0);
        }
    }
}
