//! End-to-end list behavior through the runtime, client cache and worker.

mod common;

use common::{other_names, people, person, runtime_with, transport};
use phonebook::domain::{ContactId, Field, NewContact};
use phonebook::ui::helpers::strip_ansi;
use phonebook::Event;

#[tokio::test]
async fn twelve_contacts_span_two_pages() {
    let mut runtime = runtime_with(people(12), 10);
    runtime.dispatch(Event::Load).await.unwrap();

    let view = runtime.state().view().unwrap();
    assert_eq!(view.others.len(), 10);
    assert_eq!(view.total_others_count, 12);
    assert!(view.has_next);
    assert!(!view.has_prev);

    runtime.dispatch(Event::NextPage).await.unwrap();
    let view = runtime.state().view().unwrap();
    assert_eq!(other_names(&runtime), vec!["Person11", "Person12"]);
    assert_eq!(view.current_page, 2);
    assert!(!view.has_next);
    assert!(view.has_prev);

    // no page three
    assert!(!runtime.dispatch(Event::NextPage).await.unwrap());
    assert_eq!(runtime.state().pages.current_page(), 2);
}

#[tokio::test]
async fn creating_outside_the_search_refetches_the_count() {
    let mut runtime = runtime_with(vec![person("Bob", "Ray"), person("Bobby", "Hill")], 10);
    runtime.dispatch(Event::SetSearch("bob".to_string())).await.unwrap();
    assert_eq!(runtime.state().view().unwrap().total_others_count, 2);
    let counted = transport(&runtime).count("count others");

    runtime.dispatch(Event::AddContact(person("Ann", "Lee"))).await.unwrap();

    let view = runtime.state().view().unwrap();
    assert_eq!(other_names(&runtime), vec!["Bob", "Bobby"]);
    assert_eq!(view.total_others_count, 2);
    assert_eq!(transport(&runtime).count("count others"), counted + 1);
    assert_eq!(runtime.state().notice.as_deref(), Some("Added contact Ann Lee"));
}

#[tokio::test]
async fn favoriting_moves_a_row_between_sections() {
    let mut runtime = runtime_with(people(3), 10);
    runtime.dispatch(Event::Load).await.unwrap();
    assert_eq!(runtime.state().view().unwrap().total_others_count, 3);

    runtime.dispatch(Event::ToggleFavorite(ContactId::new(3))).await.unwrap();

    let view = runtime.state().view().unwrap();
    assert_eq!(view.favorites.len(), 1);
    assert_eq!(view.favorites[0].id, ContactId::new(3));
    assert_eq!(other_names(&runtime), vec!["Person1", "Person2"]);
    assert_eq!(view.total_others_count, 2);

    runtime.dispatch(Event::ToggleFavorite(ContactId::new(3))).await.unwrap();
    let view = runtime.state().view().unwrap();
    assert!(view.favorites.is_empty());
    assert_eq!(view.total_others_count, 3);
}

#[tokio::test]
async fn favorites_ignore_the_page_and_the_search() {
    let mut runtime = runtime_with(people(15), 10);
    runtime.dispatch(Event::ToggleFavorite(ContactId::new(12))).await.unwrap();
    runtime.dispatch(Event::ToggleFavorite(ContactId::new(2))).await.unwrap();

    let view = runtime.state().view().unwrap();
    assert_eq!(view.favorites.len(), 2);
    assert_eq!(view.total_others_count, 13);

    runtime.dispatch(Event::SetSearch("person1".to_string())).await.unwrap();
    let view = runtime.state().view().unwrap();
    let favorite_ids: Vec<_> = view.favorites.iter().map(|c| c.id).collect();
    assert_eq!(favorite_ids, vec![ContactId::new(2), ContactId::new(12)]);
    // Person1, Person10, Person11, Person13, Person14, Person15
    assert_eq!(view.total_others_count, 6);
    assert!(view.others.iter().all(|c| c.first_name.starts_with("Person1")));
}

#[tokio::test]
async fn failed_reads_keep_the_previous_list() {
    let mut runtime = runtime_with(people(4), 10);
    runtime.dispatch(Event::Load).await.unwrap();
    let before = runtime.state().view().cloned().unwrap();

    transport(&runtime).failing.set(true);
    runtime.dispatch(Event::Refresh).await.unwrap();

    assert_eq!(runtime.state().view(), Some(&before));
    let banner = runtime.state().banner.clone().unwrap();
    assert!(banner.contains("connection refused"), "{banner}");

    transport(&runtime).failing.set(false);
    runtime.dispatch(Event::Refresh).await.unwrap();
    assert!(runtime.state().banner.is_none());
    assert!(runtime.state().view().unwrap().generation > before.generation);
}

#[tokio::test]
async fn failed_page_reads_do_not_advance_past_the_end() {
    let mut runtime = runtime_with(people(12), 10);
    runtime.dispatch(Event::Load).await.unwrap();

    transport(&runtime).failing.set(true);
    runtime.dispatch(Event::NextPage).await.unwrap();
    runtime.dispatch(Event::NextPage).await.unwrap();

    assert_eq!(runtime.state().pages.state().offset, 10);
    assert_eq!(runtime.state().view().unwrap().current_page, 1);
    assert!(runtime.state().banner.is_some());

    transport(&runtime).failing.set(false);
    runtime.dispatch(Event::Refresh).await.unwrap();
    assert_eq!(other_names(&runtime), vec!["Person11", "Person12"]);
}

#[tokio::test]
async fn invalid_forms_never_leave_the_client() {
    let mut runtime = runtime_with(people(1), 10);
    runtime.dispatch(Event::Load).await.unwrap();
    let generation = runtime.state().coordinator.current_generation();

    let bad = NewContact::new("Ann", "Lee", vec!["call me".to_string()]);
    runtime.dispatch(Event::AddContact(bad)).await.unwrap();

    assert_eq!(transport(&runtime).count("create contact"), 0);
    assert_eq!(runtime.state().coordinator.current_generation(), generation);
    assert_eq!(runtime.state().form_errors[0].0, Field::Phone(0));
}

#[tokio::test]
async fn refresh_bypasses_the_cache() {
    let mut runtime = runtime_with(people(2), 10);
    runtime.dispatch(Event::Load).await.unwrap();
    runtime.dispatch(Event::SetSearch(String::new())).await.unwrap();
    assert_eq!(transport(&runtime).count("query others"), 1);

    runtime.dispatch(Event::Refresh).await.unwrap();
    assert_eq!(transport(&runtime).count("query others"), 2);
}

#[tokio::test]
async fn deleting_the_last_row_of_the_last_page_steps_back() {
    let mut runtime = runtime_with(people(11), 10);
    runtime.dispatch(Event::Load).await.unwrap();
    runtime.dispatch(Event::NextPage).await.unwrap();
    assert_eq!(other_names(&runtime), vec!["Person11"]);

    runtime.dispatch(Event::DeleteContact(ContactId::new(11))).await.unwrap();

    let view = runtime.state().view().unwrap();
    assert_eq!(runtime.state().pages.state().offset, 0);
    assert_eq!(view.current_page, 1);
    assert_eq!(view.others.len(), 10);
    assert!(!view.has_next);
    assert_eq!(runtime.state().notice.as_deref(), Some("Deleted contact #11"));
}

#[tokio::test]
async fn editing_updates_the_row_in_place() {
    let mut runtime = runtime_with(people(2), 10);
    runtime.dispatch(Event::Load).await.unwrap();

    runtime
        .dispatch(Event::EditContact {
            id: ContactId::new(1),
            contact: person("Ada", "Lovelace"),
        })
        .await
        .unwrap();

    assert_eq!(other_names(&runtime), vec!["Ada", "Person2"]);
    assert_eq!(runtime.state().notice.as_deref(), Some("Updated contact Ada Lovelace"));
}

#[tokio::test]
async fn editing_a_missing_contact_shows_a_banner() {
    let mut runtime = runtime_with(people(1), 10);
    runtime.dispatch(Event::Load).await.unwrap();

    runtime
        .dispatch(Event::EditContact {
            id: ContactId::new(99),
            contact: person("Ada", "Lovelace"),
        })
        .await
        .unwrap();

    assert!(runtime.state().banner.is_some());
    assert_eq!(other_names(&runtime), vec!["Person1"]);
}

#[tokio::test]
async fn quit_stops_the_runtime() {
    let mut runtime = runtime_with(vec![], 10);
    assert!(!runtime.dispatch(Event::Quit).await.unwrap());
    assert!(runtime.should_quit());
}

#[tokio::test]
async fn rendered_screen_shows_both_sections() {
    let mut runtime = runtime_with(people(12), 10);
    runtime.dispatch(Event::ToggleFavorite(ContactId::new(1))).await.unwrap();

    let screen = strip_ansi(&phonebook::ui::render(runtime.state(), 80));
    assert!(screen.contains("Favorites"));
    assert!(screen.contains("Contacts"));
    assert!(screen.contains("★"));
    assert!(screen.contains("Page 1"));
    assert!(screen.contains("Person11"));
    assert!(!screen.contains("Person12"));
}
