//! Tests for the deck editing session: pipeline commits feeding the
//! deck, notices for rejected adds, and the explicit search surfaces.

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use decksmith_catalog::CatalogError;
use decksmith_core::deck::ColorIdentityPolicy;
use decksmith_core::error::DeckError;
use decksmith_core::normalize::CardCategory;
use decksmith_pipeline::{DeckSession, Key, SessionEvent};

use common::{banned_card, legal_card, StubCatalog};

fn make_session(stub: StubCatalog) -> (DeckSession, Arc<StubCatalog>) {
    let catalog = Arc::new(stub);
    (DeckSession::new(catalog.clone()), catalog)
}

async fn type_and_settle(session: &DeckSession, text: &str) {
    session.input(text).await;
    tokio::time::sleep(Duration::from_millis(400)).await;
}

#[tokio::test(start_paused = true)]
async fn committed_suggestion_lands_in_the_deck() {
    let mut stub = StubCatalog::new();
    stub.insert_card(legal_card("sr-1", "Sol Ring", "Artifact", 1.0, &[]));
    stub.complete("Sol Ring", &["Sol Ring"]);
    let (mut session, _) = make_session(stub);

    type_and_settle(&session, "Sol Ring").await;
    let event = session.handle_key(Key::Enter).await;

    assert_matches!(event, SessionEvent::CardAdded { name } if name == "Sol Ring");
    assert_eq!(session.deck().len(), 1);
    assert_eq!(session.deck().cards()[0].category, CardCategory::Artifact);
    assert_eq!(session.quick_add().query().await, "");
}

#[tokio::test(start_paused = true)]
async fn duplicate_add_surfaces_a_notice_and_leaves_the_deck_alone() {
    let mut stub = StubCatalog::new();
    stub.insert_card(legal_card("sr-1", "Sol Ring", "Artifact", 1.0, &[]));
    stub.complete("Sol Ring", &["Sol Ring"]);
    let (mut session, _) = make_session(stub);

    type_and_settle(&session, "Sol Ring").await;
    session.handle_key(Key::Enter).await;

    type_and_settle(&session, "Sol Ring").await;
    let event = session.handle_key(Key::Enter).await;

    assert_matches!(
        event,
        SessionEvent::AddRejected(DeckError::DuplicateCard { name }) if name == "Sol Ring"
    );
    assert_eq!(session.deck().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn cursor_movement_produces_no_session_event() {
    let mut stub = StubCatalog::new();
    stub.insert_card(legal_card("sr-1", "Sol Ring", "Artifact", 1.0, &[]));
    stub.complete("Sol Ring", &["Sol Ring"]);
    let (mut session, _) = make_session(stub);

    type_and_settle(&session, "Sol Ring").await;
    assert_matches!(session.handle_key(Key::ArrowDown).await, SessionEvent::None);
    assert_matches!(session.handle_key(Key::Escape).await, SessionEvent::None);
    assert!(session.deck().is_empty());
}

#[tokio::test(start_paused = true)]
async fn policy_rejection_flows_through_as_a_notice() {
    let mut stub = StubCatalog::new();
    stub.insert_card(legal_card("lb-1", "Lightning Bolt", "Instant", 1.0, &["R"]));
    stub.complete("Lightning", &["Lightning Bolt"]);
    let (mut session, _) = make_session(stub);

    session.deck_mut().set_policy(ColorIdentityPolicy::Enforced);
    session
        .deck_mut()
        .set_commander(Arc::new(legal_card("hel-1", "Heliod", "Legendary Creature", 3.0, &["W"])));

    type_and_settle(&session, "Lightning").await;
    let event = session.handle_key(Key::Enter).await;

    assert_matches!(
        event,
        SessionEvent::AddRejected(DeckError::OutsideColorIdentity { .. })
    );
    assert!(session.deck().is_empty());
}

#[tokio::test]
async fn explicit_search_uses_the_legality_filter_and_surfaces_errors() {
    let mut stub = StubCatalog::new();
    stub.insert_card(legal_card("gg-1", "Goblin Guide", "Creature — Goblin", 1.0, &["R"]));
    stub.result_for("goblin legal:commander", &["Goblin Guide"]);
    let (session, catalog) = make_session(stub);

    let page = session.search_cards("goblin").await.expect("search succeeds");
    assert_eq!(page.data.len(), 1);
    assert_eq!(catalog.searches(), ["goblin legal:commander"]);

    catalog.fail_query("goblin legal:commander");
    let err = session.search_cards("goblin").await.unwrap_err();
    assert_matches!(err, CatalogError::Unavailable { status: 503, .. });
}

#[tokio::test]
async fn commander_search_uses_the_eligibility_prefix() {
    let (session, catalog) = make_session(StubCatalog::new());

    let page = session
        .search_commanders("atraxa")
        .await
        .expect("empty result is not an error");
    assert!(page.data.is_empty());
    assert_eq!(catalog.searches(), ["is:commander legal:commander atraxa"]);
}

#[tokio::test]
async fn stats_recompute_from_the_live_deck() {
    let (mut session, _) = make_session(StubCatalog::new());

    session.add_card(Arc::new(legal_card("1", "Llanowar Elves", "Creature — Elf", 1.0, &["G"])));
    session.add_card(Arc::new(legal_card("2", "Cultivate", "Sorcery", 3.0, &["G"])));
    session.add_card(Arc::new(legal_card("3", "Forest", "Basic Land — Forest", 0.0, &[])));

    let stats = session.stats();
    assert_eq!(stats.total_cards, 3);
    assert_eq!(stats.type_distribution[&CardCategory::Creature], 1);
    assert_eq!(stats.type_distribution[&CardCategory::Land], 1);
    assert_eq!(stats.color_distribution["G"], 2);
    assert!((stats.avg_cmc - 4.0 / 3.0).abs() < f64::EPSILON);

    session.deck_mut().remove_card(1).expect("valid index");
    let stats = session.stats();
    assert_eq!(stats.total_cards, 2);
    assert!(!stats.type_distribution.contains_key(&CardCategory::Sorcery));
}

#[tokio::test]
async fn banned_cards_still_enter_the_deck_but_are_marked() {
    // Legality is display metadata, not an add-time gate.
    let (mut session, _) = make_session(StubCatalog::new());

    let event = session.add_card(Arc::new(banned_card("bb-1", "Black Lotus")));
    assert_matches!(event, SessionEvent::CardAdded { .. });
    assert!(!session.deck().cards()[0].is_legal);
}
