//! Deck statistics: mana curve, type and color distributions.
//!
//! Everything here is recomputed per call from the deck's current
//! entries; there is no cache to go stale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::deck::Deck;
use crate::normalize::CardCategory;

/// Aggregated statistics over a deck's non-commander cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckStats {
    /// Number of non-commander cards (the commander is tracked
    /// separately on the deck and excluded here).
    pub total_cards: usize,
    /// floor(cmc) → number of cards at that cost.
    pub mana_curve: BTreeMap<u32, usize>,
    /// Category → number of cards in it.
    pub type_distribution: BTreeMap<CardCategory, usize>,
    /// Color symbol → number of cards whose identity contains it.
    /// A multi-color card counts once per color.
    pub color_distribution: BTreeMap<String, usize>,
    /// Mean converted mana cost, 0.0 for an empty deck.
    pub avg_cmc: f64,
}

/// Compute statistics for a deck.
pub fn deck_stats(deck: &Deck) -> DeckStats {
    let mut mana_curve: BTreeMap<u32, usize> = BTreeMap::new();
    let mut type_distribution: BTreeMap<CardCategory, usize> = BTreeMap::new();
    let mut color_distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut cmc_sum = 0.0;

    for entry in deck.cards() {
        let cmc = entry.card.cmc;
        cmc_sum += cmc;
        *mana_curve.entry(cmc.floor() as u32).or_insert(0) += 1;
        *type_distribution.entry(entry.category).or_insert(0) += 1;
        for symbol in &entry.card.color_identity {
            *color_distribution.entry(symbol.clone()).or_insert(0) += 1;
        }
    }

    let total_cards = deck.cards().len();
    let avg_cmc = if total_cards == 0 {
        0.0
    } else {
        cmc_sum / total_cards as f64
    };

    DeckStats {
        total_cards,
        mana_curve,
        type_distribution,
        color_distribution,
        avg_cmc,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::card::CatalogCard;

    fn add(deck: &mut Deck, id: &str, type_line: &str, cmc: f64, identity: &[&str]) {
        let card: CatalogCard = serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Card {id}"),
            "type_line": type_line,
            "cmc": cmc,
            "color_identity": identity,
        }))
        .expect("test card should deserialize");
        deck.add_card(Arc::new(card)).expect("add");
    }

    #[test]
    fn empty_deck_has_zero_avg_cmc() {
        let stats = deck_stats(&Deck::new());
        assert_eq!(stats.total_cards, 0);
        assert_eq!(stats.avg_cmc, 0.0);
        assert!(stats.mana_curve.is_empty());
        assert!(stats.type_distribution.is_empty());
        assert!(stats.color_distribution.is_empty());
    }

    #[test]
    fn avg_cmc_is_the_mean() {
        let mut deck = Deck::new();
        add(&mut deck, "1", "Creature", 1.0, &[]);
        add(&mut deck, "2", "Creature", 3.0, &[]);
        add(&mut deck, "3", "Sorcery", 5.0, &[]);

        let stats = deck_stats(&deck);
        assert_eq!(stats.total_cards, 3);
        assert_eq!(stats.avg_cmc, 3.0);
    }

    #[test]
    fn mana_curve_buckets_by_floor() {
        let mut deck = Deck::new();
        add(&mut deck, "1", "Creature", 0.0, &[]);
        add(&mut deck, "2", "Creature", 2.0, &[]);
        add(&mut deck, "3", "Instant", 2.0, &[]);
        // Fractional costs exist in un-sets; they bucket downward.
        add(&mut deck, "4", "Creature", 2.5, &[]);

        let stats = deck_stats(&deck);
        assert_eq!(stats.mana_curve[&0], 1);
        assert_eq!(stats.mana_curve[&2], 3);
        assert!(!stats.mana_curve.contains_key(&1));
    }

    #[test]
    fn type_distribution_counts_categories() {
        let mut deck = Deck::new();
        add(&mut deck, "1", "Artifact Creature — Golem", 3.0, &[]);
        add(&mut deck, "2", "Creature — Elf", 1.0, &[]);
        add(&mut deck, "3", "Basic Land — Island", 0.0, &[]);

        let stats = deck_stats(&deck);
        // The hybrid line counts as creature, per the classifier priority.
        assert_eq!(stats.type_distribution[&CardCategory::Creature], 2);
        assert_eq!(stats.type_distribution[&CardCategory::Land], 1);
    }

    #[test]
    fn multi_color_cards_count_once_per_color() {
        let mut deck = Deck::new();
        add(&mut deck, "1", "Creature", 2.0, &["W", "U"]);
        add(&mut deck, "2", "Creature", 2.0, &["U"]);
        add(&mut deck, "3", "Artifact", 1.0, &[]);

        let stats = deck_stats(&deck);
        assert_eq!(stats.color_distribution["W"], 1);
        assert_eq!(stats.color_distribution["U"], 2);
        // Colorless cards contribute to no color bucket.
        assert_eq!(stats.color_distribution.len(), 2);
    }
}
