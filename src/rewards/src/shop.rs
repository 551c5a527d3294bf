//! Purchasable characters and cosmetics.

use serde::{Deserialize, Serialize};
use theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Character,
    Cosmetic,
}

/// A catalog entry. Prices are fixed; ownership lives in the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: u64,
    pub kind: ItemKind,
    pub theme: Option<Theme>,
}

const fn character(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: u64,
    theme: Theme,
) -> ShopItem {
    ShopItem {
        id,
        name,
        description,
        price,
        kind: ItemKind::Character,
        theme: Some(theme),
    }
}

const fn cosmetic(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: u64,
) -> ShopItem {
    ShopItem {
        id,
        name,
        description,
        price,
        kind: ItemKind::Cosmetic,
        theme: None,
    }
}

/// The fixed shop catalog. Zero-price entries are owned from first run.
pub fn shop_catalog() -> Vec<ShopItem> {
    vec![
        character("char_mario", "Mario", "The classic hero.", 0, Theme::Mario),
        character("char_luigi", "Luigi", "Higher jumps.", 100, Theme::Mario),
        character("char_toad", "Toad", "Fast and nimble.", 150, Theme::Mario),
        character(
            "char_peach",
            "Princess Peach",
            "Floats through levels.",
            200,
            Theme::Mario,
        ),
        character("char_link", "Link", "The Hero of Time.", 0, Theme::Zelda),
        character(
            "char_zelda",
            "Princess Zelda",
            "Wields the power of wisdom.",
            200,
            Theme::Zelda,
        ),
        character("char_sheik", "Sheik", "Swift and mysterious.", 250, Theme::Zelda),
        character(
            "char_dk",
            "Donkey Kong",
            "King of the jungle.",
            0,
            Theme::Dkc,
        ),
        character("char_diddy", "Diddy Kong", "Nimble sidekick.", 100, Theme::Dkc),
        character(
            "char_dixie",
            "Dixie Kong",
            "Helicopter spin.",
            150,
            Theme::Dkc,
        ),
        cosmetic("cosmetic_golden_frame", "Golden Frame", "A shiny profile frame.", 50),
        cosmetic(
            "cosmetic_rainbow_trail",
            "Rainbow Trail",
            "Leaves a rainbow trail.",
            75,
        ),
        cosmetic(
            "cosmetic_sparkle_effect",
            "Sparkle Effect",
            "Adds sparkles to your character.",
            100,
        ),
        cosmetic(
            "cosmetic_victory_dance",
            "Victory Dance",
            "Special dance on level complete.",
            125,
        ),
        cosmetic("cosmetic_crown", "Royal Crown", "A majestic crown.", 200),
    ]
}

pub fn find_item(item_id: &str) -> Option<ShopItem> {
    shop_catalog().into_iter().find(|item| item.id == item_id)
}
