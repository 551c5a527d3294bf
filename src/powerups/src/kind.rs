//! Power-up kinds and their fixed metadata.

use serde::{Deserialize, Serialize};
use theme::Theme;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PowerUpKind {
    // Mario
    Mushroom,
    FireFlower,
    Star,
    Leaf,
    OneUpMushroom,
    // Zelda
    HeartContainer,
    Fairy,
    Potion,
    Shield,
    Bomb,
    // DKC
    Banana,
    Barrel,
    AnimalBuddy,
    GoldenBanana,
    DkCoin,
}

/// Display metadata and effect duration for a kind.
pub struct PowerUpMeta {
    pub name: &'static str,
    pub description: &'static str,
    /// Seconds the effect lasts once activated; 0 means instant/permanent.
    pub duration_secs: u64,
}

impl PowerUpKind {
    /// Stable lowercase key used in derived inventory ids.
    pub fn key(&self) -> &'static str {
        match self {
            PowerUpKind::Mushroom => "mushroom",
            PowerUpKind::FireFlower => "fire_flower",
            PowerUpKind::Star => "star",
            PowerUpKind::Leaf => "leaf",
            PowerUpKind::OneUpMushroom => "1up_mushroom",
            PowerUpKind::HeartContainer => "heart_container",
            PowerUpKind::Fairy => "fairy",
            PowerUpKind::Potion => "potion",
            PowerUpKind::Shield => "shield",
            PowerUpKind::Bomb => "bomb",
            PowerUpKind::Banana => "banana",
            PowerUpKind::Barrel => "barrel",
            PowerUpKind::AnimalBuddy => "animal_buddy",
            PowerUpKind::GoldenBanana => "golden_banana",
            PowerUpKind::DkCoin => "dk_coin",
        }
    }

    pub fn meta(&self) -> PowerUpMeta {
        match self {
            PowerUpKind::Mushroom => PowerUpMeta {
                name: "Super Mushroom",
                description: "Protects against your next wrong answer.",
                duration_secs: 0,
            },
            PowerUpKind::FireFlower => PowerUpMeta {
                name: "Fire Flower",
                description: "Doubles points earned for 60 seconds.",
                duration_secs: 60,
            },
            PowerUpKind::Star => PowerUpMeta {
                name: "Super Star",
                description: "No penalties for 30 seconds.",
                duration_secs: 30,
            },
            PowerUpKind::Leaf => PowerUpMeta {
                name: "Super Leaf",
                description: "A second chance on your next wrong answer.",
                duration_secs: 0,
            },
            PowerUpKind::OneUpMushroom => PowerUpMeta {
                name: "1-Up Mushroom",
                description: "Restores full session health.",
                duration_secs: 0,
            },
            PowerUpKind::HeartContainer => PowerUpMeta {
                name: "Heart Container",
                description: "Permanently increases maximum health.",
                duration_secs: 0,
            },
            PowerUpKind::Fairy => PowerUpMeta {
                name: "Fairy",
                description: "Revives you when health reaches zero.",
                duration_secs: 0,
            },
            PowerUpKind::Potion => PowerUpMeta {
                name: "Red Potion",
                description: "Restores half of your session health.",
                duration_secs: 0,
            },
            PowerUpKind::Shield => PowerUpMeta {
                name: "Hylian Shield",
                description: "Blocks the next wrong-answer penalty.",
                duration_secs: 0,
            },
            PowerUpKind::Bomb => PowerUpMeta {
                name: "Bomb",
                description: "Reveals a hint on the next difficult card.",
                duration_secs: 0,
            },
            PowerUpKind::Banana => PowerUpMeta {
                name: "Banana Bunch",
                description: "Grants bonus points immediately.",
                duration_secs: 0,
            },
            PowerUpKind::Barrel => PowerUpMeta {
                name: "DK Barrel",
                description: "Protects your streak from the next wrong answer.",
                duration_secs: 0,
            },
            PowerUpKind::AnimalBuddy => PowerUpMeta {
                name: "Animal Buddy",
                description: "Raises the combo multiplier for 45 seconds.",
                duration_secs: 45,
            },
            PowerUpKind::GoldenBanana => PowerUpMeta {
                name: "Golden Banana",
                description: "Triples points earned for 30 seconds.",
                duration_secs: 30,
            },
            PowerUpKind::DkCoin => PowerUpMeta {
                name: "DK Coin",
                description: "Grants a large currency bonus.",
                duration_secs: 0,
            },
        }
    }

    /// The grantable kinds for a theme, in grant-cycling order.
    pub fn for_theme(theme: Theme) -> &'static [PowerUpKind] {
        match theme {
            Theme::Mario => &[
                PowerUpKind::Mushroom,
                PowerUpKind::FireFlower,
                PowerUpKind::Star,
                PowerUpKind::Leaf,
                PowerUpKind::OneUpMushroom,
            ],
            Theme::Zelda => &[
                PowerUpKind::HeartContainer,
                PowerUpKind::Fairy,
                PowerUpKind::Potion,
                PowerUpKind::Shield,
                PowerUpKind::Bomb,
            ],
            Theme::Dkc => &[
                PowerUpKind::Banana,
                PowerUpKind::Barrel,
                PowerUpKind::AnimalBuddy,
                PowerUpKind::GoldenBanana,
                PowerUpKind::DkCoin,
            ],
        }
    }
}
