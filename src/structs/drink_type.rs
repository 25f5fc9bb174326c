use std::fmt;

use serde::{Deserialize, Serialize};

/// Every drink the watch knows how to log.
///
/// Variants are declared in catalog order; `Ord` follows that order, which is also the order
/// drinks appear in on the settings screen and in per-type summaries.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrinkType {
    Beer,
    Wine,
    Shot,
    Cocktail,
    LongDrink,
    BeerTower,
    VodkaPitcher,
    VodkaTower,
}

const ALL_DRINKS: [DrinkType; 8] = [
    DrinkType::Beer,
    DrinkType::Wine,
    DrinkType::Shot,
    DrinkType::Cocktail,
    DrinkType::LongDrink,
    DrinkType::BeerTower,
    DrinkType::VodkaPitcher,
    DrinkType::VodkaTower,
];

impl DrinkType {
    pub fn all() -> &'static [DrinkType] {
        &ALL_DRINKS
    }

    /// Persisted identifier, also used as the tile click payload.
    pub fn name(self) -> &'static str {
        match self {
            DrinkType::Beer => "BEER",
            DrinkType::Wine => "WINE",
            DrinkType::Shot => "SHOT",
            DrinkType::Cocktail => "COCKTAIL",
            DrinkType::LongDrink => "LONG_DRINK",
            DrinkType::BeerTower => "BEER_TOWER",
            DrinkType::VodkaPitcher => "VODKA_PITCHER",
            DrinkType::VodkaTower => "VODKA_TOWER",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DrinkType::Beer => "Beer",
            DrinkType::Wine => "Wine",
            DrinkType::Shot => "Shot",
            DrinkType::Cocktail => "Cocktail",
            DrinkType::LongDrink => "Long Drink",
            DrinkType::BeerTower => "Beer Tower",
            DrinkType::VodkaPitcher => "Vodka Pitcher",
            DrinkType::VodkaTower => "Vodka Tower",
        }
    }

    /// Inline glyph; the tile renders these as text, not bitmaps.
    pub fn emoji(self) -> &'static str {
        match self {
            DrinkType::Beer => "🍺",
            DrinkType::Wine => "🍷",
            DrinkType::Shot => "🥃",
            DrinkType::Cocktail => "🍸",
            DrinkType::LongDrink => "🍹",
            DrinkType::BeerTower => "🍺🗼",
            DrinkType::VodkaPitcher => "🍹🥤",
            DrinkType::VodkaTower => "🍸🗼",
        }
    }

    pub fn from_name(name: &str) -> Option<DrinkType> {
        ALL_DRINKS.iter().copied().find(|d| d.name() == name)
    }

    pub fn from_display_name(name: &str) -> Option<DrinkType> {
        ALL_DRINKS
            .iter()
            .copied()
            .find(|d| d.display_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for DrinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
