//! Rules for the ordered set of quick-access drinks.
//!
//! Everything here is pure list manipulation. The store in `crate::active_drinks` and the
//! settings view-model both build on these helpers, so the 1..=5 / no-duplicate rules live in
//! exactly one place.

use tracing::warn;

use crate::{error::ActiveListError, structs::drink_type::DrinkType};

pub const MIN_ACTIVE_DRINKS: usize = 1;
pub const MAX_ACTIVE_DRINKS: usize = 5;

pub const DEFAULT_ACTIVE_DRINKS: [DrinkType; 5] = [
    DrinkType::Beer,
    DrinkType::Wine,
    DrinkType::Shot,
    DrinkType::Cocktail,
    DrinkType::LongDrink,
];

pub fn default_active_drinks() -> Vec<DrinkType> {
    DEFAULT_ACTIVE_DRINKS.to_vec()
}

pub fn validate(drinks: &[DrinkType]) -> Result<(), ActiveListError> {
    if drinks.len() < MIN_ACTIVE_DRINKS {
        return Err(ActiveListError::Empty);
    }
    if drinks.len() > MAX_ACTIVE_DRINKS {
        return Err(ActiveListError::TooMany { len: drinks.len() });
    }
    for (i, drink) in drinks.iter().enumerate() {
        if drinks[..i].contains(drink) {
            return Err(ActiveListError::Duplicate(*drink));
        }
    }
    Ok(())
}

/// `drinks` with `drink` appended, or `None` if it is already there or the list is full.
pub fn with_added(drinks: &[DrinkType], drink: DrinkType) -> Option<Vec<DrinkType>> {
    if drinks.contains(&drink) || drinks.len() >= MAX_ACTIVE_DRINKS {
        return None;
    }
    let mut next = drinks.to_vec();
    next.push(drink);
    Some(next)
}

/// `drinks` without `drink`, or `None` if it is absent or is the last one left.
pub fn without(drinks: &[DrinkType], drink: DrinkType) -> Option<Vec<DrinkType>> {
    if !drinks.contains(&drink) || drinks.len() <= MIN_ACTIVE_DRINKS {
        return None;
    }
    Some(drinks.iter().copied().filter(|d| *d != drink).collect())
}

/// Removes the element at `from` and reinserts it at `to`; elements in between shift by one.
pub fn moved(drinks: &[DrinkType], from: usize, to: usize) -> Option<Vec<DrinkType>> {
    if from >= drinks.len() || to >= drinks.len() {
        return None;
    }
    let mut next = drinks.to_vec();
    let drink = next.remove(from);
    next.insert(to, drink);
    Some(next)
}

pub fn moved_drink(drinks: &[DrinkType], drink: DrinkType, to: usize) -> Option<Vec<DrinkType>> {
    let from = drinks.iter().position(|d| *d == drink)?;
    moved(drinks, from, to)
}

pub fn encode(drinks: &[DrinkType]) -> Result<String, serde_json::Error> {
    let names: Vec<&str> = drinks.iter().map(|d| d.name()).collect();
    serde_json::to_string(&names)
}

/// Decodes a stored list, falling back to the defaults on anything unusable.
///
/// Unknown names (drinks dropped from the catalog) are skipped. Repeats keep their first
/// position and the result is capped at five entries.
pub fn decode(raw: Option<&str>) -> Vec<DrinkType> {
    let Some(raw) = raw else {
        return default_active_drinks();
    };

    let names: Vec<String> = match serde_json::from_str(raw) {
        Ok(names) => names,
        Err(e) => {
            warn!("Unable to decode active drinks, using defaults: {e}");
            return default_active_drinks();
        }
    };

    let mut drinks = Vec::with_capacity(MAX_ACTIVE_DRINKS);
    for drink in names.iter().filter_map(|n| DrinkType::from_name(n)) {
        if !drinks.contains(&drink) && drinks.len() < MAX_ACTIVE_DRINKS {
            drinks.push(drink);
        }
    }

    if drinks.is_empty() {
        return default_active_drinks();
    }
    drinks
}

#[cfg(test)]
mod tests {
    use super::*;
    use DrinkType::*;

    #[test]
    fn test_validate() {
        assert_eq!(validate(&[]), Err(ActiveListError::Empty));
        assert_eq!(
            validate(&[Beer, Wine, Shot, Cocktail, LongDrink, BeerTower]),
            Err(ActiveListError::TooMany { len: 6 })
        );
        assert_eq!(
            validate(&[Beer, Beer]),
            Err(ActiveListError::Duplicate(Beer))
        );
        assert_eq!(validate(&[VodkaTower]), Ok(()));
        assert_eq!(validate(&DEFAULT_ACTIVE_DRINKS), Ok(()));
    }

    #[test]
    fn test_with_added() {
        assert_eq!(with_added(&[Beer], Wine), Some(vec![Beer, Wine]));
        assert_eq!(with_added(&[Beer, Wine], Beer), None);
        assert_eq!(with_added(&DEFAULT_ACTIVE_DRINKS, VodkaTower), None);
    }

    #[test]
    fn test_without() {
        assert_eq!(without(&[Beer, Wine, Shot], Wine), Some(vec![Beer, Shot]));
        assert_eq!(without(&[Beer], Beer), None);
        assert_eq!(without(&[Beer, Wine], Shot), None);
    }

    #[test]
    fn test_move_shifts_elements_between() {
        let list = [Beer, Wine, Shot, Cocktail, LongDrink];
        assert_eq!(
            moved(&list, 0, 3),
            Some(vec![Wine, Shot, Cocktail, Beer, LongDrink])
        );
        assert_eq!(
            moved(&list, 4, 1),
            Some(vec![Beer, LongDrink, Wine, Shot, Cocktail])
        );
        assert_eq!(moved(&list, 2, 2), Some(list.to_vec()));
        assert_eq!(moved(&list, 0, 5), None);
        assert_eq!(moved(&list, 5, 0), None);
    }

    #[test]
    fn test_moved_drink() {
        assert_eq!(
            moved_drink(&[Beer, Wine, Shot], Shot, 0),
            Some(vec![Shot, Beer, Wine])
        );
        assert_eq!(moved_drink(&[Beer, Wine, Shot], VodkaPitcher, 0), None);
    }

    #[test]
    fn test_encode_keeps_order() {
        let raw = encode(&[Wine, Shot, Beer]).unwrap();
        assert_eq!(raw, r#"["WINE","SHOT","BEER"]"#);
        assert_eq!(decode(Some(&raw)), vec![Wine, Shot, Beer]);
    }

    #[test]
    fn test_decode_falls_back_to_defaults() {
        assert_eq!(decode(None), default_active_drinks());
        assert_eq!(decode(Some("not json")), default_active_drinks());
        assert_eq!(decode(Some("[]")), default_active_drinks());
        assert_eq!(decode(Some(r#"["WATER"]"#)), default_active_drinks());
    }

    #[test]
    fn test_decode_is_lenient() {
        assert_eq!(
            decode(Some(r#"["WATER","SHOT","SHOT","BEER"]"#)),
            vec![Shot, Beer]
        );
        let crowded = r#"["BEER","WINE","SHOT","COCKTAIL","LONG_DRINK","BEER_TOWER"]"#;
        assert_eq!(decode(Some(crowded)), DEFAULT_ACTIVE_DRINKS.to_vec());
    }
}
