//! Domain entities: restaurants and restaurant lists

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::domain::error::{DomainError, DomainResult};

/// Numeric rating attached to a restaurant.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rating(f64);

impl Rating {
    /// Create a rating, rejecting NaN and infinities.
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation(
                "rating",
                format!("{value} is not a finite number"),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Parse user input such as `"4.5"`.
impl FromStr for Rating {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed.parse::<f64>().map_err(|_| {
            DomainError::validation("rating", format!("'{trimmed}' is not a number"))
        })?;
        Self::new(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named restaurant record.
///
/// Identity is the name: two restaurants are equal iff their names match
/// exactly (case-sensitive). The rating does not take part in equality.
#[derive(Debug, Clone)]
pub struct Restaurant {
    name: String,
    rating: Option<Rating>,
}

impl Restaurant {
    /// Create a restaurant. Fails if the name is empty.
    ///
    /// The name is stored verbatim; no trimming or case folding.
    pub fn new(name: impl Into<String>, rating: Option<Rating>) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::validation(
                "restaurant name",
                "name must not be empty",
            ));
        }
        Ok(Self { name, rating })
    }

    /// Create an unrated restaurant.
    pub fn named(name: impl Into<String>) -> DomainResult<Self> {
        Self::new(name, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }
}

impl PartialEq for Restaurant {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Restaurant {}

impl Hash for Restaurant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Restaurant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rating {
            Some(rating) => write!(f, "{} ({})", self.name, rating),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Named, ordered collection of restaurants without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantList {
    name: String,
    restaurants: Vec<Restaurant>,
}

impl RestaurantList {
    /// Create an empty list. Fails if the name is empty.
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::validation("list name", "name must not be empty"));
        }
        Ok(Self {
            name,
            restaurants: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append `restaurant` unless an equal one is already present.
    ///
    /// Returns `false` (and leaves the list untouched) for a duplicate.
    pub fn add(&mut self, restaurant: Restaurant) -> bool {
        if self.contains(&restaurant) {
            return false;
        }
        self.restaurants.push(restaurant);
        true
    }

    /// Append each restaurant in order, skipping duplicates.
    ///
    /// Returns the number of restaurants actually appended.
    pub fn add_all<I>(&mut self, restaurants: I) -> usize
    where
        I: IntoIterator<Item = Restaurant>,
    {
        restaurants
            .into_iter()
            .map(|r| self.add(r))
            .filter(|added| *added)
            .count()
    }

    pub fn get(&self, index: usize) -> DomainResult<&Restaurant> {
        self.restaurants
            .get(index)
            .ok_or(DomainError::IndexOutOfRange {
                index,
                len: self.restaurants.len(),
            })
    }

    pub fn contains(&self, restaurant: &Restaurant) -> bool {
        self.restaurants.contains(restaurant)
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Restaurant> {
        self.restaurants.iter()
    }
}

impl<'a> IntoIterator for &'a RestaurantList {
    type Item = &'a Restaurant;
    type IntoIter = std::slice::Iter<'a, Restaurant>;

    fn into_iter(self) -> Self::IntoIter {
        self.restaurants.iter()
    }
}

impl fmt::Display for RestaurantList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_same_name_different_rating_when_comparing_then_equal() {
        let a = Restaurant::new("Cactus", Some(Rating::new(4.0).unwrap())).unwrap();
        let b = Restaurant::named("Cactus").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn given_names_differing_in_case_when_comparing_then_not_equal() {
        let a = Restaurant::named("cactus").unwrap();
        let b = Restaurant::named("Cactus").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn given_rating_when_displaying_restaurant_then_shows_rating() {
        let r = Restaurant::new("Starbucks", Some(Rating::new(3.5).unwrap())).unwrap();
        assert_eq!(r.to_string(), "Starbucks (3.5)");
        assert_eq!(Restaurant::named("Starbucks").unwrap().to_string(), "Starbucks");
    }

    #[test]
    fn given_input_with_duplicates_when_add_all_then_counts_only_appended() {
        let mut list = RestaurantList::new("La1").unwrap();
        let added = list.add_all(
            ["A", "B", "A", "C"]
                .into_iter()
                .map(|n| Restaurant::named(n).unwrap()),
        );
        assert_eq!(added, 3);
        let names: Vec<&str> = list.iter().map(Restaurant::name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
