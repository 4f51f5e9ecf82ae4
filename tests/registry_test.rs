//! Tests for ListRegistry selection bookkeeping

use rstest::rstest;

use restlist::domain::{DomainError, ListRegistry, Restaurant, RestaurantList};

fn registry(names: &[&str]) -> ListRegistry {
    ListRegistry::with_lists(
        names
            .iter()
            .map(|n| RestaurantList::new(*n).expect("valid list"))
            .collect(),
    )
}

#[rstest]
#[case(0, "La1")]
#[case(1, "La2")]
#[case(2, "La3")]
fn given_valid_index_when_selecting_then_selected_list_matches(
    #[case] index: usize,
    #[case] expected: &str,
) {
    let mut reg = registry(&["La1", "La2", "La3"]);

    reg.select(Some(index)).unwrap();

    assert_eq!(reg.selected_index(), Some(index));
    assert_eq!(reg.selected_list().unwrap().name(), expected);
}

#[test]
fn given_out_of_range_index_when_selecting_then_error_and_selection_kept() {
    let mut reg = registry(&["La1", "La2"]);
    reg.select(Some(1)).unwrap();

    let err = reg.select(Some(2)).unwrap_err();

    assert_eq!(err, DomainError::IndexOutOfRange { index: 2, len: 2 });
    assert_eq!(reg.selected_index(), Some(1));
}

#[test]
fn given_selection_when_selecting_none_then_cleared() {
    let mut reg = registry(&["La1"]);
    reg.select(Some(0)).unwrap();

    reg.select(None).unwrap();

    assert_eq!(reg.selected_index(), None);
    assert!(reg.selected_list().is_none());
}

#[test]
fn given_selected_list_when_removing_it_then_selection_none() {
    let mut reg = registry(&["La1", "La2", "La3"]);
    reg.select(Some(1)).unwrap();

    let removed = reg.remove_at(1).unwrap();

    assert_eq!(removed.name(), "La2");
    assert_eq!(reg.selected_index(), None);
    assert_eq!(reg.len(), 2);
}

#[test]
fn given_earlier_list_when_removing_then_selection_shifts_to_same_list() {
    // Arrange
    let mut reg = registry(&["La1", "La2", "La3"]);
    reg.select(Some(2)).unwrap();
    let before = reg.selected_list().unwrap().clone();

    // Act
    reg.remove_at(0).unwrap();

    // Assert
    assert_eq!(reg.selected_index(), Some(1));
    assert_eq!(reg.selected_list().unwrap(), &before);
}

#[test]
fn given_out_of_range_index_when_removing_then_error_and_unchanged() {
    let mut reg = registry(&["La1"]);
    reg.select(Some(0)).unwrap();
    let before = reg.clone();

    let err = reg.remove_at(1).unwrap_err();

    assert_eq!(err, DomainError::IndexOutOfRange { index: 1, len: 1 });
    assert_eq!(reg, before);
}

#[test]
fn given_selection_when_adding_list_then_appended_and_selection_unchanged() {
    let mut reg = registry(&["La1"]);
    reg.select(Some(0)).unwrap();

    let index = reg.add_list(RestaurantList::new("Brunch").unwrap());

    assert_eq!(index, 1);
    assert_eq!(reg.lists()[1].name(), "Brunch");
    assert_eq!(reg.selected_index(), Some(0));
}

#[test]
fn given_registry_when_adding_restaurant_by_index_then_duplicate_reported() {
    let mut reg = registry(&["La1", "La2"]);

    let first = reg
        .add_restaurant(1, Restaurant::named("Cactus").unwrap())
        .unwrap();
    let again = reg
        .add_restaurant(1, Restaurant::named("Cactus").unwrap())
        .unwrap();

    assert!(first);
    assert!(!again);
    assert_eq!(reg.get(1).unwrap().len(), 1);
    assert!(reg.get(0).unwrap().is_empty());
}

#[test]
fn given_empty_registry_when_querying_then_nothing_selected() {
    let reg = ListRegistry::new();
    assert!(reg.is_empty());
    assert_eq!(reg.selected_index(), None);
    assert!(matches!(
        reg.get(0),
        Err(DomainError::IndexOutOfRange { index: 0, len: 0 })
    ));
}
