//! Property-based tests for the favorites store

use super::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add { id: String, title: String },
    Rate { id: String, rating: u8 },
}

fn arb_id() -> impl Strategy<Value = String> {
    // Small id space so adds and rates collide often
    "5277[0-5]".prop_map(String::from)
}

fn arb_title() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,6}( [a-z]{1,5})?".prop_map(String::from)
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (arb_id(), arb_title()).prop_map(|(id, title)| Op::Add { id, title }),
        (arb_id(), 1u8..=5).prop_map(|(id, rating)| Op::Rate { id, rating }),
    ]
}

fn apply(store: &InMemoryFavorites, user: UserId, op: &Op) {
    match op {
        Op::Add { id, title } => {
            store.add(user, &RecipeSummary::new(id.clone(), title.clone(), "", ""));
        }
        Op::Rate { id, rating } => {
            store.rate(user, id, Rating::new(*rating).unwrap());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Listing order holds for any history of adds and rates
    #[test]
    fn prop_list_is_sorted(ops in proptest::collection::vec(arb_op(), 0..40)) {
        let store = InMemoryFavorites::new();
        for op in &ops {
            apply(&store, 1, op);
        }

        let list = store.list(1);
        for pair in list.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.rating > b.rating || (a.rating == b.rating && a.title <= b.title),
                "out of order: {:?} before {:?}", a, b
            );
        }
    }

    // At most one entry per recipe id
    #[test]
    fn prop_no_duplicate_ids(ops in proptest::collection::vec(arb_op(), 0..40)) {
        let store = InMemoryFavorites::new();
        for op in &ops {
            apply(&store, 1, op);
        }

        let mut ids: Vec<String> = store.list(1).into_iter().map(|e| e.recipe_id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }

    // Second add of the same recipe reports AlreadyPresent and changes nothing
    #[test]
    fn prop_add_twice(
        prefix in proptest::collection::vec(arb_op(), 0..20),
        id in arb_id(),
        title in arb_title(),
    ) {
        let store = InMemoryFavorites::new();
        for op in &prefix {
            apply(&store, 1, op);
        }

        let recipe = RecipeSummary::new(id.clone(), title, "", "");
        store.add(1, &recipe);
        let before = store.list(1);
        prop_assert_eq!(store.add(1, &recipe), AddOutcome::AlreadyPresent);
        prop_assert_eq!(store.list(1), before);
        prop_assert_eq!(store.list(1).iter().filter(|e| e.recipe_id == id).count(), 1);
    }

    // Rating a recipe that was never added is rejected without mutation
    #[test]
    fn prop_rate_unfavorited(
        ops in proptest::collection::vec(arb_op(), 0..20),
        rating in 1u8..=5,
    ) {
        let store = InMemoryFavorites::new();
        for op in &ops {
            apply(&store, 1, op);
        }

        let before = store.list(1);
        let outcome = store.rate(1, "never-added", Rating::new(rating).unwrap());
        prop_assert_eq!(outcome, RateOutcome::NotFavorited);
        prop_assert_eq!(store.list(1), before);
    }

    // add then rate leaves exactly one entry carrying that rating
    #[test]
    fn prop_add_then_rate(
        prefix in proptest::collection::vec(arb_op(), 0..20),
        id in arb_id(),
        title in arb_title(),
        rating in 1u8..=5,
    ) {
        let store = InMemoryFavorites::new();
        for op in &prefix {
            apply(&store, 1, op);
        }

        store.add(1, &RecipeSummary::new(id.clone(), title, "", ""));
        prop_assert_eq!(store.rate(1, &id, Rating::new(rating).unwrap()), RateOutcome::Rated);

        let matching: Vec<FavoriteEntry> = store
            .list(1)
            .into_iter()
            .filter(|e| e.recipe_id == id)
            .collect();
        prop_assert_eq!(matching.len(), 1);
        prop_assert_eq!(matching[0].rating, rating);
    }
}
