//! Property tests for retrieval ordering.
//!
//! Each case registers hooks that report `(order, registration index)` when
//! called, retrieves them, and checks the dispatch sequence against a stable
//! sort of what was registered.

use std::sync::Arc;

use hookline_hooks::HookRegistry;
use proptest::prelude::*;

type Probe = Arc<dyn Fn() -> (i32, usize) + Send + Sync>;

fn register_probes(registry: &HookRegistry, identifier: &str, orders: &[i32]) {
    for (index, &order) in orders.iter().enumerate() {
        registry.register(identifier, order, move || (order, index));
    }
}

fn dispatch(registry: &HookRegistry, identifiers: &[&str]) -> Vec<(i32, usize)> {
    registry
        .get::<Probe>(identifiers)
        .iter()
        .map(|probe| probe())
        .collect()
}

fn stable_sorted(orders: &[i32]) -> Vec<(i32, usize)> {
    let mut expected: Vec<(i32, usize)> = orders.iter().copied().zip(0..).collect();
    expected.sort_by_key(|&(order, _)| order);
    expected
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Dispatch follows ascending order; ties keep registration order.
    #[test]
    fn prop_dispatch_is_stable_sort_by_order(orders in prop::collection::vec(-5..5i32, 1..40)) {
        let registry = HookRegistry::new();
        register_probes(&registry, "probe", &orders);

        prop_assert_eq!(dispatch(&registry, &["probe"]), stable_sorted(&orders));
    }

    /// Retrieval is repeatable: reading never disturbs what later reads see.
    #[test]
    fn prop_retrieval_is_repeatable(orders in prop::collection::vec(any::<i32>(), 1..20)) {
        let registry = HookRegistry::new();
        register_probes(&registry, "probe", &orders);

        let first = dispatch(&registry, &["probe"]);
        let second = dispatch(&registry, &["probe"]);
        prop_assert_eq!(first, second);
    }

    /// Multi-identifier retrieval concatenates per-identifier sorted runs,
    /// or is empty when one identifier has nothing registered.
    #[test]
    fn prop_identifiers_concatenate_or_void(
        a in prop::collection::vec(-3..3i32, 0..10),
        b in prop::collection::vec(-3..3i32, 0..10),
    ) {
        let registry = HookRegistry::new();
        register_probes(&registry, "a", &a);
        register_probes(&registry, "b", &b);

        let got = dispatch(&registry, &["a", "b"]);
        if a.is_empty() || b.is_empty() {
            prop_assert!(got.is_empty());
        } else {
            let mut expected = stable_sorted(&a);
            expected.extend(stable_sorted(&b));
            prop_assert_eq!(got, expected);
        }
    }
}
