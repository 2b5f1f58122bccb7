//! Property-based tests for library ordering.
//!
//! These tests use proptest to generate random acyclic library sets (each
//! instance only consumes classes of lower-numbered instances, declared in a
//! shuffled order) and verify that the ordering invariants hold for all of
//! them.

#[cfg(test)]
mod proptest_tests {
    use std::collections::HashMap;

    use crate::error::Error;
    use crate::identity::{InstanceId, ResolutionContext};
    use crate::instance::LibraryInstance;
    use crate::phases::{resolve, ResolveOptions};
    use proptest::prelude::*;

    fn class(i: usize) -> String {
        format!("C{i}")
    }

    fn name(i: usize) -> String {
        format!("L{i}")
    }

    /// Random acyclic instance sets in shuffled declaration order.
    fn acyclic_instances() -> impl Strategy<Value = Vec<LibraryInstance>> {
        (1usize..12)
            .prop_flat_map(|n| {
                let deps = proptest::collection::vec(proptest::collection::vec(any::<bool>(), n), n);
                let order = Just((0..n).collect::<Vec<_>>()).prop_shuffle();
                (deps, order)
            })
            .prop_map(|(deps, order)| {
                order
                    .iter()
                    .map(|&i| {
                        let consumes: Vec<String> =
                            (0..i).filter(|&j| deps[i][j]).map(class).collect();
                        LibraryInstance::new(InstanceId::named(name(i)))
                            .producing([class(i)])
                            .consuming(consumes)
                    })
                    .collect()
            })
    }

    fn positions(order: &[InstanceId]) -> HashMap<&str, usize> {
        order
            .iter()
            .enumerate()
            .map(|(pos, id)| (id.name.as_str(), pos))
            .collect()
    }

    fn ctx() -> ResolutionContext {
        ResolutionContext::new("Prop", "X64")
    }

    proptest! {
        /// Property: producers precede their consumers in destructor order
        #[test]
        fn producers_precede_consumers(instances in acyclic_instances()) {
            let resolution = resolve(&ctx(), &instances, &ResolveOptions::default()).unwrap();
            let pos = positions(&resolution.destructor_order);

            for instance in &instances {
                for consumed in &instance.consumes {
                    let producer = format!("L{}", &consumed[1..]);
                    prop_assert!(
                        pos[producer.as_str()] < pos[instance.id.name.as_str()],
                        "{} must come before {}",
                        producer,
                        instance.id.name
                    );
                }
            }
        }

        /// Property: every instance is placed exactly once
        #[test]
        fn order_is_a_permutation(instances in acyclic_instances()) {
            let resolution = resolve(&ctx(), &instances, &ResolveOptions::default()).unwrap();
            prop_assert_eq!(resolution.len(), instances.len());
            prop_assert_eq!(positions(&resolution.destructor_order).len(), instances.len());
        }

        /// Property: constructor order is exactly the reverse of destructor order
        #[test]
        fn constructor_order_is_reverse(instances in acyclic_instances()) {
            let resolution = resolve(&ctx(), &instances, &ResolveOptions::lenient()).unwrap();
            let mut reversed = resolution.destructor_order.clone();
            reversed.reverse();
            prop_assert_eq!(resolution.constructor_order, reversed);
        }

        /// Property: the reversal also holds when lenient mode drops cycle edges
        #[test]
        fn constructor_order_is_reverse_with_cycles(
            instances in acyclic_instances(),
            back_edges in proptest::collection::vec((0usize..12, 0usize..12), 1..6),
        ) {
            let n = instances.len();
            let mut instances = instances;
            for (from, to) in back_edges {
                // Lower-numbered instances consuming higher-numbered classes may close loops
                let (from, to) = (from.min(to), from.max(to));
                if to >= n {
                    continue;
                }
                for instance in instances.iter_mut() {
                    if instance.id.name == name(from) {
                        instance.consumes.push(class(to));
                    }
                }
            }

            let resolution = resolve(&ctx(), &instances, &ResolveOptions::lenient()).unwrap();
            prop_assert_eq!(resolution.len(), n);
            let mut reversed = resolution.destructor_order.clone();
            reversed.reverse();
            prop_assert_eq!(resolution.constructor_order, reversed);
        }

        /// Property: resolving the same input twice yields the same result
        #[test]
        fn resolution_is_deterministic(instances in acyclic_instances()) {
            let first = resolve(&ctx(), &instances, &ResolveOptions::default()).unwrap();
            let second = resolve(&ctx(), &instances, &ResolveOptions::default()).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: closing a loop between the first and last instance is fatal
        #[test]
        fn closing_a_loop_is_fatal(instances in acyclic_instances()) {
            prop_assume!(instances.len() >= 2);
            let last = instances.len() - 1;
            let mut instances = instances;
            for instance in instances.iter_mut() {
                if instance.id.name == name(0) {
                    instance.consumes.push(class(last));
                }
                if instance.id.name == name(last) {
                    instance.consumes.push(class(0));
                }
            }

            let result = resolve(&ctx(), &instances, &ResolveOptions::default());
            prop_assert!(
                matches!(result, Err(Error::CircularDependency { .. })),
                "expected a cycle error, got {:?}",
                result
            );

            let lenient = resolve(&ctx(), &instances, &ResolveOptions::lenient()).unwrap();
            prop_assert!(!lenient.dropped_cycles.is_empty());
            prop_assert_eq!(lenient.len(), instances.len());
            let mut reversed = lenient.destructor_order.clone();
            reversed.reverse();
            prop_assert_eq!(lenient.constructor_order, reversed);
        }
    }
}
