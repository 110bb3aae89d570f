//! Property tests for ordering consistency, graph reachability and
//! reconciliation idempotence.

use depadvice::{
    AccessKind, Advice, Advisor, Dependency, DependencyGraph, DependencyId, Location,
    ProjectVariant, TransitiveDependency, UsageFacts,
};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

const IDS: [&str; 6] = [":core", ":ui", "a:a", "b:b", "c:c", "d:d"];
const CONFIGURATIONS: [&str; 5] =
    ["api", "implementation", "compile", "testImplementation", "kapt"];

fn arb_id() -> impl Strategy<Value = String> {
    prop::sample::select(IDS.to_vec()).prop_map(str::to_string)
}

fn arb_configuration() -> impl Strategy<Value = String> {
    prop::sample::select(CONFIGURATIONS.to_vec()).prop_map(str::to_string)
}

fn arb_advice() -> impl Strategy<Value = Advice> {
    (
        0u8..5,
        arb_id(),
        arb_configuration(),
        arb_configuration(),
        prop::collection::btree_set(arb_id(), 0..3),
        prop::option::of("[0-9]\\.[0-9]"),
    )
        .prop_filter_map("from and to must differ", |(kind, id, from, to, parents, version)| {
            let mut dep = Dependency::new(id.as_str()).with_configuration(from);
            if let Some(version) = version {
                dep = dep.with_version(version);
            }
            let parents: BTreeSet<Dependency> =
                parents.iter().map(|p| Dependency::new(p.as_str())).collect();
            match kind {
                0 => Advice::of_remove(&dep).ok(),
                1 => Advice::of_change(&dep, to).ok(),
                2 => Some(Advice::of_add(TransitiveDependency::new(dep, parents), to)),
                3 => Advice::of_compile_only(&dep, to).ok(),
                _ => Advice::of_runtime_only(&dep, to).ok(),
            }
        })
}

fn hash_of(advice: &Advice) -> u64 {
    let mut hasher = DefaultHasher::new();
    advice.hash(&mut hasher);
    hasher.finish()
}

fn closure(edges: &[(usize, usize)], root: usize) -> BTreeSet<usize> {
    let mut adjacency: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (from, to) in edges {
        adjacency.entry(*from).or_default().push(*to);
    }
    let mut seen = BTreeSet::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        for next in adjacency.get(&node).into_iter().flatten() {
            if seen.insert(*next) {
                stack.push(*next);
            }
        }
    }
    seen.remove(&root);
    seen
}

fn node(i: usize) -> DependencyId {
    DependencyId::new(format!("n{}", i))
}

proptest! {
    #[test]
    fn compare_and_equals_agree(a in arb_advice(), b in arb_advice()) {
        prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
        if a == b {
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    #[test]
    fn sorted_set_size_matches_distinct_keys(list in prop::collection::vec(arb_advice(), 0..20)) {
        let set: BTreeSet<Advice> = list.iter().cloned().collect();
        let keys: BTreeSet<_> = list.iter().map(|a| {
            let (kind, id, from, to) = a.key();
            (kind, id.clone(), from.map(str::to_string), to.map(str::to_string))
        }).collect();
        prop_assert_eq!(set.len(), keys.len());
    }

    #[test]
    fn reachability_matches_transitive_closure(
        edges in prop::collection::vec((0usize..8, 0usize..8), 0..24)
    ) {
        let edges: Vec<(usize, usize)> = edges.into_iter().filter(|(a, b)| a != b).collect();
        let graph =
            DependencyGraph::from_edges(edges.iter().map(|(a, b)| (node(*a), node(*b)))).unwrap();

        for root in 0..8 {
            let expected: BTreeSet<DependencyId> =
                closure(&edges, root).into_iter().map(node).collect();
            prop_assert_eq!(graph.reachable_from(&node(root)), expected);
        }

        let mut again = graph.clone();
        for (a, b) in &edges {
            again.add_edge(node(*a), node(*b)).unwrap();
        }
        prop_assert_eq!(again.nodes(), graph.nodes());
        prop_assert_eq!(again.edges(), graph.edges());
    }

    #[test]
    fn shortest_path_is_a_real_path(
        edges in prop::collection::vec((0usize..6, 0usize..6), 0..16),
        source in 0usize..6,
        target in 0usize..6,
    ) {
        let edges: Vec<(usize, usize)> = edges.into_iter().filter(|(a, b)| a != b).collect();
        let graph =
            DependencyGraph::from_edges(edges.iter().map(|(a, b)| (node(*a), node(*b)))).unwrap();
        let path = graph.shortest_path(&node(source), &node(target));

        if source != target && graph.contains(&node(source)) && graph.contains(&node(target)) {
            let reachable = graph.reachable_from(&node(source)).contains(&node(target));
            prop_assert_eq!(!path.is_empty(), reachable);
        }
        if let (Some(first), Some(last)) = (path.first(), path.last()) {
            prop_assert_eq!(first, &node(source));
            prop_assert_eq!(last, &node(target));
            let edge_set = graph.edges();
            for hop in path.windows(2) {
                prop_assert!(edge_set.contains(&(hop[0].clone(), hop[1].clone())));
            }
        }
    }

    #[test]
    fn reconciliation_is_idempotent(
        declared_mask in prop::collection::vec(any::<bool>(), 5),
        extra_edges in prop::collection::vec((0usize..5, 0usize..5), 0..8),
        usage in prop::collection::vec((0usize..5, 0u8..4, any::<bool>()), 0..10),
    ) {
        let libs: Vec<String> = (0..5).map(|i| format!("lib:l{}", i)).collect();
        let project = ProjectVariant::new(":app", "main");

        let declared: Vec<Dependency> = libs.iter().zip(&declared_mask)
            .filter(|(_, d)| **d)
            .map(|(id, _)| Dependency::new(id.as_str()).with_configuration("implementation"))
            .collect();

        let mut graph = DependencyGraph::new();
        for dep in &declared {
            graph.add_edge(":app", dep.identifier.clone()).unwrap();
        }
        for (a, b) in extra_edges.iter().filter(|(a, b)| a != b) {
            graph.add_edge(libs[*a].as_str(), libs[*b].as_str()).unwrap();
        }
        for lib in &libs {
            graph.add_node(lib.as_str());
        }

        let locations = usage.iter().map(|(owner, access, exposed)| {
            let access = match *access {
                0 => AccessKind::Compile,
                1 => AccessKind::CompileOnlyAnnotation,
                2 => AccessKind::Runtime,
                _ => AccessKind::AnnotationProcessor,
            };
            let location = Location::new(libs[*owner].as_str(), "C").with_access(access);
            if *exposed { location.exposed() } else { location }
        });
        let usages = UsageFacts::from_locations(locations);

        let advisor = Advisor::new();
        let first = advisor.advise(&project, &declared, &graph, &usages).unwrap();
        let second = advisor.advise(&project, &declared, &graph, &usages).unwrap();
        prop_assert_eq!(&first, &second);

        let mut reversed = declared.clone();
        reversed.reverse();
        let third = advisor.advise(&project, &reversed, &graph, &usages).unwrap();
        prop_assert_eq!(&first, &third);
    }
}
