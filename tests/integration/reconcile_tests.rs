//! End-to-end reconciliation tests
//!
//! Each test builds a declared set, a resolved graph and usage facts for one
//! project variant, and checks the exact advice set produced.

use depadvice::{
    AccessKind, Advice, AnalysisError, Advisor, Dependency, DependencyGraph, Location,
    ProjectVariant, TransitiveDependency, UsageFacts,
};
use std::collections::BTreeSet;

fn app() -> ProjectVariant {
    ProjectVariant::new(":app", "main")
}

fn declared(id: &str, configuration: &str) -> Dependency {
    Dependency::new(id).with_configuration(configuration)
}

fn advise(
    declared: &[Dependency],
    edges: &[(&str, &str)],
    usages: Vec<Location>,
) -> BTreeSet<Advice> {
    let graph = DependencyGraph::from_edges(edges.iter().copied()).unwrap();
    Advisor::new()
        .advise(&app(), declared, &graph, &UsageFacts::from_locations(usages))
        .unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_legacy_compile_declarations() {
    let math = declared("org.apache.commons:commons-math3", "compile");
    let io = declared("commons-io:commons-io", "compile");
    let collections = declared("org.apache.commons:commons-collections4", "compile");

    let advice = advise(
        &[math.clone(), io.clone(), collections.clone()],
        &[
            (":app", "org.apache.commons:commons-math3"),
            (":app", "commons-io:commons-io"),
            (":app", "org.apache.commons:commons-collections4"),
        ],
        vec![
            Location::new("commons-io:commons-io", "org.apache.commons.io.IOUtils"),
            Location::new(
                "org.apache.commons:commons-collections4",
                "org.apache.commons.collections4.CollectionUtils",
            ),
        ],
    );

    let expected: BTreeSet<Advice> = [
        Advice::of_remove(&math).unwrap(),
        Advice::of_change(&io, "implementation").unwrap(),
        Advice::of_change(&collections, "implementation").unwrap(),
    ]
    .into();
    assert_eq!(advice, expected);
}

#[test]
fn test_used_transitive_of_unused_project() {
    let a = declared(":a", "implementation");
    let advice = advise(
        &[a.clone()],
        &[(":app", ":a"), (":a", "b:b")],
        vec![Location::new("b:b", "b.B")],
    );

    let expected_add = Advice::of_add(
        TransitiveDependency::new(Dependency::new("b:b"), [a.clone()].into()),
        "implementation",
    );
    let expected: BTreeSet<Advice> = [Advice::of_remove(&a).unwrap(), expected_add].into();
    assert_eq!(advice, expected);

    let add = advice.iter().find(|x| x.is_add()).unwrap();
    assert_eq!(add.parents(), &[a].into_iter().collect::<BTreeSet<_>>());
}

#[test]
fn test_unused_facade_kept_and_transitive_added() {
    let facade = declared("androidx.core:core-ktx", "implementation");
    let advice = advise(
        &[facade.clone()],
        &[(":app", "androidx.core:core-ktx"), ("androidx.core:core-ktx", "androidx.core:core")],
        vec![Location::new("androidx.core:core", "androidx.core.app.NotificationCompat")],
    );

    assert_eq!(advice.len(), 1);
    let add = advice.iter().next().unwrap();
    assert!(add.is_add());
    assert_eq!(add.identifier().as_str(), "androidx.core:core");
    assert!(add.parents().contains(&facade));
}

#[test]
fn test_used_facade_is_still_checked_for_tier() {
    let facade = declared("x:facade", "api");
    let advice = advise(
        &[facade.clone()],
        &[(":app", "x:facade"), ("x:facade", "x:core")],
        vec![Location::new("x:facade", "x.Facade"), Location::new("x:core", "x.Core")],
    );

    let kinds: Vec<bool> = advice.iter().map(|a| a.is_change()).collect();
    assert_eq!(kinds, vec![true, false]);
    assert_eq!(advice.iter().next().unwrap().to_configuration(), Some("implementation"));
}

#[test]
fn test_all_parents_attributed() {
    let a = declared("a:a", "implementation");
    let b = declared("b:b", "api");
    let advice = advise(
        &[a.clone(), b.clone()],
        &[(":app", "a:a"), (":app", "b:b"), ("a:a", "t:t"), ("b:b", "m:m"), ("m:m", "t:t")],
        vec![
            Location::new("a:a", "a.A"),
            Location::new("b:b", "b.B").exposed(),
            Location::new("t:t", "t.T"),
        ],
    );

    assert_eq!(advice.len(), 1);
    let add = advice.iter().next().unwrap();
    assert_eq!(add.parents(), &[a, b].into_iter().collect::<BTreeSet<_>>());
}

#[test]
fn test_transitive_declared_elsewhere_not_added() {
    let advice = advise(
        &[declared("a:a", "implementation"), declared("t:t", "implementation")],
        &[(":app", "a:a"), (":app", "t:t"), ("a:a", "t:t")],
        vec![Location::new("a:a", "a.A"), Location::new("t:t", "t.T")],
    );
    assert!(advice.is_empty());
}

// ============================================================================
// Tier targets
// ============================================================================

#[test]
fn test_annotation_only_usage_moves_to_compile_only() {
    let dep = declared("org.jetbrains:annotations", "implementation");
    let advice = advise(
        &[dep.clone()],
        &[(":app", "org.jetbrains:annotations")],
        vec![Location::new("org.jetbrains:annotations", "org.jetbrains.annotations.NotNull")
            .with_access(AccessKind::CompileOnlyAnnotation)],
    );

    let expected: BTreeSet<Advice> = [Advice::of_compile_only(&dep, "compileOnly").unwrap()].into();
    assert_eq!(advice, expected);
}

#[test]
fn test_runtime_transitive_added_only_when_parent_removed() {
    let usage = vec![Location::new("r:r", "r.Driver").with_access(AccessKind::Runtime)];

    // External parent with a used transitive is a facade and stays
    let kept = advise(
        &[declared("x:x", "implementation")],
        &[(":app", "x:x"), ("x:x", "r:r")],
        usage.clone(),
    );
    assert!(kept.is_empty());

    // Project parent is removed, so the runtime capability must be declared
    let parent = declared(":x", "implementation");
    let removed = advise(&[parent.clone()], &[(":app", ":x"), (":x", "r:r")], usage);
    let add = removed.iter().find(|a| a.is_add()).unwrap();
    assert_eq!(add.to_configuration(), Some("runtimeOnly"));
    assert!(removed.contains(&Advice::of_remove(&parent).unwrap()));
}

#[test]
fn test_runtime_transitive_not_added_while_another_parent_stays() {
    let unused = declared(":x", "implementation");
    let kept = declared("y:y", "implementation");
    let advice = advise(
        &[unused.clone(), kept],
        &[(":app", ":x"), (":app", "y:y"), (":x", "r:r"), ("y:y", "r:r")],
        vec![
            Location::new("y:y", "y.Y"),
            Location::new("r:r", "r.Driver").with_access(AccessKind::Runtime),
        ],
    );

    let expected: BTreeSet<Advice> = [Advice::of_remove(&unused).unwrap()].into();
    assert_eq!(advice, expected);
}

#[test]
fn test_runtime_transitive_added_when_every_parent_removed() {
    let x = declared(":x", "implementation");
    let z = declared(":z", "api");
    let advice = advise(
        &[x.clone(), z.clone()],
        &[(":app", ":x"), (":app", ":z"), (":x", "r:r"), (":z", "r:r")],
        vec![Location::new("r:r", "r.Driver").with_access(AccessKind::Runtime)],
    );

    let add = advice.iter().find(|a| a.is_add()).unwrap();
    assert_eq!(add.to_configuration(), Some("runtimeOnly"));
    assert_eq!(add.parents(), &[x, z].into_iter().collect::<BTreeSet<_>>());
}

#[test]
fn test_processor_declaration_unused_is_removed() {
    let processor = declared("com.google.dagger:dagger-compiler", "kapt");
    let advice = advise(
        &[processor.clone()],
        &[(":app", "com.google.dagger:dagger-compiler")],
        vec![],
    );

    let item = advice.iter().next().unwrap();
    assert!(item.is_processor());
}

// ============================================================================
// Failure semantics
// ============================================================================

#[test]
fn test_no_usage_facts_at_all_is_not_an_error() {
    let advice = advise(
        &[declared("a:a", "api"), declared("b:b", "implementation")],
        &[(":app", "a:a"), (":app", "b:b")],
        vec![],
    );
    assert_eq!(advice.len(), 2);
    assert!(advice.iter().all(Advice::is_remove));
}

#[test]
fn test_declared_dependency_missing_from_graph() {
    let graph = DependencyGraph::from_edges([(":app", "a:a")]).unwrap();
    let declared = [declared("a:a", "api"), declared("ghost:ghost", "implementation")];

    let err = Advisor::new()
        .advise(&app(), &declared, &graph, &UsageFacts::new())
        .unwrap_err();
    assert_eq!(err.code(), "malformed-graph");
    assert!(matches!(
        err,
        AnalysisError::MalformedGraph { identifier, .. } if identifier == "ghost:ghost"
    ));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_declaration_order_does_not_matter() {
    let deps = vec![
        declared(":a", "implementation"),
        declared("b:b", "api"),
        declared("c:c", "compile"),
    ];
    let edges = [(":app", ":a"), (":app", "b:b"), (":app", "c:c"), (":a", "t:t"), ("c:c", "t:t")];
    let usages = vec![Location::new("c:c", "c.C"), Location::new("t:t", "t.T")];

    let forward = advise(&deps, &edges, usages.clone());
    let mut reversed_deps = deps.clone();
    reversed_deps.reverse();
    let reversed = advise(&reversed_deps, &edges, usages);

    assert_eq!(forward, reversed);
    let forward_parents: Vec<_> = forward.iter().map(|a| a.parents().clone()).collect();
    let reversed_parents: Vec<_> = reversed.iter().map(|a| a.parents().clone()).collect();
    assert_eq!(forward_parents, reversed_parents);
}
