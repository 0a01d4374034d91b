//! Property-based tests for the path queries using proptest.
//!
//! Graphs are drawn over five services with small latencies so that the
//! exhaustive searches stay cheap even on dense cyclic graphs. A second
//! strategy draws latencies so large that any two of them overflow.

use proptest::prelude::*;

use protocol::{Connection, Latency, Microservice, Trace, TraceError};
use store::{
    all_paths_up_to_hops, all_paths_with_exact_hops, all_paths_with_latency_below,
    all_paths_with_latency_below_slow, graph_walk, shortest_path, ServiceGraph,
};

const SERVICES: [&str; 5] = ["A", "B", "C", "D", "E"];

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_service() -> impl Strategy<Value = Microservice> {
    (0..SERVICES.len()).prop_map(|i| Microservice::new(SERVICES[i]))
}

/// Strategy to generate a graph over all five services. Self-loops and
/// repeated pairs in the raw edge list are dropped.
fn arb_graph_with<L>(latency: L) -> impl Strategy<Value = ServiceGraph>
where
    L: Strategy<Value = Latency>,
{
    prop::collection::vec((arb_service(), arb_service(), latency), 0..14).prop_map(|edges| {
        let mut graph = ServiceGraph::new();
        for name in SERVICES {
            graph.add_service(Microservice::new(name));
        }
        for (source, target, latency) in edges {
            let connection = Connection::new(source, target, latency).unwrap();
            match graph.add_connection(connection) {
                Ok(_) | Err(TraceError::SelfLoop(_)) => {}
                Err(TraceError::DuplicateConnection { .. }) => {}
                Err(other) => panic!("unexpected error: {}", other),
            }
        }
        graph
    })
}

fn arb_graph() -> impl Strategy<Value = ServiceGraph> {
    arb_graph_with(1..=4u64)
}

/// Every latency is above half of `Latency::MAX`, so only single
/// connections have a representable total.
fn arb_heavy_graph() -> impl Strategy<Value = ServiceGraph> {
    arb_graph_with((Latency::MAX / 2 + 1)..=Latency::MAX)
}

fn routes(traces: &[Trace]) -> Vec<(Vec<Microservice>, Latency)> {
    let mut routes: Vec<_> = traces
        .iter()
        .map(|trace| (trace.services().to_vec(), trace.latency()))
        .collect();
    routes.sort();
    routes
}

fn connection_sum(trace: &Trace) -> Latency {
    trace.connections().iter().map(Connection::latency).sum()
}

fn is_chained(trace: &Trace) -> bool {
    trace
        .connections()
        .iter()
        .zip(trace.services().windows(2))
        .all(|(c, pair)| c.source() == &pair[0] && c.target() == &pair[1])
}

proptest! {
    #[test]
    fn walk_exists_iff_every_pair_is_connected(
        graph in arb_graph(),
        services in prop::collection::vec(arb_service(), 1..6),
    ) {
        let connected = services
            .windows(2)
            .all(|pair| graph.edge_between(&pair[0], &pair[1]).is_some());

        let walk = graph_walk(&graph, &services).unwrap();
        prop_assert_eq!(walk.is_some(), connected);

        if let Some(walk) = walk {
            let expected: Latency = services
                .windows(2)
                .map(|pair| graph.edge_between(&pair[0], &pair[1]).unwrap().latency())
                .sum();
            prop_assert_eq!(walk.latency(), expected);
            prop_assert_eq!(walk.services(), &services[..]);
            prop_assert_eq!(walk.hops(), services.len() - 1);
        }
    }

    #[test]
    fn bounded_paths_are_simple_and_within_hops(
        graph in arb_graph(),
        source in arb_service(),
        target in arb_service(),
        max_hops in 0usize..6,
    ) {
        let paths = all_paths_up_to_hops(&graph, &source, &target, max_hops).unwrap();

        for path in &paths {
            prop_assert!(path.is_simple(), "not simple: {}", path);
            prop_assert!(path.hops() >= 1 && path.hops() <= max_hops);
            prop_assert_eq!(path.start(), &source);
            prop_assert_eq!(path.end(), &target);
            prop_assert_eq!(path.latency(), connection_sum(path));
            prop_assert!(is_chained(path));
        }

        let distinct = routes(&paths).into_iter().collect::<std::collections::BTreeSet<_>>();
        prop_assert_eq!(distinct.len(), paths.len());
    }

    #[test]
    fn exact_hops_is_a_filter_of_bounded_paths(
        graph in arb_graph(),
        source in arb_service(),
        target in arb_service(),
        hops in 0usize..6,
    ) {
        let exact = all_paths_with_exact_hops(&graph, &source, &target, hops).unwrap();
        let bounded = all_paths_up_to_hops(&graph, &source, &target, hops).unwrap();
        let expected: Vec<_> = bounded.into_iter().filter(|p| p.hops() == hops).collect();

        prop_assert_eq!(routes(&exact), routes(&expected));
    }

    #[test]
    fn label_search_matches_slow_search(
        graph in arb_graph(),
        source in arb_service(),
        target in arb_service(),
        ceiling in 0u64..8,
    ) {
        let fast = all_paths_with_latency_below(&graph, &source, &target, ceiling).unwrap();
        let slow = all_paths_with_latency_below_slow(&graph, &source, &target, ceiling).unwrap();

        for walk in &fast {
            prop_assert!(walk.latency() < ceiling);
            prop_assert!(walk.hops() >= 1);
            prop_assert_eq!(walk.start(), &source);
            prop_assert_eq!(walk.end(), &target);
            prop_assert_eq!(walk.latency(), connection_sum(walk));
            prop_assert!(is_chained(walk));
        }
        prop_assert_eq!(routes(&fast), routes(&slow));
    }

    #[test]
    fn shortest_path_is_minimal(
        graph in arb_graph(),
        source in arb_service(),
        target in arb_service(),
    ) {
        // a cheapest route is always a simple path or a simple cycle
        let candidates = all_paths_up_to_hops(&graph, &source, &target, SERVICES.len()).unwrap();
        let best = candidates
            .iter()
            .map(|p| (p.latency(), p.hops()))
            .min();

        let shortest = shortest_path(&graph, &source, &target).unwrap();
        prop_assert_eq!(shortest.as_ref().map(|p| (p.latency(), p.hops())), best);

        if let Some(path) = shortest {
            prop_assert!(path.hops() >= 1);
            prop_assert_eq!(path.start(), &source);
            prop_assert_eq!(path.end(), &target);
            prop_assert!(is_chained(&path));
        }
    }

    #[test]
    fn heavy_latencies_stay_under_the_ceiling(
        graph in arb_heavy_graph(),
        source in arb_service(),
        target in arb_service(),
        ceiling in any::<Latency>(),
    ) {
        let fast = all_paths_with_latency_below(&graph, &source, &target, ceiling).unwrap();
        let slow = all_paths_with_latency_below_slow(&graph, &source, &target, ceiling).unwrap();

        for walk in &fast {
            prop_assert!(walk.latency() < ceiling);
            prop_assert_eq!(walk.hops(), 1);
            prop_assert_eq!(walk.latency(), connection_sum(walk));
        }
        prop_assert_eq!(routes(&fast), routes(&slow));
    }

    #[test]
    fn heavy_latencies_overflow_as_errors(
        graph in arb_heavy_graph(),
        source in arb_service(),
        target in arb_service(),
        services in prop::collection::vec(arb_service(), 1..5),
    ) {
        let connected = services
            .windows(2)
            .all(|pair| graph.edge_between(&pair[0], &pair[1]).is_some());
        match graph_walk(&graph, &services) {
            Ok(Some(walk)) => prop_assert!(connected && walk.hops() <= 1),
            Ok(None) => prop_assert!(!connected),
            Err(err) => {
                prop_assert!(connected && services.len() > 2);
                prop_assert_eq!(err, TraceError::LatencyOverflow(services[0].clone()));
            }
        }

        match all_paths_up_to_hops(&graph, &source, &target, 3) {
            Ok(paths) => prop_assert!(paths.iter().all(|path| path.hops() == 1)),
            Err(err) => prop_assert_eq!(err, TraceError::LatencyOverflow(source.clone())),
        }

        let direct = graph.edge_between(&source, &target).map(Connection::latency);
        match shortest_path(&graph, &source, &target) {
            Ok(Some(path)) => {
                prop_assert_eq!(path.hops(), 1);
                prop_assert_eq!(Some(path.latency()), direct);
            }
            Ok(None) => prop_assert!(direct.is_none()),
            Err(err) => {
                prop_assert!(direct.is_none());
                prop_assert_eq!(err, TraceError::LatencyOverflow(source.clone()));
            }
        }
    }
}
