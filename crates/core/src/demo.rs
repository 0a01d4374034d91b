//! The standard example queries, numbered in the order they are run.

use anyhow::Result;
use protocol::Microservice;
use store::ServiceGraph;

use crate::report::Outcome;

fn services(names: &[&str]) -> Vec<Microservice> {
    names.iter().copied().map(Microservice::from).collect()
}

pub fn run_demo(graph: &ServiceGraph) -> Result<Vec<(String, Outcome)>> {
    let (a, b, c) = (Microservice::from("A"), Microservice::from("B"), Microservice::from("C"));
    let mut outcomes = Vec::new();

    let walks: [&[&str]; 5] = [
        &["A", "B", "C"],
        &["A", "D"],
        &["A", "D", "C"],
        &["A", "E", "B", "C", "D"],
        &["A", "E", "D"],
    ];
    for walk in walks {
        outcomes.push(Outcome::Trace(store::graph_walk(graph, &services(walk))?));
    }

    outcomes.push(Outcome::Traces(store::all_paths_up_to_hops(graph, &c, &c, 3)?));
    outcomes.push(Outcome::Traces(store::all_paths_with_exact_hops(graph, &a, &c, 4)?));
    outcomes.push(Outcome::Trace(store::shortest_path(graph, &a, &c)?));
    outcomes.push(Outcome::Trace(store::shortest_path(graph, &b, &b)?));
    outcomes.push(Outcome::Traces(store::all_paths_with_latency_below(graph, &c, &c, 30)?));

    Ok(outcomes
        .into_iter()
        .enumerate()
        .map(|(i, outcome)| (format!("Output #{}", i + 1), outcome))
        .collect())
}
