use anyhow::Result;
use protocol::Microservice;
use store::ServiceGraph;
use tracing::debug;

use crate::cli::Commands;
use crate::demo::run_demo;
use crate::report::Outcome;

/// Run one query against the graph. `Demo` expands into several outcomes,
/// every other command yields exactly one.
pub fn execute(graph: &ServiceGraph, command: &Commands) -> Result<Vec<(String, Outcome)>> {
    debug!("Executing {:?}", command);
    let outcome = match command {
        Commands::Walk { services } => {
            let services: Vec<Microservice> = services
                .iter()
                .map(|name| Microservice::new(name.as_str()))
                .collect();
            Outcome::Trace(store::graph_walk(graph, &services)?)
        }
        Commands::Paths {
            from,
            to,
            max_hops,
            exact_hops,
        } => {
            let from = Microservice::new(from.as_str());
            let to = Microservice::new(to.as_str());
            let paths = match (max_hops, exact_hops) {
                (_, Some(hops)) => store::all_paths_with_exact_hops(graph, &from, &to, *hops)?,
                (Some(max), None) => store::all_paths_up_to_hops(graph, &from, &to, *max)?,
                (None, None) => anyhow::bail!("paths needs --max-hops or --exact-hops"),
            };
            Outcome::Traces(paths)
        }
        Commands::Within {
            from,
            to,
            max_latency,
            slow,
        } => {
            let from = Microservice::new(from.as_str());
            let to = Microservice::new(to.as_str());
            let walks = if *slow {
                store::all_paths_with_latency_below_slow(graph, &from, &to, *max_latency)?
            } else {
                store::all_paths_with_latency_below(graph, &from, &to, *max_latency)?
            };
            Outcome::Traces(walks)
        }
        Commands::Shortest { from, to } => Outcome::Trace(store::shortest_path(
            graph,
            &Microservice::new(from.as_str()),
            &Microservice::new(to.as_str()),
        )?),
        Commands::Stats => Outcome::Stats(graph.stats()),
        Commands::Demo => return run_demo(graph),
    };

    Ok(vec![(command_label(command), outcome)])
}

fn command_label(command: &Commands) -> String {
    match command {
        Commands::Walk { services } => format!("walk {}", services.join("-")),
        Commands::Paths { from, to, .. } => format!("paths {} -> {}", from, to),
        Commands::Within { from, to, .. } => format!("within {} -> {}", from, to),
        Commands::Shortest { from, to } => format!("shortest {} -> {}", from, to),
        Commands::Stats => "stats".to_string(),
        Commands::Demo => "demo".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::parse_graph;

    fn sample() -> ServiceGraph {
        parse_graph("AB5, BC4, CD8, DC8, DE6, AD5, CE2, EB3, AE7").unwrap()
    }

    fn run(command: Commands) -> String {
        let mut outcomes = execute(&sample(), &command).unwrap();
        assert_eq!(outcomes.len(), 1);
        outcomes.remove(0).1.render_text()
    }

    #[test]
    fn test_walk_command() {
        let walk = |names: &[&str]| Commands::Walk {
            services: names.iter().map(|s| s.to_string()).collect(),
        };
        assert_eq!(run(walk(&["A", "B", "C"])), "9");
        assert_eq!(run(walk(&["A", "E", "D"])), "NO SUCH TRACE");
    }

    #[test]
    fn test_paths_command() {
        assert_eq!(
            run(Commands::Paths {
                from: "C".into(),
                to: "C".into(),
                max_hops: Some(3),
                exact_hops: None
            }),
            "2"
        );
        assert_eq!(
            run(Commands::Paths {
                from: "A".into(),
                to: "C".into(),
                max_hops: None,
                exact_hops: Some(2)
            }),
            "2"
        );
    }

    #[test]
    fn test_within_command_fast_and_slow_agree() {
        let within = |slow| Commands::Within {
            from: "C".into(),
            to: "C".into(),
            max_latency: 30,
            slow,
        };
        assert_eq!(run(within(false)), "7");
        assert_eq!(run(within(true)), "7");
    }

    #[test]
    fn test_shortest_command() {
        assert_eq!(
            run(Commands::Shortest {
                from: "B".into(),
                to: "B".into()
            }),
            "9"
        );
    }

    #[test]
    fn test_unknown_service_is_an_error() {
        let err = execute(
            &sample(),
            &Commands::Shortest {
                from: "A".into(),
                to: "Z".into(),
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unknown service: Z");
    }

    #[test]
    fn test_latency_overflow_is_an_error() {
        let graph = parse_graph(&format!("AB{}, BA1", u64::MAX - 1)).unwrap();
        let walk = Commands::Walk {
            services: vec!["A".into(), "B".into(), "A".into(), "B".into()],
        };

        let err = execute(&graph, &walk).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Total latency of the trace starting at A overflows"
        );

        let within = Commands::Within {
            from: "A".into(),
            to: "B".into(),
            max_latency: u64::MAX,
            slow: false,
        };
        let outcomes = execute(&graph, &within).unwrap();
        assert_eq!(outcomes[0].1.render_text(), "1");
    }
}
