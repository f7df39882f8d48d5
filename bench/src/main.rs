use degrees_core::{Graph, SearchEngine};
use std::collections::VecDeque;
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let person_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000).max(2);

    if mode == "help" || mode == "--help" {
        println!("Usage: degrees-bench [mode] [person_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  chain       Two-person movies in a line (deepest possible paths)");
        println!("  casts       Random casts drawn uniformly from all people");
        println!("  barbell     Two dense studios joined by a thin chain of movies");
        println!("  careers     Growing industry: new movies cast mostly recent people");
        println!();
        println!("Default person_count: 200000");
        return;
    }

    println!("degrees-bench");
    println!("=============");
    println!();

    let generators: Vec<(&str, fn(u64) -> Graph)> = match mode {
        "chain" => vec![("Chain", gen_chain)],
        "casts" => vec![("Random casts", gen_casts)],
        "barbell" => vec![("Barbell (studio-bridge-studio)", gen_barbell)],
        "careers" => vec![("Careers (surface attachment)", gen_careers)],
        "all" => vec![
            ("Chain", gen_chain as fn(u64) -> Graph),
            ("Random casts", gen_casts),
            ("Barbell (studio-bridge-studio)", gen_barbell),
            ("Careers (surface attachment)", gen_careers),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, person_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph, person_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} people", person_count);

    let t = Instant::now();
    let graph = generator(person_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s — {} people, {} movies, {} credits, ~{:.0}MB",
        gen_time.as_secs_f64(),
        graph.entity_count(),
        graph.group_count(),
        graph.membership_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    let engine = SearchEngine::new(&graph);
    let mut rng = FastRng::new(2024);
    let last = (graph.entity_count() as u64).saturating_sub(1);

    let mut pairs = vec![(0, last), (0, last / 2)];
    for _ in 0..4 {
        pairs.push((rng.next(last + 1), rng.next(last + 1)));
    }

    println!();
    println!(
        "{:>18} {:>8} {:>10} {:>10} {:>10} {:>10}",
        "pair", "degrees", "expanded", "generated", "frontier", "time"
    );
    println!(
        "{:->18} {:->8} {:->10} {:->10} {:->10} {:->10}",
        "", "", "", "", "", ""
    );

    for (a, b) in pairs {
        let (source, target) = (person_id(a), person_id(b));
        let t = Instant::now();
        let outcome = match engine.search(&source, &target) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("search {} → {} failed: {}", source, target, e);
                continue;
            }
        };
        let elapsed = t.elapsed();
        let degrees = outcome
            .path
            .map(|p| p.degrees().to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>18} {:>8} {:>10} {:>10} {:>10} {:>8.1}ms",
            format!("{}→{}", a, b),
            degrees,
            outcome.stats.nodes_expanded,
            outcome.stats.nodes_generated,
            outcome.stats.max_frontier,
            elapsed.as_secs_f64() * 1000.0
        );
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
}

fn person_id(i: u64) -> String {
    format!("p{}", i)
}

fn add_people(graph: &mut Graph, person_count: u64) {
    for i in 0..person_count {
        graph.add_entity(person_id(i), format!("Person {}", i), None);
    }
}

/// Register movie `movie` and credit every person in `cast`.
fn add_movie(graph: &mut Graph, movie: u64, cast: &[u64]) {
    let id = format!("m{}", movie);
    graph.add_group(id.clone(), format!("Movie {}", movie), None);
    for &p in cast {
        graph.add_membership(&person_id(p), &id);
    }
}

/// Chain: movie i stars persons i and i+1. Path length grows with n.
fn gen_chain(person_count: u64) -> Graph {
    let mut graph = Graph::new();
    add_people(&mut graph, person_count);
    for i in 0..person_count.saturating_sub(1) {
        add_movie(&mut graph, i, &[i, i + 1]);
    }
    graph
}

/// Random casts: ~n/4 movies, each with 2–9 people drawn uniformly.
/// Baseline topology with no structure.
fn gen_casts(person_count: u64) -> Graph {
    let mut graph = Graph::new();
    let mut rng = FastRng::new(54321);
    add_people(&mut graph, person_count);

    for movie in 0..(person_count / 4).max(1) {
        let size = 2 + rng.next(8);
        let cast: Vec<u64> = (0..size).map(|_| rng.next(person_count)).collect();
        add_movie(&mut graph, movie, &cast);
    }
    graph
}

/// Barbell: two studios whose people only work with each other, joined by
/// a chain of ten two-person movies.
///
/// Worst case for "find path through bottleneck."
fn gen_barbell(person_count: u64) -> Graph {
    let bridge_len = 10u64;
    let studio_size = (person_count.saturating_sub(bridge_len) / 2).max(2);
    let mut graph = Graph::new();
    let mut rng = FastRng::new(99999);
    add_people(&mut graph, studio_size * 2 + bridge_len);

    let mut movie = 0u64;
    let b_start = studio_size + bridge_len;
    for offset in [0, b_start] {
        for _ in 0..studio_size / 2 {
            let cast: Vec<u64> = (0..6).map(|_| offset + rng.next(studio_size)).collect();
            add_movie(&mut graph, movie, &cast);
            movie += 1;
        }
    }

    // Bridge: last person of studio A through the bridge people to studio B
    for i in 0..=bridge_len {
        let from = studio_size - 1 + i;
        add_movie(&mut graph, movie, &[from, from + 1]);
        movie += 1;
    }

    graph
}

/// Careers: each new movie casts newcomers plus people from a window of
/// recently active performers, with an occasional veteran from anywhere.
fn gen_careers(person_count: u64) -> Graph {
    let mut graph = Graph::new();
    let mut rng = FastRng::new(77777);
    add_people(&mut graph, person_count);

    let mut active: VecDeque<u64> = VecDeque::with_capacity(10001);
    let active_max = 10000usize;
    let mut next_person = 0u64;
    let mut movie = 0u64;

    while next_person < person_count {
        let mut cast = Vec::new();
        for _ in 0..3 {
            if next_person < person_count {
                cast.push(next_person);
                next_person += 1;
            }
        }
        if !active.is_empty() {
            cast.push(active[rng.next(active.len() as u64) as usize]);
        }
        // 10% chance of a veteran (creates long-range shortcuts)
        if rng.next(10) == 0 && next_person > 1 {
            cast.push(rng.next(next_person));
        }
        add_movie(&mut graph, movie, &cast);
        movie += 1;

        for &p in &cast {
            active.push_back(p);
            if active.len() > active_max {
                active.pop_front();
            }
        }
    }

    graph
}
