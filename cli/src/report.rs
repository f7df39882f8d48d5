use std::io::Write;

use degrees_core::{EntityId, Graph, GraphPath};
use serde::Serialize;

#[derive(Serialize)]
struct JsonStep<'a> {
    connector: &'a str,
    connector_title: Option<&'a str>,
    entity: &'a str,
    entity_name: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    target: &'a str,
    connected: bool,
    degrees: Option<usize>,
    path: Vec<JsonStep<'a>>,
}

/// Human-readable result, one line per hop.
pub fn write_text<W: Write>(
    out: &mut W,
    graph: &Graph,
    source: &EntityId,
    path: Option<&GraphPath<Graph>>,
) -> std::io::Result<()> {
    let Some(path) = path else {
        return writeln!(out, "Not connected.");
    };

    writeln!(out, "{} degrees of separation.", path.degrees())?;
    for (i, (from, movie, to)) in path.hops_from(source).enumerate() {
        writeln!(
            out,
            "{}: {} and {} starred in {}",
            i + 1,
            person_name(graph, from),
            person_name(graph, to),
            graph.group(movie).map(|g| g.title.as_str()).unwrap_or(movie),
        )?;
    }
    Ok(())
}

/// Machine-readable result.
pub fn write_json<W: Write>(
    out: &mut W,
    graph: &Graph,
    source: &EntityId,
    target: &EntityId,
    path: Option<&GraphPath<Graph>>,
) -> serde_json::Result<()> {
    let steps: Vec<JsonStep<'_>> = path
        .map(|p| {
            p.iter()
                .map(|step| JsonStep {
                    connector: &step.connector,
                    connector_title: graph.group(&step.connector).map(|g| g.title.as_str()),
                    entity: &step.entity,
                    entity_name: graph.entity(&step.entity).map(|e| e.name.as_str()),
                })
                .collect()
        })
        .unwrap_or_default();

    let report = JsonReport {
        source,
        target,
        connected: path.is_some(),
        degrees: path.map(|p| p.degrees()),
        path: steps,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out).map_err(serde_json::Error::io)
}

fn person_name<'a>(graph: &'a Graph, id: &'a str) -> &'a str {
    graph.entity(id).map(|e| e.name.as_str()).unwrap_or(id)
}
