use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use degrees_core::Graph;
use serde::Deserialize;
use tracing::{debug, info};

pub const PEOPLE_FILE: &str = "people.csv";
pub const MOVIES_FILE: &str = "movies.csv";
pub const STARS_FILE: &str = "stars.csv";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed row in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("loaded graph uses {used_mb}MB, exceeds limit of {limit_mb}MB")]
    MemoryLimit { used_mb: usize, limit_mb: usize },
}

/// Loader settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Refuse graphs whose approximate footprint exceeds this many MB.
    pub max_memory_mb: Option<usize>,
}

/// Counts reported after a load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadStats {
    pub people: usize,
    pub movies: usize,
    pub memberships: usize,
    /// Star rows naming a person or movie absent from the other files.
    pub skipped_memberships: usize,
    pub load_time_ms: f64,
}

#[derive(Debug, Deserialize)]
struct PersonRow {
    id: String,
    name: String,
    #[serde(default)]
    birth: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MovieRow {
    id: String,
    title: String,
    #[serde(default)]
    year: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StarRow {
    person_id: String,
    movie_id: String,
}

/// Build a graph from `people.csv`, `movies.csv` and `stars.csv` in `dir`.
pub fn load_directory(dir: &Path, options: &LoadOptions) -> Result<(Graph, LoadStats), LoadError> {
    let start = Instant::now();
    let mut graph = Graph::new();
    let mut stats = LoadStats::default();

    stats.people = load_people(&dir.join(PEOPLE_FILE), &mut graph)?;
    stats.movies = load_movies(&dir.join(MOVIES_FILE), &mut graph)?;
    let (linked, skipped) = load_stars(&dir.join(STARS_FILE), &mut graph)?;
    stats.memberships = linked;
    stats.skipped_memberships = skipped;

    if let Some(limit_mb) = options.max_memory_mb {
        let used_mb = graph.memory_usage() / (1024 * 1024);
        if used_mb > limit_mb {
            return Err(LoadError::MemoryLimit { used_mb, limit_mb });
        }
    }

    stats.load_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(
        people = stats.people,
        movies = stats.movies,
        memberships = stats.memberships,
        skipped = stats.skipped_memberships,
        load_time_ms = stats.load_time_ms,
        "data loaded"
    );

    Ok((graph, stats))
}

// ---------------------------------------------------------------------------
// Entity and group loading
// ---------------------------------------------------------------------------

fn load_people(path: &Path, graph: &mut Graph) -> Result<usize, LoadError> {
    let mut count = 0;
    for row in rows::<PersonRow>(path)? {
        let row = row.map_err(|source| csv_error(path, source))?;
        graph.add_entity(row.id, row.name, non_empty(row.birth));
        count += 1;
    }
    Ok(count)
}

fn load_movies(path: &Path, graph: &mut Graph) -> Result<usize, LoadError> {
    let mut count = 0;
    for row in rows::<MovieRow>(path)? {
        let row = row.map_err(|source| csv_error(path, source))?;
        graph.add_group(row.id, row.title, non_empty(row.year));
        count += 1;
    }
    Ok(count)
}

// ---------------------------------------------------------------------------
// Membership loading
// ---------------------------------------------------------------------------

fn load_stars(path: &Path, graph: &mut Graph) -> Result<(usize, usize), LoadError> {
    let mut linked = 0;
    let mut skipped = 0;
    for row in rows::<StarRow>(path)? {
        let row = row.map_err(|source| csv_error(path, source))?;
        if graph.add_membership(&row.person_id, &row.movie_id) {
            linked += 1;
        } else {
            debug!(
                person = %row.person_id,
                movie = %row.movie_id,
                "skipping star row with unknown id"
            );
            skipped += 1;
        }
    }
    Ok((linked, skipped))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn rows<T: for<'de> Deserialize<'de>>(
    path: &Path,
) -> Result<csv::DeserializeRecordsIntoIter<File, T>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::Reader::from_reader(file).into_deserialize())
}

fn csv_error(path: &Path, source: csv::Error) -> LoadError {
    LoadError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
