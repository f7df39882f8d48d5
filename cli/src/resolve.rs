use std::io::{BufRead, Write};

use degrees_core::{EntityId, Graph, NameLookup, NameResolver};
use tracing::warn;

/// Resolves names against the graph, asking the user to pick an id when
/// several people share a name.
pub struct PromptResolver<'g, R, W> {
    graph: &'g Graph,
    input: R,
    output: W,
}

impl<'g, R: BufRead, W: Write> PromptResolver<'g, R, W> {
    pub fn new(graph: &'g Graph, input: R, output: W) -> Self {
        Self {
            graph,
            input,
            output,
        }
    }

    /// Print `prompt` and read one trimmed line. None on end of input.
    pub fn ask(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`NameResolver::resolve`], but a failed prompt is returned to the
    /// caller instead of being treated as "not found".
    pub fn try_resolve(&mut self, display_name: &str) -> std::io::Result<Option<EntityId>> {
        match self.graph.lookup_name(display_name) {
            NameLookup::NotFound => Ok(None),
            NameLookup::Unique(id) => Ok(Some(id)),
            NameLookup::Ambiguous(ids) => self.choose(display_name, &ids),
        }
    }

    fn choose(
        &mut self,
        name: &str,
        candidates: &[EntityId],
    ) -> std::io::Result<Option<EntityId>> {
        writeln!(self.output, "Which '{name}'?")?;
        for id in candidates {
            if let Some(person) = self.graph.entity(id) {
                writeln!(
                    self.output,
                    "ID: {}, Name: {}, Birth: {}",
                    id,
                    person.name,
                    person.birth.as_deref().unwrap_or("")
                )?;
            }
        }
        let chosen = self.ask("Intended Person ID: ")?;
        Ok(chosen.filter(|id| candidates.contains(id)))
    }
}

impl<R: BufRead, W: Write> NameResolver for PromptResolver<'_, R, W> {
    fn resolve(&mut self, display_name: &str) -> Option<EntityId> {
        self.try_resolve(display_name).unwrap_or_else(|e| {
            warn!(error = %e, "disambiguation prompt failed");
            None
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Read};

    /// Reader whose every read fails, standing in for a closed terminal.
    struct BrokenInput;

    impl Read for BrokenInput {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"))
        }
    }

    fn graph() -> Graph {
        let mut g = Graph::new();
        g.add_entity("102", "Kevin Bacon", Some("1958".into()));
        g.add_entity("200", "Emma Watson", Some("1990".into()));
        g.add_entity("300", "Emma Watson", None);
        g
    }

    #[test]
    fn test_unique_name_no_prompt() {
        let g = graph();
        let mut out = Vec::new();
        let mut r = PromptResolver::new(&g, "".as_bytes(), &mut out);
        assert_eq!(r.resolve("kevin bacon"), Some("102".to_string()));
        drop(r);
        assert!(out.is_empty());
    }

    #[test]
    fn test_ambiguous_name_prompts() {
        let g = graph();
        let mut out = Vec::new();
        let mut r = PromptResolver::new(&g, "300\n".as_bytes(), &mut out);
        assert_eq!(r.resolve("Emma Watson"), Some("300".to_string()));
        drop(r);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Which 'Emma Watson'?\n"));
        assert!(text.contains("ID: 200, Name: Emma Watson, Birth: 1990\n"));
        assert!(text.contains("ID: 300, Name: Emma Watson, Birth: \n"));
        assert!(text.ends_with("Intended Person ID: "));
    }

    #[test]
    fn test_ambiguous_choice_outside_candidates() {
        let g = graph();
        let mut out = Vec::new();
        let mut r = PromptResolver::new(&g, "102\n".as_bytes(), &mut out);
        assert_eq!(r.resolve("Emma Watson"), None);
    }

    #[test]
    fn test_ambiguous_end_of_input() {
        let g = graph();
        let mut r = PromptResolver::new(&g, "".as_bytes(), Vec::new());
        assert_eq!(r.resolve("Emma Watson"), None);
    }

    #[test]
    fn test_unknown_name() {
        let g = graph();
        let mut r = PromptResolver::new(&g, "".as_bytes(), Vec::new());
        assert_eq!(r.resolve("Nobody"), None);
    }

    #[test]
    fn test_try_resolve_reports_read_failure() {
        let g = graph();
        let mut r = PromptResolver::new(&g, BufReader::new(BrokenInput), Vec::new());
        let err = r.try_resolve("Emma Watson").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_try_resolve_unique_skips_input() {
        let g = graph();
        let mut r = PromptResolver::new(&g, BufReader::new(BrokenInput), Vec::new());
        assert_eq!(r.try_resolve("Kevin Bacon").unwrap(), Some("102".to_string()));
        assert_eq!(r.try_resolve("Nobody").unwrap(), None);
    }

    #[test]
    fn test_resolve_read_failure_is_none() {
        let g = graph();
        let mut r = PromptResolver::new(&g, BufReader::new(BrokenInput), Vec::new());
        assert_eq!(r.resolve("Emma Watson"), None);
    }
}
