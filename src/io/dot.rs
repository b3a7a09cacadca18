//! # Dot
//!
//! Basic DOT output: one statement per edge, weighted graphs label every edge with its weight.
//!
//! ```
//! use adjgraphs::{io::DotWrite, prelude::*};
//!
//! let graph = WeightedDigraph::from_weighted_edges(3, [(0, 1, 2.5), (2, 0, -1.0)]).unwrap();
//! let mut out = Vec::new();
//! graph.try_write_dot(&mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "digraph {\nu1->u2[label=\"2.50\"];u3->u1[label=\"-1.00\"];\n}\n"
//! );
//! ```
use std::io::Write;

use super::*;

/// A writer for the Dot-Format
#[derive(Debug, Clone)]
pub struct DotWriter {
    /// Increment nodes by 1 before writing
    inc_nodes: bool,
    /// Prefix of a node (default: 'u')
    prefix: String,
}

impl Default for DotWriter {
    fn default() -> Self {
        Self {
            inc_nodes: true,
            prefix: "u".to_string(),
        }
    }
}

impl DotWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// If *false*, nodes are written with their id as is
    pub fn inc_nodes(mut self, inc_nodes: bool) -> Self {
        self.inc_nodes = inc_nodes;
        self
    }

    /// Set the prefix of a node (`u` by default)
    pub fn node_prefix<S>(mut self, prefix: S) -> Self
    where
        S: Into<String>,
    {
        self.prefix = prefix.into();
        self
    }

    /// Writes the opening brackets of the graph
    pub fn start_graph<W>(&self, writer: &mut W, directed: bool) -> Result<()>
    where
        W: Write,
    {
        let graph_name = if directed { "digraph" } else { "graph" };
        writeln!(writer, "{graph_name} {{")
    }

    fn format_node(&self, u: Node) -> String {
        let u = u as u64 + self.inc_nodes as u64;
        format!("{}{u}", self.prefix)
    }

    /// Writes edges to `writer`, labelling each one with its weight if `weighted`
    pub fn write_edges<W, I>(
        &self,
        writer: &mut W,
        edges: I,
        directed: bool,
        weighted: bool,
    ) -> Result<()>
    where
        W: Write,
        I: IntoIterator<Item = WeightedEdge>,
    {
        let edge_dir = if directed { "->" } else { "--" };

        for WeightedEdge(u, v, w) in edges {
            write!(writer, "{}{edge_dir}{}", self.format_node(u), self.format_node(v))?;
            if weighted {
                write!(writer, "[label=\"{w:.2}\"]")?;
            }
            write!(writer, ";")?;
        }
        writeln!(writer)
    }

    /// Closes the Dot-Graph
    pub fn finish_graph<W>(&self, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        writeln!(writer, "}}")
    }
}

impl<G> GraphWriter<G> for DotWriter
where
    G: AdjacencyList + GraphType,
{
    fn try_write_graph<W>(&self, graph: &G, mut writer: W) -> Result<()>
    where
        W: Write,
    {
        let directed = G::is_directed();
        self.start_graph(&mut writer, directed)?;
        self.write_edges(
            &mut writer,
            graph.ordered_weighted_edges(!directed),
            directed,
            G::is_weighted(),
        )?;
        self.finish_graph(&mut writer)
    }
}

/// Writing a graph in the Dot-Format with default settings
pub trait DotWrite {
    /// Tries to write the graph to a writer
    fn try_write_dot<W>(&self, writer: W) -> Result<()>
    where
        W: Write;

    /// Tries to write the graph to a file
    fn try_write_dot_file<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_dot(writer)
    }
}

impl<G> DotWrite for G
where
    G: AdjacencyList + GraphType,
{
    fn try_write_dot<W>(&self, writer: W) -> Result<()>
    where
        W: Write,
    {
        DotWriter::default().try_write_graph(self, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_dot<G: AdjacencyList + GraphType>(writer: &DotWriter, graph: &G) -> String {
        let mut out = Vec::new();
        writer.try_write_graph(graph, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn undirected_edges_are_written_once() {
        let graph = Graph::from_edges(3, [(2, 0), (1, 1)]).unwrap();
        assert_eq!(
            to_dot(&DotWriter::new(), &graph),
            "graph {\nu1--u3;u2--u2;\n}\n"
        );
        assert_eq!(
            to_dot(&DotWriter::new().inc_nodes(false).node_prefix("v"), &graph),
            "graph {\nv0--v2;v1--v1;\n}\n"
        );
    }

    #[test]
    fn views_are_written_in_their_shape() {
        let graph = Graph::from_edges(2, [(0, 1)]).unwrap();
        assert_eq!(
            to_dot(&DotWriter::new(), &graph.as_directed()),
            "digraph {\nu1->u2;u2->u1;\n}\n"
        );
        assert_eq!(
            to_dot(&DotWriter::new(), &graph.as_weighted()),
            "graph {\nu1--u2[label=\"1.00\"];\n}\n"
        );
    }
}
