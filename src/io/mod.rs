/*!
# IO

Writing graphs in the [DOT language](https://graphviz.org/doc/info/lang.html) of
[GraphViz](https://graphviz.org/) for visual inspection. There is no input format: graphs are
built through the API (or deserialized with the `serde` feature).

[`GraphWriter`] is implemented by writers for a specific format, [`DotWrite`] is the
shorthand available on every graph and view.
*/

pub mod dot;

use std::{
    fs::File,
    io::{BufWriter, Result, Write},
    path::Path,
};

use crate::prelude::*;

pub use dot::*;

/// Trait for types that can write graphs in a specific format.
pub trait GraphWriter<G> {
    /// Writes the given graph to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    fn try_write_graph<W>(&self, graph: &G, writer: W) -> Result<()>
    where
        W: Write;

    /// Writes the given graph to a file according to the settings in `self`.
    fn try_write_graph_file<P>(&self, graph: &G, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        self.try_write_graph(graph, BufWriter::new(File::create(path)?))
    }
}
