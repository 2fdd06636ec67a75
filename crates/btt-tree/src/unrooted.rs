//! Trees given by an undirected neighbor relation.
//!
//! Nothing here stores parent pointers; traversals carry the vertex they came
//! from and skip it when expanding.

use core::fmt::Debug;

use btt_algebra::Result;

/// A neighbor of some vertex together with the label of the edge leading to it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Adj<V, E> {
    /// The neighbor.
    pub vertex: V,
    /// Label of the edge from the current vertex to `vertex`.
    pub edge: E,
}

/// Visitor result: the state handed to the child and whether to prune it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step<S> {
    /// State for the child's subtree.
    pub value: S,
    /// Do not descend into the child.
    pub stop: bool,
}

impl<S> Step<S> {
    /// Descend with `value`.
    #[inline]
    #[must_use]
    pub const fn go(value: S) -> Self {
        Self { value, stop: false }
    }

    /// Visit but do not descend.
    #[inline]
    #[must_use]
    pub const fn stop(value: S) -> Self {
        Self { value, stop: true }
    }
}

/* ---------------------------------- DFS frame --------------------------------- */

#[derive(Debug)]
struct Frame<V, E, S> {
    vertex: V,
    /// Vertex we arrived from; never expanded again.
    parent: Option<V>,
    state: S,
    neighbors: Vec<Adj<V, E>>,
    /// Index of the next neighbor to try.
    next: usize,
}

/// A tree known only through [`UnrootedTree::neighbors`].
pub trait UnrootedTree {
    /// Vertex type.
    type Vertex: Clone + PartialEq + Debug;
    /// Edge label type.
    type Edge: Clone + PartialEq + Debug;

    /// All adjacent vertices, each with its edge label.
    ///
    /// # Errors
    /// Arithmetic failure while building a neighbor.
    fn neighbors(&self, v: &Self::Vertex) -> Result<Vec<Adj<Self::Vertex, Self::Edge>>>;

    /// Label of the edge `child → parent`, given the label `edge` of
    /// `parent → child`.
    ///
    /// # Errors
    /// `child` is not adjacent to `parent` through `edge`.
    fn reverse_edge(&self, parent: &Self::Vertex, child: &Self::Vertex, edge: &Self::Edge) -> Result<Self::Edge>;

    /// The step back from `adj.vertex` to `parent`.
    ///
    /// # Errors
    /// See [`UnrootedTree::reverse_edge`].
    fn reverse(
        &self,
        parent: &Self::Vertex,
        adj: &Adj<Self::Vertex, Self::Edge>,
    ) -> Result<Adj<Self::Vertex, Self::Edge>> {
        Ok(Adj { vertex: parent.clone(), edge: self.reverse_edge(parent, &adj.vertex, &adj.edge)? })
    }

    /// The unique path from `a` to `b`, excluding `a`. Empty when `a == b`.
    ///
    /// # Errors
    /// Arithmetic failure while stepping.
    fn path(&self, a: &Self::Vertex, b: &Self::Vertex) -> Result<Vec<Adj<Self::Vertex, Self::Edge>>>;

    /// Fold `f(acc, from, step, index)` along [`UnrootedTree::path`].
    ///
    /// # Errors
    /// Propagates path errors.
    fn reduce_path<U, G>(&self, a: &Self::Vertex, b: &Self::Vertex, init: U, mut f: G) -> Result<U>
    where
        G: FnMut(U, &Self::Vertex, &Adj<Self::Vertex, Self::Edge>, usize) -> U,
    {
        let mut acc = init;
        let mut from = a.clone();
        for (i, step) in self.path(a, b)?.into_iter().enumerate() {
            acc = f(acc, &from, &step, i);
            from = step.vertex;
        }
        Ok(acc)
    }

    /// Number of edges between `a` and `b`.
    ///
    /// # Errors
    /// Propagates path errors.
    fn distance(&self, a: &Self::Vertex, b: &Self::Vertex) -> Result<usize> {
        Ok(self.path(a, b)?.len())
    }

    /// Depth-first traversal from `start` that never steps back to the vertex
    /// it came from.
    ///
    /// `visitor(state, current, step)` runs once per edge, in the order a
    /// recursive DFS would take them, with `state` being the value attached
    /// to `current`. The returned [`Step`] carries the child's state; a set
    /// `stop` prunes the child's subtree. The tree may be infinite, so
    /// termination is the visitor's job.
    ///
    /// # Errors
    /// Propagates neighbor errors.
    fn iter<S, G>(&self, start: &Self::Vertex, init: S, mut visitor: G) -> Result<()>
    where
        G: FnMut(&S, &Self::Vertex, &Adj<Self::Vertex, Self::Edge>) -> Step<S>,
    {
        let mut stack = vec![Frame {
            vertex: start.clone(),
            parent: None,
            state: init,
            neighbors: self.neighbors(start)?,
            next: 0,
        }];

        while let Some(top) = stack.last_mut() {
            let Some(adj) = top.neighbors.get(top.next).cloned() else {
                stack.pop();
                continue;
            };
            top.next += 1;
            if top.parent.as_ref() == Some(&adj.vertex) {
                continue;
            }

            let step = visitor(&top.state, &top.vertex, &adj);
            if step.stop {
                continue;
            }
            let parent = Some(top.vertex.clone());
            let neighbors = self.neighbors(&adj.vertex)?;
            stack.push(Frame { vertex: adj.vertex, parent, state: step.value, neighbors, next: 0 });
        }
        Ok(())
    }

    /// Vertex-only traversal: `stop(v)` is called on `start` and every
    /// reached vertex; returning `true` prunes below `v`.
    ///
    /// # Errors
    /// Propagates neighbor errors.
    fn iter_vertices<G>(&self, start: &Self::Vertex, mut stop: G) -> Result<()>
    where
        G: FnMut(&Self::Vertex) -> bool,
    {
        if stop(start) {
            return Ok(());
        }
        self.iter(start, (), |_, _, adj| Step { value: (), stop: stop(&adj.vertex) })
    }
}
