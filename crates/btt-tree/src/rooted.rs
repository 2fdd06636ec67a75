//! Finite rooted trees.

/// A value with an ordered list of subtrees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootedTree<T> {
    /// Label of the root.
    pub value: T,
    /// Subtrees, in order.
    pub forest: Vec<RootedTree<T>>,
}

impl<T> RootedTree<T> {
    /// A single node.
    #[inline]
    #[must_use]
    pub const fn leaf(value: T) -> Self {
        Self { value, forest: Vec::new() }
    }

    /// Unfold from a seed: `f(seed)` yields the root label and the seeds of
    /// its children.
    pub fn make<S, G>(seed: S, f: &mut G) -> Self
    where
        G: FnMut(S) -> (T, Vec<S>),
    {
        let (value, seeds) = f(seed);
        Self { value, forest: seeds.into_iter().map(|s| Self::make(s, f)).collect() }
    }

    /// Fallible [`RootedTree::make`]; stops at the first error.
    ///
    /// # Errors
    /// The first error returned by `f`.
    pub fn try_make<S, E, G>(seed: S, f: &mut G) -> Result<Self, E>
    where
        G: FnMut(S) -> Result<(T, Vec<S>), E>,
    {
        let (value, seeds) = f(seed)?;
        let forest = seeds.into_iter().map(|s| Self::try_make(s, f)).collect::<Result<_, _>>()?;
        Ok(Self { value, forest })
    }

    /// Relabel every node.
    pub fn map<U, G>(self, f: &mut G) -> RootedTree<U>
    where
        G: FnMut(T) -> U,
    {
        RootedTree {
            value: f(self.value),
            forest: self.forest.into_iter().map(|t| t.map(f)).collect(),
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.forest.iter().map(Self::len).sum::<usize>()
    }

    /// Always false: a rooted tree has its root.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Labels in pre-order, each with its depth.
    #[must_use]
    pub fn preorder(&self) -> Vec<(usize, &T)> {
        let mut out = Vec::new();
        let mut stack = vec![(0usize, self)];
        while let Some((depth, node)) = stack.pop() {
            out.push((depth, &node.value));
            stack.extend(node.forest.iter().rev().map(|c| (depth + 1, c)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Binary expansion tree: `n` has children `2n` and `2n + 1` below `limit`.
    fn binary(limit: u32) -> RootedTree<u32> {
        RootedTree::make(1u32, &mut |n| (n, [2 * n, 2 * n + 1].into_iter().filter(|&c| c < limit).collect()))
    }

    #[test]
    fn make_and_len() {
        let t = binary(8);
        assert_eq!(t.len(), 7);
        assert_eq!(t.forest.len(), 2);
        assert_eq!(RootedTree::leaf('x').len(), 1);
        assert!(!t.is_empty());
    }

    #[test]
    fn preorder_and_map() {
        let t = binary(8).map(&mut |n| n * 10);
        let order: Vec<u32> = t.preorder().into_iter().map(|(_, &v)| v).collect();
        assert_eq!(order, [10, 20, 40, 50, 30, 60, 70]);
        assert_eq!(t.preorder()[2], (2, &40));
    }

    #[test]
    fn try_make_stops_on_error() {
        let r: Result<RootedTree<u32>, String> = RootedTree::try_make(1u32, &mut |n| {
            if n > 4 {
                Err(format!("too deep at {n}"))
            } else {
                Ok((n, vec![2 * n]))
            }
        });
        assert_eq!(r, Err("too deep at 8".to_owned()));
    }
}
