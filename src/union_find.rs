use petgraph::graph::IndexType;

/// Disjoint-set forest over the cells of a grid, kept as a flat arena.
///
/// Parents are cell indices into the arena rather than node references, so path
/// compression is an in-place rewrite of the parent column and nothing is ever
/// self-referential in the ownership sense. The index type is the same width
/// parameter the grid uses, so a small grid pays for small parent entries.
///
/// Union by rank with path compression: near constant amortized time per
/// operation. The whole structure only lives for the duration of one maze
/// generation run.
#[derive(Debug, Clone)]
pub struct DisjointSet<GridIndexType: IndexType> {
    parents: Vec<GridIndexType>,
    ranks: Vec<u8>,
}

impl<GridIndexType: IndexType> DisjointSet<GridIndexType> {
    /// One singleton set per cell: rank zero, parent pointing back at itself.
    pub fn new(cells_count: usize) -> DisjointSet<GridIndexType> {
        DisjointSet {
            parents: (0..cells_count).map(GridIndexType::new).collect(),
            ranks: vec![0; cells_count],
        }
    }

    /// Root of the set holding `cell`, repointing every walked node at the root.
    pub fn find(&mut self, cell: usize) -> usize {
        let mut root = cell;
        while self.parents[root].index() != root {
            root = self.parents[root].index();
        }

        let mut walk = cell;
        while self.parents[walk].index() != walk {
            let parent = self.parents[walk].index();
            self.parents[walk] = GridIndexType::new(root);
            walk = parent;
        }

        root
    }

    /// Merge the sets holding `a` and `b`.
    ///
    /// Returns `false` when they already share a root - joining them would close
    /// a cycle, which is exactly what the maze generator needs to reject.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut root_a = self.find(a);
        let mut root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        if self.ranks[root_a] < self.ranks[root_b] {
            ::std::mem::swap(&mut root_a, &mut root_b);
        }
        self.parents[root_b] = GridIndexType::new(root_a);
        if self.ranks[root_a] == self.ranks[root_b] {
            self.ranks[root_a] = self.ranks[root_a].saturating_add(1);
        }

        true
    }
}
