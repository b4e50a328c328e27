/// An ordered collection of disjoint, non-empty sets of cell indices,
/// tracking which cells the row sweep has already connected. A cell with no
/// set is effectively its own singleton that has not been materialized yet.
///
/// Lives only for the duration of one generation run. Linear scans are fine
/// here: sets span at most a couple of rows, and the partition invariant
/// (no cell in two sets at once) is what matters, not lookup speed.
#[derive(Debug, Default)]
pub struct PathSet {
    sets: Vec<Vec<usize>>,
}

impl PathSet {
    pub fn new() -> Self {
        PathSet::default()
    }

    /// Number of disjoint sets currently tracked.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Members of the set at `set_index`.
    pub fn members(&self, set_index: usize) -> &[usize] {
        &self.sets[set_index]
    }

    /// Index of the set containing `item`, or `None` if no set tracks it
    /// yet.
    pub fn find(&self, item: usize) -> Option<usize> {
        self.sets.iter().position(|set| set.contains(&item))
    }

    /// True only if both items are tracked and live in the same set.
    pub fn same_set(&self, a: usize, b: usize) -> bool {
        match (self.find(a), self.find(b)) {
            (Some(set_a), Some(set_b)) => set_a == set_b,
            _ => false,
        }
    }

    /// Track `item` in a fresh singleton set, unless some set already has
    /// it.
    pub fn insert_singleton(&mut self, item: usize) {
        if self.find(item).is_none() {
            self.sets.push(vec![item]);
        }
    }

    /// Connect `a` and `b`: merge their sets if both are tracked, extend the
    /// tracked one's set if only one is, or create a new set holding both.
    /// Never leaves an item in two sets.
    pub fn join(&mut self, a: usize, b: usize) {
        if a == b {
            self.insert_singleton(a);
            return;
        }
        match (self.find(a), self.find(b)) {
            (Some(set_a), Some(set_b)) if set_a == set_b => {}
            (Some(set_a), Some(set_b)) => {
                let (keep, absorb) = (set_a.min(set_b), set_a.max(set_b));
                let absorbed = self.sets.remove(absorb);
                self.sets[keep].extend(absorbed);
            }
            (Some(set_a), None) => self.sets[set_a].push(b),
            (None, Some(set_b)) => self.sets[set_b].push(a),
            (None, None) => self.sets.push(vec![a, b]),
        }
    }
}
