use std::{
    borrow::Borrow,
    collections::{hash_map, HashMap},
    hash::Hash,
    ops::Index,
};

/// A mapping from keys to `f32` values that reads `0.0` for every missing key
///
/// Reads never insert; only writes grow the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter<K: Eq + Hash> {
    map: HashMap<K, f32>,
}

impl<K: Eq + Hash> Default for Counter<K> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> Counter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored for `key`, or `0.0` if the key was never written
    pub fn get<Q>(&self, key: &Q) -> f32
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.get(key).copied().unwrap_or(0.0)
    }

    /// Overwrite the value for `key`, returning the previous value (`0.0` if unset)
    pub fn insert(&mut self, key: K, value: f32) -> f32 {
        self.map.insert(key, value).unwrap_or(0.0)
    }

    /// Add `delta` to the value for `key`
    pub fn add(&mut self, key: K, delta: f32) {
        *self.entry(key) += delta;
    }

    /// Mutable access to the value for `key`, inserting `0.0` first if unset
    pub fn entry(&mut self, key: K) -> &mut f32 {
        self.map.entry(key).or_insert(0.0)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> hash_map::Iter<'_, K, f32> {
        self.map.iter()
    }

    /// Dot product with a sparse vector; keys absent from `self` contribute nothing
    pub fn dot<'a, I>(&self, other: I) -> f32
    where
        K: 'a,
        I: IntoIterator<Item = (&'a K, &'a f32)>,
    {
        other
            .into_iter()
            .map(|(key, value)| self.get(key) * value)
            .sum()
    }

    /// Largest absolute difference between two counters over the union of their keys
    pub fn max_abs_diff(&self, other: &Self) -> f32 {
        self.map
            .keys()
            .chain(other.map.keys())
            .map(|key| (self.get(key) - other.get(key)).abs())
            .fold(0.0, f32::max)
    }
}

impl<K: Eq + Hash, Q> Index<&Q> for Counter<K>
where
    K: Borrow<Q>,
    Q: Eq + Hash + ?Sized,
{
    type Output = f32;

    fn index(&self, key: &Q) -> &Self::Output {
        self.map.get(key).unwrap_or(&0.0)
    }
}

impl<K: Eq + Hash> FromIterator<(K, f32)> for Counter<K> {
    fn from_iter<T: IntoIterator<Item = (K, f32)>>(iter: T) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

impl<'a, K: Eq + Hash> IntoIterator for &'a Counter<K> {
    type Item = (&'a K, &'a f32);
    type IntoIter = hash_map::Iter<'a, K, f32>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_defaults_to_zero() {
        let mut counter: Counter<&str> = Counter::new();
        assert_eq!(counter.get("missing"), 0.0, "missing key reads zero");
        assert_eq!(counter[&"missing"], 0.0, "index reads zero");
        assert!(counter.is_empty(), "reads do not insert");

        counter.add("a", 1.5);
        counter.add("a", 1.0);
        assert_eq!(counter.get("a"), 2.5, "add accumulates");
        assert_eq!(counter.insert("a", -1.0), 2.5, "insert returns previous value");
        assert_eq!(counter.insert("b", 3.0), 0.0, "insert of new key returns zero");
        assert_eq!(counter.len(), 2);

        counter.clear();
        assert!(counter.is_empty());
        assert_eq!(counter.get("a"), 0.0);
    }

    #[test]
    fn counter_dot_product() {
        let weights: Counter<&str> = [("x", 2.0), ("y", -1.0)].into_iter().collect();
        let features: HashMap<&str, f32> = [("x", 0.5), ("y", 3.0), ("z", 10.0)].into();
        assert_eq!(weights.dot(&features), 2.0 * 0.5 - 3.0, "unseen keys have zero weight");
        assert_eq!(weights.dot(&HashMap::new()), 0.0);
    }

    #[test]
    fn counter_max_abs_diff() {
        let a: Counter<u8> = [(0, 1.0), (1, 2.0)].into_iter().collect();
        let b: Counter<u8> = [(1, 2.5), (2, -3.0)].into_iter().collect();
        assert_eq!(a.max_abs_diff(&b), 3.0);
        assert_eq!(a.max_abs_diff(&a), 0.0);
    }
}
