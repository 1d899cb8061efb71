//  DATA.rs
//    by Milkdrinkers
//
//  Created:
//    12 Feb 2025, 09:31:26
//  Last edited:
//    21 Aug 2025, 10:44:09
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines [`FileData`], the configuration tree addressed by dotted
//!   key paths (`a.b.c`). Every nesting level is one path segment.
//

use crate::settings::DataType;
use crate::value::{Map, Value};


/***** HELPER FUNCTIONS *****/
/// Walks the given path into the given map, returning the addressed value.
fn get_path<'m>(map: &'m Map, parts: &[&str]) -> Option<&'m Value> {
    if parts.len() == 1 {
        return map.get(parts[0]);
    }
    match map.get(parts[0]) {
        Some(Value::Map(child)) => get_path(child, &parts[1..]),
        _ => None,
    }
}

/// Removes the addressed value, pruning intermediate maps that become empty.
fn remove_path(map: &mut Map, parts: &[&str]) {
    if parts.len() == 1 {
        map.shift_remove(parts[0]);
        return;
    }
    if let Some(Value::Map(child)) = map.get_mut(parts[0]) {
        remove_path(child, &parts[1..]);
        if child.is_empty() {
            map.shift_remove(parts[0]);
        }
    }
}

/// Collects the dotted keys of all leaf values below the given map.
fn collect_keys(map: &Map, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
        match value {
            Value::Map(child) => collect_keys(child, &path, out),
            _ => out.push(path),
        }
    }
}

/// Counts all entries of the given map, nested ones included.
fn count_entries(map: &Map) -> usize {
    let mut size: usize = map.len();
    for value in map.values() {
        if let Value::Map(child) = value {
            size += count_entries(child);
        }
    }
    size
}





/***** LIBRARY *****/
/// The in-memory configuration tree of a flat file.
///
/// Wraps the root [`Map`] and resolves dotted key paths against it, creating and
/// pruning intermediate maps as values come and go.
#[derive(Clone, Debug, PartialEq)]
pub struct FileData {
    /// The root of the tree.
    root: Map,
    /// The ordering guarantee this tree was created with.
    data_type: DataType,
}

impl FileData {
    /// Creates an empty tree with the given ordering guarantee.
    #[inline]
    pub fn new(data_type: DataType) -> Self { Self { root: Map::new(), data_type } }

    /// Creates a tree over the given root map.
    #[inline]
    pub fn from_map(map: Map, data_type: DataType) -> Self { Self { root: map, data_type } }

    /// Returns the ordering guarantee of this tree.
    #[inline]
    pub fn data_type(&self) -> DataType { self.data_type }



    /// Returns the value at the given dotted key path, or [`None`] if any segment is
    /// missing or a non-map stands in the middle of the path.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let parts: Vec<&str> = key.split('.').collect();
        get_path(&self.root, &parts)
    }

    /// Assigns a value to the given dotted key path.
    ///
    /// Intermediate maps are created as needed; a non-map value in the middle of the
    /// path is replaced by a map.
    pub fn insert(&mut self, key: &str, value: Value) {
        let parts: Vec<&str> = key.split('.').collect();
        let mut map: &mut Map = &mut self.root;
        for part in &parts[..parts.len() - 1] {
            let entry = map.entry((*part).into()).or_insert_with(|| Value::Map(Map::new()));
            if !entry.is_map() {
                *entry = Value::Map(Map::new());
            }
            map = match entry {
                Value::Map(child) => child,
                _ => unreachable!(),
            };
        }
        map.insert(parts[parts.len() - 1].into(), value);
    }

    /// Returns whether the given dotted key path exists.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool { self.get(key).is_some() }

    /// Removes the given dotted key path if it exists.
    ///
    /// Intermediate maps that become empty by the removal are removed as well.
    pub fn remove(&mut self, key: &str) {
        let parts: Vec<&str> = key.split('.').collect();
        remove_path(&mut self.root, &parts);
    }



    /// Returns the keys of the top layer of the tree.
    #[inline]
    pub fn single_layer_keys(&self) -> Vec<String> { self.root.keys().cloned().collect() }

    /// Returns the keys of the layer below the given key, or the empty set if the key
    /// does not exist or does not hold a map.
    pub fn single_layer_keys_of(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Map(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the dotted keys of all leaf values in the tree.
    pub fn keys(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        collect_keys(&self.root, "", &mut out);
        out
    }

    /// Returns the dotted keys of all leaf values below the given key, or the empty
    /// set if the key does not exist or does not hold a map.
    pub fn keys_of(&self, key: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        if let Some(Value::Map(map)) = self.get(key) {
            collect_keys(map, "", &mut out);
        }
        out
    }

    /// Returns the size of the top layer of the tree.
    #[inline]
    pub fn single_layer_size(&self) -> usize { self.root.len() }

    /// Returns the number of entries in the tree, nested ones included.
    #[inline]
    pub fn size(&self) -> usize { count_entries(&self.root) }

    /// Returns whether the tree holds no entries at all.
    #[inline]
    pub fn is_empty(&self) -> bool { self.root.is_empty() }



    /// Drops all entries.
    #[inline]
    pub fn clear(&mut self) { self.root.clear(); }

    /// Replaces the contents of the tree with the given map.
    #[inline]
    pub fn load_data(&mut self, map: Map) {
        self.root = map;
    }

    /// Merges the given map into the top layer of the tree. Colliding keys take the
    /// incoming value.
    #[inline]
    pub fn put_all(&mut self, map: Map) {
        self.root.extend(map);
    }

    /// Returns the root map.
    #[inline]
    pub fn to_map(&self) -> &Map { &self.root }

    /// Consumes the tree into its root map.
    #[inline]
    pub fn into_map(self) -> Map { self.root }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;

    /// Inserting along a dotted path creates the intermediate maps.
    #[test]
    fn insert_nested() {
        let mut data = FileData::new(DataType::Unsorted);
        data.insert("database.port", Value::Int(5432));
        data.insert("database.host", Value::String("localhost".into()));

        assert_eq!(data.get("database.port"), Some(&Value::Int(5432)));
        assert_eq!(data.get("database.host"), Some(&Value::String("localhost".into())));
        assert!(data.contains_key("database"));
        assert!(!data.contains_key("database.user"));
        assert_eq!(data.single_layer_size(), 1);
        assert_eq!(data.size(), 3);
    }

    /// A scalar in the middle of the path is replaced by a map on insert, and lookups
    /// through it return nothing before that.
    #[test]
    fn insert_through_scalar() {
        let mut data = FileData::new(DataType::Unsorted);
        data.insert("a", Value::Int(1));
        assert_eq!(data.get("a.b"), None);

        data.insert("a.b", Value::Int(2));
        assert_eq!(data.get("a.b"), Some(&Value::Int(2)));
        assert_eq!(data.get("a"), Some(&Value::Map(Map::from_iter([("b".to_string(), Value::Int(2))]))));
    }

    /// Removing the last child of a nested map prunes the empty parents.
    #[test]
    fn remove_prunes_empty_parents() {
        let mut data = FileData::new(DataType::Unsorted);
        data.insert("a.b.c", Value::Int(1));
        data.insert("a.d", Value::Int(2));

        data.remove("a.b.c");
        assert!(!data.contains_key("a.b"));
        assert!(data.contains_key("a.d"));

        data.remove("a.d");
        assert!(data.is_empty());
    }

    /// Top-layer merge: colliding keys take the incoming value.
    #[test]
    fn put_all_overwrites_collisions() {
        let mut data = FileData::new(DataType::Unsorted);
        data.insert("a", Value::Int(1));
        data.insert("b", Value::Int(2));

        data.put_all(Map::from_iter([("b".to_string(), Value::Int(20)), ("c".to_string(), Value::Int(3))]));
        assert_eq!(data.get("a"), Some(&Value::Int(1)));
        assert_eq!(data.get("b"), Some(&Value::Int(20)));
        assert_eq!(data.get("c"), Some(&Value::Int(3)));
    }

    /// Key sets: single layer vs. all dotted leaves.
    #[test]
    fn key_sets() {
        let mut data = FileData::new(DataType::Sorted);
        data.insert("app.name", Value::String("Test".into()));
        data.insert("app.debug", Value::Bool(true));
        data.insert("port", Value::Int(80));

        assert_eq!(data.single_layer_keys(), vec!["app".to_string(), "port".to_string()]);
        assert_eq!(data.single_layer_keys_of("app"), vec!["name".to_string(), "debug".to_string()]);
        assert_eq!(data.keys(), vec!["app.name".to_string(), "app.debug".to_string(), "port".to_string()]);
        assert_eq!(data.keys_of("app"), vec!["name".to_string(), "debug".to_string()]);
        assert_eq!(data.keys_of("port"), Vec::<String>::new());
    }
}
