/// Defines an index newtype together with a vector that can only be indexed by it.
///
/// The diagram hands out several kinds of indices (sites, vertices, edges)
/// that are all `usize` underneath; keeping them apart in the type system
/// catches the classic "looked up an edge with a vertex index" mistake.
macro_rules! typed_vec {
    ($(#[$idx_meta:meta])* $idx_name:ident, $(#[$vec_meta:meta])* $vec_name:ident, $dbg_prefix:expr) => {
        $(#[$idx_meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $idx_name(pub usize);

        impl std::fmt::Debug for $idx_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}_{}", $dbg_prefix, self.0)
            }
        }

        $(#[$vec_meta])*
        #[derive(Clone, PartialEq, serde::Serialize)]
        #[serde(transparent)]
        pub struct $vec_name<T> {
            inner: Vec<T>,
        }

        #[allow(dead_code)]
        impl<T> $vec_name<T> {
            /// Wraps a plain vector.
            pub fn from_vec(vec: Vec<T>) -> Self {
                Self { inner: vec }
            }

            /// Creates an empty vector with room for `cap` elements.
            pub fn with_capacity(cap: usize) -> Self {
                Self {
                    inner: Vec::with_capacity(cap),
                }
            }

            /// Returns an iterator over all indices into this vector.
            pub fn indices(&self) -> impl Iterator<Item = $idx_name> {
                (0..self.inner.len()).map($idx_name)
            }

            /// The number of elements.
            pub fn len(&self) -> usize {
                self.inner.len()
            }

            /// Are we empty?
            pub fn is_empty(&self) -> bool {
                self.inner.is_empty()
            }

            /// Adds a new element, returning its index.
            pub fn push(&mut self, elt: T) -> $idx_name {
                self.inner.push(elt);
                $idx_name(self.inner.len() - 1)
            }

            /// Returns the element at `idx`, if it exists.
            pub fn get(&self, idx: $idx_name) -> Option<&T> {
                self.inner.get(idx.0)
            }

            /// Returns an iterator over indices and elements.
            pub fn iter(&self) -> impl Iterator<Item = ($idx_name, &T)> + '_ {
                self.inner
                    .iter()
                    .enumerate()
                    .map(|(idx, t)| ($idx_name(idx), t))
            }

            /// Returns an iterator over the elements alone.
            pub fn values(&self) -> std::slice::Iter<'_, T> {
                self.inner.iter()
            }

            /// Views the elements as a slice, in index order.
            pub fn as_slice(&self) -> &[T] {
                &self.inner
            }
        }

        impl<T> Default for $vec_name<T> {
            fn default() -> Self {
                Self { inner: Vec::new() }
            }
        }

        impl<T> FromIterator<T> for $vec_name<T> {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                Self {
                    inner: iter.into_iter().collect(),
                }
            }
        }

        impl<T> std::ops::Index<$idx_name> for $vec_name<T> {
            type Output = T;

            fn index(&self, index: $idx_name) -> &Self::Output {
                &self.inner[index.0]
            }
        }

        impl<T> std::ops::IndexMut<$idx_name> for $vec_name<T> {
            fn index_mut(&mut self, index: $idx_name) -> &mut T {
                &mut self.inner[index.0]
            }
        }

        impl<T: std::fmt::Debug> std::fmt::Debug for $vec_name<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut map = f.debug_map();
                for (idx, elt) in self.iter() {
                    map.entry(&idx, elt);
                }
                map.finish()
            }
        }
    };
}
