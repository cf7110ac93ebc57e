//! An ordered map backed by an unbalanced binary search tree.
//!
//! [`TreeMap`] maps unique keys to values and answers ordered queries on its keys:
//!
//! - [`min_key`](TreeMap::min_key) / [`max_key`](TreeMap::max_key) - the smallest and largest key
//! - [`floor_key`](TreeMap::floor_key) - the greatest key less than or equal to a query
//! - [`ceil_key`](TreeMap::ceil_key) - the least key greater than or equal to a query
//!
//! Operations that can be refused return a [`Result`] carrying a [`TreeMapError`], so
//! callers can tell an empty map from a missing key or a duplicate insertion.
//!
//! # Example
//!
//! ```
//! use treemap::{TreeMap, TreeMapError};
//!
//! let mut grades = TreeMap::new();
//! grades.insert(90, 'A')?;
//! grades.insert(80, 'B')?;
//! grades.insert(70, 'C')?;
//!
//! assert_eq!(grades.get(&80)?, &'B');
//! assert_eq!(grades.insert(80, 'b'), Err(TreeMapError::DuplicateKey));
//!
//! // The best grade a score of 85 has earned.
//! assert_eq!(grades.floor_key(&85)?, &80);
//! assert_eq!(grades.ceil_key(&95), Err(TreeMapError::NoCeilExists));
//! # Ok::<(), TreeMapError>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Typed errors** - Each refusal is a distinct [`TreeMapError`] variant
//! - **No recursion** - Every traversal is an explicit loop, so degenerate trees cannot
//!   overflow the stack
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to their children by index. The tree is never
//! rebalanced: its shape is determined by insertion order alone, so operations are
//! O(log n) on average and O(n) in the worst case (for example, keys inserted in sorted
//! order).

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod tree_map;

pub use error::{Result, TreeMapError};
pub use tree_map::TreeMap;
