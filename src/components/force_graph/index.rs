//! Ranking of parallel edges.
//!
//! Runs once after load. Links are sorted by `(source, target)`, each link
//! gets a 1-based `linkindex` among the links joining the same pair of nodes,
//! and the highest rank seen per unordered pair is recorded as that pair's
//! parallel-edge count.
//!
//! A pair's direction is the one it was first recorded in. Links running the
//! other way are marked `reversed` so their curves can bulge to the opposite
//! side: an arc from `p` to `q` with sweep `s` traces the same curve as an arc
//! from `q` to `p` with sweep `!s`.

use std::collections::{HashMap, HashSet};

use log::warn;

use super::types::GraphLink;

/// A link together with its rank among its parallel links.
#[derive(Clone, Debug)]
pub struct IndexedLink {
	#[allow(missing_docs)]
	pub link: GraphLink,
	/// 1-based rank among the links joining the same two nodes.
	pub linkindex: usize,
	/// Position in the input list, before sorting.
	pub position: usize,
	/// Runs against the direction its pair was first recorded in.
	pub reversed: bool,
	key: String,
}

impl IndexedLink {
	/// Scene identity, unique within one [`LinkIndex`].
	pub fn key(&self) -> String {
		self.key.clone()
	}
}

/// Scene keys in input order. A link whose key is already taken gets its
/// input position appended.
fn unique_keys(links: &[GraphLink]) -> Vec<String> {
	let mut seen = HashSet::new();
	links
		.iter()
		.enumerate()
		.map(|(position, link)| {
			let mut key = link.key(position);
			if seen.contains(&key) {
				warn!("duplicate link {}, keyed by position {}", key, position);
				key = format!("{}#{}", key, position);
			}
			seen.insert(key.clone());
			key
		})
		.collect()
}

/// Parallel-edge count per unordered node pair.
#[derive(Clone, Debug, Default)]
pub struct PairCounts {
	counts: HashMap<(String, String), usize>,
}

impl PairCounts {
	/// The pair's key as first recorded, `(target, source)` if that already
	/// exists, `(source, target)` otherwise.
	fn canonical_key(&self, source: &str, target: &str) -> (String, String) {
		let reversed = (target.to_owned(), source.to_owned());
		if self.counts.contains_key(&reversed) {
			reversed
		} else {
			(source.to_owned(), target.to_owned())
		}
	}

	fn get(&self, u: &str, v: &str) -> Option<usize> {
		self.counts.get(&(u.to_owned(), v.to_owned())).copied()
	}

	/// Number of links between `u` and `v` in either direction. Pairs that were
	/// never indexed count as a single link.
	pub fn total_parallel_count(&self, u: &str, v: &str) -> usize {
		self.get(u, v).max(self.get(v, u)).unwrap_or(1)
	}

	/// Number of node pairs recorded.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	#[allow(missing_docs)]
	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}
}

/// Ranked links plus the per-pair counts, handed to the geometry resolvers.
#[derive(Clone, Debug, Default)]
pub struct LinkIndex {
	/// Links in ranking order.
	pub links: Vec<IndexedLink>,
	#[allow(missing_docs)]
	pub counts: PairCounts,
}

impl LinkIndex {
	/// Parallel-edge count of the pair `link` belongs to.
	pub fn total_parallel_count(&self, link: &GraphLink) -> usize {
		self.counts.total_parallel_count(&link.source, &link.target)
	}
}

/// Stable sort by `(source, target)`.
pub fn sort_links(links: &mut [IndexedLink]) {
	links.sort_by(|a, b| {
		(&a.link.source, &a.link.target).cmp(&(&b.link.source, &b.link.target))
	});
}

/// Sort and rank `links`.
///
/// Ranks continue across both directions of a pair, so a pair joined by `k`
/// links gets ranks `1..=k` and a count of `k`.
pub fn index_links(links: &[GraphLink]) -> LinkIndex {
	let mut indexed: Vec<IndexedLink> = links
		.iter()
		.cloned()
		.zip(unique_keys(links))
		.enumerate()
		.map(|(position, (link, key))| IndexedLink {
			link,
			linkindex: 0,
			position,
			reversed: false,
			key,
		})
		.collect();
	sort_links(&mut indexed);

	let mut counts = PairCounts::default();
	for entry in &mut indexed {
		let key = counts.canonical_key(&entry.link.source, &entry.link.target);
		let rank = counts.counts.get(&key).copied().unwrap_or(0) + 1;
		entry.linkindex = rank;
		entry.reversed = key.0 != entry.link.source;
		counts.counts.insert(key, rank);
	}

	LinkIndex {
		links: indexed,
		counts,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ranks(index: &LinkIndex) -> Vec<String> {
		index
			.links
			.iter()
			.map(|l| format!("{}{}{}", l.link.source, l.link.target, l.linkindex))
			.collect()
	}

	#[test]
	fn test_sorted_by_source_then_target() {
		let index = index_links(&[
			GraphLink::new("c", "a"),
			GraphLink::new("a", "c"),
			GraphLink::new("a", "b"),
			GraphLink::new("b", "a"),
		]);
		let order: Vec<_> = index
			.links
			.iter()
			.map(|l| format!("{}{}", l.link.source, l.link.target))
			.collect();
		assert_eq!(order, ["ab", "ac", "ba", "ca"]);
	}

	#[test]
	fn test_same_direction_ranks() {
		let index = index_links(&[
			GraphLink::new("a", "b").named("x"),
			GraphLink::new("b", "c"),
			GraphLink::new("a", "b").named("y"),
			GraphLink::new("a", "b").named("z"),
		]);
		assert_eq!(ranks(&index), ["ab1", "ab2", "ab3", "bc1"]);
		// sort is stable, so input order decides the rank inside a run
		let names: Vec<_> = index.links.iter().filter_map(|l| l.link.name.clone()).collect();
		assert_eq!(names, ["x", "y", "z"]);
		assert_eq!(index.counts.total_parallel_count("a", "b"), 3);
		assert_eq!(index.counts.total_parallel_count("b", "a"), 3);
		assert_eq!(index.counts.total_parallel_count("b", "c"), 1);
	}

	#[test]
	fn test_ranks_contiguous_across_directions() {
		let index = index_links(&[
			GraphLink::new("b", "a"),
			GraphLink::new("a", "b"),
			GraphLink::new("a", "c"),
			GraphLink::new("b", "a"),
			GraphLink::new("a", "b"),
		]);

		let mut pair_ranks: Vec<usize> = index
			.links
			.iter()
			.filter(|l| l.link.source != "a" || l.link.target != "c")
			.map(|l| l.linkindex)
			.collect();
		pair_ranks.sort();
		assert_eq!(pair_ranks, [1, 2, 3, 4]);
		assert_eq!(index.counts.total_parallel_count("a", "b"), 4);
		assert_eq!(index.counts.total_parallel_count("b", "a"), 4);
		assert_eq!(index.counts.total_parallel_count("a", "c"), 1);
		assert_eq!(index.counts.len(), 2);

		let reversed: Vec<_> = index.links.iter().map(|l| l.reversed).collect();
		assert_eq!(reversed, [false, false, false, true, true]);
	}

	#[test]
	fn test_duplicate_keys_are_made_unique() {
		let index = index_links(&[
			GraphLink::new("a", "b").with_id("1"),
			GraphLink::new("a", "b").with_id("1"),
			GraphLink::new("a", "b").with_id("2"),
		]);
		let keys: Vec<_> = index.links.iter().map(IndexedLink::key).collect();
		assert_eq!(keys, ["a-1-b", "a-1-b#1", "a-2-b"]);
	}

	#[test]
	fn test_missing_pair_counts_as_single() {
		let index = index_links(&[GraphLink::new("a", "b")]);
		assert_eq!(index.counts.total_parallel_count("x", "y"), 1);
		assert!(PairCounts::default().is_empty());
	}

	#[test]
	fn test_positions_survive_sorting() {
		let index = index_links(&[GraphLink::new("z", "a"), GraphLink::new("a", "z")]);
		assert_eq!(index.links[0].position, 1);
		assert_eq!(index.links[0].key(), "a-#1-z");
		assert_eq!(index.links[1].position, 0);
	}
}
