/// A node of the traversal.
///
/// A `Node` is the character range `[start, end)` of the input together
/// with the depth (`level`) and accumulator (`q`) it was reached with.
/// Ranges are in characters, not bytes.
///
/// ## Invariants
/// - `start <= end`
/// - Children are only built from nodes longer than 2 characters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Node {
	pub start: usize,
	pub end: usize,
	pub level: usize,
	pub q: i64,
}

impl Node {
	/// Creates the root node spanning `len` characters.
	pub fn root(len: usize, level: usize, q: i64) -> Self {
		Self { start: 0, end: len, level, q }
	}

	pub fn len(&self) -> usize {
		self.end - self.start
	}

	/// Nodes of 2 characters or less have no children.
	pub fn is_leaf(&self) -> bool {
		self.len() <= 2
	}

	/// Drops the last character. The accumulator is unchanged.
	pub fn left(&self) -> Self {
		Self {
			start: self.start,
			end: self.end - 1,
			level: self.level.saturating_add(1),
			q: self.q,
		}
	}

	/// Drops the first character and adds 2 to the accumulator.
	pub fn right(&self) -> Self {
		Self {
			start: self.start + 1,
			end: self.end,
			level: self.level.saturating_add(1),
			q: self.q.saturating_add(2),
		}
	}

	/// Gate of the right branch: `q + 2 >= (level + 1) * 2`.
	///
	/// `q` and `level` are the values of this node (the parent),
	/// not the ones of the right child.
	pub fn right_allowed(&self) -> bool {
		let next_level = i64::try_from(self.level.saturating_add(1)).unwrap_or(i64::MAX);
		self.q.saturating_add(2) >= next_level.saturating_mul(2)
	}
}

/// A unit of pending work on the traversal stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Frame {
	/// Yield the node, then schedule its children.
	Visit(Node),
	/// The left subtree of this node is exhausted: trace and gate its right child.
	RightBranch(Node),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn children_shrink_from_each_end() {
		let node = Node::root(5, 0, 1);
		assert_eq!(node.left(), Node { start: 0, end: 4, level: 1, q: 1 });
		assert_eq!(node.right(), Node { start: 1, end: 5, level: 1, q: 3 });
	}

	#[test]
	fn leaves_are_at_most_two_chars() {
		assert!(Node::root(0, 0, 1).is_leaf());
		assert!(Node::root(2, 0, 1).is_leaf());
		assert!(!Node::root(3, 0, 1).is_leaf());
	}

	#[test]
	fn gate_with_default_accumulator() {
		// q = 1: 3 >= 2 at level 0, 3 < 4 at level 1
		assert!(Node::root(5, 0, 1).right_allowed());
		assert!(!Node::root(5, 1, 1).right_allowed());
		// q = 3: 5 >= 4 at level 1, 5 < 6 at level 2
		assert!(Node::root(5, 1, 3).right_allowed());
		assert!(!Node::root(5, 2, 3).right_allowed());
	}

	#[test]
	fn gate_boundary_is_inclusive() {
		// q + 2 == (level + 1) * 2
		assert!(Node::root(5, 1, 2).right_allowed());
		assert!(!Node::root(5, 1, 1).right_allowed());
	}

	#[test]
	fn gate_handles_extreme_values() {
		assert!(!Node::root(5, 0, i64::MIN).right_allowed());
		assert!(Node::root(5, 0, i64::MAX).right_allowed());
		assert!(!Node::root(5, usize::MAX, 1).right_allowed());
	}
}
