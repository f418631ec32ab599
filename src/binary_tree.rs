//! This module implements a simple binary tree stored in an arena.
//!
//! Nodes live in a `Vec` and refer to their children by index, so a tree owns all of its nodes
//! without reference-counted links. Levels are not stored; [`BinaryTree::levels`] derives them
//! with a breadth-first walk from the root.

/// The node of the binary tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinaryTreeNode<T> {
    /// The value stored in the node.
    pub value: T,
    index: TreeIndex,
    left: Option<TreeIndex>,
    right: Option<TreeIndex>,
}

impl<T> BinaryTreeNode<T> {
    /// Generate a node with the given value.
    ///
    /// # Example
    /// ```
    /// use dtree::binary_tree::BinaryTreeNode;
    /// let root = BinaryTreeNode::new(10.0);
    /// println!("{}", root.value);
    /// ```
    pub fn new(value: T) -> Self {
        BinaryTreeNode {
            value,
            index: 0,
            left: None,
            right: None,
        }
    }

    /// The index of this node in its tree.
    pub fn index(&self) -> TreeIndex {
        self.index
    }

    pub fn left(&self) -> Option<TreeIndex> {
        self.left
    }

    pub fn right(&self) -> Option<TreeIndex> {
        self.right
    }

    /// A node without children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// The index to retrive the tree node. Always get the index value from [`BinaryTree`] APIs.
/// Don't directly assign a value to an index.
pub type TreeIndex = usize;

/// The binary tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinaryTree<T> {
    tree: Vec<BinaryTreeNode<T>>,
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BinaryTree<T> {
    /// build a new empty binary tree
    pub fn new() -> Self {
        BinaryTree { tree: Vec::new() }
    }

    /// Add a node as the root node. Return the index of the root node.
    ///
    /// # Example
    /// ``` rust
    /// use dtree::binary_tree::{BinaryTree, BinaryTreeNode};
    /// let mut tree: BinaryTree<f32> = BinaryTree::new();
    /// let root_index = tree.add_root(BinaryTreeNode::new(10.0));
    /// assert_eq!(root_index, tree.get_root_index());
    /// ```
    pub fn add_root(&mut self, root: BinaryTreeNode<T>) -> TreeIndex {
        self.add_node(None, root)
    }

    /// Return the index of the root node.
    /// Call this API after inserting root node.
    pub fn get_root_index(&self) -> TreeIndex {
        0
    }

    pub fn get_root(&self) -> Option<&BinaryTreeNode<T>> {
        self.tree.first()
    }

    /// Return the left child of the given `node`
    pub fn get_left_child(&self, node: &BinaryTreeNode<T>) -> Option<&BinaryTreeNode<T>> {
        node.left.and_then(|i| self.tree.get(i))
    }

    /// Return the right child of the given `node`
    pub fn get_right_child(&self, node: &BinaryTreeNode<T>) -> Option<&BinaryTreeNode<T>> {
        node.right.and_then(|i| self.tree.get(i))
    }

    /// Return the node with the given index
    pub fn get_node(&self, index: TreeIndex) -> Option<&BinaryTreeNode<T>> {
        self.tree.get(index)
    }

    /// Return the muttable reference of a node with the given index
    pub fn get_node_mut(&mut self, index: TreeIndex) -> Option<&mut BinaryTreeNode<T>> {
        self.tree.get_mut(index)
    }

    /// Add a node as the left child of a given `parent` node. Return the index of the added node.
    ///
    /// # Example
    /// ``` rust
    /// use dtree::binary_tree::{BinaryTree, BinaryTreeNode};
    /// let mut tree: BinaryTree<f32> = BinaryTree::new();
    /// let root_index = tree.add_root(BinaryTreeNode::new(10.0));
    /// let _ = tree.add_left_node(root_index, BinaryTreeNode::new(5.0));
    /// let root = tree.get_node(root_index).expect("Didn't find root node");
    /// let left_node = tree.get_left_child(root).expect("Didn't find left child");
    /// assert_eq!(5.0, left_node.value);
    /// ```
    pub fn add_left_node(&mut self, parent: TreeIndex, child: BinaryTreeNode<T>) -> TreeIndex {
        self.add_node(Some((parent, true)), child)
    }

    /// Add a node as the right child of a given `parent` node. Return the index of the added node.
    pub fn add_right_node(&mut self, parent: TreeIndex, child: BinaryTreeNode<T>) -> TreeIndex {
        self.add_node(Some((parent, false)), child)
    }

    /// Push `child` into the arena and link it to `parent`: `(index, true)` for a left child,
    /// `(index, false)` for a right child, `None` for the root.
    fn add_node(&mut self, parent: Option<(TreeIndex, bool)>, mut child: BinaryTreeNode<T>) -> TreeIndex {
        let position = self.tree.len();
        child.index = position;
        self.tree.push(child);

        if let Some((parent, is_left)) = parent {
            if let Some(n) = self.tree.get_mut(parent) {
                if is_left {
                    n.left = Some(position);
                } else {
                    n.right = Some(position);
                }
            }
        }
        position
    }

    /// Node indices grouped by depth, root first, left before right within a level.
    ///
    /// # Example
    /// ```
    /// use dtree::binary_tree::{BinaryTree, BinaryTreeNode};
    /// let mut tree: BinaryTree<i32> = BinaryTree::new();
    /// let root = tree.add_root(BinaryTreeNode::new(1));
    /// let l = tree.add_left_node(root, BinaryTreeNode::new(2));
    /// let r = tree.add_right_node(root, BinaryTreeNode::new(3));
    /// let rl = tree.add_left_node(r, BinaryTreeNode::new(4));
    /// assert_eq!(tree.levels(), vec![vec![root], vec![l, r], vec![rl]]);
    /// ```
    pub fn levels(&self) -> Vec<Vec<TreeIndex>> {
        let mut levels: Vec<Vec<TreeIndex>> = Vec::new();
        if self.tree.is_empty() {
            return levels;
        }
        let mut current = vec![self.get_root_index()];
        while !current.is_empty() {
            let mut next = Vec::new();
            for index in current.iter() {
                let node = &self.tree[*index];
                next.extend(node.left);
                next.extend(node.right);
            }
            levels.push(current);
            current = next;
        }
        levels
    }

    /// Iterate over all nodes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, BinaryTreeNode<T>> {
        self.tree.iter()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_tree() {
        let mut tree: BinaryTree<f32> = BinaryTree::new();
        let root_index = tree.add_root(BinaryTreeNode::new(10.0));

        let n1_index = tree.add_left_node(root_index, BinaryTreeNode::new(5.0));
        let n2_index = tree.add_right_node(root_index, BinaryTreeNode::new(6.0));
        tree.add_left_node(n2_index, BinaryTreeNode::new(7.0));
        tree.add_right_node(n2_index, BinaryTreeNode::new(8.0));
        tree.add_left_node(n1_index, BinaryTreeNode::new(9.0));

        assert_eq!(tree.len(), 6);
        let root = tree.get_root().unwrap();
        assert!(!root.is_leaf());
        let right = tree.get_right_child(root).unwrap();
        assert_eq!(right.value, 6.0);
        assert_eq!(tree.get_left_child(right).unwrap().value, 7.0);

        let values: Vec<Vec<f32>> = tree
            .levels()
            .iter()
            .map(|level| level.iter().map(|i| tree.get_node(*i).unwrap().value).collect())
            .collect();
        assert_eq!(
            values,
            vec![vec![10.0], vec![5.0, 6.0], vec![9.0, 7.0, 8.0]]
        );
    }

    #[test]
    fn empty_tree() {
        let tree: BinaryTree<u8> = BinaryTree::new();
        assert!(tree.is_empty());
        assert!(tree.get_root().is_none());
        assert!(tree.levels().is_empty());
    }

    #[test]
    fn node_indices() {
        let mut tree: BinaryTree<&str> = BinaryTree::new();
        let root = tree.add_root(BinaryTreeNode::new("root"));
        let leaf = tree.add_left_node(root, BinaryTreeNode::new("leaf"));
        let node = tree.get_node(leaf).unwrap();
        assert_eq!(node.index(), leaf);
        assert!(node.is_leaf());
        assert_eq!(tree.get_node(root).unwrap().left(), Some(leaf));
        assert_eq!(tree.get_node(root).unwrap().right(), None);
        tree.get_node_mut(leaf).unwrap().value = "changed";
        assert_eq!(tree.iter().map(|n| n.value).collect::<Vec<_>>(), vec!["root", "changed"]);
    }
}
