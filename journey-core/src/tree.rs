//! Rose tree implementation for shrinking test values.
//!
//! Children are produced on demand. Generating a value only computes the
//! root; a shrink level is computed when the runner asks for it and is
//! consumed one candidate at a time.

use crate::shrink;
use std::fmt;
use std::rc::Rc;

/// A lazily produced level of shrink candidates.
pub type Forest<T> = Box<dyn Iterator<Item = Tree<T>>>;

/// A custom shrink function: candidates for a value, most aggressive first.
pub type ShrinkFn<T> = Rc<dyn Fn(&T) -> Box<dyn Iterator<Item = T>>>;

/// A rose tree containing a value and its shrink possibilities.
pub struct Tree<T> {
    pub value: T,
    children: Rc<dyn Fn() -> Forest<T>>,
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Tree {
            value: self.value.clone(),
            children: Rc::clone(&self.children),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Tree<T> {
    /// Create a new tree with the given value and no children.
    pub fn singleton(value: T) -> Self {
        Tree {
            value,
            children: lazy(|| Box::new(std::iter::empty())),
        }
    }

    /// Create a new tree with the given value and a fixed set of children.
    pub fn with_children(value: T, children: Vec<Tree<T>>) -> Self
    where
        T: Clone,
    {
        Tree {
            value,
            children: lazy(move || Box::new(children.clone().into_iter())),
        }
    }

    /// Create a tree whose children come from a lazy producer.
    pub fn from_forest<F>(value: T, children: F) -> Self
    where
        F: Fn() -> Forest<T> + 'static,
    {
        Tree {
            value,
            children: Rc::new(children),
        }
    }

    /// Build a tree by repeatedly applying a shrink function.
    pub fn unfold<F, I>(value: T, shrink: F) -> Self
    where
        T: Clone,
        F: Fn(&T) -> I + 'static,
        I: Iterator<Item = T> + 'static,
    {
        Tree::unfold_with(value, into_shrink_fn(shrink))
    }

    pub(crate) fn unfold_with(value: T, shrink: ShrinkFn<T>) -> Self
    where
        T: Clone,
    {
        let seed = value.clone();
        Tree {
            value,
            children: lazy(move || {
                let next = Rc::clone(&shrink);
                Box::new(shrink(&seed).map(move |x| Tree::unfold_with(x, Rc::clone(&next))))
            }),
        }
    }

    /// The immediate shrink candidates, in order.
    pub fn children(&self) -> Forest<T> {
        (self.children)()
    }

    /// Values of the immediate shrink candidates.
    pub fn shrinks(&self) -> Vec<T> {
        self.children().map(|child| child.value).collect()
    }

    /// Check if the tree has any children (shrinks).
    pub fn has_shrinks(&self) -> bool {
        self.children().next().is_some()
    }

    /// Map a function over the tree values.
    pub fn map<U, F>(self, f: F) -> Tree<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        self.map_with(Rc::new(f))
    }

    fn map_with<U: 'static>(self, f: Rc<dyn Fn(T) -> U>) -> Tree<U> {
        let Tree { value, children } = self;
        let value = f(value);
        Tree {
            value,
            children: lazy(move || {
                let f = Rc::clone(&f);
                Box::new(children().map(move |child| child.map_with(Rc::clone(&f))))
            }),
        }
    }

    /// Feed the value into a tree-producing function.
    ///
    /// Shrinks of the outer value come first, each re-running `f`; the
    /// shrinks of the inner tree follow.
    pub fn bind<U, F>(self, f: F) -> Tree<U>
    where
        U: 'static,
        F: Fn(T) -> Tree<U> + 'static,
    {
        self.bind_with(Rc::new(f))
    }

    fn bind_with<U: 'static>(self, f: Rc<dyn Fn(T) -> Tree<U>>) -> Tree<U> {
        let Tree {
            value,
            children: outer,
        } = self;
        let Tree {
            value,
            children: inner,
        } = f(value);
        Tree {
            value,
            children: lazy(move || {
                let f = Rc::clone(&f);
                Box::new(
                    outer()
                        .map(move |child| child.bind_with(Rc::clone(&f)))
                        .chain(inner()),
                )
            }),
        }
    }

    /// Keep the existing shrinks and append the ones produced by `shrink`,
    /// at every level of the tree.
    pub fn expand<F, I>(self, shrink: F) -> Tree<T>
    where
        T: Clone,
        F: Fn(&T) -> I + 'static,
        I: Iterator<Item = T> + 'static,
    {
        self.expand_with(into_shrink_fn(shrink))
    }

    pub(crate) fn expand_with(self, shrink: ShrinkFn<T>) -> Tree<T>
    where
        T: Clone,
    {
        let Tree { value, children } = self;
        let seed = value.clone();
        Tree {
            value,
            children: lazy(move || {
                let next = Rc::clone(&shrink);
                let extra = Rc::clone(&shrink);
                let custom =
                    shrink(&seed).map(move |x| Tree::unfold_with(x, Rc::clone(&extra)));
                Box::new(
                    children()
                        .map(move |child| child.expand_with(Rc::clone(&next)))
                        .chain(custom),
                )
            }),
        }
    }

    /// Discard the existing shrinks and use only those produced by `shrink`.
    pub fn replace_shrinks<F, I>(self, shrink: F) -> Tree<T>
    where
        T: Clone,
        F: Fn(&T) -> I + 'static,
        I: Iterator<Item = T> + 'static,
    {
        Tree::unfold(self.value, shrink)
    }
}

impl<T: Clone + 'static> Tree<T> {
    /// Combine element trees into a tree of vectors.
    ///
    /// Shrinks first drop aligned chunks of elements (largest chunks first,
    /// never going below `min_len`), then shrink one element at a time.
    pub fn interleave(trees: Vec<Tree<T>>, min_len: usize) -> Tree<Vec<T>> {
        let value = trees.iter().map(|tree| tree.value.clone()).collect();
        let trees = Rc::new(trees);
        Tree {
            value,
            children: lazy(move || {
                let n = trees.len();
                let dropping = Rc::clone(&trees);
                let drops = shrink::halves(n)
                    .filter(move |&k| n - k >= min_len)
                    .flat_map(move |k| shrink::removes(k, Rc::clone(&dropping)))
                    .map(move |remaining| Tree::interleave(remaining, min_len));

                let shrinking = Rc::clone(&trees);
                let shrink_one = (0..n).flat_map(move |i| {
                    let trees = Rc::clone(&shrinking);
                    trees[i].children().map(move |child| {
                        let mut next = (*trees).clone();
                        next[i] = child;
                        Tree::interleave(next, min_len)
                    })
                });

                Box::new(drops.chain(shrink_one))
            }),
        }
    }
}

impl<T: Clone + 'static> From<T> for Tree<T> {
    fn from(value: T) -> Self {
        Tree::singleton(value)
    }
}

fn lazy<T, F>(children: F) -> Rc<dyn Fn() -> Forest<T>>
where
    F: Fn() -> Forest<T> + 'static,
{
    Rc::new(children)
}

fn into_shrink_fn<T, F, I>(shrink: F) -> ShrinkFn<T>
where
    F: Fn(&T) -> I + 'static,
    I: Iterator<Item = T> + 'static,
{
    Rc::new(move |x: &T| Box::new(shrink(x)) as Box<dyn Iterator<Item = T>>)
}
