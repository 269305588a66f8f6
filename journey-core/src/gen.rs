//! Generator combinators for property-based testing.

use crate::error::{JourneyError, Result};
use crate::{data::*, range::Range, shrink, tree::*};
use std::rc::Rc;

/// A generator for test data of type `T`.
///
/// Generators are explicit, first-class values that can be composed
/// using combinator functions. This is a key difference from
/// type-directed approaches like QuickCheck. Cloning a generator is cheap
/// and shares the underlying function.
pub struct Gen<T> {
    generator: Rc<dyn Fn(Size, Seed) -> Tree<T>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            generator: Rc::clone(&self.generator),
        }
    }
}

impl<T> Gen<T> {
    /// Create a new generator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Size, Seed) -> Tree<T> + 'static,
    {
        Gen {
            generator: Rc::new(f),
        }
    }

    /// Generate a value using the given size and seed.
    pub fn generate(&self, size: Size, seed: Seed) -> Tree<T> {
        (self.generator)(size, seed)
    }
}

impl<T> Gen<T>
where
    T: 'static,
{
    /// Create a generator that always produces the same value.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Gen::new(move |_size, _seed| Tree::singleton(value.clone()))
    }

    /// Map a function over the generated values.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> U + 'static,
        U: 'static,
    {
        let f = Rc::new(f);
        Gen::new(move |size, seed| {
            let f = Rc::clone(&f);
            self.generate(size, seed).map(move |value| f(value))
        })
    }

    /// Bind/flatmap for dependent generation.
    ///
    /// The second generator always runs on the same split seed, so shrinking
    /// the first value regenerates the rest deterministically.
    pub fn bind<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> Gen<U> + 'static,
        U: 'static,
    {
        let f = Rc::new(f);
        Gen::new(move |size, seed| {
            let (seed1, seed2) = seed.split();
            let f = Rc::clone(&f);
            self.generate(size, seed1)
                .bind(move |value| f(value).generate(size, seed2))
        })
    }

    /// Keep the generator's own shrinks and add candidates from `shrink`.
    pub fn shrink_lazy<F, I>(self, shrink: F) -> Gen<T>
    where
        T: Clone,
        F: Fn(&T) -> I + 'static,
        I: Iterator<Item = T> + 'static,
    {
        let shrink: ShrinkFn<T> =
            Rc::new(move |x: &T| Box::new(shrink(x)) as Box<dyn Iterator<Item = T>>);
        Gen::new(move |size, seed| self.generate(size, seed).expand_with(Rc::clone(&shrink)))
    }

    /// Replace the generator's shrinks with candidates from `shrink`.
    pub fn shrink_with<F, I>(self, shrink: F) -> Gen<T>
    where
        T: Clone,
        F: Fn(&T) -> I + 'static,
        I: Iterator<Item = T> + 'static,
    {
        let shrink: ShrinkFn<T> =
            Rc::new(move |x: &T| Box::new(shrink(x)) as Box<dyn Iterator<Item = T>>);
        Gen::new(move |size, seed| {
            Tree::unfold_with(self.generate(size, seed).value, Rc::clone(&shrink))
        })
    }

    /// Choose between generators with equal weight, shrinking toward the first.
    pub fn one_of(choices: Vec<Gen<T>>) -> Result<Self> {
        if choices.is_empty() {
            return Err(JourneyError::InvalidGenerator {
                message: "one_of needs at least one generator".to_string(),
            });
        }
        Gen::frequency(choices.into_iter().map(|gen| (1, gen)).collect())
    }

    /// Choose between generators proportionally to their weights,
    /// shrinking toward the first.
    pub fn frequency(choices: Vec<(u64, Gen<T>)>) -> Result<Self> {
        let total: u64 = choices.iter().map(|(weight, _)| *weight).sum();
        if total == 0 {
            return Err(JourneyError::InvalidGenerator {
                message: "frequency needs a positive total weight".to_string(),
            });
        }

        let choices = Rc::new(choices);
        Ok(Gen::<u64>::from_range(Range::new(0, total - 1))
            .bind(move |ticket| pick_weighted(&choices, ticket)))
    }
}

fn pick_weighted<T>(choices: &[(u64, Gen<T>)], ticket: u64) -> Gen<T> {
    let mut remaining = ticket;
    let index = choices
        .iter()
        .position(|(weight, _)| {
            if remaining < *weight {
                true
            } else {
                remaining -= weight;
                false
            }
        })
        .unwrap_or(choices.len() - 1);
    choices[index].1.clone()
}

impl<A, B> Gen<(A, B)>
where
    A: Clone + 'static,
    B: 'static,
{
    /// Pair two independent generators. Shrinks the first component first.
    pub fn tuple_of(first: Gen<A>, second: Gen<B>) -> Self {
        first.bind(move |a| {
            let a = a.clone();
            second.clone().map(move |b| (a.clone(), b))
        })
    }
}

impl<T> Gen<Vec<T>>
where
    T: Clone + 'static,
{
    /// Generate vectors with a length drawn from `length`.
    ///
    /// Shrinks drop chunks of elements and then shrink single elements,
    /// never going below `length.min`.
    pub fn vec_of(element: Gen<T>, length: Range<usize>) -> Self {
        Gen::new(move |size, seed| {
            let (length_seed, mut seed) = seed.split();
            let span = (length.max - length.min) as u64 + 1;
            let (extra, _) = length_seed.next_bounded(span);
            let n = length.min + extra as usize;

            let trees = (0..n)
                .map(|_| {
                    let (element_seed, next) = seed.split();
                    seed = next;
                    element.generate(size, element_seed)
                })
                .collect();
            Tree::interleave(trees, length.min)
        })
    }
}

impl Gen<String> {
    /// Generate strings over a character generator with a length from `length`.
    pub fn string_of(chars: Gen<char>, length: Range<usize>) -> Self {
        Gen::vec_of(chars, length).map(|chars| chars.into_iter().collect())
    }
}

impl Gen<char> {
    /// ASCII letters, shrinking toward `'a'`.
    pub fn ascii_alpha() -> Self {
        from_alphabet("abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ")
    }

    /// ASCII letters and digits, shrinking toward `'a'`.
    pub fn ascii_alphanumeric() -> Self {
        from_alphabet("abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789")
    }

    /// Decimal digits, shrinking toward `'0'`.
    pub fn digit() -> Self {
        from_alphabet("0123456789")
    }
}

fn from_alphabet(alphabet: &'static str) -> Gen<char> {
    let chars: Rc<Vec<char>> = Rc::new(alphabet.chars().collect());
    let last = chars.len() - 1;
    Gen::<usize>::from_range(Range::new(0, last)).map(move |index| chars[index])
}

/// Primitive generators.
impl Gen<bool> {
    /// Generate a random boolean, shrinking toward `false`.
    pub fn bool() -> Self {
        Gen::new(|_size, seed| {
            let (value, _new_seed) = seed.next_bool();
            if value {
                Tree::with_children(true, vec![Tree::singleton(false)])
            } else {
                Tree::singleton(false)
            }
        })
    }
}

macro_rules! impl_from_range {
    ($($t:ty),*) => {
        $(
            impl Gen<$t> {
                /// Generate values within `range`, shrinking toward its origin.
                pub fn from_range(range: Range<$t>) -> Self {
                    Gen::new(move |_size, seed| {
                        let (min, max) = (range.min as i128, range.max as i128);
                        let span = (max - min + 1) as u128;
                        let offset = if span > u64::MAX as u128 {
                            seed.next_u64().0 as i128
                        } else {
                            seed.next_bounded(span as u64).0 as i128
                        };
                        let origin = range.origin as i128;
                        Tree::unfold(min + offset, move |&x| shrink::towards(origin, x))
                            .map(|x| x as $t)
                    })
                }
            }
        )*
    };
}

impl_from_range!(i32, i64, u32, u64, usize);

impl Gen<i32> {
    /// Generate an integer in the given range.
    pub fn int_range(min: i32, max: i32) -> Self {
        Gen::<i32>::from_range(Range::new(min, max))
    }
}
