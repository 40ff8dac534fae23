//! Types for working with individual-by-site sequence data.
//!
//! The central type is [`SequenceArray`], a two dimensional grid of [`Base`]
//! calls where rows are individuals and columns are sites. It is a thin
//! newtype over an [`ndarray::Array2`], so the usual `ndarray` views and
//! iterators are available through [`Deref`].
//!
//! ## Main Functionality
//!
//!  - Validated construction from strings ([`SequenceArray::from_rows`], [`FromStr`]).
//!  - Column selection with [`SequenceArray::select_sites`], which is what
//!    site filtering is built on.
//!  - A plain text representation (one individual per line) through [`Display`].
//!
//! [`Base`]: crate::base::Base
//! [`Deref`]: std::ops::Deref
//! [`FromStr`]: std::str::FromStr
//! [`Display`]: std::fmt::Display

pub mod array;

pub use array::SequenceArray;
