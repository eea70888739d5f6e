#![deny(clippy::correctness)]
#![warn(clippy::style)]
#![warn(clippy::complexity)]
#![warn(clippy::perf)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::use_self)] // Not sure about this :/
#![allow(clippy::unreadable_literal)] // I don't like it on hex magic constants
#![allow(clippy::cast_precision_loss)] // I like it, but there are too many which renders it pointless
#![allow(clippy::cast_possible_truncation)] // I like it, but there are too many which renders it pointless
#![allow(clippy::needless_range_loop)] // Too many false positives, not very smart
#![allow(clippy::doc_markdown)] // Too many false positives, not very smart
#![allow(clippy::module_name_repetitions)] // Anti-pattern IMHO
