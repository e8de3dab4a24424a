//! # Remote document schemas
//!
//! Typed views of the PokeAPI JSON documents the pipeline reads. Each struct
//! covers only the fields the records need; anything the API may omit or send
//! as `null` is an `Option` (or an empty `Vec` for lists) so that absence is
//! never turned into a made-up value.
//!
//! - `list`    – paginated `{ count, next, results }` envelopes.
//! - `pokemon` – species, pokemon (variety) and evolution-chain documents.
//! - `moves`   – move documents.
//! - `types`   – type documents with damage relations.
//!
//! Nothing in here fetches; see `scrape` for that.
pub mod list;
pub mod moves;
pub mod pokemon;
pub mod types;

pub use list::{NamedResource, ResourceList};
