//! Library to calculate throughput based difficulty and performance attributes
//! for [osu!]standard.
//!
//! ## Description
//!
//! Instead of summing up strains, the aim skill of a map is described by the
//! *throughput* a player needs to hit every movement with a certain
//! probability. Movements are modelled through Fitts' law and corrected for
//! angles, stacks, sliders, and hidden. Tapping is evaluated through strains on
//! multiple timescales and finger control through a strain on rhythm changes.
//!
//! ## Usage
//!
//! ```
//! use rosu_tp::{model::hit_object::{HitObject, Pos}, Beatmap, Difficulty, GameMods};
//!
//! // Build the map, e.g. from a parsed .osu file
//! let map = Beatmap::builder()
//!     .ar(9.0)
//!     .od(8.0)
//!     .hit_objects((0..50).map(|i| {
//!         let x = if i % 2 == 0 { 100.0 } else { 350.0 };
//!
//!         HitObject::circle(Pos::new(x, 200.0), 1000.0 + f64::from(i) * 300.0)
//!     }))
//!     .build();
//!
//! let mods: GameMods = "HDDT".parse().unwrap();
//!
//! // Calculate difficulty attributes
//! let diff_attrs = Difficulty::new()
//!     .mods(mods.bits())
//!     .calculate(&map)
//!     .unwrap();
//!
//! let stars = diff_attrs.stars;
//!
//! // Calculate performance attributes
//! let perf_attrs = map.performance()
//!     // To speed up the calculation significantly, we can re-use the previous
//!     // attributes.
//!     // **Note** that this should only be done if the map, mods, and
//!     // amount of passed objects stay the same. Otherwise, the resulting
//!     // attributes will be incorrect.
//!     .attributes(diff_attrs)
//!     .mods(mods.bits())
//!     .combo(45)
//!     .accuracy(99.2)
//!     .n_misses(1)
//!     .calculate()
//!     .unwrap();
//!
//! let pp = perf_attrs.pp();
//!
//! // Again, we re-use the previous attributes for maximum efficiency.
//! // This time we do it directly instead of through the map.
//! let max_pp = perf_attrs.performance()
//!     .calculate()
//!     .unwrap()
//!     .pp();
//!
//! println!("Stars: {stars} | PP: {pp}/{max_pp}");
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | Enables the `rayon` feature |
//! | `rayon` | Skills and cheese levels are evaluated in parallel. | [`rayon`]
//! | `serde` | Implements `Serialize` and `Deserialize` for maps, attributes, and score states. | [`serde`]
//!
//! Calculation milestones and numerical fallbacks are logged through [`tracing`].
//!
//! [osu!]: https://osu.ppy.sh/home
//! [`rayon`]: https://docs.rs/rayon
//! [`serde`]: https://docs.rs/serde
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::struct_excessive_bools,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[doc(inline)]
pub use self::{
    model::{beatmap::Beatmap, mods::GameMods},
    osu::{Difficulty, Performance},
};

/// Types for osu!standard calculations.
pub mod osu;

/// Types used in and around this crate.
pub mod model;

/// Numerical tools such as root-finding, interpolation, and special functions.
pub mod util;
