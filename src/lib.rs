#![doc = "Chorograph public API"]
mod codec;
mod color;
mod config;
mod dataset;
mod engine;
mod error;
mod fetch;
mod join;
mod render;
mod scale;
mod svg;
mod topology;

pub mod cli;
pub mod commands;

#[doc(inline)]
pub use codec::Granularity;

#[doc(inline)]
pub use color::{NO_DATA, Palette, Rgb};

#[doc(inline)]
pub use config::MapConfig;

#[doc(inline)]
pub use dataset::{Dataset, load_dataset, parse_dataset};

#[doc(inline)]
pub use engine::{RenderOutput, Renderer};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use fetch::fetch_text;

#[doc(inline)]
pub use join::{JoinedValue, join};

#[doc(inline)]
pub use render::{RenderableFeature, map_to_renderable};

#[doc(inline)]
pub use scale::{ColorScale, ScaleSpec, Transform};

#[doc(inline)]
pub use svg::{render_svg, write_svg};

#[doc(inline)]
pub use topology::{FeatureId, Geometry, GeometryCollection, Topology, load_topology};
