//! Listing snapshot analyses.
//!
//! Each analysis reads its snapshot files afresh and returns owned results;
//! nothing is cached or shared between calls.

pub mod hosts;
pub mod neighborhood;
pub mod room_prices;
pub mod satisfaction;
pub mod types;
pub mod utility;

pub use hosts::{histogram_buckets, host_listings, num_listings};
pub use neighborhood::{ENTIRE_HOME, NeighborhoodMode, neighborhood_rows, price_by_neighborhood};
pub use room_prices::{price_change, room_prices, series_rows};
pub use satisfaction::price_satisfaction;
