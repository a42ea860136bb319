//! Summary analytics over a station catalog.
//!
//! Each derivation feeds one dashboard chart and returns an empty result for
//! an empty catalog.

pub mod aggregate;
pub mod types;
pub mod utility;

pub use aggregate::{installation_timeline, region_distribution, summarize, vendor_distribution};
pub use types::{RegionCount, Summary, VendorShare, YearCount};
