//! Data types produced by the analytics derivations.

use serde::Serialize;

/// Number of stations in one province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionCount {
    pub provinsi: String,
    pub count: usize,
}

/// Number of stations installed in one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Station count and proportion for one vendor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorShare {
    pub merk: String,
    pub count: usize,
    /// Percentage of the listed vendors' total.
    pub percent: f64,
}

/// All chart-ready summaries for one sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub regions: Vec<RegionCount>,
    pub timeline: Vec<YearCount>,
    pub vendors: Vec<VendorShare>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty() && self.timeline.is_empty() && self.vendors.is_empty()
    }
}
