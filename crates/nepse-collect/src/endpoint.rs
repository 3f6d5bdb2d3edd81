//! The fixed set of upstream API endpoints.
//!
//! Endpoint names double as the `data_source` value stamped into records;
//! paths are joined onto the configured base address. [`Endpoint::ALL`]
//! fixes the collection order.

use std::fmt;

/// One upstream API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Floorsheet,
    PriceVolume,
    LiveMarket,
    Summary,
    TopGainers,
    TopLosers,
    NepseIndex,
    SupplyDemand,
}

impl Endpoint {
    /// Every endpoint, in collection order.
    pub const ALL: [Endpoint; 8] = [
        Endpoint::Floorsheet,
        Endpoint::PriceVolume,
        Endpoint::LiveMarket,
        Endpoint::Summary,
        Endpoint::TopGainers,
        Endpoint::TopLosers,
        Endpoint::NepseIndex,
        Endpoint::SupplyDemand,
    ];

    /// Dataset name, stamped into records as `data_source`.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Floorsheet => "floorsheet",
            Endpoint::PriceVolume => "price_volume",
            Endpoint::LiveMarket => "live_market",
            Endpoint::Summary => "summary",
            Endpoint::TopGainers => "top_gainers",
            Endpoint::TopLosers => "top_losers",
            Endpoint::NepseIndex => "nepse_index",
            Endpoint::SupplyDemand => "supply_demand",
        }
    }

    /// URL path under the API base address.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Floorsheet => "/Floorsheet",
            Endpoint::PriceVolume => "/PriceVolume",
            Endpoint::LiveMarket => "/LiveMarket",
            Endpoint::Summary => "/Summary",
            Endpoint::TopGainers => "/TopGainers",
            Endpoint::TopLosers => "/TopLosers",
            Endpoint::NepseIndex => "/NepseIndex",
            Endpoint::SupplyDemand => "/SupplyDemand",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_order_is_fixed() {
        let names: Vec<&str> = Endpoint::ALL.iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            [
                "floorsheet",
                "price_volume",
                "live_market",
                "summary",
                "top_gainers",
                "top_losers",
                "nepse_index",
                "supply_demand",
            ]
        );
    }

    #[test]
    fn paths_match_names() {
        assert_eq!(Endpoint::Floorsheet.path(), "/Floorsheet");
        assert_eq!(Endpoint::PriceVolume.path(), "/PriceVolume");
        assert_eq!(Endpoint::LiveMarket.path(), "/LiveMarket");
        assert_eq!(Endpoint::Summary.path(), "/Summary");
        assert_eq!(Endpoint::TopGainers.path(), "/TopGainers");
        assert_eq!(Endpoint::TopLosers.path(), "/TopLosers");
        assert_eq!(Endpoint::NepseIndex.path(), "/NepseIndex");
        assert_eq!(Endpoint::SupplyDemand.path(), "/SupplyDemand");
    }

    #[test]
    fn display_renders_the_name() {
        assert_eq!(Endpoint::TopGainers.to_string(), "top_gainers");
    }
}
